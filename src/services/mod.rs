pub mod decoder;
pub mod openai_client;
pub(crate) mod pipeline;
pub mod prompts;
pub(crate) mod stages;
pub mod template;
