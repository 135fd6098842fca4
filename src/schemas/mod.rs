pub mod schema;
pub(crate) mod validation;
pub mod validator;

pub(crate) use schema::completion_schema;
pub use schema::{CompletionSchema, SchemaHandle};
pub use validator::Validator;
