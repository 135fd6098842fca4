use super::steps::AgentStep;
use tokio::sync::mpsc::UnboundedSender;
use tracing::info;

/// Destination for progress events emitted by the pipeline.
///
/// Events are delivered synchronously and in emission order. Implementations
/// must not block: the pipeline waits for `emit` to return before moving on.
pub trait ProgressSink: Send {
    fn emit(&mut self, step: AgentStep);
}

impl ProgressSink for Vec<AgentStep> {
    fn emit(&mut self, step: AgentStep) {
        self.push(step);
    }
}

impl ProgressSink for UnboundedSender<AgentStep> {
    fn emit(&mut self, step: AgentStep) {
        // receiver dropped: the caller stopped listening
        let _ = self.send(step);
    }
}

/// Adapts a closure into a [`ProgressSink`].
pub struct FnSink<F>(pub F);

impl<F> ProgressSink for FnSink<F>
where
    F: FnMut(AgentStep) + Send,
{
    fn emit(&mut self, step: AgentStep) {
        (self.0)(step)
    }
}

/// Sink that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl ProgressSink for NoopSink {
    fn emit(&mut self, _step: AgentStep) {}
}

/// Log a step and hand it to the sink.
pub(crate) fn report(sink: &mut dyn ProgressSink, step: AgentStep) {
    info!(target: "tripagent::steps", "{}", step.describe());
    sink.emit(step);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::steps::{AgentName, StepStatus};

    #[test]
    fn test_vec_sink_preserves_order() {
        let mut steps: Vec<AgentStep> = Vec::new();
        report(&mut steps, AgentStep::running(AgentName::Preference, "a"));
        report(&mut steps, AgentStep::completed(AgentName::Preference, "b"));

        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].status, StepStatus::Running);
        assert_eq!(steps[1].status, StepStatus::Completed);
    }

    #[test]
    fn test_fn_sink() {
        let mut seen = Vec::new();
        {
            let mut sink = FnSink(|step: AgentStep| seen.push(step.message));
            report(&mut sink, AgentStep::running(AgentName::Research, "searching"));
        }
        assert_eq!(seen, vec!["searching".to_string()]);
    }

    #[tokio::test]
    async fn test_channel_sink() {
        let (mut tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        report(&mut tx, AgentStep::running(AgentName::Itinerary, "building"));
        drop(tx);

        let step = rx.recv().await.unwrap();
        assert_eq!(step.agent_name, AgentName::Itinerary);
        assert!(rx.recv().await.is_none());
    }

    #[test]
    fn test_channel_sink_ignores_closed_receiver() {
        let (mut tx, rx) = tokio::sync::mpsc::unbounded_channel::<AgentStep>();
        drop(rx);
        tx.emit(AgentStep::running(AgentName::Research, "nobody listening"));
    }
}
