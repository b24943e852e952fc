//! Engine events
//!
//! What a running engine reports to an optional observer. Observation is
//! best-effort and never changes how the engine behaves.

/// Something observable that happened during a drive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// About to send the turn sequence to the transport
    Request { depth: usize, iteration: usize },

    /// The model produced non-empty text
    AssistantText { depth: usize, text: String },

    /// About to dispatch a tool call
    ToolCall { depth: usize, name: String },

    /// The iteration ceiling ended the drive
    IterationLimit { depth: usize, limit: usize },
}

impl EngineEvent {
    /// Nesting level of the engine that emitted this event
    pub fn depth(&self) -> usize {
        match self {
            EngineEvent::Request { depth, .. }
            | EngineEvent::AssistantText { depth, .. }
            | EngineEvent::ToolCall { depth, .. }
            | EngineEvent::IterationLimit { depth, .. } => *depth,
        }
    }
}

/// Observer of engine events
pub trait LogSink: Send + Sync {
    fn log(&self, event: &EngineEvent);
}

impl<F> LogSink for F
where
    F: Fn(&EngineEvent) + Send + Sync,
{
    fn log(&self, event: &EngineEvent) {
        self(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_closure_sink() {
        let seen = Mutex::new(Vec::new());
        let sink = |event: &EngineEvent| seen.lock().unwrap().push(event.depth());

        sink.log(&EngineEvent::Request { depth: 0, iteration: 1 });
        sink.log(&EngineEvent::ToolCall { depth: 2, name: "read_file".into() });

        assert_eq!(*seen.lock().unwrap(), vec![0, 2]);
    }
}
