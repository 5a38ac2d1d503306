use serde_json::Value;

/// Where the panel is in its per-submission lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Everything the view renders.
///
/// Owned by [`crate::QueryPanel`]; callers only ever see clones. After a
/// submission settles, at most one of `result` / `error_message` is set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryState {
    /// Text of the input field.
    pub query_text: String,
    /// Opaque payload from the last successful submission.
    pub result: Option<Value>,
    /// True strictly between request start and its settlement.
    pub is_loading: bool,
    /// Empty when there is no error.
    pub error_message: String,
    pub phase: Phase,
    /// Id of the latest submission; older ones may not settle into state.
    pub generation: u64,
}

impl QueryState {
    pub fn has_error(&self) -> bool {
        !self.error_message.is_empty()
    }
}
