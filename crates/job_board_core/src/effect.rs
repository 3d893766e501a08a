#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the job feed once.
    LoadJobs { source: String },
    /// Render the current view and persist it.
    WritePage,
}
