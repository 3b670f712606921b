use thiserror::Error;

/// Errors surfaced by single-item operations against the work-tracking
/// platform. Bulk timesheet paths never return these; they degrade to empty
/// or partial results and log instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("work item {0} not found")]
    WorkItemNotFound(i64),

    #[error("upstream returned {status}: {detail}")]
    Upstream { status: u16, detail: String },

    #[error("no credential available for organization '{0}'")]
    MissingCredential(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
