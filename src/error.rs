use thiserror::Error;

/// Errors surfaced by the data pipeline.
///
/// `Load` and `Data` are fatal at startup; `Input` is recoverable and shown in
/// the UI so the user can pick another range.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DashboardError {
    #[error("failed to load dataset: {0}")]
    Load(String),

    #[error("invalid date range: {0}")]
    Input(String),

    #[error("unusable dataset: {0}")]
    Data(String),
}

impl DashboardError {
    /// Wrap a loader failure, keeping the full context chain in the message.
    pub fn load(err: anyhow::Error) -> Self {
        DashboardError::Load(format!("{err:#}"))
    }

    pub fn is_recoverable(&self) -> bool {
        matches!(self, DashboardError::Input(_))
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
