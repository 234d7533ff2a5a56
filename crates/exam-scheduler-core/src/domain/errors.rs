use thiserror::Error;

/// Fatal errors surfaced by the core. Per-request infeasibility is not an
/// error: it is a `Rejected` value produced by the constraint engine (see
/// `crate::constraints`) and recorded in the run report.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("examination window is missing or malformed")]
    ConfigMissing,

    #[error("repository error: {0}")]
    RepositoryError(String),

    #[error("invalid duration: {0} minutes")]
    InvalidDuration(u32),

    #[error("invalid student count: {0}")]
    InvalidStudentCount(i64),
}
