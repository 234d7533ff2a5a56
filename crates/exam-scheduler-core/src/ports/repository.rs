use crate::domain::models::{DepartmentId, Room};
use crate::domain::{Assignment, DomainError, ExamRequest, ExamWindow};
use async_trait::async_trait;
use std::collections::HashMap;

/// The only boundary the engine crosses. Implementations own whatever
/// storage technology they like; the core depends on this trait alone.
#[async_trait]
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait ExamRepository: Send + Sync {
    /// Loads the configured examination window. Fails with
    /// `DomainError::ConfigMissing` when the window settings are absent or
    /// malformed.
    async fn load_window(&self) -> Result<ExamWindow, DomainError>;

    /// Resolves room display names to `Room` records. Names with no match
    /// are simply absent from the returned map.
    async fn list_rooms_by_name(
        &self,
        names: &[String],
    ) -> Result<HashMap<String, Room>, DomainError>;

    /// Lists pending exam requests, optionally restricted to one
    /// department.
    async fn list_pending_requests(
        &self,
        department_id: Option<DepartmentId>,
    ) -> Result<Vec<ExamRequest>, DomainError>;

    /// Persists a full run's assignments atomically: either all of them
    /// become durable or none do.
    async fn persist_assignments(&self, batch: &[Assignment]) -> Result<(), DomainError>;
}
