use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed additional_room_ids JSON for assignment {assignment_id}: {message}")]
    MalformedAdditionalRooms { assignment_id: i64, message: String },

    #[error("examination window setting '{0}' is missing")]
    MissingSetting(&'static str),

    #[error("examination window setting '{key}' has an invalid date: {value}")]
    InvalidSettingDate { key: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl From<StorageError> for exam_scheduler_core::DomainError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::MissingSetting(_) | StorageError::InvalidSettingDate { .. } => {
                exam_scheduler_core::DomainError::ConfigMissing
            }
            other => exam_scheduler_core::DomainError::RepositoryError(other.to_string()),
        }
    }
}
