use crate::error::{Result, StorageError};
use async_trait::async_trait;
use chrono::NaiveDate;
use exam_scheduler_core::domain::models::{DepartmentId, Room, RoomId};
use exam_scheduler_core::{Assignment, CalendarDate, Difficulty, DomainError, ExamRequest, ExamRepository, ExamWindow, WallClockTime};
use sqlx::{Row, SqlitePool};
use std::collections::{BTreeSet, HashMap};

pub struct SqliteExamRepository {
    pool: SqlitePool,
}

impl SqliteExamRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn setting(&self, key: &'static str) -> Result<String> {
        let row = sqlx::query("SELECT value FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        row.map(|r| r.get::<String, _>("value"))
            .ok_or(StorageError::MissingSetting(key))
    }

    fn parse_setting_date(key: &'static str, value: &str) -> Result<CalendarDate> {
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(CalendarDate::from_naive)
            .map_err(|_| StorageError::InvalidSettingDate {
                key,
                value: value.to_string(),
            })
    }
}

fn row_to_exam_request(row: &sqlx::sqlite::SqliteRow) -> Result<ExamRequest> {
    let difficulty_raw: String = row.get("difficulty");
    let difficulty = Difficulty::parse(&difficulty_raw).unwrap_or(Difficulty::Normal);

    let preferred_dates_json: String = row.get("preferred_dates_json");
    let preferred_dates: Vec<String> = serde_json::from_str(&preferred_dates_json).unwrap_or_default();
    let preferred_dates = preferred_dates
        .iter()
        .filter_map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        .map(CalendarDate::from_naive)
        .collect();

    let allowed_room_names_json: String = row.get("allowed_room_names_json");
    let allowed_room_names: BTreeSet<String> =
        serde_json::from_str(&allowed_room_names_json).unwrap_or_default();

    Ok(ExamRequest {
        id: row.get("id"),
        course_code: row.get("course_code"),
        class_level: row.get::<i64, _>("class_level") as u8,
        instructor: row.get("instructor"),
        student_count: row.get::<i64, _>("student_count") as u32,
        duration_minutes: row.get::<i64, _>("duration_minutes") as u32,
        needs_computer: row.get::<i64, _>("needs_computer") != 0,
        difficulty,
        preferred_dates,
        allowed_room_names,
        department_id: row.get("department_id"),
    })
}

fn row_to_room(row: &sqlx::sqlite::SqliteRow) -> Room {
    Room {
        id: row.get("id"),
        name: row.get("name"),
        capacity: row.get::<i64, _>("capacity") as u32,
        has_computer: row.get::<i64, _>("has_computer") != 0,
        is_active: row.get::<i64, _>("is_active") != 0,
        department_id: row.try_get::<Option<DepartmentId>, _>("department_id").ok().flatten(),
    }
}

#[async_trait]
impl ExamRepository for SqliteExamRepository {
    async fn load_window(&self) -> std::result::Result<ExamWindow, DomainError> {
        let start = self
            .setting("exam_week_start")
            .await
            .map_err(to_domain_error)?;
        let end = self
            .setting("exam_week_end")
            .await
            .map_err(to_domain_error)?;

        let start_date =
            Self::parse_setting_date("exam_week_start", &start).map_err(to_domain_error)?;
        let end_date = Self::parse_setting_date("exam_week_end", &end).map_err(to_domain_error)?;

        Ok(ExamWindow {
            start_date,
            end_date,
        })
    }

    async fn list_rooms_by_name(
        &self,
        names: &[String],
    ) -> std::result::Result<HashMap<String, Room>, DomainError> {
        let mut rooms = HashMap::new();
        for name in names {
            let row = sqlx::query(
                "SELECT id, name, capacity, has_computer, is_active, department_id FROM rooms WHERE name = ? AND is_active = 1",
            )
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| to_domain_error(StorageError::Database(e)))?;

            if let Some(row) = row {
                rooms.insert(name.clone(), row_to_room(&row));
            }
        }
        Ok(rooms)
    }

    async fn list_pending_requests(
        &self,
        department_id: Option<DepartmentId>,
    ) -> std::result::Result<Vec<ExamRequest>, DomainError> {
        let rows = match department_id {
            Some(dept) => sqlx::query(
                "SELECT id, course_code, class_level, instructor, student_count, duration_minutes, \
                 needs_computer, difficulty, preferred_dates_json, allowed_room_names_json, department_id \
                 FROM exam_requests WHERE status = 'pending' AND department_id = ?",
            )
            .bind(dept)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| to_domain_error(StorageError::Database(e)))?,
            None => sqlx::query(
                "SELECT id, course_code, class_level, instructor, student_count, duration_minutes, \
                 needs_computer, difficulty, preferred_dates_json, allowed_room_names_json, department_id \
                 FROM exam_requests WHERE status = 'pending'",
            )
            .fetch_all(&self.pool)
            .await
            .map_err(|e| to_domain_error(StorageError::Database(e)))?,
        };

        rows.iter()
            .map(|row| row_to_exam_request(row).map_err(to_domain_error))
            .collect()
    }

    async fn persist_assignments(
        &self,
        batch: &[Assignment],
    ) -> std::result::Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| to_domain_error(StorageError::Database(e)))?;

        for assignment in batch {
            let additional_rooms_json = serde_json::to_string(&assignment.additional_room_ids)
                .expect("serializing a Vec<i64> never fails");

            sqlx::query(
                "INSERT INTO assignments \
                 (exam_request_id, primary_room_id, additional_room_ids_json, scheduled_date, start_time, end_time) \
                 VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(assignment.exam_request_id)
            .bind(assignment.primary_room_id)
            .bind(additional_rooms_json)
            .bind(assignment.scheduled_date.to_string())
            .bind(assignment.start_time.to_string())
            .bind(assignment.end_time.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| to_domain_error(StorageError::Database(e)))?;

            sqlx::query("UPDATE exam_requests SET status = 'planned' WHERE id = ?")
                .bind(assignment.exam_request_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| to_domain_error(StorageError::Database(e)))?;
        }

        tx.commit()
            .await
            .map_err(|e| to_domain_error(StorageError::Database(e)))?;

        Ok(())
    }
}

fn to_domain_error(err: StorageError) -> DomainError {
    err.into()
}

/// Reconstructs the ordered additional-room-id list persisted for one
/// assignment. Exposed for callers (the CLI's report printer, an
/// eventual API layer) that need to announce the full room set.
pub fn parse_additional_room_ids(assignment_id: i64, json: &str) -> Result<Vec<RoomId>> {
    serde_json::from_str(json).map_err(|e| StorageError::MalformedAdditionalRooms {
        assignment_id,
        message: e.to_string(),
    })
}
