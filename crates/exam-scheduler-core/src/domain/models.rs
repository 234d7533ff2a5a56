//! Immutable value objects the engine consumes read-only.

use super::difficulty::Difficulty;
use super::time::CalendarDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub type RoomId = i64;
pub type ExamRequestId = i64;
pub type DepartmentId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub capacity: u32,
    pub has_computer: bool,
    pub is_active: bool,
    pub department_id: Option<DepartmentId>,
}

/// A lightweight descriptive record. The engine never dereferences through
/// it: `ExamRequest` carries `course_code`/`class_level` directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub code: String,
    pub name: String,
    pub credits: u32,
    pub class_level: u8,
    pub department_id: DepartmentId,
}

impl Course {
    /// A course is "difficult" in the original institutional sense once it
    /// carries 4 or more credits. Retained as a convenience for ingestion
    /// layers; the engine itself only reasons about `Difficulty`.
    pub fn is_difficult(&self) -> bool {
        self.credits >= 4
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamRequest {
    pub id: ExamRequestId,
    pub course_code: String,
    pub class_level: u8,
    pub instructor: String,
    pub student_count: u32,
    pub duration_minutes: u32,
    pub needs_computer: bool,
    pub difficulty: Difficulty,
    pub preferred_dates: Vec<CalendarDate>,
    pub allowed_room_names: BTreeSet<String>,
    pub department_id: DepartmentId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExamWindow {
    pub start_date: CalendarDate,
    pub end_date: CalendarDate,
}

impl ExamWindow {
    pub fn contains(&self, date: CalendarDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Every weekday in `[start_date, end_date]`, ascending.
    pub fn weekdays(&self) -> Vec<CalendarDate> {
        let mut out = Vec::new();
        let mut cursor = self.start_date;
        loop {
            if cursor.is_weekday() {
                out.push(cursor);
            }
            if cursor == self.end_date {
                break;
            }
            cursor = cursor.succ();
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_weekdays_excludes_weekend() {
        let window = ExamWindow {
            start_date: CalendarDate::from_ymd(2024, 1, 15).unwrap(),
            end_date: CalendarDate::from_ymd(2024, 1, 21).unwrap(),
        };
        assert_eq!(window.weekdays().len(), 5);
    }

    #[test]
    fn course_is_difficult_at_four_credits() {
        let course = Course {
            code: "CS401".into(),
            name: "Distributed Systems".into(),
            credits: 4,
            class_level: 4,
            department_id: 1,
        };
        assert!(course.is_difficult());
    }
}
