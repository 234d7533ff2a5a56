//! Builder-style fixtures for constructing domain values in tests without
//! repeating every field each time.

use crate::domain::models::{DepartmentId, RoomId};
use crate::domain::{CalendarDate, Course, Difficulty, ExamRequest, ExamWindow, Room};
use std::collections::BTreeSet;

pub fn sample_room(id: RoomId, capacity: u32) -> Room {
    Room {
        id,
        name: format!("R{id}"),
        capacity,
        has_computer: false,
        is_active: true,
        department_id: None,
    }
}

pub fn sample_room_with_computer(id: RoomId, capacity: u32) -> Room {
    Room {
        has_computer: true,
        ..sample_room(id, capacity)
    }
}

pub fn sample_course(code: &str, credits: u32, class_level: u8, department_id: DepartmentId) -> Course {
    Course {
        code: code.to_string(),
        name: format!("Course {code}"),
        credits,
        class_level,
        department_id,
    }
}

/// A minimal, schedulable exam request. Override fields on the returned
/// value for scenario-specific variations.
pub fn sample_exam_request(id: i64) -> ExamRequest {
    ExamRequest {
        id,
        course_code: format!("C{id}"),
        class_level: 1,
        instructor: "instructor".to_string(),
        student_count: 30,
        duration_minutes: 60,
        needs_computer: false,
        difficulty: Difficulty::Easy,
        preferred_dates: Vec::new(),
        allowed_room_names: BTreeSet::new(),
        department_id: 1,
    }
}

pub fn with_allowed_rooms(mut request: ExamRequest, names: &[&str]) -> ExamRequest {
    request.allowed_room_names = names.iter().map(|n| n.to_string()).collect();
    request
}

pub fn with_preferred_dates(mut request: ExamRequest, dates: &[CalendarDate]) -> ExamRequest {
    request.preferred_dates = dates.to_vec();
    request
}

/// A Monday-through-Friday window starting at the given date.
pub fn week_window(start: CalendarDate) -> ExamWindow {
    let mut end = start;
    for _ in 0..4 {
        end = end.succ();
    }
    ExamWindow {
        start_date: start,
        end_date: end,
    }
}
