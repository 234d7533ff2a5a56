//! Pure feasibility predicates over a candidate placement. Each rule is
//! independently testable; the scheduler never re-implements any of them.

use crate::domain::assignment::DayLedger;
use crate::domain::models::{DepartmentId, RoomId};
use crate::domain::time::{gap_minutes, overlaps, CalendarDate, WallClockTime};
use crate::domain::{Difficulty, ExamWindow};
use thiserror::Error;

const WORKING_START_HOUR: u32 = 9;
const WORKING_END_HOUR: u32 = 17;
const MINIMUM_GAP_MINUTES: i64 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectionReason {
    #[error("date is outside the examination window")]
    OutsideWindow,
    #[error("start or end time falls outside working hours")]
    OutsideWorkingHours,
    #[error("overlaps a forbidden interval")]
    ForbiddenInterval,
    #[error("conflicts with the day's difficulty composition")]
    DifficultyComposition,
    #[error("conflicts with another exam of the same class level")]
    ClassLevelConflict,
    #[error("insufficient gap from another exam sharing a room")]
    InsufficientGap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feasibility {
    Feasible,
    Rejected(RejectionReason),
}

impl Feasibility {
    pub fn is_feasible(&self) -> bool {
        matches!(self, Feasibility::Feasible)
    }
}

fn window_membership(window: &ExamWindow, date: CalendarDate) -> bool {
    window.contains(date) && date.is_weekday()
}

fn working_hours(start: WallClockTime, end: WallClockTime) -> bool {
    let working_start = WallClockTime::from_hm(WORKING_START_HOUR, 0).unwrap();
    let working_end = WallClockTime::from_hm(WORKING_END_HOUR, 0).unwrap();
    working_start <= start && end <= working_end
}

fn forbidden_interval(date: CalendarDate, start: WallClockTime, end: WallClockTime) -> bool {
    let midday_start = WallClockTime::from_hm(12, 15).unwrap();
    let midday_end = WallClockTime::from_hm(13, 0).unwrap();
    if overlaps(start, end, midday_start, midday_end) {
        return false;
    }
    if date.is_friday() {
        let friday_start = WallClockTime::from_hm(12, 0).unwrap();
        let friday_end = WallClockTime::from_hm(13, 30).unwrap();
        if overlaps(start, end, friday_start, friday_end) {
            return false;
        }
    }
    true
}

/// A Hard exam locks the day; Normal and Easy may freely mix on non-Hard
/// days.
fn difficulty_composition(ledger: &DayLedger, date: CalendarDate, candidate: Difficulty) -> bool {
    let (easy, normal, hard) = ledger.difficulty_counts(date);
    match candidate {
        Difficulty::Hard => easy == 0 && normal == 0 && hard == 0,
        Difficulty::Normal | Difficulty::Easy => hard == 0,
    }
}

fn class_level_conflict(
    ledger: &DayLedger,
    date: CalendarDate,
    department_id: DepartmentId,
    class_level: u8,
    start: WallClockTime,
    end: WallClockTime,
) -> bool {
    !ledger.placements_on(date).iter().any(|placed| {
        placed.department_id == department_id
            && placed.class_level == class_level
            && overlaps(start, end, placed.start_time, placed.end_time)
    })
}

fn minimum_gap(
    ledger: &DayLedger,
    date: CalendarDate,
    proposed_rooms: &[RoomId],
    start: WallClockTime,
    end: WallClockTime,
) -> bool {
    ledger.placements_on(date).iter().all(|placed| {
        let shares_room = placed.room_ids.iter().any(|r| proposed_rooms.contains(r));
        if !shares_room {
            return true;
        }
        if overlaps(start, end, placed.start_time, placed.end_time) {
            return false;
        }
        let gap = if placed.end_time <= start {
            gap_minutes(placed.end_time, start)
        } else {
            gap_minutes(end, placed.start_time)
        };
        gap >= MINIMUM_GAP_MINUTES
    })
}

/// Rules 1–3 of §4.4: window membership, working hours, and the forbidden
/// midday interval. Exposed so the scheduler can pre-filter candidate
/// (date, start) pairs before spending effort on room packing.
pub fn passes_schedule_window(
    window: &ExamWindow,
    date: CalendarDate,
    start: WallClockTime,
    end: WallClockTime,
) -> bool {
    window_membership(window, date) && working_hours(start, end) && forbidden_interval(date, start, end)
}

/// The constraint engine's single entry point. Rules are evaluated
/// cheapest-first with short-circuit on the first failure.
#[allow(clippy::too_many_arguments)]
pub fn is_feasible(
    window: &ExamWindow,
    date: CalendarDate,
    start: WallClockTime,
    end: WallClockTime,
    department_id: DepartmentId,
    class_level: u8,
    difficulty: Difficulty,
    proposed_rooms: &[RoomId],
    ledger: &DayLedger,
) -> Feasibility {
    if !window_membership(window, date) {
        return Feasibility::Rejected(RejectionReason::OutsideWindow);
    }
    if !working_hours(start, end) {
        return Feasibility::Rejected(RejectionReason::OutsideWorkingHours);
    }
    if !forbidden_interval(date, start, end) {
        return Feasibility::Rejected(RejectionReason::ForbiddenInterval);
    }
    if !difficulty_composition(ledger, date, difficulty) {
        return Feasibility::Rejected(RejectionReason::DifficultyComposition);
    }
    if !class_level_conflict(ledger, date, department_id, class_level, start, end) {
        return Feasibility::Rejected(RejectionReason::ClassLevelConflict);
    }
    if !minimum_gap(ledger, date, proposed_rooms, start, end) {
        return Feasibility::Rejected(RejectionReason::InsufficientGap);
    }
    Feasibility::Feasible
}
