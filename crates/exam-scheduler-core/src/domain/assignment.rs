//! The mutable output record the scheduler produces, and the in-memory
//! bookkeeping it uses while a run is in progress.

use super::difficulty::Difficulty;
use super::models::{DepartmentId, ExamRequestId, RoomId};
use super::time::{CalendarDate, WallClockTime};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub exam_request_id: ExamRequestId,
    pub primary_room_id: RoomId,
    pub additional_room_ids: Vec<RoomId>,
    pub scheduled_date: CalendarDate,
    pub start_time: WallClockTime,
    pub end_time: WallClockTime,
}

impl Assignment {
    /// All rooms this assignment occupies, primary first.
    pub fn room_ids(&self) -> Vec<RoomId> {
        let mut rooms = vec![self.primary_room_id];
        rooms.extend(self.additional_room_ids.iter().copied());
        rooms
    }
}

/// One exam already placed on a given date, as the constraint engine needs
/// to see it: its group membership, time range, rooms, and difficulty.
#[derive(Debug, Clone)]
pub struct PlacedExam {
    pub exam_request_id: ExamRequestId,
    pub department_id: DepartmentId,
    pub class_level: u8,
    pub difficulty: Difficulty,
    pub start_time: WallClockTime,
    pub end_time: WallClockTime,
    pub room_ids: Vec<RoomId>,
}

#[derive(Debug, Default, Clone)]
struct DayRecord {
    easy: u32,
    normal: u32,
    hard: u32,
    placements: Vec<PlacedExam>,
}

/// Process-local, per-run bookkeeping the scheduler owns exclusively.
/// Nothing outside one scheduling run observes it.
#[derive(Debug, Default)]
pub struct DayLedger {
    days: HashMap<CalendarDate, DayRecord>,
}

impl DayLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn difficulty_counts(&self, date: CalendarDate) -> (u32, u32, u32) {
        match self.days.get(&date) {
            Some(record) => (record.easy, record.normal, record.hard),
            None => (0, 0, 0),
        }
    }

    pub fn placements_on(&self, date: CalendarDate) -> &[PlacedExam] {
        match self.days.get(&date) {
            Some(record) => &record.placements,
            None => &[],
        }
    }

    /// Records a committed placement: increments the day's difficulty
    /// counter and appends the placement for future feasibility checks.
    pub fn record(&mut self, date: CalendarDate, placed: PlacedExam) {
        let record = self.days.entry(date).or_default();
        match placed.difficulty {
            Difficulty::Easy => record.easy += 1,
            Difficulty::Normal => record.normal += 1,
            Difficulty::Hard => record.hard += 1,
        }
        record.placements.push(placed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wct(h: u32, m: u32) -> WallClockTime {
        WallClockTime::from_hm(h, m).unwrap()
    }

    #[test]
    fn counters_increment_per_difficulty() {
        let mut ledger = DayLedger::new();
        let date = CalendarDate::from_ymd(2024, 1, 15).unwrap();
        ledger.record(
            date,
            PlacedExam {
                exam_request_id: 1,
                department_id: 1,
                class_level: 2,
                difficulty: Difficulty::Hard,
                start_time: wct(9, 0),
                end_time: wct(10, 0),
                room_ids: vec![1],
            },
        );
        assert_eq!(ledger.difficulty_counts(date), (0, 0, 1));
        assert_eq!(ledger.placements_on(date).len(), 1);
    }
}
