//! Capacity-splitting room selection, bounded to three rooms (§4.5).

use crate::domain::assignment::DayLedger;
use crate::domain::models::{Room, RoomId};
use crate::domain::time::{overlaps, CalendarDate, WallClockTime};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSet {
    pub primary: RoomId,
    pub additional: Vec<RoomId>,
}

impl RoomSet {
    pub fn all_room_ids(&self) -> Vec<RoomId> {
        let mut ids = vec![self.primary];
        ids.extend(self.additional.iter().copied());
        ids
    }
}

fn is_available(
    room: &Room,
    date: CalendarDate,
    start: WallClockTime,
    end: WallClockTime,
    ledger: &DayLedger,
) -> bool {
    !ledger.placements_on(date).iter().any(|placed| {
        placed.room_ids.contains(&room.id) && overlaps(start, end, placed.start_time, placed.end_time)
    })
}

/// Selects up to three rooms from `candidates` whose combined capacity
/// covers `student_count`, preferring the fewest rooms and, within a room
/// count, the highest aggregate capacity via descending-capacity ordering.
/// Returns `None` when no combination of at most three rooms suffices.
pub fn pack_rooms(
    candidates: &[Room],
    needs_computer: bool,
    student_count: u32,
    date: CalendarDate,
    start: WallClockTime,
    end: WallClockTime,
    ledger: &DayLedger,
) -> Option<RoomSet> {
    let mut eligible: Vec<&Room> = candidates
        .iter()
        .filter(|room| room.is_active)
        .filter(|room| !needs_computer || room.has_computer)
        .filter(|room| is_available(room, date, start, end, ledger))
        .collect();

    if eligible.is_empty() {
        return None;
    }

    eligible.sort_by(|a, b| b.capacity.cmp(&a.capacity).then(a.id.cmp(&b.id)));

    if let Some(room) = eligible.iter().find(|r| r.capacity >= student_count) {
        return Some(RoomSet {
            primary: room.id,
            additional: Vec::new(),
        });
    }

    for group_size in 2..=3 {
        if let Some(combo) = find_combination(&eligible, group_size, student_count) {
            let mut sorted = combo;
            sorted.sort_by(|a, b| b.capacity.cmp(&a.capacity).then(a.id.cmp(&b.id)));
            let primary = sorted[0].id;
            let additional = sorted[1..].iter().map(|r| r.id).collect();
            return Some(RoomSet { primary, additional });
        }
    }

    None
}

/// Lexicographic search, in descending-capacity order, for the first
/// `group_size`-room combination whose summed capacity covers
/// `student_count`.
fn find_combination<'a>(
    rooms: &[&'a Room],
    group_size: usize,
    student_count: u32,
) -> Option<Vec<&'a Room>> {
    fn recurse<'a>(
        rooms: &[&'a Room],
        start_idx: usize,
        remaining: usize,
        acc: &mut Vec<&'a Room>,
        student_count: u32,
    ) -> Option<Vec<&'a Room>> {
        if remaining == 0 {
            let total: u32 = acc.iter().map(|r| r.capacity).sum();
            return if total >= student_count {
                Some(acc.clone())
            } else {
                None
            };
        }
        for idx in start_idx..rooms.len() {
            acc.push(rooms[idx]);
            if let Some(found) = recurse(rooms, idx + 1, remaining - 1, acc, student_count) {
                return Some(found);
            }
            acc.pop();
        }
        None
    }

    let mut acc = Vec::with_capacity(group_size);
    recurse(rooms, 0, group_size, &mut acc, student_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(id: RoomId, capacity: u32) -> Room {
        Room {
            id,
            name: format!("R{id}"),
            capacity,
            has_computer: false,
            is_active: true,
            department_id: None,
        }
    }

    fn t(h: u32, m: u32) -> WallClockTime {
        WallClockTime::from_hm(h, m).unwrap()
    }

    #[test]
    fn single_room_preferred_when_sufficient() {
        let rooms = vec![room(1, 60), room(2, 40)];
        let ledger = DayLedger::new();
        let date = CalendarDate::from_ymd(2024, 1, 15).unwrap();
        let packed = pack_rooms(&rooms, false, 40, date, t(9, 0), t(10, 30), &ledger).unwrap();
        assert_eq!(packed.primary, 1);
        assert!(packed.additional.is_empty());
    }

    #[test]
    fn falls_back_to_two_room_combination() {
        let rooms = vec![room(1, 40), room(2, 40), room(3, 40)];
        let ledger = DayLedger::new();
        let date = CalendarDate::from_ymd(2024, 1, 15).unwrap();
        let packed = pack_rooms(&rooms, false, 75, date, t(9, 0), t(10, 30), &ledger).unwrap();
        assert_eq!(packed.all_room_ids().len(), 2);
        let total: u32 = packed
            .all_room_ids()
            .iter()
            .map(|id| rooms.iter().find(|r| r.id == *id).unwrap().capacity)
            .sum();
        assert!(total >= 75);
    }

    #[test]
    fn insufficient_capacity_returns_none() {
        let rooms = vec![room(1, 30), room(2, 30)];
        let ledger = DayLedger::new();
        let date = CalendarDate::from_ymd(2024, 1, 15).unwrap();
        assert!(pack_rooms(&rooms, false, 100, date, t(9, 0), t(10, 30), &ledger).is_none());
    }

    #[test]
    fn computer_requirement_filters_rooms() {
        let mut rooms = vec![room(1, 60)];
        rooms[0].has_computer = false;
        let ledger = DayLedger::new();
        let date = CalendarDate::from_ymd(2024, 1, 15).unwrap();
        assert!(pack_rooms(&rooms, true, 40, date, t(9, 0), t(10, 30), &ledger).is_none());
    }
}
