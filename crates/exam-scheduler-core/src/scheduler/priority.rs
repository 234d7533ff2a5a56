//! The scheduling order requests are attempted in (§4.5).

use crate::domain::ExamRequest;
use std::cmp::Reverse;

fn duration_bucket(duration_minutes: u32) -> u8 {
    if duration_minutes >= 120 {
        4
    } else if duration_minutes >= 90 {
        3
    } else if duration_minutes >= 60 {
        2
    } else {
        1
    }
}

/// Higher priority sorts first. Ties are broken by ascending request id for
/// determinism.
fn priority_key(request: &ExamRequest) -> (u8, u8, u8, Reverse<i64>, u8, Reverse<i64>) {
    let student_count_scaled = (request.student_count as f64 / 100.0 * 1000.0) as i64;
    let flexibility_penalty = 5u8.saturating_sub(request.preferred_dates.len().min(5) as u8);
    (
        request.difficulty.priority_rank(),
        duration_bucket(request.duration_minutes),
        request.needs_computer as u8,
        Reverse(-student_count_scaled),
        flexibility_penalty,
        Reverse(request.id),
    )
}

/// Orders requests highest-priority first, per the tuple in §4.5: difficulty
/// rank, duration bucket, needs-computer, student count, flexibility
/// penalty, then ascending request id to break ties deterministically.
pub fn order_by_priority(mut requests: Vec<ExamRequest>) -> Vec<ExamRequest> {
    requests.sort_by(|a, b| priority_key(b).cmp(&priority_key(a)));
    requests
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Difficulty;
    use std::collections::BTreeSet;

    fn request(id: i64, difficulty: Difficulty, duration: u32) -> ExamRequest {
        ExamRequest {
            id,
            course_code: format!("C{id}"),
            class_level: 1,
            instructor: "someone".into(),
            student_count: 30,
            duration_minutes: duration,
            needs_computer: false,
            difficulty,
            preferred_dates: Vec::new(),
            allowed_room_names: BTreeSet::new(),
            department_id: 1,
        }
    }

    #[test]
    fn hard_sorts_before_normal_and_easy() {
        let requests = vec![
            request(1, Difficulty::Easy, 60),
            request(2, Difficulty::Hard, 60),
            request(3, Difficulty::Normal, 60),
        ];
        let ordered = order_by_priority(requests);
        assert_eq!(ordered[0].id, 2);
        assert_eq!(ordered[1].id, 3);
        assert_eq!(ordered[2].id, 1);
    }

    #[test]
    fn ties_break_by_ascending_id() {
        let requests = vec![
            request(5, Difficulty::Easy, 60),
            request(2, Difficulty::Easy, 60),
        ];
        let ordered = order_by_priority(requests);
        assert_eq!(ordered[0].id, 2);
        assert_eq!(ordered[1].id, 5);
    }

    #[test]
    fn longer_duration_outranks_shorter_at_same_difficulty() {
        let requests = vec![
            request(1, Difficulty::Normal, 60),
            request(2, Difficulty::Normal, 150),
        ];
        let ordered = order_by_priority(requests);
        assert_eq!(ordered[0].id, 2);
    }

    proptest::proptest! {
        /// Ordering the same request set twice must yield identical output
        /// (§8: running the scheduler twice on identical inputs must
        /// produce identical order).
        #[test]
        fn prop_ordering_is_deterministic(
            seeds in proptest::collection::vec(
                (0i64..50, 0u8..3u8, 15u32..180),
                1..20,
            ),
        ) {
            let difficulty_from = |tag: u8| match tag {
                0 => Difficulty::Easy,
                1 => Difficulty::Normal,
                _ => Difficulty::Hard,
            };
            let requests: Vec<_> = seeds
                .iter()
                .map(|(id, tag, duration)| request(*id, difficulty_from(*tag), *duration))
                .collect();

            let first = order_by_priority(requests.clone());
            let second = order_by_priority(requests);

            let first_ids: Vec<_> = first.iter().map(|r| r.id).collect();
            let second_ids: Vec<_> = second.iter().map(|r| r.id).collect();
            proptest::prop_assert_eq!(first_ids, second_ids);
        }
    }
}
