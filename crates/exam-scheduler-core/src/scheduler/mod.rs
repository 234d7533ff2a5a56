pub mod priority;
pub mod report;
pub mod room_packer;

pub use report::{FailureEntry, FailureReason, RunReport};
pub use room_packer::RoomSet;

use crate::constraints::{is_feasible, passes_schedule_window, Feasibility};
use crate::domain::assignment::PlacedExam;
use crate::domain::models::{DepartmentId, Room};
use crate::domain::time::{CalendarDate, WallClockTime};
use crate::domain::{Assignment, DayLedger, DomainError, ExamRequest, ExamWindow};
use crate::ports::ExamRepository;
use priority::order_by_priority;
use room_packer::pack_rooms;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

const STRIDE_MINUTES: i64 = 15;
const WORKING_END_HOUR: u32 = 17;

/// A cooperative cancel flag checked between requests and between candidate
/// dates. Cancelling discards the in-memory batch; no commit occurs.
#[derive(Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Orders requests, enumerates candidate slots, and commits feasible
/// placements. Owns the `DayLedger` for the duration of one run.
pub struct Scheduler {
    repository: Arc<dyn ExamRepository>,
}

impl Scheduler {
    pub fn new(repository: Arc<dyn ExamRepository>) -> Self {
        Self { repository }
    }

    pub async fn run(
        &self,
        department_id: Option<DepartmentId>,
        cancel: &CancellationToken,
    ) -> Result<RunReport, DomainError> {
        tracing::info!(?department_id, "starting scheduling run");

        let window = self.repository.load_window().await?;
        let requests = self.repository.list_pending_requests(department_id).await?;
        let total_requests = requests.len();
        let ordered = order_by_priority(requests);

        let mut room_names: Vec<String> = ordered
            .iter()
            .flat_map(|r| r.allowed_room_names.iter().cloned())
            .collect();
        room_names.sort();
        room_names.dedup();
        let rooms_by_name = self.repository.list_rooms_by_name(&room_names).await?;

        let mut ledger = DayLedger::new();
        let mut batch = Vec::new();
        let mut failures = Vec::new();

        for request in &ordered {
            if cancel.is_cancelled() {
                tracing::warn!("scheduling run cancelled, discarding in-memory batch");
                return Ok(RunReport {
                    total_requests,
                    scheduled: 0,
                    failed: 0,
                    failures: Vec::new(),
                    cancelled: true,
                });
            }

            match Self::schedule_one(request, &window, &rooms_by_name, &mut ledger, cancel) {
                Some(Ok(assignment)) => {
                    tracing::debug!(
                        request_id = request.id,
                        date = %assignment.scheduled_date,
                        "request scheduled"
                    );
                    batch.push(assignment);
                }
                Some(Err(reason)) => {
                    tracing::debug!(request_id = request.id, %reason, "request not scheduled");
                    failures.push(FailureEntry {
                        exam_request_id: request.id,
                        course_code: request.course_code.clone(),
                        reason,
                    });
                }
                None => {
                    tracing::warn!("scheduling run cancelled, discarding in-memory batch");
                    return Ok(RunReport {
                        total_requests,
                        scheduled: 0,
                        failed: 0,
                        failures: Vec::new(),
                        cancelled: true,
                    });
                }
            }
        }

        if let Err(err) = self.repository.persist_assignments(&batch).await {
            tracing::error!(error = %err, "failed to persist assignments, discarding batch");
            return Err(err);
        }

        tracing::info!(
            scheduled = batch.len(),
            failed = failures.len(),
            "scheduling run complete"
        );

        Ok(RunReport {
            total_requests,
            scheduled: batch.len(),
            failed: failures.len(),
            failures,
            cancelled: false,
        })
    }

    /// Attempts to place one request. `None` means the run was cancelled
    /// mid-search; `Some(Err(..))` means every candidate was exhausted.
    fn schedule_one(
        request: &ExamRequest,
        window: &ExamWindow,
        rooms_by_name: &HashMap<String, Room>,
        ledger: &mut DayLedger,
        cancel: &CancellationToken,
    ) -> Option<Result<Assignment, FailureReason>> {
        if request.allowed_room_names.is_empty() {
            return Some(Err(FailureReason::NoEligibleRooms));
        }

        let candidate_rooms: Vec<Room> = request
            .allowed_room_names
            .iter()
            .filter_map(|name| rooms_by_name.get(name).cloned())
            .collect();
        if candidate_rooms.is_empty() {
            return Some(Err(FailureReason::NoEligibleRooms));
        }

        let dates = candidate_dates(request, window);
        if dates.is_empty() {
            return Some(Err(FailureReason::NoValidDates));
        }

        let mut first_reason: Option<FailureReason> = None;

        for date in dates {
            if cancel.is_cancelled() {
                return None;
            }
            for start in candidate_start_times(request.duration_minutes) {
                let end = match start.add_minutes(request.duration_minutes as i64) {
                    Some(end) => end,
                    None => continue,
                };
                if !passes_schedule_window(window, date, start, end) {
                    continue;
                }

                let packed = pack_rooms(
                    &candidate_rooms,
                    request.needs_computer,
                    request.student_count,
                    date,
                    start,
                    end,
                    ledger,
                );
                let room_set = match packed {
                    Some(set) => set,
                    None => {
                        first_reason.get_or_insert(FailureReason::InsufficientCapacity);
                        continue;
                    }
                };
                let room_ids = room_set.all_room_ids();

                match is_feasible(
                    window,
                    date,
                    start,
                    end,
                    request.department_id,
                    request.class_level,
                    request.difficulty,
                    &room_ids,
                    ledger,
                ) {
                    Feasibility::Feasible => {
                        ledger.record(
                            date,
                            PlacedExam {
                                exam_request_id: request.id,
                                department_id: request.department_id,
                                class_level: request.class_level,
                                difficulty: request.difficulty,
                                start_time: start,
                                end_time: end,
                                room_ids: room_ids.clone(),
                            },
                        );
                        return Some(Ok(Assignment {
                            exam_request_id: request.id,
                            primary_room_id: room_set.primary,
                            additional_room_ids: room_set.additional,
                            scheduled_date: date,
                            start_time: start,
                            end_time: end,
                        }));
                    }
                    Feasibility::Rejected(reason) => {
                        first_reason.get_or_insert(FailureReason::ConstraintRejected(reason));
                    }
                }
            }
        }

        Some(Err(first_reason.unwrap_or(FailureReason::InsufficientCapacity)))
    }
}

/// Preferred dates first (filtered to weekdays inside the window, original
/// order preserved), then the window's remaining weekdays ascending.
fn candidate_dates(request: &ExamRequest, window: &ExamWindow) -> Vec<CalendarDate> {
    let mut seen = std::collections::HashSet::new();
    let mut dates = Vec::new();

    for date in &request.preferred_dates {
        if window.contains(*date) && date.is_weekday() && seen.insert(*date) {
            dates.push(*date);
        }
    }
    for date in window.weekdays() {
        if seen.insert(date) {
            dates.push(date);
        }
    }
    dates
}

/// Start times at a fixed 15-minute stride from 09:00, stopping once the
/// exam would run past 17:00.
fn candidate_start_times(duration_minutes: u32) -> Vec<WallClockTime> {
    let mut starts = Vec::new();
    let mut cursor = WallClockTime::from_hm(9, 0).unwrap();
    let working_end = WallClockTime::from_hm(WORKING_END_HOUR, 0).unwrap();
    loop {
        let Some(end) = cursor.add_minutes(duration_minutes as i64) else {
            break;
        };
        if end > working_end {
            break;
        }
        starts.push(cursor);
        let Some(next) = cursor.add_minutes(STRIDE_MINUTES) else {
            break;
        };
        cursor = next;
    }
    starts
}
