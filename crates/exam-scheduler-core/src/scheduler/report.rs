use crate::constraints::RejectionReason;
use crate::domain::models::ExamRequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureEntry {
    pub exam_request_id: ExamRequestId,
    pub course_code: String,
    pub reason: FailureReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    NoValidDates,
    NoEligibleRooms,
    InsufficientCapacity,
    ConstraintRejected(RejectionReason),
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureReason::NoValidDates => write!(f, "no valid dates"),
            FailureReason::NoEligibleRooms => write!(f, "no eligible rooms"),
            FailureReason::InsufficientCapacity => write!(f, "insufficient aggregate capacity"),
            FailureReason::ConstraintRejected(reason) => write!(f, "{reason}"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub total_requests: usize,
    pub scheduled: usize,
    pub failed: usize,
    pub failures: Vec<FailureEntry>,
    pub cancelled: bool,
}
