pub mod constraints;
pub mod domain;
pub mod ports;
pub mod scheduler;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use domain::{
    Assignment, CalendarDate, Course, DayLedger, Difficulty, DomainError, Duration, ExamRequest,
    ExamWindow, Room, WallClockTime,
};

pub use ports::ExamRepository;

pub use constraints::{is_feasible, passes_schedule_window, Feasibility, RejectionReason};

pub use scheduler::{CancellationToken, FailureEntry, FailureReason, RunReport, Scheduler};
