pub mod repository;

pub use repository::ExamRepository;
