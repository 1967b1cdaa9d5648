pub mod assignments;
pub mod courses;
pub mod grades;
pub mod notifications;
pub mod stats;
pub mod submissions;

pub use assignments::AssignmentService;
pub use courses::CourseService;
pub use grades::GradeService;
pub use notifications::NotificationService;
pub use stats::StatsService;
pub use submissions::SubmissionService;
