pub mod auth;
pub mod classes;
pub mod courses;
pub mod enrollments;
pub mod reports;
pub mod system;
pub mod users;

pub use auth::AuthService;
pub use classes::ClassService;
pub use courses::CourseService;
pub use enrollments::EnrollmentService;
pub use reports::ReportService;
pub use system::SystemService;
pub use users::UserService;
