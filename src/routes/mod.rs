pub mod attendance;

pub mod auth;

pub mod catalog;

pub mod classes;

pub mod courses;

pub mod dashboard;

pub mod enrollments;

pub mod grades;

pub mod profile;

pub mod users;

pub mod frontend;

pub use attendance::configure_attendance_routes;
pub use auth::configure_auth_routes;
pub use catalog::configure_catalog_routes;
pub use classes::configure_classes_routes;
pub use courses::configure_course_routes;
pub use dashboard::configure_dashboard_routes;
pub use enrollments::configure_enrollment_routes;
pub use frontend::configure_frontend_routes;
pub use grades::configure_grade_routes;
pub use profile::{configure_profile_routes, configure_storage_routes};
pub use users::configure_user_routes;
