pub mod auth;

pub mod users;

pub mod reports;

pub mod courses;

pub mod classes;

pub mod enrollments;

pub mod system;

pub use auth::configure_auth_routes;
pub use classes::configure_classes_routes;
pub use courses::configure_courses_routes;
pub use enrollments::configure_enrollments_routes;
pub use reports::configure_reports_routes;
pub use system::configure_system_routes;
pub use users::configure_user_routes;

use actix_web::web;

/// 注册全部 API 路由
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_system_routes)
        .configure(configure_auth_routes)
        .configure(configure_user_routes)
        .configure(configure_reports_routes)
        .configure(configure_courses_routes)
        .configure(configure_classes_routes)
        .configure(configure_enrollments_routes);
}
