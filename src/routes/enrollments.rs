use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::enrollments::requests::{EnrollRequest, EnrollmentListQuery};
use crate::models::users::entities::UserRole;
use crate::services::EnrollmentService;

// 懒加载的全局 EnrollmentService 实例
static ENROLLMENT_SERVICE: Lazy<EnrollmentService> = Lazy::new(EnrollmentService::new_lazy);

pub async fn enroll_student(
    req: HttpRequest,
    enroll_data: web::Json<EnrollRequest>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .enroll_student(&req, enroll_data.into_inner())
        .await
}

pub async fn list_enrollments(
    req: HttpRequest,
    query: web::Query<EnrollmentListQuery>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .list_enrollments(&req, query.into_inner())
        .await
}

pub async fn list_available_students(req: HttpRequest) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.list_available_students(&req).await
}

pub async fn delete_enrollment(
    req: HttpRequest,
    enrollment_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .delete_enrollment(&req, enrollment_id.into_inner())
        .await
}

pub async fn enrollment_stats(req: HttpRequest) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.get_stats(&req).await
}

// 配置路由
pub fn configure_enrollments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/enrollments")
            // 后注册的中间件先执行，JWT 需在角色检查之前
            .wrap(middlewares::RequireRole::new_any(UserRole::management_roles()))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_enrollments))
                    .route(web::post().to(enroll_student)),
            )
            .route("/stats", web::get().to(enrollment_stats))
            .route("/available-students", web::get().to(list_available_students))
            .route("/{enrollment_id}", web::delete().to(delete_enrollment)),
    );
}
