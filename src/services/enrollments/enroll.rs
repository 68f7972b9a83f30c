use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::EnrollmentService;
use crate::models::{ApiResponse, enrollments::requests::EnrollRequest};

pub async fn enroll_student(
    service: &EnrollmentService,
    request: &HttpRequest,
    req: EnrollRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.enroll_student(req.class_id, req.student_id).await {
        Ok(enrollment) => {
            info!(
                "Student {} enrolled in class {}",
                enrollment.student_id, enrollment.class_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                enrollment,
                "Student enrolled successfully",
            )))
        }
        Err(e) => Ok(ApiResponse::from_error(&e)),
    }
}
