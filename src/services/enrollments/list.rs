use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EnrollmentService;
use crate::models::{ApiResponse, enrollments::responses::EnrollmentListResponse};

pub async fn list_enrollments(
    service: &EnrollmentService,
    request: &HttpRequest,
    class_id: Option<i64>,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_enrollments(class_id).await {
        Ok(items) => {
            let count = items.len() as i64;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                EnrollmentListResponse { items, count },
                "Enrollments retrieved successfully",
            )))
        }
        Err(e) => Ok(ApiResponse::from_error(&e)),
    }
}

pub async fn list_available_students(
    service: &EnrollmentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_students().await {
        Ok(students) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            students,
            "Students retrieved successfully",
        ))),
        Err(e) => Ok(ApiResponse::from_error(&e)),
    }
}
