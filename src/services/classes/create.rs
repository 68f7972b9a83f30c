use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ClassService, ensure_teaching_staff};
use crate::models::{ApiResponse, ErrorCode, classes::requests::CreateClassRequest};

pub async fn create_class(
    service: &ClassService,
    request: &HttpRequest,
    mut req: CreateClassRequest,
) -> ActixResult<HttpResponse> {
    req.class_code = req.class_code.trim().to_string();
    req.class_name = req.class_name.trim().to_string();
    req.semester = req.semester.trim().to_string();

    if req.class_code.is_empty() || req.class_name.is_empty() || req.semester.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Class code, class name and semester are required",
        )));
    }

    if req.max_students.is_some_and(|m| m <= 0) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Maximum students must be a positive number",
        )));
    }

    let storage = service.get_storage(request);

    // 课程必须存在
    match storage.get_course_by_id(req.course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, "Course not found")));
        }
        Err(e) => return Ok(ApiResponse::from_error(&e)),
    }

    if let Some(lecturer_id) = req.lecturer_id
        && let Err(e) = ensure_teaching_staff(&storage, lecturer_id).await
    {
        return Ok(ApiResponse::from_error(&e));
    }

    match storage.create_class(req).await {
        Ok(class) => {
            info!("Class {} created", class.class_code);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(class, "Class created successfully")))
        }
        Err(e) => Ok(ApiResponse::from_error(&e)),
    }
}
