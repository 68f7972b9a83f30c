use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ClassService, ensure_teaching_staff};
use crate::models::{ApiResponse, ErrorCode, classes::requests::UpdateClassRequest};

pub async fn update_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    req: UpdateClassRequest,
) -> ActixResult<HttpResponse> {
    if req.max_students.is_some_and(|m| m <= 0) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Maximum students must be a positive number",
        )));
    }

    let storage = service.get_storage(request);

    if let Some(lecturer_id) = req.lecturer_id
        && let Err(e) = ensure_teaching_staff(&storage, lecturer_id).await
    {
        return Ok(ApiResponse::from_error(&e));
    }

    match storage.update_class(class_id, req).await {
        Ok(Some(class)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            class,
            "Class updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::NotFound, "Class not found"))),
        Err(e) => Ok(ApiResponse::from_error(&e)),
    }
}
