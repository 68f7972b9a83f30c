use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::{ApiResponse, ErrorCode, courses::requests::UpdateCourseRequest};

pub async fn update_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
    req: UpdateCourseRequest,
) -> ActixResult<HttpResponse> {
    if req
        .course_name
        .as_deref()
        .is_some_and(|name| name.trim().is_empty())
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Course name cannot be empty",
        )));
    }

    if req.credits.is_some_and(|c| c <= 0) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Credits must be a positive number",
        )));
    }

    let storage = service.get_storage(request);
    match storage.update_course(course_id, req).await {
        Ok(Some(course)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            course,
            "Course updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::NotFound, "Course not found"))),
        Err(e) => Ok(ApiResponse::from_error(&e)),
    }
}
