use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CourseService;
use crate::models::{ApiResponse, ErrorCode, courses::requests::CreateCourseRequest};

pub async fn create_course(
    service: &CourseService,
    request: &HttpRequest,
    mut req: CreateCourseRequest,
) -> ActixResult<HttpResponse> {
    req.course_code = req.course_code.trim().to_string();
    req.course_name = req.course_name.trim().to_string();
    req.faculty = req.faculty.trim().to_string();

    if req.course_code.is_empty() || req.course_name.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Course code and course name are required",
        )));
    }

    if req.credits.is_some_and(|c| c <= 0) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Credits must be a positive number",
        )));
    }

    let storage = service.get_storage(request);
    match storage.create_course(req).await {
        Ok(course) => {
            info!("Course {} created", course.course_code);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(course, "Course created successfully")))
        }
        Err(e) => Ok(ApiResponse::from_error(&e)),
    }
}
