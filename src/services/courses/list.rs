use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::{ApiResponse, ErrorCode, courses::responses::CourseListResponse};

pub async fn list_courses(
    service: &CourseService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_courses().await {
        Ok(items) => {
            let count = items.len() as i64;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                CourseListResponse { items, count },
                "Courses retrieved successfully",
            )))
        }
        Err(e) => Ok(ApiResponse::from_error(&e)),
    }
}

pub async fn get_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            course,
            "Course retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::NotFound, "Course not found"))),
        Err(e) => Ok(ApiResponse::from_error(&e)),
    }
}
