use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, classes::responses::ClassListResponse};

pub async fn list_classes(
    service: &ClassService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond_with_classes(service, request, None).await
}

pub async fn list_my_classes(
    service: &ClassService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(RequireJWT::unauthorized());
    };

    respond_with_classes(service, request, Some(user_id)).await
}

pub async fn get_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_class_by_id(class_id).await {
        Ok(Some(class)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            class,
            "Class retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::NotFound, "Class not found"))),
        Err(e) => Ok(ApiResponse::from_error(&e)),
    }
}

async fn respond_with_classes(
    service: &ClassService,
    request: &HttpRequest,
    lecturer_id: Option<i64>,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_classes(lecturer_id).await {
        Ok(items) => {
            let count = items.len() as i64;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                ClassListResponse { items, count },
                "Classes retrieved successfully",
            )))
        }
        Err(e) => Ok(ApiResponse::from_error(&e)),
    }
}
