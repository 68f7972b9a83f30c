use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ReportService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, reports::responses::RatingListResponse};

pub async fn get_report(
    service: &ReportService,
    request: &HttpRequest,
    report_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_report_by_id(report_id).await {
        Ok(Some(report)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            report,
            "Report retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::NotFound, "Report not found"))),
        Err(e) => Ok(ApiResponse::from_error(&e)),
    }
}

// 报告评分列表，最新在前
pub async fn list_report_ratings(
    service: &ReportService,
    request: &HttpRequest,
    report_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_report_by_id(report_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound()
                .json(ApiResponse::error_empty(ErrorCode::NotFound, "Report not found")));
        }
        Err(e) => return Ok(ApiResponse::from_error(&e)),
    }

    match storage.list_report_ratings(report_id).await {
        Ok(items) => {
            let count = items.len() as i64;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                RatingListResponse { items, count },
                "Ratings retrieved successfully",
            )))
        }
        Err(e) => Ok(ApiResponse::from_error(&e)),
    }
}

// 讲师本人报告收到的评分
pub async fn list_my_ratings(
    service: &ReportService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(RequireJWT::unauthorized());
    };

    let storage = service.get_storage(request);
    match storage.list_lecturer_ratings(user_id).await {
        Ok(items) => {
            let count = items.len() as i64;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                RatingListResponse { items, count },
                "Ratings retrieved successfully",
            )))
        }
        Err(e) => Ok(ApiResponse::from_error(&e)),
    }
}
