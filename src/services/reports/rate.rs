use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ReportService;
use crate::lifecycle::{self, Operation};
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, reports::requests::RateReportRequest};

pub async fn rate_report(
    service: &ReportService,
    request: &HttpRequest,
    report_id: i64,
    req: RateReportRequest,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Ok(RequireJWT::unauthorized());
    };

    if let Err(e) = lifecycle::authorize(user.role, Operation::RateReport) {
        return Ok(ApiResponse::from_error(&e));
    }

    let rating = match lifecycle::validate_rating(req.rating) {
        Ok(rating) => rating,
        Err(e) => return Ok(ApiResponse::from_error(&e)),
    };

    let storage = service.get_storage(request);
    match storage
        .rate_report(report_id, user.id, rating, req.feedback)
        .await
    {
        Ok(result) => {
            info!(
                "Report {} rated {} by student {} (average: {}, count: {})",
                report_id, rating, user.id, result.average_rating, result.rating_count
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                result,
                "Rating submitted successfully",
            )))
        }
        Err(e) => Ok(ApiResponse::from_error(&e)),
    }
}
