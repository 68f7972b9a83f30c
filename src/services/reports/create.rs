use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ReportService;
use crate::lifecycle::{self, Operation};
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, reports::requests::CreateReportRequest};

pub async fn create_report(
    service: &ReportService,
    request: &HttpRequest,
    req: CreateReportRequest,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Ok(RequireJWT::unauthorized());
    };

    if let Err(e) = lifecycle::authorize(user.role, Operation::CreateReport) {
        return Ok(ApiResponse::from_error(&e));
    }

    let draft = match lifecycle::validate_draft(req) {
        Ok(draft) => draft,
        Err(e) => return Ok(ApiResponse::from_error(&e)),
    };

    let storage = service.get_storage(request);
    match storage.create_report(user.id, draft).await {
        Ok(report) => {
            info!(
                "Report {} submitted by lecturer {} (status: {})",
                report.id, user.id, report.status
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(report, "Report submitted successfully")))
        }
        Err(e) => Ok(ApiResponse::from_error(&e)),
    }
}
