use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ReportService;
use crate::lifecycle::{self, Operation};
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, reports::requests::UpdateReportRequest};

pub async fn edit_report(
    service: &ReportService,
    request: &HttpRequest,
    report_id: i64,
    req: UpdateReportRequest,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Ok(RequireJWT::unauthorized());
    };

    if let Err(e) = lifecycle::authorize(user.role, Operation::EditReport) {
        return Ok(ApiResponse::from_error(&e));
    }

    let patch = match lifecycle::validate_patch(req) {
        Ok(patch) => patch,
        Err(e) => return Ok(ApiResponse::from_error(&e)),
    };

    let storage = service.get_storage(request);
    match storage.update_report(report_id, &patch).await {
        Ok(edit) => {
            if edit.previous_status != edit.report.status {
                info!(
                    "Report {} status changed {} -> {} by {} {}",
                    report_id, edit.previous_status, edit.report.status, user.role, user.id
                );
            } else {
                info!("Report {} edited by {} {}", report_id, user.role, user.id);
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                edit.report,
                "Report updated successfully",
            )))
        }
        Err(e) => Ok(ApiResponse::from_error(&e)),
    }
}
