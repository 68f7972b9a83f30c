use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ReportService;
use crate::errors::{LuctError, Result};
use crate::lifecycle::{self, Operation, ReviewAction};
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, reports::requests::ReviewReportRequest};

/// 解析审核请求体：空请求体等同于 `{}`，非空时必须是合法的审核 JSON
pub fn parse_review_body(body: &[u8]) -> Result<ReviewReportRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ReviewReportRequest::default());
    }

    serde_json::from_slice(body)
        .map_err(|e| LuctError::validation(format!("Invalid review body: {e}")))
}

pub async fn review_report(
    service: &ReportService,
    request: &HttpRequest,
    report_id: i64,
    action: ReviewAction,
    body: &[u8],
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Ok(RequireJWT::unauthorized());
    };

    if let Err(e) = lifecycle::authorize(user.role, Operation::ReviewReport) {
        return Ok(ApiResponse::from_error(&e));
    }

    let req = match parse_review_body(body) {
        Ok(req) => req,
        Err(e) => return Ok(ApiResponse::from_error(&e)),
    };

    let decision = match lifecycle::prepare_review(action, req) {
        Ok(decision) => decision,
        Err(e) => return Ok(ApiResponse::from_error(&e)),
    };

    let storage = service.get_storage(request);
    match storage.review_report(report_id, user.id, &decision).await {
        Ok(report) => {
            info!(
                "Report {} {} by principal lecturer {} (status: {})",
                report_id,
                action.as_str(),
                user.id,
                report.status
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(report, action.success_message())))
        }
        Err(e) => Ok(ApiResponse::from_error(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_is_blank_review() {
        for body in [&b""[..], b"  \n"] {
            let req = parse_review_body(body).unwrap();
            assert!(req.principal_feedback.is_none());
            assert!(req.rating.is_none());
        }
    }

    #[test]
    fn test_review_body_fields() {
        let req = parse_review_body(br#"{"rating": 4, "principal_feedback": "Good"}"#).unwrap();
        assert_eq!(req.rating, Some(4));
        assert_eq!(req.principal_feedback.as_deref(), Some("Good"));
    }

    #[test]
    fn test_malformed_review_body_rejected() {
        for body in [
            &br#"{"rating": 9.5}"#[..],
            br#"{"rating": "four"}"#,
            b"not json",
        ] {
            let err = parse_review_body(body).unwrap_err();
            assert!(matches!(err, LuctError::Validation(_)));
        }
    }
}
