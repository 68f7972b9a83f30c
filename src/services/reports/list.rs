use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ReportService;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse,
    reports::{entities::ReportStatus, responses::ReportListResponse},
    users::entities::UserRole,
};
use crate::storage::ReportScope;

/// 路由固定的报告视图
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedScope {
    /// 讲师本人提交的报告
    MyReports,
    /// 待审核
    ForReview,
    /// 已转交
    Forwarded,
}

// 学生只看到已通过/已转交的报告，其他角色看到全部
pub async fn list_reports(
    service: &ReportService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Ok(RequireJWT::unauthorized());
    };

    let scope = match user.role {
        UserRole::Student => ReportScope::Student(user.id),
        UserRole::Lecturer | UserRole::PrincipalLecturer | UserRole::ProgramLeader => {
            ReportScope::All
        }
    };

    respond_with_reports(service, request, scope).await
}

pub async fn list_reports_in_scope(
    service: &ReportService,
    request: &HttpRequest,
    fixed: FixedScope,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(RequireJWT::unauthorized());
    };

    let scope = match fixed {
        FixedScope::MyReports => ReportScope::Lecturer(user_id),
        FixedScope::ForReview => ReportScope::Status(ReportStatus::Pending),
        FixedScope::Forwarded => ReportScope::Status(ReportStatus::Forwarded),
    };

    respond_with_reports(service, request, scope).await
}

async fn respond_with_reports(
    service: &ReportService,
    request: &HttpRequest,
    scope: ReportScope,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_reports(scope).await {
        Ok(items) => {
            let count = items.len() as i64;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                ReportListResponse { items, count },
                "Reports retrieved successfully",
            )))
        }
        Err(e) => Ok(ApiResponse::from_error(&e)),
    }
}
