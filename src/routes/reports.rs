use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::lifecycle::ReviewAction;
use crate::middlewares;
use crate::models::reports::requests::{
    CreateReportRequest, ExportQuery, RateReportRequest, UpdateReportRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::ReportService;
use crate::services::reports::list::FixedScope;

// 懒加载的全局 ReportService 实例
static REPORT_SERVICE: Lazy<ReportService> = Lazy::new(ReportService::new_lazy);

pub async fn list_reports(req: HttpRequest) -> ActixResult<HttpResponse> {
    REPORT_SERVICE.list_reports(&req).await
}

pub async fn create_report(
    req: HttpRequest,
    report_data: web::Json<CreateReportRequest>,
) -> ActixResult<HttpResponse> {
    REPORT_SERVICE
        .create_report(&req, report_data.into_inner())
        .await
}

pub async fn my_reports(req: HttpRequest) -> ActixResult<HttpResponse> {
    REPORT_SERVICE
        .list_reports_in_scope(&req, FixedScope::MyReports)
        .await
}

pub async fn reports_for_review(req: HttpRequest) -> ActixResult<HttpResponse> {
    REPORT_SERVICE
        .list_reports_in_scope(&req, FixedScope::ForReview)
        .await
}

pub async fn forwarded_reports(req: HttpRequest) -> ActixResult<HttpResponse> {
    REPORT_SERVICE
        .list_reports_in_scope(&req, FixedScope::Forwarded)
        .await
}

pub async fn my_ratings(req: HttpRequest) -> ActixResult<HttpResponse> {
    REPORT_SERVICE.list_my_ratings(&req).await
}

pub async fn report_stats(req: HttpRequest) -> ActixResult<HttpResponse> {
    REPORT_SERVICE.get_stats(&req).await
}

pub async fn export_reports(
    req: HttpRequest,
    query: web::Query<ExportQuery>,
) -> ActixResult<HttpResponse> {
    REPORT_SERVICE
        .export_forwarded(&req, query.into_inner())
        .await
}

pub async fn get_report(req: HttpRequest, report_id: web::Path<i64>) -> ActixResult<HttpResponse> {
    REPORT_SERVICE
        .get_report(&req, report_id.into_inner())
        .await
}

pub async fn edit_report(
    req: HttpRequest,
    report_id: web::Path<i64>,
    update_data: web::Json<UpdateReportRequest>,
) -> ActixResult<HttpResponse> {
    REPORT_SERVICE
        .edit_report(&req, report_id.into_inner(), update_data.into_inner())
        .await
}

pub async fn approve_report(
    req: HttpRequest,
    report_id: web::Path<i64>,
    body: web::Bytes,
) -> ActixResult<HttpResponse> {
    review_report(req, report_id, body, ReviewAction::Approve).await
}

pub async fn forward_report(
    req: HttpRequest,
    report_id: web::Path<i64>,
    body: web::Bytes,
) -> ActixResult<HttpResponse> {
    review_report(req, report_id, body, ReviewAction::Forward).await
}

pub async fn reject_report(
    req: HttpRequest,
    report_id: web::Path<i64>,
    body: web::Bytes,
) -> ActixResult<HttpResponse> {
    review_report(req, report_id, body, ReviewAction::Reject).await
}

// 审核请求体可省略，非空时由服务层解析
async fn review_report(
    req: HttpRequest,
    report_id: web::Path<i64>,
    body: web::Bytes,
    action: ReviewAction,
) -> ActixResult<HttpResponse> {
    REPORT_SERVICE
        .review_report(&req, report_id.into_inner(), action, &body)
        .await
}

pub async fn rate_report(
    req: HttpRequest,
    report_id: web::Path<i64>,
    rating: web::Json<RateReportRequest>,
) -> ActixResult<HttpResponse> {
    REPORT_SERVICE
        .rate_report(&req, report_id.into_inner(), rating.into_inner())
        .await
}

pub async fn report_ratings(
    req: HttpRequest,
    report_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    REPORT_SERVICE
        .list_report_ratings(&req, report_id.into_inner())
        .await
}

// 配置路由
pub fn configure_reports_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/reports")
            .wrap(middlewares::RequireJWT)
            .service(
                // 学生看到已通过/已转交的报告，讲师提交报告
                web::resource("").route(web::get().to(list_reports)).route(
                    web::post()
                        .to(create_report)
                        .wrap(middlewares::RequireRole::new(&UserRole::Lecturer)),
                ),
            )
            // 固定路径需注册在 /{report_id} 之前
            .service(
                web::resource("/my-reports").route(
                    web::get()
                        .to(my_reports)
                        .wrap(middlewares::RequireRole::new(&UserRole::Lecturer)),
                ),
            )
            .service(
                web::resource("/for-review").route(
                    web::get()
                        .to(reports_for_review)
                        .wrap(middlewares::RequireRole::new(&UserRole::PrincipalLecturer)),
                ),
            )
            .service(
                web::resource("/forwarded").route(
                    web::get()
                        .to(forwarded_reports)
                        .wrap(middlewares::RequireRole::new_any(UserRole::management_roles())),
                ),
            )
            .service(
                web::resource("/my-ratings").route(
                    web::get()
                        .to(my_ratings)
                        .wrap(middlewares::RequireRole::new(&UserRole::Lecturer)),
                ),
            )
            .route("/stats", web::get().to(report_stats))
            .service(
                web::resource("/export/excel").route(
                    web::get()
                        .to(export_reports)
                        .wrap(middlewares::RequireRole::new(&UserRole::ProgramLeader)),
                ),
            )
            .service(
                web::resource("/{report_id}")
                    .route(web::get().to(get_report))
                    .route(
                        web::put()
                            .to(edit_report)
                            .wrap(middlewares::RequireRole::new_any(UserRole::management_roles())),
                    ),
            )
            .service(
                web::resource("/{report_id}/approve").route(
                    web::post()
                        .to(approve_report)
                        .wrap(middlewares::RequireRole::new(&UserRole::PrincipalLecturer)),
                ),
            )
            .service(
                web::resource("/{report_id}/forward").route(
                    web::post()
                        .to(forward_report)
                        .wrap(middlewares::RequireRole::new(&UserRole::PrincipalLecturer)),
                ),
            )
            .service(
                web::resource("/{report_id}/reject").route(
                    web::post()
                        .to(reject_report)
                        .wrap(middlewares::RequireRole::new(&UserRole::PrincipalLecturer)),
                ),
            )
            .route(
                "/{report_id}/rate",
                web::post()
                    .to(rate_report)
                    .wrap(middlewares::RequireRole::new(&UserRole::Student)),
            )
            .route("/{report_id}/ratings", web::get().to(report_ratings)),
    );
}
