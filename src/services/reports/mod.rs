pub mod create;
pub mod detail;
pub mod edit;
pub mod export;
pub mod list;
pub mod rate;
pub mod review;
pub mod stats;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::lifecycle::ReviewAction;
use crate::models::reports::requests::{
    CreateReportRequest, ExportQuery, RateReportRequest, UpdateReportRequest,
};
use crate::storage::Storage;

pub struct ReportService {
    storage: Option<Arc<dyn Storage>>,
}

impl ReportService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 讲师提交报告
    pub async fn create_report(
        &self,
        request: &HttpRequest,
        req: CreateReportRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_report(self, request, req).await
    }

    // 首席讲师审核（approve / forward / reject）
    pub async fn review_report(
        &self,
        request: &HttpRequest,
        report_id: i64,
        action: ReviewAction,
        body: &[u8],
    ) -> ActixResult<HttpResponse> {
        review::review_report(self, request, report_id, action, body).await
    }

    // 管理层修改
    pub async fn edit_report(
        &self,
        request: &HttpRequest,
        report_id: i64,
        req: UpdateReportRequest,
    ) -> ActixResult<HttpResponse> {
        edit::edit_report(self, request, report_id, req).await
    }

    // 学生评分
    pub async fn rate_report(
        &self,
        request: &HttpRequest,
        report_id: i64,
        req: RateReportRequest,
    ) -> ActixResult<HttpResponse> {
        rate::rate_report(self, request, report_id, req).await
    }

    // 按当前用户角色列出报告
    pub async fn list_reports(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_reports(self, request).await
    }

    // 按固定范围列出报告
    pub async fn list_reports_in_scope(
        &self,
        request: &HttpRequest,
        scope: list::FixedScope,
    ) -> ActixResult<HttpResponse> {
        list::list_reports_in_scope(self, request, scope).await
    }

    pub async fn get_report(
        &self,
        request: &HttpRequest,
        report_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_report(self, request, report_id).await
    }

    pub async fn list_report_ratings(
        &self,
        request: &HttpRequest,
        report_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::list_report_ratings(self, request, report_id).await
    }

    // 讲师收到的评分
    pub async fn list_my_ratings(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        detail::list_my_ratings(self, request).await
    }

    pub async fn get_stats(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        stats::get_stats(self, request).await
    }

    // 导出已转交报告
    pub async fn export_forwarded(
        &self,
        request: &HttpRequest,
        query: ExportQuery,
    ) -> ActixResult<HttpResponse> {
        export::export_forwarded(self, request, query).await
    }
}
