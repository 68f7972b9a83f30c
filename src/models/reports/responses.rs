use serde::Serialize;
use ts_rs::TS;

use super::entities::{Report, ReportRating};

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "report.ts")]
pub struct ReportListResponse {
    pub items: Vec<Report>,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "report.ts")]
pub struct RatingListResponse {
    pub items: Vec<ReportRating>,
    pub count: i64,
}

// 评分结果
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "report.ts")]
pub struct RateReportResponse {
    pub average_rating: f64,
    pub rating_count: i64,
}

// 报告统计
#[derive(Debug, Clone, Default, Serialize, TS)]
#[ts(export, export_to = "report.ts")]
pub struct ReportStats {
    pub total_reports: i64,
    pub total_ratings: i64,
    pub pending: i64,
    pub approved: i64,
    pub forwarded: i64,
    pub rejected: i64,
}
