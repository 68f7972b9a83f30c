use serde::Deserialize;
use ts_rs::TS;

// 创建报告请求，字段缺失由生命周期校验统一报告
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "report.ts")]
pub struct CreateReportRequest {
    pub faculty_name: Option<String>,
    pub class_name: Option<String>,
    pub week_of_reporting: Option<String>,
    pub date_of_lecture: Option<String>,
    pub course_name: Option<String>,
    pub course_code: Option<String>,
    pub lecturer_name: Option<String>,
    pub actual_students_present: Option<i64>,
    pub total_registered_students: Option<i64>,
    pub venue: Option<String>,
    pub scheduled_time: Option<String>,
    pub topic_taught: Option<String>,
    pub learning_outcomes: Option<String>,
    pub recommendations: Option<String>,
}

// 审核请求（approve / forward / reject）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "report.ts")]
pub struct ReviewReportRequest {
    pub principal_feedback: Option<String>,
    pub rating: Option<i64>,
}

// 报告修改请求，仅更新提供的字段
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "report.ts")]
pub struct UpdateReportRequest {
    pub faculty_name: Option<String>,
    pub class_name: Option<String>,
    pub week_of_reporting: Option<String>,
    pub date_of_lecture: Option<String>,
    pub course_name: Option<String>,
    pub course_code: Option<String>,
    pub lecturer_name: Option<String>,
    pub actual_students_present: Option<i64>,
    pub total_registered_students: Option<i64>,
    pub venue: Option<String>,
    pub scheduled_time: Option<String>,
    pub topic_taught: Option<String>,
    pub learning_outcomes: Option<String>,
    pub recommendations: Option<String>,
    pub principal_feedback: Option<String>,
    pub rating: Option<i64>,
    pub status: Option<String>,
}

// 学生评分请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "report.ts")]
pub struct RateReportRequest {
    pub rating: Option<i64>,
    pub feedback: Option<String>,
}

// 导出查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "report.ts")]
pub struct ExportQuery {
    /// xlsx（默认）或 csv
    pub format: Option<String>,
}
