use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 报告状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "report.ts")]
pub enum ReportStatus {
    Pending,   // 待审核
    Approved,  // 已通过
    Forwarded, // 已转交项目负责人
    Rejected,  // 已驳回
}

impl ReportStatus {
    pub const PENDING: &'static str = "pending";
    pub const APPROVED: &'static str = "approved";
    pub const FORWARDED: &'static str = "forwarded";
    pub const REJECTED: &'static str = "rejected";

    pub fn all() -> &'static [ReportStatus] {
        &[
            ReportStatus::Pending,
            ReportStatus::Approved,
            ReportStatus::Forwarded,
            ReportStatus::Rejected,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => Self::PENDING,
            ReportStatus::Approved => Self::APPROVED,
            ReportStatus::Forwarded => Self::FORWARDED,
            ReportStatus::Rejected => Self::REJECTED,
        }
    }
}

impl<'de> Deserialize<'de> for ReportStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<ReportStatus>().map_err(|_| {
            serde::de::Error::custom(format!(
                "Invalid report status: '{s}'. Supported: pending, approved, forwarded, rejected"
            ))
        })
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ReportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::PENDING => Ok(ReportStatus::Pending),
            Self::APPROVED => Ok(ReportStatus::Approved),
            Self::FORWARDED => Ok(ReportStatus::Forwarded),
            Self::REJECTED => Ok(ReportStatus::Rejected),
            _ => Err(format!("Invalid report status: {s}")),
        }
    }
}

// 课堂报告
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "report.ts")]
pub struct Report {
    pub id: i64,
    pub lecturer_id: i64,
    pub faculty_name: String,
    pub class_name: String,
    pub week_of_reporting: String,
    /// YYYY-MM-DD
    pub date_of_lecture: String,
    pub course_name: String,
    pub course_code: String,
    pub lecturer_name: String,
    pub actual_students_present: i32,
    pub total_registered_students: i32,
    pub venue: String,
    pub scheduled_time: String,
    pub topic_taught: String,
    pub learning_outcomes: String,
    pub recommendations: String,
    pub status: ReportStatus,
    pub principal_feedback: Option<String>,
    /// 首席讲师评分 1-5
    pub rating: Option<i32>,
    /// 学生评分均值（两位小数）
    pub average_rating: Option<f64>,
    pub reviewed_by: Option<i64>,
    pub reviewed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    /// 提交者账号姓名（列表查询时填充）
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[ts(optional)]
    pub lecturer_full_name: Option<String>,
    /// 当前学生的评分（学生列表查询时填充）
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[ts(optional)]
    pub my_rating: Option<i32>,
}

impl Report {
    /// 出勤率百分比，四舍五入到整数
    pub fn attendance_percentage(&self) -> i64 {
        if self.total_registered_students <= 0 {
            return 0;
        }
        (f64::from(self.actual_students_present) / f64::from(self.total_registered_students)
            * 100.0)
            .round() as i64
    }
}

// 学生评分
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "report.ts")]
pub struct ReportRating {
    pub id: i64,
    pub report_id: i64,
    pub student_id: i64,
    pub rating: i32,
    pub feedback: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[ts(optional)]
    pub student_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[ts(optional)]
    pub course_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[ts(optional)]
    pub class_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[ts(optional)]
    pub date_of_lecture: Option<String>,
}
