use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct Course {
    pub id: i64,
    pub course_code: String,
    pub course_name: String,
    pub description: Option<String>,
    pub credits: i32,
    pub faculty: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    /// 关联班级数（列表查询时填充）
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[ts(optional)]
    pub class_count: Option<i64>,
}
