use serde::Serialize;
use ts_rs::TS;

use super::entities::Course;

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct CourseListResponse {
    pub items: Vec<Course>,
    pub count: i64,
}
