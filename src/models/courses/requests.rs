use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct CreateCourseRequest {
    pub course_code: String,
    pub course_name: String,
    pub description: Option<String>,
    pub credits: Option<i32>,
    pub faculty: String,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct UpdateCourseRequest {
    pub course_name: Option<String>,
    pub description: Option<String>,
    pub credits: Option<i32>,
    pub faculty: Option<String>,
}
