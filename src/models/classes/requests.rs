use serde::Deserialize;
use ts_rs::TS;

// 创建班级请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "class.ts")]
pub struct CreateClassRequest {
    pub class_code: String,
    pub class_name: String,
    pub course_id: i64,
    pub lecturer_id: Option<i64>,
    pub semester: String,
    pub academic_year: i32,
    pub max_students: Option<i32>,
}

// 更新班级请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "class.ts")]
pub struct UpdateClassRequest {
    pub class_name: Option<String>,
    pub lecturer_id: Option<i64>,
    pub semester: Option<String>,
    pub academic_year: Option<i32>,
    pub max_students: Option<i32>,
}
