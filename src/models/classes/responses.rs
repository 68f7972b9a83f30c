use serde::Serialize;
use ts_rs::TS;

use super::entities::Class;

// 班级列表响应
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "class.ts")]
pub struct ClassListResponse {
    pub items: Vec<Class>,
    pub count: i64,
}
