use serde::Serialize;
use ts_rs::TS;

use super::entities::User;

// 用户列表响应
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct UserListResponse {
    pub items: Vec<User>,
    pub count: i64,
}
