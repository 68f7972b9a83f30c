pub mod auth;
pub mod classes;
pub mod common;
pub mod courses;
pub mod enrollments;
pub mod reports;
pub mod system;
pub mod users;

pub use common::*;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::LuctError;

/// 业务错误码（随响应体返回，HTTP 状态码另行设置）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "api.ts")]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用请求错误
    BadRequest = 1000,
    ValidationFailed = 1001,
    NotEligible = 1002,
    InvalidRating = 1003,

    // 认证与授权
    Unauthorized = 2000,
    AuthFailed = 2001,
    Forbidden = 2003,

    // 用户
    UserNameInvalid = 3001,
    UserEmailInvalid = 3002,
    UserPasswordInvalid = 3003,
    UserNameAlreadyExists = 3004,
    UserEmailAlreadyExists = 3005,
    RegisterFailed = 3006,

    // 资源
    NotFound = 4004,
    Conflict = 4009,
    RateLimitExceeded = 4029,

    // 服务端
    InternalServerError = 5000,
    ExportFailed = 5001,
}

impl From<&LuctError> for ErrorCode {
    fn from(err: &LuctError) -> Self {
        match err {
            LuctError::Validation(_) | LuctError::DateParse(_) => ErrorCode::ValidationFailed,
            LuctError::NotEligible(_) => ErrorCode::NotEligible,
            LuctError::InvalidRating(_) => ErrorCode::InvalidRating,
            LuctError::Authentication(_) => ErrorCode::AuthFailed,
            LuctError::Authorization(_) => ErrorCode::Forbidden,
            LuctError::NotFound(_) => ErrorCode::NotFound,
            LuctError::Conflict(_) => ErrorCode::Conflict,
            LuctError::Export(_) => ErrorCode::ExportFailed,
            LuctError::DatabaseConfig(_)
            | LuctError::DatabaseConnection(_)
            | LuctError::DatabaseOperation(_)
            | LuctError::FileOperation(_)
            | LuctError::Serialization(_) => ErrorCode::InternalServerError,
        }
    }
}

/// 程序启动时间
#[derive(Debug, Clone, Copy)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
