//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码、类型名称和 HTTP 状态码。

use std::fmt;

use actix_web::http::StatusCode;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - http_status() 方法 - 返回对应的 HTTP 状态码
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_luct_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal, $status:ident)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum LuctError {
            $($variant(String),)*
        }

        impl LuctError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(LuctError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(LuctError::$variant(_) => $type_name,)*
                }
            }

            /// 获取对应的 HTTP 状态码
            pub fn http_status(&self) -> StatusCode {
                match self {
                    $(LuctError::$variant(_) => StatusCode::$status,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(LuctError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl LuctError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        LuctError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_luct_errors! {
    DatabaseConfig("E001", "Database Configuration Error", INTERNAL_SERVER_ERROR),
    DatabaseConnection("E002", "Database Connection Error", INTERNAL_SERVER_ERROR),
    DatabaseOperation("E003", "Database Operation Error", INTERNAL_SERVER_ERROR),
    FileOperation("E004", "File Operation Error", INTERNAL_SERVER_ERROR),
    Validation("E005", "Validation Error", BAD_REQUEST),
    NotFound("E006", "Resource Not Found", NOT_FOUND),
    Serialization("E007", "Serialization Error", INTERNAL_SERVER_ERROR),
    DateParse("E008", "Date Parse Error", BAD_REQUEST),
    Authentication("E009", "Authentication Error", UNAUTHORIZED),
    Authorization("E010", "Authorization Error", FORBIDDEN),
    Conflict("E011", "Conflict", CONFLICT),
    NotEligible("E012", "Not Eligible", BAD_REQUEST),
    InvalidRating("E013", "Invalid Rating", BAD_REQUEST),
    Export("E014", "Export Error", INTERNAL_SERVER_ERROR),
}

impl LuctError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否为服务端内部错误（需要记录日志，不向调用方暴露细节）
    pub fn is_internal(&self) -> bool {
        self.http_status().is_server_error()
    }
}

impl fmt::Display for LuctError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LuctError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for LuctError {
    fn from(err: sea_orm::DbErr) -> Self {
        LuctError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for LuctError {
    fn from(err: std::io::Error) -> Self {
        LuctError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for LuctError {
    fn from(err: serde_json::Error) -> Self {
        LuctError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for LuctError {
    fn from(err: chrono::ParseError) -> Self {
        LuctError::DateParse(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for LuctError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        LuctError::Export(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LuctError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(LuctError::database_config("test").code(), "E001");
        assert_eq!(LuctError::validation("test").code(), "E005");
        assert_eq!(LuctError::authentication("test").code(), "E009");
        assert_eq!(LuctError::conflict("test").code(), "E011");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            LuctError::not_eligible("test").error_type(),
            "Not Eligible"
        );
        assert_eq!(LuctError::validation("test").error_type(), "Validation Error");
    }

    #[test]
    fn test_http_status() {
        assert_eq!(
            LuctError::validation("x").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            LuctError::authorization("x").http_status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(LuctError::not_found("x").http_status(), StatusCode::NOT_FOUND);
        assert_eq!(LuctError::conflict("x").http_status(), StatusCode::CONFLICT);
        assert_eq!(
            LuctError::invalid_rating("x").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert!(LuctError::database_operation("x").is_internal());
        assert!(!LuctError::not_found("x").is_internal());
    }

    #[test]
    fn test_error_message() {
        let err = LuctError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_format_simple() {
        let err = LuctError::not_found("Report not found or already processed");
        let formatted = err.format_simple();
        assert!(formatted.contains("Resource Not Found"));
        assert!(formatted.contains("already processed"));
    }
}
