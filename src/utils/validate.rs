//! 注册信息校验

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{LuctError, Result};

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

const COMMON_PASSWORDS: [&str; 9] = [
    "password",
    "12345678",
    "123456789",
    "qwerty123",
    "admin123",
    "password1",
    "letmein1",
    "welcome1",
    "abcd1234",
];

/// 用户名：5-16 个字符，仅字母、数字、下划线或连字符
pub fn validate_username(username: &str) -> Result<()> {
    let len = username.chars().count();
    if !(5..=16).contains(&len) {
        return Err(LuctError::validation(
            "Username length must be between 5 and 16 characters",
        ));
    }
    if !USERNAME_RE.is_match(username) {
        return Err(LuctError::validation(
            "Username must contain only letters, numbers, underscores or hyphens",
        ));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<()> {
    if !EMAIL_RE.is_match(email) {
        return Err(LuctError::validation("Email format is invalid"));
    }
    Ok(())
}

/// 密码策略：至少 8 位，包含大写、小写和数字，且不是常见弱密码。
/// 返回全部不满足的规则。
pub fn password_violations(password: &str) -> Vec<&'static str> {
    let mut errors = Vec::new();

    if password.chars().count() < 8 {
        errors.push("Password must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }
    if COMMON_PASSWORDS
        .iter()
        .any(|weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    errors
}

pub fn validate_password(password: &str) -> Result<()> {
    let errors = password_violations(password);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(LuctError::validation(errors.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rules() {
        assert!(validate_username("lect_01").is_ok());
        assert!(validate_username("abcd").is_err());
        assert!(validate_username("a-very-long-username").is_err());
        assert!(validate_username("bad name").is_err());
    }

    #[test]
    fn test_email_rules() {
        assert!(validate_email("pl@luct.ac.ls").is_ok());
        assert!(validate_email("missing-at.example.com").is_err());
        assert!(validate_email("a@b").is_err());
    }

    #[test]
    fn test_password_policy() {
        assert!(validate_password("SecurePass123").is_ok());
        assert!(
            password_violations("Ab1").contains(&"Password must be at least 8 characters long")
        );
        assert!(
            password_violations("abcd1234x")
                .contains(&"Password must contain at least one uppercase letter")
        );
        assert!(
            password_violations("ABCD1234X")
                .contains(&"Password must contain at least one lowercase letter")
        );
        assert!(
            password_violations("AbcdEfgh").contains(&"Password must contain at least one digit")
        );
        assert!(
            password_violations("Password1")
                .contains(&"Password is too common, please choose a stronger password")
        );
    }
}
