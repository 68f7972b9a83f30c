//! 评分校验与均值计算

use crate::errors::{LuctError, Result};

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

/// 评分必须是 1 到 5 的整数
pub fn validate_rating(value: Option<i64>) -> Result<i32> {
    match value {
        Some(v) if (MIN_RATING..=MAX_RATING).contains(&v) => Ok(v as i32),
        _ => Err(LuctError::invalid_rating("Rating must be between 1 and 5")),
    }
}

/// 评分均值，四舍五入（远离零）保留两位小数；空列表返回 0
pub fn average_rating(ratings: &[i32]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let count = ratings.len() as i64;
    let sum: i64 = ratings.iter().map(|r| i64::from(*r)).sum();
    // 整数运算避免浮点误差：round(sum * 100 / count)
    let scaled = (sum * 200 + count) / (2 * count);
    scaled as f64 / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rating_bounds() {
        assert_eq!(validate_rating(Some(1)).unwrap(), 1);
        assert_eq!(validate_rating(Some(5)).unwrap(), 5);
        assert_eq!(validate_rating(Some(0)).unwrap_err().code(), "E013");
        assert_eq!(validate_rating(Some(6)).unwrap_err().code(), "E013");
        assert!(validate_rating(None).is_err());
    }

    #[test]
    fn test_average_two_decimals() {
        assert_eq!(average_rating(&[5]), 5.0);
        assert_eq!(average_rating(&[3, 5]), 4.0);
        assert_eq!(average_rating(&[2, 3, 3]), 2.67);
        assert_eq!(average_rating(&[1, 2]), 1.5);
        assert_eq!(average_rating(&[1, 1, 2]), 1.33);
    }

    #[test]
    fn test_average_rounds_half_up() {
        // 21 / 8 = 2.625
        assert_eq!(average_rating(&[3, 3, 3, 3, 3, 2, 2, 2]), 2.63);
        // 11 / 8 = 1.375
        assert_eq!(average_rating(&[2, 2, 2, 1, 1, 1, 1, 1]), 1.38);
    }

    #[test]
    fn test_average_empty() {
        assert_eq!(average_rating(&[]), 0.0);
    }
}
