//! 报告生命周期引擎
//!
//! 纯规则层，不访问存储：角色授权、状态迁移表、报告草稿与修改校验、评分计算。
//! 存储层按这里给出的结果执行带条件的写入。
//!
//! ```text
//! (none)  --create-->  pending
//! pending --approve--> approved
//! pending --forward--> forwarded
//! pending --reject---> rejected
//! any     --edit-----> any
//! ```

pub mod draft;
pub mod rating;
pub mod transitions;

pub use draft::{NewReport, ReportPatch, check_attendance, validate_draft, validate_patch};
pub use rating::{average_rating, validate_rating};
pub use transitions::{
    REVIEWABLE_STATUS, ReportAction, ReviewAction, ReviewDecision, is_rateable, next_status,
    prepare_review,
};

pub use crate::models::reports::entities::ReportStatus;
pub use crate::models::users::entities::UserRole;

use crate::errors::{LuctError, Result};

/// 生命周期操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateReport,
    ReviewReport,
    EditReport,
    RateReport,
}

impl Operation {
    /// 角色是否允许执行该操作
    pub fn permits(self, role: UserRole) -> bool {
        use UserRole::*;
        match self {
            Operation::CreateReport => match role {
                Lecturer => true,
                PrincipalLecturer | ProgramLeader | Student => false,
            },
            Operation::ReviewReport => match role {
                PrincipalLecturer => true,
                Lecturer | ProgramLeader | Student => false,
            },
            Operation::EditReport => match role {
                PrincipalLecturer | ProgramLeader => true,
                Lecturer | Student => false,
            },
            Operation::RateReport => match role {
                Student => true,
                Lecturer | PrincipalLecturer | ProgramLeader => false,
            },
        }
    }

    fn denial_message(self) -> &'static str {
        match self {
            Operation::CreateReport => "Access denied. Only lecturers can create reports.",
            Operation::ReviewReport => {
                "Access denied. Only principal lecturers can review reports."
            }
            Operation::EditReport => {
                "Access denied. Only principal lecturers and program leaders can edit reports."
            }
            Operation::RateReport => "Access denied. Only students can rate reports.",
        }
    }
}

/// 校验角色权限，不满足时返回 Authorization 错误
pub fn authorize(role: UserRole, operation: Operation) -> Result<()> {
    if operation.permits(role) {
        Ok(())
    } else {
        Err(LuctError::authorization(operation.denial_message()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_lecturer_creates() {
        assert!(authorize(UserRole::Lecturer, Operation::CreateReport).is_ok());
        for role in [
            UserRole::PrincipalLecturer,
            UserRole::ProgramLeader,
            UserRole::Student,
        ] {
            let err = authorize(role, Operation::CreateReport).unwrap_err();
            assert_eq!(err.code(), "E010");
        }
    }

    #[test]
    fn test_only_principal_reviews() {
        assert!(Operation::ReviewReport.permits(UserRole::PrincipalLecturer));
        assert!(!Operation::ReviewReport.permits(UserRole::ProgramLeader));
        assert!(!Operation::ReviewReport.permits(UserRole::Lecturer));
        assert!(!Operation::ReviewReport.permits(UserRole::Student));
    }

    #[test]
    fn test_management_edits() {
        assert!(Operation::EditReport.permits(UserRole::PrincipalLecturer));
        assert!(Operation::EditReport.permits(UserRole::ProgramLeader));
        assert!(!Operation::EditReport.permits(UserRole::Lecturer));
        assert!(!Operation::EditReport.permits(UserRole::Student));
    }

    #[test]
    fn test_only_student_rates() {
        assert!(Operation::RateReport.permits(UserRole::Student));
        let err = authorize(UserRole::Lecturer, Operation::RateReport).unwrap_err();
        assert!(err.message().contains("Only students"));
    }
}
