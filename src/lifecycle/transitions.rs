//! 状态迁移表与审核决策

use crate::errors::{LuctError, Result};
use crate::models::reports::entities::ReportStatus;
use crate::models::reports::requests::ReviewReportRequest;

use super::rating::validate_rating;

/// 审核动作只能作用于该状态的报告
pub const REVIEWABLE_STATUS: ReportStatus = ReportStatus::Pending;

/// 首席讲师的审核动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Approve,
    Forward,
    Reject,
}

impl ReviewAction {
    pub fn target(self) -> ReportStatus {
        match self {
            ReviewAction::Approve => ReportStatus::Approved,
            ReviewAction::Forward => ReportStatus::Forwarded,
            ReviewAction::Reject => ReportStatus::Rejected,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReviewAction::Approve => "approve",
            ReviewAction::Forward => "forward",
            ReviewAction::Reject => "reject",
        }
    }

    /// 成功提示
    pub fn success_message(self) -> &'static str {
        match self {
            ReviewAction::Approve => "Report approved successfully",
            ReviewAction::Forward => "Report forwarded to program leader successfully",
            ReviewAction::Reject => "Report rejected successfully",
        }
    }
}

/// 作用于报告状态的动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportAction {
    Review(ReviewAction),
    /// 管理者直接修改状态，不受当前状态约束
    Override(ReportStatus),
}

/// 迁移表：返回动作执行后的状态，不允许时返回 None
pub fn next_status(current: ReportStatus, action: ReportAction) -> Option<ReportStatus> {
    match (current, action) {
        (ReportStatus::Pending, ReportAction::Review(review)) => Some(review.target()),
        (
            ReportStatus::Approved | ReportStatus::Forwarded | ReportStatus::Rejected,
            ReportAction::Review(_),
        ) => None,
        (_, ReportAction::Override(target)) => Some(target),
    }
}

/// 学生只能为已通过或已转交的报告评分
pub fn is_rateable(status: ReportStatus) -> bool {
    match status {
        ReportStatus::Approved | ReportStatus::Forwarded => true,
        ReportStatus::Pending | ReportStatus::Rejected => false,
    }
}

/// 校验后的审核决策，供存储层写入
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewDecision {
    pub action: ReviewAction,
    pub target: ReportStatus,
    pub feedback: String,
    pub rating: Option<i32>,
}

/// 校验审核请求：评分范围 1-5，驳回必须填写意见且不保存评分
pub fn prepare_review(action: ReviewAction, req: ReviewReportRequest) -> Result<ReviewDecision> {
    let feedback = req.principal_feedback.unwrap_or_default();

    let rating = match req.rating {
        Some(value) => Some(validate_rating(Some(value))?),
        None => None,
    };

    let rating = match action {
        ReviewAction::Reject => {
            if feedback.trim().is_empty() {
                return Err(LuctError::validation(
                    "Feedback is required when rejecting a report",
                ));
            }
            None
        }
        ReviewAction::Approve | ReviewAction::Forward => rating,
    };

    // 审核只作用于 pending，目标状态由迁移表给出
    let target = next_status(REVIEWABLE_STATUS, ReportAction::Review(action))
        .ok_or_else(|| LuctError::not_found("Report not found or already processed"))?;

    Ok(ReviewDecision {
        action,
        target,
        feedback,
        rating,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_moves_to_review_target() {
        assert_eq!(
            next_status(
                ReportStatus::Pending,
                ReportAction::Review(ReviewAction::Approve)
            ),
            Some(ReportStatus::Approved)
        );
        assert_eq!(
            next_status(
                ReportStatus::Pending,
                ReportAction::Review(ReviewAction::Forward)
            ),
            Some(ReportStatus::Forwarded)
        );
        assert_eq!(
            next_status(
                ReportStatus::Pending,
                ReportAction::Review(ReviewAction::Reject)
            ),
            Some(ReportStatus::Rejected)
        );
    }

    #[test]
    fn test_reviewed_report_cannot_be_reviewed_again() {
        for status in [
            ReportStatus::Approved,
            ReportStatus::Forwarded,
            ReportStatus::Rejected,
        ] {
            for action in [
                ReviewAction::Approve,
                ReviewAction::Forward,
                ReviewAction::Reject,
            ] {
                assert_eq!(next_status(status, ReportAction::Review(action)), None);
            }
        }
    }

    #[test]
    fn test_override_reaches_any_status() {
        for from in ReportStatus::all() {
            for to in ReportStatus::all() {
                assert_eq!(next_status(*from, ReportAction::Override(*to)), Some(*to));
            }
        }
    }

    #[test]
    fn test_rateable_statuses() {
        assert!(is_rateable(ReportStatus::Approved));
        assert!(is_rateable(ReportStatus::Forwarded));
        assert!(!is_rateable(ReportStatus::Pending));
        assert!(!is_rateable(ReportStatus::Rejected));
    }

    #[test]
    fn test_reject_requires_feedback() {
        let err = prepare_review(ReviewAction::Reject, ReviewReportRequest::default()).unwrap_err();
        assert_eq!(err.code(), "E005");

        let err = prepare_review(
            ReviewAction::Reject,
            ReviewReportRequest {
                principal_feedback: Some("   ".into()),
                rating: None,
            },
        )
        .unwrap_err();
        assert!(err.message().contains("Feedback is required"));
    }

    #[test]
    fn test_reject_keeps_feedback_and_drops_rating() {
        let decision = prepare_review(
            ReviewAction::Reject,
            ReviewReportRequest {
                principal_feedback: Some("Incomplete outcomes".into()),
                rating: Some(2),
            },
        )
        .unwrap();
        assert_eq!(decision.target, ReportStatus::Rejected);
        assert_eq!(decision.feedback, "Incomplete outcomes");
        assert_eq!(decision.rating, None);
    }

    #[test]
    fn test_approve_defaults_feedback_and_checks_rating() {
        let decision = prepare_review(
            ReviewAction::Approve,
            ReviewReportRequest {
                principal_feedback: None,
                rating: Some(4),
            },
        )
        .unwrap();
        assert_eq!(decision.feedback, "");
        assert_eq!(decision.rating, Some(4));

        let err = prepare_review(
            ReviewAction::Forward,
            ReviewReportRequest {
                principal_feedback: None,
                rating: Some(6),
            },
        )
        .unwrap_err();
        assert_eq!(err.code(), "E013");
    }
}
