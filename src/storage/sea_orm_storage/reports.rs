//! 报告存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::report_ratings::{Column as RatingColumn, Entity as ReportRatings};
use crate::entity::reports::{ActiveModel, Column, Entity as Reports, Model};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{LuctError, Result};
use crate::lifecycle::{
    NewReport, REVIEWABLE_STATUS, ReportAction, ReportPatch, ReviewDecision, check_attendance,
    next_status,
};
use crate::models::reports::{
    entities::{Report, ReportStatus},
    responses::ReportStats,
};
use crate::storage::{ReportEdit, ReportScope};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait, sea_query::Expr,
};
use tracing::warn;

impl SeaOrmStorage {
    /// 创建报告，初始状态为 pending
    pub async fn create_report_impl(&self, lecturer_id: i64, report: NewReport) -> Result<Report> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            lecturer_id: Set(lecturer_id),
            faculty_name: Set(report.faculty_name),
            class_name: Set(report.class_name),
            week_of_reporting: Set(report.week_of_reporting),
            date_of_lecture: Set(report.date_of_lecture),
            course_name: Set(report.course_name),
            course_code: Set(report.course_code),
            lecturer_name: Set(report.lecturer_name),
            actual_students_present: Set(report.actual_students_present),
            total_registered_students: Set(report.total_registered_students),
            venue: Set(report.venue),
            scheduled_time: Set(report.scheduled_time),
            topic_taught: Set(report.topic_taught),
            learning_outcomes: Set(report.learning_outcomes),
            recommendations: Set(report.recommendations),
            status: Set(ReportStatus::Pending.to_string()),
            principal_feedback: Set(None),
            rating: Set(None),
            average_rating: Set(None),
            reviewed_by: Set(None),
            reviewed_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LuctError::database_operation(format!("创建报告失败: {e}")))?;

        Ok(result.into_report())
    }

    /// 通过 ID 获取报告（附带讲师姓名）
    pub async fn get_report_by_id_impl(&self, id: i64) -> Result<Option<Report>> {
        let Some(model) = Reports::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LuctError::database_operation(format!("查询报告失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut reports = self.attach_lecturer_names(vec![model]).await?;
        Ok(reports.pop())
    }

    /// 按范围列出报告
    pub async fn list_reports_impl(&self, scope: ReportScope) -> Result<Vec<Report>> {
        let select = match scope {
            ReportScope::All => Reports::find()
                .order_by_desc(Column::CreatedAt)
                .order_by_desc(Column::Id),
            ReportScope::Student(_) => Reports::find()
                .filter(Column::Status.is_in([
                    ReportStatus::Approved.as_str(),
                    ReportStatus::Forwarded.as_str(),
                ]))
                .order_by_desc(Column::DateOfLecture)
                .order_by_desc(Column::ScheduledTime)
                .order_by_desc(Column::Id),
            ReportScope::Lecturer(lecturer_id) => Reports::find()
                .filter(Column::LecturerId.eq(lecturer_id))
                .order_by_desc(Column::CreatedAt)
                .order_by_desc(Column::Id),
            ReportScope::Status(status) => Reports::find()
                .filter(Column::Status.eq(status.as_str()))
                .order_by_desc(Column::CreatedAt)
                .order_by_desc(Column::Id),
            ReportScope::ForwardedByLectureDate => Reports::find()
                .filter(Column::Status.eq(ReportStatus::Forwarded.as_str()))
                .order_by_desc(Column::DateOfLecture)
                .order_by_desc(Column::Id),
        };

        let models = select
            .all(&self.db)
            .await
            .map_err(|e| LuctError::database_operation(format!("查询报告列表失败: {e}")))?;

        let mut reports = self.attach_lecturer_names(models).await?;

        // 学生视图附带本人评分
        if let ReportScope::Student(student_id) = scope {
            let my_ratings: HashMap<i64, i32> = ReportRatings::find()
                .filter(RatingColumn::StudentId.eq(student_id))
                .all(&self.db)
                .await
                .map_err(|e| LuctError::database_operation(format!("查询评分失败: {e}")))?
                .into_iter()
                .map(|r| (r.report_id, r.rating))
                .collect();

            for report in &mut reports {
                report.my_rating = my_ratings.get(&report.id).copied();
            }
        }

        Ok(reports)
    }

    /// 审核报告
    ///
    /// 条件更新：仅当状态仍为 pending 时写入，并发审核只有一个成功。
    pub async fn review_report_impl(
        &self,
        report_id: i64,
        reviewer_id: i64,
        decision: &ReviewDecision,
    ) -> Result<Report> {
        let now = chrono::Utc::now().timestamp();

        let result = Reports::update_many()
            .col_expr(Column::Status, Expr::value(decision.target.to_string()))
            .col_expr(
                Column::PrincipalFeedback,
                Expr::value(decision.feedback.clone()),
            )
            .col_expr(Column::Rating, Expr::value(decision.rating))
            .col_expr(Column::ReviewedBy, Expr::value(reviewer_id))
            .col_expr(Column::ReviewedAt, Expr::value(now))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(report_id))
            .filter(Column::Status.eq(REVIEWABLE_STATUS.as_str()))
            .exec(&self.db)
            .await
            .map_err(|e| LuctError::database_operation(format!("审核报告失败: {e}")))?;

        if result.rows_affected == 0 {
            return Err(LuctError::not_found(
                "Report not found or already processed",
            ));
        }

        self.get_report_by_id_impl(report_id)
            .await?
            .ok_or_else(|| LuctError::not_found("Report not found"))
    }

    /// 稀疏修改报告
    pub async fn update_report_impl(&self, report_id: i64, patch: &ReportPatch) -> Result<ReportEdit> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| LuctError::database_operation(format!("开启事务失败: {e}")))?;

        let existing = Reports::find_by_id(report_id)
            .one(&txn)
            .await
            .map_err(|e| LuctError::database_operation(format!("查询报告失败: {e}")))?
            .ok_or_else(|| LuctError::not_found("Report not found"))?;

        let previous_status = existing
            .status
            .parse::<ReportStatus>()
            .unwrap_or(ReportStatus::Pending);

        // 出勤人数与已存储值合并后校验
        if patch.touches_attendance() {
            let present = patch
                .actual_students_present
                .unwrap_or(existing.actual_students_present);
            let registered = patch
                .total_registered_students
                .unwrap_or(existing.total_registered_students);
            check_attendance(present, registered)?;
        }

        let mut model: ActiveModel = existing.into();

        if let Some(ref v) = patch.faculty_name {
            model.faculty_name = Set(v.clone());
        }
        if let Some(ref v) = patch.class_name {
            model.class_name = Set(v.clone());
        }
        if let Some(ref v) = patch.week_of_reporting {
            model.week_of_reporting = Set(v.clone());
        }
        if let Some(ref v) = patch.date_of_lecture {
            model.date_of_lecture = Set(v.clone());
        }
        if let Some(ref v) = patch.course_name {
            model.course_name = Set(v.clone());
        }
        if let Some(ref v) = patch.course_code {
            model.course_code = Set(v.clone());
        }
        if let Some(ref v) = patch.lecturer_name {
            model.lecturer_name = Set(v.clone());
        }
        if let Some(v) = patch.actual_students_present {
            model.actual_students_present = Set(v);
        }
        if let Some(v) = patch.total_registered_students {
            model.total_registered_students = Set(v);
        }
        if let Some(ref v) = patch.venue {
            model.venue = Set(v.clone());
        }
        if let Some(ref v) = patch.scheduled_time {
            model.scheduled_time = Set(v.clone());
        }
        if let Some(ref v) = patch.topic_taught {
            model.topic_taught = Set(v.clone());
        }
        if let Some(ref v) = patch.learning_outcomes {
            model.learning_outcomes = Set(v.clone());
        }
        if let Some(ref v) = patch.recommendations {
            model.recommendations = Set(v.clone());
        }
        if let Some(ref v) = patch.principal_feedback {
            model.principal_feedback = Set(Some(v.clone()));
        }
        if let Some(v) = patch.rating {
            model.rating = Set(Some(v));
        }
        if let Some(target) = patch
            .status
            .and_then(|status| next_status(previous_status, ReportAction::Override(status)))
        {
            if target != previous_status && previous_status != REVIEWABLE_STATUS {
                warn!(
                    "Report {} status overridden from {} to {}",
                    report_id, previous_status, target
                );
            }
            model.status = Set(target.to_string());
        }

        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model
            .update(&txn)
            .await
            .map_err(|e| LuctError::database_operation(format!("更新报告失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| LuctError::database_operation(format!("提交事务失败: {e}")))?;

        let mut reports = self.attach_lecturer_names(vec![updated]).await?;
        let report = reports
            .pop()
            .ok_or_else(|| LuctError::not_found("Report not found"))?;

        Ok(ReportEdit {
            previous_status,
            report,
        })
    }

    /// 报告统计
    pub async fn report_stats_impl(&self) -> Result<ReportStats> {
        let mut stats = ReportStats {
            total_reports: count_reports(&self.db, None).await?,
            total_ratings: ReportRatings::find()
                .count(&self.db)
                .await
                .map_err(|e| LuctError::database_operation(format!("统计评分失败: {e}")))?
                as i64,
            ..Default::default()
        };

        for status in ReportStatus::all() {
            let count = count_reports(&self.db, Some(*status)).await?;
            match status {
                ReportStatus::Pending => stats.pending = count,
                ReportStatus::Approved => stats.approved = count,
                ReportStatus::Forwarded => stats.forwarded = count,
                ReportStatus::Rejected => stats.rejected = count,
            }
        }

        Ok(stats)
    }

    /// 批量补充讲师姓名
    pub(crate) async fn attach_lecturer_names(&self, models: Vec<Model>) -> Result<Vec<Report>> {
        let mut lecturer_ids: Vec<i64> = models.iter().map(|m| m.lecturer_id).collect();
        lecturer_ids.sort_unstable();
        lecturer_ids.dedup();

        let names: HashMap<i64, String> = if lecturer_ids.is_empty() {
            HashMap::new()
        } else {
            Users::find()
                .filter(UserColumn::Id.is_in(lecturer_ids))
                .all(&self.db)
                .await
                .map_err(|e| LuctError::database_operation(format!("查询讲师失败: {e}")))?
                .into_iter()
                .map(|u| (u.id, u.name))
                .collect()
        };

        Ok(models
            .into_iter()
            .map(|m| {
                let lecturer_id = m.lecturer_id;
                let mut report = m.into_report();
                report.lecturer_full_name = names.get(&lecturer_id).cloned();
                report
            })
            .collect())
    }
}

async fn count_reports<C: ConnectionTrait>(db: &C, status: Option<ReportStatus>) -> Result<i64> {
    let mut select = Reports::find();
    if let Some(status) = status {
        select = select.filter(Column::Status.eq(status.as_str()));
    }
    let count = select
        .count(db)
        .await
        .map_err(|e| LuctError::database_operation(format!("统计报告失败: {e}")))?;
    Ok(count as i64)
}
