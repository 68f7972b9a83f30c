//! 学生评分存储操作

use std::collections::HashMap;

use super::{SeaOrmStorage, map_write_error};
use crate::entity::report_ratings::{ActiveModel, Column, Entity as ReportRatings, Model};
use crate::entity::reports::{Column as ReportColumn, Entity as Reports};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{LuctError, Result};
use crate::lifecycle::{average_rating, is_rateable};
use crate::models::reports::{
    entities::{ReportRating, ReportStatus},
    responses::RateReportResponse,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
    sea_query::Expr,
};

impl SeaOrmStorage {
    /// 提交评分并重算平均分
    ///
    /// 插入与均值写回在同一事务中完成，(report_id, student_id) 唯一索引兜底重复评分。
    pub async fn rate_report_impl(
        &self,
        report_id: i64,
        student_id: i64,
        rating: i32,
        feedback: Option<String>,
    ) -> Result<RateReportResponse> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| LuctError::database_operation(format!("开启事务失败: {e}")))?;

        let report = Reports::find_by_id(report_id)
            .one(&txn)
            .await
            .map_err(|e| LuctError::database_operation(format!("查询报告失败: {e}")))?
            .ok_or_else(|| LuctError::not_found("Report not found"))?;

        let status = report
            .status
            .parse::<ReportStatus>()
            .unwrap_or(ReportStatus::Pending);
        if !is_rateable(status) {
            return Err(LuctError::not_eligible(
                "Only approved or forwarded reports can be rated",
            ));
        }

        let existing = ReportRatings::find()
            .filter(Column::ReportId.eq(report_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&txn)
            .await
            .map_err(|e| LuctError::database_operation(format!("查询评分失败: {e}")))?;
        if existing.is_some() {
            return Err(LuctError::conflict("You have already rated this report"));
        }

        let now = chrono::Utc::now().timestamp();
        ActiveModel {
            report_id: Set(report_id),
            student_id: Set(student_id),
            rating: Set(rating),
            feedback: Set(Some(feedback.unwrap_or_default())),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| map_write_error(e, "You have already rated this report", "保存评分失败"))?;

        let ratings: Vec<i32> = ReportRatings::find()
            .filter(Column::ReportId.eq(report_id))
            .all(&txn)
            .await
            .map_err(|e| LuctError::database_operation(format!("查询评分失败: {e}")))?
            .into_iter()
            .map(|r| r.rating)
            .collect();

        let average = average_rating(&ratings);

        Reports::update_many()
            .col_expr(ReportColumn::AverageRating, Expr::value(average))
            .col_expr(ReportColumn::UpdatedAt, Expr::value(now))
            .filter(ReportColumn::Id.eq(report_id))
            .exec(&txn)
            .await
            .map_err(|e| LuctError::database_operation(format!("更新平均分失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| LuctError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(RateReportResponse {
            average_rating: average,
            rating_count: ratings.len() as i64,
        })
    }

    /// 某报告的全部评分，最新在前
    pub async fn list_report_ratings_impl(&self, report_id: i64) -> Result<Vec<ReportRating>> {
        let models = ReportRatings::find()
            .filter(Column::ReportId.eq(report_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| LuctError::database_operation(format!("查询评分列表失败: {e}")))?;

        self.attach_student_names(models).await
    }

    /// 讲师收到的全部评分（附课程、班级与授课日期）
    pub async fn list_lecturer_ratings_impl(&self, lecturer_id: i64) -> Result<Vec<ReportRating>> {
        let reports: HashMap<i64, (String, String, String)> = Reports::find()
            .filter(ReportColumn::LecturerId.eq(lecturer_id))
            .all(&self.db)
            .await
            .map_err(|e| LuctError::database_operation(format!("查询报告失败: {e}")))?
            .into_iter()
            .map(|r| (r.id, (r.course_name, r.class_name, r.date_of_lecture)))
            .collect();

        if reports.is_empty() {
            return Ok(Vec::new());
        }

        let models = ReportRatings::find()
            .filter(Column::ReportId.is_in(reports.keys().copied()))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| LuctError::database_operation(format!("查询评分列表失败: {e}")))?;

        let mut ratings = self.attach_student_names(models).await?;
        for rating in &mut ratings {
            if let Some((course_name, class_name, date)) = reports.get(&rating.report_id) {
                rating.course_name = Some(course_name.clone());
                rating.class_name = Some(class_name.clone());
                rating.date_of_lecture = Some(date.clone());
            }
        }

        Ok(ratings)
    }

    async fn attach_student_names(&self, models: Vec<Model>) -> Result<Vec<ReportRating>> {
        let mut student_ids: Vec<i64> = models.iter().map(|m| m.student_id).collect();
        student_ids.sort_unstable();
        student_ids.dedup();

        let names: HashMap<i64, String> = if student_ids.is_empty() {
            HashMap::new()
        } else {
            Users::find()
                .filter(UserColumn::Id.is_in(student_ids))
                .all(&self.db)
                .await
                .map_err(|e| LuctError::database_operation(format!("查询学生失败: {e}")))?
                .into_iter()
                .map(|u| (u.id, u.name))
                .collect()
        };

        Ok(models
            .into_iter()
            .map(|m| {
                let student_id = m.student_id;
                let mut rating = m.into_rating();
                rating.student_name = names.get(&student_id).cloned();
                rating
            })
            .collect())
    }
}
