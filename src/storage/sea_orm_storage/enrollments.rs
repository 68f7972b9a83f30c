//! 选课存储操作

use std::collections::{HashMap, HashSet};

use super::{SeaOrmStorage, map_write_error};
use crate::entity::classes::{Entity as Classes, Model as ClassModel};
use crate::entity::courses::Entity as Courses;
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments, Model};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{LuctError, Result};
use crate::models::enrollments::{
    entities::Enrollment,
    responses::{EnrollmentStats, PopularClass},
};
use crate::models::users::entities::UserRole;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

const POPULAR_CLASS_LIMIT: usize = 5;

impl SeaOrmStorage {
    /// 学生选课
    pub async fn enroll_student_impl(&self, class_id: i64, student_id: i64) -> Result<Enrollment> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| LuctError::database_operation(format!("开启事务失败: {e}")))?;

        let student = Users::find_by_id(student_id)
            .one(&txn)
            .await
            .map_err(|e| LuctError::database_operation(format!("查询学生失败: {e}")))?
            .filter(|u| u.role == UserRole::Student.to_string())
            .ok_or_else(|| LuctError::validation("Student not found or invalid role"))?;

        let class = Classes::find_by_id(class_id)
            .one(&txn)
            .await
            .map_err(|e| LuctError::database_operation(format!("查询班级失败: {e}")))?
            .ok_or_else(|| LuctError::not_found("Class not found"))?;

        let duplicate = Enrollments::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&txn)
            .await
            .map_err(|e| LuctError::database_operation(format!("查询选课失败: {e}")))?;
        if duplicate.is_some() {
            return Err(LuctError::conflict(
                "Student is already enrolled in this class",
            ));
        }

        let enrolled = Enrollments::find()
            .filter(Column::ClassId.eq(class_id))
            .count(&txn)
            .await
            .map_err(|e| LuctError::database_operation(format!("统计选课失败: {e}")))?;
        if enrolled >= class.max_students.max(0) as u64 {
            return Err(LuctError::validation(format!(
                "Class \"{}\" has reached maximum capacity ({} students)",
                class.class_name, class.max_students
            )));
        }

        let result = ActiveModel {
            class_id: Set(class_id),
            student_id: Set(student_id),
            enrolled_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| {
            map_write_error(e, "Student is already enrolled in this class", "创建选课失败")
        })?;

        txn.commit()
            .await
            .map_err(|e| LuctError::database_operation(format!("提交事务失败: {e}")))?;

        let mut enrollment = result.into_enrollment();
        enrollment.student_name = Some(student.name);
        enrollment.student_email = Some(student.email);
        enrollment.class_code = Some(class.class_code);
        enrollment.class_name = Some(class.class_name);
        Ok(enrollment)
    }

    /// 列出选课记录，可按班级筛选
    pub async fn list_enrollments_impl(&self, class_id: Option<i64>) -> Result<Vec<Enrollment>> {
        let mut select = Enrollments::find();

        if let Some(class_id) = class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }

        let models = select
            .order_by_desc(Column::EnrolledAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| LuctError::database_operation(format!("查询选课列表失败: {e}")))?;

        self.enrich_enrollments(models).await
    }

    /// 删除选课记录
    pub async fn delete_enrollment_impl(&self, id: i64) -> Result<bool> {
        let result = Enrollments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| LuctError::database_operation(format!("删除选课失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 选课统计
    pub async fn enrollment_stats_impl(&self) -> Result<EnrollmentStats> {
        let enrollments = Enrollments::find()
            .all(&self.db)
            .await
            .map_err(|e| LuctError::database_operation(format!("查询选课失败: {e}")))?;

        let unique_students: HashSet<i64> = enrollments.iter().map(|e| e.student_id).collect();

        let mut per_class: HashMap<i64, i64> = HashMap::new();
        for enrollment in &enrollments {
            *per_class.entry(enrollment.class_id).or_default() += 1;
        }

        let classes: HashMap<i64, ClassModel> = Classes::find()
            .all(&self.db)
            .await
            .map_err(|e| LuctError::database_operation(format!("查询班级失败: {e}")))?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        let mut popular: Vec<PopularClass> = per_class
            .iter()
            .filter_map(|(class_id, count)| {
                classes.get(class_id).map(|c| PopularClass {
                    class_id: c.id,
                    class_code: c.class_code.clone(),
                    class_name: c.class_name.clone(),
                    enrollment_count: *count,
                })
            })
            .collect();
        popular.sort_by(|a, b| {
            b.enrollment_count
                .cmp(&a.enrollment_count)
                .then(a.class_id.cmp(&b.class_id))
        });
        popular.truncate(POPULAR_CLASS_LIMIT);

        Ok(EnrollmentStats {
            total_enrollments: enrollments.len() as i64,
            unique_students: unique_students.len() as i64,
            active_classes: per_class.len() as i64,
            popular_classes: popular,
        })
    }

    /// 补充学生、班级、课程与讲师信息
    async fn enrich_enrollments(&self, models: Vec<Model>) -> Result<Vec<Enrollment>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let classes: HashMap<i64, ClassModel> = Classes::find()
            .all(&self.db)
            .await
            .map_err(|e| LuctError::database_operation(format!("查询班级失败: {e}")))?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        let courses: HashMap<i64, (String, String)> = Courses::find()
            .all(&self.db)
            .await
            .map_err(|e| LuctError::database_operation(format!("查询课程失败: {e}")))?
            .into_iter()
            .map(|c| (c.id, (c.course_code, c.course_name)))
            .collect();

        let mut user_ids: Vec<i64> = models.iter().map(|m| m.student_id).collect();
        user_ids.extend(classes.values().filter_map(|c| c.lecturer_id));
        user_ids.sort_unstable();
        user_ids.dedup();

        let users: HashMap<i64, (String, String)> = Users::find()
            .filter(UserColumn::Id.is_in(user_ids))
            .all(&self.db)
            .await
            .map_err(|e| LuctError::database_operation(format!("查询用户失败: {e}")))?
            .into_iter()
            .map(|u| (u.id, (u.name, u.email)))
            .collect();

        Ok(models
            .into_iter()
            .map(|m| {
                let (student_id, class_id) = (m.student_id, m.class_id);
                let mut enrollment = m.into_enrollment();

                if let Some((name, email)) = users.get(&student_id) {
                    enrollment.student_name = Some(name.clone());
                    enrollment.student_email = Some(email.clone());
                }

                if let Some(class) = classes.get(&class_id) {
                    enrollment.class_code = Some(class.class_code.clone());
                    enrollment.class_name = Some(class.class_name.clone());
                    if let Some((code, name)) = courses.get(&class.course_id) {
                        enrollment.course_code = Some(code.clone());
                        enrollment.course_name = Some(name.clone());
                    }
                    enrollment.lecturer_name = class
                        .lecturer_id
                        .and_then(|lid| users.get(&lid).map(|(name, _)| name.clone()));
                }

                enrollment
            })
            .collect())
    }
}
