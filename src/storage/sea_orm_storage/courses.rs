//! 课程存储操作

use std::collections::HashMap;

use super::{SeaOrmStorage, map_write_error};
use crate::entity::classes::{Column as ClassColumn, Entity as Classes};
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::errors::{LuctError, Result};
use crate::models::courses::{
    entities::Course,
    requests::{CreateCourseRequest, UpdateCourseRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

const DEFAULT_CREDITS: i32 = 3;

impl SeaOrmStorage {
    /// 创建课程
    pub async fn create_course_impl(&self, req: CreateCourseRequest) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            course_code: Set(req.course_code),
            course_name: Set(req.course_name),
            description: Set(req.description),
            credits: Set(req.credits.unwrap_or(DEFAULT_CREDITS)),
            faculty: Set(req.faculty),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_write_error(e, "Course code already exists", "创建课程失败"))?;

        let mut course = result.into_course();
        course.class_count = Some(0);
        Ok(course)
    }

    /// 通过 ID 获取课程
    pub async fn get_course_by_id_impl(&self, id: i64) -> Result<Option<Course>> {
        let Some(model) = Courses::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LuctError::database_operation(format!("查询课程失败: {e}")))?
        else {
            return Ok(None);
        };

        let class_count = self.count_classes_for_course(id).await?;
        let mut course = model.into_course();
        course.class_count = Some(class_count);
        Ok(Some(course))
    }

    /// 列出全部课程（附班级数量）
    pub async fn list_courses_impl(&self) -> Result<Vec<Course>> {
        let models = Courses::find()
            .order_by_asc(Column::CourseCode)
            .all(&self.db)
            .await
            .map_err(|e| LuctError::database_operation(format!("查询课程列表失败: {e}")))?;

        let mut class_counts: HashMap<i64, i64> = HashMap::new();
        for class in Classes::find()
            .all(&self.db)
            .await
            .map_err(|e| LuctError::database_operation(format!("查询班级失败: {e}")))?
        {
            *class_counts.entry(class.course_id).or_default() += 1;
        }

        Ok(models
            .into_iter()
            .map(|m| {
                let id = m.id;
                let mut course = m.into_course();
                course.class_count = Some(class_counts.get(&id).copied().unwrap_or(0));
                course
            })
            .collect())
    }

    /// 更新课程
    pub async fn update_course_impl(
        &self,
        id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        let Some(existing) = Courses::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LuctError::database_operation(format!("查询课程失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();

        if let Some(course_name) = update.course_name {
            model.course_name = Set(course_name);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(credits) = update.credits {
            model.credits = Set(credits);
        }
        if let Some(faculty) = update.faculty {
            model.faculty = Set(faculty);
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        model
            .update(&self.db)
            .await
            .map_err(|e| LuctError::database_operation(format!("更新课程失败: {e}")))?;

        self.get_course_by_id_impl(id).await
    }

    /// 删除课程
    pub async fn delete_course_impl(&self, id: i64) -> Result<bool> {
        if self.count_classes_for_course(id).await? > 0 {
            return Err(LuctError::conflict(
                "Cannot delete course with existing classes. Delete classes first.",
            ));
        }

        let result = Courses::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| LuctError::database_operation(format!("删除课程失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    async fn count_classes_for_course(&self, course_id: i64) -> Result<i64> {
        let count = Classes::find()
            .filter(ClassColumn::CourseId.eq(course_id))
            .count(&self.db)
            .await
            .map_err(|e| LuctError::database_operation(format!("统计班级失败: {e}")))?;
        Ok(count as i64)
    }
}
