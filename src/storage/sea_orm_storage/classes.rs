//! 班级存储操作

use std::collections::HashMap;

use super::{SeaOrmStorage, map_write_error};
use crate::entity::classes::{ActiveModel, Column, Entity as Classes, Model};
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{LuctError, Result};
use crate::models::classes::{
    entities::Class,
    requests::{CreateClassRequest, UpdateClassRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

const DEFAULT_MAX_STUDENTS: i32 = 30;

impl SeaOrmStorage {
    /// 创建班级
    ///
    /// 课程与讲师的存在性由服务层校验。
    pub async fn create_class_impl(&self, req: CreateClassRequest) -> Result<Class> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            class_code: Set(req.class_code),
            class_name: Set(req.class_name),
            course_id: Set(req.course_id),
            lecturer_id: Set(req.lecturer_id),
            semester: Set(req.semester),
            academic_year: Set(req.academic_year),
            max_students: Set(req.max_students.unwrap_or(DEFAULT_MAX_STUDENTS)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_write_error(e, "Class code already exists", "创建班级失败"))?;

        let mut classes = self.enrich_classes(vec![result]).await?;
        classes
            .pop()
            .ok_or_else(|| LuctError::not_found("Class not found"))
    }

    /// 通过 ID 获取班级
    pub async fn get_class_by_id_impl(&self, class_id: i64) -> Result<Option<Class>> {
        let Some(model) = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| LuctError::database_operation(format!("查询班级失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut classes = self.enrich_classes(vec![model]).await?;
        Ok(classes.pop())
    }

    /// 列出班级，指定讲师时仅返回其负责的班级
    pub async fn list_classes_impl(&self, lecturer_id: Option<i64>) -> Result<Vec<Class>> {
        let mut select = Classes::find();

        if let Some(lecturer_id) = lecturer_id {
            select = select.filter(Column::LecturerId.eq(lecturer_id));
        }

        let models = select
            .order_by_asc(Column::ClassCode)
            .all(&self.db)
            .await
            .map_err(|e| LuctError::database_operation(format!("查询班级列表失败: {e}")))?;

        self.enrich_classes(models).await
    }

    /// 更新班级
    pub async fn update_class_impl(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        let Some(existing) = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| LuctError::database_operation(format!("查询班级失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();

        if let Some(class_name) = update.class_name {
            model.class_name = Set(class_name);
        }
        if let Some(lecturer_id) = update.lecturer_id {
            model.lecturer_id = Set(Some(lecturer_id));
        }
        if let Some(semester) = update.semester {
            model.semester = Set(semester);
        }
        if let Some(academic_year) = update.academic_year {
            model.academic_year = Set(academic_year);
        }
        if let Some(max_students) = update.max_students {
            model.max_students = Set(max_students);
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| LuctError::database_operation(format!("更新班级失败: {e}")))?;

        let mut classes = self.enrich_classes(vec![updated]).await?;
        Ok(classes.pop())
    }

    /// 删除班级
    pub async fn delete_class_impl(&self, class_id: i64) -> Result<bool> {
        let enrolled = Enrollments::find()
            .filter(EnrollmentColumn::ClassId.eq(class_id))
            .count(&self.db)
            .await
            .map_err(|e| LuctError::database_operation(format!("统计选课失败: {e}")))?;

        if enrolled > 0 {
            return Err(LuctError::conflict(
                "Cannot delete class with enrolled students. Remove enrollments first.",
            ));
        }

        let result = Classes::delete_by_id(class_id)
            .exec(&self.db)
            .await
            .map_err(|e| LuctError::database_operation(format!("删除班级失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 补充课程、讲师与已选人数
    async fn enrich_classes(&self, models: Vec<Model>) -> Result<Vec<Class>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let class_ids: Vec<i64> = models.iter().map(|m| m.id).collect();
        let course_ids: Vec<i64> = models.iter().map(|m| m.course_id).collect();
        let lecturer_ids: Vec<i64> = models.iter().filter_map(|m| m.lecturer_id).collect();

        let courses: HashMap<i64, (String, String)> = Courses::find()
            .filter(CourseColumn::Id.is_in(course_ids))
            .all(&self.db)
            .await
            .map_err(|e| LuctError::database_operation(format!("查询课程失败: {e}")))?
            .into_iter()
            .map(|c| (c.id, (c.course_code, c.course_name)))
            .collect();

        let lecturers: HashMap<i64, String> = if lecturer_ids.is_empty() {
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

        let mut enrolled: HashMap<i64, i64> = HashMap::new();
        for enrollment in Enrollments::find()
            .filter(EnrollmentColumn::ClassId.is_in(class_ids))
            .all(&self.db)
            .await
            .map_err(|e| LuctError::database_operation(format!("查询选课失败: {e}")))?
        {
            *enrolled.entry(enrollment.class_id).or_default() += 1;
        }

        Ok(models
            .into_iter()
            .map(|m| {
                let (id, course_id, lecturer_id) = (m.id, m.course_id, m.lecturer_id);
                let mut class = m.into_class();
                if let Some((code, name)) = courses.get(&course_id) {
                    class.course_code = Some(code.clone());
                    class.course_name = Some(name.clone());
                }
                class.lecturer_name = lecturer_id.and_then(|lid| lecturers.get(&lid).cloned());
                class.enrolled_students = Some(enrolled.get(&id).copied().unwrap_or(0));
                class
            })
            .collect())
    }
}
