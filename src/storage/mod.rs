use std::sync::Arc;

use crate::lifecycle::{NewReport, ReportPatch, ReviewDecision};
use crate::models::{
    classes::{
        entities::Class,
        requests::{CreateClassRequest, UpdateClassRequest},
    },
    courses::{
        entities::Course,
        requests::{CreateCourseRequest, UpdateCourseRequest},
    },
    enrollments::{
        entities::Enrollment,
        responses::{EnrollmentStats, StudentSummary},
    },
    reports::{
        entities::{Report, ReportRating, ReportStatus},
        responses::{RateReportResponse, ReportStats},
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UserListQuery},
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

/// 报告列表的查询范围
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportScope {
    /// 全部报告，按创建时间倒序
    All,
    /// 学生可见（已通过/已转交），附带该学生的评分
    Student(i64),
    /// 指定讲师提交的报告
    Lecturer(i64),
    /// 指定状态
    Status(ReportStatus),
    /// 导出用：已转交报告，按授课日期倒序
    ForwardedByLectureDate,
}

/// 报告修改结果
#[derive(Debug, Clone)]
pub struct ReportEdit {
    pub previous_status: ReportStatus,
    pub report: Report,
}

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（密码已哈希）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 列出用户（按姓名排序）
    async fn list_users(&self, query: UserListQuery) -> Result<Vec<User>>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 报告生命周期方法
    // 创建报告（状态为 pending）
    async fn create_report(&self, lecturer_id: i64, report: NewReport) -> Result<Report>;
    // 通过ID获取报告
    async fn get_report_by_id(&self, id: i64) -> Result<Option<Report>>;
    // 按范围列出报告
    async fn list_reports(&self, scope: ReportScope) -> Result<Vec<Report>>;
    // 审核报告：仅当报告仍为 pending 时更新，否则返回 NotFound
    async fn review_report(
        &self,
        report_id: i64,
        reviewer_id: i64,
        decision: &ReviewDecision,
    ) -> Result<Report>;
    // 稀疏修改报告（事务内读取并写入）
    async fn update_report(&self, report_id: i64, patch: &ReportPatch) -> Result<ReportEdit>;
    // 学生评分：插入评分并重算均值（同一事务）
    async fn rate_report(
        &self,
        report_id: i64,
        student_id: i64,
        rating: i32,
        feedback: Option<String>,
    ) -> Result<RateReportResponse>;
    // 列出报告的评分
    async fn list_report_ratings(&self, report_id: i64) -> Result<Vec<ReportRating>>;
    // 列出讲师收到的评分
    async fn list_lecturer_ratings(&self, lecturer_id: i64) -> Result<Vec<ReportRating>>;
    // 报告统计
    async fn report_stats(&self) -> Result<ReportStats>;

    /// 课程管理方法
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course>;
    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>>;
    async fn list_courses(&self) -> Result<Vec<Course>>;
    async fn update_course(&self, id: i64, update: UpdateCourseRequest) -> Result<Option<Course>>;
    // 删除课程，仍有班级引用时返回 Conflict
    async fn delete_course(&self, id: i64) -> Result<bool>;

    /// 班级管理方法
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class>;
    async fn get_class_by_id(&self, id: i64) -> Result<Option<Class>>;
    async fn list_classes(&self, lecturer_id: Option<i64>) -> Result<Vec<Class>>;
    async fn update_class(&self, id: i64, update: UpdateClassRequest) -> Result<Option<Class>>;
    // 删除班级，仍有选课记录时返回 Conflict
    async fn delete_class(&self, id: i64) -> Result<bool>;

    /// 选课管理方法
    // 选课：校验学生角色、班级容量与重复（同一事务）
    async fn enroll_student(&self, class_id: i64, student_id: i64) -> Result<Enrollment>;
    async fn list_enrollments(&self, class_id: Option<i64>) -> Result<Vec<Enrollment>>;
    async fn delete_enrollment(&self, id: i64) -> Result<bool>;
    async fn enrollment_stats(&self) -> Result<EnrollmentStats>;
    async fn list_students(&self) -> Result<Vec<StudentSummary>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
