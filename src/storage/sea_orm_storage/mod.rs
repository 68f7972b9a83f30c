//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod classes;
mod courses;
mod enrollments;
mod ratings;
mod reports;
mod users;

use crate::config::{AppConfig, DatabaseConfig};
use crate::errors::{LuctError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 使用全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        Self::connect(&AppConfig::get().database).await
    }

    /// 按数据库配置连接并运行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        Migrator::up(&db, None)
            .await
            .map_err(|e| LuctError::database_operation(format!("Database migration failed: {e}")))?;

        info!("SeaORM storage ready, database: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| LuctError::database_config(format!("Invalid SQLite URL: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.pool_size.max(1))
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(None)
            .connect_with(opt)
            .await
            .map_err(|e| LuctError::database_connection(format!("SQLite connection failed: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false);

        Database::connect(opt)
            .await
            .map_err(|e| LuctError::database_connection(format!("Cannot connect to database: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    pub(crate) fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(LuctError::database_config(format!(
                "Cannot infer database type from URL: {url}. Supported: sqlite:, postgres://, mysql://, or a .db/.sqlite path"
            )))
        }
    }
}

/// 唯一约束冲突转换为 Conflict，其余为数据库错误
pub(crate) fn map_write_error(err: DbErr, conflict_message: &str, context: &str) -> LuctError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => LuctError::conflict(conflict_message),
        _ => LuctError::database_operation(format!("{context}: {err}")),
    }
}


// Storage trait 实现
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
        entities::{Report, ReportRating},
        responses::{RateReportResponse, ReportStats},
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UserListQuery},
    },
};
use crate::storage::{ReportEdit, ReportScope, Storage};
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users(&self, query: UserListQuery) -> Result<Vec<User>> {
        self.list_users_impl(query).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 报告模块
    async fn create_report(&self, lecturer_id: i64, report: NewReport) -> Result<Report> {
        self.create_report_impl(lecturer_id, report).await
    }

    async fn get_report_by_id(&self, id: i64) -> Result<Option<Report>> {
        self.get_report_by_id_impl(id).await
    }

    async fn list_reports(&self, scope: ReportScope) -> Result<Vec<Report>> {
        self.list_reports_impl(scope).await
    }

    async fn review_report(
        &self,
        report_id: i64,
        reviewer_id: i64,
        decision: &ReviewDecision,
    ) -> Result<Report> {
        self.review_report_impl(report_id, reviewer_id, decision)
            .await
    }

    async fn update_report(&self, report_id: i64, patch: &ReportPatch) -> Result<ReportEdit> {
        self.update_report_impl(report_id, patch).await
    }

    async fn report_stats(&self) -> Result<ReportStats> {
        self.report_stats_impl().await
    }

    // 评分模块
    async fn rate_report(
        &self,
        report_id: i64,
        student_id: i64,
        rating: i32,
        feedback: Option<String>,
    ) -> Result<RateReportResponse> {
        self.rate_report_impl(report_id, student_id, rating, feedback)
            .await
    }

    async fn list_report_ratings(&self, report_id: i64) -> Result<Vec<ReportRating>> {
        self.list_report_ratings_impl(report_id).await
    }

    async fn list_lecturer_ratings(&self, lecturer_id: i64) -> Result<Vec<ReportRating>> {
        self.list_lecturer_ratings_impl(lecturer_id).await
    }

    // 课程模块
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(course).await
    }

    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(id).await
    }

    async fn list_courses(&self) -> Result<Vec<Course>> {
        self.list_courses_impl().await
    }

    async fn update_course(&self, id: i64, update: UpdateCourseRequest) -> Result<Option<Course>> {
        self.update_course_impl(id, update).await
    }

    async fn delete_course(&self, id: i64) -> Result<bool> {
        self.delete_course_impl(id).await
    }

    // 班级模块
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class> {
        self.create_class_impl(class).await
    }

    async fn get_class_by_id(&self, id: i64) -> Result<Option<Class>> {
        self.get_class_by_id_impl(id).await
    }

    async fn list_classes(&self, lecturer_id: Option<i64>) -> Result<Vec<Class>> {
        self.list_classes_impl(lecturer_id).await
    }

    async fn update_class(&self, id: i64, update: UpdateClassRequest) -> Result<Option<Class>> {
        self.update_class_impl(id, update).await
    }

    async fn delete_class(&self, id: i64) -> Result<bool> {
        self.delete_class_impl(id).await
    }

    // 选课模块
    async fn enroll_student(&self, class_id: i64, student_id: i64) -> Result<Enrollment> {
        self.enroll_student_impl(class_id, student_id).await
    }

    async fn list_enrollments(&self, class_id: Option<i64>) -> Result<Vec<Enrollment>> {
        self.list_enrollments_impl(class_id).await
    }

    async fn delete_enrollment(&self, id: i64) -> Result<bool> {
        self.delete_enrollment_impl(id).await
    }

    async fn enrollment_stats(&self) -> Result<EnrollmentStats> {
        self.enrollment_stats_impl().await
    }

    async fn list_students(&self) -> Result<Vec<StudentSummary>> {
        self.list_students_impl().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("luct.db").unwrap(),
            "sqlite://luct.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url(":memory:").unwrap(),
            "sqlite::memory:"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("sqlite::memory:").unwrap(),
            "sqlite::memory:"
        );
        assert!(SeaOrmStorage::build_database_url("postgres://u:p@localhost/luct").is_ok());
        assert!(SeaOrmStorage::build_database_url("redis://localhost").is_err());
    }
}
