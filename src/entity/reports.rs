//! 课堂报告实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "reports")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub lecturer_id: i64,
    pub faculty_name: String,
    pub class_name: String,
    pub week_of_reporting: String,
    pub date_of_lecture: String,
    pub course_name: String,
    pub course_code: String,
    pub lecturer_name: String,
    pub actual_students_present: i32,
    pub total_registered_students: i32,
    pub venue: String,
    pub scheduled_time: String,
    #[sea_orm(column_type = "Text")]
    pub topic_taught: String,
    #[sea_orm(column_type = "Text")]
    pub learning_outcomes: String,
    #[sea_orm(column_type = "Text")]
    pub recommendations: String,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub principal_feedback: Option<String>,
    pub rating: Option<i32>,
    #[sea_orm(column_type = "Double", nullable)]
    pub average_rating: Option<f64>,
    pub reviewed_by: Option<i64>,
    pub reviewed_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::LecturerId",
        to = "super::users::Column::Id"
    )]
    Lecturer,
    #[sea_orm(has_many = "super::report_ratings::Entity")]
    Ratings,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lecturer.def()
    }
}

impl Related<super::report_ratings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ratings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_report(self) -> crate::models::reports::entities::Report {
        use crate::models::reports::entities::{Report, ReportStatus};

        Report {
            id: self.id,
            lecturer_id: self.lecturer_id,
            faculty_name: self.faculty_name,
            class_name: self.class_name,
            week_of_reporting: self.week_of_reporting,
            date_of_lecture: self.date_of_lecture,
            course_name: self.course_name,
            course_code: self.course_code,
            lecturer_name: self.lecturer_name,
            actual_students_present: self.actual_students_present,
            total_registered_students: self.total_registered_students,
            venue: self.venue,
            scheduled_time: self.scheduled_time,
            topic_taught: self.topic_taught,
            learning_outcomes: self.learning_outcomes,
            recommendations: self.recommendations,
            status: self
                .status
                .parse::<ReportStatus>()
                .unwrap_or(ReportStatus::Pending),
            principal_feedback: self.principal_feedback,
            rating: self.rating,
            average_rating: self.average_rating,
            reviewed_by: self.reviewed_by,
            reviewed_at: self.reviewed_at.map(super::ts_to_datetime),
            created_at: super::ts_to_datetime(self.created_at),
            updated_at: super::ts_to_datetime(self.updated_at),
            lecturer_full_name: None,
            my_rating: None,
        }
    }
}
