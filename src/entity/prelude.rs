//! 预导入模块，方便使用

pub use super::classes::{ActiveModel as ClassActiveModel, Entity as Classes, Model as ClassModel};
pub use super::courses::{
    ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel,
};
pub use super::enrollments::{
    ActiveModel as EnrollmentActiveModel, Entity as Enrollments, Model as EnrollmentModel,
};
pub use super::report_ratings::{
    ActiveModel as ReportRatingActiveModel, Entity as ReportRatings, Model as ReportRatingModel,
};
pub use super::reports::{
    ActiveModel as ReportActiveModel, Entity as Reports, Model as ReportModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
