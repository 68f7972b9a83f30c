use serde::Serialize;
use ts_rs::TS;

use super::entities::Enrollment;

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "enrollment.ts")]
pub struct EnrollmentListResponse {
    pub items: Vec<Enrollment>,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "enrollment.ts")]
pub struct PopularClass {
    pub class_id: i64,
    pub class_code: String,
    pub class_name: String,
    pub enrollment_count: i64,
}

// 选课统计
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "enrollment.ts")]
pub struct EnrollmentStats {
    pub total_enrollments: i64,
    pub unique_students: i64,
    pub active_classes: i64,
    pub popular_classes: Vec<PopularClass>,
}

// 可选学生
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "enrollment.ts")]
pub struct StudentSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
}
