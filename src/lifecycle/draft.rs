//! 报告草稿与修改请求校验

use chrono::NaiveDate;

use crate::errors::{LuctError, Result};
use crate::models::reports::entities::ReportStatus;
use crate::models::reports::requests::{CreateReportRequest, UpdateReportRequest};

use super::rating::validate_rating;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// 校验通过的新报告
#[derive(Debug, Clone, PartialEq)]
pub struct NewReport {
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
    pub topic_taught: String,
    pub learning_outcomes: String,
    pub recommendations: String,
}

/// 校验通过的稀疏修改，None 表示不修改
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportPatch {
    pub faculty_name: Option<String>,
    pub class_name: Option<String>,
    pub week_of_reporting: Option<String>,
    pub date_of_lecture: Option<String>,
    pub course_name: Option<String>,
    pub course_code: Option<String>,
    pub lecturer_name: Option<String>,
    pub actual_students_present: Option<i32>,
    pub total_registered_students: Option<i32>,
    pub venue: Option<String>,
    pub scheduled_time: Option<String>,
    pub topic_taught: Option<String>,
    pub learning_outcomes: Option<String>,
    pub recommendations: Option<String>,
    pub principal_feedback: Option<String>,
    pub rating: Option<i32>,
    pub status: Option<ReportStatus>,
}

impl ReportPatch {
    pub fn is_empty(&self) -> bool {
        self == &ReportPatch::default()
    }

    /// 是否涉及出勤人数
    pub fn touches_attendance(&self) -> bool {
        self.actual_students_present.is_some() || self.total_registered_students.is_some()
    }
}

/// 出勤人数必须非负且不超过注册人数
pub fn check_attendance(present: i32, registered: i32) -> Result<()> {
    if present < 0 || registered < 0 {
        return Err(LuctError::validation(
            "Attendance counts must be non-negative",
        ));
    }
    if present > registered {
        return Err(LuctError::validation(format!(
            "Students present ({present}) cannot exceed total registered students ({registered})"
        )));
    }
    Ok(())
}

fn parse_lecture_date(value: &str) -> Result<String> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(|d| d.format(DATE_FORMAT).to_string())
        .map_err(|_| {
            LuctError::date_parse(format!(
                "Invalid date of lecture '{value}', expected YYYY-MM-DD"
            ))
        })
}

fn to_count(label: &str, value: i64) -> Result<i32> {
    i32::try_from(value)
        .map_err(|_| LuctError::validation(format!("{label} is out of range")))
}

/// 校验创建请求，一次性列出全部缺失字段
pub fn validate_draft(req: CreateReportRequest) -> Result<NewReport> {
    fn text(value: Option<String>, label: &'static str, missing: &mut Vec<&'static str>) -> String {
        match value.map(|v| v.trim().to_string()) {
            Some(v) if !v.is_empty() => v,
            _ => {
                missing.push(label);
                String::new()
            }
        }
    }

    let mut missing = Vec::new();

    let faculty_name = text(req.faculty_name, "faculty name", &mut missing);
    let class_name = text(req.class_name, "class name", &mut missing);
    let week_of_reporting = text(req.week_of_reporting, "week of reporting", &mut missing);
    let date_of_lecture = text(req.date_of_lecture, "date of lecture", &mut missing);
    let course_name = text(req.course_name, "course name", &mut missing);
    let course_code = text(req.course_code, "course code", &mut missing);
    let lecturer_name = text(req.lecturer_name, "lecturer name", &mut missing);
    if req.actual_students_present.is_none() {
        missing.push("actual students present");
    }
    if req.total_registered_students.is_none() {
        missing.push("total registered students");
    }
    let venue = text(req.venue, "venue", &mut missing);
    let scheduled_time = text(req.scheduled_time, "scheduled time", &mut missing);
    let topic_taught = text(req.topic_taught, "topic taught", &mut missing);
    let learning_outcomes = text(req.learning_outcomes, "learning outcomes", &mut missing);
    let recommendations = text(req.recommendations, "recommendations", &mut missing);

    if !missing.is_empty() {
        return Err(LuctError::validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    let actual_students_present = to_count(
        "Actual students present",
        req.actual_students_present.unwrap_or_default(),
    )?;
    let total_registered_students = to_count(
        "Total registered students",
        req.total_registered_students.unwrap_or_default(),
    )?;
    check_attendance(actual_students_present, total_registered_students)?;

    Ok(NewReport {
        faculty_name,
        class_name,
        week_of_reporting,
        date_of_lecture: parse_lecture_date(&date_of_lecture)?,
        course_name,
        course_code,
        lecturer_name,
        actual_students_present,
        total_registered_students,
        venue,
        scheduled_time,
        topic_taught,
        learning_outcomes,
        recommendations,
    })
}

/// 校验修改请求：至少一个字段，状态合法，评分 1-5
pub fn validate_patch(req: UpdateReportRequest) -> Result<ReportPatch> {
    fn text(value: Option<String>, label: &str) -> Result<Option<String>> {
        match value {
            None => Ok(None),
            Some(v) => {
                let v = v.trim().to_string();
                if v.is_empty() {
                    Err(LuctError::validation(format!("{label} cannot be empty")))
                } else {
                    Ok(Some(v))
                }
            }
        }
    }

    let status = match req.status {
        Some(s) => Some(s.parse::<ReportStatus>().map_err(|_| {
            LuctError::validation(format!(
                "Invalid status '{s}'. Supported: pending, approved, forwarded, rejected"
            ))
        })?),
        None => None,
    };

    let rating = match req.rating {
        Some(r) => Some(validate_rating(Some(r))?),
        None => None,
    };

    let date_of_lecture = match text(req.date_of_lecture, "Date of lecture")? {
        Some(d) => Some(parse_lecture_date(&d)?),
        None => None,
    };

    let actual_students_present = req
        .actual_students_present
        .map(|v| to_count("Actual students present", v))
        .transpose()?;
    let total_registered_students = req
        .total_registered_students
        .map(|v| to_count("Total registered students", v))
        .transpose()?;

    let patch = ReportPatch {
        faculty_name: text(req.faculty_name, "Faculty name")?,
        class_name: text(req.class_name, "Class name")?,
        week_of_reporting: text(req.week_of_reporting, "Week of reporting")?,
        date_of_lecture,
        course_name: text(req.course_name, "Course name")?,
        course_code: text(req.course_code, "Course code")?,
        lecturer_name: text(req.lecturer_name, "Lecturer name")?,
        actual_students_present,
        total_registered_students,
        venue: text(req.venue, "Venue")?,
        scheduled_time: text(req.scheduled_time, "Scheduled time")?,
        topic_taught: text(req.topic_taught, "Topic taught")?,
        learning_outcomes: text(req.learning_outcomes, "Learning outcomes")?,
        recommendations: text(req.recommendations, "Recommendations")?,
        principal_feedback: req.principal_feedback,
        rating,
        status,
    };

    if patch.is_empty() {
        return Err(LuctError::validation("No fields to update"));
    }

    Ok(patch)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> CreateReportRequest {
        CreateReportRequest {
            faculty_name: Some("FICT".into()),
            class_name: Some("BSCSM Y2".into()),
            week_of_reporting: Some("Week 6".into()),
            date_of_lecture: Some("2025-03-14".into()),
            course_name: Some("Web Application Development".into()),
            course_code: Some("BIWA2110".into()),
            lecturer_name: Some("T. Mokoena".into()),
            actual_students_present: Some(25),
            total_registered_students: Some(30),
            venue: Some("Hall 6".into()),
            scheduled_time: Some("08:30".into()),
            topic_taught: Some("React hooks".into()),
            learning_outcomes: Some("Students can build stateful components".into()),
            recommendations: Some("More lab time".into()),
        }
    }

    #[test]
    fn test_valid_draft() {
        let report = validate_draft(full_request()).unwrap();
        assert_eq!(report.actual_students_present, 25);
        assert_eq!(report.total_registered_students, 30);
        assert_eq!(report.date_of_lecture, "2025-03-14");
    }

    #[test]
    fn test_missing_fields_listed_together() {
        let mut req = full_request();
        req.venue = None;
        req.topic_taught = Some("   ".into());
        req.total_registered_students = None;
        let err = validate_draft(req).unwrap_err();
        assert_eq!(err.code(), "E005");
        assert_eq!(
            err.message(),
            "Missing required fields: total registered students, venue, topic taught"
        );
    }

    #[test]
    fn test_zero_attendance_is_present() {
        let mut req = full_request();
        req.actual_students_present = Some(0);
        assert!(validate_draft(req).is_ok());
    }

    #[test]
    fn test_attendance_rules() {
        let mut req = full_request();
        req.actual_students_present = Some(31);
        assert!(
            validate_draft(req)
                .unwrap_err()
                .message()
                .contains("cannot exceed")
        );

        let mut req = full_request();
        req.actual_students_present = Some(-1);
        assert!(
            validate_draft(req)
                .unwrap_err()
                .message()
                .contains("non-negative")
        );
    }

    #[test]
    fn test_bad_date() {
        let mut req = full_request();
        req.date_of_lecture = Some("14/03/2025".into());
        assert_eq!(validate_draft(req).unwrap_err().code(), "E008");
    }

    #[test]
    fn test_empty_patch_rejected() {
        let err = validate_patch(UpdateReportRequest::default()).unwrap_err();
        assert_eq!(err.message(), "No fields to update");
    }

    #[test]
    fn test_status_only_patch() {
        let patch = validate_patch(UpdateReportRequest {
            status: Some("forwarded".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(patch.status, Some(ReportStatus::Forwarded));
        assert!(patch.venue.is_none());
        assert!(!patch.touches_attendance());
    }

    #[test]
    fn test_patch_rejects_unknown_status_and_bad_rating() {
        let err = validate_patch(UpdateReportRequest {
            status: Some("archived".into()),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.code(), "E005");

        let err = validate_patch(UpdateReportRequest {
            rating: Some(9),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.code(), "E013");
    }

    #[test]
    fn test_check_attendance() {
        assert!(check_attendance(30, 30).is_ok());
        assert!(check_attendance(0, 0).is_ok());
        assert!(check_attendance(31, 30).is_err());
    }
}
