//! 已转交报告导出服务

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use rust_xlsxwriter::{Format, Workbook};
use tracing::{error, info};

use super::ReportService;
use crate::errors::{LuctError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    reports::{
        entities::Report,
        requests::ExportQuery,
    },
};
use crate::storage::ReportScope;

const SHEET_NAME: &str = "Forwarded Reports";

const HEADERS: [&str; 16] = [
    "Report ID",
    "Faculty",
    "Class",
    "Course Name",
    "Course Code",
    "Lecturer",
    "Date",
    "Students Present",
    "Total Students",
    "Attendance %",
    "Venue",
    "Scheduled Time",
    "Topic",
    "Learning Outcomes",
    "Recommendations",
    "Status",
];

const COLUMN_WIDTHS: [f64; 16] = [
    10.0, 20.0, 15.0, 25.0, 12.0, 20.0, 12.0, 15.0, 15.0, 12.0, 15.0, 15.0, 30.0, 30.0, 30.0,
    12.0,
];

/// 导出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Csv,
}

impl ExportFormat {
    /// 未指定时默认 xlsx
    pub fn parse(value: Option<&str>) -> Option<Self> {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            None | Some("") | Some("xlsx") | Some("excel") => Some(ExportFormat::Xlsx),
            Some("csv") => Some(ExportFormat::Csv),
            Some(_) => None,
        }
    }

    fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Csv => "text/csv; charset=utf-8",
        }
    }

    fn extension(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
        }
    }
}

pub async fn export_forwarded(
    service: &ReportService,
    request: &HttpRequest,
    query: ExportQuery,
) -> ActixResult<HttpResponse> {
    let Some(format) = ExportFormat::parse(query.format.as_deref()) else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Unsupported export format, use xlsx or csv",
        )));
    };

    let storage = service.get_storage(request);
    let reports = match storage
        .list_reports(ReportScope::ForwardedByLectureDate)
        .await
    {
        Ok(reports) => reports,
        Err(e) => return Ok(ApiResponse::from_error(&e)),
    };

    let buffer = match format {
        ExportFormat::Xlsx => build_xlsx(&reports),
        ExportFormat::Csv => build_csv(&reports),
    };

    match buffer {
        Ok(buffer) => {
            info!(
                "Exported {} forwarded reports as {}",
                reports.len(),
                format.extension()
            );
            let date = Utc::now().format("%Y-%m-%d").to_string();
            let filename = format!("forwarded-reports-{date}.{}", format.extension());

            Ok(HttpResponse::Ok()
                .content_type(format.content_type())
                .insert_header((
                    "Content-Disposition",
                    format!("attachment; filename=\"{filename}\""),
                ))
                .body(buffer))
        }
        Err(e) => {
            error!("生成导出文件失败: {}", e);
            Ok(ApiResponse::from_error(&e))
        }
    }
}

/// 单行导出数据
fn report_row(report: &Report) -> [String; 16] {
    [
        report.id.to_string(),
        report.faculty_name.clone(),
        report.class_name.clone(),
        report.course_name.clone(),
        report.course_code.clone(),
        report.lecturer_name.clone(),
        report.date_of_lecture.clone(),
        report.actual_students_present.to_string(),
        report.total_registered_students.to_string(),
        format!("{}%", report.attendance_percentage()),
        report.venue.clone(),
        report.scheduled_time.clone(),
        report.topic_taught.clone(),
        report.learning_outcomes.clone(),
        report.recommendations.clone(),
        report.status.to_string(),
    ]
}

/// 生成 XLSX 文件，表头加粗
pub fn build_xlsx(reports: &[Report]) -> Result<Vec<u8>> {
    let xlsx_err = |e: rust_xlsxwriter::XlsxError| LuctError::export(format!("XLSX 生成失败: {e}"));

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let sheet = workbook
        .add_worksheet()
        .set_name(SHEET_NAME)
        .map_err(xlsx_err)?;

    for (col, header) in HEADERS.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(xlsx_err)?;
    }

    for (idx, report) in reports.iter().enumerate() {
        let row = idx as u32 + 1;
        for (col, value) in report_row(report).iter().enumerate() {
            let col = col as u16;
            match col {
                // 数值列
                0 | 7 | 8 => {
                    let number = value.parse::<f64>().unwrap_or_default();
                    sheet.write_number(row, col, number).map_err(xlsx_err)?;
                }
                _ => {
                    sheet.write_string(row, col, value).map_err(xlsx_err)?;
                }
            }
        }
    }

    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        sheet
            .set_column_width(col as u16, *width)
            .map_err(xlsx_err)?;
    }

    workbook.save_to_buffer().map_err(xlsx_err)
}

/// 生成 CSV 文件
pub fn build_csv(reports: &[Report]) -> Result<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(HEADERS)
        .map_err(|e| LuctError::export(format!("CSV 写入失败: {e}")))?;

    for report in reports {
        wtr.write_record(report_row(report))
            .map_err(|e| LuctError::export(format!("CSV 写入失败: {e}")))?;
    }

    wtr.into_inner()
        .map_err(|e| LuctError::export(format!("CSV 生成失败: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::reports::entities::ReportStatus;

    fn forwarded_report(present: i32, registered: i32) -> Report {
        let now = Utc::now();
        Report {
            id: 7,
            lecturer_id: 2,
            faculty_name: "FICT".to_string(),
            class_name: "BSCSM Y2".to_string(),
            week_of_reporting: "Week 6".to_string(),
            date_of_lecture: "2026-03-10".to_string(),
            course_name: "Web Application Development".to_string(),
            course_code: "BIWA2110".to_string(),
            lecturer_name: "Jane Lecturer".to_string(),
            actual_students_present: present,
            total_registered_students: registered,
            venue: "Hall 6".to_string(),
            scheduled_time: "10:30".to_string(),
            topic_taught: "REST APIs, part 2".to_string(),
            learning_outcomes: "Build endpoints".to_string(),
            recommendations: "More labs".to_string(),
            status: ReportStatus::Forwarded,
            principal_feedback: Some(String::new()),
            rating: None,
            average_rating: None,
            reviewed_by: Some(3),
            reviewed_at: Some(now),
            created_at: now,
            updated_at: now,
            lecturer_full_name: None,
            my_rating: None,
        }
    }

    #[test]
    fn test_export_format_parse() {
        assert_eq!(ExportFormat::parse(None), Some(ExportFormat::Xlsx));
        assert_eq!(ExportFormat::parse(Some("CSV")), Some(ExportFormat::Csv));
        assert_eq!(ExportFormat::parse(Some("xlsx")), Some(ExportFormat::Xlsx));
        assert_eq!(ExportFormat::parse(Some("pdf")), None);
    }

    #[test]
    fn test_report_row_attendance() {
        let row = report_row(&forwarded_report(25, 30));
        assert_eq!(row[9], "83%");
        assert_eq!(row[15], "forwarded");

        let row = report_row(&forwarded_report(0, 0));
        assert_eq!(row[9], "0%");
    }

    #[test]
    fn test_build_csv_has_header_and_rows() {
        let data = build_csv(&[forwarded_report(25, 30)]).unwrap();
        let text = String::from_utf8(data).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("Report ID,Faculty,Class"));
        let row = lines.next().unwrap();
        assert!(row.starts_with("7,FICT,BSCSM Y2"));
        // 含逗号的字段被引号包裹
        assert!(row.contains("\"REST APIs, part 2\""));
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_build_xlsx_produces_zip() {
        let data = build_xlsx(&[forwarded_report(25, 30)]).unwrap();
        // xlsx 是 zip 容器
        assert_eq!(&data[..2], b"PK");
    }
}
