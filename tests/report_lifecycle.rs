//! 报告生命周期端到端测试（内存 SQLite）

#[macro_use]
mod common;

use std::sync::Arc;

use actix_web::{http::StatusCode, test};
use serde_json::{Value, json};

use common::{bearer, create_user, memory_storage};
use luct_report_system::models::users::entities::{User, UserRole};
use luct_report_system::storage::{ReportScope, Storage};

fn report_body(present: i64, registered: i64) -> Value {
    json!({
        "faculty_name": "FICT",
        "class_name": "BSCSM Y2",
        "week_of_reporting": "Week 6",
        "date_of_lecture": "2026-03-10",
        "course_name": "Web Application Development",
        "course_code": "BIWA2110",
        "lecturer_name": "Jane Lecturer",
        "actual_students_present": present,
        "total_registered_students": registered,
        "venue": "Hall 6",
        "scheduled_time": "10:30",
        "topic_taught": "REST APIs",
        "learning_outcomes": "Build endpoints",
        "recommendations": "More labs"
    })
}

struct Cast {
    lecturer: User,
    principal: User,
    leader: User,
    student: User,
    second_student: User,
}

async fn cast(storage: &Arc<dyn Storage>) -> Cast {
    Cast {
        lecturer: create_user(storage, "lecturer1", UserRole::Lecturer).await,
        principal: create_user(storage, "principal1", UserRole::PrincipalLecturer).await,
        leader: create_user(storage, "leader1", UserRole::ProgramLeader).await,
        student: create_user(storage, "student1", UserRole::Student).await,
        second_student: create_user(storage, "student2", UserRole::Student).await,
    }
}

#[actix_web::test]
async fn test_full_report_lifecycle() {
    let storage = memory_storage().await;
    let users = cast(&storage).await;
    let app = app!(storage);

    // 讲师提交 25/30 的报告
    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/reports")
            .insert_header(bearer(&users.lecturer))
            .set_json(report_body(25, 30))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "pending");
    let report_id = body["data"]["id"].as_i64().expect("report id");

    // 学生看不到待审核报告
    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/reports")
            .insert_header(bearer(&users.student))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["count"], 0);

    // 待审核报告不能评分
    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/reports/{report_id}/rate"))
            .insert_header(bearer(&users.student))
            .set_json(json!({ "rating": 5 }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // 首席讲师通过并评分 4
    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/reports/{report_id}/approve"))
            .insert_header(bearer(&users.principal))
            .set_json(json!({ "rating": 4, "principal_feedback": "Good session" }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "approved");
    assert_eq!(body["data"]["rating"], 4);
    assert_eq!(body["data"]["reviewed_by"], users.principal.id);

    // 重复审核
    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/reports/{report_id}/forward"))
            .insert_header(bearer(&users.principal))
            .set_json(json!({}))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);

    // 学生评分 5
    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/reports/{report_id}/rate"))
            .insert_header(bearer(&users.student))
            .set_json(json!({ "rating": 5, "feedback": "Clear" }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["average_rating"].as_f64(), Some(5.0));
    assert_eq!(body["data"]["rating_count"], 1);

    // 同一学生不能重复评分
    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/reports/{report_id}/rate"))
            .insert_header(bearer(&users.student))
            .set_json(json!({ "rating": 3 }))
    );
    assert_eq!(status, StatusCode::CONFLICT);

    // 第二位学生评分 4，均值 4.5
    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/reports/{report_id}/rate"))
            .insert_header(bearer(&users.second_student))
            .set_json(json!({ "rating": 4 }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["average_rating"].as_f64(), Some(4.5));
    assert_eq!(body["data"]["rating_count"], 2);

    // 学生列表中带有本人评分
    let (_, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/reports")
            .insert_header(bearer(&users.student))
    );
    assert_eq!(body["data"]["count"], 1);
    assert_eq!(body["data"]["items"][0]["my_rating"], 5);

    // 项目负责人仅修改状态
    let (status, body) = send!(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/reports/{report_id}"))
            .insert_header(bearer(&users.leader))
            .set_json(json!({ "status": "forwarded" }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "forwarded");
    assert_eq!(body["data"]["actual_students_present"], 25);
    assert_eq!(body["data"]["rating"], 4);

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/reports/{report_id}/ratings"))
            .insert_header(bearer(&users.lecturer))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["count"], 2);
}

#[actix_web::test]
async fn test_only_lecturers_submit_reports() {
    let storage = memory_storage().await;
    let users = cast(&storage).await;
    let app = app!(storage);

    for user in [&users.student, &users.principal, &users.leader] {
        let (status, body) = send!(
            app,
            test::TestRequest::post()
                .uri("/api/reports")
                .insert_header(bearer(user))
                .set_json(report_body(10, 20))
        );
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["success"], false);
    }

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/reports")
            .set_json(report_body(10, 20))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // 被拒绝的提交不产生报告
    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/reports")
            .insert_header(bearer(&users.leader))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["count"], 0);
}

#[actix_web::test]
async fn test_attendance_cannot_exceed_registration() {
    let storage = memory_storage().await;
    let users = cast(&storage).await;
    let app = app!(storage);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/reports")
            .insert_header(bearer(&users.lecturer))
            .set_json(report_body(31, 30))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (_, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/reports/my-reports")
            .insert_header(bearer(&users.lecturer))
    );
    assert_eq!(body["data"]["count"], 0);
}

#[actix_web::test]
async fn test_reject_requires_feedback() {
    let storage = memory_storage().await;
    let users = cast(&storage).await;
    let app = app!(storage);

    let (_, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/reports")
            .insert_header(bearer(&users.lecturer))
            .set_json(report_body(18, 20))
    );
    let report_id = body["data"]["id"].as_i64().expect("report id");

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/reports/{report_id}/reject"))
            .insert_header(bearer(&users.principal))
            .set_json(json!({ "principal_feedback": "   " }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // 校验失败不改变状态
    let (_, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/reports/for-review")
            .insert_header(bearer(&users.principal))
    );
    assert_eq!(body["data"]["count"], 1);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/reports/{report_id}/reject"))
            .insert_header(bearer(&users.principal))
            .set_json(json!({ "principal_feedback": "Missing outcomes", "rating": 2 }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "rejected");
    assert_eq!(body["data"]["principal_feedback"], "Missing outcomes");
    assert!(body["data"]["rating"].is_null());

    // 被驳回的报告不能评分
    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/reports/{report_id}/rate"))
            .insert_header(bearer(&users.student))
            .set_json(json!({ "rating": 4 }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_review_rating_out_of_range() {
    let storage = memory_storage().await;
    let users = cast(&storage).await;
    let app = app!(storage);

    let (_, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/reports")
            .insert_header(bearer(&users.lecturer))
            .set_json(report_body(5, 5))
    );
    let report_id = body["data"]["id"].as_i64().expect("report id");

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/reports/{report_id}/approve"))
            .insert_header(bearer(&users.principal))
            .set_json(json!({ "rating": 6 }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // 讲师不能审核
    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/reports/{report_id}/approve"))
            .insert_header(bearer(&users.lecturer))
            .set_json(json!({ "rating": 3 }))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/reports/{report_id}/forward"))
            .insert_header(bearer(&users.principal))
            .set_json(json!({}))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "forwarded");
    assert!(body["data"]["rating"].is_null());

    let (_, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/reports/forwarded")
            .insert_header(bearer(&users.leader))
    );
    assert_eq!(body["data"]["count"], 1);
}

#[actix_web::test]
async fn test_unknown_report_returns_not_found() {
    let storage = memory_storage().await;
    let users = cast(&storage).await;
    let app = app!(storage);

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/reports/9999/approve")
            .insert_header(bearer(&users.principal))
            .set_json(json!({ "rating": 3 }))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/reports/9999")
            .insert_header(bearer(&users.leader))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/reports/not-a-number")
            .insert_header(bearer(&users.leader))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

macro_rules! submit_report {
    ($app:expr, $lecturer:expr, $present:expr, $registered:expr) => {{
        let (status, body) = send!(
            $app,
            test::TestRequest::post()
                .uri("/api/reports")
                .insert_header(bearer($lecturer))
                .set_json(report_body($present, $registered))
        );
        assert_eq!(status, StatusCode::CREATED);
        body["data"]["id"].as_i64().expect("report id")
    }};
}

#[actix_web::test]
async fn test_malformed_review_body_leaves_report_pending() {
    let storage = memory_storage().await;
    let users = cast(&storage).await;
    let app = app!(storage);
    let report_id = submit_report!(app, &users.lecturer, 20, 25);

    for payload in [
        r#"{"rating": 9.5, "principal_feedback": "great"}"#,
        r#"{"rating": "four"}"#,
        "not json",
    ] {
        let (status, body) = send!(
            app,
            test::TestRequest::post()
                .uri(&format!("/api/reports/{report_id}/approve"))
                .insert_header(bearer(&users.principal))
                .insert_header(("Content-Type", "application/json"))
                .set_payload(payload)
        );
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    let (_, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/reports/for-review")
            .insert_header(bearer(&users.principal))
    );
    assert_eq!(body["data"]["count"], 1);
    assert_eq!(body["data"]["items"][0]["id"], report_id);

    // 空请求体仍可直接转交
    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/reports/{report_id}/forward"))
            .insert_header(bearer(&users.principal))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "forwarded");
    assert_eq!(body["data"]["principal_feedback"], "");
}

#[actix_web::test]
async fn test_second_principal_cannot_review_again() {
    let storage = memory_storage().await;
    let users = cast(&storage).await;
    let other_principal = create_user(&storage, "principal2", UserRole::PrincipalLecturer).await;
    let app = app!(storage);
    let report_id = submit_report!(app, &users.lecturer, 12, 15);

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/reports/{report_id}/approve"))
            .insert_header(bearer(&users.principal))
            .set_json(json!({ "rating": 3 }))
    );
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/reports/{report_id}/reject"))
            .insert_header(bearer(&other_principal))
            .set_json(json!({ "principal_feedback": "Too late" }))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Report not found or already processed");

    let (_, body) = send!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/reports/{report_id}"))
            .insert_header(bearer(&users.leader))
    );
    assert_eq!(body["data"]["status"], "approved");
    assert_eq!(body["data"]["rating"], 3);
    assert_eq!(body["data"]["reviewed_by"], users.principal.id);
}

#[actix_web::test]
async fn test_edit_override_validation() {
    let storage = memory_storage().await;
    let users = cast(&storage).await;
    let app = app!(storage);
    let report_id = submit_report!(app, &users.lecturer, 25, 30);

    // 合并后的出勤人数超过注册人数
    let (status, _) = send!(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/reports/{report_id}"))
            .insert_header(bearer(&users.leader))
            .set_json(json!({ "actual_students_present": 40 }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send!(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/reports/{report_id}"))
            .insert_header(bearer(&users.principal))
            .set_json(json!({}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No fields to update");

    let (status, _) = send!(
        app,
        test::TestRequest::put()
            .uri("/api/reports/9999")
            .insert_header(bearer(&users.leader))
            .set_json(json!({ "venue": "Hall 2" }))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    for user in [&users.lecturer, &users.student] {
        let (status, _) = send!(
            app,
            test::TestRequest::put()
                .uri(&format!("/api/reports/{report_id}"))
                .insert_header(bearer(user))
                .set_json(json!({ "venue": "Hall 2" }))
        );
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    // 以上请求均未改动报告
    let (_, body) = send!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/reports/{report_id}"))
            .insert_header(bearer(&users.leader))
    );
    assert_eq!(body["data"]["actual_students_present"], 25);
    assert_eq!(body["data"]["total_registered_students"], 30);
    assert_eq!(body["data"]["venue"], "Hall 6");
    assert_eq!(body["data"]["status"], "pending");

    // 同时提高注册人数时合并校验通过
    let (status, body) = send!(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/reports/{report_id}"))
            .insert_header(bearer(&users.leader))
            .set_json(json!({ "actual_students_present": 40, "total_registered_students": 45 }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["actual_students_present"], 40);
    assert_eq!(body["data"]["total_registered_students"], 45);
    assert_eq!(body["data"]["status"], "pending");
}

#[actix_web::test]
async fn test_export_orders_forwarded_by_lecture_date() {
    let storage = memory_storage().await;
    let users = cast(&storage).await;
    let app = app!(storage);

    // 提交顺序与授课日期顺序不同
    let mut ids = Vec::new();
    for date in ["2026-02-01", "2026-04-20", "2026-03-15"] {
        let mut draft = report_body(10, 12);
        draft["date_of_lecture"] = json!(date);
        let (status, body) = send!(
            app,
            test::TestRequest::post()
                .uri("/api/reports")
                .insert_header(bearer(&users.lecturer))
                .set_json(&draft)
        );
        assert_eq!(status, StatusCode::CREATED);
        let id = body["data"]["id"].as_i64().expect("report id");

        let (status, _) = send!(
            app,
            test::TestRequest::post()
                .uri(&format!("/api/reports/{id}/forward"))
                .insert_header(bearer(&users.principal))
        );
        assert_eq!(status, StatusCode::OK);
        ids.push(id);
    }

    let exported = storage
        .list_reports(ReportScope::ForwardedByLectureDate)
        .await
        .expect("forwarded reports");
    let dates: Vec<&str> = exported.iter().map(|r| r.date_of_lecture.as_str()).collect();
    assert_eq!(dates, ["2026-04-20", "2026-03-15", "2026-02-01"]);
    assert_eq!(exported[0].id, ids[1]);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/reports/export/excel?format=csv")
            .insert_header(bearer(&users.leader))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let csv = String::from_utf8(test::read_body(resp).await.to_vec()).expect("utf-8 csv");
    let first_dates: Vec<&str> = csv
        .lines()
        .skip(1)
        .filter_map(|line| line.split(',').nth(6))
        .collect();
    assert_eq!(first_dates, ["2026-04-20", "2026-03-15", "2026-02-01"]);
}
