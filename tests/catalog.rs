//! 课程、班级与选课管理测试（内存 SQLite）

#[macro_use]
mod common;

use actix_web::{http::StatusCode, test};
use serde_json::json;

use common::{bearer, create_user, memory_storage};
use luct_report_system::models::users::entities::UserRole;

#[actix_web::test]
async fn test_course_class_enrollment_flow() {
    let storage = memory_storage().await;
    let leader = create_user(&storage, "leader1", UserRole::ProgramLeader).await;
    let principal = create_user(&storage, "principal1", UserRole::PrincipalLecturer).await;
    let lecturer = create_user(&storage, "lecturer1", UserRole::Lecturer).await;
    let student = create_user(&storage, "student1", UserRole::Student).await;
    let late_student = create_user(&storage, "student2", UserRole::Student).await;
    let app = app!(storage);

    let course = json!({
        "course_code": "BIWA2110",
        "course_name": "Web Application Development",
        "faculty": "FICT"
    });

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/courses")
            .insert_header(bearer(&leader))
            .set_json(&course)
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["credits"], 3);
    let course_id = body["data"]["id"].as_i64().expect("course id");

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/courses")
            .insert_header(bearer(&leader))
            .set_json(&course)
    );
    assert_eq!(status, StatusCode::CONFLICT);

    // 讲师无权查看课程目录
    let (status, _) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/courses")
            .insert_header(bearer(&lecturer))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    // 首席讲师只读
    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/courses")
            .insert_header(bearer(&principal))
            .set_json(json!({
                "course_code": "BIDB2210",
                "course_name": "Databases",
                "faculty": "FICT"
            }))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    // 班级讲师必须是教学人员
    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/classes")
            .insert_header(bearer(&leader))
            .set_json(json!({
                "class_code": "BSCSM-Y2-A",
                "class_name": "BSCSM Year 2 A",
                "course_id": course_id,
                "lecturer_id": student.id,
                "semester": "Semester 1",
                "academic_year": 2026
            }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/classes")
            .insert_header(bearer(&leader))
            .set_json(json!({
                "class_code": "BSCSM-Y2-A",
                "class_name": "BSCSM Year 2 A",
                "course_id": course_id,
                "lecturer_id": lecturer.id,
                "semester": "Semester 1",
                "academic_year": 2026,
                "max_students": 1
            }))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["course_code"], "BIWA2110");
    assert_eq!(body["data"]["enrolled_students"], 0);
    let class_id = body["data"]["id"].as_i64().expect("class id");

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/classes/my-classes")
            .insert_header(bearer(&lecturer))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["count"], 1);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/enrollments")
            .insert_header(bearer(&leader))
            .set_json(json!({ "class_id": class_id, "student_id": student.id }))
    );
    assert_eq!(status, StatusCode::CREATED);
    let enrollment_id = body["data"]["id"].as_i64().expect("enrollment id");

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/enrollments")
            .insert_header(bearer(&leader))
            .set_json(json!({ "class_id": class_id, "student_id": student.id }))
    );
    assert_eq!(status, StatusCode::CONFLICT);

    // 班级已满
    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/enrollments")
            .insert_header(bearer(&leader))
            .set_json(json!({ "class_id": class_id, "student_id": late_student.id }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["message"]
            .as_str()
            .is_some_and(|m| m.contains("maximum capacity"))
    );

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/enrollments")
            .insert_header(bearer(&leader))
            .set_json(json!({ "class_id": class_id, "student_id": lecturer.id }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/enrollments")
            .insert_header(bearer(&leader))
            .set_json(json!({ "class_id": 9999, "student_id": late_student.id }))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/enrollments?class_id={class_id}"))
            .insert_header(bearer(&principal))
    );
    assert_eq!(body["data"]["count"], 1);
    assert_eq!(body["data"]["items"][0]["student_name"], "student1 name");

    let (_, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/enrollments/stats")
            .insert_header(bearer(&leader))
    );
    assert_eq!(body["data"]["total_enrollments"], 1);
    assert_eq!(body["data"]["unique_students"], 1);
    assert_eq!(body["data"]["popular_classes"][0]["class_id"], class_id);

    // 有依赖时不能删除
    let (status, _) = send!(
        app,
        test::TestRequest::delete()
            .uri(&format!("/api/classes/{class_id}"))
            .insert_header(bearer(&leader))
    );
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send!(
        app,
        test::TestRequest::delete()
            .uri(&format!("/api/courses/{course_id}"))
            .insert_header(bearer(&leader))
    );
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send!(
        app,
        test::TestRequest::delete()
            .uri(&format!("/api/enrollments/{enrollment_id}"))
            .insert_header(bearer(&leader))
    );
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send!(
        app,
        test::TestRequest::delete()
            .uri(&format!("/api/classes/{class_id}"))
            .insert_header(bearer(&leader))
    );
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send!(
        app,
        test::TestRequest::delete()
            .uri(&format!("/api/courses/{course_id}"))
            .insert_header(bearer(&leader))
    );
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send!(
        app,
        test::TestRequest::delete()
            .uri(&format!("/api/courses/{course_id}"))
            .insert_header(bearer(&leader))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_health_is_public() {
    let storage = memory_storage().await;
    let app = actix_web::test::init_service(
        actix_web::App::new()
            .app_data(actix_web::web::Data::new(storage.clone()))
            .app_data(actix_web::web::Data::new(
                luct_report_system::models::AppStartTime {
                    start_datetime: chrono::Utc::now(),
                },
            ))
            .configure(luct_report_system::routes::configure_api_routes),
    )
    .await;

    let (status, body) = send!(app, test::TestRequest::get().uri("/api/health"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");
}
