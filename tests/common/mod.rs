//! 集成测试共用工具

#![allow(dead_code)]

use std::sync::Arc;

use luct_report_system::config::DatabaseConfig;
use luct_report_system::models::users::entities::{User, UserRole};
use luct_report_system::models::users::requests::CreateUserRequest;
use luct_report_system::storage::Storage;
use luct_report_system::storage::sea_orm_storage::SeaOrmStorage;
use luct_report_system::utils::jwt::JwtUtils;

pub async fn memory_storage() -> Arc<dyn Storage> {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        pool_size: 1,
        timeout: 5,
    };
    Arc::new(
        SeaOrmStorage::connect(&config)
            .await
            .expect("in-memory database"),
    )
}

pub async fn create_user(storage: &Arc<dyn Storage>, username: &str, role: UserRole) -> User {
    storage
        .create_user(CreateUserRequest {
            username: username.to_string(),
            password: "not-used-in-these-tests".to_string(),
            name: format!("{username} name"),
            email: format!("{username}@luct.test"),
            role,
        })
        .await
        .expect("create user")
}

pub fn bearer(user: &User) -> (String, String) {
    let token = JwtUtils::generate_access_token(user.id, &user.username, user.role)
        .expect("access token");
    ("Authorization".to_string(), format!("Bearer {token}"))
}

macro_rules! app {
    ($storage:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($storage.clone()))
                .app_data(
                    actix_web::web::JsonConfig::default()
                        .error_handler(luct_report_system::utils::json_error_handler),
                )
                .app_data(
                    actix_web::web::QueryConfig::default()
                        .error_handler(luct_report_system::utils::query_error_handler),
                )
                .app_data(
                    actix_web::web::PathConfig::default()
                        .error_handler(luct_report_system::utils::path_error_handler),
                )
                .configure(luct_report_system::routes::configure_api_routes),
        )
        .await
    };
}

macro_rules! send {
    ($app:expr, $req:expr) => {{
        let resp = actix_web::test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
        (status, body)
    }};
}
