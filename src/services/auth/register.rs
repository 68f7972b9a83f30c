use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{
    ApiResponse, ErrorCode, auth::RegisterResponse, users::requests::CreateUserRequest,
};
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password, validate_username};

use super::AuthService;

pub async fn handle_register(
    service: &AuthService,
    mut create_request: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    create_request.username = create_request.username.trim().to_string();
    create_request.email = create_request.email.trim().to_string();
    create_request.name = create_request.name.trim().to_string();

    // 1. 格式校验
    if let Err(e) = validate_username(&create_request.username) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserNameInvalid, e.message())));
    }

    if let Err(e) = validate_email(&create_request.email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, e.message())));
    }

    if let Err(e) = validate_password(&create_request.password) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::UserPasswordInvalid,
            e.message(),
        )));
    }

    if create_request.name.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Name is required",
        )));
    }

    // 2. 唯一性检查
    if let Err(response) = check_username_exists(&storage, &create_request.username).await {
        return Ok(response);
    }

    if let Err(response) = check_email_exists(&storage, &create_request.email).await {
        return Ok(response);
    }

    // 3. 哈希密码
    create_request.password = match hash_password(&create_request.password) {
        Ok(hash) => hash,
        Err(e) => return Ok(ApiResponse::from_error(&e)),
    };

    // 4. 创建用户并签发令牌
    let user = match storage.create_user(create_request).await {
        Ok(user) => user,
        Err(e) => return Ok(ApiResponse::from_error(&e)),
    };

    match JwtUtils::generate_access_token(user.id, &user.username, user.role) {
        Ok(token) => {
            tracing::info!("User {} registered as {}", user.username, user.role);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                RegisterResponse { token, user },
                "User registered successfully",
            )))
        }
        Err(e) => {
            tracing::error!("Failed to generate JWT token: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    "Registration succeeded but token generation failed",
                )),
            )
        }
    }
}

async fn check_username_exists(
    storage: &Arc<dyn Storage>,
    username: &str,
) -> Result<(), HttpResponse> {
    match storage.get_user_by_username(username).await {
        Ok(Some(_)) => Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserNameAlreadyExists,
            "Username already exists",
        ))),
        Ok(None) => Ok(()),
        Err(e) => Err(ApiResponse::from_error(&e)),
    }
}

async fn check_email_exists(storage: &Arc<dyn Storage>, email: &str) -> Result<(), HttpResponse> {
    match storage.get_user_by_email(email).await {
        Ok(Some(_)) => Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserEmailAlreadyExists,
            "Email already exists",
        ))),
        Ok(None) => Ok(()),
        Err(e) => Err(ApiResponse::from_error(&e)),
    }
}
