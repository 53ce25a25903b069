use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::json;

use crate::models::{ApiResponse, users::requests::CreateUserRequest};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple, validate_username};

use super::AuthService;

pub async fn handle_register(
    service: &AuthService,
    create_request: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 1. 字段合法性校验
    if let Err(msg) = validate_username(&create_request.username) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_with_details(
            "Validation failed",
            json!({"username": msg}),
        )));
    }

    if let Err(msg) = validate_email(&create_request.email) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_with_details(
            "Validation failed",
            json!({"email": msg}),
        )));
    }

    if let Err(msg) = validate_password_simple(&create_request.password) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_with_details(
            "Validation failed",
            json!({"password": msg}),
        )));
    }

    // 2. 用户名/邮箱查重，冲突响应带字段明细
    if let Err(response) = check_username_exists(&storage, &create_request.username).await {
        return Ok(response);
    }

    if let Err(response) = check_email_exists(&storage, &create_request.email).await {
        return Ok(response);
    }

    // 3. 哈希密码并创建用户
    match hash_password(&create_request.password) {
        Ok(password_hash) => {
            match storage.create_user(create_request, password_hash).await {
                Ok(user) => {
                    tracing::info!("User {} registered", user.username);
                    Ok(HttpResponse::Created()
                        .json(ApiResponse::success(user, "Registration successful")))
                }
                Err(e) => Ok(HttpResponse::InternalServerError().json(
                    ApiResponse::error_empty(format!("Registration failed: {e}")),
                )),
            }
        }
        Err(e) => Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            format!("Password hashing failed: {e}"),
        ))),
    }
}

async fn check_username_exists(
    storage: &std::sync::Arc<dyn crate::storage::Storage>,
    username: &str,
) -> Result<(), HttpResponse> {
    match storage.get_user_by_username(username).await {
        Ok(Some(_)) => Err(HttpResponse::Conflict().json(ApiResponse::error_with_details(
            "Username already exists",
            json!({"username": "A user with this username already exists"}),
        ))),
        Ok(None) => Ok(()),
        Err(e) => Err(HttpResponse::InternalServerError()
            .json(ApiResponse::error_empty(format!("Registration failed: {e}")))),
    }
}

async fn check_email_exists(
    storage: &std::sync::Arc<dyn crate::storage::Storage>,
    email: &str,
) -> Result<(), HttpResponse> {
    match storage.get_user_by_email(email).await {
        Ok(Some(_)) => Err(HttpResponse::Conflict().json(ApiResponse::error_with_details(
            "Email already exists",
            json!({"email": "A user with this email already exists"}),
        ))),
        Ok(None) => Ok(()),
        Err(e) => Err(HttpResponse::InternalServerError()
            .json(ApiResponse::error_empty(format!("Registration failed: {e}")))),
    }
}
