use crate::config::JwtConfig;
use crate::middleware::auth::issue_token;
use crate::user::model::AuthInput;
use crate::user::service::UserService;
use crate::utils::error::ApiError;
use crate::utils::response::ApiResponse;
use actix_web::{HttpResponse, web};
use log::info;

pub async fn register_user(
    user_service: web::Data<UserService>,
    body: web::Json<AuthInput>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner();
    if let Some(field) = input.missing_field() {
        return Err(ApiError::BadRequest(format!("{} is required", field)));
    }

    let user = user_service
        .create_user(input.username, input.email, &input.password)
        .await?;
    info!("Registered user {} ({})", user.username, user.id);

    Ok(HttpResponse::Created().json(ApiResponse::success("User registered successfully", user)))
}

pub async fn login_user(
    user_service: web::Data<UserService>,
    jwt: web::Data<JwtConfig>,
    body: web::Json<AuthInput>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner();
    if let Some(field) = input.missing_field() {
        return Err(ApiError::BadRequest(format!("{} is required", field)));
    }

    let user = user_service
        .authenticate_user(&input.username, &input.password)
        .await?;
    let ttl = jwt
        .ttl()
        .ok_or_else(|| ApiError::InternalServerError("Token lifetime out of range".to_string()))?;
    let token = issue_token(user.id, &jwt.secret, ttl)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Login successful", token)))
}

#[cfg(test)]
mod tests {
    use crate::app::create_app;
    use crate::middleware::auth::validate_token;
    use crate::test_utils::{test_jwt, test_pool};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn register_then_login_yields_token_for_user() {
        let pool = test_pool().await;
        let app = test::init_service(create_app(pool, test_jwt())).await;

        let req = test::TestRequest::post()
            .uri("/auth/register")
            .set_json(json!({"username": "alice", "password": "password123", "email": "alice@example.com"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], true);
        assert_eq!(body["data"]["username"], "alice");
        assert!(body["data"].get("password").is_none());
        let user_id = body["data"]["id"].as_i64().unwrap();

        let req = test::TestRequest::post()
            .uri("/auth/login")
            .set_json(json!({"username": "alice", "password": "password123"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        let token = body["data"].as_str().unwrap();
        assert_eq!(validate_token(token, &test_jwt().secret).unwrap(), user_id);
    }

    #[actix_web::test]
    async fn duplicate_username_is_rejected() {
        let pool = test_pool().await;
        let app = test::init_service(create_app(pool, test_jwt())).await;

        for (email, expected) in [
            ("a1@example.com", StatusCode::CREATED),
            ("a2@example.com", StatusCode::BAD_REQUEST),
        ] {
            let req = test::TestRequest::post()
                .uri("/auth/register")
                .set_json(json!({"username": "alice", "password": "password123", "email": email}))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), expected);
            if expected == StatusCode::BAD_REQUEST {
                let body: Value = test::read_body_json(resp).await;
                assert_eq!(body["status"], false);
                assert_eq!(body["message"], "username already exists");
            }
        }
    }

    #[actix_web::test]
    async fn register_requires_username_and_password() {
        let pool = test_pool().await;
        let app = test::init_service(create_app(pool, test_jwt())).await;

        let req = test::TestRequest::post()
            .uri("/auth/register")
            .set_json(json!({"username": "alice"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "password is required");
    }

    #[actix_web::test]
    async fn malformed_json_gets_envelope() {
        let pool = test_pool().await;
        let app = test::init_service(create_app(pool, test_jwt())).await;

        let req = test::TestRequest::post()
            .uri("/auth/login")
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], false);
    }

    #[actix_web::test]
    async fn wrong_password_is_rejected() {
        let pool = test_pool().await;
        crate::test_utils::seed_user(&pool, "alice").await;
        let app = test::init_service(create_app(pool, test_jwt())).await;

        let req = test::TestRequest::post()
            .uri("/auth/login")
            .set_json(json!({"username": "alice", "password": "wrong-password"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "invalid username or password");
        assert!(body["data"].is_null());
    }

    #[actix_web::test]
    async fn blank_password_counts_as_missing() {
        let pool = test_pool().await;
        let app = test::init_service(create_app(pool, test_jwt())).await;

        let req = test::TestRequest::post()
            .uri("/auth/register")
            .set_json(json!({"username": "alice", "password": "   ", "email": "alice@example.com"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "password is required");
    }

    #[actix_web::test]
    async fn out_of_range_token_lifetime_fails_login_cleanly() {
        let pool = test_pool().await;
        crate::test_utils::seed_user(&pool, "alice").await;
        let jwt = crate::config::JwtConfig {
            secret: "test-secret".to_string(),
            expire_hours: 3_000_000_000_000,
        };
        let app = test::init_service(create_app(pool, jwt)).await;

        let req = test::TestRequest::post()
            .uri("/auth/login")
            .set_json(json!({"username": "alice", "password": "password123"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], false);
        assert_eq!(body["message"], "Token lifetime out of range");
    }
}
