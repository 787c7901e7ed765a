use crate::comment::service::CommentService;
use crate::config::JwtConfig;
use crate::middleware::error_handler::unauthorized;
use crate::middleware::not_found::not_found;
use crate::post::service::PostService;
use crate::router::index::routes;
use crate::user::service::UserService;
use crate::utils::error::ApiError;
use crate::utils::response::ApiResponse;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::middleware::{ErrorHandlers, Logger};
use actix_web::{App, Error, HttpResponse, Responder, get, web};
use sqlx::SqlitePool;

#[get("/")]
async fn index() -> impl Responder {
    HttpResponse::Ok().json(ApiResponse::message("Welcome to the blog API"))
}

/// Build the application around a shared pool and token settings. Used by the
/// server for every worker and by the HTTP tests.
pub fn create_app(
    pool: SqlitePool,
    jwt: JwtConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(Logger::default())
        .app_data(web::Data::new(UserService::new(&pool)))
        .app_data(web::Data::new(PostService::new(&pool)))
        .app_data(web::Data::new(CommentService::new(&pool)))
        .app_data(web::Data::new(jwt))
        .app_data(
            web::JsonConfig::default()
                .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into()),
        )
        .app_data(
            web::PathConfig::default()
                .error_handler(|_err, _req| ApiError::NotFound("Resource not found".into()).into()),
        )
        .configure(routes)
        .service(index)
        .wrap(
            ErrorHandlers::new()
                .handler(StatusCode::NOT_FOUND, not_found)
                .handler(StatusCode::UNAUTHORIZED, unauthorized),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_jwt, test_pool};
    use actix_web::test;
    use serde_json::Value;

    #[actix_web::test]
    async fn root_answers_with_envelope() {
        let app = test::init_service(create_app(test_pool().await, test_jwt())).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], true);
    }

    #[actix_web::test]
    async fn unknown_route_gets_not_found_envelope() {
        let app = test::init_service(create_app(test_pool().await, test_jwt())).await;

        let req = test::TestRequest::get().uri("/nope").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], false);
        assert_eq!(body["message"], "Route does not exist");
    }

    #[actix_web::test]
    async fn malformed_bearer_header_is_unauthorized() {
        let app = test::init_service(create_app(test_pool().await, test_jwt())).await;

        let req = test::TestRequest::delete()
            .uri("/posts/1")
            .insert_header(("Authorization", "Basic Zm9vOmJhcg=="))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Missing or malformed bearer token");
    }
}
