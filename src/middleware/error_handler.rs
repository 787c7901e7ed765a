use crate::utils::error::ApiError;
use crate::utils::response::ApiResponse;
use actix_web::http::header;
use actix_web::middleware::ErrorHandlerResponse;
use actix_web::{HttpResponse, Result, dev::ServiceResponse};

/// Replace a framework-generated error body with the failure envelope. Responses
/// that already came from an `ApiError` pass through untouched.
pub fn into_envelope<B>(res: ServiceResponse<B>, message: &str) -> Result<ErrorHandlerResponse<B>> {
    let from_handler = res
        .response()
        .error()
        .and_then(|e| e.as_error::<ApiError>())
        .is_some();
    if from_handler {
        return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
    }

    let mut builder = HttpResponse::build(res.status());
    if let Some(challenge) = res.headers().get(header::WWW_AUTHENTICATE) {
        builder.insert_header((header::WWW_AUTHENTICATE, challenge.clone()));
    }
    let new_response = builder.json(ApiResponse::failure(message));

    let (req, _) = res.into_parts();
    let res = ServiceResponse::new(req, new_response.map_into_right_body());

    Ok(ErrorHandlerResponse::Response(res))
}

pub fn unauthorized<B>(res: ServiceResponse<B>) -> Result<ErrorHandlerResponse<B>> {
    into_envelope(res, "Missing or malformed bearer token")
}
