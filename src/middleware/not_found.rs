use super::error_handler::into_envelope;
use actix_web::middleware::ErrorHandlerResponse;
use actix_web::{Result, dev::ServiceResponse};

pub fn not_found<B>(res: ServiceResponse<B>) -> Result<ErrorHandlerResponse<B>> {
    into_envelope(res, "Route does not exist")
}
