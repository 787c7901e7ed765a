use crate::config::JwtConfig;
use crate::user::model::User;
use crate::user::service::UserService;
use crate::utils::error::ApiError;
use actix_web::{Error, HttpMessage, HttpRequest, dev::ServiceRequest, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub user_id: i64,
    pub exp: usize,
}

/// Sign an HS256 token for `user_id` that expires `ttl` from now.
pub fn issue_token(user_id: i64, secret: &str, ttl: chrono::Duration) -> Result<String, ApiError> {
    let expiration = chrono::Utc::now()
        .checked_add_signed(ttl)
        .ok_or_else(|| ApiError::InternalServerError("Token expiry out of range".to_string()))?
        .timestamp()
        .max(0) as usize;

    let claims = Claims {
        user_id,
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// Check signature and expiry, returning the user id the token was issued for.
pub fn validate_token(token: &str, secret: &str) -> Result<i64, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.leeway = 0;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims.user_id)
}

/// Bearer validator for `HttpAuthentication::bearer`: resolves the token to a
/// live user and stores it in the request extensions.
pub async fn verify_token(
    req: ServiceRequest,
    credentials: BearerAuth,
) -> Result<ServiceRequest, (Error, ServiceRequest)> {
    let (Some(jwt), Some(users)) = (
        req.app_data::<web::Data<JwtConfig>>().cloned(),
        req.app_data::<web::Data<UserService>>().cloned(),
    ) else {
        return Err((
            ApiError::InternalServerError("Authentication is not configured".to_string()).into(),
            req,
        ));
    };

    let user_id = match validate_token(credentials.token(), &jwt.secret) {
        Ok(id) => id,
        Err(e) => {
            warn!("Rejected bearer token: {}", e);
            return Err((ApiError::Unauthorized("Invalid token".to_string()).into(), req));
        }
    };

    match users.find_by_id(user_id).await {
        Ok(Some(user)) => {
            debug!("Authenticated user {}", user.id);
            req.extensions_mut().insert(user);
            Ok(req)
        }
        Ok(None) => {
            warn!("Token subject {} does not exist", user_id);
            Err((ApiError::Unauthorized("User not found".to_string()).into(), req))
        }
        Err(e) => Err((e.into(), req)),
    }
}

/// The user the auth middleware attached to this request.
pub fn get_user_from_request(req: &HttpRequest) -> Result<User, ApiError> {
    req.extensions()
        .get::<User>()
        .cloned()
        .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))
}
