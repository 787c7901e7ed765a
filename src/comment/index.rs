use super::controller::{create_comment, delete_comment};
use crate::middleware::auth::verify_token;
use actix_web::web;
use actix_web_httpauth::middleware::HttpAuthentication;

/// Comment routes, mounted inside the `/posts` scope. Both require a token.
pub fn comment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{id}/addcomment")
            .wrap(HttpAuthentication::bearer(verify_token))
            .route(web::post().to(create_comment)),
    )
    .service(
        web::resource("/{id}/deletecomment/{comment_id}")
            .wrap(HttpAuthentication::bearer(verify_token))
            .route(web::delete().to(delete_comment)),
    );
}
