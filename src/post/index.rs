use super::controller::{create_post, delete_post, get_post, list_posts, update_post};
use crate::comment::index::comment_routes;
use crate::middleware::auth::verify_token;
use actix_web::{guard, web};
use actix_web_httpauth::middleware::HttpAuthentication;

pub fn post_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/posts")
            // Public reads are guarded on GET so other methods reach the
            // authenticated resources on the same paths.
            .service(web::resource(["", "/"]).guard(guard::Get()).to(list_posts))
            .service(web::resource("/{id}").guard(guard::Get()).to(get_post))
            .service(
                web::resource(["", "/"])
                    .wrap(HttpAuthentication::bearer(verify_token))
                    .route(web::post().to(create_post)),
            )
            .service(
                web::resource("/{id}")
                    .wrap(HttpAuthentication::bearer(verify_token))
                    .route(web::put().to(update_post))
                    .route(web::delete().to(delete_post)),
            )
            .configure(comment_routes),
    );
}
