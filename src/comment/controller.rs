use crate::comment::model::CommentInput;
use crate::comment::service::CommentService;
use crate::middleware::auth::get_user_from_request;
use crate::post::service::PostService;
use crate::utils::error::ApiError;
use crate::utils::response::ApiResponse;
use actix_web::{HttpRequest, HttpResponse, web};

/// Add a comment to a post
/// POST /posts/{id}/addcomment
pub async fn create_comment(
    req: HttpRequest,
    post_id: web::Path<i64>,
    post_service: web::Data<PostService>,
    comment_service: web::Data<CommentService>,
    body: web::Json<CommentInput>,
) -> Result<HttpResponse, ApiError> {
    let current_user = get_user_from_request(&req)?;

    let post = post_service
        .find_post(post_id.into_inner())
        .await?
        .ok_or_else(|| ApiError::NotFound("Post not found".to_string()))?;

    if body.content.trim().is_empty() {
        return Err(ApiError::BadRequest("content is required".to_string()));
    }

    let comment = comment_service
        .create_comment(&current_user, post.id, body.into_inner().content)
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::success("Comment created successfully", comment)))
}

/// Delete one of your own comments
/// DELETE /posts/{id}/deletecomment/{comment_id}
pub async fn delete_comment(
    req: HttpRequest,
    path: web::Path<(i64, i64)>,
    post_service: web::Data<PostService>,
    comment_service: web::Data<CommentService>,
) -> Result<HttpResponse, ApiError> {
    let current_user = get_user_from_request(&req)?;
    let (post_id, comment_id) = path.into_inner();

    let post = post_service
        .find_post(post_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Post not found".to_string()))?;

    let comment = comment_service
        .find_comment(comment_id)
        .await?
        .filter(|comment| comment.post_id == post.id)
        .ok_or_else(|| ApiError::NotFound("Comment not found".to_string()))?;

    if comment.user_id != current_user.id {
        return Err(ApiError::Forbidden(
            "You cannot delete a comment you did not write".to_string(),
        ));
    }

    comment_service.delete_comment(comment.id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("Comment deleted successfully")))
}
