use crate::middleware::auth::get_user_from_request;
use crate::post::model::PostInput;
use crate::post::service::PostService;
use crate::utils::error::ApiError;
use crate::utils::response::ApiResponse;
use actix_web::{HttpRequest, HttpResponse, web};

/// GET /posts/
pub async fn list_posts(post_service: web::Data<PostService>) -> Result<HttpResponse, ApiError> {
    let posts = post_service.list_posts().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Posts fetched successfully", posts)))
}

/// GET /posts/{id}
pub async fn get_post(
    post_id: web::Path<i64>,
    post_service: web::Data<PostService>,
) -> Result<HttpResponse, ApiError> {
    let post = post_service
        .get_post(post_id.into_inner())
        .await?
        .ok_or_else(|| ApiError::NotFound("Post not found".into()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Post fetched successfully", post)))
}

/// POST /posts/
pub async fn create_post(
    req: HttpRequest,
    post_service: web::Data<PostService>,
    body: web::Json<PostInput>,
) -> Result<HttpResponse, ApiError> {
    let author = get_user_from_request(&req)?;

    let input = body.into_inner();
    if let Some(field) = input.missing_field() {
        return Err(ApiError::BadRequest(format!("{} is required", field)));
    }

    let post = post_service
        .create_post(&author, input.title, input.content)
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::success("Post created successfully", post)))
}

/// PUT /posts/{id}
pub async fn update_post(
    req: HttpRequest,
    post_id: web::Path<i64>,
    post_service: web::Data<PostService>,
    body: web::Json<PostInput>,
) -> Result<HttpResponse, ApiError> {
    let current_user = get_user_from_request(&req)?;

    let post = post_service
        .find_post(post_id.into_inner())
        .await?
        .ok_or_else(|| ApiError::NotFound("Post not found".into()))?;

    if post.author_id != current_user.id {
        return Err(ApiError::Forbidden(
            "You cannot modify a post you did not write".into(),
        ));
    }

    let input = body.into_inner();
    if let Some(field) = input.missing_field() {
        return Err(ApiError::BadRequest(format!("{} is required", field)));
    }

    let mut updated = post_service
        .update_post(&post, input.title, input.content)
        .await?;
    updated.author = Some(current_user);

    Ok(HttpResponse::Ok().json(ApiResponse::success("Post updated successfully", updated)))
}

/// DELETE /posts/{id}
pub async fn delete_post(
    req: HttpRequest,
    post_id: web::Path<i64>,
    post_service: web::Data<PostService>,
) -> Result<HttpResponse, ApiError> {
    let current_user = get_user_from_request(&req)?;

    let post = post_service
        .find_post(post_id.into_inner())
        .await?
        .ok_or_else(|| ApiError::NotFound("Post not found".into()))?;

    if post.author_id != current_user.id {
        return Err(ApiError::Forbidden(
            "You cannot delete a post you did not write".into(),
        ));
    }

    post_service.delete_post(post.id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("Post deleted successfully")))
}
