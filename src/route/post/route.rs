use aide::axum::IntoApiResponse;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use macros::route;

use crate::{
	extract::{Json, Path, Payload, Query},
	openapi::tag,
	posts::Posts,
};

use super::{model, RouteError};

/// Get all posts
/// Returns a page of posts, in creation order unless a sort field is given.
#[route(tag = tag::POST)]
pub async fn get_posts(
	State(posts): State<Posts>,
	Query(input): Query<model::ListInput>,
) -> Result<Json<Vec<model::Post>>, RouteError> {
	Ok(Json(posts.list(input.into()).await?))
}

/// Search posts
/// Returns every post whose title or content contains one of the given terms, ignoring case.
/// Results are not paginated, and a search without terms matches nothing.
#[route(tag = tag::POST)]
pub async fn search_posts(
	State(posts): State<Posts>,
	Query(input): Query<model::SearchInput>,
) -> Result<Json<Vec<model::Post>>, RouteError> {
	Ok(Json(posts.search(input.into()).await?))
}

/// Get single post
/// Returns a single post by its unique id.
#[route(tag = tag::POST)]
pub async fn get_post(
	State(posts): State<Posts>,
	Path(path): Path<model::IdInput>,
) -> Result<Json<model::Post>, RouteError> {
	Ok(Json(posts.get(path.id).await?))
}

/// Create post
/// Creates a new post. Both the title and the content are required and may not be blank.
#[route(tag = tag::POST, response(status = 201, description = "Created successfully.", shape = "Json<model::Post>"))]
pub async fn create_post(
	State(posts): State<Posts>,
	Payload(input): Payload<model::PostInput>,
) -> Result<impl IntoApiResponse, RouteError> {
	let post = posts.create(input).await?;

	tracing::info!(id = post.id, "post created");

	Ok((StatusCode::CREATED, Json(post)).into_response())
}

/// Update post
/// Updates an existing post by its unique id. Omitted fields keep their current value.
#[route(tag = tag::POST)]
pub async fn update_post(
	State(posts): State<Posts>,
	Path(path): Path<model::IdInput>,
	Payload(input): Payload<model::PostInput>,
) -> Result<Json<model::Post>, RouteError> {
	Ok(Json(posts.update(path.id, input).await?))
}

/// Delete post
/// Deletes an existing post by its unique id.
#[route(tag = tag::POST)]
pub async fn delete_post(
	State(posts): State<Posts>,
	Path(path): Path<model::IdInput>,
) -> Result<Json<model::Deleted>, RouteError> {
	posts.delete(path.id).await?;

	tracing::info!(id = path.id, "post deleted");

	Ok(Json(model::Deleted::new(path.id)))
}
