use aide::axum::{routing::get_with, ApiRouter};
use axum::http::StatusCode;

use crate::{
	error::{self, ErrorBody},
	posts::Error,
	AppState,
};

pub mod model;
pub mod route;

pub type RouteError = error::RouteError<Error>;

impl From<Error> for RouteError {
	fn from(error: Error) -> Self {
		Self::Route(error)
	}
}

pub fn routes() -> ApiRouter<AppState> {
	use route::*;

	ApiRouter::new()
		.api_route(
			"/",
			get_with(get_posts, get_posts_docs).post_with(create_post, create_post_docs),
		)
		.api_route("/search", get_with(search_posts, search_posts_docs))
		.api_route(
			"/:id",
			get_with(get_post, get_post_docs)
				.put_with(update_post, update_post_docs)
				.delete_with(delete_post, delete_post_docs),
		)
}

impl error::ErrorShape for Error {
	fn status(&self) -> StatusCode {
		match self {
			Self::NoData | Self::Invalid(..) | Self::Parameter(..) => StatusCode::BAD_REQUEST,
			Self::NotFound(..) => StatusCode::NOT_FOUND,
		}
	}

	fn body(&self) -> ErrorBody {
		match self {
			Self::NoData | Self::Parameter(..) => ErrorBody::error(self.to_string()),
			Self::Invalid(errors) => ErrorBody::Fields {
				errors: self.to_string().into(),
				missing_fields: errors.iter().map(ToString::to_string).collect(),
			},
			Self::NotFound(..) => ErrorBody::Message {
				message: self.to_string(),
			},
		}
	}
}

#[cfg(test)]
mod test {
	use crate::test::*;

	#[tokio::test]
	async fn test_list_seeded_posts() {
		let server = server();

		let response = server.get("/api/posts").await;

		response.assert_status(StatusCode::OK);
		response.assert_json(&json!([
			{ "id": 1, "title": "First post", "content": "This is the first post." },
			{ "id": 2, "title": "Second post", "content": "This is the second post." },
		]));
	}

	#[tokio::test]
	async fn test_create_flow() {
		let server = server();

		let response = server
			.post("/api/posts")
			.json(&json!({ "title": "Third", "content": "A third post." }))
			.await;

		response.assert_status(StatusCode::CREATED);
		response.assert_json(&json!({ "id": 3, "title": "Third", "content": "A third post." }));

		let response = server.get("/api/posts/3").await;

		response.assert_status(StatusCode::OK);
		assert_eq!(response.json::<Value>()["title"], "Third");
		assert_eq!(server.get("/api/posts").await.json::<Vec<Value>>().len(), 3);
	}

	#[tokio::test]
	async fn test_create_requires_fields() {
		let server = server();

		let response = server.post("/api/posts").json(&json!({})).await;

		response.assert_status(StatusCode::BAD_REQUEST);
		response.assert_json(&json!({
			"errors": "Invalid data",
			"missing_fields": ["title is required", "content is required"],
		}));

		let response = server
			.post("/api/posts")
			.json(&json!({ "title": "   ", "content": "body" }))
			.await;

		response.assert_status(StatusCode::BAD_REQUEST);
		assert_eq!(
			response.json::<Value>()["missing_fields"],
			json!(["title is required"])
		);

		assert_eq!(server.get("/api/posts").await.json::<Vec<Value>>().len(), 2);
	}

	#[tokio::test]
	async fn test_create_without_data() {
		let server = server();

		for response in [
			server.post("/api/posts").await,
			server.post("/api/posts").text("title=nope").await,
			server.post("/api/posts").json(&json!(null)).await,
			server.post("/api/posts").json(&json!({ "title": 5 })).await,
			server
				.post("/api/posts")
				.json(&json!(["Array title", "Array content"]))
				.await,
			server.post("/api/posts").json(&json!([])).await,
			server.post("/api/posts").json(&json!("Bare title")).await,
		] {
			response.assert_status(StatusCode::BAD_REQUEST);
			response.assert_json(&json!({ "error": "No data provided" }));
		}

		assert_eq!(server.get("/api/posts").await.json::<Vec<Value>>().len(), 2);
	}

	#[tokio::test]
	async fn test_update_with_array_body() {
		let server = server();

		let response = server.put("/api/posts/1").json(&json!(["X"])).await;

		response.assert_status(StatusCode::BAD_REQUEST);
		response.assert_json(&json!({ "error": "No data provided" }));

		let response = server.get("/api/posts/1").await;

		response.assert_status(StatusCode::OK);
		assert_eq!(response.json::<Value>()["title"], "First post");
	}

	#[tokio::test]
	async fn test_update_is_partial() {
		let server = server();

		let response = server
			.put("/api/posts/1")
			.json(&json!({ "title": "Renamed" }))
			.await;

		response.assert_status(StatusCode::OK);
		response.assert_json(&json!({
			"id": 1,
			"title": "Renamed",
			"content": "This is the first post.",
		}));

		let response = server.put("/api/posts/1").json(&json!({})).await;

		response.assert_status(StatusCode::OK);
		assert_eq!(response.json::<Value>()["title"], "Renamed");
	}

	#[tokio::test]
	async fn test_update_rejections() {
		let server = server();

		let response = server
			.put("/api/posts/9")
			.json(&json!({ "title": "Nobody" }))
			.await;

		response.assert_status(StatusCode::NOT_FOUND);
		response.assert_json(&json!({ "message": "There is no Post with id 9." }));

		let response = server.put("/api/posts/1").await;

		response.assert_status(StatusCode::BAD_REQUEST);
		response.assert_json(&json!({ "error": "No data provided" }));

		let response = server
			.put("/api/posts/1")
			.json(&json!({ "content": "" }))
			.await;

		response.assert_status(StatusCode::BAD_REQUEST);
		assert_eq!(
			response.json::<Value>()["missing_fields"],
			json!(["content is required"])
		);
	}

	#[tokio::test]
	async fn test_delete_and_reuse_id() {
		let server = server();

		let response = server.delete("/api/posts/2").await;

		response.assert_status(StatusCode::OK);
		response.assert_json(&json!({
			"message": "Post with id 2 has been deleted successfully."
		}));

		let response = server.delete("/api/posts/2").await;

		response.assert_status(StatusCode::NOT_FOUND);
		response.assert_json(&json!({ "message": "There is no Post with id 2." }));

		server
			.get("/api/posts/2")
			.await
			.assert_status(StatusCode::NOT_FOUND);

		let response = server
			.post("/api/posts")
			.json(&json!({ "title": "Again", "content": "Reused id." }))
			.await;

		response.assert_status(StatusCode::CREATED);
		assert_eq!(response.json::<Value>()["id"], 2);
	}

	#[tokio::test]
	async fn test_search() {
		let server = server_with(repository(&[("Dean", "hunter"), ("Sam", "demon")]));

		let response = server
			.get("/api/posts/search")
			.add_query_param("title", "dean")
			.await;

		response.assert_status(StatusCode::OK);
		response.assert_json(&json!([{ "id": 1, "title": "Dean", "content": "hunter" }]));

		let response = server
			.get("/api/posts/search")
			.add_query_param("title", "dean")
			.add_query_param("content", "DEMON")
			.add_query_param("sort", "title")
			.add_query_param("direction", "desc")
			.await;

		let ids = response
			.json::<Vec<Value>>()
			.iter()
			.map(|post| post["id"].clone())
			.collect::<Vec<_>>();
		assert_eq!(ids, [json!(2), json!(1)]);

		let response = server.get("/api/posts/search").await;

		response.assert_status(StatusCode::OK);
		response.assert_json(&json!([]));

		let response = server.get("/api/posts/search?title=&content=").await;

		response.assert_status(StatusCode::OK);
		response.assert_json(&json!([]));
	}

	#[tokio::test]
	async fn test_sort_and_paginate() {
		let server = server();

		let response = server
			.get("/api/posts")
			.add_query_param("sortField", "title")
			.add_query_param("sortDirection", "desc")
			.await;

		response.assert_status(StatusCode::OK);
		assert_eq!(response.json::<Value>()[0]["id"], 2);

		let response = server
			.get("/api/posts")
			.add_query_param("page", 2)
			.add_query_param("limit", 1)
			.await;

		response.assert_status(StatusCode::OK);
		assert_eq!(response.json::<Value>(), json!([{
			"id": 2,
			"title": "Second post",
			"content": "This is the second post.",
		}]));

		let response = server.get("/api/posts").add_query_param("page", 3).await;

		response.assert_status(StatusCode::OK);
		response.assert_json(&json!([]));
	}

	#[tokio::test]
	async fn test_invalid_query_parameters() {
		let server = server();

		let response = server.get("/api/posts").add_query_param("sort", "unknown").await;

		response.assert_status(StatusCode::BAD_REQUEST);
		response.assert_json(&json!({
			"error": "Invalid sort field 'unknown', expected 'title' or 'content'"
		}));

		server
			.get("/api/posts")
			.add_query_param("direction", "up")
			.await
			.assert_status(StatusCode::BAD_REQUEST);

		server
			.get("/api/posts")
			.add_query_param("limit", 0)
			.await
			.assert_status(StatusCode::BAD_REQUEST);

		server
			.get("/api/posts/abc")
			.await
			.assert_status(StatusCode::BAD_REQUEST);

		assert_eq!(server.get("/api/posts").await.json::<Vec<Value>>().len(), 2);
	}

	#[tokio::test]
	async fn test_openapi_document() {
		let server = server();

		let response = server.get("/docs/private/api.json").await;

		response.assert_status(StatusCode::OK);

		let document = response.json::<Value>();
		let paths = document["paths"]
			.as_object()
			.expect("document has no paths")
			.keys()
			.collect::<Vec<_>>();

		assert!(paths.iter().any(|path| path.starts_with("/api/posts")));
		assert!(paths.iter().any(|path| path.ends_with("/search")));

		server.get("/docs").await.assert_status(StatusCode::OK);
	}
}
