use std::sync::Arc;

use aide::{
	axum::{
		routing::{get, get_with},
		ApiRouter, IntoApiResponse,
	},
	openapi::OpenApi,
};
use axum::{
	response::{Html, IntoResponse},
	Extension,
};

use crate::{extract::Json, openapi::tag, AppState};

/// The API reference page, rendered by the build script.
const SCALAR_HTML: &str = include_str!(concat!(env!("OUT_DIR"), "/scalar.html"));

pub fn routes() -> ApiRouter<AppState> {
	ApiRouter::new()
		.api_route(
			"/",
			get_with(serve_reference, |op| {
				op.summary("API reference")
					.description("This documentation page.")
					.tag(tag::DOCS)
			}),
		)
		.route("/private/api.json", get(serve_docs))
}

async fn serve_reference() -> impl IntoApiResponse {
	Html(SCALAR_HTML).into_response()
}

async fn serve_docs(Extension(api): Extension<Arc<OpenApi>>) -> impl IntoApiResponse {
	Json(api.as_ref()).into_response()
}
