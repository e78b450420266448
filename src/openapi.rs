use aide::{openapi::Tag, transform::TransformOpenApi};

use crate::{error::ErrorBody, extract::Json};

pub mod tag {
	pub const POST: &str = "Post";
	pub const DOCS: &str = "Docs";
}

pub fn docs(api: TransformOpenApi) -> TransformOpenApi {
	api.title("Posts API")
		.summary("A small in-memory collection of text posts")
		.description(include_str!("../README.md"))
		.tag(Tag {
			name: tag::POST.into(),
			description: Some("Post management and search".into()),
			..Default::default()
		})
		.tag(Tag {
			name: tag::DOCS.into(),
			description: Some("API documentation".into()),
			..Default::default()
		})
		.default_response_with::<Json<ErrorBody>, _>(|res| {
			res.example(ErrorBody::error("No data provided"))
		})
}
