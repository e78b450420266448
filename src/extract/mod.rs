use aide::OperationIo;
use axum::{
	body::{Body, Bytes},
	extract::{FromRequest, FromRequestParts, Request},
	http::{request, Response},
	response::IntoResponse,
};
use serde::de;
use serde_json::Value;

use crate::error::AppError;

/// Serializes a value as the JSON body of a response.
///
/// ```rust
/// async fn route() -> Json<Post> {
///   // ...
/// }
/// ```
#[derive(OperationIo)]
#[aide(output_with = "axum_jsonschema::Json<T>", json_schema)]
pub struct Json<T>(pub T);

impl<T> IntoResponse for Json<T>
where
	T: serde::Serialize,
{
	fn into_response(self) -> Response<Body> {
		axum::extract::Json(self.0).into_response()
	}
}

/// Extractor for a JSON body that may be missing or malformed.
///
/// Only a JSON object is accepted. An empty body, invalid JSON, `null`, any
/// other JSON value (arrays included) or an object that does not fit `T` all
/// extract as `None`, leaving it to the route to decide what that means.
/// The content type is not checked.
///
/// ```rust
/// async fn route(Payload(input): Payload<PostInput>) {
///   // ...
/// }
/// ```
#[derive(OperationIo)]
#[aide(input_with = "axum_jsonschema::Json<T>", json_schema)]
pub struct Payload<T>(pub Option<T>);

#[axum::async_trait]
impl<T, S> FromRequest<S> for Payload<T>
where
	T: de::DeserializeOwned,
	S: Send + Sync,
{
	type Rejection = AppError;

	async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
		let body = Bytes::from_request(req, state).await?;

		// Derived struct visitors also accept sequences, so anything other
		// than an object is turned away before `T` sees it.
		let object = match serde_json::from_slice::<Option<Value>>(&body) {
			Ok(Some(object @ Value::Object(_))) => object,
			Ok(_) => {
				tracing::debug!(length = body.len(), "discarding payload that is not an object");
				return Ok(Self(None));
			}
			Err(error) => {
				tracing::debug!(%error, length = body.len(), "discarding malformed payload");
				return Ok(Self(None));
			}
		};

		match serde_json::from_value::<T>(object) {
			Ok(value) => Ok(Self(Some(value))),
			Err(error) => {
				tracing::debug!(%error, "discarding payload that does not fit");
				Ok(Self(None))
			}
		}
	}
}

/// Extractor that deserializes a query string and validates it.
///
/// ```rust
/// async fn route(Query(params): Query<Params>) {
///   // ...
/// }
/// ```
#[derive(OperationIo)]
#[aide(
	input_with = "axum::extract::Query<T>",
	output_with = "axum_jsonschema::Json<T>",
	json_schema
)]
pub struct Query<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for Query<T>
where
	T: de::DeserializeOwned + validator::Validate,
	S: Send + Sync,
{
	type Rejection = AppError;

	async fn from_request_parts(
		parts: &mut request::Parts,
		state: &S,
	) -> Result<Self, Self::Rejection> {
		let result = axum::extract::Query::<T>::from_request_parts(parts, state)
			.await?
			.0;

		result.validate().map_err(Self::Rejection::Validation)?;
		Ok(Self(result))
	}
}

/// Extractor that deserializes a path parameter and validates it.
#[derive(OperationIo)]
#[aide(
	input_with = "axum::extract::Path<T>",
	output_with = "axum_jsonschema::Json<T>",
	json_schema
)]
pub struct Path<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for Path<T>
where
	T: de::DeserializeOwned + validator::Validate + Send,
	S: Send + Sync,
{
	type Rejection = AppError;

	async fn from_request_parts(
		parts: &mut request::Parts,
		state: &S,
	) -> Result<Self, Self::Rejection> {
		let result = axum::extract::Path::<T>::from_request_parts(parts, state)
			.await?
			.0;

		result.validate().map_err(Self::Rejection::Validation)?;
		Ok(Self(result))
	}
}
