use std::borrow::Cow;

use aide::{
	gen::GenContext,
	openapi::{Operation, Response as ApiResponse},
	OperationOutput,
};
use axum::{
	body::Body,
	extract::rejection,
	http::{HeaderMap, Response, StatusCode},
	response::IntoResponse,
	Json,
};
use schemars::JsonSchema;
use serde::Serialize;
use tower_governor::GovernorError;

/// The JSON body of every error response.
///
/// The shapes are fixed by existing clients, so each variant serializes to a
/// plain object with no tag.
#[derive(Debug, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum ErrorBody {
	/// A single error message.
	Error { error: Cow<'static, str> },
	/// A message about a specific resource.
	Message { message: String },
	/// Required fields that were missing from a write.
	Fields {
		errors: Cow<'static, str>,
		missing_fields: Vec<String>,
	},
}

impl ErrorBody {
	pub fn error(error: impl Into<Cow<'static, str>>) -> Self {
		Self::Error {
			error: error.into(),
		}
	}
}

/// Describes how an error is presented to the client.
///
/// The Display trait is only logged, so it can contain details that
/// [`ErrorShape::body`] leaves out.
pub trait ErrorShape: std::error::Error {
	fn status(&self) -> StatusCode;

	fn body(&self) -> ErrorBody;

	fn headers(&self) -> Option<HeaderMap> {
		None
	}
}

/// Errors raised before a request reaches a route, while extracting its input.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
	#[error("validation error: {0}")]
	Validation(#[from] validator::ValidationErrors),
	#[error("query error: {0}")]
	Query(#[from] rejection::QueryRejection),
	#[error("path error: {0}")]
	Path(#[from] rejection::PathRejection),
	#[error("body error: {0}")]
	Body(#[from] rejection::BytesRejection),
	#[error("rate limit error: {0}")]
	RateLimit(#[from] GovernorError),
}

impl ErrorShape for AppError {
	fn status(&self) -> StatusCode {
		match self {
			Self::Validation(..) => StatusCode::BAD_REQUEST,
			Self::Query(rejection) => rejection.status(),
			Self::Path(rejection) => rejection.status(),
			Self::Body(rejection) => rejection.status(),
			Self::RateLimit(error) => match error {
				GovernorError::TooManyRequests { .. } => StatusCode::TOO_MANY_REQUESTS,
				GovernorError::Other { code, .. } => *code,
				_ => StatusCode::INTERNAL_SERVER_ERROR,
			},
		}
	}

	fn body(&self) -> ErrorBody {
		match self {
			Self::Validation(errors) => ErrorBody::error(
				errors
					.field_errors()
					.into_iter()
					.flat_map(|(field, errors)| {
						errors.iter().map(move |error| format!("{field}: {error}"))
					})
					.collect::<Vec<_>>()
					.join(", "),
			),
			Self::Query(rejection) => ErrorBody::error(rejection.body_text()),
			Self::Path(rejection) => ErrorBody::error(rejection.body_text()),
			Self::Body(rejection) => ErrorBody::error(rejection.body_text()),
			Self::RateLimit(GovernorError::Other { msg: Some(msg), .. }) => {
				ErrorBody::error(msg.clone())
			}
			Self::RateLimit(error) => ErrorBody::error(error.to_string()),
		}
	}

	fn headers(&self) -> Option<HeaderMap> {
		match self {
			Self::RateLimit(
				GovernorError::TooManyRequests { headers, .. } | GovernorError::Other { headers, .. },
			) => headers.clone(),
			_ => None,
		}
	}
}

impl IntoResponse for AppError {
	fn into_response(self) -> Response<Body> {
		respond(&self)
	}
}

/// Error returned by route handlers: either the route's own error type or
/// one of the shared [`AppError`]s.
#[derive(Debug, thiserror::Error)]
pub enum RouteError<E> {
	#[error(transparent)]
	Route(E),
	#[error(transparent)]
	App(#[from] AppError),
}

impl<E: ErrorShape> IntoResponse for RouteError<E> {
	fn into_response(self) -> Response<Body> {
		match self {
			Self::Route(error) => respond(&error),
			Self::App(error) => respond(&error),
		}
	}
}

impl<E> OperationOutput for RouteError<E> {
	type Inner = ErrorBody;

	fn operation_response(ctx: &mut GenContext, operation: &mut Operation) -> Option<ApiResponse> {
		Json::<ErrorBody>::operation_response(ctx, operation)
	}
}

fn respond<E: ErrorShape>(error: &E) -> Response<Body> {
	let status = error.status();

	if status.is_server_error() {
		tracing::error!(%error, %status, "request failed");
	} else {
		tracing::debug!(%error, %status, "request rejected");
	}

	let mut response = (status, Json(error.body())).into_response();

	if let Some(headers) = error.headers() {
		response.headers_mut().extend(headers);
	}

	response
}
