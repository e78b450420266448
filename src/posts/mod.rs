//! The in-memory post collection and every operation exposed over it.
//!
//! [`Posts`] is the only entry point used by the HTTP layer. It validates
//! writes, applies them to the [`PostRepository`] under a single lock and
//! computes read views from snapshots of the collection.

mod facade;
pub mod query;
mod repository;
pub mod validate;

use std::{fmt, str::FromStr};

use macros::model;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use facade::Posts;
pub use query::{ListParams, ParameterError, SearchParams};
pub use repository::PostRepository;
pub use validate::FieldError;

/// A single post.
#[model]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct Post {
	/// The unique identifier of the post.
	#[serde(skip_deserializing)]
	pub id: u64,
	/// The title of the post.
	pub title: String,
	/// The text content of the post.
	pub content: String,
}

/// One of the text fields of a [`Post`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
	Title,
	Content,
}

impl Field {
	/// Every text field, in the order errors are reported.
	pub const ALL: [Self; 2] = [Self::Title, Self::Content];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Title => "title",
			Self::Content => "content",
		}
	}

	/// The value of this field on a stored post.
	pub fn of(self, post: &Post) -> &str {
		match self {
			Self::Title => &post.title,
			Self::Content => &post.content,
		}
	}

	/// The value of this field on caller input, if it was supplied.
	pub fn of_input(self, input: &PostInput) -> Option<&str> {
		match self {
			Self::Title => input.title.as_deref(),
			Self::Content => input.content.as_deref(),
		}
	}
}

impl fmt::Display for Field {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Field {
	type Err = ParameterError;

	/// Only the exact, lowercase field names are accepted.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"title" => Ok(Self::Title),
			"content" => Ok(Self::Content),
			other => Err(ParameterError::UnknownSortField(other.to_owned())),
		}
	}
}

/// An outcome of a post operation that is not a success.
///
/// None of these leave the collection modified.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The write payload was missing or could not be understood.
	#[error("No data provided")]
	NoData,
	/// One or more required fields were missing or blank.
	#[error("Invalid data")]
	Invalid(Vec<FieldError>),
	#[error("There is no Post with id {0}.")]
	NotFound(u64),
	#[error(transparent)]
	Parameter(#[from] ParameterError),
}

impl From<Vec<FieldError>> for Error {
	fn from(errors: Vec<FieldError>) -> Self {
		if errors.contains(&FieldError::NoData) {
			Self::NoData
		} else {
			Self::Invalid(errors)
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_field_parse_is_exact() {
		assert_eq!("title".parse::<Field>().unwrap(), Field::Title);
		assert_eq!("content".parse::<Field>().unwrap(), Field::Content);

		assert!(matches!(
			"Title".parse::<Field>(),
			Err(ParameterError::UnknownSortField(field)) if field == "Title"
		));
		assert!("id".parse::<Field>().is_err());
	}

	#[test]
	fn test_no_data_wins_over_field_errors() {
		let error = Error::from(vec![FieldError::NoData]);
		assert!(matches!(error, Error::NoData));

		let error = Error::from(vec![FieldError::Required(Field::Content)]);
		assert!(matches!(error, Error::Invalid(ref errors) if errors.len() == 1));
	}

	#[test]
	fn test_not_found_message() {
		assert_eq!(Error::NotFound(7).to_string(), "There is no Post with id 7.");
	}
}
