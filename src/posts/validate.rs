//! Required-field checks for post writes.

use std::fmt;

use super::{Error, Field, PostInput};

/// A single reason a write was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
	/// There was no payload at all.
	NoData,
	/// The field was missing, or blank after trimming.
	Required(Field),
}

impl fmt::Display for FieldError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::NoData => f.write_str("No data provided"),
			Self::Required(field) => write!(f, "{field} is required"),
		}
	}
}

fn is_blank(value: Option<&str>) -> bool {
	value.map_or(true, |value| value.trim().is_empty())
}

/// Checks a candidate for a new post. An empty list means it is valid.
///
/// A missing candidate yields only [`FieldError::NoData`]. Otherwise each
/// field is checked on its own, so both may be reported at once.
pub fn validate(candidate: Option<&PostInput>) -> Vec<FieldError> {
	let Some(candidate) = candidate else {
		return vec![FieldError::NoData];
	};

	Field::ALL
		.into_iter()
		.filter(|field| is_blank(field.of_input(candidate)))
		.map(FieldError::Required)
		.collect()
}

/// Checks a partial update. Omitted fields are fine, but a field that is
/// supplied must not be blank.
pub fn validate_patch(candidate: Option<&PostInput>) -> Vec<FieldError> {
	let Some(candidate) = candidate else {
		return vec![FieldError::NoData];
	};

	Field::ALL
		.into_iter()
		.filter(|field| {
			field
				.of_input(candidate)
				.is_some_and(|value| value.trim().is_empty())
		})
		.map(FieldError::Required)
		.collect()
}

/// Validates a candidate for a new post, handing back its title and content.
pub fn accept(candidate: Option<PostInput>) -> Result<(String, String), Error> {
	let errors = validate(candidate.as_ref());

	match candidate {
		Some(PostInput {
			title: Some(title),
			content: Some(content),
		}) if errors.is_empty() => Ok((title, content)),
		_ => Err(errors.into()),
	}
}

/// Validates a partial update, handing it back unchanged when accepted.
pub fn accept_patch(candidate: Option<PostInput>) -> Result<PostInput, Error> {
	let errors = validate_patch(candidate.as_ref());

	match candidate {
		Some(candidate) if errors.is_empty() => Ok(candidate),
		_ => Err(errors.into()),
	}
}
