pub use crate::{
	posts::{Post, PostInput},
	route::model::IdInput,
};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::posts::{ListParams, SearchParams};

/// Sorting and pagination of the post list.
#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct ListInput {
	/// The field to sort by, either `title` or `content`. Posts are in
	/// creation order when omitted.
	#[serde(default, alias = "sortField")]
	pub sort: Option<String>,
	/// The sort direction, either `asc` (the default) or `desc`.
	#[serde(default, alias = "sortDirection")]
	pub direction: Option<String>,
	/// The page number to return (1-indexed, defaults to 1).
	#[validate(range(min = 1))]
	pub page: Option<usize>,
	/// The number of posts per page (defaults to 10).
	#[validate(range(min = 1))]
	pub limit: Option<usize>,
}

impl From<ListInput> for ListParams {
	fn from(input: ListInput) -> Self {
		Self {
			sort_field: input.sort,
			sort_direction: input.direction,
			page: input.page,
			limit: input.limit,
		}
	}
}

/// Case-insensitive search terms. A post matches if any term is found.
#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct SearchInput {
	/// Text to look for in post titles.
	pub title: Option<String>,
	/// Text to look for in post contents.
	pub content: Option<String>,
	/// The field to sort matches by, either `title` or `content`.
	#[serde(default, alias = "sortField")]
	pub sort: Option<String>,
	/// The sort direction, either `asc` (the default) or `desc`.
	#[serde(default, alias = "sortDirection")]
	pub direction: Option<String>,
}

impl From<SearchInput> for SearchParams {
	fn from(input: SearchInput) -> Self {
		Self {
			title: input.title,
			content: input.content,
			sort_field: input.sort,
			sort_direction: input.direction,
		}
	}
}

/// Confirmation that a post was deleted.
#[derive(Debug, Serialize, JsonSchema)]
pub struct Deleted {
	pub message: String,
}

impl Deleted {
	pub fn new(id: u64) -> Self {
		Self {
			message: format!("Post with id {id} has been deleted successfully."),
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_list_input_range() {
		let input = ListInput {
			sort: None,
			direction: None,
			page: Some(1),
			limit: None,
		};

		assert!(input.validate().is_ok());

		let input = ListInput {
			page: Some(0),
			..input
		};

		assert!(input.validate().is_err());
	}

	#[test]
	fn test_sort_aliases() {
		let input: ListInput = serde_json::from_value(serde_json::json!({
			"sortField": "title",
			"direction": "desc",
		}))
		.unwrap();

		let params = ListParams::from(input);

		assert_eq!(params.sort_field.as_deref(), Some("title"));
		assert_eq!(params.sort_direction.as_deref(), Some("desc"));
		assert_eq!(params.page, None);
	}

	#[test]
	fn test_deleted_message() {
		assert_eq!(
			Deleted::new(3).message,
			"Post with id 3 has been deleted successfully."
		);
	}
}
