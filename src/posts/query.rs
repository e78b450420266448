//! Read views over a snapshot of the collection: search, sort and paginate.
//!
//! Everything in here is a pure function of its inputs.

use std::{cmp::Reverse, str::FromStr};

use super::{Field, Post};

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 10;

/// A query parameter that could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParameterError {
	#[error("Invalid sort field '{0}', expected 'title' or 'content'")]
	UnknownSortField(String),
	#[error("Invalid sort direction '{0}', expected 'asc' or 'desc'")]
	UnknownSortDirection(String),
	#[error("page must be a positive integer")]
	ZeroPage,
	#[error("limit must be a positive integer")]
	ZeroLimit,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
	#[default]
	Asc,
	Desc,
}

impl FromStr for Direction {
	type Err = ParameterError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"asc" => Ok(Self::Asc),
			"desc" => Ok(Self::Desc),
			other => Err(ParameterError::UnknownSortDirection(other.to_owned())),
		}
	}
}

/// Orders posts by the lowercased value of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
	pub field: Field,
	pub direction: Direction,
}

impl Sort {
	/// Parses the raw sort parameters.
	///
	/// The direction is checked even when no field is given, so a bad value
	/// is never silently ignored.
	pub fn parse(field: Option<&str>, direction: Option<&str>) -> Result<Option<Self>, ParameterError> {
		let direction = direction.map(str::parse).transpose()?.unwrap_or_default();
		let Some(field) = field else {
			return Ok(None);
		};

		Ok(Some(Self {
			field: field.parse()?,
			direction,
		}))
	}

	/// Stable sort, so posts with equal keys keep their relative order in
	/// either direction.
	pub fn apply(self, posts: &mut [Post]) {
		let key = |post: &Post| self.field.of(post).to_lowercase();

		match self.direction {
			Direction::Asc => posts.sort_by_cached_key(key),
			Direction::Desc => posts.sort_by_cached_key(|post| Reverse(key(post))),
		}
	}
}

/// A window into an ordered sequence of posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
	page: usize,
	limit: usize,
}

impl Default for Page {
	fn default() -> Self {
		Self {
			page: DEFAULT_PAGE,
			limit: DEFAULT_LIMIT,
		}
	}
}

impl Page {
	pub fn new(page: Option<usize>, limit: Option<usize>) -> Result<Self, ParameterError> {
		let page = page.unwrap_or(DEFAULT_PAGE);
		let limit = limit.unwrap_or(DEFAULT_LIMIT);

		if page == 0 {
			return Err(ParameterError::ZeroPage);
		}

		if limit == 0 {
			return Err(ParameterError::ZeroLimit);
		}

		Ok(Self { page, limit })
	}

	pub fn offset(&self) -> usize {
		(self.page - 1).saturating_mul(self.limit)
	}

	pub fn limit(&self) -> usize {
		self.limit
	}

	/// Keeps only the posts on this page. Pages past the end are empty.
	pub fn apply(&self, posts: Vec<Post>) -> Vec<Post> {
		posts
			.into_iter()
			.skip(self.offset())
			.take(self.limit())
			.collect()
	}
}

/// Case-insensitive substring terms, matched against either field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Search {
	title: Option<String>,
	content: Option<String>,
}

impl Search {
	/// Empty terms count as absent.
	pub fn new(title: Option<String>, content: Option<String>) -> Self {
		let term = |term: Option<String>| {
			term.filter(|term| !term.is_empty())
				.map(|term| term.to_lowercase())
		};

		Self {
			title: term(title),
			content: term(content),
		}
	}

	/// A post matches when any supplied term is contained in its field.
	/// Without terms nothing matches.
	pub fn matches(&self, post: &Post) -> bool {
		let contains = |term: &Option<String>, field: Field| {
			term.as_deref()
				.is_some_and(|term| field.of(post).to_lowercase().contains(term))
		};

		contains(&self.title, Field::Title) || contains(&self.content, Field::Content)
	}
}

/// Raw parameters of the list operation.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
	pub sort_field: Option<String>,
	pub sort_direction: Option<String>,
	pub page: Option<usize>,
	pub limit: Option<usize>,
}

/// A validated list query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListQuery {
	pub sort: Option<Sort>,
	pub page: Page,
}

impl TryFrom<ListParams> for ListQuery {
	type Error = ParameterError;

	fn try_from(params: ListParams) -> Result<Self, Self::Error> {
		Ok(Self {
			sort: Sort::parse(params.sort_field.as_deref(), params.sort_direction.as_deref())?,
			page: Page::new(params.page, params.limit)?,
		})
	}
}

impl ListQuery {
	/// Sorts and paginates the whole snapshot.
	pub fn run(&self, mut posts: Vec<Post>) -> Vec<Post> {
		if let Some(sort) = self.sort {
			sort.apply(&mut posts);
		}

		self.page.apply(posts)
	}
}

/// Raw parameters of the search operation.
#[derive(Debug, Clone, Default)]
pub struct SearchParams {
	pub title: Option<String>,
	pub content: Option<String>,
	pub sort_field: Option<String>,
	pub sort_direction: Option<String>,
}

/// A validated search query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
	pub search: Search,
	pub sort: Option<Sort>,
}

impl TryFrom<SearchParams> for SearchQuery {
	type Error = ParameterError;

	fn try_from(params: SearchParams) -> Result<Self, Self::Error> {
		Ok(Self {
			search: Search::new(params.title, params.content),
			sort: Sort::parse(params.sort_field.as_deref(), params.sort_direction.as_deref())?,
		})
	}
}

impl SearchQuery {
	/// Filters and sorts the snapshot. Search results are not paginated.
	pub fn run(&self, posts: Vec<Post>) -> Vec<Post> {
		let mut posts = posts
			.into_iter()
			.filter(|post| self.search.matches(post))
			.collect::<Vec<_>>();

		if let Some(sort) = self.sort {
			sort.apply(&mut posts);
		}

		posts
	}
}
