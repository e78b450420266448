use std::sync::Arc;

use tokio::sync::RwLock;

use super::{
	query::{ListQuery, SearchQuery},
	validate, Error, ListParams, Post, PostInput, PostRepository, SearchParams,
};

/// Entry point for every post operation.
///
/// Writes take the repository's write lock for their whole duration, and
/// reads copy a snapshot under the read lock before doing any work, so no
/// reader observes a partially applied write. Cloning is cheap and shares
/// the same collection.
#[derive(Debug, Clone, Default)]
pub struct Posts {
	repository: Arc<RwLock<PostRepository>>,
}

impl Posts {
	pub fn new(repository: PostRepository) -> Self {
		Self {
			repository: Arc::new(RwLock::new(repository)),
		}
	}

	async fn snapshot(&self) -> Vec<Post> {
		self.repository.read().await.list()
	}

	/// Every post, optionally sorted, one page at a time.
	#[tracing::instrument(skip(self))]
	pub async fn list(&self, params: ListParams) -> Result<Vec<Post>, Error> {
		let query = ListQuery::try_from(params)?;

		Ok(query.run(self.snapshot().await))
	}

	/// Every post matching at least one of the search terms.
	#[tracing::instrument(skip(self))]
	pub async fn search(&self, params: SearchParams) -> Result<Vec<Post>, Error> {
		let query = SearchQuery::try_from(params)?;
		let posts = query.run(self.snapshot().await);

		tracing::debug!(matches = posts.len(), "searched posts");

		Ok(posts)
	}

	#[tracing::instrument(skip(self))]
	pub async fn get(&self, id: u64) -> Result<Post, Error> {
		self.repository.read().await.get(id)
	}

	#[tracing::instrument(skip_all)]
	pub async fn create(&self, input: Option<PostInput>) -> Result<Post, Error> {
		let (title, content) = validate::accept(input)?;

		let mut repository = self.repository.write().await;
		let post = repository.create(title, content);

		tracing::debug!(id = post.id, total = repository.len(), "created post");

		Ok(post)
	}

	#[tracing::instrument(skip(self, input))]
	pub async fn update(&self, id: u64, input: Option<PostInput>) -> Result<Post, Error> {
		let input = validate::accept_patch(input)?;

		self.repository.write().await.update(id, input)
	}

	#[tracing::instrument(skip(self))]
	pub async fn delete(&self, id: u64) -> Result<(), Error> {
		let mut repository = self.repository.write().await;
		repository.delete(id)?;

		tracing::debug!(id, total = repository.len(), "deleted post");

		Ok(())
	}
}
