use super::{Error, Post, PostInput};

/// Posts available right after startup.
const SEED: [(&str, &str); 2] = [
	("First post", "This is the first post."),
	("Second post", "This is the second post."),
];

/// Owns the post collection, in insertion order.
///
/// The repository does no locking of its own; [`super::Posts`] guards it.
#[derive(Debug, Default)]
pub struct PostRepository {
	posts: Vec<Post>,
}

impl PostRepository {
	pub fn new() -> Self {
		Self::default()
	}

	/// A repository holding the startup posts.
	pub fn seeded() -> Self {
		let mut repository = Self::new();

		for (title, content) in SEED {
			repository.create(title.into(), content.into());
		}

		repository
	}

	/// One more than the largest id present, so the id of a deleted
	/// maximum is handed out again.
	fn next_id(&self) -> u64 {
		self.posts.iter().map(|post| post.id).max().unwrap_or(0) + 1
	}

	fn position(&self, id: u64) -> Result<usize, Error> {
		self.posts
			.iter()
			.position(|post| post.id == id)
			.ok_or(Error::NotFound(id))
	}

	pub fn create(&mut self, title: String, content: String) -> Post {
		let post = Post {
			id: self.next_id(),
			title,
			content,
		};

		self.posts.push(post.clone());
		post
	}

	pub fn get(&self, id: u64) -> Result<Post, Error> {
		self.position(id).map(|index| self.posts[index].clone())
	}

	/// Overwrites the supplied fields, keeping the rest.
	pub fn update(&mut self, id: u64, input: PostInput) -> Result<Post, Error> {
		let index = self.position(id)?;
		let post = &mut self.posts[index];

		if let Some(title) = input.title {
			post.title = title;
		}

		if let Some(content) = input.content {
			post.content = content;
		}

		Ok(post.clone())
	}

	pub fn delete(&mut self, id: u64) -> Result<(), Error> {
		let index = self.position(id)?;

		self.posts.remove(index);
		Ok(())
	}

	/// A copy of every post in insertion order.
	pub fn list(&self) -> Vec<Post> {
		self.posts.clone()
	}

	pub fn len(&self) -> usize {
		self.posts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.posts.is_empty()
	}
}
