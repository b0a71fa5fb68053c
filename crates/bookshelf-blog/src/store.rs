//! Blog post storage.

use crate::html::{excerpt, first_image};
use crate::{AdminSecret, AdminToken, BlogError, BlogPost, NewPost, PostPatch};
use bookshelf_cache::{cache_key, Cache, CacheError, Storage};
use chrono::Utc;

const REQUIRED_FIELDS: &str = "Title, author, and content are required";

/// Storage key the post list lives under unless configured otherwise.
pub fn default_key() -> String {
    cache_key!("blog", "posts")
}

/// Read and write access to blog posts.
///
/// Reads are public; writes require an [`AdminToken`].
pub trait BlogStore {
    /// All posts, newest first.
    fn list(&self) -> Result<Vec<BlogPost>, BlogError>;

    fn get(&self, id: &str) -> Result<BlogPost, BlogError>;

    fn create(&mut self, token: &AdminToken, post: NewPost) -> Result<BlogPost, BlogError>;

    fn update(
        &mut self,
        token: &AdminToken,
        id: &str,
        patch: PostPatch,
    ) -> Result<BlogPost, BlogError>;

    fn delete(&mut self, token: &AdminToken, id: &str) -> Result<(), BlogError>;
}

/// [`BlogStore`] that keeps the whole post list as one JSON value.
#[derive(Debug)]
pub struct StoredBlog<S> {
    cache: Cache<S>,
    key: String,
    secret: AdminSecret,
}

impl<S: Storage> StoredBlog<S> {
    pub fn new(storage: S, secret: AdminSecret) -> Self {
        Self::with_key(storage, default_key(), secret)
    }

    pub fn with_key(storage: S, key: impl Into<String>, secret: AdminSecret) -> Self {
        Self {
            cache: Cache::new(storage),
            key: key.into(),
            secret,
        }
    }

    fn load(&self) -> Result<Vec<BlogPost>, BlogError> {
        match self.cache.get::<Vec<BlogPost>>(&self.key) {
            Ok(Some(posts)) => Ok(posts),
            Ok(None) => Ok(vec![welcome_post()]),
            Err(CacheError::SerializeError(err)) => {
                tracing::warn!(key = %self.key, error = %err, "stored posts unreadable, using defaults");
                Ok(vec![welcome_post()])
            }
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, posts: &[BlogPost]) -> Result<(), BlogError> {
        self.cache.set(&self.key, posts)?;
        tracing::debug!(key = %self.key, count = posts.len(), "saved blog posts");
        Ok(())
    }

    pub fn into_inner(self) -> S {
        self.cache.into_inner()
    }
}

fn welcome_post() -> BlogPost {
    let now = Utc::now();
    let content = "This is my first blog post. I'm excited to share my thoughts and experiences with you through this platform.";
    BlogPost {
        id: "1".to_string(),
        title: "Welcome to My Blog".to_string(),
        content: content.to_string(),
        excerpt: content.to_string(),
        author: "Judith Hobson".to_string(),
        published_at: now,
        updated_at: now,
        featured_image: Some("/images/hero-book.jpg".to_string()),
        tags: vec!["welcome".to_string(), "introduction".to_string()],
    }
}

fn require(title: &str, author: &str, content: &str) -> Result<(), BlogError> {
    if [title, author, content].iter().any(|f| f.trim().is_empty()) {
        return Err(BlogError::Invalid(REQUIRED_FIELDS));
    }
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl<S: Storage> BlogStore for StoredBlog<S> {
    fn list(&self) -> Result<Vec<BlogPost>, BlogError> {
        let mut posts = self.load()?;
        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(posts)
    }

    fn get(&self, id: &str) -> Result<BlogPost, BlogError> {
        self.load()?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| BlogError::NotFound(id.to_string()))
    }

    fn create(&mut self, token: &AdminToken, post: NewPost) -> Result<BlogPost, BlogError> {
        self.secret.authorize(token)?;
        require(&post.title, &post.author, &post.content)?;

        let mut posts = self.load()?;
        let now = Utc::now();
        let created = BlogPost {
            id: uuid::Uuid::new_v4().to_string(),
            excerpt: non_blank(post.excerpt).unwrap_or_else(|| excerpt(&post.content)),
            featured_image: non_blank(post.featured_image).or_else(|| first_image(&post.content)),
            title: post.title,
            content: post.content,
            author: post.author,
            published_at: now,
            updated_at: now,
            tags: post.tags,
        };

        posts.push(created.clone());
        self.save(&posts)?;
        tracing::info!(id = %created.id, title = %created.title, "blog post created");
        Ok(created)
    }

    fn update(
        &mut self,
        token: &AdminToken,
        id: &str,
        patch: PostPatch,
    ) -> Result<BlogPost, BlogError> {
        self.secret.authorize(token)?;

        let mut posts = self.load()?;
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| BlogError::NotFound(id.to_string()))?;

        let title = patch.title.unwrap_or_else(|| post.title.clone());
        let author = patch.author.unwrap_or_else(|| post.author.clone());
        let content_changed = patch.content.is_some();
        let content = patch.content.unwrap_or_else(|| post.content.clone());
        require(&title, &author, &content)?;

        post.excerpt = match non_blank(patch.excerpt) {
            Some(excerpt) => excerpt,
            None if content_changed => excerpt(&content),
            None => post.excerpt.clone(),
        };
        post.featured_image = non_blank(patch.featured_image)
            .or_else(|| post.featured_image.take())
            .or_else(|| first_image(&content));
        if let Some(tags) = patch.tags {
            post.tags = tags;
        }
        post.title = title;
        post.author = author;
        post.content = content;
        post.updated_at = Utc::now();

        let updated = post.clone();
        self.save(&posts)?;
        tracing::info!(id = %updated.id, "blog post updated");
        Ok(updated)
    }

    fn delete(&mut self, token: &AdminToken, id: &str) -> Result<(), BlogError> {
        self.secret.authorize(token)?;

        let mut posts = self.load()?;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return Err(BlogError::NotFound(id.to_string()));
        }
        self.save(&posts)?;
        tracing::info!(id, "blog post deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookshelf_cache::MemoryStorage;
    use secrecy::SecretString;

    const TOKEN: &str = "test-admin-token";

    fn blog() -> StoredBlog<MemoryStorage> {
        StoredBlog::new(
            MemoryStorage::new(),
            AdminSecret::new(SecretString::from(TOKEN.to_string())),
        )
    }

    fn admin() -> AdminToken {
        AdminToken::new(TOKEN)
    }

    fn draft(title: &str) -> NewPost {
        NewPost {
            title: title.to_string(),
            content: "<p>Chapter one</p><img src=\"/images/desk.jpg\">".to_string(),
            author: "Judith Hobson".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_store_is_seeded() {
        let posts = blog().list().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Welcome to My Blog");
        assert_eq!(default_key(), "blog:posts");
    }

    #[test]
    fn test_create_derives_excerpt_and_image() {
        let mut blog = blog();
        let post = blog.create(&admin(), draft("Writing Again")).unwrap();

        assert_eq!(post.excerpt, "Chapter one");
        assert_eq!(post.featured_image.as_deref(), Some("/images/desk.jpg"));
        assert!(uuid::Uuid::parse_str(&post.id).is_ok());

        let listed = blog.list().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, post.id);
    }

    #[test]
    fn test_create_requires_fields() {
        let mut blog = blog();
        let err = blog.create(&admin(), draft("  ")).unwrap_err();
        assert_eq!(err.to_string(), "Title, author, and content are required");
    }

    #[test]
    fn test_writes_require_matching_token() {
        let mut blog = blog();
        assert!(matches!(
            blog.create(&AdminToken::new("wrong"), draft("Nope")),
            Err(BlogError::Unauthorized)
        ));

        let mut readonly = StoredBlog::new(MemoryStorage::new(), AdminSecret::disabled());
        assert!(matches!(
            readonly.delete(&admin(), "1"),
            Err(BlogError::WritesDisabled)
        ));
    }

    #[test]
    fn test_update_patches_fields() {
        let mut blog = blog();
        let post = blog.create(&admin(), draft("First Title")).unwrap();

        let updated = blog
            .update(
                &admin(),
                &post.id,
                PostPatch {
                    title: Some("Second Title".to_string()),
                    content: Some("<p>Rewritten</p>".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.title, "Second Title");
        assert_eq!(updated.excerpt, "Rewritten");
        assert_eq!(updated.featured_image.as_deref(), Some("/images/desk.jpg"));
        assert!(updated.updated_at >= post.updated_at);
        assert_eq!(blog.get(&post.id).unwrap().title, "Second Title");
    }

    #[test]
    fn test_update_and_delete_missing() {
        let mut blog = blog();
        assert!(matches!(
            blog.update(&admin(), "missing", PostPatch::default()),
            Err(BlogError::NotFound(_))
        ));
        assert!(matches!(
            blog.delete(&admin(), "missing"),
            Err(BlogError::NotFound(_))
        ));
    }

    #[test]
    fn test_delete_persists() {
        let mut blog = blog();
        let post = blog.create(&admin(), draft("Short Lived")).unwrap();
        blog.delete(&admin(), &post.id).unwrap();

        assert!(matches!(blog.get(&post.id), Err(BlogError::NotFound(_))));
        let storage = blog.into_inner();
        let raw = storage.get("blog:posts").unwrap().unwrap();
        assert!(!raw.contains("Short Lived"));
    }
}
