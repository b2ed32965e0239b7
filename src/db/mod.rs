use std::{collections::HashMap, path::PathBuf};

use chrono::Utc;

use crate::data::{Post, PostID, Comment, UserID};

pub mod like;
pub mod sequence;
pub mod store;

pub const MAX_POST_LEN: usize = 280;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum PostError {
    #[error("A post can't be empty")]
    Empty,
    #[error("A post can have at most {MAX_POST_LEN} characters")]
    TooLong,
}

pub struct DB {
    root: PathBuf,
    posts: HashMap<PostID, Post>,
}

impl DB {
    pub fn load(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let posts = store::load_posts(&root);
        tracing::info!(count = posts.len(), "loaded posts");
        Self { root, posts }
    }

    pub fn get_post(&self, id: &PostID) -> Option<&Post> {
        self.posts.get(id)
    }

    pub fn create_post(&mut self, author: &UserID, name: &str, text: &str) -> Result<PostID, PostError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(PostError::Empty);
        }
        if text.chars().count() > MAX_POST_LEN {
            return Err(PostError::TooLong);
        }
        let id = store::gen_post_id(&self.root);
        let post = Post {
            created: Utc::now(),
            author: author.clone(),
            name: name.to_string(),
            text: text.to_string(),
            comments: vec![],
            likes: vec![],
        };
        store::store_post(&self.root, &id, &post);
        self.posts.insert(id.clone(), post);
        Ok(id)
    }

    /// Appends a comment and returns its index, or `None` if the post is gone.
    pub fn try_comment(&mut self, post_id: &PostID, user: &UserID, name: &str, content: &str) -> Option<usize> {
        let post = self.posts.get_mut(post_id)?;
        post.comments.push(Comment {
            created: Utc::now(),
            user: user.clone(),
            name: name.to_string(),
            content: content.to_string(),
        });
        store::store_post(&self.root, post_id, post);
        Some(post.comments.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserID {
        UserID("u1".to_string())
    }

    #[test]
    fn create_post_validates_text() {
        let dir = tempfile::tempdir().unwrap();
        let mut db = DB::load(dir.path());
        assert_eq!(db.create_post(&user(), "bee", "   "), Err(PostError::Empty));
        assert_eq!(db.create_post(&user(), "bee", &"x".repeat(MAX_POST_LEN + 1)), Err(PostError::TooLong));
        let id = db.create_post(&user(), "bee", "  hello  ").unwrap();
        assert_eq!(db.get_post(&id).unwrap().text, "hello");
    }

    #[test]
    fn comments_need_an_existing_post() {
        let dir = tempfile::tempdir().unwrap();
        let mut db = DB::load(dir.path());
        assert_eq!(db.try_comment(&PostID("missing".to_string()), &user(), "bee", "hi"), None);
        let id = db.create_post(&user(), "bee", "hello").unwrap();
        assert_eq!(db.try_comment(&id, &user(), "bee", "first"), Some(0));
        assert_eq!(db.try_comment(&id, &user(), "bee", "second"), Some(1));
    }

    #[test]
    fn posts_survive_reload() {
        let dir = tempfile::tempdir().unwrap();
        let id = {
            let mut db = DB::load(dir.path());
            let id = db.create_post(&user(), "bee", "hello").unwrap();
            db.try_comment(&id, &user(), "bee", "nice");
            db.toggle_like(&id, &user());
            id
        };
        let db = DB::load(dir.path());
        let post = db.get_post(&id).unwrap();
        assert_eq!(post.name, "bee");
        assert_eq!(post.comments.len(), 1);
        assert_eq!(post.comments[0].content, "nice");
        assert_eq!(post.likes, vec![user()]);
    }
}
