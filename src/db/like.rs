use super::{DB, store};

use crate::data::{UserID, PostID};

impl DB {
    /// Flips the user's like on a post. Returns whether it is now liked.
    pub fn toggle_like(&mut self, post_id: &PostID, user: &UserID) -> Option<bool> {
        let post = self.posts.get_mut(post_id)?;
        let liked = match post.likes.iter().position(|x| x == user) {
            Some(i) => {
                post.likes.remove(i);
                false
            },
            None => {
                post.likes.push(user.clone());
                true
            },
        };
        store::store_post(&self.root, post_id, post);
        Some(liked)
    }

    pub fn is_liked(&self, post_id: &PostID, user: &UserID) -> bool {
        self.posts.get(post_id).map_or(false, |x| x.likes.contains(user))
    }
}
