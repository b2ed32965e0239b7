use super::DB;

use crate::data::{Post, PostID};

impl DB {
    /// All posts, newest first.
    pub fn get_sorted_feed(&self) -> Vec<(&PostID, &Post)> {
        let mut posts = self.posts.iter().collect::<Vec<_>>();
        posts.sort_unstable_by(|(a_id, a), (b_id, b)| b.created.cmp(&a.created).then_with(|| a_id.0.cmp(&b_id.0)));
        posts
    }
}
