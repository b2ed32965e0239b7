use chrono::{DateTime, Utc};

use super::UserID;

pub struct Post {
    pub created: DateTime<Utc>,
    pub author: UserID,
    pub name: String,
    pub text: String,
    pub comments: Vec<Comment>,
    pub likes: Vec<UserID>,
}

pub struct Comment {
    pub created: DateTime<Utc>,
    pub user: UserID,
    pub name: String,
    pub content: String,
}
