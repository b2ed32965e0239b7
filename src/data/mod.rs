mod identity;
mod post;

pub use identity::*;
pub use post::*;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserID(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostID(pub String);
