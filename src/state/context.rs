use crate::data::PostID;

/// Visibility flags shared by every view of one session.
///
/// `open` belongs to the login modal, `open_signup` to the signup modal and
/// `open_comments` to the comments panel. Nothing stops several of them from
/// being set at once.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GlobalContext {
    pub open_comments: bool,
    pub open_signup: bool,
    pub open: bool,
    pub comments_post: Option<PostID>,
}

impl GlobalContext {
    /// Comment icon on a feed item. Signed-in viewers get the comments panel,
    /// everyone else gets the signup modal.
    pub fn click_comment(&mut self, post: &PostID, is_authenticated: bool) {
        if is_authenticated {
            self.open_comments = !self.open_comments;
            self.comments_post = if self.open_comments { Some(post.clone()) } else { None };
        } else {
            self.open_signup = !self.open_signup;
        }
    }

    pub fn toggle_signup(&mut self) {
        self.open_signup = !self.open_signup;
    }

    pub fn close_signup(&mut self) {
        self.open_signup = false;
    }

    pub fn toggle_login(&mut self) {
        self.open = !self.open;
    }

    pub fn close_login(&mut self) {
        self.open = false;
    }

    pub fn close_comments(&mut self) {
        self.open_comments = false;
        self.comments_post = None;
    }
}
