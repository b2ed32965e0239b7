//! Visibility toggles. Each one flips a flag in the session's
//! [`GlobalContext`](crate::state::GlobalContext) and sends the browser back
//! to the feed.

use std::sync::Mutex;

use actix_web::{post, HttpResponse, web::{Data, Form}};
use serde::Deserialize;

use crate::{data::PostID, session::{lock, ClientSession, Sessions}};

use super::redirect;

#[derive(Deserialize)]
pub struct PostTarget {
    pub post: String,
}

#[post("/ui/comment")]
pub async fn click_comment(sessions: Data<Mutex<Sessions>>, session: ClientSession, Form(input): Form<PostTarget>) -> HttpResponse {
    let mut sessions = lock(&sessions);
    let state = sessions.state_mut(&session);
    let is_authenticated = state.user.is_authenticated();
    state.context.click_comment(&PostID(input.post), is_authenticated);
    redirect("/", &session)
}

#[post("/ui/comments/close")]
pub async fn close_comments(sessions: Data<Mutex<Sessions>>, session: ClientSession) -> HttpResponse {
    lock(&sessions).state_mut(&session).context.close_comments();
    redirect("/", &session)
}

#[post("/ui/signup/toggle")]
pub async fn toggle_signup(sessions: Data<Mutex<Sessions>>, session: ClientSession) -> HttpResponse {
    lock(&sessions).state_mut(&session).context.toggle_signup();
    redirect("/", &session)
}

/// Closes the signup modal. The draft is left alone.
#[post("/ui/signup/close")]
pub async fn close_signup(sessions: Data<Mutex<Sessions>>, session: ClientSession) -> HttpResponse {
    lock(&sessions).state_mut(&session).context.close_signup();
    redirect("/", &session)
}

#[post("/ui/login/toggle")]
pub async fn toggle_login(sessions: Data<Mutex<Sessions>>, session: ClientSession) -> HttpResponse {
    lock(&sessions).state_mut(&session).context.toggle_login();
    redirect("/", &session)
}

#[post("/ui/login/close")]
pub async fn close_login(sessions: Data<Mutex<Sessions>>, session: ClientSession) -> HttpResponse {
    lock(&sessions).state_mut(&session).context.close_login();
    redirect("/", &session)
}
