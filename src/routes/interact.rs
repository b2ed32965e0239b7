use std::{sync::{Mutex, OnceLock}, collections::HashSet};

use actix_web::{post, HttpResponse, web::{Data, Form}};
use ammonia::Builder;
use regex::Regex;
use serde::Deserialize;

use crate::{data::PostID, db::DB, session::{lock, ClientSession, Sessions, SignedIn}};

use super::{redirect, ui::PostTarget};

#[derive(Deserialize)]
pub struct MakePost {
    text: String,
}

#[derive(Deserialize)]
pub struct MakeComment {
    post: String,
    content: String,
}

fn whitespace_rules() -> &'static [(Regex, &'static str)] {
    static RULES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    RULES.get_or_init(|| {
        [("> *\\n *", ">"), (" *\\n *<", "<"), (" *\\n *", "<br>"), (" +", " ")]
            .into_iter()
            .map(|(pattern, with)| (Regex::new(pattern).expect("valid pattern"), with))
            .collect()
    })
}

/// Strips everything but inline formatting and turns newlines into `<br>`.
pub fn clean_comment(content: &str) -> String {
    let content = Builder::new()
        .tags(HashSet::from(["a", "b", "i", "em", "strong", "q", "u", "code", "s", "br"]))
        .clean_content_tags(HashSet::from(["script", "style", "iframe"]))
        .clean(content.trim())
        .to_string()
        .replace("\r\n", "\n");
    whitespace_rules().iter()
        .fold(content, |content, (regex, with)| regex.replace_all(&content, *with).to_string())
}

#[post("/do/post")]
pub async fn make_post(db: Data<Mutex<DB>>, sessions: Data<Mutex<Sessions>>, user: SignedIn, Form(input): Form<MakePost>) -> HttpResponse {
    let result = lock(&db).create_post(&user.identity.uid, &user.identity.username, &input.text);
    if let Err(e) = result {
        lock(&sessions).state_mut(&user.session).alert = Some(e.to_string());
    }
    redirect("/", &user.session)
}

#[post("/do/comment")]
pub async fn make_comment(db: Data<Mutex<DB>>, user: SignedIn, Form(input): Form<MakeComment>) -> HttpResponse {
    let content = clean_comment(&input.content);
    if !content.is_empty() {
        let post = PostID(input.post);
        if lock(&db).try_comment(&post, &user.identity.uid, &user.identity.username, &content).is_none() {
            tracing::debug!(post = %post.0, "comment on unknown post dropped");
        }
    }
    redirect("/", &user.session)
}

/// Likes need an identity; without one the signup modal opens instead.
#[post("/do/like")]
pub async fn like_post(db: Data<Mutex<DB>>, sessions: Data<Mutex<Sessions>>, session: ClientSession, Form(input): Form<PostTarget>) -> HttpResponse {
    let mut db = lock(&db);
    let mut sessions = lock(&sessions);
    let state = sessions.state_mut(&session);
    match state.user.uid() {
        Some(uid) => {
            let post = PostID(input.post);
            if db.toggle_like(&post, uid).is_none() {
                tracing::debug!(post = %post.0, "like on unknown post dropped");
            }
        },
        None => state.context.toggle_signup(),
    }
    redirect("/", &session)
}
