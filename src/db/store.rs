use std::{collections::HashMap, fs::{read_dir, read_to_string, create_dir_all}, path::{Path, PathBuf}};

use chrono::{DateTime, Utc};
use json::{JsonValue, object};
use rand::distributions::{Alphanumeric, DistString};

use crate::{data::{Post, PostID, Comment, UserID}, provider::{Account, PasswordStore}};

pub(crate) const POSTS_DIR: &str = "posts";
pub(crate) const AUTH_DIR: &str = "auth";

/// Parses every `<id>.json` in `dir`, skipping what can't be read.
fn load_dir<T, F>(dir: &Path, parse: F) -> Vec<(String, T)>
    where F: Fn(&JsonValue) -> Option<T> {
    let Ok(entries) = read_dir(dir) else {
        return vec![];
    };
    entries.filter_map(|entry| {
        let path = entry.ok()?.path();
        let name = path.file_stem()?.to_str()?.to_string();
        let parsed = read_to_string(&path).ok()
            .and_then(|x| json::parse(&x).ok())
            .and_then(|x| parse(&x));
        if parsed.is_none() {
            tracing::warn!(path = %path.display(), "skipping unreadable store entry");
        }
        parsed.map(|x| (name, x))
    }).collect()
}

fn write_json(dir: &Path, id: &str, json: JsonValue) {
    let path = dir.join(id.to_string() + ".json");
    if let Err(e) = create_dir_all(dir).and_then(|_| std::fs::write(&path, json.to_string())) {
        tracing::warn!(path = %path.display(), error = %e, "failed to write store entry");
    }
}

fn parse_time(json: &JsonValue) -> Option<DateTime<Utc>> {
    json.as_str().and_then(|x| x.parse::<DateTime<Utc>>().ok())
}

fn parse_comment(json: &JsonValue) -> Option<Comment> {
    Some(Comment {
        created: parse_time(&json["created"])?,
        user: UserID(json["user"].as_str()?.to_string()),
        name: json["name"].as_str()?.to_string(),
        content: json["content"].as_str()?.to_string(),
    })
}

pub(super) fn load_posts(root: &Path) -> HashMap<PostID, Post> {
    load_dir(&root.join(POSTS_DIR), |json| {
        let comments = match &json["comments"] {
            JsonValue::Array(comments) => comments.iter().filter_map(parse_comment).collect(),
            _ => vec![],
        };
        let likes = match &json["likes"] {
            JsonValue::Array(likes) => likes.iter()
                .filter_map(|x| x.as_str().map(|x| UserID(x.to_string())))
                .collect(),
            _ => vec![],
        };
        Some(Post {
            created: parse_time(&json["created"])?,
            author: UserID(json["author"].as_str()?.to_string()),
            name: json["name"].as_str()?.to_string(),
            text: json["text"].as_str()?.to_string(),
            comments,
            likes,
        })
    }).into_iter().map(|(id, post)| (PostID(id), post)).collect()
}

pub(super) fn store_post(root: &Path, id: &PostID, post: &Post) {
    let comments = post.comments.iter().map(|c| object! {
        created: c.created.to_rfc3339(),
        user: c.user.0.as_str(),
        name: c.name.as_str(),
        content: c.content.as_str(),
    }).collect::<Vec<_>>();
    let json = object! {
        created: post.created.to_rfc3339(),
        author: post.author.0.as_str(),
        name: post.name.as_str(),
        text: post.text.as_str(),
        comments: comments,
        likes: post.likes.iter().map(|x| x.0.as_str()).collect::<Vec<_>>(),
    };
    write_json(&root.join(POSTS_DIR), id.0.as_str(), json);
}

fn gen_id(dir: PathBuf) -> String {
    let id = Alphanumeric.sample_string(&mut rand::thread_rng(), 24);
    if dir.join(id.clone() + ".json").exists() {
        gen_id(dir)
    } else {
        id
    }
}

pub(super) fn gen_post_id(root: &Path) -> PostID {
    PostID(gen_id(root.join(POSTS_DIR)))
}

pub fn load_accounts(root: &Path) -> HashMap<UserID, Account> {
    load_dir(&root.join(AUTH_DIR), |json| {
        Some(Account {
            email: json["email"].as_str()?.to_string(),
            display_name: json["display-name"].as_str().map(|x| x.to_string()),
            password: PasswordStore {
                salt: json["salt"].as_str()?.to_string(),
                hashed: json["hashed"].as_str()?.to_string(),
            },
        })
    }).into_iter().map(|(id, account)| (UserID(id), account)).collect()
}

pub fn store_account(root: &Path, uid: &UserID, account: &Account) {
    let json = object! {
        email: account.email.as_str(),
        "display-name": account.display_name.as_deref(),
        salt: account.password.salt.as_str(),
        hashed: account.password.hashed.as_str(),
    };
    write_json(&root.join(AUTH_DIR), uid.0.as_str(), json);
}
