use actix_web::{HttpResponse, http::{header::ContentType, StatusCode}};
use html_escape::{encode_text, encode_double_quoted_attribute};

use crate::{data::{Post, PostID, Comment}, form::{SignupDraft, SignupField}, session::{ClientSession, SessionState}};

use self::format::{format_date_time, fill};

mod format;

const INDEX_HTML: &str = include_str!("../../assets/index.html");
const LOGGED_IN_HTML: &str = include_str!("../../assets/element/top-bar/logged-in.html");
const LOGGED_OUT_HTML: &str = include_str!("../../assets/element/top-bar/logged-out.html");
const FEED_ITEM_HTML: &str = include_str!("../../assets/element/feed-item.html");
const POST_FORM_HTML: &str = include_str!("../../assets/element/post-form.html");
const COMMENTS_PANEL_HTML: &str = include_str!("../../assets/element/comments-panel.html");
const COMMENT_HTML: &str = include_str!("../../assets/element/comment.html");
const SIGNUP_MODAL_HTML: &str = include_str!("../../assets/element/signup-modal.html");
const LOGIN_MODAL_HTML: &str = include_str!("../../assets/element/login-modal.html");
const ALERT_HTML: &str = include_str!("../../assets/element/alert.html");
pub const NOT_FOUND_HTML: &str = include_str!("../../assets/page/404.html");

/// Wraps `render_content` in the page shell. Open modals and a pending alert
/// are drawn on top; the alert is consumed. Without a stored session the page
/// renders as for a fresh visitor and no cookie is handed out.
pub fn render_page<R>(session: &ClientSession, state: Option<&mut SessionState>, render_content: R) -> HttpResponse
    where R: FnOnce(&SessionState) -> String {
    let stored = state.is_some();
    let mut blank = SessionState::default();
    let state = state.unwrap_or(&mut blank);
    let content = render_content(state);
    let session_area = match state.user.user() {
        Some(user) => fill(LOGGED_IN_HTML, &[("username", encode_text(&user.username).as_ref())]),
        None => LOGGED_OUT_HTML.to_string(),
    };
    let mut modals = String::new();
    if state.context.open_signup {
        modals.push_str(&render_signup_modal(&state.signup));
    }
    if state.context.open {
        modals.push_str(LOGIN_MODAL_HTML);
    }
    let alert = state.alert.take()
        .map_or_else(String::new, |message| render_alert(&message));
    let html = fill(INDEX_HTML, &[
        ("session-area", &session_area),
        ("content", &content),
        ("modals", &modals),
        ("alert", &alert),
    ]);
    let mut builder = HttpResponse::build(StatusCode::OK);
    builder.content_type(ContentType::html());
    if stored {
        session.keep(&mut builder);
    }
    builder.body(html)
}

/// One post with its author line and the comment/like/impressions/share row.
pub fn render_feed_item(post_id: &PostID, post: &Post, liked: bool) -> String {
    fill(FEED_ITEM_HTML, &[
        ("post-id", encode_double_quoted_attribute(&post_id.0).as_ref()),
        ("name", encode_text(&post.name).as_ref()),
        ("created-time", &format_date_time(&post.created)),
        ("text", encode_text(&post.text).as_ref()),
        ("comment-count", &post.comments.len().to_string()),
        ("like-count", &post.likes.len().to_string()),
        ("liked-class", if liked { " liked" } else { "" }),
        ("like-icon", if liked { "&#9829;" } else { "&#9825;" }),
    ])
}

pub fn render_post_form() -> String {
    POST_FORM_HTML.to_string()
}

pub fn render_comment(comment: &Comment) -> String {
    fill(COMMENT_HTML, &[
        ("name", encode_text(&comment.name).as_ref()),
        ("created-time", &format_date_time(&comment.created)),
        // cleaned when the comment was made
        ("content", &comment.content),
    ])
}

pub fn render_comments_panel(post_id: &PostID, post: &Post) -> String {
    let comments = post.comments.iter().map(render_comment).collect::<Vec<_>>().join("");
    fill(COMMENTS_PANEL_HTML, &[
        ("post-id", encode_double_quoted_attribute(&post_id.0).as_ref()),
        ("name", encode_text(&post.name).as_ref()),
        ("comments", &comments),
    ])
}

pub fn render_signup_modal(draft: &SignupDraft) -> String {
    let error = |field| draft.visible_error(field).unwrap_or("");
    fill(SIGNUP_MODAL_HTML, &[
        ("username", encode_double_quoted_attribute(&draft.values.username).as_ref()),
        ("email", encode_double_quoted_attribute(&draft.values.email).as_ref()),
        ("username-error", error(SignupField::Username)),
        ("email-error", error(SignupField::Email)),
        ("password-error", error(SignupField::Password)),
    ])
}

pub fn render_alert(message: &str) -> String {
    fill(ALERT_HTML, &[("message", encode_text(message).as_ref())])
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::{data::UserID, form::SignupValues};

    fn post(name: &str, text: &str) -> Post {
        Post {
            created: Utc::now(),
            author: UserID("u1".to_string()),
            name: name.to_string(),
            text: text.to_string(),
            comments: vec![],
            likes: vec![UserID("u2".to_string())],
        }
    }

    #[test]
    fn feed_item_shows_author_text_and_icons() {
        let html = render_feed_item(&PostID("p1".to_string()), &post("bee", "buzz"), false);
        assert!(html.contains("<span class=\"name\">bee</span>"));
        assert!(html.contains("@bee"));
        assert!(html.contains("<p>buzz</p>"));
        for title in ["Comment", "Like", "Impressions", "Share"] {
            assert!(html.contains(&format!("title=\"{title}\"")), "missing {title}");
        }
        assert!(html.contains("&#9825; 1"));
        assert!(!html.contains(" liked"));
    }

    #[test]
    fn feed_item_escapes_user_text() {
        let html = render_feed_item(&PostID("p1".to_string()), &post("<b>x</b>", "<script>alert(1)</script>"), true);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("like liked"));
    }

    #[test]
    fn signup_modal_hides_untouched_errors() {
        let mut draft = SignupDraft::default();
        let html = render_signup_modal(&draft);
        assert!(!html.contains("Please enter username"));

        let _ = draft.submit(SignupValues {
            username: "".to_string(),
            email: "bee@example.com".to_string(),
            password: "short".to_string(),
        });
        let html = render_signup_modal(&draft);
        assert!(html.contains("Please enter username"));
        assert!(html.contains("Password must have at least 8 characters"));
        assert!(html.contains("value=\"bee@example.com\""));
        assert!(!html.contains("short"));
    }

    #[test]
    fn alert_is_shown_once() {
        let session = ClientSession { session_id: crate::session::SessionID("s".to_string()) };
        let mut state = SessionState::default();
        state.alert = Some("Error (auth/email-already-in-use).".to_string());
        let resp = render_page(&session, Some(&mut state), |_| String::new());
        assert!(state.alert.is_none());
        assert!(resp.cookies().next().is_some());
    }

    #[test]
    fn unstored_sessions_get_no_cookie() {
        let session = ClientSession { session_id: crate::session::SessionID("s".to_string()) };
        let resp = render_page(&session, None, |state| {
            assert!(state.user.user().is_none());
            String::new()
        });
        assert!(resp.cookies().next().is_none());
    }
}
