use std::sync::Mutex;
use actix_web::{get, HttpResponse, Responder, Either, http::{Method, StatusCode}, web::Data};

use crate::{db::DB, render::{render_page, render_feed_item, render_post_form, render_comments_panel, NOT_FOUND_HTML}, session::{lock, ClientSession, Sessions, SessionState}};

fn render_feed(db: &DB, state: &SessionState) -> String {
    let uid = state.user.uid();
    let post_form = match uid {
        Some(_) => render_post_form(),
        None => String::new(),
    };
    let comments_panel = match &state.context.comments_post {
        Some(post_id) if state.context.open_comments && uid.is_some() => db.get_post(post_id)
            .map(|post| render_comments_panel(post_id, post))
            .unwrap_or_default(),
        _ => String::new(),
    };
    let items = db.get_sorted_feed().into_iter()
        .map(|(id, post)| render_feed_item(id, post, uid.map_or(false, |u| db.is_liked(id, u))))
        .collect::<Vec<_>>()
        .join("");
    post_form + comments_panel.as_str() + items.as_str()
}

#[get("/")]
pub async fn page_home(db: Data<Mutex<DB>>, sessions: Data<Mutex<Sessions>>, session: ClientSession) -> HttpResponse {
    let db = lock(&db);
    let mut sessions = lock(&sessions);
    render_page(&session, sessions.existing_mut(&session), |state| render_feed(&db, state))
}

pub async fn default_handler(req: Method, sessions: Data<Mutex<Sessions>>, session: ClientSession) -> impl Responder {
    match req {
        Method::GET => {
            let mut sessions = lock(&sessions);
            let response = render_page(&session, sessions.existing_mut(&session), |_| NOT_FOUND_HTML.to_string())
                .customize()
                .with_status(StatusCode::NOT_FOUND);
            Either::Left(response)
        },
        _ => Either::Right(HttpResponse::MethodNotAllowed().finish()),
    }
}
