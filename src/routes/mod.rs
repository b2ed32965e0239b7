use actix_web::{HttpResponse, http::{StatusCode, header::LOCATION}, web::ServiceConfig};

use crate::session::ClientSession;

mod auth;
mod interact;
mod page;
mod resources;
mod ui;

pub use auth::*;
pub use interact::*;
pub use page::*;
pub use resources::*;
pub use ui::*;

fn redirect(to: &str, session: &ClientSession) -> HttpResponse {
    session.keep(HttpResponse::build(StatusCode::SEE_OTHER)
        .append_header((LOCATION, to)))
        .finish()
}

pub fn configure(cfg: &mut ServiceConfig) {
    cfg
        .service(auth_signup)
        .service(auth_login)
        .service(auth_logout)

        .service(page_home)

        .service(click_comment)
        .service(close_comments)
        .service(toggle_signup)
        .service(close_signup)
        .service(toggle_login)
        .service(close_login)

        .service(make_post)
        .service(make_comment)
        .service(like_post)

        .service(stylesheet);
}
