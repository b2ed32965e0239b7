use std::{collections::HashMap, future::{ready, Ready}, sync::{Mutex, MutexGuard, PoisonError}};

use actix_web::{cookie, FromRequest, HttpRequest, dev::Payload, ResponseError, http::StatusCode, HttpResponseBuilder, cookie::{Cookie, SameSite}, web::Data};
use chrono::{DateTime, Duration, Utc};
use rand::distributions::{Alphanumeric, DistString};

use crate::{data::Identity, form::SignupDraft, state::{GlobalContext, UserStore}};

pub const SESSION_COOKIE: &str = "session-id";

/// Everything one browser session remembers between requests.
#[derive(Debug, Default)]
pub struct SessionState {
    pub context: GlobalContext,
    pub user: UserStore,
    pub signup: SignupDraft,
    /// Shown once as a blocking dialog on the next render.
    pub alert: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionID(pub String);

pub struct Sessions {
    sessions: HashMap<SessionID, (SessionState, DateTime<Utc>)>,
}

pub fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Sessions {
    pub fn init() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }

    fn gen_session_id(&self) -> SessionID {
        let id = SessionID(Alphanumeric.sample_string(&mut rand::thread_rng(), 128));
        if self.sessions.contains_key(&id) {
            self.gen_session_id()
        } else {
            id
        }
    }

    /// Looks a session up and marks it as used.
    pub fn touch(&mut self, session_id: &SessionID) -> bool {
        match self.sessions.get_mut(session_id) {
            Some((_, last_use)) => {
                *last_use = Utc::now();
                true
            },
            None => false,
        }
    }

    pub fn state(&self, session: &ClientSession) -> Option<&SessionState> {
        self.sessions.get(&session.session_id).map(|x| &x.0)
    }

    /// State of a session that has already been written to.
    pub fn existing_mut(&mut self, session: &ClientSession) -> Option<&mut SessionState> {
        self.sessions.get_mut(&session.session_id).map(|x| &mut x.0)
    }

    /// State of a session, stored on first write. Visitors who only read
    /// pages never take up an entry.
    pub fn state_mut(&mut self, session: &ClientSession) -> &mut SessionState {
        &mut self.sessions
            .entry(session.session_id.clone())
            .or_insert_with(|| (SessionState::default(), Utc::now()))
            .0
    }

    pub fn delete_sessions_older_than(&mut self, age: &Duration) -> usize {
        let now = Utc::now();
        let before = self.sessions.len();
        self.sessions.retain(|_, (_, last_use)| now.signed_duration_since(*last_use) <= *age);
        before - self.sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }
}

/// The browser session behind a request. Visitors without a valid cookie get
/// a fresh id, which is only stored once something is written to it.
#[derive(Debug, Clone)]
pub struct ClientSession {
    pub session_id: SessionID,
}

impl ClientSession {
    pub fn keep<'a>(&self, response: &'a mut HttpResponseBuilder) -> &'a mut HttpResponseBuilder {
        response.cookie(build_session_cookie(&self.session_id))
    }
}

pub fn build_session_cookie(session_id: &SessionID) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, session_id.0.clone())
        .path("/")
        //.secure(true) <-- only works with https
        .same_site(SameSite::Strict)
        .http_only(true)
        .max_age(cookie::time::Duration::days(30))
        .finish()
}

#[derive(thiserror::Error, Debug)]
pub enum SessionRequestError {
    #[error("No Session")]
    NoSession,
    #[error("Session store is not configured")]
    Unconfigured,
}

impl ResponseError for SessionRequestError {
    fn status_code(&self) -> StatusCode {
        match self {
            SessionRequestError::NoSession => StatusCode::UNAUTHORIZED,
            SessionRequestError::Unconfigured => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn resolve(req: &HttpRequest) -> Result<(ClientSession, Option<Identity>), SessionRequestError> {
    let sessions = req.app_data::<Data<Mutex<Sessions>>>().ok_or(SessionRequestError::Unconfigured)?;
    let mut sessions = lock(sessions);
    let existing = req.cookie(SESSION_COOKIE)
        .map(|c| SessionID(c.value().to_string()))
        .filter(|id| sessions.touch(id));
    let session_id = existing.unwrap_or_else(|| sessions.gen_session_id());
    let session = ClientSession { session_id };
    let identity = sessions.state(&session).and_then(|x| x.user.user().cloned());
    Ok((session, identity))
}

impl FromRequest for ClientSession {
    type Error = SessionRequestError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(resolve(req).map(|(session, _)| session))
    }
}

/// A session that carries a signed-in identity. Rejects with 401 otherwise.
pub struct SignedIn {
    pub session: ClientSession,
    pub identity: Identity,
}

impl FromRequest for SignedIn {
    type Error = SessionRequestError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(resolve(req).and_then(|(session, identity)| match identity {
            Some(identity) => Ok(SignedIn { session, identity }),
            None => Err(SessionRequestError::NoSession),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eviction_only_drops_idle_sessions() {
        let mut sessions = Sessions::init();
        let stale = ClientSession { session_id: sessions.gen_session_id() };
        sessions.state_mut(&stale);
        let fresh = ClientSession { session_id: sessions.gen_session_id() };
        sessions.state_mut(&fresh);
        let (stale, fresh) = (stale.session_id, fresh.session_id);
        sessions.sessions.get_mut(&stale).unwrap().1 = Utc::now() - Duration::hours(2);
        assert_eq!(sessions.delete_sessions_older_than(&Duration::hours(1)), 1);
        assert!(!sessions.touch(&stale));
        assert!(sessions.touch(&fresh));
        assert_eq!(sessions.len(), 1);
    }

    #[test]
    fn reading_does_not_store_sessions() {
        let mut sessions = Sessions::init();
        let session = ClientSession { session_id: sessions.gen_session_id() };
        assert!(sessions.state(&session).is_none());
        assert!(sessions.existing_mut(&session).is_none());
        assert!(!sessions.touch(&session.session_id));
        assert_eq!(sessions.len(), 0);
        sessions.state_mut(&session);
        assert!(sessions.existing_mut(&session).is_some());
        assert_eq!(sessions.len(), 1);
    }

    #[test]
    fn state_mut_recreates_evicted_sessions() {
        let mut sessions = Sessions::init();
        let session = ClientSession { session_id: SessionID("gone".to_string()) };
        sessions.state_mut(&session).context.toggle_signup();
        assert!(sessions.state(&session).unwrap().context.open_signup);
    }
}
