use crate::data::{Identity, UserID};

pub enum UserAction {
    SignInUser(Identity),
    SignOutUser,
}

/// Holds the session identity. Only `dispatch` changes it.
#[derive(Debug, Default)]
pub struct UserStore {
    user: Option<Identity>,
}

impl UserStore {
    pub fn dispatch(&mut self, action: UserAction) {
        match action {
            UserAction::SignInUser(identity) => {
                tracing::info!(uid = %identity.uid.0, "signed in");
                self.user = Some(identity);
            },
            UserAction::SignOutUser => {
                self.user = None;
            },
        }
    }

    pub fn user(&self) -> Option<&Identity> {
        self.user.as_ref()
    }

    pub fn uid(&self) -> Option<&UserID> {
        self.user.as_ref().map(|x| &x.uid)
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}
