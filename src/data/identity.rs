use super::UserID;

/// The signed-in user as the rest of the app sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
    pub email: String,
    pub uid: UserID,
}

/// What the auth provider hands back after creating or signing in an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredential {
    pub uid: UserID,
    pub email: String,
    pub display_name: Option<String>,
}
