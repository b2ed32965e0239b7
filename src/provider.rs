use std::{collections::HashMap, path::PathBuf, sync::Mutex};

use async_trait::async_trait;
use rand::distributions::{Alphanumeric, DistString};
use sha2::{Sha256, Digest};

use crate::{data::{UserCredential, UserID}, db::store::{load_accounts, store_account}};

/// Account backend the signup and login modals delegate to.
///
/// Every call may fail with a [`ProviderError`]; callers show it to the user
/// as-is and do not look at the kind.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn create_user_with_email_and_password(&self, email: &str, password: &str) -> Result<UserCredential, ProviderError>;

    async fn update_profile(&self, uid: &UserID, display_name: &str) -> Result<(), ProviderError>;

    async fn sign_in_with_email_and_password(&self, email: &str, password: &str) -> Result<UserCredential, ProviderError>;
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Error (auth/email-already-in-use).")]
    EmailAlreadyInUse,
    #[error("Error (auth/invalid-email).")]
    InvalidEmail,
    #[error("Error (auth/weak-password).")]
    WeakPassword,
    #[error("Error (auth/invalid-credential).")]
    InvalidCredential,
    #[error("Error (auth/user-not-found).")]
    UserNotFound,
    #[error("Error (auth/internal-error): {0}")]
    Internal(String),
}

pub struct PasswordStore {
    pub salt: String,
    pub hashed: String,
}

impl PasswordStore {
    pub fn secure(password: &str) -> Self {
        let salt = Alphanumeric.sample_string(&mut rand::thread_rng(), 16);
        let hashed = Self::hash(password, &salt);
        Self { salt, hashed }
    }

    pub fn matches(&self, password: &str) -> bool {
        Self::hash(password, &self.salt) == self.hashed
    }

    fn hash(password: &str, salt: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(password.to_string() + salt);
        format!("{:x}", hasher.finalize())
    }
}

pub struct Account {
    pub email: String,
    pub display_name: Option<String>,
    pub password: PasswordStore,
}

impl Account {
    fn credential(&self, uid: &UserID) -> UserCredential {
        UserCredential {
            uid: uid.clone(),
            email: self.email.clone(),
            display_name: self.display_name.clone(),
        }
    }
}

const MIN_PASSWORD_LEN: usize = 6;
const UID_LEN: usize = 28;

/// File-backed provider. Accounts live in `<root>/auth/<uid>.json`.
pub struct LocalAuthProvider {
    root: PathBuf,
    accounts: Mutex<HashMap<UserID, Account>>,
}

impl LocalAuthProvider {
    pub fn load(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let accounts = load_accounts(&root);
        tracing::info!(count = accounts.len(), "loaded accounts");
        Self { root, accounts: Mutex::new(accounts) }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<UserID, Account>>, ProviderError> {
        self.accounts.lock().map_err(|e| ProviderError::Internal(e.to_string()))
    }

    fn gen_uid(accounts: &HashMap<UserID, Account>) -> UserID {
        let id = UserID(Alphanumeric.sample_string(&mut rand::thread_rng(), UID_LEN));
        if accounts.contains_key(&id) {
            Self::gen_uid(accounts)
        } else {
            id
        }
    }
}

fn is_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

#[async_trait]
impl AuthProvider for LocalAuthProvider {
    async fn create_user_with_email_and_password(&self, email: &str, password: &str) -> Result<UserCredential, ProviderError> {
        if !is_email(email) {
            return Err(ProviderError::InvalidEmail);
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ProviderError::WeakPassword);
        }
        let mut accounts = self.lock()?;
        if accounts.values().any(|x| x.email == email) {
            return Err(ProviderError::EmailAlreadyInUse);
        }
        let uid = Self::gen_uid(&accounts);
        let account = Account {
            email: email.to_string(),
            display_name: None,
            password: PasswordStore::secure(password),
        };
        store_account(&self.root, &uid, &account);
        let credential = account.credential(&uid);
        accounts.insert(uid, account);
        Ok(credential)
    }

    async fn update_profile(&self, uid: &UserID, display_name: &str) -> Result<(), ProviderError> {
        let mut accounts = self.lock()?;
        let account = accounts.get_mut(uid).ok_or(ProviderError::UserNotFound)?;
        account.display_name = Some(display_name.to_string());
        store_account(&self.root, uid, account);
        Ok(())
    }

    async fn sign_in_with_email_and_password(&self, email: &str, password: &str) -> Result<UserCredential, ProviderError> {
        let accounts = self.lock()?;
        accounts.iter()
            .find(|(_, account)| account.email == email)
            .filter(|(_, account)| account.password.matches(password))
            .map(|(uid, account)| account.credential(uid))
            .ok_or(ProviderError::InvalidCredential)
    }
}
