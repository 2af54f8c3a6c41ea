//! Authentication service.
//!
//! Local username/password accounts. Passwords are hashed with Argon2id and
//! only the PHC string is stored.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use brunela_core::{Email, StoredPasswordHash, Username};

use crate::models::{RegisteredUser, UserSession};
use crate::storage::KeyValueStore;
use crate::storage::users::UserRepository;

/// Minimum full name length.
const MIN_NAME_LENGTH: usize = 2;

/// Minimum username length.
const MIN_USERNAME_LENGTH: usize = 3;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Fields of the sign-up form.
#[derive(Debug)]
pub struct RegistrationForm {
    pub full_name: String,
    pub email: String,
    pub username: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

/// Authentication service.
///
/// Handles registration, login and logout against local storage.
pub struct AuthService<'a, S: KeyValueStore + ?Sized> {
    users: UserRepository<'a, S>,
}

impl<'a, S: KeyValueStore + ?Sized> AuthService<'a, S> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self {
            users: UserRepository::new(store),
        }
    }

    /// Register a new account.
    ///
    /// Does not log the new user in.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure (`InvalidName`, `InvalidEmail`,
    /// `InvalidUsername`, `WeakPassword`, `PasswordMismatch`), then
    /// `UsernameTaken` or `EmailTaken` if either is already registered.
    #[instrument(skip(self, form), fields(username = %form.username))]
    pub fn register(&self, form: RegistrationForm) -> Result<RegisteredUser, AuthError> {
        let full_name = form.full_name.trim();
        if full_name.chars().count() < MIN_NAME_LENGTH {
            return Err(AuthError::InvalidName {
                min: MIN_NAME_LENGTH,
            });
        }

        let email = Email::parse(&form.email)?;

        let username = form.username.trim();
        if username.chars().count() < MIN_USERNAME_LENGTH {
            return Err(AuthError::InvalidUsername {
                min: MIN_USERNAME_LENGTH,
            });
        }

        let password = form.password.expose_secret();
        validate_password(password)?;
        if password != form.confirm_password.expose_secret() {
            return Err(AuthError::PasswordMismatch);
        }

        if self.users.find_by_username(username)?.is_some() {
            return Err(AuthError::UsernameTaken);
        }
        if self.users.find_by_email(&email)?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let user = RegisteredUser {
            full_name: full_name.to_owned(),
            email,
            username: Username::new(username),
            password_hash: hash_password(password)?,
            registered_at: Utc::now(),
        };
        self.users.insert(user.clone())?;

        tracing::info!("account registered");
        Ok(user)
    }

    /// Login with username and password.
    ///
    /// On success the session is stored and the user's cart becomes active.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the username/password is wrong.
    #[instrument(skip(self, password))]
    pub fn login(&self, username: &str, password: &SecretString) -> Result<UserSession, AuthError> {
        let user = self
            .users
            .find_by_username(username.trim())?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password.expose_secret(), &user.password_hash)?;

        let session = UserSession {
            is_logged_in: true,
            username: user.username,
            full_name: user.full_name,
            email: user.email.into_inner(),
            login_time: Utc::now(),
        };
        self.users.start_session(&session)?;

        tracing::info!(username = %session.username, "logged in");
        Ok(session)
    }

    /// Logout.
    ///
    /// Carts stay in storage; the next cart operation uses the guest cart.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the session cannot be removed.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<(), AuthError> {
        self.users.end_session()?;
        tracing::info!("logged out");
        Ok(())
    }

    /// The logged-in session, if any.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if storage cannot be read.
    pub fn current_session(&self) -> Result<Option<UserSession>, AuthError> {
        Ok(self.users.session()?)
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<StoredPasswordHash, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| StoredPasswordHash::new(hash.to_string()))
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &StoredPasswordHash) -> Result<(), AuthError> {
    let parsed_hash =
        PasswordHash::new(hash.as_str()).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::session::keys;
    use crate::storage::MemoryStore;

    fn form(username: &str, email: &str) -> RegistrationForm {
        RegistrationForm {
            full_name: "María Pérez".to_owned(),
            email: email.to_owned(),
            username: username.to_owned(),
            password: SecretString::from("galletas".to_owned()),
            confirm_password: SecretString::from("galletas".to_owned()),
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("galletas").unwrap();
        assert!(hash.as_str().starts_with("$argon2id$"));
        assert!(verify_password("galletas", &hash).is_ok());
        assert!(matches!(
            verify_password("GALLETAS", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_register_stores_hash_only() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);
        auth.register(form("maria", "maria@example.com")).unwrap();

        let raw = store.get_item(keys::REGISTERED_USERS).unwrap().unwrap();
        assert!(raw.contains("passwordHash"));
        assert!(!raw.contains("galletas"));
    }

    #[test]
    fn test_register_validation() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);

        let mut short_name = form("maria", "maria@example.com");
        short_name.full_name = "M".to_owned();
        assert!(matches!(auth.register(short_name), Err(AuthError::InvalidName { .. })));

        assert!(matches!(
            auth.register(form("maria", "maria@example")),
            Err(AuthError::InvalidEmail(_))
        ));
        assert!(matches!(
            auth.register(form("ma", "maria@example.com")),
            Err(AuthError::InvalidUsername { .. })
        ));

        let mut weak = form("maria", "maria@example.com");
        weak.password = SecretString::from("12345".to_owned());
        weak.confirm_password = SecretString::from("12345".to_owned());
        assert!(matches!(auth.register(weak), Err(AuthError::WeakPassword(_))));

        let mut mismatch = form("maria", "maria@example.com");
        mismatch.confirm_password = SecretString::from("galletaz".to_owned());
        assert!(matches!(auth.register(mismatch), Err(AuthError::PasswordMismatch)));

        assert!(store.is_empty());
    }

    #[test]
    fn test_register_rejects_duplicates_ignoring_case() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);
        auth.register(form("maria", "maria@example.com")).unwrap();

        assert!(matches!(
            auth.register(form("MARIA", "otra@example.com")),
            Err(AuthError::UsernameTaken)
        ));
        assert!(matches!(
            auth.register(form("pedro", "Maria@Example.COM")),
            Err(AuthError::EmailTaken)
        ));
    }

    #[test]
    fn test_login_and_logout() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);
        auth.register(form("maria", "maria@example.com")).unwrap();

        assert!(matches!(
            auth.login("maria", &SecretString::from("wrong-pass".to_owned())),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login("nadie", &SecretString::from("galletas".to_owned())),
            Err(AuthError::InvalidCredentials)
        ));

        let session = auth.login("Maria", &SecretString::from("galletas".to_owned())).unwrap();
        assert_eq!(session.username.as_str(), "maria");
        assert_eq!(session.full_name, "María Pérez");
        assert_eq!(
            store.get_item(keys::CURRENT_USER).unwrap().as_deref(),
            Some("maria")
        );
        assert!(auth.current_session().unwrap().is_some());

        auth.logout().unwrap();
        assert!(auth.current_session().unwrap().is_none());
        assert!(store.get_item(keys::CURRENT_USER).unwrap().is_none());
    }
}
