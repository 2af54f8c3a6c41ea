//! Accounts, sessions and per-user carts.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use brunela_core::{ProductId, Username};
use brunela_integration_tests::{item, memory_storefront};
use brunela_storefront::models::session::keys;
use brunela_storefront::services::auth::{AuthError, RegistrationForm};
use brunela_storefront::storage::KeyValueStore;
use secrecy::SecretString;

fn secret(s: &str) -> SecretString {
    SecretString::from(s.to_owned())
}

fn form(username: &str, email: &str) -> RegistrationForm {
    RegistrationForm {
        full_name: "Ana Gómez".to_owned(),
        email: email.to_owned(),
        username: username.to_owned(),
        password: secret("secreto"),
        confirm_password: secret("secreto"),
    }
}

#[test]
fn test_register_login_switches_cart() {
    let shop = memory_storefront();

    shop.cart()
        .unwrap()
        .add_or_increment(item("guest-item", 1000))
        .unwrap();

    shop.accounts()
        .register(form("ana", "ana@example.com"))
        .unwrap();
    // Registration alone does not log in.
    assert!(shop.session().unwrap().user.is_guest());

    let session = shop.accounts().login("ANA", &secret("secreto")).unwrap();
    assert!(session.is_logged_in);
    assert_eq!(session.username, Username::new("ana"));
    assert_eq!(shop.session().unwrap().user, Username::new("ana"));

    let cart = shop.cart().unwrap();
    assert!(cart.items().unwrap().is_empty());
    cart.add_or_increment(item("ana-item", 2000)).unwrap();

    shop.accounts().logout().unwrap();
    let guest_cart = shop.cart().unwrap();
    let items = guest_cart.items().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, ProductId::new("guest-item"));

    // Ana's cart survives logout.
    shop.accounts().login("ana", &secret("secreto")).unwrap();
    let items = shop.cart().unwrap().items().unwrap();
    assert_eq!(items[0].id, ProductId::new("ana-item"));
}

#[test]
fn test_duplicate_accounts_rejected() {
    let shop = memory_storefront();
    let accounts = shop.accounts();
    accounts.register(form("ana", "ana@example.com")).unwrap();

    let err = accounts
        .register(form("Ana", "otra@example.com"))
        .unwrap_err();
    assert!(matches!(err, AuthError::UsernameTaken));

    let err = accounts
        .register(form("anita", "ANA@example.com"))
        .unwrap_err();
    assert!(matches!(err, AuthError::EmailTaken));
}

#[test]
fn test_wrong_password_keeps_guest() {
    let shop = memory_storefront();
    shop.accounts()
        .register(form("ana", "ana@example.com"))
        .unwrap();

    let err = shop
        .accounts()
        .login("ana", &secret("incorrecto"))
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
    assert!(shop.accounts().current_session().unwrap().is_none());
    assert!(shop.session().unwrap().user.is_guest());
}

#[test]
fn test_password_is_not_stored_in_clear() {
    let shop = memory_storefront();
    shop.accounts()
        .register(form("ana", "ana@example.com"))
        .unwrap();

    let raw = shop
        .store()
        .get_item(keys::REGISTERED_USERS)
        .unwrap()
        .unwrap();
    assert!(!raw.contains("\"secreto\""));
    assert!(raw.contains("$argon2"));
}

#[test]
fn test_malformed_session_reads_as_logged_out() {
    let shop = memory_storefront();
    shop.store().set_item(keys::USER_SESSION, "[1, 2").unwrap();

    assert!(shop.accounts().current_session().unwrap().is_none());
}

#[test]
fn test_blank_current_user_is_guest() {
    let shop = memory_storefront();
    shop.store().set_item(keys::CURRENT_USER, "   ").unwrap();

    let cart = shop.cart().unwrap();
    assert!(cart.session().user.is_guest());
}
