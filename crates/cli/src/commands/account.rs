//! Account commands.
//!
//! # Usage
//!
//! ```bash
//! brunela account register -n "Ana Gómez" -e ana@example.com -u ana -p secreto
//! brunela account login ana -p secreto
//! brunela account whoami
//! brunela account logout
//! ```

use clap::Subcommand;
use secrecy::SecretString;

use brunela_storefront::services::auth::RegistrationForm;
use brunela_storefront::storage::KeyValueStore;
use brunela_storefront::{AppError, Storefront};

use super::output::Output;

#[derive(Subcommand)]
pub enum AccountAction {
    /// Create a local account
    Register {
        /// Full name
        #[arg(short = 'n', long)]
        name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Username (at least 3 characters)
        #[arg(short, long)]
        username: String,

        /// Password (at least 6 characters)
        #[arg(short, long)]
        password: String,

        /// Password confirmation; defaults to the password
        #[arg(long)]
        confirm: Option<String>,
    },
    /// Log in; the account's cart becomes active
    Login {
        username: String,

        #[arg(short, long)]
        password: String,
    },
    /// Log out; the guest cart becomes active
    Logout,
    /// Show the logged-in account
    Whoami,
}

pub fn run<S: KeyValueStore>(
    shop: &Storefront<S>,
    action: AccountAction,
    out: Output,
) -> Result<(), AppError> {
    let accounts = shop.accounts();

    match action {
        AccountAction::Register {
            name,
            email,
            username,
            password,
            confirm,
        } => {
            let confirm_password = SecretString::from(confirm.unwrap_or_else(|| password.clone()));
            let user = accounts.register(RegistrationForm {
                full_name: name,
                email,
                username,
                password: SecretString::from(password),
                confirm_password,
            })?;
            out.line(&format!(
                "¡Registro exitoso! Ya puedes iniciar sesión como {}",
                user.username
            ));
        }
        AccountAction::Login { username, password } => {
            let session = accounts.login(&username, &SecretString::from(password))?;
            out.show(&session, |s| {
                format!("¡Bienvenido, {}! Sesión iniciada como {}", s.full_name, s.username)
            });
        }
        AccountAction::Logout => {
            accounts.logout()?;
            out.line("Sesión cerrada");
        }
        AccountAction::Whoami => {
            let session = accounts.current_session()?;
            out.show(&session, |s| match s {
                Some(s) => format!("{} <{}> ({})", s.full_name, s.email, s.username),
                None => "Invitado (sin sesión)".to_owned(),
            });
        }
    }
    Ok(())
}
