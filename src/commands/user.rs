use anyhow::Result;

use super::{flush_toast, App};
use crate::account::{Accounts, ProfileError};
use crate::api::{LoginRequest, ProfileEdit, Registration};
use crate::cli::RegisterArgs;

pub async fn login(app: &mut App, username: String, password: String) -> Result<bool> {
    let accounts = Accounts::new(&app.users, &app.store, &app.config);
    let session = accounts
        .login(&LoginRequest { username, password }, &mut app.toasts)
        .await?;
    let ok = flush_toast(&mut app.toasts);
    if let Some(session) = session {
        println!("Logged in as {} ({})", session.username(), session.role);
    }
    Ok(ok)
}

pub async fn logout(app: &mut App) -> Result<bool> {
    Accounts::new(&app.users, &app.store, &app.config)
        .logout(&mut app.toasts)
        .await?;
    Ok(flush_toast(&mut app.toasts))
}

pub async fn register(app: &mut App, args: RegisterArgs) -> Result<bool> {
    let form = Registration {
        username: args.username,
        email: args.email,
        phone: args.phone,
        password: args.password,
        confirm_password: args.confirm_password,
        agree: args.agree,
    };
    Accounts::new(&app.users, &app.store, &app.config)
        .register(form, &mut app.toasts)
        .await;
    Ok(flush_toast(&mut app.toasts))
}

pub async fn whoami(app: &App) -> Result<bool> {
    match app.session().await? {
        Some(session) => {
            println!("{} ({})", session.username(), session.role);
            println!("   Email: {}", session.user.email);
            println!("   Phone: {}", session.user.phone);
            println!(
                "   Logged in: {}",
                session.logged_in_at.format("%Y-%m-%d %H:%M UTC")
            );
            println!("   Session file: {}", app.store.path().display());
            Ok(true)
        }
        None => {
            println!("Not logged in");
            Ok(false)
        }
    }
}

/// Unset options keep the current value.
pub async fn profile(
    app: &mut App,
    email: Option<String>,
    phone: Option<String>,
    password: Option<String>,
) -> Result<bool> {
    let session = app.session().await?;
    let mut edit = session
        .as_ref()
        .map(|s| ProfileEdit::from_user(&s.user))
        .unwrap_or_default();
    if let Some(email) = email {
        edit.email = email;
    }
    if let Some(phone) = phone {
        edit.phone = phone;
    }
    if let Some(password) = password {
        edit.password = password;
    }

    let accounts = Accounts::new(&app.users, &app.store, &app.config);
    match accounts
        .update_profile(session.as_ref(), &edit, &mut app.toasts)
        .await
    {
        Ok(_) => Ok(flush_toast(&mut app.toasts)),
        Err(ProfileError::Access(err)) => Err(err.into()),
        Err(ProfileError::Store(err)) => Err(err),
    }
}
