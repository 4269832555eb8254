use std::io::{self, Write};

use bistro_app::{
    config::ClientConfig,
    context::AppContext,
    domain::accounts::{Credentials, Password, Registration, Session},
};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct RegisterArgs {
    /// Display name
    #[arg(long)]
    name: String,
}

/// Sign in with the account from `--email` / `--password` (or their env vars).
pub(crate) async fn sign_in(config: &ClientConfig, context: &AppContext) -> Result<Session, String> {
    let (email, password) = account(config)?;

    let credentials = Credentials::new(email, password).map_err(|error| error.to_string())?;

    context
        .accounts
        .login(credentials)
        .await
        .map_err(|error| format!("failed to sign in: {error}"))
}

pub(crate) async fn login(config: &ClientConfig, context: &AppContext) -> Result<(), String> {
    let session = sign_in(config, context).await?;

    print_session(&session)
}

pub(crate) async fn register(
    args: RegisterArgs,
    config: &ClientConfig,
    context: &AppContext,
) -> Result<(), String> {
    let (email, password) = account(config)?;

    let registration =
        Registration::new(args.name, email, password).map_err(|error| error.to_string())?;

    let session = context
        .accounts
        .register(registration)
        .await
        .map_err(|error| format!("failed to register: {error}"))?;

    print_session(&session)
}

fn account(config: &ClientConfig) -> Result<(String, Password), String> {
    let email = config
        .auth
        .email
        .clone()
        .ok_or("an account email is required (--email or BISTRO_EMAIL)")?;

    let password = config
        .auth
        .password
        .as_deref()
        .map(Password::new)
        .ok_or("an account password is required (--password or BISTRO_PASSWORD)")?;

    Ok((email, password))
}

fn print_session(session: &Session) -> Result<(), String> {
    writeln!(
        io::stdout().lock(),
        "user_id: {}\nuser_name: {}\nuser_email: {}",
        session.user.id,
        session.user.name,
        session.user.email
    )
    .map_err(|error| error.to_string())
}
