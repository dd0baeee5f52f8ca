//! Command dispatch. Everything a command needs is built once here and passed
//! down by reference.

mod admin;
mod browse;
mod user;

use anyhow::{Context, Result};
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::api::{ApiClient, BuildingsApi, GuidesApi, UsersApi};
use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::panel::ToastSlot;
use crate::render;
use crate::session::{Session, SessionStore};

pub struct App {
    pub config: Config,
    pub users: UsersApi,
    pub guides: GuidesApi,
    pub buildings: BuildingsApi,
    pub store: SessionStore,
    pub toasts: ToastSlot,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let client = ApiClient::new(&config.api_url, config.http_timeout)
            .with_context(|| format!("Cannot use backend URL '{}'", config.api_url))?;
        Ok(Self {
            users: UsersApi::new(client.clone()),
            guides: GuidesApi::new(client.clone()),
            buildings: BuildingsApi::new(client),
            store: SessionStore::new(config.session_path.clone()),
            toasts: ToastSlot::new(config.toast_ttl),
            config,
        })
    }

    /// The current session, refreshed from the backend.
    pub async fn session(&self) -> Result<Option<Session>> {
        self.store.resolve(&self.users, &self.config).await
    }
}

/// Print what is left in a toast slot. Returns false for an error toast.
pub(crate) fn flush_toast(toasts: &mut ToastSlot) -> bool {
    match toasts.take() {
        Some(toast) => {
            println!("{}", render::toast_line(&toast));
            !toast.is_error()
        }
        None => true,
    }
}

/// Ask a yes/no question on the terminal. Anything but `y`/`yes` is no.
pub(crate) async fn confirm_prompt(question: &str) -> Result<bool> {
    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(format!("{} [y/N] ", question).as_bytes())
        .await?;
    stdout.flush().await?;

    let mut answer = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut answer)
        .await
        .context("Failed to read confirmation")?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

pub async fn run(cli: Cli, mut config: Config) -> Result<ExitCode> {
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    if let Some(path) = cli.session_file {
        config.session_path = path;
    }
    let mut app = App::new(config)?;

    let ok = match cli.command {
        Command::Login { username, password } => user::login(&mut app, username, password).await?,
        Command::Logout => user::logout(&mut app).await?,
        Command::Register(args) => user::register(&mut app, args).await?,
        Command::Whoami => user::whoami(&app).await?,
        Command::Profile {
            email,
            phone,
            password,
        } => user::profile(&mut app, email, phone, password).await?,
        Command::Home => browse::home(&mut app).await,
        Command::Browse(command) => browse::run(&mut app, command).await,
        Command::Admin(command) => admin::run(&mut app, command).await?,
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
