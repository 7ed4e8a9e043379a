//! Token CLI commands.

use anyhow::Context;
use chrono::Duration;
use clap::{Args, Subcommand};

use bankauth_auth::{AeadTokenMaker, TokenMaker};
use bankauth_core::config::{AppConfig, AuthConfig};

/// Arguments for token commands
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Symmetric key; read from configuration when omitted. Token lifetimes
    /// then use their defaults.
    #[arg(long, global = true)]
    pub key: Option<String>,

    /// Token subcommand
    #[command(subcommand)]
    pub command: TokenCommand,
}

/// Token subcommands
#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Issue a token for a user
    Create {
        /// Username embedded in the token
        username: String,
        /// Lifetime in minutes; defaults to the configured access token TTL
        #[arg(long, conflicts_with = "refresh")]
        minutes: Option<i64>,
        /// Use the configured refresh token TTL
        #[arg(long)]
        refresh: bool,
    },
    /// Verify a token and print its payload
    Verify {
        /// Token string
        token: String,
    },
}

/// Execute token commands
pub fn execute(args: &TokenArgs, env: &str) -> anyhow::Result<()> {
    let auth = auth_config(args.key.as_deref(), env)?;
    let maker = AeadTokenMaker::new(auth.token_symmetric_key.as_bytes())
        .context("invalid token key")?;

    match &args.command {
        TokenCommand::Create {
            username,
            minutes,
            refresh,
        } => {
            let duration = lifetime(&auth, *minutes, *refresh)?;
            let (token, payload) = maker
                .create_token(username, duration)
                .context("failed to create token")?;
            println!("{token}");
            eprintln!(
                "id={} username={} expires_at={}",
                payload.id,
                payload.username,
                payload.expires_at.to_rfc3339()
            );
        }
        TokenCommand::Verify { token } => {
            let payload = maker.verify_token(token).context("token rejected")?;
            println!("id:         {}", payload.id);
            println!("username:   {}", payload.username);
            println!("issued_at:  {}", payload.issued_at.to_rfc3339());
            println!("expires_at: {}", payload.expires_at.to_rfc3339());
        }
    }

    Ok(())
}

fn auth_config(key: Option<&str>, env: &str) -> anyhow::Result<AuthConfig> {
    let auth = match key {
        Some(key) => AuthConfig::with_key(key),
        None => {
            AppConfig::load(env)
                .context("no --key given and configuration could not be loaded")?
                .auth
        }
    };
    auth.validate()?;
    Ok(auth)
}

fn lifetime(auth: &AuthConfig, minutes: Option<i64>, refresh: bool) -> anyhow::Result<Duration> {
    let duration = match minutes {
        Some(minutes) => Duration::try_minutes(minutes)
            .with_context(|| format!("--minutes {minutes} is out of range"))?,
        None if refresh => auth.refresh_token_duration()?,
        None => auth.access_token_duration()?,
    };
    Ok(duration)
}
