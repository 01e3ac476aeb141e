//! Parley simulator binary.
//!
//! Spins up one server and a handful of clients on an in-process router,
//! runs a scripted chat session and reports what every client displayed.
//!
//! # Usage
//!
//! ```bash
//! # Two clients, plain text
//! parley-server --clients 2 --message "hello" --message "bye"
//!
//! # Everything enabled
//! parley-server --authentication --user alice:secret --user bob:hunter2 \
//!     --color blue --encryption rot13 --logging --message "HelloWorld!"
//! ```

use std::{rc::Rc, str::FromStr};

use clap::{Parser, ValueEnum};
use parley_client::Client;
use parley_core::{ChatConfig, EncryptionMethod, Router, RouterConfig, view};
use parley_server::{CredentialStore, Server};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Errors from parsing `--user` arguments.
#[derive(Debug, thiserror::Error)]
enum UserArgError {
    #[error("expected NAME:PASSWORD, got '{0}'")]
    MissingSeparator(String),

    #[error("username must not be empty")]
    EmptyName,
}

/// One `--user NAME:PASSWORD` account.
#[derive(Debug, Clone)]
struct UserArg {
    name: String,
    password: String,
}

impl FromStr for UserArg {
    type Err = UserArgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, password) =
            s.split_once(':').ok_or_else(|| UserArgError::MissingSeparator(s.to_string()))?;
        if name.is_empty() {
            return Err(UserArgError::EmptyName);
        }
        Ok(Self { name: name.to_string(), password: password.to_string() })
    }
}

/// Display color for `--color` sessions.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ColorArg {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
}

impl ColorArg {
    const fn code(self) -> &'static str {
        match self {
            Self::Black => view::BLACK,
            Self::Red => view::RED,
            Self::Green => view::GREEN,
            Self::Yellow => view::YELLOW,
            Self::Blue => view::BLUE,
        }
    }
}

/// Parley chat protocol simulator
#[derive(Parser, Debug)]
#[command(name = "parley-server")]
#[command(about = "Simulated chat session with composable feature layers")]
#[command(version)]
struct Args {
    /// Require clients to authenticate
    #[arg(long)]
    authentication: bool,

    /// Account accepted by the server (NAME:PASSWORD, repeatable)
    #[arg(long = "user", value_name = "NAME:PASSWORD")]
    users: Vec<UserArg>,

    /// Send and display colored text in this color
    #[arg(long, value_enum)]
    color: Option<ColorArg>,

    /// Encrypt traffic (rot13 or reverse)
    #[arg(long)]
    encryption: Option<EncryptionMethod>,

    /// Keep event logs on server and clients
    #[arg(long)]
    logging: bool,

    /// Round-trip every delivery through the wire codec
    #[arg(long)]
    wire: bool,

    /// Number of clients
    #[arg(long, default_value = "2")]
    clients: usize,

    /// Message to send, from clients in turn (repeatable)
    #[arg(long = "message")]
    messages: Vec<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    let config = ChatConfig {
        authentication: args.authentication,
        color: args.color.is_some(),
        encryption: args.encryption,
        logging: args.logging,
    };
    tracing::info!(
        features = ?config.features(),
        clients = args.clients,
        "Parley session starting"
    );

    if config.authentication && args.users.len() < args.clients {
        tracing::warn!(
            users = args.users.len(),
            clients = args.clients,
            "fewer accounts than clients, extra clients stay unauthenticated"
        );
    }

    let credentials: CredentialStore =
        args.users.iter().map(|u| (u.name.clone(), u.password.clone())).collect();

    let router = Router::with_config(RouterConfig { wire_codec: args.wire });
    let server = Server::from_config(&router, &config, credentials);
    let clients: Vec<_> =
        (0..args.clients).map(|_| Client::from_config(&router, &config)).collect();

    for (i, client) in clients.iter().enumerate() {
        client.connect(server.address())?;
        if config.authentication
            && let Some(user) = args.users.get(i)
        {
            let accepted = client.authenticate(&user.name, &user.password)?;
            tracing::info!(
                client = client.address(),
                user = %user.name,
                accepted,
                "authentication"
            );
        }
    }

    if !clients.is_empty() {
        for (i, body) in args.messages.iter().enumerate() {
            let client = &clients[i % clients.len()];
            let accepted = match args.color {
                Some(color) => client.send_colored(body, color.code())?,
                None => client.send(body)?,
            };
            tracing::info!(client = client.address(), accepted, "sent message");
        }
    }

    report(&server, &clients);
    Ok(())
}

fn report<S, C>(server: &Rc<Server<S>>, clients: &[Rc<Client<C>>])
where
    S: parley_server::ServerLayer,
    C: parley_client::ClientLayer,
{
    if let Some(logger) = server.logger() {
        for line in logger.entries() {
            tracing::info!(server = server.address(), "log: {line}");
        }
    }

    for client in clients {
        for line in client.view().history() {
            tracing::info!(client = client.address(), "display: {line}");
        }
        if let Some(logger) = client.logger() {
            for line in logger.entries() {
                tracing::info!(client = client.address(), "log: {line}");
            }
        }
    }
}
