//! Connect Four Live - command-line entry point.
//!
//! Each subcommand maps onto one application handler; `watch` runs a
//! stream relay with stdout as the client connection.

use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use connect_four_live::adapters::client::WriterSink;
use connect_four_live::application::{
    CreateGameCommand, DeleteGameCommand, DropPieceCommand, GameError, GetGameStatusQuery,
    JoinGameCommand, LeaveGameCommand, RelayError, StartGameCommand,
};
use connect_four_live::bootstrap::{self, AppContext, BootstrapError};
use connect_four_live::cli::{Cli, Command};
use connect_four_live::config::{AppConfig, ConfigError};
use connect_four_live::domain::foundation::{ErrorCategory, SessionId, ValidationError};

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Bootstrap(#[from] BootstrapError),

    #[error("Invalid session id: {0}")]
    InvalidId(#[from] ValidationError),

    #[error(transparent)]
    Game(#[from] GameError),

    #[error(transparent)]
    Relay(#[from] RelayError),
}

impl CliError {
    fn exit_code(&self) -> ExitCode {
        let category = match self {
            CliError::Config(_) | CliError::Bootstrap(_) => return ExitCode::from(78),
            CliError::InvalidId(_) => ErrorCategory::Validation,
            CliError::Game(e) => e.category(),
            CliError::Relay(RelayError::SessionNotFound(_)) => ErrorCategory::NotFound,
            CliError::Relay(_) => ErrorCategory::Infrastructure,
        };
        match category {
            ErrorCategory::Validation => ExitCode::from(2),
            ErrorCategory::NotFound => ExitCode::from(3),
            ErrorCategory::Infrastructure => ExitCode::from(1),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            e.exit_code()
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = AppConfig::load()?;
    config.validate().map_err(ConfigError::from)?;
    bootstrap::init_tracing(&config.logging)?;

    let context = AppContext::connect(&config).await?;

    match cli.command {
        Command::Create { id } => {
            let session_id = id.map(SessionId::parse).transpose()?;
            let result = context
                .create_handler()
                .handle(CreateGameCommand { session_id })
                .await?;
            println!("{}", result.rendering);
        }
        Command::Delete { session } => {
            let session_id = SessionId::parse(session)?;
            context
                .delete_handler()
                .handle(DeleteGameCommand {
                    session_id: session_id.clone(),
                })
                .await?;
            println!("Session {} has been deleted", session_id);
        }
        Command::Status { session } => {
            let view = context
                .status_handler()
                .handle(GetGameStatusQuery {
                    session_id: SessionId::parse(session)?,
                })
                .await?;
            println!("{}", view.rendering);
        }
        Command::Join { session, name } => {
            let update = context
                .join_handler()
                .handle(JoinGameCommand {
                    session_id: SessionId::parse(session)?,
                    name,
                })
                .await?;
            println!("{}", update.message);
        }
        Command::Leave { session, name } => {
            let update = context
                .leave_handler()
                .handle(LeaveGameCommand {
                    session_id: SessionId::parse(session)?,
                    name,
                })
                .await?;
            println!("{}", update.message);
        }
        Command::Start { session } => {
            let update = context
                .start_handler()
                .handle(StartGameCommand {
                    session_id: SessionId::parse(session)?,
                })
                .await?;
            println!("{}", update.message);
        }
        Command::Drop {
            session,
            name,
            column,
        } => {
            let update = context
                .drop_handler()
                .handle(DropPieceCommand {
                    session_id: SessionId::parse(session)?,
                    name,
                    column,
                })
                .await?;
            println!("{}", update.message);
        }
        Command::Watch { session } => watch(&context, SessionId::parse(session)?).await?,
    }
    Ok(())
}

async fn watch(context: &AppContext, session_id: SessionId) -> Result<(), CliError> {
    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupted, closing relay");
        }
        on_interrupt.cancel();
    });

    let mut sink = WriterSink::new(tokio::io::stdout());
    let outcome = context.relay().run(&session_id, &mut sink, cancel).await?;
    tracing::debug!(
        forwarded = outcome.forwarded,
        skipped = outcome.skipped,
        "Watch finished"
    );
    Ok(())
}
