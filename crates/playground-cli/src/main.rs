mod config;
mod repl;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use playground_api::mock::{self, MockServerConfig};
use playground_api::HttpExecutor;
use playground_core::editor::EditorEvent;
use playground_core::{EditorSession, HostPage};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{FileConfig, Overrides, Settings};

/// Edit code, send it to a remote execution service, and read the output.
#[derive(Parser, Debug)]
#[command(name = "playground", version)]
struct Args {
    /// TOML config file
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Execution service URL
    #[arg(long, env = "PLAYGROUND_ENDPOINT", global = true)]
    endpoint: Option<String>,

    /// Initial language: javascript, python or cpp
    #[arg(long, short = 'l', global = true)]
    language: Option<String>,

    /// Initial editor font size (10-30, even)
    #[arg(long, global = true)]
    font_size: Option<u32>,

    /// Start in dark mode
    #[arg(long, global = true)]
    dark: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a file (or the language's starter code) once and print the output
    Run { file: Option<PathBuf> },
    /// Interactive session
    Repl,
    /// Serve a stand-in execution service that echoes submissions
    MockServer {
        #[arg(long, default_value = "127.0.0.1:3000")]
        bind: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "playground_cli=info,playground_core=info,playground_api=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let file_config = args.config.as_deref().map(FileConfig::load).transpose()?;
    let settings = Settings::resolve(
        file_config,
        Overrides {
            endpoint: args.endpoint,
            language: args.language,
            font_size: args.font_size,
            dark: args.dark,
        },
    )?;

    match args.command {
        Command::MockServer { bind } => {
            mock::serve(MockServerConfig { bind_addr: bind }, mock::echo_responder()).await?;
        }
        Command::Run { file } => {
            let mut editor = open_session(&settings)?;
            if let Some(path) = file {
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                editor.handle_editor_event(EditorEvent::ContentChanged(text));
            }
            editor.run().await?;
            repl::print_output(&editor);
        }
        Command::Repl => {
            let mut editor = open_session(&settings)?;
            repl::run_repl(&mut editor).await?;
        }
    }
    Ok(())
}

fn open_session(settings: &Settings) -> Result<EditorSession> {
    let executor = HttpExecutor::new(&settings.endpoint)?;
    info!(endpoint = %executor.endpoint(), language = %settings.session.language, "session opened");
    Ok(EditorSession::new(
        HostPage::new(),
        Arc::new(executor),
        settings.session.clone(),
    ))
}
