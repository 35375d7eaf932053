//! gourmet-web - GourmetGuide content service
//!
//! Serves the public gallery and detail API, the password-protected
//! authoring API, and optional AI-assisted content drafting. Also hosts
//! the `create-admin` provisioning subcommand.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::info;

use gourmet_common::db::settings::load_token_secret;
use gourmet_common::{config, db};
use gourmet_web::services::draft_client::DraftClient;
use gourmet_web::{admin, build_router, AppState};

/// Environment variable holding the Gemini API key
const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Parser)]
#[command(name = "gourmet-web", version, about = "GourmetGuide content service")]
struct Cli {
    /// Root folder holding the database (overrides env and config file)
    #[arg(long)]
    root_folder: Option<String>,

    /// HTTP listen port
    #[arg(long, default_value_t = 3000)]
    port: u16,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Create an admin account, then exit
    CreateAdmin {
        /// Username for the new account
        #[arg(long)]
        username: String,

        /// Password for the new account
        #[arg(long, env = "GOURMET_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Build identification logged before any database work
    info!(
        "Starting GourmetGuide (gourmet-web) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let cli = Cli::parse();

    let root_folder = config::resolve_root_folder(cli.root_folder.as_deref());
    config::ensure_root_folder(&root_folder)?;

    let db_path = config::database_path(&root_folder);
    info!("Database path: {}", db_path.display());

    let pool = db::init_database(&db_path).await?;

    if let Some(Command::CreateAdmin { username, password }) = cli.command {
        admin::provision_admin(&pool, &username, &password).await?;
        println!("Admin account '{}' created", username);
        return Ok(());
    }

    let token_secret = load_token_secret(&pool).await?;
    info!("✓ Token signing secret loaded");

    let drafts = match std::env::var(GEMINI_API_KEY_ENV) {
        Ok(key) if !key.is_empty() => {
            info!("✓ AI drafting enabled");
            Some(Arc::new(DraftClient::new(key)?))
        }
        _ => {
            info!("AI drafting disabled (set {} to enable)", GEMINI_API_KEY_ENV);
            None
        }
    };

    let state = AppState::new(pool, token_secret, drafts);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", cli.port)).await?;
    info!("gourmet-web listening on http://127.0.0.1:{}", cli.port);
    info!("Health check: http://127.0.0.1:{}/health", cli.port);

    axum::serve(listener, app).await?;

    Ok(())
}
