use anyhow::Context;
use clap::{Parser, Subcommand};

use guachera_api::config;
use guachera_api::database::manager;
use guachera_api::routes;
use guachera_api::services::user_service::UserService;
use guachera_api::state::AppState;

#[derive(Parser)]
#[command(name = "guachera-api", about = "Livestock management backend")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Bootstrap an active administrator account
    CreateAdmin {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Pin the administrator to one establishment; omit for an
        /// unrestricted administrator
        #[arg(long)]
        establishment: Option<i64>,
    },
    /// Print an Argon2 hash for a password (fixtures, manual inserts)
    HashPassword {
        password: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve().await,
        Command::CreateAdmin {
            name,
            email,
            password,
            establishment,
        } => create_admin(&name, &email, &password, establishment).await,
        Command::HashPassword { password } => {
            let hash = guachera_api::auth::password::hash(&password)
                .map_err(|e| anyhow::anyhow!(e.to_string()))?;
            println!("{}", hash);
            Ok(())
        }
    }
}

async fn serve() -> anyhow::Result<()> {
    let config = config::config();
    tracing::info!("starting guachera-api in {:?} mode", config.environment);

    let pool = manager::connect(&config.database)
        .await
        .context("failed to connect database pool")?;

    let app = routes::app(AppState { pool });

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server")
}

async fn create_admin(
    name: &str,
    email: &str,
    password: &str,
    establishment: Option<i64>,
) -> anyhow::Result<()> {
    let config = config::config();
    let pool = manager::connect(&config.database)
        .await
        .context("failed to connect database pool")?;

    let user = UserService::new(pool)
        .create_admin(name, email, password, establishment)
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;

    println!("created administrator {} (id {})", user.email, user.id);
    Ok(())
}
