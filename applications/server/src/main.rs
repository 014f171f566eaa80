/// User Management Server - HTTP CRUD service for user records
use clap::{Parser, Subcommand};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use usermgmt_core::{UserRepository, UserValidator};
use usermgmt_server::{api, config::ServerConfig, services::UserService, state::AppState};
use usermgmt_storage::SqliteUserRepository;

#[derive(Parser)]
#[command(name = "usermgmt-server")]
#[command(about = "User management HTTP service", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./config.toml when present)
    #[arg(short, long, global = true, env = "USERMGMT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Apply database migrations and exit
    Migrate,
    /// List all users
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "usermgmt_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = ServerConfig::load(cli.config.as_deref())?;
    config.validate()?;

    match cli.command {
        Commands::Serve => serve(config).await?,
        Commands::Migrate => migrate(&config).await?,
        Commands::ListUsers => list_users(&config).await?,
    }

    Ok(())
}

async fn connect(config: &ServerConfig) -> anyhow::Result<SqliteUserRepository> {
    let repo = SqliteUserRepository::connect(
        &config.storage.database_url,
        config.storage.max_connections,
    )
    .await?;
    Ok(repo)
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    tracing::info!("Starting user management server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let repo = connect(&config).await?;
    tracing::info!("Database connected");

    let validator = UserValidator::new()?;
    let users = Arc::new(UserService::new(Arc::new(repo), validator));
    let app = api::router(AppState::new(users), config.server.request_timeout());

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn migrate(config: &ServerConfig) -> anyhow::Result<()> {
    // connect() runs the migrations
    connect(config).await?;
    tracing::info!("Migrations applied to {}", config.storage.database_url);
    Ok(())
}

async fn list_users(config: &ServerConfig) -> anyhow::Result<()> {
    let repo = connect(config).await?;
    let users = repo.get_all().await?;

    println!("Users:");
    for user in users {
        println!(
            "  {} - {} {} <{}> ({:?})",
            user.id, user.first_name, user.last_name, user.email, user.status
        );
    }

    Ok(())
}
