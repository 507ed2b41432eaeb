use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::signal;
use tracing::{error, info, warn};

use companies_api::{router, AppState};
use companies_core::messaging::EventPublisher;
use companies_core::services::CompanyService;
use companies_infrastructure::{
    create_pool, run_migrations, AsyncProducer, MessageSink, PgCompanyRepository, ProducerConfig,
    RedisStreamSink, TracingSink,
};
use companies_security::TokenAuthority;
use companies_shared::config::{AppConfig, PublisherSettings};
use companies_shared::constants::SHUTDOWN_TIMEOUT_SECS;
use companies_shared::telemetry::init_telemetry;

#[derive(Parser, Debug)]
#[command(name = "companies-server", version, about = "Company CRUD service")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Print a bearer token signed with the configured secret
    IssueToken {
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = AppConfig::load().context("Failed to load configuration")?;

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::IssueToken { email, username } => {
            let authority = TokenAuthority::new(&config.jwt.secret, config.jwt.token_ttl_secs);
            let token = authority.issue(&email, &username)?;
            println!("{}", token);
            Ok(())
        }
    }
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    init_telemetry(&config.log)?;
    info!(env = %config.app.env, "{} starting...", config.app.name);

    // Database
    let pool = create_pool(
        &config.database.url,
        config.database.max_connections,
        Duration::from_secs(config.database.acquire_timeout_secs),
    )
    .await
    .context("Failed to connect to database")?;
    info!("Database connection established.");

    run_migrations(&pool, &config.database.migrations_path)
        .await
        .context("Failed to run migrations")?;

    // Publisher
    let producer = Arc::new(AsyncProducer::new(
        message_sink(&config.publisher)?,
        ProducerConfig {
            batch_size: config.publisher.batch_size,
            batch_timeout: config.publisher.batch_timeout(),
            queue_capacity: config.publisher.queue_capacity,
        },
    ));

    // Service and router
    let repo = Arc::new(PgCompanyRepository::new(pool));
    let companies = Arc::new(CompanyService::new(repo, producer.clone()));
    let tokens = Arc::new(TokenAuthority::new(
        &config.jwt.secret,
        config.jwt.token_ttl_secs,
    ));
    let app = router(AppState::new(companies, tokens));

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    // Flush buffered events even when the server stopped with an error
    let drain = Duration::from_secs(SHUTDOWN_TIMEOUT_SECS);
    if tokio::time::timeout(drain, producer.close()).await.is_err() {
        warn!("Producer did not drain within {:?}", drain);
    }

    served?;
    info!("Server stopped");
    Ok(())
}

fn message_sink(settings: &PublisherSettings) -> anyhow::Result<Arc<dyn MessageSink>> {
    if settings.redis_url.is_empty() {
        warn!("No broker configured; events are only logged");
        return Ok(Arc::new(TracingSink));
    }

    let sink = RedisStreamSink::connect(&settings.redis_url, settings.stream.clone())
        .context("Failed to create broker pool")?;
    info!(stream = %sink.stream(), "Publishing events to Redis stream");
    Ok(Arc::new(sink))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
