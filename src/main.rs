use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::broadcast::error::RecvError;

use fieldline::application::ports::{
    DocumentRepository, EventPublisher, JobRepository, TransactionLog,
};
use fieldline::application::services::{
    AssignmentService, ConversionService, PaymentSyncService,
};
use fieldline::infrastructure::events::BroadcastEventBus;
use fieldline::infrastructure::observability::{init_tracing, TracingConfig};
use fieldline::infrastructure::persistence::{
    create_pool, InMemoryDocumentRepository, InMemoryJobRepository, InMemoryTransactionLog,
    JsonFileStore, PgDocumentRepository, PgJobRepository, PgTransactionLog,
};
use fieldline::presentation::{create_router, AppState, Environment, Settings, StoreSettings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env();
    init_tracing(
        TracingConfig {
            environment: Environment::current().to_string(),
            json_format: settings.logging.enable_json,
        },
        settings.server.port,
    );

    let (documents, jobs, transactions): (
        Arc<dyn DocumentRepository>,
        Arc<dyn JobRepository>,
        Arc<dyn TransactionLog>,
    ) = match &settings.store {
        StoreSettings::Memory => {
            tracing::info!("Using in-memory store");
            (
                Arc::new(InMemoryDocumentRepository::new()),
                Arc::new(InMemoryJobRepository::new()),
                Arc::new(InMemoryTransactionLog::new()),
            )
        }
        StoreSettings::Json { data_path } => {
            tracing::info!(path = %data_path.display(), "Using JSON snapshot store");
            let store = Arc::new(JsonFileStore::open(data_path.clone()).await?);
            (
                Arc::clone(&store) as Arc<dyn DocumentRepository>,
                Arc::clone(&store) as Arc<dyn JobRepository>,
                store as Arc<dyn TransactionLog>,
            )
        }
        StoreSettings::Postgres {
            url,
            max_connections,
        } => {
            tracing::info!("Using PostgreSQL store");
            let pool = create_pool(url, *max_connections).await?;
            sqlx::migrate!("./migrations").run(&pool).await?;
            (
                Arc::new(PgDocumentRepository::new(pool.clone())),
                Arc::new(PgJobRepository::new(pool.clone())),
                Arc::new(PgTransactionLog::new(pool)),
            )
        }
    };

    let bus = Arc::new(BroadcastEventBus::new(64));
    let mut event_log = bus.subscribe();
    tokio::spawn(async move {
        loop {
            match event_log.recv().await {
                Ok(event) => tracing::debug!(event = ?event, "Domain event"),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Event log subscriber lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });
    let events: Arc<dyn EventPublisher> = bus;

    let conversions = Arc::new(ConversionService::new(
        Arc::clone(&documents),
        Arc::clone(&jobs),
        Arc::clone(&events),
        settings.conversion.default_employee.clone(),
    ));
    let assignments = Arc::new(AssignmentService::new(
        Arc::clone(&jobs),
        Arc::clone(&events),
    ));
    let payments = Arc::new(PaymentSyncService::new(
        Arc::clone(&jobs),
        Arc::clone(&documents),
        Arc::clone(&transactions),
        Arc::clone(&events),
    ));

    let state = AppState {
        conversions,
        assignments,
        payments,
        documents,
        jobs,
        transactions,
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
