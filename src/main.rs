use dotenvy::dotenv;
use order_desk::{
    config::{database, seed, settings},
    errors::{Error, Result},
    web::{self, AppState},
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; variables may also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load settings (config.toml is optional, env vars override it)
    let settings = settings::load_default_settings()
        .inspect_err(|e| error!("Critical error loading settings: {}", e))?;

    // 4. Connect and make sure the schema exists
    let db = database::create_connection(&settings.database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Seed staff users and catalog items from config.toml
    seed::seed_from_settings(&db, &settings)
        .await
        .inspect_err(|e| error!("Failed to seed initial data: {}", e))?;

    // 6. Serve
    let listener = tokio::net::TcpListener::bind(&settings.bind_addr)
        .await
        .inspect_err(|e| error!("Failed to bind {}: {}", settings.bind_addr, e))?;
    info!("Listening on http://{}", settings.bind_addr);

    axum::serve(listener, web::router(AppState::new(db)))
        .await
        .map_err(Error::from)?;

    Ok(())
}
