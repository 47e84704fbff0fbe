use anyhow::Result;
use std::sync::{Arc, RwLock};
use tower_http::trace::TraceLayer;
use tracing::info;

use pagewise::api::{router, AppState};
use pagewise::settings::Settings;
use pagewise::ConfigStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup tracing
    tracing_subscriber::fmt::init();

    let settings = Settings::from_env()?;
    let state = Arc::new(RwLock::new(AppState::new(ConfigStore::new(settings.defaults))));

    // Compose the routes
    let app = router(state).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&settings.listen).await?;
    info!(listen = %settings.listen, "pagination host listening");
    Ok(axum::serve(listener, app).await?)
}
