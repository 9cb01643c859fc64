use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context as _;

use stockroom_api::{app, config::ApiConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stockroom_observability::init();

    let config = ApiConfig::from_env()?;

    let services = app::services::AppServices::seeded().context("failed to seed inventory")?;
    let services = Arc::new(services);
    let router = app::build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("inventory GraphQL server ready at http://{}/graphql", listener.local_addr()?);

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
