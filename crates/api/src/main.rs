use bloglist_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = std::env::var("DOTENV_PATH").unwrap_or_else(|_| ".env".to_string());
    if std::path::Path::new(&dotenv).exists() {
        dotenvy::from_path(&dotenv)?;
    }

    bloglist_observability::init();

    let config = AppConfig::from_env()?;
    let app = bloglist_api::app::build_app(&config).await?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
