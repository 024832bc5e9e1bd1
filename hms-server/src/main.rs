use hms_server::{Config, Server, ServerState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    hms_server::utils::logger::init(&config);

    tracing::info!(
        environment = %config.environment,
        port = config.http_port,
        "HMS server starting"
    );

    let state = ServerState::initialize(&config).await?;
    Server::with_state(config, state).run().await?;

    Ok(())
}
