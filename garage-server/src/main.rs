use garage_server::{Config, Server, print_banner, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    setup_environment(&config)?;

    print_banner();
    tracing::info!(
        environment = %config.environment,
        database = %config.database_path,
        "Garage Mitre server starting..."
    );

    let server = Server::new(config);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {e}");
        return Err(e.into());
    }

    Ok(())
}
