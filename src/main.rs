use timetable_compliance::config::ServerConfig;
use timetable_compliance::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env()?;
    log::debug!("Loaded configuration: {config:?}");

    server::run_server(config).await
}
