use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use txbus_server::config::AppConfig;
use txbus_server::schedule::{
    MockScheduleClient, ScheduleBackend, ScheduleClient, ScheduleConfig,
};
use txbus_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("txbus_server=info,tower_http=info")),
        )
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "bad configuration");
            std::process::exit(1);
        }
    };

    let backend = match &config.mock_data {
        Some(path) => {
            info!(path = %path.display(), "serving mock itineraries");
            let mock = MockScheduleClient::from_file(path).expect("Failed to load mock data");
            ScheduleBackend::Mock(mock)
        }
        None => {
            let schedule_config = ScheduleConfig::new(&config.api_base_url)
                .with_mode(config.submit_mode)
                .with_timeout(config.timeout_secs);
            let client =
                ScheduleClient::new(schedule_config).expect("Failed to create schedule client");
            info!(endpoint = %client.endpoint(), "using schedule API");
            ScheduleBackend::Http(client)
        }
    };

    let state = AppState::new(backend);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind listen address");
    info!("TXBus listening on http://{}", config.bind_addr);

    axum::serve(listener, app).await.expect("Server error");
}
