use std::sync::Arc;

use tokio::signal;
use tracing::{error, info};

use smart_diet_rs::telegram::{RelayState, ReqwestTelegramApi, TelegramConfig, router};

#[tokio::main]
async fn main() {
    smart_diet_rs::logging::init();

    let config = match TelegramConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "invalid relay configuration");
            std::process::exit(1);
        }
    };

    let api = ReqwestTelegramApi::new(&config.api_base, config.bot_token.clone());
    let state = Arc::new(RelayState {
        api: Arc::new(api),
        mini_app_url: config.mini_app_url.clone(),
    });
    let app = router(state);

    let listener = match tokio::net::TcpListener::bind(config.address).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind to address {}: {e}", config.address);
            std::process::exit(1);
        }
    };
    info!(addr = %config.address, "telegram relay listening");

    let server = axum::serve(listener, app.into_make_service());
    if let Err(e) = server
        .with_graceful_shutdown(async {
            if let Err(e) = signal::ctrl_c().await {
                error!("failed to listen for ctrl+c: {e}");
                std::future::pending::<()>().await;
            }
        })
        .await
    {
        error!("Server error: {e}");
        std::process::exit(1);
    }
}
