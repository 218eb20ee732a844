use loopprompt::{logger, server, Config, Controller, GeminiClient, SystemClipboard};
use std::sync::Arc;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    let config = Config::from_env()?;

    logger::init_with_config(logger::LoggerConfig::for_app(&config))?;
    if dotenv_loaded {
        log::info!("✅ .env file loaded successfully");
    } else {
        log::warn!("⚠️  No .env file found, using system environment variables");
    }

    logger::log_startup_info(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        &config.bind_addr(),
    );
    logger::log_config_info(&config);

    let client = GeminiClient::new(config.gemini.clone());
    let controller = Arc::new(Controller::new(
        Arc::new(client),
        Arc::new(SystemClipboard::new()),
    ));

    if let Err(e) = server::run(&config, controller).await {
        log::error!("❌ Server stopped: {}", e);
        return Err(e.into());
    }

    Ok(())
}
