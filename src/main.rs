mod config;
mod core;
mod models;
mod services;

use crate::config::Settings;
use crate::core::PricePredictor;
use crate::models::{ErrorResponse, PredictRequest, PredictResponse};
use crate::services::ArtifactStore;
use std::io::Read;
use std::sync::Arc;
use tracing::{error, info};
use validator::Validate;

fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration before logging so the configured level and
    // format apply to the subscriber
    let settings = Settings::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    // Initialize logging; environment variables override the config file
    let log_format =
        std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.logging.level)),
        )
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Bei price prediction engine...");
    info!("Configuration loaded successfully");

    // Load the model bank; any artifact failure refuses to serve
    let bank = match ArtifactStore::new(&settings.artifacts.dir).load() {
        Ok(bank) => Arc::new(bank),
        Err(e) => {
            error!("Failed to load model artifacts: {}", e);
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("model artifacts unavailable: {}", e),
            ));
        }
    };

    let weights = settings.ensemble.weights.to_weights();
    let predictor = PricePredictor::new(bank, weights);

    info!(
        forest = weights.forest,
        boosted = weights.boosted,
        linear = weights.linear,
        "Predictor initialized"
    );

    // Read one request as JSON from the given file, or stdin
    let raw = match std::env::args().nth(1) {
        Some(path) if path != "-" => std::fs::read_to_string(path)?,
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let request: PredictRequest = match serde_json::from_str(&raw) {
        Ok(request) => request,
        Err(e) => exit_with_client_error("invalid_json", &format!("Invalid JSON: {}", e)),
    };

    if let Err(e) = request.validate() {
        exit_with_client_error("invalid_input", &e.to_string());
    }

    let property = request.into_domain();
    let result = match predictor.predict(&property) {
        Ok(result) => result,
        Err(e) if e.is_client_error() => exit_with_client_error("invalid_input", &e.to_string()),
        Err(e) => {
            error!("Prediction failed: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
        }
    };

    let response = PredictResponse::new(property, result, predictor.metrics().clone());
    println!(
        "{}",
        serde_json::to_string_pretty(&response)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?
    );

    Ok(())
}

/// Print a validation-class error as JSON and stop with a non-zero code
fn exit_with_client_error(error: &str, message: &str) -> ! {
    let response = ErrorResponse {
        error: error.to_string(),
        message: message.to_string(),
        status_code: 400,
    };
    eprintln!(
        "{}",
        serde_json::to_string(&response).unwrap_or_else(|_| message.to_string())
    );
    std::process::exit(1);
}
