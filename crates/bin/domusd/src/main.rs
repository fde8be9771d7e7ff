//! # domusd — domus daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialise `tracing`
//! - Create the telemetry bus and start MQTT ingestion into it
//! - Construct the speech and language collaborators and the conversation
//!   service
//! - Build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use domus_adapter_http_axum::router;
use domus_adapter_http_axum::state::AppState;
use domus_adapter_mqtt::MqttSubscriber;
use domus_adapter_openai::{ChatModel, OpenAiClient, SpeechSynthesizer, WhisperTranscriber};
use domus_app::services::conversation_service::ConversationService;
use domus_app::telemetry_bus::TelemetryBus;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Telemetry
    let telemetry = Arc::new(TelemetryBus::new());
    let subscriber = MqttSubscriber::start(&config.mqtt, Arc::clone(&telemetry));

    // Collaborators
    let client = OpenAiClient::new(&config.openai)?;
    let transcriber = WhisperTranscriber::new(client.clone(), &config.openai);
    let model = ChatModel::new(client.clone(), &config.openai);
    let synthesizer = SpeechSynthesizer::new(client, &config.openai);

    // Services
    let conversation = ConversationService::new(
        transcriber,
        model,
        synthesizer,
        Arc::clone(&telemetry),
        config.assistant.conversation_settings(),
    );

    // HTTP
    let state = AppState::new(conversation, Arc::clone(&telemetry))
        .with_keepalive(config.assistant.keepalive());
    let app = router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(
        %bind_addr,
        llm = %config.openai.base_url,
        mqtt_host = %config.mqtt.broker_host,
        "domusd listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(telemetry))
        .await?;

    if let Err(err) = subscriber.stop() {
        tracing::warn!(error = %err, "MQTT subscriber did not stop cleanly");
    }
    tracing::info!("domusd stopped");

    Ok(())
}

/// Resolve on Ctrl-C or SIGTERM, then end every open sensor stream so
/// in-flight SSE connections let the server drain.
async fn shutdown_signal(telemetry: Arc<TelemetryBus>) {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(%err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::warn!(%err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    let closed = telemetry.close_all();
    tracing::info!(closed_streams = closed, "shutdown signal received");
}
