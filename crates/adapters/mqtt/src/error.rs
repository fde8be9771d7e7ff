//! MQTT adapter error types.

/// Errors specific to the MQTT adapter.
///
/// These never cross the port boundary: ingestion failures are logged and
/// the subscriber keeps running.
#[derive(Debug, thiserror::Error)]
pub enum MqttError {
    /// The rumqttc client returned an error.
    #[error("MQTT client error")]
    Client(#[source] rumqttc::ClientError),

    /// The connection to the broker failed or dropped.
    #[error("MQTT connection error")]
    Connection(#[source] rumqttc::ConnectionError),

    /// Failed to parse an incoming MQTT payload as a sensor reading.
    #[error("failed to parse MQTT payload")]
    PayloadParse(#[source] serde_json::Error),
}

impl From<rumqttc::ClientError> for MqttError {
    fn from(err: rumqttc::ClientError) -> Self {
        Self::Client(err)
    }
}

impl From<rumqttc::ConnectionError> for MqttError {
    fn from(err: rumqttc::ConnectionError) -> Self {
        Self::Connection(err)
    }
}
