//! Broker connection and reading hand-off.
//!
//! Two tasks cooperate: the connection task owns the rumqttc event loop,
//! (re)subscribes on every `ConnAck` and decodes publishes; the forwarder
//! task drains the decoded readings into the telemetry sink. They are joined
//! by a bounded channel so a slow sink applies backpressure to the broker
//! link instead of growing memory.

use std::time::Duration;

use rumqttc::{AsyncClient, Event, EventLoop, MqttOptions, Packet, QoS};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use domus_app::ports::TelemetrySink;
use domus_domain::sensor::SensorReading;

use crate::config::MqttConfig;
use crate::error::MqttError;

/// Decode one telemetry payload.
///
/// # Errors
///
/// Returns [`MqttError::PayloadParse`] when the payload is not a JSON
/// sensor reading.
pub fn parse_reading(payload: &[u8]) -> Result<SensorReading, MqttError> {
    serde_json::from_slice(payload).map_err(MqttError::PayloadParse)
}

/// Running MQTT ingestion. Dropping it leaves the tasks running; call
/// [`stop`](Self::stop) to shut them down.
pub struct MqttSubscriber {
    client: AsyncClient,
    connection: JoinHandle<()>,
    forwarder: JoinHandle<()>,
}

impl MqttSubscriber {
    /// Spawn the connection and forwarder tasks.
    ///
    /// Returns immediately; the broker connection is established in the
    /// background and retried every `reconnect_delay_secs` on failure.
    pub fn start<K>(config: &MqttConfig, sink: K) -> Self
    where
        K: TelemetrySink + Send + 'static,
    {
        let mut options =
            MqttOptions::new(&config.client_id, &config.broker_host, config.broker_port);
        options.set_keep_alive(config.keep_alive());

        let capacity = config.channel_capacity.max(1);
        let (client, eventloop) = AsyncClient::new(options, capacity);
        let (readings_tx, readings_rx) = mpsc::channel(capacity);

        let connection = tokio::spawn(run_connection(
            eventloop,
            client.clone(),
            config.topic.clone(),
            config.reconnect_delay(),
            readings_tx,
        ));
        let forwarder = tokio::spawn(forward(readings_rx, sink));

        tracing::info!(
            host = %config.broker_host,
            port = config.broker_port,
            topic = %config.topic,
            "MQTT subscriber started"
        );

        Self {
            client,
            connection,
            forwarder,
        }
    }

    /// Disconnect from the broker and abort both tasks.
    ///
    /// # Errors
    ///
    /// Returns [`MqttError::Client`] when the disconnect request could not be
    /// queued. The tasks are aborted regardless.
    pub fn stop(self) -> Result<(), MqttError> {
        let result = self.client.try_disconnect().map_err(MqttError::from);
        self.connection.abort();
        self.forwarder.abort();
        tracing::info!("MQTT subscriber stopped");
        result
    }
}

async fn run_connection(
    mut eventloop: EventLoop,
    client: AsyncClient,
    topic: String,
    reconnect_delay: Duration,
    readings: mpsc::Sender<SensorReading>,
) {
    loop {
        match eventloop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(_))) => {
                tracing::info!(%topic, "connected to MQTT broker, subscribing");
                if let Err(err) = client.try_subscribe(topic.as_str(), QoS::AtMostOnce) {
                    tracing::warn!(error = ?MqttError::from(err), %topic, "failed to subscribe");
                }
            }
            Ok(Event::Incoming(Packet::Publish(publish))) => match parse_reading(&publish.payload) {
                Ok(reading) => {
                    if readings.send(reading).await.is_err() {
                        tracing::debug!("reading forwarder gone, closing MQTT connection task");
                        return;
                    }
                }
                Err(err) => {
                    tracing::warn!(error = ?err, topic = ?publish.topic, "skipping malformed sensor payload");
                }
            },
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(
                    error = %MqttError::from(err),
                    retry_in_secs = reconnect_delay.as_secs(),
                    "MQTT connection lost"
                );
                tokio::time::sleep(reconnect_delay).await;
            }
        }
    }
}

async fn forward<K: TelemetrySink>(mut readings: mpsc::Receiver<SensorReading>, sink: K) {
    while let Some(reading) = readings.recv().await {
        tracing::debug!(
            temperature = reading.temperature,
            humidity = reading.humidity,
            light = reading.light,
            "sensor reading received"
        );
        sink.ingest(reading);
    }
    tracing::debug!("reading channel closed, forwarder exiting");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use domus_app::telemetry_bus::TelemetryBus;

    fn reading(temperature: f64) -> SensorReading {
        SensorReading {
            temperature,
            humidity: 50.0,
            light: 30.0,
            fan: true,
            blinds: false,
            lights: true,
        }
    }

    #[test]
    fn should_parse_english_payload() {
        let payload = br#"{"temperature": 24.5, "humidity": 60, "light": 35, "fan": true, "blinds": false, "lights": true}"#;
        let parsed = parse_reading(payload).unwrap();
        assert_eq!(
            parsed,
            SensorReading {
                temperature: 24.5,
                humidity: 60.0,
                light: 35.0,
                fan: true,
                blinds: false,
                lights: true,
            }
        );
    }

    #[test]
    fn should_parse_controller_field_names() {
        let payload = br#"{"temperatura": 19.0, "humedad": 70.0, "luz": 5.0, "ventilador": false, "persianas": true, "bulbs": false}"#;
        let parsed = parse_reading(payload).unwrap();
        assert_eq!(parsed.temperature, 19.0);
        assert_eq!(parsed.humidity, 70.0);
        assert!(parsed.blinds);
        assert!(!parsed.fan);
        assert!(!parsed.lights);
    }

    #[test]
    fn should_reject_malformed_payload() {
        assert!(matches!(
            parse_reading(b"{\"temperature\": \"hot\"}"),
            Err(MqttError::PayloadParse(_))
        ));
        assert!(matches!(
            parse_reading(b"not json"),
            Err(MqttError::PayloadParse(_))
        ));
    }

    #[tokio::test]
    async fn should_forward_readings_to_sink_in_order() {
        let bus = Arc::new(TelemetryBus::new());
        let client = bus.register();
        let (tx, rx) = mpsc::channel(4);

        tx.send(reading(20.0)).await.unwrap();
        tx.send(reading(21.0)).await.unwrap();
        drop(tx);
        forward(rx, Arc::clone(&bus)).await;

        assert_eq!(bus.latest(), Some(reading(21.0)));
        assert_eq!(
            bus.next(client, Duration::from_secs(1)).await,
            Some(reading(20.0))
        );
        assert_eq!(
            bus.next(client, Duration::from_secs(1)).await,
            Some(reading(21.0))
        );
    }

    #[tokio::test]
    async fn should_stop_while_broker_is_unreachable() {
        let bus = Arc::new(TelemetryBus::new());
        let config = MqttConfig {
            broker_host: "127.0.0.1".to_string(),
            broker_port: 1,
            reconnect_delay_secs: 1,
            ..MqttConfig::default()
        };

        let subscriber = MqttSubscriber::start(&config, Arc::clone(&bus));
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert!(subscriber.stop().is_ok());
        assert!(bus.latest().is_none());
    }
}
