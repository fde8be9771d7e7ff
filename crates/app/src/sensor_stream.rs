//! Per-client sensor event stream with keepalives.

use std::time::Duration;

use futures::Stream;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use domus_domain::sensor::SensorReading;

use crate::telemetry_bus::{Delivery, Subscription};

/// Keepalive interval used when none is configured.
pub const DEFAULT_KEEPALIVE: Duration = Duration::from_secs(30);

/// One item of a client's sensor stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StreamEvent {
    /// No reading arrived within the keepalive interval.
    Keepalive,
    Reading(SensorReading),
}

impl Serialize for StreamEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Keepalive => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("status", "keepalive")?;
                map.end()
            }
            Self::Reading(reading) => reading.serialize(serializer),
        }
    }
}

/// Turn a subscription into an endless stream of readings, emitting
/// [`StreamEvent::Keepalive`] whenever `keepalive` elapses without one.
///
/// The stream ends when the client is cancelled. Dropping the stream
/// deregisters the client.
pub fn sensor_stream(
    subscription: Subscription,
    keepalive: Duration,
) -> impl Stream<Item = StreamEvent> + Send {
    tracing::info!(client = %subscription.id(), "sensor stream opened");
    futures::stream::unfold(subscription, move |subscription| async move {
        let delivery = subscription.poll(keepalive).await;
        match delivery {
            Delivery::Reading(reading) => Some((StreamEvent::Reading(reading), subscription)),
            Delivery::Timeout => Some((StreamEvent::Keepalive, subscription)),
            Delivery::Closed => {
                tracing::warn!(client = %subscription.id(), "client queue closed, ending sensor stream");
                None
            }
        }
    })
}
