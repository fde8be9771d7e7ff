//! Telemetry port — where ingestion adapters deliver sensor readings.

use domus_domain::sensor::SensorReading;

/// Accepts sensor readings from the single ingestion publisher.
///
/// Ingestion must not block: implementations only update in-memory state.
pub trait TelemetrySink {
    fn ingest(&self, reading: SensorReading);
}

impl<T: TelemetrySink + ?Sized> TelemetrySink for std::sync::Arc<T> {
    fn ingest(&self, reading: SensorReading) {
        (**self).ingest(reading);
    }
}
