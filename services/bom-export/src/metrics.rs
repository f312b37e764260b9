//! Export counters exposed on `/metrics`.

use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

pub struct ExportMetrics {
    registry: Registry,
    exports: IntCounterVec,
    rows: IntCounter,
    failed_configurations: IntCounter,
}

impl ExportMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new_custom(Some("cpq_console".to_string()), None)?;

        let exports = IntCounterVec::new(
            Opts::new("bom_exports_total", "BOM export requests by mode and outcome"),
            &["mode", "outcome"],
        )?;
        let rows = IntCounter::new("bom_rows_total", "Report rows produced")?;
        let failed_configurations = IntCounter::new(
            "bom_failed_configurations_total",
            "Batch configurations reported as error rows",
        )?;

        registry.register(Box::new(exports.clone()))?;
        registry.register(Box::new(rows.clone()))?;
        registry.register(Box::new(failed_configurations.clone()))?;

        Ok(Self {
            registry,
            exports,
            rows,
            failed_configurations,
        })
    }

    pub fn record_success(&self, mode: &str, rows: usize, failed_configurations: usize) {
        self.exports.with_label_values(&[mode, "success"]).inc();
        self.rows.inc_by(rows as u64);
        self.failed_configurations.inc_by(failed_configurations as u64);
    }

    pub fn record_failure(&self, mode: &str) {
        self.exports.with_label_values(&[mode, "failure"]).inc();
    }

    pub fn render(&self) -> String {
        let mut buffer = Vec::new();
        let encoder = TextEncoder::new();
        if let Err(e) = encoder.encode(&self.registry.gather(), &mut buffer) {
            return format!("# error encoding metrics: {}\n", e);
        }
        String::from_utf8_lossy(&buffer).into_owned()
    }
}
