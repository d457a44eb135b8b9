// Sink trait for the serialized panel list
use async_trait::async_trait;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkOutcome {
    Written,
    /// The destination already held the same panels.
    Unchanged,
}

#[async_trait]
pub trait PanelSink: Send + Sync {
    /// Write the positioned panels, a JSON array ready for a dashboard's
    /// `panels` field
    async fn write_panels(&self, panels: &Value) -> anyhow::Result<SinkOutcome>;
}
