// File and stdout sinks for the panel list
use crate::application::panel_sink::{PanelSink, SinkOutcome};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn is_up_to_date(&self, panels: &Value) -> bool {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice::<Value>(&bytes)
                .map(|existing| &existing == panels)
                .unwrap_or(false),
            Err(_) => false,
        }
    }
}

#[async_trait]
impl PanelSink for FileSink {
    async fn write_panels(&self, panels: &Value) -> Result<SinkOutcome> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !tokio::fs::try_exists(parent).await.unwrap_or(false) {
                tracing::info!("Creating parent folder {}", parent.display());
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create folder {}", parent.display()))?;
            }
        }

        if self.is_up_to_date(panels).await {
            tracing::debug!("{} is already up to date", self.path.display());
            return Ok(SinkOutcome::Unchanged);
        }

        let json = serde_json::to_string_pretty(panels).context("Failed to serialize panels")?;
        tokio::fs::write(&self.path, json)
            .await
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        tracing::info!("Panels saved to {}", self.path.display());
        Ok(SinkOutcome::Written)
    }
}

#[derive(Debug, Clone, Default)]
pub struct StdoutSink;

#[async_trait]
impl PanelSink for StdoutSink {
    async fn write_panels(&self, panels: &Value) -> Result<SinkOutcome> {
        let json = serde_json::to_string_pretty(panels).context("Failed to serialize panels")?;
        println!("{}", json);
        Ok(SinkOutcome::Written)
    }
}
