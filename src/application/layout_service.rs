// Layout service - Use case for positioning a panel document
use crate::application::decorate::decorate_document;
use crate::application::layout::LayoutEngine;
use crate::application::panel_sink::{PanelSink, SinkOutcome};
use crate::domain::document::PanelDocument;
use crate::domain::panel::Row;
use crate::infrastructure::config::LayoutSettings;
use crate::infrastructure::panel_mapper::panels_to_json;
use anyhow::Context;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSummary {
    /// Top-level entries written, group headers included.
    pub panel_count: usize,
    pub next_y: u32,
    pub outcome: SinkOutcome,
}

#[derive(Clone)]
pub struct LayoutService {
    sink: Arc<dyn PanelSink>,
    settings: LayoutSettings,
}

impl LayoutService {
    pub fn new(sink: Arc<dyn PanelSink>, settings: LayoutSettings) -> Self {
        Self { sink, settings }
    }

    pub async fn render(&self, document: PanelDocument) -> anyhow::Result<RenderSummary> {
        let rows = decorate_document(document, &self.settings.row_defaults(), self.settings.pad);
        for (index, row) in rows.iter().enumerate() {
            match row {
                Row::Panels(panels) => tracing::debug!("Row {}: {} panels", index, panels.len()),
                Row::Group(group) => tracing::debug!(
                    "Row {}: group '{}' ({} rows, collapsed={})",
                    index,
                    group.title,
                    group.rows.len(),
                    group.collapsed
                ),
            }
        }

        let engine = LayoutEngine::new(self.settings.overflow);
        let layout = engine
            .layout(rows, self.settings.start_y)
            .context("Failed to lay out panels")?;

        let panel_count = layout.panels.len();
        let panels = panels_to_json(layout.panels, self.settings.assign_ids);
        let outcome = self
            .sink
            .write_panels(&panels)
            .await
            .context("Failed to write panels")?;

        tracing::info!(
            "Laid out {} panels down to y={} ({:?})",
            panel_count,
            layout.next_y,
            outcome
        );

        Ok(RenderSummary {
            panel_count,
            next_y: layout.next_y,
            outcome,
        })
    }
}
