// Panel document model - the on-disk description of rows and groups
use super::panel::Panel;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PanelDocument {
    #[serde(default)]
    pub rows: Vec<RowSpec>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum RowSpec {
    PanelRow {
        #[serde(default)]
        width: Option<u32>,
        #[serde(default)]
        height: Option<u32>,
        /// Given to panels that do not name their own datasource.
        #[serde(default)]
        datasource: Option<Value>,
        #[serde(default)]
        panels: Vec<Panel>,
    },
    PanelGroup {
        title: String,
        #[serde(default)]
        collapsed: bool,
        /// Defaults handed down to every nested row.
        #[serde(default)]
        width: Option<u32>,
        #[serde(default)]
        height: Option<u32>,
        #[serde(default)]
        datasource: Option<Value>,
        #[serde(default)]
        rows: Vec<RowSpec>,
    },
}

impl PanelDocument {
    pub fn new(rows: Vec<RowSpec>) -> Self {
        Self { rows }
    }

    pub fn panel_count(&self) -> usize {
        fn count(rows: &[RowSpec]) -> usize {
            rows.iter()
                .map(|row| match row {
                    RowSpec::PanelRow { panels, .. } => panels.len(),
                    RowSpec::PanelGroup { rows, .. } => count(rows),
                })
                .sum()
        }
        count(&self.rows)
    }
}
