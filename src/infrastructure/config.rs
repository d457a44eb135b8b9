use crate::application::decorate::RowDefaults;
use crate::application::layout::OverflowPolicy;
use serde::Deserialize;

/// Row height the dashboards use when a panel does not set one.
pub const DEFAULT_PANEL_HEIGHT: u32 = 9;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LayoutSettings {
    #[serde(default)]
    pub overflow: OverflowPolicy,
    #[serde(default)]
    pub start_y: u32,
    #[serde(default)]
    pub default_width: Option<u32>,
    #[serde(default = "default_height")]
    pub default_height: Option<u32>,
    #[serde(default = "default_assign_ids")]
    pub assign_ids: bool,
    /// Fill rows narrower than the canvas with a blank text panel.
    #[serde(default)]
    pub pad: bool,
}

fn default_height() -> Option<u32> {
    Some(DEFAULT_PANEL_HEIGHT)
}

fn default_assign_ids() -> bool {
    true
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            overflow: OverflowPolicy::default(),
            start_y: 0,
            default_width: None,
            default_height: default_height(),
            assign_ids: default_assign_ids(),
            pad: false,
        }
    }
}

impl LayoutSettings {
    pub fn row_defaults(&self) -> RowDefaults {
        RowDefaults::new(self.default_width, self.default_height)
    }
}

/// Load settings from an optional config file (e.g. `config/layout.toml`)
/// with `AUTOLAYOUT_*` environment overrides.
pub fn load_layout_config(path: &str) -> anyhow::Result<LayoutSettings> {
    load_with_environment(path, None)
}

/// `environment` stands in for the process environment when given.
fn load_with_environment(
    path: &str,
    environment: Option<config::Map<String, String>>,
) -> anyhow::Result<LayoutSettings> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(path).required(false))
        .add_source(
            config::Environment::with_prefix("AUTOLAYOUT")
                .try_parsing(true)
                .source(environment),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
