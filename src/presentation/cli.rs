// Command-line arguments
use crate::application::layout::OverflowPolicy;
use crate::infrastructure::config::LayoutSettings;
use clap::Parser;
use std::path::PathBuf;

/// Position dashboard panels on Grafana's 24-column grid.
#[derive(Parser, Debug)]
#[command(name = "grafana-autolayout", version, about)]
pub struct Cli {
    /// Panel document to lay out (.json or .toml).
    pub input: PathBuf,

    /// Write the panel list here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Settings file, looked up with any supported extension.
    #[arg(long, default_value = "config/layout")]
    pub config: String,

    #[arg(long, value_enum)]
    pub overflow: Option<OverflowPolicy>,

    /// Vertical offset of the first row.
    #[arg(long)]
    pub start_y: Option<u32>,

    /// Leave panel ids out of the output.
    #[arg(long)]
    pub no_ids: bool,

    /// Fill rows narrower than the canvas with a blank text panel.
    #[arg(long)]
    pub pad: bool,
}

impl Cli {
    pub fn apply_overrides(&self, settings: &mut LayoutSettings) {
        if let Some(overflow) = self.overflow {
            settings.overflow = overflow;
        }
        if let Some(start_y) = self.start_y {
            settings.start_y = start_y;
        }
        if self.no_ids {
            settings.assign_ids = false;
        }
        if self.pad {
            settings.pad = true;
        }
    }
}
