// Row decoration - default panel sizes applied before layout
use crate::domain::document::{PanelDocument, RowSpec};
use crate::domain::grid::CANVAS_WIDTH;
use crate::domain::panel::{Geometry, Group, Panel, Row};
use serde_json::Value;

/// Values given to panels that arrive without them: a zero width or
/// height, or no `datasource`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowDefaults {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub datasource: Option<Value>,
}

impl RowDefaults {
    pub fn new(width: Option<u32>, height: Option<u32>) -> Self {
        Self {
            width,
            height,
            datasource: None,
        }
    }

    pub fn with_datasource(mut self, datasource: Option<Value>) -> Self {
        self.datasource = datasource;
        self
    }

    /// Fill the gaps in `self` from `outer`.
    pub fn or(self, outer: &RowDefaults) -> RowDefaults {
        RowDefaults {
            width: self.width.or(outer.width),
            height: self.height.or(outer.height),
            datasource: self.datasource.or_else(|| outer.datasource.clone()),
        }
    }
}

/// Turn a panel document into layout rows, sizing panels along the way.
/// With `pad`, rows narrower than the canvas get a blank spacer panel on
/// the right.
pub fn decorate_document(document: PanelDocument, defaults: &RowDefaults, pad: bool) -> Vec<Row<Panel>> {
    document
        .rows
        .into_iter()
        .map(|spec| decorate_row(spec, defaults, pad))
        .collect()
}

fn decorate_row(spec: RowSpec, inherited: &RowDefaults, pad: bool) -> Row<Panel> {
    match spec {
        RowSpec::PanelRow {
            width,
            height,
            datasource,
            mut panels,
        } => {
            let defaults = RowDefaults::new(width, height)
                .with_datasource(datasource)
                .or(inherited);
            if let Some(datasource) = &defaults.datasource {
                fill_datasource(&mut panels, datasource);
            }
            size_panels(&mut panels, &defaults);
            if pad {
                pad_row(&mut panels);
            }
            Row::Panels(panels)
        }
        RowSpec::PanelGroup {
            title,
            collapsed,
            width,
            height,
            datasource,
            rows,
        } => {
            let defaults = RowDefaults::new(width, height)
                .with_datasource(datasource)
                .or(inherited);
            let rows = rows
                .into_iter()
                .map(|spec| decorate_row(spec, &defaults, pad))
                .collect();
            Row::Group(Group::new(title, collapsed, rows))
        }
    }
}

fn fill_datasource(panels: &mut [Panel], datasource: &Value) {
    for panel in panels.iter_mut() {
        let missing = panel.payload.get("datasource").is_none_or(Value::is_null);
        if missing {
            panel.payload.insert("datasource".to_string(), datasource.clone());
        }
    }
}

/// Apply `defaults` to unsized panels of one row. Panels still without a
/// width split what is left of the canvas evenly.
pub fn size_panels<P: Geometry>(panels: &mut [P], defaults: &RowDefaults) {
    for panel in panels.iter_mut() {
        let pos = panel.grid_pos_mut();
        if pos.w == 0 {
            if let Some(width) = defaults.width {
                pos.w = width;
            }
        }
        if pos.h == 0 {
            if let Some(height) = defaults.height {
                pos.h = height;
            }
        }
    }

    let unset = panels.iter().filter(|panel| panel.width() == 0).count() as u32;
    if unset == 0 {
        return;
    }

    let used = row_width(panels);
    let share = CANVAS_WIDTH.saturating_sub(used) / unset;
    for panel in panels.iter_mut().filter(|panel| panel.width() == 0) {
        panel.grid_pos_mut().w = share;
    }
}

/// Append a spacer covering the free width of a non-empty row, as tall as
/// its tallest panel.
pub fn pad_row(panels: &mut Vec<Panel>) {
    if panels.is_empty() {
        return;
    }
    let used = row_width(panels);
    if used >= CANVAS_WIDTH {
        return;
    }
    let height = panels.iter().map(Geometry::height).max().unwrap_or(0);
    panels.push(Panel::spacer(CANVAS_WIDTH - used, height));
}

fn row_width<P: Geometry>(panels: &[P]) -> u32 {
    panels.iter().map(Geometry::width).fold(0, u32::saturating_add)
}
