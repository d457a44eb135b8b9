// Mapper to convert layout output to Grafana panel JSON
use crate::domain::grid::GridPos;
use crate::domain::panel::{GroupHeader, Panel, Placed};
use serde_json::{json, Map, Value};
use std::collections::HashSet;

/// Hands out panel ids, skipping any already present in the payloads.
#[derive(Debug, Default)]
pub struct PanelIds {
    next: u64,
    taken: HashSet<u64>,
}

impl PanelIds {
    pub fn new(placed: &[Placed<Panel>]) -> Self {
        let mut taken = HashSet::new();
        collect_ids(placed, &mut taken);
        Self { next: 1, taken }
    }

    fn next_id(&mut self) -> u64 {
        while self.taken.contains(&self.next) {
            self.next += 1;
        }
        let id = self.next;
        self.next += 1;
        id
    }
}

fn collect_ids(placed: &[Placed<Panel>], taken: &mut HashSet<u64>) {
    for item in placed {
        match item {
            Placed::Panel(panel) => {
                if let Some(id) = panel.payload.get("id").and_then(Value::as_u64) {
                    taken.insert(id);
                }
            }
            Placed::Header(header) => collect_ids(&header.panels, taken),
        }
    }
}

/// Serialize the layout output. With `assign_ids`, every panel and header
/// without an id gets the next free one in emission order.
pub fn panels_to_json(placed: Vec<Placed<Panel>>, assign_ids: bool) -> Value {
    let mut ids = assign_ids.then(|| PanelIds::new(&placed));
    Value::Array(map_placed(placed, &mut ids))
}

fn map_placed(placed: Vec<Placed<Panel>>, ids: &mut Option<PanelIds>) -> Vec<Value> {
    placed
        .into_iter()
        .map(|item| match item {
            Placed::Panel(panel) => panel_to_json(panel, ids),
            Placed::Header(header) => header_to_json(header, ids),
        })
        .collect()
}

fn panel_to_json(panel: Panel, ids: &mut Option<PanelIds>) -> Value {
    let mut object = panel.payload;
    if let Some(ids) = ids {
        if !object.contains_key("id") {
            object.insert("id".to_string(), Value::from(ids.next_id()));
        }
    }
    object.insert("gridPos".to_string(), grid_pos_to_json(panel.grid_pos));
    Value::Object(object)
}

fn header_to_json(header: GroupHeader<Panel>, ids: &mut Option<PanelIds>) -> Value {
    let mut object = Map::new();
    if let Some(ids) = ids {
        object.insert("id".to_string(), Value::from(ids.next_id()));
    }
    object.insert("type".to_string(), Value::from("row"));
    object.insert("title".to_string(), Value::from(header.title));
    object.insert("collapsed".to_string(), Value::from(header.collapsed));
    object.insert("gridPos".to_string(), grid_pos_to_json(header.grid_pos));
    object.insert(
        "panels".to_string(),
        Value::Array(map_placed(header.panels, ids)),
    );
    Value::Object(object)
}

fn grid_pos_to_json(pos: GridPos) -> Value {
    json!({ "h": pos.h, "w": pos.w, "x": pos.x, "y": pos.y })
}
