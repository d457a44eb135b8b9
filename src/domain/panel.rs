// Panel domain model - layout input and output trees
use super::grid::{GridPos, CANVAS_WIDTH, GROUP_HEADER_HEIGHT};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Anything the layout engine can position on the grid.
pub trait Geometry {
    fn grid_pos(&self) -> GridPos;
    fn grid_pos_mut(&mut self) -> &mut GridPos;

    fn width(&self) -> u32 {
        self.grid_pos().w
    }

    fn height(&self) -> u32 {
        self.grid_pos().h
    }

    fn place(&mut self, x: u32, y: u32) {
        let pos = self.grid_pos_mut();
        pos.x = x;
        pos.y = y;
    }
}

/// A dashboard panel. Everything except the grid position is carried
/// through untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Panel {
    #[serde(rename = "gridPos", default)]
    pub grid_pos: GridPos,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Panel {
    pub fn new(grid_pos: GridPos, payload: Map<String, Value>) -> Self {
        Self { grid_pos, payload }
    }

    pub fn titled(title: &str, w: u32, h: u32) -> Self {
        let mut payload = Map::new();
        payload.insert("title".to_string(), Value::String(title.to_string()));
        Self::new(GridPos::sized(w, h), payload)
    }

    /// Transparent, empty text panel used to fill out a short row.
    pub fn spacer(w: u32, h: u32) -> Self {
        let mut payload = Map::new();
        payload.insert("type".to_string(), Value::String("text".to_string()));
        payload.insert("transparent".to_string(), Value::Bool(true));
        payload.insert("options".to_string(), serde_json::json!({ "content": "" }));
        Self::new(GridPos::sized(w, h), payload)
    }

    pub fn title(&self) -> Option<&str> {
        self.payload.get("title").and_then(Value::as_str)
    }
}

impl Geometry for Panel {
    fn grid_pos(&self) -> GridPos {
        self.grid_pos
    }

    fn grid_pos_mut(&mut self) -> &mut GridPos {
        &mut self.grid_pos
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Row<P> {
    /// Panels placed side by side on one shelf.
    Panels(Vec<P>),
    Group(Group<P>),
}

/// A named, collapsible section of nested rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Group<P> {
    pub title: String,
    pub collapsed: bool,
    pub rows: Vec<Row<P>>,
}

impl<P> Group<P> {
    pub fn new(title: impl Into<String>, collapsed: bool, rows: Vec<Row<P>>) -> Self {
        Self {
            title: title.into(),
            collapsed,
            rows,
        }
    }
}

/// A positioned element of the layout output.
#[derive(Debug, Clone, PartialEq)]
pub enum Placed<P> {
    Panel(P),
    Header(GroupHeader<P>),
}

impl<P: Geometry> Placed<P> {
    pub fn grid_pos(&self) -> GridPos {
        match self {
            Placed::Panel(panel) => panel.grid_pos(),
            Placed::Header(header) => header.grid_pos,
        }
    }

    pub fn as_panel(&self) -> Option<&P> {
        match self {
            Placed::Panel(panel) => Some(panel),
            Placed::Header(_) => None,
        }
    }

    pub fn as_header(&self) -> Option<&GroupHeader<P>> {
        match self {
            Placed::Panel(_) => None,
            Placed::Header(header) => Some(header),
        }
    }
}

/// Group header as emitted by the layout. `panels` only holds content for
/// collapsed groups.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupHeader<P> {
    pub title: String,
    pub collapsed: bool,
    pub grid_pos: GridPos,
    pub panels: Vec<Placed<P>>,
}

impl<P> GroupHeader<P> {
    pub fn at(title: String, collapsed: bool, y: u32) -> Self {
        Self {
            title,
            collapsed,
            grid_pos: GridPos::new(0, y, CANVAS_WIDTH, GROUP_HEADER_HEIGHT),
            panels: Vec::new(),
        }
    }
}
