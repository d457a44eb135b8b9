// Grid auto-layout for Grafana dashboard panels
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use application::layout::{auto_layout, LayoutEngine, LayoutError, OverflowPolicy};
pub use domain::panel::{Geometry, Group, GroupHeader, Panel, Placed, Row};
