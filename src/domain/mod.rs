// Domain layer - Grid, panels and the panel document
pub mod document;
pub mod grid;
pub mod panel;
