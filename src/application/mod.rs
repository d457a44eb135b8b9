// Application layer - Layout engine and use cases
pub mod decorate;
pub mod layout;
pub mod layout_service;
pub mod panel_sink;
