// Infrastructure layer - Files, settings and JSON mapping
pub mod config;
pub mod document_loader;
pub mod file_sink;
pub mod panel_mapper;
