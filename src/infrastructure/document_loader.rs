// Panel document loading from JSON or TOML files
use crate::domain::document::PanelDocument;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON panel document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML panel document: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported panel document {path}, expected a .json or .toml file")]
    UnsupportedFormat { path: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Toml,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Result<Self, DocumentError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(DocumentFormat::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(DocumentFormat::Toml),
            _ => Err(DocumentError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

pub fn parse_document(source: &str, format: DocumentFormat) -> Result<PanelDocument, DocumentError> {
    match format {
        DocumentFormat::Json => Ok(serde_json::from_str(source)?),
        DocumentFormat::Toml => Ok(toml::from_str(source)?),
    }
}

pub async fn load_document(path: &Path) -> Result<PanelDocument, DocumentError> {
    let format = DocumentFormat::from_path(path)?;
    let source = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let document = parse_document(&source, format)?;
    tracing::debug!(
        "Loaded {} rows ({} panels) from {}",
        document.rows.len(),
        document.panel_count(),
        path.display()
    );
    Ok(document)
}
