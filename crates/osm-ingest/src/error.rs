//! Error types for OSM extract ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort reading an extract.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input extract not found.
    #[error("OSM file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to open or read the extract.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === XML Errors ===
    /// The document is not well-formed XML.
    #[error("malformed XML at byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    /// A child element lacks an attribute it cannot be read without.
    #[error("<{element}> at byte {position} has no '{attribute}' attribute")]
    MissingAttribute {
        element: String,
        attribute: String,
        position: u64,
    },

    /// The document ended inside a node or way.
    #[error("document ended inside <{element} id=\"{id}\">")]
    UnexpectedEof { element: String, id: String },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/data/upper_west_side.osm"),
        };
        assert_eq!(err.to_string(), "OSM file not found: /data/upper_west_side.osm");

        let err = IngestError::MissingAttribute {
            element: "nd".to_string(),
            attribute: "ref".to_string(),
            position: 120,
        };
        assert_eq!(err.to_string(), "<nd> at byte 120 has no 'ref' attribute");
    }
}
