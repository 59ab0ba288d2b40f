//! OpenStreetMap extract ingestion.
//!
//! [`OsmReader`] streams `<node>` and `<way>` elements out of an OSM XML
//! document as raw [`osm_model::Entity`] values, keeping their `<tag>` and
//! `<nd>` children in document order and counting every closed element.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use osm_ingest::OsmReader;
//!
//! let mut reader = OsmReader::open(Path::new("upper_west_side.osm"))?;
//! for entity in reader.by_ref() {
//!     let entity = entity?;
//!     println!("{} {}", entity.kind, entity.id);
//! }
//! println!("{} elements", reader.counts().elements);
//! ```

mod error;
mod reader;

// === Error Types ===
pub use error::{IngestError, Result};

// === XML Reading ===
pub use reader::{OsmReader, ReadCounts};
