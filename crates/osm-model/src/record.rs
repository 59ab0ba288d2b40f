//! Cleaned output records, one shape per output table.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::entity::SourceKind;

/// Default `type` for tag keys without a colon.
pub const DEFAULT_TAG_TYPE: &str = "regular";

/// A surviving tag row (`nodes_tags` / `ways_tags`).
///
/// Field order matches the table column order so the record can be
/// serialized directly as a CSV row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRecord {
    pub id: u64,
    pub key: String,
    pub value: String,
    #[serde(rename = "type")]
    pub tag_type: String,
}

impl TagRecord {
    /// Builds a record by splitting `raw_key` on its first colon.
    ///
    /// `addr:street` becomes type `addr`, key `street`; `name` becomes
    /// type `default_type`, key `name`.
    pub fn from_key(id: u64, raw_key: &str, value: String, default_type: &str) -> Self {
        let (tag_type, key) = match raw_key.split_once(':') {
            Some((tag_type, key)) => (tag_type.to_string(), key.to_string()),
            None => (default_type.to_string(), raw_key.to_string()),
        };
        Self {
            id,
            key,
            value,
            tag_type,
        }
    }
}

/// A surviving member reference row (`ways_nodes`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WayNodeRecord {
    pub id: u64,
    pub node_id: u64,
    pub position: usize,
}

/// Entity-level attributes retained for the `nodes` / `ways` tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRow {
    pub id: u64,
    /// Retained attributes other than `id`.
    pub attributes: BTreeMap<String, String>,
}

impl EntityRow {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.attributes.get(column).map(String::as_str)
    }

    /// Row values in `columns` order; absent attributes become empty strings.
    pub fn values(&self, columns: &[&str]) -> Vec<String> {
        columns
            .iter()
            .map(|column| {
                if *column == "id" {
                    self.id.to_string()
                } else {
                    self.get(column).unwrap_or_default().to_string()
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub node: EntityRow,
    pub tags: Vec<TagRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WayRecord {
    pub way: EntityRow,
    pub nodes: Vec<WayNodeRecord>,
    pub tags: Vec<TagRecord>,
}

/// The cleaned form of one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementRecord {
    Node(NodeRecord),
    Way(WayRecord),
}

impl ElementRecord {
    pub fn kind(&self) -> SourceKind {
        match self {
            ElementRecord::Node(_) => SourceKind::Node,
            ElementRecord::Way(_) => SourceKind::Way,
        }
    }

    pub fn id(&self) -> u64 {
        self.row().id
    }

    pub fn row(&self) -> &EntityRow {
        match self {
            ElementRecord::Node(record) => &record.node,
            ElementRecord::Way(record) => &record.way,
        }
    }

    pub fn tags(&self) -> &[TagRecord] {
        match self {
            ElementRecord::Node(record) => &record.tags,
            ElementRecord::Way(record) => &record.tags,
        }
    }

    /// Member references; always empty for nodes.
    pub fn way_nodes(&self) -> &[WayNodeRecord] {
        match self {
            ElementRecord::Node(_) => &[],
            ElementRecord::Way(record) => &record.nodes,
        }
    }
}
