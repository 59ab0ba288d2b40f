use serde::{Deserialize, Serialize};
use std::fmt;

/// Column order for the `nodes` table. Must match the SQL table schema.
pub const NODE_FIELDS: &[&str] = &[
    "id",
    "lat",
    "lon",
    "user",
    "uid",
    "version",
    "changeset",
    "timestamp",
];
pub const NODE_TAGS_FIELDS: &[&str] = &["id", "key", "value", "type"];
pub const WAY_FIELDS: &[&str] = &["id", "user", "uid", "version", "changeset", "timestamp"];
pub const WAY_TAGS_FIELDS: &[&str] = &["id", "key", "value", "type"];
pub const WAY_NODES_FIELDS: &[&str] = &["id", "node_id", "position"];

/// The five output row streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Nodes,
    NodesTags,
    Ways,
    WaysNodes,
    WaysTags,
}

impl Table {
    pub const ALL: [Table; 5] = [
        Table::Nodes,
        Table::NodesTags,
        Table::Ways,
        Table::WaysNodes,
        Table::WaysTags,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Nodes => "nodes",
            Table::NodesTags => "nodes_tags",
            Table::Ways => "ways",
            Table::WaysNodes => "ways_nodes",
            Table::WaysTags => "ways_tags",
        }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Table::Nodes => NODE_FIELDS,
            Table::NodesTags => NODE_TAGS_FIELDS,
            Table::Ways => WAY_FIELDS,
            Table::WaysNodes => WAY_NODES_FIELDS,
            Table::WaysTags => WAY_TAGS_FIELDS,
        }
    }

    pub fn default_file_name(&self) -> &'static str {
        match self {
            Table::Nodes => "nodes.csv",
            Table::NodesTags => "nodes_tags.csv",
            Table::Ways => "ways.csv",
            Table::WaysNodes => "ways_nodes.csv",
            Table::WaysTags => "ways_tags.csv",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
