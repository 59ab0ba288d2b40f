//! Output-related types.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use osm_model::{ElementRecord, Table};

/// File name of each output table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableFileNames {
    pub nodes: String,
    pub nodes_tags: String,
    pub ways: String,
    pub ways_nodes: String,
    pub ways_tags: String,
}

impl Default for TableFileNames {
    fn default() -> Self {
        Self {
            nodes: Table::Nodes.default_file_name().to_string(),
            nodes_tags: Table::NodesTags.default_file_name().to_string(),
            ways: Table::Ways.default_file_name().to_string(),
            ways_nodes: Table::WaysNodes.default_file_name().to_string(),
            ways_tags: Table::WaysTags.default_file_name().to_string(),
        }
    }
}

impl TableFileNames {
    pub fn get(&self, table: Table) -> &str {
        match table {
            Table::Nodes => &self.nodes,
            Table::NodesTags => &self.nodes_tags,
            Table::Ways => &self.ways,
            Table::WaysNodes => &self.ways_nodes,
            Table::WaysTags => &self.ways_tags,
        }
    }

    pub fn path_in(&self, dir: &Path, table: Table) -> PathBuf {
        dir.join(self.get(table))
    }
}

/// Data rows per table, header excluded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RowCounts {
    rows: BTreeMap<Table, u64>,
}

impl RowCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, table: Table) -> u64 {
        self.rows.get(&table).copied().unwrap_or(0)
    }

    pub fn set(&mut self, table: Table, rows: u64) {
        self.rows.insert(table, rows);
    }

    /// Adds the rows one record contributes.
    pub fn add_record(&mut self, record: &ElementRecord) {
        let (entity_table, tag_table) = match record {
            ElementRecord::Node(_) => (Table::Nodes, Table::NodesTags),
            ElementRecord::Way(_) => (Table::Ways, Table::WaysTags),
        };
        *self.rows.entry(entity_table).or_default() += 1;
        *self.rows.entry(tag_table).or_default() += record.tags().len() as u64;
        if !record.way_nodes().is_empty() {
            *self.rows.entry(Table::WaysNodes).or_default() += record.way_nodes().len() as u64;
        }
    }

    pub fn total(&self) -> u64 {
        self.rows.values().sum()
    }
}
