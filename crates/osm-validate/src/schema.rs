//! Declared shape of the five output tables.

use serde::Serialize;
use std::fmt;

use osm_model::Table;

/// Value type a column must coerce to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Integer,
    Float,
    String,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::String => "string",
        }
    }

    /// True when `value` coerces to this type.
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            ColumnType::Integer => value.trim().parse::<i64>().is_ok(),
            ColumnType::Float => value.trim().parse::<f64>().is_ok_and(f64::is_finite),
            ColumnType::String => true,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnSchema {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    pub required: bool,
}

const fn required(name: &'static str, column_type: ColumnType) -> ColumnSchema {
    ColumnSchema {
        name,
        column_type,
        required: true,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableSchema {
    pub table: Table,
    pub columns: &'static [ColumnSchema],
}

impl TableSchema {
    pub fn column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|column| column.name == name)
    }
}

const NODE_COLUMNS: &[ColumnSchema] = &[
    required("id", ColumnType::Integer),
    required("lat", ColumnType::Float),
    required("lon", ColumnType::Float),
    required("user", ColumnType::String),
    required("uid", ColumnType::Integer),
    required("version", ColumnType::String),
    required("changeset", ColumnType::Integer),
    required("timestamp", ColumnType::String),
];

const TAG_COLUMNS: &[ColumnSchema] = &[
    required("id", ColumnType::Integer),
    required("key", ColumnType::String),
    required("value", ColumnType::String),
    required("type", ColumnType::String),
];

const WAY_COLUMNS: &[ColumnSchema] = &[
    required("id", ColumnType::Integer),
    required("user", ColumnType::String),
    required("uid", ColumnType::Integer),
    required("version", ColumnType::String),
    required("changeset", ColumnType::Integer),
    required("timestamp", ColumnType::String),
];

const WAY_NODE_COLUMNS: &[ColumnSchema] = &[
    required("id", ColumnType::Integer),
    required("node_id", ColumnType::Integer),
    required("position", ColumnType::Integer),
];

pub const NODES_SCHEMA: TableSchema = TableSchema {
    table: Table::Nodes,
    columns: NODE_COLUMNS,
};
pub const NODES_TAGS_SCHEMA: TableSchema = TableSchema {
    table: Table::NodesTags,
    columns: TAG_COLUMNS,
};
pub const WAYS_SCHEMA: TableSchema = TableSchema {
    table: Table::Ways,
    columns: WAY_COLUMNS,
};
pub const WAYS_NODES_SCHEMA: TableSchema = TableSchema {
    table: Table::WaysNodes,
    columns: WAY_NODE_COLUMNS,
};
pub const WAYS_TAGS_SCHEMA: TableSchema = TableSchema {
    table: Table::WaysTags,
    columns: TAG_COLUMNS,
};

pub fn schema_for(table: Table) -> &'static TableSchema {
    match table {
        Table::Nodes => &NODES_SCHEMA,
        Table::NodesTags => &NODES_TAGS_SCHEMA,
        Table::Ways => &WAYS_SCHEMA,
        Table::WaysNodes => &WAYS_NODES_SCHEMA,
        Table::WaysTags => &WAYS_TAGS_SCHEMA,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_columns_match_table_layout() {
        for table in Table::ALL {
            let names: Vec<&str> = schema_for(table).columns.iter().map(|c| c.name).collect();
            assert_eq!(names, table.columns(), "{table}");
        }
    }

    #[test]
    fn type_coercion() {
        assert!(ColumnType::Integer.accepts("42"));
        assert!(!ColumnType::Integer.accepts("4.2"));
        assert!(!ColumnType::Integer.accepts(""));
        assert!(ColumnType::Float.accepts("-73.97"));
        assert!(!ColumnType::Float.accepts("NaN"));
        assert!(ColumnType::String.accepts(""));
    }
}
