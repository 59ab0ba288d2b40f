//! Per-record validation against the declared table schemas.

use thiserror::Error;
use tracing::debug;

use osm_model::{ElementRecord, EntityRow, Table, TagRecord, WayNodeRecord};

use crate::schema::{TableSchema, schema_for};

/// Why a field failed its column schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    MissingRequired,
    WrongType { expected: String, value: String },
    UnknownField,
}

impl std::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViolationKind::MissingRequired => write!(f, "required field is missing"),
            ViolationKind::WrongType { expected, value } => {
                write!(f, "value '{value}' is not of type {expected}")
            }
            ViolationKind::UnknownField => write!(f, "field is not in the schema"),
        }
    }
}

/// A record that does not fit its table schema. Fatal to a run.
#[derive(Debug, Clone, Error)]
#[error(
    "record for table '{table}' has an invalid field '{field}': {kind}\nrecord = {record}\nschema = {schema}"
)]
pub struct SchemaViolation {
    pub table: Table,
    pub field: String,
    pub kind: ViolationKind,
    /// The offending record as JSON.
    pub record: String,
    /// The table schema as JSON.
    pub schema: String,
}

/// Validation gate between the transformer and the sink.
///
/// When disabled every record passes; correction behavior is unaffected
/// either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaGate {
    enabled: bool,
    checked: u64,
}

impl SchemaGate {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            checked: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Records validated so far.
    pub fn checked(&self) -> u64 {
        self.checked
    }

    pub fn check(&mut self, record: &ElementRecord) -> Result<(), SchemaViolation> {
        if !self.enabled {
            return Ok(());
        }
        validate_record(record)?;
        self.checked += 1;
        Ok(())
    }
}

/// Validates every row a record contributes to the output tables.
pub fn validate_record(record: &ElementRecord) -> Result<(), SchemaViolation> {
    let (entity_table, tag_table) = match record {
        ElementRecord::Node(_) => (Table::Nodes, Table::NodesTags),
        ElementRecord::Way(_) => (Table::Ways, Table::WaysTags),
    };

    check_fields(record, schema_for(entity_table), &entity_fields(record.row()))?;
    for tag in record.tags() {
        check_fields(record, schema_for(tag_table), &tag_fields(tag))?;
    }
    for member in record.way_nodes() {
        check_fields(record, schema_for(Table::WaysNodes), &way_node_fields(member))?;
    }
    debug!(id = record.id(), kind = %record.kind(), "record validated");
    Ok(())
}

fn entity_fields(row: &EntityRow) -> Vec<(String, String)> {
    std::iter::once(("id".to_string(), row.id.to_string()))
        .chain(
            row.attributes
                .iter()
                .map(|(name, value)| (name.clone(), value.clone())),
        )
        .collect()
}

fn tag_fields(tag: &TagRecord) -> Vec<(String, String)> {
    vec![
        ("id".to_string(), tag.id.to_string()),
        ("key".to_string(), tag.key.clone()),
        ("value".to_string(), tag.value.clone()),
        ("type".to_string(), tag.tag_type.clone()),
    ]
}

fn way_node_fields(member: &WayNodeRecord) -> Vec<(String, String)> {
    vec![
        ("id".to_string(), member.id.to_string()),
        ("node_id".to_string(), member.node_id.to_string()),
        ("position".to_string(), member.position.to_string()),
    ]
}

fn check_fields(
    record: &ElementRecord,
    schema: &TableSchema,
    fields: &[(String, String)],
) -> Result<(), SchemaViolation> {
    for (name, value) in fields {
        let Some(column) = schema.column(name) else {
            return Err(violation(record, schema, name, ViolationKind::UnknownField));
        };
        if !column.column_type.accepts(value) {
            let kind = ViolationKind::WrongType {
                expected: column.column_type.to_string(),
                value: value.clone(),
            };
            return Err(violation(record, schema, name, kind));
        }
    }

    for column in schema.columns.iter().filter(|column| column.required) {
        if !fields.iter().any(|(name, _)| name == column.name) {
            return Err(violation(
                record,
                schema,
                column.name,
                ViolationKind::MissingRequired,
            ));
        }
    }
    Ok(())
}

fn violation(
    record: &ElementRecord,
    schema: &TableSchema,
    field: &str,
    kind: ViolationKind,
) -> SchemaViolation {
    SchemaViolation {
        table: schema.table,
        field: field.to_string(),
        kind,
        record: serde_json::to_string(record).unwrap_or_else(|_| format!("{record:?}")),
        schema: serde_json::to_string(schema).unwrap_or_else(|_| format!("{schema:?}")),
    }
}
