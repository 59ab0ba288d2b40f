//! Output schema validation.
//!
//! Each cleaned record is checked against the declared shape of the table
//! rows it produces. A failure is a [`SchemaViolation`] carrying the field
//! name, the record and the schema, and aborts the run.

mod gate;
mod schema;

pub use gate::{SchemaGate, SchemaViolation, ViolationKind, validate_record};
pub use schema::{
    ColumnSchema, ColumnType, NODES_SCHEMA, NODES_TAGS_SCHEMA, TableSchema, WAYS_NODES_SCHEMA,
    WAYS_SCHEMA, WAYS_TAGS_SCHEMA, schema_for,
};
