pub mod entity;
pub mod field;
pub mod record;
pub mod table;

pub use entity::{AttributeTag, Child, Entity, MemberRef, SourceKind, parse_entity_id};
pub use field::FieldKind;
pub use record::{
    DEFAULT_TAG_TYPE, ElementRecord, EntityRow, NodeRecord, TagRecord, WayNodeRecord, WayRecord,
};
pub use table::{
    NODE_FIELDS, NODE_TAGS_FIELDS, Table, WAY_FIELDS, WAY_NODES_FIELDS, WAY_TAGS_FIELDS,
};
