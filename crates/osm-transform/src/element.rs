//! Entity to record transformation.
//!
//! One entity in, at most one cleaned record out. Every tag goes through the
//! vendor-prefix strip, the structural key check, classification and the
//! matching normalizer; every member reference goes through the id check.
//! Dropped pieces are tallied in the ledger and never abort the entity.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use osm_model::{
    Child, DEFAULT_TAG_TYPE, ElementRecord, Entity, EntityRow, NODE_FIELDS, NodeRecord,
    SourceKind, TagRecord, WAY_FIELDS, WayNodeRecord, WayRecord, parse_entity_id,
};

use crate::classify::{Classification, classify_key, normalize_field, strip_vendor_prefix};
use crate::ledger::Ledger;
use crate::normalization::Normalized;

/// Options for [`transform_entity`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformOptions {
    /// `type` given to tags whose key has no colon.
    pub default_tag_type: String,
    /// Node attributes retained in the `nodes` row.
    pub node_fields: Vec<String>,
    /// Way attributes retained in the `ways` row.
    pub way_fields: Vec<String>,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            default_tag_type: DEFAULT_TAG_TYPE.to_string(),
            node_fields: NODE_FIELDS.iter().map(|field| field.to_string()).collect(),
            way_fields: WAY_FIELDS.iter().map(|field| field.to_string()).collect(),
        }
    }
}

impl TransformOptions {
    #[must_use]
    pub fn with_default_tag_type(mut self, tag_type: impl Into<String>) -> Self {
        self.default_tag_type = tag_type.into();
        self
    }

    #[must_use]
    pub fn with_node_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.node_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_way_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.way_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    fn fields_for(&self, kind: SourceKind) -> &[String] {
        match kind {
            SourceKind::Node => &self.node_fields,
            SourceKind::Way => &self.way_fields,
        }
    }
}

/// Transforms one entity into its cleaned record.
///
/// Returns `None` when the entity id is not a valid non-negative integer.
pub fn transform_entity(
    entity: &Entity,
    ledger: &mut Ledger,
    options: &TransformOptions,
) -> Option<ElementRecord> {
    let source = entity.kind;
    let Some(id) = parse_entity_id(&entity.id) else {
        ledger.record_bad_entity_id(source, &entity.id);
        return None;
    };

    let fields = options.fields_for(source);
    let attributes = entity
        .attributes
        .iter()
        .filter(|(name, _)| name.as_str() != "id" && fields.iter().any(|field| field == *name))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();
    let row = EntityRow { id, attributes };

    let mut tags = Vec::new();
    let mut way_nodes = Vec::new();

    for child in &entity.children {
        match child {
            Child::Tag(tag) => {
                let record = transform_tag(id, &tag.key, &tag.value, source, ledger, options);
                if let Some(record) = record {
                    tags.push(record);
                }
            }
            Child::MemberRef(member) => {
                if source == SourceKind::Node {
                    debug!(id, node_ref = %member.node_ref, "member reference on a node ignored");
                    continue;
                }
                let Some(node_id) = parse_entity_id(&member.node_ref) else {
                    ledger.record_bad_member_ref(&member.node_ref);
                    continue;
                };
                way_nodes.push(WayNodeRecord {
                    id,
                    node_id,
                    position: way_nodes.len(),
                });
                ledger.record_member_ref_kept();
            }
        }
    }

    ledger.record_entity(source);
    trace!(%source, id, tags = tags.len(), way_nodes = way_nodes.len(), "entity transformed");

    Some(match source {
        SourceKind::Node => ElementRecord::Node(NodeRecord { node: row, tags }),
        SourceKind::Way => ElementRecord::Way(WayRecord {
            way: row,
            nodes: way_nodes,
            tags,
        }),
    })
}

/// Cleans one tag, or returns `None` when it is skipped or dropped.
fn transform_tag(
    id: u64,
    raw_key: &str,
    raw_value: &str,
    source: SourceKind,
    ledger: &mut Ledger,
    options: &TransformOptions,
) -> Option<TagRecord> {
    let key = strip_vendor_prefix(raw_key);
    let kind = match classify_key(&key) {
        Classification::Field(kind) => kind,
        Classification::Unrecognized => {
            ledger.record_tag_skipped(source);
            return None;
        }
        Classification::BadKey => {
            ledger.record_bad_key(source, &key);
            return None;
        }
    };

    match normalize_field(kind, &key, raw_value, source, ledger) {
        Normalized::Accepted(value) => {
            ledger.record_tag_kept(source);
            Some(TagRecord::from_key(
                id,
                &key,
                value,
                &options.default_tag_type,
            ))
        }
        Normalized::Rejected => {
            ledger.record_tag_value_eliminated(source);
            None
        }
    }
}
