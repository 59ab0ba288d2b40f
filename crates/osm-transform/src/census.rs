//! Raw-extract census used to reconcile the written tables.
//!
//! The census counts what the extract holds before any cleaning: entities,
//! member references and tags whose keys the classifier recognizes, plus the
//! pieces the transformer is certain to drop for structural reasons. The
//! difference between these counts and the written rows is what value-level
//! normalization removed.

use serde::Serialize;
use tracing::info;

use osm_model::{Entity, SourceKind, parse_entity_id};

use crate::classify::{Classification, classify_key, strip_vendor_prefix};

/// Census counts for one source kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct KindCensus {
    pub entities: u64,
    pub bad_ids: u64,
    /// Tags whose keys classify to a field kind.
    pub recognized_tags: u64,
    /// Recognized tags under entities with a bad id.
    pub recognized_tags_under_bad_id: u64,
    /// Structurally bad keys under entities with a good id, checked after the
    /// vendor prefix is removed.
    pub bad_keys: u64,
}

/// Census of a whole extract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct XmlCensus {
    pub node: KindCensus,
    pub way: KindCensus,
    pub member_refs: u64,
    /// Member references that are malformed or belong to a way with a bad id.
    pub bad_member_refs: u64,
}

impl XmlCensus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(&self, kind: SourceKind) -> &KindCensus {
        match kind {
            SourceKind::Node => &self.node,
            SourceKind::Way => &self.way,
        }
    }

    fn kind_mut(&mut self, kind: SourceKind) -> &mut KindCensus {
        match kind {
            SourceKind::Node => &mut self.node,
            SourceKind::Way => &mut self.way,
        }
    }

    /// Adds one raw entity to the census.
    pub fn observe(&mut self, entity: &Entity) {
        let bad_id = parse_entity_id(&entity.id).is_none();
        if bad_id {
            info!(source = %entity.kind, id = %entity.id, "census: ID is null or not a number");
        }

        let kind = self.kind_mut(entity.kind);
        kind.entities += 1;
        if bad_id {
            kind.bad_ids += 1;
        }

        for tag in entity.tags() {
            match classify_key(&strip_vendor_prefix(&tag.key)) {
                Classification::Field(_) => {
                    kind.recognized_tags += 1;
                    if bad_id {
                        kind.recognized_tags_under_bad_id += 1;
                    }
                }
                Classification::BadKey if !bad_id => kind.bad_keys += 1,
                _ => {}
            }
        }

        if entity.kind == SourceKind::Way {
            for member in entity.member_refs() {
                self.member_refs += 1;
                if bad_id || parse_entity_id(&member.node_ref).is_none() {
                    self.bad_member_refs += 1;
                }
            }
        }
    }
}
