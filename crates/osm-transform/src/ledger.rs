//! Audit ledger recording every correction and elimination of a run.
//!
//! The ledger is an explicit value owned by the caller and passed by `&mut`
//! to every normalizer and to the element transformer. It is reset at the
//! start of a run and only grows until the run is reported. All tables are
//! ordered maps so that two runs over the same input serialize identically.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::{debug, info};

use osm_model::SourceKind;

/// Fields with their own fix/issue tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditField {
    Street,
    City,
    State,
    PostCode,
    Phone,
    Email,
    Website,
    TigerReviewed,
    HouseNumber,
    Cuisine,
}

impl AuditField {
    pub const ALL: [AuditField; 10] = [
        AuditField::Street,
        AuditField::City,
        AuditField::State,
        AuditField::PostCode,
        AuditField::Phone,
        AuditField::Email,
        AuditField::Website,
        AuditField::TigerReviewed,
        AuditField::HouseNumber,
        AuditField::Cuisine,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AuditField::Street => "Street",
            AuditField::City => "City",
            AuditField::State => "State",
            AuditField::PostCode => "Zip code",
            AuditField::Phone => "Phone",
            AuditField::Email => "Email",
            AuditField::Website => "Website",
            AuditField::TigerReviewed => "TIGER reviewed",
            AuditField::HouseNumber => "House number",
            AuditField::Cuisine => "Cuisine",
        }
    }
}

impl fmt::Display for AuditField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fix and issue tables for one field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldAudit {
    /// original value -> corrected value -> occurrences
    pub fixes: BTreeMap<String, BTreeMap<String, u64>>,
    /// Accepted or rejected values outside the expected locality (city, state).
    pub outside: BTreeMap<String, u64>,
    /// value that triggered the rejection -> occurrences
    pub rejected: BTreeMap<String, u64>,
}

static EMPTY_AUDIT: FieldAudit = FieldAudit {
    fixes: BTreeMap::new(),
    outside: BTreeMap::new(),
    rejected: BTreeMap::new(),
};

impl FieldAudit {
    pub fn fixed_total(&self) -> u64 {
        self.fixes.values().flat_map(BTreeMap::values).sum()
    }

    pub fn rejected_total(&self) -> u64 {
        self.rejected.values().sum()
    }

    pub fn outside_total(&self) -> u64 {
        self.outside.values().sum()
    }

    fn merge(&mut self, other: FieldAudit) {
        for (original, corrections) in other.fixes {
            let entry = self.fixes.entry(original).or_default();
            for (corrected, count) in corrections {
                *entry.entry(corrected).or_default() += count;
            }
        }
        merge_counts(&mut self.outside, other.outside);
        merge_counts(&mut self.rejected, other.rejected);
    }
}

/// Per-source tag and entity tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SourceTally {
    /// Entities emitted as records.
    pub entities: u64,
    pub tags_kept: u64,
    pub values_eliminated: u64,
    pub keys_eliminated: u64,
    pub tags_skipped: u64,
}

impl SourceTally {
    fn merge(&mut self, other: SourceTally) {
        self.entities += other.entities;
        self.tags_kept += other.tags_kept;
        self.values_eliminated += other.values_eliminated;
        self.keys_eliminated += other.keys_eliminated;
        self.tags_skipped += other.tags_skipped;
    }
}

/// Global tallies for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunCounts {
    /// Every closed XML element seen by the reader.
    pub elements: u64,
    /// Top-level elements that are neither nodes nor ways.
    pub foreign_elements: u64,
    /// Values removed by any normalizer.
    pub values_eliminated: u64,
    pub way_nodes_kept: u64,
    pub node: SourceTally,
    pub way: SourceTally,
}

impl RunCounts {
    pub fn source(&self, kind: SourceKind) -> &SourceTally {
        match kind {
            SourceKind::Node => &self.node,
            SourceKind::Way => &self.way,
        }
    }

    fn source_mut(&mut self, kind: SourceKind) -> &mut SourceTally {
        match kind {
            SourceKind::Node => &mut self.node,
            SourceKind::Way => &mut self.way,
        }
    }

    /// Nodes and ways emitted as records.
    pub fn entities(&self) -> u64 {
        self.node.entities + self.way.entities
    }

    pub fn tags_skipped(&self) -> u64 {
        self.node.tags_skipped + self.way.tags_skipped
    }

    fn merge(&mut self, other: RunCounts) {
        self.elements += other.elements;
        self.foreign_elements += other.foreign_elements;
        self.values_eliminated += other.values_eliminated;
        self.way_nodes_kept += other.way_nodes_kept;
        self.node.merge(other.node);
        self.way.merge(other.way);
    }
}

/// The audit ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Ledger {
    counts: RunCounts,
    fields: BTreeMap<AuditField, FieldAudit>,
    /// Generic-value rejections grouped by tag key, in encounter order.
    other_values: BTreeMap<String, Vec<String>>,
    bad_keys: BTreeMap<String, u64>,
    bad_node_ids: BTreeMap<String, u64>,
    bad_way_ids: BTreeMap<String, u64>,
    bad_member_refs: BTreeMap<String, u64>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears every table and counter. Called once at run start.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn record_element(&mut self) {
        self.counts.elements += 1;
    }

    pub fn record_foreign_element(&mut self) {
        self.counts.foreign_elements += 1;
    }

    /// Adds element totals counted by the reader in one step.
    pub fn record_element_counts(&mut self, elements: u64, foreign_elements: u64) {
        self.counts.elements += elements;
        self.counts.foreign_elements += foreign_elements;
    }

    /// Records a correction. No-op rewrites are not recorded.
    pub fn record_fix(&mut self, field: AuditField, original: &str, corrected: &str) {
        if original == corrected {
            return;
        }
        debug!(field = %field, original, corrected, "value fixed");
        *self
            .fields
            .entry(field)
            .or_default()
            .fixes
            .entry(original.to_string())
            .or_default()
            .entry(corrected.to_string())
            .or_default() += 1;
    }

    pub fn record_rejection(&mut self, field: AuditField, value: &str, source: SourceKind) {
        info!(source = %source, field = %field, value, "value removed from dataset");
        *self
            .fields
            .entry(field)
            .or_default()
            .rejected
            .entry(value.to_string())
            .or_default() += 1;
        self.counts.values_eliminated += 1;
    }

    pub fn record_outside(&mut self, field: AuditField, value: &str) {
        debug!(field = %field, value, "value outside expected locality");
        *self
            .fields
            .entry(field)
            .or_default()
            .outside
            .entry(value.to_string())
            .or_default() += 1;
    }

    /// Records a generic-value rejection under its tag key.
    pub fn record_other_rejection(&mut self, key: &str, value: &str, source: SourceKind) {
        info!(source = %source, key, value, "value not allowed, removed from dataset");
        self.other_values
            .entry(key.to_string())
            .or_default()
            .push(value.to_string());
        self.counts.values_eliminated += 1;
    }

    pub fn record_bad_key(&mut self, source: SourceKind, key: &str) {
        info!(source = %source, key, "tag key has problem characters, tag removed");
        self.counts.source_mut(source).keys_eliminated += 1;
        *self
            .bad_keys
            .entry(format!("{} key: {key}", source.element_name()))
            .or_default() += 1;
    }

    pub fn record_bad_entity_id(&mut self, source: SourceKind, raw_id: &str) {
        info!(source = %source, id = raw_id, "ID is null or not a number, entity removed");
        let table = match source {
            SourceKind::Node => &mut self.bad_node_ids,
            SourceKind::Way => &mut self.bad_way_ids,
        };
        *table.entry(raw_id.to_string()).or_default() += 1;
    }

    pub fn record_bad_member_ref(&mut self, raw_ref: &str) {
        info!(node_ref = raw_ref, "way node reference is null or not a number, removed");
        *self.bad_member_refs.entry(raw_ref.to_string()).or_default() += 1;
    }

    pub fn record_tag_kept(&mut self, source: SourceKind) {
        self.counts.source_mut(source).tags_kept += 1;
    }

    pub fn record_tag_skipped(&mut self, source: SourceKind) {
        self.counts.source_mut(source).tags_skipped += 1;
    }

    pub fn record_tag_value_eliminated(&mut self, source: SourceKind) {
        self.counts.source_mut(source).values_eliminated += 1;
    }

    pub fn record_member_ref_kept(&mut self) {
        self.counts.way_nodes_kept += 1;
    }

    pub fn record_entity(&mut self, source: SourceKind) {
        self.counts.source_mut(source).entities += 1;
    }

    pub fn counts(&self) -> &RunCounts {
        &self.counts
    }

    pub fn field(&self, field: AuditField) -> &FieldAudit {
        self.fields.get(&field).unwrap_or(&EMPTY_AUDIT)
    }

    pub fn other_values(&self) -> &BTreeMap<String, Vec<String>> {
        &self.other_values
    }

    pub fn other_values_total(&self) -> usize {
        self.other_values.values().map(Vec::len).sum()
    }

    pub fn bad_keys(&self) -> &BTreeMap<String, u64> {
        &self.bad_keys
    }

    pub fn bad_entity_ids(&self, source: SourceKind) -> &BTreeMap<String, u64> {
        match source {
            SourceKind::Node => &self.bad_node_ids,
            SourceKind::Way => &self.bad_way_ids,
        }
    }

    pub fn bad_entity_id_total(&self, source: SourceKind) -> u64 {
        self.bad_entity_ids(source).values().sum()
    }

    pub fn bad_member_refs(&self) -> &BTreeMap<String, u64> {
        &self.bad_member_refs
    }

    pub fn bad_member_ref_total(&self) -> u64 {
        self.bad_member_refs.values().sum()
    }

    /// Folds another ledger into this one. Counts add exactly, so per-worker
    /// ledgers merged in input order reproduce the sequential result.
    pub fn merge(&mut self, other: Ledger) {
        self.counts.merge(other.counts);
        for (field, audit) in other.fields {
            self.fields.entry(field).or_default().merge(audit);
        }
        for (key, values) in other.other_values {
            self.other_values.entry(key).or_default().extend(values);
        }
        merge_counts(&mut self.bad_keys, other.bad_keys);
        merge_counts(&mut self.bad_node_ids, other.bad_node_ids);
        merge_counts(&mut self.bad_way_ids, other.bad_way_ids);
        merge_counts(&mut self.bad_member_refs, other.bad_member_refs);
    }
}

fn merge_counts(target: &mut BTreeMap<String, u64>, source: BTreeMap<String, u64>) {
    for (key, count) in source {
        *target.entry(key).or_default() += count;
    }
}

/// Entries ordered by descending count, ties broken by key.
pub fn by_descending_count(table: &BTreeMap<String, u64>) -> Vec<(&str, u64)> {
    let mut entries: Vec<(&str, u64)> = table
        .iter()
        .map(|(key, count)| (key.as_str(), *count))
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    entries
}
