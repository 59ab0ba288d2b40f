//! Value correction engine for OpenStreetMap extracts.
//!
//! [`transform_entity`] turns one raw entity into its cleaned record, using
//! the tag classifier to pick a field normalizer for each tag and recording
//! every fix and elimination in an explicit [`Ledger`].

pub mod census;
pub mod classify;
pub mod element;
pub mod ledger;
pub mod normalization;

pub use census::{KindCensus, XmlCensus};
pub use classify::{
    Classification, FIELD_TABLE, VENDOR_PREFIX, classify_key, field_kind_for, is_valid_key,
    normalize_field, strip_vendor_prefix,
};
pub use element::{TransformOptions, transform_entity};
pub use ledger::{AuditField, FieldAudit, Ledger, RunCounts, SourceTally, by_descending_count};
pub use normalization::{Normalized, is_blank};
