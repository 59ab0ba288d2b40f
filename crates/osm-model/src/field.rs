use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic category of a tag key, selecting the normalizer that cleans its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    HouseNumber,
    Amenity,
    Name,
    Cuisine,
    Shop,
    Building,
    Street,
    State,
    City,
    PostCode,
    Phone,
    Email,
    Website,
    TigerReviewed,
    Inscription,
}

impl FieldKind {
    pub const ALL: [FieldKind; 15] = [
        FieldKind::HouseNumber,
        FieldKind::Amenity,
        FieldKind::Name,
        FieldKind::Cuisine,
        FieldKind::Shop,
        FieldKind::Building,
        FieldKind::Street,
        FieldKind::State,
        FieldKind::City,
        FieldKind::PostCode,
        FieldKind::Phone,
        FieldKind::Email,
        FieldKind::Website,
        FieldKind::TigerReviewed,
        FieldKind::Inscription,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::HouseNumber => "house number",
            FieldKind::Amenity => "amenity",
            FieldKind::Name => "name",
            FieldKind::Cuisine => "cuisine",
            FieldKind::Shop => "shop",
            FieldKind::Building => "building",
            FieldKind::Street => "street",
            FieldKind::State => "state",
            FieldKind::City => "city",
            FieldKind::PostCode => "postal code",
            FieldKind::Phone => "phone",
            FieldKind::Email => "email",
            FieldKind::Website => "website",
            FieldKind::TigerReviewed => "TIGER reviewed",
            FieldKind::Inscription => "inscription",
        }
    }

    /// Returns true for kinds cleaned by the generic character-class normalizer.
    pub fn is_basic(&self) -> bool {
        matches!(
            self,
            FieldKind::HouseNumber
                | FieldKind::Amenity
                | FieldKind::Name
                | FieldKind::Cuisine
                | FieldKind::Shop
                | FieldKind::Building
                | FieldKind::Inscription
        )
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
