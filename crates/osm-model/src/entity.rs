use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The kind of top-level element an entity was read from.
///
/// Point entities are `<node>` elements; path entities are `<way>` elements
/// that reference nodes through `<nd ref=".."/>` children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Node,
    Way,
}

impl SourceKind {
    /// Returns the XML element name for this kind.
    pub fn element_name(&self) -> &'static str {
        match self {
            SourceKind::Node => "node",
            SourceKind::Way => "way",
        }
    }

    /// Returns the capitalized label used in log lines and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Node => "Node",
            SourceKind::Way => "Way",
        }
    }

    /// Maps an XML element name to a source kind, if it is one.
    pub fn from_element_name(name: &[u8]) -> Option<Self> {
        match name {
            b"node" => Some(SourceKind::Node),
            b"way" => Some(SourceKind::Way),
            _ => None,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "node" => Ok(SourceKind::Node),
            "way" => Ok(SourceKind::Way),
            _ => Err(format!("Unknown source kind: {}", s)),
        }
    }
}

/// A raw `<tag k=".." v=".."/>` child.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeTag {
    pub key: String,
    pub value: String,
}

impl AttributeTag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A raw `<nd ref=".."/>` child of a way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRef {
    pub node_ref: String,
}

impl MemberRef {
    pub fn new(node_ref: impl Into<String>) -> Self {
        Self {
            node_ref: node_ref.into(),
        }
    }
}

/// One child of an entity, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Child {
    Tag(AttributeTag),
    MemberRef(MemberRef),
}

/// A node or way as produced by the streaming reader, before any cleaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub kind: SourceKind,
    /// Raw `id` attribute text; validated by the transformer.
    pub id: String,
    /// All attributes of the element, `id` included.
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<Child>,
}

impl Entity {
    pub fn new(kind: SourceKind, id: impl Into<String>) -> Self {
        let id = id.into();
        let mut attributes = BTreeMap::new();
        attributes.insert("id".to_string(), id.clone());
        Self {
            kind,
            id,
            attributes,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.children.push(Child::Tag(AttributeTag::new(key, value)));
        self
    }

    #[must_use]
    pub fn with_member_ref(mut self, node_ref: impl Into<String>) -> Self {
        self.children.push(Child::MemberRef(MemberRef::new(node_ref)));
        self
    }

    pub fn tags(&self) -> impl Iterator<Item = &AttributeTag> {
        self.children.iter().filter_map(|child| match child {
            Child::Tag(tag) => Some(tag),
            Child::MemberRef(_) => None,
        })
    }

    pub fn member_refs(&self) -> impl Iterator<Item = &MemberRef> {
        self.children.iter().filter_map(|child| match child {
            Child::MemberRef(member) => Some(member),
            Child::Tag(_) => None,
        })
    }
}

/// Parses an entity or member identifier.
///
/// The trimmed text must be a non-empty run of ASCII digits that fits in `u64`.
pub fn parse_entity_id(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}
