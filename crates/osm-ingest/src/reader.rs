//! Streaming reader over an OSM XML document.
//!
//! The document is pulled one event at a time; only the node or way being
//! assembled is held in memory. Every closed element is counted, including
//! `<tag>` and `<nd>` children and everything outside nodes and ways.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quick_xml::Reader;
use quick_xml::encoding::Decoder;
use quick_xml::events::{BytesStart, Event};
use serde::Serialize;
use tracing::{debug, trace};

use osm_model::{AttributeTag, Child, Entity, MemberRef, SourceKind};

use crate::error::{IngestError, Result};

/// Element tallies gathered while reading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReadCounts {
    /// Every closed element.
    pub elements: u64,
    /// Closed elements outside any node or way that are not nodes or ways
    /// themselves (`osm`, `bounds`, relations and their members).
    pub foreign_elements: u64,
    /// Closed elements by element name.
    pub by_name: BTreeMap<String, u64>,
}

impl ReadCounts {
    fn record_close(&mut self, name: &[u8], inside_entity: bool) {
        self.elements += 1;
        *self
            .by_name
            .entry(String::from_utf8_lossy(name).into_owned())
            .or_default() += 1;
        if !inside_entity && SourceKind::from_element_name(name).is_none() {
            self.foreign_elements += 1;
        }
    }
}

/// Pull-based iterator of raw [`Entity`] values.
pub struct OsmReader<R> {
    reader: Reader<R>,
    buf: Vec<u8>,
    current: Option<Entity>,
    counts: ReadCounts,
    finished: bool,
}

impl OsmReader<BufReader<File>> {
    /// Opens an extract from disk.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                IngestError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                IngestError::FileRead {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        debug!(path = %path.display(), "opened OSM extract");
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> OsmReader<R> {
    pub fn new(inner: R) -> Self {
        let mut reader = Reader::from_reader(inner);
        reader.config_mut().trim_text(true);
        Self {
            reader,
            buf: Vec::new(),
            current: None,
            counts: ReadCounts::default(),
            finished: false,
        }
    }

    /// Tallies so far; complete once the iterator is exhausted.
    pub fn counts(&self) -> &ReadCounts {
        &self.counts
    }

    pub fn into_counts(self) -> ReadCounts {
        self.counts
    }

    fn next_entity(&mut self) -> Result<Option<Entity>> {
        loop {
            self.buf.clear();
            let position = self.reader.buffer_position();
            let decoder = self.reader.decoder();
            let event = self
                .reader
                .read_event_into(&mut self.buf)
                .map_err(|source| IngestError::Xml {
                    position: self.reader.error_position(),
                    source,
                })?;

            match event {
                Event::Start(e) => {
                    if let Some(entity) = self.current.as_mut() {
                        push_child(entity, &e, decoder, position)?;
                    } else if let Some(kind) = SourceKind::from_element_name(e.name().as_ref()) {
                        self.current = Some(start_entity(kind, &e, decoder, position)?);
                    }
                }
                Event::Empty(e) => {
                    let name = e.name();
                    if let Some(entity) = self.current.as_mut() {
                        self.counts.record_close(name.as_ref(), true);
                        push_child(entity, &e, decoder, position)?;
                    } else {
                        self.counts.record_close(name.as_ref(), false);
                        if let Some(kind) = SourceKind::from_element_name(name.as_ref()) {
                            return start_entity(kind, &e, decoder, position).map(Some);
                        }
                    }
                }
                Event::End(e) => {
                    let name = e.name();
                    let closes_current = self.current.as_ref().is_some_and(|entity| {
                        entity.kind.element_name().as_bytes() == name.as_ref()
                    });
                    self.counts
                        .record_close(name.as_ref(), self.current.is_some());
                    if closes_current {
                        return Ok(self.current.take());
                    }
                }
                Event::Eof => {
                    return match self.current.take() {
                        Some(entity) => Err(IngestError::UnexpectedEof {
                            element: entity.kind.element_name().to_string(),
                            id: entity.id,
                        }),
                        None => Ok(None),
                    };
                }
                _ => {}
            }
        }
    }
}

impl<R: BufRead> Iterator for OsmReader<R> {
    type Item = Result<Entity>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_entity() {
            Ok(Some(entity)) => Some(Ok(entity)),
            Ok(None) => {
                self.finished = true;
                debug!(
                    elements = self.counts.elements,
                    foreign_elements = self.counts.foreign_elements,
                    "finished reading OSM extract"
                );
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}

fn start_entity(
    kind: SourceKind,
    element: &BytesStart<'_>,
    decoder: Decoder,
    position: u64,
) -> Result<Entity> {
    let attributes = read_attributes(element, decoder, position)?;
    let id = attributes.get("id").cloned().unwrap_or_default();
    Ok(Entity {
        kind,
        id,
        attributes,
        children: Vec::new(),
    })
}

fn push_child(
    entity: &mut Entity,
    element: &BytesStart<'_>,
    decoder: Decoder,
    position: u64,
) -> Result<()> {
    match element.name().as_ref() {
        b"tag" => {
            let mut attributes = read_attributes(element, decoder, position)?;
            let key = take_attribute(&mut attributes, "tag", "k", position)?;
            let value = take_attribute(&mut attributes, "tag", "v", position)?;
            entity.children.push(Child::Tag(AttributeTag { key, value }));
        }
        b"nd" => {
            let mut attributes = read_attributes(element, decoder, position)?;
            let node_ref = take_attribute(&mut attributes, "nd", "ref", position)?;
            entity.children.push(Child::MemberRef(MemberRef { node_ref }));
        }
        other => {
            trace!(
                element = %String::from_utf8_lossy(other),
                id = %entity.id,
                "ignoring child element"
            );
        }
    }
    Ok(())
}

fn read_attributes(
    element: &BytesStart<'_>,
    decoder: Decoder,
    position: u64,
) -> Result<BTreeMap<String, String>> {
    let mut attributes = BTreeMap::new();
    for attribute in element.attributes() {
        let attribute = attribute.map_err(|source| IngestError::Xml {
            position,
            source: source.into(),
        })?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .decode_and_unescape_value(decoder)
            .map_err(|source| IngestError::Xml { position, source })?;
        attributes.insert(key, value.into_owned());
    }
    Ok(attributes)
}

fn take_attribute(
    attributes: &mut BTreeMap<String, String>,
    element: &str,
    attribute: &str,
    position: u64,
) -> Result<String> {
    attributes
        .remove(attribute)
        .ok_or_else(|| IngestError::MissingAttribute {
            element: element.to_string(),
            attribute: attribute.to_string(),
            position,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(xml: &str) -> (Vec<Entity>, ReadCounts) {
        let mut reader = OsmReader::new(xml.as_bytes());
        let entities = reader
            .by_ref()
            .collect::<Result<Vec<_>>>()
            .expect("well-formed document");
        (entities, reader.into_counts())
    }

    #[test]
    fn self_closing_node_is_an_entity() {
        let (entities, counts) = read(r#"<osm><node id="1" lat="40.1" lon="-73.9"/></osm>"#);
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].id, "1");
        assert_eq!(entities[0].attributes["lat"], "40.1");
        assert!(entities[0].children.is_empty());
        assert_eq!(counts.elements, 2);
        assert_eq!(counts.foreign_elements, 1);
    }

    #[test]
    fn escaped_attribute_values_are_decoded() {
        let (entities, _) = read(
            r#"<osm><node id="2"><tag k="name" v="Barnes &amp; Noble"/></node></osm>"#,
        );
        assert_eq!(
            entities[0].children,
            vec![Child::Tag(AttributeTag::new("name", "Barnes & Noble"))]
        );
    }

    #[test]
    fn missing_id_reads_as_empty() {
        let (entities, _) = read(r#"<osm><way user="x"></way></osm>"#);
        assert_eq!(entities[0].id, "");
        assert!(!entities[0].attributes.contains_key("id"));
    }
}
