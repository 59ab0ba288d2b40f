//! Integration tests for the element transformer.

use osm_model::{ElementRecord, Entity, SourceKind, TagRecord};
use osm_transform::{AuditField, Ledger, TransformOptions, transform_entity};

fn transform(entity: &Entity) -> (Option<ElementRecord>, Ledger) {
    let mut ledger = Ledger::new();
    let record = transform_entity(entity, &mut ledger, &TransformOptions::default());
    (record, ledger)
}

#[test]
fn node_keeps_schema_attributes_and_clean_tags() {
    let node = Entity::new(SourceKind::Node, "42")
        .with_attribute("lat", "40.7851")
        .with_attribute("lon", "-73.9683")
        .with_attribute("user", "mapper")
        .with_attribute("visible", "true")
        .with_tag("addr:street", "W 86th St")
        .with_tag("addr:postcode", "10024-1234")
        .with_tag("highway", "traffic_signals")
        .with_tag("name", "Zabar's");

    let (record, ledger) = transform(&node);
    let Some(ElementRecord::Node(record)) = record else {
        panic!("expected node record");
    };

    assert_eq!(record.node.id, 42);
    assert_eq!(record.node.get("lat"), Some("40.7851"));
    assert_eq!(record.node.get("visible"), None);
    assert_eq!(
        record.tags,
        vec![
            TagRecord {
                id: 42,
                key: "street".to_string(),
                value: "West 86th Street".to_string(),
                tag_type: "addr".to_string(),
            },
            TagRecord {
                id: 42,
                key: "postcode".to_string(),
                value: "10024".to_string(),
                tag_type: "addr".to_string(),
            },
            TagRecord {
                id: 42,
                key: "name".to_string(),
                value: "Zabar's".to_string(),
                tag_type: "regular".to_string(),
            },
        ]
    );

    let counts = ledger.counts();
    assert_eq!(counts.node.entities, 1);
    assert_eq!(counts.node.tags_kept, 3);
    assert_eq!(counts.node.tags_skipped, 1);
    assert_eq!(counts.node.values_eliminated, 0);
}

#[test]
fn non_numeric_id_drops_entity() {
    let node = Entity::new(SourceKind::Node, "abc").with_tag("name", "Zabar's");
    let (record, ledger) = transform(&node);

    assert!(record.is_none());
    assert_eq!(ledger.bad_entity_ids(SourceKind::Node)["abc"], 1);
    assert_eq!(ledger.counts().node.entities, 0);
    assert_eq!(ledger.counts().node.tags_kept, 0);
}

#[test]
fn way_positions_skip_bad_member_refs() {
    let way = Entity::new(SourceKind::Way, "7")
        .with_attribute("user", "mapper")
        .with_member_ref("100")
        .with_tag("name", "Broadway")
        .with_member_ref("x1")
        .with_member_ref(" 101 ")
        .with_member_ref("")
        .with_member_ref("102");

    let (record, ledger) = transform(&way);
    let Some(ElementRecord::Way(record)) = record else {
        panic!("expected way record");
    };

    let nodes: Vec<(u64, usize)> = record
        .nodes
        .iter()
        .map(|member| (member.node_id, member.position))
        .collect();
    assert_eq!(nodes, vec![(100, 0), (101, 1), (102, 2)]);
    assert!(record.nodes.iter().all(|member| member.id == 7));
    assert_eq!(record.tags.len(), 1);
    assert_eq!(ledger.bad_member_ref_total(), 2);
    assert_eq!(ledger.counts().way_nodes_kept, 3);
}

#[test]
fn vendor_prefixed_key_is_unrecognized_not_bad() {
    let node = Entity::new(SourceKind::Node, "1").with_tag("cityracks.type", "large");
    let (record, ledger) = transform(&node);

    assert!(record.is_some_and(|record| record.tags().is_empty()));
    assert!(ledger.bad_keys().is_empty());
    assert_eq!(ledger.counts().node.tags_skipped, 1);
}

#[test]
fn vendor_prefix_is_stripped_on_ways_too() {
    let way = Entity::new(SourceKind::Way, "3").with_tag("cityracks.name", "Rack 12");
    let (record, _) = transform(&way);
    let record = record.expect("way kept");
    assert_eq!(record.tags()[0].key, "name");
    assert_eq!(record.tags()[0].value, "Rack 12");
}

#[test]
fn bad_key_is_dropped_and_labelled() {
    let way = Entity::new(SourceKind::Way, "9")
        .with_tag("name_0", "x")
        .with_tag("fixme?", "check");
    let (record, ledger) = transform(&way);

    assert!(record.is_some_and(|record| record.tags().is_empty()));
    assert_eq!(ledger.bad_keys()["way key: name_0"], 1);
    assert_eq!(ledger.bad_keys()["way key: fixme?"], 1);
    assert_eq!(ledger.counts().way.keys_eliminated, 2);
}

#[test]
fn rejected_value_drops_only_that_tag() {
    let node = Entity::new(SourceKind::Node, "5")
        .with_tag("phone", "5551234")
        .with_tag("email", "JOHN@EXAMPLE.XYZ")
        .with_tag("amenity", "cafe");
    let (record, ledger) = transform(&node);

    let record = record.expect("node kept");
    assert_eq!(record.tags().len(), 1);
    assert_eq!(record.tags()[0].key, "amenity");
    assert_eq!(ledger.counts().node.values_eliminated, 2);
    assert_eq!(ledger.counts().values_eliminated, 2);
    assert_eq!(ledger.field(AuditField::Phone).rejected["5551234"], 1);
    assert_eq!(ledger.field(AuditField::Email).rejected["john@example.xyz"], 1);
}

#[test]
fn member_refs_on_nodes_are_ignored() {
    let node = Entity::new(SourceKind::Node, "8").with_member_ref("1");
    let (record, ledger) = transform(&node);
    assert!(record.is_some_and(|record| record.way_nodes().is_empty()));
    assert_eq!(ledger.counts().way_nodes_kept, 0);
    assert!(ledger.bad_member_refs().is_empty());
}

#[test]
fn custom_options_change_tag_type_and_fields() {
    let options = TransformOptions::default()
        .with_default_tag_type("plain")
        .with_node_fields(["id", "user"]);
    let node = Entity::new(SourceKind::Node, "11")
        .with_attribute("lat", "40.0")
        .with_attribute("user", "mapper")
        .with_tag("shop", "deli");

    let mut ledger = Ledger::new();
    let record = transform_entity(&node, &mut ledger, &options).expect("node kept");
    assert_eq!(record.row().get("lat"), None);
    assert_eq!(record.row().get("user"), Some("mapper"));
    assert_eq!(record.tags()[0].tag_type, "plain");
}
