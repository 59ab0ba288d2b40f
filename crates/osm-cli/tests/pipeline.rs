//! End-to-end tests: extract in, CSV tables out, reconciliation back.

use std::fs;
use std::path::Path;

use osm_cli::pipeline::{ProcessOptions, process, reconcile, write_ledger_json};
use osm_model::{SourceKind, Table};
use osm_output::TableFileNames;

const EXTRACT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<osm version="0.6" generator="test">
  <node id="1" lat="40.78" lon="-73.97" user="mapper" uid="7" version="2" changeset="11" timestamp="2017-01-01T00:00:00Z">
    <tag k="addr:street" v="W 86th St"/>
    <tag k="addr:postcode" v="10025-1234"/>
    <tag k="phone" v="212.555.1234"/>
    <tag k="highway" v="crossing"/>
  </node>
  <node id="abc" lat="40.79" lon="-73.96" user="mapper" uid="7" version="1" changeset="11" timestamp="2017-01-01T00:00:00Z">
    <tag k="name" v="Nowhere"/>
  </node>
  <node id="3" lat="40.80" lon="-73.95" user="mapper" uid="7" version="1" changeset="11" timestamp="2017-01-01T00:00:00Z">
    <tag k="addr:postcode" v="1002"/>
    <tag k="email" v="JOHN@EXAMPLE.XYZ"/>
    <tag k="fixme?" v="check"/>
    <tag k="cityracks.type" v="rack"/>
  </node>
  <way id="10" user="mapper" uid="7" version="1" changeset="12" timestamp="2017-01-02T00:00:00Z">
    <nd ref="1"/>
    <nd ref="x"/>
    <nd ref="3"/>
    <tag k="addr:city" v="new york, ny"/>
  </way>
</osm>
"#;

fn write_extract(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("extract.osm");
    fs::write(&path, EXTRACT).expect("write extract");
    path
}

fn read_table(dir: &Path, table: Table) -> String {
    fs::read_to_string(dir.join(table.default_file_name())).expect("read table")
}

#[test]
fn process_writes_cleaned_tables() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_extract(dir.path());
    let out = dir.path().join("out");

    let result = process(&ProcessOptions::new(&input, &out)).expect("process");

    assert_eq!(result.rows.get(Table::Nodes), 2);
    assert_eq!(result.rows.get(Table::NodesTags), 3);
    assert_eq!(result.rows.get(Table::Ways), 1);
    assert_eq!(result.rows.get(Table::WaysNodes), 2);
    assert_eq!(result.rows.get(Table::WaysTags), 1);
    assert!(result.validated);
    assert_eq!(result.records_checked, 3);

    let nodes_tags = read_table(&out, Table::NodesTags);
    assert_eq!(
        nodes_tags.lines().collect::<Vec<_>>(),
        vec![
            "id,key,value,type",
            "1,street,West 86th Street,addr",
            "1,postcode,10025,addr",
            "1,phone,+1 212-555-1234,regular",
        ]
    );

    let ways_nodes = read_table(&out, Table::WaysNodes);
    assert_eq!(
        ways_nodes.lines().collect::<Vec<_>>(),
        vec!["id,node_id,position", "10,1,0", "10,3,1"]
    );

    let ways_tags = read_table(&out, Table::WaysTags);
    assert_eq!(ways_tags.lines().nth(1), Some("10,city,New York,addr"));
}

#[test]
fn process_fills_the_ledger() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_extract(dir.path());
    let result = process(&ProcessOptions::new(&input, dir.path().join("out"))).expect("process");

    let ledger = &result.ledger;
    let counts = ledger.counts();
    assert_eq!(counts.elements, 18);
    assert_eq!(counts.foreign_elements, 1);
    assert_eq!(counts.values_eliminated, 2);
    assert_eq!(counts.node.entities, 2);
    assert_eq!(counts.node.values_eliminated, 2);
    assert_eq!(counts.node.keys_eliminated, 1);
    assert_eq!(counts.node.tags_skipped, 2);
    assert_eq!(counts.way.entities, 1);
    assert_eq!(counts.way_nodes_kept, 2);
    assert_eq!(ledger.bad_entity_id_total(SourceKind::Node), 1);
    assert_eq!(ledger.bad_member_ref_total(), 1);
    assert_eq!(ledger.bad_keys().get("node key: fixme?"), Some(&1));
}

#[test]
fn dry_run_writes_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_extract(dir.path());
    let out = dir.path().join("out");
    let mut options = ProcessOptions::new(&input, &out);
    options.dry_run = true;

    let result = process(&options).expect("dry run");
    assert_eq!(result.rows.total(), 9);
    assert!(result.output_dir.is_none());
    assert!(!out.exists());
}

#[test]
fn schema_violation_aborts_the_run() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("bare.osm");
    fs::write(&input, r#"<osm><node id="1" lat="1.0" lon="2.0"/></osm>"#).expect("write");

    let err = process(&ProcessOptions::new(&input, dir.path().join("out")))
        .expect_err("user is missing");
    assert!(format!("{err:#}").contains("'user'"));

    let mut options = ProcessOptions::new(&input, dir.path().join("unchecked"));
    options.validate = false;
    let result = process(&options).expect("validation disabled");
    assert_eq!(result.rows.get(Table::Nodes), 1);
}

#[test]
fn missing_input_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = process(&ProcessOptions::new(
        dir.path().join("absent.osm"),
        dir.path().join("out"),
    ))
    .expect_err("input does not exist");
    assert!(format!("{err:#}").contains("absent.osm"));
}

#[test]
fn reconcile_attributes_differences_to_value_cleaning() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_extract(dir.path());
    let out = dir.path().join("out");
    process(&ProcessOptions::new(&input, &out)).expect("process");

    let result = reconcile(&input, &out, &TableFileNames::default()).expect("reconcile");
    let line = |table: Table| {
        *result
            .lines
            .iter()
            .find(|line| line.table == table)
            .expect("table line")
    };

    let nodes = line(Table::Nodes);
    assert_eq!((nodes.xml, nodes.eliminated, nodes.csv, nodes.difference), (3, 1, 2, 0));

    let nodes_tags = line(Table::NodesTags);
    assert_eq!(
        (nodes_tags.xml, nodes_tags.eliminated, nodes_tags.csv, nodes_tags.difference),
        (6, 1, 3, 2)
    );

    let ways_nodes = line(Table::WaysNodes);
    assert_eq!(
        (ways_nodes.xml, ways_nodes.eliminated, ways_nodes.csv, ways_nodes.difference),
        (3, 1, 2, 0)
    );

    assert_eq!(line(Table::WaysTags).difference, 0);
}

#[test]
fn ledger_json_is_written() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_extract(dir.path());
    let result = process(&ProcessOptions::new(&input, dir.path().join("out"))).expect("process");

    let path = dir.path().join("ledger.json");
    write_ledger_json(&result, &path).expect("write ledger");
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("parse");

    assert!(json["generated_at"].is_string());
    assert_eq!(json["ledger"]["counts"]["values_eliminated"], 2);
    assert_eq!(json["rows"]["rows"]["nodes_tags"], 3);
}
