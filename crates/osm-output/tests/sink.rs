//! Tests for the CSV and dry-run sinks.

use std::collections::BTreeMap;

use osm_model::{ElementRecord, EntityRow, NodeRecord, Table, TagRecord, WayNodeRecord, WayRecord};
use osm_output::{
    CsvSink, DryRunSink, OutputError, RecordSink, TableFileNames, count_csv_rows,
    table_row_counts,
};

fn attributes(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

fn sample_node() -> ElementRecord {
    ElementRecord::Node(NodeRecord {
        node: EntityRow {
            id: 42,
            attributes: attributes(&[
                ("lat", "40.7"),
                ("lon", "-73.9"),
                ("user", "mapper"),
                ("uid", "7"),
                ("version", "3"),
                ("changeset", "11"),
                ("timestamp", "2017-01-01T00:00:00Z"),
            ]),
        },
        tags: vec![
            TagRecord::from_key(42, "addr:street", "Main Street".to_string(), "regular"),
            TagRecord::from_key(42, "name", "Joe's Pizza, Deli".to_string(), "regular"),
        ],
    })
}

fn sample_way() -> ElementRecord {
    ElementRecord::Way(WayRecord {
        way: EntityRow {
            id: 9,
            attributes: attributes(&[
                ("user", "mapper"),
                ("uid", "7"),
                ("version", "1"),
                ("changeset", "12"),
                ("timestamp", "2017-01-02T00:00:00Z"),
            ]),
        },
        nodes: vec![
            WayNodeRecord {
                id: 9,
                node_id: 42,
                position: 0,
            },
            WayNodeRecord {
                id: 9,
                node_id: 43,
                position: 1,
            },
        ],
        tags: vec![TagRecord::from_key(9, "highway", "residential".to_string(), "regular")],
    })
}

fn render(tables: Vec<(Table, Vec<u8>)>) -> String {
    let mut out = String::new();
    for (table, bytes) in tables {
        out.push_str(&format!("== {table}\n"));
        out.push_str(&String::from_utf8(bytes).expect("utf-8 output"));
    }
    out
}

#[test]
fn csv_sink_writes_all_tables() {
    let mut sink = CsvSink::with_writers(|_| Ok(Vec::new())).expect("sink");
    sink.write_record(&sample_node()).expect("write node");
    sink.write_record(&sample_way()).expect("write way");

    let counts = sink.row_counts().clone();
    assert_eq!(counts.get(Table::Nodes), 1);
    assert_eq!(counts.get(Table::NodesTags), 2);
    assert_eq!(counts.get(Table::Ways), 1);
    assert_eq!(counts.get(Table::WaysNodes), 2);
    assert_eq!(counts.get(Table::WaysTags), 1);

    let output = render(sink.finish().expect("finish"));
    insta::assert_snapshot!(output.trim_end(), @r#"
    == nodes
    id,lat,lon,user,uid,version,changeset,timestamp
    42,40.7,-73.9,mapper,7,3,11,2017-01-01T00:00:00Z
    == nodes_tags
    id,key,value,type
    42,street,Main Street,addr
    42,name,"Joe's Pizza, Deli",regular
    == ways
    id,user,uid,version,changeset,timestamp
    9,mapper,7,1,12,2017-01-02T00:00:00Z
    == ways_nodes
    id,node_id,position
    9,42,0
    9,43,1
    == ways_tags
    id,key,value,type
    9,highway,residential,regular
    "#);
}

#[test]
fn missing_attributes_become_empty_cells() {
    let record = ElementRecord::Node(NodeRecord {
        node: EntityRow {
            id: 1,
            attributes: attributes(&[("lat", "1.0"), ("lon", "2.0")]),
        },
        tags: vec![],
    });
    let mut sink = CsvSink::with_writers(|_| Ok(Vec::new())).expect("sink");
    sink.write_record(&record).expect("write");
    let tables = sink.finish().expect("finish");
    let (_, nodes) = tables
        .into_iter()
        .find(|(table, _)| *table == Table::Nodes)
        .expect("nodes table");
    let text = String::from_utf8(nodes).expect("utf-8");
    assert_eq!(text.lines().nth(1), Some("1,1.0,2.0,,,,,"));
}

#[test]
fn dry_run_counts_without_writing() {
    let mut sink = DryRunSink::new();
    sink.write_record(&sample_node()).expect("node");
    sink.write_record(&sample_way()).expect("way");
    assert_eq!(sink.row_counts().total(), 7);
}

#[test]
fn written_files_can_be_counted_back() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("tables");
    let names = TableFileNames::default();

    let mut sink = CsvSink::create(&out, &names).expect("create sink");
    sink.write_record(&sample_node()).expect("node");
    sink.write_record(&sample_way()).expect("way");
    let written = sink.row_counts().clone();
    sink.finish().expect("finish");

    let counted = table_row_counts(&out, &names).expect("count rows");
    assert_eq!(counted, written);
    assert_eq!(
        count_csv_rows(&out.join("nodes_tags.csv")).expect("nodes_tags"),
        2
    );
}

#[test]
fn counting_a_missing_file_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = count_csv_rows(&dir.path().join("absent.csv")).expect_err("missing");
    assert!(matches!(err, OutputError::FileNotFound { .. }));
}
