//! Terminal reports: run summary, fixes and issues, reconciliation.

use std::collections::BTreeMap;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use osm_ingest::ReadCounts;
use osm_model::{FieldKind, SourceKind, Table as OutputTable};
use osm_transform::{
    AuditField, FIELD_TABLE, KindCensus, Ledger, SourceTally, XmlCensus, by_descending_count,
};

use crate::pipeline::{ProcessResult, ReconcileResult};

pub fn print_summary(result: &ProcessResult) {
    println!("Input: {}", result.input.display());
    match &result.output_dir {
        Some(dir) => println!("Output: {}", dir.display()),
        None => println!("Output: none (dry run)"),
    }
    println!("{}", summary_table(result));
    println!("{}", rows_table(result));
    println!("{}", elements_table(&result.read_counts));
}

/// Per-source tallies with a total column.
pub fn summary_table(result: &ProcessResult) -> Table {
    let ledger = &result.ledger;
    let counts = ledger.counts();
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Metric"),
        header_cell("Nodes"),
        header_cell("Ways"),
        header_cell("Total"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=3 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    let tally_rows: [(&str, fn(&SourceTally) -> u64); 5] = [
        ("Entities written", |tally| tally.entities),
        ("Tags kept", |tally| tally.tags_kept),
        ("Values eliminated", |tally| tally.values_eliminated),
        ("Bad keys", |tally| tally.keys_eliminated),
        ("Tags not cleaned", |tally| tally.tags_skipped),
    ];
    for (label, value) in tally_rows {
        let node = value(&counts.node);
        let way = value(&counts.way);
        table.add_row(vec![
            Cell::new(label),
            count_cell(node, None),
            count_cell(way, None),
            count_cell(node + way, None).add_attribute(Attribute::Bold),
        ]);
    }
    let bad_nodes = ledger.bad_entity_id_total(SourceKind::Node);
    let bad_ways = ledger.bad_entity_id_total(SourceKind::Way);
    table.add_row(vec![
        Cell::new("Bad ids"),
        count_cell(bad_nodes, Some(Color::Yellow)),
        count_cell(bad_ways, Some(Color::Yellow)),
        count_cell(bad_nodes + bad_ways, Some(Color::Yellow)).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Member refs kept"),
        dim_cell("-"),
        count_cell(counts.way_nodes_kept, None),
        count_cell(counts.way_nodes_kept, None).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Bad member refs"),
        dim_cell("-"),
        count_cell(ledger.bad_member_ref_total(), Some(Color::Yellow)),
        count_cell(ledger.bad_member_ref_total(), Some(Color::Yellow))
            .add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("XML elements processed"),
        dim_cell("-"),
        dim_cell("-"),
        count_cell(counts.elements, None).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Not a node or way"),
        dim_cell("-"),
        dim_cell("-"),
        count_cell(counts.foreign_elements, None).add_attribute(Attribute::Bold),
    ]);
    let validation = if result.validated {
        Cell::new(format!("passed ({} records)", result.records_checked)).fg(Color::Green)
    } else {
        dim_cell("disabled")
    };
    table.add_row(vec![
        Cell::new("Schema validation"),
        dim_cell("-"),
        dim_cell("-"),
        validation,
    ]);
    table
}

/// Rows per output table.
pub fn rows_table(result: &ProcessResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Table"), header_cell("Rows")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for output in OutputTable::ALL {
        table.add_row(vec![
            table_cell(output),
            Cell::new(result.rows.get(output)),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(result.rows.total()).add_attribute(Attribute::Bold),
    ]);
    table
}

/// Closed XML elements by element name.
pub fn elements_table(counts: &ReadCounts) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Element"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (name, count) in by_descending_count(&counts.by_name) {
        table.add_row(vec![Cell::new(name), Cell::new(count)]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(counts.elements).add_attribute(Attribute::Bold),
    ]);
    table
}

/// Prints the fix and issue tables of every field, then the problem lists.
pub fn print_details(ledger: &Ledger) {
    for field in AuditField::ALL {
        let audit = ledger.field(field);
        if !audit.fixes.is_empty() {
            println!();
            println!("{field} fixes ({}):", audit.fixed_total());
            println!("{}", fixes_table(&audit.fixes));
        }
        if !audit.outside.is_empty() {
            println!();
            println!("{field} outside the home area ({}):", audit.outside_total());
            println!("{}", count_table("Value", &audit.outside));
        }
        if !audit.rejected.is_empty() {
            println!();
            println!("{field} issues ({}):", audit.rejected_total());
            println!("{}", count_table("Value", &audit.rejected));
        }
    }
    if !ledger.other_values().is_empty() {
        println!();
        println!("Other value problems ({}):", ledger.other_values_total());
        println!("{}", other_values_table(ledger.other_values()));
    }
    let lists: [(&str, &str, &BTreeMap<String, u64>); 4] = [
        ("Bad keys", "Key", ledger.bad_keys()),
        ("Bad node ids", "Id", ledger.bad_entity_ids(SourceKind::Node)),
        ("Bad way ids", "Id", ledger.bad_entity_ids(SourceKind::Way)),
        ("Bad member refs", "Ref", ledger.bad_member_refs()),
    ];
    for (title, column, counts) in lists {
        if counts.is_empty() {
            continue;
        }
        println!();
        println!("{title} ({}):", counts.values().sum::<u64>());
        println!("{}", count_table(column, counts));
    }
}

/// `original => corrected : count`, most frequent first.
pub fn fixes_table(fixes: &BTreeMap<String, BTreeMap<String, u64>>) -> Table {
    let mut rows: Vec<(&str, &str, u64)> = fixes
        .iter()
        .flat_map(|(original, corrections)| {
            corrections
                .iter()
                .map(move |(corrected, count)| (original.as_str(), corrected.as_str(), *count))
        })
        .collect();
    rows.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.0.cmp(b.0)));

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Original"),
        header_cell("Corrected"),
        header_cell("Count"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for (original, corrected, count) in rows {
        table.add_row(vec![
            Cell::new(original),
            Cell::new(corrected).fg(Color::Green),
            Cell::new(count),
        ]);
    }
    table
}

/// Values with their counts, most frequent first.
pub fn count_table(column: &str, counts: &BTreeMap<String, u64>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell(column), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (value, count) in by_descending_count(counts) {
        table.add_row(vec![Cell::new(value), Cell::new(count)]);
    }
    table
}

fn other_values_table(values: &BTreeMap<String, Vec<String>>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Key"),
        header_cell("Count"),
        header_cell("Values"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (key, rejected) in values {
        table.add_row(vec![
            Cell::new(key),
            Cell::new(rejected.len()),
            Cell::new(rejected.join(", ")),
        ]);
    }
    table
}

pub fn print_reconcile(result: &ReconcileResult) {
    println!("{}", census_table(&result.census));
    println!("{}", reconcile_table(result));
}

/// Raw extract counts per source kind.
pub fn census_table(census: &XmlCensus) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Extract"),
        header_cell("Nodes"),
        header_cell("Ways"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=2 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    let rows: [(&str, fn(&KindCensus) -> u64); 5] = [
        ("Entities", |kind| kind.entities),
        ("Bad ids", |kind| kind.bad_ids),
        ("Recognized tags", |kind| kind.recognized_tags),
        ("Recognized tags under bad ids", |kind| kind.recognized_tags_under_bad_id),
        ("Bad keys", |kind| kind.bad_keys),
    ];
    for (label, value) in rows {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(value(&census.node)),
            Cell::new(value(&census.way)),
        ]);
    }
    table.add_row(vec![
        Cell::new("Member refs"),
        dim_cell("-"),
        Cell::new(census.member_refs),
    ]);
    table.add_row(vec![
        Cell::new("Bad member refs"),
        dim_cell("-"),
        count_cell(census.bad_member_refs, Some(Color::Yellow)),
    ]);
    table
}

pub fn reconcile_table(result: &ReconcileResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("XML"),
        header_cell("Structural"),
        header_cell("CSV rows"),
        header_cell("Value-level"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for line in &result.lines {
        let difference = if line.difference < 0 {
            Cell::new(line.difference)
                .fg(Color::Red)
                .add_attribute(Attribute::Bold)
        } else {
            count_cell(line.difference.unsigned_abs(), Some(Color::Yellow))
        };
        table.add_row(vec![
            table_cell(line.table),
            Cell::new(line.xml),
            count_cell(line.eliminated, Some(Color::Yellow)),
            Cell::new(line.csv),
            difference,
        ]);
    }
    table
}

pub fn print_fields() {
    println!("{}", fields_table());
}

pub fn fields_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Key"), header_cell("Field")]);
    apply_table_style(&mut table);
    for (key, kind) in FIELD_TABLE {
        table.add_row(vec![Cell::new(key), Cell::new(kind.as_str())]);
    }
    table.add_row(vec![
        dim_cell("*inscription*"),
        Cell::new(FieldKind::Inscription.as_str()),
    ]);
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn table_cell(table: OutputTable) -> Cell {
    Cell::new(table.as_str())
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: u64, highlight: Option<Color>) -> Cell {
    match highlight {
        Some(color) if count > 0 => Cell::new(count).fg(color).add_attribute(Attribute::Bold),
        _ if count == 0 => dim_cell(count),
        _ => Cell::new(count),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
