//! End-of-run summary tables.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

use atlas_clean::CleanResult;
use atlas_render::RenderResult;
use atlas_topo::SimplifyResult;

pub fn print_clean_summary(result: &CleanResult) {
    println!("GeoJSON: {}", result.geojson_path.display());
    println!("CSV: {}", result.csv_path.display());

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stage"),
        header_cell("Records"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Input boundaries"), Cell::new(result.input_records)]);
    table.add_row(vec![
        Cell::new("Disputed territories"),
        Cell::new(result.disputed_records),
    ]);
    table.add_row(vec![
        Cell::new("Output").add_attribute(Attribute::Bold),
        Cell::new(result.output_records).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    let audit = &result.rule_audit;
    if !audit.applied.is_empty() {
        let mut rules = Table::new();
        rules.set_header(vec![header_cell("Rule"), header_cell("Hits")]);
        apply_table_style(&mut rules);
        align_column(&mut rules, 1, CellAlignment::Right);
        for (rule, hits) in &audit.applied {
            rules.add_row(vec![Cell::new(rule), Cell::new(hits)]);
        }
        println!();
        println!("Corrections:");
        println!("{rules}");
    }
    if !audit.missed.is_empty() {
        eprintln!("Rules without a match:");
        for rule in &audit.missed {
            eprintln!("- {rule}");
        }
    }
}

pub fn print_simplify_summary(result: &SimplifyResult) {
    println!("Full topology: {}", result.full_topology_path.display());
    println!("Arcs: {}", result.arc_count);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Tier"),
        header_cell("Points before"),
        header_cell("Points after"),
        header_cell("Kept"),
        header_cell("Relaxed"),
        header_cell("Fallbacks"),
        header_cell("TopoJSON"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for outcome in &result.tiers {
        let stats = outcome.stats;
        let kept = if stats.points_before > 0 {
            format!(
                "{:.1}%",
                100.0 * stats.points_after as f64 / stats.points_before as f64
            )
        } else {
            "-".to_string()
        };
        table.add_row(vec![
            Cell::new(outcome.tier.label())
                .fg(comfy_table::Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(stats.points_before),
            Cell::new(stats.points_after),
            Cell::new(kept),
            count_cell(stats.relaxed_arcs),
            count_cell(stats.fallback_rings),
            Cell::new(outcome.topojson_path.display()),
        ]);
    }
    println!("{table}");
}

pub fn print_render_summary(result: &RenderResult) {
    println!("SVG: {}", result.svg_path.display());

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Territories"),
        header_cell("Scored"),
        header_cell("Missing"),
    ]);
    apply_table_style(&mut table);
    for index in 0..3 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(result.records),
        Cell::new(result.matched),
        count_cell(result.missing),
    ]);
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
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
        .fg(comfy_table::Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(value: usize) -> Cell {
    if value > 0 {
        Cell::new(value)
            .fg(comfy_table::Color::Yellow)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new(value).fg(comfy_table::Color::DarkGrey)
    }
}
