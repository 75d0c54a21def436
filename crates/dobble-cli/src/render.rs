//! Terminal output: validation summary and deck table.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use dobble_model::{Deck, ValidationResult};

pub fn print_validation(result: &ValidationResult) {
    println!("{}", validation_table(result));
}

pub fn print_deck(deck: &Deck) {
    println!("{}", deck_table(deck));
}

pub fn validation_table(result: &ValidationResult) -> Table {
    let mut table = Table::new();
    apply_table_style(&mut table);
    let status = if result.valid {
        Cell::new("valid").fg(Color::Green).add_attribute(Attribute::Bold)
    } else {
        Cell::new("invalid").fg(Color::Red).add_attribute(Attribute::Bold)
    };
    table.add_row(vec![header_cell("Status"), status]);
    table.add_row(vec![header_cell("Order (n)"), optional_cell(result.n)]);
    table.add_row(vec![
        header_cell("Symbols per card"),
        optional_cell(result.symbols_per_card),
    ]);
    table.add_row(vec![header_cell("Cards"), optional_cell(result.num_cards)]);
    if let Some(message) = &result.message {
        table.add_row(vec![header_cell("Message"), Cell::new(message)]);
    }
    table
}

pub fn deck_table(deck: &Deck) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Card"), header_cell("Symbols")]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(0) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    for (index, card) in deck.cards().iter().enumerate() {
        table.add_row(vec![Cell::new(index + 1), Cell::new(card.join("  "))]);
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn optional_cell(value: Option<u32>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => Cell::new("-").fg(Color::DarkGrey),
    }
}
