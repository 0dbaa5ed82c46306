//! Table rendering for list results.

use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::domain::{Board, Card, Label, List};

/// Column colors, by position.
const COLUMN_COLORS: [Color; 3] = [Color::Cyan, Color::Magenta, Color::Green];

/// Create a table with the given header, wrapping to the terminal width.
pub fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(headers.iter().map(|h| Cell::new(h)));
    table
}

fn add_row(table: &mut Table, values: &[&str]) {
    table.add_row(
        values
            .iter()
            .enumerate()
            .map(|(i, v)| Cell::new(v).fg(COLUMN_COLORS[i % COLUMN_COLORS.len()])),
    );
}

pub fn boards_table(boards: &[Board]) -> Table {
    let mut table = new_table(&["Name", "Board ID"]);
    for board in boards {
        add_row(&mut table, &[board.name.as_str(), board.id.as_str()]);
    }
    table
}

pub fn lists_table(lists: &[List]) -> Table {
    let mut table = new_table(&["Name", "List ID"]);
    for list in lists {
        add_row(&mut table, &[list.name.as_str(), list.id.as_str()]);
    }
    table
}

pub fn labels_table(labels: &[Label]) -> Table {
    let mut table = new_table(&["Name", "Label ID", "Color"]);
    for label in labels {
        add_row(&mut table, &[label.name.as_str(), label.id.as_str(), label.color.as_str()]);
    }
    table
}

/// Cards with id first, as used by `view-cards` and `search`.
pub fn cards_table(cards: &[Card]) -> Table {
    let mut table = new_table(&["Card ID", "Name", "URL"]);
    for card in cards {
        add_row(&mut table, &[card.id.as_str(), card.name.as_str(), card.short_url.as_str()]);
    }
    table
}
