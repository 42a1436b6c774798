//! Tape pane rendering
//!
//! Shows the store one block per row, with the block fields as columns:
//!
//! ```text
//!          MRK  CRY  SUM  WRK  PRB  QUO  REM  PRV  CUR
//!   head   255    0    0    0    0    0    0    0    0
//!     #0     0    0    0    0    0    0    0    3    5
//!     #1     0    0    0    0    0    0    0    0    0
//!   tail   254    0    0    0    0    0    0    0    0
//! ```
//!
//! Markers and the two lanes are coloured, and the cursor cell is highlighted.

use crate::snapshot::Snapshot;
use crate::tape::constants::BLOCK_STRIDE;
use crate::tape::{Cell, Marker};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

const FIELD_NAMES: [&str; BLOCK_STRIDE] = [
    "MRK", "CRY", "SUM", "WRK", "PRB", "QUO", "REM", "PRV", "CUR",
];
const PREVIOUS_COLUMN: usize = 7;
const CURRENT_COLUMN: usize = 8;

/// Label shown in front of the block starting at `start`
fn row_label(snapshot: &Snapshot, start: usize) -> String {
    if start == snapshot.head {
        "head".to_string()
    } else if start == snapshot.tail {
        "tail".to_string()
    } else if start > snapshot.head && start < snapshot.tail {
        format!("#{}", (start - snapshot.head) / BLOCK_STRIDE - 1)
    } else if start > snapshot.tail {
        "stack".to_string()
    } else {
        String::new()
    }
}

fn cell_style(cell: Cell, column: usize, is_cursor: bool) -> Style {
    let style = match cell {
        Cell::Marker(Marker::Head) => Style::default()
            .fg(DEFAULT_THEME.head_marker)
            .add_modifier(Modifier::BOLD),
        Cell::Marker(Marker::Tail) => Style::default()
            .fg(DEFAULT_THEME.tail_marker)
            .add_modifier(Modifier::BOLD),
        Cell::Marker(Marker::Delimiter) => Style::default().fg(DEFAULT_THEME.delimiter),
        Cell::Value(0) => Style::default().fg(DEFAULT_THEME.comment),
        Cell::Value(_) if column == PREVIOUS_COLUMN => {
            Style::default().fg(DEFAULT_THEME.previous_lane)
        }
        Cell::Value(_) if column == CURRENT_COLUMN => {
            Style::default().fg(DEFAULT_THEME.current_lane)
        }
        Cell::Value(_) => Style::default().fg(DEFAULT_THEME.fg),
    };

    if is_cursor {
        style.bg(DEFAULT_THEME.cursor_bg).add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

/// Render the tape pane
pub fn render_tape_pane(
    frame: &mut Frame,
    area: Rect,
    snapshot: &Snapshot,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(
            " Tape ({} blocks, cursor @ {}) ",
            snapshot.blocks(),
            snapshot.cursor
        ))
        .borders(Borders::ALL)
        .border_style(border_style);

    if snapshot.cells.is_empty() {
        let paragraph = Paragraph::new("(empty tape)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let mut header = vec![Span::raw(format!("{:>6} ", ""))];
    for name in FIELD_NAMES {
        header.push(Span::styled(
            format!("{:>4} ", name),
            Style::default().fg(DEFAULT_THEME.primary),
        ));
    }

    let rows: Vec<ListItem> = snapshot
        .cells
        .chunks(BLOCK_STRIDE)
        .enumerate()
        .map(|(row, cells)| {
            let start = row * BLOCK_STRIDE;
            let mut spans = vec![Span::styled(
                format!("{:>6} ", row_label(snapshot, start)),
                Style::default().fg(DEFAULT_THEME.secondary),
            )];
            for (column, &cell) in cells.iter().enumerate() {
                let is_cursor = start + column == snapshot.cursor;
                spans.push(Span::styled(
                    format!("{:>4}", cell.raw()),
                    cell_style(cell, column, is_cursor),
                ));
                spans.push(Span::raw(" "));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    // Header line plus borders
    let visible_height = area.height.saturating_sub(3).max(1) as usize;
    let total_items = rows.len();
    if total_items > visible_height {
        *scroll_offset = (*scroll_offset).min(total_items - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let mut items = vec![ListItem::new(Line::from(header))];
    items.extend(rows.into_iter().skip(*scroll_offset).take(visible_height));

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
