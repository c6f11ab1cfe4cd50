//! Plain-text rendering of a [`BoardView`] for the terminal.

use super::view::{BoardView, CardMode, CardView, ColumnView};
use crate::models::FeatureStatus;

const BACKLOG: char = '◇';
const TODO: char = '○';
const IN_PROGRESS: char = '◐';
const DONE: char = '●';

fn status_symbol(status: FeatureStatus) -> char {
    match status {
        FeatureStatus::Backlog => BACKLOG,
        FeatureStatus::Todo => TODO,
        FeatureStatus::InProgress => IN_PROGRESS,
        FeatureStatus::Done => DONE,
    }
}

/// First eight characters of the id, enough to address a card from the CLI.
pub fn short_id(card: &CardView) -> String {
    card.id.to_string().chars().take(8).collect()
}

/// Render the board, kanban columns first, then the backlog.
///
/// Example output:
/// ```text
/// == To Do (1) ==
///   ○ Dashboard Analytics  [3f2a9c1e]
///       Create interactive charts and metrics visualization
/// == In Progress (0) ==
///   Drag features here
/// == Done (0) ==
///   Drag features here
///
/// == Backlog (1) ==
///   ◇ Search Functionality  [77b0d412]
/// ```
pub fn render_text(view: &BoardView) -> String {
    let mut output = String::new();

    if view.celebrating {
        output.push_str("*** Feature complete! ***\n\n");
    }

    if let Some(placeholder) = view.kanban_placeholder {
        output.push_str(placeholder);
        output.push('\n');
    } else {
        for column in &view.columns {
            render_column(&mut output, column);
        }
    }

    output.push('\n');
    output.push_str(&format!("== Backlog ({}) ==\n", view.backlog.cards.len()));
    if let Some(placeholder) = view.backlog.placeholder {
        output.push_str("  ");
        output.push_str(placeholder);
        output.push('\n');
    }
    for card in &view.backlog.cards {
        render_card(&mut output, card);
    }

    output
}

fn render_column(output: &mut String, column: &ColumnView) {
    output.push_str(&format!("== {} ({}) ==\n", column.title, column.count()));
    if let Some(placeholder) = column.placeholder {
        output.push_str("  ");
        output.push_str(placeholder);
        output.push('\n');
    }
    for card in &column.cards {
        render_card(output, card);
    }
}

fn render_card(output: &mut String, card: &CardView) {
    match &card.mode {
        CardMode::Editing {
            title, description, ..
        } => {
            output.push_str(&format!("  ✎ {}  [{}] (editing)\n", title, short_id(card)));
            if !description.is_empty() {
                output.push_str(&format!("      {}\n", description));
            }
        }
        CardMode::Display { completed, .. } => {
            output.push_str(&format!(
                "  {} {}  [{}]",
                status_symbol(card.status),
                card.title,
                short_id(card)
            ));
            if *completed {
                output.push_str("  ✔ Completed!");
            }
            output.push('\n');
            if let Some(description) = &card.description {
                output.push_str(&format!("      {}\n", description));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::drag::DragState;
    use crate::board::store::FeatureStore;
    use crate::board::view::{render_board, ViewContext};

    fn render(store: &FeatureStore, celebrating: bool) -> String {
        let drag = DragState::new();
        let view = render_board(
            store,
            ViewContext {
                draft: None,
                drag: &drag,
                adding: false,
                celebrating,
            },
        );
        render_text(&view)
    }

    #[test]
    fn test_empty_board() {
        let output = render(&FeatureStore::new(), false);
        assert_eq!(
            output,
            "No features in progress yet\n\n== Backlog (0) ==\n  No features in backlog\n"
        );
    }

    #[test]
    fn test_columns_and_backlog() {
        let mut store = FeatureStore::new();
        let a = store.add("Search", "Full-text").unwrap();
        let b = store.add("Login", "").unwrap();
        store.set_status(b.id, FeatureStatus::Done);

        let output = render(&store, false);
        let a_id: String = a.id.to_string().chars().take(8).collect();
        let b_id: String = b.id.to_string().chars().take(8).collect();

        assert_eq!(
            output,
            format!(
                "== To Do (0) ==\n  Drag features here\n\
                 == In Progress (0) ==\n  Drag features here\n\
                 == Done (1) ==\n  ● Login  [{b_id}]  ✔ Completed!\n\
                 \n== Backlog (1) ==\n  ◇ Search  [{a_id}]\n      Full-text\n"
            )
        );
    }

    #[test]
    fn test_celebration_banner() {
        let output = render(&FeatureStore::new(), true);
        assert!(output.starts_with("*** Feature complete! ***\n"));
    }
}
