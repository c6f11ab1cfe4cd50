//! Declarative board view.
//!
//! [`render_board`] recomputes the whole view from the store and the
//! controller's interaction state. Nothing here holds state; card identity
//! is the feature id.

use uuid::Uuid;

use super::drag::DragState;
use super::store::FeatureStore;
use crate::models::{Feature, FeatureStatus};

pub const BACKLOG_EMPTY: &str = "No features in backlog";
pub const KANBAN_EMPTY: &str = "No features in progress yet";
pub const COLUMN_EMPTY: &str = "Drag features here";
pub const COLUMN_DROP_HERE: &str = "Drop here!";

/// Unsaved edits for the feature under the editing marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub id: Uuid,
    pub title: String,
    pub description: String,
}

impl EditDraft {
    pub fn from_feature(feature: &Feature) -> Self {
        Self {
            id: feature.id,
            title: feature.title.clone(),
            description: feature.description.clone().unwrap_or_default(),
        }
    }
}

/// Interaction state that is not part of the model.
#[derive(Debug, Clone, Copy)]
pub struct ViewContext<'a> {
    pub draft: Option<&'a EditDraft>,
    pub drag: &'a DragState,
    pub adding: bool,
    pub celebrating: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    StartWorking,
    Edit,
    Delete,
    BackToBacklog,
    Save,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardMode {
    Display {
        actions: Vec<CardAction>,
        /// Shown on done cards in place of a forward action.
        completed: bool,
    },
    Editing {
        title: String,
        description: String,
        actions: Vec<CardAction>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: Uuid,
    pub status: FeatureStatus,
    pub title: String,
    pub description: Option<String>,
    pub draggable: bool,
    pub dragging: bool,
    pub mode: CardMode,
}

impl CardView {
    pub fn is_editing(&self) -> bool {
        matches!(self.mode, CardMode::Editing { .. })
    }

    pub fn actions(&self) -> &[CardAction] {
        match &self.mode {
            CardMode::Display { actions, .. } | CardMode::Editing { actions, .. } => actions.as_slice(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BacklogView {
    pub cards: Vec<CardView>,
    pub placeholder: Option<&'static str>,
    pub adding: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView {
    pub status: FeatureStatus,
    pub title: &'static str,
    pub cards: Vec<CardView>,
    pub placeholder: Option<&'static str>,
    pub drop_highlight: bool,
}

impl ColumnView {
    pub fn count(&self) -> usize {
        self.cards.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    pub backlog: BacklogView,
    /// To Do, In Progress, Done.
    pub columns: Vec<ColumnView>,
    pub kanban_placeholder: Option<&'static str>,
    pub celebrating: bool,
}

impl BoardView {
    pub fn column(&self, status: FeatureStatus) -> Option<&ColumnView> {
        self.columns.iter().find(|c| c.status == status)
    }

    /// Cards in a partition, backlog included.
    pub fn partition(&self, status: FeatureStatus) -> &[CardView] {
        match status {
            FeatureStatus::Backlog => &self.backlog.cards,
            _ => self
                .column(status)
                .map(|c| c.cards.as_slice())
                .unwrap_or_default(),
        }
    }

    pub fn card(&self, id: Uuid) -> Option<&CardView> {
        self.backlog
            .cards
            .iter()
            .chain(self.columns.iter().flat_map(|c| c.cards.iter()))
            .find(|card| card.id == id)
    }

    pub fn total_cards(&self) -> usize {
        self.backlog.cards.len() + self.columns.iter().map(ColumnView::count).sum::<usize>()
    }
}

pub fn render_board(store: &FeatureStore, ctx: ViewContext<'_>) -> BoardView {
    let backlog_cards: Vec<CardView> = store
        .partition(FeatureStatus::Backlog)
        .map(|f| render_card(store, f, ctx))
        .collect();

    let backlog = BacklogView {
        placeholder: (backlog_cards.is_empty() && !ctx.adding).then_some(BACKLOG_EMPTY),
        cards: backlog_cards,
        adding: ctx.adding,
    };

    let columns: Vec<ColumnView> = FeatureStatus::KANBAN
        .iter()
        .map(|&status| render_column(store, status, ctx))
        .collect();

    let kanban_placeholder = columns
        .iter()
        .all(|c| c.cards.is_empty())
        .then_some(KANBAN_EMPTY);

    BoardView {
        backlog,
        columns,
        kanban_placeholder,
        celebrating: ctx.celebrating,
    }
}

fn render_column(store: &FeatureStore, status: FeatureStatus, ctx: ViewContext<'_>) -> ColumnView {
    let cards: Vec<CardView> = store
        .partition(status)
        .map(|f| render_card(store, f, ctx))
        .collect();
    let drop_highlight = ctx.drag.hovered() == Some(status);

    let placeholder = match (cards.is_empty(), drop_highlight) {
        (false, _) => None,
        (true, true) => Some(COLUMN_DROP_HERE),
        (true, false) => Some(COLUMN_EMPTY),
    };

    ColumnView {
        status,
        title: status.label(),
        cards,
        placeholder,
        drop_highlight,
    }
}

fn render_card(store: &FeatureStore, feature: &Feature, ctx: ViewContext<'_>) -> CardView {
    let editing = store.editing() == Some(feature.id);

    let mode = if editing {
        let (title, description) = match ctx.draft.filter(|d| d.id == feature.id) {
            Some(draft) => (draft.title.clone(), draft.description.clone()),
            None => (
                feature.title.clone(),
                feature.description.clone().unwrap_or_default(),
            ),
        };
        let mut actions = vec![CardAction::Save, CardAction::Cancel, CardAction::Delete];
        if feature.status != FeatureStatus::Backlog {
            actions.push(CardAction::BackToBacklog);
        }
        CardMode::Editing {
            title,
            description,
            actions,
        }
    } else {
        match feature.status {
            FeatureStatus::Backlog => CardMode::Display {
                actions: vec![CardAction::Edit, CardAction::StartWorking],
                completed: false,
            },
            FeatureStatus::Todo | FeatureStatus::InProgress => CardMode::Display {
                actions: vec![CardAction::Edit, CardAction::Delete],
                completed: false,
            },
            FeatureStatus::Done => CardMode::Display {
                actions: vec![CardAction::Edit, CardAction::Delete],
                completed: true,
            },
        }
    };

    CardView {
        id: feature.id,
        status: feature.status,
        title: feature.title.clone(),
        description: feature.description.clone(),
        draggable: feature.status.is_kanban() && !editing,
        dragging: ctx.drag.is_dragging(feature.id),
        mode,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::drag::DragSource;

    fn ctx(drag: &DragState) -> ViewContext<'_> {
        ViewContext {
            draft: None,
            drag,
            adding: false,
            celebrating: false,
        }
    }

    #[test]
    fn empty_board_shows_all_placeholders() {
        let store = FeatureStore::new();
        let drag = DragState::new();
        let view = render_board(&store, ctx(&drag));

        assert_eq!(view.backlog.placeholder, Some(BACKLOG_EMPTY));
        assert_eq!(view.kanban_placeholder, Some(KANBAN_EMPTY));
        for column in &view.columns {
            assert_eq!(column.placeholder, Some(COLUMN_EMPTY));
            assert_eq!(column.count(), 0);
        }
    }

    #[test]
    fn open_add_form_hides_backlog_placeholder() {
        let store = FeatureStore::new();
        let drag = DragState::new();
        let view = render_board(
            &store,
            ViewContext {
                adding: true,
                ..ctx(&drag)
            },
        );
        assert_eq!(view.backlog.placeholder, None);
        assert!(view.backlog.adding);
    }

    #[test]
    fn partitions_preserve_store_order() {
        let mut store = FeatureStore::new();
        let a = store.add("A", "").unwrap();
        let b = store.add("B", "").unwrap();
        let c = store.add("C", "").unwrap();
        store.set_status(a.id, FeatureStatus::Todo);
        store.set_status(c.id, FeatureStatus::Todo);

        let drag = DragState::new();
        let view = render_board(&store, ctx(&drag));

        let todo: Vec<_> = view.partition(FeatureStatus::Todo).iter().map(|c| c.id).collect();
        assert_eq!(todo, vec![a.id, c.id]);
        assert_eq!(view.partition(FeatureStatus::Backlog)[0].id, b.id);
        assert_eq!(view.kanban_placeholder, None);
        assert_eq!(view.total_cards(), 3);
    }

    #[test]
    fn card_actions_depend_on_status() {
        let mut store = FeatureStore::new();
        let backlog = store.add("Backlog", "").unwrap();
        let doing = store.add("Doing", "").unwrap();
        let done = store.add("Done", "").unwrap();
        store.set_status(doing.id, FeatureStatus::InProgress);
        store.set_status(done.id, FeatureStatus::Done);

        let drag = DragState::new();
        let view = render_board(&store, ctx(&drag));

        let card = view.card(backlog.id).unwrap();
        assert_eq!(card.actions(), &[CardAction::Edit, CardAction::StartWorking]);
        assert!(!card.draggable);

        let card = view.card(doing.id).unwrap();
        assert_eq!(card.actions(), &[CardAction::Edit, CardAction::Delete]);
        assert!(card.draggable);

        let card = view.card(done.id).unwrap();
        assert!(matches!(card.mode, CardMode::Display { completed: true, .. }));
    }

    #[test]
    fn editing_card_uses_draft_and_is_not_draggable() {
        let mut store = FeatureStore::new();
        let f = store.add("Original", "desc").unwrap();
        store.set_status(f.id, FeatureStatus::Todo);
        store.begin_edit(f.id);

        let draft = EditDraft {
            id: f.id,
            title: "Typed".to_string(),
            description: "new".to_string(),
        };
        let drag = DragState::new();
        let view = render_board(
            &store,
            ViewContext {
                draft: Some(&draft),
                ..ctx(&drag)
            },
        );

        let card = view.card(f.id).unwrap();
        assert!(!card.draggable);
        match &card.mode {
            CardMode::Editing {
                title,
                description,
                actions,
            } => {
                assert_eq!(title, "Typed");
                assert_eq!(description, "new");
                assert!(actions.contains(&CardAction::BackToBacklog));
                assert!(actions.contains(&CardAction::Delete));
            }
            other => panic!("expected editing card, got {:?}", other),
        }
        // The display fields still show the stored values.
        assert_eq!(card.title, "Original");
    }

    #[test]
    fn editing_backlog_card_has_no_back_to_backlog() {
        let mut store = FeatureStore::new();
        let f = store.add("A", "").unwrap();
        store.begin_edit(f.id);

        let drag = DragState::new();
        let view = render_board(&store, ctx(&drag));

        let card = view.card(f.id).unwrap();
        assert!(card.is_editing());
        assert!(!card.actions().contains(&CardAction::BackToBacklog));
    }

    #[test]
    fn hovered_empty_column_invites_drop() {
        let mut store = FeatureStore::new();
        let f = store.add("A", "").unwrap();
        store.set_status(f.id, FeatureStatus::Todo);

        let mut drag = DragState::new();
        drag.begin(DragSource {
            id: f.id,
            status: FeatureStatus::Todo,
        });
        drag.hover(FeatureStatus::Done);

        let view = render_board(&store, ctx(&drag));
        let done = view.column(FeatureStatus::Done).unwrap();
        assert!(done.drop_highlight);
        assert_eq!(done.placeholder, Some(COLUMN_DROP_HERE));
        assert!(view.card(f.id).unwrap().dragging);
    }
}
