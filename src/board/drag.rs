use uuid::Uuid;

use crate::models::FeatureStatus;

/// The card being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSource {
    pub id: Uuid,
    pub status: FeatureStatus,
}

/// A drop that should reassign the dragged feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropTarget {
    pub id: Uuid,
    pub status: FeatureStatus,
}

/// At most one active drag plus the column currently hovered.
///
/// Only kanban cards and kanban columns take part; the backlog is neither a
/// source nor a target.
#[derive(Debug, Clone, Default)]
pub struct DragState {
    active: Option<DragSource>,
    hover: Option<FeatureStatus>,
}

impl DragState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<DragSource> {
        self.active
    }

    pub fn is_dragging(&self, id: Uuid) -> bool {
        self.active.is_some_and(|source| source.id == id)
    }

    pub fn hovered(&self) -> Option<FeatureStatus> {
        self.active.and(self.hover)
    }

    /// Start dragging. Ignored while another drag is active or for backlog cards.
    pub fn begin(&mut self, source: DragSource) -> bool {
        if self.active.is_some() || !source.status.is_kanban() {
            return false;
        }
        self.active = Some(source);
        self.hover = None;
        true
    }

    pub fn hover(&mut self, column: FeatureStatus) {
        if self.active.is_some() && column.is_kanban() {
            self.hover = Some(column);
        }
    }

    pub fn leave(&mut self) {
        self.hover = None;
    }

    /// Finish the drag over `column`, clearing all drag state.
    ///
    /// `current` is the dragged feature's status at drop time, which wins
    /// over the status captured at drag start. Returns a target only when
    /// the column differs from that status.
    pub fn drop_on(
        &mut self,
        column: FeatureStatus,
        current: impl FnOnce(Uuid) -> Option<FeatureStatus>,
    ) -> Option<DropTarget> {
        let source = self.active.take();
        self.hover = None;

        let source = source?;
        if !column.is_kanban() {
            return None;
        }
        let status = current(source.id)?;
        (status != column).then_some(DropTarget {
            id: source.id,
            status: column,
        })
    }

    pub fn cancel(&mut self) {
        self.active = None;
        self.hover = None;
    }

    /// Drag end fires after a drop as well as after a cancel.
    pub fn end(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(status: FeatureStatus) -> DragSource {
        DragSource {
            id: Uuid::new_v4(),
            status,
        }
    }

    #[test]
    fn drop_on_other_column_yields_target() {
        let mut drag = DragState::new();
        let src = source(FeatureStatus::Todo);
        assert!(drag.begin(src));

        let target = drag.drop_on(FeatureStatus::InProgress, |_| Some(FeatureStatus::Todo));

        assert_eq!(
            target,
            Some(DropTarget {
                id: src.id,
                status: FeatureStatus::InProgress
            })
        );
        assert!(drag.active().is_none());
    }

    #[test]
    fn drop_on_same_column_is_noop_but_clears() {
        let mut drag = DragState::new();
        drag.begin(source(FeatureStatus::Todo));
        drag.hover(FeatureStatus::Todo);

        assert_eq!(drag.drop_on(FeatureStatus::Todo, |_| Some(FeatureStatus::Todo)), None);
        assert!(drag.active().is_none());
        assert!(drag.hovered().is_none());
    }

    #[test]
    fn drop_uses_status_at_drop_time() {
        let mut drag = DragState::new();
        drag.begin(source(FeatureStatus::Todo));

        // A refresh moved the feature to done while it was being dragged.
        let target = drag.drop_on(FeatureStatus::Done, |_| Some(FeatureStatus::Done));
        assert!(target.is_none());
    }

    #[test]
    fn drop_of_vanished_feature_is_noop() {
        let mut drag = DragState::new();
        drag.begin(source(FeatureStatus::Todo));
        assert!(drag.drop_on(FeatureStatus::Done, |_| None).is_none());
    }

    #[test]
    fn only_one_drag_at_a_time() {
        let mut drag = DragState::new();
        let first = source(FeatureStatus::Todo);
        assert!(drag.begin(first));
        assert!(!drag.begin(source(FeatureStatus::Done)));
        assert_eq!(drag.active(), Some(first));
    }

    #[test]
    fn backlog_is_neither_source_nor_target() {
        let mut drag = DragState::new();
        assert!(!drag.begin(source(FeatureStatus::Backlog)));

        drag.begin(source(FeatureStatus::Todo));
        drag.hover(FeatureStatus::Backlog);
        assert!(drag.hovered().is_none());
        assert!(drag.drop_on(FeatureStatus::Backlog, |_| Some(FeatureStatus::Todo)).is_none());
    }

    #[test]
    fn cancel_and_end_clear_state() {
        let mut drag = DragState::new();
        drag.begin(source(FeatureStatus::Todo));
        drag.hover(FeatureStatus::Done);
        drag.cancel();
        assert!(drag.active().is_none());
        assert!(drag.hovered().is_none());

        drag.begin(source(FeatureStatus::Todo));
        drag.end();
        assert!(drag.active().is_none());
    }
}
