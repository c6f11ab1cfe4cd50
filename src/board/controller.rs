use uuid::Uuid;

use super::celebration::Celebration;
use super::drag::{DragSource, DragState};
use super::store::{FeatureStore, StatusChange};
use super::view::{render_board, BoardView, EditDraft, ViewContext};
use crate::models::{normalize_title, Feature, FeatureStatus};

/// A discrete user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    OpenAddForm,
    CloseAddForm,
    Add { title: String, description: String },
    BeginEdit(Uuid),
    UpdateDraft { title: String, description: String },
    SaveEdit,
    CancelEdit,
    Delete(Uuid),
    StartWorking(Uuid),
    MoveToBacklog(Uuid),
    SetStatus(Uuid, FeatureStatus),
    DragStart(Uuid),
    DragOver(FeatureStatus),
    DragLeave,
    Drop(FeatureStatus),
    DragCancel,
    DragEnd,
}

/// A model mutation produced by interpreting an [`Action`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Create {
        title: String,
        description: String,
    },
    Update {
        id: Uuid,
        title: String,
        description: String,
    },
    Delete(Uuid),
    SetStatus {
        id: Uuid,
        status: FeatureStatus,
    },
}

/// Sequence number of a full-collection fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

/// Owns all board state: the store plus view-local interaction state.
///
/// `interpret` handles the view-local part of an action and yields the
/// model command, if any. `apply` runs that command against the local
/// store. The remote board sends commands to the server instead.
#[derive(Debug, Default)]
pub struct Board {
    store: FeatureStore,
    drag: DragState,
    draft: Option<EditDraft>,
    adding: bool,
    celebration: Celebration,
    issued: u64,
    applied: Option<FetchTicket>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_features(features: Vec<Feature>) -> Self {
        Self {
            store: FeatureStore::with_features(features),
            ..Self::default()
        }
    }

    pub fn with_celebration(mut self, celebration: Celebration) -> Self {
        self.celebration = celebration;
        self
    }

    pub fn store(&self) -> &FeatureStore {
        &self.store
    }

    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    pub fn draft(&self) -> Option<&EditDraft> {
        self.draft.as_ref()
    }

    pub fn celebration(&self) -> &Celebration {
        &self.celebration
    }

    pub fn view(&self) -> BoardView {
        render_board(
            &self.store,
            ViewContext {
                draft: self.draft.as_ref(),
                drag: &self.drag,
                adding: self.adding,
                celebrating: self.celebration.is_visible(),
            },
        )
    }

    /// Interpret and apply locally.
    pub fn handle(&mut self, action: Action) -> Option<StatusChange> {
        let command = self.interpret(action)?;
        self.apply(command)
    }

    pub fn interpret(&mut self, action: Action) -> Option<Command> {
        match action {
            Action::OpenAddForm => {
                self.adding = true;
                None
            }
            Action::CloseAddForm => {
                self.adding = false;
                None
            }
            Action::Add { title, description } => {
                let title = normalize_title(&title)?;
                self.adding = false;
                Some(Command::Create { title, description })
            }
            Action::BeginEdit(id) => {
                if self.store.begin_edit(id) {
                    self.draft = self.store.get(id).map(EditDraft::from_feature);
                }
                None
            }
            Action::UpdateDraft { title, description } => {
                if let Some(draft) = self.draft.as_mut() {
                    draft.title = title;
                    draft.description = description;
                }
                None
            }
            Action::SaveEdit => {
                let draft = self.draft.as_ref()?;
                let title = normalize_title(&draft.title)?;
                let command = Command::Update {
                    id: draft.id,
                    title,
                    description: draft.description.trim().to_string(),
                };
                self.close_editor();
                Some(command)
            }
            Action::CancelEdit => {
                self.close_editor();
                None
            }
            Action::Delete(id) => {
                if self.store.editing() == Some(id) {
                    self.close_editor();
                }
                Some(Command::Delete(id))
            }
            Action::StartWorking(id) => Some(Command::SetStatus {
                id,
                status: FeatureStatus::Todo,
            }),
            Action::MoveToBacklog(id) => {
                if self.store.editing() == Some(id) {
                    self.close_editor();
                }
                Some(Command::SetStatus {
                    id,
                    status: FeatureStatus::Backlog,
                })
            }
            Action::SetStatus(id, status) => Some(Command::SetStatus { id, status }),
            Action::DragStart(id) => {
                let feature = self.store.get(id)?;
                if self.store.editing() == Some(id) {
                    return None;
                }
                self.drag.begin(DragSource {
                    id,
                    status: feature.status,
                });
                None
            }
            Action::DragOver(status) => {
                self.drag.hover(status);
                None
            }
            Action::DragLeave => {
                self.drag.leave();
                None
            }
            Action::Drop(column) => {
                let store = &self.store;
                let target = self
                    .drag
                    .drop_on(column, |id| store.get(id).map(|f| f.status))?;
                Some(Command::SetStatus {
                    id: target.id,
                    status: target.status,
                })
            }
            Action::DragCancel => {
                self.drag.cancel();
                None
            }
            Action::DragEnd => {
                self.drag.end();
                None
            }
        }
    }

    /// Apply a command to the local store, celebrating on completion.
    pub fn apply(&mut self, command: Command) -> Option<StatusChange> {
        match command {
            Command::Create { title, description } => {
                if let Some(feature) = self.store.add(&title, &description) {
                    tracing::debug!("Added feature {} ({})", feature.id, feature.title);
                }
                None
            }
            Command::Update {
                id,
                title,
                description,
            } => {
                if !self.store.edit(id, &title, &description) {
                    tracing::debug!("Edit of {} ignored", id);
                }
                None
            }
            Command::Delete(id) => {
                if self.store.delete(id) {
                    self.forget(id);
                }
                None
            }
            Command::SetStatus { id, status } => {
                let change = self.store.set_status(id, status);
                if change.completes() {
                    self.celebration.trigger();
                }
                Some(change)
            }
        }
    }

    /// Whether setting `id` to `status` would be a completion, judged from
    /// the last known snapshot.
    pub fn would_complete(&self, id: Uuid, status: FeatureStatus) -> bool {
        status == FeatureStatus::Done && self.store.get(id).is_some_and(|f| !f.is_done())
    }

    /// Start a fetch whose result must be passed to [`apply_snapshot`](Self::apply_snapshot).
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        FetchTicket(self.issued)
    }

    /// Replace the store with a fetched snapshot unless a newer one was
    /// already applied. Returns whether the snapshot was applied.
    pub fn apply_snapshot(&mut self, ticket: FetchTicket, features: Vec<Feature>) -> bool {
        if self.applied.is_some_and(|applied| ticket <= applied) {
            tracing::debug!("Discarding stale snapshot {:?}", ticket);
            return false;
        }

        self.applied = Some(ticket);
        self.store.replace_all(features);

        if self.store.editing().is_none() {
            self.draft = None;
        }
        if let Some(source) = self.drag.active() {
            if self.store.get(source.id).is_none() {
                self.drag.cancel();
            }
        }
        true
    }

    fn close_editor(&mut self) {
        self.store.cancel_edit();
        self.draft = None;
    }

    fn forget(&mut self, id: Uuid) {
        if self.draft.as_ref().is_some_and(|d| d.id == id) {
            self.draft = None;
        }
        if self.drag.is_dragging(id) {
            self.drag.cancel();
        }
    }
}
