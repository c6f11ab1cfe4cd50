use chrono::Utc;
use uuid::Uuid;

use crate::models::{normalize_description, normalize_title, Feature, FeatureStatus};

/// Result of a status change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    NotFound,
    /// The feature already had the requested status.
    Unchanged(FeatureStatus),
    Moved {
        from: FeatureStatus,
        to: FeatureStatus,
    },
}

impl StatusChange {
    /// Whether this change is a transition into `done` from any other status.
    pub fn completes(&self) -> bool {
        matches!(
            self,
            Self::Moved {
                to: FeatureStatus::Done,
                ..
            }
        )
    }
}

/// Ordered feature collection plus the single editing marker.
///
/// Invalid input never errors: a blank title or an unknown id turns the
/// operation into a no-op, reported through the return value.
#[derive(Debug, Clone, Default)]
pub struct FeatureStore {
    features: Vec<Feature>,
    editing: Option<Uuid>,
}

impl FeatureStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_features(features: Vec<Feature>) -> Self {
        Self {
            features,
            editing: None,
        }
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Feature> {
        self.features.iter().find(|f| f.id == id)
    }

    /// Find the single feature whose id starts with `prefix`.
    pub fn find_by_prefix(&self, prefix: &str) -> Option<&Feature> {
        let prefix = prefix.trim().to_ascii_lowercase();
        if prefix.is_empty() {
            return None;
        }
        let mut matches = self
            .features
            .iter()
            .filter(|f| f.id.to_string().starts_with(&prefix));
        let first = matches.next()?;
        match matches.next() {
            Some(_) => None,
            None => Some(first),
        }
    }

    /// Features with `status`, in store order.
    pub fn partition(&self, status: FeatureStatus) -> impl Iterator<Item = &Feature> + '_ {
        self.features.iter().filter(move |f| f.status == status)
    }

    pub fn count(&self, status: FeatureStatus) -> usize {
        self.partition(status).count()
    }

    pub fn editing(&self) -> Option<Uuid> {
        self.editing
    }

    pub fn add(&mut self, title: &str, description: &str) -> Option<Feature> {
        let feature = Feature::new(title, Some(description))?;
        self.features.push(feature.clone());
        Some(feature)
    }

    /// Returns whether the edit was applied.
    pub fn edit(&mut self, id: Uuid, title: &str, description: &str) -> bool {
        let Some(title) = normalize_title(title) else {
            return false;
        };
        let Some(feature) = self.features.iter_mut().find(|f| f.id == id) else {
            return false;
        };

        feature.title = title;
        feature.description = normalize_description(Some(description));
        feature.updated_at = Utc::now();
        self.editing = None;
        true
    }

    /// Returns whether a feature was removed.
    pub fn delete(&mut self, id: Uuid) -> bool {
        let before = self.features.len();
        self.features.retain(|f| f.id != id);
        if self.editing == Some(id) {
            self.editing = None;
        }
        self.features.len() != before
    }

    pub fn set_status(&mut self, id: Uuid, status: FeatureStatus) -> StatusChange {
        let Some(feature) = self.features.iter_mut().find(|f| f.id == id) else {
            return StatusChange::NotFound;
        };

        let from = feature.status;
        if from == status {
            return StatusChange::Unchanged(status);
        }

        feature.status = status;
        feature.updated_at = Utc::now();
        StatusChange::Moved { from, to: status }
    }

    pub fn move_to_backlog(&mut self, id: Uuid) -> StatusChange {
        self.set_status(id, FeatureStatus::Backlog)
    }

    /// Put `id` into edit mode, leaving any other feature's edit uncommitted.
    pub fn begin_edit(&mut self, id: Uuid) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.editing = Some(id);
        true
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Replace the collection with a fetched snapshot.
    ///
    /// The editing marker survives only if its feature is still present.
    pub fn replace_all(&mut self, features: Vec<Feature>) {
        self.features = features;
        if let Some(id) = self.editing {
            if self.get(id).is_none() {
                self.editing = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_appends_to_the_end() {
        let mut store = FeatureStore::new();
        let a = store.add("A", "").unwrap();
        let b = store.add("B", "second").unwrap();

        let ids: Vec<_> = store.features().iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
        assert_eq!(store.get(b.id).unwrap().description.as_deref(), Some("second"));
    }

    #[test]
    fn find_by_prefix_requires_a_unique_match() {
        let mut store = FeatureStore::new();
        let a = store.add("A", "").unwrap();
        store.add("B", "").unwrap();

        let full = a.id.to_string();
        assert_eq!(store.find_by_prefix(&full).map(|f| f.id), Some(a.id));
        assert!(store.find_by_prefix("").is_none());
        assert!(store.find_by_prefix("zzzz").is_none());
    }

    #[test]
    fn edit_preserves_position_and_status() {
        let mut store = FeatureStore::new();
        let a = store.add("A", "").unwrap();
        let b = store.add("B", "").unwrap();
        store.set_status(a.id, FeatureStatus::Todo);

        assert!(store.edit(a.id, "A2", "details"));

        assert_eq!(store.features()[0].id, a.id);
        assert_eq!(store.features()[0].title, "A2");
        assert_eq!(store.features()[0].status, FeatureStatus::Todo);
        assert_eq!(store.features()[1].id, b.id);
    }

    #[test]
    fn replace_all_drops_marker_for_vanished_feature() {
        let mut store = FeatureStore::new();
        let a = store.add("A", "").unwrap();
        let b = store.add("B", "").unwrap();
        store.begin_edit(a.id);

        let kept = store.get(b.id).cloned().unwrap();
        store.replace_all(vec![kept]);

        assert_eq!(store.editing(), None);
    }

    #[test]
    fn replace_all_keeps_marker_for_surviving_feature() {
        let mut store = FeatureStore::new();
        let a = store.add("A", "").unwrap();
        store.begin_edit(a.id);

        let snapshot = store.features().to_vec();
        store.replace_all(snapshot);

        assert_eq!(store.editing(), Some(a.id));
    }

    #[test]
    fn begin_edit_on_unknown_id_is_ignored() {
        let mut store = FeatureStore::new();
        let a = store.add("A", "").unwrap();
        store.begin_edit(a.id);

        assert!(!store.begin_edit(Uuid::new_v4()));
        assert_eq!(store.editing(), Some(a.id));
    }
}
