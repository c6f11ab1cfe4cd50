mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Row};
use uuid::Uuid;

use crate::models::*;

const FEATURE_COLUMNS: &str = "id, title, description, status, created_at, updated_at";

const SEEDED_KEY: &str = "samples_seeded_at";

/// Features inserted into a fresh database on first start.
const SAMPLE_FEATURES: &[(&str, &str, FeatureStatus)] = &[
    (
        "User Authentication",
        "Implement login and signup functionality with OAuth support",
        FeatureStatus::Backlog,
    ),
    (
        "Dashboard Analytics",
        "Create interactive charts and metrics visualization",
        FeatureStatus::Todo,
    ),
    (
        "Dark Mode Support",
        "Add theme toggling between light and dark modes",
        FeatureStatus::InProgress,
    ),
    (
        "Search Functionality",
        "Implement full-text search with filters and sorting",
        FeatureStatus::Backlog,
    ),
];

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        tracing::debug!("Opened database at {}", path.display());
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn default_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "feature-board")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(dirs.data_dir().join("features.db"))
    }

    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path()?)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        schema::run_migrations(&conn)
    }

    /// Insert the sample features on first start.
    ///
    /// Seeding happens at most once per database: a database that already
    /// holds features, or was seeded before, is left alone even if the user
    /// has since deleted everything. Returns how many features were inserted.
    pub fn seed_samples(&self) -> Result<usize> {
        if self.get_meta(SEEDED_KEY)?.is_some() {
            return Ok(0);
        }

        let inserted = if self.count_features()? > 0 {
            0
        } else {
            for (title, description, status) in SAMPLE_FEATURES {
                let feature = self.create_feature(CreateFeatureInput {
                    title: title.to_string(),
                    description: Some(description.to_string()),
                })?;
                if *status != FeatureStatus::Backlog {
                    self.update_feature(feature.id, UpdateFeatureInput::status(*status))?;
                }
            }
            tracing::info!("Seeded {} sample features", SAMPLE_FEATURES.len());
            SAMPLE_FEATURES.len()
        };

        self.set_meta(SEEDED_KEY, &Utc::now().to_rfc3339())?;
        Ok(inserted)
    }

    fn get_meta(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let value = conn
            .query_row("SELECT value FROM meta WHERE key = ?", [key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn set_meta(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        conn.execute(
            "INSERT INTO meta (key, value) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            (key, value),
        )?;
        Ok(())
    }

    // ============================================================
    // Feature operations
    // ============================================================

    /// All features in insertion order.
    pub fn get_all_features(&self) -> Result<Vec<Feature>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(&format!(
            "SELECT {FEATURE_COLUMNS} FROM features ORDER BY position"
        ))?;

        let features = stmt
            .query_map([], feature_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(features)
    }

    pub fn get_feature(&self, id: Uuid) -> Result<Option<Feature>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let feature = conn
            .query_row(
                &format!("SELECT {FEATURE_COLUMNS} FROM features WHERE id = ?"),
                [id.to_string()],
                feature_from_row,
            )
            .optional()?;
        Ok(feature)
    }

    pub fn count_features(&self) -> Result<usize> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM features", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Append a new backlog feature.
    ///
    /// Callers validate the title; a blank one is rejected here as well.
    pub fn create_feature(&self, input: CreateFeatureInput) -> Result<Feature> {
        let feature = Feature::new(&input.title, input.description.as_deref())
            .ok_or_else(|| anyhow::anyhow!("Title is required"))?;

        let conn = self.conn.lock().expect("database lock poisoned");
        conn.execute(
            "INSERT INTO features (id, title, description, status, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            (
                feature.id.to_string(),
                &feature.title,
                &feature.description,
                feature.status.as_str(),
                feature.created_at.to_rfc3339(),
                feature.updated_at.to_rfc3339(),
            ),
        )?;

        Ok(feature)
    }

    /// Apply a partial update. Returns `None` if the feature does not exist.
    pub fn update_feature(&self, id: Uuid, input: UpdateFeatureInput) -> Result<Option<Feature>> {
        let Some(existing) = self.get_feature(id)? else {
            return Ok(None);
        };

        let title = match input.title {
            Some(title) => normalize_title(&title)
                .ok_or_else(|| anyhow::anyhow!("Title cannot be empty"))?,
            None => existing.title,
        };
        let description = match input.description {
            Some(description) => normalize_description(Some(&description)),
            None => existing.description,
        };
        let status = input.status.unwrap_or(existing.status);
        let now = Utc::now();

        let conn = self.conn.lock().expect("database lock poisoned");
        conn.execute(
            "UPDATE features SET title = ?, description = ?, status = ?, updated_at = ? WHERE id = ?",
            (
                &title,
                &description,
                status.as_str(),
                now.to_rfc3339(),
                id.to_string(),
            ),
        )?;

        if status != existing.status {
            tracing::debug!("Feature {} moved {} -> {}", id, existing.status, status);
        }

        Ok(Some(Feature {
            id,
            title,
            description,
            status,
            created_at: existing.created_at,
            updated_at: now,
        }))
    }

    pub fn delete_feature(&self, id: Uuid) -> Result<bool> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let rows = conn.execute("DELETE FROM features WHERE id = ?", [id.to_string()])?;
        Ok(rows > 0)
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}

fn feature_from_row(row: &Row<'_>) -> rusqlite::Result<Feature> {
    Ok(Feature {
        id: parse_uuid(row.get::<_, String>(0)?),
        title: row.get(1)?,
        description: row.get(2)?,
        status: FeatureStatus::parse(&row.get::<_, String>(3)?).unwrap_or(FeatureStatus::Backlog),
        created_at: parse_datetime(row.get::<_, String>(4)?),
        updated_at: parse_datetime(row.get::<_, String>(5)?),
    })
}

fn parse_uuid(s: String) -> Uuid {
    Uuid::parse_str(&s).unwrap_or_else(|_| Uuid::nil())
}

fn parse_datetime(s: String) -> chrono::DateTime<Utc> {
    chrono::DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
