//! Where saved plans go.
//!
//! The editor hands a [`PlanDocument`] to a [`PlanStore`] and gets back a
//! receipt it can show to the operator. The file store writes a single
//! `.plan.kdl` file; the memory store keeps the serialized text around for
//! tests and headless sessions.

use crate::{InterchangeError, PlanDocument};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Acknowledgement for a completed save.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveReceipt {
    /// Where the plan ended up, if it went to disk.
    pub location: Option<PathBuf>,
    pub room_count: usize,
    pub saved_at: DateTime<Utc>,
}

/// Persistence collaborator for plans.
pub trait PlanStore {
    fn save(&self, document: &PlanDocument) -> Result<SaveReceipt, InterchangeError>;
    fn load(&self) -> Result<PlanDocument, InterchangeError>;
}

/// Stores a plan as a KDL file on disk.
#[derive(Debug, Clone)]
pub struct FilePlanStore {
    path: PathBuf,
}

impl FilePlanStore {
    /// Use `path` as-is, adding the `.plan.kdl` suffix if it has no extension.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let path = if path.extension().is_some() {
            path.to_path_buf()
        } else {
            path.with_extension("plan.kdl")
        };
        Self { path }
    }

    /// `plan.plan.kdl` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join("plan"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PlanStore for FilePlanStore {
    fn save(&self, document: &PlanDocument) -> Result<SaveReceipt, InterchangeError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let document = document.clone().stamped();
        std::fs::write(&self.path, document.to_kdl())?;
        log::info!(
            "saved {} rooms to {}",
            document.rooms.len(),
            self.path.display()
        );

        Ok(SaveReceipt {
            location: Some(self.path.clone()),
            room_count: document.rooms.len(),
            saved_at: document.saved_at.unwrap_or_else(Utc::now),
        })
    }

    fn load(&self) -> Result<PlanDocument, InterchangeError> {
        if !self.path.exists() {
            return Err(InterchangeError::NothingSaved);
        }
        let input = std::fs::read_to_string(&self.path)?;
        let document = PlanDocument::from_kdl(&input)?;
        log::debug!(
            "loaded {} rooms from {}",
            document.rooms.len(),
            self.path.display()
        );
        Ok(document)
    }
}

/// Keeps the last saved plan in memory, serialized as KDL.
#[derive(Debug, Default)]
pub struct MemoryPlanStore {
    saved: Mutex<Option<String>>,
}

impl MemoryPlanStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The KDL text of the last save.
    pub fn last_saved(&self) -> Option<String> {
        self.saved.lock().ok().and_then(|saved| saved.clone())
    }
}

impl PlanStore for MemoryPlanStore {
    fn save(&self, document: &PlanDocument) -> Result<SaveReceipt, InterchangeError> {
        let document = document.clone().stamped();
        let mut saved = self
            .saved
            .lock()
            .map_err(|_| InterchangeError::InvalidStructure("memory store poisoned".into()))?;
        *saved = Some(document.to_kdl());

        Ok(SaveReceipt {
            location: None,
            room_count: document.rooms.len(),
            saved_at: document.saved_at.unwrap_or_else(Utc::now),
        })
    }

    fn load(&self) -> Result<PlanDocument, InterchangeError> {
        let text = self.last_saved().ok_or(InterchangeError::NothingSaved)?;
        PlanDocument::from_kdl(&text)
    }
}
