use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::objects::ChartObject;

pub const DRAWING_DOCUMENT_SCHEMA_V1: u32 = 1;

/// Versioned payload exchanged with the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingDocument {
    pub schema_version: u32,
    pub drawings: Vec<ChartObject>,
}

impl DrawingDocument {
    #[must_use]
    pub fn new(drawings: Vec<ChartObject>) -> Self {
        Self {
            schema_version: DRAWING_DOCUMENT_SCHEMA_V1,
            drawings,
        }
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::Persistence(format!("failed to serialize drawing document: {e}"))
        })
    }

    /// Parses a versioned document or a bare array of drawings.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(drawings) = serde_json::from_str::<Vec<ChartObject>>(input) {
            return Ok(Self::new(drawings));
        }
        let document: Self = serde_json::from_str(input).map_err(|e| {
            ChartError::Persistence(format!("failed to parse drawing document: {e}"))
        })?;
        if document.schema_version != DRAWING_DOCUMENT_SCHEMA_V1 {
            return Err(ChartError::Persistence(format!(
                "unsupported drawing document schema version: {}",
                document.schema_version
            )));
        }
        Ok(document)
    }
}

/// External store that mirrors user drawings.
///
/// The engine loads once at construction and saves after every mutation.
/// Save errors are logged by the caller and never undo the in-memory change.
pub trait DrawingPersistence {
    fn load(&mut self) -> ChartResult<Vec<ChartObject>>;
    fn save(&mut self, drawings: &[ChartObject]) -> ChartResult<()>;
}

/// Persistence that keeps nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPersistence;

impl DrawingPersistence for NoopPersistence {
    fn load(&mut self) -> ChartResult<Vec<ChartObject>> {
        Ok(Vec::new())
    }

    fn save(&mut self, _drawings: &[ChartObject]) -> ChartResult<()> {
        Ok(())
    }
}

/// In-memory JSON store. Clones share the same buffer, so a host (or a test)
/// can keep a handle and inspect what the engine saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    buffer: Rc<RefCell<Option<String>>>,
    saves: Rc<RefCell<usize>>,
}

impl MemoryPersistence {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the buffer with an existing document.
    pub fn with_document(document: &DrawingDocument) -> ChartResult<Self> {
        let persistence = Self::new();
        *persistence.buffer.borrow_mut() = Some(document.to_json_pretty()?);
        Ok(persistence)
    }

    #[must_use]
    pub fn json(&self) -> Option<String> {
        self.buffer.borrow().clone()
    }

    #[must_use]
    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }
}

impl DrawingPersistence for MemoryPersistence {
    fn load(&mut self) -> ChartResult<Vec<ChartObject>> {
        match self.buffer.borrow().as_deref() {
            Some(json) => Ok(DrawingDocument::from_json_compat_str(json)?.drawings),
            None => Ok(Vec::new()),
        }
    }

    fn save(&mut self, drawings: &[ChartObject]) -> ChartResult<()> {
        let json = DrawingDocument::new(drawings.to_vec()).to_json_pretty()?;
        *self.buffer.borrow_mut() = Some(json);
        *self.saves.borrow_mut() += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{DrawingDocument, DrawingPersistence, MemoryPersistence};
    use crate::core::Anchor;
    use crate::objects::{ObjectId, ShapeDraft};

    #[test]
    fn memory_persistence_round_trips_through_json() {
        let mut persistence = MemoryPersistence::new();
        let handle = persistence.clone();
        let drawing = ShapeDraft::Rectangle {
            corner1: Anchor::new(1.0, 2.0),
            corner2: Anchor::new(3.0, 4.0),
        }
        .into_object(ObjectId::new("rect-1"));

        persistence.save(&[drawing.clone()]).expect("save");
        assert_eq!(handle.save_count(), 1);
        assert!(handle.json().expect("json").contains("\"schema_version\": 1"));
        assert_eq!(persistence.load().expect("load"), vec![drawing]);
    }

    #[test]
    fn unknown_schema_version_is_rejected() {
        let json = r#"{"schema_version": 9, "drawings": []}"#;
        assert!(DrawingDocument::from_json_compat_str(json).is_err());
        assert!(DrawingDocument::from_json_compat_str("[]").is_ok());
    }
}
