use crate::error::{ChartError, ChartResult};
use crate::objects::{ChartObject, ObjectId, ObjectKind, ShapeDraft};

/// Mutable collection of user-created drawings.
///
/// Insertion order is kept; hit-testing walks it newest-first. Ids are
/// `"<kind>-<serial>"` and the serial never goes backwards, so a removed id is
/// never handed out again.
///
/// Loaded ids may carry any serial up to [`UserDrawingStore::MAX_LOADED_SERIAL`];
/// larger ones are rejected so the counter always has room left.
#[derive(Debug, Clone, Default)]
pub struct UserDrawingStore {
    objects: Vec<ChartObject>,
    next_serial: u64,
}

impl UserDrawingStore {
    pub const MAX_LOADED_SERIAL: u64 = u64::MAX / 2;

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self, kind: ObjectKind) -> ChartResult<ObjectId> {
        let serial = self.next_serial.checked_add(1).ok_or_else(|| {
            ChartError::InvalidData(format!("{} drawing ids are exhausted", kind.id_prefix()))
        })?;
        self.next_serial = serial;
        Ok(ObjectId::new(format!("{}-{serial}", kind.id_prefix())))
    }

    /// Assigns a fresh id to `draft` and stores it.
    pub fn insert(&mut self, draft: ShapeDraft) -> ChartResult<ObjectId> {
        let id = self.allocate_id(draft.kind())?;
        self.objects.push(draft.into_object(id.clone()));
        Ok(id)
    }

    /// Stores an object that already carries an id (e.g. loaded from disk).
    pub fn add(&mut self, object: ChartObject) -> ChartResult<()> {
        if !object.kind().is_user_drawing() {
            return Err(ChartError::InvalidData(format!(
                "object `{}` of kind {:?} is not a user drawing",
                object.id(),
                object.kind()
            )));
        }
        if object.id().as_str() == ObjectId::PREVIEW || self.contains(object.id()) {
            return Err(ChartError::InvalidData(format!(
                "duplicate or reserved drawing id `{}`",
                object.id()
            )));
        }
        if let Some(serial) = object.id().serial() {
            if serial > Self::MAX_LOADED_SERIAL {
                return Err(ChartError::InvalidData(format!(
                    "drawing id `{}` leaves no room for new ids",
                    object.id()
                )));
            }
            self.next_serial = self.next_serial.max(serial);
        }
        self.objects.push(object);
        Ok(())
    }

    pub fn remove(&mut self, id: &ObjectId) -> Option<ChartObject> {
        let position = self.objects.iter().position(|object| object.id() == id)?;
        Some(self.objects.remove(position))
    }

    #[must_use]
    pub fn get(&self, id: &ObjectId) -> Option<&ChartObject> {
        self.objects.iter().find(|object| object.id() == id)
    }

    pub fn get_mut(&mut self, id: &ObjectId) -> Option<&mut ChartObject> {
        self.objects.iter_mut().find(|object| object.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: &ObjectId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &ChartObject> {
        self.objects.iter()
    }

    pub fn of_kind(&self, kind: ObjectKind) -> impl DoubleEndedIterator<Item = &ChartObject> {
        self.objects.iter().filter(move |object| object.kind() == kind)
    }

    #[must_use]
    pub fn count_of_kind(&self, kind: ObjectKind) -> usize {
        self.of_kind(kind).count()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[ChartObject] {
        &self.objects
    }

    /// Removes everything and returns how many drawings were dropped.
    pub fn clear(&mut self) -> usize {
        let removed = self.objects.len();
        self.objects.clear();
        removed
    }

    pub fn clear_kind(&mut self, kind: ObjectKind) -> usize {
        let before = self.objects.len();
        self.objects.retain(|object| object.kind() != kind);
        before - self.objects.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
