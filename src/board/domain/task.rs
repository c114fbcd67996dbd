//! Task document model, creation drafts, and partial-update patches.

use super::{CategoryName, Position, TaskDomainError, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field names owned by the server or lifted out of the opaque payload.
const RESERVED_FIELDS: [&str; 4] = ["id", "category", "index", "createdAt"];

/// Field names a patch may never rewrite.
const IMMUTABLE_FIELDS: [&str; 2] = ["id", "createdAt"];

/// Canonical task document.
///
/// Identity and ordering fields are typed; everything else the client
/// supplied (`title`, ...) is an opaque payload map serialised inline with
/// the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDocument {
    id: TaskId,
    category: CategoryName,
    #[serde(rename = "index")]
    position: Position,
    #[serde(rename = "createdAt")]
    created_at: DateTime<Utc>,
    #[serde(flatten)]
    payload: Map<String, Value>,
}

impl TaskDocument {
    /// Assembles a canonical document from an accepted draft.
    ///
    /// Reserved field names are stripped from the payload so the flattened
    /// serialisation cannot shadow the typed fields.
    #[must_use]
    pub fn from_draft(id: TaskId, draft: TaskDraft, created_at: DateTime<Utc>) -> Self {
        let TaskDraft {
            category,
            position,
            mut payload,
        } = draft;
        for field in RESERVED_FIELDS {
            payload.remove(field);
        }
        Self {
            id,
            category,
            position,
            created_at,
            payload,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the category the task belongs to.
    #[must_use]
    pub const fn category(&self) -> &CategoryName {
        &self.category
    }

    /// Returns the ordinal position within the category.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the opaque client-supplied payload fields.
    #[must_use]
    pub const fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    /// Moves the task to the given category and position.
    pub fn place(&mut self, category: CategoryName, position: Position) {
        self.category = category;
        self.position = position;
    }

    /// Displaces the task one slot further from the front of its category.
    pub fn shift_up(&mut self) {
        self.position = self.position.next();
    }

    /// Merges a patch into the document, field by field.
    ///
    /// Only fields present in the patch change; everything else retains its
    /// prior value. Returns whether any stored field actually changed.
    pub fn apply_patch(&mut self, patch: &TaskPatch) -> bool {
        let mut changed = false;
        if let Some(category) = patch.category()
            && *category != self.category
        {
            self.category = category.clone();
            changed = true;
        }
        if let Some(position) = patch.position()
            && position != self.position
        {
            self.position = position;
            changed = true;
        }
        for (key, value) in patch.fields() {
            if self.payload.get(key) != Some(value) {
                self.payload.insert(key.clone(), value.clone());
                changed = true;
            }
        }
        changed
    }
}

/// Caller-supplied input for creating a task.
///
/// The position defaults to the front of the category; the service's
/// placement policy may override it (append-at-end).
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    category: CategoryName,
    position: Position,
    payload: Map<String, Value>,
}

impl TaskDraft {
    /// Creates a draft in the given category at the front position.
    #[must_use]
    pub fn new(category: CategoryName) -> Self {
        Self {
            category,
            position: Position::ZERO,
            payload: Map::new(),
        }
    }

    /// Sets the requested ordinal position.
    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Adds an opaque payload field. Reserved field names are ignored.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        let key = key.into();
        if !RESERVED_FIELDS.contains(&key.as_str()) {
            self.payload.insert(key, value);
        }
        self
    }

    /// Returns the target category.
    #[must_use]
    pub const fn category(&self) -> &CategoryName {
        &self.category
    }

    /// Returns the requested position.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }
}

/// Validated partial update for a task document.
///
/// Built from the raw field map a client submits; ordering fields are
/// parsed into their typed forms up front so malformed values fail before
/// any store access.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskPatch {
    category: Option<CategoryName>,
    position: Option<Position>,
    fields: Map<String, Value>,
}

impl TaskPatch {
    /// Builds a patch from a raw client-supplied field map.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ImmutableField`] when the map names a
    /// server-owned field, [`TaskDomainError::NonStringCategory`] or
    /// [`TaskDomainError::EmptyCategory`] for a bad category value, and
    /// [`TaskDomainError::NonIntegerPosition`] or
    /// [`TaskDomainError::NegativePosition`] for a bad index value.
    pub fn from_map(map: Map<String, Value>) -> Result<Self, TaskDomainError> {
        let mut patch = Self::default();
        for (key, value) in map {
            if IMMUTABLE_FIELDS.contains(&key.as_str()) {
                return Err(TaskDomainError::ImmutableField(key));
            }
            match key.as_str() {
                "category" => {
                    let label = value.as_str().ok_or(TaskDomainError::NonStringCategory)?;
                    patch.category = Some(CategoryName::new(label)?);
                }
                "index" => {
                    let ordinal = value.as_i64().ok_or(TaskDomainError::NonIntegerPosition)?;
                    patch.position = Some(Position::new(ordinal)?);
                }
                _ => {
                    patch.fields.insert(key, value);
                }
            }
        }
        Ok(patch)
    }

    /// Returns the patched category, if any.
    #[must_use]
    pub const fn category(&self) -> Option<&CategoryName> {
        self.category.as_ref()
    }

    /// Returns the patched position, if any.
    #[must_use]
    pub const fn position(&self) -> Option<Position> {
        self.position
    }

    /// Returns the opaque patched payload fields.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}
