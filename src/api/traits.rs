use async_trait::async_trait;
use std::fmt::Display;

use super::error::ApiError;
use crate::form::EditableRecord;
use crate::panel::RecordFilter;

/// User-facing wording for one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    /// Capitalized singular, starts toast sentences ("Property added ...")
    pub title: &'static str,
    /// Lowercase singular ("Failed to add property!")
    pub noun: &'static str,
    /// Lowercase plural ("Failed to load properties!")
    pub plural: &'static str,
}

/// Common trait for every backend collection an admin panel manages.
/// A new resource needs only this impl to get a full panel.
#[async_trait]
pub trait CrudResource: Send + Sync {
    type Record: EditableRecord + Clone + Default + Send + Sync;
    type Key: Clone + Display + PartialEq + Send + Sync;
    type Filter: RecordFilter<Self::Record> + Default + Send + Sync;

    fn labels(&self) -> Labels;

    /// Identifier of a stored record; `None` for a draft that was never saved.
    fn key_of(record: &Self::Record) -> Option<Self::Key>;

    /// Field that names the record and so cannot change while editing.
    fn key_field() -> Option<&'static str> {
        None
    }

    /// Confirmation text shown before deleting `key`.
    fn delete_prompt(&self, _key: &Self::Key) -> String {
        format!(
            "Are you sure you want to delete this {}?",
            self.labels().noun
        )
    }

    async fn list(&self) -> Result<Vec<Self::Record>, ApiError>;

    async fn create(&self, draft: &Self::Record) -> Result<(), ApiError>;

    async fn update(&self, key: &Self::Key, draft: &Self::Record) -> Result<(), ApiError>;

    async fn delete(&self, key: &Self::Key) -> Result<(), ApiError>;
}
