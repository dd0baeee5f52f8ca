//! The admin CRUD panel: one resource's list plus its create/edit draft and
//! delete confirmation.
//!
//! Every successful mutation is followed by a full reload of the list; the
//! panel never patches records in place. Failures become an error toast and
//! leave the list as it was.

pub mod filter;
pub mod state;
pub mod toast;

pub use filter::{
    BuildingFilter, Choice, GuideFilter, PriceRange, RecordFilter, Specialization, UserFilter,
};
pub use state::{LoadState, ModalMode, Overlay, PendingAction};
pub use toast::{Toast, ToastKind, ToastSlot};

use std::mem;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::api::CrudResource;
use crate::form::{self, EditableRecord, FormError};

pub struct Panel<R: CrudResource> {
    resource: R,
    records: Vec<R::Record>,
    state: LoadState,
    overlay: Overlay<R::Record, R::Key>,
    filter: R::Filter,
    toasts: ToastSlot,
}

impl<R: CrudResource> Panel<R> {
    pub fn new(resource: R) -> Self {
        Self {
            resource,
            records: Vec::new(),
            state: LoadState::Idle,
            overlay: Overlay::None,
            filter: R::Filter::default(),
            toasts: ToastSlot::default(),
        }
    }

    pub fn with_toast_ttl(mut self, ttl: Duration) -> Self {
        self.toasts = ToastSlot::new(ttl);
        self
    }

    pub fn resource(&self) -> &R {
        &self.resource
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Everything from the last successful load, unfiltered.
    pub fn records(&self) -> &[R::Record] {
        &self.records
    }

    #[cfg(test)]
    pub fn overlay(&self) -> &Overlay<R::Record, R::Key> {
        &self.overlay
    }

    pub fn filter_mut(&mut self) -> &mut R::Filter {
        &mut self.filter
    }

    #[cfg(test)]
    pub fn toasts(&self) -> &ToastSlot {
        &self.toasts
    }

    pub fn toasts_mut(&mut self) -> &mut ToastSlot {
        &mut self.toasts
    }

    /// Records passing the current filter, in backend order.
    pub fn visible(&self) -> Vec<&R::Record> {
        filter::apply(&self.records, &self.filter)
    }

    pub fn find(&self, key: &R::Key) -> Option<&R::Record> {
        self.records
            .iter()
            .find(|record| R::key_of(record).as_ref() == Some(key))
    }

    /// Fetch the whole collection. On failure the previous list stays.
    pub async fn load(&mut self) {
        self.state = LoadState::Loading;
        match self.resource.list().await {
            Ok(records) => {
                debug!(
                    "Loaded {} {}",
                    records.len(),
                    self.resource.labels().plural
                );
                self.records = records;
                self.state = LoadState::Loaded;
            }
            Err(err) => {
                let labels = self.resource.labels();
                error!("Error loading {}: {}", labels.plural, err);
                self.state = LoadState::LoadFailed;
                self.toasts
                    .error(format!("Failed to load {}!", labels.plural));
            }
        }
    }

    /// Open an empty draft for a new record.
    pub fn open_create(&mut self) {
        self.overlay = Overlay::Modal {
            mode: ModalMode::Create,
            draft: R::Record::default(),
        };
    }

    /// Open a draft holding a copy of `record`.
    pub fn open_edit(&mut self, record: &R::Record) {
        self.overlay = Overlay::Modal {
            mode: ModalMode::Edit,
            draft: record.clone(),
        };
    }

    /// Open a draft for the loaded record with `key`. False when it is not in
    /// the list.
    pub fn open_edit_key(&mut self, key: &R::Key) -> bool {
        match self.find(key).cloned() {
            Some(record) => {
                self.open_edit(&record);
                true
            }
            None => false,
        }
    }

    #[cfg(test)]
    pub fn draft(&self) -> Option<&R::Record> {
        match &self.overlay {
            Overlay::Modal { draft, .. } => Some(draft),
            _ => None,
        }
    }

    /// Change one field of the open draft.
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        let Overlay::Modal { mode, draft } = &mut self.overlay else {
            return Err(FormError::NoDraft);
        };
        if *mode == ModalMode::Edit {
            if let Some(locked) = R::key_field() {
                if form::field_key(field) == form::field_key(locked) {
                    return Err(FormError::ReadOnly(locked.to_string()));
                }
            }
        }
        draft.set_field(field, value)
    }

    /// Apply several `(field, value)` pairs, stopping at the first bad one.
    pub fn set_fields<I, K, V>(&mut self, fields: I) -> Result<(), FormError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        fields
            .into_iter()
            .try_for_each(|(field, value)| self.set_field(field.as_ref(), value.as_ref()))
    }

    pub fn close_modal(&mut self) {
        if matches!(self.overlay, Overlay::Modal { .. }) {
            self.overlay = Overlay::None;
        }
    }

    /// Send the open draft. On success the draft closes and the list reloads;
    /// on failure the draft stays open for another try.
    pub async fn submit(&mut self) -> bool {
        let (mode, draft) = match &self.overlay {
            Overlay::Modal { mode, draft } => (*mode, draft.clone()),
            _ => return false,
        };
        let labels = self.resource.labels();
        let (verb, done) = mode.verbs();

        let result = match mode {
            ModalMode::Create => self.resource.create(&draft).await,
            ModalMode::Edit => match R::key_of(&draft) {
                Some(key) => self.resource.update(&key, &draft).await,
                None => {
                    error!("Invalid {} data (no identifier)", labels.noun);
                    self.toasts.error(format!("Invalid {} data!", labels.noun));
                    return false;
                }
            },
        };

        match result {
            Ok(()) => {
                info!("{} {}", labels.title, done);
                self.overlay = Overlay::None;
                self.load().await;
                self.toasts
                    .success(format!("{} {} successfully!", labels.title, done));
                true
            }
            Err(err) => {
                error!("Failed to {} {}: {}", verb, labels.noun, err);
                self.toasts
                    .error(format!("Failed to {} {}!", verb, labels.noun));
                false
            }
        }
    }

    /// Ask before deleting. Nothing is sent until [`Panel::confirm`].
    pub fn request_delete(&mut self, key: R::Key) {
        let message = self.resource.delete_prompt(&key);
        self.overlay = Overlay::Confirm {
            message,
            action: PendingAction::Delete(key),
        };
    }

    /// The question of the open confirmation, if any.
    pub fn confirm_message(&self) -> Option<&str> {
        match &self.overlay {
            Overlay::Confirm { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Run the pending action. The confirmation closes whatever the outcome.
    pub async fn confirm(&mut self) -> bool {
        let key = match mem::replace(&mut self.overlay, Overlay::None) {
            Overlay::Confirm {
                action: PendingAction::Delete(key),
                ..
            } => key,
            other => {
                self.overlay = other;
                return false;
            }
        };
        let labels = self.resource.labels();

        match self.resource.delete(&key).await {
            Ok(()) => {
                info!("{} {} deleted", labels.title, key);
                self.load().await;
                self.toasts
                    .success(format!("{} deleted successfully!", labels.title));
                true
            }
            Err(err) => {
                error!("Error deleting {} {}: {}", labels.noun, key, err);
                self.toasts
                    .error(format!("Failed to delete {}!", labels.noun));
                false
            }
        }
    }

    pub fn cancel_confirm(&mut self) {
        if matches!(self.overlay, Overlay::Confirm { .. }) {
            self.overlay = Overlay::None;
        }
    }
}
