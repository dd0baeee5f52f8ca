/// Where the panel's list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    LoadFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalMode {
    Create,
    Edit,
}

impl ModalMode {
    /// (infinitive, past participle) for toast wording
    pub(crate) fn verbs(self) -> (&'static str, &'static str) {
        match self {
            ModalMode::Create => ("add", "added"),
            ModalMode::Edit => ("update", "updated"),
        }
    }
}

/// Action held by a confirmation until the user accepts it.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingAction<K> {
    Delete(K),
}

/// What sits on top of the list. Only one at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay<R, K> {
    None,
    Modal { mode: ModalMode, draft: R },
    Confirm { message: String, action: PendingAction<K> },
}

impl<R, K> Overlay<R, K> {
    #[cfg(test)]
    pub fn is_none(&self) -> bool {
        matches!(self, Overlay::None)
    }
}
