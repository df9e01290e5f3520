//! Client-side store: one entity type's collection plus its UI state.
//!
//! # Design
//! The store is the only owner of its collection, selection and modal state;
//! everything else reads through accessors. Writes never patch the
//! collection. Every successful create/update/delete is followed by a full
//! `fetch_all`, so the collection is always exactly one server list response.
//!
//! Actions take `&mut self`, which gives the ordering guarantee for free:
//! the refetch of an action cannot start before its write has completed.
//! Failures are both returned and recorded as a message in `error`.

use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::http::Transport;
use crate::resource::{merge_patch, Entity, EntityId, ResourceClient};

/// What the entity modal is being used for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModalMode {
    #[default]
    Create,
    Edit,
    View,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModalState {
    pub open: bool,
    pub mode: ModalMode,
}

pub struct Store<T: Entity, X: Transport> {
    client: ResourceClient<T>,
    transport: X,
    items: Vec<T>,
    loading: bool,
    error: Option<String>,
    selected: Option<T>,
    modal: ModalState,
}

impl<T: Entity, X: Transport> Store<T, X> {
    pub fn new(client: ResourceClient<T>, transport: X) -> Self {
        Self {
            client,
            transport,
            items: Vec::new(),
            loading: false,
            error: None,
            selected: None,
            modal: ModalState::default(),
        }
    }

    // --- read access ---

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn find(&self, id: EntityId) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn selected(&self) -> Option<&T> {
        self.selected.as_ref()
    }

    pub fn modal(&self) -> ModalState {
        self.modal
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn client(&self) -> &ResourceClient<T> {
        &self.client
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    // --- network actions ---

    /// Replace the collection with the server's current list.
    ///
    /// On failure the previous collection is left untouched.
    pub fn fetch_all(&mut self) -> Result<(), StoreError> {
        self.reload().map_err(StoreError::Fetch)
    }

    pub fn create(&mut self, draft: &T::Draft) -> Result<(), StoreError> {
        debug!(kind = T::KIND, ?draft, "create");
        let created = match self.client.create(&self.transport, draft) {
            Ok(created) => created,
            Err(e) => return self.fail(StoreError::Write(e)),
        };
        info!(kind = T::KIND, id = created.id(), "Created");
        self.finish_write(true)
    }

    /// Merge `patch` onto the held entity and send the result.
    ///
    /// Fails locally, without a request, when no held entity has `id`.
    pub fn update(&mut self, id: EntityId, patch: &T::Patch) -> Result<(), StoreError> {
        debug!(kind = T::KIND, id, ?patch, "update");
        let Some(existing) = self.find(id) else {
            return self.fail(StoreError::EntityNotFound { kind: T::KIND, id });
        };
        let merged = match merge_patch(existing, patch) {
            Ok(merged) => merged,
            Err(e) => return self.fail(StoreError::Write(e)),
        };
        if let Err(e) = self.client.update(&self.transport, id, &merged) {
            return self.fail(StoreError::Write(e));
        }
        info!(kind = T::KIND, id, "Updated");
        self.finish_write(true)
    }

    /// Delete on the server; the row disappears only once the refetch lands.
    pub fn delete(&mut self, id: EntityId) -> Result<(), StoreError> {
        debug!(kind = T::KIND, id, "delete");
        if let Err(e) = self.client.delete(&self.transport, id) {
            return self.fail(StoreError::Write(e));
        }
        info!(kind = T::KIND, id, "Deleted");
        self.finish_write(false)
    }

    // --- local state ---

    pub fn select(&mut self, entity: Option<T>) {
        self.selected = entity;
    }

    /// Open the modal. A create flow never starts with a stale selection.
    pub fn open_modal(&mut self, mode: ModalMode) {
        if mode == ModalMode::Create {
            self.selected = None;
        }
        self.modal = ModalState { open: true, mode };
    }

    pub fn close_modal(&mut self) {
        self.modal.open = false;
        self.selected = None;
    }

    // --- internals ---

    fn reload(&mut self) -> Result<(), crate::error::ApiError> {
        self.loading = true;
        self.error = None;
        let result = self.client.list(&self.transport);
        self.loading = false;

        match result {
            Ok(items) => {
                self.items = items.into_iter().filter(|item| item.is_visible()).collect();
                debug!(kind = T::KIND, count = self.items.len(), "Fetched");
                Ok(())
            }
            Err(e) => {
                warn!(kind = T::KIND, error = %e, "Fetch failed");
                self.error = Some(StoreError::Fetch(e.clone()).to_string());
                Err(e)
            }
        }
    }

    /// Second half of every write: reload, then close the modal if asked.
    ///
    /// The write already happened, so the modal closes even when the reload
    /// fails; the reload failure is reported on its own.
    fn finish_write(&mut self, close_modal: bool) -> Result<(), StoreError> {
        let reloaded = self.reload();
        if close_modal {
            self.close_modal();
        }
        match reloaded {
            Ok(()) => Ok(()),
            Err(e) => self.fail(StoreError::Refetch(e)),
        }
    }

    fn fail(&mut self, err: StoreError) -> Result<(), StoreError> {
        warn!(kind = T::KIND, error = %err, "Store action failed");
        self.error = Some(err.to_string());
        Err(err)
    }
}
