//! Write path: validate, issue the mutation, then refetch the collection.
//! No optimistic updates — a failed mutation leaves local state exactly as
//! it was, and the error is surfaced for toast display by the shell.

use serde::Serialize;
use serde_json::Value;

use crate::api::Backend;
use crate::errors::AppError;
use crate::store::{CancelToken, EntityStore};

/// Outcome of the destructive-action confirmation dialog. Deleting (and
/// rolling back a policy version) requires an explicit `Confirmed`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

/// Submit state of the create/edit dialog: `Idle → Submitting → Idle`.
/// While a submit is in flight the dialog's button is disabled; the list
/// screen's own state machine is untouched until the refetch.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting,
}

/// A create/update payload that knows its own required-field checks.
/// Validation failures block the request entirely — nothing reaches the
/// network.
pub trait Draft: Serialize {
    /// Human-readable problems, empty when the draft is submittable.
    fn validate(&self) -> Vec<String>;
}

/// Write-through gateway for one list screen.
#[derive(Debug, Default)]
pub struct MutationGateway {
    submit: SubmitState,
}

impl MutationGateway {
    pub fn new() -> Self {
        MutationGateway::default()
    }

    pub fn is_submitting(&self) -> bool {
        self.submit == SubmitState::Submitting
    }

    pub async fn create<T, B, D>(
        &mut self,
        backend: &B,
        store: &mut EntityStore<T>,
        cancel: &CancelToken,
        draft: &D,
    ) -> Result<(), AppError>
    where
        B: Backend<T>,
        D: Draft,
    {
        let payload = self.checked_payload(draft)?;
        self.submit = SubmitState::Submitting;
        let result = backend.create(&payload).await;
        self.submit = SubmitState::Idle;
        match result {
            Ok(()) => self.refresh(backend, store, cancel).await,
            Err(e) => {
                log::error!("{e}");
                Err(e)
            }
        }
    }

    pub async fn update<T, B, D>(
        &mut self,
        backend: &B,
        store: &mut EntityStore<T>,
        cancel: &CancelToken,
        id: i64,
        draft: &D,
    ) -> Result<(), AppError>
    where
        B: Backend<T>,
        D: Draft,
    {
        let payload = self.checked_payload(draft)?;
        self.submit = SubmitState::Submitting;
        let result = backend.update(id, &payload).await;
        self.submit = SubmitState::Idle;
        match result {
            Ok(()) => self.refresh(backend, store, cancel).await,
            Err(e) => {
                log::error!("{e}");
                Err(e)
            }
        }
    }

    /// A declined confirmation is a successful no-op: no request is
    /// issued and the collection is left as-is.
    pub async fn delete<T, B>(
        &mut self,
        backend: &B,
        store: &mut EntityStore<T>,
        cancel: &CancelToken,
        id: i64,
        confirmation: Confirmation,
    ) -> Result<(), AppError>
    where
        B: Backend<T>,
    {
        if confirmation == Confirmation::Declined {
            log::debug!("delete of {id} declined, nothing issued");
            return Ok(());
        }
        self.submit = SubmitState::Submitting;
        let result = backend.delete(id).await;
        self.submit = SubmitState::Idle;
        match result {
            Ok(()) => self.refresh(backend, store, cancel).await,
            Err(e) => {
                log::error!("{e}");
                Err(e)
            }
        }
    }

    fn checked_payload<D: Draft>(&self, draft: &D) -> Result<Value, AppError> {
        let problems = draft.validate();
        if !problems.is_empty() {
            return Err(AppError::Validation(problems.join("; ")));
        }
        serde_json::to_value(draft).map_err(AppError::from)
    }

    /// Ordering within one logical operation: the write is awaited before
    /// the refresh read is issued. A failed refresh keeps the previous
    /// collection and surfaces as a fetch problem.
    async fn refresh<T, B: Backend<T>>(
        &self,
        backend: &B,
        store: &mut EntityStore<T>,
        cancel: &CancelToken,
    ) -> Result<(), AppError> {
        store.load(backend, cancel).await
    }
}
