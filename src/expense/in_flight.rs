//! Tracks expenses with an update or delete waiting on the backend.

use std::{
    collections::HashSet,
    sync::{Arc, Mutex, PoisonError},
};

use crate::{Error, expense::ExpenseId};

/// The set of expense IDs with a mutation in flight, shared by all requests.
#[derive(Debug, Clone, Default)]
pub struct InFlightMutations {
    ids: Arc<Mutex<HashSet<ExpenseId>>>,
}

impl InFlightMutations {
    /// Mark `id` as having a mutation in flight until the guard is dropped.
    ///
    /// # Errors
    ///
    /// Returns [Error::MutationInProgress] if `id` already has a mutation in flight.
    pub fn begin(&self, id: &ExpenseId) -> Result<InFlightGuard, Error> {
        let mut ids = self.ids.lock().unwrap_or_else(PoisonError::into_inner);

        if !ids.insert(id.clone()) {
            tracing::warn!("Rejected change to expense {id}, another change is in flight");
            return Err(Error::MutationInProgress(id.clone()));
        }

        Ok(InFlightGuard {
            ids: self.ids.clone(),
            id: id.clone(),
        })
    }

    pub fn is_in_flight(&self, id: &ExpenseId) -> bool {
        self.ids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(id)
    }
}

/// Releases the expense ID when dropped.
#[derive(Debug)]
pub struct InFlightGuard {
    ids: Arc<Mutex<HashSet<ExpenseId>>>,
    id: ExpenseId,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.ids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.id);
    }
}
