use std::cell::{Cell, RefCell};
use std::rc::Rc;
use yew::Callback;

use crate::api::ExpenseApi;
use crate::error::ApiResult;
use crate::models::{Expense, ExpenseDraft};
use crate::notify::Notifier;

/// Monotonic ticket counter for list requests. A response is admitted only
/// when its ticket is newer than the last admitted one, so a slow request
/// can never overwrite the result of one issued after it.
#[derive(Debug, Default)]
pub struct RequestFence {
    issued: Cell<u64>,
    admitted: Cell<u64>,
}

impl RequestFence {
    pub fn issue(&self) -> u64 {
        let ticket = self.issued.get() + 1;
        self.issued.set(ticket);
        ticket
    }

    pub fn admit(&self, ticket: u64) -> bool {
        if ticket <= self.admitted.get() {
            return false;
        }
        self.admitted.set(ticket);
        true
    }
}

struct StoreInner {
    api: Rc<dyn ExpenseApi>,
    notifier: Rc<dyn Notifier>,
    records: RefCell<Rc<Vec<Expense>>>,
    fence: RequestFence,
    on_change: Callback<()>,
}

/// Local cache of the signed-in user's expenses. The list is only ever
/// replaced wholesale by `refresh`; mutations go to the backend first and
/// then refresh.
#[derive(Clone)]
pub struct ExpenseStore {
    inner: Rc<StoreInner>,
}

impl PartialEq for ExpenseStore {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl ExpenseStore {
    pub fn new(
        api: Rc<dyn ExpenseApi>,
        notifier: Rc<dyn Notifier>,
        on_change: Callback<()>,
    ) -> Self {
        Self {
            inner: Rc::new(StoreInner {
                api,
                notifier,
                records: RefCell::new(Rc::new(Vec::new())),
                fence: RequestFence::default(),
                on_change,
            }),
        }
    }

    pub fn records(&self) -> Rc<Vec<Expense>> {
        self.inner.records.borrow().clone()
    }

    /// Replaces the local list with the backend's. Returns `Ok(false)` when
    /// the response was superseded by a newer refresh. On failure the
    /// previous list is kept.
    pub async fn refresh(&self, owner_id: &str) -> ApiResult<bool> {
        let ticket = self.inner.fence.issue();
        let list = match self.inner.api.list_expenses(owner_id).await {
            Ok(list) => list,
            Err(err) => {
                tracing::warn!("Fetching expenses failed: {}", err);
                return Err(err);
            }
        };

        if !self.inner.fence.admit(ticket) {
            tracing::debug!("Dropping superseded expense list (ticket {})", ticket);
            return Ok(false);
        }

        tracing::debug!("Loaded {} expenses", list.len());
        *self.inner.records.borrow_mut() = Rc::new(list);
        self.inner.on_change.emit(());
        Ok(true)
    }

    /// Creates the record, asks the analyzer about it, then refreshes. A
    /// failed create stops before analyze; a failed analyze stops before the
    /// refresh. Either way the error is returned and the form keeps its text.
    pub async fn add(&self, draft: &ExpenseDraft, owner_id: &str) -> ApiResult<()> {
        if let Err(err) = self.inner.api.create_expense(draft, owner_id).await {
            tracing::error!("Adding expense failed: {}", err);
            return Err(err);
        }

        let response = match self.inner.api.analyze(&draft.analyze_request()).await {
            Ok(response) => response,
            Err(err) => {
                tracing::error!("Spend analysis failed: {}", err);
                return Err(err);
            }
        };
        if let Some(alert) = response.alert.filter(|a| !a.trim().is_empty()) {
            self.inner.notifier.notify(&alert);
        }

        // refresh failures are logged inside and leave the old list visible
        let _ = self.refresh(owner_id).await;
        Ok(())
    }

    /// Deletes and then refreshes whether or not the delete went through,
    /// so the list always reflects what the backend holds.
    pub async fn delete(&self, id: &str, owner_id: &str) -> ApiResult<()> {
        let deleted = self.inner.api.delete_expense(id).await;
        if let Err(err) = &deleted {
            tracing::warn!("Deleting expense {} failed: {}", id, err);
        }
        let _ = self.refresh(owner_id).await;
        deleted
    }

    pub async fn predict(&self) -> Option<f64> {
        match self.inner.api.predict_next_month().await {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!("Prediction failed: {}", err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fence_admits_only_newer_tickets() {
        let fence = RequestFence::default();
        let first = fence.issue();
        let second = fence.issue();
        assert!(second > first);

        assert!(fence.admit(second));
        assert!(!fence.admit(first));
        assert!(!fence.admit(second));

        let third = fence.issue();
        assert!(fence.admit(third));
    }
}
