#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;
use expense_tracker::api::ExpenseApi;
use expense_tracker::error::{ApiError, ApiResult};
use expense_tracker::models::{
    AnalyzeRequest, AnalyzeResponse, Category, Expense, ExpenseDraft,
};
use expense_tracker::notify::Notifier;
use expense_tracker::store::ExpenseStore;
use tokio::sync::oneshot;
use yew::Callback;

fn unavailable() -> ApiError {
    ApiError::Status {
        status: 503,
        body: "service unavailable".to_string(),
    }
}

/// In-memory stand-in for the expense backend. Every call is recorded so
/// tests can assert on what was (and was not) requested.
#[derive(Default)]
pub struct FakeBackend {
    pub records: RefCell<Vec<Expense>>,
    pub calls: RefCell<Vec<String>>,
    pub analyzed: RefCell<Vec<AnalyzeRequest>>,
    pub alert: RefCell<Option<String>>,
    pub prediction: Cell<f64>,
    pub fail_list: Cell<bool>,
    pub fail_create: Cell<bool>,
    pub fail_delete: Cell<bool>,
    pub fail_analyze: Cell<bool>,
    pub fail_predict: Cell<bool>,
    list_gate: RefCell<Option<oneshot::Receiver<()>>>,
    next_id: Cell<u32>,
}

impl FakeBackend {
    pub fn seed(&self, owner_id: &str, title: &str, amount: f64, category: Category) -> String {
        let id = self.allocate_id();
        self.records.borrow_mut().push(Expense {
            id: id.clone(),
            title: title.to_string(),
            amount,
            category,
            owner_id: owner_id.to_string(),
            created_at: None,
        });
        id
    }

    /// The next list call snapshots the data immediately but does not
    /// answer until the returned sender fires.
    pub fn hold_next_list(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.list_gate.borrow_mut() = Some(rx);
        tx
    }

    pub fn calls_to(&self, prefix: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }

    fn allocate_id(&self) -> String {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        format!("exp-{id}")
    }
}

#[async_trait(?Send)]
impl ExpenseApi for FakeBackend {
    async fn list_expenses(&self, owner_id: &str) -> ApiResult<Vec<Expense>> {
        self.calls.borrow_mut().push(format!("list:{owner_id}"));
        let gate = self.list_gate.borrow_mut().take();
        let snapshot: Vec<Expense> = self
            .records
            .borrow()
            .iter()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if self.fail_list.get() {
            return Err(ApiError::Network("connection reset".to_string()));
        }
        Ok(snapshot)
    }

    async fn create_expense(&self, draft: &ExpenseDraft, owner_id: &str) -> ApiResult<()> {
        self.calls.borrow_mut().push(format!("create:{}", draft.title));
        if self.fail_create.get() {
            return Err(unavailable());
        }
        self.seed(
            owner_id,
            &draft.title,
            draft.amount,
            draft.category.clone().unwrap_or(Category::Other),
        );
        Ok(())
    }

    async fn delete_expense(&self, id: &str) -> ApiResult<()> {
        self.calls.borrow_mut().push(format!("delete:{id}"));
        if self.fail_delete.get() {
            return Err(unavailable());
        }
        self.records.borrow_mut().retain(|r| r.id != id);
        Ok(())
    }

    async fn analyze(&self, request: &AnalyzeRequest) -> ApiResult<AnalyzeResponse> {
        self.calls.borrow_mut().push("analyze".to_string());
        self.analyzed.borrow_mut().push(request.clone());
        if self.fail_analyze.get() {
            return Err(ApiError::Decode("unexpected body".to_string()));
        }
        Ok(AnalyzeResponse {
            alert: self.alert.borrow().clone(),
        })
    }

    async fn predict_next_month(&self) -> ApiResult<f64> {
        self.calls.borrow_mut().push("predict".to_string());
        if self.fail_predict.get() {
            return Err(unavailable());
        }
        Ok(self.prediction.get())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub messages: RefCell<Vec<String>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

pub struct Harness {
    pub backend: Rc<FakeBackend>,
    pub notifier: Rc<RecordingNotifier>,
    pub changes: Rc<Cell<u32>>,
    pub store: ExpenseStore,
}

pub fn harness() -> Harness {
    let backend = Rc::new(FakeBackend::default());
    let notifier = Rc::new(RecordingNotifier::default());
    let changes = Rc::new(Cell::new(0));
    let counter = changes.clone();
    let store = ExpenseStore::new(
        backend.clone(),
        notifier.clone(),
        Callback::from(move |_| counter.set(counter.get() + 1)),
    );
    Harness {
        backend,
        notifier,
        changes,
        store,
    }
}

pub fn draft(title: &str, amount: f64, category: Option<Category>) -> ExpenseDraft {
    ExpenseDraft {
        title: title.to_string(),
        amount,
        category,
    }
}
