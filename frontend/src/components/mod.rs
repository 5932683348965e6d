mod app;
mod auth_screen;
pub mod charts;
mod dashboard;
mod icons;

pub use app::App;

use std::rc::Rc;

use crate::auth::IdentityProvider;
use crate::notify::Notifier;
use crate::store::ExpenseStore;

/// Collaborators shared through context by every page.
#[derive(Clone)]
pub struct AppServices {
    pub auth: Rc<dyn IdentityProvider>,
    pub store: ExpenseStore,
    pub notifier: Rc<dyn Notifier>,
}

impl PartialEq for AppServices {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.auth, &other.auth) && self.store == other.store
    }
}
