use std::rc::Rc;
use yew::Reducible;

use crate::models::Identity;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    identity: Option<Identity>,
}

pub enum SessionAction {
    IdentityChanged(Option<Identity>),
}

impl SessionState {
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn owner_id(&self) -> Option<&str> {
        self.identity.as_ref().map(|identity| identity.id.as_str())
    }
}

impl Reducible for SessionState {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            SessionAction::IdentityChanged(identity) => Rc::new(SessionState { identity }),
        }
    }
}
