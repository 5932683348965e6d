mod support;

use std::cell::RefCell;
use std::rc::Rc;

use expense_tracker::auth::IdentityHub;
use expense_tracker::models::{Category, Identity};
use expense_tracker::session::{SessionAction, SessionState};
use support::harness;
use yew::{Callback, Reducible};

fn identity() -> Identity {
    Identity {
        id: "uid-1".to_string(),
        display_label: "me@example.com".to_string(),
    }
}

/// Wires a hub to a session the same way the app root does.
fn follow(hub: &IdentityHub) -> (Rc<RefCell<Rc<SessionState>>>, expense_tracker::auth::Subscription) {
    let session = Rc::new(RefCell::new(Rc::new(SessionState::default())));
    let sink = session.clone();
    let subscription = hub.subscribe(Callback::from(move |identity| {
        let current = sink.borrow().clone();
        *sink.borrow_mut() = current.reduce(SessionAction::IdentityChanged(identity));
    }));
    (session, subscription)
}

#[test]
fn restored_identity_signs_the_session_in() {
    let hub = IdentityHub::new(Some(identity()));
    let (session, _sub) = follow(&hub);
    assert_eq!(session.borrow().owner_id(), Some("uid-1"));
}

#[tokio::test]
async fn logout_signs_out_even_with_cached_expenses() {
    let h = harness();
    h.backend.seed("uid-1", "Rent", 900.0, Category::Bills);

    let hub = IdentityHub::default();
    let (session, _sub) = follow(&hub);
    assert_eq!(session.borrow().identity(), None);

    hub.publish(Some(identity()));
    let owner = session.borrow().owner_id().map(str::to_string).expect("signed in");
    h.store.refresh(&owner).await.expect("refresh");
    assert_eq!(h.store.records().len(), 1);

    hub.publish(None);
    assert_eq!(session.borrow().identity(), None);
    // the cache is not cleared; the signed-out view simply stops showing it
    assert_eq!(h.store.records().len(), 1);
}
