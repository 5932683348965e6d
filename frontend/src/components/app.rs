use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::auth_screen::AuthScreen;
use super::dashboard::Dashboard;
use super::AppServices;
use crate::api::HttpExpenseApi;
use crate::auth::FirebaseAuth;
use crate::config::AppConfig;
use crate::notify::BrowserNotifier;
use crate::session::{SessionAction, SessionState};
use crate::store::ExpenseStore;

/// Bumped every time the store applies a new list.
#[derive(Default, PartialEq)]
struct StoreVersion(u64);

impl Reducible for StoreVersion {
    type Action = ();

    fn reduce(self: Rc<Self>, _: ()) -> Rc<Self> {
        Rc::new(StoreVersion(self.0 + 1))
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let session = use_reducer(SessionState::default);
    let version = use_reducer(StoreVersion::default);

    let services = {
        let bump = version.dispatcher();
        use_memo(
            move |_| {
                let config = AppConfig::from_build_env();
                tracing::info!("Using expense backend at {}", config.api_base_url);
                let notifier = Rc::new(BrowserNotifier);
                let store = ExpenseStore::new(
                    Rc::new(HttpExpenseApi::new(config.clone())),
                    notifier.clone(),
                    Callback::from(move |_| bump.dispatch(())),
                );
                AppServices {
                    auth: Rc::new(FirebaseAuth::restore(config)),
                    store,
                    notifier,
                }
            },
            (),
        )
    };

    {
        let auth = services.auth.clone();
        let dispatcher = session.dispatcher();
        use_effect_with_deps(
            move |_| {
                let subscription = auth.subscribe(Callback::from(move |identity| {
                    dispatcher.dispatch(SessionAction::IdentityChanged(identity))
                }));
                move || drop(subscription)
            },
            (),
        );
    }

    {
        let store = services.store.clone();
        let owner_id = session.owner_id().map(str::to_string);
        use_effect_with_deps(
            move |owner_id: &Option<String>| {
                if let Some(owner_id) = owner_id.clone() {
                    spawn_local(async move {
                        let _ = store.refresh(&owner_id).await;
                    });
                }
                || ()
            },
            owner_id,
        );
    }

    let content = match session.identity() {
        None => html! { <AuthScreen /> },
        Some(identity) => html! {
            <Dashboard identity={identity.clone()} records={services.store.records()} />
        },
    };

    html! {
        <ContextProvider<AppServices> context={(*services).clone()}>
            <div class="app-container">
                { content }
            </div>
        </ContextProvider<AppServices>>
    }
}
