use async_trait::async_trait;
use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use yew::Callback;

use crate::config::AppConfig;
use crate::error::AuthError;
use crate::models::Identity;

const SESSION_KEY: &str = "expense_tracker.session";

pub type IdentityListener = Callback<Option<Identity>>;

#[async_trait(?Send)]
pub trait IdentityProvider {
    async fn register(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    async fn login(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    /// Clears the signed-in identity. Subscribers see `None` even when the
    /// persisted session could not be removed.
    async fn logout(&self) -> Result<(), AuthError>;

    /// The listener is called right away with the current identity, then on
    /// every change until the returned guard is dropped.
    fn subscribe(&self, listener: IdentityListener) -> Subscription;
}

struct HubInner {
    current: RefCell<Option<Identity>>,
    listeners: RefCell<Vec<(u64, IdentityListener)>>,
    next_id: Cell<u64>,
}

/// Fan-out point for identity changes.
#[derive(Clone)]
pub struct IdentityHub {
    inner: Rc<HubInner>,
}

impl Default for IdentityHub {
    fn default() -> Self {
        Self::new(None)
    }
}

impl IdentityHub {
    pub fn new(initial: Option<Identity>) -> Self {
        Self {
            inner: Rc::new(HubInner {
                current: RefCell::new(initial),
                listeners: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    pub fn current(&self) -> Option<Identity> {
        self.inner.current.borrow().clone()
    }

    pub fn publish(&self, identity: Option<Identity>) {
        *self.inner.current.borrow_mut() = identity.clone();
        // snapshot so a listener may subscribe/unsubscribe while being notified
        let listeners: Vec<IdentityListener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener.emit(identity.clone());
        }
    }

    pub fn subscribe(&self, listener: IdentityListener) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, listener.clone()));
        listener.emit(self.current());
        Subscription {
            hub: Rc::downgrade(&self.inner),
            id,
        }
    }

    #[cfg(test)]
    fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }
}

#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct Subscription {
    hub: Weak<HubInner>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            hub.listeners
                .borrow_mut()
                .retain(|(id, _)| *id != self.id);
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct StoredSession {
    identity: Identity,
    id_token: String,
    refresh_token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PasswordResponse {
    local_id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    id_token: String,
    #[serde(default)]
    refresh_token: String,
}

#[derive(Deserialize)]
struct ProviderErrorEnvelope {
    error: ProviderErrorBody,
}

#[derive(Deserialize)]
struct ProviderErrorBody {
    message: String,
}

/// Turns a provider error code such as `EMAIL_EXISTS` or
/// `WEAK_PASSWORD : Password should be at least 6 characters` into text a
/// user can act on.
pub fn describe_provider_error(code: &str) -> String {
    if let Some((_, detail)) = code.split_once(" : ") {
        return detail.trim().to_string();
    }
    match code.trim() {
        "EMAIL_EXISTS" => "The email address is already in use by another account.".to_string(),
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            "Invalid email or password.".to_string()
        }
        "INVALID_EMAIL" => "The email address is badly formatted.".to_string(),
        "MISSING_PASSWORD" => "A password is required.".to_string(),
        "USER_DISABLED" => "This account has been disabled.".to_string(),
        "TOO_MANY_ATTEMPTS_TRY_LATER" => {
            "Too many attempts. Please try again later.".to_string()
        }
        other => other.to_string(),
    }
}

fn check_credentials(email: &str, password: &str) -> Result<(), AuthError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }
    Ok(())
}

fn local_storage() -> Result<web_sys::Storage, AuthError> {
    web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .ok_or_else(|| AuthError::Storage("localStorage is not available".to_string()))
}

fn load_session() -> Option<StoredSession> {
    let storage = local_storage().ok()?;
    let raw = storage.get_item(SESSION_KEY).ok().flatten()?;
    match serde_json::from_str::<StoredSession>(&raw) {
        Ok(session) => Some(session),
        Err(err) => {
            tracing::warn!("Discarding unreadable stored session: {}", err);
            None
        }
    }
}

fn save_session(session: &StoredSession) -> Result<(), AuthError> {
    let raw =
        serde_json::to_string(session).map_err(|e| AuthError::Storage(e.to_string()))?;
    local_storage()?
        .set_item(SESSION_KEY, &raw)
        .map_err(|_| AuthError::Storage("could not write session".to_string()))
}

fn clear_session() -> Result<(), AuthError> {
    local_storage()?
        .remove_item(SESSION_KEY)
        .map_err(|_| AuthError::Storage("could not remove session".to_string()))
}

/// Email/password identity backed by the Firebase Identity Toolkit REST API.
pub struct FirebaseAuth {
    config: AppConfig,
    hub: IdentityHub,
}

impl FirebaseAuth {
    /// Restores a previously persisted session, if any.
    pub fn restore(config: AppConfig) -> Self {
        let identity = load_session().map(|session| session.identity);
        if let Some(identity) = &identity {
            tracing::debug!("Restored session for {}", identity.display_label);
        }
        Self {
            config,
            hub: IdentityHub::new(identity),
        }
    }

    async fn password_call(
        &self,
        action: &str,
        email: &str,
        password: &str,
    ) -> Result<Identity, AuthError> {
        check_credentials(email, password)?;

        let url = self.config.identity_url(action);
        let resp = Request::post(&url)
            .json(&PasswordRequest {
                email: email.trim(),
                password,
                return_secure_token: true,
            })?
            .send()
            .await?;

        if !resp.ok() {
            let message = match resp.json::<ProviderErrorEnvelope>().await {
                Ok(envelope) => describe_provider_error(&envelope.error.message),
                Err(_) => format!("Authentication failed ({})", resp.status()),
            };
            return Err(AuthError::Provider(message));
        }

        let body = resp.json::<PasswordResponse>().await?;
        let display_label = body
            .display_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| {
                if body.email.is_empty() {
                    email.trim().to_string()
                } else {
                    body.email.clone()
                }
            });
        let identity = Identity {
            id: body.local_id,
            display_label,
        };

        let session = StoredSession {
            identity: identity.clone(),
            id_token: body.id_token,
            refresh_token: body.refresh_token,
        };
        if let Err(err) = save_session(&session) {
            tracing::warn!("Signed in but session was not persisted: {}", err);
        }

        tracing::info!("Signed in as {}", identity.display_label);
        self.hub.publish(Some(identity.clone()));
        Ok(identity)
    }
}

#[async_trait(?Send)]
impl IdentityProvider for FirebaseAuth {
    async fn register(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        self.password_call("signUp", email, password).await
    }

    async fn login(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        self.password_call("signInWithPassword", email, password).await
    }

    async fn logout(&self) -> Result<(), AuthError> {
        let cleared = clear_session();
        self.hub.publish(None);
        cleared
    }

    fn subscribe(&self, listener: IdentityListener) -> Subscription {
        self.hub.subscribe(listener)
    }
}
