//! Session state: who is logged in, and the transitions between states.
//!
//! ```text
//! Uninitialized --initialize--> Loading --verified--> Authenticated
//!                                  \------rejected--> Anonymous
//! Authenticated --logout / 401 / 403--> Anonymous
//! Anonymous --login--> Authenticated
//! ```
//!
//! [`SessionManager`] is a cheap handle; clones share one state. It is built
//! for a single-threaded event loop and holds no borrow across an `.await`.

use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::{Rc, Weak},
};

use serde::Serialize;
use serde_json::Value;
use shared::{
    config::ClientConfig,
    models::{ApiEnvelope, LoginData, LoginRequest, RegisterRequest, UserRecord},
};
use tracing::{debug, info, warn};

use crate::{
    api::server_message,
    error::ClientError,
    store::{CredentialStore, Credentials},
};

const LOGIN_PATH: &str = "/auth/login";
const REGISTER_PATH: &str = "/auth/register";
const PROFILE_PATH: &str = "/auth/profile";

/// Where the session currently is in its lifecycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    /// `initialize` has not run yet.
    #[default]
    Uninitialized,
    /// Stored credentials are being verified. `pending` is the optimistic
    /// session, already visible through [`SessionManager::current_user`].
    Loading {
        /// Stored credentials awaiting verification; `None` after a logout.
        pending: Option<Credentials>,
    },
    /// Verified credentials, or ones issued by a login.
    Authenticated(Credentials),
    /// Nobody is logged in.
    Anonymous,
}

impl SessionState {
    /// Credentials visible in this state, including the optimistic ones.
    pub fn credentials(&self) -> Option<&Credentials> {
        match self {
            Self::Loading { pending } => pending.as_ref(),
            Self::Authenticated(credentials) => Some(credentials),
            Self::Uninitialized | Self::Anonymous => None,
        }
    }

    /// The user of [`Self::credentials`].
    pub fn user(&self) -> Option<&UserRecord> {
        self.credentials().map(|credentials| &credentials.user)
    }

    /// True until the startup verification has finished.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Uninitialized | Self::Loading { .. })
    }
}

type Listener = Rc<dyn Fn(&SessionState)>;

struct SessionInner {
    config: ClientConfig,
    http: reqwest::Client,
    store: Rc<dyn CredentialStore>,
    state: RefCell<SessionState>,
    listeners: RefCell<Vec<(u64, Listener)>>,
    next_listener: Cell<u64>,
}

/// Injectable session service shared by every view and request.
#[derive(Clone)]
pub struct SessionManager {
    inner: Rc<SessionInner>,
}

impl fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionManager")
            .field("api_url", &self.inner.config.base_url())
            .field("state", &*self.inner.state.borrow())
            .field("listeners", &self.inner.listeners.borrow().len())
            .finish_non_exhaustive()
    }
}

/// Two handles are equal when they share the same session.
impl PartialEq for SessionManager {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

enum AuthReply {
    Accepted(Value),
    Refused(Option<String>),
}

impl SessionManager {
    /// Session over `store`, talking to the backend in `config`.
    pub fn new(config: ClientConfig, store: Rc<dyn CredentialStore>) -> Self {
        Self::with_http(config, store, reqwest::Client::new())
    }

    /// Like [`SessionManager::new`] but reusing a preconfigured HTTP client.
    pub fn with_http(
        config: ClientConfig,
        store: Rc<dyn CredentialStore>,
        http: reqwest::Client,
    ) -> Self {
        Self {
            inner: Rc::new(SessionInner {
                config,
                http,
                store,
                state: RefCell::new(SessionState::Uninitialized),
                listeners: RefCell::new(Vec::new()),
                next_listener: Cell::new(0),
            }),
        }
    }

    /// Backend configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.inner.http
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    /// The logged-in user, if any.
    pub fn current_user(&self) -> Option<UserRecord> {
        self.inner.state.borrow().user().cloned()
    }

    /// Bearer token of the current session.
    pub fn token(&self) -> Option<String> {
        self.inner
            .state
            .borrow()
            .credentials()
            .map(|credentials| credentials.token.clone())
    }

    /// See [`SessionState::is_loading`].
    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().is_loading()
    }

    /// Registers `listener` to run after every state change. The listener is
    /// removed when the returned [`Subscription`] is dropped.
    pub fn subscribe(&self, listener: impl Fn(&SessionState) + 'static) -> Subscription {
        let id = self.inner.next_listener.get();
        self.inner.next_listener.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        Subscription {
            session: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Restores the session from the credential store and verifies it against
    /// `/auth/profile`. Runs once; later calls return the current state.
    pub async fn initialize(&self) -> SessionState {
        if !matches!(*self.inner.state.borrow(), SessionState::Uninitialized) {
            return self.state();
        }

        let stored = Credentials::load(self.inner.store.as_ref());
        let token = stored.as_ref().map(|credentials| credentials.token.clone());
        self.transition(|_| Some(SessionState::Loading { pending: stored }));

        if let Some(token) = token {
            match self.verify(&token).await {
                Ok(()) => debug!("stored session verified"),
                Err(reason) => {
                    warn!(%reason, "stored session rejected");
                    // A login that finished during verification wins.
                    if self.token().as_deref() == Some(token.as_str()) {
                        self.logout();
                    }
                }
            }
        }

        self.transition(|state| match state {
            SessionState::Loading {
                pending: Some(credentials),
            } => Some(SessionState::Authenticated(credentials.clone())),
            SessionState::Loading { pending: None } => Some(SessionState::Anonymous),
            _ => None,
        });
        self.state()
    }

    async fn verify(&self, token: &str) -> Result<(), String> {
        let response = self
            .inner
            .http
            .get(self.inner.config.endpoint(PROFILE_PATH))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|err| err.to_string())?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(format!("profile check returned {status}"))
        }
    }

    /// Logs in with an email and password, persisting the issued credentials.
    ///
    /// A refused or failed request leaves the in-memory state as it was. If
    /// the issued credentials cannot be stored, the session is logged out so
    /// memory and store agree.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserRecord, ClientError> {
        let payload = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let body = match self.submit(LOGIN_PATH, &payload).await? {
            AuthReply::Accepted(body) => body,
            AuthReply::Refused(message) => {
                let message = message.unwrap_or_else(|| "Login failed".to_string());
                info!(%message, "login refused");
                return Err(ClientError::Authentication(message));
            }
        };

        let envelope: ApiEnvelope<LoginData> =
            serde_json::from_value(body).map_err(ClientError::malformed)?;
        let data = envelope
            .data
            .ok_or_else(|| ClientError::malformed("login response carried no data"))?;
        let credentials = Credentials::new(data.token, data.user);
        if let Err(err) = credentials.save(self.inner.store.as_ref()) {
            // The store has just been emptied, so memory must follow.
            warn!(error = %err, "failed to persist credentials; dropping the session");
            self.logout();
            return Err(err.into());
        }

        let user = credentials.user.clone();
        self.transition(move |state| {
            Some(match state {
                SessionState::Loading { .. } => SessionState::Loading {
                    pending: Some(credentials),
                },
                _ => SessionState::Authenticated(credentials),
            })
        });
        info!(user_id = user.id, role = %user.role, "logged in");
        Ok(user)
    }

    /// Creates an account. Does not log in; returns the backend's response body.
    pub async fn register(&self, request: &RegisterRequest) -> Result<Value, ClientError> {
        match self.submit(REGISTER_PATH, request).await? {
            AuthReply::Accepted(body) => {
                info!(username = %request.username, "registered account");
                Ok(body)
            }
            AuthReply::Refused(message) => Err(ClientError::Registration(
                message.unwrap_or_else(|| "Registration failed".to_string()),
            )),
        }
    }

    /// Forgets the session in memory and in the credential store. Idempotent.
    pub fn logout(&self) {
        Credentials::clear(self.inner.store.as_ref());
        let changed = self.transition(|state| match state {
            SessionState::Loading { pending: Some(_) } => {
                Some(SessionState::Loading { pending: None })
            }
            SessionState::Authenticated(_) => Some(SessionState::Anonymous),
            _ => None,
        });
        if changed {
            info!("logged out");
        }
    }

    async fn submit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &B,
    ) -> Result<AuthReply, ClientError> {
        debug!(path, "submitting credentials");
        let response = self
            .inner
            .http
            .post(self.inner.config.endpoint(path))
            .json(payload)
            .send()
            .await
            .map_err(|err| ClientError::transport(&err))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| ClientError::transport(&err))?;

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(body) => {
                let success = body
                    .get("success")
                    .and_then(Value::as_bool)
                    .unwrap_or(false);
                if status.is_success() && success {
                    Ok(AuthReply::Accepted(body))
                } else {
                    Ok(AuthReply::Refused(server_message(&body)))
                }
            }
            Err(err) if status.is_success() => {
                Err(ClientError::malformed(err))
            }
            Err(_) => Ok(AuthReply::Refused(None)),
        }
    }

    /// Applies `next` to the state; listeners run only if it returned a new state.
    fn transition(&self, next: impl FnOnce(&SessionState) -> Option<SessionState>) -> bool {
        let changed = {
            let mut state = self.inner.state.borrow_mut();
            match next(&state) {
                Some(updated) if updated != *state => {
                    *state = updated;
                    true
                }
                _ => false,
            }
        };
        if changed {
            self.notify();
        }
        changed
    }

    fn notify(&self) {
        let snapshot = self.state();
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&snapshot);
        }
    }
}

/// Keeps a [`SessionManager::subscribe`] listener registered while alive.
#[must_use = "the listener is removed when the subscription is dropped"]
pub struct Subscription {
    session: Weak<SessionInner>,
    id: u64,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.session.upgrade() {
            inner
                .listeners
                .borrow_mut()
                .retain(|(id, _)| *id != self.id);
        }
    }
}
