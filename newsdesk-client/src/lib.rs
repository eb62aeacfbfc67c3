//! Session management and authenticated API access for the Newsdesk admin.
//!
//! The pieces, leaves first:
//!
//! - [`store`]: persistent credential storage (memory, file, browser).
//! - [`session`]: the [`SessionManager`] owning "who is logged in".
//! - [`api`]: the [`ApiClient`] that attaches bearer tokens and enforces the
//!   expiry contract.
//! - [`guard`]: the pure route-guard decision.
//! - [`resources`]: typed wrappers for the newsroom endpoints.
//! - [`scope`]: ties in-flight requests to the view that started them.

pub mod api;
pub mod error;
pub mod guard;
pub mod resources;
pub mod scope;
pub mod session;
pub mod store;

pub use api::{ApiClient, HttpMethod, RequestOptions};
pub use error::{ClientError, StoreError};
pub use guard::{Access, GuardDecision, decide, login_redirect_target};
pub use scope::ViewScope;
pub use session::{SessionManager, SessionState, Subscription};
pub use store::{CredentialStore, Credentials, MemoryStore};
