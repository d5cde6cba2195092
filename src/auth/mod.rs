//! Session credentials and login redirects.
//!
//! This module handles:
//! - Credential storage in SQLite
//! - Building login redirect URLs for the unauthenticated actions

mod login;
mod storage;

pub use login::login_url;
pub use storage::{CredentialStore, CredentialStoreError, StoredCredential, AUTH_TOKEN_KEY};
