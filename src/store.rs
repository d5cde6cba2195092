//! Process-wide application state.
//!
//! Unidirectional data flow: readers take an immutable snapshot of
//! [`AppState`], writers go through [`Store::dispatch`]. All mutation
//! happens synchronously on the event loop, there is no other writer.

use crate::portal::Portal;

/// Saved project metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedProject {
    /// Canonical project name, `None` until the project is first saved.
    pub name: Option<String>,
}

/// The current project: an ordered list of collection concept ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectSummary {
    pub collection_ids: Vec<String>,
}

/// Application state snapshot.
///
/// An empty `auth_token` means the session is not logged in.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub auth_token: String,
    pub portal: Portal,
    pub project: ProjectSummary,
    pub saved_project: SavedProject,
}

impl AppState {
    /// Whether the session carries a credential.
    pub fn logged_in(&self) -> bool {
        !self.auth_token.is_empty()
    }
}

/// Actions accepted by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Replace the session token, empty to clear it.
    UpdateAuthToken(String),
    /// Rename the saved project.
    UpdateProjectName(String),
}

/// Single-writer store with synchronous dispatch.
#[derive(Debug, Default)]
pub struct Store {
    state: AppState,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Read-only snapshot of the current state.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Apply an action to the state.
    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::UpdateAuthToken(token) => {
                tracing::debug!(logged_in = !token.is_empty(), "updating auth token");
                self.state.auth_token = token;
            }
            Action::UpdateProjectName(name) => {
                tracing::debug!(%name, "updating project name");
                self.state.saved_project.name = Some(name);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_project_name_writes_saved_project() {
        let mut store = Store::default();
        assert_eq!(store.state().saved_project.name, None);

        store.dispatch(Action::UpdateProjectName("My Mission".into()));
        assert_eq!(
            store.state().saved_project.name.as_deref(),
            Some("My Mission")
        );
    }

    #[test]
    fn logged_in_requires_non_empty_token() {
        let mut state = AppState::default();
        assert!(!state.logged_in());

        state.auth_token = "EDL-token".into();
        assert!(state.logged_in());
    }
}
