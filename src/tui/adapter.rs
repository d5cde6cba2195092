//! Store-to-toolbar connector.
//!
//! Selects the toolbar's inputs out of the application state and forwards
//! its single outbound action into the store. No logic beyond field
//! selection and dispatch forwarding belongs here.

use crate::routing::Location;
use crate::store::{Action, AppState, Store};
use crate::tui::widgets::ToolbarProps;

/// Derive the toolbar's props from the current state and location.
pub fn select_props(state: &AppState, location: &Location) -> ToolbarProps {
    ToolbarProps {
        auth_token: state.auth_token.clone(),
        portal: state.portal.clone(),
        project_ids: state.project.collection_ids.clone(),
        saved_project: state.saved_project.clone(),
        location: location.clone(),
    }
}

/// Forward the toolbar's update-project-name action into the store.
pub fn forward_project_name(store: &mut Store, name: String) {
    store.dispatch(Action::UpdateProjectName(name));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portal::Portal;
    use crate::store::{ProjectSummary, SavedProject};

    #[test]
    fn props_are_selected_field_for_field() {
        let state = AppState {
            auth_token: "EDL-abc".into(),
            portal: Portal::new("airquality"),
            project: ProjectSummary {
                collection_ids: vec!["C1000-PROV".into(), "C2000-PROV".into()],
            },
            saved_project: SavedProject {
                name: Some("My Mission".into()),
            },
        };
        let location = Location::new("/search", "?p=C1000-PROV");

        let props = select_props(&state, &location);
        assert_eq!(props.auth_token, "EDL-abc");
        assert_eq!(props.portal, Portal::new("airquality"));
        assert_eq!(props.project_ids, vec!["C1000-PROV", "C2000-PROV"]);
        assert_eq!(props.saved_project.name.as_deref(), Some("My Mission"));
        assert_eq!(props.location, location);
    }

    #[test]
    fn project_name_forwards_as_a_dispatch() {
        let mut store = Store::default();
        forward_project_name(&mut store, "My Mission".into());
        assert_eq!(
            store.state().saved_project.name.as_deref(),
            Some("My Mission")
        );
    }
}
