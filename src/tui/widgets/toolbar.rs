//! Secondary toolbar: session and project actions.
//!
//! The toolbar renders from externally owned state (session token, project
//! ids, saved project, location) and owns exactly one piece of local state:
//! the project-name edit buffer. Everything it renders is decided by
//! [`Toolbar::items`], a pure function of props plus that buffer, and every
//! activation comes back out as a [`ToolbarEffect`] for the owner to run.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::auth::{login_url, AUTH_TOKEN_KEY};
use crate::config::EnvironmentConfig;
use crate::portal::Portal;
use crate::routing::{is_path, routes, Location};
use crate::store::SavedProject;
use crate::tui::theme::Theme;

/// Name applied when the draft or upstream name is empty.
pub const UNTITLED: &str = "Untitled Project";

/// External inputs the toolbar renders from, immutable per frame.
#[derive(Debug, Clone, Default)]
pub struct ToolbarProps {
    pub auth_token: String,
    pub project_ids: Vec<String>,
    pub location: Location,
    pub portal: Portal,
    pub saved_project: SavedProject,
}

impl ToolbarProps {
    fn logged_in(&self) -> bool {
        !self.auth_token.is_empty()
    }
}

/// Where an activated entry sends the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// In-app route change.
    Route { pathname: String, search: String },
    /// External URL opened in the system browser.
    External(String),
}

/// One entry of the rendered toolbar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolbarItem {
    /// Return to the search page, shown on the projects page only.
    Back { target: Target },
    /// Open the current project.
    ViewProject { target: Target },
    /// Save-project-name control with its edit field state.
    SaveProject { open: bool, draft: String },
    /// Log in through the external login service.
    Login { target: Target },
    /// Authenticated user menu.
    UserMenu { entries: Vec<MenuEntry> },
}

/// An entry of the user menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: &'static str,
    pub action: MenuAction,
    pub target: Target,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Navigate,
    Logout,
}

/// Identifies an activatable toolbar action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionId {
    Back,
    ViewProject,
    Login,
    Downloads,
    SavedProjects,
    Logout,
}

/// Inbound toolbar events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolbarEvent {
    /// Flip the save-name control open or closed.
    ToggleSave,
    /// Replace the draft text.
    DraftChanged(String),
    /// Confirm the save-name control.
    SubmitName,
    /// Activate a navigation entry.
    Activate(ActionId),
}

/// Side effects requested by the toolbar, run by its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolbarEffect {
    /// Change the in-app location.
    Navigate { pathname: String, search: String },
    /// Open an external URL in the system browser.
    OpenExternal(String),
    /// Remove a stored credential, then follow the entry's own target.
    Logout {
        credential_key: &'static str,
        target: Target,
    },
    /// Publish the new project name.
    UpdateProjectName(String),
}

/// Locally buffered, transient edit state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    pub open: bool,
    pub draft: String,
}

/// The toolbar presenter.
#[derive(Debug, Clone)]
pub struct Toolbar {
    edit: EditBuffer,
    /// Upstream name last reconciled against, for old-vs-new comparison.
    seen_name: Option<String>,
}

impl Toolbar {
    /// Create the toolbar, seeding the draft from the upstream name.
    pub fn new(saved_project: &SavedProject) -> Self {
        Self {
            edit: EditBuffer {
                open: false,
                draft: display_name(&saved_project.name),
            },
            seen_name: saved_project.name.clone(),
        }
    }

    pub fn edit_buffer(&self) -> &EditBuffer {
        &self.edit
    }

    /// Reconcile the edit buffer against the upstream name.
    ///
    /// When the name differs from the one last seen, the draft is
    /// overwritten, unsaved edits included. External truth wins; local
    /// edits are never merged.
    pub fn sync(&mut self, saved_project: &SavedProject) {
        if self.seen_name != saved_project.name {
            self.seen_name = saved_project.name.clone();
            self.edit.draft = display_name(&saved_project.name);
        }
    }

    /// The render decision table.
    ///
    /// Ordering and visibility rules:
    /// - on `/projects`: back action, never together with view-project
    /// - elsewhere with a non-empty project: view-project, routed in-app
    ///   when logged in, through the login service otherwise
    /// - on `/search` while logged in: the save-name control
    /// - always last: login action, or the user menu when logged in
    pub fn items(&self, props: &ToolbarProps, config: &EnvironmentConfig) -> Vec<ToolbarItem> {
        let mut items = Vec::new();

        if is_path(&props.location.pathname, &[routes::PROJECTS]) {
            items.push(ToolbarItem::Back {
                target: Target::Route {
                    pathname: routes::SEARCH.to_string(),
                    search: props.location.search.clone(),
                },
            });
        } else if !props.project_ids.is_empty() {
            let target = if props.logged_in() {
                Target::Route {
                    pathname: routes::PROJECTS.to_string(),
                    search: props.location.search.clone(),
                }
            } else {
                let project_url = format!(
                    "{}{}{}",
                    config.app_host.trim_end_matches('/'),
                    routes::PROJECTS,
                    props.location.search
                );
                Target::External(login_url(config, &project_url))
            };
            items.push(ToolbarItem::ViewProject { target });
        }

        if is_path(&props.location.pathname, &[routes::SEARCH]) && props.logged_in() {
            items.push(ToolbarItem::SaveProject {
                open: self.edit.open,
                draft: self.edit.draft.clone(),
            });
        }

        if props.logged_in() {
            items.push(ToolbarItem::UserMenu {
                entries: user_menu_entries(&props.portal),
            });
        } else {
            let return_url = props.location.href(&config.app_host);
            items.push(ToolbarItem::Login {
                target: Target::External(login_url(config, &return_url)),
            });
        }

        items
    }

    /// Apply an inbound event, returning the effects the owner must run.
    pub fn update(
        &mut self,
        event: ToolbarEvent,
        props: &ToolbarProps,
        config: &EnvironmentConfig,
    ) -> Vec<ToolbarEffect> {
        match event {
            ToolbarEvent::ToggleSave => {
                self.edit.open = !self.edit.open;
                Vec::new()
            }
            ToolbarEvent::DraftChanged(draft) => {
                self.edit.draft = draft;
                Vec::new()
            }
            ToolbarEvent::SubmitName => {
                if self.edit.open {
                    self.submit()
                } else {
                    Vec::new()
                }
            }
            ToolbarEvent::Activate(id) => self.activate(id, props, config),
        }
    }

    /// Handle a key press while the edit field is open.
    ///
    /// Returns `None` when the field is closed, `Some(effects)` when the
    /// key was consumed. Enter confirms and must not propagate further.
    pub fn handle_key(&mut self, key: &KeyEvent) -> Option<Vec<ToolbarEffect>> {
        if !self.edit.open {
            return None;
        }

        match key.code {
            KeyCode::Enter => Some(self.submit()),
            KeyCode::Esc => {
                self.edit.open = false;
                Some(Vec::new())
            }
            KeyCode::Backspace => {
                self.edit.draft.pop();
                Some(Vec::new())
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.edit.draft.push(c);
                Some(Vec::new())
            }
            // The open field owns the keyboard
            _ => Some(Vec::new()),
        }
    }

    fn submit(&mut self) -> Vec<ToolbarEffect> {
        let name = if self.edit.draft.is_empty() {
            UNTITLED.to_string()
        } else {
            self.edit.draft.clone()
        };

        self.edit.open = false;
        self.edit.draft = name.clone();

        vec![ToolbarEffect::UpdateProjectName(name)]
    }

    /// Resolve an activation against the current decision table. Actions
    /// that are not currently rendered resolve to nothing.
    fn activate(
        &self,
        id: ActionId,
        props: &ToolbarProps,
        config: &EnvironmentConfig,
    ) -> Vec<ToolbarEffect> {
        for item in self.items(props, config) {
            match (id, item) {
                (ActionId::Back, ToolbarItem::Back { target })
                | (ActionId::ViewProject, ToolbarItem::ViewProject { target })
                | (ActionId::Login, ToolbarItem::Login { target }) => {
                    return vec![target_effect(target)];
                }
                (_, ToolbarItem::UserMenu { entries }) => {
                    if let Some(effect) = menu_effect(id, entries) {
                        return vec![effect];
                    }
                }
                _ => {}
            }
        }
        Vec::new()
    }
}

fn user_menu_entries(portal: &Portal) -> Vec<MenuEntry> {
    let prefix = portal.path_prefix();
    vec![
        MenuEntry {
            label: "Download Status & History",
            action: MenuAction::Navigate,
            target: Target::Route {
                pathname: format!("{}{}", prefix, routes::DOWNLOADS),
                search: String::new(),
            },
        },
        MenuEntry {
            label: "Saved Projects",
            action: MenuAction::Navigate,
            target: Target::Route {
                pathname: format!("{}{}", prefix, routes::SAVED_PROJECTS),
                search: String::new(),
            },
        },
        MenuEntry {
            label: "Logout",
            action: MenuAction::Logout,
            target: Target::Route {
                pathname: format!("{}{}", prefix, routes::HOME),
                search: String::new(),
            },
        },
    ]
}

fn menu_effect(id: ActionId, entries: Vec<MenuEntry>) -> Option<ToolbarEffect> {
    let wanted = |entry: &MenuEntry| match (id, entry.action) {
        (ActionId::Logout, MenuAction::Logout) => true,
        (ActionId::Downloads, MenuAction::Navigate) => entry.label.starts_with("Download"),
        (ActionId::SavedProjects, MenuAction::Navigate) => entry.label == "Saved Projects",
        _ => false,
    };

    let entry = entries.into_iter().find(wanted)?;
    match entry.action {
        MenuAction::Logout => Some(ToolbarEffect::Logout {
            credential_key: AUTH_TOKEN_KEY,
            target: entry.target,
        }),
        MenuAction::Navigate => Some(target_effect(entry.target)),
    }
}

fn target_effect(target: Target) -> ToolbarEffect {
    match target {
        Target::Route { pathname, search } => ToolbarEffect::Navigate { pathname, search },
        Target::External(url) => ToolbarEffect::OpenExternal(url),
    }
}

fn display_name(name: &Option<String>) -> String {
    match name.as_deref() {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => UNTITLED.to_string(),
    }
}

/// Renders the toolbar items on a single line.
pub struct ToolbarWidget<'a> {
    items: &'a [ToolbarItem],
    theme: &'a Theme,
}

impl<'a> ToolbarWidget<'a> {
    pub fn new(items: &'a [ToolbarItem], theme: &'a Theme) -> Self {
        Self { items, theme }
    }

    fn item_spans(&self, item: &'a ToolbarItem) -> Vec<Span<'a>> {
        let key_style = Style::default().fg(self.theme.accent);
        let label_style = Style::default().fg(self.theme.text);

        match item {
            ToolbarItem::Back { .. } => vec![
                Span::styled("[b] ", key_style),
                Span::styled("Back to Search", label_style),
            ],
            ToolbarItem::ViewProject { .. } => vec![
                Span::styled("[p] ", key_style),
                Span::styled("My Project", label_style),
            ],
            ToolbarItem::SaveProject { open: false, .. } => vec![
                Span::styled("[s] ", key_style),
                Span::styled("Save ▾", label_style),
            ],
            ToolbarItem::SaveProject { open: true, draft } => vec![
                Span::styled("[s] ", key_style),
                Span::styled("Name: ", label_style),
                Span::styled(
                    format!("{}▏", draft),
                    Style::default()
                        .fg(self.theme.text)
                        .add_modifier(Modifier::UNDERLINED),
                ),
                Span::styled("  Enter: save", Style::default().fg(self.theme.text_muted)),
            ],
            ToolbarItem::Login { .. } => vec![
                Span::styled("[l] ", key_style),
                Span::styled("Login", label_style),
            ],
            ToolbarItem::UserMenu { .. } => vec![
                Span::styled("[d] ", key_style),
                Span::styled("Downloads", label_style),
                Span::styled(" │ ", Style::default().fg(self.theme.text_muted)),
                Span::styled("[v] ", key_style),
                Span::styled("Saved Projects", label_style),
                Span::styled(" │ ", Style::default().fg(self.theme.text_muted)),
                Span::styled("[o] ", key_style),
                Span::styled("Logout", label_style),
            ],
        }
    }
}

impl Widget for ToolbarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let separator = Style::default().fg(self.theme.border);
        let mut spans = vec![Span::raw(" ")];

        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ┃  ", separator));
            }
            spans.extend(self.item_spans(item));
        }

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
