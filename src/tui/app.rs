//! Main TUI application state and logic

use std::io::Stdout;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use ratatui::Terminal;

use super::adapter;
use super::event::{AppEvent, EventHandler};
use super::theme::Theme;
use super::ui;
use super::widgets::{
    ActionId, Target, Toolbar, ToolbarEffect, ToolbarEvent, ToolbarItem, ToolbarProps,
};
use crate::auth::{CredentialStore, AUTH_TOKEN_KEY};
use crate::config::EnvironmentConfig;
use crate::db::Database;
use crate::portal::Portal;
use crate::routing::{routes, Location};
use crate::store::{Action, AppState, ProjectSummary, Store};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Main TUI application
pub struct TerraApp {
    /// Whether the app should quit
    should_quit: bool,
    /// Color theme
    pub theme: Theme,
    /// Environment configuration
    pub config: EnvironmentConfig,
    /// Credential database
    pub db: Database,
    /// Global application state
    pub store: Store,
    /// Current navigation location
    pub location: Location,
    /// Toolbar presenter
    pub toolbar: Toolbar,
    /// One-shot feedback shown on the status line
    pub status_message: Option<String>,
}

impl TerraApp {
    /// Create the application.
    pub fn new(
        config: EnvironmentConfig,
        portal: Portal,
        project_ids: Vec<String>,
    ) -> Result<Self> {
        let db = Database::open()?;
        db.migrate()?;

        // Restore the session the way a browser load re-reads its cookie
        let auth_token = CredentialStore::new(&db)
            .load(AUTH_TOKEN_KEY)?
            .map(|credential| credential.value)
            .unwrap_or_default();

        let state = AppState {
            auth_token,
            portal,
            project: ProjectSummary {
                collection_ids: project_ids,
            },
            ..AppState::default()
        };
        let store = Store::new(state);
        let toolbar = Toolbar::new(&store.state().saved_project);

        Ok(Self {
            should_quit: false,
            theme: Theme::dark(),
            config,
            db,
            store,
            location: Location::new(routes::SEARCH, ""),
            toolbar,
            status_message: None,
        })
    }

    /// Run the event loop until quit.
    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;
        let mut events = EventHandler::new(Duration::from_millis(250));

        let result = self.event_loop(&mut terminal, &mut events).await;

        restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut Tui, events: &mut EventHandler) -> Result<()> {
        while !self.should_quit {
            // Reconcile the toolbar against upstream state before drawing
            self.toolbar.sync(&self.store.state().saved_project);

            terminal.draw(|frame| ui::render(frame, self))?;

            match events.next().await {
                Some(event) => self.handle_event(event)?,
                None => break,
            }
        }
        Ok(())
    }

    /// Current toolbar items, derived from the store and location.
    pub fn toolbar_items(&self) -> Vec<ToolbarItem> {
        self.toolbar.items(&self.props(), &self.config)
    }

    fn props(&self) -> ToolbarProps {
        adapter::select_props(self.store.state(), &self.location)
    }

    /// Handle an application event
    fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Resize(..) | AppEvent::Tick => Ok(()),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Ctrl+Q always quits, even while editing
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('q') {
            self.should_quit = true;
            return Ok(());
        }

        // The open edit field gets the keyboard first; a consumed key never
        // reaches the global keymap
        if let Some(effects) = self.toolbar.handle_key(&key) {
            return self.apply_effects(effects);
        }

        self.status_message = None;

        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                Ok(())
            }
            KeyCode::Char('s') => self.toggle_save_control(),
            KeyCode::Char('b') => self.activate(ActionId::Back),
            KeyCode::Char('p') => self.activate(ActionId::ViewProject),
            KeyCode::Char('l') => self.activate(ActionId::Login),
            KeyCode::Char('d') => self.activate(ActionId::Downloads),
            KeyCode::Char('v') => self.activate(ActionId::SavedProjects),
            KeyCode::Char('o') => self.activate(ActionId::Logout),
            _ => Ok(()),
        }
    }

    /// Toggle the save-name control, but only when it is rendered.
    fn toggle_save_control(&mut self) -> Result<()> {
        let props = self.props();
        let rendered = self
            .toolbar
            .items(&props, &self.config)
            .iter()
            .any(|item| matches!(item, ToolbarItem::SaveProject { .. }));

        if rendered {
            let effects = self
                .toolbar
                .update(ToolbarEvent::ToggleSave, &props, &self.config);
            self.apply_effects(effects)?;
        }
        Ok(())
    }

    fn activate(&mut self, id: ActionId) -> Result<()> {
        let props = self.props();
        let effects = self
            .toolbar
            .update(ToolbarEvent::Activate(id), &props, &self.config);
        self.apply_effects(effects)
    }

    fn apply_effects(&mut self, effects: Vec<ToolbarEffect>) -> Result<()> {
        for effect in effects {
            match effect {
                ToolbarEffect::Navigate { pathname, search } => {
                    self.navigate(pathname, search)?;
                }
                ToolbarEffect::OpenExternal(url) => {
                    self.open_external(&url);
                }
                ToolbarEffect::Logout {
                    credential_key,
                    target,
                } => {
                    CredentialStore::new(&self.db).remove(credential_key)?;
                    tracing::info!("session credential removed");
                    self.status_message = Some("Logged out".into());
                    match target {
                        Target::Route { pathname, search } => self.navigate(pathname, search)?,
                        Target::External(url) => self.open_external(&url),
                    }
                }
                ToolbarEffect::UpdateProjectName(name) => {
                    adapter::forward_project_name(&mut self.store, name);
                    self.status_message = Some("Project name saved".into());
                }
            }
        }
        Ok(())
    }

    /// Change location. Route changes re-read the stored credential, the
    /// TUI analogue of a browser navigation re-reading the session cookie.
    fn navigate(&mut self, pathname: String, search: String) -> Result<()> {
        tracing::debug!(%pathname, %search, "navigating");
        self.location = Location::new(pathname, search);

        let token = CredentialStore::new(&self.db)
            .load(AUTH_TOKEN_KEY)?
            .map(|credential| credential.value)
            .unwrap_or_default();
        self.store.dispatch(Action::UpdateAuthToken(token));
        Ok(())
    }

    fn open_external(&mut self, url: &str) {
        match webbrowser::open(url) {
            Ok(()) => {
                tracing::info!(%url, "opened external URL");
                self.status_message = Some("Opened in browser".into());
            }
            Err(e) => {
                tracing::warn!(%url, error = %e, "could not open browser");
                self.status_message = Some(format!("Open manually: {}", url));
            }
        }
    }
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
