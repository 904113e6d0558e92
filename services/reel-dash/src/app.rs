// services/reel-dash/src/app.rs
//
// Key handling and action dispatch between the session state and the store
//

use std::path::PathBuf;

use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent};
use tracing::{error, info, warn};

use svckit::StoreError;

use crate::export;
use crate::pipeline::{self, DerivedView, FilterMode};
use crate::state::{Connection, DashboardState, InputMode, LogLevel};
use crate::store::RecordStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    store: RecordStore,
    pub state: DashboardState,
    export_dir: PathBuf,
}

impl App {
    pub fn new(store: RecordStore, state: DashboardState, export_dir: PathBuf) -> Self {
        Self {
            store,
            state,
            export_dir,
        }
    }

    pub fn endpoint(&self) -> &str {
        self.store.endpoint()
    }

    pub fn view(&self) -> DerivedView {
        pipeline::compute(self.store.records(), &self.state.params)
    }

    /// View for the next draw; pulls page and cursor back into range.
    pub fn frame(&mut self) -> DerivedView {
        let view = self.view();
        self.state.sync_page(view.page);
        self.state.clamp_selection(view.page_rows.len());
        view
    }

    pub async fn refresh(&mut self) {
        match self.store.fetch_all().await {
            Ok(records) => {
                let count = records.len();
                if self.state.connection == Connection::Disconnected {
                    self.state.connection = Connection::Live;
                    self.state.add_log(LogLevel::Info, "Reconnected to record API");
                }
                self.state.add_log(LogLevel::Info, &format!("Loaded {} records", count));
            }
            Err(e) => self.report_failure("Fetch", &e),
        }
    }

    pub async fn submit_form(&mut self) {
        let result = self
            .store
            .create(&self.state.actor_input, &self.state.movie_input)
            .await;

        match result {
            Ok(draft) => {
                self.state.add_log(
                    LogLevel::Info,
                    &format!("Added {} - {}", draft.actor_name, draft.movie_name),
                );
                self.state.clear_form();
                self.state.input_mode = InputMode::Normal;
                self.refresh().await;
            }
            Err(e) => self.report_failure("Create", &e),
        }
    }

    pub async fn delete_selected(&mut self) {
        let view = self.view();
        let Some(record) = view.page_rows.get(self.state.selected) else {
            self.state.add_log(LogLevel::Warn, "No record selected");
            return;
        };

        match self.store.delete(&record.id).await {
            Ok(()) => {
                self.state.add_log(
                    LogLevel::Info,
                    &format!("Deleted {} - {}", record.actor_name, record.movie_name),
                );
                self.refresh().await;
            }
            Err(e) => self.report_failure("Delete", &e),
        }
    }

    pub fn export(&mut self) {
        let today = Utc::now().date_naive();

        match export::write_csv(&self.export_dir, self.store.records(), today) {
            Ok(path) => {
                let path = path.display().to_string();
                info!("Exported {} records to {}", self.store.records().len(), path);
                self.state.add_log(LogLevel::Info, &format!("Exported CSV to {}", path));
                self.state.last_export = Some(path);
            }
            Err(e) => {
                error!("CSV export failed: {:#}", e);
                self.state.add_log(LogLevel::Error, &format!("Export failed: {:#}", e));
            }
        }
    }

    pub async fn handle_key(&mut self, key: KeyEvent) -> Flow {
        match self.state.input_mode {
            InputMode::Normal => return self.handle_normal_key(key).await,
            InputMode::EditingFilter => match key.code {
                KeyCode::Enter | KeyCode::Esc => self.state.input_mode = InputMode::Normal,
                KeyCode::Backspace => self.state.pop_filter_char(),
                KeyCode::Char(c) => self.state.push_filter_char(c),
                _ => {}
            },
            InputMode::EditingActor | InputMode::EditingMovie => match key.code {
                KeyCode::Esc => self.state.input_mode = InputMode::Normal,
                KeyCode::Tab | KeyCode::BackTab => self.state.switch_form_field(),
                KeyCode::Enter => self.submit_form().await,
                KeyCode::Backspace => {
                    if let Some(input) = self.state.form_input() {
                        input.pop();
                    }
                }
                KeyCode::Char(c) => {
                    if let Some(input) = self.state.form_input() {
                        input.push(c);
                    }
                }
                _ => {}
            },
        }
        Flow::Continue
    }

    async fn handle_normal_key(&mut self, key: KeyEvent) -> Flow {
        let view = self.view();

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Flow::Quit,
            KeyCode::Char('r') => self.refresh().await,
            KeyCode::Char('f') => self.state.cycle_filter_mode(),
            KeyCode::Char('/') => {
                // typing a search with no mode selected searches actors
                if self.state.params.filter_mode == FilterMode::All {
                    self.state.cycle_filter_mode();
                }
                self.state.input_mode = InputMode::EditingFilter;
            }
            KeyCode::Char('s') => self.state.cycle_sort_mode(),
            KeyCode::Left | KeyCode::Char('p') => self.state.prev_page(),
            KeyCode::Right | KeyCode::Char('n') => self.state.next_page(view.page_count),
            KeyCode::Up | KeyCode::Char('k') => self.state.select_up(),
            KeyCode::Down | KeyCode::Char('j') => self.state.select_down(view.page_rows.len()),
            KeyCode::Char('a') => self.state.open_form(),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected().await,
            KeyCode::Char('e') => self.export(),
            KeyCode::Char('c') => self.state.toggle_sidebar(),
            _ => {}
        }
        Flow::Continue
    }

    /// Store failures are logged and shown, never fatal; local data stays as it was.
    fn report_failure(&mut self, action: &str, err: &StoreError) {
        match err {
            StoreError::ValidationError(_) => {
                warn!("{} rejected: {}", action, err);
                self.state.add_log(LogLevel::Warn, &format!("{} rejected: {}", action, err));
            }
            _ => {
                error!("{} failed against {}: {}", action, self.store.endpoint(), err);
                if err.is_transport() && self.state.connection == Connection::Live {
                    self.state.connection = Connection::Disconnected;
                }
                self.state.add_log(LogLevel::Error, &format!("{} failed: {}", action, err));
            }
        }
    }
}
