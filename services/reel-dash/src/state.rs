// services/reel-dash/src/state.rs
//
// Dashboard session state: view params, form inputs, selection, activity log
//

use chrono::{DateTime, Local};

use crate::pipeline::ViewParams;

const MAX_LOG_ENTRIES: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    EditingFilter,
    EditingActor,
    EditingMovie,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub message: String,
}

/// Where records come from, for the header badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connection {
    Demo,
    Live,
    Disconnected,
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    pub params: ViewParams,
    pub input_mode: InputMode,

    // Add-record form
    pub actor_input: String,
    pub movie_input: String,

    // Row cursor within the current page
    pub selected: usize,

    pub sidebar_collapsed: bool,
    pub connection: Connection,
    pub last_export: Option<String>,

    pub activity_log: Vec<LogEntry>,
}

impl DashboardState {
    pub fn new(page_size: usize, connection: Connection) -> Self {
        Self {
            params: ViewParams::with_page_size(page_size),
            input_mode: InputMode::Normal,
            actor_input: String::new(),
            movie_input: String::new(),
            selected: 0,
            sidebar_collapsed: false,
            connection,
            last_export: None,
            activity_log: Vec::new(),
        }
    }

    pub fn cycle_filter_mode(&mut self) {
        self.params.filter_mode = self.params.filter_mode.next();
        self.reset_page();
    }

    pub fn cycle_sort_mode(&mut self) {
        self.params.sort_mode = self.params.sort_mode.next();
        self.reset_page();
    }

    pub fn push_filter_char(&mut self, c: char) {
        self.params.filter_text.push(c);
        self.reset_page();
    }

    pub fn pop_filter_char(&mut self) {
        if self.params.filter_text.pop().is_some() {
            self.reset_page();
        }
    }

    /// `page_count` comes from the last computed view
    pub fn next_page(&mut self, page_count: usize) {
        if self.params.page < page_count {
            self.params.page += 1;
            self.selected = 0;
        }
    }

    pub fn prev_page(&mut self) {
        if self.params.page > 1 {
            self.params.page -= 1;
            self.selected = 0;
        }
    }

    /// Keep the stored page in step with the clamped page actually shown
    pub fn sync_page(&mut self, shown_page: usize) {
        self.params.page = shown_page;
    }

    pub fn select_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_down(&mut self, row_count: usize) {
        if self.selected + 1 < row_count {
            self.selected += 1;
        }
    }

    pub fn clamp_selection(&mut self, row_count: usize) {
        self.selected = self.selected.min(row_count.saturating_sub(1));
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_collapsed = !self.sidebar_collapsed;
    }

    pub fn open_form(&mut self) {
        self.input_mode = InputMode::EditingActor;
    }

    pub fn switch_form_field(&mut self) {
        self.input_mode = match self.input_mode {
            InputMode::EditingActor => InputMode::EditingMovie,
            InputMode::EditingMovie => InputMode::EditingActor,
            other => other,
        };
    }

    /// Form field the cursor is in, if the add-record form is open
    pub fn form_input(&mut self) -> Option<&mut String> {
        match self.input_mode {
            InputMode::EditingActor => Some(&mut self.actor_input),
            InputMode::EditingMovie => Some(&mut self.movie_input),
            InputMode::Normal | InputMode::EditingFilter => None,
        }
    }

    pub fn clear_form(&mut self) {
        self.actor_input.clear();
        self.movie_input.clear();
    }

    pub fn add_log(&mut self, level: LogLevel, message: &str) {
        self.activity_log.push(LogEntry {
            timestamp: Local::now(),
            level,
            message: message.to_string(),
        });

        if self.activity_log.len() > MAX_LOG_ENTRIES {
            self.activity_log.remove(0);
        }
    }

    fn reset_page(&mut self) {
        self.params.page = 1;
        self.selected = 0;
    }
}
