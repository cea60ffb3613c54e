use arboard::Clipboard;
use ratatui::crossterm::event::KeyEvent;
use std::time::Instant;
use tracing::{debug, trace, warn};

use crate::domain::{CMDMode, HELP_TEXT, Message, UTConfig, UTError};
use crate::inputter::{InputResult, Inputter};
use crate::record::{ColumnKey, UserId, UserRecord, UserStatus};
use crate::table::{DeleteConfirmation, PageSelection, PageSummary, SortDirection, UserTable};
use crate::ui::COLUMN_WIDTH_MARGIN;

#[derive(Debug, PartialEq)]
pub enum Status {
    READY,
    QUITTING,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Modus {
    TABLE,
    CMDINPUT,
    HELP,
    COLUMNS,
    CONFIRM,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnHeader {
    pub key: ColumnKey,
    pub name: String,
    pub width: usize,
    pub sort: Option<SortDirection>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub selected: bool,
    pub status: UserStatus,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMenuEntry {
    pub name: String,
    pub visible: bool,
}

/// Everything the ui needs to draw one frame.
pub struct UIData {
    pub name: String,
    pub columns: Vec<ColumnHeader>,
    pub rows: Vec<RowView>,
    pub header_selection: PageSelection,
    pub selected_row: usize,
    pub selected_column: usize,
    pub summary: PageSummary,
    pub selected_count: usize,
    pub global_filter: String,
    pub status_filter: Option<UserStatus>,
    pub modus: Modus,
    pub popup_message: String,
    pub column_menu: Vec<ColumnMenuEntry>,
    pub column_menu_row: usize,
    pub cmdinput: InputResult,
    pub active_cmdinput: bool,
    pub status_message: String,
    pub last_status_message_update: Instant,
}

pub struct Model {
    config: UTConfig,
    pub status: Status,
    modus: Modus,
    previous_modus: Modus,
    table: UserTable,
    curser_row: usize,
    curser_column: usize,
    column_menu_row: usize,
    pending_delete: Option<DeleteConfirmation>,
    uidata: UIData,
    clipboard: Option<Clipboard>,
    input: Inputter,
    cmd_mode: Option<CMDMode>,
    filter_before_search: String,
    selection_before_search: Vec<UserId>,
    last_input: InputResult,
    active_cmdinput: bool,
    status_message: String,
    last_status_message_update: Instant,
}

impl Model {
    pub fn init(config: &UTConfig, records: Vec<UserRecord>) -> Result<Self, UTError> {
        config.validate()?;
        let table = UserTable::new(records, config.page_size);
        let mut model = Self {
            config: config.clone(),
            status: Status::READY,
            modus: Modus::TABLE,
            previous_modus: Modus::TABLE,
            uidata: Self::empty_uidata(&table),
            table,
            curser_row: 0,
            curser_column: 0,
            column_menu_row: 0,
            pending_delete: None,
            clipboard: None,
            input: Inputter::default(),
            cmd_mode: None,
            filter_before_search: String::new(),
            selection_before_search: Vec::new(),
            last_input: InputResult::default(),
            active_cmdinput: false,
            status_message: String::new(),
            last_status_message_update: Instant::now(),
        };
        let total = model.table.records().len();
        model.set_status_message(format!("Loaded {total} users"));
        model.update_uidata();
        Ok(model)
    }

    fn empty_uidata(table: &UserTable) -> UIData {
        UIData {
            name: String::new(),
            columns: Vec::new(),
            rows: Vec::new(),
            header_selection: PageSelection::None,
            selected_row: 0,
            selected_column: 0,
            summary: table.page_summary(),
            selected_count: 0,
            global_filter: String::new(),
            status_filter: None,
            modus: Modus::TABLE,
            popup_message: String::new(),
            column_menu: Vec::new(),
            column_menu_row: 0,
            cmdinput: InputResult::default(),
            active_cmdinput: false,
            status_message: String::new(),
            last_status_message_update: Instant::now(),
        }
    }

    pub fn get_uidata(&self) -> &UIData {
        &self.uidata
    }

    pub fn raw_keyevents(&self) -> bool {
        self.active_cmdinput
    }

    pub fn quit(&mut self) {
        self.status = Status::QUITTING;
    }

    fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.last_status_message_update = Instant::now();
        trace!("Status: {}", self.status_message);
    }

    fn current_column(&self) -> Option<ColumnKey> {
        self.table.visible_columns().get(self.curser_column).copied()
    }

    pub fn update(&mut self, message: Option<Message>) -> Result<(), UTError> {
        if let Some(msg) = message {
            match self.modus {
                Modus::TABLE => match msg {
                    Message::Quit => self.quit(),
                    Message::MoveUp => self.move_row_up(),
                    Message::MoveDown => self.move_row_down(),
                    Message::MoveLeft => {
                        self.curser_column = self.curser_column.saturating_sub(1)
                    }
                    Message::MoveRight => self.curser_column += 1,
                    Message::PrevPage => self.table.previous_page(),
                    Message::NextPage => self.table.next_page(),
                    Message::FirstPage => self.table.first_page(),
                    Message::LastPage => self.table.last_page(),
                    Message::PageSizeUp => self.table.cycle_page_size(true),
                    Message::PageSizeDown => self.table.cycle_page_size(false),
                    Message::ToggleRow => self.toggle_current_row(),
                    Message::TogglePage => self.table.toggle_page_selection(),
                    Message::Sort => self.sort_current_column(),
                    Message::Search => self.enter_cmd_mode(CMDMode::Search),
                    Message::CycleStatusFilter => self.cycle_status_filter(),
                    Message::Columns => self.open_popup(Modus::COLUMNS),
                    Message::Delete => self.request_delete(),
                    Message::CopyRow => self.copy_row(),
                    Message::Help => self.open_popup(Modus::HELP),
                    Message::Exit => self.exit(),
                    _ => (),
                },
                Modus::CMDINPUT => {
                    if let Message::RawKey(key) = msg {
                        self.raw_input(key)
                    }
                }
                Modus::HELP => match msg {
                    Message::Quit => self.quit(),
                    Message::Exit | Message::Enter | Message::Help => self.exit(),
                    _ => (),
                },
                Modus::COLUMNS => match msg {
                    Message::Quit => self.quit(),
                    Message::MoveUp => {
                        self.column_menu_row = self.column_menu_row.saturating_sub(1)
                    }
                    Message::MoveDown => {
                        self.column_menu_row =
                            std::cmp::min(self.column_menu_row + 1, ColumnKey::ALL.len() - 1)
                    }
                    Message::ToggleRow | Message::Enter => {
                        self.table.toggle_column(ColumnKey::ALL[self.column_menu_row])
                    }
                    Message::TogglePage => self.table.show_all_columns(),
                    Message::Exit | Message::Columns => self.exit(),
                    _ => (),
                },
                Modus::CONFIRM => match msg {
                    Message::Quit => self.quit(),
                    Message::Enter => self.confirm_delete(),
                    Message::Exit => self.exit(),
                    _ => (),
                },
            }
        }

        self.clamp_cursers();
        self.update_uidata();
        Ok(())
    }

    // -------------------- Control handling functions ---------------------- //

    fn clamp_cursers(&mut self) {
        let rows = self.table.visible_rows().len();
        self.curser_row = std::cmp::min(self.curser_row, rows.saturating_sub(1));
        let columns = self.table.visible_columns().len();
        self.curser_column = std::cmp::min(self.curser_column, columns.saturating_sub(1));
    }

    fn move_row_up(&mut self) {
        if self.curser_row > 0 {
            self.curser_row -= 1;
        } else if self.table.page_summary().page_index > 0 {
            // At the top of the page, continue on the previous one
            self.table.previous_page();
            self.curser_row = self.table.page_summary().page_size - 1;
        }
    }

    fn move_row_down(&mut self) {
        let rows = self.table.visible_rows().len();
        let summary = self.table.page_summary();
        if self.curser_row + 1 < rows {
            self.curser_row += 1;
        } else if summary.page_index + 1 < summary.page_count {
            self.table.next_page();
            self.curser_row = 0;
        }
    }

    fn toggle_current_row(&mut self) {
        let id = self.table.visible_rows().get(self.curser_row).map(|r| r.id);
        if let Some(id) = id {
            self.table.toggle_selected(id);
        }
    }

    fn sort_current_column(&mut self) {
        let Some(column) = self.current_column() else {
            return;
        };
        if !column.is_sortable() {
            self.set_status_message(format!("{} can not be sorted", column.label()));
            return;
        }
        self.table.toggle_sort(column);
        let message = match self.table.sort() {
            Some((column, SortDirection::Ascending)) => format!("Sorted by {} ▲", column.label()),
            Some((column, SortDirection::Descending)) => format!("Sorted by {} ▼", column.label()),
            None => "Sorting cleared".to_string(),
        };
        self.set_status_message(message);
    }

    fn cycle_status_filter(&mut self) {
        self.table.cycle_status_filter();
        let label = self.table.status_filter().map_or("All", |s| s.label());
        self.set_status_message(format!("Status filter: {label}"));
    }

    fn open_popup(&mut self, modus: Modus) {
        trace!("Open popup {:?}", modus);
        self.previous_modus = self.modus;
        self.modus = modus;
        if modus == Modus::HELP {
            self.uidata.popup_message = HELP_TEXT.to_string();
        }
    }

    fn exit(&mut self) {
        match self.modus {
            Modus::TABLE => {
                if !self.table.global_filter().is_empty() {
                    self.table.set_global_filter("");
                    self.set_status_message("Search cleared");
                } else if self.table.selected_count() > 0 {
                    self.table.clear_selection();
                    self.set_status_message("Selection cleared");
                }
            }
            Modus::CONFIRM => {
                // Dropping the confirmation leaves the working set untouched
                self.pending_delete = None;
                self.set_status_message("Delete canceled");
                self.close_popup();
            }
            Modus::HELP | Modus::COLUMNS => self.close_popup(),
            Modus::CMDINPUT => {}
        }
    }

    fn close_popup(&mut self) {
        self.modus = self.previous_modus;
        self.previous_modus = Modus::TABLE;
    }

    fn request_delete(&mut self) {
        match self.table.request_delete() {
            Some(confirmation) => {
                self.uidata.popup_message = format!(
                    "Delete {} selected user(s)? This can not be undone.\n\n<Enter> delete   <Esc> cancel",
                    confirmation.count()
                );
                self.pending_delete = Some(confirmation);
                self.open_popup(Modus::CONFIRM);
            }
            None => self.set_status_message("Nothing selected"),
        }
    }

    fn confirm_delete(&mut self) {
        if let Some(confirmation) = self.pending_delete.take() {
            let removed = self.table.confirm_delete(confirmation);
            self.set_status_message(format!("Deleted {removed} user(s)"));
        }
        self.close_popup();
    }

    fn enter_cmd_mode(&mut self, mode: CMDMode) {
        trace!("Entering command mode ...");
        self.previous_modus = self.modus;
        self.modus = Modus::CMDINPUT;
        self.cmd_mode = Some(mode);
        self.active_cmdinput = true;

        self.filter_before_search = self.table.global_filter().to_string();
        self.selection_before_search = self.table.selected_ids();
        self.input.set(&self.filter_before_search);
        self.last_input = self.input.get();
    }

    fn raw_input(&mut self, key: KeyEvent) {
        if !self.active_cmdinput {
            return;
        }
        self.last_input = self.input.read(key);
        match self.cmd_mode {
            Some(CMDMode::Search) if !self.last_input.canceled => {
                // Live search, the result follows every keystroke
                self.table.set_global_filter(&self.last_input.input);
            }
            _ => {}
        }
        if self.last_input.finished {
            self.handle_cmd_input();
        }
    }

    fn handle_cmd_input(&mut self) {
        trace!("Handle cmd input {:?}", self.last_input);
        self.active_cmdinput = false;
        self.modus = self.previous_modus;
        self.previous_modus = Modus::CMDINPUT;

        if self.last_input.canceled {
            let previous = std::mem::take(&mut self.filter_before_search);
            self.table.set_global_filter(&previous);
            // Typing may have pruned rows from the selection
            let selection = std::mem::take(&mut self.selection_before_search);
            self.table.restore_selection(&selection);
        } else {
            self.selection_before_search.clear();
            let summary = self.table.page_summary();
            self.set_status_message(format!("Found {} results", summary.result_len));
        }
        self.cmd_mode = None;
    }

    fn wrap_cell_content(c: &str) -> String {
        let needs_escaping = c.contains('"');
        let needs_wrapping = c.chars().any(|c| c == ' ' || c == '\t' || c == ',' || c == '"');
        let mut out = String::from(c);

        if needs_escaping {
            out = out.replace('"', "\"\"");
        }
        if needs_wrapping {
            out = format!("\"{out}\"");
        }
        out
    }

    /// The visible columns of the current row as one csv line.
    fn current_row_as_csv(&self) -> Option<String> {
        let rows = self.table.visible_rows();
        let record = rows.get(self.curser_row)?;
        let line = self
            .table
            .visible_columns()
            .iter()
            .map(|c| Self::wrap_cell_content(&c.cell(record, &self.config.date_format)))
            .collect::<Vec<String>>()
            .join(",");
        Some(line)
    }

    fn copy_row(&mut self) {
        let Some(line) = self.current_row_as_csv() else {
            self.set_status_message("Nothing to copy");
            return;
        };
        if self.clipboard.is_none() {
            match Clipboard::new() {
                Ok(clipboard) => self.clipboard = Some(clipboard),
                Err(e) => {
                    warn!("Clipboard unavailable: {:?}", e);
                    self.set_status_message("Clipboard unavailable");
                    return;
                }
            }
        }
        let result = match self.clipboard.as_mut() {
            Some(clipboard) => clipboard.set_text(line),
            None => return,
        };
        match result {
            Ok(_) => {
                trace!("Copied row content to clipboard.");
                self.set_status_message("Copied row to clipboard");
            }
            Err(e) => {
                warn!("Error copying to clipboard: {:?}", e);
                self.set_status_message("Copy to clipboard failed");
            }
        }
    }

    // -------------------- UI data ---------------------- //

    fn update_uidata(&mut self) {
        let table = &self.table;
        let columns = table.visible_columns();
        let records = table.visible_rows();
        let date_format = &self.config.date_format;

        let rows: Vec<RowView> = records
            .iter()
            .map(|record| RowView {
                selected: table.is_selected(record.id),
                status: record.status,
                cells: columns.iter().map(|c| c.cell(record, date_format)).collect(),
            })
            .collect();

        let headers: Vec<ColumnHeader> = columns
            .iter()
            .enumerate()
            .map(|(cidx, column)| {
                let data_width = rows
                    .iter()
                    .map(|r| r.cells[cidx].chars().count())
                    .max()
                    .unwrap_or(0);
                // Room for the sort indicator
                let header_width = column.label().chars().count() + 2;
                ColumnHeader {
                    key: *column,
                    name: column.label().to_string(),
                    width: std::cmp::max(data_width, header_width) + COLUMN_WIDTH_MARGIN,
                    sort: table.sort_indicator(*column),
                }
            })
            .collect();

        let column_menu = ColumnKey::ALL
            .iter()
            .map(|c| ColumnMenuEntry {
                name: c.label().to_string(),
                visible: table.is_column_visible(*c),
            })
            .collect();

        let summary = table.page_summary();
        debug!(
            "UI data: page {}/{}, {} rows, {} columns",
            summary.page_index + 1,
            summary.page_count,
            rows.len(),
            headers.len()
        );

        self.uidata = UIData {
            name: format!("Users ({})", summary.total_len),
            columns: headers,
            rows,
            header_selection: table.page_selection(),
            selected_row: self.curser_row,
            selected_column: self.curser_column,
            summary,
            selected_count: table.selected_count(),
            global_filter: table.global_filter().to_string(),
            status_filter: table.status_filter(),
            modus: self.modus,
            popup_message: std::mem::take(&mut self.uidata.popup_message),
            column_menu,
            column_menu_row: self.column_menu_row,
            cmdinput: self.last_input.clone(),
            active_cmdinput: self.active_cmdinput,
            status_message: self.status_message.clone(),
            last_status_message_update: self.last_status_message_update,
        };
        if self.modus == Modus::TABLE {
            self.uidata.popup_message.clear();
        }
    }
}
