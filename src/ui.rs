use std::time::Duration;

use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Position, Rect},
    style::{Color, Modifier, Style, Stylize},
    symbols::border,
    text::{Line, Span, Text},
    widgets::{Block, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
};

use crate::model::{Model, Modus, UIData};
use crate::record::{ColumnKey, UserStatus};
use crate::table::{PageSelection, SortDirection};

pub const TOOLBAR_HEIGHT: u16 = 1;
pub const CMDLINE_HEIGH: u16 = 1;
pub const COLUMN_WIDTH_MARGIN: usize = 1;
pub const CHECKBOX_WIDTH: u16 = 3;
const STATUS_MESSAGE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Default)]
pub struct TableUI {
    table_state: TableState,
}

impl TableUI {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draw(&mut self, model: &Model, frame: &mut Frame) {
        let uidata = model.get_uidata();
        let [toolbar_area, table_area, cmdline_area] = Layout::vertical([
            Constraint::Length(TOOLBAR_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(CMDLINE_HEIGH),
        ])
        .areas(frame.area());

        self.draw_toolbar(uidata, frame, toolbar_area);
        self.draw_table(uidata, frame, table_area);
        self.draw_cmdline(uidata, frame, cmdline_area);

        match uidata.modus {
            Modus::HELP => Self::draw_popup(frame, " Help ", &uidata.popup_message),
            Modus::CONFIRM => Self::draw_popup(frame, " Delete users ", &uidata.popup_message),
            Modus::COLUMNS => Self::draw_column_menu(uidata, frame),
            Modus::TABLE | Modus::CMDINPUT => {}
        }
    }

    fn draw_toolbar(&self, uidata: &UIData, frame: &mut Frame, area: Rect) {
        let status = match uidata.status_filter {
            Some(status) => status.label(),
            None => "All",
        };
        let prefix = " Search: ";
        let search: Span = if uidata.active_cmdinput {
            Span::from(uidata.cmdinput.input.clone()).yellow()
        } else if uidata.global_filter.is_empty() {
            "name or email".dark_gray()
        } else {
            uidata.global_filter.clone().into()
        };
        let line = Line::from(vec![
            prefix.bold(),
            search,
            "  │ Status: ".bold(),
            status.into(),
            "  │ Selected: ".bold(),
            uidata.selected_count.to_string().into(),
            "  │ ".into(),
            "<?> help".blue(),
        ]);
        frame.render_widget(Paragraph::new(line), area);

        if uidata.active_cmdinput {
            let x = area.x + prefix.chars().count() as u16 + uidata.cmdinput.curser_pos as u16;
            frame.set_cursor_position(Position::new(x.min(area.right().saturating_sub(1)), area.y));
        }
    }

    fn checkbox(selection: PageSelection) -> &'static str {
        match selection {
            PageSelection::All => "[x]",
            PageSelection::Partial => "[-]",
            PageSelection::None => "[ ]",
        }
    }

    fn draw_table(&mut self, uidata: &UIData, frame: &mut Frame, area: Rect) {
        let header_cells = std::iter::once(Cell::from(Self::checkbox(uidata.header_selection)))
            .chain(uidata.columns.iter().map(|c| {
                let indicator = match c.sort {
                    Some(SortDirection::Ascending) => " ▲",
                    Some(SortDirection::Descending) => " ▼",
                    None => "",
                };
                Cell::from(format!("{}{}", c.name, indicator))
            }));
        let header = Row::new(header_cells)
            .style(Style::new().bold().bg(Color::DarkGray))
            .height(1);

        let rows = uidata.rows.iter().map(|r| {
            let checkbox = if r.selected { "[x]" } else { "[ ]" };
            let cells = std::iter::once(Cell::from(checkbox)).chain(
                uidata.columns.iter().zip(r.cells.iter()).map(|(column, c)| {
                    if column.key == ColumnKey::Status {
                        Cell::from(Self::status_badge(r.status))
                    } else {
                        Cell::from(c.as_str())
                    }
                }),
            );
            let row = Row::new(cells);
            if r.selected {
                row.style(Style::new().add_modifier(Modifier::BOLD))
            } else {
                row
            }
        });

        let widths = std::iter::once(Constraint::Length(CHECKBOX_WIDTH))
            .chain(uidata.columns.iter().map(|c| Constraint::Length(c.width as u16)));

        let title = Line::from(Span::from(format!(" {} ", uidata.name)).bold());
        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::bordered()
                    .title(title.centered())
                    .border_set(border::ROUNDED),
            )
            .column_spacing(1)
            .row_highlight_style(Style::new().reversed())
            .column_highlight_style(Style::new().underlined());

        if uidata.rows.is_empty() {
            self.table_state.select(None);
            self.table_state.select_column(None);
        } else {
            self.table_state.select(Some(uidata.selected_row));
            // Column 0 is the checkbox
            self.table_state.select_column(Some(uidata.selected_column + 1));
        }
        frame.render_stateful_widget(table, area, &mut self.table_state);

        if uidata.rows.is_empty() {
            let inner = Block::bordered().inner(area);
            let [_, message_area] =
                Layout::vertical([Constraint::Length(2), Constraint::Length(1)]).areas(inner);
            frame.render_widget(Paragraph::new("No results.".dark_gray()).centered(), message_area);
        }
    }

    fn status_badge(status: UserStatus) -> Span<'static> {
        match status {
            UserStatus::Active => status.label().black().on_green(),
            UserStatus::Inactive => status.label().white().on_dark_gray(),
        }
    }

    fn draw_cmdline(&self, uidata: &UIData, frame: &mut Frame, area: Rect) {
        let summary = &uidata.summary;
        let first = summary.page_index * summary.page_size;
        let last = std::cmp::min(first + summary.page_size, summary.result_len);
        let showing = if summary.result_len == 0 {
            "0".to_string()
        } else {
            format!("{}-{}", first + 1, last)
        };

        let pagination = Line::from(vec![
            " Rows per page ".bold(),
            summary.page_size.to_string().into(),
            "  │ ".into(),
            format!("{} of {} ({} total)", showing, summary.result_len, summary.total_len).into(),
            "  │ ".into(),
            "Page ".bold(),
            (summary.page_index + 1).to_string().into(),
            " of ".dark_gray(),
            summary.page_count.to_string().into(),
            " ".into(),
        ]);

        let message = if uidata.last_status_message_update.elapsed() < STATUS_MESSAGE_TIMEOUT {
            uidata.status_message.as_str()
        } else {
            ""
        };

        let [left, right] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(pagination.width() as u16)])
                .areas(area);
        frame.render_widget(Paragraph::new(Line::from(message.italic())), left);
        frame.render_widget(Paragraph::new(pagination).right_aligned(), right);
    }

    fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
        let [area] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);
        let [area] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(area);
        area
    }

    fn draw_popup(frame: &mut Frame, title: &str, message: &str) {
        let text = Text::from(message);
        let width = text.width() as u16 + 4;
        let height = text.height() as u16 + 2;
        let area = Self::popup_area(frame.area(), width, height);

        let block = Block::bordered()
            .title(Line::from(title.bold()).centered())
            .border_set(border::THICK);
        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(text).block(block).wrap(Wrap { trim: false }),
            area,
        );
    }

    fn draw_column_menu(uidata: &UIData, frame: &mut Frame) {
        let lines: Vec<Line> = uidata
            .column_menu
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                let checkbox = if entry.visible { "[x] " } else { "[ ] " };
                let line = Line::from(format!(" {}{} ", checkbox, entry.name));
                if idx == uidata.column_menu_row {
                    line.reversed()
                } else {
                    line
                }
            })
            .collect();
        let help = Line::from(" <Space> toggle  <a> all  <Esc> close ".dark_gray());
        let width = std::cmp::max(
            lines.iter().map(|l| l.width()).max().unwrap_or(0),
            help.width(),
        ) as u16
            + 2;
        let height = lines.len() as u16 + 3;

        let mut text = Text::from(lines);
        text.push_line(help);

        let area = Self::popup_area(frame.area(), width, height);
        let block = Block::bordered()
            .title(Line::from(" Toggle columns ".bold()).centered())
            .border_set(border::THICK);
        frame.render_widget(Clear, area);
        frame.render_widget(Paragraph::new(text).block(block), area);
    }
}
