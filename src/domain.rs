use derive_setters::Setters;
use ratatui::crossterm::event::KeyEvent;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UTError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("could not expand path: {0}")]
    PathExpansion(#[from] shellexpand::LookupError<std::env::VarError>),
    #[error("logging setup failed: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Debug, Clone, Setters)]
#[setters(prefix = "with_")]
pub struct UTConfig {
    /// Milliseconds to wait for a terminal event before redrawing.
    pub event_poll_time: u64,
    pub page_size: usize,
    /// Number of generated users.
    pub rows: usize,
    pub seed: Option<u64>,
    pub date_format: String,
}

impl Default for UTConfig {
    fn default() -> Self {
        UTConfig {
            event_poll_time: 100,
            page_size: 10,
            rows: 100,
            seed: None,
            date_format: "%d %b %Y".to_string(),
        }
    }
}

impl UTConfig {
    pub fn validate(&self) -> Result<(), UTError> {
        if self.page_size == 0 {
            return Err(UTError::InvalidConfig("page size must be at least 1".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CMDMode {
    Search,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Quit,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    PrevPage,
    NextPage,
    FirstPage,
    LastPage,
    ToggleRow,
    TogglePage,
    Sort,
    Search,
    CycleStatusFilter,
    Columns,
    PageSizeUp,
    PageSizeDown,
    Delete,
    CopyRow,
    Help,
    Enter,
    Exit,
    RawKey(KeyEvent),
}

pub const HELP_TEXT: &str = "\
ut - user management table

  q              Quit
  ?              Show this help
  ↑/↓ k/j        Move row cursor
  ←/→ h/l        Move column cursor
  PgUp/PgDn [/]  Previous / next page
  Home/End g/G   First / last page
  +/-            More / fewer rows per page
  Space          Select row
  a              Select all rows on the page
  s              Sort by current column (asc, desc, off)
  /              Search by name or email
  f              Filter status (all, active, inactive)
  v              Show / hide columns
  y              Copy row to clipboard
  d              Delete selected rows
  Esc            Close popup, clear search, clear selection
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_descriptions_line_up() {
        let columns: Vec<usize> = HELP_TEXT
            .lines()
            .filter(|l| l.starts_with("  "))
            .map(|l| {
                let chars: Vec<char> = l.chars().collect();
                // Descriptions start after the first run of two or more spaces past the key
                (3..chars.len())
                    .find(|&i| chars[i - 1] == ' ' && chars[i - 2] == ' ' && chars[i] != ' ')
                    .unwrap()
            })
            .collect();
        assert_eq!(columns.len(), 16);
        assert!(columns.iter().all(|&c| c == columns[0]), "{columns:?}");
    }

    #[test]
    fn zero_page_size_is_invalid() {
        assert!(UTConfig::default().validate().is_ok());
        assert!(UTConfig::default().with_page_size(0).validate().is_err());
    }
}
