use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod controller;
mod domain;
mod generator;
mod inputter;
mod model;
mod record;
mod table;
mod ui;

use controller::Controller;
use domain::{UTConfig, UTError};
use model::{Model, Status};
use ui::TableUI;

/// A tui based user management table over generated sample users.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of users to generate
    #[arg(short = 'n', long, default_value_t = 100)]
    rows: usize,

    /// Seed for reproducible sample data
    #[arg(long)]
    seed: Option<u64>,

    /// Rows per page
    #[arg(short, long, default_value_t = 10)]
    page_size: usize,

    /// Milliseconds to wait for terminal events
    #[arg(long, default_value_t = 100)]
    poll_ms: u64,

    /// chrono format string for the date of birth column
    #[arg(long, default_value = "%d %b %Y")]
    date_format: String,

    /// Log file, supports ~ and environment variables. Level is set with RUST_LOG.
    #[arg(long, default_value = "~/.cache/ut/ut.log")]
    log_file: String,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let result = run(args);
    ratatui::restore();
    match result {
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}

fn init_logging(log_file: &str) -> Result<(), UTError> {
    let path = PathBuf::from(shellexpand::full(log_file)?.into_owned());
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    // The terminal belongs to the ui, so logs only go to the file.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(ErrorLayer::default())
        .try_init()?;
    Ok(())
}

fn run(args: Args) -> Result<(), UTError> {
    init_logging(&args.log_file)?;

    let cfg = UTConfig::default()
        .with_rows(args.rows)
        .with_seed(args.seed)
        .with_page_size(args.page_size)
        .with_event_poll_time(args.poll_ms)
        .with_date_format(args.date_format);
    info!("Starting ut with {:?}", cfg);

    let today = chrono::Local::now().date_naive();
    let users = generator::generate_users(cfg.rows, cfg.seed, today);
    let mut model = Model::init(&cfg, users)?;
    let mut ui = TableUI::new();
    let controller = Controller::new(&cfg);

    let mut terminal = ratatui::init();

    while model.status != Status::QUITTING {
        // Render the current view
        terminal.draw(|f| ui.draw(&model, f))?;

        // Handle events and map to a Message
        let message = controller.handle_event(&model)?;
        model.update(message)?;
    }

    info!("Bye!");
    Ok(())
}
