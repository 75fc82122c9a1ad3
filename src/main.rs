//! plantdesk - Plant Layout Runner
//!
//! Edits a YAML plant model in the terminal, submits it to the layout
//! service and shows the returned station grid. The `submit` and `sample`
//! subcommands run the same round-trips without the interface.

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::LevelFilter;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::error::Error;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use plantdesk::application::{App, AppContext};
use plantdesk::config::{Cli, Command, OutputFormat};
use plantdesk::domain::{CsvExporter, GridRenderer};
use plantdesk::infrastructure::{FileRepository, HttpSubmissionClient, SubmissionClient};
use plantdesk::presentation::{render_html, render_text, render_ui, InputHandler};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let client = HttpSubmissionClient::new(cli.server.clone(), cli.timeout())?;

    match &cli.command {
        Some(Command::Submit { model, format }) => {
            init_stderr_logging(cli.log_level_filter());
            run_submit(&client, model, *format)
        }
        Some(Command::Sample) => {
            init_stderr_logging(cli.log_level_filter());
            print!("{}", client.fetch_sample()?);
            Ok(())
        }
        None => {
            init_file_logging(cli.log_level_filter(), &cli.log_file)?;
            run_interactive(&cli, Arc::new(client))
        }
    }
}

fn init_stderr_logging(level: LevelFilter) {
    env_logger::Builder::new().filter_level(level).init();
}

/// The terminal UI owns stdout, so logs go to a file instead.
fn init_file_logging(level: LevelFilter, path: &Path) -> io::Result<()> {
    let log_file = OpenOptions::new().create(true).append(true).open(path)?;
    env_logger::Builder::new()
        .filter_level(level)
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();
    Ok(())
}

fn run_submit(client: &dyn SubmissionClient, model: &str, format: OutputFormat) -> Result<(), Box<dyn Error>> {
    let document = FileRepository::load_model(model)?;
    let result = client.submit(&document)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Table => write!(out, "{}", render_text(&GridRenderer::build(&result.grid)))?,
        OutputFormat::Html => write!(out, "{}", render_html(&GridRenderer::build(&result.grid)))?,
        OutputFormat::Json => writeln!(out, "{}", result.raw.trim_end())?,
        OutputFormat::Csv => CsvExporter::write_grid(&result.grid, &mut out)?,
    }
    out.flush()?;
    Ok(())
}

fn run_interactive(cli: &Cli, client: Arc<dyn SubmissionClient>) -> Result<(), Box<dyn Error>> {
    let mut app = App::new(AppContext::new(client, cli.output_dir.clone()));
    if let Some(model) = &cli.model {
        // A bad path is reported in the status bar; the editor starts empty.
        let _ = app.import_model(model);
    }
    log::info!("Starting interactive session against {}", cli.server);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        log::error!("Terminal failure: {err}");
        println!("{err:?}");
    }

    Ok(())
}

/// Main event loop.
///
/// Applies finished requests, redraws, then waits briefly for a key so
/// completions are picked up even while the user is idle.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        app.poll_completions();
        terminal.draw(|f| render_ui(f, app))?;

        if app.should_quit {
            return Ok(());
        }

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    InputHandler::handle_key_event(app, key.code, key.modifiers);
                }
            }
        }
    }
}
