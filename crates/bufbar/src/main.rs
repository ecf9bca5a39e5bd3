//! bufbar - a buffer line in the terminal
//!
//! Opens the given files as documents and shows them in a buffer line with
//! the default key bindings. `--print` renders the bar once to stdout
//! instead of starting the full screen view.

mod terminal_host;

use bufbar_core::{BufferlineConfig, Command, ComponentId, HostEvent, MemoryHost, Mode};
use bufbar_ui::{map_key, Bufferline, KeyAction};
use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::fs::{self, File};
use std::io::stdout;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use terminal_host::TerminalHost;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Terminal buffer line
#[derive(Parser)]
#[command(name = "bufbar")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Files to open; defaults to the files in the working directory
    files: Vec<PathBuf>,

    /// Configuration file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bar command to run after startup, e.g. "sort-by-extension"; repeatable
    #[arg(short = 'r', long = "run", value_name = "COMMAND")]
    commands: Vec<String>,

    /// Print the rendered bar and exit
    #[arg(long)]
    print: bool,

    /// Bar width used with --print
    #[arg(long, default_value_t = 80)]
    width: usize,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let config = match &cli.config {
        Some(path) => BufferlineConfig::load(path)
            .wrap_err_with(|| format!("failed to load {}", path.display()))?,
        None => BufferlineConfig::load_default()?,
    };
    let commands = cli
        .commands
        .iter()
        .map(|text| text.parse::<Command>())
        .collect::<Result<Vec<_>, _>>()?;

    let cwd = std::env::current_dir()?;
    let files = if cli.files.is_empty() {
        files_in(&cwd)?
    } else {
        cli.files.clone()
    };
    let mut documents = MemoryHost::new(cli.width).with_cwd(&cwd);
    for file in &files {
        match config.mode {
            Mode::Buffers => {
                documents.open(file);
            }
            Mode::Tabs => {
                documents.add_tabpage(file.display().to_string());
            }
        }
    }
    info!(count = files.len(), mode = ?config.mode, "opened files");

    if cli.print {
        return print_once(documents, config, commands);
    }

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let theme = config.theme.clone();
    let mut host = TerminalHost::new(documents, terminal, theme);
    let result = run_app(&mut host, config, commands);

    disable_raw_mode()?;
    execute!(
        host.terminal_mut().backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    host.terminal_mut().show_cursor()?;

    result
}

/// Sends logs to a file; the terminal belongs to the UI.
fn init_logging(verbose: bool) -> Result<()> {
    let dir = dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("bufbar");
    fs::create_dir_all(&dir)?;
    let file = File::create(dir.join("bufbar.log"))?;

    let filter = if verbose {
        EnvFilter::from_default_env()
            .add_directive("bufbar=debug".parse()?)
            .add_directive("bufbar_core=debug".parse()?)
            .add_directive("bufbar_ui=debug".parse()?)
    } else {
        EnvFilter::from_default_env().add_directive("bufbar=info".parse()?)
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn print_once(
    mut host: MemoryHost,
    config: BufferlineConfig,
    commands: Vec<Command>,
) -> Result<()> {
    let mut bar = Bufferline::new(config);
    bar.setup(&mut host)?;
    for command in commands {
        bar.execute(&mut host, command);
    }
    println!("{}", host.bar_text());
    for (level, message) in host.notifications() {
        eprintln!("{level:?}: {message}");
    }
    Ok(())
}

fn run_app<B>(
    host: &mut TerminalHost<B>,
    config: BufferlineConfig,
    commands: Vec<Command>,
) -> Result<()>
where
    B: Backend,
    <B as Backend>::Error: std::error::Error + Send + Sync + 'static,
{
    let layout = host.layout()?;
    host.resize(layout.bar.width);

    let mut bar = Bufferline::new(config);
    bar.setup(host)?;
    for command in commands {
        bar.execute(host, command);
    }

    loop {
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) => match map_key(key) {
                Some(KeyAction::Quit) => break,
                Some(KeyAction::Command(command)) => {
                    debug!(?command, "key command");
                    bar.execute(host, command);
                }
                None => {}
            },
            Event::Mouse(mouse) => {
                let MouseEventKind::Down(button) = mouse.kind else {
                    continue;
                };
                let layout = host.layout()?;
                if !layout.on_bar(mouse.column, mouse.row) {
                    continue;
                }
                let rendered = bar.render(&*host);
                let column = usize::from(mouse.column - layout.bar.x);
                let id = match rendered.element_at(column) {
                    Some(ComponentId::Document(id) | ComponentId::Tabpage(id)) => id,
                    _ => continue,
                };
                bar.execute(host, Command::Click { id, button });
            }
            Event::Resize(width, _) => {
                host.resize(width);
                bar.handle_event(host, HostEvent::Resized);
            }
            _ => {}
        }
    }

    Ok(())
}
