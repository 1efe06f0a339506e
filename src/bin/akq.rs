use akq_rs::tui::{app::AppState, controller};
use clap::Parser;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::prelude::*;
use std::fs::File;
use std::io::{self, IsTerminal, Stdout};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play one-round Ace/King/Queen against the computer", long_about = None)]
struct Args {
    /// Replay tosses, deals and computer decisions from this seed
    #[arg(long)]
    seed: Option<u64>,
    /// Pause before each computer action
    #[arg(long, default_value_t = 500)]
    delay_ms: u64,
    /// Log destination; the TUI owns the terminal
    #[arg(long, default_value = "akq-rs.log")]
    log_file: PathBuf,
    /// off, error, warn, info, debug or trace
    #[arg(long, default_value = "info", value_parser = parse_level)]
    log_level: log::LevelFilter,
}

fn parse_level(s: &str) -> Result<log::LevelFilter, String> {
    s.parse().map_err(|_| format!("unknown log level '{s}'"))
}

fn init_logging(args: &Args) -> io::Result<()> {
    if args.log_level == log::LevelFilter::Off {
        return Ok(());
    }
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    simplelog::WriteLogger::init(args.log_level, config, File::create(&args.log_file)?)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(
        stdout,
        crossterm::terminal::EnterAlternateScreen,
        crossterm::event::EnableMouseCapture
    )?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        crossterm::event::DisableMouseCapture,
        crossterm::terminal::LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    if !io::stdout().is_terminal() {
        println!(
            "akq-rs TUI requires a real terminal (TTY).\nRun in Terminal and press q to quit. Version: {}",
            akq_rs::VERSION
        );
        return Ok(());
    }
    init_logging(&args)?;
    log::info!("akq-rs {} starting: seed {:?}, delay {}ms", akq_rs::VERSION, args.seed, args.delay_ms);

    let mut terminal = setup_terminal()?;
    let tick_rate = Duration::from_millis(100);
    let mut app = AppState::new(args.seed, args.delay_ms);

    let res = controller::run(&mut terminal, &mut app, tick_rate);

    // Always attempt to restore terminal
    restore_terminal(terminal)?;
    res
}
