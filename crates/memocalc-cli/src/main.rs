//! memocalc: terminal calculator with persistent history and memory
//!
//! ## Usage
//!
//! ```bash
//! memocalc                          # Interactive calculator (same as `memocalc tui`)
//! memocalc eval "(1+2)x3"           # Prints 9
//! memocalc --data-dir ./calc history
//! memocalc --ephemeral              # Nothing read or written
//! ```

use std::io::{self, Stdout};
use std::process::ExitCode;

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use memocalc::{Calculator, Storage};
use memocalc_cli::{
    handlers::{execute_eval, execute_history, execute_memory},
    init_logging,
    tui::{render, CalculatorApp, InputHandler},
    Cli, CliConfig, CliResult, Commands, LogConfig,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = CliConfig::from_cli(&cli)?;
    let command = cli.command.unwrap_or(Commands::Tui);

    // The TUI owns the terminal, so it only logs when there is a file to log to.
    let log_config = LogConfig::from_verbosity(config.verbosity);
    match command {
        Commands::Tui => {
            if let Some(path) = config.tui_log_file() {
                init_logging(&log_config.with_log_file(Some(path)))?;
            }
        }
        _ => init_logging(&log_config.with_log_file(config.log_file.clone()))?,
    }

    let storage = config.open_storage();
    match command {
        Commands::Tui => run_tui(storage),
        Commands::Eval(args) => execute_eval(storage, &args.expression, &mut io::stdout().lock()),
        Commands::History(args) => execute_history(storage, args.clear, &mut io::stdout().lock()),
        Commands::Memory(args) => execute_memory(storage, args.clear, &mut io::stdout().lock()),
    }
}

fn run_tui(storage: Box<dyn Storage>) -> CliResult<()> {
    let mut app = CalculatorApp::new(Calculator::open(storage));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal: Terminal<CrosstermBackend<Stdout>> =
        Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: Backend, S: Storage>(
    terminal: &mut Terminal<B>,
    app: &mut CalculatorApp<S>,
) -> CliResult<()> {
    let input = InputHandler::new();

    while !app.should_quit() {
        terminal.draw(|frame| {
            app.set_viewport(frame.area());
            render(app, frame);
        })?;
        app.handle_input(input.handle_event(&event::read()?));
    }

    Ok(())
}
