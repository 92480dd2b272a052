// structview: bind hex data to C struct declarations and browse the result

use std::fs;
use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{info, warn, LevelFilter, SetLoggerError};
use ratatui::{backend::CrosstermBackend, Terminal};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use structview::config::parse_args;
use structview::ui::App;
use structview::view::{render_plain, BoundLayout};

fn print_usage(program_name: &str) {
    eprintln!(
        "Usage: {} <declaration-file> [hex words...] [--little|--big] [--width=<bits>] [--plain] [-v|-vv|-q]",
        program_name
    );
    eprintln!();
    eprintln!("Examples:");
    eprintln!(
        "  {} abc.h 00000001 0000007f 00000002     # Browse in the TUI",
        program_name
    );
    eprintln!(
        "  {} abc.h '0100 0000' --little --plain   # Print the bound layout",
        program_name
    );
}

fn configure_logging(level: LevelFilter) -> Result<(), SetLoggerError> {
    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let program_name = std::env::args()
        .next()
        .unwrap_or_else(|| "structview".to_string());

    let invocation = match parse_args(std::env::args().skip(1)) {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_usage(&program_name);
            std::process::exit(1);
        }
    };
    let config = invocation.config;
    configure_logging(config.log_level)?;

    let path = &invocation.declaration_path;
    let declaration = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: Cannot read '{}': {}", path.display(), e);
            std::process::exit(1);
        }
    };

    info!("parsing {}", path.display());
    let layout = match BoundLayout::build(&declaration, &invocation.hex_words, &config) {
        Ok(layout) => layout,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(err) = &layout.bind_error {
        warn!("{}", err);
    }
    info!(
        "layout needs {} byte(s), {} supplied",
        layout.size(),
        layout.stream.len()
    );

    if config.plain {
        print!("{}", render_plain(&layout.rows()));
        return Ok(());
    }

    // Log lines would be drawn over the alternate screen
    log::set_max_level(LevelFilter::Off);

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(layout, declaration, config);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
