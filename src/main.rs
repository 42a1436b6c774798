// fibtape: unbounded Fibonacci on a tape automaton

use std::io::{self, BufWriter, ErrorKind};
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use fibtape::config::{MachineConfig, RunLimit};
use fibtape::engine::{CancelToken, Machine, Observer, RunError};
use fibtape::snapshot::{DumpObserver, DumpWindow};
use fibtape::tape::constants::{DEFAULT_CAPACITY, DEFAULT_DUMP_LIMIT};
use fibtape::ui::App;

#[derive(Parser)]
#[command(name = "fibtape", version, about = "Unbounded Fibonacci on a tape automaton")]
struct Cli {
    /// Number of cells in the store
    #[arg(long, global = true, env = "FIBTAPE_CAPACITY", default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Stream terms to stdout
    Run(RunArgs),
    /// Step through rounds in an interactive viewer
    View(ViewArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Stop after this many terms
    #[arg(long, env = "FIBTAPE_TERMS")]
    terms: Option<u64>,

    /// Stop after this many seconds
    #[arg(long)]
    duration: Option<u64>,

    /// Dump the start of the store to stderr after every round
    #[arg(long)]
    dump: bool,

    /// Number of dumps before the run stops
    #[arg(long, default_value_t = DEFAULT_DUMP_LIMIT, requires = "dump")]
    dump_limit: u64,
}

#[derive(Args)]
struct ViewArgs {
    /// Byte budget for recorded snapshots
    #[arg(long, default_value_t = 256 * 1024 * 1024)]
    history_limit: usize,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // stdout carries only terms
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .init();
}

fn run(config: &MachineConfig, args: RunArgs) -> Result<()> {
    let mut machine = Machine::new(config).context("failed to seed the machine")?;

    let cancel = CancelToken::new();
    if let Some(seconds) = args.duration {
        let timer = cancel.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_secs(seconds));
            timer.cancel();
        });
    }

    let mut dump;
    let mut none = ();
    let observer: &mut dyn Observer = if args.dump {
        dump = DumpObserver::with_limit(io::stderr(), DumpWindow::default(), args.dump_limit);
        &mut dump
    } else {
        &mut none
    };

    let mut sink = BufWriter::new(io::stdout().lock());
    match machine.run(&mut sink, RunLimit::from(args.terms), &cancel, observer) {
        Ok(summary) => {
            info!(terms = summary.terms, stop = ?summary.stop, "done");
            Ok(())
        }
        // a closed pipe (`fibtape run | head`) is an orderly stop
        Err(RunError::Output(err)) if err.kind() == ErrorKind::BrokenPipe => Ok(()),
        Err(err) if err.is_capacity_exhausted() => Err(err).context(format!(
            "cell store exhausted after {} rounds; raise --capacity",
            machine.round()
        )),
        Err(err) => Err(err).context(format!("run failed in round {}", machine.round())),
    }
}

fn view(config: &MachineConfig, args: ViewArgs) -> Result<()> {
    let machine = Machine::new(config).context("failed to seed the machine")?;

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(machine, args.history_limit);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("viewer failed")
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let config = MachineConfig {
        capacity: cli.capacity,
    };
    let result = match cli.command {
        Command::Run(args) => run(&config, args),
        Command::View(args) => view(&config, args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            warn!(error = %err, "exiting with failure");
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
