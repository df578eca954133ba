mod app;

use std::io::{self, BufRead, Write};

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use airfleet_core::DataStore;

use app::AppContext;

fn main() -> Result<()> {
    init_logging();

    let store = DataStore::new(DataStore::default_path());
    let airport = store.load().unwrap_or_else(|err| {
        tracing::warn!("could not load saved data: {err}");
        Default::default()
    });
    let mut ctx = AppContext::new(airport, store);

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        run_interactive(&mut ctx)
    } else {
        if !ctx.execute(&args) {
            std::process::exit(1);
        }
        Ok(())
    }
}

fn run_interactive(ctx: &mut AppContext) -> Result<()> {
    println!("Entering interactive mode. Type 'help' for commands or 'exit' to quit.");
    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF behaves like exit.
            break;
        }
        let input = line.trim();
        if input.eq_ignore_ascii_case("exit") {
            println!("Exiting interactive mode.");
            break;
        }
        if input.is_empty() {
            continue;
        }
        ctx.execute(&app::tokenize(input));
    }
    Ok(())
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("airfleet=info"));

    // Logs go to stderr so command output on stdout stays clean.
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .compact()
                .with_writer(io::stderr),
        )
        .init();
}
