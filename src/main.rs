//! keebctl
//!
//! Enables or disables a laptop's internal keyboard. The mechanism depends on
//! the session: `hyprctl` on Hyprland, atkbd driver rebinding through sysfs on
//! GNOME Wayland, and `xinput` everywhere else.

mod app;
mod backend;
mod config;
mod diagnostics;
mod env;
mod error;
mod locate;
mod platform;

use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use std::process;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use app::{App, Command};
use config::Config;
use env::EnvSignature;
use platform::HostSystem;

const USAGE: &str = "usage: keebctl [disable|enable|check]";

/// Main entry point
fn main() {
    // Logs go to stderr; stdout carries the prompt and results.
    let filter = EnvFilter::try_from_env("KEEBCTL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true)
        .init();

    info!("keebctl starting...");

    let mut app = App::new(Box::new(HostSystem), Config::new_default());
    let args: Vec<String> = std::env::args().skip(1).collect();

    let result = match args.as_slice() {
        [] => run_interactive(&mut app),
        [arg] => match Command::from_arg(arg) {
            Some(command) => run_once(&mut app, command),
            None => {
                eprintln!("{USAGE}");
                process::exit(2);
            }
        },
        _ => {
            eprintln!("{USAGE}");
            process::exit(2);
        }
    };

    match result {
        Ok(true) => process::exit(0),
        Ok(false) => process::exit(1),
        Err(e) => {
            error!("Fatal error: {:#}", e);
            eprintln!("\nFATAL ERROR: {:#}", e);
            process::exit(1);
        }
    }
}

fn run_once(app: &mut App, command: Command) -> Result<bool> {
    let response = app.run(command, &EnvSignature::from_env());
    print_lines(&response.lines)?;
    Ok(response.success)
}

/// Prompt loop; returns on `Q` or end of input.
fn run_interactive(app: &mut App) -> Result<bool> {
    let stdin = io::stdin();
    let mut input = String::new();

    loop {
        print!("\n{}", app::PROMPT);
        io::stdout().flush().context("Failed to flush stdout")?;

        input.clear();
        let read = stdin.lock().read_line(&mut input).context("Failed to read from stdin")?;
        if read == 0 {
            info!("End of input");
            println!();
            break;
        }

        let response = app.handle_input(&input);
        print_lines(&response.lines)?;

        if app.should_exit() {
            info!("Exit requested");
            break;
        }
    }

    Ok(true)
}

fn print_lines(lines: &[String]) -> Result<()> {
    let mut out = io::stdout().lock();
    for line in lines {
        writeln!(out, "{line}").context("Failed to write to stdout")?;
    }
    Ok(())
}
