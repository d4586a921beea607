mod client;
mod commands;

use std::io::{self, BufRead, Write};

use clap::Parser;

use crate::client::Client;

/// Interactive client for the login gate's HTTP API.
#[derive(Parser, Debug)]
#[command(name = "loginguard-cli")]
struct Cli {
    /// Base URL of the gate's HTTP server.
    #[arg(long, default_value = "http://127.0.0.1:4000")]
    address: String,
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().pretty().with_env_filter(filter).init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let client = Client::new(&cli.address);

    println!("loginguard-cli connected to {} (type \"help\" for commands)", cli.address);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                tracing::error!(error = %err, "failed to read stdin");
                break;
            }
        };

        match commands::process_command(&client, &line) {
            Some(output) => {
                if !output.is_empty() {
                    println!("{output}");
                }
                print!("> ");
                let _ = stdout.flush();
            }
            None => break,
        }
    }
}
