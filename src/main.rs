//! hubq - query the GitHub REST API from the terminal
//!
//! Issues authenticated GET/POST calls, caches GET responses on disk, and
//! prints results as aligned lines with web links.

use std::io::{self, Write};
use std::process;

use clap::Parser;
use env_logger::Env;
use log::info;

use hubq::api::ApiClient;
use hubq::cli::{Cli, Command};
use hubq::config::Config;
use hubq::render::Renderer;

/// Fallback width when the terminal size cannot be detected
const DEFAULT_TERMINAL_WIDTH: usize = 80;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    if let Err(err) = run().await {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = Config::load()?;
    config.ensure_api_key()?;

    match cli.command {
        Command::Get {
            endpoint,
            output,
            headers,
            no_cache,
        } => {
            if no_cache {
                config.api_cache = false;
            }
            let renderer = Renderer::new(config.app_url.clone(), terminal_width());
            let client = ApiClient::new(config)?;

            let result = client.get(&endpoint, headers).await?;

            let mut stdout = io::stdout().lock();
            renderer.render(&mut stdout, &result.body, &output)?;
            if headers {
                print_headers(&mut stdout, &result.headers)?;
            }
        }
        Command::Post {
            endpoint,
            body,
            output,
            headers,
        } => {
            let renderer = Renderer::new(config.app_url.clone(), terminal_width());
            let client = ApiClient::new(config)?;

            let result = client.post(&endpoint, &body).await?;

            let mut stdout = io::stdout().lock();
            renderer.render(&mut stdout, &result.body, &output)?;
            if headers {
                print_headers(&mut stdout, &result.headers)?;
            }
        }
    }

    Ok(())
}

/// Detects the terminal width, falling back to a fixed default
fn terminal_width() -> usize {
    match crossterm::terminal::size() {
        Ok((width, _)) if width > 0 => width as usize,
        _ => {
            info!("could not detect terminal width, using default");
            DEFAULT_TERMINAL_WIDTH
        }
    }
}

/// Prints captured response headers, one per line
fn print_headers<W: Write>(out: &mut W, headers: &[(String, String)]) -> io::Result<()> {
    for (name, value) in headers {
        writeln!(out, "{name}: {value}")?;
    }
    Ok(())
}
