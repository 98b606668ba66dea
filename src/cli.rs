//! Command-line interface parsing
//!
//! Two subcommands mirror the API verbs: `get` reads an endpoint (cached),
//! `post` sends a JSON body. Field selection for the rendered output is a
//! comma-separated `--output` list, `*` for everything, or `false` for
//! nothing.

use clap::{Parser, Subcommand};

use crate::render::OutputSpec;

/// Query the GitHub REST API from the terminal
#[derive(Parser, Debug)]
#[command(name = "hubq")]
#[command(about = "GitHub REST API queries with cached, linked terminal output")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// GET data from the GitHub API. Refer to https://docs.github.com/en/rest
    Get {
        /// Endpoint slug, eg. "repos/acme/widget/issues"
        endpoint: String,

        /// Fields to output in results - comma separated, false to output
        /// nothing, * to show all
        #[arg(long, default_value = "")]
        output: OutputSpec,

        /// Print response headers after the results (forces a live call)
        #[arg(long)]
        headers: bool,

        /// Skip the response cache for this call
        #[arg(long)]
        no_cache: bool,
    },

    /// POST data to the GitHub API. Refer to https://docs.github.com/en/rest
    Post {
        /// Endpoint slug, eg. "repos/acme/widget/issues"
        endpoint: String,

        /// JSON body to send; comments and trailing commas are tolerated
        body: String,

        /// Fields to output in results - comma separated, false to output
        /// nothing, * to show all
        #[arg(long, default_value = "")]
        output: OutputSpec,

        /// Print response headers after the results
        #[arg(long)]
        headers: bool,
    },
}
