//! CLI definitions for task-api.

use clap::Parser;
use std::net::IpAddr;

/// Default port for the HTTP API.
pub const DEFAULT_PORT: u16 = 8000;

/// Default bind address; loopback only unless overridden.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default database file, created next to the working directory.
pub const DEFAULT_DB_PATH: &str = "tasks.db";

/// RESTful task management API backed by SQLite
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to database file
    #[arg(short, long, default_value = DEFAULT_DB_PATH)]
    pub database: String,

    /// Address to bind (use 0.0.0.0 to listen on all interfaces)
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2")]
    pub log: String,
}
