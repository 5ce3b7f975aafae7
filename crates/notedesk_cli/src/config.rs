//! Command-line configuration.

use axum::http::Method;
use clap::{Parser, Subcommand};
use notedesk_core::default_log_level;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Path value selecting a throwaway in-memory database.
pub const IN_MEMORY_DB: &str = ":memory:";

/// Notes and users over a SQLite-backed HTTP API.
#[derive(Parser, Debug)]
#[command(name = "notedesk", author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// SQLite database file, or `:memory:` for an ephemeral database
    #[arg(long, global = true, env = "NOTEDESK_DB", default_value = "notedesk.sqlite3")]
    pub db: PathBuf,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true, env = "NOTEDESK_LOG_LEVEL", default_value = default_log_level())]
    pub log_level: String,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, global = true, env = "NOTEDESK_LOG_DIR")]
    pub log_dir: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the API over HTTP until Ctrl-C
    Serve {
        /// Socket address to listen on
        #[arg(long, env = "NOTEDESK_BIND", default_value = "127.0.0.1:8080")]
        bind: SocketAddr,
    },
    /// Send one request through the API in-process and print the response
    ///
    /// Example: `notedesk call POST /api/notes -d '{"title":"Title","content":"Content"}'`
    Call {
        /// GET, POST, PUT or DELETE
        #[arg(value_parser = parse_method)]
        method: Method,

        /// Resource path, optionally with a query string (e.g. `/api/users/search?name=ada`)
        path: String,

        /// JSON request body for POST and PUT
        #[arg(short = 'd', long = "data")]
        body: Option<String>,
    },
}

impl Args {
    pub fn uses_memory_db(&self) -> bool {
        self.db.as_os_str() == IN_MEMORY_DB
    }
}

fn parse_method(raw: &str) -> Result<Method, String> {
    match raw.trim().to_ascii_uppercase().as_str() {
        "GET" => Ok(Method::GET),
        "POST" => Ok(Method::POST),
        "PUT" => Ok(Method::PUT),
        "DELETE" => Ok(Method::DELETE),
        other => Err(format!(
            "unsupported method `{other}`; expected GET|POST|PUT|DELETE"
        )),
    }
}
