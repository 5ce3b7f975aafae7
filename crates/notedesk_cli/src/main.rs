//! `notedesk` binary.
//!
//! # Responsibility
//! - Open the SQLite database and build the API router over it.
//! - `serve`: listen for HTTP until Ctrl-C.
//! - `call`: push one request through the router in-process and print the
//!   response.
//!
//! Exit codes for `call`: `0` for 2xx, `1` for 4xx, `3` for 5xx. Any
//! command exits with `2` when the process could not start (bad config,
//! unopenable database, unbindable address).

mod config;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use clap::Parser;
use config::{Args, Command};
use log::{error, info, warn};
use notedesk_core::api::{build_router, AppState};
use notedesk_core::db::{open_db, open_db_in_memory};
use notedesk_core::init_logging;
use std::error::Error;
use std::net::SocketAddr;
use std::process::ExitCode;
use tower::ServiceExt;

type CliResult<T> = Result<T, Box<dyn Error>>;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let code = match run(args).await {
        Ok(code) => code,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("notedesk: {err}");
            ExitCode::from(2)
        }
    };
    // The file logger buffers writes and lives in a static.
    log::logger().flush();
    code
}

async fn run(args: Args) -> CliResult<ExitCode> {
    if let Some(log_dir) = args.log_dir.as_deref() {
        init_logging(&args.log_level, log_dir)?;
    }

    let conn = if args.uses_memory_db() {
        open_db_in_memory()?
    } else {
        open_db(&args.db)?
    };
    let app = build_router(AppState::new(conn));

    match args.command {
        Command::Serve { bind } => {
            serve(app, bind).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Call { method, path, body } => call(app, method, &path, body).await,
    }
}

async fn serve(app: Router, bind: SocketAddr) -> CliResult<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("event=server_start module=cli status=ok bind={bind}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("event=server_stop module=cli status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("event=shutdown_signal module=cli status=error error={err}");
    }
}

async fn call(app: Router, method: Method, path: &str, body: Option<String>) -> CliResult<ExitCode> {
    info!("event=cli_request module=cli method={method} path={path}");
    let builder = Request::builder().method(method).uri(path);
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    print_response(status, &bytes);
    Ok(exit_code(status))
}

fn print_response(status: StatusCode, body: &[u8]) {
    eprintln!("status: {}", status.as_u16());
    if body.is_empty() {
        return;
    }
    match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(text) => println!("{text}"),
            Err(_) => println!("{value}"),
        },
        Err(_) => println!("{}", String::from_utf8_lossy(body)),
    }
}

fn exit_code(status: StatusCode) -> ExitCode {
    if status.is_success() {
        ExitCode::SUCCESS
    } else if status.is_client_error() {
        ExitCode::from(1)
    } else {
        ExitCode::from(3)
    }
}
