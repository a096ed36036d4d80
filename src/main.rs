// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Remora CLI - HTTP capture demo
//!
//! Example usage and demonstration of the remora library.

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;

use remora::{CaptureInterceptor, FileStore, HttpClient, MemoryStore, ModuleRegistry};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("remora=info".parse().unwrap()),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    let result = match args[1].as_str() {
        "fetch" => {
            if args.len() < 3 {
                eprintln!("Usage: remora fetch <url> [module]");
                return ExitCode::from(1);
            }
            let module = args.get(3).map(String::as_str).unwrap_or("cli");
            fetch_url(&args[2], module).await
        }
        "record" => {
            if args.len() < 4 {
                eprintln!("Usage: remora record <dir> <url> [module]");
                return ExitCode::from(1);
            }
            let module = args.get(4).map(String::as_str).unwrap_or("cli");
            record_url(&args[2], &args[3], module).await
        }
        "dump" => {
            if args.len() < 4 {
                eprintln!("Usage: remora dump <dir> <module>");
                return ExitCode::from(1);
            }
            dump_captures(&args[2], &args[3]).await
        }
        "--help" | "-h" | "help" => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        "--version" | "-v" | "version" => {
            println!("remora {}", env!("CARGO_PKG_VERSION"));
            return ExitCode::SUCCESS;
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            return ExitCode::from(1);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

/// Capture a single GET into an in-memory store and print the record
async fn fetch_url(url: &str, module: &str) -> anyhow::Result<()> {
    let registry = Arc::new(ModuleRegistry::new());
    registry.set_capture(module, true);

    let interceptor = CaptureInterceptor::new(
        HttpClient::new()?,
        Arc::clone(&registry),
        Arc::new(MemoryStore::new()),
    );

    let response = interceptor
        .get(module, url)
        .await
        .with_context(|| format!("fetching {}", url))?;
    println!(
        "{} {} ({} bytes, {} ms)",
        response.status_code(),
        url,
        response.body_len(),
        response.response_time_ms
    );

    interceptor.flush().await?;
    for record in interceptor.module_captures(module).await? {
        println!("{}", serde_json::to_string_pretty(&record)?);
    }
    Ok(())
}

/// Capture a single GET into a file store under <dir>
async fn record_url(dir: &str, url: &str, module: &str) -> anyhow::Result<()> {
    let registry = Arc::new(ModuleRegistry::new());
    registry.set_capture(module, true);

    let store = Arc::new(FileStore::new(dir).with_registry(Arc::clone(&registry)));
    let interceptor =
        CaptureInterceptor::new(HttpClient::new()?, Arc::clone(&registry), store);

    let response = interceptor
        .get(module, url)
        .await
        .with_context(|| format!("fetching {}", url))?;
    interceptor.flush().await?;

    println!(
        "{} {} captured under module '{}' in {}",
        response.status_code(),
        url,
        module,
        dir
    );
    Ok(())
}

/// Print stored captures for a module
async fn dump_captures(dir: &str, module: &str) -> anyhow::Result<()> {
    let store = FileStore::new(dir);
    let records = remora::CaptureSink::module_captures(&store, module).await?;

    if records.is_empty() {
        println!("No captures for module '{}' in {}", module, dir);
        return Ok(());
    }

    for record in &records {
        let status = record
            .status()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        let error = record
            .error
            .as_deref()
            .map(|e| format!(" error: {}", e))
            .unwrap_or_default();
        println!(
            "{}  {:6} {} -> {} ({} ms){}",
            record.started_at.format("%Y-%m-%d %H:%M:%S"),
            record.request.method,
            record.request.url,
            status,
            record.duration_ms,
            error
        );
    }
    println!("{} capture(s)", records.len());
    Ok(())
}

fn print_usage() {
    println!(
        r#"Remora - HTTP Traffic Capture & Inspection

USAGE:
    remora <COMMAND> [OPTIONS]

COMMANDS:
    fetch <url> [module]           Capture a GET and print the record
    record <dir> <url> [module]    Capture a GET into a file store
    dump <dir> <module>            Print stored captures for a module
    help                           Show this help message
    version                        Show version information

EXAMPLES:
    remora fetch https://example.com/api/users
    remora record ./captures https://example.com/api/users checkout
    remora dump ./captures checkout

For more information, see: https://github.com/bountyyfi/remora
"#
    );
}
