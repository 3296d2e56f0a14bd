//! Server command implementation

use std::path::Path;

use anyhow::{Context, Result};
use dhanmitra_core::AnalysisEngine;

pub async fn cmd_serve(
    engine: AnalysisEngine,
    host: &str,
    port: u16,
    static_dir: Option<&Path>,
    allowed_origins: Vec<String>,
) -> Result<()> {
    println!("🚀 Starting DhanMitra web server...");
    println!("   Listening: http://{}:{}", host, port);
    println!("   Analyze:   POST http://{}:{}/analyze", host, port);
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }
    if allowed_origins.is_empty() {
        println!("   CORS: same-origin only");
    } else {
        println!("   CORS: {}", allowed_origins.join(", "));
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let config = dhanmitra_server::ServerConfig { allowed_origins };

    let static_dir_str = match static_dir {
        Some(p) => Some(p.to_str().context("static_dir path must be valid UTF-8")?),
        None => None,
    };
    dhanmitra_server::serve(engine, host, port, static_dir_str, config).await?;

    Ok(())
}
