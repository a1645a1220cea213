//! DiaScreen - Interactive diabetes risk screener
//!
//! Band-based threshold scoring over eight health measurements:
//! - Eight labeled numeric entry fields with declared ranges
//! - One trigger action running the input gate, then the scorer
//! - Binary classification with a fixed educational disclaimer

use diascreen::{Console, ScreenerConfig, TelemetryCollector};

use eyre::Result;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging; default to warnings so logs do not interleave
    // with the form output (override with RUST_LOG)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    println!(
        r#"
    ╔══════════════════════════════════════════════════════════════╗
    ║                                                              ║
    ║   ██████╗ ██╗ █████╗ ███████╗ ██████╗██████╗ ███╗   ██╗      ║
    ║   ██╔══██╗██║██╔══██╗██╔════╝██╔════╝██╔══██╗████╗  ██║      ║
    ║   ██║  ██║██║███████║███████╗██║     ██████╔╝██╔██╗ ██║      ║
    ║   ██║  ██║██║██╔══██║╚════██║██║     ██╔══██╗██║╚██╗██║      ║
    ║   ██████╔╝██║██║  ██║███████║╚██████╗██║  ██║██║ ╚████║      ║
    ║   ╚═════╝ ╚═╝╚═╝  ╚═╝╚══════╝ ╚═════╝╚═╝  ╚═╝╚═╝  ╚═══╝      ║
    ║                                                              ║
    ║              D i a S c r e e n   v0.1.0                      ║
    ║         Diabetes Risk Screening - Educational Use            ║
    ║                                                              ║
    ╚══════════════════════════════════════════════════════════════╝
    "#
    );

    // Load configuration
    let config = ScreenerConfig::default();

    // Initialize telemetry collector
    let telemetry = Arc::new(TelemetryCollector::with_config(
        config.telemetry_dir.clone(),
        1000,
    ));
    println!(
        "📊 Telemetry initialized. Data will be exported to {}",
        config.telemetry_dir.display()
    );

    // Create the interactive console
    let console = Console::new(&config, telemetry.clone());

    // Run with graceful shutdown on Ctrl+C
    tokio::select! {
        result = console.run() => {
            if let Err(e) = result {
                eprintln!("❌ Error: {}", e);
                return Err(eyre::eyre!(e.to_string()));
            }
        }
        _ = tokio::signal::ctrl_c() => {
            println!("\n\n🛑 Shutting down gracefully...");
        }
    }

    // Print final statistics
    let stats = telemetry.get_stats();
    println!("\n📊 Final Statistics:");
    println!("   Assessments:     {}", stats.total_assessed);
    println!("   Rejected:        {}", stats.total_rejected);
    println!("   Flagged:         {}", stats.flagged_diabetic);
    println!("   Avg Latency:     {:.2}ms", stats.avg_latency_ms);

    // Export telemetry
    println!("\n📈 Exporting telemetry data...");
    println!("{}", telemetry.generate_session_report());

    if let Err(e) = telemetry.flush() {
        println!("   ❌ Event flush failed: {}", e);
    }

    match telemetry.export_stats_json() {
        Ok(path) => println!("   ✅ JSON exported to: {}", path.display()),
        Err(e) => println!("   ❌ JSON export failed: {}", e),
    }

    match telemetry.export_stats_csv() {
        Ok(path) => println!("   ✅ CSV exported to: {}", path.display()),
        Err(e) => println!("   ❌ CSV export failed: {}", e),
    }

    Ok(())
}
