use catch_report::adapters::build_sources;
use catch_report::config::cli::CliArgs;
use catch_report::utils::error::{CatchError, ErrorSeverity};
use catch_report::utils::{logger, validation::Validate};
use catch_report::{AppConfig, CatchPipeline, LocalStorage, ReportEngine};
use clap::Parser;

fn exit_code(e: &CatchError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn fail(context: &str, e: &CatchError) -> ! {
    tracing::error!(
        "❌ {}: {} (Category: {:?}, Severity: {:?})",
        context,
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code(e).max(1));
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🎣 Starting catch-report");

    let mut config = match args.config_path() {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            match AppConfig::from_file(&path) {
                Ok(config) => config,
                Err(e) => fail(&format!("Failed to load config file '{}'", path.display()), &e),
            }
        }
        None => {
            tracing::info!("📁 No config file, using built-in settings");
            AppConfig::default()
        }
    };
    args.apply(&mut config);

    if let Err(e) = config.validate() {
        fail("Configuration validation failed", &e);
    }
    tracing::info!("✅ Configuration loaded and validated successfully");

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be fetched or written");
        display_config_summary(&config, &args);
        return Ok(());
    }

    if args.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.output_dir());
    let mut pipeline = match CatchPipeline::new(storage, config) {
        Ok(pipeline) => pipeline,
        Err(e) => fail("Failed to set up the pipeline", &e),
    };
    if let Some(date) = args.date {
        tracing::info!("📅 Building the report as of {}", date);
        pipeline = pipeline.with_date(date);
    }

    let engine = ReportEngine::new_with_monitoring(pipeline, args.monitor);

    match engine.run().await {
        Ok(location) => {
            tracing::info!("✅ Catch report completed successfully!");
            println!("✅ Catch report completed successfully!");
            println!("📁 Output saved to: {}", location);
        }
        Err(e) => {
            tracing::error!(
                "❌ Catch report failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let code = exit_code(&e);
            if code > 0 {
                std::process::exit(code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &AppConfig, args: &CliArgs) {
    println!("📋 Configuration Summary:");
    println!("  Output: {}", config.output_dir());
    println!(
        "  Files: {}, {}, {}",
        config.report.json_file, config.report.html_file, config.report.history_file
    );
    println!(
        "  Merge: min evidence {}, max {} record(s) per spot",
        config.report.min_evidence, config.report.max_records
    );
    println!(
        "  Site: {:.2}N {:.2}E (UTC{:+})",
        config.site.latitude, config.site.longitude, config.site.utc_offset_hours
    );
    if let Some(date) = args.date {
        println!("  As of: {}", date);
    }
    println!();

    println!("📡 Sources:");
    if config.report.offline {
        println!("  📴 Offline: seasonal patterns only");
    } else {
        let enabled = build_sources(&config.sources);
        for (tag, source) in config.sources.iter() {
            let state = if enabled.iter().any(|s| s.tag() == tag) { "on" } else { "off" };
            let urls = if source.urls.is_empty() {
                "built-in URLs".to_string()
            } else {
                source.urls.join(", ")
            };
            println!("  {} [{}]: {}", tag, state, urls);
        }
        println!(
            "  Timeout {}s, {}ms between requests",
            config.http.timeout_seconds, config.http.politeness_delay_ms
        );
    }
    println!();

    println!("📍 {} location(s):", config.locations.len());
    for location in &config.locations {
        println!("  {} ({}) <- {}", location.id, location.area, location.aliases.join(" / "));
    }
    println!(
        "🐟 {} species, 🎣 {} method(s)",
        config.species.len(),
        config.methods.len()
    );
    println!();
    println!("✅ Dry run complete. Use --verbose for more details during an actual run.");
}
