use anyhow::Result;
use campreport::client::HttpClient;
use campreport::config::Config;
use campreport::project::Project;
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};
use std::env;
use std::path::PathBuf;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h" || args[1] == "help") {
        print_help();
        return Ok(());
    }

    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");
    TermLogger::init(
        if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        },
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    let config_path = args
        .iter()
        .position(|a| a == "--config" || a == "-c")
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("campreport.toml"));

    let config = Config::load(&config_path)?;

    let client = HttpClient::new(&config.url, &config.username, &config.password)?;
    let project = Project::new(config.project_id, client);

    let report = project.to_structured(config.limit_relations)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn print_help() {
    println!("campreport - sprint/backlog/milestone report for one project");
    println!();
    println!("Usage: campreport [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -c, --config <PATH>  Config file (default: campreport.toml)");
    println!("  -v, --verbose        Log each service request to stderr");
    println!("  -h, --help           Show this help");
}
