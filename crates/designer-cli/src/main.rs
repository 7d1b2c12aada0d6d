//! Designer CLI - generate and refine system designs
//!
//! Terminal client for the AI System Designer API.

mod api;
mod config;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::fs;

use api::{CreateDesignRequest, DesignResponse, DesignerClient};
use config::Config;

#[derive(Parser)]
#[command(name = "designer")]
#[command(about = "Designer CLI - generate and refine system designs", long_about = None)]
#[command(version)]
struct Cli {
    /// API base URL (overrides config)
    #[arg(long, global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the API is reachable
    Health,

    /// Generate a new design from requirements
    Generate {
        /// Free-text requirements
        #[arg(short, long)]
        requirements: Option<String>,
        /// Assumption as key=value (value parsed as JSON when possible)
        #[arg(short, long = "assumption")]
        assumptions: Vec<String>,
        /// Constraint (repeatable)
        #[arg(short, long = "constraint")]
        constraints: Vec<String>,
        /// Read the whole request from a JSON file
        #[arg(short, long)]
        file: Option<String>,
    },

    /// List designs, most recent first
    List,

    /// Show a design in full
    Show {
        /// Design ID
        id: String,
    },

    /// Reconcile edits into a new version of a design
    Update {
        /// Design ID
        id: String,
        /// Requested changes
        #[arg(short, long)]
        edits: String,
    },

    /// Show a design and its ancestors
    Lineage {
        /// Design ID
        id: String,
    },

    /// Manage CLI configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set the API base URL
    SetUrl {
        /// e.g. http://localhost:8000
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let url = cli.url;

    match cli.command {
        Commands::Health => cmd_health(&connect(url)?).await,
        Commands::Generate {
            requirements,
            assumptions,
            constraints,
            file,
        } => cmd_generate(&connect(url)?, requirements, assumptions, constraints, file).await,
        Commands::List => cmd_list(&connect(url)?).await,
        Commands::Show { id } => cmd_show(&connect(url)?, &id).await,
        Commands::Update { id, edits } => cmd_update(&connect(url)?, &id, &edits).await,
        Commands::Lineage { id } => cmd_lineage(&connect(url)?, &id).await,
        Commands::Config { action } => cmd_config(action),
    }
}

/// Client for the `--url` override or the configured base URL
fn connect(url: Option<String>) -> Result<DesignerClient> {
    let base_url = match url {
        Some(url) => url,
        None => Config::load()?.base_url,
    };
    Ok(DesignerClient::new(&base_url))
}

// ============================================
// Command Implementations
// ============================================

async fn cmd_health(client: &DesignerClient) -> Result<()> {
    let base_url = client.base_url();
    print!("Checking {}... ", base_url);

    match client.health().await {
        Ok(true) => {
            println!("{}", "OK".green());
            Ok(())
        }
        _ => {
            println!("{}", "Failed".red());
            bail!("Could not reach the designer API at {}", base_url);
        }
    }
}

async fn cmd_generate(
    client: &DesignerClient,
    requirements: Option<String>,
    assumptions: Vec<String>,
    constraints: Vec<String>,
    file: Option<String>,
) -> Result<()> {
    let request = match (file, requirements) {
        (Some(f), None) => {
            let raw = fs::read_to_string(&f).with_context(|| format!("Failed to read file: {}", f))?;
            serde_json::from_str(&raw).with_context(|| format!("Invalid request JSON in {}", f))?
        }
        (None, Some(requirements)) => CreateDesignRequest {
            requirements,
            assumptions: assumptions
                .iter()
                .map(|a| parse_assumption(a))
                .collect::<Result<_>>()?,
            constraints,
        },
        (Some(_), Some(_)) => bail!("Cannot specify both --requirements and --file"),
        (None, None) => bail!("Provide --requirements or --file"),
    };

    println!("{}", "Generating design...".dimmed());
    let design = client.generate(&request).await?;

    println!("{} Design created", "✓".green());
    print_design(&design);

    Ok(())
}

async fn cmd_list(client: &DesignerClient) -> Result<()> {
    let designs = client.list().await?;

    if designs.is_empty() {
        println!("No designs found.");
        println!("\n{}", "Create one with:".dimmed());
        println!("  designer generate -r \"Design a URL shortener\"");
        return Ok(());
    }

    println!("{}", "Designs:".bold());
    for design in designs {
        print_summary(&design);
    }

    Ok(())
}

async fn cmd_show(client: &DesignerClient, id: &str) -> Result<()> {
    let design = client.get(id).await?;
    print_design(&design);
    Ok(())
}

async fn cmd_update(client: &DesignerClient, id: &str, edits: &str) -> Result<()> {
    println!("{}", "Reconciling edits...".dimmed());
    let design = client.update(id, edits).await?;

    println!(
        "{} Version {} created from {}",
        "✓".green(),
        design.version.to_string().cyan(),
        id.dimmed()
    );
    print_design(&design);

    Ok(())
}

async fn cmd_lineage(client: &DesignerClient, id: &str) -> Result<()> {
    let chain = client.lineage(id).await?;

    println!("{}", "Lineage (newest first):".bold());
    for design in chain {
        print_summary(&design);
    }

    Ok(())
}

fn cmd_config(action: ConfigAction) -> Result<()> {
    let mut config = Config::load()?;

    match action {
        ConfigAction::Show => {
            println!("{}", "Configuration:".bold());
            println!("  Config file: {:?}", Config::config_path()?);
            println!("  Base URL: {}", config.base_url);
        }
        ConfigAction::SetUrl { url } => {
            config.set_base_url(url);
            config.save()?;
            println!("{} Base URL set to {}", "✓".green(), config.base_url);
        }
    }

    Ok(())
}

// ============================================
// Helpers
// ============================================

/// Parse `key=value`, keeping the value as JSON when it parses as JSON
fn parse_assumption(raw: &str) -> Result<(String, serde_json::Value)> {
    let (key, value) = raw
        .split_once('=')
        .with_context(|| format!("Assumption must be key=value: {}", raw))?;

    let key = key.trim();
    if key.is_empty() {
        bail!("Assumption key is empty: {}", raw);
    }

    let value = serde_json::from_str(value.trim())
        .unwrap_or_else(|_| serde_json::Value::String(value.trim().to_string()));

    Ok((key.to_string(), value))
}

fn print_summary(design: &DesignResponse) {
    println!(
        "  {} {} {} {}",
        design.id.dimmed(),
        format!("v{}", design.version).cyan().bold(),
        design.timestamp.format("%Y-%m-%d %H:%M").to_string().dimmed(),
        truncate_string(&design.requirements, 60)
    );
}

fn print_design(design: &DesignResponse) {
    println!("  {} {}", "ID:".bold(), design.id);
    println!("  {} {}", "Version:".bold(), design.version);
    println!("  {} {}", "Created:".bold(), design.timestamp.to_rfc3339());
    if let Some(parent) = &design.parent_id {
        println!("  {} {}", "Parent:".bold(), parent);
    }
    println!("  {} {}", "Requirements:".bold(), design.requirements);
    if !design.assumptions.is_empty() {
        println!("  {}", "Assumptions:".bold());
        for (key, value) in &design.assumptions {
            println!("    {}: {}", key.cyan(), value);
        }
    }
    if !design.constraints.is_empty() {
        println!("  {} {}", "Constraints:".bold(), design.constraints.join(", "));
    }
    println!("\n{}", "Design:".bold());
    println!(
        "{}",
        serde_json::to_string_pretty(&design.design).unwrap_or_else(|_| design.design.to_string())
    );
}

fn truncate_string(s: &str, max_len: usize) -> String {
    let s = s.replace('\n', " ");
    if s.chars().count() <= max_len {
        s
    } else {
        format!("{}...", s.chars().take(max_len - 3).collect::<String>())
    }
}
