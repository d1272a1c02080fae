use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use lens_selector_lib::config::Settings;
use lens_selector_lib::models::Idea;
use lens_selector_lib::pipeline::LensSelector;
use lens_selector_lib::prompt::{build_prompt, PromptStyle};
use lens_selector_lib::providers::{create_provider, ProviderKind};
use lens_selector_lib::server::{self, ServerAppState};
use lens_selector_lib::shutdown::{register_ctrl_c, ShutdownState};
use lens_selector_lib::{report, stages};
use std::path::PathBuf;

/// Lens Selector - rank research lenses for a startup idea with a hosted model
#[derive(Parser, Debug)]
#[command(name = "lens-selector")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Model provider (anthropic or bedrock); overrides the settings file
    #[arg(long, global = true, env = "LENS_SELECTOR_PROVIDER")]
    provider: Option<ProviderKind>,

    /// Settings file (defaults to ~/.lens-selector/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze an idea and rank the four research lenses
    Analyze(AnalyzeArgs),

    /// Show the lifecycle stages and their guidance
    Stages,

    /// Run the HTTP service
    Serve {
        /// Port to bind the server to
        #[arg(long)]
        port: Option<u16>,

        /// Address to bind the server to
        #[arg(long)]
        bind: Option<String>,

        /// Allowed CORS origin (repeatable); any origin when omitted
        #[arg(long = "cors-origin")]
        cors_origins: Vec<String>,
    },

    /// Print the prompt that would be sent, without calling a model
    Prompt(IdeaArgs),
}

#[derive(Args, Debug)]
struct IdeaArgs {
    /// Startup title
    #[arg(long)]
    title: String,

    /// What the startup does
    #[arg(long)]
    description: String,

    /// Tags, separated by commas or newlines
    #[arg(long)]
    tags: String,

    /// Lifecycle stage
    #[arg(long, default_value = "IDEATION & PLANNING", value_parser = parse_stage)]
    stage: String,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    #[command(flatten)]
    idea: IdeaArgs,

    /// Print the result as JSON instead of a text report
    #[arg(long)]
    json: bool,

    /// Write the JSON result to this file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Write the JSON result to research_lens_analysis_<title>.json
    #[arg(long, conflicts_with = "output")]
    download: bool,
}

fn parse_stage(s: &str) -> Result<String, String> {
    match stages::lookup(s) {
        Some(stage) => Ok(stage.label.to_string()),
        None => Err(format!(
            "unknown stage '{}', expected one of: {}",
            s,
            stages::stage_labels().join(", ")
        )),
    }
}

impl IdeaArgs {
    /// Check the form fields before anything else happens
    fn to_idea(&self) -> Result<Idea> {
        Idea::from_form(&self.title, &self.description, &self.tags)
            .map_err(|e| anyhow!("{} (--{})", e, e.field()))
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logger
    env_logger::init();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: Failed to create tokio runtime: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = rt.block_on(run(cli)) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Stages => {
            print_stages();
            Ok(())
        }
        Command::Prompt(args) => {
            let idea = args.to_idea()?;
            println!("{}", build_prompt(&idea, &args.stage, PromptStyle::Detailed)?);
            Ok(())
        }
        Command::Analyze(args) => {
            let settings = Settings::load(cli.config.as_deref())?;
            let kind = cli.provider.unwrap_or(settings.provider);
            run_analyze(args, kind, &settings).await
        }
        Command::Serve {
            port,
            bind,
            cors_origins,
        } => {
            let settings = Settings::load(cli.config.as_deref())?;
            let kind = cli.provider.unwrap_or(settings.provider);
            let port = port.unwrap_or(settings.server.port);
            let bind = bind.unwrap_or_else(|| settings.server.bind.clone());
            let cors_origins = if cors_origins.is_empty() {
                settings.server.cors_origins.clone()
            } else {
                cors_origins
            };

            let provider = create_provider(kind, &settings).await?;
            let selector = LensSelector::new(provider, PromptStyle::Compact)?;

            let shutdown_state = ShutdownState::new();
            register_ctrl_c(shutdown_state.clone());

            let state = ServerAppState::new(selector, shutdown_state);
            server::run_server(port, &bind, state, cors_origins)
                .await
                .map_err(|e| anyhow!(e))
        }
    }
}

async fn run_analyze(args: AnalyzeArgs, kind: ProviderKind, settings: &Settings) -> Result<()> {
    // Input problems are reported before credentials are even looked at
    let idea = args.idea.to_idea()?;
    let stage = args.idea.stage.as_str();

    let provider = create_provider(kind, settings).await?;
    let selector = LensSelector::new(provider, PromptStyle::Detailed)?;

    eprintln!("Analyzing research lenses with {}...", selector.provider_name());
    let result = match selector.analyze(&idea, stage).await {
        Ok(result) => result,
        Err(e) => {
            if let Some(raw) = e.raw_output() {
                eprintln!("Raw response:\n{}", raw);
            }
            return Err(e.into());
        }
    };

    if args.json {
        println!("{}", report::to_pretty_json(&result)?);
    } else {
        println!("Research Lens Analysis: {}\n", idea.title);
        print!("{}", report::render_text(&result));
    }

    let target = if args.download {
        Some(PathBuf::from(report::download_file_name(&idea.title)))
    } else {
        args.output
    };
    if let Some(path) = target {
        report::write_json(&result, &path)?;
        eprintln!("Saved {}", path.display());
    }

    Ok(())
}

fn print_stages() {
    for stage in stages::STARTUP_STAGES {
        println!("{}", stage.label);
        println!("  Key questions:");
        for question in stage.key_questions.iter().take(3) {
            println!("    - {}", question);
        }
        println!("  Focus areas: {}", stage.focus_areas.join(", "));
        println!();
    }
}
