use std::io::Write;

use clap::{Parser, Subcommand};
use seomaster_core::{AnalysisModule, AnalysisRunner, Config, InputValues};

#[derive(Parser)]
#[command(name = "seomaster")]
#[command(about = "AI SEO analysis, streamed as it generates", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an analysis module and stream the report to stdout
    Run {
        /// Module id (see `seomaster modules`)
        module: AnalysisModule,
        /// Input field, as name=value (repeatable)
        #[arg(short = 'f', long = "field", value_name = "NAME=VALUE")]
        fields: Vec<String>,
    },
    /// List available modules and their input fields
    Modules,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { module, fields } => {
            if let Err(code) = run(module, fields).await {
                std::process::exit(code);
            }
        }
        Commands::Modules => list_modules(),
    }
}

async fn run(module: AnalysisModule, fields: Vec<String>) -> Result<(), i32> {
    let mut inputs = InputValues::new();
    for field in &fields {
        match field.split_once('=') {
            Some((name, value)) => {
                inputs.insert(name.trim().to_string(), value.to_string());
            }
            None => {
                eprintln!("invalid --field '{field}', expected name=value");
                return Err(2);
            }
        }
    }

    let missing = module.missing_fields(&inputs);
    if !missing.is_empty() {
        eprintln!("{}: missing required fields:", module.title());
        for spec in module.fields().iter().filter(|f| missing.contains(&f.name)) {
            eprintln!(
                "  --field {}=...  ({}, e.g. {})",
                spec.name, spec.label, spec.placeholder
            );
        }
        return Err(2);
    }

    let config = Config::load().map_err(|e| {
        eprintln!("{e}");
        1
    })?;
    let client = config.client().map_err(|e| {
        eprintln!("{e}");
        1
    })?;
    let runner = AnalysisRunner::new(client).with_thinking_budget(config.thinking_budget);

    let mut printed = 0;
    let outcome = runner
        .run(module, &inputs, |transcript| {
            // Progress hands us the whole transcript; print only the new tail.
            print!("{}", &transcript[printed..]);
            let _ = std::io::stdout().flush();
            printed = transcript.len();
        })
        .await;

    match outcome {
        Ok(result) => {
            // The transcript is already on screen; append the sources section.
            let markdown = result.to_markdown();
            println!("{}", &markdown[result.transcript.len()..]);
            Ok(())
        }
        Err(e) => {
            // Leave whatever streamed so far in place; report on stderr.
            eprintln!();
            eprintln!("{e}");
            Err(1)
        }
    }
}

fn list_modules() {
    for module in AnalysisModule::ALL {
        println!("{}  ({})", module.id(), module.title());
        println!("    {}", module.description());
        for field in module.fields() {
            println!(
                "    --field {}=<{}>  e.g. {}",
                field.name, field.label, field.placeholder
            );
        }
        println!();
    }
}
