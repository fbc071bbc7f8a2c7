//! Sprout CLI
//!
//! Validate component trees, emit React Native screens, and run the full
//! prompt-to-code pipeline against an external schema source.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use sprout_codegen::EmitOptions;
use sprout_pipeline::{
    build_instruction, CommandSource, Pipeline, PipelineOptions, SchemaSource, StaticSource,
};
use sprout_validator::{ValidatorOptions, DEFAULT_MAX_DEPTH};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sprout", version)]
#[command(about = "Generate React Native screens from component trees", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a component tree
    Validate {
        /// Tree JSON file (reads stdin when omitted)
        input: Option<PathBuf>,
        #[command(flatten)]
        validator: ValidatorArgs,
    },
    /// Validate a component tree and emit its screen module
    Emit {
        /// Tree JSON file (reads stdin when omitted)
        input: Option<PathBuf>,
        /// Output file (writes stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        validator: ValidatorArgs,
        #[command(flatten)]
        emit: EmitArgs,
    },
    /// Print the instruction sent to the schema source
    Prompt {
        /// Screen description
        text: String,
    },
    /// Run the full pipeline for a screen description
    ///
    /// The schema source is either a recorded response (`--response`) or an
    /// external program given after `--`, which receives the instruction on
    /// stdin and answers on stdout.
    Generate {
        /// Screen description
        text: String,
        /// File holding a recorded model response
        #[arg(long, value_name = "FILE")]
        response: Option<PathBuf>,
        /// Environment variable the external program needs (e.g. an API key)
        #[arg(long, value_name = "NAME")]
        credential_env: Option<String>,
        /// Print the transcript as JSON instead of the code
        #[arg(long)]
        transcript: bool,
        /// Output file for the code (writes stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        validator: ValidatorArgs,
        #[command(flatten)]
        emit: EmitArgs,
        /// External program and its arguments
        #[arg(last = true, value_name = "PROGRAM")]
        command: Vec<String>,
    },
}

#[derive(Args)]
struct ValidatorArgs {
    /// Deepest allowed nesting level
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

impl From<ValidatorArgs> for ValidatorOptions {
    fn from(args: ValidatorArgs) -> Self {
        Self {
            max_depth: args.max_depth,
        }
    }
}

#[derive(Args)]
struct EmitArgs {
    /// Module the components are imported from
    #[arg(long, default_value = "react-native-web")]
    runtime_module: String,
    /// Name of the generated screen function
    #[arg(long, default_value = "GeneratedScreen")]
    component_name: String,
}

impl From<EmitArgs> for EmitOptions {
    fn from(args: EmitArgs) -> Self {
        Self {
            runtime_module: args.runtime_module,
            component_name: args.component_name,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { input, validator } => {
            let raw = read_tree(input.as_deref())?;
            match sprout_validator::validate_with_options(&raw, &validator.into()) {
                Ok(tree) => {
                    println!(
                        "valid: {} top-level components, {} nodes",
                        tree.components.len(),
                        tree.node_count()
                    );
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    eprintln!("invalid: {e}");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Commands::Emit {
            input,
            output,
            validator,
            emit,
        } => {
            let raw = read_tree(input.as_deref())?;
            let tree = match sprout_validator::validate_with_options(&raw, &validator.into()) {
                Ok(tree) => tree,
                Err(e) => {
                    eprintln!("invalid: {e}");
                    return Ok(ExitCode::FAILURE);
                }
            };
            let module = sprout_codegen::emit_with_options(&tree, &emit.into());
            write_code(output.as_deref(), &module.code)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Prompt { text } => {
            println!("{}", build_instruction(&text));
            Ok(ExitCode::SUCCESS)
        }
        Commands::Generate {
            text,
            response,
            credential_env,
            transcript,
            output,
            validator,
            emit,
            command,
        } => {
            let source = schema_source(response.as_deref(), credential_env, command)?;
            let options = PipelineOptions {
                validator: validator.into(),
                emit: emit.into(),
            };
            let state = Pipeline::new(source).with_options(options).run(text).await;

            if transcript {
                let json = serde_json::to_string_pretty(&state.messages)
                    .context("failed to serialize transcript")?;
                println!("{json}");
            } else if let Some(code) = &state.code {
                write_code(output.as_deref(), code)?;
            }

            if state.succeeded() {
                Ok(ExitCode::SUCCESS)
            } else {
                for error in &state.errors {
                    eprintln!("error: {error}");
                }
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("SPROUT_LOG").unwrap_or_else(|_| EnvFilter::new("sprout=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn schema_source(
    response: Option<&Path>,
    credential_env: Option<String>,
    command: Vec<String>,
) -> Result<Box<dyn SchemaSource>> {
    match (response, command.split_first()) {
        (Some(_), Some(_)) => bail!("use either --response or an external program, not both"),
        (Some(path), None) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read response file {}", path.display()))?;
            Ok(Box::new(StaticSource::new(text)))
        }
        (None, Some((program, args))) => {
            let mut source = CommandSource::new(program.as_str()).with_args(args.iter().cloned());
            if let Some(name) = credential_env {
                source = source.with_credential_env(name);
            }
            Ok(Box::new(source))
        }
        (None, None) => bail!("no schema source: pass --response FILE or `-- PROGRAM [ARGS...]`"),
    }
}

fn read_tree(input: Option<&Path>) -> Result<Value> {
    let text = match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            buffer
        }
    };
    serde_json::from_str(&text).context("input is not valid JSON")
}

fn write_code(output: Option<&Path>, code: &str) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)
                        .with_context(|| format!("failed to create directory {}", parent.display()))?;
                }
            }
            fs::write(path, format!("{code}\n"))
                .with_context(|| format!("failed to write output file {}", path.display()))
        }
        None => {
            println!("{code}");
            Ok(())
        }
    }
}
