use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context};
use cfn_template::{codec, registry, Format, Template};
use clap::{Parser, Subcommand};
use console::style;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a template between JSON and YAML. Short-form YAML tags are
    /// written out in long form.
    Convert {
        /// Template to read, or `-` for stdin
        input: PathBuf,

        /// Output format: json or yaml
        #[arg(short, long, value_parser = parse_format)]
        to: Format,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Decode templates strictly and report the first error of each
    Validate {
        /// Templates to check
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },

    /// List the resources of a template
    Resources {
        /// Template to read, or `-` for stdin
        input: PathBuf,

        /// Also show the logical IDs each resource refers to
        #[arg(short, long)]
        references: bool,
    },

    /// List the resource types decoded into typed properties
    Types,
}

fn parse_format(value: &str) -> Result<Format, String> {
    Format::from_str(value).map_err(|_| format!("unknown format `{}`, expected json or yaml", value))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    match Args::parse().command {
        Command::Convert { input, to, output } => convert(&input, to, output.as_deref()),
        Command::Validate { inputs } => validate(&inputs),
        Command::Resources { input, references } => list_resources(&input, references),
        Command::Types => {
            for type_name in registry::registered_types() {
                println!("{}", type_name);
            }
            Ok(())
        }
    }
}

fn load(input: &Path) -> anyhow::Result<Template> {
    if input == Path::new("-") {
        let mut buffer = Vec::new();
        io::stdin()
            .read_to_end(&mut buffer)
            .context("Failed to read template from stdin")?;
        return Ok(codec::parse(&buffer)?);
    }
    Ok(codec::open(input)?)
}

fn convert(input: &Path, format: Format, output: Option<&Path>) -> anyhow::Result<()> {
    let template = load(input)?;
    let encoded = codec::encode(&template, format)?;
    match output {
        Some(path) => fs::write(path, &encoded)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&encoded)?;
            if format == Format::Json {
                writeln!(stdout)?;
            }
        }
    }
    Ok(())
}

fn validate(inputs: &[PathBuf]) -> anyhow::Result<()> {
    let mut failed = 0;
    for input in inputs {
        match load(input) {
            Ok(template) => {
                println!(
                    "{} {} ({} resources)",
                    style("✓").green(),
                    input.display(),
                    template.resources.len()
                );
                for logical_id in template.logical_id_conflicts() {
                    println!(
                        "  {} logical ID {} is declared in more than one section",
                        style("!").yellow(),
                        style(logical_id).bold()
                    );
                }
            }
            Err(err) => {
                failed += 1;
                println!("{} {}: {:#}", style("✗").red(), input.display(), err);
            }
        }
    }
    if failed > 0 {
        bail!("{} of {} templates failed validation", failed, inputs.len());
    }
    Ok(())
}

fn list_resources(input: &Path, show_references: bool) -> anyhow::Result<()> {
    let template = load(input)?;
    let references = template.references();
    let width = template.resources.keys().map(String::len).max().unwrap_or(0);

    for (logical_id, resource) in &template.resources {
        let typed = registry::is_registered(resource.type_name());
        let type_name = if typed {
            style(resource.type_name()).cyan()
        } else {
            style(resource.type_name()).dim()
        };
        println!(
            "{:width$}  {}  {}",
            logical_id,
            type_name,
            style(resource.effective_deletion_policy()).dim(),
            width = width
        );
        if show_references {
            if let Some(referenced) = references.get(logical_id) {
                let referenced: Vec<_> = referenced.iter().map(String::as_str).collect();
                println!("{:width$}  -> {}", "", referenced.join(", "), width = width);
            }
        }
    }
    Ok(())
}
