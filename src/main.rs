//! Command-line front end of ccpoviz.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use ccpoviz::driver::{render_driver, RenderRequest};
use ccpoviz::options::sources::MoleculeSource;
use ccpoviz::options::Options;
use ccpoviz::structure::InputReader;
use clap::Parser;

/// Plot a molecule from an input file with POV-Ray.
#[derive(Parser, Debug)]
#[command(name = "ccpoviz", version, about)]
struct Args {
    /// Structure input file.
    #[arg(value_name = "FILE", required_unless_present = "print_schema")]
    input: Option<PathBuf>,

    /// Reader for the input file.
    #[arg(short, long, value_enum, default_value_t = InputReader::Gjf)]
    reader: InputReader,

    /// Output image; defaults to the input with a png extension.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Keep the POV-Ray scene file after rendering.
    #[arg(short, long)]
    keep: bool,

    /// Project option file (TOML, YAML or JSON).
    #[arg(short, long = "project-option", value_name = "FILE")]
    project: Option<PathBuf>,

    /// Molecule option file, or `input-title` to read options from the
    /// title of the input.
    #[arg(short, long = "molecule-option", value_name = "FILE|input-title")]
    molecule: Option<MoleculeSource>,

    /// Scene template replacing the built-in one.
    #[arg(long, value_name = "FILE")]
    template: Option<PathBuf>,

    /// Only write the POV-Ray scene file.
    #[arg(long)]
    pov_only: bool,

    /// Print the resolved options as TOML and exit.
    #[arg(long)]
    print_options: bool,

    /// Print the JSON Schema of the options and exit.
    #[arg(long)]
    print_schema: bool,
}

fn run(args: Args) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if args.print_schema {
        let schema = serde_json::to_string_pretty(&Options::json_schema())?;
        writeln!(stdout, "{schema}")?;
        return Ok(());
    }

    let input = args.input.context("no input file given")?;
    let request = RenderRequest {
        input,
        reader: args.reader,
        output: args.output,
        keep: args.keep,
        project: args.project,
        molecule: args.molecule,
        template: args.template,
        pov_only: args.pov_only,
    };

    if args.print_options {
        let (_, options) = request.load()?;
        write!(stdout, "{}", options.to_toml()?)?;
        return Ok(());
    }

    let produced = render_driver(&request)
        .with_context(|| format!("rendering {}", request.input.display()))?;
    log::info!("done: {}", produced.display());
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    if let Err(e) = run(Args::parse()) {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}
