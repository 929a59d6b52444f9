//! formula-tree CLI - compile JSON tree descriptions to formula text

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use formula_tree::describe::Description;
use formula_tree::{compile_with_options, registry, CompileOptions, DEFAULT_MAX_DEPTH};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ftree")]
#[command(
    author,
    version,
    about = "Compile formula tree descriptions to spreadsheet formulas"
)]
struct Cli {
    /// Log compilation details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a JSON tree description and print the formula
    Compile {
        /// Input JSON file (default: stdin)
        input: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Maximum tree depth
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },

    /// List the built-in functions and operators
    Functions,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Compile {
            input,
            output,
            max_depth,
        } => compile_description(input.as_deref(), output.as_deref(), max_depth),
        Commands::Functions => list_functions(),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn compile_description(
    input: Option<&Path>,
    output: Option<&Path>,
    max_depth: usize,
) -> Result<()> {
    let json = match file_argument(input) {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read '{}'", path.display()))?,
        None => read_json(io::stdin().lock()).context("Failed to read from stdin")?,
    };

    if let Some(output_path) = output {
        let mut file = std::fs::File::create(output_path)
            .with_context(|| format!("Failed to write '{}'", output_path.display()))?;
        compile_json(&json, &mut file, max_depth)?;
        eprintln!("Wrote formula to '{}'", output_path.display());
    } else {
        compile_json(&json, io::stdout().lock(), max_depth)?;
    }

    Ok(())
}

/// The input file, or `None` when the description comes from stdin (no argument or `-`)
fn file_argument(input: Option<&Path>) -> Option<&Path> {
    input.filter(|path| *path != Path::new("-"))
}

fn read_json<R: Read>(mut reader: R) -> io::Result<String> {
    let mut json = String::new();
    reader.read_to_string(&mut json)?;
    Ok(json)
}

/// Build and compile a JSON tree description, writing the formula and a newline
fn compile_json<W: Write>(json: &str, mut writer: W, max_depth: usize) -> Result<()> {
    let description: Description =
        serde_json::from_str(json).context("Failed to parse tree description")?;
    let node = description
        .build(registry())
        .context("Failed to build formula tree")?;

    let formula = compile_with_options(&node, &CompileOptions { max_depth })
        .context("Failed to compile formula")?;

    writeln!(writer, "{formula}").context("Failed to write formula")?;
    Ok(())
}

fn list_functions() -> Result<()> {
    let mut stdout = io::stdout().lock();
    for def in registry().definitions() {
        writeln!(stdout, "{}\t{}", def.name, def.arity()).context("Failed to write to stdout")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_compile_defaults() {
        let cli = Cli::parse_from(["ftree", "compile"]);
        match cli.command {
            Commands::Compile {
                input, max_depth, ..
            } => {
                assert!(input.is_none());
                assert_eq!(max_depth, DEFAULT_MAX_DEPTH);
            }
            Commands::Functions => panic!("expected compile"),
        }
    }

    #[test]
    fn test_stdin_selection() {
        assert_eq!(file_argument(None), None);
        assert_eq!(file_argument(Some(Path::new("-"))), None);
        assert_eq!(
            file_argument(Some(Path::new("tree.json"))),
            Some(Path::new("tree.json"))
        );
    }

    #[test]
    fn test_compile_json_round_trip() {
        let json = read_json(
            br#"{"op": "-", "args": [
                {"number": 5},
                {"op": "*", "args": [{"field": "long field"}, {"number": 3}]}
            ]}"#
            .as_slice(),
        )
        .unwrap();
        let mut out = Vec::new();
        compile_json(&json, &mut out, DEFAULT_MAX_DEPTH).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "5 - ({long field} * 3)\n");
    }

    #[test]
    fn test_build_error_context() {
        let mut out = Vec::<u8>::new();
        let err = compile_json(
            r#"{"op": "IF", "args": [{"field": "a"}]}"#,
            &mut out,
            DEFAULT_MAX_DEPTH,
        )
        .unwrap_err();
        let message = format!("{err:#}");
        assert!(message.starts_with("Failed to build formula tree"));
        assert!(message.contains("Wrong number of arguments for IF"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_parse_and_depth_error_context() {
        let err = compile_json("{", Vec::<u8>::new(), DEFAULT_MAX_DEPTH).unwrap_err();
        assert!(format!("{err:#}").starts_with("Failed to parse tree description"));

        let err = compile_json(
            r#"{"op": "NOT", "args": [{"field": "a"}]}"#,
            Vec::<u8>::new(),
            1,
        )
        .unwrap_err();
        assert!(format!("{err:#}").starts_with("Failed to compile formula"));
    }

    #[test]
    fn test_compile_file_to_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("tree.json");
        let output = dir.path().join("formula.txt");
        std::fs::write(
            &input,
            r#"{"op": "FIND", "args": [{"text": "a"}, {"text": "a long text"}, {"number": 5}]}"#,
        )
        .unwrap();

        compile_description(Some(&input), Some(&output), DEFAULT_MAX_DEPTH).unwrap();
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "FIND(\"a\", \"a long text\", 5)\n"
        );
    }

    #[test]
    fn test_missing_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let err = compile_description(Some(&missing), None, DEFAULT_MAX_DEPTH).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read '"));
    }
}
