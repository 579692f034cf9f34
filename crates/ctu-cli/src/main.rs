use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use ctu_cli::{
    init_logging, load_source, render_tokens, render_unit, Format, DEFAULT_MAX_SOURCE_SIZE,
};
use ctu_parse::{parse_str_with, ParseOptions, DEFAULT_MAX_DEPTH};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "ctu")]
#[command(about = "Lexer and parser front end for ctu sources")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a source file and dump the AST
    Parse {
        /// Path to .ct source file
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Pretty)]
        format: Format,

        /// Maximum nesting depth of statements, expressions and types
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: u32,

        /// Reject source files larger than this many bytes
        #[arg(long, default_value_t = DEFAULT_MAX_SOURCE_SIZE)]
        max_size: usize,
    },

    /// Print the token stream of a source file
    Lex {
        /// Path to .ct source file
        file: PathBuf,

        /// Reject source files larger than this many bytes
        #[arg(long, default_value_t = DEFAULT_MAX_SOURCE_SIZE)]
        max_size: usize,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Parse {
            file,
            format,
            max_depth,
            max_size,
        } => cmd_parse(&file, format, max_depth, max_size),
        Commands::Lex { file, max_size } => cmd_lex(&file, max_size),
    }
}

fn cmd_parse(file: &Path, format: Format, max_depth: u32, max_size: usize) -> Result<()> {
    let src = load_source(file, max_size)?;
    let opts = ParseOptions::default().with_max_depth(max_depth);
    let unit = parse_str_with(&file.display().to_string(), &src, opts)?;
    info!(
        imports = unit.imports.len(),
        types = unit.types.len(),
        funcs = unit.funcs.len(),
        "parsed {}",
        file.display()
    );
    println!("{}", render_unit(&unit, format)?);
    Ok(())
}

fn cmd_lex(file: &Path, max_size: usize) -> Result<()> {
    let src = load_source(file, max_size)?;
    print!("{}", render_tokens(&src)?);
    Ok(())
}
