//! Driver glue for the `ctu` binary: reading sources, dumping tokens and
//! ASTs, and logging setup.

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use ctu_ast::ast::Unit;
use ctu_parse::token::TokKind;
use ctu_parse::{Lexer, ParseError};
use std::fmt::Write as _;
use std::path::Path;
use tracing::debug;

/// Maximum source file size in bytes (1MB)
pub const DEFAULT_MAX_SOURCE_SIZE: usize = 1_000_000;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Pretty,
    Json,
}

/// Reads a source file, refusing files larger than `max_size` bytes.
pub fn load_source(path: &Path, max_size: usize) -> Result<String> {
    let src = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    if src.len() > max_size {
        bail!(
            "source file '{}' exceeds the {} byte limit ({} bytes)",
            path.display(),
            max_size,
            src.len()
        );
    }
    debug!(path = %path.display(), bytes = src.len(), "loaded source");
    Ok(src)
}

/// One token per line as `line:col<TAB>token`, ending with `end of input`.
pub fn render_tokens(src: &str) -> Result<String, ParseError> {
    let mut lex = Lexer::new(src);
    let mut out = String::new();
    loop {
        let tok = lex.next_tok();
        if let TokKind::Error(message) = tok.kind {
            return Err(ParseError::Lex {
                message,
                loc: tok.loc,
            });
        }
        let _ = writeln!(out, "{}\t{}", tok.loc, tok.kind);
        if tok.is_eof() {
            return Ok(out);
        }
    }
}

pub fn render_unit(unit: &Unit, format: Format) -> Result<String> {
    match format {
        Format::Pretty => Ok(format!("{unit:#?}")),
        Format::Json => Ok(serde_json::to_string_pretty(unit)?),
    }
}

/// Installs a stderr logger. `verbosity` counts `-v` flags: 0 is warnings
/// only, 1 info, 2 debug, 3 or more trace.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .with_ansi(false)
        .compact()
        .try_init();
}
