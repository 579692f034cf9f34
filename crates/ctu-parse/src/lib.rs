#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(clippy::dbg_macro, clippy::todo, clippy::unimplemented)]

mod error;
pub mod lexer;
mod options;
mod parser;
pub mod token;

pub use error::{ErrorKind, ParseError, Result};
pub use lexer::{tokenize, Lexer};
pub use options::{ParseOptions, DEFAULT_MAX_DEPTH};
pub use parser::{parse_str, parse_str_with, Parser};
