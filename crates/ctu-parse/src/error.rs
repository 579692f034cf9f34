use ctu_ast::span::Loc;
use thiserror::Error;

pub type Result<T, E = ParseError> = std::result::Result<T, E>;

/// The two failure classes a parse can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed character sequence.
    Lex,
    /// Token stream does not match the grammar.
    Syntax,
}

/// First error of a parse. Parsing never continues past one.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("lex error at {loc}: {message}")]
    Lex { message: String, loc: Loc },

    #[error("syntax error at {loc}: expected {expected}, found {found}")]
    Unexpected {
        expected: String,
        found: String,
        loc: Loc,
    },

    #[error("syntax error at {loc}: duplicate {what} `{name}`")]
    Duplicate {
        what: &'static str,
        name: String,
        loc: Loc,
    },

    #[error("syntax error at {loc}: {message}")]
    Syntax { message: String, loc: Loc },

    #[error("syntax error at {loc}: nesting depth exceeds limit of {limit}")]
    TooDeep { limit: u32, loc: Loc },
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::Lex { .. } => ErrorKind::Lex,
            _ => ErrorKind::Syntax,
        }
    }

    pub fn loc(&self) -> Loc {
        match self {
            ParseError::Lex { loc, .. }
            | ParseError::Unexpected { loc, .. }
            | ParseError::Duplicate { loc, .. }
            | ParseError::Syntax { loc, .. }
            | ParseError::TooDeep { loc, .. } => *loc,
        }
    }
}
