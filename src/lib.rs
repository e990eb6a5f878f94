pub use crate::errors::{ParseError, SourceContext};
pub use crate::syntax::{parse_program, parse_source};

pub mod ast;
pub mod cli;
pub mod discovery;
pub mod errors;
pub mod syntax;
pub mod validation;
