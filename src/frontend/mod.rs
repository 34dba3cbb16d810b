//! Frontend compilation pipeline
//!
//! This module contains the lexer, the recovering parser, and the compiler
//! that sequences them with the text optimizer.

pub mod compiler;
pub mod config;
pub mod lexer;
pub mod parser;

pub use compiler::{CompileError, CompileOutcome, Compiler};
pub use config::CompileConfig;
