//! # kode
//!
//! kode is a tree-walking interpreter for the Kode scripting language: a
//! small imperative language with static-looking type annotations, a dynamic
//! `val` escape hatch, first-class functions usable as object-like instances
//! (`new`, `self`, `super`, member access), lexical scoping, homogeneous
//! arrays, and an error model that reports line numbers through nested call
//! frames.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use std::collections::HashMap;

use crate::interpreter::{executor::core::run, frame::Frame};

/// Provides the error-stack component and the typed error taxonomy.
///
/// Failures are typed enums rendered into a linked chain of
/// `{message, line}` frames; each layer an error crosses adds one frame of
/// context, bounded by an ellipsis collapse.
///
/// # Responsibilities
/// - Defines syntax and runtime error enums with detailed messages.
/// - Threads source-line context through every nested call frame.
/// - Renders the user-visible error report.
pub mod error;
/// Orchestrates the whole evaluator pipeline.
///
/// Ties together the lexer, value model, expression evaluator, statement
/// executor, scope frames and built-in library that make up the interpreter
/// core.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, evaluator, executor, values.
/// - Owns the scope/frame model and the built-in function table.
/// - Manages the flow of values and errors between phases.
pub mod interpreter;
/// General utilities shared across the interpreter.
///
/// Index normalization, the numeric-token probe, and identifier validation.
pub mod util;

/// Executes a Kode program from source text.
///
/// Carriage returns are stripped, a root frame is created with the `_DEBUG`
/// and `_MAX_RECURSION` meta-cells, and the statement executor runs the
/// program to completion. An empty source is a successful no-op.
///
/// # Errors
/// Returns the error stack of the first failure, with the line-tagged
/// context frames accumulated on the way up.
///
/// # Examples
/// ```
/// use kode::run_source;
///
/// assert!(run_source("val x = 1 + 2 * 3").is_ok());
///
/// // Type tags are rigid: an int slot will not take a float.
/// assert!(run_source("int x = 1.5").is_err());
/// ```
pub fn run_source(source: &str) -> Result<(), error::ErrorStack> {
    let source = source.replace('\r', "");
    if source.is_empty() {
        return Ok(());
    }

    let scope = Frame::root(&source);
    run(&scope, Vec::new(), HashMap::new(), 0, 0)?;
    Ok(())
}
