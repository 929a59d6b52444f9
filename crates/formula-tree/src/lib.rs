//! # formula-tree
//!
//! Expression trees for spreadsheet-style formulas, compiled to formula text.
//!
//! This crate provides:
//! - Node types for literals, field references, functions and operators
//! - The compiler (tree → formula string)
//! - A registry of built-in operations for building nodes by name
//! - JSON tree descriptions
//!
//! ## Example
//!
//! ```rust
//! use formula_tree::{compile, Node};
//!
//! let first = Node::join_strings([Node::field("a"), Node::field("b"), Node::field("c")]);
//! let second = Node::join_strings([Node::field("c"), Node::field("d")]);
//! let formula = compile(&Node::and([first, second])).unwrap();
//! assert_eq!(formula, "AND(a & b & c, c & d)");
//! ```

pub mod ast;
pub mod compiler;
pub mod describe;
pub mod error;
pub mod formula;
pub mod functions;

pub use ast::{
    BinaryOperator, Constant, LogicalOperation, Node, NodeRef, Operation, StringNumberFunction,
    UnaryFunction,
};
pub use compiler::{compile, compile_with_options, CompileOptions, DEFAULT_MAX_DEPTH};
pub use error::{FormulaError, FormulaResult};
pub use formula::Formula;
pub use functions::logical::{Case, Conditional, Switch};
pub use functions::text::{
    ArrayJoin, ArrayJoinParts, Find, Mid, Replace, StringAndNumber, Substitute,
};
pub use functions::{registry, FunctionDef, FunctionRegistry};
