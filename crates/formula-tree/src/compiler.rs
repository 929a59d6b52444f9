//! Formula compiler
//!
//! Reduces a node tree to formula text. Children are reduced first and their fragments
//! combined according to the node kind. Any failure aborts the whole compilation.

use tracing::{debug, trace, warn};

use crate::ast::{Node, NodeRef};
use crate::error::{FormulaError, FormulaResult};
use crate::functions::{logical, text};

/// Default recursion limit for [`CompileOptions`]
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Options for formula compilation
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Deepest tree that may be compiled (default: 256)
    pub max_depth: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Compile a node tree with default options
///
/// # Example
/// ```rust
/// use formula_tree::{compile, BinaryOperator, Node};
///
/// let node = Node::operator(
///     BinaryOperator::Subtract,
///     Node::number(5.0),
///     Node::operator(BinaryOperator::Multiply, Node::field("long field"), Node::number(3.0)),
/// );
/// assert_eq!(compile(&node).unwrap(), "5 - ({long field} * 3)");
/// ```
pub fn compile(node: &Node) -> FormulaResult<String> {
    compile_with_options(node, &CompileOptions::default())
}

/// Compile a node tree
pub fn compile_with_options(node: &Node, options: &CompileOptions) -> FormulaResult<String> {
    debug!(operation = %node.operation(), max_depth = options.max_depth, "compiling formula");
    let formula = Compiler::new(options).reduce(node)?;
    debug!(len = formula.len(), "compiled formula");
    Ok(formula)
}

/// Recursive reducer; tracks depth against the configured limit
pub(crate) struct Compiler<'a> {
    options: &'a CompileOptions,
    depth: usize,
}

impl<'a> Compiler<'a> {
    fn new(options: &'a CompileOptions) -> Self {
        Self { options, depth: 0 }
    }

    /// Reduce a node to its fragment
    pub(crate) fn reduce(&mut self, node: &Node) -> FormulaResult<String> {
        self.nested(|c| c.reduce_node(node))
    }

    /// Reduce every node of a variadic argument list.
    ///
    /// An empty list has nothing to compile and is reported as a missing value.
    pub(crate) fn reduce_all(
        &mut self,
        nodes: &[NodeRef],
        function: &str,
    ) -> FormulaResult<Vec<String>> {
        if nodes.is_empty() {
            return Err(FormulaError::MissingValue(format!(
                "{function} has no arguments"
            )));
        }
        nodes.iter().map(|node| self.reduce(node)).collect()
    }

    /// Run `f` one level deeper in the tree
    pub(crate) fn nested<F>(&mut self, f: F) -> FormulaResult<String>
    where
        F: FnOnce(&mut Self) -> FormulaResult<String>,
    {
        if self.depth >= self.options.max_depth {
            warn!(max_depth = self.options.max_depth, "formula tree too deep");
            return Err(FormulaError::DepthLimitExceeded(self.options.max_depth));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn reduce_node(&mut self, node: &Node) -> FormulaResult<String> {
        trace!(operation = %node.operation(), depth = self.depth, "reducing node");
        match node {
            Node::Text(value) => Ok(format!("\"{value}\"")),
            Node::Number(value) => format_number(*value),
            Node::Field(name) => format_field(name),
            Node::Constant(constant) => Ok(call(constant.name(), &[])),
            Node::JoinStrings(parts) => text::compile_join_strings(self, parts),
            Node::Concatenate(parts) => text::compile_concatenate(self, parts),
            Node::ArrayJoin(join) => text::compile_array_join(self, join),
            Node::Unary { function, argument } => text::compile_unary(self, *function, argument),
            Node::StringAndNumber { function, args } => {
                text::compile_string_and_number(self, *function, args)
            }
            Node::Find(find) => text::compile_find(self, "FIND", find),
            Node::Search(find) => text::compile_find(self, "SEARCH", find),
            Node::Mid(mid) => text::compile_mid(self, mid),
            Node::Replace(replace) => text::compile_replace(self, replace),
            Node::Substitute(substitute) => text::compile_substitute(self, substitute),
            Node::Logical { op, args } => logical::compile_logical(self, *op, args),
            Node::If(conditional) => logical::compile_if(self, conditional),
            Node::Case(case) => logical::compile_case(self, case),
            Node::Switch(switch) => logical::compile_switch(self, switch),
            Node::Operator { op, left, right } => {
                let left = self.operand(left)?;
                let right = self.operand(right)?;
                Ok(format!("{} {} {}", left, op.token(), right))
            }
        }
    }

    /// Operands carrying a structured payload are parenthesized, whatever their precedence
    fn operand(&mut self, node: &Node) -> FormulaResult<String> {
        let fragment = self.reduce(node)?;
        if node.is_compound() {
            Ok(format!("({fragment})"))
        } else {
            Ok(fragment)
        }
    }
}

/// `NAME(arg1, arg2, ...)`
pub(crate) fn call(name: &str, args: &[String]) -> String {
    format!("{}({})", name, args.join(", "))
}

fn format_number(value: f64) -> FormulaResult<String> {
    if !value.is_finite() {
        return Err(FormulaError::NonFiniteNumber(value));
    }
    // -0 prints as "-0"
    if value == 0.0 {
        return Ok("0".into());
    }
    Ok(value.to_string())
}

fn format_field(name: &str) -> FormulaResult<String> {
    if name.is_empty() {
        return Err(FormulaError::MissingValue("field reference has no name".into()));
    }
    if name.contains(' ') {
        Ok(format!("{{{name}}}"))
    } else {
        Ok(name.to_string())
    }
}
