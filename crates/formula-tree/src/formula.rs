//! Formula holder

use crate::ast::{Node, NodeRef};
use crate::compiler::{compile_with_options, CompileOptions};
use crate::error::{FormulaError, FormulaResult};

/// Holds the root node of a formula tree and compiles it on demand
#[derive(Debug, Clone, Default)]
pub struct Formula {
    root: Option<NodeRef>,
    options: CompileOptions,
}

impl Formula {
    /// Create an empty formula with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty formula that compiles with `options`
    pub fn with_options(options: CompileOptions) -> Self {
        Self {
            root: None,
            options,
        }
    }

    /// Set or replace the root node, returning the previous one
    pub fn attach(&mut self, root: impl Into<NodeRef>) -> Option<NodeRef> {
        self.root.replace(root.into())
    }

    /// Remove the root node
    pub fn detach(&mut self) -> Option<NodeRef> {
        self.root.take()
    }

    pub fn root(&self) -> Option<&NodeRef> {
        self.root.as_ref()
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compile the attached root
    pub fn compile(&self) -> FormulaResult<String> {
        let root = self
            .root
            .as_ref()
            .ok_or_else(|| FormulaError::MissingValue("no root node attached".into()))?;
        compile_with_options(root, &self.options)
    }

    /// Compile a root passed directly, with default options
    pub fn compile_node(node: &Node) -> FormulaResult<String> {
        crate::compiler::compile(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_without_root() {
        let formula = Formula::new();
        assert!(matches!(formula.compile(), Err(FormulaError::MissingValue(_))));
    }

    #[test]
    fn test_attach_replaces_root() {
        let mut formula = Formula::new();
        assert!(formula.attach(Node::field("a")).is_none());
        assert_eq!(formula.compile().unwrap(), "a");

        let previous = formula.attach(Node::len(Node::field("b")));
        assert_eq!(previous.as_deref(), Some(&Node::field("a")));
        assert_eq!(formula.compile().unwrap(), "LEN(b)");

        formula.detach();
        assert!(formula.compile().is_err());
    }

    #[test]
    fn test_options_apply_to_attached_root() {
        let mut formula = Formula::with_options(CompileOptions { max_depth: 1 });
        formula.attach(Node::not(Node::field("a")));
        assert!(matches!(
            formula.compile(),
            Err(FormulaError::DepthLimitExceeded(1))
        ));
    }
}
