//! JSON tree descriptions
//!
//! A tree can be described as nested JSON objects and loaded into a [`Node`]:
//!
//! ```json
//! {"op": "IF", "args": [{"field": "done"}, {"text": "yes"}, {"number": 0}]}
//! ```
//!
//! Literals are `{"text": ..}`, `{"number": ..}` and `{"field": ..}`. Every other node is an
//! `op` with positional `args`, built through the [`FunctionRegistry`].
//!
//! `ARRAYJOIN` takes its parts followed by a `text` separator and always renders the parts as a
//! JSON array, even a single one (`ARRAYJOIN(["a"], ",")`). The bare-string form of
//! [`ArrayJoinParts::Single`](crate::ArrayJoinParts::Single) is only built through
//! [`Node::array_join`].

use serde::Deserialize;
use std::sync::Arc;

use crate::ast::Node;
use crate::error::FormulaResult;
use crate::functions::{registry, FunctionRegistry};

/// One node of a tree description
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Description {
    Text {
        text: String,
    },
    Number {
        number: f64,
    },
    Field {
        field: String,
    },
    Call {
        op: String,
        #[serde(default)]
        args: Vec<Description>,
    },
}

impl Description {
    /// Build the described tree against `registry`
    pub fn build(&self, registry: &FunctionRegistry) -> FormulaResult<Node> {
        match self {
            Self::Text { text } => Ok(Node::text(text.as_str())),
            Self::Number { number } => Ok(Node::number(*number)),
            Self::Field { field } => Ok(Node::field(field.as_str())),
            Self::Call { op, args } => {
                let args = args
                    .iter()
                    .map(|arg| arg.build(registry).map(Arc::new))
                    .collect::<FormulaResult<Vec<_>>>()?;
                registry.build(op, args)
            }
        }
    }
}

/// Parse a JSON tree description and build it with the built-in registry
pub fn from_json(input: &str) -> FormulaResult<Node> {
    let description: Description = serde_json::from_str(input)?;
    description.build(registry())
}
