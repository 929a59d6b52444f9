//! Built-in formula functions and operators

pub mod logical;
pub mod text;

use crate::ast::{
    BinaryOperator, Constant, LogicalOperation, Node, NodeRef, Operation, StringNumberFunction,
    UnaryFunction,
};
use crate::error::{FormulaError, FormulaResult};
use std::collections::HashMap;
use std::sync::OnceLock;
use std::vec::IntoIter;

use self::logical::{Case, Conditional, Switch};
use self::text::{ArrayJoin, ArrayJoinParts, Find, Mid, Replace, Substitute};

/// Global function registry
static FUNCTION_REGISTRY: OnceLock<FunctionRegistry> = OnceLock::new();

/// The shared registry of every built-in operation
pub fn registry() -> &'static FunctionRegistry {
    FUNCTION_REGISTRY.get_or_init(FunctionRegistry::new)
}

/// Function definition
#[derive(Debug, Clone)]
pub struct FunctionDef {
    /// Function name (uppercase) or operator token
    pub name: &'static str,
    /// Minimum arguments
    pub min_args: usize,
    /// Maximum arguments (None = unlimited)
    pub max_args: Option<usize>,
    /// Operation of the built node
    pub operation: Operation,
}

impl FunctionDef {
    fn fixed(operation: Operation, args: usize) -> Self {
        Self {
            name: operation.name(),
            min_args: args,
            max_args: Some(args),
            operation,
        }
    }

    fn ranged(operation: Operation, min_args: usize, max_args: Option<usize>) -> Self {
        Self {
            name: operation.name(),
            min_args,
            max_args,
            operation,
        }
    }

    /// Human-readable arity, e.g. `2`, `2 to 3` or `at least 1`
    pub fn arity(&self) -> String {
        match self.max_args {
            Some(max) if max == self.min_args => max.to_string(),
            Some(max) => format!("{} to {}", self.min_args, max),
            None => format!("at least {}", self.min_args),
        }
    }

    fn check_arity(&self, actual: usize) -> FormulaResult<()> {
        let too_many = self.max_args.is_some_and(|max| actual > max);
        if actual < self.min_args || too_many {
            return Err(FormulaError::ArgumentCount {
                function: self.name.to_string(),
                expected: self.arity(),
                actual,
            });
        }
        Ok(())
    }
}

/// Function registry
///
/// Builds typed nodes from an operation name and positional arguments.
#[derive(Debug)]
pub struct FunctionRegistry {
    functions: HashMap<String, FunctionDef>,
}

impl FunctionRegistry {
    /// Create a new registry with all built-in operations
    pub fn new() -> Self {
        let mut registry = Self {
            functions: HashMap::new(),
        };

        registry.register_text_functions();
        registry.register_logical_functions();
        registry.register_operators();

        registry
    }

    /// Look up a function by name
    pub fn get(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.get(&name.to_uppercase())
    }

    /// Register a function
    pub fn register(&mut self, def: FunctionDef) {
        self.functions.insert(def.name.to_uppercase(), def);
    }

    /// Registered definitions sorted by name
    pub fn definitions(&self) -> Vec<&FunctionDef> {
        let mut defs: Vec<_> = self.functions.values().collect();
        defs.sort_by_key(|def| def.name);
        defs
    }

    /// Registered names in sorted order
    pub fn names(&self) -> Vec<&'static str> {
        self.definitions().into_iter().map(|def| def.name).collect()
    }

    /// Build a node from positional arguments given in formula-signature order
    pub fn build(&self, name: &str, args: Vec<NodeRef>) -> FormulaResult<Node> {
        let def = self
            .get(name)
            .ok_or_else(|| FormulaError::UnknownFunction(name.to_string()))?;
        def.check_arity(args.len())?;
        build_node(def.operation, args)
    }

    fn register_text_functions(&mut self) {
        // &
        self.register(FunctionDef::ranged(Operation::JoinStrings, 1, None));

        // CONCATENATE
        self.register(FunctionDef::ranged(Operation::Concatenate, 1, None));

        // ARRAYJOIN(parts..., separator)
        self.register(FunctionDef::ranged(Operation::ArrayJoin, 2, None));

        for function in UnaryFunction::ALL {
            self.register(FunctionDef::fixed(Operation::Unary(function), 1));
        }

        // LEFT, RIGHT, REPT
        for function in StringNumberFunction::ALL {
            self.register(FunctionDef::fixed(Operation::StringAndNumber(function), 2));
        }

        // FIND, SEARCH
        self.register(FunctionDef::ranged(Operation::Find, 2, Some(3)));
        self.register(FunctionDef::ranged(Operation::Search, 2, Some(3)));

        // MID
        self.register(FunctionDef::fixed(Operation::Mid, 3));

        // REPLACE
        self.register(FunctionDef::fixed(Operation::Replace, 4));

        // SUBSTITUTE
        self.register(FunctionDef::ranged(Operation::Substitute, 3, Some(4)));
    }

    fn register_logical_functions(&mut self) {
        for constant in Constant::ALL {
            self.register(FunctionDef::fixed(Operation::Constant(constant), 0));
        }

        // AND, OR, XOR
        for op in LogicalOperation::ALL {
            self.register(FunctionDef::ranged(Operation::Logical(op), 1, None));
        }

        // IF
        self.register(FunctionDef::fixed(Operation::If, 3));

        // CASE([condition], value)
        self.register(FunctionDef::ranged(Operation::Case, 1, Some(2)));

        // SWITCH(pattern, case...)
        self.register(FunctionDef::ranged(Operation::Switch, 2, None));
    }

    fn register_operators(&mut self) {
        for op in BinaryOperator::COMPARISON
            .into_iter()
            .chain(BinaryOperator::ARITHMETIC)
        {
            self.register(FunctionDef::fixed(Operation::Operator(op), 2));
        }
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Positional argument cursor
struct Args {
    operation: Operation,
    iter: IntoIter<NodeRef>,
}

impl Args {
    fn new(operation: Operation, args: Vec<NodeRef>) -> Self {
        Self {
            operation,
            iter: args.into_iter(),
        }
    }

    fn required(&mut self) -> FormulaResult<NodeRef> {
        self.iter.next().ok_or_else(|| {
            FormulaError::StructuralMisuse(format!("{} is missing an argument", self.operation))
        })
    }

    fn optional(&mut self) -> Option<NodeRef> {
        self.iter.next()
    }

    fn rest(self) -> Vec<NodeRef> {
        self.iter.collect()
    }
}

fn build_node(operation: Operation, args: Vec<NodeRef>) -> FormulaResult<Node> {
    let mut cursor = Args::new(operation, args);
    let node = match operation {
        Operation::Text | Operation::Number | Operation::Field => {
            return Err(FormulaError::StructuralMisuse(format!(
                "{operation} is a literal, not a function"
            )));
        }
        Operation::Constant(constant) => Node::Constant(constant),
        Operation::JoinStrings => Node::JoinStrings(cursor.rest()),
        Operation::Concatenate => Node::Concatenate(cursor.rest()),
        Operation::ArrayJoin => build_array_join(cursor.rest())?,
        Operation::Unary(function) => Node::Unary {
            function,
            argument: cursor.required()?,
        },
        Operation::StringAndNumber(function) => {
            let string = cursor.required()?;
            let number = cursor.required()?;
            Node::string_and_number(function, string, number)
        }
        Operation::Find | Operation::Search => {
            let find = Find {
                string_to_find: cursor.required()?,
                where_to_search: cursor.required()?,
                start_from_position: cursor.optional(),
            };
            if operation == Operation::Find {
                Node::Find(find)
            } else {
                Node::Search(find)
            }
        }
        Operation::Mid => Node::Mid(Mid {
            string: cursor.required()?,
            where_to_start: cursor.required()?,
            count: cursor.required()?,
        }),
        Operation::Replace => Node::Replace(Replace {
            string: cursor.required()?,
            start_character: cursor.required()?,
            number_of_characters: cursor.required()?,
            replacement: cursor.required()?,
        }),
        Operation::Substitute => Node::Substitute(Substitute {
            string: cursor.required()?,
            old_text: cursor.required()?,
            new_text: cursor.required()?,
            index: cursor.optional(),
        }),
        Operation::Logical(op) => Node::Logical {
            op,
            args: cursor.rest(),
        },
        Operation::If => Node::If(Conditional {
            condition: cursor.required()?,
            when_true: cursor.required()?,
            when_false: cursor.required()?,
        }),
        Operation::Case => {
            let first = cursor.required()?;
            match cursor.optional() {
                Some(value) => Node::Case(Case::when(first, value)),
                None => Node::Case(Case::otherwise(first)),
            }
        }
        Operation::Switch => {
            let pattern = cursor.required()?;
            let cases = cursor
                .rest()
                .iter()
                .map(|node| match &**node {
                    Node::Case(case) => Ok(case.clone()),
                    other => Err(FormulaError::StructuralMisuse(format!(
                        "SWITCH expects CASE arguments, got {}",
                        other.operation()
                    ))),
                })
                .collect::<FormulaResult<Vec<_>>>()?;
            Node::Switch(Switch { pattern, cases })
        }
        Operation::Operator(op) => {
            let left = cursor.required()?;
            let right = cursor.required()?;
            Node::operator(op, left, right)
        }
    };
    Ok(node)
}

/// The trailing argument is the literal separator; the parts are always `Many`
fn build_array_join(mut args: Vec<NodeRef>) -> FormulaResult<Node> {
    let separator = match args.pop().as_deref() {
        Some(Node::Text(separator)) => separator.clone(),
        Some(other) => {
            return Err(FormulaError::StructuralMisuse(format!(
                "ARRAYJOIN separator must be a text literal, got {}",
                other.operation()
            )))
        }
        None => {
            return Err(FormulaError::StructuralMisuse(
                "ARRAYJOIN is missing its separator".into(),
            ))
        }
    };
    Ok(Node::ArrayJoin(ArrayJoin {
        parts: ArrayJoinParts::Many(args),
        separator,
    }))
}
