//! Formula expression tree types

use std::fmt;
use std::mem;
use std::sync::Arc;

use crate::error::{FormulaError, FormulaResult};
use crate::functions::logical::{Case, Conditional, Switch};
use crate::functions::text::{
    ArrayJoin, ArrayJoinParts, Find, Mid, Replace, StringAndNumber, Substitute,
};

/// Shared handle to a node.
///
/// Compilation never mutates a node, so the same instance can sit under several parents.
pub type NodeRef = Arc<Node>;

/// Formula expression tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    // === Literals ===
    /// Text literal, compiled to `"value"`
    Text(String),
    /// Numeric literal
    Number(f64),
    /// Field reference, braced when the name contains a space
    Field(String),
    /// Zero-argument function such as `BLANK()`
    Constant(Constant),

    // === String operations ===
    /// `a & b & c`
    JoinStrings(Vec<NodeRef>),
    /// `CONCATENATE(a, b, ...)`
    Concatenate(Vec<NodeRef>),
    /// `ARRAYJOIN([...], "sep")`
    ArrayJoin(ArrayJoin),
    /// One-argument function call
    Unary {
        function: UnaryFunction,
        argument: NodeRef,
    },
    /// `LEFT`, `RIGHT` and `REPT`
    StringAndNumber {
        function: StringNumberFunction,
        args: StringAndNumber,
    },
    /// `FIND(stringToFind, whereToSearch, [startFromPosition])`
    Find(Find),
    /// `SEARCH(stringToFind, whereToSearch, [startFromPosition])`
    Search(Find),
    /// `MID(string, whereToStart, count)`
    Mid(Mid),
    /// `REPLACE(string, start_character, number_of_characters, replacement)`
    Replace(Replace),
    /// `SUBSTITUTE(string, old_text, new_text, [index])`
    Substitute(Substitute),

    // === Logical ===
    /// `AND`, `OR` and `XOR` over any number of arguments
    Logical {
        op: LogicalOperation,
        args: Vec<NodeRef>,
    },
    /// `IF(condition, true, false)`
    If(Conditional),
    /// A single `SWITCH` branch
    Case(Case),
    /// `SWITCH(pattern, case, ...)`
    Switch(Switch),

    // === Operators ===
    /// Binary infix operation
    Operator {
        op: BinaryOperator,
        left: NodeRef,
        right: NodeRef,
    },
}

/// Zero-argument functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constant {
    Blank,
    Error,
    True,
    False,
}

impl Constant {
    pub const ALL: [Constant; 4] = [Self::Blank, Self::Error, Self::True, Self::False];

    pub fn name(self) -> &'static str {
        match self {
            Self::Blank => "BLANK",
            Self::Error => "ERROR",
            Self::True => "TRUE",
            Self::False => "FALSE",
        }
    }
}

/// One-argument functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryFunction {
    Len,
    Upper,
    Lower,
    Trim,
    /// `T(value)`
    TextValue,
    Not,
    IsError,
    EncodeUrlComponent,
}

impl UnaryFunction {
    pub const ALL: [UnaryFunction; 8] = [
        Self::Len,
        Self::Upper,
        Self::Lower,
        Self::Trim,
        Self::TextValue,
        Self::Not,
        Self::IsError,
        Self::EncodeUrlComponent,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Len => "LEN",
            Self::Upper => "UPPER",
            Self::Lower => "LOWER",
            Self::Trim => "TRIM",
            Self::TextValue => "T",
            Self::Not => "NOT",
            Self::IsError => "ISERROR",
            Self::EncodeUrlComponent => "ENCODE_URL_COMPONENT",
        }
    }
}

/// Functions taking a string and a count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringNumberFunction {
    Left,
    Right,
    Rept,
}

impl StringNumberFunction {
    pub const ALL: [StringNumberFunction; 3] = [Self::Left, Self::Right, Self::Rept];

    pub fn name(self) -> &'static str {
        match self {
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Rept => "REPT",
        }
    }
}

/// Variadic logical functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOperation {
    And,
    Or,
    Xor,
}

impl LogicalOperation {
    pub const ALL: [LogicalOperation; 3] = [Self::And, Self::Or, Self::Xor];

    pub fn name(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "XOR",
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    // Comparison
    GreaterEqual,
    LessEqual,
    LessThan,
    GreaterThan,
    Equal,
    NotEqual,

    // Arithmetic
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOperator {
    pub const COMPARISON: [BinaryOperator; 6] = [
        Self::GreaterEqual,
        Self::LessEqual,
        Self::LessThan,
        Self::GreaterThan,
        Self::Equal,
        Self::NotEqual,
    ];

    pub const ARITHMETIC: [BinaryOperator; 4] =
        [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    /// The infix token emitted between the operands
    pub fn token(self) -> &'static str {
        match self {
            Self::GreaterEqual => ">=",
            Self::LessEqual => "<=",
            Self::LessThan => "<",
            Self::GreaterThan => ">",
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }

    pub fn is_comparison(self) -> bool {
        Self::COMPARISON.contains(&self)
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Operation identifier of a node.
///
/// Fixed when the node is built; selects the template its children are combined with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Text,
    Number,
    Field,
    Constant(Constant),
    JoinStrings,
    Concatenate,
    ArrayJoin,
    Unary(UnaryFunction),
    StringAndNumber(StringNumberFunction),
    Find,
    Search,
    Mid,
    Replace,
    Substitute,
    Logical(LogicalOperation),
    If,
    Case,
    Switch,
    Operator(BinaryOperator),
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Number => "NUMBER",
            Self::Field => "FIELD",
            Self::Constant(c) => c.name(),
            Self::JoinStrings => "&",
            Self::Concatenate => "CONCATENATE",
            Self::ArrayJoin => "ARRAYJOIN",
            Self::Unary(f) => f.name(),
            Self::StringAndNumber(f) => f.name(),
            Self::Find => "FIND",
            Self::Search => "SEARCH",
            Self::Mid => "MID",
            Self::Replace => "REPLACE",
            Self::Substitute => "SUBSTITUTE",
            Self::Logical(op) => op.name(),
            Self::If => "IF",
            Self::Case => "CASE",
            Self::Switch => "SWITCH",
            Self::Operator(op) => op.token(),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Node {
    // === Construction ===

    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    pub fn field(name: impl Into<String>) -> Self {
        Self::Field(name.into())
    }

    pub fn constant(constant: Constant) -> Self {
        Self::Constant(constant)
    }

    pub fn join_strings<I, N>(parts: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<NodeRef>,
    {
        Self::JoinStrings(collect_refs(parts))
    }

    pub fn concatenate<I, N>(parts: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<NodeRef>,
    {
        Self::Concatenate(collect_refs(parts))
    }

    pub fn array_join(parts: ArrayJoinParts, separator: impl Into<String>) -> Self {
        Self::ArrayJoin(ArrayJoin {
            parts,
            separator: separator.into(),
        })
    }

    pub fn unary(function: UnaryFunction, argument: impl Into<NodeRef>) -> Self {
        Self::Unary {
            function,
            argument: argument.into(),
        }
    }

    pub fn len(argument: impl Into<NodeRef>) -> Self {
        Self::unary(UnaryFunction::Len, argument)
    }

    pub fn upper(argument: impl Into<NodeRef>) -> Self {
        Self::unary(UnaryFunction::Upper, argument)
    }

    pub fn lower(argument: impl Into<NodeRef>) -> Self {
        Self::unary(UnaryFunction::Lower, argument)
    }

    pub fn trim(argument: impl Into<NodeRef>) -> Self {
        Self::unary(UnaryFunction::Trim, argument)
    }

    pub fn not(argument: impl Into<NodeRef>) -> Self {
        Self::unary(UnaryFunction::Not, argument)
    }

    pub fn is_error(argument: impl Into<NodeRef>) -> Self {
        Self::unary(UnaryFunction::IsError, argument)
    }

    pub fn string_and_number(
        function: StringNumberFunction,
        string: impl Into<NodeRef>,
        number: impl Into<NodeRef>,
    ) -> Self {
        Self::StringAndNumber {
            function,
            args: StringAndNumber {
                string: string.into(),
                number: number.into(),
            },
        }
    }

    pub fn left(string: impl Into<NodeRef>, how_many: impl Into<NodeRef>) -> Self {
        Self::string_and_number(StringNumberFunction::Left, string, how_many)
    }

    pub fn right(string: impl Into<NodeRef>, how_many: impl Into<NodeRef>) -> Self {
        Self::string_and_number(StringNumberFunction::Right, string, how_many)
    }

    pub fn rept(string: impl Into<NodeRef>, times: impl Into<NodeRef>) -> Self {
        Self::string_and_number(StringNumberFunction::Rept, string, times)
    }

    pub fn find(string_to_find: impl Into<NodeRef>, where_to_search: impl Into<NodeRef>) -> Self {
        Self::Find(Find::new(string_to_find, where_to_search))
    }

    pub fn search(string_to_find: impl Into<NodeRef>, where_to_search: impl Into<NodeRef>) -> Self {
        Self::Search(Find::new(string_to_find, where_to_search))
    }

    pub fn mid(
        string: impl Into<NodeRef>,
        where_to_start: impl Into<NodeRef>,
        count: impl Into<NodeRef>,
    ) -> Self {
        Self::Mid(Mid {
            string: string.into(),
            where_to_start: where_to_start.into(),
            count: count.into(),
        })
    }

    pub fn replace(
        string: impl Into<NodeRef>,
        start_character: impl Into<NodeRef>,
        number_of_characters: impl Into<NodeRef>,
        replacement: impl Into<NodeRef>,
    ) -> Self {
        Self::Replace(Replace {
            string: string.into(),
            start_character: start_character.into(),
            number_of_characters: number_of_characters.into(),
            replacement: replacement.into(),
        })
    }

    pub fn substitute(
        string: impl Into<NodeRef>,
        old_text: impl Into<NodeRef>,
        new_text: impl Into<NodeRef>,
    ) -> Self {
        Self::Substitute(Substitute::new(string, old_text, new_text))
    }

    pub fn logical<I, N>(op: LogicalOperation, args: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<NodeRef>,
    {
        Self::Logical {
            op,
            args: collect_refs(args),
        }
    }

    pub fn and<I, N>(args: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<NodeRef>,
    {
        Self::logical(LogicalOperation::And, args)
    }

    pub fn or<I, N>(args: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<NodeRef>,
    {
        Self::logical(LogicalOperation::Or, args)
    }

    pub fn xor<I, N>(args: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<NodeRef>,
    {
        Self::logical(LogicalOperation::Xor, args)
    }

    pub fn if_then_else(
        condition: impl Into<NodeRef>,
        when_true: impl Into<NodeRef>,
        when_false: impl Into<NodeRef>,
    ) -> Self {
        Self::If(Conditional {
            condition: condition.into(),
            when_true: when_true.into(),
            when_false: when_false.into(),
        })
    }

    pub fn switch(pattern: impl Into<NodeRef>, cases: impl IntoIterator<Item = Case>) -> Self {
        Self::Switch(Switch {
            pattern: pattern.into(),
            cases: cases.into_iter().collect(),
        })
    }

    pub fn operator(
        op: BinaryOperator,
        left: impl Into<NodeRef>,
        right: impl Into<NodeRef>,
    ) -> Self {
        Self::Operator {
            op,
            left: left.into(),
            right: right.into(),
        }
    }

    // === Introspection ===

    /// The operation identifier of this node
    pub fn operation(&self) -> Operation {
        match self {
            Self::Text(_) => Operation::Text,
            Self::Number(_) => Operation::Number,
            Self::Field(_) => Operation::Field,
            Self::Constant(c) => Operation::Constant(*c),
            Self::JoinStrings(_) => Operation::JoinStrings,
            Self::Concatenate(_) => Operation::Concatenate,
            Self::ArrayJoin(_) => Operation::ArrayJoin,
            Self::Unary { function, .. } => Operation::Unary(*function),
            Self::StringAndNumber { function, .. } => Operation::StringAndNumber(*function),
            Self::Find(_) => Operation::Find,
            Self::Search(_) => Operation::Search,
            Self::Mid(_) => Operation::Mid,
            Self::Replace(_) => Operation::Replace,
            Self::Substitute(_) => Operation::Substitute,
            Self::Logical { op, .. } => Operation::Logical(*op),
            Self::If(_) => Operation::If,
            Self::Case(_) => Operation::Case,
            Self::Switch(_) => Operation::Switch,
            Self::Operator { op, .. } => Operation::Operator(*op),
        }
    }

    /// Structural children in formula-argument order.
    ///
    /// A `SWITCH` lists its pattern followed by the condition and value of each case.
    /// The `ARRAYJOIN` separator is literal text and is not a child.
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Self::Text(_) | Self::Number(_) | Self::Field(_) | Self::Constant(_) => Vec::new(),
            Self::JoinStrings(parts) | Self::Concatenate(parts) => deref_all(parts),
            Self::Logical { args, .. } => deref_all(args),
            Self::ArrayJoin(join) => match &join.parts {
                ArrayJoinParts::Single(part) => vec![&**part],
                ArrayJoinParts::Many(parts) => deref_all(parts),
            },
            Self::Unary { argument, .. } => vec![&**argument],
            Self::StringAndNumber { args, .. } => vec![&*args.string, &*args.number],
            Self::Find(find) | Self::Search(find) => {
                let mut children = vec![&*find.string_to_find, &*find.where_to_search];
                children.extend(find.start_from_position.as_deref());
                children
            }
            Self::Mid(mid) => vec![&*mid.string, &*mid.where_to_start, &*mid.count],
            Self::Replace(replace) => vec![
                &*replace.string,
                &*replace.start_character,
                &*replace.number_of_characters,
                &*replace.replacement,
            ],
            Self::Substitute(substitute) => {
                let mut children = vec![
                    &*substitute.string,
                    &*substitute.old_text,
                    &*substitute.new_text,
                ];
                children.extend(substitute.index.as_deref());
                children
            }
            Self::If(conditional) => vec![
                &*conditional.condition,
                &*conditional.when_true,
                &*conditional.when_false,
            ],
            Self::Case(case) => case.children(),
            Self::Switch(switch) => {
                let mut children = vec![&*switch.pattern];
                for case in &switch.cases {
                    children.extend(case.children());
                }
                children
            }
            Self::Operator { left, right, .. } => vec![&**left, &**right],
        }
    }

    /// Whether the node carries a structured payload rather than a bare string or number.
    ///
    /// Operator operands are parenthesized exactly when this holds.
    pub fn is_compound(&self) -> bool {
        !matches!(
            self,
            Self::Text(_) | Self::Number(_) | Self::Field(_) | Self::Constant(_)
        )
    }

    // === Rebuilding ===

    /// Rebuild the node with its optional trailing argument set.
    ///
    /// Applies to `FIND`/`SEARCH` (`startFromPosition`) and `SUBSTITUTE` (`index`).
    pub fn with_optional_argument(mut self, argument: impl Into<NodeRef>) -> FormulaResult<Self> {
        let argument = argument.into();
        match &mut self {
            Self::Find(find) | Self::Search(find) => find.start_from_position = Some(argument),
            Self::Substitute(substitute) => substitute.index = Some(argument),
            other => {
                return Err(FormulaError::StructuralMisuse(format!(
                    "{} has no optional argument",
                    other.operation()
                )))
            }
        }
        Ok(self)
    }

    /// Move every uniquely owned compound child onto `stack`, leaving a leaf in its slot
    fn detach_children(&mut self, stack: &mut Vec<Node>) {
        match self {
            Self::Text(_) | Self::Number(_) | Self::Field(_) | Self::Constant(_) => {}
            Self::JoinStrings(parts) | Self::Concatenate(parts) => detach_all(parts, stack),
            Self::Logical { args, .. } => detach_all(args, stack),
            Self::ArrayJoin(join) => match &mut join.parts {
                ArrayJoinParts::Single(part) => detach(part, stack),
                ArrayJoinParts::Many(parts) => detach_all(parts, stack),
            },
            Self::Unary { argument, .. } => detach(argument, stack),
            Self::StringAndNumber { args, .. } => {
                detach(&mut args.string, stack);
                detach(&mut args.number, stack);
            }
            Self::Find(find) | Self::Search(find) => {
                detach(&mut find.string_to_find, stack);
                detach(&mut find.where_to_search, stack);
                if let Some(position) = &mut find.start_from_position {
                    detach(position, stack);
                }
            }
            Self::Mid(mid) => {
                detach(&mut mid.string, stack);
                detach(&mut mid.where_to_start, stack);
                detach(&mut mid.count, stack);
            }
            Self::Replace(replace) => {
                detach(&mut replace.string, stack);
                detach(&mut replace.start_character, stack);
                detach(&mut replace.number_of_characters, stack);
                detach(&mut replace.replacement, stack);
            }
            Self::Substitute(substitute) => {
                detach(&mut substitute.string, stack);
                detach(&mut substitute.old_text, stack);
                detach(&mut substitute.new_text, stack);
                if let Some(index) = &mut substitute.index {
                    detach(index, stack);
                }
            }
            Self::If(conditional) => {
                detach(&mut conditional.condition, stack);
                detach(&mut conditional.when_true, stack);
                detach(&mut conditional.when_false, stack);
            }
            Self::Case(case) => detach_case(case, stack),
            Self::Switch(switch) => {
                detach(&mut switch.pattern, stack);
                for case in &mut switch.cases {
                    detach_case(case, stack);
                }
            }
            Self::Operator { left, right, .. } => {
                detach(left, stack);
                detach(right, stack);
            }
        }
    }
}

/// Deep trees are torn down from a heap stack instead of recursing through `Arc` drops
impl Drop for Node {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        self.detach_children(&mut stack);
        while let Some(mut node) = stack.pop() {
            node.detach_children(&mut stack);
        }
    }
}

fn detach(slot: &mut NodeRef, stack: &mut Vec<Node>) {
    if !slot.is_compound() {
        return;
    }
    // shared children are released by their last owner
    if let Some(node) = Arc::get_mut(slot) {
        stack.push(mem::replace(node, Node::Constant(Constant::Blank)));
    }
}

fn detach_all(slots: &mut [NodeRef], stack: &mut Vec<Node>) {
    for slot in slots {
        detach(slot, stack);
    }
}

fn detach_case(case: &mut Case, stack: &mut Vec<Node>) {
    detach(&mut case.value, stack);
    if let Some(condition) = &mut case.condition {
        detach(condition, stack);
    }
}

impl From<Case> for Node {
    fn from(case: Case) -> Self {
        Self::Case(case)
    }
}

fn collect_refs<I, N>(nodes: I) -> Vec<NodeRef>
where
    I: IntoIterator<Item = N>,
    N: Into<NodeRef>,
{
    nodes.into_iter().map(Into::into).collect()
}

fn deref_all(nodes: &[NodeRef]) -> Vec<&Node> {
    nodes.iter().map(|node| &**node).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_names() {
        assert_eq!(Node::text("a").operation().name(), "TEXT");
        assert_eq!(Node::field("a").operation().name(), "FIELD");
        assert_eq!(Node::len(Node::text("a")).operation().name(), "LEN");
        assert_eq!(
            Node::join_strings([Node::text("a")]).operation().name(),
            "&"
        );
        assert_eq!(
            Node::operator(BinaryOperator::NotEqual, Node::number(1.0), Node::number(2.0))
                .operation()
                .to_string(),
            "!="
        );
    }

    #[test]
    fn test_children_follow_argument_order() {
        let mid = Node::mid(Node::text("quick"), Node::number(2.0), Node::number(3.0));
        let children = mid.children();
        assert_eq!(children.len(), 3);
        assert_eq!(children[0], &Node::text("quick"));
        assert_eq!(children[1], &Node::number(2.0));
        assert_eq!(children[2], &Node::number(3.0));

        assert!(Node::field("a").children().is_empty());
    }

    #[test]
    fn test_switch_children_flatten_cases() {
        let switch = Node::switch(
            Node::field("p"),
            [
                Case::when(Node::number(1.0), Node::text("one")),
                Case::otherwise(Node::text("other")),
            ],
        );
        let children = switch.children();
        assert_eq!(children.len(), 4);
        assert_eq!(children[0], &Node::field("p"));
        assert_eq!(children[1], &Node::number(1.0));
        assert_eq!(children[3], &Node::text("other"));
    }

    #[test]
    fn test_is_compound() {
        assert!(!Node::text("a").is_compound());
        assert!(!Node::number(1.0).is_compound());
        assert!(!Node::field("a b").is_compound());
        assert!(!Node::constant(Constant::Blank).is_compound());
        assert!(Node::len(Node::text("a")).is_compound());
        assert!(
            Node::operator(BinaryOperator::Add, Node::number(1.0), Node::number(2.0)).is_compound()
        );
    }

    #[test]
    fn test_with_optional_argument_rejects_fixed_arity() {
        let err = Node::mid(Node::text("a"), Node::number(1.0), Node::number(1.0))
            .with_optional_argument(Node::number(2.0))
            .unwrap_err();
        assert!(matches!(err, FormulaError::StructuralMisuse(_)));
    }

    #[test]
    fn test_node_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Node>();
    }

    #[test]
    fn test_deep_chain_drops_without_recursion() {
        let mut node = Node::field("a");
        for _ in 0..200_000 {
            node = Node::not(node);
        }
        assert!(matches!(
            crate::compiler::compile(&node),
            Err(FormulaError::DepthLimitExceeded(_))
        ));
        drop(node);
    }

    #[test]
    fn test_deep_operator_chain_drops() {
        let mut node = Node::number(1.0);
        for i in 0..150_000 {
            node = Node::operator(BinaryOperator::Add, node, Node::number(f64::from(i)));
        }
        drop(node);
    }

    #[test]
    fn test_shared_deep_subtree_survives_parent_drop() {
        let mut chain = Node::field("a");
        for _ in 0..120_000 {
            chain = Node::trim(chain);
        }
        let shared: NodeRef = Arc::new(chain);
        let parent = Node::and([shared.clone(), shared.clone()]);
        drop(parent);

        assert_eq!(Arc::strong_count(&shared), 1);
        let mut depth = 0;
        let mut current: &Node = &shared;
        while let Some(child) = current.children().first().copied() {
            current = child;
            depth += 1;
        }
        assert_eq!(depth, 120_000);
        assert_eq!(current, &Node::field("a"));
    }

    #[test]
    fn test_with_optional_argument_keeps_required_arguments() {
        let search = Node::search(Node::text("fox"), Node::field("where"))
            .with_optional_argument(Node::number(3.0))
            .unwrap();
        assert_eq!(
            search.children(),
            vec![&Node::text("fox"), &Node::field("where"), &Node::number(3.0)]
        );
    }
}
