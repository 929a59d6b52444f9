//! Logical functions

use crate::ast::{LogicalOperation, Node, NodeRef};
use crate::compiler::{call, Compiler};
use crate::error::{FormulaError, FormulaResult};

/// Arguments of `IF`
#[derive(Debug, Clone, PartialEq)]
pub struct Conditional {
    pub condition: NodeRef,
    pub when_true: NodeRef,
    pub when_false: NodeRef,
}

/// One branch of a `SWITCH`.
///
/// A case without a condition is the default branch.
#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    pub value: NodeRef,
    pub condition: Option<NodeRef>,
}

impl Case {
    /// Branch taken when the pattern matches `condition`
    pub fn when(condition: impl Into<NodeRef>, value: impl Into<NodeRef>) -> Self {
        Self {
            value: value.into(),
            condition: Some(condition.into()),
        }
    }

    /// Default branch
    pub fn otherwise(value: impl Into<NodeRef>) -> Self {
        Self {
            value: value.into(),
            condition: None,
        }
    }

    pub(crate) fn children(&self) -> Vec<&Node> {
        let mut children: Vec<&Node> = self.condition.as_deref().into_iter().collect();
        children.push(&self.value);
        children
    }
}

/// Arguments of `SWITCH`
#[derive(Debug, Clone, PartialEq)]
pub struct Switch {
    pub pattern: NodeRef,
    /// Emitted in order; the first matching case wins
    pub cases: Vec<Case>,
}

/// AND/OR/XOR(logical1, [logical2, ...])
pub(crate) fn compile_logical(
    c: &mut Compiler<'_>,
    op: LogicalOperation,
    args: &[NodeRef],
) -> FormulaResult<String> {
    let args = c.reduce_all(args, op.name())?;
    Ok(call(op.name(), &args))
}

/// IF(condition, true, false)
pub(crate) fn compile_if(c: &mut Compiler<'_>, conditional: &Conditional) -> FormulaResult<String> {
    let args = [
        c.reduce(&conditional.condition)?,
        c.reduce(&conditional.when_true)?,
        c.reduce(&conditional.when_false)?,
    ];
    Ok(call("IF", &args))
}

/// A case fragment: `condition, value` or a lone `value`
pub(crate) fn compile_case(c: &mut Compiler<'_>, case: &Case) -> FormulaResult<String> {
    let value = c.reduce(&case.value)?;
    match &case.condition {
        Some(condition) => Ok(format!("{}, {}", c.reduce(condition)?, value)),
        None => Ok(value),
    }
}

/// SWITCH(expression, [pattern, result, ...], [default])
pub(crate) fn compile_switch(c: &mut Compiler<'_>, switch: &Switch) -> FormulaResult<String> {
    if switch.cases.is_empty() {
        return Err(FormulaError::MissingValue("SWITCH has no cases".into()));
    }
    let mut args = Vec::with_capacity(switch.cases.len() + 1);
    args.push(c.reduce(&switch.pattern)?);
    for case in &switch.cases {
        args.push(c.nested(|c| compile_case(c, case))?);
    }
    Ok(call("SWITCH", &args))
}
