//! String functions

use crate::ast::{NodeRef, StringNumberFunction, UnaryFunction};
use crate::compiler::{call, Compiler};
use crate::error::FormulaResult;

/// Parts of an `ARRAYJOIN`
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayJoinParts {
    /// Rendered as a JSON string
    Single(NodeRef),
    /// Rendered as a JSON array of strings
    Many(Vec<NodeRef>),
}

/// ARRAYJOIN(array, separator)
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayJoin {
    pub parts: ArrayJoinParts,
    /// Inserted verbatim between double quotes
    pub separator: String,
}

/// Arguments of `LEFT`, `RIGHT` and `REPT`
#[derive(Debug, Clone, PartialEq)]
pub struct StringAndNumber {
    pub string: NodeRef,
    pub number: NodeRef,
}

/// Arguments of `FIND` and `SEARCH`
#[derive(Debug, Clone, PartialEq)]
pub struct Find {
    pub string_to_find: NodeRef,
    pub where_to_search: NodeRef,
    pub start_from_position: Option<NodeRef>,
}

impl Find {
    pub fn new(string_to_find: impl Into<NodeRef>, where_to_search: impl Into<NodeRef>) -> Self {
        Self {
            string_to_find: string_to_find.into(),
            where_to_search: where_to_search.into(),
            start_from_position: None,
        }
    }

    pub fn with_start_from_position(mut self, position: impl Into<NodeRef>) -> Self {
        self.start_from_position = Some(position.into());
        self
    }
}

/// MID(string, whereToStart, count)
#[derive(Debug, Clone, PartialEq)]
pub struct Mid {
    pub string: NodeRef,
    pub where_to_start: NodeRef,
    pub count: NodeRef,
}

/// REPLACE(string, start_character, number_of_characters, replacement)
#[derive(Debug, Clone, PartialEq)]
pub struct Replace {
    pub string: NodeRef,
    pub start_character: NodeRef,
    pub number_of_characters: NodeRef,
    pub replacement: NodeRef,
}

/// SUBSTITUTE(string, old_text, new_text, [index])
#[derive(Debug, Clone, PartialEq)]
pub struct Substitute {
    pub string: NodeRef,
    pub old_text: NodeRef,
    pub new_text: NodeRef,
    pub index: Option<NodeRef>,
}

impl Substitute {
    pub fn new(
        string: impl Into<NodeRef>,
        old_text: impl Into<NodeRef>,
        new_text: impl Into<NodeRef>,
    ) -> Self {
        Self {
            string: string.into(),
            old_text: old_text.into(),
            new_text: new_text.into(),
            index: None,
        }
    }

    pub fn with_index(mut self, index: impl Into<NodeRef>) -> Self {
        self.index = Some(index.into());
        self
    }
}

/// a & b & ...
pub(crate) fn compile_join_strings(
    c: &mut Compiler<'_>,
    parts: &[NodeRef],
) -> FormulaResult<String> {
    Ok(c.reduce_all(parts, "&")?.join(" & "))
}

/// CONCATENATE(text1, [text2, ...])
pub(crate) fn compile_concatenate(
    c: &mut Compiler<'_>,
    parts: &[NodeRef],
) -> FormulaResult<String> {
    let args = c.reduce_all(parts, "CONCATENATE")?;
    Ok(call("CONCATENATE", &args))
}

/// ARRAYJOIN([item1, item2, ...], separator)
pub(crate) fn compile_array_join(c: &mut Compiler<'_>, join: &ArrayJoin) -> FormulaResult<String> {
    let array = match &join.parts {
        ArrayJoinParts::Single(part) => serde_json::to_string(&c.reduce(part)?)?,
        ArrayJoinParts::Many(parts) => serde_json::to_string(&c.reduce_all(parts, "ARRAYJOIN")?)?,
    };
    Ok(format!("ARRAYJOIN({}, \"{}\")", array, join.separator))
}

/// LEN(string), UPPER(string), ...
pub(crate) fn compile_unary(
    c: &mut Compiler<'_>,
    function: UnaryFunction,
    argument: &NodeRef,
) -> FormulaResult<String> {
    let arg = c.reduce(argument)?;
    Ok(call(function.name(), &[arg]))
}

/// LEFT(string, howMany), RIGHT(string, howMany), REPT(string, number)
pub(crate) fn compile_string_and_number(
    c: &mut Compiler<'_>,
    function: StringNumberFunction,
    args: &StringAndNumber,
) -> FormulaResult<String> {
    let string = c.reduce(&args.string)?;
    let number = c.reduce(&args.number)?;
    Ok(call(function.name(), &[string, number]))
}

/// FIND/SEARCH(stringToFind, whereToSearch, [startFromPosition])
pub(crate) fn compile_find(c: &mut Compiler<'_>, name: &str, find: &Find) -> FormulaResult<String> {
    let mut args = vec![c.reduce(&find.string_to_find)?, c.reduce(&find.where_to_search)?];
    if let Some(position) = &find.start_from_position {
        args.push(c.reduce(position)?);
    }
    Ok(call(name, &args))
}

/// MID(string, whereToStart, count)
pub(crate) fn compile_mid(c: &mut Compiler<'_>, mid: &Mid) -> FormulaResult<String> {
    let args = [
        c.reduce(&mid.string)?,
        c.reduce(&mid.where_to_start)?,
        c.reduce(&mid.count)?,
    ];
    Ok(call("MID", &args))
}

/// REPLACE(string, start_character, number_of_characters, replacement)
pub(crate) fn compile_replace(c: &mut Compiler<'_>, replace: &Replace) -> FormulaResult<String> {
    let args = [
        c.reduce(&replace.string)?,
        c.reduce(&replace.start_character)?,
        c.reduce(&replace.number_of_characters)?,
        c.reduce(&replace.replacement)?,
    ];
    Ok(call("REPLACE", &args))
}

/// SUBSTITUTE(string, old_text, new_text, [index])
pub(crate) fn compile_substitute(
    c: &mut Compiler<'_>,
    substitute: &Substitute,
) -> FormulaResult<String> {
    let mut args = vec![
        c.reduce(&substitute.string)?,
        c.reduce(&substitute.old_text)?,
        c.reduce(&substitute.new_text)?,
    ];
    if let Some(index) = &substitute.index {
        args.push(c.reduce(index)?);
    }
    Ok(call("SUBSTITUTE", &args))
}
