//! End-to-end compilation of formula trees

use formula_tree::describe::from_json;
use formula_tree::{
    compile, ArrayJoinParts, BinaryOperator, Case, Formula, FormulaError, Node, NodeRef,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::thread;

/// AND over two `&`-joins
#[test]
fn test_and_of_joins() {
    let first = Node::join_strings([Node::field("a"), Node::field("b"), Node::field("c")]);
    let second = Node::join_strings([Node::field("c"), Node::field("d")]);
    assert_eq!(
        Formula::compile_node(&Node::and([first, second])).unwrap(),
        "AND(a & b & c, c & d)"
    );
}

/// ARRAYJOIN renders the compiled parts as a JSON array
#[test]
fn test_array_join() {
    let node = Node::array_join(
        ArrayJoinParts::Many(vec![
            Node::field("a").into(),
            Node::field("b").into(),
            Node::field("c").into(),
        ]),
        " ;",
    );
    assert_eq!(compile(&node).unwrap(), r#"ARRAYJOIN(["a","b","c"], " ;")"#);
}

/// FIND gains its optional argument after construction
#[test]
fn test_find_then_add_position() {
    let find = Node::find(Node::text("a"), Node::text("a long text"));
    assert_eq!(compile(&find).unwrap(), r#"FIND("a", "a long text")"#);

    let find = find.with_optional_argument(Node::number(5.0)).unwrap();
    assert_eq!(compile(&find).unwrap(), r#"FIND("a", "a long text", 5)"#);
}

#[test]
fn test_switch() {
    let node = Node::switch(
        Node::field("some-field"),
        [
            Case::when(Node::field("case1 field"), Node::text("case1 value")),
            Case::when(Node::number(5.0), Node::field("case2_value")),
            Case::otherwise(Node::number(10.0)),
        ],
    );
    assert_eq!(
        compile(&node).unwrap(),
        r#"SWITCH(some-field, {case1 field}, "case1 value", 5, case2_value, 10)"#
    );
}

#[test]
fn test_nested_operator() {
    let node = Node::operator(
        BinaryOperator::Subtract,
        Node::number(5.0),
        Node::operator(
            BinaryOperator::Multiply,
            Node::field("long field"),
            Node::number(3.0),
        ),
    );
    assert_eq!(compile(&node).unwrap(), "5 - ({long field} * 3)");
}

/// The same IF instance appears under both branches
#[test]
fn test_reused_node() {
    let condition: NodeRef = Arc::new(Node::field("a"));
    let inner: NodeRef = Arc::new(Node::if_then_else(
        condition.clone(),
        Node::field("b"),
        Node::field("c"),
    ));
    let outer = Node::if_then_else(condition, inner.clone(), inner);
    assert_eq!(compile(&outer).unwrap(), "IF(a, IF(a, b, c), IF(a, b, c))");
}

#[test]
fn test_compile_is_idempotent() {
    let node = Node::concatenate([
        Node::upper(Node::field("first name")),
        Node::text(" "),
        Node::substitute(Node::field("last"), Node::text("-"), Node::text(" ")),
    ]);
    let first = compile(&node).unwrap();
    let second = compile(&node).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        first,
        r#"CONCATENATE(UPPER({first name}), " ", SUBSTITUTE(last, "-", " "))"#
    );
}

#[test]
fn test_concurrent_compilation() {
    let node: NodeRef = Arc::new(Node::or([
        Node::operator(BinaryOperator::GreaterEqual, Node::field("score"), Node::number(50.0)),
        Node::is_error(Node::field("score")),
    ]));
    let expected = compile(&node).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let node = Arc::clone(&node);
            thread::spawn(move || compile(&node))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().unwrap(), expected);
    }
    assert_eq!(expected, "OR(score >= 50, ISERROR(score))");
}

#[test]
fn test_failure_returns_no_partial_formula() {
    let node = Node::and([
        Node::field("a"),
        Node::logical(formula_tree::LogicalOperation::Or, Vec::<Node>::new()),
    ]);
    assert!(matches!(compile(&node), Err(FormulaError::MissingValue(_))));
}

#[test]
fn test_formula_holder() {
    let mut formula = Formula::new();
    assert!(formula.compile().is_err());

    formula.attach(Node::left(Node::field("code"), Node::number(3.0)));
    assert_eq!(formula.compile().unwrap(), "LEFT(code, 3)");
}

#[test]
fn test_json_description() {
    let node = from_json(
        r#"{
            "op": "IF",
            "args": [
                {"op": "=", "args": [{"field": "status"}, {"text": "done"}]},
                {"op": "ARRAYJOIN", "args": [{"field": "tags"}, {"text": ", "}]},
                {"op": "BLANK"}
            ]
        }"#,
    )
    .unwrap();
    assert_eq!(
        compile(&node).unwrap(),
        r#"IF(status = "done", ARRAYJOIN(["tags"], ", "), BLANK())"#
    );
}
