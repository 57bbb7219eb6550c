//! The evaluation-order contract: exactly-once evaluation and
//! deterministic final values, with no assumption about sibling order.

use cinit_common::ItemPos;
use cinit_resolver::{CountingSink, Resolver};
use cinit_types::{
    Declaration, Designator, Expr, InitItem, InitNode, SeqLen, StorageClass, TypeCatalog,
};

fn call(name: &str) -> InitNode {
    InitNode::Leaf(Expr::Call {
        callee: name.to_string(),
        args: Vec::new(),
    })
}

#[test]
fn each_leaf_is_evaluated_exactly_once() {
    let mut catalog = TypeCatalog::new();
    let int = catalog.int32();
    let rec = catalog.record(&[("a", int), ("b", int), ("c", int)]);
    let init = InitNode::Braced(vec![
        InitItem::positional(call("f")),
        InitItem::positional(call("g")),
        InitItem::positional(InitNode::Leaf(Expr::IntLit(3))),
    ]);
    let decl = Declaration::defining(rec, StorageClass::Automatic);
    let mut sink = CountingSink::new();
    Resolver::new(&catalog)
        .resolve_with_sink(&decl, &init, &mut sink)
        .unwrap();
    assert_eq!(sink.counts.len(), 3);
    assert!(sink.all_exactly_once());
}

#[test]
fn overridden_leaves_are_not_evaluated_twice() {
    let mut catalog = TypeCatalog::new();
    let int = catalog.int32();
    let seq = catalog.sequence(int, SeqLen::Known(2));
    let init = InitNode::Braced(vec![
        InitItem::designated([Designator::Index(0)], InitNode::Leaf(Expr::IntLit(1))),
        InitItem::designated([Designator::Index(0)], InitNode::Leaf(Expr::IntLit(2))),
    ]);
    let decl = Declaration::defining(seq, StorageClass::Automatic);
    let mut sink = CountingSink::new();
    let resolution = Resolver::new(&catalog)
        .resolve_with_sink(&decl, &init, &mut sink)
        .unwrap();
    // Each item's expression is committed at most once; the final value is
    // deterministic regardless of evaluation order.
    assert!(sink.all_exactly_once());
    assert_eq!(sink.count(&ItemPos::root().child(0)), 1);
    assert_eq!(sink.count(&ItemPos::root().child(1)), 1);
    assert_eq!(
        resolution.value,
        cinit_types::ResolvedValue::Sequence(vec![
            cinit_types::ResolvedValue::Scalar(cinit_types::ScalarValue::Int(2)),
            cinit_types::ResolvedValue::Scalar(cinit_types::ScalarValue::Int(0)),
        ])
    );
}

#[test]
fn string_literal_counts_as_one_evaluation() {
    let mut catalog = TypeCatalog::new();
    let ch = catalog.char_();
    let seq = catalog.sequence(ch, SeqLen::Unknown);
    let init = InitNode::Leaf(Expr::StrLit("hi".to_string()));
    let decl = Declaration::defining(seq, StorageClass::Static);
    let mut sink = CountingSink::new();
    Resolver::new(&catalog)
        .resolve_with_sink(&decl, &init, &mut sink)
        .unwrap();
    assert_eq!(sink.counts.len(), 1);
    assert!(sink.all_exactly_once());
}

#[test]
fn identical_inputs_resolve_identically() {
    let mut catalog = TypeCatalog::new();
    let int = catalog.int32();
    let rec = catalog.record(&[("a", int), ("b", int)]);
    let init = InitNode::Braced(vec![
        InitItem::designated([Designator::Field("b".to_string())], InitNode::Leaf(Expr::IntLit(5))),
        InitItem::positional(InitNode::Leaf(Expr::IntLit(7))),
    ]);
    let decl = Declaration::defining(rec, StorageClass::Automatic);
    let resolver = Resolver::new(&catalog);
    let first = resolver.resolve(&decl, &init).unwrap();
    let second = resolver.resolve(&decl, &init).unwrap();
    assert_eq!(first, second);
}
