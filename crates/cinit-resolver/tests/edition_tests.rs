//! `= {}` empty braced lists are gated on the language edition.

use cinit_common::diagnostics::diagnostic_codes;
use cinit_resolver::{Edition, Resolver, ResolverOptions};
use cinit_types::{
    Declaration, Designator, Expr, InitItem, InitNode, ResolvedValue, ScalarValue, SeqLen,
    StorageClass, TypeCatalog,
};

fn field(name: &str) -> Designator {
    Designator::Field(name.to_string())
}

fn opts(edition: Edition) -> ResolverOptions {
    ResolverOptions { edition }
}

#[test]
fn empty_list_zero_initializes_under_current_edition() {
    let mut catalog = TypeCatalog::new();
    let int = catalog.int32();
    let rec = catalog.record(&[("a", int), ("b", int)]);
    let decl = Declaration::defining(rec, StorageClass::Automatic);
    let resolution = Resolver::new(&catalog)
        .resolve(&decl, &InitNode::Empty)
        .unwrap();
    assert_eq!(
        resolution.value,
        ResolvedValue::Record(vec![
            ResolvedValue::Scalar(ScalarValue::Int(0)),
            ResolvedValue::Scalar(ScalarValue::Int(0)),
        ])
    );
}

#[test]
fn older_editions_reject_empty_list_at_the_root() {
    let mut catalog = TypeCatalog::new();
    let int = catalog.int32();
    let rec = catalog.record(&[("a", int)]);
    let decl = Declaration::defining(rec, StorageClass::Automatic);
    for edition in [Edition::C99, Edition::C11] {
        let diags = Resolver::with_options(&catalog, opts(edition))
            .resolve(&decl, &InitNode::Empty)
            .unwrap_err();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, diagnostic_codes::EMPTY_BRACED_LIST_NOT_ALLOWED);
    }
}

#[test]
fn older_editions_reject_nested_empty_list() {
    let mut catalog = TypeCatalog::new();
    let int = catalog.int32();
    let point = catalog.record(&[("x", int), ("y", int)]);
    let rec = catalog.record(&[("p", point), ("q", int)]);
    let init = InitNode::Braced(vec![
        InitItem::designated([field("p")], InitNode::Empty),
        InitItem::designated([field("q")], InitNode::Leaf(Expr::IntLit(1))),
    ]);
    let decl = Declaration::defining(rec, StorageClass::Automatic);
    let diags = Resolver::with_options(&catalog, opts(Edition::C11))
        .resolve(&decl, &init)
        .unwrap_err();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code, diagnostic_codes::EMPTY_BRACED_LIST_NOT_ALLOWED);
}

#[test]
fn nested_empty_list_resets_the_sub_object() {
    let mut catalog = TypeCatalog::new();
    let int = catalog.int32();
    let point = catalog.record(&[("x", int), ("y", int)]);
    let rec = catalog.record(&[("p", point), ("q", int)]);
    // `.p.x = 7` then `.p = {}`: the reopened braces throw away the
    // earlier write and leave p fully zeroed.
    let init = InitNode::Braced(vec![
        InitItem::designated([field("p"), field("x")], InitNode::Leaf(Expr::IntLit(7))),
        InitItem::designated([field("q")], InitNode::Leaf(Expr::IntLit(9))),
        InitItem::designated([field("p")], InitNode::Empty),
    ]);
    let decl = Declaration::defining(rec, StorageClass::Automatic);
    let resolution = Resolver::new(&catalog).resolve(&decl, &init).unwrap();
    assert_eq!(
        resolution.value,
        ResolvedValue::Record(vec![
            ResolvedValue::Record(vec![
                ResolvedValue::Scalar(ScalarValue::Int(0)),
                ResolvedValue::Scalar(ScalarValue::Int(0)),
            ]),
            ResolvedValue::Scalar(ScalarValue::Int(9)),
        ])
    );
}

#[test]
fn empty_list_for_open_sequence_defers_on_current_edition() {
    let mut catalog = TypeCatalog::new();
    let int = catalog.int32();
    let seq = catalog.sequence(int, SeqLen::Unknown);
    let decl = Declaration::defining(seq, StorageClass::Static);
    let resolution = Resolver::with_options(&catalog, opts(Edition::C23))
        .resolve(&decl, &InitNode::Empty)
        .unwrap();
    assert!(resolution.deferred_length);
}
