//! Override and brace-reset semantics.
//!
//! A later explicit write to a sub-object supersedes an earlier one, and
//! reopening braces on an object discards everything beneath it before
//! reapplying the nested list.

use cinit_resolver::Resolver;
use cinit_types::{
    Declaration, Designator, Expr, InitItem, InitNode, ResolvedValue, ScalarValue, SeqLen,
    StorageClass, TypeCatalog,
};

fn leaf(v: i64) -> InitNode {
    InitNode::Leaf(Expr::IntLit(v))
}

fn field(name: &str) -> Designator {
    Designator::Field(name.to_string())
}

fn int_of(v: &ResolvedValue) -> i64 {
    match v {
        ResolvedValue::Scalar(ScalarValue::Int(i)) => *i,
        other => panic!("expected int scalar, got {other:?}"),
    }
}

fn rec_ints(v: &ResolvedValue) -> Vec<i64> {
    match v {
        ResolvedValue::Record(fields) => fields.iter().map(int_of).collect(),
        other => panic!("expected record, got {other:?}"),
    }
}

#[test]
fn later_write_to_same_leaf_wins() {
    let mut catalog = TypeCatalog::new();
    let int = catalog.int32();
    let seq = catalog.sequence(int, SeqLen::Known(2));
    let init = InitNode::Braced(vec![
        InitItem::designated([Designator::Index(1)], leaf(1)),
        InitItem::designated([Designator::Index(1)], leaf(2)),
    ]);
    let decl = Declaration::defining(seq, StorageClass::Automatic);
    let resolution = Resolver::new(&catalog).resolve(&decl, &init).unwrap();
    let ResolvedValue::Sequence(elems) = &resolution.value else {
        panic!("expected sequence");
    };
    assert_eq!(int_of(&elems[1]), 2);
}

#[test]
fn positional_write_overrides_earlier_designated_one() {
    let mut catalog = TypeCatalog::new();
    let int = catalog.int32();
    let rec = catalog.record(&[("a", int), ("b", int)]);
    // `.a = 1` then the positional item after `.a` lands on `b`; the
    // second `.a = 3` designator overrides the first.
    let init = InitNode::Braced(vec![
        InitItem::designated([field("a")], leaf(1)),
        InitItem::positional(leaf(2)),
        InitItem::designated([field("a")], leaf(3)),
    ]);
    let decl = Declaration::defining(rec, StorageClass::Automatic);
    let resolution = Resolver::new(&catalog).resolve(&decl, &init).unwrap();
    assert_eq!(rec_ints(&resolution.value), [3, 2]);
}

#[test]
fn reopening_braces_discards_descendant_writes() {
    let mut catalog = TypeCatalog::new();
    let int = catalog.int32();
    let point = catalog.record(&[("x", int), ("y", int)]);
    let rec = catalog.record(&[("p", point), ("q", int)]);
    // Write p.x explicitly, then reopen `{` on p: the whole of p is
    // re-defaulted and only the nested list survives.
    let init = InitNode::Braced(vec![
        InitItem::designated([field("p"), field("x")], leaf(7)),
        InitItem::designated([field("q")], leaf(9)),
        InitItem::designated(
            [field("p")],
            InitNode::Braced(vec![InitItem::designated([field("y")], leaf(3))]),
        ),
    ]);
    let decl = Declaration::defining(rec, StorageClass::Automatic);
    let resolution = Resolver::new(&catalog).resolve(&decl, &init).unwrap();
    let ResolvedValue::Record(fields) = &resolution.value else {
        panic!("expected record");
    };
    // p == fresh zero-default re-initialized solely by `{.y = 3}`.
    assert_eq!(rec_ints(&fields[0]), [0, 3]);
    // Writes outside the reopened object are untouched.
    assert_eq!(int_of(&fields[1]), 9);
}

#[test]
fn brace_reset_equals_fresh_resolution_of_nested_list() {
    let mut catalog = TypeCatalog::new();
    let int = catalog.int32();
    let point = catalog.record(&[("x", int), ("y", int)]);
    let nested = InitNode::Braced(vec![InitItem::positional(leaf(5))]);

    // Resolve the point directly from the nested list.
    let fresh_decl = Declaration::defining(point, StorageClass::Automatic);
    let fresh = Resolver::new(&catalog)
        .resolve(&fresh_decl, &nested)
        .unwrap();

    // Resolve it as a sub-object written to and then reopened.
    let rec = catalog.record(&[("p", point)]);
    let init = InitNode::Braced(vec![
        InitItem::designated([field("p"), field("y")], leaf(8)),
        InitItem::designated([field("p")], nested),
    ]);
    let decl = Declaration::defining(rec, StorageClass::Automatic);
    let resolution = Resolver::new(&catalog).resolve(&decl, &init).unwrap();
    let ResolvedValue::Record(fields) = &resolution.value else {
        panic!("expected record");
    };
    assert_eq!(fields[0], fresh.value);
}

#[test]
fn string_fill_discards_prior_element_write() {
    let mut catalog = TypeCatalog::new();
    let ch = catalog.char_();
    let name = catalog.sequence(ch, SeqLen::Known(5));
    let rec = catalog.record(&[("s", name)]);
    // `.s[3] = 'x'` then `.s = "ab"`: the literal initializes the whole
    // sequence, so the earlier element write is discarded like any
    // reopened brace.
    let init = InitNode::Braced(vec![
        InitItem::designated(
            [field("s"), Designator::Index(3)],
            InitNode::Leaf(Expr::CharLit(b'x')),
        ),
        InitItem::designated([field("s")], InitNode::Leaf(Expr::StrLit("ab".to_string()))),
    ]);
    let decl = Declaration::defining(rec, StorageClass::Static);
    let resolution = Resolver::new(&catalog).resolve(&decl, &init).unwrap();
    let ResolvedValue::Record(fields) = &resolution.value else {
        panic!("expected record");
    };
    let ResolvedValue::Sequence(chars) = &fields[0] else {
        panic!("expected sequence");
    };
    let bytes: Vec<i64> = chars.iter().map(int_of).collect();
    assert_eq!(bytes, [97, 98, 0, 0, 0]);
}

#[test]
fn scalar_override_keeps_sibling_marks() {
    let mut catalog = TypeCatalog::new();
    let int = catalog.int32();
    let rec = catalog.record(&[("a", int), ("b", int), ("c", int)]);
    let init = InitNode::Braced(vec![
        InitItem::positional(leaf(1)),
        InitItem::positional(leaf(2)),
        InitItem::positional(leaf(3)),
        InitItem::designated([field("b")], leaf(20)),
    ]);
    let decl = Declaration::defining(rec, StorageClass::Automatic);
    let resolution = Resolver::new(&catalog).resolve(&decl, &init).unwrap();
    assert_eq!(rec_ints(&resolution.value), [1, 20, 3]);
}
