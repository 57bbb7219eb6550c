//! The initializer resolution engine.
//!
//! One resolution pass owns a zero-defaulted value tree shaped like the
//! declared type, a set of explicit-mark paths, and a diagnostic list. It
//! walks the initializer's items in order, maintaining a frame stack of
//! "current objects": designators re-seed the stack from the list's base,
//! positional items consume the top frame's next implicit slot, elided
//! braces push an implicit frame and retry the same flat item, and an
//! explicit `{` always resets the sub-object it opens before re-applying
//! the nested list. After the last item, every unmarked leaf keeps its
//! zero default, and an unknown-length root sequence keeps whatever length
//! the items forced it to.
//!
//! No partial tree is ever published: any diagnostic makes the whole
//! resolution fail, though scanning continues so independent errors can be
//! reported together.

use crate::const_eval::{self, Constness};
use crate::eval_order::{EvalSink, NullSink};
use crate::frames::Frame;
use crate::options::ResolverOptions;
use crate::path::{self, PathError, PathErrorKind, ValuePath};
use cinit_common::diagnostics::{Diagnostic, diagnostic_messages as msg};
use cinit_common::{ItemPos, limits};
use cinit_types::{
    Declaration, Expr, InitItem, InitNode, ResolvedValue, ScalarValue, SeqLen, StorageClass, Type,
    TypeCatalog, TypeId, UnknownType,
};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::{debug, trace};

/// A successful resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    pub value: ResolvedValue,
    /// True when the declared type is an unknown-length sequence and no
    /// item ever targeted it; the declaring collaborator owns the length
    /// fallback in that case.
    pub deferred_length: bool,
}

/// Resolves initializers against a shared, read-only type catalog.
pub struct Resolver<'a> {
    catalog: &'a TypeCatalog,
    options: ResolverOptions,
}

impl<'a> Resolver<'a> {
    pub fn new(catalog: &'a TypeCatalog) -> Self {
        Self {
            catalog,
            options: ResolverOptions::default(),
        }
    }

    pub fn with_options(catalog: &'a TypeCatalog, options: ResolverOptions) -> Self {
        Self { catalog, options }
    }

    /// Resolve one declaration's initializer to a value tree.
    pub fn resolve(
        &self,
        decl: &Declaration,
        init: &InitNode,
    ) -> Result<Resolution, Vec<Diagnostic>> {
        let mut sink = NullSink;
        self.resolve_with_sink(decl, init, &mut sink)
    }

    /// Like [`Resolver::resolve`], notifying `sink` once per committed
    /// leaf expression (the evaluation-order contract's observer).
    pub fn resolve_with_sink(
        &self,
        decl: &Declaration,
        init: &InitNode,
        sink: &mut dyn EvalSink,
    ) -> Result<Resolution, Vec<Diagnostic>> {
        let gate = const_eval::validate_declaration(self.catalog, decl, true);
        if !gate.is_empty() {
            return Err(gate);
        }
        let value = ResolvedValue::zero_of(self.catalog, decl.ty)
            .map_err(|e| vec![unknown_type_diag(e)])?;
        let mut pass = Pass {
            catalog: self.catalog,
            options: &self.options,
            storage: decl.storage,
            root_ty: decl.ty,
            value,
            marks: FxHashSet::default(),
            diags: Vec::new(),
            sink,
        };
        pass.run(init);
        debug!(
            diagnostics = pass.diags.len(),
            marked_leaves = pass.marks.len(),
            "initializer resolution finished"
        );
        if pass.diags.is_empty() {
            let deferred_length = pass.length_deferred();
            Ok(Resolution {
                value: pass.value,
                deferred_length,
            })
        } else {
            Err(pass.diags)
        }
    }

    /// Resolve a defining declaration that carries no initializer.
    ///
    /// Static-duration storage is implicitly zero-initialized, so this
    /// yields the whole-object zero tree; automatic storage starts
    /// indeterminate and yields `None`.
    pub fn resolve_uninitialized(
        &self,
        decl: &Declaration,
    ) -> Option<Result<Resolution, Vec<Diagnostic>>> {
        if !decl.storage.zero_initialized_by_default() {
            return None;
        }
        let gate = const_eval::validate_declaration(self.catalog, decl, false);
        if !gate.is_empty() {
            return Some(Err(gate));
        }
        Some(
            ResolvedValue::zero_of(self.catalog, decl.ty)
                .map(|value| Resolution {
                    deferred_length: matches!(
                        self.catalog.resolve(decl.ty),
                        Ok(Type::Sequence {
                            len: SeqLen::Unknown,
                            ..
                        })
                    ),
                    value,
                })
                .map_err(|e| vec![unknown_type_diag(e)]),
        )
    }
}

fn unknown_type_diag(e: UnknownType) -> Diagnostic {
    Diagnostic::declaration(msg::UNKNOWN_TYPE, &[&e.0.to_string()])
}

fn path_diag(err: PathError, pos: &ItemPos) -> Diagnostic {
    match err.kind {
        PathErrorKind::UnknownType(id) => {
            Diagnostic::error(msg::UNKNOWN_TYPE, pos.clone(), &[&id.to_string()])
        }
        PathErrorKind::UnknownField(name) => {
            Diagnostic::error(msg::UNKNOWN_FIELD, pos.clone(), &[&name])
        }
        PathErrorKind::KindMismatch(step) => {
            Diagnostic::error(msg::DESIGNATOR_KIND_MISMATCH, pos.clone(), &[&step])
        }
        PathErrorKind::OutOfBound { index, bound } => Diagnostic::error(
            msg::INDEX_OUT_OF_DECLARED_BOUND,
            pos.clone(),
            &[&index.to_string(), &bound.to_string()],
        ),
    }
}

fn has_prefix(path: &ValuePath, prefix: &[u32]) -> bool {
    path.len() >= prefix.len() && path[..prefix.len()] == *prefix
}

/// State of one declaration's resolution pass.
struct Pass<'a> {
    catalog: &'a TypeCatalog,
    options: &'a ResolverOptions,
    storage: StorageClass,
    root_ty: TypeId,
    value: ResolvedValue,
    /// Leaf paths that received a direct initializer value.
    marks: FxHashSet<ValuePath>,
    diags: Vec<Diagnostic>,
    sink: &'a mut dyn EvalSink,
}

impl Pass<'_> {
    fn run(&mut self, init: &InitNode) {
        match init {
            InitNode::Braced(items) => {
                self.resolve_list(self.root_ty, ValuePath::new(), items, &ItemPos::root(), 0);
            }
            InitNode::Empty => {
                self.apply_empty(self.root_ty, &ValuePath::new(), &ItemPos::root());
            }
            InitNode::Leaf(expr) => {
                // `char s[] = "abc"` — a bare string literal may initialize
                // a character sequence without braces.
                if let Expr::StrLit(s) = expr {
                    if let Some((elem, len)) = self.char_sequence(self.root_ty) {
                        self.fill_string(self.root_ty, elem, len, &ValuePath::new(), s, &ItemPos::root());
                        return;
                    }
                }
                if self.is_aggregate(self.root_ty) {
                    // A flat expression against an aggregate consumes leaf
                    // slots as if one brace level had been elided.
                    let items = [InitItem::positional(InitNode::Leaf(expr.clone()))];
                    self.resolve_list(self.root_ty, ValuePath::new(), &items, &ItemPos::root(), 0);
                } else {
                    self.commit_leaf(self.root_ty, &ValuePath::new(), expr, &ItemPos::root());
                }
            }
        }
    }

    /// Resolve one braced list against the object at `base_path`.
    fn resolve_list(
        &mut self,
        base_ty: TypeId,
        base_path: ValuePath,
        items: &[InitItem],
        list_pos: &ItemPos,
        depth: usize,
    ) {
        if depth > limits::MAX_BRACE_DEPTH {
            self.diags
                .push(Diagnostic::error(msg::TOO_MANY_INITIALIZERS, list_pos.clone(), &[]));
            return;
        }
        // `{"abc"}` — a single string literal between braces still
        // initializes a character sequence element-wise.
        if let [item] = items {
            if item.is_positional() {
                if let InitNode::Leaf(Expr::StrLit(s)) = &item.value {
                    if let Some((elem, len)) = self.char_sequence(base_ty) {
                        self.fill_string(base_ty, elem, len, &base_path, s, &list_pos.child(0));
                        return;
                    }
                }
            }
        }
        let mut frames: Vec<Frame> = match Frame::new(self.catalog, base_ty, base_path.clone()) {
            Ok(frame) => vec![frame],
            Err(e) => {
                self.diags.push(unknown_type_diag(e));
                return;
            }
        };
        let mut overflow_reported = false;

        'items: for (i, item) in items.iter().enumerate() {
            let pos = list_pos.child(i);
            let mut pending: Option<(TypeId, ValuePath)> = None;

            if !item.is_positional() {
                // A designator restarts from the frame that was current
                // when this list opened.
                frames.truncate(1);
                let nav = match path::navigate(self.catalog, base_ty, &item.designators) {
                    Ok(nav) => nav,
                    Err(err) => {
                        self.diags.push(path_diag(err, &pos));
                        continue 'items;
                    }
                };
                // Seed the implicit-slot cursor along the path so later
                // positional items continue from the designated sibling's
                // successor at every level.
                let mut prefix = base_path.clone();
                for (si, step) in nav.steps.iter().enumerate() {
                    if let Some(top) = frames.last_mut() {
                        top.next_slot = step.child as usize + 1;
                    }
                    if si + 1 < nav.steps.len() {
                        prefix.push(step.child);
                        match Frame::new(self.catalog, step.ty, prefix.clone()) {
                            Ok(frame) => frames.push(frame),
                            Err(e) => {
                                self.diags.push(unknown_type_diag(e));
                                continue 'items;
                            }
                        }
                    }
                }
                trace!(designator = %pos, target = %nav.target(), "designated item");
                pending = Some((nav.target(), nav.target_path(&base_path)));
            }

            'apply: loop {
                let (target_ty, target_path) = match pending.take() {
                    Some(target) => target,
                    None => {
                        // Pop exhausted frames; an item that no frame can
                        // absorb belongs to nobody.
                        loop {
                            let done = frames.last().is_none_or(|f| f.exhausted());
                            if !done {
                                break;
                            }
                            if frames.len() > 1 {
                                frames.pop();
                            } else {
                                if !overflow_reported {
                                    self.diags.push(Diagnostic::error(
                                        msg::TOO_MANY_INITIALIZERS,
                                        pos.clone(),
                                        &[],
                                    ));
                                    overflow_reported = true;
                                }
                                continue 'items;
                            }
                        }
                        let Some(top) = frames.last_mut() else {
                            continue 'items;
                        };
                        let slot = top.next_slot;
                        match top.child(self.catalog, slot) {
                            Ok(child) => {
                                top.next_slot += 1;
                                child
                            }
                            Err(e) => {
                                self.diags.push(unknown_type_diag(e));
                                continue 'items;
                            }
                        }
                    }
                };

                match &item.value {
                    InitNode::Braced(nested) => {
                        // Opening a `{` on an object discards everything
                        // beneath it before reapplying the nested list.
                        self.brace_reset(target_ty, &target_path);
                        self.resolve_list(target_ty, target_path, nested, &pos, depth + 1);
                        continue 'items;
                    }
                    InitNode::Empty => {
                        self.apply_empty(target_ty, &target_path, &pos);
                        continue 'items;
                    }
                    InitNode::Leaf(expr) => {
                        if let Expr::StrLit(s) = expr {
                            if let Some((elem, len)) = self.char_sequence(target_ty) {
                                self.fill_string(target_ty, elem, len, &target_path, s, &pos);
                                continue 'items;
                            }
                        }
                        if self.is_aggregate(target_ty) {
                            // Brace elision: enter the aggregate child and
                            // retry the same flat item inside it.
                            match Frame::new(self.catalog, target_ty, target_path) {
                                Ok(frame) => {
                                    frames.push(frame);
                                    continue 'apply;
                                }
                                Err(e) => {
                                    self.diags.push(unknown_type_diag(e));
                                    continue 'items;
                                }
                            }
                        }
                        self.commit_leaf(target_ty, &target_path, expr, &pos);
                        continue 'items;
                    }
                }
            }
        }
    }

    /// Commit a leaf expression to a scalar location.
    fn commit_leaf(&mut self, ty: TypeId, path: &ValuePath, expr: &Expr, pos: &ItemPos) {
        let kind = match self.catalog.resolve(ty) {
            Ok(Type::Scalar(kind)) => kind.clone(),
            // Aggregates are routed through frames before commit, and the
            // declaration gates reject incomplete types up front.
            Ok(_) => unreachable!("leaf committed against a non-scalar type"),
            Err(e) => {
                self.diags.push(unknown_type_diag(e));
                return;
            }
        };
        let constant = const_eval::classify(expr) == Constness::Constant;
        if self.storage.requires_constant() && !constant {
            self.diags
                .push(Diagnostic::error(msg::NON_CONSTANT_INITIALIZER, pos.clone(), &[]));
        }
        let scalar = if constant {
            match const_eval::eval_const(expr) {
                Some(folded) => const_eval::convert(&folded, &kind),
                None => {
                    // Constant by form but with no defined value (e.g.
                    // division by zero).
                    self.diags.push(Diagnostic::error(
                        msg::NON_CONSTANT_INITIALIZER,
                        pos.clone(),
                        &[],
                    ));
                    ScalarValue::Runtime(expr.clone())
                }
            }
        } else {
            ScalarValue::Runtime(expr.clone())
        };
        trace!(at = %pos, "commit leaf");
        if let Ok(slot) = self.place(path) {
            *slot = ResolvedValue::Scalar(scalar);
        }
        self.marks.insert(path.clone());
        self.sink.on_leaf_evaluated(pos);
    }

    /// Assign a quoted literal to a character sequence element-by-element,
    /// with one implicit terminator; truncate to a smaller declared
    /// length, zero-pad (unmarked) a larger one. The literal initializes
    /// the whole sequence, so prior explicit writes beneath it are
    /// discarded first, like any reopening brace.
    fn fill_string(
        &mut self,
        seq_ty: TypeId,
        elem: TypeId,
        len: SeqLen,
        base_path: &ValuePath,
        literal: &str,
        pos: &ItemPos,
    ) {
        let kind = match self.catalog.resolve(elem) {
            Ok(Type::Scalar(kind)) => kind.clone(),
            Ok(_) => unreachable!("string fill against a non-scalar element"),
            Err(e) => {
                self.diags.push(unknown_type_diag(e));
                return;
            }
        };
        self.brace_reset(seq_ty, base_path);
        let mut bytes: Vec<i64> = literal.bytes().map(i64::from).collect();
        bytes.push(0);
        let take = match len {
            SeqLen::Known(n) => bytes.len().min(n as usize),
            SeqLen::Unknown => bytes.len(),
            SeqLen::Runtime => 0,
        };
        trace!(at = %pos, elements = take, "string literal fill");
        for (i, byte) in bytes.iter().take(take).enumerate() {
            let mut path = base_path.clone();
            path.push(i as u32);
            let value = const_eval::convert(&const_eval::ConstValue::Int(*byte), &kind);
            if let Ok(slot) = self.place(&path) {
                *slot = ResolvedValue::Scalar(value);
            }
            self.marks.insert(path);
        }
        self.sink.on_leaf_evaluated(pos);
    }

    /// `{}`: zero the whole current object, marking nothing explicit.
    fn apply_empty(&mut self, ty: TypeId, path: &ValuePath, pos: &ItemPos) {
        if !self.options.edition.allows_empty_braces() {
            self.diags.push(Diagnostic::error(
                msg::EMPTY_BRACED_LIST_NOT_ALLOWED,
                pos.clone(),
                &[],
            ));
            return;
        }
        self.brace_reset(ty, path);
    }

    /// Discard all explicit marks beneath `path` and re-zero the
    /// sub-object there.
    fn brace_reset(&mut self, ty: TypeId, path: &ValuePath) {
        self.marks.retain(|p| !has_prefix(p, path));
        if let Ok(zero) = ResolvedValue::zero_of(self.catalog, ty) {
            if let Ok(slot) = self.place(path) {
                *slot = zero;
            }
        }
    }

    fn place(&mut self, path: &ValuePath) -> Result<&mut ResolvedValue, UnknownType> {
        walk_mut(
            self.catalog,
            self.root_ty,
            &mut self.value,
            path,
            &mut self.marks,
        )
    }

    fn char_sequence(&self, ty: TypeId) -> Option<(TypeId, SeqLen)> {
        match self.catalog.resolve(ty) {
            Ok(Type::Sequence { elem, len }) => match self.catalog.resolve(*elem) {
                Ok(Type::Scalar(kind)) if kind.is_char_like() => Some((*elem, *len)),
                _ => None,
            },
            _ => None,
        }
    }

    fn is_aggregate(&self, ty: TypeId) -> bool {
        self.catalog.resolve(ty).is_ok_and(|t| t.is_aggregate())
    }

    fn length_deferred(&self) -> bool {
        matches!(
            self.catalog.resolve(self.root_ty),
            Ok(Type::Sequence {
                len: SeqLen::Unknown,
                ..
            })
        ) && matches!(&self.value, ResolvedValue::Sequence(elems) if elems.is_empty())
    }
}

/// Walk the value tree to `path`, growing unknown-length sequences on the
/// way and switching a variant's active member when the path selects a
/// different one (which resets the variant, like any overriding member
/// write).
fn walk_mut<'v>(
    catalog: &TypeCatalog,
    root_ty: TypeId,
    root: &'v mut ResolvedValue,
    path: &ValuePath,
    marks: &mut FxHashSet<ValuePath>,
) -> Result<&'v mut ResolvedValue, UnknownType> {
    let mut ty = root_ty;
    let mut value = root;
    let mut walked: SmallVec<[u32; 8]> = SmallVec::new();
    for &step in path.iter() {
        match (catalog.resolve(ty)?, value) {
            (Type::Sequence { elem, .. }, ResolvedValue::Sequence(elems)) => {
                while elems.len() <= step as usize {
                    elems.push(ResolvedValue::zero_of(catalog, *elem)?);
                }
                ty = *elem;
                value = &mut elems[step as usize];
            }
            (Type::Record { fields }, ResolvedValue::Record(values)) => {
                ty = fields[step as usize];
                value = &mut values[step as usize];
            }
            (Type::Variant { members }, ResolvedValue::Variant { member, value: inner }) => {
                let target = step as usize;
                let member_ty = members[target];
                if *member != target {
                    marks.retain(|p| !has_prefix(p, &walked));
                    *member = target;
                    **inner = ResolvedValue::zero_of(catalog, member_ty)?;
                }
                ty = member_ty;
                value = &mut **inner;
            }
            _ => unreachable!("value tree shape diverged from its type"),
        }
        walked.push(step);
    }
    Ok(value)
}
