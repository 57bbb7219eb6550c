//! Constant-expression classification, folding and declaration gating.
//!
//! A leaf is constant if it is a literal, a named compile-time constant,
//! an enumeration constant, an address constant, or an arithmetic
//! combination exclusively of such. Static and thread-affine storage
//! require every committed leaf to classify as constant; automatic storage
//! accepts anything, including expressions with side effects.

use cinit_common::diagnostics::{Diagnostic, diagnostic_messages as msg};
use cinit_types::{
    BinaryOp, Declaration, Expr, ScalarKind, SeqLen, Type, TypeCatalog, TypeId, UnaryOp,
};
use rustc_hash::FxHashSet;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Constness {
    Constant,
    NotConstant,
}

/// Classify a leaf expression without evaluating it.
pub fn classify(expr: &Expr) -> Constness {
    match expr {
        Expr::IntLit(_)
        | Expr::FloatLit(_)
        | Expr::BoolLit(_)
        | Expr::CharLit(_)
        | Expr::StrLit(_)
        | Expr::NullPtr
        | Expr::EnumConst { .. }
        | Expr::AddressOf(_) => Constness::Constant,
        Expr::NamedConst { value, .. } => classify(value),
        Expr::Unary { operand, .. } => classify(operand),
        Expr::Binary { lhs, rhs, .. } => {
            if classify(lhs) == Constness::Constant && classify(rhs) == Constness::Constant {
                Constness::Constant
            } else {
                Constness::NotConstant
            }
        }
        Expr::Call { .. } | Expr::Ident(_) => Constness::NotConstant,
    }
}

/// A folded constant.
#[derive(Clone, Debug, PartialEq)]
pub enum ConstValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    Address(String),
}

impl ConstValue {
    fn as_int(&self) -> Option<i64> {
        match self {
            ConstValue::Int(v) => Some(*v),
            ConstValue::Bool(b) => Some(*b as i64),
            _ => None,
        }
    }

    fn as_float(&self) -> Option<f64> {
        match self {
            ConstValue::Float(v) => Some(*v),
            ConstValue::Int(v) => Some(*v as f64),
            ConstValue::Bool(b) => Some(*b as i64 as f64),
            _ => None,
        }
    }
}

/// Fold a constant expression to its value.
///
/// Returns `None` for non-constant expressions and for constant
/// expressions with no defined value (division by zero, shift overflow).
/// String literals are not folded here; the engine consumes them
/// element-wise.
pub fn eval_const(expr: &Expr) -> Option<ConstValue> {
    match expr {
        Expr::IntLit(v) => Some(ConstValue::Int(*v)),
        Expr::FloatLit(v) => Some(ConstValue::Float(*v)),
        Expr::BoolLit(b) => Some(ConstValue::Bool(*b)),
        Expr::CharLit(c) => Some(ConstValue::Int(*c as i64)),
        Expr::NullPtr => Some(ConstValue::Null),
        Expr::EnumConst { value, .. } => Some(ConstValue::Int(*value)),
        Expr::NamedConst { value, .. } => eval_const(value),
        Expr::AddressOf(name) => Some(ConstValue::Address(name.clone())),
        Expr::Unary { op, operand } => {
            let v = eval_const(operand)?;
            match op {
                UnaryOp::Neg => match v {
                    ConstValue::Int(i) => Some(ConstValue::Int(i.wrapping_neg())),
                    ConstValue::Float(f) => Some(ConstValue::Float(-f)),
                    _ => None,
                },
                UnaryOp::Not => Some(ConstValue::Bool(matches!(
                    v,
                    ConstValue::Int(0) | ConstValue::Bool(false) | ConstValue::Null
                ))),
                UnaryOp::BitNot => v.as_int().map(|i| ConstValue::Int(!i)),
            }
        }
        Expr::Binary { op, lhs, rhs } => {
            let l = eval_const(lhs)?;
            let r = eval_const(rhs)?;
            eval_binary(*op, &l, &r)
        }
        Expr::StrLit(_) | Expr::Call { .. } | Expr::Ident(_) => None,
    }
}

fn eval_binary(op: BinaryOp, l: &ConstValue, r: &ConstValue) -> Option<ConstValue> {
    // Float arithmetic if either side is float, integer arithmetic
    // otherwise; bitwise and shift operators are integer-only.
    let float = matches!(l, ConstValue::Float(_)) || matches!(r, ConstValue::Float(_));
    if float {
        let (a, b) = (l.as_float()?, r.as_float()?);
        let v = match op {
            BinaryOp::Add => a + b,
            BinaryOp::Sub => a - b,
            BinaryOp::Mul => a * b,
            BinaryOp::Div => a / b,
            BinaryOp::Rem => a % b,
            _ => return None,
        };
        return Some(ConstValue::Float(v));
    }
    let (a, b) = (l.as_int()?, r.as_int()?);
    let v = match op {
        BinaryOp::Add => a.wrapping_add(b),
        BinaryOp::Sub => a.wrapping_sub(b),
        BinaryOp::Mul => a.wrapping_mul(b),
        BinaryOp::Div => a.checked_div(b)?,
        BinaryOp::Rem => a.checked_rem(b)?,
        BinaryOp::Shl => a.checked_shl(u32::try_from(b).ok()?)?,
        BinaryOp::Shr => a.checked_shr(u32::try_from(b).ok()?)?,
        BinaryOp::BitAnd => a & b,
        BinaryOp::BitOr => a | b,
        BinaryOp::BitXor => a ^ b,
    };
    Some(ConstValue::Int(v))
}

/// Truncate or convert a folded constant to the target scalar kind's
/// declared representation.
pub fn convert(value: &ConstValue, kind: &ScalarKind) -> cinit_types::ScalarValue {
    use cinit_types::ScalarValue as SV;
    match kind {
        ScalarKind::Bool => SV::Bool(!is_zero(value)),
        ScalarKind::Char => SV::Int(to_int(value) as u8 as i64),
        ScalarKind::Int { bits, signed } => SV::Int(truncate_int(to_int(value), *bits, *signed)),
        ScalarKind::Float { bits } => {
            let f = match value {
                ConstValue::Float(f) => *f,
                other => other.as_float().unwrap_or(0.0),
            };
            SV::Float(if *bits == 32 { f as f32 as f64 } else { f })
        }
        ScalarKind::Pointer => match value {
            ConstValue::Null | ConstValue::Int(0) => SV::Null,
            ConstValue::Address(name) => SV::Address(name.clone()),
            ConstValue::Int(v) => SV::Int(*v),
            _ => SV::Null,
        },
        ScalarKind::Enum { .. } => SV::Enum(to_int(value)),
    }
}

fn is_zero(value: &ConstValue) -> bool {
    match value {
        ConstValue::Int(v) => *v == 0,
        ConstValue::Float(f) => *f == 0.0,
        ConstValue::Bool(b) => !*b,
        ConstValue::Null => true,
        ConstValue::Address(_) => false,
    }
}

fn to_int(value: &ConstValue) -> i64 {
    match value {
        ConstValue::Int(v) => *v,
        ConstValue::Bool(b) => *b as i64,
        ConstValue::Float(f) => *f as i64,
        ConstValue::Null => 0,
        ConstValue::Address(_) => 0,
    }
}

fn truncate_int(v: i64, bits: u8, signed: bool) -> i64 {
    if bits >= 64 {
        return v;
    }
    let mask = (1u64 << bits) - 1;
    let t = (v as u64) & mask;
    if signed && (t >> (bits - 1)) & 1 == 1 {
        (t | !mask) as i64
    } else {
        t as i64
    }
}

/// Declaration-level gates, run before any initializer item is processed.
///
/// Rejects initializing an incomplete type, a type containing a
/// runtime-determined length anywhere, a nested unknown-length sequence
/// (an incomplete element type — only the declared object's own outermost
/// length can be inferred), and an initializer on a declaration that only
/// re-references storage defined elsewhere.
pub fn validate_declaration(
    catalog: &TypeCatalog,
    decl: &Declaration,
    has_initializer: bool,
) -> Vec<Diagnostic> {
    let mut diags = Vec::new();
    if has_initializer && !decl.defining {
        diags.push(Diagnostic::declaration(msg::LINKAGE_CONFLICT, &[]));
    }
    let mut visited = FxHashSet::default();
    validate_type(catalog, decl.ty, true, &mut visited, &mut diags);
    diags
}

fn validate_type(
    catalog: &TypeCatalog,
    ty: TypeId,
    top_level: bool,
    visited: &mut FxHashSet<TypeId>,
    diags: &mut Vec<Diagnostic>,
) {
    if !visited.insert(ty) {
        return;
    }
    match catalog.resolve(ty) {
        Err(unknown) => {
            diags.push(Diagnostic::declaration(
                msg::UNKNOWN_TYPE,
                &[&unknown.0.to_string()],
            ));
        }
        Ok(Type::Incomplete { name }) => {
            diags.push(Diagnostic::declaration(
                msg::INCOMPLETE_TYPE_INITIALIZER,
                &[name],
            ));
        }
        Ok(Type::Sequence { elem, len }) => {
            match len {
                SeqLen::Runtime => {
                    diags.push(Diagnostic::declaration(msg::VARIABLE_LENGTH_INITIALIZER, &[]));
                }
                SeqLen::Unknown if !top_level => {
                    // Unknown length below the top level means the element
                    // type enclosing it is incomplete.
                    diags.push(Diagnostic::declaration(
                        msg::INCOMPLETE_TYPE_INITIALIZER,
                        &[&ty.to_string()],
                    ));
                }
                _ => {}
            }
            validate_type(catalog, *elem, false, visited, diags);
        }
        Ok(Type::Record { fields }) => {
            for field_ty in fields.values() {
                validate_type(catalog, *field_ty, false, visited, diags);
            }
        }
        Ok(Type::Variant { members }) => {
            for member_ty in members.values() {
                validate_type(catalog, *member_ty, false, visited, diags);
            }
        }
        Ok(Type::Scalar(_)) => {}
    }
}
