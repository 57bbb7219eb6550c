//! Diagnostics for initializer resolution.
//!
//! Diagnostics are plain data: a numeric code, a category, and a message
//! rendered from a static template. Error construction sites use the
//! `diagnostic_codes` / `diagnostic_messages` tables rather than free-form
//! strings so that every failure mode has exactly one code.

use crate::pos::ItemPos;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Message,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

pub mod diagnostic_codes {
    pub const UNKNOWN_TYPE: u32 = 1001;
    pub const UNKNOWN_FIELD: u32 = 1002;
    pub const DESIGNATOR_KIND_MISMATCH: u32 = 1003;
    pub const INDEX_OUT_OF_DECLARED_BOUND: u32 = 1004;
    pub const TOO_MANY_INITIALIZERS: u32 = 1005;
    pub const NON_CONSTANT_INITIALIZER: u32 = 1006;
    pub const INCOMPLETE_TYPE_INITIALIZER: u32 = 1007;
    pub const VARIABLE_LENGTH_INITIALIZER: u32 = 1008;
    pub const LINKAGE_CONFLICT: u32 = 1009;
    pub const EMPTY_BRACED_LIST_NOT_ALLOWED: u32 = 1010;
}

pub mod diagnostic_messages {
    use super::{DiagnosticCategory, DiagnosticMessage, diagnostic_codes as codes};

    pub const UNKNOWN_TYPE: DiagnosticMessage = DiagnosticMessage {
        code: codes::UNKNOWN_TYPE,
        category: DiagnosticCategory::Error,
        message: "Unknown type id '{0}'.",
    };
    pub const UNKNOWN_FIELD: DiagnosticMessage = DiagnosticMessage {
        code: codes::UNKNOWN_FIELD,
        category: DiagnosticCategory::Error,
        message: "'{0}' does not name a member of the designated object.",
    };
    pub const DESIGNATOR_KIND_MISMATCH: DiagnosticMessage = DiagnosticMessage {
        code: codes::DESIGNATOR_KIND_MISMATCH,
        category: DiagnosticCategory::Error,
        message: "Designator '{0}' cannot be applied to an object of this kind.",
    };
    pub const INDEX_OUT_OF_DECLARED_BOUND: DiagnosticMessage = DiagnosticMessage {
        code: codes::INDEX_OUT_OF_DECLARED_BOUND,
        category: DiagnosticCategory::Error,
        message: "Index designator [{0}] is outside the declared bound of {1}.",
    };
    pub const TOO_MANY_INITIALIZERS: DiagnosticMessage = DiagnosticMessage {
        code: codes::TOO_MANY_INITIALIZERS,
        category: DiagnosticCategory::Error,
        message: "Excess initializer: the initialized object has no remaining sub-objects.",
    };
    pub const NON_CONSTANT_INITIALIZER: DiagnosticMessage = DiagnosticMessage {
        code: codes::NON_CONSTANT_INITIALIZER,
        category: DiagnosticCategory::Error,
        message: "Initializer element is not a compile-time constant.",
    };
    pub const INCOMPLETE_TYPE_INITIALIZER: DiagnosticMessage = DiagnosticMessage {
        code: codes::INCOMPLETE_TYPE_INITIALIZER,
        category: DiagnosticCategory::Error,
        message: "Cannot initialize an object of incomplete type '{0}'.",
    };
    pub const VARIABLE_LENGTH_INITIALIZER: DiagnosticMessage = DiagnosticMessage {
        code: codes::VARIABLE_LENGTH_INITIALIZER,
        category: DiagnosticCategory::Error,
        message: "A variable-length object may not be initialized.",
    };
    pub const LINKAGE_CONFLICT: DiagnosticMessage = DiagnosticMessage {
        code: codes::LINKAGE_CONFLICT,
        category: DiagnosticCategory::Error,
        message: "An initializer is not allowed on a declaration that references storage defined elsewhere.",
    };
    pub const EMPTY_BRACED_LIST_NOT_ALLOWED: DiagnosticMessage = DiagnosticMessage {
        code: codes::EMPTY_BRACED_LIST_NOT_ALLOWED,
        category: DiagnosticCategory::Error,
        message: "Empty braced initializer lists are not allowed in this language edition.",
    };

    pub const ALL: &[DiagnosticMessage] = &[
        UNKNOWN_TYPE,
        UNKNOWN_FIELD,
        DESIGNATOR_KIND_MISMATCH,
        INDEX_OUT_OF_DECLARED_BOUND,
        TOO_MANY_INITIALIZERS,
        NON_CONSTANT_INITIALIZER,
        INCOMPLETE_TYPE_INITIALIZER,
        VARIABLE_LENGTH_INITIALIZER,
        LINKAGE_CONFLICT,
        EMPTY_BRACED_LIST_NOT_ALLOWED,
    ];
}

/// A diagnostic attributed to one item of the original initializer tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: u32,
    /// Position of the offending item within the initializer tree. Empty
    /// for declaration-level diagnostics (e.g. linkage conflicts).
    pub pos: ItemPos,
    pub message_text: String,
}

impl Diagnostic {
    pub fn error(message: DiagnosticMessage, pos: ItemPos, args: &[&str]) -> Self {
        Self {
            category: message.category,
            code: message.code,
            pos,
            message_text: format_message(message.message, args),
        }
    }

    /// A diagnostic that applies to the declaration as a whole rather than
    /// one item of its initializer.
    pub fn declaration(message: DiagnosticMessage, args: &[&str]) -> Self {
        Self::error(message, ItemPos::root(), args)
    }
}

pub fn get_message_template(code: u32) -> Option<&'static str> {
    diagnostic_messages::ALL
        .iter()
        .find(|m| m.code == code)
        .map(|m| m.message)
}

pub fn format_message(message: &str, args: &[&str]) -> String {
    let mut result = message.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}
