use serde::Serialize;

/// Reference to a 0-based position in the caller's column catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ColumnIndexOperand {
    pub index: usize,
}

/// A typed literal in the source engine's canonical text form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScalarOperand {
    pub type_oid: i32,
    pub raw_text: String,
}

impl ScalarOperand {
    pub fn new(type_oid: i32, raw_text: impl Into<String>) -> Self {
        Self {
            type_oid,
            raw_text: raw_text.into(),
        }
    }
}

/// An ordered list of literals, only meaningful on the right of `IN`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArrayOperand {
    /// OID of the array type, e.g. `1007` for `int4[]`.
    pub type_oid: i32,
    pub elements: Vec<String>,
}
