use syn::{Attribute, Ident, Type};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Little-endian integer or float
    Scalar,
    /// `[u8; N]`, exposed as a borrowed slice
    Bytes,
}

#[derive(Debug)]
pub struct LayoutField {
    pub name: Ident,
    pub ty: Type,
    pub kind: FieldKind,
    pub size_bytes: usize,
    /// `#[ubx(text)]`: zero-padded character data
    pub text: bool,
    pub docs: Vec<Attribute>,
}
