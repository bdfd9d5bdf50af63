use quote::format_ident;
use syn::{Attribute, Ident, Type, Visibility};

pub(crate) mod layoutfield;
pub(crate) mod messagelist;

pub use layoutfield::{FieldKind, LayoutField};
pub use messagelist::MessageList;

/// Which macro a struct was handed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutRole {
    Message,
    Record,
}

pub enum LayoutHeader {
    Message {
        class: u8,
        id: u8,
        fixed_payload_len: usize,
        repeated: Option<Type>,
    },
    Record {
        record_len: usize,
    },
}

impl LayoutHeader {
    /// Length the user wrote in the attribute, checked against the fields
    pub fn declared_len(&self) -> usize {
        match *self {
            LayoutHeader::Message {
                fixed_payload_len, ..
            } => fixed_payload_len,
            LayoutHeader::Record { record_len } => record_len,
        }
    }
}

pub struct LayoutDesc {
    pub name: Ident,
    pub vis: Visibility,
    /// Attributes of the input struct other than `#[ubx(..)]`
    pub attrs: Vec<Attribute>,
    pub header: LayoutHeader,
    pub fields: Vec<LayoutField>,
}

impl LayoutDesc {
    pub fn fixed_len(&self) -> usize {
        self.fields.iter().map(|f| f.size_bytes).sum()
    }

    pub fn ref_name(&self) -> Ident {
        format_ident!("{}Ref", self.name)
    }

    /// Fields paired with their byte offset, in declaration order
    pub fn field_offsets(&self) -> Vec<(usize, &LayoutField)> {
        let mut offset = 0;
        self.fields
            .iter()
            .map(|f| {
                let start = offset;
                offset += f.size_bytes;
                (start, f)
            })
            .collect()
    }
}
