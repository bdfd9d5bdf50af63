use crate::types::{FieldKind, LayoutDesc, LayoutField, LayoutHeader, LayoutRole};
use log::trace;
use proc_macro2::Span;
use syn::{
    parse::Parse, punctuated::Punctuated, spanned::Spanned, Attribute, Error, Ident, Token, Type,
};

pub fn parse_layout_description(
    input: syn::ItemStruct,
    role: LayoutRole,
) -> syn::Result<LayoutDesc> {
    let main_sp = input.span();
    if !input.generics.params.is_empty() {
        return Err(Error::new(
            input.generics.span(),
            "Layout structs cannot have generic parameters",
        ));
    }

    let header = parse_ubx_attr(&input.attrs, &input.ident, role)?;
    let attrs = input
        .attrs
        .iter()
        .filter(|a| !a.path.is_ident("ubx"))
        .cloned()
        .collect();
    let fields = parse_fields(input.fields)?;

    let ret = LayoutDesc {
        name: input.ident,
        vis: input.vis,
        attrs,
        header,
        fields,
    };

    let calculated = ret.fixed_len();
    let declared = ret.header.declared_len();
    trace!(
        "parse_layout_description: {} is {} bytes ({} declared)",
        ret.name,
        calculated,
        declared
    );
    if calculated != declared {
        return Err(Error::new(
            main_sp,
            format!(
                "Calculated payload size ({}) doesn't match specified ({})",
                calculated, declared
            ),
        ));
    }
    Ok(ret)
}

enum HeaderItem {
    Class(syn::LitInt),
    Id(syn::LitInt),
    FixedPayloadLen(syn::LitInt),
    RecordLen(syn::LitInt),
    Repeated(Type),
}

impl Parse for HeaderItem {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let lookahead = input.lookahead1();
        if lookahead.peek(keyword::class) {
            input.parse::<keyword::class>()?;
            input.parse::<Token![=]>()?;
            Ok(HeaderItem::Class(input.parse()?))
        } else if lookahead.peek(keyword::id) {
            input.parse::<keyword::id>()?;
            input.parse::<Token![=]>()?;
            Ok(HeaderItem::Id(input.parse()?))
        } else if lookahead.peek(keyword::fixed_payload_len) {
            input.parse::<keyword::fixed_payload_len>()?;
            input.parse::<Token![=]>()?;
            Ok(HeaderItem::FixedPayloadLen(input.parse()?))
        } else if lookahead.peek(keyword::record_len) {
            input.parse::<keyword::record_len>()?;
            input.parse::<Token![=]>()?;
            Ok(HeaderItem::RecordLen(input.parse()?))
        } else if lookahead.peek(keyword::repeated) {
            input.parse::<keyword::repeated>()?;
            input.parse::<Token![=]>()?;
            Ok(HeaderItem::Repeated(input.parse()?))
        } else {
            Err(lookahead.error())
        }
    }
}

fn parse_ubx_attr(
    attrs: &[Attribute],
    struct_name: &Ident,
    role: LayoutRole,
) -> syn::Result<LayoutHeader> {
    let attr = attrs
        .iter()
        .find(|a| a.path.is_ident("ubx"))
        .ok_or_else(|| {
            Error::new(
                struct_name.span(),
                format!("No ubx attribute for layout struct {}", struct_name),
            )
        })?;
    let items = attr.parse_args_with(Punctuated::<HeaderItem, Token![,]>::parse_terminated)?;

    let mut class = None;
    let mut id = None;
    let mut fixed_payload_len = None;
    let mut record_len = None;
    let mut repeated: Option<Type> = None;

    for item in items {
        match item {
            HeaderItem::Class(x) => {
                set_once(&mut class, x.base10_parse::<u8>()?, x.span(), "class")?
            }
            HeaderItem::Id(x) => set_once(&mut id, x.base10_parse::<u8>()?, x.span(), "id")?,
            HeaderItem::FixedPayloadLen(x) => set_once(
                &mut fixed_payload_len,
                x.base10_parse::<usize>()?,
                x.span(),
                "fixed_payload_len",
            )?,
            HeaderItem::RecordLen(x) => set_once(
                &mut record_len,
                (x.base10_parse::<usize>()?, x.span()),
                x.span(),
                "record_len",
            )?,
            HeaderItem::Repeated(ty) => {
                let sp = ty.span();
                set_once(&mut repeated, ty, sp, "repeated")?
            }
        }
    }

    match role {
        LayoutRole::Message => {
            if let Some((_, sp)) = record_len {
                return Err(Error::new(
                    sp,
                    "\"record_len\" belongs on #[ubx_record] structs",
                ));
            }
            let class = class.ok_or_else(|| Error::new(attr.span(), "No \"class\" attribute"))?;
            let id = id.ok_or_else(|| Error::new(attr.span(), "No \"id\" attribute"))?;
            let fixed_payload_len = fixed_payload_len
                .ok_or_else(|| Error::new(attr.span(), "No \"fixed_payload_len\" attribute"))?;
            Ok(LayoutHeader::Message {
                class,
                id,
                fixed_payload_len,
                repeated,
            })
        }
        LayoutRole::Record => {
            if class.is_some() || id.is_some() || fixed_payload_len.is_some() || repeated.is_some()
            {
                return Err(Error::new(
                    attr.span(),
                    "#[ubx_record] only takes \"record_len\"",
                ));
            }
            let (record_len, sp) =
                record_len.ok_or_else(|| Error::new(attr.span(), "No \"record_len\" attribute"))?;
            if record_len == 0 {
                return Err(Error::new(sp, "\"record_len\" must be non-zero"));
            }
            Ok(LayoutHeader::Record { record_len })
        }
    }
}

fn set_once<T>(slot: &mut Option<T>, value: T, sp: Span, name: &str) -> syn::Result<()> {
    if slot.is_some() {
        return Err(Error::new(sp, format!("Duplicate \"{}\" attribute", name)));
    }
    *slot = Some(value);
    Ok(())
}

fn parse_fields(fields: syn::Fields) -> syn::Result<Vec<LayoutField>> {
    let fields = match fields {
        syn::Fields::Named(x) => x,
        other => {
            return Err(Error::new(other.span(), "Unsupported fields format"));
        }
    };
    let mut ret = Vec::with_capacity(fields.named.len());
    for f in fields.named {
        let f_sp = f.span();
        let syn::Field {
            ident: name,
            attrs,
            ty,
            ..
        } = f;
        let name = name.ok_or_else(|| Error::new(f_sp, "No field name"))?;
        let (kind, size_bytes) = field_kind_and_size(&ty)?;

        let mut docs = Vec::new();
        let mut text = false;
        for a in attrs {
            if a.path.is_ident("doc") {
                docs.push(a);
            } else if a.path.is_ident("ubx") {
                let opts =
                    a.parse_args_with(Punctuated::<FieldOption, Token![,]>::parse_terminated)?;
                for opt in opts {
                    match opt {
                        FieldOption::Text(kw) => {
                            if kind != FieldKind::Bytes {
                                return Err(Error::new(
                                    kw.span,
                                    "\"text\" only applies to [u8; N] fields",
                                ));
                            }
                            text = true;
                        }
                    }
                }
            } else {
                return Err(Error::new(a.span(), "Unsupported field attribute"));
            }
        }

        ret.push(LayoutField {
            name,
            ty,
            kind,
            size_bytes,
            text,
            docs,
        });
    }

    Ok(ret)
}

enum FieldOption {
    Text(keyword::text),
}

impl Parse for FieldOption {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let lookahead = input.lookahead1();
        if lookahead.peek(keyword::text) {
            Ok(FieldOption::Text(input.parse()?))
        } else {
            Err(lookahead.error())
        }
    }
}

fn field_kind_and_size(ty: &Type) -> syn::Result<(FieldKind, usize)> {
    let valid_types: [(Type, usize); 10] = [
        (syn::parse_quote!(u8), 1),
        (syn::parse_quote!(i8), 1),
        (syn::parse_quote!(u16), 2),
        (syn::parse_quote!(i16), 2),
        (syn::parse_quote!(u32), 4),
        (syn::parse_quote!(i32), 4),
        (syn::parse_quote!(f32), 4),
        (syn::parse_quote!(u64), 8),
        (syn::parse_quote!(i64), 8),
        (syn::parse_quote!(f64), 8),
    ];
    if let Some((_, size)) = valid_types.iter().find(|x| x.0 == *ty) {
        return Ok((FieldKind::Scalar, *size));
    }

    if let Type::Array(arr) = ty {
        let u8_ty: Type = syn::parse_quote!(u8);
        if *arr.elem == u8_ty {
            if let syn::Expr::Lit(syn::ExprLit {
                lit: syn::Lit::Int(ref len),
                ..
            }) = arr.len
            {
                let len = len.base10_parse::<usize>()?;
                if len != 0 {
                    return Ok((FieldKind::Bytes, len));
                }
            }
        }
    }

    Err(Error::new(
        ty.span(),
        "Field type must be a little-endian scalar or [u8; N] with N > 0",
    ))
}

mod keyword {
    syn::custom_keyword!(class);
    syn::custom_keyword!(id);
    syn::custom_keyword!(fixed_payload_len);
    syn::custom_keyword!(record_len);
    syn::custom_keyword!(repeated);
    syn::custom_keyword!(text);
}
