use crate::types::{FieldKind, LayoutDesc, LayoutHeader, MessageList};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

pub fn generate_owned_struct(desc: &LayoutDesc) -> TokenStream {
    let name = &desc.name;
    let vis = &desc.vis;
    let attrs = &desc.attrs;
    let fields: Vec<TokenStream> = desc
        .fields
        .iter()
        .map(|f| {
            let docs = &f.docs;
            let fname = &f.name;
            let ty = &f.ty;
            quote! {
                #(#docs)*
                pub #fname: #ty
            }
        })
        .collect();

    quote! {
        #(#attrs)*
        #[derive(Debug, Clone, Copy, PartialEq)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #vis struct #name {
            #(#fields),*
        }
    }
}

pub fn generate_view(desc: &LayoutDesc) -> TokenStream {
    let name = &desc.name;
    let vis = &desc.vis;
    let ref_name = desc.ref_name();
    let ref_name_str = ref_name.to_string();

    let mut getters = Vec::with_capacity(desc.fields.len());
    let mut debug_fields = Vec::with_capacity(desc.fields.len());
    let mut owned_inits = Vec::with_capacity(desc.fields.len());
    for (off, f) in desc.field_offsets() {
        let fname = &f.name;
        let fname_str = fname.to_string();
        let ty = &f.ty;
        let docs = &f.docs;
        let end = off + f.size_bytes;
        match f.kind {
            FieldKind::Scalar => {
                let bytes: Vec<TokenStream> = (off..end).map(|i| quote! { self.0[#i] }).collect();
                getters.push(quote! {
                    #(#docs)*
                    #[inline]
                    pub fn #fname(&self) -> #ty {
                        <#ty>::from_le_bytes([#(#bytes),*])
                    }
                });
                debug_fields.push(quote! { .field(#fname_str, &self.#fname()) });
                owned_inits.push(quote! { #fname: self.#fname() });
            }
            FieldKind::Bytes => {
                let size = f.size_bytes;
                getters.push(quote! {
                    #(#docs)*
                    #[inline]
                    pub fn #fname(&self) -> &'a [u8] {
                        let payload: &'a [u8] = self.0;
                        &payload[#off..#end]
                    }
                });
                if f.text {
                    let str_name = format_ident!("{}_str", fname);
                    let doc = format!("`{}` up to the first NUL byte", fname_str);
                    getters.push(quote! {
                        #[doc = #doc]
                        #[inline]
                        pub fn #str_name(
                            &self,
                        ) -> ::core::result::Result<&'a str, ::core::str::Utf8Error> {
                            crate::text::decode_text(self.#fname())
                        }
                    });
                    debug_fields.push(quote! { .field(#fname_str, &self.#str_name()) });
                } else {
                    debug_fields.push(quote! { .field(#fname_str, &self.#fname()) });
                }
                owned_inits.push(quote! {
                    #fname: {
                        let mut val = [0u8; #size];
                        val.copy_from_slice(self.#fname());
                        val
                    }
                });
            }
        }
    }

    let records = match desc.header {
        LayoutHeader::Message {
            repeated: Some(ref record),
            ..
        } => quote! {
            /// Records following the fixed body, counted from the payload length
            pub fn records(
                &self,
            ) -> ::core::result::Result<
                crate::RepeatedIter<'a, <#record as crate::FixedLayout>::Ref<'a>>,
                crate::LayoutError,
            > {
                crate::RepeatedIter::new(self.0, &<#name as crate::UbxMessage>::DESCRIPTOR)
            }

            /// Number of records following the fixed body
            pub fn repeat_count(&self) -> ::core::result::Result<usize, crate::LayoutError> {
                <#name as crate::UbxMessage>::DESCRIPTOR.repeat_count(self.0.len())
            }
        },
        _ => quote! {},
    };

    let struct_doc = format!(
        "Borrowed view of [`{}`], fields are read from the payload in place",
        name
    );
    quote! {
        #[doc = #struct_doc]
        #[derive(Clone, Copy)]
        #vis struct #ref_name<'a>(&'a [u8]);

        impl<'a> #ref_name<'a> {
            #(#getters)*
            #records
        }

        impl ::core::fmt::Debug for #ref_name<'_> {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.debug_struct(#ref_name_str)
                    #(#debug_fields)*
                    .finish()
            }
        }

        impl<'a> crate::ByteView<'a> for #ref_name<'a> {
            const MIN_LEN: usize = <#name as crate::FixedLayout>::LEN;

            #[inline]
            fn from_bytes(bytes: &'a [u8], _: crate::codec::private::LenChecked) -> Self {
                Self(bytes)
            }
        }

        impl<'a> crate::FixedView<'a> for #ref_name<'a> {
            type Owned = #name;

            #[inline]
            fn payload(&self) -> &'a [u8] {
                self.0
            }

            fn into_owned(self) -> #name {
                #name {
                    #(#owned_inits),*
                }
            }
        }
    }
}

pub fn generate_layout_impl(desc: &LayoutDesc) -> TokenStream {
    let name = &desc.name;
    let name_str = name.to_string();
    let ref_name = desc.ref_name();
    let len = desc.fixed_len();

    let mut writes = Vec::with_capacity(desc.fields.len());
    let mut setters = Vec::new();
    for (off, f) in desc.field_offsets() {
        let fname = &f.name;
        let end = off + f.size_bytes;
        writes.push(match f.kind {
            FieldKind::Scalar => quote! {
                out[#off..#end].copy_from_slice(&self.#fname.to_le_bytes());
            },
            FieldKind::Bytes => quote! {
                out[#off..#end].copy_from_slice(&self.#fname);
            },
        });
        if f.text {
            let set_name = format_ident!("set_{}", fname);
            let doc = format!(
                "Store `value` in `{}`, zero padded or truncated to {} bytes. \
                 Returns the bytes copied.",
                fname, f.size_bytes
            );
            setters.push(quote! {
                #[doc = #doc]
                pub fn #set_name(&mut self, value: &str) -> usize {
                    crate::text::encode_text(&mut self.#fname, value)
                }
            });
        }
    }

    quote! {
        impl crate::FixedLayout for #name {
            const NAME: &'static str = #name_str;
            const LEN: usize = #len;
            type Ref<'a> = #ref_name<'a>;

            #[inline]
            fn write_fields(&self, out: &mut [u8]) {
                #(#writes)*
            }

            #[inline]
            fn extend_to<E: ::core::iter::Extend<u8>>(&self, buf: &mut E) -> usize {
                buf.extend(self.to_bytes());
                #len
            }
        }

        impl #name {
            /// Fixed body as little-endian bytes
            #[inline]
            pub fn to_bytes(&self) -> [u8; #len] {
                let mut ret = [0u8; #len];
                crate::FixedLayout::write_fields(self, &mut ret);
                ret
            }

            /// View over `payload`, which must hold at least the fixed body
            #[inline]
            pub fn decode(
                payload: &[u8],
            ) -> ::core::result::Result<#ref_name<'_>, crate::LayoutError> {
                crate::decode_fixed_body::<Self>(payload)
            }

            #(#setters)*
        }
    }
}

pub fn generate_message_impl(desc: &LayoutDesc) -> TokenStream {
    let (class, id, repeated) = match desc.header {
        LayoutHeader::Message {
            class,
            id,
            ref repeated,
            ..
        } => (class, id, repeated),
        LayoutHeader::Record { .. } => return quote! {},
    };
    let name = &desc.name;
    let name_str = name.to_string();
    let len = desc.fixed_len();
    let record_len = match repeated {
        Some(record) => quote! { <#record as crate::FixedLayout>::LEN },
        None => quote! { 0usize },
    };

    let mut ret = quote! {
        impl crate::UbxMessage for #name {
            const CLASS: u8 = #class;
            const ID: u8 = #id;
            const DESCRIPTOR: crate::MessageDescriptor =
                crate::MessageDescriptor::new(#name_str, #class, #id, #len, #record_len);
        }
    };
    if let Some(record) = repeated {
        ret.extend(quote! {
            impl crate::RepeatedMessage for #name {
                type Record = #record;
            }
        });
    }
    ret
}

pub fn generate_code_for_dispatch(list: &MessageList) -> TokenStream {
    let union_enum_name = &list.union_enum_name;
    let unknown_ty = &list.unknown_ty;
    let count = list.all_messages.len();

    let mut variants = Vec::with_capacity(count);
    let mut id_matches = Vec::with_capacity(count);
    let mut payload_matches = Vec::with_capacity(count);
    let mut descriptors = Vec::with_capacity(count);
    let mut decode_matches = Vec::with_capacity(count);
    for name in &list.all_messages {
        let ref_name = format_ident!("{}Ref", name);
        variants.push(quote! { #name(#ref_name<'a>) });
        id_matches.push(quote! {
            #union_enum_name::#name(_) => (
                <#name as crate::UbxMessage>::CLASS,
                <#name as crate::UbxMessage>::ID,
            )
        });
        payload_matches.push(quote! {
            #union_enum_name::#name(ref msg) => crate::FixedView::payload(msg)
        });
        descriptors.push(quote! { <#name as crate::UbxMessage>::DESCRIPTOR });
        decode_matches.push(quote! {
            (c, i) if c == <#name as crate::UbxMessage>::CLASS
                && i == <#name as crate::UbxMessage>::ID =>
            {
                crate::decode_fixed_body::<#name>(payload).map(#union_enum_name::#name)
            }
        });
    }

    quote! {
        /// Every message defined in this crate, or the raw bytes of one that isn't
        #[derive(Debug, Clone, Copy)]
        pub enum #union_enum_name<'a> {
            #(#variants,)*
            Unknown(#unknown_ty<'a>),
        }

        impl<'a> #union_enum_name<'a> {
            pub fn class_and_msg_id(&self) -> (u8, u8) {
                match *self {
                    #(#id_matches,)*
                    #union_enum_name::Unknown(ref msg) => (msg.class, msg.msg_id),
                }
            }

            /// Payload the message was decoded from
            pub fn payload(&self) -> &'a [u8] {
                match *self {
                    #(#payload_matches,)*
                    #union_enum_name::Unknown(ref msg) => msg.payload,
                }
            }
        }

        const MESSAGE_DESCRIPTOR_TABLE: [crate::MessageDescriptor; #count] = [#(#descriptors),*];

        const _: () = {
            let table = MESSAGE_DESCRIPTOR_TABLE;
            let mut i = 0;
            while i < table.len() {
                let mut j = i + 1;
                while j < table.len() {
                    assert!(
                        !(table[i].class == table[j].class && table[i].id == table[j].id),
                        "two messages share a (class, id) pair"
                    );
                    j += 1;
                }
                i += 1;
            }
        };

        /// Descriptors of every message in the dispatch enum
        pub static MESSAGE_DESCRIPTORS: [crate::MessageDescriptor; #count] =
            MESSAGE_DESCRIPTOR_TABLE;

        /// Lookup table over [`MESSAGE_DESCRIPTORS`]
        pub static BUILTIN_MESSAGES: crate::StaticRegistry =
            crate::StaticRegistry::new(&MESSAGE_DESCRIPTORS);

        /// Decode the fixed body of a known message type. Unknown pairs come
        /// back as the `Unknown` variant holding the raw payload.
        pub fn match_message(
            class: u8,
            msg_id: u8,
            payload: &[u8],
        ) -> ::core::result::Result<#union_enum_name<'_>, crate::LayoutError> {
            match (class, msg_id) {
                #(#decode_matches)*
                _ => Ok(#union_enum_name::Unknown(#unknown_ty {
                    payload,
                    class,
                    msg_id,
                })),
            }
        }
    }
}
