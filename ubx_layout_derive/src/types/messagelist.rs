use syn::{braced, parse::Parse, punctuated::Punctuated, Error, Ident, Token};

pub struct MessageList {
    pub union_enum_name: Ident,
    pub unknown_ty: Ident,
    pub all_messages: Vec<Ident>,
}

impl Parse for MessageList {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        input.parse::<Token![enum]>()?;
        let union_enum_name: Ident = input.parse()?;
        let content;
        let _brace_token: syn::token::Brace = braced!(content in input);
        content.parse::<Token![_]>()?;
        content.parse::<Token![=]>()?;
        let unknown_ty: Ident = content.parse()?;
        content.parse::<Token![,]>()?;
        let msgs: Punctuated<Ident, Token![,]> = content.parse_terminated(Ident::parse)?;
        if msgs.is_empty() {
            return Err(Error::new(
                union_enum_name.span(),
                "At least one message is required",
            ));
        }
        Ok(Self {
            union_enum_name,
            unknown_ty,
            all_messages: msgs.into_iter().collect(),
        })
    }
}
