extern crate proc_macro;

mod input;
mod output;
mod types;

use proc_macro2::{Span, TokenStream};
use syn::{parse_macro_input, ItemStruct};
use types::{LayoutRole, MessageList};

/// Turn a struct describing a message's fixed body into an owned value type,
/// a borrowed `XxxRef<'a>` view and the layout/message trait impls.
///
/// ```ignore
/// #[ubx_message]
/// #[ubx(class = 0x0a, id = 0x04, fixed_payload_len = 40, repeated = MonVerExtension)]
/// struct MonVer {
///     #[ubx(text)]
///     software_version: [u8; 30],
///     #[ubx(text)]
///     hardware_version: [u8; 10],
/// }
/// ```
#[proc_macro_attribute]
pub fn ubx_message(
    attr: proc_macro::TokenStream,
    input: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    if !attr.is_empty() {
        return unexpected_arguments("ubx_message").into();
    }
    let input = parse_macro_input!(input as ItemStruct);
    generate_code_for_message(input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

/// Same as [`macro@ubx_message`] for the records that repeat after a
/// message's fixed body. Takes `#[ubx(record_len = N)]` instead of class/id.
#[proc_macro_attribute]
pub fn ubx_record(
    attr: proc_macro::TokenStream,
    input: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    if !attr.is_empty() {
        return unexpected_arguments("ubx_record").into();
    }
    let input = parse_macro_input!(input as ItemStruct);
    generate_code_for_record(input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

/// Build the dispatch enum and `match_message` over a list of messages.
///
/// ```ignore
/// define_messages!(
///     enum MessageRef {
///         _ = UnknownMessageRef,
///         MonVer,
///         NavSat,
///     }
/// );
/// ```
#[proc_macro]
pub fn define_messages(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let list = parse_macro_input!(input as MessageList);
    output::generate_code_for_dispatch(&list).into()
}

fn generate_code_for_message(input: ItemStruct) -> syn::Result<TokenStream> {
    let desc = input::parse_layout_description(input, LayoutRole::Message)?;
    let mut ret = output::generate_owned_struct(&desc);
    ret.extend(output::generate_view(&desc));
    ret.extend(output::generate_layout_impl(&desc));
    ret.extend(output::generate_message_impl(&desc));
    Ok(ret)
}

fn generate_code_for_record(input: ItemStruct) -> syn::Result<TokenStream> {
    let desc = input::parse_layout_description(input, LayoutRole::Record)?;
    let mut ret = output::generate_owned_struct(&desc);
    ret.extend(output::generate_view(&desc));
    ret.extend(output::generate_layout_impl(&desc));
    Ok(ret)
}

fn unexpected_arguments(name: &str) -> TokenStream {
    syn::Error::new(
        Span::call_site(),
        format!("#[{}] takes no arguments, use #[ubx(...)] instead", name),
    )
    .to_compile_error()
}
