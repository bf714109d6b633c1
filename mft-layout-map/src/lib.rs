/* Copyright 2024-2025 Joachim Metz <joachim.metz@gmail.com>
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may
 * obtain a copy of the License at https://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
 * WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied. See the
 * License for the specific language governing permissions and limitations
 * under the License.
 */

//! Derives a best-effort layout dump for fixed-size binary record headers.
//!
//! `#[derive(LayoutMap)]` reads a struct-level list of `member(name = "...",
//! data_type = "...")` descriptors and generates a method (named
//! `debug_read_data` by default) that renders each member's value at its
//! cumulative offset into a human-readable `String`, for use with
//! [`mft_core::mediator::Mediator`]'s debug output. Members describe the
//! on-disk layout and do not need to correspond 1:1 with the struct's actual
//! fields (reserved/unknown bytes are commonly named members with no field).
//! Only primitive integers and fixed-size `[u8; N]` byte arrays are
//! supported as member types; an out-of-bounds read renders as a placeholder
//! rather than failing, since this is a diagnostic aid, not a parser.

mod options;

use darling::FromDeriveInput;
use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

use options::LayoutMapOptions;

#[proc_macro_derive(LayoutMap, attributes(layout_map))]
pub fn derive_layout_map(input: TokenStream) -> TokenStream {
    let derive_input: DeriveInput = parse_macro_input!(input as DeriveInput);

    let options: LayoutMapOptions = match LayoutMapOptions::from_derive_input(&derive_input) {
        Ok(options) => options,
        Err(error) => return error.write_errors().into(),
    };

    let struct_name: &syn::Ident = &derive_input.ident;
    let method_name: syn::Ident = options.method_ident();

    let mut statements = Vec::new();
    let mut offset_expr: proc_macro2::TokenStream = quote! { 0usize };

    for member in options.members() {
        let (stmt, size) = match options::member_debug_stmt(member, &offset_expr) {
            Ok(value) => value,
            Err(error) => return error.to_compile_error().into(),
        };
        statements.push(stmt);
        offset_expr = quote! { (#offset_expr + #size) };
    }

    let expanded = quote! {
        impl #struct_name {
            /// Renders the structure's on-disk layout as a human-readable
            /// dump, field-by-field in declaration order.
            pub fn #method_name(data: &[u8]) -> String {
                let reader = mft_types::ByteReader::new(data);
                let mut output = String::new();
                #(#statements)*
                output
            }
        }
    };

    TokenStream::from(expanded)
}
