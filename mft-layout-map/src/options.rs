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

use darling::FromDeriveInput;
use darling::FromMeta;
use quote::quote;
use syn::Ident;

/// A single `member(name = "...", data_type = "...")` descriptor.
///
/// Members describe the on-disk layout for debug dumping and need not have
/// a corresponding field on the Rust struct (unknown/reserved bytes are
/// common members with no field).
#[derive(FromMeta, Clone)]
pub struct MemberOptions {
    pub name: String,
    pub data_type: String,
    #[darling(default)]
    pub format: Option<String>,
}

/// Struct-level `#[layout_map(...)]` options.
#[derive(FromDeriveInput)]
#[darling(attributes(layout_map))]
pub struct LayoutMapOptions {
    #[darling(default)]
    method: Option<String>,

    #[darling(multiple, rename = "member")]
    member: Vec<MemberOptions>,
}

impl LayoutMapOptions {
    pub fn method_ident(&self) -> Ident {
        let name: &str = self.method.as_deref().unwrap_or("debug_read_data");
        Ident::new(name, proc_macro2::Span::call_site())
    }

    pub fn members(&self) -> &[MemberOptions] {
        &self.member
    }
}

/// Byte size of a scalar `data_type` name, or `None` for `[u8; N]` arrays.
fn scalar_size(data_type: &str) -> Option<usize> {
    match data_type {
        "u8" | "i8" => Some(1),
        "u16" | "i16" => Some(2),
        "u32" | "i32" => Some(4),
        "u64" | "i64" => Some(8),
        _ => None,
    }
}

/// Produces the debug-read statement and byte width for a single member.
///
/// Unsupported or out-of-bounds reads degrade to a placeholder string rather
/// than failing, since this generates a best-effort diagnostic dump, not an
/// authoritative parser.
pub fn member_debug_stmt(
    member: &MemberOptions,
    offset_expr: &proc_macro2::TokenStream,
) -> syn::Result<(proc_macro2::TokenStream, usize)> {
    let name: &str = &member.name;
    let hex: bool = member.format.as_deref() == Some("hex");

    if let Some(size) = scalar_size(&member.data_type) {
        let reader_method: proc_macro2::Ident = proc_macro2::Ident::new(
            &format!("read_{}", member.data_type),
            proc_macro2::Span::call_site(),
        );
        let format_literal: String = if hex {
            format!("{}: 0x{{:0{}x}}\n", name, size * 2)
        } else {
            format!("{}: {{}}\n", name)
        };
        let stmt = quote! {
            match reader.#reader_method(#offset_expr) {
                Ok(value) => output.push_str(&format!(#format_literal, value)),
                Err(_) => output.push_str(&format!("{}: <out of bounds>\n", #name)),
            }
        };
        return Ok((stmt, size));
    }

    if let Some(length_str) = member
        .data_type
        .strip_prefix("[u8; ")
        .and_then(|rest| rest.strip_suffix(']'))
    {
        let length: usize = length_str
            .trim()
            .parse()
            .map_err(|_| syn::Error::new(proc_macro2::Span::call_site(), "LayoutMap: malformed [u8; N] member data_type"))?;
        let format_literal: String = format!("{}: {{}}\n", name);
        let stmt = quote! {
            match reader.read_fixed_bytes(#offset_expr, #length) {
                Ok(bytes) => {
                    let hex_string: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
                    output.push_str(&format!(#format_literal, hex_string));
                }
                Err(_) => output.push_str(&format!("{}: <out of bounds>\n", #name)),
            }
        };
        return Ok((stmt, length));
    }

    Err(syn::Error::new(
        proc_macro2::Span::call_site(),
        format!("LayoutMap: unsupported member data_type '{}'", member.data_type),
    ))
}
