// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Parsing of `#[tagwire(...)]` field attributes into per-field metadata.

use proc_macro2::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Expr, Field, GenericArgument, Ident, PathArguments, Type};

const MAX_TAG: u32 = (1 << 29) - 1;
const RESERVED_TAGS: (u32, u32) = (19_000, 19_999);

/// The declared kind keyword of a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Int32,
    Int64,
    UInt32,
    UInt64,
    SInt32,
    SInt64,
    Bool,
    Double,
    Float,
    String,
    Bytes,
    Enum,
    Message,
    Group,
}

impl Kind {
    fn from_keyword(word: &str) -> Option<Kind> {
        Some(match word {
            "int32" => Kind::Int32,
            "int64" => Kind::Int64,
            "uint32" => Kind::UInt32,
            "uint64" => Kind::UInt64,
            "sint32" => Kind::SInt32,
            "sint64" => Kind::SInt64,
            "bool" => Kind::Bool,
            "double" => Kind::Double,
            "float" => Kind::Float,
            "string" => Kind::String,
            "bytes" => Kind::Bytes,
            "enumeration" => Kind::Enum,
            "message" => Kind::Message,
            "group" => Kind::Group,
            _ => return None,
        })
    }

    pub fn is_message_like(self) -> bool {
        matches!(self, Kind::Message | Kind::Group)
    }

    /// Kinds whose slot is `Copy`, so getters return by value and write
    /// loops dereference.
    pub fn is_copy(self) -> bool {
        !matches!(
            self,
            Kind::String | Kind::Bytes | Kind::Message | Kind::Group
        )
    }

    pub fn is_packable(self) -> bool {
        self.is_copy()
    }

    pub fn field_kind(self) -> TokenStream {
        let variant = match self {
            Kind::Int32 => quote!(Int32),
            Kind::Int64 => quote!(Int64),
            Kind::UInt32 => quote!(UInt32),
            Kind::UInt64 => quote!(UInt64),
            Kind::SInt32 => quote!(SInt32),
            Kind::SInt64 => quote!(SInt64),
            Kind::Bool => quote!(Bool),
            Kind::Double => quote!(Double),
            Kind::Float => quote!(Float),
            Kind::String => quote!(String),
            Kind::Bytes => quote!(Bytes),
            Kind::Enum => quote!(Enum),
            Kind::Message => quote!(Message),
            Kind::Group => quote!(Group),
        };
        quote!(tagwire_core::descriptor::FieldKind::#variant)
    }

    /// The wire type the kind declares, as tokens.
    pub fn declared_wire(self) -> TokenStream {
        match self {
            Kind::Double => quote!(tagwire_core::wire::WireType::Fixed64),
            Kind::Float => quote!(tagwire_core::wire::WireType::Fixed32),
            Kind::String | Kind::Bytes | Kind::Message => {
                quote!(tagwire_core::wire::WireType::LengthDelimited)
            }
            Kind::Group => quote!(tagwire_core::wire::WireType::StartGroup),
            _ => quote!(tagwire_core::wire::WireType::Varint),
        }
    }

    /// `tagwire_core::codec` function stem for this kind, e.g. `int32` for
    /// `write_int32` / `read_int32` / `read_int32_value`.
    pub fn codec_stem(self) -> &'static str {
        match self {
            Kind::Int32 | Kind::Enum => "int32",
            Kind::Int64 => "int64",
            Kind::UInt32 => "uint32",
            Kind::UInt64 => "uint64",
            Kind::SInt32 => "sint32",
            Kind::SInt64 => "sint64",
            Kind::Bool => "bool",
            Kind::Double => "double",
            Kind::Float => "float",
            Kind::String => "string",
            Kind::Bytes => "bytes",
            Kind::Message => "message",
            Kind::Group => "group",
        }
    }
}

/// One parsed message field.
pub struct ProtoField {
    pub ident: Ident,
    pub name: String,
    pub tag: u32,
    pub kind: Kind,
    pub repeated: bool,
    pub boxed: bool,
    pub default: Option<Expr>,
    /// Nested message type for message/group kinds, unwrapped from the
    /// `Option< [Vec<] [Box<] M [>] [>] >` slot.
    pub message_ty: Option<Type>,
}

/// Strip one layer of a generic wrapper like `Option<T>` and return `T`.
fn generic_inner<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let Type::Path(path) = ty else { return None };
    let segment = path.path.segments.last()?;
    if segment.ident != wrapper {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

pub fn parse_field(field: &Field) -> syn::Result<Option<ProtoField>> {
    let mut tag: Option<u32> = None;
    let mut kind: Option<Kind> = None;
    let mut repeated = false;
    let mut boxed = false;
    let mut default: Option<Expr> = None;
    let mut saw_attr = false;

    for attr in &field.attrs {
        if !attr.path().is_ident("tagwire") {
            continue;
        }
        saw_attr = true;
        attr.parse_nested_meta(|nested| {
            if nested.path.is_ident("tag") {
                let lit: syn::LitInt = nested.value()?.parse()?;
                tag = Some(lit.base10_parse()?);
                return Ok(());
            }
            if nested.path.is_ident("repeated") {
                repeated = true;
                return Ok(());
            }
            if nested.path.is_ident("boxed") {
                boxed = true;
                return Ok(());
            }
            if nested.path.is_ident("default") {
                let expr: Expr = nested.value()?.parse()?;
                default = Some(expr);
                return Ok(());
            }
            if let Some(ident) = nested.path.get_ident() {
                if let Some(parsed) = Kind::from_keyword(&ident.to_string()) {
                    if kind.replace(parsed).is_some() {
                        return Err(nested.error("more than one kind keyword"));
                    }
                    return Ok(());
                }
            }
            Err(nested.error("unrecognized tagwire attribute"))
        })?;
    }

    if !saw_attr {
        return Ok(None);
    }

    let ident = field
        .ident
        .clone()
        .ok_or_else(|| syn::Error::new(field.span(), "message fields must be named"))?;

    let tag = tag.ok_or_else(|| syn::Error::new(field.span(), "missing `tag = N` attribute"))?;
    if tag == 0 || tag > MAX_TAG {
        return Err(syn::Error::new(
            field.span(),
            format!("tag must be in 1..={}", MAX_TAG),
        ));
    }
    if (RESERVED_TAGS.0..=RESERVED_TAGS.1).contains(&tag) {
        return Err(syn::Error::new(
            field.span(),
            format!(
                "tags {}..={} are reserved by the wire format",
                RESERVED_TAGS.0, RESERVED_TAGS.1
            ),
        ));
    }

    let kind = kind.ok_or_else(|| {
        syn::Error::new(field.span(), "missing kind keyword (e.g. `int32`, `string`)")
    })?;

    if default.is_some() && (repeated || kind.is_message_like()) {
        return Err(syn::Error::new(
            field.span(),
            "`default` applies only to singular scalar fields",
        ));
    }
    if boxed && (repeated || !kind.is_message_like()) {
        return Err(syn::Error::new(
            field.span(),
            "`boxed` applies only to singular message fields",
        ));
    }

    // Message kinds need the nested type for descriptor thunks and typed
    // decoding; walk it out of the declared slot type.
    let message_ty = if kind.is_message_like() {
        let mut inner = generic_inner(&field.ty, "Option").ok_or_else(|| {
            syn::Error::new(field.ty.span(), "message field slots must be Option-wrapped")
        })?;
        if repeated {
            inner = generic_inner(inner, "Vec").ok_or_else(|| {
                syn::Error::new(field.ty.span(), "repeated slots must be Option<Vec<..>>")
            })?;
        }
        if boxed {
            inner = generic_inner(inner, "Box").ok_or_else(|| {
                syn::Error::new(field.ty.span(), "boxed slots must be Option<Box<..>>")
            })?;
        }
        Some(inner.clone())
    } else {
        None
    };

    Ok(Some(ProtoField {
        name: ident.to_string(),
        ident,
        tag,
        kind,
        repeated,
        boxed,
        default,
        message_ty,
    }))
}
