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

//! Orchestration of the `#[derive(Message)]` expansion.

use std::collections::HashMap;

use proc_macro2::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, Ident, LitStr};

mod field_meta;
mod misc;
mod read;
mod write;

use field_meta::{parse_field, ProtoField};

pub struct MessageMeta {
    pub ident: Ident,
    pub package: String,
    pub name: String,
    pub fields: Vec<ProtoField>,
    pub unknown_ident: Ident,
}

impl MessageMeta {
    pub fn full_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }
}

pub fn derive_message(input: &DeriveInput) -> syn::Result<TokenStream> {
    let mut package = String::new();
    let mut type_name: Option<String> = None;

    for attr in &input.attrs {
        if !attr.path().is_ident("tagwire") {
            continue;
        }
        attr.parse_nested_meta(|nested| {
            if nested.path.is_ident("package") {
                let lit: LitStr = nested.value()?.parse()?;
                package = lit.value();
                return Ok(());
            }
            if nested.path.is_ident("name") {
                let lit: LitStr = nested.value()?.parse()?;
                type_name = Some(lit.value());
                return Ok(());
            }
            Err(nested.error("unrecognized tagwire attribute"))
        })?;
    }

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new(
            input.generics.span(),
            "generic message types are not supported",
        ));
    }

    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new(
            input.span(),
            "#[derive(Message)] applies to structs with named fields",
        ));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(syn::Error::new(
            input.span(),
            "#[derive(Message)] applies to structs with named fields",
        ));
    };

    let mut fields = Vec::new();
    let mut unknown_ident: Option<Ident> = None;
    for field in &named.named {
        match parse_field(field)? {
            Some(parsed) => fields.push(parsed),
            None => {
                let ident = field.ident.clone().expect("named field");
                if ident == "unknown_fields" {
                    unknown_ident = Some(ident);
                } else {
                    return Err(syn::Error::new(
                        field.span(),
                        "field needs a #[tagwire(..)] attribute, or the name \
                         `unknown_fields` for the unknown-field store",
                    ));
                }
            }
        }
    }

    let unknown_ident = unknown_ident.ok_or_else(|| {
        syn::Error::new(
            input.span(),
            "message structs must carry an `unknown_fields: UnknownFieldSet` field",
        )
    })?;

    let mut seen_tags: HashMap<u32, String> = HashMap::new();
    for field in &fields {
        if let Some(previous) = seen_tags.insert(field.tag, field.name.clone()) {
            return Err(syn::Error::new(
                field.ident.span(),
                format!(
                    "tag {} already used by field `{}`",
                    field.tag, previous
                ),
            ));
        }
    }

    let meta = MessageMeta {
        ident: input.ident.clone(),
        package,
        name: type_name.unwrap_or_else(|| input.ident.to_string()),
        fields,
        unknown_ident,
    };

    let ident = &meta.ident;
    let descriptor = misc::gen_descriptor(&meta);
    let default_instance = misc::gen_default_instance(&meta);
    let unknown_accessors = misc::gen_unknown_accessors(&meta);
    let write_fields = write::gen_write_fields(&meta.fields);
    let merge_field = read::gen_merge_field(&meta.fields);
    let set_field = misc::gen_set_field(&meta);
    let validate = misc::gen_validate(&meta);
    let render = misc::gen_render(&meta);
    let accessors = misc::gen_accessors(&meta);
    let display = misc::gen_display(&meta);

    Ok(quote! {
        impl tagwire_core::message::Message for #ident {
            #descriptor
            #default_instance
            #unknown_accessors
            #write_fields
            #merge_field
            #set_field
            #validate
            #render
        }

        #accessors

        #display
    })
}
