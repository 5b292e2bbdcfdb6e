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

//! Generation of `merge_field`: route one wire occurrence into its slot.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::field_meta::{Kind, ProtoField};

fn read_fn(field: &ProtoField) -> TokenStream {
    let name = format_ident!("read_{}", field.kind.codec_stem());
    quote!(tagwire_core::codec::#name)
}

fn read_value_fn(field: &ProtoField) -> TokenStream {
    let name = format_ident!("read_{}_value", field.kind.codec_stem());
    quote!(tagwire_core::codec::#name)
}

fn merge_arm(field: &ProtoField) -> TokenStream {
    let ident = &field.ident;
    let tag = field.tag;
    let name = &field.name;
    let read = read_fn(field);

    let body = match (field.repeated, field.kind) {
        // Packable scalars accept both per-element and packed runs.
        (true, kind) if kind.is_packable() => {
            let declared = field.kind.declared_wire();
            let elem = read_value_fn(field);
            quote! {
                tagwire_core::codec::merge_repeated(
                    self.#ident.get_or_insert_with(Vec::new),
                    reader,
                    wire_type,
                    #declared,
                    #name,
                    #elem,
                )?;
            }
        }
        (true, Kind::Message) => {
            let ty = field.message_ty.as_ref().unwrap();
            quote! {
                self.#ident.get_or_insert_with(Vec::new).push(
                    tagwire_core::codec::read_message::<#ty>(reader, wire_type, depth, #name)?,
                );
            }
        }
        (true, Kind::Group) => {
            let ty = field.message_ty.as_ref().unwrap();
            quote! {
                self.#ident.get_or_insert_with(Vec::new).push(
                    tagwire_core::codec::read_group::<#ty>(reader, wire_type, #tag, depth, #name)?,
                );
            }
        }
        (true, _) => quote! {
            self.#ident.get_or_insert_with(Vec::new).push(#read(reader, wire_type, #name)?);
        },
        (false, Kind::Message) => {
            let ty = field.message_ty.as_ref().unwrap();
            let value = quote! {
                tagwire_core::codec::read_message::<#ty>(reader, wire_type, depth, #name)?
            };
            if field.boxed {
                quote! { self.#ident = Some(Box::new(#value)); }
            } else {
                quote! { self.#ident = Some(#value); }
            }
        }
        (false, Kind::Group) => {
            let ty = field.message_ty.as_ref().unwrap();
            let value = quote! {
                tagwire_core::codec::read_group::<#ty>(reader, wire_type, #tag, depth, #name)?
            };
            if field.boxed {
                quote! { self.#ident = Some(Box::new(#value)); }
            } else {
                quote! { self.#ident = Some(#value); }
            }
        }
        (false, _) => quote! {
            self.#ident = Some(#read(reader, wire_type, #name)?);
        },
    };

    quote! {
        #tag => {
            #body
            Ok(true)
        }
    }
}

pub fn gen_merge_field(fields: &[ProtoField]) -> TokenStream {
    let arms = fields.iter().map(merge_arm);
    quote! {
        #[allow(unused_variables)]
        fn merge_field(
            &mut self,
            tag: u32,
            wire_type: tagwire_core::wire::WireType,
            reader: &mut tagwire_core::buffer::Reader,
            depth: u32,
        ) -> Result<bool, tagwire_core::error::Error> {
            match tag {
                #(#arms)*
                _ => Ok(false),
            }
        }
    }
}
