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

//! Generation of `write_fields`: present fields in declared order.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::field_meta::ProtoField;

fn write_fn(field: &ProtoField) -> TokenStream {
    let name = format_ident!("write_{}", field.kind.codec_stem());
    quote!(tagwire_core::codec::#name)
}

pub fn gen_write_fields(fields: &[ProtoField]) -> TokenStream {
    let per_field = fields.iter().map(|field| {
        let ident = &field.ident;
        let tag = field.tag;
        let write = write_fn(field);

        if field.repeated {
            let elem = if field.kind.is_copy() {
                quote!(*v)
            } else {
                quote!(v)
            };
            quote! {
                if let Some(ref vs) = self.#ident {
                    for v in vs {
                        #write(writer, #tag, #elem);
                    }
                }
            }
        } else if field.kind.is_copy() {
            quote! {
                if let Some(v) = self.#ident {
                    #write(writer, #tag, v);
                }
            }
        } else if field.boxed {
            quote! {
                if let Some(ref v) = self.#ident {
                    #write(writer, #tag, &**v);
                }
            }
        } else {
            quote! {
                if let Some(ref v) = self.#ident {
                    #write(writer, #tag, v);
                }
            }
        }
    });

    quote! {
        #[allow(unused_variables)]
        fn write_fields(&self, writer: &mut tagwire_core::buffer::Writer) {
            #(#per_field)*
        }
    }
}
