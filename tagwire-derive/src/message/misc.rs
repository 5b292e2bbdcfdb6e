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

//! Generation of the descriptor table, field accessors, dynamic assignment,
//! validation and rendering.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::field_meta::{Kind, ProtoField};
use super::MessageMeta;

/// `DefaultValue::..` tokens recorded in the descriptor.
fn descriptor_default(field: &ProtoField) -> TokenStream {
    if field.repeated || field.kind.is_message_like() {
        return quote!(tagwire_core::descriptor::DefaultValue::None);
    }
    let default = field.default.as_ref();
    match field.kind {
        Kind::Int32 | Kind::Int64 | Kind::SInt32 | Kind::SInt64 | Kind::Enum => match default {
            Some(lit) => quote!(tagwire_core::descriptor::DefaultValue::Int(#lit as i64)),
            None => quote!(tagwire_core::descriptor::DefaultValue::Int(0)),
        },
        Kind::UInt32 | Kind::UInt64 => match default {
            Some(lit) => quote!(tagwire_core::descriptor::DefaultValue::UInt(#lit as u64)),
            None => quote!(tagwire_core::descriptor::DefaultValue::UInt(0)),
        },
        Kind::Bool => match default {
            Some(lit) => quote!(tagwire_core::descriptor::DefaultValue::Bool(#lit)),
            None => quote!(tagwire_core::descriptor::DefaultValue::Bool(false)),
        },
        Kind::Double => match default {
            Some(lit) => quote!(tagwire_core::descriptor::DefaultValue::Double(#lit as f64)),
            None => quote!(tagwire_core::descriptor::DefaultValue::Double(0.0)),
        },
        Kind::Float => match default {
            Some(lit) => quote!(tagwire_core::descriptor::DefaultValue::Float(#lit as f32)),
            None => quote!(tagwire_core::descriptor::DefaultValue::Float(0.0)),
        },
        Kind::String => match default {
            Some(lit) => quote!(tagwire_core::descriptor::DefaultValue::Str(#lit)),
            None => quote!(tagwire_core::descriptor::DefaultValue::Str("")),
        },
        Kind::Bytes => match default {
            Some(lit) => quote!(tagwire_core::descriptor::DefaultValue::Bytes(#lit)),
            None => quote!(tagwire_core::descriptor::DefaultValue::Bytes(b"")),
        },
        Kind::Message | Kind::Group => unreachable!(),
    }
}

pub fn gen_descriptor(meta: &MessageMeta) -> TokenStream {
    let package = &meta.package;
    let name = &meta.name;
    let field_exprs = meta.fields.iter().map(|field| {
        let field_name = &field.name;
        let tag = field.tag;
        let kind = field.kind.field_kind();
        let label = if field.repeated {
            quote!(tagwire_core::descriptor::Label::Repeated)
        } else {
            quote!(tagwire_core::descriptor::Label::Optional)
        };
        if field.kind.is_message_like() {
            let ty = field.message_ty.as_ref().unwrap();
            quote! {
                tagwire_core::descriptor::FieldDescriptor::message(
                    #field_name, #tag, #kind, #label,
                    <#ty as tagwire_core::message::Message>::descriptor,
                )
            }
        } else {
            let default = descriptor_default(field);
            quote! {
                tagwire_core::descriptor::FieldDescriptor::scalar(
                    #field_name, #tag, #kind, #label, #default,
                )
            }
        }
    });

    quote! {
        fn descriptor() -> &'static tagwire_core::descriptor::MessageDescriptor {
            static DESCRIPTOR: std::sync::OnceLock<tagwire_core::descriptor::MessageDescriptor> =
                std::sync::OnceLock::new();
            DESCRIPTOR.get_or_init(|| {
                tagwire_core::descriptor::MessageDescriptor::new(
                    #package,
                    #name,
                    vec![#(#field_exprs),*],
                )
            })
        }
    }
}

pub fn gen_default_instance(meta: &MessageMeta) -> TokenStream {
    let ident = &meta.ident;
    quote! {
        fn default_instance() -> &'static Self {
            static INSTANCE: std::sync::OnceLock<#ident> = std::sync::OnceLock::new();
            INSTANCE.get_or_init(<#ident as Default>::default)
        }
    }
}

pub fn gen_unknown_accessors(meta: &MessageMeta) -> TokenStream {
    let unknown = &meta.unknown_ident;
    quote! {
        fn unknown_fields(&self) -> &tagwire_core::unknown::UnknownFieldSet {
            &self.#unknown
        }

        fn unknown_fields_mut(&mut self) -> &mut tagwire_core::unknown::UnknownFieldSet {
            &mut self.#unknown
        }
    }
}

/// `Value` conversion call for one element of the field's kind.
fn value_conversion(field: &ProtoField, value: TokenStream) -> TokenStream {
    let name = &field.name;
    match field.kind {
        Kind::Int32 | Kind::Int64 | Kind::SInt32 | Kind::SInt64 | Kind::Enum => {
            quote!(#value.into_i64(#name)?)
        }
        Kind::UInt32 | Kind::UInt64 => quote!(#value.into_u64(#name)?),
        Kind::Bool => quote!(#value.into_bool(#name)?),
        Kind::Double => quote!(#value.into_f64(#name)?),
        Kind::Float => quote!(#value.into_f32(#name)?),
        Kind::String => quote!(#value.into_string(#name)?),
        Kind::Bytes => quote!(#value.into_byte_vec(#name)?),
        Kind::Message | Kind::Group => {
            let ty = field.message_ty.as_ref().unwrap();
            quote!(#value.into_message::<#ty>(#name)?)
        }
    }
}

pub fn gen_set_field(meta: &MessageMeta) -> TokenStream {
    let full_name = meta.full_name();
    let arms = meta.fields.iter().map(|field| {
        let ident = &field.ident;
        let name = &field.name;
        let assignment = if field.repeated {
            let convert = value_conversion(field, quote!(item));
            quote! {
                let items = value.into_list(#name)?;
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(#convert);
                }
                self.#ident = Some(out);
            }
        } else {
            let convert = value_conversion(field, quote!(value));
            if field.boxed {
                quote! { self.#ident = Some(Box::new(#convert)); }
            } else {
                quote! { self.#ident = Some(#convert); }
            }
        };
        quote! {
            #name => {
                if value.is_null() {
                    self.#ident = None;
                } else {
                    #assignment
                }
                Ok(())
            }
        }
    });

    quote! {
        #[allow(unused_variables)]
        fn set_field(
            &mut self,
            name: &str,
            value: tagwire_core::value::Value,
        ) -> Result<(), tagwire_core::error::Error> {
            match name {
                #(#arms)*
                _ => Err(tagwire_core::error::Error::type_violation(format!(
                    "unknown field `{}` for {}",
                    name, #full_name,
                ))),
            }
        }
    }
}

pub fn gen_validate(meta: &MessageMeta) -> TokenStream {
    let checks = meta.fields.iter().filter_map(|field| {
        let ident = &field.ident;
        let name = &field.name;
        match field.kind {
            Kind::Int32 | Kind::SInt32 | Kind::UInt32 => {
                let check = match field.kind {
                    Kind::Int32 => quote!(tagwire_core::descriptor::check_int32),
                    Kind::SInt32 => quote!(tagwire_core::descriptor::check_sint32),
                    _ => quote!(tagwire_core::descriptor::check_uint32),
                };
                Some(if field.repeated {
                    quote! {
                        if let Some(ref vs) = self.#ident {
                            for v in vs {
                                #check(#name, *v)?;
                            }
                        }
                    }
                } else {
                    quote! {
                        if let Some(v) = self.#ident {
                            #check(#name, v)?;
                        }
                    }
                })
            }
            Kind::Message | Kind::Group => Some(if field.repeated {
                quote! {
                    if let Some(ref vs) = self.#ident {
                        for v in vs {
                            tagwire_core::message::Message::validate(v)?;
                        }
                    }
                }
            } else if field.boxed {
                quote! {
                    if let Some(ref v) = self.#ident {
                        tagwire_core::message::Message::validate(&**v)?;
                    }
                }
            } else {
                quote! {
                    if let Some(ref v) = self.#ident {
                        tagwire_core::message::Message::validate(v)?;
                    }
                }
            }),
            _ => None,
        }
    });

    quote! {
        fn validate(&self) -> Result<(), tagwire_core::error::Error> {
            #(#checks)*
            Ok(())
        }
    }
}

pub fn gen_render(meta: &MessageMeta) -> TokenStream {
    let per_field = meta.fields.iter().map(|field| {
        let ident = &field.ident;
        let label = format!("{}: ", field.name);
        let nested_name = &field.name;

        if field.kind.is_message_like() {
            let value = if field.boxed {
                quote!(&**v)
            } else {
                quote!(v)
            };
            let render_one = quote! {
                if !out.is_empty() {
                    out.push(' ');
                }
                let mut inner = String::new();
                tagwire_core::message::Message::render(#value, &mut inner);
                out.push_str(#nested_name);
                if inner.is_empty() {
                    out.push_str(" {}");
                } else {
                    out.push_str(" { ");
                    out.push_str(&inner);
                    out.push_str(" }");
                }
            };
            if field.repeated {
                quote! {
                    if let Some(ref vs) = self.#ident {
                        for v in vs {
                            #render_one
                        }
                    }
                }
            } else {
                quote! {
                    if let Some(ref v) = self.#ident {
                        #render_one
                    }
                }
            }
        } else {
            let format_value = match field.kind {
                Kind::String | Kind::Bytes => quote!(out.push_str(&format!("{:?}", v))),
                _ => quote!(out.push_str(&v.to_string())),
            };
            if field.repeated {
                quote! {
                    if let Some(ref vs) = self.#ident {
                        for v in vs {
                            if !out.is_empty() {
                                out.push(' ');
                            }
                            out.push_str(#label);
                            #format_value;
                        }
                    }
                }
            } else {
                let binding = if field.kind.is_copy() {
                    quote!(Some(v))
                } else {
                    quote!(Some(ref v))
                };
                quote! {
                    if let #binding = self.#ident {
                        if !out.is_empty() {
                            out.push(' ');
                        }
                        out.push_str(#label);
                        #format_value;
                    }
                }
            }
        }
    });

    quote! {
        #[allow(unused_variables)]
        fn render(&self, out: &mut String) {
            #(#per_field)*
        }
    }
}

/// Default expression for getters of unset scalar fields.
fn getter_default(field: &ProtoField) -> TokenStream {
    let default = field.default.as_ref();
    match field.kind {
        Kind::Int32 | Kind::Int64 | Kind::SInt32 | Kind::SInt64 | Kind::Enum => match default {
            Some(lit) => quote!(#lit as i64),
            None => quote!(0),
        },
        Kind::UInt32 | Kind::UInt64 => match default {
            Some(lit) => quote!(#lit as u64),
            None => quote!(0),
        },
        Kind::Bool => match default {
            Some(lit) => quote!(#lit),
            None => quote!(false),
        },
        Kind::Double => match default {
            Some(lit) => quote!(#lit as f64),
            None => quote!(0.0),
        },
        Kind::Float => match default {
            Some(lit) => quote!(#lit as f32),
            None => quote!(0.0),
        },
        Kind::String => match default {
            Some(lit) => quote!(#lit),
            None => quote!(""),
        },
        Kind::Bytes => match default {
            Some(lit) => quote!(#lit),
            None => quote!(b""),
        },
        Kind::Message | Kind::Group => unreachable!(),
    }
}

fn scalar_slot_ty(kind: Kind) -> TokenStream {
    match kind {
        Kind::Int32 | Kind::Int64 | Kind::SInt32 | Kind::SInt64 | Kind::Enum => quote!(i64),
        Kind::UInt32 | Kind::UInt64 => quote!(u64),
        Kind::Bool => quote!(bool),
        Kind::Double => quote!(f64),
        Kind::Float => quote!(f32),
        Kind::String => quote!(String),
        Kind::Bytes => quote!(Vec<u8>),
        Kind::Message | Kind::Group => unreachable!(),
    }
}

fn field_accessors(field: &ProtoField) -> TokenStream {
    let ident = &field.ident;
    let setter = format_ident!("set_{}", field.name);
    let has = format_ident!("has_{}", field.name);
    let clear = format_ident!("clear_{}", field.name);
    let get_mut = format_ident!("{}_mut", field.name);

    let common = quote! {
        pub fn #has(&self) -> bool {
            self.#ident.is_some()
        }

        pub fn #clear(&mut self) {
            self.#ident = None;
        }
    };

    if field.repeated {
        let elem_ty = if field.kind.is_message_like() {
            let ty = field.message_ty.as_ref().unwrap();
            quote!(#ty)
        } else {
            scalar_slot_ty(field.kind)
        };
        return quote! {
            pub fn #ident(&self) -> &[#elem_ty] {
                self.#ident.as_deref().unwrap_or(&[])
            }

            pub fn #setter(&mut self, value: Vec<#elem_ty>) {
                self.#ident = Some(value);
            }

            pub fn #get_mut(&mut self) -> &mut Vec<#elem_ty> {
                self.#ident.get_or_insert_with(Vec::new)
            }

            #common
        };
    }

    if field.kind.is_message_like() {
        let ty = field.message_ty.as_ref().unwrap();
        if field.boxed {
            return quote! {
                pub fn #ident(&self) -> &#ty {
                    self.#ident
                        .as_deref()
                        .unwrap_or_else(|| <#ty as tagwire_core::message::Message>::default_instance())
                }

                pub fn #setter(&mut self, value: #ty) {
                    self.#ident = Some(Box::new(value));
                }

                pub fn #get_mut(&mut self) -> &mut #ty {
                    &mut **self.#ident.get_or_insert_with(Default::default)
                }

                #common
            };
        }
        return quote! {
            pub fn #ident(&self) -> &#ty {
                self.#ident
                    .as_ref()
                    .unwrap_or_else(|| <#ty as tagwire_core::message::Message>::default_instance())
            }

            pub fn #setter(&mut self, value: #ty) {
                self.#ident = Some(value);
            }

            pub fn #get_mut(&mut self) -> &mut #ty {
                self.#ident.get_or_insert_with(Default::default)
            }

            #common
        };
    }

    let default = getter_default(field);
    match field.kind {
        Kind::String => quote! {
            pub fn #ident(&self) -> &str {
                self.#ident.as_deref().unwrap_or(#default)
            }

            pub fn #setter(&mut self, value: impl Into<String>) {
                self.#ident = Some(value.into());
            }

            pub fn #get_mut(&mut self) -> &mut String {
                self.#ident.get_or_insert_with(|| String::from(#default))
            }

            #common
        },
        Kind::Bytes => quote! {
            pub fn #ident(&self) -> &[u8] {
                self.#ident.as_deref().unwrap_or(#default)
            }

            pub fn #setter(&mut self, value: Vec<u8>) {
                self.#ident = Some(value);
            }

            pub fn #get_mut(&mut self) -> &mut Vec<u8> {
                self.#ident.get_or_insert_with(|| #default.to_vec())
            }

            #common
        },
        _ => {
            let ty = scalar_slot_ty(field.kind);
            quote! {
                pub fn #ident(&self) -> #ty {
                    self.#ident.unwrap_or(#default)
                }

                pub fn #setter(&mut self, value: #ty) {
                    self.#ident = Some(value);
                }

                #common
            }
        }
    }
}

pub fn gen_accessors(meta: &MessageMeta) -> TokenStream {
    let ident = &meta.ident;
    let accessors = meta.fields.iter().map(field_accessors);
    quote! {
        impl #ident {
            #(#accessors)*
        }
    }
}

pub fn gen_display(meta: &MessageMeta) -> TokenStream {
    let ident = &meta.ident;
    quote! {
        impl std::fmt::Display for #ident {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&tagwire_core::message::Message::inspect(self))
            }
        }
    }
}
