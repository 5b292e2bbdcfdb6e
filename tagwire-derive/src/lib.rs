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

//! # Tagwire Derive Macros
//!
//! This crate provides the `#[derive(Message)]` procedural macro for the
//! tagwire serialization framework. It plays the role a schema compiler
//! plays elsewhere: from a struct annotated with field tags and kinds it
//! generates the descriptor table, the wire codec hooks and the accessor
//! surface that the runtime in `tagwire-core` drives.
//!
//! ## Declaring a message
//!
//! ```rust,ignore
//! use tagwire::{Message, UnknownFieldSet};
//!
//! #[derive(Message, Clone, PartialEq, Default, Debug)]
//! #[tagwire(package = "simple", name = "Test1")]
//! pub struct Test1 {
//!     #[tagwire(tag = 1, int32)]
//!     id: Option<i64>,
//!     #[tagwire(tag = 4, string)]
//!     test_field: Option<String>,
//!     #[tagwire(tag = 2, int64, repeated)]
//!     i1: Option<Vec<i64>>,
//!     unknown_fields: UnknownFieldSet,
//! }
//! ```
//!
//! Field slots are `Option`-wrapped so presence is tracked independently of
//! the value: `None` reads as the field default and is omitted from the
//! wire. Every message carries an `unknown_fields: UnknownFieldSet` slot
//! for byte-exact round-tripping of unrecognized tags.
//!
//! ## Field attributes
//!
//! - `tag = N` — wire tag, unique per message, 1..=2^29-1 outside the
//!   reserved 19000..=19999 range.
//! - kind — one of `int32`, `int64`, `uint32`, `uint64`, `sint32`,
//!   `sint64`, `bool`, `double`, `float`, `string`, `bytes`,
//!   `enumeration`, `message`, `group`.
//! - `repeated` — the slot is `Option<Vec<..>>`.
//! - `boxed` — message slots in recursive types, `Option<Box<..>>`.
//! - `default = <lit>` — schema default returned by the getter while the
//!   field is unset.
//!
//! ## Generated code
//!
//! The macro implements `tagwire_core::message::Message` plus, per field,
//! a getter, `set_<f>`, `has_<f>`, `clear_<f>` and `<f>_mut`, and a
//! `Display` impl that renders present fields only.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod message;

/// Derive macro generating the message runtime implementation.
///
/// See the crate-level documentation for the attribute grammar.
#[proc_macro_derive(Message, attributes(tagwire))]
pub fn proc_macro_derive_message(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    message::derive_message(&input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
