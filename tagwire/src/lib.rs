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

//! # Tagwire
//!
//! Tagwire is a schema-driven serialization runtime for the protocol-buffer
//! binary wire format. Message types are ordinary Rust structs annotated
//! with field tags and kinds; `#[derive(Message)]` generates the descriptor
//! table, codec hooks and accessors, and the runtime provides byte-exact
//! encoding, presence tracking, unknown-field preservation and explicit
//! validation.
//!
//! ## Declaring and using a message
//!
//! ```rust
//! use tagwire::{Message, UnknownFieldSet};
//!
//! #[derive(Message, Clone, PartialEq, Default, Debug)]
//! #[tagwire(package = "simple", name = "Test1")]
//! pub struct Test1 {
//!     #[tagwire(tag = 1, int32)]
//!     id: Option<i64>,
//!     #[tagwire(tag = 4, string)]
//!     test_field: Option<String>,
//!     unknown_fields: UnknownFieldSet,
//! }
//!
//! # fn main() -> Result<(), tagwire::Error> {
//! let mut message = Test1::default();
//! assert!(!message.has_id());
//! assert_eq!(message.id(), 0);
//!
//! message.set_id(4096);
//! message.set_test_field("zomgkittenz");
//!
//! let bytes = message.serialize();
//! let parsed = Test1::parse(&bytes)?;
//! assert_eq!(parsed, message);
//! # Ok(())
//! # }
//! ```
//!
//! ## Presence
//!
//! Every field tracks whether it was explicitly assigned, independently of
//! its current value. Unset fields read as their declared default and are
//! omitted from the wire; `clear_<field>` unsets again. Reading an unset
//! nested message yields a shared default instance, while the `_mut`
//! accessor chain materializes defaults in place and marks each level
//! present:
//!
//! ```rust,ignore
//! let mut a = A::default();
//! a.sub2_mut().subsub1_mut().set_payload("ohai");
//! assert!(a.has_sub2());
//! ```
//!
//! ## Unknown fields
//!
//! Tags not present in the descriptor table are captured byte-exactly in
//! encounter order and replayed on re-serialization, so passing a message
//! through a process built against an older schema loses nothing.
//!
//! ## Construction from field maps
//!
//! [`Message::from_pairs`] populates a fresh instance from
//! field-name/value pairs and rejects unknown names or mistyped values
//! with [`Error::TypeViolation`]:
//!
//! ```rust,ignore
//! let message = Test1::from_pairs([
//!     ("id", Value::from(7i64)),
//!     ("test_field", Value::from("hello")),
//! ])?;
//! ```
//!
//! ## Validation
//!
//! Serialization never range-checks; [`Message::validate`] is the explicit
//! opt-in pass that checks every present field against its kind's declared
//! numeric range and recurses into nested messages.

pub use tagwire_core::buffer;
pub use tagwire_core::codec;
pub use tagwire_core::config;
pub use tagwire_core::descriptor;
pub use tagwire_core::error;
pub use tagwire_core::message;
pub use tagwire_core::registry;
pub use tagwire_core::service;
pub use tagwire_core::unknown;
pub use tagwire_core::value;
pub use tagwire_core::wire;

pub use tagwire_core::{Error, Message, ParseConfig, UnknownFieldSet, Value, WireType};
pub use tagwire_derive::Message;
