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

//! # Tagwire Core
//!
//! This is the core implementation of the tagwire serialization framework:
//! a message runtime and codec for the protocol-buffer binary wire format,
//! driven by per-type descriptor tables that generated code provides.
//!
//! ## Architecture
//!
//! - **`buffer`**: binary Reader/Writer with varint and zigzag coding
//! - **`wire`**: tag keys, wire types and wire-type-only skipping
//! - **`codec`**: per-kind field encoders/decoders used by generated code
//! - **`descriptor`**: static per-message-type field metadata
//! - **`message`**: the `Message` trait and the serialize/parse engine
//! - **`unknown`**: byte-exact preservation of unrecognized fields
//! - **`value`**: dynamically typed values for mapping-based construction
//! - **`registry`**: process-wide name-to-descriptor lookup
//! - **`service`**: immutable service/RPC method descriptors
//! - **`config`**: parse limits for untrusted input
//! - **`error`**: error handling
//!
//! ## Key concepts
//!
//! Every field of a message carries a presence bit distinct from its value:
//! an unset field reads as its default but is never emitted on the wire,
//! and setting a field to its default explicitly still marks it present.
//! Fields whose tags are not in the descriptor table survive a
//! parse/serialize round trip byte for byte.
//!
//! The codec is reentrant and allocation-lean: serialize and parse take no
//! locks and touch no global state, so independent message instances can be
//! processed on as many threads as desired. A single instance must not be
//! mutated concurrently.
//!
//! ## Usage
//!
//! This crate is typically used through the higher-level `tagwire` crate,
//! which provides the derive macro and a more convenient API surface.

pub mod buffer;
pub mod codec;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod message;
pub mod registry;
pub mod service;
pub mod unknown;
pub mod value;
pub mod wire;

pub use config::ParseConfig;
pub use error::Error;
pub use message::Message;
pub use unknown::UnknownFieldSet;
pub use value::Value;
pub use wire::WireType;
