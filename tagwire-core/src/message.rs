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

//! The [`Message`] trait: the contract between the runtime and generated
//! message types, plus the serialize/parse engine.
//!
//! Serialization is a single linear pass over the descriptor table: present
//! fields in descriptor order, then unknown fields in encounter order.
//! Parsing loops over tag keys until the input is exhausted, routing known
//! tags into typed slots and unknown tags into the opaque store. Both are
//! synchronous, CPU-bound and reentrant; a message instance must not be
//! mutated from two threads at once, but independent instances can be
//! processed in parallel since descriptor tables are read-only after
//! initialization.

use crate::buffer::{Reader, Writer};
use crate::config::ParseConfig;
use crate::descriptor::MessageDescriptor;
use crate::error::Error;
use crate::unknown::UnknownFieldSet;
use crate::value::Value;
use crate::wire::{self, WireType};

/// A generated message type.
///
/// The required methods are produced by `#[derive(Message)]`; calling code
/// uses the provided [`serialize`](Message::serialize) /
/// [`parse`](Message::parse) / [`from_pairs`](Message::from_pairs) surface
/// together with the generated per-field accessors.
pub trait Message: Clone + Default + PartialEq + std::fmt::Debug + 'static {
    /// Static descriptor table for this message type, built once and shared
    /// by every instance.
    fn descriptor() -> &'static MessageDescriptor;

    /// Shared default instance, handed out by singular-message getters for
    /// unset fields. Reading through it never flips a presence bit; the
    /// mutable accessors materialize a private copy instead.
    fn default_instance() -> &'static Self;

    fn unknown_fields(&self) -> &UnknownFieldSet;

    fn unknown_fields_mut(&mut self) -> &mut UnknownFieldSet;

    /// Emit every present known field, in descriptor order.
    fn write_fields(&self, writer: &mut Writer);

    /// Route one wire occurrence of `tag` into its slot, setting presence.
    /// Returns `Ok(false)` when the tag is not in the descriptor table.
    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: WireType,
        reader: &mut Reader,
        depth: u32,
    ) -> Result<bool, Error>;

    /// Assign one field by name from a dynamically typed [`Value`].
    /// A null value clears presence and restores the default.
    fn set_field(&mut self, name: &str, value: Value) -> Result<(), Error>;

    /// Check every present field against its kind's declared range,
    /// recursing into present nested messages. Never mutates, and never
    /// runs implicitly during access or serialization.
    fn validate(&self) -> Result<(), Error>;

    /// Append a human-readable rendering of the present fields.
    fn render(&self, out: &mut String);

    /// Serialize to the binary wire format.
    fn serialize(&self) -> Vec<u8> {
        let mut writer = Writer::default();
        self.write_fields(&mut writer);
        self.unknown_fields().write_to(&mut writer);
        writer.into_vec()
    }

    /// Parse a fresh instance from wire bytes. Errors are fatal to the
    /// whole call; no partially parsed message is returned.
    fn parse(bytes: &[u8]) -> Result<Self, Error> {
        Self::parse_with(bytes, &ParseConfig::default())
    }

    fn parse_with(bytes: &[u8], config: &ParseConfig) -> Result<Self, Error> {
        let mut reader = Reader::new(bytes);
        let mut message = Self::default();
        merge_from_reader(&mut message, &mut reader, config.max_depth)?;
        Ok(message)
    }

    /// Build an instance from field-name/value pairs, order-independent.
    /// An unrecognized name or a mistyped value fails with `TypeViolation`
    /// and nothing is constructed.
    fn from_pairs<'a, I>(pairs: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (&'a str, Value)>,
    {
        let mut message = Self::default();
        for (name, value) in pairs {
            message.set_field(name, value)?;
        }
        Ok(message)
    }

    /// Human-readable rendering of the present fields only, recursing into
    /// present nested messages. Unset fields are omitted.
    fn inspect(&self) -> String {
        let mut out = String::new();
        self.render(&mut out);
        out
    }
}

/// Drive a parse loop until the reader is exhausted.
pub fn merge_from_reader<M: Message>(
    message: &mut M,
    reader: &mut Reader,
    depth: u32,
) -> Result<(), Error> {
    while !reader.is_empty() {
        let (tag, wire_type) = wire::read_key(reader)?;
        if wire_type == WireType::EndGroup {
            return Err(Error::malformed_wire("end-group key outside any group"));
        }
        dispatch_field(message, tag, wire_type, reader, depth)?;
    }
    Ok(())
}

/// Route one field occurrence: known tags go to the typed slot, unknown
/// tags are skipped by wire type alone and captured byte-exactly.
pub(crate) fn dispatch_field<M: Message>(
    message: &mut M,
    tag: u32,
    wire_type: WireType,
    reader: &mut Reader,
    depth: u32,
) -> Result<(), Error> {
    if message.merge_field(tag, wire_type, reader, depth)? {
        return Ok(());
    }
    let start = reader.cursor();
    wire::skip_value(reader, wire_type, depth)?;
    let bytes = reader.slice_between(start, reader.cursor()).to_vec();
    message.unknown_fields_mut().push(tag, wire_type, bytes);
    Ok(())
}
