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

//! Opaque storage for fields whose tags are missing from the descriptor
//! table. Entries keep the exact wire image of the value, in first-seen
//! order, so re-serialization replays them byte for byte.

use crate::buffer::Writer;
use crate::wire::{self, WireType};

/// One captured unknown field. `bytes` is the raw value image as it
/// appeared after the tag key; for groups it includes the terminating
/// end-group key.
#[derive(Clone, Debug, PartialEq)]
pub struct UnknownField {
    pub tag: u32,
    pub wire_type: WireType,
    pub bytes: Vec<u8>,
}

/// Append-only set of unknown fields, never interpreted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UnknownFieldSet {
    entries: Vec<UnknownField>,
}

impl UnknownFieldSet {
    pub fn new() -> UnknownFieldSet {
        UnknownFieldSet::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn push(&mut self, tag: u32, wire_type: WireType, bytes: Vec<u8>) {
        self.entries.push(UnknownField {
            tag,
            wire_type,
            bytes,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &UnknownField> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Replay every entry, key plus raw value bytes, in encounter order.
    pub fn write_to(&self, writer: &mut Writer) {
        for entry in &self.entries {
            wire::write_key(writer, entry.tag, entry.wire_type);
            writer.write_bytes(&entry.bytes);
        }
    }
}
