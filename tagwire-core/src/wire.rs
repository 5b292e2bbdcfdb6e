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

//! Tag keys and wire types.
//!
//! A field on the wire is framed as a varint key `(tag << 3) | wire_type`
//! followed by a wire-type-shaped value. [`skip_value`] consumes one value
//! using the wire type alone, which is all that is known for fields missing
//! from the descriptor table.

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::buffer::{Reader, Writer};
use crate::error::Error;

/// Highest permitted field tag: 2^29 - 1.
pub const MAX_TAG: u32 = (1 << 29) - 1;

/// Tag range reserved by the wire format, inclusive.
pub const RESERVED_TAGS: (u32, u32) = (19_000, 19_999);

/// The 3-bit framing code carried in every tag key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum WireType {
    Varint = 0,
    Fixed64 = 1,
    LengthDelimited = 2,
    StartGroup = 3,
    EndGroup = 4,
    Fixed32 = 5,
}

#[inline]
pub fn make_key(tag: u32, wire_type: WireType) -> u32 {
    (tag << 3) | u8::from(wire_type) as u32
}

/// Split a key into tag and wire type. Tag 0 and wire codes 6/7 never occur
/// in well-formed streams.
pub fn split_key(key: u32) -> Result<(u32, WireType), Error> {
    let tag = key >> 3;
    if tag == 0 {
        return Err(Error::malformed_wire("field tag 0 is not allowed"));
    }
    let wire_type = WireType::try_from((key & 0x7) as u8)
        .map_err(|_| Error::malformed_wire(format!("invalid wire type code {}", key & 0x7)))?;
    Ok((tag, wire_type))
}

pub fn write_key(writer: &mut Writer, tag: u32, wire_type: WireType) {
    writer.write_varuint32(make_key(tag, wire_type));
}

pub fn read_key(reader: &mut Reader) -> Result<(u32, WireType), Error> {
    let key = reader.read_varuint32()?;
    split_key(key)
}

/// Consume one value of the given wire type without interpreting it.
///
/// Groups recurse until the matching end-group key; `depth` bounds that
/// recursion so a hostile stream cannot blow the stack.
pub fn skip_value(reader: &mut Reader, wire_type: WireType, depth: u32) -> Result<(), Error> {
    match wire_type {
        WireType::Varint => {
            reader.read_varuint64()?;
            Ok(())
        }
        WireType::Fixed64 => reader.skip(8),
        WireType::Fixed32 => reader.skip(4),
        WireType::LengthDelimited => {
            let len = reader.read_varuint64()? as usize;
            reader.skip(len)
        }
        WireType::StartGroup => {
            if depth == 0 {
                return Err(Error::depth_exceeded());
            }
            loop {
                let (_, nested_wire) = read_key(reader)?;
                if nested_wire == WireType::EndGroup {
                    return Ok(());
                }
                skip_value(reader, nested_wire, depth - 1)?;
            }
        }
        WireType::EndGroup => Err(Error::malformed_wire("unexpected end-group key")),
    }
}
