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

//! Per-kind field encoders and decoders called by generated message code.
//!
//! The write side is total: out-of-range slot values are encoded with
//! truncated bit patterns, never rejected (range enforcement belongs to
//! explicit validation). The read side checks the declared wire type against
//! what the stream actually carries and fails hard on disagreement, except
//! that packable repeated kinds also accept a packed length-delimited run.

use crate::buffer::{Reader, Writer};
use crate::error::Error;
use crate::message::{self, Message};
use crate::wire::{self, WireType};

#[inline]
fn expect_wire(field: &'static str, declared: WireType, found: WireType) -> Result<(), Error> {
    if declared != found {
        return Err(Error::malformed_wire(format!(
            "field `{}` declared {:?} but stream carries {:?}",
            field, declared, found
        )));
    }
    Ok(())
}

// --- write side -------------------------------------------------------------

pub fn write_int32(writer: &mut Writer, tag: u32, value: i64) {
    wire::write_key(writer, tag, WireType::Varint);
    // Truncate to 32 bits, then sign-extend: negatives take the 10-byte form.
    writer.write_varuint64(((value as i32) as i64) as u64);
}

pub fn write_int64(writer: &mut Writer, tag: u32, value: i64) {
    wire::write_key(writer, tag, WireType::Varint);
    writer.write_varuint64(value as u64);
}

pub fn write_uint32(writer: &mut Writer, tag: u32, value: u64) {
    wire::write_key(writer, tag, WireType::Varint);
    writer.write_varuint64((value as u32) as u64);
}

pub fn write_uint64(writer: &mut Writer, tag: u32, value: u64) {
    wire::write_key(writer, tag, WireType::Varint);
    writer.write_varuint64(value);
}

pub fn write_sint32(writer: &mut Writer, tag: u32, value: i64) {
    wire::write_key(writer, tag, WireType::Varint);
    writer.write_varint32(value as i32);
}

pub fn write_sint64(writer: &mut Writer, tag: u32, value: i64) {
    wire::write_key(writer, tag, WireType::Varint);
    writer.write_varint64(value);
}

pub fn write_bool(writer: &mut Writer, tag: u32, value: bool) {
    wire::write_key(writer, tag, WireType::Varint);
    writer.write_u8(value as u8);
}

pub fn write_double(writer: &mut Writer, tag: u32, value: f64) {
    wire::write_key(writer, tag, WireType::Fixed64);
    writer.write_f64(value);
}

pub fn write_float(writer: &mut Writer, tag: u32, value: f32) {
    wire::write_key(writer, tag, WireType::Fixed32);
    writer.write_f32(value);
}

pub fn write_string(writer: &mut Writer, tag: u32, value: &str) {
    write_bytes(writer, tag, value.as_bytes());
}

pub fn write_bytes(writer: &mut Writer, tag: u32, value: &[u8]) {
    wire::write_key(writer, tag, WireType::LengthDelimited);
    writer.write_varuint64(value.len() as u64);
    writer.write_bytes(value);
}

pub fn write_message<M: Message>(writer: &mut Writer, tag: u32, message: &M) {
    let body = message.serialize();
    wire::write_key(writer, tag, WireType::LengthDelimited);
    writer.write_varuint64(body.len() as u64);
    writer.write_bytes(&body);
}

pub fn write_group<M: Message>(writer: &mut Writer, tag: u32, message: &M) {
    wire::write_key(writer, tag, WireType::StartGroup);
    message.write_fields(writer);
    message.unknown_fields().write_to(writer);
    wire::write_key(writer, tag, WireType::EndGroup);
}

// --- read side: bare values, no wire-type check -----------------------------

pub fn read_int32_value(reader: &mut Reader) -> Result<i64, Error> {
    Ok(((reader.read_varuint64()? as i64) as i32) as i64)
}

pub fn read_int64_value(reader: &mut Reader) -> Result<i64, Error> {
    Ok(reader.read_varuint64()? as i64)
}

pub fn read_uint32_value(reader: &mut Reader) -> Result<u64, Error> {
    Ok((reader.read_varuint64()? as u32) as u64)
}

pub fn read_uint64_value(reader: &mut Reader) -> Result<u64, Error> {
    reader.read_varuint64()
}

pub fn read_sint32_value(reader: &mut Reader) -> Result<i64, Error> {
    Ok(reader.read_varint32()? as i64)
}

pub fn read_sint64_value(reader: &mut Reader) -> Result<i64, Error> {
    reader.read_varint64()
}

pub fn read_bool_value(reader: &mut Reader) -> Result<bool, Error> {
    Ok(reader.read_varuint64()? != 0)
}

pub fn read_double_value(reader: &mut Reader) -> Result<f64, Error> {
    reader.read_f64()
}

pub fn read_float_value(reader: &mut Reader) -> Result<f32, Error> {
    reader.read_f32()
}

// --- read side: singular fields with declared-wire-type check ---------------

pub fn read_int32(reader: &mut Reader, found: WireType, field: &'static str) -> Result<i64, Error> {
    expect_wire(field, WireType::Varint, found)?;
    read_int32_value(reader)
}

pub fn read_int64(reader: &mut Reader, found: WireType, field: &'static str) -> Result<i64, Error> {
    expect_wire(field, WireType::Varint, found)?;
    read_int64_value(reader)
}

pub fn read_uint32(reader: &mut Reader, found: WireType, field: &'static str) -> Result<u64, Error> {
    expect_wire(field, WireType::Varint, found)?;
    read_uint32_value(reader)
}

pub fn read_uint64(reader: &mut Reader, found: WireType, field: &'static str) -> Result<u64, Error> {
    expect_wire(field, WireType::Varint, found)?;
    read_uint64_value(reader)
}

pub fn read_sint32(reader: &mut Reader, found: WireType, field: &'static str) -> Result<i64, Error> {
    expect_wire(field, WireType::Varint, found)?;
    read_sint32_value(reader)
}

pub fn read_sint64(reader: &mut Reader, found: WireType, field: &'static str) -> Result<i64, Error> {
    expect_wire(field, WireType::Varint, found)?;
    read_sint64_value(reader)
}

pub fn read_bool(reader: &mut Reader, found: WireType, field: &'static str) -> Result<bool, Error> {
    expect_wire(field, WireType::Varint, found)?;
    read_bool_value(reader)
}

pub fn read_double(reader: &mut Reader, found: WireType, field: &'static str) -> Result<f64, Error> {
    expect_wire(field, WireType::Fixed64, found)?;
    read_double_value(reader)
}

pub fn read_float(reader: &mut Reader, found: WireType, field: &'static str) -> Result<f32, Error> {
    expect_wire(field, WireType::Fixed32, found)?;
    read_float_value(reader)
}

pub fn read_string(
    reader: &mut Reader,
    found: WireType,
    field: &'static str,
) -> Result<String, Error> {
    expect_wire(field, WireType::LengthDelimited, found)?;
    let len = reader.read_varuint64()? as usize;
    let bytes = reader.read_bytes(len)?;
    String::from_utf8(bytes.to_vec()).map_err(|_| Error::invalid_utf8(field))
}

pub fn read_bytes(
    reader: &mut Reader,
    found: WireType,
    field: &'static str,
) -> Result<Vec<u8>, Error> {
    expect_wire(field, WireType::LengthDelimited, found)?;
    let len = reader.read_varuint64()? as usize;
    Ok(reader.read_bytes(len)?.to_vec())
}

/// Decode an embedded message: length prefix, then the sub-bytes handed to a
/// fresh instance of the nested type.
pub fn read_message<M: Message>(
    reader: &mut Reader,
    found: WireType,
    depth: u32,
    field: &'static str,
) -> Result<M, Error> {
    expect_wire(field, WireType::LengthDelimited, found)?;
    if depth == 0 {
        return Err(Error::depth_exceeded());
    }
    let len = reader.read_varuint64()? as usize;
    let bytes = reader.read_bytes(len)?;
    let mut sub = Reader::new(bytes);
    let mut message = M::default();
    message::merge_from_reader(&mut message, &mut sub, depth - 1)?;
    Ok(message)
}

/// Decode a group: fields up to the matching end-group key.
pub fn read_group<M: Message>(
    reader: &mut Reader,
    found: WireType,
    group_tag: u32,
    depth: u32,
    field: &'static str,
) -> Result<M, Error> {
    expect_wire(field, WireType::StartGroup, found)?;
    if depth == 0 {
        return Err(Error::depth_exceeded());
    }
    let mut message = M::default();
    loop {
        let (tag, nested_wire) = wire::read_key(reader)?;
        if nested_wire == WireType::EndGroup {
            if tag != group_tag {
                return Err(Error::malformed_wire(format!(
                    "field `{}`: end-group tag {} does not match start tag {}",
                    field, tag, group_tag
                )));
            }
            return Ok(message);
        }
        message::dispatch_field(&mut message, tag, nested_wire, reader, depth - 1)?;
    }
}

/// Merge one wire occurrence of a repeated scalar field. A packed run (one
/// length-delimited blob of back-to-back values) appends every element it
/// contains; otherwise a single element of the declared wire type is read.
pub fn merge_repeated<T>(
    out: &mut Vec<T>,
    reader: &mut Reader,
    found: WireType,
    declared: WireType,
    field: &'static str,
    elem: fn(&mut Reader) -> Result<T, Error>,
) -> Result<(), Error> {
    if found == WireType::LengthDelimited && declared != WireType::LengthDelimited {
        let len = reader.read_varuint64()? as usize;
        let bytes = reader.read_bytes(len)?;
        let mut sub = Reader::new(bytes);
        while !sub.is_empty() {
            out.push(elem(&mut sub)?);
        }
        return Ok(());
    }
    expect_wire(field, declared, found)?;
    out.push(elem(reader)?);
    Ok(())
}
