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

use tagwire_core::message::Message;
use tagwire_core::unknown::UnknownFieldSet;
use tagwire_core::wire::WireType;
use tagwire_derive::Message;

// The same wire schema seen by two processes: `New` knows every field,
// `Old` predates tags 3 and 7.
#[derive(Message, Clone, PartialEq, Default, Debug)]
#[tagwire(package = "evolve", name = "Item")]
struct New {
    #[tagwire(tag = 1, int32)]
    id: Option<i64>,
    #[tagwire(tag = 3, string)]
    note: Option<String>,
    #[tagwire(tag = 7, uint64)]
    stamp: Option<u64>,
    unknown_fields: UnknownFieldSet,
}

#[derive(Message, Clone, PartialEq, Default, Debug)]
#[tagwire(package = "evolve", name = "Item")]
struct Old {
    #[tagwire(tag = 1, int32)]
    id: Option<i64>,
    unknown_fields: UnknownFieldSet,
}

fn new_item_bytes() -> Vec<u8> {
    let mut item = New::default();
    item.set_id(7);
    item.set_note("keep me");
    item.set_stamp(99);
    item.serialize()
}

#[test]
fn unrecognized_tags_are_captured_in_order() {
    let old = Old::parse(&new_item_bytes()).unwrap();
    assert_eq!(old.id(), 7);

    let captured: Vec<(u32, WireType)> = old
        .unknown_fields()
        .iter()
        .map(|f| (f.tag, f.wire_type))
        .collect();
    assert_eq!(
        captured,
        vec![(3, WireType::LengthDelimited), (7, WireType::Varint)]
    );
}

#[test]
fn reserialization_is_byte_identical() {
    let bytes = new_item_bytes();
    let old = Old::parse(&bytes).unwrap();
    assert_eq!(old.serialize(), bytes);
}

#[test]
fn unknown_fields_survive_mutation_of_known_fields() {
    let old = Old::parse(&new_item_bytes()).unwrap();
    let mut old = old;
    old.set_id(8);

    let upgraded = New::parse(&old.serialize()).unwrap();
    assert_eq!(upgraded.id(), 8);
    assert_eq!(upgraded.note(), "keep me");
    assert_eq!(upgraded.stamp(), 99);
    assert!(upgraded.unknown_fields().is_empty());
}

#[test]
fn unknown_payloads_keep_their_relative_order() {
    let old = Old::parse(&new_item_bytes()).unwrap();
    let reserialized = old.serialize();

    // Known field first, then tag 3 and tag 7 exactly as first seen.
    let tail = &reserialized[2..];
    assert_eq!(tail[0], 0x1A);
    let note_len = tail[1] as usize;
    assert_eq!(&tail[2..2 + note_len], b"keep me");
    assert_eq!(tail[2 + note_len], 0x38);
}

#[test]
fn unknown_fields_affect_equality() {
    let with_unknown = Old::parse(&new_item_bytes()).unwrap();
    let mut without = Old::default();
    without.set_id(7);
    assert_ne!(with_unknown, without);
}

#[test]
fn nested_unknown_fields_round_trip() {
    #[derive(Message, Clone, PartialEq, Default, Debug)]
    #[tagwire(package = "evolve", name = "Holder")]
    struct Holder {
        #[tagwire(tag = 2, message)]
        item: Option<Old>,
        unknown_fields: UnknownFieldSet,
    }

    let mut bytes = Vec::new();
    let inner = new_item_bytes();
    bytes.push(0x12);
    bytes.push(inner.len() as u8);
    bytes.extend_from_slice(&inner);

    let holder = Holder::parse(&bytes).unwrap();
    assert!(!holder.item().unknown_fields().is_empty());
    assert_eq!(holder.serialize(), bytes);
}
