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

use tagwire_core::descriptor::DefaultValue;
use tagwire_core::message::Message;
use tagwire_core::unknown::UnknownFieldSet;
use tagwire_derive::Message;

#[derive(Message, Clone, PartialEq, Default, Debug)]
#[tagwire(package = "test", name = "Defaults")]
struct Defaults {
    #[tagwire(tag = 1, int32, default = 42)]
    answer: Option<i64>,
    #[tagwire(tag = 2, string, default = "hello")]
    greeting: Option<String>,
    #[tagwire(tag = 3, bool, default = true)]
    enabled: Option<bool>,
    #[tagwire(tag = 4, double, default = 1.5)]
    ratio: Option<f64>,
    #[tagwire(tag = 5, sint32, default = -7)]
    offset: Option<i64>,
    #[tagwire(tag = 6, enumeration)]
    color: Option<i64>,
    #[tagwire(tag = 7, bytes)]
    blob: Option<Vec<u8>>,
    unknown_fields: UnknownFieldSet,
}

#[test]
fn getters_fall_back_to_schema_defaults() {
    let msg = Defaults::default();
    assert_eq!(msg.answer(), 42);
    assert_eq!(msg.greeting(), "hello");
    assert!(msg.enabled());
    assert_eq!(msg.ratio(), 1.5);
    assert_eq!(msg.offset(), -7);
    assert_eq!(msg.color(), 0);
    assert_eq!(msg.blob(), b"");
}

#[test]
fn defaults_are_never_emitted_for_unset_fields() {
    let msg = Defaults::default();
    assert!(msg.serialize().is_empty());
}

#[test]
fn explicitly_assigned_defaults_are_emitted() {
    let mut msg = Defaults::default();
    msg.set_answer(42);
    assert!(msg.has_answer());
    assert_eq!(msg.serialize(), vec![0x08, 0x2A]);

    let parsed = Defaults::parse(&msg.serialize()).unwrap();
    assert!(parsed.has_answer());
    assert_eq!(parsed.answer(), 42);
}

#[test]
fn clearing_restores_the_schema_default() {
    let mut msg = Defaults::default();
    msg.set_greeting("other");
    assert_eq!(msg.greeting(), "other");
    msg.clear_greeting();
    assert_eq!(msg.greeting(), "hello");
    assert!(!msg.has_greeting());
}

#[test]
fn mut_accessor_starts_from_the_schema_default() {
    let mut msg = Defaults::default();
    msg.greeting_mut().push_str(", world");
    assert_eq!(msg.greeting(), "hello, world");
    assert!(msg.has_greeting());
}

#[test]
fn descriptor_records_the_defaults() {
    let descriptor = Defaults::descriptor();
    assert_eq!(
        descriptor.field_by_name("answer").unwrap().default(),
        DefaultValue::Int(42)
    );
    assert_eq!(
        descriptor.field_by_name("greeting").unwrap().default(),
        DefaultValue::Str("hello")
    );
    assert_eq!(
        descriptor.field_by_name("enabled").unwrap().default(),
        DefaultValue::Bool(true)
    );
}

#[test]
fn enum_fields_travel_as_varints() {
    let mut msg = Defaults::default();
    msg.set_color(3);
    assert_eq!(msg.serialize(), vec![0x30, 0x03]);
    assert_eq!(Defaults::parse(&msg.serialize()).unwrap().color(), 3);
}

#[test]
fn bytes_fields_round_trip() {
    let mut msg = Defaults::default();
    msg.set_blob(vec![0x00, 0xFF, 0x7F]);
    let parsed = Defaults::parse(&msg.serialize()).unwrap();
    assert_eq!(parsed.blob(), &[0x00, 0xFF, 0x7F]);
}
