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

use tagwire_core::error::Error;
use tagwire_core::message::Message;
use tagwire_core::unknown::UnknownFieldSet;
use tagwire_derive::Message;

#[derive(Message, Clone, PartialEq, Default, Debug)]
#[tagwire(package = "test", name = "Ranges")]
struct Ranges {
    #[tagwire(tag = 1, int32)]
    id: Option<i64>,
    #[tagwire(tag = 2, int64)]
    field_64: Option<i64>,
    #[tagwire(tag = 3, uint32)]
    small: Option<u64>,
    #[tagwire(tag = 4, int32, repeated)]
    ids: Option<Vec<i64>>,
    unknown_fields: UnknownFieldSet,
}

#[derive(Message, Clone, PartialEq, Default, Debug)]
#[tagwire(package = "test", name = "Wrapper")]
struct Wrapper {
    #[tagwire(tag = 1, message)]
    ranges: Option<Ranges>,
    unknown_fields: UnknownFieldSet,
}

#[test]
fn int32_in_range_passes() {
    let mut m = Ranges::default();
    m.set_id(999);
    m.validate().unwrap();

    m.set_id(i32::MAX as i64);
    m.validate().unwrap();
    m.set_id(i32::MIN as i64);
    m.validate().unwrap();
}

#[test]
fn int32_out_of_range_fails() {
    let mut m = Ranges::default();
    m.set_id(1 << 31);
    assert!(matches!(m.validate(), Err(Error::RangeViolation(_))));

    m.set_id((1 << 31) - 1);
    m.validate().unwrap();

    m.set_id(-(1 << 31) - 1);
    assert!(matches!(m.validate(), Err(Error::RangeViolation(_))));
}

#[test]
fn int64_extremes_pass() {
    let mut m = Ranges::default();
    m.set_field_64(i64::MAX);
    m.validate().unwrap();
    m.set_field_64(i64::MIN);
    m.validate().unwrap();
}

#[test]
fn uint32_out_of_range_fails() {
    let mut m = Ranges::default();
    m.set_small(u32::MAX as u64);
    m.validate().unwrap();

    m.set_small(u32::MAX as u64 + 1);
    assert!(matches!(m.validate(), Err(Error::RangeViolation(_))));
}

#[test]
fn repeated_elements_are_each_checked() {
    let mut m = Ranges::default();
    m.set_ids(vec![1, 2, 3]);
    m.validate().unwrap();

    m.set_ids(vec![1, 1 << 31, 3]);
    assert!(matches!(m.validate(), Err(Error::RangeViolation(_))));
}

#[test]
fn unset_fields_are_not_checked() {
    let m = Ranges::default();
    m.validate().unwrap();
}

#[test]
fn validation_recurses_into_present_sub_messages() {
    let mut w = Wrapper::default();
    w.validate().unwrap();

    w.ranges_mut().set_id(1 << 31);
    assert!(matches!(w.validate(), Err(Error::RangeViolation(_))));

    w.ranges_mut().set_id(1);
    w.validate().unwrap();
}

#[test]
fn serialization_never_range_checks() {
    let mut m = Ranges::default();
    m.set_id(1 << 31);

    // Out-of-range values encode with wraparound bit patterns.
    let bytes = m.serialize();
    let parsed = Ranges::parse(&bytes).unwrap();
    assert_eq!(parsed.id(), i32::MIN as i64);
}

#[test]
fn validation_does_not_mutate() {
    let mut m = Ranges::default();
    m.set_id(1 << 31);
    let before = m.clone();
    let _ = m.validate();
    assert_eq!(m, before);
}
