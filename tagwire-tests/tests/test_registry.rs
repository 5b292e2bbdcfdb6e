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
use tagwire_core::registry;
use tagwire_core::unknown::UnknownFieldSet;
use tagwire_derive::Message;

#[derive(Message, Clone, PartialEq, Default, Debug)]
#[tagwire(package = "simple", name = "Test1")]
struct Test1 {
    #[tagwire(tag = 1, string)]
    test_field: Option<String>,
    unknown_fields: UnknownFieldSet,
}

#[derive(Message, Clone, PartialEq, Default, Debug)]
#[tagwire(name = "Bare")]
struct Bare {
    #[tagwire(tag = 1, bool)]
    flag: Option<bool>,
    unknown_fields: UnknownFieldSet,
}

#[test]
fn finds_a_type_by_its_fully_qualified_name() {
    registry::register::<Test1>();
    let found = registry::find("simple.Test1").unwrap();
    assert!(std::ptr::eq(found, Test1::descriptor()));
}

#[test]
fn finds_nothing_for_an_invalid_name() {
    registry::register::<Test1>();
    assert!(registry::find("simple.Test1xxxxxx").is_none());
}

#[test]
fn unpackaged_types_register_under_their_bare_name() {
    registry::register::<Bare>();
    let found = registry::find("Bare").unwrap();
    assert!(std::ptr::eq(found, Bare::descriptor()));
}

#[test]
fn repeated_registration_is_idempotent() {
    registry::register::<Test1>();
    registry::register::<Test1>();
    let found = registry::find("simple.Test1").unwrap();
    assert!(std::ptr::eq(found, Test1::descriptor()));
}

#[test]
fn concurrent_lookups_are_safe() {
    registry::register::<Test1>();
    let handles: Vec<_> = (0..8)
        .map(|_| {
            std::thread::spawn(|| {
                for _ in 0..100 {
                    assert!(registry::find("simple.Test1").is_some());
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}
