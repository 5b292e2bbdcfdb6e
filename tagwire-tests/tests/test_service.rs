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

use std::sync::OnceLock;

use tagwire_core::message::Message;
use tagwire_core::service::{RpcDescriptor, ServiceDescriptor};
use tagwire_core::unknown::UnknownFieldSet;
use tagwire_derive::Message;

#[derive(Message, Clone, PartialEq, Default, Debug)]
#[tagwire(package = "services", name = "FooRequest")]
struct FooRequest {
    unknown_fields: UnknownFieldSet,
}

#[derive(Message, Clone, PartialEq, Default, Debug)]
#[tagwire(package = "services", name = "FooResponse")]
struct FooResponse {
    unknown_fields: UnknownFieldSet,
}

#[derive(Message, Clone, PartialEq, Default, Debug)]
#[tagwire(package = "services", name = "BarRequest")]
struct BarRequest {
    unknown_fields: UnknownFieldSet,
}

#[derive(Message, Clone, PartialEq, Default, Debug)]
#[tagwire(package = "services", name = "BarResponse")]
struct BarResponse {
    unknown_fields: UnknownFieldSet,
}

fn foo_bar_service() -> &'static ServiceDescriptor {
    static SERVICE: OnceLock<ServiceDescriptor> = OnceLock::new();
    SERVICE.get_or_init(|| {
        ServiceDescriptor::new(
            "services.FooBarService",
            vec![
                RpcDescriptor::new::<FooRequest, FooResponse>("get_foo", "GetFoo", foo_bar_service),
                RpcDescriptor::new::<BarRequest, BarResponse>("get_bar", "GetBar", foo_bar_service),
            ],
        )
    })
}

#[test]
fn service_definitions_carry_their_shape() {
    let service = foo_bar_service();
    assert_eq!(service.full_name(), "services.FooBarService");
    assert_eq!(service.rpcs().len(), 2);

    let get_foo = &service.rpcs()[0];
    assert_eq!(get_foo.name(), "get_foo");
    assert_eq!(get_foo.wire_name(), "GetFoo");
    assert!(std::ptr::eq(get_foo.request_type(), FooRequest::descriptor()));
    assert!(std::ptr::eq(
        get_foo.response_type(),
        FooResponse::descriptor()
    ));
    assert!(std::ptr::eq(get_foo.service(), service));

    let get_bar = &service.rpcs()[1];
    assert_eq!(get_bar.name(), "get_bar");
    assert_eq!(get_bar.wire_name(), "GetBar");
    assert!(std::ptr::eq(get_bar.request_type(), BarRequest::descriptor()));
    assert!(std::ptr::eq(
        get_bar.response_type(),
        BarResponse::descriptor()
    ));
}

#[test]
fn rpc_equality_is_identity() {
    let service = foo_bar_service();
    let get_foo = &service.rpcs()[0];
    let get_bar = &service.rpcs()[1];

    assert_eq!(get_foo, get_foo);
    assert_eq!(get_bar, get_bar);
    assert_ne!(get_foo, get_bar);

    // A value-equal copy from another definition site is a different rpc.
    let copy = RpcDescriptor::new::<FooRequest, FooResponse>("get_foo", "GetFoo", foo_bar_service);
    assert_ne!(get_foo, &copy);
}

#[test]
fn rpc_lookup_by_name() {
    let service = foo_bar_service();
    assert_eq!(service.rpc_by_name("get_bar").unwrap().name(), "get_bar");
    assert!(service.rpc_by_name("get_baz").is_none());
}
