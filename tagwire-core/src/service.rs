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

//! Immutable service and RPC method descriptors.
//!
//! These carry the data shape of a service definition only: method names,
//! wire names and request/response message types. Invocation semantics
//! belong to a transport layer, not to this crate. Descriptors are built
//! once at initialization and expose no mutators; two [`RpcDescriptor`]s
//! compare equal only when they are the same definition, not when they
//! happen to carry equal field values.

use crate::descriptor::{DescriptorFn, MessageDescriptor};
use crate::message::Message;

/// Thunk returning the owning service. Lazy so an RPC can point back at the
/// service that is being constructed around it.
pub type ServiceFn = fn() -> &'static ServiceDescriptor;

/// One RPC method: snake-case name, schema wire name, and the request and
/// response message types.
#[derive(Clone, Debug)]
pub struct RpcDescriptor {
    name: &'static str,
    wire_name: &'static str,
    request: DescriptorFn,
    response: DescriptorFn,
    service: ServiceFn,
}

impl RpcDescriptor {
    pub fn new<Req: Message, Res: Message>(
        name: &'static str,
        wire_name: &'static str,
        service: ServiceFn,
    ) -> RpcDescriptor {
        RpcDescriptor {
            name,
            wire_name,
            request: Req::descriptor,
            response: Res::descriptor,
            service,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn wire_name(&self) -> &'static str {
        self.wire_name
    }

    pub fn request_type(&self) -> &'static MessageDescriptor {
        (self.request)()
    }

    pub fn response_type(&self) -> &'static MessageDescriptor {
        (self.response)()
    }

    pub fn service(&self) -> &'static ServiceDescriptor {
        (self.service)()
    }
}

/// Definition-site identity: an RPC equals itself and nothing else.
impl PartialEq for RpcDescriptor {
    fn eq(&self, other: &RpcDescriptor) -> bool {
        std::ptr::eq(self, other)
    }
}

impl Eq for RpcDescriptor {}

/// A named group of RPC methods.
#[derive(Clone, Debug)]
pub struct ServiceDescriptor {
    full_name: String,
    rpcs: Vec<RpcDescriptor>,
}

impl ServiceDescriptor {
    pub fn new(full_name: impl Into<String>, rpcs: Vec<RpcDescriptor>) -> ServiceDescriptor {
        ServiceDescriptor {
            full_name: full_name.into(),
            rpcs,
        }
    }

    /// Dot-separated fully-qualified service name.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Methods in definition order.
    pub fn rpcs(&self) -> &[RpcDescriptor] {
        &self.rpcs
    }

    pub fn rpc_by_name(&self, name: &str) -> Option<&RpcDescriptor> {
        self.rpcs.iter().find(|rpc| rpc.name == name)
    }
}
