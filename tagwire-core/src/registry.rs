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

//! Process-wide registry mapping fully-qualified message names to their
//! descriptors.
//!
//! Registration is an explicit call made once per type during program
//! initialization, so construction order across modules is deterministic.
//! After warm-up the table is only read, and reads take a shared lock.

use std::collections::HashMap;
use std::sync::{OnceLock, PoisonError, RwLock};

use crate::descriptor::MessageDescriptor;
use crate::message::Message;

type Table = RwLock<HashMap<String, &'static MessageDescriptor>>;

fn table() -> &'static Table {
    static TABLE: OnceLock<Table> = OnceLock::new();
    TABLE.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Register a message type under its fully-qualified name. Idempotent: the
/// first registration for a name wins and later calls are no-ops.
pub fn register<M: Message>() {
    register_descriptor(M::descriptor());
}

pub fn register_descriptor(descriptor: &'static MessageDescriptor) {
    let mut map = table().write().unwrap_or_else(PoisonError::into_inner);
    map.entry(descriptor.full_name().to_string())
        .or_insert(descriptor);
}

/// Look up a registered message type by its dotted fully-qualified name.
pub fn find(full_name: &str) -> Option<&'static MessageDescriptor> {
    let map = table().read().unwrap_or_else(PoisonError::into_inner);
    map.get(full_name).copied()
}
