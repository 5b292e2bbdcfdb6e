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

//! Dynamically typed field values for mapping-based message construction.
//!
//! [`Value`] carries whatever a caller hands to
//! [`Message::from_pairs`](crate::message::Message::from_pairs); generated
//! `set_field` code converts it into the field's slot type, failing with
//! `TypeViolation` on any mismatch. Nested messages travel type-erased and
//! are checked for the exact declared type on assignment.

use std::any::Any;
use std::fmt;

use crate::error::Error;

pub enum Value {
    /// Clears presence and restores the field default.
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Double(f64),
    Str(String),
    Bytes(Vec<u8>),
    List(Vec<Value>),
    Message(Box<dyn Any>),
}

impl Value {
    /// Wrap a message instance for assignment to a message-typed field.
    pub fn message<M: Any>(message: M) -> Value {
        Value::Message(Box::new(message))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::UInt(_) => "uint",
            Value::Double(_) => "double",
            Value::Str(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::List(_) => "list",
            Value::Message(_) => "message",
        }
    }

    #[cold]
    fn mismatch(&self, field: &'static str, expected: &str) -> Error {
        Error::type_violation(format!(
            "field `{}` expects {}, got {}",
            field,
            expected,
            self.kind_name()
        ))
    }

    pub fn into_i64(self, field: &'static str) -> Result<i64, Error> {
        match self {
            Value::Int(v) => Ok(v),
            Value::UInt(v) => i64::try_from(v).map_err(|_| overflow(field, "a signed integer")),
            other => Err(other.mismatch(field, "a signed integer")),
        }
    }

    pub fn into_u64(self, field: &'static str) -> Result<u64, Error> {
        match self {
            Value::UInt(v) => Ok(v),
            Value::Int(v) => u64::try_from(v).map_err(|_| overflow(field, "an unsigned integer")),
            other => Err(other.mismatch(field, "an unsigned integer")),
        }
    }

    pub fn into_bool(self, field: &'static str) -> Result<bool, Error> {
        match self {
            Value::Bool(v) => Ok(v),
            other => Err(other.mismatch(field, "a bool")),
        }
    }

    pub fn into_f64(self, field: &'static str) -> Result<f64, Error> {
        match self {
            Value::Double(v) => Ok(v),
            Value::Int(v) => Ok(v as f64),
            Value::UInt(v) => Ok(v as f64),
            other => Err(other.mismatch(field, "a floating-point number")),
        }
    }

    pub fn into_f32(self, field: &'static str) -> Result<f32, Error> {
        Ok(self.into_f64(field)? as f32)
    }

    pub fn into_string(self, field: &'static str) -> Result<String, Error> {
        match self {
            Value::Str(v) => Ok(v),
            other => Err(other.mismatch(field, "a string")),
        }
    }

    pub fn into_byte_vec(self, field: &'static str) -> Result<Vec<u8>, Error> {
        match self {
            Value::Bytes(v) => Ok(v),
            Value::Str(v) => Ok(v.into_bytes()),
            other => Err(other.mismatch(field, "bytes")),
        }
    }

    pub fn into_list(self, field: &'static str) -> Result<Vec<Value>, Error> {
        match self {
            Value::List(v) => Ok(v),
            other => Err(other.mismatch(field, "a list")),
        }
    }

    /// Unwrap a message value. The runtime type must be exactly `M`; a
    /// structurally similar message of another type is rejected.
    pub fn into_message<M: Any>(self, field: &'static str) -> Result<M, Error> {
        match self {
            Value::Message(boxed) => boxed.downcast::<M>().map(|m| *m).map_err(|_| {
                Error::type_violation(format!(
                    "field `{}` expects a {} instance",
                    field,
                    std::any::type_name::<M>()
                ))
            }),
            other => Err(other.mismatch(field, "a message")),
        }
    }
}

#[cold]
fn overflow(field: &'static str, expected: &str) -> Error {
    Error::type_violation(format!(
        "field `{}` expects {} in representable range",
        field, expected
    ))
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(v) => write!(f, "Bool({})", v),
            Value::Int(v) => write!(f, "Int({})", v),
            Value::UInt(v) => write!(f, "UInt({})", v),
            Value::Double(v) => write!(f, "Double({})", v),
            Value::Str(v) => write!(f, "Str({:?})", v),
            Value::Bytes(v) => write!(f, "Bytes({} bytes)", v.len()),
            Value::List(v) => write!(f, "List({} items)", v.len()),
            Value::Message(_) => f.write_str("Message(..)"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Value {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Value {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Value {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Value {
        Value::UInt(v as u64)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Value {
        Value::UInt(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Value {
        Value::Double(v as f64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Value {
        Value::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Value {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Value {
        Value::Str(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Value {
        Value::Bytes(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Value {
        Value::List(v)
    }
}
