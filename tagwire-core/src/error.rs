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

//! Error types for encoding, decoding and validation.
//!
//! Error constructors sit on every buffer read path, so they are kept
//! `#[cold]` to keep the successful paths tight.

use std::borrow::Cow;

use thiserror::Error;

/// Error type for tagwire serialization, parsing and validation.
///
/// Parse errors are fatal to the parse call that produced them: there is no
/// partial-message recovery and no internal retry. Validation errors are
/// only ever produced by an explicit [`validate`](crate::message::Message::validate)
/// call, never during field access or serialization.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A varint ran past 10 bytes, overflowed 64 bits, or the input ended
    /// mid-sequence.
    #[error("malformed varint: {0}")]
    MalformedVarint(Cow<'static, str>),

    /// A declared length exceeds the bytes remaining on the stream.
    #[error("truncated input: need {needed} bytes, {remaining} remaining")]
    TruncatedInput { needed: usize, remaining: usize },

    /// The wire type found on the stream disagrees with the field's declared
    /// wire type, or the stream carries an invalid tag key.
    #[error("malformed wire data: {0}")]
    MalformedWire(Cow<'static, str>),

    /// A numeric value is outside the declared kind's range. Raised only by
    /// explicit validation.
    #[error("value out of range: {0}")]
    RangeViolation(Cow<'static, str>),

    /// A value of the wrong runtime type was supplied for a field, or a
    /// construction mapping used an unknown field identifier.
    #[error("type violation: {0}")]
    TypeViolation(Cow<'static, str>),

    /// A string field carried bytes that are not valid UTF-8.
    #[error("invalid UTF-8 in string field `{0}`")]
    InvalidUtf8(Cow<'static, str>),

    /// Nested-message recursion exceeded the configured limit.
    #[error("message nesting exceeds the configured depth limit")]
    DepthExceeded,
}

impl Error {
    #[cold]
    pub fn malformed_varint<S: Into<Cow<'static, str>>>(msg: S) -> Self {
        Error::MalformedVarint(msg.into())
    }

    #[cold]
    pub fn truncated(needed: usize, remaining: usize) -> Self {
        Error::TruncatedInput { needed, remaining }
    }

    #[cold]
    pub fn malformed_wire<S: Into<Cow<'static, str>>>(msg: S) -> Self {
        Error::MalformedWire(msg.into())
    }

    #[cold]
    pub fn range_violation<S: Into<Cow<'static, str>>>(msg: S) -> Self {
        Error::RangeViolation(msg.into())
    }

    #[cold]
    pub fn type_violation<S: Into<Cow<'static, str>>>(msg: S) -> Self {
        Error::TypeViolation(msg.into())
    }

    #[cold]
    pub fn invalid_utf8(field: &'static str) -> Self {
        Error::InvalidUtf8(field.into())
    }

    #[cold]
    pub fn depth_exceeded() -> Self {
        Error::DepthExceeded
    }
}
