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

//! Static per-message-type metadata.
//!
//! A [`MessageDescriptor`] is built once per message type by generated code,
//! lives for the process lifetime, and is shared read-only by every instance
//! of that type. Field ordering in the descriptor is serialization order.

use crate::wire::WireType;
use crate::error::Error;

/// The declared kind of a field. The wire type is fully determined by the
/// kind; the kind additionally selects the in-memory slot representation and
/// the numeric range that explicit validation enforces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Int32,
    Int64,
    UInt32,
    UInt64,
    SInt32,
    SInt64,
    Bool,
    Double,
    Float,
    String,
    Bytes,
    Enum,
    Message,
    Group,
}

impl FieldKind {
    pub fn wire_type(self) -> WireType {
        match self {
            FieldKind::Int32
            | FieldKind::Int64
            | FieldKind::UInt32
            | FieldKind::UInt64
            | FieldKind::SInt32
            | FieldKind::SInt64
            | FieldKind::Bool
            | FieldKind::Enum => WireType::Varint,
            FieldKind::Double => WireType::Fixed64,
            FieldKind::Float => WireType::Fixed32,
            FieldKind::String | FieldKind::Bytes | FieldKind::Message => {
                WireType::LengthDelimited
            }
            FieldKind::Group => WireType::StartGroup,
        }
    }

    /// Whether repeated values of this kind may arrive as one
    /// length-delimited packed run instead of one tag-value pair per element.
    pub fn is_packable(self) -> bool {
        !matches!(
            self,
            FieldKind::String | FieldKind::Bytes | FieldKind::Message | FieldKind::Group
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Label {
    Optional,
    Repeated,
}

/// Kind-typed default value recorded in the descriptor. Getters return it
/// when the field is unset; it is never emitted on the wire.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DefaultValue {
    Int(i64),
    UInt(u64),
    Bool(bool),
    Double(f64),
    Float(f32),
    Str(&'static str),
    Bytes(&'static [u8]),
    /// Repeated and message-typed fields have no scalar default.
    None,
}

/// Thunk returning another message type's descriptor. Descriptors reference
/// each other lazily so recursive message types can initialize.
pub type DescriptorFn = fn() -> &'static MessageDescriptor;

#[derive(Clone, Debug)]
pub struct FieldDescriptor {
    name: &'static str,
    tag: u32,
    kind: FieldKind,
    label: Label,
    default: DefaultValue,
    message_type: Option<DescriptorFn>,
}

impl FieldDescriptor {
    pub fn scalar(
        name: &'static str,
        tag: u32,
        kind: FieldKind,
        label: Label,
        default: DefaultValue,
    ) -> FieldDescriptor {
        FieldDescriptor {
            name,
            tag,
            kind,
            label,
            default,
            message_type: None,
        }
    }

    pub fn message(
        name: &'static str,
        tag: u32,
        kind: FieldKind,
        label: Label,
        message_type: DescriptorFn,
    ) -> FieldDescriptor {
        FieldDescriptor {
            name,
            tag,
            kind,
            label,
            default: DefaultValue::None,
            message_type: Some(message_type),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn tag(&self) -> u32 {
        self.tag
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn label(&self) -> Label {
        self.label
    }

    pub fn default(&self) -> DefaultValue {
        self.default
    }

    pub fn wire_type(&self) -> WireType {
        self.kind.wire_type()
    }

    /// Descriptor of the nested type, for message and group kinds.
    pub fn message_type(&self) -> Option<&'static MessageDescriptor> {
        self.message_type.map(|f| f())
    }
}

/// Immutable description of one message type: its dotted fully-qualified
/// name and its fields in serialization order.
#[derive(Clone, Debug)]
pub struct MessageDescriptor {
    package: &'static str,
    name: &'static str,
    full_name: String,
    fields: Vec<FieldDescriptor>,
}

impl MessageDescriptor {
    pub fn new(
        package: &'static str,
        name: &'static str,
        fields: Vec<FieldDescriptor>,
    ) -> MessageDescriptor {
        let full_name = if package.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", package, name)
        };
        MessageDescriptor {
            package,
            name,
            full_name,
            fields,
        }
    }

    pub fn package(&self) -> &'static str {
        self.package
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Dot-separated fully-qualified name, e.g. `simple.Test1`.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Fields in serialization order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field_by_tag(&self, tag: u32) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.tag == tag)
    }

    pub fn field_by_name(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Range check for `Int32`-kind values. Raised only by explicit validation;
/// serialization encodes out-of-range values with truncated bit patterns.
pub fn check_int32(field: &'static str, value: i64) -> Result<(), Error> {
    if value < i32::MIN as i64 || value > i32::MAX as i64 {
        return Err(Error::range_violation(format!(
            "field `{}`: {} outside int32 range",
            field, value
        )));
    }
    Ok(())
}

/// Range check for `SInt32`-kind values.
pub fn check_sint32(field: &'static str, value: i64) -> Result<(), Error> {
    check_int32(field, value)
}

/// Range check for `UInt32`-kind values.
pub fn check_uint32(field: &'static str, value: u64) -> Result<(), Error> {
    if value > u32::MAX as u64 {
        return Err(Error::range_violation(format!(
            "field `{}`: {} outside uint32 range",
            field, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> MessageDescriptor {
        MessageDescriptor::new(
            "simple",
            "Test1",
            vec![
                FieldDescriptor::scalar(
                    "id",
                    1,
                    FieldKind::Int32,
                    Label::Optional,
                    DefaultValue::Int(0),
                ),
                FieldDescriptor::scalar(
                    "test_field",
                    4,
                    FieldKind::String,
                    Label::Optional,
                    DefaultValue::Str(""),
                ),
            ],
        )
    }

    #[test]
    fn full_name_joins_package() {
        assert_eq!(descriptor().full_name(), "simple.Test1");
        let unpackaged = MessageDescriptor::new("", "Foo", vec![]);
        assert_eq!(unpackaged.full_name(), "Foo");
    }

    #[test]
    fn lookup_by_tag_and_name() {
        let d = descriptor();
        assert_eq!(d.field_by_tag(4).unwrap().name(), "test_field");
        assert_eq!(d.field_by_name("id").unwrap().tag(), 1);
        assert!(d.field_by_tag(9).is_none());
        assert!(d.field_by_name("nope").is_none());
    }

    #[test]
    fn wire_type_follows_kind() {
        assert_eq!(FieldKind::Int32.wire_type(), WireType::Varint);
        assert_eq!(FieldKind::SInt64.wire_type(), WireType::Varint);
        assert_eq!(FieldKind::Double.wire_type(), WireType::Fixed64);
        assert_eq!(FieldKind::Float.wire_type(), WireType::Fixed32);
        assert_eq!(FieldKind::String.wire_type(), WireType::LengthDelimited);
        assert_eq!(FieldKind::Message.wire_type(), WireType::LengthDelimited);
        assert_eq!(FieldKind::Group.wire_type(), WireType::StartGroup);
    }

    #[test]
    fn int32_range_boundaries() {
        assert!(check_int32("f", i32::MAX as i64).is_ok());
        assert!(check_int32("f", i32::MIN as i64).is_ok());
        assert!(matches!(
            check_int32("f", i32::MAX as i64 + 1),
            Err(Error::RangeViolation(_))
        ));
        assert!(matches!(
            check_int32("f", i32::MIN as i64 - 1),
            Err(Error::RangeViolation(_))
        ));
    }

    #[test]
    fn uint32_range_boundaries() {
        assert!(check_uint32("f", u32::MAX as u64).is_ok());
        assert!(matches!(
            check_uint32("f", u32::MAX as u64 + 1),
            Err(Error::RangeViolation(_))
        ));
    }
}
