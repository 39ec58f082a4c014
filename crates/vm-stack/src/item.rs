//! Stack items: the values bytecode execution operates on.

use primitive_types::U256;

use crate::error::VmError;

/// The kinds of value that can sit on the evaluation stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StackValue {
    Integer(U256),
    Boolean(bool),
    ByteArray(Vec<u8>),
    Array(Vec<StackItem>),
}

impl StackValue {
    /// Name of this value's kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            StackValue::Integer(_) => "integer",
            StackValue::Boolean(_) => "boolean",
            StackValue::ByteArray(_) => "bytearray",
            StackValue::Array(_) => "array",
        }
    }
}

/// Wrapper around a [`StackValue`], the unit the evaluation stack holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StackItem {
    value: StackValue,
}

impl StackItem {
    pub fn new(value: StackValue) -> Self {
        Self { value }
    }

    pub fn integer(value: U256) -> Self {
        Self::new(StackValue::Integer(value))
    }

    pub fn boolean(value: bool) -> Self {
        Self::new(StackValue::Boolean(value))
    }

    pub fn byte_array(bytes: Vec<u8>) -> Self {
        Self::new(StackValue::ByteArray(bytes))
    }

    /// Borrow the wrapped value.
    pub fn value(&self) -> &StackValue {
        &self.value
    }

    /// Unwrap into the value.
    pub fn into_value(self) -> StackValue {
        self.value
    }

    /// Read this item as an integer. Booleans coerce to 0/1.
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` for byte arrays and arrays.
    pub fn as_integer(&self) -> Result<U256, VmError> {
        match &self.value {
            StackValue::Integer(v) => Ok(*v),
            StackValue::Boolean(b) => Ok(U256::from(u8::from(*b))),
            other => Err(VmError::TypeMismatch {
                expected: "integer",
                got: other.kind(),
            }),
        }
    }

    /// Read this item as a boolean. Integers coerce: zero is false.
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` for byte arrays and arrays.
    pub fn as_boolean(&self) -> Result<bool, VmError> {
        match &self.value {
            StackValue::Boolean(b) => Ok(*b),
            StackValue::Integer(v) => Ok(!v.is_zero()),
            other => Err(VmError::TypeMismatch {
                expected: "boolean",
                got: other.kind(),
            }),
        }
    }

    /// Read this item as bytes.
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` for anything but a byte array.
    pub fn as_bytes(&self) -> Result<&[u8], VmError> {
        match &self.value {
            StackValue::ByteArray(bytes) => Ok(bytes),
            other => Err(VmError::TypeMismatch {
                expected: "bytearray",
                got: other.kind(),
            }),
        }
    }
}
