use super::functype::FuncType;
use super::numtype::NumType;
use super::valtype::ValType;
use thiserror::Error;

/// Structure types, array types and function types: the bodies a type declaration can have.
///
/// <https://webassembly.github.io/gc/core/syntax/types.html#aggregate-types>
/// <https://webassembly.github.io/gc/core/binary/types.html#aggregate-types>
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub enum StrType {
    Struct(StructType),
    Array(ArrayType),
    Func(FuncType),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("expected {expected} type; got {got} type")]
pub struct StrTypeMismatch {
    pub expected: &'static str,
    pub got: &'static str,
}

impl StrType {
    pub fn kind(&self) -> &'static str {
        match self {
            StrType::Struct(_) => "struct",
            StrType::Array(_) => "array",
            StrType::Func(_) => "func",
        }
    }

    fn mismatch(&self, expected: &'static str) -> StrTypeMismatch {
        StrTypeMismatch {
            expected,
            got: self.kind(),
        }
    }

    pub fn try_as_struct(&self) -> Result<&StructType, StrTypeMismatch> {
        match self {
            StrType::Struct(st) => Ok(st),
            _ => Err(self.mismatch("struct")),
        }
    }

    pub fn try_as_array(&self) -> Result<&ArrayType, StrTypeMismatch> {
        match self {
            StrType::Array(at) => Ok(at),
            _ => Err(self.mismatch("array")),
        }
    }

    pub fn try_as_func(&self) -> Result<&FuncType, StrTypeMismatch> {
        match self {
            StrType::Func(ft) => Ok(ft),
            _ => Err(self.mismatch("func")),
        }
    }

    /// # Panics
    ///
    /// Panics if this is not a structure type.
    pub fn as_struct(&self) -> &StructType {
        self.try_as_struct().unwrap_or_else(|e| panic!("{e}"))
    }

    /// # Panics
    ///
    /// Panics if this is not an array type.
    pub fn as_array(&self) -> &ArrayType {
        self.try_as_array().unwrap_or_else(|e| panic!("{e}"))
    }

    /// # Panics
    ///
    /// Panics if this is not a function type.
    pub fn as_func(&self) -> &FuncType {
        self.try_as_func().unwrap_or_else(|e| panic!("{e}"))
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct StructType(pub Vec<FieldType>);

#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct ArrayType(pub FieldType);

#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct FieldType(pub Mut, pub StorageType);

impl FieldType {
    /// The operand type used to read or write this field.
    pub fn unpacked(&self) -> ValType {
        self.1.unpacked()
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Mut {
    Const,
    Var,
}

#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub enum StorageType {
    ValType(ValType),
    PackType(PackType),
}

impl StorageType {
    pub fn is_packed(&self) -> bool {
        matches!(self, StorageType::PackType(_))
    }

    /// Packed fields are accessed as the smallest integer value type.
    pub fn unpacked(&self) -> ValType {
        match self {
            StorageType::ValType(t) => t.clone(),
            StorageType::PackType(_) => ValType::Num(NumType::Int32),
        }
    }
}

impl From<ValType> for StorageType {
    fn from(t: ValType) -> Self {
        StorageType::ValType(t)
    }
}

impl From<PackType> for StorageType {
    fn from(t: PackType) -> Self {
        StorageType::PackType(t)
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum PackType {
    I8,
    I16,
    I32,
}

impl PackType {
    /// Width in bytes.
    pub fn size(self) -> u32 {
        match self {
            PackType::I8 => 1,
            PackType::I16 => 2,
            PackType::I32 => 4,
        }
    }
}
