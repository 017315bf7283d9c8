use super::numtype::NumType;
use super::reftype::RefType;

/// Value types classify the individual values that code can compute with and the values that a
/// variable accepts. The bottom type is a subtype of every value type and only arises during
/// validation of unreachable code.
///
/// <https://webassembly.github.io/gc/core/syntax/types.html#value-types>
/// <https://webassembly.github.io/gc/core/binary/types.html#value-types>
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub enum ValType {
    Num(NumType),
    Ref(RefType),
    Bot,
}

impl ValType {
    pub fn is_num_type(&self) -> bool {
        matches!(self, ValType::Num(_))
    }

    pub fn is_ref_type(&self) -> bool {
        matches!(self, ValType::Ref(_))
    }

    /// Whether locals and fields of this type can be initialised with a default value.
    pub fn is_defaultable(&self) -> bool {
        match self {
            ValType::Num(t) => t.is_defaultable(),
            ValType::Ref(t) => t.is_defaultable(),
            ValType::Bot => false,
        }
    }
}

impl From<NumType> for ValType {
    fn from(t: NumType) -> Self {
        ValType::Num(t)
    }
}

impl From<RefType> for ValType {
    fn from(t: RefType) -> Self {
        ValType::Ref(t)
    }
}
