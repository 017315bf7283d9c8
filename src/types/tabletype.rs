use crate::types::limits::Limits;
use crate::types::reftype::RefType;

/// Table types classify tables over elements of reference type within a size range. The limits
/// are given in numbers of entries.
///
/// <https://www.w3.org/TR/wasm-core-2/#table-types>
/// <https://www.w3.org/TR/wasm-core-2/#binary-tabletype>
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct TableType {
    pub limits: Limits,
    pub reftype: RefType,
}
