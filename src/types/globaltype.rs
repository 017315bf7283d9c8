use crate::types::strtype::Mut;
use crate::types::valtype::ValType;

/// Global types classify global variables, which hold a value and can either be mutable or
/// immutable.
///
/// <https://www.w3.org/TR/wasm-core-2/#global-types>
/// <https://www.w3.org/TR/wasm-core-2/#binary-globaltype>
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct GlobalType(pub Mut, pub ValType);
