use crate::types::limits::Limits;

/// Memory types classify linear memories and their size range, given in units of page size.
///
/// <https://www.w3.org/TR/wasm-core-2/#memory-types>
/// <https://www.w3.org/TR/wasm-core-2/#binary-memtype>
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub struct MemType {
    pub limits: Limits,
}
