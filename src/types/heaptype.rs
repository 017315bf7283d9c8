//! Heap types classify objects in the runtime store.
//!
//! A heap type is either abstract or concrete. Abstract heap types are denoted by individual
//! keywords: 𝖺𝗇𝗒 is the common supertype of all managed data, 𝖾𝗊 covers the values that can be
//! compared by reference, 𝗂𝟥𝟣 denotes unboxed scalars, 𝖽𝖺𝗍𝖺 covers structures and arrays, 𝖿𝗎𝗇𝖼
//! covers functions and 𝖾𝗑𝗍𝖾𝗋𝗇 covers references owned by the embedder. The bottom heap type
//! is a subtype of all of them and has no values.
//!
//! A concrete heap type references a type declared in a module, or the runtime type token of
//! such a declaration.
//!
//! <https://webassembly.github.io/gc/core/syntax/types.html#heap-types>
//! <https://webassembly.github.io/gc/core/binary/types.html#heap-types>
use crate::var::Var;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HeapType {
    Ht(AbsHeapType),
    Def(Var),
    Rtt(Var),
}

impl HeapType {
    pub fn var(&self) -> Option<&Var> {
        match self {
            HeapType::Ht(_) => None,
            HeapType::Def(x) | HeapType::Rtt(x) => Some(x),
        }
    }
}

impl From<AbsHeapType> for HeapType {
    fn from(ht: AbsHeapType) -> Self {
        HeapType::Ht(ht)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbsHeapType {
    Any,
    Eq,
    I31,
    Data,
    Func,
    Extern,
    Bot,
}
