use super::heaptype::HeapType;

/// Reference types classify first-class references to objects in the runtime store.
///
/// A reference type is characterized by a heap type and a nullability flag.
///
/// <https://webassembly.github.io/gc/core/syntax/types.html#reference-types>
/// <https://webassembly.github.io/gc/core/binary/types.html#reference-types>
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct RefType {
    pub nullable: bool,
    pub ht: HeapType,
}

impl RefType {
    pub fn new(nullable: bool, ht: impl Into<HeapType>) -> Self {
        Self {
            nullable,
            ht: ht.into(),
        }
    }

    /// Only null can serve as the default value of a reference.
    pub fn is_defaultable(&self) -> bool {
        self.nullable
    }
}
