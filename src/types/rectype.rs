use crate::types::strtype::StrType;
use crate::var::Var;

/// One type declaration: a structure, array or function type together with the declared
/// supertypes it matches.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct SubType {
    pub supertypes: Vec<Var>,
    pub strtype: StrType,
}

impl SubType {
    pub fn new(strtype: StrType) -> Self {
        Self {
            supertypes: vec![],
            strtype,
        }
    }
}

/// An entry of the type section: either a single declaration or a recursive group of mutually
/// recursive declarations.
///
/// <https://webassembly.github.io/gc/core/syntax/types.html#recursive-types>
/// <https://webassembly.github.io/gc/core/binary/types.html#recursive-types>
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub enum DefType {
    Sub(SubType),
    Rec(Vec<SubType>),
}

impl DefType {
    /// Number of type indices this entry occupies.
    pub fn len(&self) -> usize {
        match self {
            DefType::Sub(_) => 1,
            DefType::Rec(sts) => sts.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
