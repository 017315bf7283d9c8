//! Type variables.
//!
//! A reference to a declared type goes through three forms during its life:
//!
//! - a syntactic variable, the plain index a decoder reads from the type section,
//! - a semantic variable, the identity of the resolved declaration,
//! - a recursive variable, a local index into the recursive group currently being printed or
//!   hashed, which never escapes that operation.
use crate::deferred::Deferred;
use crate::hash::HashCache;
use crate::types::ctxtype::CtxType;
use crate::types::strtype::StrType;
use crate::types::rectype::SubType;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Var {
    Syn(u32),
    Sem(SemVar),
    Rec(u32),
}

impl Var {
    pub fn as_sem(&self) -> Option<&SemVar> {
        match self {
            Var::Sem(x) => Some(x),
            _ => None,
        }
    }
}

impl From<SemVar> for Var {
    fn from(x: SemVar) -> Self {
        Var::Sem(x)
    }
}

/// The identity of one resolved declaration.
///
/// Two semantic variables are equal only if they share the same cell: separately declared types
/// stay distinct however similar their definitions look.
#[derive(Clone)]
pub struct SemVar(Rc<Identity>);

struct Identity {
    def: Deferred<CtxType>,
    hashes: HashCache,
}

impl SemVar {
    /// Allocates a fresh, not yet defined identity.
    pub fn fresh() -> Self {
        Self(Rc::new(Identity {
            def: Deferred::new(),
            hashes: HashCache::default(),
        }))
    }

    pub fn is_defined(&self) -> bool {
        self.0.def.is_fulfilled()
    }

    /// Fulfils the identity with its resolved definition.
    ///
    /// # Panics
    ///
    /// Panics if the identity was already defined.
    pub fn define(&self, ct: CtxType) {
        self.0.def.fulfill(ct)
    }

    /// The resolved definition.
    ///
    /// # Panics
    ///
    /// Panics if the identity has not been defined yet.
    pub fn ctx_type(&self) -> &CtxType {
        self.0.def.get()
    }

    pub fn unroll(&self) -> &SubType {
        self.ctx_type().unroll()
    }

    pub fn expand(&self) -> &StrType {
        self.ctx_type().expand()
    }

    pub(crate) fn hashes(&self) -> &HashCache {
        &self.0.hashes
    }

    pub(crate) fn as_ptr(&self) -> *const () {
        Rc::as_ptr(&self.0) as *const ()
    }
}

impl PartialEq for SemVar {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for SemVar {}

impl Hash for SemVar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(self.as_ptr(), state)
    }
}

impl fmt::Debug for SemVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SemVar").field(&self.as_ptr()).finish()
    }
}
