use crate::hash::HashCache;
use crate::types::rectype::SubType;
use crate::types::strtype::StrType;
use crate::var::Var;
use std::fmt;
use std::rc::Rc;

/// A resolved declaration, carrying enough context to expand itself.
///
/// Members of a recursive group point into the group they were declared in, so a member can be
/// unrolled without going back to the module it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CtxType {
    Sub(SubType),
    Rec(RecGroup, u32),
}

impl CtxType {
    /// The declaration this type stands for.
    pub fn unroll(&self) -> &SubType {
        match self {
            CtxType::Sub(st) => st,
            CtxType::Rec(group, i) => &group.members()[*i as usize].1,
        }
    }

    pub fn expand(&self) -> &StrType {
        &self.unroll().strtype
    }
}

/// The members of one recursive group, each paired with the variable that denotes it.
///
/// All members of a group share one list; equality is identity of that list.
#[derive(Clone)]
pub struct RecGroup(Rc<Group>);

struct Group {
    members: Box<[(Var, SubType)]>,
    hashes: HashCache,
}

impl RecGroup {
    pub fn new(members: Vec<(Var, SubType)>) -> Self {
        Self(Rc::new(Group {
            members: members.into_boxed_slice(),
            hashes: HashCache::default(),
        }))
    }

    pub fn members(&self) -> &[(Var, SubType)] {
        &self.0.members
    }

    pub fn len(&self) -> usize {
        self.0.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.members.is_empty()
    }

    pub fn vars(&self) -> impl Iterator<Item = &Var> {
        self.0.members.iter().map(|(x, _)| x)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn hashes(&self) -> &HashCache {
        &self.0.hashes
    }

    pub(crate) fn as_ptr(&self) -> *const () {
        Rc::as_ptr(&self.0) as *const ()
    }
}

impl PartialEq for RecGroup {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for RecGroup {}

impl fmt::Debug for RecGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.members()).finish()
    }
}
