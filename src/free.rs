//! Free semantic variables and their transitive closure.
//!
//! The collectors follow the same structure as substitution, but instead of rewriting they
//! gather every identity a node refers to. Syntactic and recursive variables are ignored: they
//! have no meaning once a module is resolved.
use crate::hash::sem_hash;
use crate::types::*;
use crate::var::{SemVar, Var};
use rustc_hash::FxHashSet;
use tracing::debug;

/// A set of identities that remembers the order in which they were inserted.
#[derive(Debug, Default, Clone)]
pub struct SemSet {
    order: Vec<SemVar>,
    seen: FxHashSet<SemVar>,
}

impl SemSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether `x` was not in the set before.
    pub fn insert(&mut self, x: &SemVar) -> bool {
        if !self.seen.insert(x.clone()) {
            return false;
        }
        self.order.push(x.clone());
        true
    }

    pub fn contains(&self, x: &SemVar) -> bool {
        self.seen.contains(x)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SemVar> {
        self.order.iter()
    }

    pub fn into_vec(self) -> Vec<SemVar> {
        self.order
    }
}

pub trait FreeSem {
    fn free_sem(&self, acc: &mut SemSet);
}

/// The identities `t` refers to directly.
pub fn free_sem<T: FreeSem + ?Sized>(t: &T) -> SemSet {
    let mut acc = SemSet::new();
    t.free_sem(&mut acc);
    acc
}

/// Every identity reachable from `roots`, including the roots, ordered by structural hash.
///
/// Identities with equal hashes stay in the order they were discovered in.
///
/// # Panics
///
/// Panics if a reachable identity is not defined yet.
pub fn transitive(roots: impl IntoIterator<Item = SemVar>) -> Vec<SemVar> {
    let mut set = SemSet::new();
    for x in roots {
        set.insert(&x);
    }
    let root_count = set.len();

    // members of one group share their free variables, so each group is walked once
    let mut groups = FxHashSet::default();
    let mut next = 0;
    while next < set.len() {
        let x = set.order[next].clone();
        match x.ctx_type() {
            CtxType::Rec(group, _) if !groups.insert(group.as_ptr()) => {}
            ct => ct.free_sem(&mut set),
        }
        next += 1;
    }
    debug!(roots = root_count, closure = set.len(), "computed type closure");

    let mut keyed: Vec<(u32, SemVar)> = set
        .into_vec()
        .into_iter()
        .map(|x| (sem_hash(&x), x))
        .collect();
    keyed.sort_by_key(|(h, _)| *h);
    keyed.into_iter().map(|(_, x)| x).collect()
}

impl<T: FreeSem> FreeSem for [T] {
    fn free_sem(&self, acc: &mut SemSet) {
        for t in self {
            t.free_sem(acc);
        }
    }
}

impl<T: FreeSem> FreeSem for Vec<T> {
    fn free_sem(&self, acc: &mut SemSet) {
        self.as_slice().free_sem(acc)
    }
}

impl FreeSem for Var {
    fn free_sem(&self, acc: &mut SemSet) {
        if let Var::Sem(x) = self {
            acc.insert(x);
        }
    }
}

impl FreeSem for HeapType {
    fn free_sem(&self, acc: &mut SemSet) {
        if let Some(x) = self.var() {
            x.free_sem(acc);
        }
    }
}

impl FreeSem for RefType {
    fn free_sem(&self, acc: &mut SemSet) {
        self.ht.free_sem(acc)
    }
}

impl FreeSem for ValType {
    fn free_sem(&self, acc: &mut SemSet) {
        if let ValType::Ref(t) = self {
            t.free_sem(acc);
        }
    }
}

impl FreeSem for StorageType {
    fn free_sem(&self, acc: &mut SemSet) {
        if let StorageType::ValType(t) = self {
            t.free_sem(acc);
        }
    }
}

impl FreeSem for FieldType {
    fn free_sem(&self, acc: &mut SemSet) {
        self.1.free_sem(acc)
    }
}

impl FreeSem for StructType {
    fn free_sem(&self, acc: &mut SemSet) {
        self.0.free_sem(acc)
    }
}

impl FreeSem for ArrayType {
    fn free_sem(&self, acc: &mut SemSet) {
        self.0.free_sem(acc)
    }
}

impl FreeSem for FuncType {
    fn free_sem(&self, acc: &mut SemSet) {
        self.parameters.free_sem(acc);
        self.results.free_sem(acc);
    }
}

impl FreeSem for StrType {
    fn free_sem(&self, acc: &mut SemSet) {
        match self {
            StrType::Struct(st) => st.free_sem(acc),
            StrType::Array(at) => at.free_sem(acc),
            StrType::Func(ft) => ft.free_sem(acc),
        }
    }
}

impl FreeSem for SubType {
    fn free_sem(&self, acc: &mut SemSet) {
        self.supertypes.free_sem(acc);
        self.strtype.free_sem(acc);
    }
}

impl FreeSem for DefType {
    fn free_sem(&self, acc: &mut SemSet) {
        match self {
            DefType::Sub(st) => st.free_sem(acc),
            DefType::Rec(sts) => sts.free_sem(acc),
        }
    }
}

// a recursive member depends on its whole group
impl FreeSem for CtxType {
    fn free_sem(&self, acc: &mut SemSet) {
        match self {
            CtxType::Sub(st) => st.free_sem(acc),
            CtxType::Rec(group, _) => {
                for (x, st) in group.members() {
                    x.free_sem(acc);
                    st.free_sem(acc);
                }
            }
        }
    }
}

impl FreeSem for TableType {
    fn free_sem(&self, acc: &mut SemSet) {
        self.reftype.free_sem(acc)
    }
}

impl FreeSem for GlobalType {
    fn free_sem(&self, acc: &mut SemSet) {
        self.1.free_sem(acc)
    }
}

impl FreeSem for ExternType {
    fn free_sem(&self, acc: &mut SemSet) {
        match self {
            ExternType::Func(x) => x.free_sem(acc),
            ExternType::Table(tt) => tt.free_sem(acc),
            ExternType::Mem(_) => {}
            ExternType::Global(gt) => gt.free_sem(acc),
        }
    }
}

impl FreeSem for ImportType {
    fn free_sem(&self, acc: &mut SemSet) {
        self.desc.free_sem(acc)
    }
}

impl FreeSem for ExportType {
    fn free_sem(&self, acc: &mut SemSet) {
        self.desc.free_sem(acc)
    }
}

impl FreeSem for ModuleType {
    fn free_sem(&self, acc: &mut SemSet) {
        self.types.free_sem(acc);
        self.imports.free_sem(acc);
        self.exports.free_sem(acc);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_keeps_insertion_order() {
        let a = SemVar::fresh();
        let b = SemVar::fresh();

        let mut set = SemSet::new();
        assert!(set.insert(&b));
        assert!(set.insert(&a));
        assert!(!set.insert(&b));

        assert_eq!(set.len(), 2);
        assert!(set.contains(&a));
        assert_eq!(set.into_vec(), vec![b, a]);
    }

    #[test]
    fn ignores_non_semantic_variables() {
        let ft = FuncType {
            parameters: vec![ValType::Ref(RefType::new(true, HeapType::Def(Var::Syn(0))))],
            results: vec![ValType::Ref(RefType::new(true, HeapType::Rtt(Var::Rec(0))))],
        };
        assert!(free_sem(&ft).is_empty());
    }
}
