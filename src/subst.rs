//! Substitution of type variables throughout the grammar.
//!
//! A [`Substitution`] wraps a variable rewrite function. Every grammar node implements [`Subst`]
//! by rebuilding itself with all of its variables rewritten; number types and limits contain no
//! variables and come back unchanged.
use crate::types::*;
use crate::var::{SemVar, Var};
use rustc_hash::FxHashMap;

pub struct Substitution<F> {
    rewrite: F,

    // Rewritten recursive groups, keyed by the group they were rewritten from. Members of one
    // group are substituted one at a time, and they must keep sharing a single list.
    groups: FxHashMap<*const (), (RecGroup, RecGroup)>,
}

impl<F: Fn(&Var) -> Var> Substitution<F> {
    pub fn new(rewrite: F) -> Self {
        Self {
            rewrite,
            groups: FxHashMap::default(),
        }
    }

    pub fn var(&self, x: &Var) -> Var {
        (self.rewrite)(x)
    }

    fn group(&mut self, group: &RecGroup) -> RecGroup {
        if let Some((from, to)) = self.groups.get(&group.as_ptr())
            && from.ptr_eq(group)
        {
            return to.clone();
        }

        let members = group
            .members()
            .iter()
            .map(|(x, st)| (self.var(x), st.subst(self)))
            .collect();
        let to = RecGroup::new(members);

        self.groups
            .insert(group.as_ptr(), (group.clone(), to.clone()));
        to
    }
}

pub trait Subst {
    fn subst<F: Fn(&Var) -> Var>(&self, s: &mut Substitution<F>) -> Self;
}

impl<T: Subst> Subst for Vec<T> {
    fn subst<F: Fn(&Var) -> Var>(&self, s: &mut Substitution<F>) -> Self {
        self.iter().map(|t| t.subst(s)).collect()
    }
}

impl Subst for Var {
    fn subst<F: Fn(&Var) -> Var>(&self, s: &mut Substitution<F>) -> Self {
        s.var(self)
    }
}

impl Subst for NumType {
    fn subst<F: Fn(&Var) -> Var>(&self, _: &mut Substitution<F>) -> Self {
        *self
    }
}

impl Subst for HeapType {
    fn subst<F: Fn(&Var) -> Var>(&self, s: &mut Substitution<F>) -> Self {
        match self {
            HeapType::Ht(ht) => HeapType::Ht(*ht),
            HeapType::Def(x) => HeapType::Def(s.var(x)),
            HeapType::Rtt(x) => HeapType::Rtt(s.var(x)),
        }
    }
}

impl Subst for RefType {
    fn subst<F: Fn(&Var) -> Var>(&self, s: &mut Substitution<F>) -> Self {
        RefType {
            nullable: self.nullable,
            ht: self.ht.subst(s),
        }
    }
}

impl Subst for ValType {
    fn subst<F: Fn(&Var) -> Var>(&self, s: &mut Substitution<F>) -> Self {
        match self {
            ValType::Num(t) => ValType::Num(t.subst(s)),
            ValType::Ref(t) => ValType::Ref(t.subst(s)),
            ValType::Bot => ValType::Bot,
        }
    }
}

impl Subst for StorageType {
    fn subst<F: Fn(&Var) -> Var>(&self, s: &mut Substitution<F>) -> Self {
        match self {
            StorageType::ValType(t) => StorageType::ValType(t.subst(s)),
            StorageType::PackType(p) => StorageType::PackType(*p),
        }
    }
}

impl Subst for FieldType {
    fn subst<F: Fn(&Var) -> Var>(&self, s: &mut Substitution<F>) -> Self {
        FieldType(self.0, self.1.subst(s))
    }
}

impl Subst for StructType {
    fn subst<F: Fn(&Var) -> Var>(&self, s: &mut Substitution<F>) -> Self {
        StructType(self.0.subst(s))
    }
}

impl Subst for ArrayType {
    fn subst<F: Fn(&Var) -> Var>(&self, s: &mut Substitution<F>) -> Self {
        ArrayType(self.0.subst(s))
    }
}

impl Subst for FuncType {
    fn subst<F: Fn(&Var) -> Var>(&self, s: &mut Substitution<F>) -> Self {
        FuncType {
            parameters: self.parameters.subst(s),
            results: self.results.subst(s),
        }
    }
}

impl Subst for StrType {
    fn subst<F: Fn(&Var) -> Var>(&self, s: &mut Substitution<F>) -> Self {
        match self {
            StrType::Struct(st) => StrType::Struct(st.subst(s)),
            StrType::Array(at) => StrType::Array(at.subst(s)),
            StrType::Func(ft) => StrType::Func(ft.subst(s)),
        }
    }
}

impl Subst for SubType {
    fn subst<F: Fn(&Var) -> Var>(&self, s: &mut Substitution<F>) -> Self {
        SubType {
            supertypes: self.supertypes.subst(s),
            strtype: self.strtype.subst(s),
        }
    }
}

impl Subst for DefType {
    fn subst<F: Fn(&Var) -> Var>(&self, s: &mut Substitution<F>) -> Self {
        match self {
            DefType::Sub(st) => DefType::Sub(st.subst(s)),
            DefType::Rec(sts) => DefType::Rec(sts.subst(s)),
        }
    }
}

impl Subst for CtxType {
    fn subst<F: Fn(&Var) -> Var>(&self, s: &mut Substitution<F>) -> Self {
        match self {
            CtxType::Sub(st) => CtxType::Sub(st.subst(s)),
            CtxType::Rec(group, i) => CtxType::Rec(s.group(group), *i),
        }
    }
}

impl Subst for Limits {
    fn subst<F: Fn(&Var) -> Var>(&self, _: &mut Substitution<F>) -> Self {
        *self
    }
}

impl Subst for TableType {
    fn subst<F: Fn(&Var) -> Var>(&self, s: &mut Substitution<F>) -> Self {
        TableType {
            limits: self.limits.subst(s),
            reftype: self.reftype.subst(s),
        }
    }
}

impl Subst for MemType {
    fn subst<F: Fn(&Var) -> Var>(&self, s: &mut Substitution<F>) -> Self {
        MemType {
            limits: self.limits.subst(s),
        }
    }
}

impl Subst for GlobalType {
    fn subst<F: Fn(&Var) -> Var>(&self, s: &mut Substitution<F>) -> Self {
        GlobalType(self.0, self.1.subst(s))
    }
}

impl Subst for ExternType {
    fn subst<F: Fn(&Var) -> Var>(&self, s: &mut Substitution<F>) -> Self {
        match self {
            ExternType::Func(x) => ExternType::Func(s.var(x)),
            ExternType::Table(tt) => ExternType::Table(tt.subst(s)),
            ExternType::Mem(mt) => ExternType::Mem(mt.subst(s)),
            ExternType::Global(gt) => ExternType::Global(gt.subst(s)),
        }
    }
}

impl Subst for ImportType {
    fn subst<F: Fn(&Var) -> Var>(&self, s: &mut Substitution<F>) -> Self {
        ImportType {
            module: self.module.clone(),
            name: self.name.clone(),
            desc: self.desc.subst(s),
        }
    }
}

impl Subst for ExportType {
    fn subst<F: Fn(&Var) -> Var>(&self, s: &mut Substitution<F>) -> Self {
        ExportType {
            name: self.name.clone(),
            desc: self.desc.subst(s),
        }
    }
}

impl Subst for ModuleType {
    fn subst<F: Fn(&Var) -> Var>(&self, s: &mut Substitution<F>) -> Self {
        ModuleType {
            types: self.types.subst(s),
            imports: self.imports.subst(s),
            exports: self.exports.subst(s),
        }
    }
}

/// Promotes syntactic variables to the identities in `cells`, indexed by flattened declaration
/// position.
///
/// The returned function panics on a semantic variable, which means the input was already
/// resolved, and on an index with no corresponding cell.
pub fn sem_var(cells: &[SemVar]) -> impl Fn(&Var) -> Var + '_ {
    move |x: &Var| match x {
        Var::Syn(i) => match cells.get(*i as usize) {
            Some(cell) => Var::Sem(cell.clone()),
            None => panic!(
                "type index {i} out of bounds for {} declarations",
                cells.len()
            ),
        },
        Var::Sem(_) => panic!("semantic variable encountered while promoting syntactic variables"),
        Var::Rec(i) => Var::Rec(*i),
    }
}

/// Rewrites each identity found in `vars` into a recursive variable holding its position.
pub fn tie_var(vars: &[Var]) -> impl Fn(&Var) -> Var + use<> {
    let mut positions: FxHashMap<SemVar, u32> = FxHashMap::default();
    for (i, x) in vars.iter().enumerate() {
        if let Var::Sem(y) = x {
            positions.entry(y.clone()).or_insert(i as u32);
        }
    }

    move |x: &Var| match x {
        Var::Sem(y) => match positions.get(y) {
            Some(&i) => Var::Rec(i),
            None => x.clone(),
        },
        _ => x.clone(),
    }
}

impl RecGroup {
    /// The members of the group with every reference to a sibling (or to itself) replaced by its
    /// local index, so that nothing inside can lead back into the group.
    pub fn tie(&self) -> Vec<SubType> {
        let vars: Vec<Var> = self.vars().cloned().collect();
        let mut s = Substitution::new(tie_var(&vars));
        self.members().iter().map(|(_, st)| st.subst(&mut s)).collect()
    }
}
