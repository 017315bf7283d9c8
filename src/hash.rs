//! Structural hashing of resolved types.
//!
//! The hash of an identity depends only on the shape of its definition, never on where its cell
//! lives, so it is the same in every run. Members of a recursive group are hashed through their
//! tied group, which cannot lead back into itself. Another identity referenced from a
//! definition contributes its own hash, taken one level shallower; identities more than
//! [`DEPTH`] references away from the one being hashed contribute a constant.
//!
//! Every identity and every group caches its hash per level, so each is computed at most
//! [`DEPTH`] + 1 times however often it is referenced or printed.
use crate::types::*;
use crate::var::{SemVar, Var};
use std::cell::OnceCell;

pub const DEPTH: u32 = 3;

const LEVELS: usize = DEPTH as usize + 1;

/// Hashes of one identity or group, indexed by the number of reference levels still expanded.
#[derive(Default)]
pub(crate) struct HashCache([OnceCell<u32>; LEVELS]);

impl HashCache {
    fn get_or_init(&self, depth: u32, f: impl FnOnce() -> u32) -> u32 {
        *self.0[depth as usize].get_or_init(f)
    }
}

pub struct StructuralHasher {
    state: crc32fast::Hasher,
    depth: u32,
}

impl StructuralHasher {
    pub fn new() -> Self {
        Self::with_depth(DEPTH)
    }

    fn with_depth(depth: u32) -> Self {
        Self {
            state: crc32fast::Hasher::new(),
            depth,
        }
    }

    fn tag(&mut self, tag: u8) {
        self.state.update(&[tag]);
    }

    fn u32(&mut self, n: u32) {
        self.state.update(&n.to_le_bytes());
    }

    fn len(&mut self, n: usize) {
        self.u32(n as u32);
    }

    pub fn finish(self) -> u32 {
        self.state.finalize()
    }
}

impl Default for StructuralHasher {
    fn default() -> Self {
        Self::new()
    }
}

pub trait StructuralHash {
    fn structural_hash(&self, h: &mut StructuralHasher);
}

/// The structural hash of the definition of `x`.
///
/// # Panics
///
/// Panics if `x` is not defined yet.
pub fn sem_hash(x: &SemVar) -> u32 {
    sem_hash_at(x, DEPTH)
}

// each level only reads cached hashes of the level below, so no cell is entered twice
fn sem_hash_at(x: &SemVar, depth: u32) -> u32 {
    x.hashes().get_or_init(depth, || {
        let mut h = StructuralHasher::with_depth(depth);
        x.ctx_type().structural_hash(&mut h);
        h.finish()
    })
}

fn group_hash_at(group: &RecGroup, depth: u32) -> u32 {
    group.hashes().get_or_init(depth, || {
        let mut h = StructuralHasher::with_depth(depth);
        group.tie().structural_hash(&mut h);
        h.finish()
    })
}

impl<T: StructuralHash> StructuralHash for [T] {
    fn structural_hash(&self, h: &mut StructuralHasher) {
        h.len(self.len());
        for t in self {
            t.structural_hash(h);
        }
    }
}

impl StructuralHash for Var {
    fn structural_hash(&self, h: &mut StructuralHasher) {
        match self {
            Var::Syn(i) => {
                h.tag(0);
                h.u32(*i);
            }
            // too deep to look inside; all identities look alike from here
            Var::Sem(_) if h.depth == 0 => h.tag(1),
            Var::Sem(x) => {
                h.tag(2);
                h.u32(sem_hash_at(x, h.depth - 1));
            }
            Var::Rec(i) => {
                h.tag(3);
                h.u32(*i);
            }
        }
    }
}

impl StructuralHash for NumType {
    fn structural_hash(&self, h: &mut StructuralHasher) {
        h.tag(match self {
            NumType::Int32 => 0,
            NumType::Int64 => 1,
            NumType::Float32 => 2,
            NumType::Float64 => 3,
        })
    }
}

impl StructuralHash for HeapType {
    fn structural_hash(&self, h: &mut StructuralHasher) {
        match self {
            HeapType::Ht(ht) => {
                h.tag(0);
                h.tag(match ht {
                    AbsHeapType::Any => 0,
                    AbsHeapType::Eq => 1,
                    AbsHeapType::I31 => 2,
                    AbsHeapType::Data => 3,
                    AbsHeapType::Func => 4,
                    AbsHeapType::Extern => 5,
                    AbsHeapType::Bot => 6,
                });
            }
            HeapType::Def(x) => {
                h.tag(1);
                x.structural_hash(h);
            }
            HeapType::Rtt(x) => {
                h.tag(2);
                x.structural_hash(h);
            }
        }
    }
}

impl StructuralHash for ValType {
    fn structural_hash(&self, h: &mut StructuralHasher) {
        match self {
            ValType::Num(t) => {
                h.tag(0);
                t.structural_hash(h);
            }
            ValType::Ref(t) => {
                h.tag(1);
                h.tag(t.nullable as u8);
                t.ht.structural_hash(h);
            }
            ValType::Bot => h.tag(2),
        }
    }
}

impl StructuralHash for FieldType {
    fn structural_hash(&self, h: &mut StructuralHasher) {
        h.tag(match self.0 {
            Mut::Const => 0,
            Mut::Var => 1,
        });
        match &self.1 {
            StorageType::ValType(t) => {
                h.tag(0);
                t.structural_hash(h);
            }
            StorageType::PackType(p) => {
                h.tag(1);
                h.u32(p.size());
            }
        }
    }
}

impl StructuralHash for StrType {
    fn structural_hash(&self, h: &mut StructuralHasher) {
        match self {
            StrType::Struct(StructType(fts)) => {
                h.tag(0);
                fts.structural_hash(h);
            }
            StrType::Array(ArrayType(ft)) => {
                h.tag(1);
                ft.structural_hash(h);
            }
            StrType::Func(ft) => {
                h.tag(2);
                ft.parameters.structural_hash(h);
                ft.results.structural_hash(h);
            }
        }
    }
}

impl StructuralHash for SubType {
    fn structural_hash(&self, h: &mut StructuralHasher) {
        self.supertypes.structural_hash(h);
        self.strtype.structural_hash(h);
    }
}

impl StructuralHash for CtxType {
    fn structural_hash(&self, h: &mut StructuralHasher) {
        match self {
            CtxType::Sub(st) => {
                h.tag(0);
                st.structural_hash(h);
            }
            CtxType::Rec(group, i) => {
                h.tag(1);
                h.u32(group_hash_at(group, h.depth));
                h.u32(*i);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash_of<T: StructuralHash + ?Sized>(t: &T) -> u32 {
        let mut h = StructuralHasher::new();
        t.structural_hash(&mut h);
        h.finish()
    }

    #[test]
    fn shape_determines_hash() {
        let a = ValType::Num(NumType::Int32);
        let b = ValType::Num(NumType::Int64);
        assert_eq!(hash_of(&a), hash_of(&a.clone()));
        assert_ne!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn identities_with_equal_definitions_hash_equal() {
        let ct = CtxType::Sub(SubType::new(StrType::Array(ArrayType(FieldType(
            Mut::Var,
            StorageType::PackType(PackType::I8),
        )))));
        let x = SemVar::fresh();
        let y = SemVar::fresh();
        x.define(ct.clone());
        y.define(ct);

        assert_ne!(x, y);
        assert_eq!(sem_hash(&x), sem_hash(&y));
    }

    fn struct_of(fields: Vec<ValType>) -> SubType {
        SubType::new(StrType::Struct(StructType(
            fields
                .into_iter()
                .map(|t| FieldType(Mut::Const, StorageType::ValType(t)))
                .collect(),
        )))
    }

    // type i refers to type i + 1; the last one holds a single field of type `last`
    fn chain(len: u32, last: NumType) -> Vec<SemVar> {
        let mut dts: Vec<DefType> = (1..len)
            .map(|x| {
                DefType::Sub(struct_of(vec![ValType::Ref(RefType::new(
                    true,
                    HeapType::Def(Var::Syn(x)),
                ))]))
            })
            .collect();
        dts.push(DefType::Sub(struct_of(vec![ValType::Num(last)])));
        crate::sem_def_types(&dts)
    }

    #[test]
    fn hash_values_are_fixed() {
        let x = SemVar::fresh();
        x.define(CtxType::Sub(struct_of(vec![])));
        assert_eq!(sem_hash(&x), 0xe38a6876);

        let y = SemVar::fresh();
        y.define(CtxType::Sub(struct_of(vec![ValType::Num(NumType::Int32)])));
        assert_eq!(sem_hash(&y), 0x1d117959);
    }

    #[test]
    fn references_count_up_to_depth() {
        let near_a = chain(DEPTH + 1, NumType::Int32);
        let near_b = chain(DEPTH + 1, NumType::Int64);
        assert_ne!(sem_hash(&near_a[0]), sem_hash(&near_b[0]));

        let far_a = chain(DEPTH + 2, NumType::Int32);
        let far_b = chain(DEPTH + 2, NumType::Int64);
        assert_eq!(sem_hash(&far_a[0]), sem_hash(&far_b[0]));
        assert_ne!(sem_hash(&far_a[1]), sem_hash(&far_b[1]));
    }

    #[test]
    fn self_reference_terminates() {
        let x = SemVar::fresh();
        x.define(CtxType::Sub(SubType::new(StrType::Struct(StructType(vec![
            FieldType(
                Mut::Const,
                StorageType::ValType(ValType::Ref(RefType::new(
                    true,
                    HeapType::Def(Var::Sem(x.clone())),
                ))),
            ),
        ])))));

        assert_eq!(sem_hash(&x), sem_hash(&x));
    }
}
