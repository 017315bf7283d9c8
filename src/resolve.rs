//! Resolution of a module's type section into type identities.
//!
//! Resolution happens in two phases. First the declarations are flattened into one
//! [`CtxType`] per type index, with the members of each recursive group referring to one
//! another through syntactic variables. Then every index gets a fresh, still undefined
//! [`SemVar`], and each flattened entry is rewritten so that syntactic variables become those
//! identities before it is stored in its own cell. Since all identities exist before any is
//! defined, forward references and mutual recursion need no special treatment.
use crate::subst::{Subst, Substitution, sem_var};
use crate::types::{CtxType, DefType, ModuleType, RecGroup};
use crate::var::{SemVar, Var};
use tracing::{debug, trace};

/// The resolved entries for one type section entry whose first type index is `start`.
///
/// Members of a recursive group all point into one shared list in which member `k` is denoted
/// by `SynVar(start + k)`, the index under which the rest of the module refers to it.
pub fn ctx_types_of_def_type(start: u32, dt: &DefType) -> Vec<CtxType> {
    match dt {
        DefType::Sub(st) => vec![CtxType::Sub(st.clone())],
        DefType::Rec(sts) => {
            let group = RecGroup::new(
                sts.iter()
                    .zip(start..)
                    .map(|(st, x)| (Var::Syn(x), st.clone()))
                    .collect(),
            );
            (0..group.len() as u32)
                .map(|i| CtxType::Rec(group.clone(), i))
                .collect()
        }
    }
}

/// Flattens a whole type section. Entry `i` of the result is the declaration with type index
/// `i`.
pub fn ctx_types_of_def_types(dts: &[DefType]) -> Vec<CtxType> {
    let mut cts = Vec::new();
    for dt in dts {
        let start = cts.len() as u32;
        cts.extend(ctx_types_of_def_type(start, dt));
    }
    cts
}

/// Resolves a type section, returning the identity of each type index.
///
/// # Memory
///
/// An identity whose definition refers back to itself, directly or through other identities,
/// forms a reference cycle and is never freed, even after every returned handle is dropped.
/// This includes every member of a recursive group. Each call leaks at most the identities it
/// allocates, so resolve a module once and share the result.
///
/// # Panics
///
/// Panics if a declaration already contains semantic variables, or refers to a type index past
/// the end of the section.
pub fn sem_def_types(dts: &[DefType]) -> Vec<SemVar> {
    let cts = ctx_types_of_def_types(dts);
    let cells: Vec<SemVar> = cts.iter().map(|_| SemVar::fresh()).collect();
    debug!(
        entries = dts.len(),
        types = cells.len(),
        "allocated type identities"
    );

    // no cell is read before the loop has defined all of them
    {
        let mut s = Substitution::new(sem_var(&cells));
        for (i, (ct, cell)) in cts.iter().zip(&cells).enumerate() {
            cell.define(ct.subst(&mut s));
            trace!(index = i, "defined type identity");
        }
    }

    cells
}

/// Resolves a module type.
///
/// The result has an empty type section: every reference from the imports and exports now
/// denotes the identity of the declaration it used to index. Self-referential identities are
/// never freed; see [`sem_def_types`].
///
/// # Panics
///
/// Panics under the same conditions as [`sem_def_types`], or if an import or export refers to a
/// type index past the end of the type section.
pub fn sem_module_type(mt: &ModuleType) -> ModuleType {
    let cells = sem_def_types(&mt.types);

    let mut s = Substitution::new(sem_var(&cells));
    let imports = mt.imports.subst(&mut s);
    let exports = mt.exports.subst(&mut s);
    debug!(
        imports = imports.len(),
        exports = exports.len(),
        "resolved module type"
    );

    ModuleType {
        types: vec![],
        imports,
        exports,
    }
}
