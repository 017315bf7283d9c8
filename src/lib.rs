//! Types for WebAssembly modules with garbage-collected references.
//!
//! This library implements the type grammar of the GC proposal (structures, arrays, function
//! signatures and iso-recursive groups of them) together with resolution of a module's type
//! section into type identities.
//!
//! Types are nominal: two declarations are the same type only if they are the same
//! declaration. A decoder hands over the type section with references expressed as indices
//! ([`Var::Syn`]); [`sem_module_type`] turns those into identities ([`Var::Sem`]) that compare
//! by identity, support forward and mutually recursive references, and print to finite text
//! even when the types they denote are cyclic.
//!
//! ```
//! use watype::types::*;
//! use watype::{Var, sem_def_types};
//!
//! // (rec (type (struct (field (ref null 1)))) (type (struct (field (ref null 0)))))
//! let node = |x| {
//!     SubType::new(StrType::Struct(StructType(vec![FieldType(
//!         Mut::Const,
//!         StorageType::ValType(ValType::Ref(RefType::new(true, HeapType::Def(Var::Syn(x))))),
//!     )])))
//! };
//! let ids = sem_def_types(&[DefType::Rec(vec![node(1), node(0)])]);
//!
//! assert_eq!(
//!     ids[0].ctx_type().to_string(),
//!     "(rec (struct (field (ref null rec.1))) (struct (field (ref null rec.0)))).0"
//! );
//! ```
#![forbid(unsafe_code)]

pub mod deferred;
mod display;
pub mod free;
pub mod hash;
mod keyword;
pub mod load;
pub mod resolve;
pub mod subst;
pub mod types;
pub mod var;

pub use resolve::{ctx_types_of_def_type, ctx_types_of_def_types, sem_def_types, sem_module_type};
pub use var::{SemVar, Var};
