//! The type grammar.
//!
//! Every node is plain data. Declared types are referenced through [`Var`](crate::var::Var)s,
//! which are syntactic indices before resolution and cell identities after it.
pub mod numtype;
pub use numtype::NumType;

pub mod heaptype;
pub use heaptype::{AbsHeapType, HeapType};

pub mod reftype;
pub use reftype::RefType;

pub mod valtype;
pub use valtype::ValType;

pub mod functype;
pub use functype::FuncType;

pub mod strtype;
pub use strtype::{ArrayType, FieldType, Mut, PackType, StorageType, StrType, StrTypeMismatch, StructType};

pub mod rectype;
pub use rectype::{DefType, SubType};

pub mod ctxtype;
pub use ctxtype::{CtxType, RecGroup};

pub mod limits;
pub use limits::Limits;

pub mod tabletype;
pub use tabletype::TableType;

pub mod memtype;
pub use memtype::MemType;

pub mod globaltype;
pub use globaltype::GlobalType;

pub mod name;
pub use name::Name;

pub mod externtype;
pub use externtype::{ExportType, ExternType, ImportType};

pub mod moduletype;
pub use moduletype::ModuleType;
