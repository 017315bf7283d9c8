use super::globaltype::GlobalType;
use super::memtype::MemType;
use super::name::Name;
use super::tabletype::TableType;
use crate::var::Var;

/// External types classify imports and exports with their respective types. A function is
/// described by a use of its declared type.
///
/// <https://www.w3.org/TR/wasm-core-2/#external-types>
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub enum ExternType {
    Func(Var),
    Table(TableType),
    Mem(MemType),
    Global(GlobalType),
}

/// Imports are labeled by a two-level name space: a module name and the name of an entity
/// within that module.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct ImportType {
    pub module: Name,
    pub name: Name,
    pub desc: ExternType,
}

#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct ExportType {
    pub name: Name,
    pub desc: ExternType,
}
