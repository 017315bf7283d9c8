use super::externtype::{ExportType, ImportType};
use super::rectype::DefType;

/// The signature of a module: its type section together with what it imports and exports.
///
/// After semantic resolution `types` is empty; declarations are then only reachable through
/// the identities the imports and exports refer to.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct ModuleType {
    pub types: Vec<DefType>,
    pub imports: Vec<ImportType>,
    pub exports: Vec<ExportType>,
}
