//! Loading raw module types from a JSON description.
//!
//! This is where malformed input is rejected. Anything this module accepts only contains
//! syntactic variables within the bounds of its type section, so it can be resolved without
//! tripping any of the resolver's assertions.
//!
//! ```json
//! {
//!   "types": [
//!     { "rec": [
//!       { "struct": [{ "type": { "ref": 1, "null": true }, "mut": true }] },
//!       { "supertypes": [0], "array": { "type": { "packed": "i8" } } }
//!     ] },
//!     { "func": { "params": ["i32", { "ref": "any" }], "results": ["f64"] } }
//!   ],
//!   "imports": [{ "module": "env", "name": "f", "type": { "func": 2 } }],
//!   "exports": [{ "name": "t", "type": { "table": { "min": 1, "elem": { "ref": "func", "null": true } } } }]
//! }
//! ```
use crate::keyword::FromKeyword;
use crate::types::*;
use crate::var::Var;
use serde::Deserialize;
use std::io::Read;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadModuleTypeError {
    #[error("failed parsing module type description")]
    Parse(#[from] serde_json::Error),

    #[error("failed loading type section entry at position {position}")]
    LoadType { position: usize, source: LoadTypeError },

    #[error("failed loading import at position {position}")]
    LoadImport { position: usize, source: LoadTypeError },

    #[error("failed loading export at position {position}")]
    LoadExport { position: usize, source: LoadTypeError },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoadTypeError {
    #[error("unknown {kind} `{keyword}`: expected one of {expected}")]
    UnknownKeyword {
        kind: &'static str,
        keyword: String,
        expected: String,
    },

    #[error("type index {index} out of bounds for {count} types")]
    TypeIndexOutOfBounds { index: u32, count: u32 },

    #[error("subtype must have exactly one of `struct`, `array` or `func`; got {found}")]
    SubTypeBody { found: usize },
}

pub fn module_type_from_str(s: &str) -> Result<ModuleType, LoadModuleTypeError> {
    load(serde_json::from_str(s)?)
}

pub fn module_type_from_reader(r: impl Read) -> Result<ModuleType, LoadModuleTypeError> {
    load(serde_json::from_reader(r)?)
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ModuleDesc {
    #[serde(default)]
    types: Vec<DefDesc>,
    #[serde(default)]
    imports: Vec<ImportDesc>,
    #[serde(default)]
    exports: Vec<ExportDesc>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DefDesc {
    Rec { rec: Vec<SubDesc> },
    Sub(SubDesc),
}

impl DefDesc {
    fn len(&self) -> usize {
        match self {
            DefDesc::Rec { rec } => rec.len(),
            DefDesc::Sub(_) => 1,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SubDesc {
    #[serde(default)]
    supertypes: Vec<u32>,
    #[serde(rename = "struct")]
    structure: Option<Vec<FieldDesc>>,
    array: Option<FieldDesc>,
    func: Option<FuncDesc>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FuncDesc {
    #[serde(default)]
    params: Vec<ValDesc>,
    #[serde(default)]
    results: Vec<ValDesc>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldDesc {
    #[serde(rename = "type")]
    storage: StorageDesc,
    #[serde(default, rename = "mut")]
    mutable: bool,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StorageDesc {
    Packed { packed: String },
    Val(ValDesc),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ValDesc {
    Keyword(String),
    Ref(RefDesc),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RefDesc {
    #[serde(rename = "ref")]
    heap: HeapDesc,
    #[serde(default)]
    null: bool,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HeapDesc {
    Index(u32),
    Keyword(String),
    Rtt { rtt: u32 },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LimitsDesc {
    min: u32,
    max: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TableDesc {
    min: u32,
    max: Option<u32>,
    elem: RefDesc,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GlobalDesc {
    #[serde(rename = "type")]
    valtype: ValDesc,
    #[serde(default, rename = "mut")]
    mutable: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ExternDesc {
    Func(u32),
    Table(TableDesc),
    Memory(LimitsDesc),
    Global(GlobalDesc),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ImportDesc {
    module: String,
    name: String,
    #[serde(rename = "type")]
    desc: ExternDesc,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ExportDesc {
    name: String,
    #[serde(rename = "type")]
    desc: ExternDesc,
}

fn load(desc: ModuleDesc) -> Result<ModuleType, LoadModuleTypeError> {
    let count = desc.types.iter().map(DefDesc::len).sum::<usize>() as u32;
    let loader = Loader { count };

    let types: Vec<DefType> = desc
        .types
        .iter()
        .enumerate()
        .map(|(position, dt)| {
            loader
                .def_type(dt)
                .map_err(|source| LoadModuleTypeError::LoadType { position, source })
        })
        .collect::<Result<_, _>>()?;

    let imports: Vec<ImportType> = desc
        .imports
        .iter()
        .enumerate()
        .map(|(position, it)| -> Result<_, LoadModuleTypeError> {
            Ok(ImportType {
                module: Name::from(it.module.as_str()),
                name: Name::from(it.name.as_str()),
                desc: loader
                    .extern_type(&it.desc)
                    .map_err(|source| LoadModuleTypeError::LoadImport { position, source })?,
            })
        })
        .collect::<Result<_, _>>()?;

    let exports: Vec<ExportType> = desc
        .exports
        .iter()
        .enumerate()
        .map(|(position, et)| -> Result<_, LoadModuleTypeError> {
            Ok(ExportType {
                name: Name::from(et.name.as_str()),
                desc: loader
                    .extern_type(&et.desc)
                    .map_err(|source| LoadModuleTypeError::LoadExport { position, source })?,
            })
        })
        .collect::<Result<_, _>>()?;

    Ok(ModuleType {
        types,
        imports,
        exports,
    })
}

fn keyword<T: FromKeyword>(s: &str) -> Result<T, LoadTypeError> {
    T::from_keyword(s).ok_or_else(|| LoadTypeError::UnknownKeyword {
        kind: T::KIND,
        keyword: s.to_owned(),
        expected: T::keywords_formatted(),
    })
}

struct Loader {
    // number of type indices in the type section
    count: u32,
}

impl Loader {
    fn var(&self, index: u32) -> Result<Var, LoadTypeError> {
        if index >= self.count {
            return Err(LoadTypeError::TypeIndexOutOfBounds {
                index,
                count: self.count,
            });
        }
        Ok(Var::Syn(index))
    }

    fn heap_type(&self, desc: &HeapDesc) -> Result<HeapType, LoadTypeError> {
        Ok(match desc {
            HeapDesc::Index(x) => HeapType::Def(self.var(*x)?),
            HeapDesc::Keyword(k) => HeapType::Ht(keyword(k)?),
            HeapDesc::Rtt { rtt } => HeapType::Rtt(self.var(*rtt)?),
        })
    }

    fn ref_type(&self, desc: &RefDesc) -> Result<RefType, LoadTypeError> {
        Ok(RefType {
            nullable: desc.null,
            ht: self.heap_type(&desc.heap)?,
        })
    }

    fn val_type(&self, desc: &ValDesc) -> Result<ValType, LoadTypeError> {
        Ok(match desc {
            ValDesc::Keyword(k) if k == "bot" => ValType::Bot,
            ValDesc::Keyword(k) => ValType::Num(keyword(k)?),
            ValDesc::Ref(r) => ValType::Ref(self.ref_type(r)?),
        })
    }

    fn val_types(&self, descs: &[ValDesc]) -> Result<Vec<ValType>, LoadTypeError> {
        descs.iter().map(|d| self.val_type(d)).collect()
    }

    fn field_type(&self, desc: &FieldDesc) -> Result<FieldType, LoadTypeError> {
        let storage = match &desc.storage {
            StorageDesc::Packed { packed } => StorageType::PackType(keyword(packed)?),
            StorageDesc::Val(t) => StorageType::ValType(self.val_type(t)?),
        };
        let m = if desc.mutable { Mut::Var } else { Mut::Const };
        Ok(FieldType(m, storage))
    }

    fn sub_type(&self, desc: &SubDesc) -> Result<SubType, LoadTypeError> {
        let supertypes: Vec<Var> = desc
            .supertypes
            .iter()
            .map(|x| self.var(*x))
            .collect::<Result<_, _>>()?;

        let strtype = match (&desc.structure, &desc.array, &desc.func) {
            (Some(fields), None, None) => StrType::Struct(StructType(
                fields
                    .iter()
                    .map(|f| self.field_type(f))
                    .collect::<Result<_, _>>()?,
            )),
            (None, Some(field), None) => StrType::Array(ArrayType(self.field_type(field)?)),
            (None, None, Some(func)) => StrType::Func(FuncType {
                parameters: self.val_types(&func.params)?,
                results: self.val_types(&func.results)?,
            }),
            (s, a, f) => {
                let found = [s.is_some(), a.is_some(), f.is_some()]
                    .into_iter()
                    .filter(|b| *b)
                    .count();
                return Err(LoadTypeError::SubTypeBody { found });
            }
        };

        Ok(SubType {
            supertypes,
            strtype,
        })
    }

    fn def_type(&self, desc: &DefDesc) -> Result<DefType, LoadTypeError> {
        Ok(match desc {
            DefDesc::Rec { rec } => DefType::Rec(
                rec.iter()
                    .map(|st| self.sub_type(st))
                    .collect::<Result<_, _>>()?,
            ),
            DefDesc::Sub(st) => DefType::Sub(self.sub_type(st)?),
        })
    }

    fn extern_type(&self, desc: &ExternDesc) -> Result<ExternType, LoadTypeError> {
        Ok(match desc {
            ExternDesc::Func(x) => ExternType::Func(self.var(*x)?),
            ExternDesc::Table(t) => ExternType::Table(TableType {
                limits: Limits {
                    min: t.min,
                    max: t.max,
                },
                reftype: self.ref_type(&t.elem)?,
            }),
            ExternDesc::Memory(l) => ExternType::Mem(MemType {
                limits: Limits {
                    min: l.min,
                    max: l.max,
                },
            }),
            ExternDesc::Global(g) => {
                let m = if g.mutable { Mut::Var } else { Mut::Const };
                ExternType::Global(GlobalType(m, self.val_type(&g.valtype)?))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn loads_group_with_forward_reference() {
        let mt = module_type_from_str(
            r#"{ "types": [
                { "rec": [
                    { "struct": [{ "type": { "ref": 1, "null": true } }] },
                    { "supertypes": [0], "array": { "type": { "packed": "i8" }, "mut": true } }
                ] }
            ] }"#,
        )
        .unwrap();

        assert_eq!(
            mt.types,
            vec![DefType::Rec(vec![
                SubType::new(StrType::Struct(StructType(vec![FieldType(
                    Mut::Const,
                    StorageType::ValType(ValType::Ref(RefType::new(
                        true,
                        HeapType::Def(Var::Syn(1))
                    ))),
                )]))),
                SubType {
                    supertypes: vec![Var::Syn(0)],
                    strtype: StrType::Array(ArrayType(FieldType(
                        Mut::Var,
                        StorageType::PackType(PackType::I8)
                    ))),
                },
            ])]
        );
    }

    #[test]
    fn rejects_out_of_bounds_index() {
        let err = module_type_from_str(
            r#"{ "types": [{ "func": { "params": [{ "ref": 1 }] } }] }"#,
        )
        .unwrap_err();

        match err {
            LoadModuleTypeError::LoadType { position, source } => {
                assert_eq!(position, 0);
                assert_eq!(
                    source,
                    LoadTypeError::TypeIndexOutOfBounds { index: 1, count: 1 }
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_keyword() {
        let err = module_type_from_str(
            r#"{ "types": [], "exports": [{ "name": "g", "type": { "global": { "type": "v128" } } }] }"#,
        )
        .unwrap_err();

        match err {
            LoadModuleTypeError::LoadExport {
                position: 0,
                source: LoadTypeError::UnknownKeyword { kind, keyword, .. },
            } => {
                assert_eq!(kind, "number type");
                assert_eq!(keyword, "v128");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_ambiguous_subtype() {
        let err = module_type_from_str(
            r#"{ "types": [{ "struct": [], "func": {} }] }"#,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            LoadModuleTypeError::LoadType {
                source: LoadTypeError::SubTypeBody { found: 2 },
                ..
            }
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = module_type_from_str(r#"{ "types": [ }"#).unwrap_err();
        assert!(matches!(err, LoadModuleTypeError::Parse(_)));
    }
}
