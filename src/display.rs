//! Canonical text of the type grammar.
//!
//! Printing always terminates, including for self-referential and mutually recursive types:
//! an identity prints as the structural hash of its definition rather than the definition
//! itself, and a recursive group is tied before its members are printed, so references between
//! members show up as `rec.<i>`.
use crate::hash::sem_hash;
use crate::types::*;
use crate::var::{SemVar, Var};
use std::fmt::{self, Display, Formatter};

fn write_joined<T: Display>(f: &mut Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, t) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{t}")?;
    }
    Ok(())
}

fn write_result_type(f: &mut Formatter<'_>, ts: &[ValType]) -> fmt::Result {
    f.write_str("[")?;
    write_joined(f, ts)?;
    f.write_str("]")
}

fn write_mut(f: &mut Formatter<'_>, m: Mut, t: &dyn Display) -> fmt::Result {
    match m {
        Mut::Const => write!(f, "{t}"),
        Mut::Var => write!(f, "(mut {t})"),
    }
}

fn write_rec(f: &mut Formatter<'_>, sts: &[SubType]) -> fmt::Result {
    f.write_str("rec")?;
    for st in sts {
        write!(f, " ({st})")?;
    }
    Ok(())
}

impl Display for SemVar {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08x}", sem_hash(self))
    }
}

impl Display for Var {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Var::Syn(i) => write!(f, "{i}"),
            Var::Sem(x) => write!(f, "{x}"),
            Var::Rec(i) => write!(f, "rec.{i}"),
        }
    }
}

impl Display for NumType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NumType::Int32 => "i32",
            NumType::Int64 => "i64",
            NumType::Float32 => "f32",
            NumType::Float64 => "f64",
        })
    }
}

impl Display for AbsHeapType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AbsHeapType::Any => "any",
            AbsHeapType::Eq => "eq",
            AbsHeapType::I31 => "i31",
            AbsHeapType::Data => "data",
            AbsHeapType::Func => "func",
            AbsHeapType::Extern => "extern",
            AbsHeapType::Bot => "bot",
        })
    }
}

impl Display for HeapType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            HeapType::Ht(ht) => write!(f, "{ht}"),
            HeapType::Def(x) => write!(f, "{x}"),
            HeapType::Rtt(x) => write!(f, "(rtt {x})"),
        }
    }
}

impl Display for RefType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.nullable {
            write!(f, "(ref null {})", self.ht)
        } else {
            write!(f, "(ref {})", self.ht)
        }
    }
}

impl Display for ValType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ValType::Num(t) => write!(f, "{t}"),
            ValType::Ref(t) => write!(f, "{t}"),
            ValType::Bot => f.write_str("bot"),
        }
    }
}

impl Display for PackType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PackType::I8 => "i8",
            PackType::I16 => "i16",
            PackType::I32 => "i32",
        })
    }
}

impl Display for StorageType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            StorageType::ValType(t) => write!(f, "{t}"),
            StorageType::PackType(p) => write!(f, "{p}"),
        }
    }
}

impl Display for FieldType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_mut(f, self.0, &self.1)
    }
}

impl Display for StructType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, ft) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "(field {ft})")?;
        }
        Ok(())
    }
}

impl Display for ArrayType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "(field {})", self.0)
    }
}

impl Display for FuncType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_result_type(f, &self.parameters)?;
        f.write_str(" -> ")?;
        write_result_type(f, &self.results)
    }
}

impl Display for StrType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            StrType::Struct(st) if st.0.is_empty() => f.write_str("struct"),
            StrType::Struct(st) => write!(f, "struct {st}"),
            StrType::Array(at) => write!(f, "array {at}"),
            StrType::Func(ft) => write!(f, "func {ft}"),
        }
    }
}

impl Display for SubType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.supertypes.is_empty() {
            return write!(f, "{}", self.strtype);
        }
        f.write_str("sub ")?;
        write_joined(f, &self.supertypes)?;
        write!(f, " ({})", self.strtype)
    }
}

impl Display for DefType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DefType::Sub(st) => write!(f, "{st}"),
            DefType::Rec(sts) => write_rec(f, sts),
        }
    }
}

impl Display for CtxType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CtxType::Sub(st) => write!(f, "{st}"),
            CtxType::Rec(group, i) => {
                f.write_str("(")?;
                write_rec(f, &group.tie())?;
                write!(f, ").{i}")
            }
        }
    }
}

impl Display for Limits {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "{} {max}", self.min),
            None => write!(f, "{}", self.min),
        }
    }
}

impl Display for TableType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.limits, self.reftype)
    }
}

impl Display for MemType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.limits)
    }
}

impl Display for GlobalType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_mut(f, self.0, &self.1)
    }
}

impl Display for ExternType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ExternType::Func(x) => write!(f, "func {x}"),
            ExternType::Table(tt) => write!(f, "table {tt}"),
            ExternType::Mem(mt) => write!(f, "memory {mt}"),
            ExternType::Global(gt) => write!(f, "global {gt}"),
        }
    }
}

// quotes and backslashes are escaped; control and non-ASCII code points become hex escapes
impl Display for Name {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for &c in &self.0 {
            match c {
                0x22 => f.write_str("\\\"")?,
                0x5C => f.write_str("\\\\")?,
                0x20..0x7F => write!(f, "{}", c as u8 as char)?,
                _ => write!(f, "\\u{{{c:02x}}}")?,
            }
        }
        Ok(())
    }
}

impl Display for ImportType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" \"{}\" : {}", self.module, self.name, self.desc)
    }
}

impl Display for ExportType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" : {}", self.name, self.desc)
    }
}

impl Display for ModuleType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        // entries are labeled with the type index of their first member
        let mut x = 0;
        for dt in &self.types {
            writeln!(f, "type {x} = {dt}")?;
            x += dt.len();
        }
        for it in &self.imports {
            writeln!(f, "import {it}")?;
        }
        for et in &self.exports {
            writeln!(f, "export {et}")?;
        }
        Ok(())
    }
}
