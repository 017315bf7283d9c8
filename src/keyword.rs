//! Keyword tables for the grammar nodes denoted by a single word in canonical text.
use crate::types::heaptype::AbsHeapType;
use crate::types::numtype::NumType;
use crate::types::strtype::PackType;
use phf::phf_ordered_map;

pub(crate) trait FromKeyword
where
    Self: Sized + Copy + std::fmt::Debug + 'static,
{
    // what the keyword denotes, for error messages
    const KIND: &'static str;

    // defines the mapping between keywords and the corresponding variant
    fn keywords() -> &'static phf::OrderedMap<&'static str, Self>;

    fn keywords_formatted() -> String {
        Self::keywords()
            .keys()
            .map(|k| format!("`{k}`"))
            .collect::<Vec<String>>()
            .join(", ")
    }

    fn from_keyword(s: &str) -> Option<Self> {
        Self::keywords().get(s).copied()
    }
}

#[expect(non_upper_case_globals)]
static NumType_KEYWORDS: phf::OrderedMap<&'static str, NumType> = phf_ordered_map! {
    "i32" => NumType::Int32,
    "i64" => NumType::Int64,
    "f32" => NumType::Float32,
    "f64" => NumType::Float64,
};

impl FromKeyword for NumType {
    const KIND: &'static str = "number type";

    fn keywords() -> &'static phf::OrderedMap<&'static str, Self> {
        &NumType_KEYWORDS
    }
}

#[expect(non_upper_case_globals)]
static PackType_KEYWORDS: phf::OrderedMap<&'static str, PackType> = phf_ordered_map! {
    "i8" => PackType::I8,
    "i16" => PackType::I16,
    "i32" => PackType::I32,
};

impl FromKeyword for PackType {
    const KIND: &'static str = "packed type";

    fn keywords() -> &'static phf::OrderedMap<&'static str, Self> {
        &PackType_KEYWORDS
    }
}

#[expect(non_upper_case_globals)]
static AbsHeapType_KEYWORDS: phf::OrderedMap<&'static str, AbsHeapType> = phf_ordered_map! {
    "any" => AbsHeapType::Any,
    "eq" => AbsHeapType::Eq,
    "i31" => AbsHeapType::I31,
    "data" => AbsHeapType::Data,
    "func" => AbsHeapType::Func,
    "extern" => AbsHeapType::Extern,
    "bot" => AbsHeapType::Bot,
};

impl FromKeyword for AbsHeapType {
    const KIND: &'static str = "heap type";

    fn keywords() -> &'static phf::OrderedMap<&'static str, Self> {
        &AbsHeapType_KEYWORDS
    }
}
