/// Number types classify numeric values.
///
/// The types i32 and i64 classify 32 and 64 bit integers, respectively. Integers are not
/// inherently signed or unsigned, their interpretation is determined by individual operations.
///
/// The types f32 and f64 classify 32 and 64 bit floating-point data, respectively.
///
/// <https://www.w3.org/TR/wasm-core-2/#number-types>
/// <https://www.w3.org/TR/wasm-core-2/#binary-numtype>
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum NumType {
    Int32,
    Int64,
    Float32,
    Float64,
}

impl NumType {
    /// Width in bytes.
    pub fn size(self) -> u32 {
        match self {
            NumType::Int32 | NumType::Float32 => 4,
            NumType::Int64 | NumType::Float64 => 8,
        }
    }

    // zero is a value of every number type
    pub fn is_defaultable(self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes() {
        assert_eq!(NumType::Int32.size(), 4);
        assert_eq!(NumType::Float32.size(), 4);
        assert_eq!(NumType::Int64.size(), 8);
        assert_eq!(NumType::Float64.size(), 8);
    }
}
