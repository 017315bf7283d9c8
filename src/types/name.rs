/// An import or export name, kept as the raw sequence of code points it was decoded from.
///
/// <https://www.w3.org/TR/wasm-core-2/#names>
#[derive(Debug, PartialEq, Eq, Clone, Hash, Default)]
pub struct Name(pub Vec<u32>);

impl From<&str> for Name {
    fn from(s: &str) -> Self {
        Self(s.chars().map(u32::from).collect())
    }
}
