// How return flights take part in matching and rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnPolicy {
    /// Return flight numbers must match as well as onward ones.
    #[default]
    Strict,
    /// Only onward flight numbers decide a match; return differences are
    /// shown inside the diff.
    Lenient,
}

// Diff configuration options
#[derive(Debug, Clone, Default)]
pub struct DiffConfig {
    pub return_policy: ReturnPolicy,
}

impl DiffConfig {
    pub fn ignore_return(ignore: bool) -> Self {
        Self {
            return_policy: if ignore {
                ReturnPolicy::Lenient
            } else {
                ReturnPolicy::Strict
            },
        }
    }
}
