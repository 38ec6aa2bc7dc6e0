/// Outcome of the syntactic phase of an eligibility analyzer.
///
/// Analyzers never fail: malformed or incomplete input is simply
/// [`Eligibility::Ineligible`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility<T> {
    Ineligible,
    /// Syntax allows the refactoring; the semantic model has the final say.
    NeedsSemantic,
    Eligible(T),
}

impl<T> Eligibility<T> {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Eligibility<U> {
        match self {
            Eligibility::Ineligible => Eligibility::Ineligible,
            Eligibility::NeedsSemantic => Eligibility::NeedsSemantic,
            Eligibility::Eligible(value) => Eligibility::Eligible(f(value)),
        }
    }

    pub fn eligible(self) -> Option<T> {
        match self {
            Eligibility::Eligible(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> From<Option<T>> for Eligibility<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Eligibility::Ineligible, Eligibility::Eligible)
    }
}
