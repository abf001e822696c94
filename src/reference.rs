//! The `Reference` type.

use crate::model::WordModel;

word_view! {
    /// A word interpreted as an object reference. The all zero pattern is the null reference.
    Reference
}

impl_word_view!(Reference, "*", unsigned);

impl<M: WordModel> Reference<M> {
    /// The null reference.
    pub fn null() -> Self {
        Self::zero()
    }
    /// Whether this is the null reference.
    pub fn is_null(self: Self) -> bool {
        self.is_zero()
    }
}
