//! The `Size` type.

use crate::model::WordModel;

word_view! {
    /// A word interpreted as an unsigned byte count.
    Size
}

impl_word_view!(Size, "#", unsigned);
impl_unsigned_arithmetic!(Size);

impl<M: WordModel> Size<M> {
    /// Returns the size as a host index. Panics if it does not fit.
    pub fn to_usize(self: Self) -> usize {
        match usize::try_from(self.bits()) {
            Ok(size) => size,
            Err(_) => panic!("Size: {} does not fit a host index", self),
        }
    }
}
