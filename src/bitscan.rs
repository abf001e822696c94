//! Bit scanning over words.

use crate::model::WordModel;
use crate::word::Word;

/// Number of leading zero bits within the word width.
pub fn number_of_leading_zeros<M: WordModel>(word: Word<M>) -> u32 {
    word.bits().leading_zeros() - (64 - M::BITS)
}

/// Number of trailing zero bits within the word width. A zero word has `M::BITS` trailing zeros.
pub fn number_of_trailing_zeros<M: WordModel>(word: Word<M>) -> u32 {
    word.bits().trailing_zeros().min(M::BITS)
}

/// Returns the index of the least significant bit set in the given word, or -1 if the word is zero.
pub fn least_significant_bit_set<M: WordModel>(word: Word<M>) -> i32 {
    if word.is_zero() {
        -1
    } else {
        number_of_trailing_zeros(word) as i32
    }
}

/// Returns the index of the most significant bit set in the given word, or -1 if the word is zero.
pub fn most_significant_bit_set<M: WordModel>(word: Word<M>) -> i32 {
    if word.is_zero() {
        -1
    } else {
        (M::BITS - 1 - number_of_leading_zeros(word)) as i32
    }
}
