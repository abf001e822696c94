//! The `Offset` type: a signed displacement between addresses.

use crate::model::WordModel;
use crate::word::Operand;

word_view! {
    /// A word interpreted as a signed displacement. Offsets order and divide as signed numbers.
    Offset
}

impl_word_view!(Offset, "&", signed);

impl<M: WordModel> Offset<M> {
    /// Wrapping addition.
    #[cfg_attr(not(debug_assertions), inline(always))]
    pub fn plus<T: Operand<M>>(self: Self, addend: T) -> Self {
        Self::from_bits(self.bits().wrapping_add(addend.operand_bits()))
    }
    /// Wrapping subtraction.
    #[cfg_attr(not(debug_assertions), inline(always))]
    pub fn minus<T: Operand<M>>(self: Self, subtrahend: T) -> Self {
        Self::from_bits(self.bits().wrapping_sub(subtrahend.operand_bits()))
    }
    /// Wrapping multiplication.
    #[cfg_attr(not(debug_assertions), inline(always))]
    pub fn times<T: Operand<M>>(self: Self, factor: T) -> Self {
        Self::from_bits(self.bits().wrapping_mul(factor.operand_bits()))
    }
    /// Signed division, truncating towards zero. The divisor must not be zero.
    pub fn divided_by<T: Operand<M>>(self: Self, divisor: T) -> Self {
        Self::from_long(self.to_long().wrapping_div(Self::signed_divisor(divisor)))
    }
    /// Signed remainder, carrying the sign of the dividend. The divisor must not be zero.
    pub fn remainder<T: Operand<M>>(self: Self, divisor: T) -> Self {
        Self::from_long(self.to_long().wrapping_rem(Self::signed_divisor(divisor)))
    }
    fn signed_divisor<T: Operand<M>>(divisor: T) -> i64 {
        let divisor = M::sign_extend(divisor.operand_bits());
        assert!(divisor != 0, "Offset: division by zero");
        divisor
    }
    /// Two's complement negation.
    pub fn negate(self: Self) -> Self {
        Self::from_bits(self.bits().wrapping_neg())
    }
    /// Whether the sign bit is set.
    pub fn is_negative(self: Self) -> bool {
        self.to_long() < 0
    }
    /// Bitwise and.
    pub fn and<T: Operand<M>>(self: Self, operand: T) -> Self {
        Self::from_bits(self.bits() & operand.operand_bits())
    }
    /// Bitwise or.
    pub fn or<T: Operand<M>>(self: Self, operand: T) -> Self {
        Self::from_bits(self.bits() | operand.operand_bits())
    }
    /// Bitwise exclusive or.
    pub fn xor<T: Operand<M>>(self: Self, operand: T) -> Self {
        Self::from_bits(self.bits() ^ operand.operand_bits())
    }
    /// Bitwise complement.
    pub fn not(self: Self) -> Self {
        Self::from_bits(!self.bits())
    }
    /// Shifts left, shift distances are taken modulo the word width.
    pub fn shifted_left(self: Self, n_bits: u32) -> Self {
        Self::from_bits(self.bits() << (n_bits % M::BITS))
    }
    /// Shifts right, replicating the sign bit.
    pub fn shifted_right(self: Self, n_bits: u32) -> Self {
        Self::from_long(self.to_long() >> (n_bits % M::BITS))
    }
    /// Shifts right, filling with zeros.
    pub fn unsigned_shifted_right(self: Self, n_bits: u32) -> Self {
        Self::from_bits(self.bits() >> (n_bits % M::BITS))
    }
    /// Rounds up to the next multiple of `alignment`, which must be a power of two.
    pub fn aligned<T: Operand<M>>(self: Self, alignment: T) -> Self {
        let mask = Self::alignment_mask(alignment);
        Self::from_bits(self.bits().wrapping_add(mask) & !mask)
    }
    /// Whether this offset is a multiple of `alignment`, which must be a power of two.
    pub fn is_aligned<T: Operand<M>>(self: Self, alignment: T) -> bool {
        self.bits() & Self::alignment_mask(alignment) == 0
    }
    /// Rounds up to the next multiple of the word size.
    pub fn word_aligned(self: Self) -> Self {
        self.aligned(M::BYTES)
    }
    fn alignment_mask<T: Operand<M>>(alignment: T) -> u64 {
        let alignment = alignment.operand_bits() & M::MASK;
        debug_assert!(alignment.is_power_of_two(), "Offset: alignment {} is not a power of two", alignment);
        alignment.wrapping_sub(1)
    }
}

impl<M: WordModel> From<i32> for Offset<M> {
    fn from(value: i32) -> Self {
        Self::from_int(value)
    }
}

impl<M: WordModel> From<i64> for Offset<M> {
    fn from(value: i64) -> Self {
        Self::from_long(value)
    }
}

impl<M: WordModel, T: Operand<M>> std::ops::Add<T> for Offset<M> {
    type Output = Self;
    fn add(self: Self, rhs: T) -> Self {
        self.plus(rhs)
    }
}

impl<M: WordModel, T: Operand<M>> std::ops::Sub<T> for Offset<M> {
    type Output = Self;
    fn sub(self: Self, rhs: T) -> Self {
        self.minus(rhs)
    }
}

impl<M: WordModel, T: Operand<M>> std::ops::Mul<T> for Offset<M> {
    type Output = Self;
    fn mul(self: Self, rhs: T) -> Self {
        self.times(rhs)
    }
}

impl<M: WordModel, T: Operand<M>> std::ops::Div<T> for Offset<M> {
    type Output = Self;
    fn div(self: Self, rhs: T) -> Self {
        self.divided_by(rhs)
    }
}

impl<M: WordModel, T: Operand<M>> std::ops::Rem<T> for Offset<M> {
    type Output = Self;
    fn rem(self: Self, rhs: T) -> Self {
        self.remainder(rhs)
    }
}

impl<M: WordModel> std::ops::Neg for Offset<M> {
    type Output = Self;
    fn neg(self: Self) -> Self {
        self.negate()
    }
}

impl<M: WordModel, T: Operand<M>> std::ops::BitAnd<T> for Offset<M> {
    type Output = Self;
    fn bitand(self: Self, rhs: T) -> Self {
        self.and(rhs)
    }
}

impl<M: WordModel, T: Operand<M>> std::ops::BitOr<T> for Offset<M> {
    type Output = Self;
    fn bitor(self: Self, rhs: T) -> Self {
        self.or(rhs)
    }
}

impl<M: WordModel, T: Operand<M>> std::ops::BitXor<T> for Offset<M> {
    type Output = Self;
    fn bitxor(self: Self, rhs: T) -> Self {
        self.xor(rhs)
    }
}

impl<M: WordModel> std::ops::Not for Offset<M> {
    type Output = Self;
    fn not(self: Self) -> Self {
        Offset::not(self)
    }
}

impl<M: WordModel> std::ops::Shl<u32> for Offset<M> {
    type Output = Self;
    fn shl(self: Self, rhs: u32) -> Self {
        self.shifted_left(rhs)
    }
}

/// Arithmetic shift, like [`Offset::shifted_right`].
impl<M: WordModel> std::ops::Shr<u32> for Offset<M> {
    type Output = Self;
    fn shr(self: Self, rhs: u32) -> Self {
        self.shifted_right(rhs)
    }
}
