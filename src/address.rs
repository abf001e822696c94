//! Unsigned word arithmetic and the `Address` type.

use crate::model::WordModel;
use crate::error::ParseResult;

/// Implements unsigned arithmetic, alignment and bit operations for a word view.
macro_rules! impl_unsigned_arithmetic {
    ($name:ident) => {

        impl<M: crate::model::WordModel> $name<M> {
            /// Wrapping addition.
            #[cfg_attr(not(debug_assertions), inline(always))]
            pub fn plus<T: crate::word::Operand<M>>(self: Self, addend: T) -> Self {
                Self::from_bits(self.bits().wrapping_add(addend.operand_bits()))
            }
            /// Wrapping subtraction.
            #[cfg_attr(not(debug_assertions), inline(always))]
            pub fn minus<T: crate::word::Operand<M>>(self: Self, subtrahend: T) -> Self {
                Self::from_bits(self.bits().wrapping_sub(subtrahend.operand_bits()))
            }
            /// Wrapping multiplication.
            #[cfg_attr(not(debug_assertions), inline(always))]
            pub fn times<T: crate::word::Operand<M>>(self: Self, factor: T) -> Self {
                Self::from_bits(self.bits().wrapping_mul(factor.operand_bits()))
            }
            /// Unsigned division. The divisor is interpreted as an unsigned word and must not be zero.
            pub fn divided_by<T: crate::word::Operand<M>>(self: Self, divisor: T) -> Self {
                Self::from_bits(self.bits() / Self::unsigned_divisor(divisor))
            }
            /// Unsigned remainder. The divisor is interpreted as an unsigned word and must not be zero.
            pub fn remainder<T: crate::word::Operand<M>>(self: Self, divisor: T) -> Self {
                Self::from_bits(self.bits() % Self::unsigned_divisor(divisor))
            }
            fn unsigned_divisor<T: crate::word::Operand<M>>(divisor: T) -> u64 {
                let bits = divisor.operand_bits() & M::MASK;
                assert!(bits != 0, "{}: division by zero", stringify!($name));
                bits
            }
            /// Whether this value is a multiple of `n_bytes`.
            pub fn is_rounded_by<T: crate::word::Operand<M>>(self: Self, n_bytes: T) -> bool {
                self.remainder(n_bytes).is_zero()
            }
            /// Returns this value if it is a multiple of `n_bytes`, otherwise the next larger multiple.
            pub fn rounded_up_by<T: crate::word::Operand<M>>(self: Self, n_bytes: T) -> Self {
                let remainder = self.remainder(n_bytes);
                if remainder.is_zero() {
                    self
                } else {
                    self.plus(n_bytes.operand_bits().wrapping_sub(remainder.bits()))
                }
            }
            /// Returns the largest multiple of `n_bytes` not above this value.
            pub fn rounded_down_by<T: crate::word::Operand<M>>(self: Self, n_bytes: T) -> Self {
                self.minus(self.remainder(n_bytes))
            }
            /// Rounds up to the next multiple of the word size.
            pub fn word_aligned(self: Self) -> Self {
                self.aligned(M::BYTES)
            }
            /// Whether this value is a multiple of the word size.
            pub fn is_word_aligned(self: Self) -> bool {
                self.is_aligned(M::BYTES)
            }
            /// Rounds up to the next multiple of `alignment`, which must be a power of two. Other alignments
            /// produce unspecified results.
            pub fn aligned<T: crate::word::Operand<M>>(self: Self, alignment: T) -> Self {
                let mask = Self::alignment_mask(alignment);
                Self::from_bits(self.bits().wrapping_add(mask) & !mask)
            }
            /// Whether this value is a multiple of `alignment`, which must be a power of two.
            pub fn is_aligned<T: crate::word::Operand<M>>(self: Self, alignment: T) -> bool {
                self.bits() & Self::alignment_mask(alignment) == 0
            }
            fn alignment_mask<T: crate::word::Operand<M>>(alignment: T) -> u64 {
                let alignment = alignment.operand_bits() & M::MASK;
                debug_assert!(alignment.is_power_of_two(), "{}: alignment {} is not a power of two", stringify!($name), alignment);
                alignment.wrapping_sub(1)
            }
            /// Bitwise and.
            pub fn and<T: crate::word::Operand<M>>(self: Self, operand: T) -> Self {
                Self::from_bits(self.bits() & operand.operand_bits())
            }
            /// Bitwise or.
            pub fn or<T: crate::word::Operand<M>>(self: Self, operand: T) -> Self {
                Self::from_bits(self.bits() | operand.operand_bits())
            }
            /// Bitwise exclusive or.
            pub fn xor<T: crate::word::Operand<M>>(self: Self, operand: T) -> Self {
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
            /// Shifts right, filling with zeros. Shift distances are taken modulo the word width.
            pub fn unsigned_shifted_right(self: Self, n_bits: u32) -> Self {
                Self::from_bits(self.bits() >> (n_bits % M::BITS))
            }
            /// Whether the bit at `index` (counting from the least significant bit) is set.
            pub fn is_bit_set(self: Self, index: u32) -> bool {
                self.bits() & Self::bit(index) != 0
            }
            /// Returns this value with the bit at `index` set.
            pub fn bit_set(self: Self, index: u32) -> Self {
                Self::from_bits(self.bits() | Self::bit(index))
            }
            /// Returns this value with the bit at `index` cleared.
            pub fn bit_clear(self: Self, index: u32) -> Self {
                Self::from_bits(self.bits() & !Self::bit(index))
            }
            fn bit(index: u32) -> u64 {
                assert!(index < M::BITS, "{}: bit index {} out of range for {} bit words", stringify!($name), index, M::BITS);
                1u64 << index
            }
            /// Number of bits required to represent this value, i.e. the word width minus the leading zeros.
            pub fn number_of_effective_bits(self: Self) -> u32 {
                M::BITS - crate::bitscan::number_of_leading_zeros(self.as_word())
            }
            /// The narrowest width category that holds this value.
            pub fn effective_width(self: Self) -> crate::config::WordWidth {
                let bits = self.number_of_effective_bits();
                match crate::config::WordWidth::VALUES.iter().find(|width| bits <= width.number_of_bits()) {
                    Some(&width) => width,
                    None => unreachable!("{}: no width category holds {} bits", stringify!($name), bits),
                }
            }
            /// Renders the value as an unsigned number. Supported radices are 2, 8, 10 and 16.
            pub fn to_unsigned_string(self: Self, radix: u32) -> String {
                let bits = self.bits();
                match radix {
                    2   => format!("{:b}", bits),
                    8   => format!("{:o}", bits),
                    10  => format!("{}", bits),
                    16  => format!("{:x}", bits),
                    _   => panic!("{}: unsupported radix {}", stringify!($name), radix),
                }
            }
        }

        impl<M: crate::model::WordModel, T: crate::word::Operand<M>> std::ops::Add<T> for $name<M> {
            type Output = Self;
            fn add(self: Self, rhs: T) -> Self {
                self.plus(rhs)
            }
        }

        impl<M: crate::model::WordModel, T: crate::word::Operand<M>> std::ops::Sub<T> for $name<M> {
            type Output = Self;
            fn sub(self: Self, rhs: T) -> Self {
                self.minus(rhs)
            }
        }

        impl<M: crate::model::WordModel, T: crate::word::Operand<M>> std::ops::Mul<T> for $name<M> {
            type Output = Self;
            fn mul(self: Self, rhs: T) -> Self {
                self.times(rhs)
            }
        }

        impl<M: crate::model::WordModel, T: crate::word::Operand<M>> std::ops::Div<T> for $name<M> {
            type Output = Self;
            fn div(self: Self, rhs: T) -> Self {
                self.divided_by(rhs)
            }
        }

        impl<M: crate::model::WordModel, T: crate::word::Operand<M>> std::ops::Rem<T> for $name<M> {
            type Output = Self;
            fn rem(self: Self, rhs: T) -> Self {
                self.remainder(rhs)
            }
        }

        impl<M: crate::model::WordModel, T: crate::word::Operand<M>> std::ops::BitAnd<T> for $name<M> {
            type Output = Self;
            fn bitand(self: Self, rhs: T) -> Self {
                self.and(rhs)
            }
        }

        impl<M: crate::model::WordModel, T: crate::word::Operand<M>> std::ops::BitOr<T> for $name<M> {
            type Output = Self;
            fn bitor(self: Self, rhs: T) -> Self {
                self.or(rhs)
            }
        }

        impl<M: crate::model::WordModel, T: crate::word::Operand<M>> std::ops::BitXor<T> for $name<M> {
            type Output = Self;
            fn bitxor(self: Self, rhs: T) -> Self {
                self.xor(rhs)
            }
        }

        impl<M: crate::model::WordModel> std::ops::Not for $name<M> {
            type Output = Self;
            fn not(self: Self) -> Self {
                $name::not(self)
            }
        }

        impl<M: crate::model::WordModel> std::ops::Shl<u32> for $name<M> {
            type Output = Self;
            fn shl(self: Self, n_bits: u32) -> Self {
                self.shifted_left(n_bits)
            }
        }

        impl<M: crate::model::WordModel> std::ops::Shr<u32> for $name<M> {
            type Output = Self;
            fn shr(self: Self, n_bits: u32) -> Self {
                self.unsigned_shifted_right(n_bits)
            }
        }
    };
}

word_view! {
    /// A word interpreted as an unsigned linear memory location.
    Address
}

impl_word_view!(Address, "@", unsigned);
impl_unsigned_arithmetic!(Address);

impl<M: WordModel> Address<M> {
    /// The largest address.
    pub fn max() -> Self {
        Self::all_ones()
    }
    /// Whether this address equals the given int, sign-extended.
    pub fn equals_int(self: Self, other: i32) -> bool {
        self == Self::from_int(other)
    }
    /// Parses an unsigned number in the given radix (2 to 36), accumulating digits left to right with wrapping
    /// address arithmetic. Values wider than a word wrap around; an empty string parses as zero.
    pub fn parse(input: &str, radix: u32) -> ParseResult<Self> {
        crate::parser::parse_address(input, radix)
    }
}
