//! The word value shared by every word-like type.

use std::io::{self, Read, Write};
use crate::prelude::*;
use crate::config::{platform, Endianness, WordWidth};
use crate::model::{WordModel, Cell, Native};

/// An untyped machine word of model `M`.
///
/// A word is created through one of the conversion factories and is immutable afterwards. Two words are equal
/// iff their bit patterns are equal.
pub struct Word<M: WordModel = Native> {
    cell    : Cell<M>,
    model   : PhantomData<M>,
}

impl<M: WordModel> Word<M> {
    /// Truncates the given bits to the word width and stores them in the model's representation.
    #[cfg_attr(not(debug_assertions), inline(always))]
    pub(crate) fn encode(bits: u64) -> Self {
        Word { cell: M::encode(bits), model: PhantomData }
    }
    /// Returns the zero-extended bit pattern.
    #[cfg_attr(not(debug_assertions), inline(always))]
    pub(crate) fn decode(self: Self) -> u64 {
        M::decode(self.cell)
    }
    /// Number of bits in a word.
    pub fn width() -> u32 {
        M::BITS
    }
    /// Number of bytes in a word.
    pub fn size() -> usize {
        M::BYTES
    }
    /// The named width category of words.
    pub fn word_width() -> WordWidth {
        M::word_width()
    }
    /// Byte order of the active platform.
    pub fn endianness() -> Endianness {
        platform().endianness
    }
}

impl<M: WordModel> Clone for Word<M> {
    fn clone(self: &Self) -> Self {
        *self
    }
}

impl<M: WordModel> Copy for Word<M> { }

/// A typed view of a word. Conversions between views are free and reversible.
pub trait WordView<M: WordModel>: Copy {
    /// Wraps the given word.
    fn from_word(word: Word<M>) -> Self;
    /// Returns the underlying word.
    fn as_word(self: Self) -> Word<M>;
}

impl<M: WordModel> WordView<M> for Word<M> {
    #[cfg_attr(not(debug_assertions), inline(always))]
    fn from_word(word: Word<M>) -> Self {
        word
    }
    #[cfg_attr(not(debug_assertions), inline(always))]
    fn as_word(self: Self) -> Word<M> {
        self
    }
}

/// An operand of word arithmetic. Native integers are sign-extended, unsigned integers zero-extended.
pub trait Operand<M: WordModel>: Copy {
    /// Returns the operand as a bit pattern. Bits above the word width are ignored by the receiver.
    fn operand_bits(self: Self) -> u64;
}

impl<M: WordModel> Operand<M> for i32 {
    fn operand_bits(self: Self) -> u64 {
        self as i64 as u64
    }
}

impl<M: WordModel> Operand<M> for i64 {
    fn operand_bits(self: Self) -> u64 {
        self as u64
    }
}

impl<M: WordModel> Operand<M> for u64 {
    fn operand_bits(self: Self) -> u64 {
        self
    }
}

impl<M: WordModel> Operand<M> for u32 {
    fn operand_bits(self: Self) -> u64 {
        self as u64
    }
}

impl<M: WordModel> Operand<M> for usize {
    fn operand_bits(self: Self) -> u64 {
        self as u64
    }
}

/// Implements conversions, formatting, comparison and stream io for a word view.
macro_rules! impl_word_view {
    (@to_long unsigned) => {
        /// Returns the value as a long, zero-extended from the word width.
        pub fn to_long(self: Self) -> i64 {
            self.bits() as i64
        }
    };
    (@to_long signed) => {
        /// Returns the value as a long, sign-extended from the word width.
        pub fn to_long(self: Self) -> i64 {
            M::sign_extend(self.bits())
        }
    };
    (@cmp unsigned, $self:ident, $other:ident) => {
        $self.bits().cmp(&$other.bits())
    };
    (@cmp signed, $self:ident, $other:ident) => {
        $self.to_long().cmp(&$other.to_long())
    };
    ($name:ident, $marker:literal, $signedness:ident) => {

        impl<M: crate::model::WordModel> $name<M> {
            /// The all zero bit pattern.
            #[cfg_attr(not(debug_assertions), inline(always))]
            pub fn zero() -> Self {
                Self::from_bits(0)
            }
            /// The all one bit pattern.
            #[cfg_attr(not(debug_assertions), inline(always))]
            pub fn all_ones() -> Self {
                Self::from_bits(u64::MAX)
            }
            /// Creates a value from the given int, sign-extending it to the word width.
            #[cfg_attr(not(debug_assertions), inline(always))]
            pub fn from_int(value: i32) -> Self {
                Self::from_bits(value as i64 as u64)
            }
            /// Creates a value from the given int, zero-extending it to the word width.
            #[cfg_attr(not(debug_assertions), inline(always))]
            pub fn from_unsigned_int(value: i32) -> Self {
                Self::from_bits(value as u32 as u64)
            }
            /// Creates a value from the given long, truncating it to the word width.
            #[cfg_attr(not(debug_assertions), inline(always))]
            pub fn from_long(value: i64) -> Self {
                Self::from_bits(value as u64)
            }
            /// Creates a value from the given bit pattern, truncating it to the word width.
            #[cfg_attr(not(debug_assertions), inline(always))]
            pub fn from_bits(bits: u64) -> Self {
                <Self as crate::word::WordView<M>>::from_word(crate::word::Word::encode(bits))
            }
            /// Returns the bit pattern, zero-extended from the word width.
            #[cfg_attr(not(debug_assertions), inline(always))]
            pub fn bits(self: Self) -> u64 {
                crate::word::WordView::<M>::as_word(self).decode()
            }
            /// Returns the low 32 bits as an int.
            pub fn to_int(self: Self) -> i32 {
                self.bits() as u32 as i32
            }
            impl_word_view!(@to_long $signedness);
            /// Whether all bits are zero.
            pub fn is_zero(self: Self) -> bool {
                self.bits() == 0
            }
            /// Whether all bits are one.
            pub fn is_all_ones(self: Self) -> bool {
                self.bits() == M::MASK
            }
            /// Lower-case hexadecimal digits without leading zeros or prefix.
            pub fn to_hex_string(self: Self) -> String {
                format!("{:x}", self.bits())
            }
            /// Lower-case hexadecimal digits, padded with `pad` to the number of digits of a word.
            pub fn to_padded_hex_string(self: Self, pad: char) -> String {
                let digits = self.to_hex_string();
                let width = M::BITS as usize / 4;
                let mut result: String = std::iter::repeat(pad).take(width - digits.len()).collect();
                result.push_str(&digits);
                result
            }
            /// Bit index of the least significant bit set, or -1 if zero.
            pub fn least_significant_bit_set(self: Self) -> i32 {
                crate::bitscan::least_significant_bit_set(self.as_word())
            }
            /// Bit index of the most significant bit set, or -1 if zero.
            pub fn most_significant_bit_set(self: Self) -> i32 {
                crate::bitscan::most_significant_bit_set(self.as_word())
            }
            /// Views the value as an untyped word.
            #[cfg_attr(not(debug_assertions), inline(always))]
            pub fn as_word(self: Self) -> crate::word::Word<M> {
                crate::word::WordView::<M>::as_word(self)
            }
            /// Views the value as an address.
            #[cfg_attr(not(debug_assertions), inline(always))]
            pub fn as_address(self: Self) -> crate::address::Address<M> {
                crate::word::WordView::<M>::from_word(self.as_word())
            }
            /// Views the value as an offset.
            #[cfg_attr(not(debug_assertions), inline(always))]
            pub fn as_offset(self: Self) -> crate::offset::Offset<M> {
                crate::word::WordView::<M>::from_word(self.as_word())
            }
            /// Views the value as a size.
            #[cfg_attr(not(debug_assertions), inline(always))]
            pub fn as_size(self: Self) -> crate::size::Size<M> {
                crate::word::WordView::<M>::from_word(self.as_word())
            }
            /// Views the value as a reference.
            #[cfg_attr(not(debug_assertions), inline(always))]
            pub fn as_reference(self: Self) -> crate::reference::Reference<M> {
                crate::word::WordView::<M>::from_word(self.as_word())
            }
            /// Reads a value from the given stream in the byte order of the active platform.
            pub fn read<R: std::io::Read>(stream: &mut R) -> std::io::Result<Self> {
                Self::read_with(stream, crate::config::platform().endianness)
            }
            /// Reads a value of exactly one word's bytes from the given stream in the given byte order.
            pub fn read_with<R: std::io::Read>(stream: &mut R, endianness: crate::config::Endianness) -> std::io::Result<Self> {
                crate::word::read_bits::<M, R>(stream, endianness).map(Self::from_bits)
            }
            /// Writes this value to the given stream in the byte order of the active platform.
            pub fn write<W: std::io::Write>(self: &Self, stream: &mut W) -> std::io::Result<()> {
                self.write_with(stream, crate::config::platform().endianness)
            }
            /// Writes exactly one word's bytes to the given stream in the given byte order.
            pub fn write_with<W: std::io::Write>(self: &Self, stream: &mut W, endianness: crate::config::Endianness) -> std::io::Result<()> {
                crate::word::write_bits::<M, W>(stream, endianness, self.bits())
            }
        }

        impl<M: crate::model::WordModel> crate::word::Operand<M> for $name<M> {
            #[cfg_attr(not(debug_assertions), inline(always))]
            fn operand_bits(self: Self) -> u64 {
                self.bits()
            }
        }

        impl<M: crate::model::WordModel> PartialEq for $name<M> {
            fn eq(self: &Self, other: &Self) -> bool {
                self.bits() == other.bits()
            }
        }

        impl<M: crate::model::WordModel> Eq for $name<M> { }

        impl<M: crate::model::WordModel> PartialOrd for $name<M> {
            fn partial_cmp(self: &Self, other: &Self) -> Option<std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl<M: crate::model::WordModel> Ord for $name<M> {
            fn cmp(self: &Self, other: &Self) -> std::cmp::Ordering {
                impl_word_view!(@cmp $signedness, self, other)
            }
        }

        impl<M: crate::model::WordModel> std::hash::Hash for $name<M> {
            fn hash<H: std::hash::Hasher>(self: &Self, state: &mut H) {
                std::hash::Hash::hash(&self.bits(), state);
            }
        }

        impl<M: crate::model::WordModel> Default for $name<M> {
            fn default() -> Self {
                Self::zero()
            }
        }

        impl<M: crate::model::WordModel> std::fmt::Display for $name<M> {
            fn fmt(self: &Self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}{}", $marker, self.to_hex_string())
            }
        }

        impl<M: crate::model::WordModel> std::fmt::Debug for $name<M> {
            fn fmt(self: &Self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(self, f)
            }
        }
    };
}

/// Declares a `#[repr(transparent)]` view over a word.
macro_rules! word_view {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[repr(transparent)]
        pub struct $name<M: crate::model::WordModel = crate::model::Native>(crate::word::Word<M>);

        impl<M: crate::model::WordModel> Clone for $name<M> {
            fn clone(self: &Self) -> Self {
                *self
            }
        }

        impl<M: crate::model::WordModel> Copy for $name<M> { }

        impl<M: crate::model::WordModel> crate::word::WordView<M> for $name<M> {
            #[cfg_attr(not(debug_assertions), inline(always))]
            fn from_word(word: crate::word::Word<M>) -> Self {
                $name(word)
            }
            #[cfg_attr(not(debug_assertions), inline(always))]
            fn as_word(self: Self) -> crate::word::Word<M> {
                self.0
            }
        }
    };
}

impl_word_view!(Word, "$", unsigned);

pub(crate) fn read_bits<M: WordModel, R: Read>(stream: &mut R, endianness: Endianness) -> io::Result<u64> {
    if M::BYTES == 8 {
        let mut bytes = [ 0u8; 8 ];
        stream.read_exact(&mut bytes)?;
        Ok(endianness.read_u64(bytes))
    } else {
        let mut bytes = [ 0u8; 4 ];
        stream.read_exact(&mut bytes)?;
        Ok(endianness.read_u32(bytes) as u64)
    }
}

pub(crate) fn write_bits<M: WordModel, W: Write>(stream: &mut W, endianness: Endianness, bits: u64) -> io::Result<()> {
    if M::BYTES == 8 {
        stream.write_all(&endianness.write_u64(bits))
    } else {
        stream.write_all(&endianness.write_u32(bits as u32))
    }
}
