//! Typed access to raw memory through an address.

use crate::prelude::*;
use crate::config::BYTE_BITS;
use crate::model::{WordModel, Native};
use crate::word::{Word, Operand};
use crate::address::Address;
use crate::offset::Offset;
use crate::reference::Reference;
use crate::memory::Accessor;
use crate::kind::{Scalar, Element, ArrayMut};
use crate::error::{MemoryError, MemoryErrorKind, MemoryResult};

/// An address bound to the memory it points into.
///
/// Pointers do not own memory. All loads and stores go through the [`Accessor`] the pointer was created from, so a
/// pointer can never outlive it. Read-only address queries are available through `Deref<Target = Address>`.
#[derive(Copy, Clone)]
pub struct Pointer<'m, M: WordModel = Native> {
    address : Address<M>,
    memory  : &'m dyn Accessor,
}

impl<'m, M: WordModel> Pointer<'m, M> {
    /// Creates a pointer to `address` within `memory`.
    pub fn new(memory: &'m dyn Accessor, address: Address<M>) -> Self {
        Pointer { address, memory }
    }
    /// The address this pointer points to.
    pub fn address(self: Self) -> Address<M> {
        self.address
    }
    /// The memory this pointer points into.
    pub fn memory(self: Self) -> &'m dyn Accessor {
        self.memory
    }
    /// A null pointer into `memory`.
    pub fn zero(memory: &'m dyn Accessor) -> Self {
        Self::new(memory, Address::zero())
    }
    /// A pointer into `memory` at the sign extended `value`.
    pub fn from_int(memory: &'m dyn Accessor, value: i32) -> Self {
        Self::new(memory, Address::from_int(value))
    }
    /// A pointer into `memory` at the zero extended `value`.
    pub fn from_unsigned_int(memory: &'m dyn Accessor, value: i32) -> Self {
        Self::new(memory, Address::from_unsigned_int(value))
    }
    /// A pointer into `memory` at `value`, truncated to the word width.
    pub fn from_long(memory: &'m dyn Accessor, value: i64) -> Self {
        Self::new(memory, Address::from_long(value))
    }
    #[cfg_attr(not(debug_assertions), inline(always))]
    fn with_address(self: Self, address: Address<M>) -> Self {
        Pointer { address, memory: self.memory }
    }

    // arithmetic

    pub fn plus<T: Operand<M>>(self: Self, addend: T) -> Self {
        self.with_address(self.address.plus(addend))
    }
    pub fn minus<T: Operand<M>>(self: Self, subtrahend: T) -> Self {
        self.with_address(self.address.minus(subtrahend))
    }
    pub fn times<T: Operand<M>>(self: Self, factor: T) -> Self {
        self.with_address(self.address.times(factor))
    }
    pub fn divided_by<T: Operand<M>>(self: Self, divisor: T) -> Self {
        self.with_address(self.address.divided_by(divisor))
    }
    pub fn remainder<T: Operand<M>>(self: Self, divisor: T) -> Self {
        self.with_address(self.address.remainder(divisor))
    }
    /// Advances the pointer by `n_words` words.
    pub fn plus_words(self: Self, n_words: i32) -> Self {
        self.plus(Offset::<M>::from_int(n_words).times(M::BYTES))
    }
    /// Moves the pointer back by `n_words` words.
    pub fn minus_words(self: Self, n_words: i32) -> Self {
        self.minus(Offset::<M>::from_int(n_words).times(M::BYTES))
    }
    pub fn rounded_up_by<T: Operand<M>>(self: Self, n_bytes: T) -> Self {
        self.with_address(self.address.rounded_up_by(n_bytes))
    }
    pub fn rounded_down_by<T: Operand<M>>(self: Self, n_bytes: T) -> Self {
        self.with_address(self.address.rounded_down_by(n_bytes))
    }
    pub fn aligned<T: Operand<M>>(self: Self, alignment: T) -> Self {
        self.with_address(self.address.aligned(alignment))
    }
    pub fn word_aligned(self: Self) -> Self {
        self.with_address(self.address.word_aligned())
    }
    pub fn and<T: Operand<M>>(self: Self, operand: T) -> Self {
        self.with_address(self.address.and(operand))
    }
    pub fn or<T: Operand<M>>(self: Self, operand: T) -> Self {
        self.with_address(self.address.or(operand))
    }
    pub fn xor<T: Operand<M>>(self: Self, operand: T) -> Self {
        self.with_address(self.address.xor(operand))
    }
    pub fn not(self: Self) -> Self {
        self.with_address(self.address.not())
    }
    pub fn shifted_left(self: Self, n_bits: u32) -> Self {
        self.with_address(self.address.shifted_left(n_bits))
    }
    pub fn unsigned_shifted_right(self: Self, n_bits: u32) -> Self {
        self.with_address(self.address.unsigned_shifted_right(n_bits))
    }
    pub fn bit_set(self: Self, index: u32) -> Self {
        self.with_address(self.address.bit_set(index))
    }
    pub fn bit_clear(self: Self, index: u32) -> Self {
        self.with_address(self.address.bit_clear(index))
    }

    // generic access

    /// Effective address of a byte offset.
    #[cfg_attr(not(debug_assertions), inline(always))]
    fn at(self: Self, offset: Offset<M>) -> u64 {
        self.address.plus(offset).bits()
    }
    /// Effective byte offset of a scaled element: `displacement + index * size_of(T)`.
    #[cfg_attr(not(debug_assertions), inline(always))]
    fn scaled<T: Scalar<M>>(displacement: i32, index: i32) -> Offset<M> {
        Offset::from_int(displacement).plus(Offset::<M>::from_int(index).times(<T as Scalar<M>>::size()))
    }
    /// Loads a value at the given byte offset.
    pub fn read<T: Scalar<M>>(self: Self, offset: impl Into<Offset<M>>) -> T {
        <T as Scalar<M>>::load(self.memory, self.at(offset.into()))
    }
    /// Stores a value at the given byte offset.
    pub fn write<T: Scalar<M>>(self: Self, offset: impl Into<Offset<M>>, value: T) {
        value.store(self.memory, self.at(offset.into()))
    }
    /// Loads the element at `index` of an array of `T` starting `displacement` bytes past this pointer.
    pub fn get<T: Scalar<M>>(self: Self, displacement: i32, index: i32) -> T {
        self.read(Self::scaled::<T>(displacement, index))
    }
    /// Stores the element at `index` of an array of `T` starting `displacement` bytes past this pointer.
    pub fn set<T: Scalar<M>>(self: Self, displacement: i32, index: i32, value: T) {
        self.write(Self::scaled::<T>(displacement, index), value)
    }
    /// Loads the element at `index` of an array of `T` starting at this pointer.
    pub fn get_at<T: Scalar<M>>(self: Self, index: i32) -> T {
        self.get(0, index)
    }
    /// Stores the element at `index` of an array of `T` starting at this pointer.
    pub fn set_at<T: Scalar<M>>(self: Self, index: i32, value: T) {
        self.set(0, index, value)
    }
    /// Loads the value this pointer points to.
    pub fn load<T: Scalar<M>>(self: Self) -> T {
        self.get(0, 0)
    }
    /// Stores a value where this pointer points to.
    pub fn store<T: Scalar<M>>(self: Self, value: T) {
        self.set(0, 0, value)
    }

    // atomics

    /// Atomically replaces the int at `offset` with `new` if it equals `expected`. Returns the previous value.
    pub fn compare_and_swap_int(self: Self, offset: impl Into<Offset<M>>, expected: i32, new: i32) -> i32 {
        self.memory.compare_and_swap_u32(self.at(offset.into()), expected as u32, new as u32) as i32
    }
    /// Atomically replaces the word at `offset` with `new` if it equals `expected`. Returns the previous value.
    pub fn compare_and_swap_word(self: Self, offset: impl Into<Offset<M>>, expected: Word<M>, new: Word<M>) -> Word<M> {
        Word::from_bits(self.compare_and_swap_bits(offset.into(), expected.bits(), new.bits()))
    }
    /// Atomically replaces the reference at `offset` with `new` if it equals `expected`. Returns the previous value.
    pub fn compare_and_swap_reference(self: Self, offset: impl Into<Offset<M>>, expected: Reference<M>, new: Reference<M>) -> Reference<M> {
        Reference::from_bits(self.compare_and_swap_bits(offset.into(), expected.bits(), new.bits()))
    }
    fn compare_and_swap_bits(self: Self, offset: Offset<M>, expected: u64, new: u64) -> u64 {
        let address = self.at(offset);
        if M::BYTES == 8 {
            self.memory.compare_and_swap_u64(address, expected, new)
        } else {
            self.memory.compare_and_swap_u32(address, expected as u32, new as u32) as u64
        }
    }

    // bit maps

    /// Sets a bit in the bit map starting at this pointer.
    ///
    /// The affected byte is read, modified and written back without synchronization.
    pub fn set_bit(self: Self, bit_index: usize) {
        let byte_index = (bit_index / BYTE_BITS) as i32;
        let value: i8 = self.get_at(byte_index);
        self.set_at(byte_index, value | (1 << (bit_index % BYTE_BITS)) as i8);
    }
    /// Ors the 8 bit mask `bits` into the bit map starting at this pointer, beginning at `bit_index`.
    ///
    /// One or two bytes are read, modified and written back without synchronization.
    pub fn set_bits(self: Self, bit_index: usize, bits: u8) {
        let byte_index = (bit_index / BYTE_BITS) as i32;
        let rest = bit_index % BYTE_BITS;
        let value: i8 = self.get_at(byte_index);
        self.set_at(byte_index, value | ((bits as u32) << rest) as u8 as i8);
        if rest > 0 {
            let value: i8 = self.get_at(byte_index + 1);
            self.set_at(byte_index + 1, value | (bits >> (BYTE_BITS - rest)) as i8);
        }
    }

    // bulk copies

    /// Copies `length` elements of an array of `T` starting `displacement` bytes past this pointer, beginning with
    /// element `src_index`, into `dst` at `dst_index`. Fails if `T` has no memory representation.
    pub fn copy_elements<T: Element<M>>(self: Self, displacement: i32, src_index: i32, dst: &mut [ T ], dst_index: usize, length: usize) -> MemoryResult {
        match <T as Element<M>>::array(dst) {
            Some(ArrayMut::Byte(dst))       => self.copy_into(displacement, src_index, dst, dst_index, length),
            Some(ArrayMut::Boolean(dst))    => self.copy_into(displacement, src_index, dst, dst_index, length),
            Some(ArrayMut::Short(dst))      => self.copy_into(displacement, src_index, dst, dst_index, length),
            Some(ArrayMut::Char(dst))       => self.copy_into(displacement, src_index, dst, dst_index, length),
            Some(ArrayMut::Int(dst))        => self.copy_into(displacement, src_index, dst, dst_index, length),
            Some(ArrayMut::Float(dst))      => self.copy_into(displacement, src_index, dst, dst_index, length),
            Some(ArrayMut::Long(dst))       => self.copy_into(displacement, src_index, dst, dst_index, length),
            Some(ArrayMut::Double(dst))     => self.copy_into(displacement, src_index, dst, dst_index, length),
            Some(ArrayMut::Word(dst))       => self.copy_into(displacement, src_index, dst, dst_index, length),
            Some(ArrayMut::Reference(dst))  => self.copy_into(displacement, src_index, dst, dst_index, length),
            None => return Err(MemoryError::new(MemoryErrorKind::InvalidKind(<T as Element<M>>::KIND))),
        }
        Ok(())
    }
    fn copy_into<T: Scalar<M>>(self: Self, displacement: i32, src_index: i32, dst: &mut [ T ], dst_index: usize, length: usize) {
        for (i, element) in dst[dst_index .. dst_index + length].iter_mut().enumerate() {
            *element = self.get(displacement, src_index + i as i32);
        }
    }

    /// Returns a hex dump of `len` bytes starting at this pointer.
    #[cfg(feature="debugging")]
    pub fn format_bytes(self: Self, len: usize) -> String {
        let mut result = format!("{}:", self);
        for index in 0 .. len as i32 {
            let byte: i8 = self.get_at(index);
            result.push_str(&format!(" {:02x}", byte as u8));
        }
        result
    }
}

macro_rules! impl_kind_accessors {
    ($($name:ident: $type:ty),+) => { paste::paste! {
        impl<'m, M: WordModel> Pointer<'m, M> {
            $(
                #[doc = concat!("Loads a ", stringify!($name), " at the given byte offset.")]
                pub fn [<read_ $name>](self: Self, offset: impl Into<Offset<M>>) -> $type {
                    self.read(offset)
                }
                #[doc = concat!("Stores a ", stringify!($name), " at the given byte offset.")]
                pub fn [<write_ $name>](self: Self, offset: impl Into<Offset<M>>, value: $type) {
                    self.write(offset, value)
                }
                #[doc = concat!("Loads element `index` of a ", stringify!($name), " array `displacement` bytes past this pointer.")]
                pub fn [<get_ $name>](self: Self, displacement: i32, index: i32) -> $type {
                    self.get(displacement, index)
                }
                #[doc = concat!("Stores element `index` of a ", stringify!($name), " array `displacement` bytes past this pointer.")]
                pub fn [<set_ $name>](self: Self, displacement: i32, index: i32, value: $type) {
                    self.set(displacement, index, value)
                }
                pub fn [<get_ $name _at>](self: Self, index: i32) -> $type {
                    self.get_at(index)
                }
                pub fn [<set_ $name _at>](self: Self, index: i32, value: $type) {
                    self.set_at(index, value)
                }
            )+
        }
    } };
}

impl_kind_accessors!(
    byte: i8,
    boolean: bool,
    short: i16,
    char: u16,
    int: i32,
    float: f32,
    long: i64,
    double: f64,
    word: Word<M>,
    reference: Reference<M>
);

impl<'m, M: WordModel> std::ops::Deref for Pointer<'m, M> {
    type Target = Address<M>;
    fn deref(self: &Self) -> &Address<M> {
        &self.address
    }
}

impl<'m, M: WordModel> PartialEq for Pointer<'m, M> {
    fn eq(self: &Self, other: &Self) -> bool {
        self.address == other.address
    }
}

impl<'m, M: WordModel> Eq for Pointer<'m, M> { }

impl<'m, M: WordModel> Hash for Pointer<'m, M> {
    fn hash<H: Hasher>(self: &Self, state: &mut H) {
        self.address.hash(state);
    }
}

impl<'m, M: WordModel> Display for Pointer<'m, M> {
    fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "^{}", self.address.to_hex_string())
    }
}

impl<'m, M: WordModel> Debug for Pointer<'m, M> {
    fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}
