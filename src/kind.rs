//! Scalar kinds stored in memory.

use crate::prelude::*;
use crate::model::WordModel;
use crate::memory::Accessor;
use crate::word::Word;
use crate::reference::Reference;

/// Kind of a value stored in memory.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Void,
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Float,
    Long,
    Double,
    Word,
    Reference,
}

impl Kind {
    /// Number of bytes a value of this kind occupies under model `M`.
    pub fn size<M: WordModel>(self: Self) -> usize {
        match self {
            Kind::Void      => 0,
            Kind::Boolean   => 1,
            Kind::Byte      => 1,
            Kind::Short     => 2,
            Kind::Char      => 2,
            Kind::Int       => 4,
            Kind::Float     => 4,
            Kind::Long      => 8,
            Kind::Double    => 8,
            Kind::Word      => M::BYTES,
            Kind::Reference => M::BYTES,
        }
    }
    /// Lower-case name of the kind.
    pub fn name(self: Self) -> &'static str {
        match self {
            Kind::Void      => "void",
            Kind::Boolean   => "boolean",
            Kind::Byte      => "byte",
            Kind::Short     => "short",
            Kind::Char      => "char",
            Kind::Int       => "int",
            Kind::Float     => "float",
            Kind::Long      => "long",
            Kind::Double    => "double",
            Kind::Word      => "word",
            Kind::Reference => "reference",
        }
    }
}

impl Display for Kind {
    fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A value that can be loaded from and stored to memory.
pub trait Scalar<M: WordModel>: Copy {
    const KIND: Kind;
    /// Loads a value from the given address.
    fn load(memory: &dyn Accessor, address: u64) -> Self;
    /// Stores this value at the given address.
    fn store(self: Self, memory: &dyn Accessor, address: u64);
    /// Number of bytes a value occupies in memory.
    fn size() -> usize {
        Self::KIND.size::<M>()
    }
}

macro_rules! impl_scalar {
    ($type:ty, $kind:ident, $load:ident, $store:ident, |$value:ident| $to_mem:expr, |$raw:ident| $from_mem:expr) => {
        impl<M: WordModel> Scalar<M> for $type {
            const KIND: Kind = Kind::$kind;
            #[cfg_attr(not(debug_assertions), inline(always))]
            fn load(memory: &dyn Accessor, address: u64) -> Self {
                let $raw = memory.$load(address);
                $from_mem
            }
            #[cfg_attr(not(debug_assertions), inline(always))]
            fn store(self: Self, memory: &dyn Accessor, address: u64) {
                let $value = self;
                memory.$store(address, $to_mem);
            }
        }
    };
}

impl_scalar!(i8, Byte, read_u8, write_u8, |v| v as u8, |r| r as i8);
impl_scalar!(bool, Boolean, read_u8, write_u8, |v| v as u8, |r| r != 0);
impl_scalar!(i16, Short, read_u16, write_u16, |v| v as u16, |r| r as i16);
impl_scalar!(u16, Char, read_u16, write_u16, |v| v, |r| r);
impl_scalar!(i32, Int, read_u32, write_u32, |v| v as u32, |r| r as i32);
impl_scalar!(f32, Float, read_u32, write_u32, |v| v.to_bits(), |r| f32::from_bits(r));
impl_scalar!(i64, Long, read_u64, write_u64, |v| v as u64, |r| r as i64);
impl_scalar!(f64, Double, read_u64, write_u64, |v| v.to_bits(), |r| f64::from_bits(r));

/// Loads a word-width bit pattern.
fn load_word_bits<M: WordModel>(memory: &dyn Accessor, address: u64) -> u64 {
    if M::BYTES == 8 {
        memory.read_u64(address)
    } else {
        memory.read_u32(address) as u64
    }
}

/// Stores a word-width bit pattern.
fn store_word_bits<M: WordModel>(memory: &dyn Accessor, address: u64, bits: u64) {
    if M::BYTES == 8 {
        memory.write_u64(address, bits)
    } else {
        memory.write_u32(address, bits as u32)
    }
}

impl<M: WordModel> Scalar<M> for Word<M> {
    const KIND: Kind = Kind::Word;
    fn load(memory: &dyn Accessor, address: u64) -> Self {
        Word::from_bits(load_word_bits::<M>(memory, address))
    }
    fn store(self: Self, memory: &dyn Accessor, address: u64) {
        store_word_bits::<M>(memory, address, self.bits())
    }
}

impl<M: WordModel> Scalar<M> for Reference<M> {
    const KIND: Kind = Kind::Reference;
    fn load(memory: &dyn Accessor, address: u64) -> Self {
        Reference::from_bits(load_word_bits::<M>(memory, address))
    }
    fn store(self: Self, memory: &dyn Accessor, address: u64) {
        store_word_bits::<M>(memory, address, self.bits())
    }
}

/// A mutable slice of one of the scalar kinds.
#[derive(Debug)]
pub enum ArrayMut<'a, M: WordModel> {
    Byte(&'a mut [ i8 ]),
    Boolean(&'a mut [ bool ]),
    Short(&'a mut [ i16 ]),
    Char(&'a mut [ u16 ]),
    Int(&'a mut [ i32 ]),
    Float(&'a mut [ f32 ]),
    Long(&'a mut [ i64 ]),
    Double(&'a mut [ f64 ]),
    Word(&'a mut [ Word<M> ]),
    Reference(&'a mut [ Reference<M> ]),
}

impl<'a, M: WordModel> ArrayMut<'a, M> {
    /// Element kind of the slice.
    pub fn kind(self: &Self) -> Kind {
        match self {
            ArrayMut::Byte(_)       => Kind::Byte,
            ArrayMut::Boolean(_)    => Kind::Boolean,
            ArrayMut::Short(_)      => Kind::Short,
            ArrayMut::Char(_)       => Kind::Char,
            ArrayMut::Int(_)        => Kind::Int,
            ArrayMut::Float(_)      => Kind::Float,
            ArrayMut::Long(_)       => Kind::Long,
            ArrayMut::Double(_)     => Kind::Double,
            ArrayMut::Word(_)       => Kind::Word,
            ArrayMut::Reference(_)  => Kind::Reference,
        }
    }
    /// Number of elements in the slice.
    pub fn len(self: &Self) -> usize {
        match self {
            ArrayMut::Byte(s)       => s.len(),
            ArrayMut::Boolean(s)    => s.len(),
            ArrayMut::Short(s)      => s.len(),
            ArrayMut::Char(s)       => s.len(),
            ArrayMut::Int(s)        => s.len(),
            ArrayMut::Float(s)      => s.len(),
            ArrayMut::Long(s)       => s.len(),
            ArrayMut::Double(s)     => s.len(),
            ArrayMut::Word(s)       => s.len(),
            ArrayMut::Reference(s)  => s.len(),
        }
    }
}

/// An element type of host arrays that memory can be bulk copied into.
pub trait Element<M: WordModel>: Sized {
    const KIND: Kind;
    /// Views the slice as a scalar array, or `None` if the element type has no memory representation.
    fn array(slice: &mut [ Self ]) -> Option<ArrayMut<'_, M>>;
}

macro_rules! impl_element {
    ($type:ty, $variant:ident) => {
        impl<M: WordModel> Element<M> for $type {
            const KIND: Kind = Kind::$variant;
            fn array(slice: &mut [ Self ]) -> Option<ArrayMut<'_, M>> {
                Some(ArrayMut::$variant(slice))
            }
        }
    };
}

impl_element!(i8, Byte);
impl_element!(bool, Boolean);
impl_element!(i16, Short);
impl_element!(u16, Char);
impl_element!(i32, Int);
impl_element!(f32, Float);
impl_element!(i64, Long);
impl_element!(f64, Double);
impl_element!(Word<M>, Word);
impl_element!(Reference<M>, Reference);

impl<M: WordModel> Element<M> for () {
    const KIND: Kind = Kind::Void;
    fn array(_: &mut [ Self ]) -> Option<ArrayMut<'_, M>> {
        None
    }
}
