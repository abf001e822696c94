//! Word models: the combination of a word width and a representation strategy.
//!
//! Width and representation are type-level choices. Every word value of a given model uses the same width and the
//! same representation, so a value can never be inspected under the wrong mode.

use crate::prelude::*;
use crate::config::{WordWidth, Mode, NativeWidth, NativeRepr};

/// A word width supported by the VM.
pub trait Width: Copy + Clone + Debug + Default + PartialEq + Eq + Hash + Send + Sync + 'static {
    /// Number of bits in a word.
    const BITS: u32;
    /// The named width category.
    const WIDTH: WordWidth;
}

/// 32 bit words.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bits32;

impl Width for Bits32 {
    const BITS: u32 = 32;
    const WIDTH: WordWidth = WordWidth::Bits32;
}

/// 64 bit words.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bits64;

impl Width for Bits64 {
    const BITS: u32 = 64;
    const WIDTH: WordWidth = WordWidth::Bits64;
}

/// A strategy for storing a word's bit pattern.
pub trait Representation: Copy + Clone + Debug + Default + PartialEq + Eq + Hash + Send + Sync + 'static {
    /// Storage cell of a single word.
    type Cell: Copy + Clone + Debug + Default + Send + Sync + 'static;
    /// The mode this representation implements.
    const MODE: Mode;
    /// Stores the given bit pattern, which has already been truncated to `W::BITS`.
    fn encode<W: Width>(bits: u64) -> Self::Cell;
    /// Recovers the bit pattern, zero-extended from `W::BITS`.
    fn decode<W: Width>(cell: Self::Cell) -> u64;
}

/// Host-simulated representation: the word is kept as a boxed signed host number, sign-extended from the word width.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Hosted;

impl Representation for Hosted {
    type Cell = i64;
    const MODE: Mode = Mode::Hosted;
    #[cfg_attr(not(debug_assertions), inline(always))]
    fn encode<W: Width>(bits: u64) -> i64 {
        let shift = 64 - W::BITS;
        ((bits << shift) as i64) >> shift
    }
    #[cfg_attr(not(debug_assertions), inline(always))]
    fn decode<W: Width>(cell: i64) -> u64 {
        (cell as u64) & mask(W::BITS)
    }
}

/// Target representation: the word is its raw bit pattern.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Target;

impl Representation for Target {
    type Cell = u64;
    const MODE: Mode = Mode::Target;
    #[cfg_attr(not(debug_assertions), inline(always))]
    fn encode<W: Width>(bits: u64) -> u64 {
        bits
    }
    #[cfg_attr(not(debug_assertions), inline(always))]
    fn decode<W: Width>(cell: u64) -> u64 {
        cell
    }
}

/// Returns a mask of the lowest `bits` bits.
pub(crate) const fn mask(bits: u32) -> u64 {
    u64::MAX >> (64 - bits)
}

/// Storage cell of a word of model `M`.
pub type Cell<M> = <<M as WordModel>::Repr as Representation>::Cell;

/// Width and representation of a family of word values.
pub trait WordModel: Copy + Clone + Debug + Default + PartialEq + Eq + Hash + Send + Sync + 'static {
    type Width: Width;
    type Repr: Representation;
    /// Number of bits in a word.
    const BITS: u32 = <Self::Width as Width>::BITS;
    /// Number of bytes in a word.
    const BYTES: usize = (Self::BITS / 8) as usize;
    /// Mask of all bits of a word.
    const MASK: u64 = mask(Self::BITS);
    /// Truncates the given bits to the word width and stores them.
    #[cfg_attr(not(debug_assertions), inline(always))]
    fn encode(bits: u64) -> Cell<Self> {
        <Self::Repr as Representation>::encode::<Self::Width>(bits & Self::MASK)
    }
    /// Returns the zero-extended bit pattern of the given cell.
    #[cfg_attr(not(debug_assertions), inline(always))]
    fn decode(cell: Cell<Self>) -> u64 {
        <Self::Repr as Representation>::decode::<Self::Width>(cell)
    }
    /// Sign-extends a word-width bit pattern to 64 bits.
    #[cfg_attr(not(debug_assertions), inline(always))]
    fn sign_extend(bits: u64) -> i64 {
        let shift = 64 - Self::BITS;
        ((bits << shift) as i64) >> shift
    }
    /// The representation mode of this model.
    fn mode() -> Mode {
        <Self::Repr as Representation>::MODE
    }
    /// The named width category of this model.
    fn word_width() -> WordWidth {
        <Self::Width as Width>::WIDTH
    }
}

/// A word model combining width `W` and representation `R`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Model<W, R>(PhantomData<(W, R)>);

impl<W: Width, R: Representation> WordModel for Model<W, R> {
    type Width = W;
    type Repr = R;
}

/// The model the crate was built for (see the `word32` and `hosted` features).
pub type Native = Model<NativeWidth, NativeRepr>;

/// 32 bit hosted words.
pub type Hosted32 = Model<Bits32, Hosted>;
/// 64 bit hosted words.
pub type Hosted64 = Model<Bits64, Hosted>;
/// 32 bit raw words.
pub type Target32 = Model<Bits32, Target>;
/// 64 bit raw words.
pub type Target64 = Model<Bits64, Target>;
