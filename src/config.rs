//! Process-wide platform configuration.

use once_cell::sync::OnceCell;
use crate::prelude::*;
use crate::model::{Native, WordModel, Width, Representation};
use crate::error::{ConfigError, ConfigErrorKind, ConfigResult};

/// Word width of the native model.
#[cfg(any(feature="word32", target_pointer_width="32"))]
pub type NativeWidth = crate::model::Bits32;

/// Word width of the native model.
#[cfg(not(any(feature="word32", target_pointer_width="32")))]
pub type NativeWidth = crate::model::Bits64;

/// Word representation of the native model.
#[cfg(feature="hosted")]
pub type NativeRepr = crate::model::Hosted;

/// Word representation of the native model.
#[cfg(not(feature="hosted"))]
pub type NativeRepr = crate::model::Target;

/// Default base address of hosted memory regions.
pub const REGION_BASE: u64 = 0x1000;

/// Number of bits per byte.
pub const BYTE_BITS: usize = 8;

static PLATFORM: OnceCell<Platform> = OnceCell::new();

/// Named word width categories.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WordWidth {
    Bits8,
    Bits16,
    Bits32,
    Bits64,
}

impl WordWidth {
    /// All width categories, narrowest first.
    pub const VALUES: [ WordWidth; 4 ] = [ WordWidth::Bits8, WordWidth::Bits16, WordWidth::Bits32, WordWidth::Bits64 ];
    /// Number of bits of this width.
    pub const fn number_of_bits(self: Self) -> u32 {
        match self {
            WordWidth::Bits8    => 8,
            WordWidth::Bits16   => 16,
            WordWidth::Bits32   => 32,
            WordWidth::Bits64   => 64,
        }
    }
    /// Number of bytes of this width.
    pub const fn number_of_bytes(self: Self) -> usize {
        self.number_of_bits() as usize / BYTE_BITS
    }
    /// Returns the width category with exactly the given number of bits.
    pub fn from_bits(bits: u32) -> Option<WordWidth> {
        Self::VALUES.iter().copied().find(|width| width.number_of_bits() == bits)
    }
}

impl Display for WordWidth {
    fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bits", self.number_of_bits())
    }
}

/// Word representation mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Boxed host numbers, used while the VM runs on top of a host runtime.
    Hosted,
    /// Raw bit patterns, used once the VM runs standalone.
    Target,
}

/// Byte order of multi-byte values in memory and streams.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Endianness {
    Little,
    Big,
}

macro_rules! impl_endianness {
    ($($type:ident),+) => { paste::paste! {
        impl Endianness {
            $(
                /// Converts between native byte order and this byte order. The conversion is its own inverse.
                #[cfg_attr(not(debug_assertions), inline(always))]
                pub fn [<order_ $type>](self: Self, value: $type) -> $type {
                    if self == Self::NATIVE { value } else { value.swap_bytes() }
                }
                /// Decodes a value from bytes in this byte order.
                pub fn [<read_ $type>](self: Self, bytes: [ u8; size_of::<$type>() ]) -> $type {
                    match self {
                        Endianness::Little  => $type::from_le_bytes(bytes),
                        Endianness::Big     => $type::from_be_bytes(bytes),
                    }
                }
                /// Encodes a value to bytes in this byte order.
                pub fn [<write_ $type>](self: Self, value: $type) -> [ u8; size_of::<$type>() ] {
                    match self {
                        Endianness::Little  => value.to_le_bytes(),
                        Endianness::Big     => value.to_be_bytes(),
                    }
                }
            )+
        }
    } };
}

impl_endianness!(u8, u16, u32, u64);

impl Endianness {
    /// Byte order of the host.
    #[cfg(target_endian="little")]
    pub const NATIVE: Endianness = Endianness::Little;
    /// Byte order of the host.
    #[cfg(target_endian="big")]
    pub const NATIVE: Endianness = Endianness::Big;
}

/// Immutable platform description, initialized once per process.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Platform {
    pub word_width  : WordWidth,
    pub endianness  : Endianness,
    pub mode        : Mode,
}

impl Platform {
    /// The platform described by the native model and the host byte order.
    pub fn native() -> Self {
        Self::with_endianness(Endianness::NATIVE)
    }
    /// The native model with the given byte order.
    pub fn with_endianness(endianness: Endianness) -> Self {
        Platform {
            word_width  : <<Native as WordModel>::Width as Width>::WIDTH,
            endianness,
            mode        : <<Native as WordModel>::Repr as Representation>::MODE,
        }
    }
    /// Installs this platform as the process-wide configuration. Fails if a platform was already installed or
    /// queried, or if width or mode disagree with the native model the crate was built for.
    pub fn init(self: Self) -> ConfigResult {
        let native = Self::native();
        if self.word_width != native.word_width || self.mode != native.mode {
            return Err(ConfigError::new(ConfigErrorKind::ModelMismatch { requested: self, native }));
        }
        PLATFORM.set(self).map_err(|_| ConfigError::new(ConfigErrorKind::AlreadyInitialized))
    }
}

/// Returns the process-wide platform, installing the native platform on first use.
pub fn platform() -> &'static Platform {
    PLATFORM.get_or_init(Platform::native)
}
