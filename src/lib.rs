//! Metaword, the machine word and raw memory layer of a meta-circular VM.
//!
//! Every word-like value (`Word`, `Address`, `Offset`, `Size`, `Reference`, `Pointer`) is generic over a
//! [`WordModel`](model::WordModel) that fixes the word width (32 or 64 bits) and the in-memory representation
//! (hosted/simulated or target/raw). The default model, [`Native`](model::Native), is chosen at build time via the
//! `word32` and `hosted` features.
//!
//! ### Example:
//!
//! ```
//! use metaword::{Address, Pointer, Region};
//! let address: Address = Address::from_int(0x10).plus(0x08);
//! assert_eq!(address, Address::from_int(0x18));
//! assert!(!address.is_rounded_by(0x10));
//! assert_eq!(address.rounded_up_by(0x10), Address::from_int(0x20));
//!
//! let region = Region::new(0x1000, 64);
//! let pointer: Pointer = region.start();
//! pointer.write_int(8, -2);
//! assert_eq!(pointer.get_int(0, 2), -2);
//! ```

pub mod config;
pub mod model;
#[macro_use]
mod word;
#[macro_use]
mod address;
mod offset;
mod size;
mod reference;
pub mod bitscan;
pub mod memory;
pub mod kind;
mod pointer;
pub mod hybrid;
pub mod error;
mod parser;

pub use crate::config::{platform, Platform, WordWidth, Endianness, Mode};
pub use crate::model::{WordModel, Width, Representation, Model, Native, Bits32, Bits64, Hosted, Target, Hosted32, Hosted64, Target32, Target64};
pub use crate::word::{Word, WordView, Operand};
pub use crate::address::Address;
pub use crate::offset::Offset;
pub use crate::size::Size;
pub use crate::reference::Reference;
pub use crate::memory::{Accessor, Region, NativeMemory};
pub use crate::kind::{Kind, Scalar, Element, ArrayMut};
pub use crate::pointer::Pointer;
pub use crate::hybrid::{Hybrid, HybridShape, HybridHeap, ArrayAccess};
pub use crate::error::{ParseError, ParseErrorKind, MemoryError, MemoryErrorKind, ConfigError, ConfigErrorKind};

pub(crate) mod prelude {
    pub use std::fmt::{self, Debug, Display};
    pub use std::hash::{Hash, Hasher};
    pub use std::marker::PhantomData;
    pub use std::mem::size_of;
}
