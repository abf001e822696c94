//! Raw memory backends.
//!
//! Pointers never own memory. They load and store through an [`Accessor`]. [`Region`] provides a bounds checked,
//! simulated address space for hosted execution and testing, [`NativeMemory`] treats addresses as host addresses.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering as AtomicOrdering};
use crate::prelude::*;
use crate::config::{platform, Endianness};
use crate::model::WordModel;
use crate::address::Address;
use crate::pointer::Pointer;

/// Generates unaligned scalar loads and stores in the accessor's byte order.
macro_rules! impl_accessor_ops {
    ($($type:ident),+) => { paste::paste! {
        $(
            /// Loads a value from the given address.
            #[cfg_attr(not(debug_assertions), inline(always))]
            fn [<read_ $type>](self: &Self, address: u64) -> $type {
                let mut bytes = [ 0u8; size_of::<$type>() ];
                self.load_bytes(address, &mut bytes);
                self.endianness().[<read_ $type>](bytes)
            }
            /// Stores a value at the given address.
            #[cfg_attr(not(debug_assertions), inline(always))]
            fn [<write_ $type>](self: &Self, address: u64, value: $type) {
                self.store_bytes(address, &self.endianness().[<write_ $type>](value))
            }
        )+
    } };
}

/// Maps addresses to memory.
///
/// Plain loads and stores are not synchronized with each other: racing accesses to the same bytes yield
/// unspecified values, and a multi-byte access may observe a partial update. Only the `compare_and_swap_*`
/// operations are atomic.
pub trait Accessor: Sync {
    /// Copies `bytes.len()` bytes starting at `address` into `bytes`.
    fn load_bytes(self: &Self, address: u64, bytes: &mut [ u8 ]);
    /// Copies `bytes` to memory starting at `address`.
    fn store_bytes(self: &Self, address: u64, bytes: &[ u8 ]);
    /// Atomically replaces the 32 bit value at `address` with `new` if it equals `expected`. Returns the previous
    /// value. The address must be 4-byte aligned.
    fn compare_and_swap_u32(self: &Self, address: u64, expected: u32, new: u32) -> u32;
    /// Atomically replaces the 64 bit value at `address` with `new` if it equals `expected`. Returns the previous
    /// value. The address must be 8-byte aligned.
    fn compare_and_swap_u64(self: &Self, address: u64, expected: u64, new: u64) -> u64;
    /// Byte order of multi-byte values stored through this accessor.
    fn endianness(self: &Self) -> Endianness {
        Endianness::NATIVE
    }
    impl_accessor_ops!(u8, u16, u32, u64);
}

fn assert_cas_alignment(address: u64, len: u64) {
    assert!(address % len == 0, "MEMORY: unaligned {} bit compare-and-swap at {:#x}", len * 8, address);
}

/// A zero initialized, bounds checked block of simulated memory at a fixed base address.
///
/// Bytes live in 64 bit atomic cells. Plain accesses are relaxed loads and read-modify-write stores of the cells
/// they touch, so concurrent stores to distinct bytes never lose each other.
pub struct Region {
    base        : u64,
    size        : usize,
    endianness  : Endianness,
    cells       : Box<[ AtomicU64 ]>,
}

impl Region {
    /// Creates a region of `size` bytes at `base`, using the byte order of the active platform.
    pub fn new(base: u64, size: usize) -> Self {
        Self::with_endianness(base, size, platform().endianness)
    }
    /// Creates a region of `size` bytes at `base` with the given byte order. `base` must be 8-byte aligned.
    pub fn with_endianness(base: u64, size: usize, endianness: Endianness) -> Self {
        assert!(base % 8 == 0, "REGION: base {:#x} is not 8-byte aligned", base);
        assert!(base.checked_add(size as u64).is_some(), "REGION: {} bytes at {:#x} exceed the address space", size, base);
        let cells = (0 .. (size + 7) / 8).map(|_| AtomicU64::new(0)).collect();
        Region { base, size, endianness, cells }
    }
    /// First address of the region.
    pub fn base(self: &Self) -> u64 {
        self.base
    }
    /// Number of bytes in the region.
    pub fn size(self: &Self) -> usize {
        self.size
    }
    /// First address past the region.
    pub fn end(self: &Self) -> u64 {
        self.base + self.size as u64
    }
    /// Whether `len` bytes starting at `address` lie within the region.
    pub fn contains(self: &Self, address: u64, len: usize) -> bool {
        address >= self.base && address.checked_add(len as u64).map_or(false, |end| end <= self.end())
    }
    /// Returns a pointer to `offset` bytes past the base address.
    pub fn pointer<M: WordModel>(self: &Self, offset: usize) -> Pointer<'_, M> {
        assert!(self.size == 0 || self.end() - 1 <= M::MASK, "REGION: {:#x}..{:#x} exceeds {} bit addresses", self.base, self.end(), M::BITS);
        Pointer::new(self, Address::from_bits(self.base + offset as u64))
    }
    /// Returns a pointer to the base address.
    pub fn start<M: WordModel>(self: &Self) -> Pointer<'_, M> {
        self.pointer(0)
    }
    /// Returns a copy of the region's bytes.
    pub fn snapshot(self: &Self) -> Vec<u8> {
        let mut bytes = vec![ 0u8; self.size ];
        self.load_bytes(self.base, &mut bytes);
        bytes
    }
    /// Returns a hex dump of the region, 16 bytes per line.
    #[cfg(feature="debugging")]
    pub fn format_region(self: &Self) -> String {
        let mut result = String::new();
        for (line, chunk) in self.snapshot().chunks(16).enumerate() {
            result.push_str(&format!("{:#010x}:", self.base + line as u64 * 16));
            for byte in chunk {
                result.push_str(&format!(" {:02x}", byte));
            }
            result.push('\n');
        }
        result
    }
    /// Byte offset of `len` bytes at `address` from the base. Panics outside the region.
    fn offset_of(self: &Self, address: u64, len: usize) -> usize {
        if !self.contains(address, len) {
            panic!("REGION: access of {} bytes at {:#x} outside {:#x}..{:#x}", len, address, self.base, self.end());
        }
        (address - self.base) as usize
    }
    /// Calls `chunk` with the cell, the byte position within the cell and the span of the access for every cell
    /// touched by `len` bytes at `address`.
    fn for_each_cell(self: &Self, address: u64, len: usize, mut chunk: impl FnMut(&AtomicU64, usize, std::ops::Range<usize>)) {
        let mut offset = self.offset_of(address, len);
        let mut done = 0;
        while done < len {
            let at = offset % 8;
            let count = (8 - at).min(len - done);
            chunk(&self.cells[offset / 8], at, done .. done + count);
            offset += count;
            done += count;
        }
    }
}

impl Accessor for Region {
    fn load_bytes(self: &Self, address: u64, bytes: &mut [ u8 ]) {
        self.for_each_cell(address, bytes.len(), |cell, at, span| {
            let cell = cell.load(AtomicOrdering::Relaxed).to_ne_bytes();
            bytes[span.clone()].copy_from_slice(&cell[at .. at + span.len()]);
        });
    }
    fn store_bytes(self: &Self, address: u64, bytes: &[ u8 ]) {
        self.for_each_cell(address, bytes.len(), |cell, at, span| {
            let part = &bytes[span];
            if part.len() == 8 {
                let mut whole = [ 0u8; 8 ];
                whole.copy_from_slice(part);
                cell.store(u64::from_ne_bytes(whole), AtomicOrdering::Relaxed);
            } else {
                let mut current = cell.load(AtomicOrdering::Relaxed);
                loop {
                    let mut updated = current.to_ne_bytes();
                    updated[at .. at + part.len()].copy_from_slice(part);
                    match cell.compare_exchange_weak(current, u64::from_ne_bytes(updated), AtomicOrdering::Relaxed, AtomicOrdering::Relaxed) {
                        Ok(_) => break,
                        Err(actual) => current = actual,
                    }
                }
            }
        });
    }
    fn compare_and_swap_u32(self: &Self, address: u64, expected: u32, new: u32) -> u32 {
        assert_cas_alignment(address, 4);
        let offset = self.offset_of(address, 4);
        let (cell, at) = (&self.cells[offset / 8], offset % 8);
        let mut current = cell.load(AtomicOrdering::SeqCst);
        loop {
            let mut bytes = current.to_ne_bytes();
            let previous = self.endianness.read_u32([ bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3] ]);
            if previous != expected {
                return previous;
            }
            bytes[at .. at + 4].copy_from_slice(&self.endianness.write_u32(new));
            match cell.compare_exchange_weak(current, u64::from_ne_bytes(bytes), AtomicOrdering::SeqCst, AtomicOrdering::SeqCst) {
                Ok(_) => return previous,
                Err(actual) => current = actual,
            }
        }
    }
    fn compare_and_swap_u64(self: &Self, address: u64, expected: u64, new: u64) -> u64 {
        assert_cas_alignment(address, 8);
        let cell = &self.cells[self.offset_of(address, 8) / 8];
        let order = self.endianness;
        match cell.compare_exchange(order.order_u64(expected), order.order_u64(new), AtomicOrdering::SeqCst, AtomicOrdering::SeqCst) {
            Ok(previous) | Err(previous) => order.order_u64(previous),
        }
    }
    fn endianness(self: &Self) -> Endianness {
        self.endianness
    }
}

impl Debug for Region {
    fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Region")
            .field("base", &format_args!("{:#x}", self.base))
            .field("size", &self.size)
            .field("endianness", &self.endianness)
            .finish()
    }
}

/// Unchecked access to host memory: addresses are host addresses.
pub struct NativeMemory {
    _private: (),
}

impl NativeMemory {
    /// Creates an accessor for raw host memory.
    ///
    /// # Safety
    ///
    /// Every address accessed through the returned accessor, or any pointer created from it, must be valid for the
    /// accessed number of bytes. A plain store must not race with any other access to the same bytes, and a plain
    /// load must not race with a compare-and-swap.
    pub unsafe fn new() -> Self {
        NativeMemory { _private: () }
    }
    /// Returns a pointer to the given host address.
    pub fn pointer<M: WordModel>(self: &Self, address: usize) -> Pointer<'_, M> {
        Pointer::new(self, Address::from_bits(address as u64))
    }
}

impl Accessor for NativeMemory {
    fn load_bytes(self: &Self, address: u64, bytes: &mut [ u8 ]) {
        // valid and race free per the contract of `NativeMemory::new`
        unsafe { std::ptr::copy_nonoverlapping(address as usize as *const u8, bytes.as_mut_ptr(), bytes.len()) }
    }
    fn store_bytes(self: &Self, address: u64, bytes: &[ u8 ]) {
        unsafe { std::ptr::copy_nonoverlapping(bytes.as_ptr(), address as usize as *mut u8, bytes.len()) }
    }
    fn compare_and_swap_u32(self: &Self, address: u64, expected: u32, new: u32) -> u32 {
        assert_cas_alignment(address, 4);
        let cell = unsafe { &*(address as usize as *const AtomicU32) };
        let order = self.endianness();
        match cell.compare_exchange(order.order_u32(expected), order.order_u32(new), AtomicOrdering::SeqCst, AtomicOrdering::SeqCst) {
            Ok(previous) | Err(previous) => order.order_u32(previous),
        }
    }
    fn compare_and_swap_u64(self: &Self, address: u64, expected: u64, new: u64) -> u64 {
        assert_cas_alignment(address, 8);
        let cell = unsafe { &*(address as usize as *const AtomicU64) };
        let order = self.endianness();
        match cell.compare_exchange(order.order_u64(expected), order.order_u64(new), AtomicOrdering::SeqCst, AtomicOrdering::SeqCst) {
            Ok(previous) | Err(previous) => order.order_u64(previous),
        }
    }
}

impl Debug for NativeMemory {
    fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeMemory")
    }
}
