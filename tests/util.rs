#![allow(dead_code, unused_macros)]

pub use metaword::*;
pub use std::cell::Cell;

/// Runs a generic test function once for each word model.
macro_rules! for_all_models {
    ($test:ident) => {
        $test::<metaword::Hosted32>();
        $test::<metaword::Hosted64>();
        $test::<metaword::Target32>();
        $test::<metaword::Target64>();
    };
    ($test:ident, $($arg:expr),+) => {
        $test::<metaword::Hosted32>($($arg),+);
        $test::<metaword::Hosted64>($($arg),+);
        $test::<metaword::Target32>($($arg),+);
        $test::<metaword::Target64>($($arg),+);
    };
}

/// A bump allocating heap over a region. Each array is laid out as a length word followed by its elements.
pub struct TestHeap<'r, M: WordModel> {
    region  : &'r Region,
    next    : Cell<u64>,
    model   : std::marker::PhantomData<M>,
}

impl<'r, M: WordModel> TestHeap<'r, M> {
    pub fn new(region: &'r Region) -> Self {
        TestHeap { region, next: Cell::new(region.base()), model: std::marker::PhantomData }
    }
    pub fn pointer(self: &Self, origin: Reference<M>) -> Pointer<'r, M> {
        Pointer::new(self.region, origin.as_address())
    }
    /// Byte displacement of the first element past the length word.
    fn elements() -> i32 {
        M::BYTES as i32
    }
}

impl<'r, M: WordModel> ArrayAccess<M> for TestHeap<'r, M> {
    fn read_array_length(self: &Self, origin: Reference<M>) -> i32 {
        self.pointer(origin).read_word(0).to_int()
    }
    fn get_word(self: &Self, origin: Reference<M>, index: i32) -> Word<M> {
        self.pointer(origin).get_word(Self::elements(), index)
    }
    fn set_word(self: &Self, origin: Reference<M>, index: i32, value: Word<M>) {
        self.pointer(origin).set_word(Self::elements(), index, value)
    }
    fn get_int(self: &Self, origin: Reference<M>, index: i32) -> i32 {
        self.pointer(origin).get_int(Self::elements(), index)
    }
    fn set_int(self: &Self, origin: Reference<M>, index: i32, value: i32) {
        self.pointer(origin).set_int(Self::elements(), index, value)
    }
}

impl<'r, M: WordModel> HybridHeap<M> for TestHeap<'r, M> {
    fn expand_hybrid(self: &Self, length: i32) -> Reference<M> {
        let origin = self.next.get();
        let size = (length as u64 + 1) * M::BYTES as u64;
        assert!(self.region.contains(origin, size as usize), "test heap exhausted");
        self.next.set(origin + size);
        let origin = Reference::from_bits(origin);
        self.pointer(origin).write_word(0, Word::from_int(length));
        origin
    }
}
