//! Hybrid object layout: declared fields followed by a tail array that is addressable as words and as ints.

use crate::prelude::*;
use crate::model::{WordModel, Native};
use crate::word::Word;
use crate::reference::Reference;

/// Low-level array accessors of the object model. Indices are relative to the start of the tail array.
pub trait ArrayAccess<M: WordModel = Native> {
    /// Length of the array at `origin`, in words.
    fn read_array_length(self: &Self, origin: Reference<M>) -> i32;
    fn get_word(self: &Self, origin: Reference<M>, index: i32) -> Word<M>;
    fn set_word(self: &Self, origin: Reference<M>, index: i32, value: Word<M>);
    fn get_int(self: &Self, origin: Reference<M>, index: i32) -> i32;
    fn set_int(self: &Self, origin: Reference<M>, index: i32, value: i32);
}

/// Heap allocator capable of expanding hybrids.
pub trait HybridHeap<M: WordModel = Native>: ArrayAccess<M> {
    /// Allocates a tail array of `length` words and returns its origin.
    fn expand_hybrid(self: &Self, length: i32) -> Reference<M>;
}

/// Valid tail index ranges of a concrete hybrid, implemented by its field type.
pub trait HybridShape<M: WordModel = Native> {
    /// First valid word index of the tail.
    fn first_word_index(self: &Self) -> i32;
    /// Last valid word index of a tail of `length` words.
    fn last_word_index(self: &Self, length: i32) -> i32;
    /// First valid int index, the first int of the first valid word.
    fn first_int_index(self: &Self) -> i32 {
        self.first_word_index() * ints_per_word::<M>()
    }
    /// Last valid int index, the last int of the last valid word.
    fn last_int_index(self: &Self, length: i32) -> i32 {
        (self.last_word_index(length) + 1) * ints_per_word::<M>() - 1
    }
}

fn ints_per_word<M: WordModel>() -> i32 {
    (M::BYTES / size_of::<i32>()) as i32
}

/// An object combining fields `S` with a tail array.
///
/// A hybrid starts out unexpanded. [`Hybrid::expand`] asks the heap for a tail and returns a new, expanded hybrid;
/// only expanded hybrids have a length and tail accessors.
pub struct Hybrid<'h, S: HybridShape<M>, M: WordModel = Native> {
    fields  : S,
    origin  : Option<Reference<M>>,
    heap    : &'h dyn HybridHeap<M>,
}

impl<'h, S: HybridShape<M>, M: WordModel> Hybrid<'h, S, M> {
    /// Creates an unexpanded hybrid.
    pub fn new(fields: S, heap: &'h dyn HybridHeap<M>) -> Self {
        Hybrid { fields, origin: None, heap }
    }
    pub fn fields(self: &Self) -> &S {
        &self.fields
    }
    pub fn fields_mut(self: &mut Self) -> &mut S {
        &mut self.fields
    }
    pub fn is_expanded(self: &Self) -> bool {
        self.origin.is_some()
    }
    /// Origin of the tail array.
    pub fn origin(self: &Self) -> Option<Reference<M>> {
        self.origin
    }
    /// Returns an expanded copy of this hybrid whose tail holds `length` words. This hybrid is left unchanged.
    pub fn expand(self: &Self, length: i32) -> Self where S: Clone {
        assert!(self.origin.is_none(), "HYBRID: already expanded");
        assert!(length >= 0, "HYBRID: negative length {}", length);
        let origin = self.heap.expand_hybrid(length);
        Hybrid { fields: self.fields.clone(), origin: Some(origin), heap: self.heap }
    }
    fn assert_expanded(self: &Self) {
        assert!(self.is_expanded(), "HYBRID: access to the tail of an unexpanded hybrid");
    }
    fn expanded_origin(self: &Self) -> Reference<M> {
        match self.origin {
            Some(origin) => origin,
            None => panic!("HYBRID: access to the tail of an unexpanded hybrid"),
        }
    }
    /// Length of the tail in words.
    pub fn length(self: &Self) -> i32 {
        self.heap.read_array_length(self.expanded_origin())
    }
    pub fn first_word_index(self: &Self) -> i32 {
        self.assert_expanded();
        self.fields.first_word_index()
    }
    pub fn last_word_index(self: &Self) -> i32 {
        self.fields.last_word_index(self.length())
    }
    pub fn first_int_index(self: &Self) -> i32 {
        self.assert_expanded();
        self.fields.first_int_index()
    }
    pub fn last_int_index(self: &Self) -> i32 {
        self.fields.last_int_index(self.length())
    }
    fn check_word_index(self: &Self, index: i32) -> Reference<M> {
        let origin = self.expanded_origin();
        let (first, last) = (self.first_word_index(), self.last_word_index());
        assert!(first <= index && index <= last, "HYBRID: word index {} out of range {}..={}", index, first, last);
        origin
    }
    fn check_int_index(self: &Self, index: i32) -> Reference<M> {
        let origin = self.expanded_origin();
        let (first, last) = (self.first_int_index(), self.last_int_index());
        assert!(first <= index && index <= last, "HYBRID: int index {} out of range {}..={}", index, first, last);
        origin
    }
    /// Reads the word at `index` of the tail.
    pub fn get_word(self: &Self, index: i32) -> Word<M> {
        let origin = self.check_word_index(index);
        self.heap.get_word(origin, index)
    }
    /// Writes the word at `index` of the tail.
    pub fn set_word(self: &mut Self, index: i32, value: Word<M>) {
        let origin = self.check_word_index(index);
        self.heap.set_word(origin, index, value)
    }
    /// Reads the int at `index` of the tail. Ints alias the bytes of the words.
    pub fn get_int(self: &Self, index: i32) -> i32 {
        let origin = self.check_int_index(index);
        self.heap.get_int(origin, index)
    }
    /// Writes the int at `index` of the tail.
    pub fn set_int(self: &mut Self, index: i32, value: i32) {
        let origin = self.check_int_index(index);
        self.heap.set_int(origin, index, value)
    }
    /// Returns the valid tail words, one per line.
    #[cfg(feature="debugging")]
    pub fn format_tail(self: &Self) -> String {
        let mut result = String::new();
        for index in self.first_word_index() ..= self.last_word_index() {
            result.push_str(&format!("[{}] {}\n", index, self.get_word(index).to_padded_hex_string('0')));
        }
        result
    }
}

impl<'h, S: HybridShape<M> + Debug, M: WordModel> Debug for Hybrid<'h, S, M> {
    fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hybrid")
            .field("fields", &self.fields)
            .field("origin", &self.origin)
            .finish()
    }
}
