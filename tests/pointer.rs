#[macro_use]
mod util;
use util::*;

fn scalars<M: WordModel>(endianness: Endianness) {
    let region = Region::with_endianness(0x1000, 128, endianness);
    let pointer: Pointer<M> = region.start();
    pointer.write_byte(0, -2);
    pointer.write_boolean(1, true);
    pointer.write_short(2, -300);
    pointer.write_char(4, 0xfffe);
    pointer.write_int(8, -123456);
    pointer.write_float(12, 1.5);
    pointer.write_long(16, -1234567890123);
    pointer.write_double(24, -0.25);
    pointer.write_word(32, Word::from_int(-5));
    pointer.write_reference(40, Reference::from_int(0x1040));
    assert_eq!(pointer.read_byte(0), -2);
    assert_eq!(pointer.read_boolean(1), true);
    assert_eq!(pointer.read_short(2), -300);
    assert_eq!(pointer.read_char(4), 0xfffe);
    assert_eq!(pointer.read_int(8), -123456);
    assert_eq!(pointer.read_float(12), 1.5);
    assert_eq!(pointer.read_long(16), -1234567890123);
    assert_eq!(pointer.read_double(24), -0.25);
    assert_eq!(pointer.read_word(32), Word::from_int(-5));
    assert_eq!(pointer.read_reference(40), Reference::from_int(0x1040));
    // unaligned
    pointer.write_int(49, 0x7f00ff01);
    assert_eq!(pointer.read_int(49), 0x7f00ff01);
}

#[test]
fn scalar_round_trip() {
    for_all_models!(scalars, Endianness::Little);
    for_all_models!(scalars, Endianness::Big);
}

#[test]
fn byte_order() {
    let little = Region::with_endianness(0x1000, 16, Endianness::Little);
    let pointer: Pointer<Target64> = little.start();
    pointer.write_int(0, 0x01020304);
    assert_eq!(pointer.read_byte(0), 4);
    assert_eq!(&little.snapshot()[0 .. 4], &[ 4, 3, 2, 1 ]);
    let big = Region::with_endianness(0x1000, 16, Endianness::Big);
    let pointer: Pointer<Target64> = big.start();
    pointer.write_int(0, 0x01020304);
    assert_eq!(pointer.read_byte(0), 1);
    assert_eq!(pointer.read_short(2), 0x0304);
    let pointer: Pointer<Hosted32> = big.start();
    pointer.write_word(8, Word::from_int(0x0a0b0c0d));
    assert_eq!(&big.snapshot()[8 .. 12], &[ 0x0a, 0x0b, 0x0c, 0x0d ]);
}

fn scaled<M: WordModel>() {
    let region = Region::new(0x1000, 128);
    let pointer: Pointer<M> = region.start();
    pointer.set_int(8, 2, 7);
    assert_eq!(pointer.read_int(16), 7);
    assert_eq!(pointer.get_int(8, 2), 7);
    assert_eq!(pointer.get_int_at(4), 7);
    pointer.set_long(0, 3, -9);
    assert_eq!(pointer.read_long(24), -9);
    pointer.set_short_at(1, 5);
    assert_eq!(pointer.read_short(2), 5);
    pointer.set_word(8, 1, Word::from_int(11));
    assert_eq!(pointer.read_word(8 + M::BYTES as i32), Word::from_int(11));
    assert_eq!(pointer.plus(8).plus_words(1).get_word_at(0), Word::from_int(11));
    pointer.set_reference_at(10, Reference::from_int(0x2000));
    assert_eq!(pointer.read_reference(10 * M::BYTES as i32), Reference::from_int(0x2000));
    pointer.plus(64).store(42i32);
    assert_eq!(pointer.plus(64).load::<i32>(), 42);
    // negative displacement and index
    let middle = pointer.plus(64);
    middle.set_int(-8, -1, 13);
    assert_eq!(pointer.read_int(52), 13);
    assert_eq!(pointer.get::<i32>(52, 0), 13);
    // offsets of all kinds
    assert_eq!(middle.read_int(Offset::from_int(-12)), 13);
    assert_eq!(middle.read_int(-12i64), 13);
}

#[test]
fn scaled_access() {
    for_all_models!(scaled);
}

fn arithmetic<M: WordModel>() {
    let region = Region::new(0x1000, 64);
    let pointer: Pointer<M> = region.start();
    assert_eq!(pointer.plus_words(2).address(), Address::from_int(0x1000 + 2 * M::BYTES as i32));
    assert_eq!(pointer.plus_words(2).minus_words(2), pointer);
    assert_eq!(pointer.plus(3).word_aligned(), pointer.plus(M::BYTES));
    assert_eq!(pointer.plus(3).aligned(2), pointer.plus(4));
    assert_eq!(pointer.plus(9).rounded_down_by(8), pointer.plus(8));
    assert_eq!(pointer.plus(9).rounded_up_by(8), pointer.plus(16));
    assert_eq!(pointer.plus(0xf).and(!7), pointer.plus(8));
    assert_eq!(pointer.or(0x10).bit_clear(4), pointer);
    assert_eq!(pointer.bit_set(5).minus(0x20), pointer);
    // address queries through deref
    assert!(pointer.is_word_aligned());
    assert_eq!(pointer.to_hex_string(), "1000");
    assert_eq!(pointer.plus(8).read_int(-8), pointer.read_int(0));
}

#[test]
fn pointer_arithmetic() {
    for_all_models!(arithmetic);
}

fn bound<M: WordModel>() {
    let region = Region::new(0x1000, 64);
    let pointer = Pointer::<M>::from_int(&region, 0x800);
    assert_eq!(pointer.times(2), region.start());
    assert_eq!(region.start::<M>().divided_by(2), pointer);
    assert_eq!(region.start::<M>().plus(0x13).remainder(0x10).address(), Address::from_int(3));
    assert_eq!(pointer.shifted_left(1), region.start());
    assert_eq!(region.start::<M>().unsigned_shifted_right(1), pointer);
    assert_eq!(pointer.xor(0x1800), region.start());
    assert_eq!(Pointer::<M>::zero(&region).not().address(), Address::max());
    assert_eq!(Pointer::<M>::from_long(&region, 0x1008), region.pointer(8));
    assert_eq!(Pointer::<M>::from_unsigned_int(&region, -1).address().to_long(), 0xffff_ffff);
    // results stay bound to the region
    region.start::<M>().write_int(8, 77);
    assert_eq!(pointer.times(2).plus(8).read_int(0), 77);
    assert_eq!(Pointer::<M>::from_int(&region, 0x2010).unsigned_shifted_right(1).read_int(0), 77);
}

#[test]
fn arithmetic_keeps_memory() {
    for_all_models!(bound);
}

fn cas<M: WordModel>(endianness: Endianness) {
    let region = Region::with_endianness(0x1000, 64, endianness);
    let pointer: Pointer<M> = region.start();
    pointer.write_int(0, 5);
    assert_eq!(pointer.compare_and_swap_int(0, 5, 6), 5);
    assert_eq!(pointer.read_int(0), 6);
    assert_eq!(pointer.compare_and_swap_int(0, 5, 7), 6);
    assert_eq!(pointer.read_int(0), 6);

    let word = M::BYTES as i32;
    pointer.write_word(word, Word::from_int(-1));
    assert_eq!(pointer.compare_and_swap_word(word, Word::from_int(-1), Word::from_int(3)), Word::from_int(-1));
    assert_eq!(pointer.read_word(word), Word::from_int(3));
    assert_eq!(pointer.compare_and_swap_word(word, Word::from_int(-1), Word::from_int(4)), Word::from_int(3));
    assert_eq!(pointer.read_word(word), Word::from_int(3));

    let null = Reference::null();
    let object = Reference::from_int(0x1040);
    assert_eq!(pointer.compare_and_swap_reference(2 * word, null, object), null);
    assert_eq!(pointer.compare_and_swap_reference(2 * word, null, object), object);
    assert_eq!(pointer.read_reference(2 * word), object);
}

#[test]
fn compare_and_swap() {
    for_all_models!(cas, Endianness::Little);
    for_all_models!(cas, Endianness::Big);
}

#[test]
fn concurrent_compare_and_swap() {
    let region = Region::new(0x1000, 8);
    let pointer: Pointer<Target64> = region.start();
    std::thread::scope(|scope| {
        for _ in 0 .. 4 {
            scope.spawn(|| {
                for _ in 0 .. 1000 {
                    let mut expected = 0;
                    loop {
                        let previous = pointer.compare_and_swap_int(0, expected, expected + 1);
                        if previous == expected {
                            break;
                        }
                        expected = previous;
                    }
                }
            });
        }
    });
    assert_eq!(pointer.read_int(0), 4000);
}

#[test]
fn concurrent_plain_stores() {
    let region = Region::new(0x1000, 16);
    let pointer: Pointer<Target64> = region.start();
    // each thread owns one byte of the first word
    std::thread::scope(|scope| {
        for thread in 0 .. 8 {
            scope.spawn(move || {
                for round in 0 .. 500 {
                    pointer.write_byte(thread, (thread * 16 + round % 16) as i8);
                }
                pointer.write_byte(thread, thread as i8 + 1);
            });
        }
    });
    assert_eq!(&region.snapshot()[0 .. 8], &[ 1, 2, 3, 4, 5, 6, 7, 8 ]);
}

#[test]
fn stores_beside_compare_and_swap() {
    let region = Region::with_endianness(0x1000, 16, Endianness::Little);
    let pointer: Pointer<Target64> = region.start();
    std::thread::scope(|scope| {
        scope.spawn(|| {
            for _ in 0 .. 2000 {
                let mut expected = pointer.read_int(0);
                loop {
                    let previous = pointer.compare_and_swap_int(0, expected, expected + 1);
                    if previous == expected {
                        break;
                    }
                    expected = previous;
                }
            }
        });
        scope.spawn(|| {
            for value in 0 .. 2000 {
                pointer.write_int(4, value);
                pointer.write_short(6, -1);
            }
        });
    });
    assert_eq!(pointer.read_int(0), 2000);
    assert_eq!(pointer.read_short(4), 1999i32 as i16);
    assert_eq!(pointer.read_short(6), -1);
}

#[test]
#[should_panic(expected = "unaligned")]
fn unaligned_compare_and_swap() {
    let region = Region::new(0x1000, 16);
    let pointer: Pointer<Target64> = region.start();
    pointer.compare_and_swap_int(2, 0, 1);
}

#[test]
fn bit_maps() {
    let region = Region::new(0x1000, 8);
    let pointer: Pointer<Hosted32> = region.start();
    pointer.set_bit(0);
    pointer.set_bit(9);
    pointer.set_bit(7);
    assert_eq!(&region.snapshot()[0 .. 2], &[ 0x81, 0x02 ]);
    pointer.set_bits(22, 0xff);
    assert_eq!(&region.snapshot()[2 .. 4], &[ 0xc0, 0x3f ]);
    pointer.set_bits(32, 0x5a);
    assert_eq!(&region.snapshot()[4 .. 6], &[ 0x5a, 0x00 ]);
}

fn copies<M: WordModel>() {
    let region = Region::new(0x1000, 128);
    let pointer: Pointer<M> = region.start();
    for index in 0 .. 4 {
        pointer.set_int(8, index, (index + 1) * 10);
    }
    let mut ints = [ 0i32; 6 ];
    pointer.copy_elements(8, 1, &mut ints, 2, 3).unwrap();
    assert_eq!(ints, [ 0, 0, 20, 30, 40, 0 ]);

    for index in 0 .. 3 {
        pointer.set_word(32, index, Word::from_int(-index));
    }
    let mut words = [ Word::<M>::all_ones(); 3 ];
    pointer.copy_elements(32, 0, &mut words, 0, 3).unwrap();
    assert_eq!(words, [ Word::zero(), Word::from_int(-1), Word::from_int(-2) ]);

    let mut flags = [ false; 2 ];
    pointer.write_boolean(100, true);
    pointer.copy_elements(99, 0, &mut flags, 0, 2).unwrap();
    assert_eq!(flags, [ false, true ]);

    let mut voids = [ (); 2 ];
    let error = pointer.copy_elements(0, 0, &mut voids, 0, 2).unwrap_err();
    assert_eq!(error.kind(), &MemoryErrorKind::InvalidKind(Kind::Void));
    assert_eq!(error.to_string(), "Invalid element kind void for bulk copy");
}

#[test]
fn copy_elements() {
    for_all_models!(copies);
}

#[test]
fn element_views() {
    let mut doubles = [ 0.5f64; 3 ];
    let view = <f64 as Element<Target64>>::array(&mut doubles).unwrap();
    assert_eq!(view.kind(), Kind::Double);
    assert_eq!(view.len(), 3);
    assert_eq!(Kind::Word.size::<Hosted32>(), 4);
    assert_eq!(Kind::Reference.size::<Target64>(), 8);
    assert_eq!(<i16 as Scalar<Target32>>::size(), 2);
}

#[test]
#[should_panic(expected = "REGION")]
fn out_of_bounds() {
    let region = Region::new(0x1000, 64);
    let pointer: Pointer<Target64> = region.start();
    pointer.read_int(62);
}

#[test]
#[should_panic(expected = "REGION")]
fn below_base() {
    let region = Region::new(0x1000, 64);
    let pointer: Pointer<Target64> = region.start();
    pointer.read_byte(-1);
}

#[test]
fn region_bounds() {
    let region = Region::new(0x2000, 32);
    assert_eq!(region.base(), 0x2000);
    assert_eq!(region.size(), 32);
    assert_eq!(region.end(), 0x2020);
    assert!(region.contains(0x2000, 32));
    assert!(!region.contains(0x2001, 32));
    assert!(!region.contains(0x1fff, 1));
    assert!(region.snapshot().iter().all(|&byte| byte == 0));
    let pointer: Pointer<Hosted32> = region.pointer(16);
    assert_eq!(pointer.address(), Address::from_int(0x2010));
}

#[cfg(not(feature="word32"))]
#[test]
fn native_memory() {
    let mut buffer = [ 0u64; 4 ];
    let address = buffer.as_mut_ptr() as usize;
    let memory = unsafe { NativeMemory::new() };
    let pointer: Pointer = memory.pointer(address);
    pointer.write_long(8, -5);
    pointer.set_int(16, 1, 0x01020304);
    assert_eq!(pointer.get_long_at(1), -5);
    assert_eq!(buffer[1], -5i64 as u64);
    assert_eq!(pointer.read_int(20), 0x01020304);
    assert_eq!(pointer.compare_and_swap_int(0, 0, 9), 0);
    assert_eq!(pointer.compare_and_swap_int(0, 0, 10), 9);
    assert_eq!(pointer.read_int(0), 9);
}

#[test]
fn pointer_identity() {
    let region = Region::new(0x1000, 64);
    let a: Pointer<Target64> = region.start();
    let b: Pointer<Target64> = region.pointer(0);
    assert_eq!(a, b);
    assert_ne!(a, b.plus(1));
    let mut set = std::collections::HashSet::new();
    set.insert(a);
    assert!(set.contains(&b));
}

#[cfg(feature="debugging")]
#[test]
fn hex_dumps() {
    let region = Region::with_endianness(0x1000, 32, Endianness::Little);
    let pointer: Pointer<Target64> = region.start();
    pointer.write_int(0, 0x04030201);
    assert_eq!(pointer.format_bytes(4), "^1000: 01 02 03 04");
    assert!(region.format_region().starts_with("0x00001000: 01 02 03 04 00"));
    assert_eq!(region.format_region().lines().count(), 2);
}
