mod util;
use util::*;

#[test]
fn widths() {
    assert_eq!(WordWidth::from_bits(16), Some(WordWidth::Bits16));
    assert_eq!(WordWidth::from_bits(24), None);
    assert_eq!(WordWidth::Bits64.number_of_bytes(), 8);
    assert_eq!(WordWidth::Bits32.to_string(), "32 bits");
    assert!(WordWidth::VALUES.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn endianness_conversions() {
    assert_eq!(Endianness::Big.write_u32(0x01020304), [ 1, 2, 3, 4 ]);
    assert_eq!(Endianness::Little.read_u16([ 1, 2 ]), 0x0201);
    for &order in &[ Endianness::Little, Endianness::Big ] {
        assert_eq!(order.order_u64(order.order_u64(0x0102030405060708)), 0x0102030405060708);
    }
    assert_eq!(Endianness::NATIVE.order_u32(0x01020304), 0x01020304);
}

// The platform is process-wide, so everything touching it lives in one test.
#[test]
fn platform_initializes_once() {
    let native = Platform::native();
    let requested = Platform { word_width: WordWidth::Bits16, ..native };
    let error = requested.init().unwrap_err();
    assert_eq!(error.kind(), &ConfigErrorKind::ModelMismatch { requested, native });
    let requested = Platform { mode: if native.mode == Mode::Hosted { Mode::Target } else { Mode::Hosted }, ..native };
    assert!(requested.init().is_err());

    let big = Platform::with_endianness(Endianness::Big);
    assert_eq!(big.init(), Ok(()));
    assert_eq!(platform(), &big);
    assert_eq!(big.init().unwrap_err().kind(), &ConfigErrorKind::AlreadyInitialized);
    assert_eq!(Platform::native().init().unwrap_err().kind(), &ConfigErrorKind::AlreadyInitialized);

    let region = Region::new(0x1000, 16);
    let pointer: Pointer = region.start();
    pointer.write_int(0, 0x01020304);
    assert_eq!(pointer.read_byte(0), 1);
    let mut bytes = Vec::new();
    Word::<Native>::from_int(1).write(&mut bytes).unwrap();
    assert_eq!(bytes.last(), Some(&1));
}
