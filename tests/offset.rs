#[macro_use]
mod util;
use util::*;

fn signed<M: WordModel>() {
    let minus_seven = Offset::<M>::from_int(-7);
    assert_eq!(minus_seven.divided_by(2), Offset::from_int(-3));
    assert_eq!(minus_seven.remainder(2), Offset::from_int(-1));
    assert_eq!(minus_seven / -2, Offset::from_int(3));
    assert_eq!(minus_seven % -2, Offset::from_int(-1));
    assert!(minus_seven.is_negative());
    assert!(!minus_seven.negate().is_negative());
    assert_eq!(-minus_seven, Offset::from_int(7));
    assert!(minus_seven < Offset::zero());
    assert!(Offset::<M>::from_int(-1) < Offset::from_int(1));
    assert_eq!(Offset::<M>::from_int(-8).shifted_right(1), Offset::from_int(-4));
    assert_eq!(Offset::<M>::from_int(-8).unsigned_shifted_right(1).bits(), M::MASK >> 1 & !3);
    assert_eq!(Offset::<M>::from_int(3).shifted_left(2), Offset::from_int(12));
    assert_eq!(Offset::<M>::from_int(-1).and(0xff), Offset::from_int(0xff));
    assert_eq!(Offset::<M>::from_int(0x10).or(0x01).not(), Offset::from_int(!0x11));
    assert_eq!(Offset::<M>::from_int(5) * 3 - 20 + 1, Offset::from_int(-4));
    assert_eq!(Offset::<M>::from_int(-13).aligned(8), Offset::from_int(-8));
    assert!(Offset::<M>::from_int(-16).is_aligned(8));
    assert_eq!(Offset::<M>::from_int(3).word_aligned(), Offset::from_int(M::BYTES as i32));
}

#[test]
fn signed_arithmetic() {
    for_all_models!(signed);
}

fn bitwise<M: WordModel>() {
    let minus_eight = Offset::<M>::from_int(-8);
    assert_eq!(minus_eight & 0xf, Offset::from_int(8));
    assert_eq!(minus_eight | 3, Offset::from_int(-5));
    assert_eq!(minus_eight ^ -1, Offset::from_int(7));
    assert_eq!(minus_eight.xor(minus_eight), Offset::zero());
    assert_eq!(!minus_eight, Offset::from_int(7));
    assert_eq!(minus_eight << 2, Offset::from_int(-32));
    assert_eq!(minus_eight >> 2, Offset::from_int(-2));
    assert_eq!(minus_eight >> 2, minus_eight.shifted_right(2));
    assert_eq!(Offset::<M>::from_int(1) << M::BITS, Offset::from_int(1));
}

#[test]
fn bitwise_operators() {
    for_all_models!(bitwise);
}

#[test]
fn minimum_divided_by_minus_one_wraps() {
    let min = Offset::<Hosted32>::from_int(i32::MIN);
    assert_eq!(min.divided_by(-1), min);
    assert_eq!(min.remainder(-1), Offset::zero());
    let min = Offset::<Target64>::from_long(i64::MIN);
    assert_eq!(min.divided_by(-1), min);
}

#[test]
fn conversions() {
    let offset: Offset<Target32> = (-4).into();
    assert_eq!(offset.to_long(), -4);
    assert_eq!(offset.to_int(), -4);
    let offset: Offset<Target32> = 0x1_0000_0004i64.into();
    assert_eq!(offset, Offset::from_int(4));
    assert_eq!(Offset::<Hosted64>::from_unsigned_int(-1).to_long(), 0xffff_ffff);
}

#[test]
#[should_panic(expected = "division by zero")]
fn divide_by_zero() {
    Offset::<Hosted64>::from_int(1).divided_by(0);
}
