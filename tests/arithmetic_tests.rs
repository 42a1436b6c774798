// Addition and decimal emission on arbitrary operands

use fibtape::config::MachineConfig;
use fibtape::engine::Machine;

fn limbs(mut value: u128) -> Vec<u8> {
    let mut limbs = Vec::new();
    while value > 0 {
        limbs.push(value as u8);
        value >>= 8;
    }
    limbs
}

fn value(limbs: &[u8]) -> u128 {
    limbs
        .iter()
        .rev()
        .fold(0u128, |acc, &limb| (acc << 8) | u128::from(limb))
}

fn machine(previous: u128, current: u128) -> Machine {
    Machine::with_operands(
        &MachineConfig { capacity: 5_000 },
        &limbs(previous),
        &limbs(current),
    )
    .expect("operands do not fit")
}

#[test]
fn test_addition_of_differing_lengths() {
    let cases: [(u128, u128); 6] = [
        (0, 0),
        (1, 0),
        (0xffff_ffff, 1),
        (1, 0xff_ffff_ffff_ffff),
        (123_456_789_012_345_678, 9),
        (u64::MAX as u128, u64::MAX as u128),
    ];

    for (previous, current) in cases {
        let mut machine = machine(previous, current);
        machine.add().unwrap();
        assert_eq!(
            value(&machine.current_limbs().unwrap()),
            previous + current,
            "{} + {}",
            previous,
            current
        );
        assert_eq!(value(&machine.previous_limbs().unwrap()), current);
    }
}

#[test]
fn test_addition_grows_by_one_block() {
    let mut machine = machine(0xffff, 0x0001);
    let before = machine.list().blocks();
    machine.add().unwrap();
    assert_eq!(machine.current_limbs().unwrap(), vec![0x00, 0x00, 0x01]);
    assert_eq!(machine.list().blocks(), before + 1);
}

#[test]
fn test_emission_matches_decimal() {
    let values: [u128; 7] = [
        0,
        9,
        10,
        99,
        100_000,
        18_446_744_073_709_551_616,
        340_282_366_920_938_463_463_374_607_431_768_211_455,
    ];

    for v in values {
        let mut machine = machine(0, v);
        let mut out = Vec::new();
        machine.emit_current(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), format!("{}\n", v));
    }
}
