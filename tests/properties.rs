use std::time::Duration;

use chip8_vm::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, MAX_ROM_SIZE, SPRITE_SHEET};
use chip8_vm::{Chip8, Error, Status};

/// Lays out instruction words at their addresses and loads the result at 0x200
fn load(words: &[(u16, u16)]) -> Chip8 {
    let mut image = vec![0; 0x300];
    for &(address, word) in words {
        let offset = (address - 0x200) as usize;
        image[offset] = (word >> 8) as u8;
        image[offset + 1] = word as u8;
    }
    let mut chip8 = Chip8::with_seed(0xC8);
    chip8.load_image(&image);
    chip8
}

fn opcode_at_pc(chip8: &Chip8) -> u16 {
    let state = chip8.state();
    state.memory.read_word(state.pc).unwrap()
}

#[test]
fn add_with_carry() {
    let mut chip8 = load(&[(0x200, 0x61FF), (0x202, 0x6201), (0x204, 0x8124)]);
    for _ in 0..3 {
        chip8.step().unwrap();
    }
    assert_eq!(chip8.state().v[0x1], 0x00);
    assert_eq!(chip8.state().v[0xF], 0x1);
}

#[test]
fn subtract_with_borrow() {
    let mut chip8 = load(&[(0x200, 0x6101), (0x202, 0x6202), (0x204, 0x8125)]);
    for _ in 0..3 {
        chip8.step().unwrap();
    }
    assert_eq!(chip8.state().v[0x1], 0xFF);
    assert_eq!(chip8.state().v[0xF], 0x0);
}

#[test]
fn shift_right() {
    let mut chip8 = load(&[(0x200, 0x6181), (0x202, 0x8106)]);
    chip8.step().unwrap();
    chip8.step().unwrap();
    assert_eq!(chip8.state().v[0x1], 0b0100_0000);
    assert_eq!(chip8.state().v[0xF], 0x1);
}

/// main calls sub 0; sub k calls sub k+1 for k < `last`; sub `last` returns.
/// Sub k lives at 0x300 + 4k as `CALL next; RET`.
fn nested_calls(last: u16) -> Chip8 {
    let mut words = vec![(0x200, 0x2300), (0x202, 0x1202)];
    for k in 0..=last {
        let address = 0x300 + 4 * k;
        words.push((address, 0x2000 | (address + 4)));
        words.push((address + 2, 0x00EE));
    }
    words.push((0x300 + 4 * (last + 1), 0x00EE));
    load(&words)
}

#[test]
fn sixteen_nested_calls_return_in_order() {
    // main + subs 0..=14 make 16 calls; sub 15 returns straight away
    let mut chip8 = nested_calls(14);
    let mut call_sites = Vec::new();

    loop {
        let pc = chip8.state().pc;
        let op = opcode_at_pc(&chip8);
        chip8.step().unwrap();

        if op & 0xF000 == 0x2000 {
            call_sites.push(pc);
            assert_eq!(chip8.state().stack.sp() as usize, call_sites.len());
        } else if op == 0x00EE {
            let site = call_sites.pop().unwrap();
            assert_eq!(chip8.state().pc, site + 2);
        }

        if pc == 0x202 {
            break;
        }
        assert!(call_sites.len() <= 16);
    }

    assert!(call_sites.is_empty());
    assert_eq!(chip8.state().stack.sp(), 0);
}

#[test]
fn seventeenth_nested_call_overflows() {
    let mut chip8 = nested_calls(15);
    for _ in 0..16 {
        chip8.step().unwrap();
    }
    assert_eq!(chip8.state().stack.sp(), 16);
    let pc = chip8.state().pc;
    assert_eq!(pc, 0x300 + 4 * 15);

    match chip8.step() {
        Err(Error::StackOverflow { pc: at }) => assert_eq!(at, pc),
        other => panic!("expected StackOverflow, got {:?}", other),
    }
    assert_eq!(chip8.state().pc, pc);
    assert_eq!(chip8.state().stack.sp(), 16);
}

#[test]
fn return_without_call_underflows() {
    let mut chip8 = load(&[(0x200, 0x00EE)]);
    assert!(matches!(chip8.step(), Err(Error::StackUnderflow { pc: 0x200 })));
    assert_eq!(chip8.state().pc, 0x200);
}

#[test]
fn redrawing_a_sprite_collides_and_erases() {
    // I = 0x300 where a full 8x1 row lives; draw it twice at V0, V1 = 0, 0
    let mut chip8 = load(&[
        (0x200, 0xA300),
        (0x202, 0xD011),
        (0x204, 0xD011),
        (0x300, 0xFF00),
    ]);
    chip8.step().unwrap();

    chip8.step().unwrap();
    assert_eq!(chip8.state().v[0xF], 0x0);
    assert_eq!(chip8.frame()[0][0..8], [1; 8]);

    chip8.step().unwrap();
    assert_eq!(chip8.state().v[0xF], 0x1);
    pretty_assertions::assert_eq!(*chip8.frame(), [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT]);
    assert_eq!(chip8.state().i, 0x300);
}

#[test]
fn sprites_wrap_at_the_edges() {
    // V0 = 60, V1 = 30; draw the 2 row sprite at 0x300 at (60, 30)
    let mut chip8 = load(&[
        (0x200, 0x603C),
        (0x202, 0x611E),
        (0x204, 0xA300),
        (0x206, 0xD012),
        (0x300, 0xFFFF),
    ]);
    for _ in 0..4 {
        chip8.step().unwrap();
    }
    let frame = chip8.frame();
    for &y in [30, 31].iter() {
        assert_eq!(frame[y][60..64], [1; 4]);
        assert_eq!(frame[y][0..4], [1; 4]);
        assert_eq!(frame[y][4..60], [0; 56][..]);
    }
    assert_eq!(frame[0][0], 0);
}

#[test]
fn await_key_takes_highest_pressed_key() {
    let mut chip8 = load(&[(0x200, 0xF30A)]);

    chip8.step().unwrap();
    assert_eq!(chip8.status(), Status::AwaitingKey(0x3));
    assert_eq!(chip8.state().pc, 0x200);

    let keypad = chip8.keypad();
    keypad.press(0x1);
    keypad.press(0x5);
    chip8.step().unwrap();
    assert_eq!(chip8.state().v[0x3], 0x5);
    assert_eq!(chip8.state().pc, 0x202);
    assert_eq!(chip8.status(), Status::Running);
}

#[test]
fn await_key_from_input_thread() {
    let mut chip8 = load(&[(0x200, 0xF20A)]);
    chip8.step().unwrap();

    let keypad = chip8.keypad();
    std::thread::spawn(move || keypad.press(0xB))
        .join()
        .unwrap();

    chip8.step().unwrap();
    assert_eq!(chip8.state().v[0x2], 0xB);
}

#[test]
fn skip_if_key_pressed() {
    // V0 = 0xA; skip if key[V0]
    let mut chip8 = load(&[(0x200, 0x600A), (0x202, 0xE09E)]);
    chip8.key_press(0xA);
    chip8.step().unwrap();
    chip8.step().unwrap();
    assert_eq!(chip8.state().pc, 0x206);
}

#[test]
fn timers_ignore_instruction_rate() {
    // DT = 0x40, then spin
    let mut chip8 = load(&[(0x200, 0x6040), (0x202, 0xF015), (0x204, 0x1204)]);
    chip8.step().unwrap();
    chip8.step().unwrap();

    // 1000 cycles over 16ms is less than one 60Hz period
    for _ in 0..1000 {
        chip8.cycle(Duration::from_micros(16)).unwrap();
    }
    assert!(chip8.state().timers.delay >= 0x3F);

    // a second of 1ms cycles counts down roughly 60 times; the part of each
    // 17ms period past 1/60s is dropped rather than carried over
    for _ in 0..1000 {
        chip8.cycle(Duration::from_millis(1)).unwrap();
    }
    let delay = chip8.state().timers.delay;
    assert!(delay <= 0x40 - 58 && delay >= 0x40 - 61, "delay {}", delay);
}

#[test]
fn load_truncates_large_images() {
    let image: Vec<u8> = (0..4000).map(|i| (i % 251) as u8).collect();
    let mut chip8 = Chip8::with_seed(0xC8);
    assert_eq!(chip8.load_image(&image), MAX_ROM_SIZE);

    let memory = &chip8.state().memory;
    pretty_assertions::assert_eq!(
        memory.read_range(0x200, MAX_ROM_SIZE).unwrap().to_vec(),
        image[..MAX_ROM_SIZE].to_vec()
    );
    assert_eq!(memory.read_range(0x000, 80).unwrap().to_vec(), SPRITE_SHEET.to_vec());
    assert!(memory.read(0x1000).is_err());
}

#[test]
fn bcd_then_read_back() {
    // V5 = 254; I = 0x400; mem[I..I+3] = bcd(V5); V0..=V2 = mem[I..=I+2]
    let mut chip8 = load(&[
        (0x200, 0x65FE),
        (0x202, 0xA400),
        (0x204, 0xF533),
        (0x206, 0xF265),
    ]);
    for _ in 0..4 {
        chip8.step().unwrap();
    }
    assert_eq!(chip8.state().v[0..3], [2, 5, 4]);
}

#[test]
fn register_compares_ignore_the_low_nibble() {
    // V0 == V1 == 0, so 5011 skips and 901F falls through
    let mut chip8 = load(&[(0x200, 0x5011)]);
    chip8.step().unwrap();
    assert_eq!(chip8.state().pc, 0x204);

    let mut chip8 = load(&[(0x200, 0x901F)]);
    chip8.step().unwrap();
    assert_eq!(chip8.state().pc, 0x202);
}
