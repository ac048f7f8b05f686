use rand::{Rng, RngCore};

use crate::constants::{FLAG, GLYPH_SIZE};
use crate::error::{Error, Result};
use crate::keypad::KEY_COUNT;
use crate::state::State;

/// clear
pub fn clr(state: &State) -> State {
    let mut display = state.display;
    display.clear();
    State {
        display,
        ..state.next()
    }
}

/// PC = STACK.pop()
pub fn rts(state: &State) -> Result<State> {
    let mut stack = state.stack;
    let pc = stack
        .pop()
        .map_err(|_| Error::StackUnderflow { pc: state.pc })?;
    Ok(State {
        pc,
        stack,
        ..*state
    })
}

/// PC = addr
pub fn jump(state: &State, addr: u16) -> State {
    State { pc: addr, ..*state }
}

/// STACK.push(PC + 2); PC = addr
pub fn call(state: &State, addr: u16) -> Result<State> {
    let mut stack = state.stack;
    stack
        .push(state.pc + 0x2)
        .map_err(|_| Error::StackOverflow { pc: state.pc })?;
    Ok(State {
        pc: addr,
        stack,
        ..*state
    })
}

/// if Vx == nn then pc += 2
pub fn ske(state: &State, x: u8, nn: u8) -> State {
    state.skip_if(state.v[x as usize] == nn)
}

/// if Vx != nn then pc += 2
pub fn skne(state: &State, x: u8, nn: u8) -> State {
    state.skip_if(state.v[x as usize] != nn)
}

/// if Vx == Vy then pc += 2
pub fn skre(state: &State, x: u8, y: u8) -> State {
    state.skip_if(state.v[x as usize] == state.v[y as usize])
}

/// Vx = nn
pub fn load(state: &State, x: u8, nn: u8) -> State {
    let mut v = state.v;
    v[x as usize] = nn;
    State { v, ..state.next() }
}

/// Vx += nn
/// Overflow wraps and leaves VF alone
pub fn add(state: &State, x: u8, nn: u8) -> State {
    let mut v = state.v;
    v[x as usize] = v[x as usize].wrapping_add(nn);
    State { v, ..state.next() }
}

/// Vx = Vy
pub fn mv(state: &State, x: u8, y: u8) -> State {
    let mut v = state.v;
    v[x as usize] = v[y as usize];
    State { v, ..state.next() }
}

/// Vx |= Vy
pub fn or(state: &State, x: u8, y: u8) -> State {
    let mut v = state.v;
    v[x as usize] |= v[y as usize];
    State { v, ..state.next() }
}

/// Vx &= Vy
pub fn and(state: &State, x: u8, y: u8) -> State {
    let mut v = state.v;
    v[x as usize] &= v[y as usize];
    State { v, ..state.next() }
}

/// Vx ^= Vy
pub fn xor(state: &State, x: u8, y: u8) -> State {
    let mut v = state.v;
    v[x as usize] ^= v[y as usize];
    State { v, ..state.next() }
}

/// Vx += Vy; VF = carry
pub fn addr(state: &State, x: u8, y: u8) -> State {
    let (res, carry) = state.v[x as usize].overflowing_add(state.v[y as usize]);
    let mut v = state.v;
    v[FLAG] = carry as u8;
    v[x as usize] = res;
    State { v, ..state.next() }
}

/// Vx -= Vy; VF = !borrow
pub fn sub(state: &State, x: u8, y: u8) -> State {
    let (res, borrow) = state.v[x as usize].overflowing_sub(state.v[y as usize]);
    let mut v = state.v;
    v[FLAG] = !borrow as u8;
    v[x as usize] = res;
    State { v, ..state.next() }
}

/// VF = lsb(Vx); Vx >>= 1
pub fn shr(state: &State, x: u8) -> State {
    let mut v = state.v;
    v[FLAG] = v[x as usize] & 0x1;
    v[x as usize] >>= 1;
    State { v, ..state.next() }
}

/// Vx = Vy - Vx; VF = !borrow
pub fn subn(state: &State, x: u8, y: u8) -> State {
    let (res, borrow) = state.v[y as usize].overflowing_sub(state.v[x as usize]);
    let mut v = state.v;
    v[FLAG] = !borrow as u8;
    v[x as usize] = res;
    State { v, ..state.next() }
}

/// VF = msb(Vx); Vx <<= 1
pub fn shl(state: &State, x: u8) -> State {
    let mut v = state.v;
    v[FLAG] = v[x as usize] >> 7;
    v[x as usize] <<= 1;
    State { v, ..state.next() }
}

/// if Vx != Vy then pc += 2
pub fn skrne(state: &State, x: u8, y: u8) -> State {
    state.skip_if(state.v[x as usize] != state.v[y as usize])
}

/// I = addr
pub fn loadi(state: &State, addr: u16) -> State {
    State {
        i: addr,
        ..state.next()
    }
}

/// PC = V0 + addr
pub fn jumpi(state: &State, addr: u16) -> State {
    State {
        pc: addr + u16::from(state.v[0x0]),
        ..*state
    }
}

/// Vx = rand_byte & nn
pub fn rand(state: &State, x: u8, nn: u8, rng: &mut dyn RngCore) -> State {
    let mut v = state.v;
    v[x as usize] = rng.gen::<u8>() & nn;
    State { v, ..state.next() }
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs the n byte sprite at I onto the display at Vx, Vy. VF = collision
pub fn draw(state: &State, x: u8, y: u8, n: u8) -> Result<State> {
    let sprite = state.memory.read_range(state.i, n as usize)?;
    let mut display = state.display;
    let collision = display.draw(state.v[x as usize], state.v[y as usize], sprite);

    let mut v = state.v;
    v[FLAG] = collision as u8;
    Ok(State {
        v,
        display,
        ..state.next()
    })
}

/// if Vx.pressed then pc += 2
pub fn skpr(state: &State, x: u8, keys: &[bool; KEY_COUNT]) -> State {
    state.skip_if(is_pressed(keys, state.v[x as usize]))
}

/// if !Vx.pressed then pc += 2
pub fn skup(state: &State, x: u8, keys: &[bool; KEY_COUNT]) -> State {
    state.skip_if(!is_pressed(keys, state.v[x as usize]))
}

/// Vx = DT
pub fn moved(state: &State, x: u8) -> State {
    let mut v = state.v;
    v[x as usize] = state.timers.delay;
    State { v, ..state.next() }
}

/// await keypress for Vx
/// The highest pressed key wins. With nothing pressed the pc stays put and the
/// machine waits on Vx.
pub fn keyd(state: &State, x: u8, keys: &[bool; KEY_COUNT]) -> State {
    match keys.iter().rposition(|&pressed| pressed) {
        Some(key) => {
            let mut v = state.v;
            v[x as usize] = key as u8;
            State {
                v,
                awaiting_key: None,
                ..state.next()
            }
        }
        None => State {
            awaiting_key: Some(x),
            ..*state
        },
    }
}

/// DT = Vx
pub fn loads(state: &State, x: u8) -> State {
    let mut timers = state.timers;
    timers.delay = state.v[x as usize];
    State {
        timers,
        ..state.next()
    }
}

/// ST = Vx
pub fn ld(state: &State, x: u8) -> State {
    let mut timers = state.timers;
    timers.sound = state.v[x as usize];
    State {
        timers,
        ..state.next()
    }
}

/// I += Vx
pub fn addi(state: &State, x: u8) -> State {
    State {
        i: state.i.wrapping_add(u16::from(state.v[x as usize])),
        ..state.next()
    }
}

/// I = Vx * 5
/// Set I to the address of the sprite sheet glyph for Vx
pub fn ldspr(state: &State, x: u8) -> State {
    State {
        i: u16::from(state.v[x as usize]) * GLYPH_SIZE,
        ..state.next()
    }
}

/// mem[I..I+3] = bcd(Vx)
/// Hundreds digit at I, tens at I+1, ones at I+2
pub fn bcd(state: &State, x: u8) -> Result<State> {
    let vx = state.v[x as usize];
    let mut memory = state.memory;
    memory.write_range(state.i, &[vx / 100, vx / 10 % 10, vx % 10])?;
    Ok(State {
        memory,
        ..state.next()
    })
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(state: &State, x: u8) -> Result<State> {
    let mut memory = state.memory;
    memory.write_range(state.i, &state.v[..=x as usize])?;
    Ok(State {
        memory,
        ..state.next()
    })
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(state: &State, x: u8) -> Result<State> {
    let mut v = state.v;
    v[..=x as usize].copy_from_slice(state.memory.read_range(state.i, x as usize + 1)?);
    Ok(State { v, ..state.next() })
}

fn is_pressed(keys: &[bool; KEY_COUNT], key: u8) -> bool {
    keys.get(key as usize).copied().unwrap_or(false)
}
