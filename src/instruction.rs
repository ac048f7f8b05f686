use rand::RngCore;

use crate::error::Result;
use crate::keypad::KEY_COUNT;
use crate::opcode::Opcode;
use crate::operations::*;
use crate::state::State;

/// A fully decoded instruction.
///
/// `x`/`y` operands are register numbers, `nn` an 8-bit constant, `addr` a 12-bit address
/// and `n` the sprite height.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0
    Clear,
    /// 00EE
    Return,
    /// 1NNN
    Jump { addr: u16 },
    /// 2NNN
    Call { addr: u16 },
    /// 3XNN
    SkipEq { x: u8, nn: u8 },
    /// 4XNN
    SkipNe { x: u8, nn: u8 },
    /// 5XY0
    SkipEqReg { x: u8, y: u8 },
    /// 6XNN
    Load { x: u8, nn: u8 },
    /// 7XNN
    Add { x: u8, nn: u8 },
    /// 8XY0
    Move { x: u8, y: u8 },
    /// 8XY1
    Or { x: u8, y: u8 },
    /// 8XY2
    And { x: u8, y: u8 },
    /// 8XY3
    Xor { x: u8, y: u8 },
    /// 8XY4
    AddReg { x: u8, y: u8 },
    /// 8XY5
    Sub { x: u8, y: u8 },
    /// 8XY6; Vy is ignored
    ShiftRight { x: u8 },
    /// 8XY7
    SubN { x: u8, y: u8 },
    /// 8XYE; Vy is ignored
    ShiftLeft { x: u8 },
    /// 9XY0
    SkipNeReg { x: u8, y: u8 },
    /// ANNN
    LoadI { addr: u16 },
    /// BNNN
    JumpV0 { addr: u16 },
    /// CXNN
    Random { x: u8, nn: u8 },
    /// DXYN
    Draw { x: u8, y: u8, n: u8 },
    /// EX9E
    SkipPressed { x: u8 },
    /// EXA1
    SkipNotPressed { x: u8 },
    /// FX07
    LoadDelay { x: u8 },
    /// FX0A
    AwaitKey { x: u8 },
    /// FX15
    SetDelay { x: u8 },
    /// FX18
    SetSound { x: u8 },
    /// FX1E
    AddI { x: u8 },
    /// FX29
    LoadGlyph { x: u8 },
    /// FX33
    Bcd { x: u8 },
    /// FX55
    Store { x: u8 },
    /// FX65
    Read { x: u8 },
}

impl Instruction {
    /// Decodes an instruction word, or `None` if it isn't one of the supported instructions.
    ///
    /// The family nibble settles most instructions on its own; families 0x0, 0x8, 0xE and
    /// 0xF are settled by their low bits.
    pub fn decode(op: u16) -> Option<Instruction> {
        use Instruction::*;

        let (x, y, n, nn, addr) = (op.x(), op.y(), op.n(), op.nn(), op.nnn());
        let instruction = match op.family() {
            0x0 => match op {
                0x00E0 => Clear,
                0x00EE => Return,
                _ => return None,
            },
            0x1 => Jump { addr },
            0x2 => Call { addr },
            0x3 => SkipEq { x, nn },
            0x4 => SkipNe { x, nn },
            0x5 => SkipEqReg { x, y },
            0x6 => Load { x, nn },
            0x7 => Add { x, nn },
            0x8 => match n {
                0x0 => Move { x, y },
                0x1 => Or { x, y },
                0x2 => And { x, y },
                0x3 => Xor { x, y },
                0x4 => AddReg { x, y },
                0x5 => Sub { x, y },
                0x6 => ShiftRight { x },
                0x7 => SubN { x, y },
                0xE => ShiftLeft { x },
                _ => return None,
            },
            0x9 => SkipNeReg { x, y },
            0xA => LoadI { addr },
            0xB => JumpV0 { addr },
            0xC => Random { x, nn },
            0xD => Draw { x, y, n },
            0xE => match nn {
                0x9E => SkipPressed { x },
                0xA1 => SkipNotPressed { x },
                _ => return None,
            },
            0xF => match nn {
                0x07 => LoadDelay { x },
                0x0A => AwaitKey { x },
                0x15 => SetDelay { x },
                0x18 => SetSound { x },
                0x1E => AddI { x },
                0x29 => LoadGlyph { x },
                0x33 => Bcd { x },
                0x55 => Store { x },
                0x65 => Read { x },
                _ => return None,
            },
            _ => return None,
        };
        Some(instruction)
    }

    /// Executes the instruction against `state`, returning the resulting State.
    ///
    /// On error `state` is the machine's state as far as the caller should be concerned.
    pub fn execute(
        self,
        state: &State,
        keys: &[bool; KEY_COUNT],
        rng: &mut dyn RngCore,
    ) -> Result<State> {
        use Instruction::*;

        Ok(match self {
            Clear => clr(state),
            Return => rts(state)?,
            Jump { addr } => jump(state, addr),
            Call { addr } => call(state, addr)?,
            SkipEq { x, nn } => ske(state, x, nn),
            SkipNe { x, nn } => skne(state, x, nn),
            SkipEqReg { x, y } => skre(state, x, y),
            Load { x, nn } => load(state, x, nn),
            Add { x, nn } => add(state, x, nn),
            Move { x, y } => mv(state, x, y),
            Or { x, y } => or(state, x, y),
            And { x, y } => and(state, x, y),
            Xor { x, y } => xor(state, x, y),
            AddReg { x, y } => addr(state, x, y),
            Sub { x, y } => sub(state, x, y),
            ShiftRight { x } => shr(state, x),
            SubN { x, y } => subn(state, x, y),
            ShiftLeft { x } => shl(state, x),
            SkipNeReg { x, y } => skrne(state, x, y),
            LoadI { addr } => loadi(state, addr),
            JumpV0 { addr } => jumpi(state, addr),
            Random { x, nn } => rand(state, x, nn, rng),
            Draw { x, y, n } => draw(state, x, y, n)?,
            SkipPressed { x } => skpr(state, x, keys),
            SkipNotPressed { x } => skup(state, x, keys),
            LoadDelay { x } => moved(state, x),
            AwaitKey { x } => keyd(state, x, keys),
            SetDelay { x } => loads(state, x),
            SetSound { x } => ld(state, x),
            AddI { x } => addi(state, x),
            LoadGlyph { x } => ldspr(state, x),
            Bcd { x } => bcd(state, x)?,
            Store { x } => stor(state, x)?,
            Read { x } => read(state, x)?,
        })
    }
}
