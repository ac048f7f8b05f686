/// # Opcodes
///
/// Instruction words are 16 bits, stored most significant byte first. The top nibble picks
/// a family of instructions; families 0x0, 0x8, 0xE and 0xF need more of the word to pick
/// a single instruction.
///
/// The remaining nibbles carry operands:
/// - `[_nnn]` a 12-bit address
/// - `[__nn]` an 8-bit constant
/// - `[___n]` a 4-bit constant
/// - `[_x__]` the register Vx, or the range of registers V0..=Vx
/// - `[__y_]` the register Vy
pub trait Opcode {
    /// The most significant nibble.
    /// `[f___]`
    fn family(&self) -> u8;

    /// `[_x__]`
    fn x(&self) -> u8;

    /// `[__y_]`
    fn y(&self) -> u8;

    /// `[___n]`
    fn n(&self) -> u8;

    /// `[__nn]`
    fn nn(&self) -> u8;

    /// `[_nnn]`
    fn nnn(&self) -> u16;
}

impl Opcode for u16 {
    fn family(&self) -> u8 {
        ((self & 0xF000) >> 12) as u8
    }

    fn x(&self) -> u8 {
        ((self & 0x0F00) >> 8) as u8
    }

    fn y(&self) -> u8 {
        ((self & 0x00F0) >> 4) as u8
    }

    fn n(&self) -> u8 {
        (self & 0x000F) as u8
    }

    fn nn(&self) -> u8 {
        (self & 0x00FF) as u8
    }

    fn nnn(&self) -> u16 {
        self & 0x0FFF
    }
}
