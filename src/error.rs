use thiserror::Error;

/// Everything that can go wrong while loading or running a program.
///
/// None of these are fatal: the instruction that raised one has not modified the machine,
/// so the host may halt, skip the instruction, or reset.
#[derive(Debug, Error)]
pub enum Error {
    /// A 17th nested subroutine call was attempted
    #[error("stack overflow calling from pc {pc:#05X}")]
    StackOverflow { pc: u16 },

    /// A return was attempted with no outstanding call
    #[error("stack underflow returning from pc {pc:#05X}")]
    StackUnderflow { pc: u16 },

    #[error("unknown opcode {opcode:#06X} at pc {pc:#05X}")]
    UnknownOpcode { opcode: u16, pc: u16 },

    /// A memory access fell outside of the addressable (or, for writes, writable) region
    #[error("address {address:#06X} is out of range")]
    AddressOutOfRange { address: usize },

    #[error("unable to load ROM: {0}")]
    Load(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
