use crate::constants::{MAX_ADDRESS, MAX_ROM_SIZE, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET};
use crate::error::{Error, Result};

/// # Memory
/// 4096 bytes of flat, byte-addressable memory.
///
/// ```text
/// 0x000..0x050  sprite sheet for the hex digits
/// 0x050..0x200  reserved
/// 0x200..0x1000 program ROM and RAM
/// ```
///
/// Every access is bounds checked. Reads may touch any address but writes may not start in
/// the sprite sheet, so it survives whatever a program does.
#[derive(Copy, Clone)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    /// Zeroed memory with the sprite sheet installed
    pub fn new() -> Self {
        let mut bytes = [0; MEMORY_SIZE];
        bytes[..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
        Memory { bytes }
    }

    pub fn read(&self, address: u16) -> Result<u8> {
        Ok(self.read_range(address, 1)?[0])
    }

    /// Reads `len` consecutive bytes starting at `address`
    pub fn read_range(&self, address: u16, len: usize) -> Result<&[u8]> {
        let range = Memory::range(address, len)?;
        Ok(&self.bytes[range])
    }

    /// Reads the big-endian word at `address..=address + 1`
    pub fn read_word(&self, address: u16) -> Result<u16> {
        let bytes = self.read_range(address, 2)?;
        Ok(u16::from(bytes[0]) << 8 | u16::from(bytes[1]))
    }

    /// Writes `data` starting at `address`; fails without writing anything if any byte
    /// would land in the sprite sheet or past the end of memory
    pub fn write_range(&mut self, address: u16, data: &[u8]) -> Result<()> {
        if (address as usize) < SPRITE_SHEET.len() {
            return Err(Error::AddressOutOfRange {
                address: address as usize,
            });
        }
        let range = Memory::range(address, data.len())?;
        self.bytes[range].copy_from_slice(data);
        Ok(())
    }

    /// Copies a ROM image into the program region, truncating it at `MAX_ROM_SIZE` bytes.
    /// Returns the number of bytes copied.
    pub fn load(&mut self, image: &[u8]) -> usize {
        let len = image.len().min(MAX_ROM_SIZE);
        let start = PROGRAM_START as usize;
        self.bytes[start..start + len].copy_from_slice(&image[..len]);
        len
    }

    fn range(address: u16, len: usize) -> Result<std::ops::Range<usize>> {
        let start = address as usize;
        let end = start + len;
        if end > MAX_ADDRESS as usize + 1 {
            // Report the first byte that doesn't exist
            let address = start.max(MAX_ADDRESS as usize + 1);
            return Err(Error::AddressOutOfRange { address });
        }
        Ok(start..end)
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
