use crate::constants::STACK_DEPTH;

/// Raised pushing onto a full stack
#[derive(Debug, PartialEq, Eq)]
pub struct StackOverflow;

/// Raised popping an empty stack
#[derive(Debug, PartialEq, Eq)]
pub struct StackUnderflow;

/// # Stack
/// Return addresses for up to 16 nested subroutine calls.
///
/// `sp` is the number of outstanding calls and always satisfies `0 <= sp <= 16`;
/// `slots[sp - 1]` is the most recent return address.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Stack {
    slots: [u16; STACK_DEPTH],
    sp: u8,
}

impl Stack {
    pub fn new() -> Self {
        Stack {
            slots: [0; STACK_DEPTH],
            sp: 0,
        }
    }

    pub fn push(&mut self, address: u16) -> Result<(), StackOverflow> {
        if self.sp as usize >= STACK_DEPTH {
            return Err(StackOverflow);
        }
        self.slots[self.sp as usize] = address;
        self.sp += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, StackUnderflow> {
        if self.sp == 0 {
            return Err(StackUnderflow);
        }
        self.sp -= 1;
        Ok(self.slots[self.sp as usize])
    }

    /// The number of outstanding calls
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// The most recent return address, if any
    pub fn peek(&self) -> Option<u16> {
        self.sp
            .checked_sub(1)
            .map(|top| self.slots[top as usize])
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_in_reverse_order() {
        let mut stack = Stack::new();
        stack.push(0x202).unwrap();
        stack.push(0x304).unwrap();
        assert_eq!(stack.sp(), 2);
        assert_eq!(stack.pop(), Ok(0x304));
        assert_eq!(stack.pop(), Ok(0x202));
        assert_eq!(stack.sp(), 0);
    }

    #[test]
    fn test_overflows_on_seventeenth_push() {
        let mut stack = Stack::new();
        for address in 0..STACK_DEPTH as u16 {
            assert_eq!(stack.push(address), Ok(()));
        }
        let before = stack;
        assert_eq!(stack.push(0xFFF), Err(StackOverflow));
        assert_eq!(stack, before);
    }

    #[test]
    fn test_underflows_when_empty() {
        let mut stack = Stack::new();
        assert_eq!(stack.pop(), Err(StackUnderflow));
        assert_eq!(stack.sp(), 0);
    }

    #[test]
    fn test_peek() {
        let mut stack = Stack::new();
        assert_eq!(stack.peek(), None);
        stack.push(0x222).unwrap();
        assert_eq!(stack.peek(), Some(0x222));
    }
}
