//! Stack and control-flow operations
//!
//! The stack lives in main memory and grows down from [`STACK_TOP`], with
//! [`SP`] pointing at the most recently pushed byte.
//!
//! [`STACK_TOP`]: crate::STACK_TOP
//! [`SP`]: crate::SP
use crate::{Cpu, Error, Flags, SP};

impl Cpu {
    /// Pushes a byte onto the stack
    ///
    /// Decrements `SP`, then writes `v` to the address it points to.
    pub fn push(&mut self, v: u8) -> Result<(), Error> {
        let sp = self
            .reg
            .sp()
            .checked_sub(1)
            .ok_or(Error::StackOverflow { pc: self.pc })?;
        self.ram.write(usize::from(sp), v)?;
        self.reg.set_sp(sp);
        Ok(())
    }

    /// Pops a byte from the stack
    ///
    /// Reads the byte at `SP`, then increments `SP`.
    pub fn pop(&mut self) -> Result<u8, Error> {
        let sp = self.reg.sp();
        let next = sp
            .checked_add(1)
            .ok_or(Error::StackUnderflow { pc: self.pc })?;
        let v = self.ram.read(usize::from(sp))?;
        self.reg.set_sp(next);
        Ok(v)
    }

    /// `PUSH r`
    pub(crate) fn push_reg(&mut self, r: u8) -> Result<(), Error> {
        let v = self.reg.get(r)?;
        self.push(v)
    }

    /// `POP r`
    ///
    /// Reads the byte at `SP` into `r`, then increments `SP`.  For `POP R7`,
    /// the increment applies to the value just loaded.
    pub(crate) fn pop_reg(&mut self, r: u8) -> Result<(), Error> {
        // Validate the destination before the stack is touched
        self.reg.get(r)?;
        let sp = self.reg.sp();
        let pc = self.pc;
        let underflow = || Error::StackUnderflow { pc };
        sp.checked_add(1).ok_or_else(underflow)?;
        let v = self.ram.read(usize::from(sp))?;
        let base = if r == SP { v } else { sp };
        let next = base.checked_add(1).ok_or_else(underflow)?;
        self.reg.set(r, v)?;
        self.reg.set_sp(next);
        Ok(())
    }

    /// `JMP r`
    pub(crate) fn jump(&mut self, r: u8) -> Result<(), Error> {
        self.pc = usize::from(self.reg.get(r)?);
        Ok(())
    }

    /// Conditional jump, taken if `cond` holds for the current flags
    ///
    /// If the jump is not taken, the program counter moves past the
    /// instruction, which is `len` bytes long.
    pub(crate) fn jump_if(
        &mut self,
        r: u8,
        len: usize,
        cond: impl Fn(Flags) -> bool,
    ) -> Result<(), Error> {
        let dst = self.reg.get(r)?;
        if cond(self.flags) {
            self.pc = usize::from(dst);
        } else {
            self.pc += len;
        }
        Ok(())
    }

    /// `CALL r`
    ///
    /// Pushes the address of the following instruction, then jumps.
    pub(crate) fn call(&mut self, r: u8, len: usize) -> Result<(), Error> {
        let dst = self.reg.get(r)?;
        let ret = self.pc + len;
        let ret = u8::try_from(ret).map_err(|_| Error::Address(ret))?;
        self.push(ret)?;
        self.pc = usize::from(dst);
        Ok(())
    }

    /// `RET`
    pub(crate) fn ret(&mut self) -> Result<(), Error> {
        self.pc = usize::from(self.pop()?);
        Ok(())
    }
}
