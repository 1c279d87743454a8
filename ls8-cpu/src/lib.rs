//! LS-8 virtual machine
//!
//! The LS-8 is a small 8-bit computer with 256 bytes of memory, eight
//! general-purpose registers, and a downward-growing stack addressed through
//! register 7.  Programs are loaded at address 0 and run until `HLT`.
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use log::{debug, log_enabled, trace};
use static_assertions::const_assert;

mod alu;
mod device;
mod error;
mod memory;
mod opcode;
mod registers;
mod stack;

pub mod program;

pub use alu::{AluOp, Writeback, eval};
pub use device::{Console, Device, EmptyDevice};
pub use error::Error;
pub use memory::{MEMORY_SIZE, Memory};
pub use opcode::{Opcode, instruction_len, operand_count, sets_pc};
pub use registers::{Flags, REGISTER_COUNT, Registers, SP, STACK_TOP};

const_assert!((STACK_TOP as usize) < MEMORY_SIZE);
const_assert!((SP as usize) < REGISTER_COUNT);

/// A decoded instruction
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    /// Operation to perform
    pub opcode: Opcode,
    /// First operand byte, or 0 if the instruction has none
    pub a: u8,
    /// Second operand byte, or 0 if the instruction has fewer than two
    pub b: u8,
}

impl core::fmt::Display for Instruction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let Instruction { opcode, a, b } = *self;
        match (opcode.operand_count(), opcode) {
            (0, _) => write!(f, "{opcode}"),
            (1, _) => write!(f, "{opcode} R{a}"),
            (_, Opcode::Ldi) => write!(f, "{opcode} R{a}, {b}"),
            _ => write!(f, "{opcode} R{a}, R{b}"),
        }
    }
}

/// The machine itself
///
/// A `Cpu` owns all of its state; independent instances share nothing.
#[derive(Clone, Debug)]
pub struct Cpu {
    /// 256 bytes of main memory
    ram: Memory,
    /// General-purpose registers, including the stack pointer
    reg: Registers,
    /// Result of the most recent `CMP`
    flags: Flags,
    /// Address of the next instruction
    pc: usize,
    /// Cleared by `HLT`
    running: bool,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// Builds a new machine with zeroed memory, ready to run from address 0
    pub fn new() -> Self {
        Self {
            ram: Memory::new(),
            reg: Registers::new(),
            flags: Flags::default(),
            pc: 0,
            running: true,
        }
    }

    /// Builds a new machine and loads the given image at address 0
    pub fn with_image(image: &[u8]) -> Result<Self, Error> {
        let mut out = Self::new();
        out.load(image)?;
        Ok(out)
    }

    /// Copies a program image to address 0
    pub fn load(&mut self, image: &[u8]) -> Result<(), Error> {
        self.ram.load(image)
    }

    /// Returns the machine to its freshly-constructed state
    ///
    /// Memory is cleared, so the program must be loaded again.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Returns the program counter
    #[inline]
    pub fn pc(&self) -> usize {
        self.pc
    }

    /// Checks whether the machine has not yet executed `HLT`
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Returns the current condition flags
    #[inline]
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Shared borrow of the register file
    #[inline]
    pub fn registers(&self) -> &Registers {
        &self.reg
    }

    /// Mutable borrow of the register file
    #[inline]
    pub fn registers_mut(&mut self) -> &mut Registers {
        &mut self.reg
    }

    /// Shared borrow of main memory
    #[inline]
    pub fn memory(&self) -> &Memory {
        &self.ram
    }

    /// Mutable borrow of main memory
    #[inline]
    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.ram
    }

    /// Decodes the instruction at the program counter
    ///
    /// Only the operand bytes that the opcode declares are read.
    pub fn fetch(&self) -> Result<Instruction, Error> {
        let byte = self.ram.read(self.pc)?;
        let opcode = Opcode::from_byte(byte).ok_or(Error::UnknownOpcode {
            opcode: byte,
            pc: self.pc,
        })?;
        let mut operands = [0u8; 2];
        for (i, v) in operands[..opcode.operand_count()].iter_mut().enumerate() {
            *v = self.ram.read(self.pc + 1 + i)?;
        }
        let [a, b] = operands;
        Ok(Instruction { opcode, a, b })
    }

    /// Runs until the machine halts
    pub fn run<D: Device>(&mut self, dev: &mut D) -> Result<(), Error> {
        self.run_until(dev, |_cpu, _i| false).map(|_| ())
    }

    /// Runs until the machine halts or `stop` returns `true`
    ///
    /// `stop` is called before each instruction with the number of
    /// instructions executed so far.  Returns the total instruction count if
    /// the machine halted, or `None` if it was stopped early.
    pub fn run_until<D: Device, F: FnMut(&Cpu, usize) -> bool>(
        &mut self,
        dev: &mut D,
        mut stop: F,
    ) -> Result<Option<usize>, Error> {
        let mut i = 0;
        while self.running {
            if stop(self, i) {
                return Ok(None);
            }
            self.step(dev)?;
            i += 1;
        }
        debug!("halted at {:#04x} after {i} instructions", self.pc);
        Ok(Some(i))
    }

    /// Executes a single instruction
    ///
    /// Does nothing if the machine has already halted.  If an error is
    /// returned, the program counter still points at the faulting
    /// instruction.
    pub fn step<D: Device>(&mut self, dev: &mut D) -> Result<(), Error> {
        if !self.running {
            return Ok(());
        }
        let i = self.fetch()?;
        if log_enabled!(log::Level::Trace) {
            self.trace(&i);
        }
        self.execute(i, dev)?;
        if !i.opcode.sets_pc() {
            self.pc += i.opcode.size();
        }
        Ok(())
    }

    /// Applies an ALU operation to two registers
    ///
    /// The result is written back to `reg_a`, or to the flags for `CMP`.
    pub fn alu(&mut self, op: AluOp, reg_a: u8, reg_b: u8) -> Result<(), Error> {
        let a = self.reg.get(reg_a)?;
        let b = self.reg.get(reg_b)?;
        match eval(op, a, b).ok_or(Error::DivideByZero { op, pc: self.pc })? {
            Writeback::Register(v) => self.reg.set(reg_a, v),
            Writeback::Flags(f) => {
                self.flags = f;
                Ok(())
            }
        }
    }

    fn execute<D: Device>(&mut self, i: Instruction, dev: &mut D) -> Result<(), Error> {
        let Instruction { opcode, a, b } = i;
        let len = opcode.size();
        match opcode {
            Opcode::Hlt => self.running = false,
            Opcode::Ldi => self.reg.set(a, b)?,
            Opcode::Prn => dev.print_number(self.reg.get(a)?)?,
            Opcode::Pra => dev.print_char(self.reg.get(a)?)?,

            Opcode::Push => self.push_reg(a)?,
            Opcode::Pop => self.pop_reg(a)?,
            Opcode::Call => self.call(a, len)?,
            Opcode::Ret => self.ret()?,

            Opcode::Jmp => self.jump(a)?,
            Opcode::Jeq => self.jump_if(a, len, |f| f.contains(Flags::EQUAL))?,
            Opcode::Jne => self.jump_if(a, len, |f| !f.contains(Flags::EQUAL))?,
            Opcode::Jgt => self.jump_if(a, len, |f| f.contains(Flags::GREATER))?,
            Opcode::Jlt => self.jump_if(a, len, |f| f.contains(Flags::LESS))?,
            Opcode::Jge => self.jump_if(a, len, |f| {
                f.intersects(Flags::GREATER | Flags::EQUAL)
            })?,
            Opcode::Jle => self.jump_if(a, len, |f| {
                f.intersects(Flags::LESS | Flags::EQUAL)
            })?,

            Opcode::Add
            | Opcode::Sub
            | Opcode::Mul
            | Opcode::Div
            | Opcode::Mod
            | Opcode::Cmp
            | Opcode::Or
            | Opcode::Xor
            | Opcode::Shl
            | Opcode::Shr => self.alu(AluOp::try_from(opcode.byte())?, a, b)?,
        }
        Ok(())
    }

    /// Logs the machine state ahead of executing `i`
    fn trace(&self, i: &Instruction) {
        let peek = |offset| self.ram.read(self.pc + offset).unwrap_or(0);
        let regs = self.reg.as_array();
        trace!(
            "TRACE: {:02X} | {:02X} {:02X} {:02X} | \
             {:02X} {:02X} {:02X} {:02X} {:02X} {:02X} {:02X} {:02X} | {i}",
            self.pc,
            peek(0),
            peek(1),
            peek(2),
            regs[0],
            regs[1],
            regs[2],
            regs[3],
            regs[4],
            regs[5],
            regs[6],
            regs[7],
        );
    }
}
