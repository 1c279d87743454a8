use crate::alu::AluOp;

/// Fatal conditions raised while executing a program
///
/// None of these are recoverable at the instruction level: the faulting
/// instruction has not been completed, and the host decides whether to stop.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The byte at the program counter is not in the opcode table
    #[error("unknown opcode {opcode:#010b} at address {pc:#04x}")]
    UnknownOpcode {
        /// Offending opcode byte
        opcode: u8,
        /// Address of the opcode byte
        pc: usize,
    },

    /// The ALU was asked to perform an operation it does not implement
    #[error("unsupported ALU operation {0:#010b}")]
    UnsupportedAluOp(u8),

    /// `DIV` or `MOD` with a zero divisor
    #[error("{op} by zero at address {pc:#04x}")]
    DivideByZero {
        /// Faulting operation
        op: AluOp,
        /// Address of the faulting instruction
        pc: usize,
    },

    /// Memory access outside of the 256-byte address space
    #[error("address {0:#x} is out of bounds")]
    Address(usize),

    /// A push would move the stack pointer below address 0
    #[error("stack overflow at address {pc:#04x}")]
    StackOverflow {
        /// Address of the faulting instruction
        pc: usize,
    },

    /// A pop would move the stack pointer above address 255
    #[error("stack underflow at address {pc:#04x}")]
    StackUnderflow {
        /// Address of the faulting instruction
        pc: usize,
    },

    /// A register operand is not in the range 0-7
    #[error("invalid register R{0}")]
    Register(u8),

    /// The program image does not fit in memory
    #[error("image is {0} bytes, which does not fit in memory")]
    ImageTooLarge(usize),

    /// The output device failed
    #[error("failed to write output")]
    Output(#[from] std::io::Error),
}
