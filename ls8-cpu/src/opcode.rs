//! Opcode table and the metadata packed into each opcode byte
//!
//! An opcode byte has the layout `AABCDDDD`:
//! - `AA` is the number of operand bytes that follow it
//! - `B` is set for ALU operations
//! - `C` is set when the instruction moves the program counter itself
//! - `DDDD` identifies the instruction within its class

/// Returns the number of operand bytes following the opcode
#[inline]
pub const fn operand_count(op: u8) -> usize {
    (op >> 6) as usize
}

/// Returns the total length of the instruction, in bytes
#[inline]
pub const fn instruction_len(op: u8) -> usize {
    operand_count(op) + 1
}

/// Checks whether the instruction updates the program counter on its own
#[inline]
pub const fn sets_pc(op: u8) -> bool {
    (op & (1 << 4)) != 0
}

macro_rules! opcodes {
    ($($name:ident = $value:literal, $mnemonic:literal;)*) => {
        /// Every instruction understood by the CPU
        #[repr(u8)]
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        #[allow(missing_docs)]
        pub enum Opcode {
            $($name = $value,)*
        }

        impl Opcode {
            /// Every opcode, in table order
            pub const ALL: &'static [Opcode] = &[$(Opcode::$name,)*];

            /// Decodes a raw opcode byte
            ///
            /// Returns `None` if the byte is not in the table
            pub const fn from_byte(b: u8) -> Option<Self> {
                match b {
                    $($value => Some(Opcode::$name),)*
                    _ => None,
                }
            }

            /// Returns the assembler mnemonic
            pub const fn mnemonic(self) -> &'static str {
                match self {
                    $(Opcode::$name => $mnemonic,)*
                }
            }
        }
    };
}

opcodes! {
    Hlt = 0b0000_0001, "HLT";
    Ret = 0b0001_0001, "RET";
    Push = 0b0100_0101, "PUSH";
    Pop = 0b0100_0110, "POP";
    Prn = 0b0100_0111, "PRN";
    Pra = 0b0100_1000, "PRA";
    Call = 0b0101_0000, "CALL";
    Jmp = 0b0101_0100, "JMP";
    Jeq = 0b0101_0101, "JEQ";
    Jne = 0b0101_0110, "JNE";
    Jgt = 0b0101_0111, "JGT";
    Jlt = 0b0101_1000, "JLT";
    Jle = 0b0101_1001, "JLE";
    Jge = 0b0101_1010, "JGE";
    Ldi = 0b1000_0010, "LDI";
    Add = 0b1010_0000, "ADD";
    Sub = 0b1010_0001, "SUB";
    Mul = 0b1010_0010, "MUL";
    Div = 0b1010_0011, "DIV";
    Mod = 0b1010_0100, "MOD";
    Cmp = 0b1010_0111, "CMP";
    Or = 0b1010_1010, "OR";
    Xor = 0b1010_1011, "XOR";
    Shl = 0b1010_1100, "SHL";
    Shr = 0b1010_1101, "SHR";
}

impl Opcode {
    /// Returns the raw opcode byte
    #[inline]
    pub const fn byte(self) -> u8 {
        self as u8
    }

    /// Returns the number of operand bytes following the opcode
    #[inline]
    pub const fn operand_count(self) -> usize {
        operand_count(self.byte())
    }

    /// Returns the total instruction length, in bytes
    #[inline]
    pub const fn size(self) -> usize {
        instruction_len(self.byte())
    }

    /// Checks whether the instruction updates the program counter on its own
    #[inline]
    pub const fn sets_pc(self) -> bool {
        sets_pc(self.byte())
    }
}

impl core::fmt::Display for Opcode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.mnemonic())
    }
}

impl core::str::FromStr for Opcode {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Opcode::ALL
            .iter()
            .copied()
            .find(|op| op.mnemonic().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}
