use crate::{Error, Flags, Opcode};

/// Operations performed by the arithmetic/logic unit
///
/// Discriminants are the opcode bytes that select each operation.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AluOp {
    /// `a + b`, wrapping
    Add = Opcode::Add.byte(),
    /// `a - b`, wrapping
    Sub = Opcode::Sub.byte(),
    /// `a * b`, wrapping
    Mul = Opcode::Mul.byte(),
    /// `a / b`, rounded down
    Div = Opcode::Div.byte(),
    /// `a % b`
    Mod = Opcode::Mod.byte(),
    /// Three-way comparison, written to the flags
    Cmp = Opcode::Cmp.byte(),
    /// `a | b`
    Or = Opcode::Or.byte(),
    /// `a ^ b`
    Xor = Opcode::Xor.byte(),
    /// `a << b`; shifting by 8 or more gives 0
    Shl = Opcode::Shl.byte(),
    /// `a >> b`; shifting by 8 or more gives 0
    Shr = Opcode::Shr.byte(),
}

impl TryFrom<u8> for AluOp {
    type Error = Error;
    fn try_from(b: u8) -> Result<Self, Error> {
        let op = match Opcode::from_byte(b) {
            Some(Opcode::Add) => AluOp::Add,
            Some(Opcode::Sub) => AluOp::Sub,
            Some(Opcode::Mul) => AluOp::Mul,
            Some(Opcode::Div) => AluOp::Div,
            Some(Opcode::Mod) => AluOp::Mod,
            Some(Opcode::Cmp) => AluOp::Cmp,
            Some(Opcode::Or) => AluOp::Or,
            Some(Opcode::Xor) => AluOp::Xor,
            Some(Opcode::Shl) => AluOp::Shl,
            Some(Opcode::Shr) => AluOp::Shr,
            _ => return Err(Error::UnsupportedAluOp(b)),
        };
        Ok(op)
    }
}

impl core::fmt::Display for AluOp {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        // Every discriminant is an opcode byte, so the lookup always succeeds
        let name = Opcode::from_byte(*self as u8).map(Opcode::mnemonic);
        f.write_str(name.unwrap_or_default())
    }
}

/// Destination of an ALU result
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Writeback {
    /// Value to be stored in the first operand register
    Register(u8),
    /// New value of the condition flags
    Flags(Flags),
}

/// Evaluates an ALU operation on two register values
///
/// Returns `None` if the operation is `DIV` or `MOD` and `b` is zero.
pub fn eval(op: AluOp, a: u8, b: u8) -> Option<Writeback> {
    let v = match op {
        AluOp::Add => a.wrapping_add(b),
        AluOp::Sub => a.wrapping_sub(b),
        AluOp::Mul => a.wrapping_mul(b),
        AluOp::Div => a.checked_div(b)?,
        AluOp::Mod => a.checked_rem(b)?,
        AluOp::Or => a | b,
        AluOp::Xor => a ^ b,
        AluOp::Shl => a.checked_shl(u32::from(b)).unwrap_or(0),
        AluOp::Shr => a.checked_shr(u32::from(b)).unwrap_or(0),
        AluOp::Cmp => return Some(Writeback::Flags(Flags::compare(a, b))),
    };
    Some(Writeback::Register(v))
}

#[cfg(test)]
mod test {
    use super::*;

    fn value(op: AluOp, a: u8, b: u8) -> u8 {
        match eval(op, a, b) {
            Some(Writeback::Register(v)) => v,
            other => panic!("unexpected result for {op} {a} {b}: {other:?}"),
        }
    }

    #[test]
    fn arithmetic_wraps() {
        for a in 0..=255u8 {
            for b in 0..=255u8 {
                let (x, y) = (u32::from(a), u32::from(b));
                assert_eq!(u32::from(value(AluOp::Add, a, b)), (x + y) % 256);
                assert_eq!(
                    u32::from(value(AluOp::Sub, a, b)),
                    (x + 256 - y) % 256
                );
                assert_eq!(u32::from(value(AluOp::Mul, a, b)), (x * y) % 256);
            }
        }
    }

    #[test]
    fn division() {
        assert_eq!(value(AluOp::Div, 17, 5), 3);
        assert_eq!(value(AluOp::Mod, 17, 5), 2);
        assert_eq!(value(AluOp::Div, 255, 1), 255);
        assert_eq!(eval(AluOp::Div, 17, 0), None);
        assert_eq!(eval(AluOp::Mod, 0, 0), None);
    }

    #[test]
    fn bitwise() {
        assert_eq!(value(AluOp::Or, 0b1100, 0b1010), 0b1110);
        assert_eq!(value(AluOp::Xor, 0b1100, 0b1010), 0b0110);
        assert_eq!(value(AluOp::Shl, 0b0000_0011, 2), 0b0000_1100);
        assert_eq!(value(AluOp::Shl, 0b1000_0001, 1), 0b0000_0010);
        assert_eq!(value(AluOp::Shr, 0b1000_0000, 7), 1);
        assert_eq!(value(AluOp::Shl, 0xff, 8), 0);
        assert_eq!(value(AluOp::Shr, 0xff, 200), 0);
    }

    #[test]
    fn compare() {
        assert_eq!(eval(AluOp::Cmp, 3, 3), Some(Writeback::Flags(Flags::EQUAL)));
        assert_eq!(
            eval(AluOp::Cmp, 4, 3),
            Some(Writeback::Flags(Flags::GREATER))
        );
        assert_eq!(eval(AluOp::Cmp, 2, 3), Some(Writeback::Flags(Flags::LESS)));
    }

    #[test]
    fn decode() {
        assert_eq!(AluOp::try_from(160).unwrap(), AluOp::Add);
        assert_eq!(AluOp::try_from(167).unwrap(), AluOp::Cmp);
        assert_eq!(AluOp::Shr as u8, 173);
        for b in [0, 1, 130, 165, 168, 174, 255] {
            assert!(matches!(
                AluOp::try_from(b),
                Err(Error::UnsupportedAluOp(v)) if v == b
            ));
        }
    }
}
