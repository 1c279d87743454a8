use crate::Error;

/// Number of general-purpose registers
pub const REGISTER_COUNT: usize = 8;

/// Register used as the stack pointer
pub const SP: u8 = 7;

/// Initial value of the stack pointer
///
/// The stack grows down from here; the bytes above it are left free.
pub const STACK_TOP: u8 = 0xF3;

/// General-purpose register file
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registers([u8; REGISTER_COUNT]);

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

impl Registers {
    /// Builds a register file with every register cleared except `SP`
    pub fn new() -> Self {
        let mut data = [0u8; REGISTER_COUNT];
        data[usize::from(SP)] = STACK_TOP;
        Registers(data)
    }

    /// Reads a register by operand index
    #[inline]
    pub fn get(&self, r: u8) -> Result<u8, Error> {
        self.0.get(usize::from(r)).copied().ok_or(Error::Register(r))
    }

    /// Writes a register by operand index
    #[inline]
    pub fn set(&mut self, r: u8, v: u8) -> Result<(), Error> {
        let slot = self.0.get_mut(usize::from(r)).ok_or(Error::Register(r))?;
        *slot = v;
        Ok(())
    }

    /// Returns the stack pointer
    #[inline]
    pub fn sp(&self) -> u8 {
        self.0[usize::from(SP)]
    }

    #[inline]
    pub(crate) fn set_sp(&mut self, v: u8) {
        self.0[usize::from(SP)] = v;
    }

    /// Shared borrow of every register, in index order
    #[inline]
    pub fn as_array(&self) -> &[u8; REGISTER_COUNT] {
        &self.0
    }
}

/// Condition flags, written by `CMP` and read by conditional jumps
///
/// After a comparison exactly one bit is set; before the first comparison
/// the set is empty.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Flags(u8);

impl Flags {
    /// Operands were equal
    pub const EQUAL: Self = Self(0b001);
    /// First operand was greater
    pub const GREATER: Self = Self(0b010);
    /// First operand was less
    pub const LESS: Self = Self(0b100);

    /// Builds the flags describing the comparison of `a` against `b`
    pub fn compare(a: u8, b: u8) -> Self {
        match a.cmp(&b) {
            core::cmp::Ordering::Equal => Self::EQUAL,
            core::cmp::Ordering::Greater => Self::GREATER,
            core::cmp::Ordering::Less => Self::LESS,
        }
    }

    /// Checks whether every bit in `other` is also set in `self`
    #[inline]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Checks whether any bit in `other` is also set in `self`
    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns the raw flag bits, in `00000LGE` order
    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }
}

impl core::ops::BitOr for Flags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn initial_state() {
        let r = Registers::new();
        assert_eq!(r.sp(), STACK_TOP);
        assert_eq!(&r.as_array()[..7], &[0; 7]);
        assert_eq!(Flags::default().bits(), 0);
    }

    #[test]
    fn register_bounds() {
        let mut r = Registers::new();
        r.set(3, 0x42).unwrap();
        assert_eq!(r.get(3).unwrap(), 0x42);
        assert!(matches!(r.get(8), Err(Error::Register(8))));
        assert!(matches!(r.set(0xff, 1), Err(Error::Register(0xff))));
    }

    #[test]
    fn compare_sets_one_bit() {
        for a in 0..=255u8 {
            for b in [0, 1, 127, 128, 254, 255] {
                let f = Flags::compare(a, b);
                assert_eq!(f.bits().count_ones(), 1);
                assert_eq!(f.contains(Flags::EQUAL), a == b);
                assert_eq!(f.contains(Flags::GREATER), a > b);
                assert_eq!(f.contains(Flags::LESS), a < b);
            }
        }
    }

    #[test]
    fn flag_sets() {
        let ge = Flags::GREATER | Flags::EQUAL;
        assert!(Flags::EQUAL.intersects(ge));
        assert!(Flags::GREATER.intersects(ge));
        assert!(!Flags::LESS.intersects(ge));
        assert!(!Flags::EQUAL.contains(ge));
    }
}
