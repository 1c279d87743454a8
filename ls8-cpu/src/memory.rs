use crate::Error;

/// Number of addressable bytes
pub const MEMORY_SIZE: usize = 256;

/// Flat, byte-addressable RAM
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Memory([u8; MEMORY_SIZE]);

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    /// Builds a new zero-initialized RAM
    pub fn new() -> Self {
        Memory([0u8; MEMORY_SIZE])
    }

    /// Reads a byte, checking that the address is in bounds
    #[inline]
    pub fn read(&self, addr: usize) -> Result<u8, Error> {
        self.0.get(addr).copied().ok_or(Error::Address(addr))
    }

    /// Writes a byte, checking that the address is in bounds
    #[inline]
    pub fn write(&mut self, addr: usize, v: u8) -> Result<(), Error> {
        let cell = self.0.get_mut(addr).ok_or(Error::Address(addr))?;
        *cell = v;
        Ok(())
    }

    /// Copies a program image to the start of memory
    ///
    /// Bytes past the end of the image are left untouched.
    pub fn load(&mut self, image: &[u8]) -> Result<(), Error> {
        let dst = self
            .0
            .get_mut(..image.len())
            .ok_or(Error::ImageTooLarge(image.len()))?;
        dst.copy_from_slice(image);
        Ok(())
    }

    /// Shared borrow of the entire RAM array
    #[inline]
    pub fn as_bytes(&self) -> &[u8; MEMORY_SIZE] {
        &self.0
    }
}
