use std::io::Write;

/// Trait for the output side of the machine
///
/// `PRN` and `PRA` are routed through this trait, so a host can capture
/// program output instead of printing it.
pub trait Device {
    /// Performs the `PRN` operation, emitting a value in decimal
    fn print_number(&mut self, v: u8) -> std::io::Result<()>;

    /// Performs the `PRA` operation, emitting the character with code point `v`
    fn print_char(&mut self, v: u8) -> std::io::Result<()>;
}

/// Device which discards all output
pub struct EmptyDevice;
impl Device for EmptyDevice {
    fn print_number(&mut self, _v: u8) -> std::io::Result<()> {
        Ok(())
    }
    fn print_char(&mut self, _v: u8) -> std::io::Result<()> {
        Ok(())
    }
}

/// Device which writes program output to a byte sink
///
/// `PRN` writes one value per line; `PRA` writes a bare character.
pub struct Console<W> {
    out: W,
}

impl<W: Write> Console<W> {
    /// Wraps the given writer
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Flushes the underlying writer
    pub fn flush(&mut self) -> std::io::Result<()> {
        self.out.flush()
    }

    /// Unwraps the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Device for Console<W> {
    fn print_number(&mut self, v: u8) -> std::io::Result<()> {
        writeln!(self.out, "{v}")
    }
    fn print_char(&mut self, v: u8) -> std::io::Result<()> {
        write!(self.out, "{}", char::from(v))
    }
}
