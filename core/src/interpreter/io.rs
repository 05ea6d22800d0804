//! Byte streams shared by all threads of a run
//!
//! `.` writes into a buffered output, `,` reads single bytes from the input.
//! Pending output is flushed before every read so prompts show up before the
//! program blocks on input.

use parking_lot::Mutex;
use std::io::{self, BufReader, BufWriter, Read, Write};

use super::errors::RunError;

pub struct ProgramIo {
    input: Mutex<BufReader<Box<dyn Read + Send>>>,
    output: Mutex<BufWriter<Box<dyn Write + Send>>>,
}

impl ProgramIo {
    pub fn new(input: impl Read + Send + 'static, output: impl Write + Send + 'static) -> Self {
        let input: Box<dyn Read + Send> = Box::new(input);
        let output: Box<dyn Write + Send> = Box::new(output);
        Self {
            input: Mutex::new(BufReader::new(input)),
            output: Mutex::new(BufWriter::new(output)),
        }
    }

    pub fn write_byte(&self, byte: u8) -> Result<(), RunError> {
        self.output.lock().write_all(&[byte]).map_err(RunError::Output)
    }

    pub fn flush(&self) -> Result<(), RunError> {
        self.output.lock().flush().map_err(RunError::Output)
    }

    /// Flush pending output, then read one byte
    ///
    /// Returns `Ok(None)` at end of input. Blocks until a byte is available.
    pub fn read_byte(&self) -> Result<Option<u8>, RunError> {
        self.flush()?;

        let mut input = self.input.lock();
        let mut buf = [0u8; 1];
        loop {
            match input.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(RunError::Input(e)),
            }
        }
    }
}

impl std::fmt::Debug for ProgramIo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgramIo").finish_non_exhaustive()
    }
}
