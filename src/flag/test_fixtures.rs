//! Shared helpers for flag tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{self, Write};
use std::rc::Rc;

use super::set::FlagSet;

/// An empty argument list.
pub const NO_ARGS: [&str; 0] = [];

/// A writer whose contents stay readable after it is moved into a set.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A set whose usage output is discarded.
pub fn quiet_set() -> FlagSet {
    let mut fs = FlagSet::new();
    fs.set_output(io::sink());
    fs
}

/// A set whose usage output is captured.
pub fn captured_set() -> (FlagSet, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let mut fs = FlagSet::new();
    fs.set_output(buffer.clone());
    (fs, buffer)
}

/// Builds an environment map from pairs.
pub fn env_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}
