//! Append-only text buffers for captured process output.

use std::sync::{Arc, PoisonError, RwLock};

use adde_core::ServerOutput;

/// Shared, append-only text buffer.
///
/// Clones share the same storage, so a drain task can append while another
/// thread takes snapshots.
#[derive(Debug, Clone, Default)]
pub struct OutputBuffer {
    text: Arc<RwLock<String>>,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append text to the end of the buffer.
    pub fn append(&self, chunk: &str) {
        // A panicked writer can only have left a fully appended chunk behind.
        let mut text = self.text.write().unwrap_or_else(PoisonError::into_inner);
        text.push_str(chunk);
    }

    /// Copy of everything appended so far.
    pub fn contents(&self) -> String {
        self.text
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.text.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The stdout/stderr pair for one server lifecycle.
#[derive(Debug, Clone, Default)]
pub struct OutputBuffers {
    pub stdout: OutputBuffer,
    pub stderr: OutputBuffer,
}

impl OutputBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> ServerOutput {
        ServerOutput {
            stdout: self.stdout.contents(),
            stderr: self.stderr.contents(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_storage() {
        let buffer = OutputBuffer::new();
        let writer = buffer.clone();

        writer.append("hello ");
        writer.append("world");

        assert_eq!(buffer.contents(), "hello world");
        assert_eq!(buffer.len(), 11);
    }

    #[test]
    fn concurrent_appends_keep_every_chunk() {
        let buffer = OutputBuffer::new();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let writer = buffer.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        writer.append("x");
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(buffer.len(), 400);
    }

    #[test]
    fn snapshot_copies_both_streams() {
        let buffers = OutputBuffers::new();
        buffers.stdout.append("out\n");
        buffers.stderr.append("err\n");

        let snapshot = buffers.snapshot();

        assert_eq!(snapshot.stdout, "out\n");
        assert_eq!(snapshot.stderr, "err\n");
        assert!(!buffers.stdout.is_empty());
    }
}
