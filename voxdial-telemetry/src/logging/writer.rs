//! Writer adapter that masks credentials in formatted log lines.

use crate::masking::SensitiveDataMasker;
use std::io;
use std::sync::Arc;
use tracing_subscriber::fmt::MakeWriter;

/// Wraps a [`MakeWriter`] so every write passes through a
/// [`SensitiveDataMasker`].
#[derive(Debug, Clone)]
pub struct MaskingMakeWriter<M> {
    inner: M,
    masker: Arc<SensitiveDataMasker>,
}

impl<M> MaskingMakeWriter<M> {
    /// Wraps `inner`.
    pub fn new(inner: M, masker: Arc<SensitiveDataMasker>) -> Self {
        Self { inner, masker }
    }
}

impl<'a, M> MakeWriter<'a> for MaskingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = MaskingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        MaskingWriter {
            inner: self.inner.make_writer(),
            masker: Arc::clone(&self.masker),
        }
    }
}

/// Writer produced by [`MaskingMakeWriter`].
#[derive(Debug)]
pub struct MaskingWriter<W> {
    inner: W,
    masker: Arc<SensitiveDataMasker>,
}

impl<W: io::Write> io::Write for MaskingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // The fmt layer hands over one complete event per call.
        match std::str::from_utf8(buf) {
            Ok(text) => {
                let masked = self.masker.mask_string(text);
                self.inner.write_all(masked.as_bytes())?;
            }
            Err(_) => self.inner.write_all(buf)?,
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
