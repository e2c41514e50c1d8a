use super::{Chunks, ChunksError};

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    ChunksError(ChunksError),
    InvalidPayload,
}

/// A type for reading server-sent events from a chunk stream.
pub struct Sse {
    // Raw bytes, so a code point split across chunks is decoded whole.
    buf: Vec<u8>,
    chunks: Chunks,
}

impl Sse {
    #[inline]
    pub fn new(chunks: Chunks) -> Self {
        Self {
            buf: Vec::new(),
            chunks,
        }
    }

    pub async fn next_event(&mut self) -> Result<Option<String>, Error> {
        loop {
            // Drain buffered events before reading more data.
            if let Some(event) = self.try_parse_event()? {
                return Ok(Some(event));
            }

            let Some(bytes) =
                self.chunks.next_chunk().await.map_err(Error::ChunksError)?
            else {
                // Abort if no more data available.
                return Ok(None);
            };
            // Only line feeds are handled as end-of-line.
            self.buf.extend(bytes.iter().filter(|b| **b != b'\r'));
        }
    }

    fn try_parse_event(&mut self) -> Result<Option<String>, Error> {
        // event         = *( comment / field ) end-of-line
        // comment       = colon *any-char end-of-line
        // field         = 1*name-char [ colon [ space ] *any-char ] end-of-line
        loop {
            let Some(eol_idx) =
                self.buf.windows(2).position(|w| w == b"\n\n")
            else {
                return Ok(None);
            };

            let Ok(block) = str::from_utf8(&self.buf[0..eol_idx]) else {
                return Err(Error::InvalidPayload);
            };
            let mut data_lines = vec![];
            for line in block.lines() {
                if line.starts_with(':') {
                    continue;
                }
                // Only `data` fields are supported.
                let Some(value) = line.strip_prefix("data:") else {
                    return Err(Error::InvalidPayload);
                };
                data_lines.push(value.strip_prefix(' ').unwrap_or(value));
            }
            let data = (!data_lines.is_empty()).then(|| data_lines.join("\n"));

            // Consume the bytes from the buffer.
            self.buf.drain(0..eol_idx + 2);

            if let Some(data) = data {
                return Ok(Some(data));
            }
        }
    }
}
