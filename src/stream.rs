/*!

  Whole-stream translation. A ROM is a sequence of 2-byte big-endian instruction
  words; a listing is one mnemonic line per word, in stream order. Reading the bytes
  from disk and writing the result back are the caller's business, so both directions
  here are pure functions over in-memory data.

*/

use std::fmt::{Display, Formatter};

use byteorder::{BigEndian, ByteOrder};

use crate::translate::{decode, encode, EncodeError};

/// A whole-stream translation failure.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum StreamError {
  /// The byte stream ended mid-instruction. `offset` is the position of the
  /// dangling byte.
  Truncated { offset: usize },
  /// A listing line failed to encode. `line` is 1-based.
  BadLine {
    line: usize,
    source: EncodeError
  },
}

impl Display for StreamError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      StreamError::Truncated { offset } => {
        write!(f, "truncated instruction: a dangling byte at offset {}", offset)
      }
      StreamError::BadLine { line, source } => {
        write!(f, "line {}: {}", line, source)
      }
    }
  }
}

impl std::error::Error for StreamError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      StreamError::BadLine { source, .. } => Some(source),
      StreamError::Truncated { .. } => None
    }
  }
}

/**
  Disassembles a ROM into a newline-joined listing, one mnemonic per instruction
  word. Words that match no template appear as their four hex digits. An odd byte
  count is a `Truncated` error, never a silently dropped or padded final word.
*/
pub fn disassemble(bytes: &[u8]) -> Result<String, StreamError> {
  let mut lines = Vec::with_capacity(bytes.len() / 2);
  let mut words = bytes.chunks_exact(2);

  for word in &mut words {
    lines.push(decode(BigEndian::read_u16(word)));
  }
  if !words.remainder().is_empty() {
    return Err(StreamError::Truncated { offset: bytes.len() - 1 });
  }

  Ok(lines.join("\n"))
}

/**
  Assembles a listing into ROM bytes, two per instruction, in line order. Blank
  lines are skipped. The first line that fails to encode aborts the batch with its
  line number; a caller wanting to skip bad lines instead can drive
  `translate::encode` itself.
*/
pub fn assemble(text: &str) -> Result<Vec<u8>, StreamError> {
  let mut bytes = Vec::new();

  for (index, line) in text.lines().enumerate() {
    if line.trim().is_empty() {
      continue;
    }
    let raw = encode(line)
      .map_err(|source| StreamError::BadLine { line: index + 1, source })?;
    let mut word = [0u8; 2];
    BigEndian::write_u16(&mut word, raw);
    bytes.extend_from_slice(&word);
  }

  Ok(bytes)
}
