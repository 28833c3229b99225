/*!

  Single-instruction translation over the process-wide tables. The tables are built
  once from the builtin registry on first use and are read-only thereafter, so they
  may be shared across any number of callers without synchronization. A registry that
  fails to compile is a configuration error and panics here, before any translation
  has happened.

  Decoding never fails: a raw word matching no rule falls back to its own four hex
  digits, since a ROM may contain data that merely looks like code. Encoding of an
  unrecognized mnemonic is an error for that one request only.

*/

use std::fmt::{Display, Formatter};

use crate::compile::compile;
use crate::matcher::RuleTable;
use crate::registry::OPCODE_TABLE;
use crate::token::is_hex_digit;

/// The decode and encode tables compiled from one registry.
pub struct TranslationTables {
  pub decode: RuleTable,
  pub encode: RuleTable,
}

lazy_static! {
  /// Tables for the builtin CHIP-8 registry.
  pub static ref TABLES: TranslationTables = {
    let (decode, encode) = compile(OPCODE_TABLE)
      .unwrap_or_else(|error| panic!("builtin opcode table failed to compile: {}", error));
    TranslationTables { decode, encode }
  };
}

/// What to emit for a wildcard nibble when encoding. The mnemonic carries no
/// information to recover the original nibble, so the caller picks the policy.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum WildcardFill {
  /// Emit this hex digit. `encode` uses `Digit('0')`.
  Digit(char),
  /// Refuse to encode any mnemonic whose pattern contains a wildcard.
  Reject,
}

impl Default for WildcardFill {
  fn default() -> WildcardFill {
    WildcardFill::Digit('0')
  }
}

/// A single encode request that could not be satisfied. Fatal to that request only;
/// whether to skip the line or abort the batch is the caller's decision.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum EncodeError {
  /// The normalized line matched no rule in the encode table.
  UnrecognizedMnemonic { text: String },
  /// The matched rule needs a wildcard fill digit and the policy is `Reject`.
  WildcardRejected { text: String },
  /// The fill digit handed to `encode_with` is not an uppercase hex digit.
  BadFillDigit { digit: char },
}

impl Display for EncodeError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      EncodeError::UnrecognizedMnemonic { text } => {
        write!(f, "unrecognized mnemonic: {}", text)
      }
      EncodeError::WildcardRejected { text } => {
        write!(f, "`{}` has a wildcard nibble and the fill policy rejects it", text)
      }
      EncodeError::BadFillDigit { digit } => {
        write!(f, "`{}` is not an uppercase hex digit", digit)
      }
    }
  }
}

impl std::error::Error for EncodeError {}

/**
  Decodes a raw instruction word to its mnemonic. The word is formatted as four
  uppercase hex digits and the decode table is scanned in registry order; the first
  matching rule renders the mnemonic. A word matching no rule decodes to the four
  digits themselves.
*/
pub fn decode(raw: u16) -> String {
  let digits = format!("{:04X}", raw);
  if let Some((rule, captures)) = TABLES.decode.find(&digits) {
    // Decode templates never contain a wildcard, so the fill digit is inert.
    return rule.render(&captures, '0');
  }
  digits
}

/// Encodes a mnemonic line with the default wildcard fill of `0`.
pub fn encode(line: &str) -> Result<u16, EncodeError> {
  encode_with(line, WildcardFill::default())
}

/**
  Encodes a mnemonic line to its raw instruction word under the given wildcard
  policy. Whitespace runs collapse to single separators and field values may be
  written in either case; the encode table is then scanned in registry order and the
  first rule matching the whole line renders the word.
*/
pub fn encode_with(line: &str, fill: WildcardFill) -> Result<u16, EncodeError> {
  let text = normalize(line);
  let (rule, captures) = match TABLES.encode.find(&text) {
    Some(found) => found,
    None => return Err(EncodeError::UnrecognizedMnemonic { text: text.clone() })
  };

  let fill_digit = match fill {
    WildcardFill::Digit(digit) if is_hex_digit(digit) => digit,
    WildcardFill::Digit(digit) => return Err(EncodeError::BadFillDigit { digit }),
    WildcardFill::Reject => {
      if rule.renders_wildcard() {
        return Err(EncodeError::WildcardRejected { text });
      }
      '0' // inert: the template has no wildcard to render
    }
  };

  let code = rule.render(&captures, fill_digit);
  match u16::from_str_radix(&code, 16) {
    Ok(raw) => Ok(raw),
    Err(_) => unreachable!("compiled rule rendered a non-hex code: {}", code)
  }
}

fn normalize(line: &str) -> String {
  line.split_whitespace().collect::<Vec<&str>>().join(" ").to_uppercase()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn decodes_no_operand_instructions() {
    assert_eq!(decode(0x00E0), "CLS");
    assert_eq!(decode(0x00EE), "RET");
  }

  #[test]
  fn decodes_fields_into_their_placeholders() {
    assert_eq!(decode(0x6A3F), "LD VA, 3F");
    assert_eq!(decode(0x1ABC), "JP ABC");
    assert_eq!(decode(0xD123), "DRW V1, V2, 3");
    assert_eq!(decode(0xFA65), "LD VA, I");
  }

  #[test]
  fn unknown_words_pass_through_as_hex() {
    assert_eq!(decode(0x0000), "0000");
    assert_eq!(decode(0xFFFF), "FFFF");
    assert_eq!(decode(0xE000), "E000");
  }

  #[test]
  fn wildcard_nibble_does_not_affect_decoding() {
    assert_eq!(decode(0x5120), decode(0x512F));
    assert_eq!(decode(0x8106), "SHR V1");
    assert_eq!(decode(0x81A6), "SHR V1");
  }

  #[test]
  fn encodes_the_decoded_form_back() {
    assert_eq!(encode("CLS").unwrap(), 0x00E0);
    assert_eq!(encode("LD VA, 3F").unwrap(), 0x6A3F);
    assert_eq!(encode("DRW V1, V2, 3").unwrap(), 0xD123);
    assert_eq!(encode("JP V0, 2A0").unwrap(), 0xB2A0);
  }

  #[test]
  fn encoding_normalizes_spacing_and_case() {
    assert_eq!(encode("  ld   va, 3f  ").unwrap(), 0x6A3F);
    assert_eq!(encode("add\ti, v7").unwrap(), 0xF71E);
  }

  #[test]
  fn literal_rows_win_over_variable_ones() {
    // 00E0 also fits 0nnn-shaped patterns in spirit; within the real table it must
    // not be taken by anything later than the first row.
    assert_eq!(encode("CLS").unwrap(), 0x00E0);
    assert_eq!(decode(0x00E0), "CLS");
  }

  #[test]
  fn wildcard_fill_defaults_to_zero() {
    assert_eq!(encode("SE V1, V2").unwrap(), 0x5120);
    assert_eq!(encode("SHR V1").unwrap(), 0x8106);
    assert_eq!(encode("SHL V1").unwrap(), 0x810E);
  }

  #[test]
  fn wildcard_fill_is_configurable() {
    assert_eq!(encode_with("SE V1, V2", WildcardFill::Digit('F')).unwrap(), 0x512F);
    match encode_with("SE V1, V2", WildcardFill::Reject) {
      Err(EncodeError::WildcardRejected { .. }) => {}
      other => panic!("expected a wildcard rejection, got {:?}", other)
    }
    // Rules without a wildcard are unaffected by the policy.
    assert_eq!(encode_with("CLS", WildcardFill::Reject).unwrap(), 0x00E0);
  }

  #[test]
  fn bad_fill_digit_is_reported() {
    match encode_with("SE V1, V2", WildcardFill::Digit('z')) {
      Err(EncodeError::BadFillDigit { digit: 'z' }) => {}
      other => panic!("expected a bad fill digit, got {:?}", other)
    }
  }

  #[test]
  fn unrecognized_mnemonics_are_reported() {
    match encode("BOGUS V1") {
      Err(EncodeError::UnrecognizedMnemonic { text }) => assert_eq!(text, "BOGUS V1"),
      other => panic!("expected an unrecognized mnemonic, got {:?}", other)
    }
    // A correct mnemonic with an overlong field is no match either.
    assert!(encode("LD VA, 3F0").is_err());
  }
}
