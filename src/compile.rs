/*!

  The template compiler. Each registry row is compiled into a pair of rules, one per
  direction, by substituting its field tokens: in the binary pattern a token becomes a
  capturing field of the token's width, and in the mnemonic it becomes a field bound
  to the same capture group. The remaining text is kept literal, except that `.` in
  the binary pattern becomes a wildcard nibble.

  Tokens are substituted in the fixed `TOKEN_PRIORITY` order, and a nibble budget
  limits how far the scan runs: it starts at the most variable nibbles a pattern can
  hold and drops by each substituted token's width, and the scan stops at zero. The
  budget keeps a later, shorter token in the order from re-matching nibbles already
  claimed by an earlier, wider token whose textual form still contains the shorter
  token's letters. Substitution likewise never searches inside an already claimed
  field, only in the literal text that remains.

  A row that cannot be compiled is a configuration error: `compile` fails before any
  translation occurs, never per-instruction.

*/

use std::fmt::{Display, Formatter};

use strum::IntoEnumIterator;

use crate::matcher::{CompiledRule, Piece, RuleTable};
use crate::registry::InstructionTemplate;
use crate::token::{is_hex_digit, FieldToken, TOKEN_PRIORITY};

/// A 4-nibble opcode keeps at least one literal nibble to identify it, so at most
/// three nibbles are variable.
const NIBBLE_BUDGET: usize = 3;

/// A malformed registry row, detected while building the tables.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum TemplateError {
  /// A token occurs in the binary pattern but not the mnemonic, or the reverse.
  FieldMismatch {
    template: InstructionTemplate,
    token: FieldToken
  },
  /// A token is wider than the nibbles still unclaimed in its pattern.
  WidthOverflow {
    template: InstructionTemplate,
    token: FieldToken,
    remaining: usize
  },
  /// The binary pattern is not exactly four nibbles.
  WrongLength(InstructionTemplate),
  /// A pattern character that is not a literal hex digit, a field token, or `.`.
  StrayCharacter {
    template: InstructionTemplate,
    character: char
  },
}

impl Display for TemplateError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {

      TemplateError::FieldMismatch { template, token } => {
        write!(f,
          "field `{}` does not appear on both sides of `{}` / `{}`",
          token, template.pattern, template.mnemonic
        )
      }

      TemplateError::WidthOverflow { template, token, remaining } => {
        write!(f,
          "field `{}` needs {} nibbles but only {} remain unclaimed in `{}`",
          token, token.width(), remaining, template.pattern
        )
      }

      TemplateError::WrongLength(template) => {
        write!(f, "binary pattern `{}` is not exactly four nibbles", template.pattern)
      }

      TemplateError::StrayCharacter { template, character } => {
        write!(f,
          "`{}` in pattern `{}` is neither a literal hex digit, a field token, nor `.`",
          character, template.pattern
        )
      }

    }
  }
}

impl std::error::Error for TemplateError {}

/// Working form of a template side during substitution: literal text interleaved
/// with the fields already claimed by a token.
#[derive(Clone, Debug)]
enum Seg {
  Text(String),
  Group {
    group: usize,
    token: FieldToken
  },
}

fn contains_token(segs: &[Seg], token: FieldToken) -> bool {
  segs.iter().any(|seg| match seg {
    Seg::Text(text) => text.contains(token.text()),
    Seg::Group { .. } => false
  })
}

/// Replaces the first occurrence of `token` in the literal text of `segs` with a
/// capture group. Returns false if the token does not occur.
fn splice_token(segs: &mut Vec<Seg>, token: FieldToken, group: usize) -> bool {
  for index in 0..segs.len() {
    let (before, after) = match &segs[index] {
      Seg::Text(text) => {
        match text.find(token.text()) {
          Some(at) => (
            text[..at].to_string(),
            text[at + token.text().len()..].to_string()
          ),
          None => continue
        }
      }
      Seg::Group { .. } => continue
    };

    let mut replacement = Vec::with_capacity(3);
    if !before.is_empty() {
      replacement.push(Seg::Text(before));
    }
    replacement.push(Seg::Group { group, token });
    if !after.is_empty() {
      replacement.push(Seg::Text(after));
    }
    segs.splice(index..=index, replacement);
    return true;
  }
  false
}

/// Converts the substituted binary pattern into pieces: literal hex digits collect
/// into `Lit` runs, `.` becomes a wildcard, and claimed fields keep their group.
fn pattern_pieces(
  segs: &[Seg],
  template: &InstructionTemplate
) -> Result<Vec<Piece>, TemplateError> {
  let mut pieces = Vec::new();
  let mut pending = String::new();

  for seg in segs {
    match seg {

      Seg::Text(text) => {
        for character in text.chars() {
          if is_hex_digit(character) {
            pending.push(character);
          } else if character == '.' {
            if !pending.is_empty() {
              pieces.push(Piece::Lit(std::mem::take(&mut pending)));
            }
            pieces.push(Piece::Wildcard);
          } else {
            return Err(TemplateError::StrayCharacter {
              template: *template,
              character
            });
          }
        }
      }

      Seg::Group { group, token } => {
        if !pending.is_empty() {
          pieces.push(Piece::Lit(std::mem::take(&mut pending)));
        }
        pieces.push(Piece::Field { group: *group, width: token.width() });
      }

    }
  }

  if !pending.is_empty() {
    pieces.push(Piece::Lit(pending));
  }
  Ok(pieces)
}

/// Converts the substituted mnemonic into pieces. Literal text is kept verbatim,
/// single-spaced; encode input is normalized to the same spacing before matching.
fn mnemonic_pieces(segs: &[Seg]) -> Vec<Piece> {
  segs.iter()
      .map(|seg| match seg {
        Seg::Text(text) => Piece::Lit(text.clone()),
        Seg::Group { group, token } =>
          Piece::Field { group: *group, width: token.width() }
      })
      .collect()
}

/// Compiles one registry row into its (decode, encode) rule pair.
fn compile_template(
  template: &InstructionTemplate
) -> Result<(CompiledRule, CompiledRule), TemplateError> {
  if template.pattern.chars().count() != 4 {
    return Err(TemplateError::WrongLength(*template));
  }

  let mut pattern = vec![Seg::Text(template.pattern.to_string())];
  let mut mnemonic = vec![Seg::Text(template.mnemonic.to_string())];
  let mut group = 0;
  let mut budget = NIBBLE_BUDGET;

  for token in TOKEN_PRIORITY.iter() {
    if contains_token(&pattern, *token) {
      if token.width() > budget {
        return Err(TemplateError::WidthOverflow {
          template: *template,
          token: *token,
          remaining: budget
        });
      }
      splice_token(&mut pattern, *token, group);
      if !splice_token(&mut mnemonic, *token, group) {
        return Err(TemplateError::FieldMismatch { template: *template, token: *token });
      }
      group += 1;
      budget -= token.width();
    }
    if budget == 0 {
      break;
    }
  }

  // A token left in the mnemonic at this point has no counterpart in the pattern.
  for token in FieldToken::iter() {
    if contains_token(&mnemonic, token) {
      return Err(TemplateError::FieldMismatch { template: *template, token });
    }
  }

  let pattern = pattern_pieces(&pattern, template)?;
  let mnemonic = mnemonic_pieces(&mnemonic);

  let decode = CompiledRule {
    matcher: pattern.clone(),
    template: mnemonic.clone(),
    group_count: group
  };
  let encode = CompiledRule {
    matcher: mnemonic,
    template: pattern,
    group_count: group
  };
  Ok((decode, encode))
}

/**
  Compiles the whole registry into its decode and encode tables. Both tables come
  from the same rows, in registry order, so the two directions stay consistent by
  construction and first-match precedence is identical in both.
*/
pub fn compile(
  registry: &[InstructionTemplate]
) -> Result<(RuleTable, RuleTable), TemplateError> {
  let mut decode_rules = Vec::with_capacity(registry.len());
  let mut encode_rules = Vec::with_capacity(registry.len());

  for template in registry {
    let (decode, encode) = compile_template(template)?;
    decode_rules.push(decode);
    encode_rules.push(encode);
  }

  Ok((RuleTable::new(decode_rules), RuleTable::new(encode_rules)))
}
