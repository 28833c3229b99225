/*!

  Compiled rules and the first-match scan over them. A `CompiledRule` is one direction
  of one registry row: a `matcher` pattern that is run against the input (the 4 hex
  digits of a raw instruction when decoding, the normalized mnemonic line when
  encoding) and a `template` that the captured fields are substituted into. Both sides
  are sequences of `Piece`s, so the same matching and rendering code serves both
  directions.

*/

use crate::token::is_hex_digit;

/// One segment of a compiled pattern or template.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Piece {
  /// Verbatim text: literal hex digits on the binary side, mnemonic words and
  /// punctuation on the text side.
  Lit(String),
  /// A captured field of exactly `width` hex digits, bound to capture group `group`.
  Field { group: usize, width: usize },
  /// A single hex digit that matches without being captured. Never appears on the
  /// mnemonic side; when rendered (encode direction) it takes a caller-chosen fill
  /// digit, since the mnemonic carries no information to recover it.
  Wildcard,
}

/// One direction of a compiled registry row.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct CompiledRule {
  pub matcher: Vec<Piece>,
  pub template: Vec<Piece>,
  pub group_count: usize,
}

impl CompiledRule {

  /**
    Runs the matcher against `input`. The whole input must be consumed; a prefix
    match is not a match. On success the returned captures are indexed by group
    number and every group is populated.
  */
  pub fn try_match<'b>(&self, input: &'b str) -> Option<Vec<&'b str>> {
    let mut rest = input;
    let mut captures = vec![""; self.group_count];

    for piece in &self.matcher {
      match piece {

        Piece::Lit(text) => {
          if !rest.starts_with(text.as_str()) {
            return None;
          }
          rest = &rest[text.len()..];
        }

        Piece::Field { group, width } => {
          if rest.len() < *width || !rest.is_char_boundary(*width) {
            return None;
          }
          let digits = &rest[..*width];
          if !digits.chars().all(is_hex_digit) {
            return None;
          }
          captures[*group] = digits;
          rest = &rest[*width..];
        }

        Piece::Wildcard => {
          match rest.chars().next() {
            Some(c) if is_hex_digit(c) => rest = &rest[1..],
            _ => return None
          }
        }

      }
    }

    match rest.is_empty() {
      true => Some(captures),
      false => None
    }
  }

  /// Substitutes `captures` into the template. Wildcard positions render as `fill`.
  pub fn render(&self, captures: &[&str], fill: char) -> String {
    let mut out = String::new();
    for piece in &self.template {
      match piece {
        Piece::Lit(text) => out.push_str(text),
        Piece::Field { group, .. } => out.push_str(captures[*group]),
        Piece::Wildcard => out.push(fill)
      }
    }
    out
  }

  /// True if rendering this rule requires a wildcard fill digit.
  pub fn renders_wildcard(&self) -> bool {
    self.template.iter().any(|piece| *piece == Piece::Wildcard)
  }
}

/// An ordered collection of compiled rules. Rules are scanned in registry order and
/// the first match wins, so a more specific pattern must be registered before any
/// general pattern that could also match the same input.
#[derive(Clone, Debug)]
pub struct RuleTable {
  rules: Vec<CompiledRule>
}

impl RuleTable {

  pub fn new(rules: Vec<CompiledRule>) -> RuleTable {
    RuleTable { rules }
  }

  /// First-match scan, not best-match: returns the earliest rule matching `input`
  /// together with its captures.
  pub fn find<'a, 'b>(&'a self, input: &'b str) -> Option<(&'a CompiledRule, Vec<&'b str>)> {
    for rule in &self.rules {
      if let Some(captures) = rule.try_match(input) {
        return Some((rule, captures));
      }
    }
    None
  }

  pub fn len(&self) -> usize {
    self.rules.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rules.is_empty()
  }
}
