/*!

  A `FieldToken` is a named variable placeholder inside an instruction template. Each
  token stands for a run of nibbles in the binary pattern and, textually, for the same
  hex digits in the mnemonic: `nnn` is a 12 bit address, `x` and `y` are register
  indices, `kk` is an immediate byte, and `n` is a bare nibble.

  Token substitution during table compilation happens in the fixed order given by
  `TOKEN_PRIORITY`. The order is significant: a multi-character token must be tested
  before any token whose text is a substring of it (`nnn` before `n`), otherwise a
  naive search for the shorter token would also hit inside the longer token's
  occurrence.

*/

use strum_macros::{Display as StrumDisplay, EnumIter, IntoStaticStr};

/// Variable fields that may appear in an instruction template.
#[derive(
StrumDisplay, IntoStaticStr, EnumIter,
Clone,        Copy,          Eq, PartialEq, Debug, Hash
)]
pub enum FieldToken {
  /// `nnn`: a 12 bit address.
  #[strum(serialize = "nnn")]
  Address,
  /// `x`: the first register operand.
  #[strum(serialize = "x")]
  RegisterX,
  /// `y`: the second register operand.
  #[strum(serialize = "y")]
  RegisterY,
  /// `kk`: an immediate byte.
  #[strum(serialize = "kk")]
  Byte,
  /// `n`: an immediate nibble.
  #[strum(serialize = "n")]
  Nibble,
}

/// The fixed substitution order. Order-dependency: `compile::compile_template`.
pub const TOKEN_PRIORITY: [FieldToken; 5] = [
  FieldToken::Address,
  FieldToken::RegisterX,
  FieldToken::RegisterY,
  FieldToken::Byte,
  FieldToken::Nibble,
];

impl FieldToken {
  /// The token's textual form as it appears in template strings.
  pub fn text(&self) -> &'static str {
    Into::<&'static str>::into(*self)
  }

  /// Width of the field in nibbles, which equals its width in hex digits.
  pub fn width(&self) -> usize {
    match self {
      FieldToken::Address => 3,
      FieldToken::Byte => 2,
      FieldToken::RegisterX
      | FieldToken::RegisterY
      | FieldToken::Nibble => 1
    }
  }
}

/// The hex character class shared by compiler and matcher. Inputs are normalized to
/// uppercase before matching, so lowercase digits are deliberately excluded here.
pub fn is_hex_digit(c: char) -> bool {
  match c {
    '0'..='9' | 'A'..='F' => true,
    _ => false
  }
}
