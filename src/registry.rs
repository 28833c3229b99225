/*!

  The template registry: one `InstructionTemplate` row per CHIP-8 instruction, pairing
  a 4-nibble binary pattern with its mnemonic template. Each nibble of the binary
  pattern is a literal hex digit, a `FieldToken` character, or the wildcard `.`, which
  matches any nibble without capturing it.

  The registry is modeled as an ordered slice, not a map, because order is a stated
  invariant: translation scans compiled rules in registry order and the first match
  wins, so fully literal patterns (`00E0`, `00EE`) must precede the variable patterns
  that would otherwise shadow them. Order-dependencies:
      ```
      matcher::RuleTable::find()
      translate::decode()
      translate::encode()
      ```

*/

use prettytable::{format as TableFormat, Table};

/// One registry row: a 4-nibble binary pattern paired with its mnemonic template.
/// Leaf data; all behavior lives in the compiled rules.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct InstructionTemplate {
  pub pattern: &'static str,
  pub mnemonic: &'static str,
}

impl InstructionTemplate {
  pub const fn new(pattern: &'static str, mnemonic: &'static str) -> InstructionTemplate {
    InstructionTemplate { pattern, mnemonic }
  }
}

/// The CHIP-8 instruction set.
pub const OPCODE_TABLE: &[InstructionTemplate] = &[
  InstructionTemplate::new("00E0", "CLS"),
  InstructionTemplate::new("00EE", "RET"),
  InstructionTemplate::new("1nnn", "JP nnn"),
  InstructionTemplate::new("2nnn", "CALL nnn"),
  InstructionTemplate::new("3xkk", "SE Vx, kk"),
  InstructionTemplate::new("4xkk", "SNE Vx, kk"),
  InstructionTemplate::new("5xy.", "SE Vx, Vy"),
  InstructionTemplate::new("6xkk", "LD Vx, kk"),
  InstructionTemplate::new("7xkk", "ADD Vx, kk"),
  InstructionTemplate::new("8xy0", "LD Vx, Vy"),
  InstructionTemplate::new("8xy1", "OR Vx, Vy"),
  InstructionTemplate::new("8xy2", "AND Vx, Vy"),
  InstructionTemplate::new("8xy3", "XOR Vx, Vy"),
  InstructionTemplate::new("8xy4", "ADD Vx, Vy"),
  InstructionTemplate::new("8xy5", "SUB Vx, Vy"),
  InstructionTemplate::new("8x.6", "SHR Vx"),
  InstructionTemplate::new("8xy7", "SUBN Vx, Vy"),
  InstructionTemplate::new("8x.E", "SHL Vx"),
  InstructionTemplate::new("9xy.", "SNE Vx, Vy"),
  InstructionTemplate::new("Annn", "LD I, nnn"),
  InstructionTemplate::new("Bnnn", "JP V0, nnn"),
  InstructionTemplate::new("Cxkk", "RND Vx, kk"),
  InstructionTemplate::new("Dxyn", "DRW Vx, Vy, n"),
  InstructionTemplate::new("Ex9E", "SKP Vx"),
  InstructionTemplate::new("ExA1", "SKNP Vx"),
  InstructionTemplate::new("Fx07", "LD Vx, DT"),
  InstructionTemplate::new("Fx0A", "LD Vx, K"),
  InstructionTemplate::new("Fx15", "LD DT, Vx"),
  InstructionTemplate::new("Fx18", "LD ST, Vx"),
  InstructionTemplate::new("Fx1E", "ADD I, Vx"),
  InstructionTemplate::new("Fx29", "LD F, Vx"),
  InstructionTemplate::new("Fx33", "LD B, Vx"),
  InstructionTemplate::new("Fx55", "LD I, Vx"),
  InstructionTemplate::new("Fx65", "LD Vx, I"),
];

lazy_static! {
  static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
      .column_separator('│')
      .borders(' ')
      .separator(
        TableFormat::LinePosition::Title,
        TableFormat::LineSeparator::new('─', '┼', ' ', ' ')
      )
      .separator(
        TableFormat::LinePosition::Bottom,
        TableFormat::LineSeparator::new('─', '┴', ' ', ' ')
      )
      .padding(1, 1)
      .build();
}

/// Renders the registry as a reference table of pattern/mnemonic pairs.
pub fn listing() -> Table {
  let mut table = Table::new();
  table.set_format(*TABLE_DISPLAY_FORMAT);
  table.set_titles(row![ubr->"Pattern", ubl->"Mnemonic"]);
  for template in OPCODE_TABLE {
    table.add_row(row![r->template.pattern, l->template.mnemonic]);
  }
  table
}
