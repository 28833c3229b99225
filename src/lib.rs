/*!

  A table-driven assembler and disassembler for CHIP-8 bytecode.

  Every CHIP-8 instruction is one 16 bit big-endian word whose four nibbles follow a
  handful of fixed shapes. One declarative table (`registry::OPCODE_TABLE`) describes
  each instruction as a pair of templates with aligned variable fields: a 4-nibble
  binary pattern and a mnemonic. The table is compiled once into two rule tables, one
  per direction, so decoding and encoding are driven by the same data and cannot
  drift apart. Runtime translation is a first-match scan of the compiled rules in
  table order.

  `translate` holds the single-instruction entry points over process-wide tables;
  `stream` translates whole ROMs and listings. Both are pure, and the compiled tables
  are immutable after construction, so translation is freely shareable across
  threads.

*/

#[macro_use]
extern crate prettytable;
#[macro_use]
extern crate lazy_static;

pub mod compile;
pub mod matcher;
pub mod registry;
pub mod stream;
pub mod token;
pub mod translate;

pub use compile::{compile, TemplateError};
pub use matcher::{CompiledRule, Piece, RuleTable};
pub use registry::{InstructionTemplate, OPCODE_TABLE};
pub use stream::{assemble, disassemble, StreamError};
pub use token::{FieldToken, TOKEN_PRIORITY};
pub use translate::{decode, encode, encode_with, EncodeError, WildcardFill};
