/*!

  Command line driver. `dasm` turns a `.ch8` ROM into a mnemonic listing, `asm` turns
  a listing back into a ROM, and `table` prints the instruction set reference. All
  file handling lives here; the library works on in-memory data only.

*/

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use ch8asm::{assemble, disassemble, registry};

#[derive(Parser)]
#[command(version, about = "A table-driven assembler and disassembler for CHIP-8 bytecode")]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Disassemble a ROM into a mnemonic listing
  Dasm {
    /// Input ROM file
    input: PathBuf,
    /// Output listing file; defaults to the input with a .ch8asm extension
    #[arg(short, long)]
    output: Option<PathBuf>,
  },
  /// Assemble a mnemonic listing into a ROM
  Asm {
    /// Input listing file
    input: PathBuf,
    /// Output ROM file; defaults to the input with a .ch8 extension
    #[arg(short, long)]
    output: Option<PathBuf>,
  },
  /// Print the instruction set as a reference table
  Table,
}

fn main() -> Result<()> {
  match Cli::parse().command {

    Command::Dasm { input, output } => {
      let rom = fs::read(&input)
        .with_context(|| format!("cannot read {}", input.display()))?;
      let listing = disassemble(&rom)
        .with_context(|| format!("cannot disassemble {}", input.display()))?;
      let output = output.unwrap_or_else(|| input.with_extension("ch8asm"));
      fs::write(&output, listing + "\n")
        .with_context(|| format!("cannot write {}", output.display()))?;
    }

    Command::Asm { input, output } => {
      let listing = fs::read_to_string(&input)
        .with_context(|| format!("cannot read {}", input.display()))?;
      let rom = assemble(&listing)
        .with_context(|| format!("cannot assemble {}", input.display()))?;
      let output = output.unwrap_or_else(|| input.with_extension("ch8"));
      fs::write(&output, rom)
        .with_context(|| format!("cannot write {}", output.display()))?;
    }

    Command::Table => {
      registry::listing().printstd();
    }

  }
  Ok(())
}
