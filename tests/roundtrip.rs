use ch8asm::{
  compile, decode, disassemble, encode, InstructionTemplate,
};

/// Decodes `raw`, checks the mnemonic, and checks that the mnemonic encodes back to
/// `raw`. Only valid for instructions without a wildcard nibble, where no
/// information is lost in the mnemonic.
fn check_round_trip(raw: u16, expected: &'static str) {
  let mnemonic = decode(raw);
  assert_eq!(mnemonic, expected);
  match encode(&mnemonic) {
    Ok(encoded) => assert_eq!(
      encoded, raw,
      "{} re-encoded to {:04X}, not {:04X}", mnemonic, encoded, raw
    ),
    Err(e) => panic!("failed to re-encode [{:04X}] {}: {}", raw, mnemonic, e)
  }
}

#[test]
fn test_decoder_does_not_panic() {
  // Every 16 bit word decodes to something: a mnemonic or its own hex digits.
  for raw in 0..=0xFFFFu16 {
    let displayed = decode(raw);
    assert!(displayed.len() >= 3);
  }
}

#[test]
fn test_round_trips() {
  check_round_trip(0x00E0, "CLS");
  check_round_trip(0x00EE, "RET");
  check_round_trip(0x1ABC, "JP ABC");
  check_round_trip(0x2000, "CALL 000");
  check_round_trip(0x3A7F, "SE VA, 7F");
  check_round_trip(0x4C01, "SNE VC, 01");
  check_round_trip(0x6A3F, "LD VA, 3F");
  check_round_trip(0x7101, "ADD V1, 01");
  check_round_trip(0x8AB0, "LD VA, VB");
  check_round_trip(0x8121, "OR V1, V2");
  check_round_trip(0x8342, "AND V3, V4");
  check_round_trip(0x8563, "XOR V5, V6");
  check_round_trip(0x8784, "ADD V7, V8");
  check_round_trip(0x89A5, "SUB V9, VA");
  check_round_trip(0x8BC7, "SUBN VB, VC");
  check_round_trip(0xA123, "LD I, 123");
  check_round_trip(0xBFFF, "JP V0, FFF");
  check_round_trip(0xC0FF, "RND V0, FF");
  check_round_trip(0xD78F, "DRW V7, V8, F");
  check_round_trip(0xE29E, "SKP V2");
  check_round_trip(0xE3A1, "SKNP V3");
  check_round_trip(0xF407, "LD V4, DT");
  check_round_trip(0xF50A, "LD V5, K");
  check_round_trip(0xF615, "LD DT, V6");
  check_round_trip(0xF718, "LD ST, V7");
  check_round_trip(0xF81E, "ADD I, V8");
  check_round_trip(0xF929, "LD F, V9");
  check_round_trip(0xFA33, "LD B, VA");
  check_round_trip(0xFB55, "LD I, VB");
  check_round_trip(0xFC65, "LD VC, I");
}

#[test]
fn test_wildcard_templates_decode_alike() {
  // 5xy., 9xy., 8x.6 and 8x.E ignore one nibble entirely.
  for fill in 0..=0xFu16 {
    assert_eq!(decode(0x5AB0 | fill), "SE VA, VB");
    assert_eq!(decode(0x9120 | fill), "SNE V1, V2");
    assert_eq!(decode(0x8006 | (fill << 4)), "SHR V0");
    assert_eq!(decode(0x800E | (fill << 4)), "SHL V0");
  }
}

#[test]
fn test_first_match_precedence() {
  // A deliberately ambiguous registry: the literal row is listed first, so it must
  // win over the variable row that also matches the same bits.
  let registry = [
    InstructionTemplate::new("1234", "HALT"),
    InstructionTemplate::new("1nnn", "JP nnn"),
  ];
  let (decode_table, encode_table) = compile(&registry).unwrap();

  let (rule, captures) = decode_table.find("1234").unwrap();
  assert_eq!(rule.render(&captures, '0'), "HALT");
  let (rule, captures) = decode_table.find("1235").unwrap();
  assert_eq!(rule.render(&captures, '0'), "JP 235");

  let (rule, captures) = encode_table.find("HALT").unwrap();
  assert_eq!(rule.render(&captures, '0'), "1234");
}

#[test]
fn test_disassembles_a_program() {
  // The top of a maze generator: load a sprite address, randomize, draw, loop.
  let rom = [
    0x6A, 0x00, // LD VA, 00
    0x6B, 0x00, // LD VB, 00
    0xA2, 0x1E, // LD I, 21E
    0xC0, 0x01, // RND V0, 01
    0x40, 0x01, // SNE V0, 01
    0xA2, 0x1A, // LD I, 21A
    0xDA, 0xB4, // DRW VA, VB, 4
    0x12, 0x00, // JP 200
  ];
  let listing = disassemble(&rom).unwrap();
  assert_eq!(listing, "\
LD VA, 00
LD VB, 00
LD I, 21E
RND V0, 01
SNE V0, 01
LD I, 21A
DRW VA, VB, 4
JP 200");

  // And the listing assembles back to the same ROM.
  assert_eq!(ch8asm::assemble(&listing).unwrap(), rom.to_vec());
}
