use hackasm::{assemble, Error, ErrorKind, Format};

fn words(src: &str) -> Vec<u16> {
    match assemble(src) {
        Ok(program) => program.words,
        Err(err) => panic!("assemble failed: {err}"),
    }
}

fn bin(s: &str) -> u16 {
    u16::from_str_radix(s, 2).unwrap()
}

#[test]
fn add_program() {
    let src = "\
// Computes R0 = 2 + 3
@2
D=A
@3
D=D+A
@0
M=D
";
    let expect: Vec<u16> = [
        "0000000000000010",
        "1110110000010000",
        "0000000000000011",
        "1110000010010000",
        "0000000000000000",
        "1110001100001000",
    ]
    .iter()
    .map(|s| bin(s))
    .collect();
    assert_eq!(words(src), expect);
}

#[test]
fn literal_bounds() {
    for n in [0u16, 1, 255, 16384, 32767] {
        let word = words(&format!("@{n}"))[0];
        assert_eq!(word & 0x8000, 0);
        assert_eq!(word & 0x7FFF, n);
    }
    let err = assemble("@32768").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Range);
    assert!(err.to_string().contains("exceeds maximum 32767"));
}

#[test]
fn predefined_symbols_allocate_nothing() {
    let src = "@SP\n@LCL\n@ARG\n@THIS\n@THAT\n@R0\n@R13\n@R15\n@SCREEN\n@KBD";
    let program = assemble(src).unwrap();
    assert_eq!(
        program.words,
        vec![0, 1, 2, 3, 4, 0, 13, 15, 16384, 24576]
    );
    assert_eq!(program.symbols.variables(), 0);
}

#[test]
fn variables_from_16() {
    let m_zero = bin("1110101010001000");
    assert_eq!(
        words("@x\nM=0\n@y\nM=0\n@x"),
        vec![16, m_zero, 17, m_zero, 16]
    );
}

#[test]
fn labels_do_not_take_slots() {
    let src = "\
@1
(LOOP)
D=A
(SKIP)
(ALIAS)
@LOOP
0;JMP
(END)
@END
0;JMP
@SKIP
@ALIAS
";
    let program = assemble(src).unwrap();
    assert_eq!(program.words.len(), 8);
    assert_eq!(program.words[2], 1);
    assert_eq!(program.words[4], 4);
    assert_eq!(program.words[6], 2);
    assert_eq!(program.words[7], 2);
    assert_eq!(program.symbols.variables(), 0);
}

#[test]
fn forward_reference() {
    let program = assemble("@END\n0;JMP\n@counter\n(END)\n@counter").unwrap();
    assert_eq!(program.words, vec![3, bin("1110101010000111"), 16, 16]);
}

#[test]
fn dest_permutations_and_spacing() {
    let md = words("MD=M+1")[0];
    assert_eq!(words("DM=M+1")[0], md);
    assert_eq!(words("  D M = M + 1   // increment")[0], md);
    assert_eq!(words("AMD=D|M;JNE")[0], words("DAM=D|M;JNE")[0]);
}

#[test]
fn undefined_fields() {
    for (src, field, raw) in [
        ("D=D+D", "COMP", "D+D"),
        ("Q=D", "DEST", "Q"),
        ("0;JXX", "JUMP", "JXX"),
    ] {
        let err = assemble(src).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UndefinedOperand, "{src}");
        match err {
            Error::Line { source, .. } => match *source {
                Error::UndefinedOperand { field: f, raw: r } => {
                    assert_eq!(f, field);
                    assert_eq!(r, raw);
                }
                other => panic!("unexpected error {other:?}"),
            },
            other => panic!("missing line context {other:?}"),
        }
    }
}

#[test]
fn error_carries_line() {
    let err = assemble("@1\n\n// comment\n(LOOP\nD=A").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert_eq!(err.line(), Some(4));
    assert!(err.to_string().contains("(LOOP"));
}

#[test]
fn fails_fast_without_output() {
    assert!(assemble("@1\nD=A\nD=X\n@2").is_err());
}

#[test]
fn output_formats() {
    let words = [7u16, 0xEC10];
    assert_eq!(
        Format::Text.serialize(&words),
        b"0000000000000111\n1110110000010000\n".to_vec()
    );
    assert_eq!(Format::Binary.serialize(&words), vec![0x07, 0x00, 0x10, 0xEC]);
}
