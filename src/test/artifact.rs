use super::*;
use crate::isa;

#[test]
fn instruction_serializes_without_arg() {
    let halt = Instruction::new(0, Opcode::Halt, None);
    assert_eq!(
        serde_json::to_string(&halt).unwrap(),
        r#"{"index":0,"command":"halt"}"#
    );
}

#[test]
fn instruction_serializes_with_arg() {
    let push = Instruction::new(1, Opcode::Push, Some(5));
    assert_eq!(
        serde_json::to_string(&push).unwrap(),
        r#"{"index":1,"command":"push","arg":5}"#
    );
}

#[test]
fn mnemonics_deserialize() {
    let program: Vec<Instruction> =
        serde_json::from_str(r#"[{"index":0,"command":"jmp","arg":1}, {"index":1,"command":"halt"}]"#)
            .unwrap();
    assert_eq!(
        program,
        vec![
            Instruction::new(0, Opcode::Jmp, Some(1)),
            Instruction::new(1, Opcode::Halt, None),
        ]
    );
}

#[test]
fn display_is_lowercase_mnemonic() {
    assert_eq!(Opcode::Zjmp.to_string(), "zjmp");
    assert_eq!(Opcode::Omit.to_string(), "omit");
}

#[test]
fn write_read() {
    let path = "test_program.json";

    let program = prog![Jmp(2), Push(7), Omit, Halt];
    isa::write_file(path, &program).unwrap();

    let text = std::fs::read_to_string(path).unwrap();
    assert!(text.starts_with("[{"));
    assert!(text.contains(",\n "));

    let read_back = isa::read_file(path).unwrap();
    assert_eq!(program, read_back);

    std::fs::remove_file(path).unwrap();
}
