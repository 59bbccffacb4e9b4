//! Contract compliance tests for bytecode_system
//! Verifies the public surface the interpreter and hosts depend on

use bytecode_system::{
    Instruction, LoadError, Node, OpCode, Operand, Program, StringEntry, StringTable,
};

/// Verify all opcode variants exist with their format numbers
#[test]
fn test_contract_opcode_variants() {
    let expected = [
        (OpCode::JumpTo, 0),
        (OpCode::Jump, 1),
        (OpCode::RunLine, 2),
        (OpCode::RunCommand, 3),
        (OpCode::AddOption, 4),
        (OpCode::ShowOptions, 5),
        (OpCode::PushString, 6),
        (OpCode::PushFloat, 7),
        (OpCode::PushBool, 8),
        (OpCode::PushNull, 9),
        (OpCode::JumpIfFalse, 10),
        (OpCode::Pop, 11),
        (OpCode::CallFunc, 12),
        (OpCode::PushVariable, 13),
        (OpCode::StoreVariable, 14),
        (OpCode::Stop, 15),
        (OpCode::RunNode, 16),
    ];
    for (op, number) in expected {
        assert_eq!(op.number(), number);
    }
}

/// Program store read-only operations
#[test]
fn test_contract_program_lookups() {
    let mut node = Node::new("Start");
    node.mark_label("top");
    node.emit(OpCode::Stop, vec![]);
    let program = Program::new("p").with_node(node);

    let _: Option<&std::sync::Arc<Node>> = program.node("Start");
    let _: Option<usize> = program.label("Start", "top");
    assert_eq!(program.label("Start", "top"), Some(0));
}

/// String table read-only operations
#[test]
fn test_contract_string_lookups() {
    let table = StringTable::new().with_line("line:1", "text", 1);
    let _: Option<&str> = table.text("line:1");
    let _: Option<u32> = table.line_number("line:1");
    let _: Option<&StringEntry> = table.entry("line:1");
}

/// Instruction structure
#[test]
fn test_contract_instruction_fields() {
    let inst = Instruction {
        opcode: OpCode::PushString,
        operands: vec![Operand::String("x".to_string())],
    };
    assert_eq!(inst.opcode, OpCode::PushString);
    assert_eq!(inst.operands.len(), 1);
}

/// Load errors implement std::error::Error
#[test]
fn test_contract_load_error_is_error() {
    fn assert_error<E: std::error::Error>() {}
    assert_error::<LoadError>();
}
