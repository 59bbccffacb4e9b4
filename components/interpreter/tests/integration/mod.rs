//! Integration tests for interpreter
//!
//! Full dialogue flows through DialogueRunner: node transitions, options,
//! commands, line spacing, inline expressions and snapshot restore.

use builtins::StandardLibrary;
use bytecode_system::{Node, OpCode, Operand, Program, StringTable};
use core_types::{DialogueError, ErrorKind, Value};
use interpreter::{DialogueOption, DialogueRunner, ExecutionState, RunnerConfig};
use std::sync::{Arc, Mutex};

fn runner(program: Program, strings: StringTable, config: RunnerConfig) -> DialogueRunner {
    DialogueRunner::new(
        Arc::new(program),
        Arc::new(strings),
        Arc::new(StandardLibrary::yarn()),
        config,
    )
    .unwrap()
}

fn line(id: &str) -> Vec<Operand> {
    vec![Operand::from(id)]
}

#[test]
fn test_two_node_flow() {
    let mut a = Node::new("A");
    a.emit(OpCode::RunLine, line("line:a1"));
    a.emit(OpCode::RunLine, line("line:a2"));
    a.emit(OpCode::RunNode, vec![Operand::from("B")]);

    let mut b = Node::new("B");
    b.emit(OpCode::RunLine, line("line:b1"));
    b.emit(OpCode::Stop, vec![]);

    let strings = StringTable::new()
        .with_line("line:a1", "First from A.", 1)
        .with_line("line:a2", "Second from A.", 2)
        .with_line("line:b1", "Only from B.", 5);

    let mut runner = runner(
        Program::new("flow").with_node(a).with_node(b),
        strings,
        RunnerConfig::new().with_start_node("A"),
    );

    assert_eq!(runner.get_line(), Some("First from A.".to_string()));
    assert_eq!(runner.get_line(), Some("Second from A.".to_string()));
    assert_eq!(runner.get_lines(), vec!["Only from B.".to_string()]);
    assert!(runner.is_finished());
    assert_eq!(runner.visits("A"), 1);
    assert_eq!(runner.visits("B"), 1);
    assert_eq!(runner.state().visits.len(), 2);
    assert_eq!(runner.current_node(), Some("B"));
}

fn three_option_program() -> (Program, StringTable) {
    let mut start = Node::new("Start");
    start.emit(OpCode::AddOption, vec![Operand::from("line:o1"), Operand::from("L1")]);
    start.emit(OpCode::AddOption, vec![Operand::from("line:o2"), Operand::from("L2")]);
    start.emit(OpCode::AddOption, vec![Operand::from("line:o3"), Operand::from("L3")]);
    start.emit(OpCode::ShowOptions, vec![]);
    start.emit(OpCode::Jump, vec![]);
    for (label, id) in [("L1", "line:r1"), ("L2", "line:r2"), ("L3", "line:r3")] {
        start.mark_label(label);
        start.emit(OpCode::Pop, vec![]);
        start.emit(OpCode::RunLine, line(id));
        start.emit(OpCode::Stop, vec![]);
    }

    let strings = StringTable::new()
        .with_line("line:o1", "Go left", 1)
        .with_line("line:o2", "Go right", 2)
        .with_line("line:o3", "Stay", 3)
        .with_line("line:r1", "You went left.", 4)
        .with_line("line:r2", "You went right.", 5)
        .with_line("line:r3", "You stayed.", 6);

    (Program::new("options").with_node(start), strings)
}

#[test]
fn test_options_and_choose() {
    let (program, strings) = three_option_program();
    let mut runner = runner(program, strings, RunnerConfig::new());

    assert!(runner.is_paused());
    assert!(!runner.has_line());
    assert_eq!(runner.choices().len(), 3);
    assert_eq!(
        runner.choices()[1],
        DialogueOption {
            index: 1,
            text: "Go right".to_string(),
            choice_target: "L2".to_string(),
        }
    );

    runner.choose(1).unwrap();
    assert!(runner.choices().is_empty());
    assert_eq!(runner.get_lines(), vec!["You went right.".to_string()]);
    assert!(runner.is_finished());
    assert_eq!(runner.state().stack_depth(), 0);
}

#[test]
fn test_choose_out_of_range() {
    let (program, strings) = three_option_program();
    let mut runner = runner(program, strings, RunnerConfig::new());

    let err = runner.choose(3).unwrap_err();
    assert_eq!(
        err,
        DialogueError::ChoiceOutOfRange {
            index: 3,
            available: 3
        }
    );
    assert_eq!(err.kind(), ErrorKind::Protocol);
    assert_eq!(runner.choices().len(), 3);
}

#[test]
fn test_resume_without_choice_is_protocol_error() {
    let (program, strings) = three_option_program();
    let mut runner = runner(program, strings, RunnerConfig::new());

    let err = runner.resume().unwrap_err();
    assert_eq!(err, DialogueError::NoJumpTarget);
}

#[test]
fn test_unregistered_command_is_skipped() {
    let mut start = Node::new("Start");
    start.emit(OpCode::RunCommand, vec![Operand::from("shake_camera hard")]);
    start.emit(OpCode::RunLine, line("line:after"));
    start.emit(OpCode::Stop, vec![]);

    let mut runner = runner(
        Program::new("cmd").with_node(start),
        StringTable::new().with_line("line:after", "Still here.", 2),
        RunnerConfig::new(),
    );

    assert_eq!(runner.get_lines(), vec!["Still here.".to_string()]);
    assert!(runner.is_finished());
}

#[test]
fn test_command_handler_receives_tokens() {
    let mut start = Node::new("Start");
    start.emit(OpCode::RunCommand, vec![Operand::from(r#"walk Sally "to the well" 'slowly'"#)]);
    start.emit(OpCode::RunCommand, vec![Operand::from("announce done")]);
    start.emit(OpCode::Stop, vec![]);

    let mut runner = runner(
        Program::new("cmd").with_node(start),
        StringTable::new(),
        RunnerConfig::new().with_autostart(false),
    );

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    runner.add_command_handler("walk", move |args: &[String]| {
        sink.lock().unwrap().push(args.to_vec());
        None
    });
    runner.add_command_handler("announce", |args: &[String]| Some(format!("** {} **", args.join(" "))));

    runner.resume().unwrap();
    assert_eq!(
        *seen.lock().unwrap(),
        vec![vec!["Sally".to_string(), "to the well".to_string(), "slowly".to_string()]]
    );
    assert_eq!(runner.get_lines(), vec!["** done **".to_string()]);
}

fn spaced_program() -> (Program, StringTable) {
    let mut start = Node::new("Start");
    start.emit(OpCode::RunLine, line("line:4"));
    start.emit(OpCode::RunLine, line("line:7"));
    start.emit(OpCode::RunLine, line("line:8"));
    start.emit(OpCode::Stop, vec![]);

    let strings = StringTable::new()
        .with_line("line:4", "Four", 4)
        .with_line("line:7", "Seven", 7)
        .with_line("line:8", "Eight", 8);
    (Program::new("spacing").with_node(start), strings)
}

#[test]
fn test_line_spacing_inserts_blank_lines() {
    let (program, strings) = spaced_program();
    let mut runner = runner(program, strings, RunnerConfig::new().with_line_spacing(true));

    assert_eq!(runner.get_lines(), vec!["Four", "", "", "Seven", "Eight"]);
}

#[test]
fn test_line_spacing_disabled() {
    let (program, strings) = spaced_program();
    let mut runner = runner(program, strings, RunnerConfig::new());

    assert_eq!(runner.get_lines(), vec!["Four", "Seven", "Eight"]);
}

#[test]
fn test_line_spacing_needs_line_numbers() {
    let mut start = Node::new("Start");
    start.emit(OpCode::RunLine, line("line:a"));
    start.emit(OpCode::RunLine, line("line:b"));
    start.emit(OpCode::Stop, vec![]);

    let mut strings = StringTable::new();
    strings.insert("line:a", "A", Some(1));
    strings.insert("line:b", "B", None);

    let err = DialogueRunner::new(
        Arc::new(Program::new("p").with_node(start)),
        Arc::new(strings),
        Arc::new(StandardLibrary::yarn()),
        RunnerConfig::new().with_line_spacing(true),
    )
    .unwrap_err();
    assert_eq!(
        err,
        DialogueError::MissingLineNumber {
            id: "line:b".to_string()
        }
    );
}

#[test]
fn test_missing_string_key() {
    let mut start = Node::new("Start");
    start.emit(OpCode::RunLine, line("line:nope"));

    let err = DialogueRunner::new(
        Arc::new(Program::new("p").with_node(start)),
        Arc::new(StringTable::new()),
        Arc::new(StandardLibrary::yarn()),
        RunnerConfig::new(),
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "`line:nope` is not a key in the string lookup table");
    assert_eq!(err.kind(), ErrorKind::Lookup);
}

fn expression_program() -> (Program, StringTable) {
    let mut start = Node::new("Start");
    start.emit(OpCode::PushString, vec![Operand::from("Ada")]);
    start.emit(OpCode::PushFloat, vec![Operand::Number(3.0)]);
    start.emit(
        OpCode::RunLine,
        vec![Operand::from("line:greet"), Operand::Number(2.0)],
    );
    start.emit(OpCode::Stop, vec![]);

    let strings = StringTable::new().with_line("line:greet", "{0} has {1} coins.", 1);
    (Program::new("expr").with_node(start), strings)
}

#[test]
fn test_inline_expressions_without_evaluator() {
    let (program, strings) = expression_program();
    let err = DialogueRunner::new(
        Arc::new(program),
        Arc::new(strings),
        Arc::new(StandardLibrary::yarn()),
        RunnerConfig::new(),
    )
    .unwrap_err();
    assert_eq!(err, DialogueError::InlineExpressionsUnsupported { count: 2 });
    assert_eq!(err.kind(), ErrorKind::Unimplemented);
}

#[test]
fn test_inline_expressions_with_evaluator() {
    let (program, strings) = expression_program();
    let mut runner = runner(program, strings, RunnerConfig::new().with_autostart(false));

    // values sit on the stack in push order: {0} is the deeper one
    runner.set_expression_evaluator(|state: &mut ExecutionState, index: usize| {
        let depth = state.stack_depth();
        Ok(state.value_stack[depth - 2 + index].clone())
    });
    runner.resume().unwrap();

    assert_eq!(runner.get_lines(), vec!["Ada has 3 coins."]);
}

fn branching_program() -> (Program, StringTable) {
    let mut start = Node::new("Start");
    start.emit(OpCode::RunLine, line("line:intro"));
    start.emit(OpCode::PushFloat, vec![Operand::Number(10.0)]);
    start.emit(OpCode::StoreVariable, vec![Operand::from("$gold")]);
    start.emit(OpCode::Pop, vec![]);
    start.emit(OpCode::AddOption, vec![Operand::from("line:opt_a"), Operand::from("A")]);
    start.emit(OpCode::AddOption, vec![Operand::from("line:opt_b"), Operand::from("B")]);
    start.emit(OpCode::ShowOptions, vec![]);
    start.emit(OpCode::Jump, vec![]);
    start.mark_label("A");
    start.emit(OpCode::Pop, vec![]);
    start.emit(OpCode::RunLine, line("line:a"));
    start.emit(OpCode::RunNode, vec![Operand::from("End")]);
    start.mark_label("B");
    start.emit(OpCode::Pop, vec![]);
    start.emit(OpCode::PushVariable, vec![Operand::from("$gold")]);
    start.emit(OpCode::PushFloat, vec![Operand::Number(4.0)]);
    start.emit(OpCode::PushFloat, vec![Operand::Number(2.0)]);
    start.emit(OpCode::CallFunc, vec![Operand::from("Number.Minus")]);
    start.emit(OpCode::StoreVariable, vec![Operand::from("$gold")]);
    start.emit(OpCode::Pop, vec![]);
    start.emit(OpCode::RunLine, line("line:b"));
    start.emit(OpCode::RunNode, vec![Operand::from("End")]);

    let mut end = Node::new("End");
    end.emit(OpCode::RunCommand, vec![Operand::from(r#"say "from a command""#)]);
    end.emit(OpCode::RunLine, line("line:end"));
    end.emit(OpCode::Stop, vec![]);

    let strings = StringTable::new()
        .with_line("line:intro", "Welcome.", 1)
        .with_line("line:opt_a", "Leave", 2)
        .with_line("line:opt_b", "Pay", 3)
        .with_line("line:a", "Bye.", 4)
        .with_line("line:b", "Thanks.", 5)
        .with_line("line:end", "The end.", 7);

    (Program::new("branching").with_node(start).with_node(end), strings)
}

fn say(args: &[String]) -> Option<String> {
    args.first().cloned()
}

#[derive(Debug, PartialEq)]
struct Transcript {
    before: (Vec<String>, Vec<DialogueOption>),
    after: Vec<String>,
    state: ExecutionState,
}

#[test]
fn test_export_import_equivalence() {
    let (program, strings) = branching_program();
    let program = Arc::new(program);
    let strings = Arc::new(strings);
    let library = Arc::new(StandardLibrary::yarn());

    let config = RunnerConfig::new().with_line_spacing(true);

    // uninterrupted
    let mut straight = DialogueRunner::new(
        Arc::clone(&program),
        Arc::clone(&strings),
        Arc::clone(&library),
        config.clone(),
    )
    .unwrap();
    straight.add_command_handler("say", say);
    let before = (straight.get_lines(), straight.choices().to_vec());
    straight.choose(1).unwrap();
    let expected = Transcript {
        before,
        after: straight.get_lines(),
        state: straight.export_state(),
    };

    // interrupted at the first suspension and restored from JSON
    let first = DialogueRunner::new(
        Arc::clone(&program),
        Arc::clone(&strings),
        Arc::clone(&library),
        config.clone(),
    )
    .unwrap();
    let json = first.export_state().to_json().unwrap();
    drop(first);

    let snapshot = ExecutionState::from_json(&json, &program).unwrap();
    let mut restored =
        DialogueRunner::from_state(program, strings, library, snapshot, config).unwrap();
    restored.add_command_handler("say", say);
    let before = (restored.get_lines(), restored.choices().to_vec());
    restored.choose(1).unwrap();
    let actual = Transcript {
        before,
        after: restored.get_lines(),
        state: restored.export_state(),
    };

    assert_eq!(actual, expected);
    assert_eq!(
        actual.after,
        vec!["Thanks.", "from a command", "The end."]
    );
    assert_eq!(restored.variable("$gold"), Some(&Value::Number(6.0)));
    assert_eq!(restored.visits("End"), 1);
}

#[test]
fn test_from_state_requires_current_node() {
    let (program, strings) = branching_program();
    let runner = runner(program, strings.clone(), RunnerConfig::new());
    let state = runner.export_state();

    let other = Program::new("other").with_node(Node::new("Elsewhere"));
    let err = DialogueRunner::from_state(
        Arc::new(other),
        Arc::new(strings),
        Arc::new(StandardLibrary::yarn()),
        state,
        RunnerConfig::new(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedProgram);
}

#[test]
fn test_seed_variable_before_start() {
    let mut start = Node::new("Start");
    start.emit(OpCode::PushVariable, vec![Operand::from("$player")]);
    start.emit(OpCode::PushString, vec![Operand::from("!")]);
    start.emit(OpCode::PushFloat, vec![Operand::Number(2.0)]);
    start.emit(OpCode::CallFunc, vec![Operand::from("String.Add")]);
    start.emit(OpCode::StoreVariable, vec![Operand::from("$shout")]);
    start.emit(OpCode::Stop, vec![]);

    let mut runner = runner(
        Program::new("seed").with_node(start),
        StringTable::new(),
        RunnerConfig::new().with_autostart(false),
    );
    runner.set_variable("$player", Value::from("Ada"));
    runner.resume().unwrap();

    assert_eq!(runner.variable("$shout"), Some(&Value::from("Ada!")));
}

fn division_program(divisor: f64) -> (Program, StringTable) {
    let mut start = Node::new("Start");
    start.emit(OpCode::PushFloat, vec![Operand::Number(1.0)]);
    start.emit(OpCode::PushFloat, vec![Operand::Number(divisor)]);
    start.emit(OpCode::PushFloat, vec![Operand::Number(2.0)]);
    start.emit(OpCode::CallFunc, vec![Operand::from("Number.Divide")]);
    start.emit(OpCode::StoreVariable, vec![Operand::from("$x")]);
    start.emit(OpCode::AddOption, vec![Operand::from("line:go"), Operand::from("Start")]);
    start.emit(OpCode::ShowOptions, vec![]);
    start.emit(OpCode::Stop, vec![]);

    let strings = StringTable::new().with_line("line:go", "Go", 1);
    (Program::new("division").with_node(start), strings)
}

#[test]
fn test_division_result_survives_snapshot() {
    let (program, strings) = division_program(3.0);
    let program = Arc::new(program);
    let live = DialogueRunner::new(
        Arc::clone(&program),
        Arc::new(strings),
        Arc::new(StandardLibrary::yarn()),
        RunnerConfig::new(),
    )
    .unwrap();

    let json = live.export_state().to_json().unwrap();
    let restored = ExecutionState::from_json(&json, &program).unwrap();

    assert_eq!(live.variable("$x"), Some(&Value::Number(1.0 / 3.0)));
    assert_eq!(restored.variables.get("$x"), live.variable("$x"));
    assert_eq!(restored.top(), Some(&Value::Number(1.0 / 3.0)));
    assert_eq!(restored, live.export_state());
}

#[test]
fn test_division_by_zero_is_fatal() {
    let (program, strings) = division_program(0.0);
    let err = DialogueRunner::new(
        Arc::new(program),
        Arc::new(strings),
        Arc::new(StandardLibrary::yarn()),
        RunnerConfig::new(),
    )
    .unwrap_err();

    assert_eq!(
        err,
        DialogueError::DivisionByZero {
            function: "Number.Divide".to_string()
        }
    );
    assert_eq!(err.kind(), ErrorKind::Arithmetic);
}

#[test]
fn test_visits_keyed_by_program_entry() {
    let json = r#"{
        "name": "renamed",
        "nodes": {
            "Start": {
                "name": "Intro",
                "instructions": [
                    {"opcode": "ADD_OPTION", "operands": [{"stringValue": "line:go"}, {"stringValue": "Start"}]},
                    {"opcode": "SHOW_OPTIONS"},
                    {"opcode": "STOP"}
                ]
            }
        }
    }"#;
    let program = Arc::new(Program::from_json(json).unwrap());
    let strings = Arc::new(StringTable::new().with_line("line:go", "Go", 1));
    let runner = DialogueRunner::new(
        Arc::clone(&program),
        Arc::clone(&strings),
        Arc::new(StandardLibrary::yarn()),
        RunnerConfig::new(),
    )
    .unwrap();

    assert_eq!(runner.current_node(), Some("Start"));
    assert_eq!(runner.visits("Start"), 1);
    assert_eq!(runner.visits("Intro"), 0);

    let snapshot = runner.export_state().to_json().unwrap();
    let restored = ExecutionState::from_json(&snapshot, &program).unwrap();
    assert_eq!(restored.current_node.as_deref(), Some("Start"));
}
