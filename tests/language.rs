use std::{cell::Cell, fs, rc::Rc};

use knight::{
    Completion,
    ast::Expr,
    error::{Error, RuntimeError},
    interpreter::{
        environment::Environment,
        evaluator::core::Context,
        io::{Io, MemoryIo},
        opcode::Opcode,
        parser::parse_program,
        value::core::Value,
    },
};
use walkdir::WalkDir;

#[test]
fn example_programs_produce_expected_output() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/programs").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| e.path().extension().is_some_and(|ext| ext == "kn"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected = fs::read_to_string(path.with_extension("out")).unwrap_or_else(|e| {
                           panic!("Missing expected output for {path:?}: {e}")
                       });

        count += 1;
        let mut io = MemoryIo::new();
        if let Err(e) = knight::run(&source, &mut io) {
            panic!("Program {path:?} failed:\n{source}\nError: {e}");
        }
        assert_eq!(io.output(), expected, "output of {path:?}");
    }

    assert!(count > 0, "No programs found in tests/programs");
}

fn eval(src: &str) -> Value {
    match knight::run(src, MemoryIo::new()) {
        Ok(Completion::Finished(value)) => value,
        Ok(Completion::Quit(status)) => panic!("Script quit with {status}"),
        Err(e) => panic!("Script failed: {e}"),
    }
}

fn output(src: &str) -> String {
    let mut io = MemoryIo::new();
    if let Err(e) = knight::run(src, &mut io) {
        panic!("Script failed: {e}");
    }
    io.output().to_string()
}

fn runtime_error(src: &str) -> RuntimeError {
    match knight::run(src, MemoryIo::new()) {
        Err(Error::Runtime(e)) => e,
        other => panic!("Script was expected to fail at runtime, got {other:?}"),
    }
}

#[test]
fn addition_parses_and_evaluates() {
    let program = parse_program("+ 1 2").unwrap();
    assert_eq!(program, Expr::call(Opcode::Add, [Expr::from(1), Expr::from(2)]));

    let mut context = Context::new(MemoryIo::new());
    assert_eq!(context.eval(&program).unwrap(), Value::Integer(3));
}

#[test]
fn assignment_and_basic_arithmetic() {
    assert_eq!(eval("; = x + 1 2 x"), Value::Integer(3));
    assert_eq!(eval("* 7 9"), Value::Integer(63));
    assert_eq!(eval("- 8 5"), Value::Integer(3));
    assert_eq!(eval("/ 7 2"), Value::Integer(3));
    assert_eq!(eval("/ ~7 2"), Value::Integer(-3));
    assert_eq!(eval("% 7 3"), Value::Integer(1));
    assert_eq!(eval("^ 2 10"), Value::Integer(1024));
    assert_eq!(eval("^ 2 ~1"), Value::Integer(0));
    assert_eq!(eval("^ ~1 ~3"), Value::Integer(-1));
}

#[test]
fn division_by_zero_is_error() {
    assert_eq!(runtime_error("/ 7 0"), RuntimeError::DivisionByZero);
    assert_eq!(runtime_error("% 7 0"), RuntimeError::DivisionByZero);
    assert_eq!(runtime_error("^ 0 ~2"), RuntimeError::DivisionByZero);
}

#[test]
fn overflow_is_error() {
    assert!(matches!(runtime_error("* 9223372036854775807 2"),
                     RuntimeError::Overflow { .. }));
    assert!(matches!(runtime_error("^ 10 100"), RuntimeError::Overflow { .. }));
}

#[test]
fn right_operand_is_coerced_to_left_type() {
    assert_eq!(eval("+ 1 \"41\""), Value::from("141"));
    assert_eq!(eval("+ \"a\" 1"), Value::from("a1"));
    assert_eq!(eval("+ 1 TRUE"), Value::Integer(2));
    assert_eq!(eval("- 10 \"  3 apples\""), Value::Integer(7));
    assert_eq!(eval("* \"ab\" 3"), Value::from("ababab"));
    assert_eq!(eval("+ \"n: \" NULL"), Value::from("n: null"));
    assert!(matches!(runtime_error("* \"ab\" ~1"), RuntimeError::InvalidArgument { .. }));
    assert!(matches!(runtime_error("* \"abc\" 9223372036854775807"),
                     RuntimeError::Overflow { .. }));
    assert!(matches!(runtime_error("* \"abc\" 1000000000"), RuntimeError::Overflow { .. }));
    assert!(matches!(runtime_error("- \"5\" 1"), RuntimeError::TypeMismatch { .. }));
}

#[test]
fn evaluators_reject_foreign_opcodes() {
    let (one, two) = (Value::Integer(1), Value::Integer(2));

    assert!(matches!(Context::<MemoryIo>::eval_arithmetic(Opcode::Lth, &one, &two),
                     Err(RuntimeError::InvalidArgument { .. })));
    assert!(matches!(Context::<MemoryIo>::eval_comparison(Opcode::Add, &one, &two),
                     Err(RuntimeError::InvalidArgument { .. })));
    assert_eq!(Context::<MemoryIo>::eval_comparison(Opcode::Lth, &one, &two),
               Ok(Value::Boolean(true)));
}

#[test]
fn comparisons_follow_left_operand() {
    assert_eq!(eval("< 1 2"), Value::Boolean(true));
    assert_eq!(eval("> 1 2"), Value::Boolean(false));
    assert_eq!(eval("< \"apple\" \"banana\""), Value::Boolean(true));
    assert_eq!(eval("< \"10\" 9"), Value::Boolean(true));
    assert_eq!(eval("< 10 \"9\""), Value::Boolean(false));
    assert_eq!(eval("< FALSE TRUE"), Value::Boolean(true));
    assert_eq!(eval("> TRUE 0"), Value::Boolean(true));
    assert!(matches!(runtime_error("< NULL 1"), RuntimeError::TypeMismatch { .. }));
}

#[test]
fn equality_is_structural_without_coercion() {
    assert_eq!(eval("? 1 1"), Value::Boolean(true));
    assert_eq!(eval("? 1 \"1\""), Value::Boolean(false));
    assert_eq!(eval("? \"abc\" + \"ab\" \"c\""), Value::Boolean(true));
    assert_eq!(eval("? NULL NULL"), Value::Boolean(true));
    assert_eq!(eval("? FALSE 0"), Value::Boolean(false));
    assert_eq!(eval("; = b BLOCK 1 ? b b"), Value::Boolean(true));
    assert_eq!(eval("? BLOCK 1 BLOCK 1"), Value::Boolean(false));
}

#[test]
fn block_defers_evaluation_until_called() {
    let program = parse_program("BLOCK (+ 1 2)").unwrap();
    let sum = Expr::call(Opcode::Add, [Expr::from(1), Expr::from(2)]);
    assert_eq!(program, Expr::call(Opcode::Block, [sum.clone()]));

    let mut context = Context::new(MemoryIo::new());
    let block = context.eval(&program).unwrap();
    let Value::Block(body) = &block else {
        panic!("expected a block, got {block:?}");
    };
    assert_eq!(**body, sum);

    let Expr::Call(_, args) = &program else { unreachable!() };
    assert!(Rc::ptr_eq(body, &args[0]), "the block shares the parsed node");
}

/// Counts evaluations of a variable by serving `RANDOM` from a counter.
struct CountingIo {
    calls: Rc<Cell<i64>>,
}

impl Io for CountingIo {
    fn read_line(&mut self) -> std::io::Result<Option<String>> {
        Ok(None)
    }

    fn random(&mut self) -> i64 {
        self.calls.set(self.calls.get() + 1);
        self.calls.get()
    }

    fn system(&mut self, _command: &str) -> std::io::Result<String> {
        Ok(String::new())
    }

    fn write(&mut self, _text: &str) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn block_side_effects_wait_for_call() {
    let calls = Rc::new(Cell::new(0));
    let mut context = Context::new(CountingIo { calls: Rc::clone(&calls) });

    let block = context.eval(&parse_program("BLOCK + RANDOM 1").unwrap()).unwrap();
    assert_eq!(calls.get(), 0);

    context.env.assign("b", block);
    assert_eq!(context.eval(&parse_program("CALL b").unwrap()).unwrap(),
               Value::Integer(2));
    assert_eq!(calls.get(), 1);
}

#[test]
fn call_requires_a_block() {
    assert!(matches!(runtime_error("CALL 3"), RuntimeError::TypeMismatch { .. }));
}

#[test]
fn if_evaluates_only_taken_branch() {
    assert_eq!(output("IF TRUE OUTPUT \"yes\" OUTPUT \"no\""), "yes\n");
    assert_eq!(output("IF 0 OUTPUT \"yes\" OUTPUT \"no\""), "no\n");
    assert_eq!(eval("IF \"\" 1 2"), Value::Integer(2));
}

#[test]
fn and_or_short_circuit() {
    assert_eq!(output("& F (OUTPUT \"x\")"), "");
    assert_eq!(output("| T (OUTPUT \"x\")"), "");
    assert_eq!(output("& T (OUTPUT \"x\")"), "x\n");
    assert_eq!(output("| F (OUTPUT \"x\")"), "x\n");
    assert_eq!(eval("& 0 undefined"), Value::Integer(0));
    assert_eq!(eval("| \"hi\" undefined"), Value::from("hi"));
    assert_eq!(eval("& 1 \"second\""), Value::from("second"));
}

#[test]
fn while_with_false_condition_never_runs_body() {
    assert_eq!(output("WHILE FALSE OUTPUT \"body\""), "");
    assert_eq!(eval("WHILE FALSE OUTPUT \"body\""), Value::Null);
}

#[test]
fn while_reevaluates_condition_each_iteration() {
    assert_eq!(output("; = i 0 WHILE < i 3 ; OUTPUT i = i + i 1"), "0\n1\n2\n");
    assert_eq!(eval("; = i 0 ; WHILE < i 5 = i + i 1 i"), Value::Integer(5));
}

#[test]
fn factorial_block_recurses_through_environment() {
    let fact = parse_program("BLOCK IF < n 2 n ; = m n ; = n - n 1 * m CALL fact").unwrap();

    let mut env = Environment::new();
    env.assign("n", Value::Integer(5));

    let mut context = Context::with_environment(env, MemoryIo::new());
    let block = context.eval(&fact).unwrap();
    context.env.assign("fact", block);

    let result = context.run("CALL fact").unwrap();
    assert_eq!(result, Completion::Finished(Value::Integer(120)));
}

#[test]
fn unknown_variable_is_error() {
    assert_eq!(runtime_error("+ foo 1"),
               RuntimeError::UndefinedVariable { name: "foo".to_string() });
}

#[test]
fn assignment_requires_variable_name() {
    assert!(matches!(runtime_error("= 1 2"), RuntimeError::TypeMismatch { .. }));
}

#[test]
fn assignment_returns_assigned_value() {
    assert_eq!(eval("= x \"value\""), Value::from("value"));
    assert_eq!(eval("; = x 1 ; = x + x 1 x"), Value::Integer(2));
}

#[test]
fn quit_stops_the_program() {
    let mut io = MemoryIo::new();
    let result = knight::run("; OUTPUT \"before\" ; QUIT 3 OUTPUT \"after\"", &mut io);

    assert_eq!(result, Ok(Completion::Quit(3)));
    assert_eq!(io.output(), "before\n");
}

#[test]
fn quit_unwinds_from_nested_blocks_and_loops() {
    let src = "; = f BLOCK WHILE TRUE QUIT 7 ; CALL f OUTPUT \"unreachable\"";
    let mut io = MemoryIo::new();

    assert_eq!(knight::run(src, &mut io), Ok(Completion::Quit(7)));
    assert_eq!(io.output(), "");
}

#[test]
fn quit_takes_precedence_over_errors() {
    assert_eq!(knight::run("+ QUIT 0 undefined", MemoryIo::new()),
               Ok(Completion::Quit(0)));
}

#[test]
fn output_newline_rules() {
    assert_eq!(output("OUTPUT \"hi\""), "hi\n");
    assert_eq!(output("OUTPUT \"no newline\\\""), "no newline");
    assert_eq!(output("OUTPUT 42"), "42\n");
    assert_eq!(output("OUTPUT NULL"), "null\n");
    assert_eq!(output("OUTPUT \"\""), "\n");
    assert_eq!(eval("OUTPUT 1"), Value::Null);
}

#[test]
fn dump_writes_debug_rendering_and_returns_value() {
    assert_eq!(output("DUMP 5"), "Number(5)\n");
    assert_eq!(output("DUMP \"hi\""), "String(hi)\n");
    assert_eq!(output("DUMP TRUE"), "Boolean(true)\n");
    assert_eq!(output("DUMP NULL"), "Null()\n");
    assert_eq!(output("DUMP BLOCK + 1 x"), "Block(+ 1 x)\n");
    assert_eq!(eval("+ DUMP 5 1"), Value::Integer(6));
}

#[test]
fn prompt_reads_lines_until_end_of_input() {
    let mut io = MemoryIo::new().with_input(["first\n", "second\r\n"]);
    let src = "; = a PROMPT ; = b PROMPT ; = c PROMPT ; OUTPUT a ; OUTPUT b DUMP c";

    knight::run(src, &mut io).unwrap();
    assert_eq!(io.output(), "first\nsecond\nNull()\n");
}

#[test]
fn random_comes_from_collaborator() {
    let mut io = MemoryIo::new().with_random([4, 9]);
    let result = knight::run("+ RANDOM * 10 RANDOM", &mut io).unwrap();

    assert_eq!(result, Completion::Finished(Value::Integer(94)));
}

#[test]
fn system_captures_command_output() {
    let mut io = MemoryIo::new().with_command("echo hello", "hello\n");
    let result = knight::run("` + \"echo \" \"hello\"", &mut io).unwrap();

    assert_eq!(result, Completion::Finished(Value::from("hello\n")));
    assert_eq!(io.executed(), ["echo hello"]);
}

#[test]
fn system_failure_is_runtime_error() {
    assert!(matches!(runtime_error("` \"missing\""), RuntimeError::Io { .. }));
}

#[test]
fn eval_runs_text_in_same_environment() {
    assert_eq!(eval("; = x 4 EVAL \"* x x\""), Value::Integer(16));
    assert_eq!(eval("; EVAL \"= y 2\" y"), Value::Integer(2));
    assert!(matches!(knight::run("EVAL \"+ 1\"", MemoryIo::new()),
                     Err(Error::Syntax(_))));
}

#[test]
fn length_counts_characters() {
    assert_eq!(eval("LENGTH \"hello\""), Value::Integer(5));
    assert_eq!(eval("LENGTH 12345"), Value::Integer(5));
    assert_eq!(eval("LENGTH \"\""), Value::Integer(0));
    assert_eq!(eval("LENGTH \"héllo\""), Value::Integer(5));
}

#[test]
fn not_negate_and_ascii() {
    assert_eq!(eval("! 0"), Value::Boolean(true));
    assert_eq!(eval("! \"x\""), Value::Boolean(false));
    assert_eq!(eval("~ 5"), Value::Integer(-5));
    assert_eq!(eval("~ \"-5\""), Value::Integer(5));
    assert_eq!(eval("ASCII 72"), Value::from("H"));
    assert_eq!(eval("ASCII \"Hi\""), Value::Integer(72));
    assert!(matches!(runtime_error("ASCII \"\""), RuntimeError::InvalidArgument { .. }));
    assert!(matches!(runtime_error("ASCII ~1"), RuntimeError::InvalidArgument { .. }));
}

#[test]
fn get_and_set_substrings() {
    assert_eq!(eval("GET \"hello world\" 6 5"), Value::from("world"));
    assert_eq!(eval("GET \"hello\" 5 0"), Value::from(""));
    assert_eq!(eval("SET \"hello world\" 0 5 \"goodbye\""), Value::from("goodbye world"));
    assert_eq!(eval("SET \"abc\" 3 0 \"d\""), Value::from("abcd"));
    assert_eq!(eval("SET \"abc\" 1 1 \"\""), Value::from("ac"));
    assert_eq!(eval("; = s \"keep\" ; SET s 0 1 \"p\" s"), Value::from("keep"));
}

#[test]
fn substrings_require_text_container() {
    assert!(matches!(runtime_error("GET 12345 1 2"), RuntimeError::TypeMismatch { .. }));
    assert!(matches!(runtime_error("SET 1 0 0 \"x\""), RuntimeError::TypeMismatch { .. }));
    assert!(matches!(runtime_error("GET NULL 0 0"), RuntimeError::TypeMismatch { .. }));
    assert_eq!(eval("SET \"a\" 1 0 12"), Value::from("a12"));
}

#[test]
fn substrings_out_of_range_are_errors() {
    assert!(matches!(runtime_error("GET \"abc\" 2 5"), RuntimeError::IndexOutOfRange { .. }));
    assert!(matches!(runtime_error("GET \"abc\" ~1 1"), RuntimeError::IndexOutOfRange { .. }));
    assert!(matches!(runtime_error("SET \"abc\" 4 0 \"x\""),
                     RuntimeError::IndexOutOfRange { .. }));
}

#[test]
fn blocks_do_not_coerce() {
    assert!(matches!(runtime_error("+ 1 BLOCK 2"), RuntimeError::TypeMismatch { .. }));
    assert!(matches!(runtime_error("OUTPUT BLOCK 2"), RuntimeError::TypeMismatch { .. }));
    assert!(matches!(runtime_error("! BLOCK 2"), RuntimeError::TypeMismatch { .. }));
}

#[test]
fn independent_runs_do_not_share_variables() {
    let mut first = Context::new(MemoryIo::new());
    let mut second = Context::new(MemoryIo::new());

    first.run("= shared 1").unwrap();
    assert!(first.env.contains("shared"));
    assert!(second.run("shared").is_err());
}

#[test]
fn moderately_deep_nesting_runs() {
    let depth = 200;
    let src = format!("{}1", "! ".repeat(depth));

    assert_eq!(eval(&src), Value::Boolean(false));
}
