use knight::{
    Completion,
    ast::Expr,
    error::ParseError,
    interpreter::{
        io::MemoryIo,
        opcode::{ARITY_STRIDE, Opcode},
        parser::parse_program,
        value::core::Value,
    },
};

fn parse(src: &str) -> Expr {
    parse_program(src).unwrap_or_else(|e| panic!("Failed to parse {src:?}: {e}"))
}

fn parse_error(src: &str) -> ParseError {
    match parse_program(src) {
        Ok(expr) => panic!("{src:?} was expected to fail, parsed as {expr:?}"),
        Err(e) => e,
    }
}

#[test]
fn literals_and_variables() {
    assert_eq!(parse("42"), Expr::from(42));
    assert_eq!(parse("\"hello world\""), Expr::from("hello world"));
    assert_eq!(parse("'say \"hi\"'"), Expr::from("say \"hi\""));
    assert_eq!(parse("TRUE"), Expr::from(true));
    assert_eq!(parse("F"), Expr::from(false));
    assert_eq!(parse("NULL"), Expr::Immediate(Value::Null));
    assert_eq!(parse("fact_2"), Expr::variable("fact_2"));
}

#[test]
fn block_wraps_its_operand() {
    let sum = Expr::call(Opcode::Add, [Expr::from(1), Expr::from(2)]);
    assert_eq!(parse("BLOCK (+ 1 2)"), Expr::call(Opcode::Block, [sum]));
}

#[test]
fn nested_calls_take_exactly_their_arity() {
    let expected =
        Expr::call(Opcode::Then,
                   [Expr::call(Opcode::Assign, [Expr::variable("x"), Expr::from(3)]),
                    Expr::call(Opcode::Output,
                               [Expr::call(Opcode::Mul,
                                           [Expr::variable("x"), Expr::variable("x")])])]);

    assert_eq!(parse("; = x 3 OUTPUT * x x"), expected);
}

#[test]
fn word_functions_use_only_their_first_letter() {
    assert_eq!(parse("IF TRUE 1 2"), parse("I T 1 2"));
    assert_eq!(parse("OUTPUT LENGTH \"abc\""), parse("O L \"abc\""));
    assert_eq!(parse("WHILE_LOOP FALSE NULL"), parse("W F N"));
}

#[test]
fn brackets_colons_and_comments_are_ignored() {
    let plain = parse("+ 1 2");

    assert_eq!(parse("(+ [1] {2})"), plain);
    assert_eq!(parse(": + 1 : 2"), plain);
    assert_eq!(parse("# adds two numbers\n+ 1 # one\n 2"), plain);
}

#[test]
fn text_after_the_program_is_ignored() {
    assert_eq!(parse("1 2 3"), Expr::from(1));
    assert_eq!(parse("OUTPUT 1 $$$"), Expr::call(Opcode::Output, [Expr::from(1)]));
}

#[test]
fn every_opcode_has_arity_matching_its_code() {
    for opcode in Opcode::ALL {
        assert_eq!(opcode.arity(), usize::from(opcode.code() / ARITY_STRIDE), "{opcode}");

        let source = format!("{}{}", opcode.symbol(), " 1".repeat(opcode.arity()));
        match parse(&source) {
            Expr::Call(parsed, args) => {
                assert_eq!(parsed, opcode);
                assert_eq!(args.len(), opcode.arity(), "{source:?}");
            },
            other => panic!("{source:?} parsed as {other:?}"),
        }

        if opcode.symbol().is_ascii_uppercase() {
            let worded = format!("{}{}", opcode.name(), " 1".repeat(opcode.arity()));
            assert_eq!(parse(&worded), parse(&source));
        }
    }
}

#[test]
fn lookup_is_consistent_with_symbols() {
    for opcode in Opcode::ALL {
        assert_eq!(Opcode::lookup(opcode.symbol(), 1), Ok(opcode));
    }
    assert!(Opcode::lookup('X', 1).is_err());
}

#[test]
fn parsing_is_deterministic() {
    let src = "; = n 10 WHILE > n 0 ; OUTPUT + \"n=\" n = n - n 1";
    assert_eq!(parse(src), parse(src));
}

#[test]
fn rendered_programs_parse_back_unchanged() {
    let sources = ["; = x 3 OUTPUT * x x",
                   "IF < a 2 \"small\" 'big \"one\"'",
                   "BLOCK GET \"hello\" 1 SET s 0 1 NULL",
                   "WHILE TRUE & FALSE | x ` \"ls\""];

    for src in sources {
        let program = parse(src);
        assert_eq!(parse(&program.to_string()), program, "{src:?}");
    }
}

#[test]
fn text_with_both_quotes_renders_as_concatenation() {
    let text = "it's \"quoted\"";
    let rendered = Expr::from(text).to_string();
    assert_eq!(rendered, "+ \"it's \" '\"quoted\"'");

    let result = knight::run(&rendered, MemoryIo::new()).unwrap();
    assert_eq!(result, Completion::Finished(Value::from(text)));

    let block = Expr::call(Opcode::Block, [Expr::from("a'b\"c'd")]);
    assert_eq!(block.to_string(), "BLOCK + + \"a'b\" '\"c' \"'d\"");
}

#[test]
fn missing_operands_end_input_unexpectedly() {
    assert_eq!(parse_error(""), ParseError::UnexpectedEndOfInput { line: 1 });
    assert_eq!(parse_error("+ 1"), ParseError::UnexpectedEndOfInput { line: 1 });
    assert_eq!(parse_error("; = x 1\n\n# nothing follows\n"),
               ParseError::UnexpectedEndOfInput { line: 4 });
}

#[test]
fn unknown_functions_are_reported() {
    assert!(matches!(parse_error("$ 1"), ParseError::UnknownFunction { line: 1, .. }));
    assert!(matches!(parse_error("+ 1\nX 2"), ParseError::UnknownFunction { line: 2, .. }));
}

#[test]
fn unterminated_text_is_reported() {
    match parse_error("OUTPUT \"abc") {
        ParseError::UnterminatedString { token, line } => {
            assert_eq!(token, "abc");
            assert_eq!(line, 1);
        },
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn oversized_integers_are_reported() {
    assert_eq!(parse_error("+ 1 99999999999999999999"),
               ParseError::LiteralTooLarge { token: "99999999999999999999".to_string(),
                                             line:  1, });
}

#[test]
fn multiline_text_advances_line_numbers() {
    let err = parse_error("; OUTPUT \"one\ntwo\"\n+ 1");
    assert_eq!(err.line(), 3);
}
