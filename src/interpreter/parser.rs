use std::rc::Rc;

use logos::{Lexer, Logos};

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::{LexerExtras, Token},
        opcode::Opcode,
        value::core::Value,
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a complete program.
///
/// A program is a single expression; any text following it is ignored.
///
/// # Errors
/// Returns a `ParseError` if the source does not start with a well-formed
/// expression.
///
/// # Example
/// ```
/// use knight::{ast::Expr, interpreter::{opcode::Opcode, parser::parse_program}};
///
/// let program = parse_program("+ 1 2").unwrap();
/// assert_eq!(program, Expr::call(Opcode::Add, [Expr::from(1), Expr::from(2)]));
/// ```
pub fn parse_program(source: &str) -> ParseResult<Expr> {
    let mut lexer = Token::lexer_with_extras(source, LexerExtras::default());
    let program = parse_expression(&mut lexer)?;

    tracing::debug!(bytes = lexer.span().end,
                    lines = lexer.extras.line,
                    "parsed program");
    Ok(program)
}

/// Parses one expression from the lexer's current position.
///
/// The grammar is committed recursive descent: a literal or variable is a
/// leaf, anything else must be a function symbol, which is followed by
/// exactly as many expressions as its arity.
///
/// Grammar: `expression := literal | identifier | function expression*`
///
/// # Parameters
/// - `lexer`: Cursor over the source, advanced past the parsed expression.
///
/// # Returns
/// The parsed expression node.
///
/// # Errors
/// - `UnexpectedEndOfInput` if the source runs out.
/// - `UnknownFunction` if a character is not a registered function.
/// - `UnterminatedString` or `LiteralTooLarge` for malformed literals.
pub fn parse_expression(lexer: &mut Lexer<'_, Token>) -> ParseResult<Expr> {
    let token = match lexer.next() {
        Some(Ok(token)) => token,
        Some(Err(())) => return Err(malformed_token(lexer)),
        None => return Err(ParseError::UnexpectedEndOfInput { line: lexer.extras.line }),
    };

    match token {
        Token::Integer(n) => Ok(Expr::Immediate(Value::Integer(n))),
        Token::Word('T') => Ok(Expr::Immediate(Value::Boolean(true))),
        Token::Word('F') => Ok(Expr::Immediate(Value::Boolean(false))),
        Token::Word('N') => Ok(Expr::Immediate(Value::Null)),
        Token::Text(text) => Ok(Expr::Immediate(Value::Text(text.into()))),
        Token::Identifier(name) => Ok(Expr::Variable(name)),
        Token::Word(symbol) | Token::Symbol(symbol) => parse_call(lexer, symbol),
        Token::NewLine => unreachable!("line breaks are skipped by the lexer"),
    }
}

/// Parses the operands of the function written as `symbol`.
///
/// # Errors
/// Returns `UnknownFunction` if `symbol` is not registered, or any error from
/// parsing the operands.
fn parse_call(lexer: &mut Lexer<'_, Token>, symbol: char) -> ParseResult<Expr> {
    let opcode = Opcode::lookup(symbol, lexer.extras.line)?;

    let mut args = Vec::with_capacity(opcode.arity());
    for _ in 0..opcode.arity() {
        args.push(Rc::new(parse_expression(lexer)?));
    }

    Ok(Expr::Call(opcode, args))
}

/// Classifies a span the lexer could not turn into a token.
fn malformed_token(lexer: &Lexer<'_, Token>) -> ParseError {
    let line = lexer.extras.line;
    let slice = lexer.slice();

    match slice.chars().next() {
        Some(quote @ ('"' | '\'')) => {
            let rest = lexer.remainder().lines().next().unwrap_or_default();
            ParseError::UnterminatedString { token: format!("{slice}{rest}")
                                                        .trim_start_matches(quote)
                                                        .to_string(),
                                             line }
        },
        Some(c) if c.is_ascii_digit() => ParseError::LiteralTooLarge { token: slice.to_string(),
                                                                         line },
        Some(_) => ParseError::UnknownFunction { token: slice.to_string(),
                                                 line },
        None => ParseError::UnexpectedEndOfInput { line },
    }
}
