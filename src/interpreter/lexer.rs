use logos::Logos;

/// Represents a lexical token in the source input.
///
/// Whitespace, the grouping brackets `()[]{}`, `:` and `#` comments carry no
/// meaning and are skipped. Brackets exist purely for human readability.
#[derive(Logos, Debug, PartialEq, Eq, Clone)]
#[logos(extras = LexerExtras)]
#[logos(skip r"[ \t\f\r(){}\[\]:]+")]
#[logos(skip r"#[^\n]*")]
pub enum Token {
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// Variable names such as `n` or `fact_2`.
    #[regex(r"[a-z_][a-z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// A run of uppercase letters; only the leading letter is significant, so
    /// `IF` and `I` are the same token.
    #[regex(r"[A-Z][A-Z_]*", leading_char)]
    Word(char),
    /// A single punctuation function symbol such as `+` or `;`.
    #[regex(r"[`!~+\-*/%^<>?&|;=]", leading_char)]
    Symbol(char),
    /// Single or double quoted text, taken verbatim.
    #[regex(r#""[^"]*""#, unquote)]
    #[regex(r"'[^']*'", unquote)]
    Text(String),
    /// Line breaks are counted for diagnostics and otherwise skipped.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting.
#[derive(Debug, Clone, Copy)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line: 1 }
    }
}

/// Parses an integer literal from the current token slice.
///
/// Returns `None` when the digits do not fit in an `i64`, which the lexer
/// reports as an error token.
fn parse_integer(lex: &logos::Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}

/// Returns the first character of the current token slice.
fn leading_char(lex: &logos::Lexer<Token>) -> Option<char> {
    lex.slice().chars().next()
}

/// Strips the surrounding quotes from a text literal.
///
/// Literals may span lines, so embedded line breaks are counted.
fn unquote(lex: &mut logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    lex.extras.line += slice.matches('\n').count();
    slice[1..slice.len() - 1].to_string()
}
