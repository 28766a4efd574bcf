use std::rc::Rc;

use crate::interpreter::{opcode::Opcode, value::core::Value};

/// An abstract syntax tree (AST) node representing an expression in the
/// language.
///
/// Every Knight program is a single expression. Nodes are immutable once the
/// parser has built them; operands are reference counted so a `BLOCK` can
/// capture its operand without copying the subtree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value (integer, text, boolean or null).
    Immediate(Value),
    /// Reference to a variable by name.
    Variable(String),
    /// Application of a built-in function.
    ///
    /// The parser guarantees that the operand count equals
    /// [`Opcode::arity`].
    Call(Opcode, Vec<Rc<Self>>),
}

impl Expr {
    /// Builds a call node from owned operands.
    ///
    /// # Example
    /// ```
    /// use knight::{ast::Expr, interpreter::opcode::Opcode};
    ///
    /// let sum = Expr::call(Opcode::Add, [Expr::from(1), Expr::from(2)]);
    /// assert_eq!(sum.to_string(), "+ 1 2");
    /// ```
    #[must_use]
    pub fn call(opcode: Opcode, args: impl IntoIterator<Item = Self>) -> Self {
        let args: Vec<Rc<Self>> = args.into_iter().map(Rc::new).collect();
        debug_assert_eq!(args.len(), opcode.arity(), "{opcode} takes {} operands", opcode.arity());
        Self::Call(opcode, args)
    }

    /// Builds a variable reference.
    #[must_use]
    pub fn variable(name: &str) -> Self {
        Self::Variable(name.to_string())
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Self::Immediate(value)
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Self::Immediate(value.into())
    }
}

impl From<bool> for Expr {
    fn from(value: bool) -> Self {
        Self::Immediate(value.into())
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Self::Immediate(value.into())
    }
}

/// Renders the node back into prefix source form.
///
/// Functions written with a letter use their full name, so the output parses
/// back into an equal tree. The one exception is text holding both kinds of
/// quote, which no literal can spell: it renders as `+` over literals and
/// parses back into an expression producing the same text.
impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Immediate(Value::Null) => write!(f, "NULL"),
            Self::Immediate(Value::Boolean(b)) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            Self::Immediate(Value::Integer(n)) => write!(f, "{n}"),
            Self::Immediate(Value::Text(text)) => write_text(f, text),
            Self::Immediate(Value::Block(body)) => write!(f, "BLOCK {body}"),
            Self::Variable(name) => write!(f, "{name}"),
            Self::Call(opcode, args) => {
                if opcode.symbol().is_ascii_uppercase() {
                    write!(f, "{}", opcode.name())?;
                } else {
                    write!(f, "{}", opcode.symbol())?;
                }

                for arg in args {
                    write!(f, " {arg}")?;
                }

                Ok(())
            },
        }
    }
}

/// Writes `text` as a quoted literal.
///
/// Text containing both `"` and `'` is split into pieces that each need only
/// one kind of quote, joined by `+`.
fn write_text(f: &mut std::fmt::Formatter<'_>, text: &str) -> std::fmt::Result {
    let mut pieces = Vec::new();
    let mut start = 0;
    let (mut double, mut single) = (false, false);

    for (index, c) in text.char_indices() {
        match c {
            '"' if single => {
                pieces.push(&text[start..index]);
                start = index;
                (double, single) = (true, false);
            },
            '\'' if double => {
                pieces.push(&text[start..index]);
                start = index;
                (double, single) = (false, true);
            },
            '"' => double = true,
            '\'' => single = true,
            _ => {},
        }
    }
    pieces.push(&text[start..]);

    for _ in 1..pieces.len() {
        write!(f, "+ ")?;
    }
    for (i, piece) in pieces.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        if piece.contains('"') {
            write!(f, "'{piece}'")?;
        } else {
            write!(f, "\"{piece}\"")?;
        }
    }
    Ok(())
}
