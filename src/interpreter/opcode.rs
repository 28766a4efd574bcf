use crate::error::ParseError;

/// Width of the code range reserved for each arity class.
pub const ARITY_STRIDE: u8 = 32;
/// Largest number of operands any function takes.
pub const MAX_ARITY: usize = 4;

/// A built-in function of the language.
///
/// Each discriminant is the function's code. Codes are packed into
/// contiguous ranges of width [`ARITY_STRIDE`], one range per arity, so the
/// arity is `code / 32` and never stored separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    /// `P`: reads a line of input.
    Prompt = 0,
    /// `R`: returns a pseudo-random non-negative integer.
    Random = 1,

    /// `E`: parses and runs text as a program.
    Eval = 32,
    /// `B`: defers its operand.
    Block = 33,
    /// `C`: runs a block.
    Call = 34,
    /// `` ` ``: runs a shell command and returns its output.
    System = 35,
    /// `Q`: stops the program with an exit code.
    Quit = 36,
    /// `!`: logical negation.
    Not = 37,
    /// `L`: length of the text form of a value.
    Length = 38,
    /// `D`: writes a debug rendering of a value.
    Dump = 39,
    /// `O`: writes the text form of a value.
    Output = 40,
    /// `A`: converts between integers and single characters.
    Ascii = 41,
    /// `~`: arithmetic negation.
    Negate = 42,

    /// `+`
    Add = 64,
    /// `-`
    Sub = 65,
    /// `*`
    Mul = 66,
    /// `/`
    Div = 67,
    /// `%`
    Mod = 68,
    /// `^`
    Pow = 69,
    /// `<`
    Lth = 70,
    /// `>`
    Gth = 71,
    /// `?`
    Eql = 72,
    /// `&`
    And = 73,
    /// `|`
    Or = 74,
    /// `;`
    Then = 75,
    /// `=`
    Assign = 76,
    /// `W`
    While = 77,

    /// `I`
    If = 96,
    /// `G`: substring.
    Get = 97,

    /// `S`: substring replacement.
    Set = 128,
}

impl Opcode {
    /// Every registered function, in code order.
    pub const ALL: [Self; 30] = [Self::Prompt,
                                 Self::Random,
                                 Self::Eval,
                                 Self::Block,
                                 Self::Call,
                                 Self::System,
                                 Self::Quit,
                                 Self::Not,
                                 Self::Length,
                                 Self::Dump,
                                 Self::Output,
                                 Self::Ascii,
                                 Self::Negate,
                                 Self::Add,
                                 Self::Sub,
                                 Self::Mul,
                                 Self::Div,
                                 Self::Mod,
                                 Self::Pow,
                                 Self::Lth,
                                 Self::Gth,
                                 Self::Eql,
                                 Self::And,
                                 Self::Or,
                                 Self::Then,
                                 Self::Assign,
                                 Self::While,
                                 Self::If,
                                 Self::Get,
                                 Self::Set];

    /// Looks up the function registered under `symbol`.
    ///
    /// # Errors
    /// Returns `ParseError::UnknownFunction` if nothing is registered under
    /// `symbol`.
    ///
    /// # Example
    /// ```
    /// use knight::interpreter::opcode::Opcode;
    ///
    /// assert_eq!(Opcode::lookup('+', 1).unwrap(), Opcode::Add);
    /// assert!(Opcode::lookup('@', 1).is_err());
    /// ```
    pub fn lookup(symbol: char, line: usize) -> Result<Self, ParseError> {
        Ok(match symbol {
            'P' => Self::Prompt,
            'R' => Self::Random,
            'E' => Self::Eval,
            'B' => Self::Block,
            'C' => Self::Call,
            '`' => Self::System,
            'Q' => Self::Quit,
            '!' => Self::Not,
            'L' => Self::Length,
            'D' => Self::Dump,
            'O' => Self::Output,
            'A' => Self::Ascii,
            '~' => Self::Negate,
            '+' => Self::Add,
            '-' => Self::Sub,
            '*' => Self::Mul,
            '/' => Self::Div,
            '%' => Self::Mod,
            '^' => Self::Pow,
            '<' => Self::Lth,
            '>' => Self::Gth,
            '?' => Self::Eql,
            '&' => Self::And,
            '|' => Self::Or,
            ';' => Self::Then,
            '=' => Self::Assign,
            'W' => Self::While,
            'I' => Self::If,
            'G' => Self::Get,
            'S' => Self::Set,
            other => {
                return Err(ParseError::UnknownFunction { token: other.to_string(),
                                                         line });
            },
        })
    }

    /// The numeric code of the function.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Number of operands the function consumes, derived from its code.
    ///
    /// # Example
    /// ```
    /// use knight::interpreter::opcode::Opcode;
    ///
    /// assert_eq!(Opcode::Random.arity(), 0);
    /// assert_eq!(Opcode::If.arity(), 3);
    /// assert_eq!(Opcode::Set.arity(), 4);
    /// ```
    #[must_use]
    pub const fn arity(self) -> usize {
        (self.code() / ARITY_STRIDE) as usize
    }

    /// The character the function is written with.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Prompt => 'P',
            Self::Random => 'R',
            Self::Eval => 'E',
            Self::Block => 'B',
            Self::Call => 'C',
            Self::System => '`',
            Self::Quit => 'Q',
            Self::Not => '!',
            Self::Length => 'L',
            Self::Dump => 'D',
            Self::Output => 'O',
            Self::Ascii => 'A',
            Self::Negate => '~',
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
            Self::Mod => '%',
            Self::Pow => '^',
            Self::Lth => '<',
            Self::Gth => '>',
            Self::Eql => '?',
            Self::And => '&',
            Self::Or => '|',
            Self::Then => ';',
            Self::Assign => '=',
            Self::While => 'W',
            Self::If => 'I',
            Self::Get => 'G',
            Self::Set => 'S',
        }
    }

    /// The spelled-out name of the function, used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Prompt => "PROMPT",
            Self::Random => "RANDOM",
            Self::Eval => "EVAL",
            Self::Block => "BLOCK",
            Self::Call => "CALL",
            Self::System => "SYSTEM",
            Self::Quit => "QUIT",
            Self::Not => "NOT",
            Self::Length => "LENGTH",
            Self::Dump => "DUMP",
            Self::Output => "OUTPUT",
            Self::Ascii => "ASCII",
            Self::Negate => "NEGATE",
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
            Self::Div => "DIV",
            Self::Mod => "MOD",
            Self::Pow => "POW",
            Self::Lth => "LTH",
            Self::Gth => "GTH",
            Self::Eql => "EQL",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Then => "THEN",
            Self::Assign => "ASSIGN",
            Self::While => "WHILE",
            Self::If => "IF",
            Self::Get => "GET",
            Self::Set => "SET",
        }
    }

    /// Bit `i` is set when operand `i` is handed to the function unevaluated.
    const fn lazy_operands(self) -> u8 {
        match self {
            Self::Block | Self::Assign => 0b0001,
            Self::And | Self::Or => 0b0010,
            Self::While => 0b0011,
            Self::If => 0b0110,
            _ => 0,
        }
    }

    /// Returns `true` if operand `position` is evaluated before the function
    /// runs.
    ///
    /// # Example
    /// ```
    /// use knight::interpreter::opcode::Opcode;
    ///
    /// assert!(Opcode::And.is_eager(0));
    /// assert!(!Opcode::And.is_eager(1));
    /// assert!(!Opcode::Block.is_eager(0));
    /// ```
    #[must_use]
    pub const fn is_eager(self, position: usize) -> bool {
        position < self.arity() && self.lazy_operands() & (1 << position) == 0
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
