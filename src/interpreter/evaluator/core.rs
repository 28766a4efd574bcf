use std::rc::Rc;

use crate::{
    ast::Expr,
    error::{Error, ParseError, RuntimeError},
    interpreter::{
        environment::Environment,
        io::Io,
        opcode::{MAX_ARITY, Opcode},
        parser::parse_program,
        value::core::Value,
    },
    util::num::exit_status,
};

/// Why evaluation stopped before producing a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unwind {
    /// `QUIT` was evaluated. This is not a failure and is never intercepted by
    /// error handling; it carries the process exit status.
    Quit(i32),
    /// Parsing or evaluation failed.
    Error(Error),
}

impl From<Error> for Unwind {
    fn from(error: Error) -> Self {
        Self::Error(error)
    }
}

impl From<RuntimeError> for Unwind {
    fn from(error: RuntimeError) -> Self {
        Self::Error(Error::Runtime(error))
    }
}

impl From<ParseError> for Unwind {
    fn from(error: ParseError) -> Self {
        Self::Error(Error::Syntax(error))
    }
}

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or the
/// [`Unwind`] that cut evaluation short.
pub type EvalResult<T> = Result<T, Unwind>;

/// How a program run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// The program evaluated to a value.
    Finished(Value),
    /// The program called `QUIT` with this exit status.
    Quit(i32),
}

/// Stores the runtime evaluation context.
///
/// This struct holds the state of one program run: the variable namespace
/// and the collaborators that perform side effects. Every evaluation method
/// takes the context explicitly, so independent runs in the same process
/// never share state.
pub struct Context<I: Io> {
    /// Variables assigned so far.
    pub env: Environment,
    /// Input, output, randomness and shell access.
    pub io:  I,
}

impl<I: Io> Context<I> {
    /// Creates a context with an empty environment.
    #[must_use]
    pub fn new(io: I) -> Self {
        Self { env: Environment::new(),
               io }
    }

    /// Creates a context around existing variable bindings.
    #[must_use]
    pub const fn with_environment(env: Environment, io: I) -> Self {
        Self { env, io }
    }

    /// Parses and runs `source` in this context.
    ///
    /// # Errors
    /// Returns the syntax or runtime error that ended the run. `QUIT` is
    /// reported as [`Completion::Quit`], not as an error.
    pub fn run(&mut self, source: &str) -> Result<Completion, Error> {
        let program = parse_program(source)?;
        self.execute(&program)
    }

    /// Runs an already parsed program in this context.
    ///
    /// # Errors
    /// Returns the runtime error that ended the run.
    pub fn execute(&mut self, program: &Expr) -> Result<Completion, Error> {
        match self.eval(program) {
            Ok(value) => Ok(Completion::Finished(value)),
            Err(Unwind::Quit(status)) => {
                tracing::debug!(status, "program quit");
                Ok(Completion::Quit(status))
            },
            Err(Unwind::Error(error)) => Err(error),
        }
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// Immediates evaluate to themselves, variables to their binding, and
    /// calls are dispatched on their opcode.
    ///
    /// # Errors
    /// Returns `Unwind::Error` for runtime failures and `Unwind::Quit` when
    /// the program quits.
    pub fn eval(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Immediate(value) => Ok(value.clone()),
            Expr::Variable(name) => Ok(self.env.lookup(name)?.clone()),
            Expr::Call(opcode, args) => self.eval_call(*opcode, args),
        }
    }

    /// Evaluates a call.
    ///
    /// Operands the opcode marks as eager are evaluated first, left to right.
    /// The rest are handed to the opcode's implementation as nodes, which
    /// decides whether and how often to evaluate them.
    fn eval_call(&mut self, opcode: Opcode, args: &[Rc<Expr>]) -> EvalResult<Value> {
        use Opcode::{
            Add, And, Ascii, Assign, Block, Call, Div, Dump, Eql, Eval, Get, Gth, If, Length, Lth,
            Mod, Mul, Negate, Not, Or, Output, Pow, Prompt, Quit, Random, Set, Sub, System, Then,
            While,
        };

        debug_assert_eq!(args.len(), opcode.arity());

        let mut operands: [Value; MAX_ARITY] = Default::default();
        for (position, arg) in args.iter().enumerate() {
            if opcode.is_eager(position) {
                operands[position] = self.eval(arg)?;
            }
        }
        let [a, b, c, d] = operands;

        match opcode {
            Prompt => self.eval_prompt(),
            Random => Ok(Value::Integer(self.io.random())),

            Eval => self.eval_text(&a),
            Block => Ok(Value::Block(Rc::clone(&args[0]))),
            Call => self.eval_block_call(&a),
            System => self.eval_system(&a),
            Quit => Err(Unwind::Quit(exit_status(a.to_integer()?))),
            Not => Ok(Value::Boolean(!a.to_boolean()?)),
            Length => Ok(Self::eval_length(&a)?),
            Dump => self.eval_dump(a),
            Output => self.eval_output(&a),
            Ascii => Ok(Self::eval_ascii(&a)?),
            Negate => Ok(Self::eval_negate(&a)?),

            Add | Sub | Mul | Div | Mod | Pow => Ok(Self::eval_arithmetic(opcode, &a, &b)?),
            Lth | Gth => Ok(Self::eval_comparison(opcode, &a, &b)?),
            Eql => Ok(Value::Boolean(a == b)),
            And => {
                if a.to_boolean()? {
                    self.eval(&args[1])
                } else {
                    Ok(a)
                }
            },
            Or => {
                if a.to_boolean()? {
                    Ok(a)
                } else {
                    self.eval(&args[1])
                }
            },
            Then => Ok(b),
            Assign => self.eval_assign(&args[0], b),
            While => self.eval_while(&args[0], &args[1]),

            If => {
                let branch = if a.to_boolean()? { &args[1] } else { &args[2] };
                self.eval(branch)
            },
            Get => Ok(Self::eval_get(&a, &b, &c)?),

            Set => Ok(Self::eval_set(&a, &b, &c, &d)?),
        }
    }

    /// Binds the variable named by `target` to `value` and returns `value`.
    ///
    /// # Errors
    /// Returns `RuntimeError::TypeMismatch` if `target` is not a variable.
    fn eval_assign(&mut self, target: &Expr, value: Value) -> EvalResult<Value> {
        let Expr::Variable(name) = target else {
            return Err(RuntimeError::TypeMismatch { details: format!("cannot assign to `{target}`") }.into());
        };

        tracing::trace!(name = name.as_str(), %value, "assign");
        self.env.assign(name, value.clone());
        Ok(value)
    }

    /// Runs `body` for as long as `condition` is truthy, then returns `NULL`.
    ///
    /// Both nodes are evaluated afresh on every iteration.
    fn eval_while(&mut self, condition: &Expr, body: &Expr) -> EvalResult<Value> {
        while self.eval(condition)?.to_boolean()? {
            self.eval(body)?;
        }
        Ok(Value::Null)
    }

    /// Runs the expression captured by a block.
    ///
    /// # Errors
    /// Returns `RuntimeError::TypeMismatch` if `callee` is not a block.
    fn eval_block_call(&mut self, callee: &Value) -> EvalResult<Value> {
        let Value::Block(body) = callee else {
            return Err(RuntimeError::TypeMismatch { details: format!("cannot CALL a {}",
                                                                     callee.type_name()) }.into());
        };

        tracing::trace!(%body, "call");
        let body = Rc::clone(body);
        self.eval(&body)
    }
}
