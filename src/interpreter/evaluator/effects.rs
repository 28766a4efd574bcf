use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        io::Io,
        parser::parse_program,
        value::core::Value,
    },
};

impl<I: Io> Context<I> {
    /// Evaluates `PROMPT`: one line of input without its line terminator, or
    /// `NULL` at end of input.
    pub(super) fn eval_prompt(&mut self) -> EvalResult<Value> {
        let Some(mut line) = self.io.read_line().map_err(RuntimeError::from)? else {
            return Ok(Value::Null);
        };

        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Value::from(line))
    }

    /// Evaluates `EVAL`: parses the operand's text as a program and runs it
    /// against the same environment.
    pub(super) fn eval_text(&mut self, source: &Value) -> EvalResult<Value> {
        let source = source.to_text()?;
        tracing::debug!(source = &*source, "evaluating text");

        let program = parse_program(&source)?;
        self.eval(&program)
    }

    /// Evaluates `` ` ``: runs the operand as a shell command and returns its
    /// standard output.
    pub(super) fn eval_system(&mut self, command: &Value) -> EvalResult<Value> {
        let command = command.to_text()?;
        tracing::debug!(command = &*command, "running shell command");

        let stdout = self.io.system(&command).map_err(RuntimeError::from)?;
        Ok(Value::from(stdout))
    }

    /// Evaluates `OUTPUT`: writes the operand's text form followed by a
    /// newline and returns `NULL`.
    ///
    /// A trailing backslash is not written and suppresses the newline.
    pub(super) fn eval_output(&mut self, operand: &Value) -> EvalResult<Value> {
        let text = operand.to_text()?;

        let written = match text.strip_suffix('\\') {
            Some(text) => self.io.write(text),
            None => self.io.write(&format!("{text}\n")),
        };

        written.map_err(RuntimeError::from)?;
        Ok(Value::Null)
    }

    /// Evaluates `DUMP`: writes the operand's debug rendering on its own line
    /// and returns the operand.
    pub(super) fn eval_dump(&mut self, operand: Value) -> EvalResult<Value> {
        self.io.write(&format!("{}\n", operand.dump())).map_err(RuntimeError::from)?;
        Ok(operand)
    }
}
