use std::{
    collections::{HashMap, VecDeque},
    io::{self, BufRead, Write},
    process::{Command, Stdio},
};

use rand::{Rng, SeedableRng, rngs::StdRng};

/// The side effects a program can perform.
///
/// Every interaction with the outside world (reading input, drawing random
/// numbers, running shell commands and writing output) goes through this
/// trait, so runs can be driven entirely from memory in tests.
pub trait Io {
    /// Reads one line of input, including its line terminator.
    ///
    /// Returns `Ok(None)` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>>;

    /// Returns a pseudo-random non-negative integer.
    fn random(&mut self) -> i64;

    /// Runs `command` in a shell and returns what it wrote to stdout.
    fn system(&mut self, command: &str) -> io::Result<String>;

    /// Writes `text` to the output, exactly as given.
    fn write(&mut self, text: &str) -> io::Result<()>;
}

impl<T: Io + ?Sized> Io for &mut T {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        (**self).read_line()
    }

    fn random(&mut self) -> i64 {
        (**self).random()
    }

    fn system(&mut self, command: &str) -> io::Result<String> {
        (**self).system(command)
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        (**self).write(text)
    }
}

/// Largest value `RANDOM` produces, matching C's `RAND_MAX` on glibc.
pub const RANDOM_MAX: i64 = 0x7fff_ffff;

/// The process's real stdin and stdout, a shell and a seedable generator.
#[derive(Debug)]
pub struct StdIo {
    rng: StdRng,
}

impl StdIo {
    /// Creates collaborators with a generator seeded from the OS.
    #[must_use]
    pub fn new() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    /// Creates collaborators whose `RANDOM` sequence is fixed by `seed`.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for StdIo {
    fn default() -> Self {
        Self::new()
    }
}

impl Io for StdIo {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn random(&mut self) -> i64 {
        self.rng.gen_range(0..=RANDOM_MAX)
    }

    fn system(&mut self, command: &str) -> io::Result<String> {
        let output = Command::new("sh").arg("-c")
                                       .arg(command)
                                       .stdin(Stdio::inherit())
                                       .stderr(Stdio::inherit())
                                       .output()?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()
    }
}

/// In-memory collaborators for driving programs from tests.
///
/// Input lines are served in order, output is collected into a string,
/// `RANDOM` cycles through a fixed list, and shell commands are answered from
/// a table of canned responses.
///
/// # Example
/// ```
/// use knight::interpreter::io::{Io, MemoryIo};
///
/// let mut io = MemoryIo::new().with_input(["first"]).with_command("echo hi", "hi\n");
///
/// assert_eq!(io.read_line().unwrap().as_deref(), Some("first"));
/// assert_eq!(io.read_line().unwrap(), None);
/// assert_eq!(io.system("echo hi").unwrap(), "hi\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryIo {
    input:       VecDeque<String>,
    output:      String,
    random:      Vec<i64>,
    next_random: usize,
    commands:    HashMap<String, String>,
    executed:    Vec<String>,
}

impl MemoryIo {
    /// Creates collaborators with no input, no canned commands and a
    /// `RANDOM` that always returns `0`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues input lines, served one per `PROMPT`.
    #[must_use]
    pub fn with_input<S: Into<String>>(mut self, lines: impl IntoIterator<Item = S>) -> Self {
        self.input.extend(lines.into_iter().map(Into::into));
        self
    }

    /// Sets the values `RANDOM` cycles through.
    #[must_use]
    pub fn with_random(mut self, values: impl IntoIterator<Item = i64>) -> Self {
        self.random = values.into_iter().collect();
        self.next_random = 0;
        self
    }

    /// Registers the stdout a shell command produces.
    #[must_use]
    pub fn with_command(mut self, command: &str, stdout: &str) -> Self {
        self.commands.insert(command.to_string(), stdout.to_string());
        self
    }

    /// Everything written so far.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// The shell commands run so far, in order.
    #[must_use]
    pub fn executed(&self) -> &[String] {
        &self.executed
    }
}

impl Io for MemoryIo {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.input.pop_front())
    }

    fn random(&mut self) -> i64 {
        if self.random.is_empty() {
            return 0;
        }
        let value = self.random[self.next_random % self.random.len()];
        self.next_random += 1;
        value
    }

    fn system(&mut self, command: &str) -> io::Result<String> {
        self.executed.push(command.to_string());
        self.commands.get(command).cloned().ok_or_else(|| {
                                                io::Error::new(io::ErrorKind::NotFound,
                                                               format!("no output registered for `{command}`"))
                                            })
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        self.output.push_str(text);
        Ok(())
    }
}
