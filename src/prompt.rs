use crate::error::LoadError;
use std::io::{self, BufRead, Write};

/// Question/answer capability supplied by the caller. The engine never
/// talks to the terminal itself.
pub trait Prompt {
    /// Asks `question` and returns the trimmed answer, `None` once input is
    /// exhausted.
    fn ask(&mut self, question: &str) -> io::Result<Option<String>>;

    /// Shows a message that needs no answer.
    fn tell(&mut self, message: &str);
}

/// Prompts on stdout, reads answers from stdin.
#[derive(Debug, Default)]
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout();
        write!(stdout, "{}", question)?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn tell(&mut self, message: &str) {
        println!("{}", message);
    }
}

/// Asks a question offering `default`, which is returned for an empty
/// answer. Closed input is an `UnexpectedEof` error.
pub fn ask_with_default(
    prompt: &mut dyn Prompt,
    question: &str,
    default: &str,
) -> io::Result<String> {
    match prompt.ask(&format!("{} [{}]: ", question, default))? {
        Some(answer) if answer.is_empty() => Ok(default.to_string()),
        Some(answer) => Ok(answer),
        None => Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed")),
    }
}

/// Yes/no question. Answers starting with `y` or `s` count as yes.
pub fn ask_yes_no(prompt: &mut dyn Prompt, question: &str, default: bool) -> io::Result<bool> {
    let default = if default { "y" } else { "n" };
    let answer = ask_with_default(prompt, &format!("{} (y/n)", question), default)?;
    Ok(matches!(
        answer.to_lowercase().chars().next(),
        Some('y') | Some('s')
    ))
}

/// Asks until the answer parses as `T`, falling back to `default` for an
/// empty answer.
pub fn ask_parsed<T>(prompt: &mut dyn Prompt, question: &str, default: T) -> io::Result<T>
where
    T: std::str::FromStr + std::fmt::Display,
{
    loop {
        let answer = ask_with_default(prompt, question, &default.to_string())?;
        match answer.parse() {
            Ok(value) => return Ok(value),
            Err(_) => prompt.tell(&format!("'{}' is not a valid value, try again.", answer)),
        }
    }
}

/// Picks the capacity of a problem.
///
/// A positive capacity from the file wins, then the caller's value. When
/// both are missing and a prompt is available the user is asked until they
/// give a positive integer; an empty answer or closed input cancels.
pub fn resolve_capacity(
    from_file: Option<u64>,
    provided: Option<u64>,
    prompt: Option<&mut dyn Prompt>,
) -> Result<u64, LoadError> {
    if let Some(capacity) = from_file.filter(|&capacity| capacity > 0).or(provided) {
        return Ok(capacity);
    }

    let Some(prompt) = prompt else {
        return Err(LoadError::MissingCapacity);
    };

    loop {
        let answer = prompt
            .ask("The file has no 'capacity'. Enter the capacity (maximum weight) as an integer: ")
            .map_err(LoadError::Prompt)?;

        let answer = match answer {
            Some(answer) if !answer.is_empty() => answer,
            _ => return Err(LoadError::Cancelled),
        };

        match answer.parse::<i64>() {
            Ok(capacity) if capacity > 0 => return Ok(capacity as u64),
            Ok(_) => prompt.tell("The capacity must be a positive integer. Try again."),
            Err(_) => prompt.tell("Invalid value. Enter a positive integer."),
        }
    }
}

/// Prompt replaying canned answers, for driving interactive code in tests.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: std::collections::VecDeque<String>,
    pub questions: Vec<String>,
    pub messages: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        self.questions.push(question.to_string());
        Ok(self.answers.pop_front())
    }

    fn tell(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}
