//! Interactive prompts.
//!
//! Questions are plain data: a [`Question`] names its prompt text, the kind
//! of answer it expects, an optional default and an optional validator. A
//! single loop, [`ask`], shows any question through a [`Prompter`], applies
//! the default to an empty answer and re-asks until the validator accepts.
//! A question can also carry a [`Tone`] its prompt is painted with.
//!
//! Two prompters are provided:
//!
//! - [`TerminalPrompter`] uses `dialoguer` and is picked when stdin is a
//!   terminal. Secret answers are read without echo.
//! - [`LinePrompter`] reads one line per answer from any reader and is
//!   picked when input is piped. End of input is an error rather than an
//!   endless re-ask.

use std::io::{self, BufRead, Write};

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Password};

use crate::error::{Error, Result};
use crate::output::{paint, OutputConfig, Tone};

/// Checks an answer, returning the message to show when it is rejected.
pub type Validator = fn(&str) -> std::result::Result<(), String>;

/// What kind of answer a question expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerKind {
    Text,
    /// Only `y` (any case) counts as yes.
    YesNo,
    /// Read without echo where possible.
    Secret,
}

/// One step of an interactive flow.
#[derive(Clone, Copy)]
pub struct Question {
    pub key: &'static str,
    pub prompt: &'static str,
    pub kind: AnswerKind,
    pub default: Option<&'static str>,
    pub validate: Option<Validator>,
    pub tone: Option<Tone>,
}

impl Question {
    pub const fn text(key: &'static str, prompt: &'static str) -> Self {
        Self {
            key,
            prompt,
            kind: AnswerKind::Text,
            default: None,
            validate: None,
            tone: None,
        }
    }

    pub const fn yes_no(key: &'static str, prompt: &'static str) -> Self {
        Self {
            kind: AnswerKind::YesNo,
            ..Self::text(key, prompt)
        }
    }

    pub const fn secret(key: &'static str, prompt: &'static str) -> Self {
        Self {
            kind: AnswerKind::Secret,
            ..Self::text(key, prompt)
        }
    }

    pub const fn with_default(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }

    pub const fn with_validator(mut self, validate: Validator) -> Self {
        self.validate = Some(validate);
        self
    }

    pub const fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = Some(tone);
        self
    }

    /// The prompt text, painted with the question's tone if it has one.
    pub fn styled_prompt(&self, config: &OutputConfig) -> String {
        match self.tone {
            Some(tone) => paint(config, tone, self.prompt),
            None => self.prompt.to_string(),
        }
    }
}

/// Something that can put a question to the user.
pub trait Prompter {
    /// Read a visible answer. The question's default is only a hint here;
    /// [`ask`] applies it.
    fn input(&mut self, question: &Question) -> Result<String>;

    /// Read an answer that must not be echoed.
    fn secret(&mut self, question: &Question) -> Result<String>;

    /// Tell the user why an answer was rejected.
    fn reject(&mut self, message: &str);
}

/// Rejects empty answers.
pub fn non_empty(answer: &str) -> std::result::Result<(), String> {
    if answer.is_empty() {
        Err("A value is required.".to_string())
    } else {
        Ok(())
    }
}

/// Whether an answer to a yes/no question means yes.
pub fn is_yes(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

/// Ask `question` until it gets an acceptable answer.
///
/// The answer is trimmed; an empty answer takes the question's default.
pub fn ask(prompter: &mut dyn Prompter, question: &Question) -> Result<String> {
    loop {
        let raw = match question.kind {
            AnswerKind::Secret => prompter.secret(question)?,
            AnswerKind::Text | AnswerKind::YesNo => prompter.input(question)?,
        };

        let mut answer = raw.trim().to_string();
        if answer.is_empty() {
            if let Some(default) = question.default {
                answer = default.to_string();
            }
        }

        match question.validate.map(|validate| validate(&answer)) {
            Some(Err(message)) => {
                log::debug!("answer to '{}' rejected: {}", question.key, message);
                prompter.reject(&message);
            }
            _ => return Ok(answer),
        }
    }
}

/// Ask a yes/no question; anything other than `y` is no.
pub fn ask_yes_no(prompter: &mut dyn Prompter, question: &Question) -> Result<bool> {
    Ok(is_yes(&ask(prompter, question)?))
}

/// Prompter backed by `dialoguer`, for interactive terminals.
pub struct TerminalPrompter {
    theme: ColorfulTheme,
    config: OutputConfig,
}

impl TerminalPrompter {
    pub fn new(config: OutputConfig) -> Self {
        Self {
            theme: ColorfulTheme::default(),
            config,
        }
    }
}

impl Prompter for TerminalPrompter {
    fn input(&mut self, question: &Question) -> Result<String> {
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(question.styled_prompt(&self.config))
            .allow_empty(true);
        if let Some(default) = question.default {
            input = input.default(default.to_string()).show_default(true);
        }
        Ok(input.interact_text()?)
    }

    fn secret(&mut self, question: &Question) -> Result<String> {
        Ok(Password::with_theme(&self.theme)
            .with_prompt(question.styled_prompt(&self.config))
            .interact()?)
    }

    fn reject(&mut self, message: &str) {
        eprintln!("{}", message);
    }
}

/// Prompter reading one answer per line, for piped input.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
    config: OutputConfig,
}

impl LinePrompter<io::StdinLock<'static>, io::Stdout> {
    /// Read answers from stdin and write prompts to stdout.
    pub fn stdio(config: OutputConfig) -> Self {
        Self::new(io::stdin().lock(), io::stdout(), config)
    }
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W, config: OutputConfig) -> Self {
        Self {
            input,
            output,
            config,
        }
    }

    fn read_answer(&mut self, question: &Question, default: Option<&str>) -> Result<String> {
        let prompt = question.styled_prompt(&self.config);
        match default {
            Some(default) => write!(self.output, "{} [{}]: ", prompt, default)?,
            None => write!(self.output, "{}: ", prompt)?,
        }
        self.output.flush()?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        // Piped answers are not echoed, so end the prompt line ourselves
        writeln!(self.output)?;
        if read == 0 {
            return Err(Error::InputClosed {
                question: question.prompt.to_string(),
            });
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn input(&mut self, question: &Question) -> Result<String> {
        self.read_answer(question, question.default)
    }

    fn secret(&mut self, question: &Question) -> Result<String> {
        self.read_answer(question, None)
    }

    fn reject(&mut self, message: &str) {
        let _ = writeln!(self.output, "{}", message);
    }
}
