//! Console front end for the salary form.
//!
//! Prompts for the four fields on one stream and prints notifications as
//! framed boxes on another. End of input closes the form.

use std::io::{BufRead, Write};

use crate::config::RateTable;
use crate::error::SalaryResult;
use crate::models::MaritalStatus;

use super::handlers::{FormEvent, FormSource, Notifier};
use super::request::FormValues;
use super::response::Notification;

/// Upper end of the suggested child-count range shown in the prompt.
const SUGGESTED_MAX_CHILDREN: u32 = 15;

/// A line-oriented console form.
///
/// # Example
///
/// ```
/// use salary_calculator::config::RateTable;
/// use salary_calculator::form::{ConsoleForm, FormEvent, FormSource};
/// use std::io::Cursor;
///
/// let input = Cursor::new("Ani\nStaff\nSingle\n0\nc\n");
/// let mut form = ConsoleForm::new(input, Vec::new());
/// let event = form.next_event(&RateTable::default()).unwrap();
/// assert!(matches!(event, FormEvent::Calculate(_)));
/// ```
pub struct ConsoleForm<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleForm<R, W> {
    /// Creates a console form reading from `input` and writing to `output`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consumes the form, returning the output stream.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Prints a prompt and reads one line. `None` means end of input.
    fn prompt(&mut self, label: &str) -> SalaryResult<Option<String>> {
        write!(self.output, "{}: ", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Reads the trigger, re-prompting on anything unrecognised.
    fn read_trigger(&mut self) -> SalaryResult<Option<bool>> {
        loop {
            let Some(answer) = self.prompt("[C]alculate or E[x]it")? else {
                return Ok(None);
            };
            match answer.trim().to_ascii_lowercase().as_str() {
                "" | "c" | "calculate" => return Ok(Some(true)),
                "x" | "exit" | "q" | "quit" => return Ok(Some(false)),
                _ => writeln!(self.output, "Please answer 'c' or 'x'.")?,
            }
        }
    }
}

impl<R: BufRead, W: Write> FormSource for ConsoleForm<R, W> {
    fn next_event(&mut self, rates: &RateTable) -> SalaryResult<FormEvent> {
        let positions = rates
            .positions()
            .iter()
            .map(|p| p.label())
            .collect::<Vec<_>>()
            .join("/");
        let statuses = MaritalStatus::ALL
            .iter()
            .map(|s| s.label())
            .collect::<Vec<_>>()
            .join("/");

        writeln!(self.output)?;
        writeln!(self.output, "== Salary Calculator ==")?;

        let Some(name) = self.prompt("Name")? else {
            return Ok(FormEvent::Exit);
        };
        let Some(position) = self.prompt(&format!("Position [{}]", positions))? else {
            return Ok(FormEvent::Exit);
        };
        let Some(marital_status) = self.prompt(&format!("Marital Status [{}]", statuses))? else {
            return Ok(FormEvent::Exit);
        };
        let Some(mut num_children) = self.prompt(&format!(
            "Number of Children (0-{}) [0]",
            SUGGESTED_MAX_CHILDREN
        ))?
        else {
            return Ok(FormEvent::Exit);
        };
        if num_children.trim().is_empty() {
            num_children = "0".to_string();
        }

        match self.read_trigger()? {
            Some(true) => Ok(FormEvent::Calculate(FormValues {
                name,
                position,
                marital_status,
                num_children,
            })),
            Some(false) | None => Ok(FormEvent::Exit),
        }
    }
}

impl<R: BufRead, W: Write> Notifier for ConsoleForm<R, W> {
    fn notify(&mut self, notification: &Notification) -> SalaryResult<()> {
        let marker = if notification.is_error() { "!" } else { "*" };
        let mut lines = vec![notification.message.clone()];
        if let Some(details) = &notification.details {
            lines.push(details.clone());
        }
        let width = lines
            .iter()
            .map(|l| l.chars().count())
            .chain(std::iter::once(notification.title.chars().count() + 4))
            .max()
            .unwrap_or(0);

        writeln!(self.output)?;
        writeln!(self.output, "+{}+", "-".repeat(width + 2))?;
        writeln!(
            self.output,
            "| {:<width$} |",
            format!("{} {} {}", marker, notification.title, marker),
            width = width
        )?;
        writeln!(self.output, "+{}+", "-".repeat(width + 2))?;
        for line in &lines {
            writeln!(self.output, "| {:<width$} |", line, width = width)?;
        }
        writeln!(self.output, "+{}+", "-".repeat(width + 2))?;
        self.output.flush()?;
        Ok(())
    }
}
