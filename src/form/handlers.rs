//! Form event handling for the salary calculator.
//!
//! [`FormSession`] is a two-state machine (awaiting input, closed). Each
//! Calculate event is validated, calculated, announced, and persisted
//! before the next event is read. Input errors and save failures become
//! notifications; only a broken console ends the loop early.

use std::time::Instant;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::calculate_total;
use crate::config::RateTable;
use crate::error::SalaryResult;
use crate::models::{SalaryBreakdown, SalaryRecord};

use super::request::{FormValues, SalaryRequest};
use super::response::Notification;
use super::state::AppState;

/// A trigger from the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// Calculate (and save) using the current field values.
    Calculate(FormValues),
    /// Close the form.
    Exit,
}

/// The session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for the next trigger.
    AwaitingInput,
    /// Closed; no further events are handled.
    Closed,
}

/// Source of form events (the input side of the form).
pub trait FormSource {
    /// Blocks until the user fires the next trigger.
    ///
    /// `rates` lists the positions the form should offer.
    fn next_event(&mut self, rates: &RateTable) -> SalaryResult<FormEvent>;
}

/// Presents notifications (the output side of the form).
pub trait Notifier {
    /// Shows a notification and returns once it has been displayed.
    fn notify(&mut self, notification: &Notification) -> SalaryResult<()>;
}

/// Validates form values and calculates the salary, without any I/O.
///
/// Returns the breakdown and the record built from it. Invalid input
/// yields an error and no record.
pub fn process_calculation(
    rates: &RateTable,
    values: FormValues,
) -> SalaryResult<(SalaryBreakdown, SalaryRecord)> {
    let request = SalaryRequest::try_from(values)?;
    let breakdown = calculate_total(
        rates,
        request.position,
        request.marital_status,
        request.num_children,
    )?;
    let record = SalaryRecord::new(request.name, &breakdown);
    Ok((breakdown, record))
}

/// A running salary form.
#[derive(Debug)]
pub struct FormSession {
    state: AppState,
    session_state: SessionState,
}

impl FormSession {
    /// Creates a session awaiting input.
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            session_state: SessionState::AwaitingInput,
        }
    }

    /// Returns the application state.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Returns the current session state.
    pub fn session_state(&self) -> SessionState {
        self.session_state
    }

    /// Handles one event.
    ///
    /// Returns the saved record for a successful Calculate, `None`
    /// otherwise. Errors are returned only when the notifier itself fails.
    pub fn handle<N: Notifier + ?Sized>(
        &mut self,
        event: FormEvent,
        notifier: &mut N,
    ) -> SalaryResult<Option<SalaryRecord>> {
        if self.session_state == SessionState::Closed {
            debug!("Ignoring event on closed form");
            return Ok(None);
        }

        match event {
            FormEvent::Exit => {
                info!("Form closed");
                self.session_state = SessionState::Closed;
                Ok(None)
            }
            FormEvent::Calculate(values) => self.calculate(values, notifier),
        }
    }

    fn calculate<N: Notifier + ?Sized>(
        &mut self,
        values: FormValues,
        notifier: &mut N,
    ) -> SalaryResult<Option<SalaryRecord>> {
        let correlation_id = Uuid::new_v4();
        info!(correlation_id = %correlation_id, "Processing calculation request");

        let start_time = Instant::now();
        let (breakdown, record) = match process_calculation(self.state.rates(), values) {
            Ok(result) => result,
            Err(err) if err.is_input_error() => {
                info!(
                    correlation_id = %correlation_id,
                    error = %err,
                    "Calculation rejected"
                );
                notifier.notify(&Notification::from(&err))?;
                return Ok(None);
            }
            Err(err) => {
                warn!(
                    correlation_id = %correlation_id,
                    error = %err,
                    "Calculation failed"
                );
                notifier.notify(&Notification::from(&err))?;
                return Ok(None);
            }
        };

        info!(
            correlation_id = %correlation_id,
            position = %breakdown.position,
            marital_status = %breakdown.marital_status,
            num_children = breakdown.num_children,
            total = breakdown.truncated_total,
            duration_us = start_time.elapsed().as_micros(),
            "Calculation completed successfully"
        );
        for step in &breakdown.audit_trace {
            debug!(
                correlation_id = %correlation_id,
                step = step.step_number,
                rule_id = %step.rule_id,
                reasoning = %step.reasoning,
                "Audit step"
            );
        }

        notifier.notify(&Notification::total_salary(
            &record.name,
            record.total_salary,
        ))?;

        match self.state.sink().append(&record) {
            Ok(_) => {
                notifier.notify(&Notification::saved(self.state.sink().path()))?;
                Ok(Some(record))
            }
            Err(err) => {
                warn!(
                    correlation_id = %correlation_id,
                    error = %err,
                    "Failed to save salary record"
                );
                notifier.notify(&Notification::from(&err))?;
                Ok(None)
            }
        }
    }

    /// Runs the form until it is closed.
    ///
    /// Returns the number of records saved.
    pub fn run<F: FormSource + Notifier>(&mut self, form: &mut F) -> SalaryResult<usize> {
        let mut saved = 0;
        while self.session_state == SessionState::AwaitingInput {
            let event = form.next_event(self.state.rates())?;
            if self.handle(event, form)?.is_some() {
                saved += 1;
            }
        }
        Ok(saved)
    }
}
