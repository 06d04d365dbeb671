//! Scripted cart sessions read from CSV.
//!
//! A session file has the header `action,value` and one command per row:
//!
//! ```text
//! action,value
//! observe,Alice
//! add,Product A
//! remove,Product A
//! pay,credit
//! ```
//!
//! Malformed rows are logged at warn level and skipped. An unknown payment
//! tag aborts the session.

use crate::cart::CartHandle;
use crate::error::{CartError, Result};
use crate::notification::{SharedWriter, UserNotification};
use crate::payment::create_payment_method;
use csv::{ReaderBuilder, Trim};
use log::{debug, warn};
use serde::Deserialize;
use std::io::Read;
use std::sync::{Arc, PoisonError};

/// Raw session row as read from CSV.
#[derive(Debug, Deserialize)]
pub struct SessionRecord {
    /// Command name: observe, add, remove, pay
    pub action: String,

    /// Sink name, item or payment tag depending on the action
    pub value: Option<String>,
}

impl SessionRecord {
    /// Parses the raw record into a typed command.
    ///
    /// The action is checked before the value, so an unknown action is
    /// reported as such even when its value is empty too.
    pub fn parse(&self, row: u64) -> Result<SessionCommand> {
        let action = self.action.trim().to_lowercase();
        let command: fn(String) -> SessionCommand = match action.as_str() {
            "observe" => SessionCommand::Observe,
            "add" => SessionCommand::Add,
            "remove" => SessionCommand::Remove,
            "pay" => SessionCommand::Pay,
            _ => {
                return Err(CartError::InvalidRecord {
                    row,
                    message: format!("unknown action '{}'", action),
                })
            }
        };

        match self.value.as_deref().map(str::trim) {
            Some(v) if !v.is_empty() => Ok(command(v.to_string())),
            _ => Err(CartError::InvalidRecord {
                row,
                message: format!("missing value for action '{}'", action),
            }),
        }
    }
}

/// A parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Register a notification sink with this name.
    Observe(String),

    /// Add an item to the cart.
    Add(String),

    /// Remove the first occurrence of an item from the cart.
    Remove(String),

    /// Build a payment method from this tag and process it.
    Pay(String),
}

/// Replays commands against a cart, rendering all output to one writer.
///
/// The session owns the sinks it registers, so they stay subscribed for as
/// long as the session lives.
pub struct Session {
    cart: CartHandle,
    out: SharedWriter,
    sinks: Vec<Arc<UserNotification>>,

    /// Lines of records that were logged and skipped.
    skipped_rows: Vec<u64>,
}

impl Session {
    pub fn new(cart: CartHandle, out: SharedWriter) -> Self {
        Session {
            cart,
            out,
            sinks: Vec::new(),
            skipped_rows: Vec::new(),
        }
    }

    /// The cart this session drives.
    pub fn cart(&self) -> &CartHandle {
        &self.cart
    }

    /// Names of the sinks registered by this session, in order.
    pub fn sink_names(&self) -> Vec<&str> {
        self.sinks.iter().map(|s| s.name()).collect()
    }

    /// Starting lines (1-indexed, header = 1) of the rows skipped so far.
    pub fn skipped_rows(&self) -> &[u64] {
        &self.skipped_rows
    }

    /// Runs every command in a CSV session.
    ///
    /// Rows are numbered by the line they start on, so a quoted value that
    /// spans lines does not shift the numbers of later rows.
    pub fn run_csv<R: Read>(&mut self, reader: R) -> Result<()> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();

        for result in csv_reader.records() {
            let raw = match result {
                Ok(raw) => raw,
                Err(e) => {
                    let row = e.position().map_or(0, |p| p.line());
                    warn!("Row {}: CSV parse error: {}", row, e);
                    self.skipped_rows.push(row);
                    continue;
                }
            };
            let row = raw.position().map_or(0, |p| p.line());

            let parsed = raw
                .deserialize::<SessionRecord>(Some(&headers))
                .map_err(CartError::from)
                .and_then(|record| record.parse(row));

            match parsed {
                Ok(command) => self.execute(command)?,
                Err(e) => {
                    warn!("Row {}: {}", row, e);
                    self.skipped_rows.push(row);
                }
            }
        }

        if !self.skipped_rows.is_empty() {
            debug!("Skipped {} malformed row(s)", self.skipped_rows.len());
        }

        Ok(())
    }

    /// Executes a single command.
    ///
    /// Only an invalid payment tag or an output failure is an error.
    pub fn execute(&mut self, command: SessionCommand) -> Result<()> {
        match command {
            SessionCommand::Observe(name) => {
                debug!("Registering sink {:?}", name);
                let sink = Arc::new(UserNotification::with_writer(name, self.out.clone()));
                self.cart.add_observer(&sink);
                self.sinks.push(sink);
            }
            SessionCommand::Add(item) => self.cart.add_item(item),
            SessionCommand::Remove(item) => {
                self.cart.remove_item(&item);
            }
            SessionCommand::Pay(tag) => {
                let method = create_payment_method(&tag)?;
                let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
                method.process_payment_to(&mut *out)?;
            }
        }

        Ok(())
    }
}
