//! Named notification sinks that render cart events as text lines.

use crate::cart::{CartAction, CartObserver};
use log::warn;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

/// A writer that several sinks (and payment output) can share.
pub type SharedWriter = Arc<Mutex<dyn Write + Send>>;

/// Returns a [`SharedWriter`] over standard output.
pub fn stdout_writer() -> SharedWriter {
    Arc::new(Mutex::new(io::stdout()))
}

/// A user who wants to hear about cart changes.
///
/// Each update renders one line:
///
/// ```text
/// Alice received a notification: Item Product A added. Cart: Product A
/// ```
pub struct UserNotification {
    name: String,
    out: SharedWriter,
}

impl UserNotification {
    /// Creates a sink that writes to standard output.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_writer(name, stdout_writer())
    }

    /// Creates a sink that writes to the given shared writer.
    pub fn with_writer(name: impl Into<String>, out: SharedWriter) -> Self {
        UserNotification {
            name: name.into(),
            out,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Formats the line rendered for an update.
    pub fn render(&self, item: &str, action: CartAction, items: &[String]) -> String {
        format!(
            "{} received a notification: Item {} {}. Cart: {}",
            self.name,
            item,
            action,
            items.join(",")
        )
    }
}

impl CartObserver for UserNotification {
    fn update(&self, item: &str, action: CartAction, items: &[String]) {
        let line = self.render(item, action, items);
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(out, "{}", line) {
            warn!("{}: failed to write notification: {}", self.name, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture() -> (Arc<Mutex<Vec<u8>>>, SharedWriter) {
        let buffer = Arc::new(Mutex::new(Vec::<u8>::new()));
        let writer: SharedWriter = buffer.clone();
        (buffer, writer)
    }

    fn contents(buffer: &Arc<Mutex<Vec<u8>>>) -> String {
        String::from_utf8(buffer.lock().unwrap().clone()).unwrap()
    }

    #[test]
    fn test_name_is_kept_verbatim() {
        let sink = UserNotification::new("  Alice ");
        assert_eq!(sink.name(), "  Alice ");
    }

    #[test]
    fn test_update_renders_one_line() {
        let (buffer, writer) = capture();
        let sink = UserNotification::with_writer("Alice", writer);

        sink.update("Product A", CartAction::Added, &["Product A".to_string()]);

        assert_eq!(
            contents(&buffer),
            "Alice received a notification: Item Product A added. Cart: Product A\n"
        );
    }

    #[test]
    fn test_items_joined_with_commas() {
        let sink = UserNotification::new("Bob");
        let items = vec!["A".to_string(), "B".to_string(), "A".to_string()];

        assert_eq!(
            sink.render("B", CartAction::Removed, &items),
            "Bob received a notification: Item B removed. Cart: A,B,A"
        );
    }

    #[test]
    fn test_empty_cart_renders_empty_list() {
        let sink = UserNotification::new("Bob");
        assert_eq!(
            sink.render("A", CartAction::Removed, &[]),
            "Bob received a notification: Item A removed. Cart: "
        );
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_does_not_panic() {
        let sink = UserNotification::with_writer("Alice", Arc::new(Mutex::new(FailingWriter)));
        sink.update("A", CartAction::Added, &["A".to_string()]);
    }
}
