//! Shopping Cart CLI
//!
//! Without arguments, runs the demo: two users watch the shared cart, an item
//! is added, and a credit card payment is processed. With a session file,
//! replays its commands against the shared cart instead.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- session.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use shopping_cart::{
    create_payment_method, stdout_writer, CartHandle, Result, Session, UserNotification,
};
use std::env;
use std::fs::File;
use std::io::BufReader;
use std::process;
use std::sync::Arc;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cart = CartHandle::shared();

    match env::args().nth(1) {
        Some(path) => {
            let file = File::open(path)?;
            let mut session = Session::new(cart, stdout_writer());
            session.run_csv(BufReader::new(file))
        }
        None => run_demo(&cart),
    }
}

fn run_demo(cart: &CartHandle) -> Result<()> {
    let alice = Arc::new(UserNotification::new("Alice"));
    let bob = Arc::new(UserNotification::new("Bob"));

    cart.add_observer(&alice);
    cart.add_observer(&bob);

    cart.add_item("Product A");

    let credit = create_payment_method("credit")?;
    let _paypal = create_payment_method("paypal")?;
    credit.process_payment();

    Ok(())
}
