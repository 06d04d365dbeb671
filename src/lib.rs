//! # Shopping Cart
//!
//! A shared shopping cart that notifies registered observers on every
//! mutation, plus a factory that builds payment methods from a type tag.
//!
//! ## Design Principles
//!
//! - **One shared cart**: [`CartHandle::shared`] returns a handle to the same
//!   process-wide cart on every call
//! - **Synchronous fan-out**: each mutation notifies every observer, in
//!   registration order, before returning
//! - **Silent absence**: removing an item that is not in the cart is a no-op,
//!   not an error
//! - **Closed factory**: only `"credit"` and `"paypal"` produce a payment
//!   method; any other tag fails
//!
//! ## Example
//!
//! ```no_run
//! use shopping_cart::{create_payment_method, CartHandle, UserNotification};
//! use std::sync::Arc;
//!
//! let cart = CartHandle::shared();
//! let alice = Arc::new(UserNotification::new("Alice"));
//! cart.add_observer(&alice);
//! cart.add_item("Product A");
//!
//! create_payment_method("credit").unwrap().process_payment();
//! ```

pub mod cart;
pub mod error;
pub mod notification;
pub mod payment;
pub mod session;

pub use cart::{CartAction, CartHandle, CartObserver, ShoppingCart};
pub use error::{CartError, Result};
pub use notification::{stdout_writer, SharedWriter, UserNotification};
pub use payment::{create_payment_method, PaymentMethod};
pub use session::{Session, SessionCommand, SessionRecord};
