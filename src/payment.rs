//! Payment methods and the factory that builds them from a type tag.

use crate::error::{CartError, Result};
use log::{debug, warn};
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

/// A payment capability selected by type tag.
///
/// The set of methods is closed; unknown tags are rejected by
/// [`create_payment_method`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    /// Selected by the `"credit"` tag.
    CreditCard,

    /// Selected by the `"paypal"` tag.
    PayPal,
}

impl PaymentMethod {
    /// The tag that selects this method.
    pub fn tag(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "credit",
            PaymentMethod::PayPal => "paypal",
        }
    }

    /// The fixed line rendered when the payment is processed.
    pub fn message(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "Processing credit card payment...",
            PaymentMethod::PayPal => "Processing PayPal payment...",
        }
    }

    /// Processes the payment, rendering its message to standard output.
    pub fn process_payment(&self) {
        let stdout = io::stdout();
        if let Err(e) = self.process_payment_to(stdout.lock()) {
            warn!("Failed to write {} payment output: {}", self.tag(), e);
        }
    }

    /// Processes the payment, rendering its message to `out`.
    pub fn process_payment_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        debug!("Processing {} payment", self.tag());
        writeln!(out, "{}", self.message())
    }
}

impl FromStr for PaymentMethod {
    type Err = CartError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "credit" => Ok(PaymentMethod::CreditCard),
            "paypal" => Ok(PaymentMethod::PayPal),
            other => Err(CartError::InvalidPaymentMethod(other.to_string())),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Builds the payment method for `tag`.
///
/// Tags match exactly: `"credit"` or `"paypal"`. Anything else fails with
/// [`CartError::InvalidPaymentMethod`] and no payment method is produced.
pub fn create_payment_method(tag: &str) -> Result<PaymentMethod> {
    tag.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn processed(method: PaymentMethod) -> String {
        let mut output = Vec::new();
        method.process_payment_to(&mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_credit_tag_builds_credit_card() {
        let method = create_payment_method("credit").unwrap();
        assert_eq!(method, PaymentMethod::CreditCard);
        assert_eq!(processed(method), "Processing credit card payment...\n");
    }

    #[test]
    fn test_paypal_tag_builds_paypal() {
        let method = create_payment_method("paypal").unwrap();
        assert_eq!(method, PaymentMethod::PayPal);
        assert_eq!(processed(method), "Processing PayPal payment...\n");
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let err = create_payment_method("bogus").unwrap_err();
        assert!(matches!(err, CartError::InvalidPaymentMethod(ref t) if t == "bogus"));
        assert_eq!(err.to_string(), "Invalid payment method type: bogus");
    }

    #[test]
    fn test_tags_are_case_sensitive() {
        assert!(create_payment_method("Credit").is_err());
        assert!(create_payment_method("PAYPAL").is_err());
        assert!(create_payment_method("").is_err());
    }

    #[test]
    fn test_tag_round_trips_through_display() {
        for method in [PaymentMethod::CreditCard, PaymentMethod::PayPal] {
            assert_eq!(create_payment_method(&method.to_string()).unwrap(), method);
        }
    }
}
