//! Placeholder payment method split.
//!
//! Transactions do not record how they were paid, so the count is spread
//! evenly over [PAYMENT_METHODS] with the remainder given to the first one.

use serde::Serialize;

/// The payment methods shown on the analytics page.
pub const PAYMENT_METHODS: [&str; 4] = ["Card", "Bank Transfer", "Cash", "Digital Wallet"];

/// The estimated number and share of transactions for a payment method.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodShare {
    /// The payment method name.
    pub method: &'static str,
    /// The estimated number of transactions.
    pub count: usize,
    /// The estimated share of transactions, rounded to a whole percent.
    ///
    /// Each share is rounded on its own, so the shares may not sum to 100.
    pub percentage: f64,
}

/// Split `transaction_count` transactions over [PAYMENT_METHODS].
///
/// The counts always sum to `transaction_count`. With no transactions every
/// count and percentage is zero.
pub(crate) fn estimate_payment_methods(transaction_count: usize) -> Vec<PaymentMethodShare> {
    let method_count = PAYMENT_METHODS.len();
    let share = transaction_count / method_count;
    let remainder = transaction_count % method_count;
    let even_percentage = 100.0 / method_count as f64;

    PAYMENT_METHODS
        .iter()
        .enumerate()
        .map(|(index, &method)| {
            let is_first = index == 0;
            let count = if is_first { share + remainder } else { share };
            let percentage = if transaction_count == 0 {
                0.0
            } else if is_first {
                (even_percentage
                    + (remainder as f64 * even_percentage) / transaction_count as f64)
                    .round()
            } else {
                even_percentage.round()
            };

            PaymentMethodShare {
                method,
                count,
                percentage,
            }
        })
        .collect()
}
