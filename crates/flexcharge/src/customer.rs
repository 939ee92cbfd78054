//! Customer entity consumed by the sync operations.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::ContractId;

/// A customer record from the application's management layer.
///
/// This is a read-only data carrier: the sync operations only ever read
/// from it when building contract and order payloads. The optional
/// `contract_id` is the externally-assigned billing contract; its presence
/// decides whether reconciliation updates an existing contract or creates
/// a new one.
///
/// # Security
///
/// Payment fields (account number, card number, CVC, IBAN) are redacted
/// in Debug output.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    /// Login name; doubles as the contract's `external_id`.
    pub username: String,
    /// Salutation code; 1 maps to gender "M", everything else to "F".
    pub salutation: u8,
    pub company: Option<String>,
    pub street: String,
    pub street_nr: String,
    pub first_name: String,
    pub last_name: String,
    pub post_code: String,
    pub city: String,
    pub phone: String,
    pub email: String,
    /// Active customers get contract status "active", others "blocked".
    pub active: bool,
    /// Country id as assigned by the management layer.
    pub country: i64,
    /// Billing contract assigned to this customer, if any.
    pub contract_id: Option<ContractId>,
    /// Tariff/plan id the customer is subscribed to.
    pub tariff: u64,

    // Bank account payment fields
    pub account_holder: Option<String>,
    pub account_number: Option<String>,
    pub bank_name: Option<String>,
    pub bank_code: Option<String>,

    // Credit card payment fields
    pub credit_card_owner: Option<String>,
    pub credit_card_number: Option<String>,
    pub credit_card_type: Option<String>,
    pub security_code: Option<String>,
    pub expiration_month: Option<String>,
    pub expiration_year: Option<String>,

    // SEPA direct debit payment fields
    pub bank_swift: Option<String>,
    pub bank_iban: Option<String>,
}

impl fmt::Debug for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redacted(value: &Option<String>) -> &'static str {
            if value.is_some() { "[REDACTED]" } else { "None" }
        }

        f.debug_struct("Customer")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("active", &self.active)
            .field("contract_id", &self.contract_id)
            .field("tariff", &self.tariff)
            .field("account_number", &redacted(&self.account_number))
            .field("credit_card_number", &redacted(&self.credit_card_number))
            .field("security_code", &redacted(&self.security_code))
            .field("bank_iban", &redacted(&self.bank_iban))
            .finish_non_exhaustive()
    }
}
