//! Contract payload mapping.

use crate::customer::Customer;

/// The create/update payload for a contract, derived from a [`Customer`].
///
/// The same shape is POSTed on create and PUT on update. Optional fields
/// that are absent are left out of the encoded form entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractPayload {
    pub external_id: String,
    /// "M" or "F", derived from the customer's salutation code.
    pub gender: &'static str,
    pub company: Option<String>,
    /// Composite `street-streetNr` address line.
    pub address: String,
    pub first_name: String,
    pub last_name: String,
    pub zip_code: String,
    pub city: String,
    pub phone_number: String,
    pub email: String,
    /// "active" or "blocked", derived from the customer's active flag.
    pub status: &'static str,
    pub country: i64,
    /// At most one payment method, chosen by precedence.
    pub payment: Option<PaymentMethod>,
}

/// A payment method block for the contract payload.
///
/// A payload carries at most one of these; when a customer has several
/// payment methods on file, bank account wins over credit card, which
/// wins over SEPA direct debit.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentMethod {
    BankAccount {
        account_holder: String,
        account_number: String,
        bank_name: Option<String>,
        bank_code: Option<String>,
    },
    CreditCard {
        card_number: String,
        card_type: Option<String>,
        card_holder: String,
        card_cvc: Option<String>,
        /// Composite `month/year` expiration.
        card_expiration: String,
    },
    SepaDirectDebit {
        bic: String,
        iban: String,
    },
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl ContractPayload {
    /// Map a customer onto the contract payload shape.
    pub fn from_customer(customer: &Customer) -> Self {
        let payment = if let (Some(holder), Some(number)) = (
            non_empty(&customer.account_holder),
            non_empty(&customer.account_number),
        ) {
            Some(PaymentMethod::BankAccount {
                account_holder: holder.to_string(),
                account_number: number.to_string(),
                bank_name: customer.bank_name.clone(),
                bank_code: customer.bank_code.clone(),
            })
        } else if let (Some(owner), Some(number)) = (
            non_empty(&customer.credit_card_owner),
            non_empty(&customer.credit_card_number),
        ) {
            Some(PaymentMethod::CreditCard {
                card_number: number.to_string(),
                card_type: customer.credit_card_type.clone(),
                card_holder: owner.to_string(),
                card_cvc: customer.security_code.clone(),
                card_expiration: format!(
                    "{}/{}",
                    customer.expiration_month.as_deref().unwrap_or_default(),
                    customer.expiration_year.as_deref().unwrap_or_default()
                ),
            })
        } else if let (Some(bic), Some(iban)) = (
            non_empty(&customer.bank_swift),
            non_empty(&customer.bank_iban),
        ) {
            Some(PaymentMethod::SepaDirectDebit {
                bic: bic.to_string(),
                iban: iban.to_string(),
            })
        } else {
            None
        };

        Self {
            external_id: customer.username.clone(),
            gender: if customer.salutation == 1 { "M" } else { "F" },
            company: customer.company.clone(),
            address: format!("{}-{}", customer.street, customer.street_nr),
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            zip_code: customer.post_code.clone(),
            city: customer.city.clone(),
            phone_number: customer.phone.clone(),
            email: customer.email.clone(),
            status: if customer.active { "active" } else { "blocked" },
            country: customer.country,
            payment,
        }
    }

    /// Encode the payload as form fields, using bracketed keys for the
    /// nested payment block (`payment_data[bank_account][account_holder]`).
    pub fn into_form(self) -> Vec<(String, String)> {
        let mut form = vec![
            ("external_id".to_string(), self.external_id),
            ("gender".to_string(), self.gender.to_string()),
        ];
        if let Some(company) = self.company {
            form.push(("company".to_string(), company));
        }
        form.extend([
            ("address".to_string(), self.address),
            ("first_name".to_string(), self.first_name),
            ("last_name".to_string(), self.last_name),
            ("zip_code".to_string(), self.zip_code),
            ("city".to_string(), self.city),
            ("phone_number".to_string(), self.phone_number),
            ("email".to_string(), self.email),
            ("status".to_string(), self.status.to_string()),
            ("country".to_string(), self.country.to_string()),
        ]);

        match self.payment {
            Some(PaymentMethod::BankAccount {
                account_holder,
                account_number,
                bank_name,
                bank_code,
            }) => {
                form.push(bank_field("account_holder", account_holder));
                form.push(bank_field("account_number", account_number));
                if let Some(name) = bank_name {
                    form.push(bank_field("bank_name", name));
                }
                if let Some(code) = bank_code {
                    form.push(bank_field("bank_code", code));
                }
            }
            Some(PaymentMethod::CreditCard {
                card_number,
                card_type,
                card_holder,
                card_cvc,
                card_expiration,
            }) => {
                form.push(card_field("card_number", card_number));
                if let Some(card_type) = card_type {
                    form.push(card_field("card_type", card_type));
                }
                form.push(card_field("card_holder", card_holder));
                if let Some(cvc) = card_cvc {
                    form.push(card_field("card_cvc_holder", cvc));
                }
                form.push(card_field("card_expiration_date", card_expiration));
            }
            Some(PaymentMethod::SepaDirectDebit { bic, iban }) => {
                form.push(sepa_field("bic", bic));
                form.push(sepa_field("iban", iban));
            }
            None => {}
        }

        form
    }
}

fn bank_field(key: &str, value: String) -> (String, String) {
    (format!("payment_data[bank_account][{}]", key), value)
}

fn card_field(key: &str, value: String) -> (String, String) {
    (format!("payment_data[credit_card][{}]", key), value)
}

fn sepa_field(key: &str, value: String) -> (String, String) {
    (format!("payment_data[sepa_direct_debit][{}]", key), value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_customer() -> Customer {
        Customer {
            username: "alice".into(),
            salutation: 1,
            street: "Mainstr".into(),
            street_nr: "12".into(),
            first_name: "Alice".into(),
            last_name: "Doe".into(),
            post_code: "10115".into(),
            city: "Berlin".into(),
            phone: "+49301234".into(),
            email: "alice@example.com".into(),
            active: true,
            country: 49,
            tariff: 3,
            ..Customer::default()
        }
    }

    #[test]
    fn maps_identity_and_address_fields() {
        let payload = ContractPayload::from_customer(&base_customer());
        assert_eq!(payload.external_id, "alice");
        assert_eq!(payload.gender, "M");
        assert_eq!(payload.address, "Mainstr-12");
        assert_eq!(payload.status, "active");
        assert_eq!(payload.country, 49);
        assert!(payload.payment.is_none());
    }

    #[test]
    fn non_first_salutation_maps_to_f() {
        let mut customer = base_customer();
        customer.salutation = 2;
        assert_eq!(ContractPayload::from_customer(&customer).gender, "F");
    }

    #[test]
    fn blocked_status_for_inactive_customer() {
        let mut customer = base_customer();
        customer.active = false;
        assert_eq!(ContractPayload::from_customer(&customer).status, "blocked");
    }

    #[test]
    fn bank_account_wins_over_credit_card() {
        let mut customer = base_customer();
        customer.account_holder = Some("Alice Doe".into());
        customer.account_number = Some("12345678".into());
        customer.credit_card_owner = Some("Alice Doe".into());
        customer.credit_card_number = Some("4111111111111111".into());

        let payload = ContractPayload::from_customer(&customer);
        assert!(matches!(
            payload.payment,
            Some(PaymentMethod::BankAccount { .. })
        ));

        let form = payload.into_form();
        assert!(
            form.iter()
                .any(|(k, _)| k == "payment_data[bank_account][account_number]")
        );
        assert!(!form.iter().any(|(k, _)| k.contains("credit_card")));
    }

    #[test]
    fn credit_card_wins_over_sepa() {
        let mut customer = base_customer();
        customer.credit_card_owner = Some("Alice Doe".into());
        customer.credit_card_number = Some("4111111111111111".into());
        customer.expiration_month = Some("04".into());
        customer.expiration_year = Some("2027".into());
        customer.bank_swift = Some("MARKDEF1100".into());
        customer.bank_iban = Some("DE02120300000000202051".into());

        let payload = ContractPayload::from_customer(&customer);
        let form = payload.into_form();
        assert!(form.contains(&(
            "payment_data[credit_card][card_expiration_date]".to_string(),
            "04/2027".to_string()
        )));
        assert!(!form.iter().any(|(k, _)| k.contains("sepa_direct_debit")));
    }

    #[test]
    fn sepa_used_when_nothing_else_is_on_file() {
        let mut customer = base_customer();
        customer.bank_swift = Some("MARKDEF1100".into());
        customer.bank_iban = Some("DE02120300000000202051".into());

        let form = ContractPayload::from_customer(&customer).into_form();
        assert!(form.contains(&(
            "payment_data[sepa_direct_debit][iban]".to_string(),
            "DE02120300000000202051".to_string()
        )));
    }

    #[test]
    fn no_payment_data_keys_without_payment_fields() {
        let form = ContractPayload::from_customer(&base_customer()).into_form();
        assert!(!form.iter().any(|(k, _)| k.starts_with("payment_data")));
    }

    #[test]
    fn empty_strings_do_not_select_a_payment_method() {
        let mut customer = base_customer();
        customer.account_holder = Some(String::new());
        customer.account_number = Some("12345678".into());

        let payload = ContractPayload::from_customer(&customer);
        assert!(payload.payment.is_none());
    }

    #[test]
    fn company_is_omitted_when_absent() {
        let form = ContractPayload::from_customer(&base_customer()).into_form();
        assert!(!form.iter().any(|(k, _)| k == "company"));

        let mut customer = base_customer();
        customer.company = Some("ACME GmbH".into());
        let form = ContractPayload::from_customer(&customer).into_form();
        assert!(form.contains(&("company".to_string(), "ACME GmbH".to_string())));
    }
}
