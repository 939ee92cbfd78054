//! Contract synchronization against the billing API.
//!
//! The centerpiece is [`ContractSync::reconcile`]: one existence lookup
//! decides whether a customer's contract is created or updated, so local
//! customer records converge on the remote state with a single call.

mod form;
mod payload;

pub use form::ContractForm;
pub use payload::{ContractPayload, PaymentMethod};

use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::{error, info, instrument};

use crate::auth::TokenAuthenticator;
use crate::customer::Customer;
use crate::error::{ApiError, Error};
use crate::http::{CONTRACT_FILTERS_PATH, CONTRACTS_PATH, contract_path};
use crate::types::ContractId;

/// Contract operations: reads, deletion, and create-or-update
/// reconciliation.
///
/// Holds a clone of the [`TokenAuthenticator`] handle; every call ensures
/// a token first and aborts immediately when authentication fails.
#[derive(Debug, Clone)]
pub struct ContractSync {
    auth: TokenAuthenticator,
}

impl ContractSync {
    /// Create a contract sync backed by the given authenticator.
    pub fn new(auth: TokenAuthenticator) -> Self {
        Self { auth }
    }

    /// List contracts, optionally filtered by the given query parameters.
    ///
    /// The response body is schema-agnostic; interpretation is left to the
    /// caller.
    pub async fn list(&self, parameters: &[(String, String)]) -> Result<Value, Error> {
        self.auth.ensure_token().await?;
        self.auth.execute_get(CONTRACTS_PATH, parameters).await
    }

    /// Fetch the filter definitions available for contract listing.
    pub async fn filters(&self) -> Result<Value, Error> {
        self.auth.ensure_token().await?;
        self.auth.execute_get(CONTRACT_FILTERS_PATH, &[]).await
    }

    /// Fetch a single contract by id.
    pub async fn get(&self, id: &ContractId) -> Result<Value, Error> {
        self.auth.ensure_token().await?;
        self.auth.execute_get(&contract_path(id.as_str()), &[]).await
    }

    /// Create or update the billing contract for a customer.
    ///
    /// If the customer carries a contract id that resolves on the API, the
    /// contract is updated in place; otherwise a new contract is created.
    /// The returned id is the server-assigned one either way.
    ///
    /// On a rejected submission the API's per-field validation errors are
    /// mapped onto `form` and the call returns [`Error::Api`].
    #[instrument(skip(self, customer, form), fields(username = %customer.username))]
    pub async fn reconcile(
        &self,
        customer: &Customer,
        form: &mut ContractForm,
    ) -> Result<ContractId, Error> {
        self.auth.ensure_token().await?;

        let existing = match &customer.contract_id {
            Some(id) => match self.get(id).await {
                Ok(_) => Some(id.clone()),
                // A lookup rejected by the API means there is nothing to
                // update; transport failures still abort.
                Err(Error::Api(_)) => None,
                Err(e) => return Err(e),
            },
            None => None,
        };

        match existing {
            Some(id) => self.do_update(customer, &id, form).await,
            None => self.do_create(customer, form).await,
        }
    }

    /// Delete a contract by id.
    pub async fn delete(&self, id: &ContractId) -> Result<(), Error> {
        self.auth.ensure_token().await?;
        self.auth
            .execute_form(
                Method::DELETE,
                &contract_path(id.as_str()),
                Vec::new(),
                StatusCode::NO_CONTENT,
            )
            .await?;
        Ok(())
    }

    async fn do_create(
        &self,
        customer: &Customer,
        form: &mut ContractForm,
    ) -> Result<ContractId, Error> {
        info!("creating billing contract");

        let body = ContractPayload::from_customer(customer).into_form();
        let submitted = self
            .auth
            .execute_form(Method::POST, CONTRACTS_PATH, body, StatusCode::CREATED)
            .await;

        match submitted {
            Ok(receipt) => {
                let id = receipt.resource_id.map(ContractId::from).ok_or_else(|| {
                    ApiError::new(
                        StatusCode::CREATED.as_u16(),
                        Some("resource_id header missing from response".to_string()),
                        None,
                    )
                })?;
                info!(contract_id = %id, "contract created");
                Ok(id)
            }
            Err(Error::Api(api)) => Err(self.reject(customer, form, api, "contract creation rejected")),
            Err(e) => Err(e),
        }
    }

    async fn do_update(
        &self,
        customer: &Customer,
        id: &ContractId,
        form: &mut ContractForm,
    ) -> Result<ContractId, Error> {
        info!(contract_id = %id, "updating billing contract");

        let body = ContractPayload::from_customer(customer).into_form();
        let submitted = self
            .auth
            .execute_form(
                Method::PUT,
                &contract_path(id.as_str()),
                body,
                StatusCode::NO_CONTENT,
            )
            .await;

        match submitted {
            Ok(receipt) => {
                let id = receipt
                    .resource_id
                    .map(ContractId::from)
                    .unwrap_or_else(|| id.clone());
                info!(contract_id = %id, "contract updated");
                Ok(id)
            }
            Err(Error::Api(api)) => Err(self.reject(customer, form, api, "contract update rejected")),
            Err(e) => Err(e),
        }
    }

    /// Map a rejected submission onto the form and log it with the
    /// customer context attached.
    fn reject(
        &self,
        customer: &Customer,
        form: &mut ContractForm,
        api: ApiError,
        what: &'static str,
    ) -> Error {
        form::apply_field_errors(form, api.errors.as_ref());
        error!(
            username = %customer.username,
            contract_id = ?customer.contract_id,
            tariff = customer.tariff,
            status = api.status,
            errors = %form.combined(),
            "{what}"
        );
        Error::Api(api)
    }
}
