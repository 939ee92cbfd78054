//! Order synchronization against the billing API.

use reqwest::{Method, StatusCode};
use tracing::{debug, error, info, instrument, warn};

use crate::auth::TokenAuthenticator;
use crate::customer::Customer;
use crate::error::{Error, InvalidInputError};
use crate::http::{OrdersPage, contract_orders_path, order_item_path};
use crate::types::ContractId;

/// Order operations on a contract's orders sub-resource.
///
/// A contract carries at most one meaningful order line-item at a time,
/// so placing a new order replaces whatever line-items previous orders
/// still hold.
#[derive(Debug, Clone)]
pub struct OrderSync {
    auth: TokenAuthenticator,
}

impl OrderSync {
    /// Create an order sync backed by the given authenticator.
    pub fn new(auth: TokenAuthenticator) -> Self {
        Self { auth }
    }

    /// Fetch the orders of a contract.
    pub async fn for_contract(&self, contract_id: &ContractId) -> Result<OrdersPage, Error> {
        self.auth.ensure_token().await?;
        self.auth
            .execute_get(&contract_orders_path(contract_id.as_str()), &[])
            .await
    }

    /// Place a new order for the customer's contract, retiring previous
    /// line-items first.
    ///
    /// Existing orders are fetched and the first line-item of every order
    /// that has one is deleted (one call per qualifying order); a rejected
    /// deletion is logged and skipped. The new order carries exactly one
    /// active line-item referencing the customer's tariff, with the
    /// customer's username as `external_id`.
    ///
    /// # Errors
    ///
    /// A customer without a stored contract id is rejected up front with
    /// [`Error::InvalidInput`]; a rejected creation surfaces as
    /// [`Error::Api`] with the response detail.
    #[instrument(skip(self, customer), fields(username = %customer.username))]
    pub async fn replace_for_contract(&self, customer: &Customer) -> Result<(), Error> {
        self.auth.ensure_token().await?;

        let contract_id = customer.contract_id.clone().ok_or_else(|| {
            InvalidInputError::MissingContractId {
                username: customer.username.clone(),
            }
        })?;

        info!(contract_id = %contract_id, "replacing order for contract");
        self.retire_previous_items(&contract_id).await?;

        let form = order_form(customer);
        let submitted = self
            .auth
            .execute_form(
                Method::POST,
                &contract_orders_path(contract_id.as_str()),
                form,
                StatusCode::CREATED,
            )
            .await;

        match submitted {
            Ok(receipt) => {
                info!(order_id = ?receipt.resource_id, "order created");
                Ok(())
            }
            Err(Error::Api(api)) => {
                error!(
                    username = %customer.username,
                    contract_id = %contract_id,
                    tariff = customer.tariff,
                    status = api.status,
                    message = ?api.message,
                    "order creation rejected"
                );
                Err(Error::Api(api))
            }
            Err(e) => Err(e),
        }
    }

    /// Delete the first line-item of every existing order that has one.
    async fn retire_previous_items(&self, contract_id: &ContractId) -> Result<(), Error> {
        let page = match self.for_contract(contract_id).await {
            Ok(page) => page,
            // A rejected lookup means nothing to retire; the creation
            // below still proceeds.
            Err(Error::Api(_)) => return Ok(()),
            Err(e) => return Err(e),
        };

        if page.count == 0 {
            return Ok(());
        }

        for order in &page.items {
            let Some(first) = order.order_items.first() else {
                continue;
            };

            let deleted = self
                .auth
                .execute_form(
                    Method::DELETE,
                    &order_item_path(order.id, first.id),
                    Vec::new(),
                    StatusCode::NO_CONTENT,
                )
                .await;

            match deleted {
                Ok(_) => {
                    debug!(order_id = order.id, item_id = first.id, "retired line-item");
                }
                Err(Error::Api(api)) => {
                    warn!(
                        order_id = order.id,
                        item_id = first.id,
                        status = api.status,
                        "line-item removal rejected"
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Ok(())
    }
}

/// The order payload: one active line-item for the customer's tariff.
fn order_form(customer: &Customer) -> Vec<(String, String)> {
    vec![
        ("external_id".to_string(), customer.username.clone()),
        ("active".to_string(), "1".to_string()),
        (
            "order_items[0][plan]".to_string(),
            customer.tariff.to_string(),
        ),
        ("order_items[0][active]".to_string(), "1".to_string()),
    ]
}
