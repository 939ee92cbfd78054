//! flexcharge - Billercentral billing API client
//!
//! This library synchronizes local customer records with the Billercentral
//! billing system. All authenticated operations flow through a
//! [`TokenAuthenticator`] handle that owns the credential exchange and the
//! current [`Session`]; [`ContractSync`] and [`OrderSync`] borrow it for
//! contract and order operations.
//!
//! # Example
//!
//! ```no_run
//! use flexcharge::{
//!     ApiUrl, ContractForm, ContractSync, Credentials, Customer, TokenAuthenticator,
//! };
//!
//! # async fn example() -> Result<(), flexcharge::Error> {
//! let base = ApiUrl::billercentral();
//! let creds = Credentials::new("acme", "alice", "pw", "client-1", "s3cret");
//! let auth = TokenAuthenticator::new(base, creds);
//!
//! let contracts = ContractSync::new(auth.clone());
//! let customer = Customer { username: "alice".into(), ..Customer::default() };
//! let mut form = ContractForm::new();
//!
//! let contract_id = contracts.reconcile(&customer, &mut form).await?;
//! println!("contract: {contract_id}");
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod contracts;
pub mod customer;
pub mod error;
pub mod http;
pub mod orders;
pub mod types;

// Re-export primary types at crate root for convenience
pub use auth::{Credentials, Outcome, Session, TokenAuthenticator};
pub use contracts::{ContractForm, ContractPayload, ContractSync, PaymentMethod};
pub use customer::Customer;
pub use error::Error;
pub use http::{OrdersPage, RequestConfig};
pub use orders::OrderSync;
pub use types::{ApiUrl, ContractId, DEFAULT_BASE_URL};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
