//! Receipt lifecycle
//!
//! The billing state machine: registering (split / on-account) payments,
//! cancelling a paid receipt, the typed-confirmation delete, and building
//! the print document. Repositories expose row primitives; everything
//! transactional lives in [`service`].

pub mod doc;
pub mod payment;
pub mod service;

pub use payment::PaymentPlan;
