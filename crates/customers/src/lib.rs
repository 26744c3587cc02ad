//! Customers domain module.
//!
//! This crate contains the customer record and its in-memory store
//! (no IO, no HTTP).

pub mod customer;
pub mod store;

pub use customer::{Customer, CustomerDraft};
pub use store::{CustomerStore, InMemoryCustomerStore};
