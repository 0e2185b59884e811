//! Small storefront backend: accounts, catalog, cart and checkout over a
//! JSON API, with the whole state persisted as a single JSON document.

pub mod app;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod products;
pub mod state;
pub mod storage;
