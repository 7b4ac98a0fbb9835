//! Storefront services: checkout, admin and the hosted collaborators behind them.

pub mod admin;
pub mod backend;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod context;
pub mod images;
pub mod notify;
pub mod orders;
pub mod receipts;
