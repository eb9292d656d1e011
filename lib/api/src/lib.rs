//! HTTP surface for similarity queries over a loaded product table.

pub mod rest;

pub use rest::RestApi;
