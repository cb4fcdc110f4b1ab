//! Client-side view-model library for a GRC risk dashboard.
//!
//! Every list screen (FAIR risks, technology risks, NIST CSF templates,
//! SAMA remediations, policies) is the same pipeline instantiated with a
//! different record type: fetch a collection from the REST backend, run
//! it through filter → sort → paginate for the table, and aggregate the
//! unfiltered collection for the summary cards. Mutations write through
//! the backend and refetch; nothing is patched locally.

pub mod api;
pub mod config;
pub mod data_manager;
pub mod errors;
pub mod gateway;
pub mod listview;
pub mod models;
pub mod stats;
pub mod store;

pub use config::ClientConfig;
pub use errors::AppError;
