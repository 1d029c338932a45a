//! # Funnelbase Types
//!
//! Entity models and enumerations for the Funnelbase CRM.
//!
//! This crate sits at the bottom of the dependency graph:
//!
//! ```text
//!          funnelbase-types (this crate)
//!                  │
//!                  ▼
//!          funnelbase-core
//!                  │
//!                  ▼
//!          funnelbase-server
//! ```
//!
//! All types are designed to be:
//! - **Serializable** via serde for the REST API
//! - **Clone** for cheap sharing across async boundaries
//! - **PartialEq** for testing and comparison

pub mod models;

// Re-export core model types
pub use models::{
    Company, Contact, Deal, DealStage, DealStatus, Domain, Industry, Lead, LeadStatus, Role, User,
};
