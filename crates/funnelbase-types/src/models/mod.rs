//! Core domain models for Funnelbase.
//!
//! This module contains the CRM entities and the fixed enumerations they
//! reference. Enum wire names (`name()`) are stable: the export engine
//! declares them to the remote system as picklist values.

mod entities;
mod enums;

// Re-export all models
pub use entities::{Company, Contact, Deal, Domain, Lead, User};
pub use enums::{DealStage, DealStatus, Industry, LeadStatus, Role};
