//! Fixed CRM enumerations.
//!
//! `name()` returns the canonical wire name of a variant (always the
//! snake_case serde name). The export engine relies on these names both for
//! record fields and for picklist declarations, so they must never change
//! for existing variants.

use serde::{Deserialize, Serialize};

/// Outcome of a deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealStatus {
    Won,
    Lost,
    Open,
}

impl DealStatus {
    /// All variants in declaration order.
    pub const ALL: [Self; 3] = [Self::Won, Self::Lost, Self::Open];

    /// Canonical wire name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Won => "won",
            Self::Lost => "lost",
            Self::Open => "open",
        }
    }

    /// Parses a wire name back into a variant.
    pub fn from_name(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.name() == s)
    }
}

impl Default for DealStatus {
    fn default() -> Self {
        Self::Open
    }
}

/// Pipeline stage of a deal. Declaration order is the business order the
/// remote system presents stages in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealStage {
    Prospecting,
    Qualification,
    NeedsAnalysis,
    ValueProposition,
    IdDecisionMakers,
    PerceptionAnalysis,
    ProposalPriceQuote,
    NegotiationReview,
    ClosedWon,
    ClosedLost,
}

impl DealStage {
    /// All variants in declaration order.
    pub const ALL: [Self; 10] = [
        Self::Prospecting,
        Self::Qualification,
        Self::NeedsAnalysis,
        Self::ValueProposition,
        Self::IdDecisionMakers,
        Self::PerceptionAnalysis,
        Self::ProposalPriceQuote,
        Self::NegotiationReview,
        Self::ClosedWon,
        Self::ClosedLost,
    ];

    /// Canonical wire name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Prospecting => "prospecting",
            Self::Qualification => "qualification",
            Self::NeedsAnalysis => "needs_analysis",
            Self::ValueProposition => "value_proposition",
            Self::IdDecisionMakers => "id_decision_makers",
            Self::PerceptionAnalysis => "perception_analysis",
            Self::ProposalPriceQuote => "proposal_price_quote",
            Self::NegotiationReview => "negotiation_review",
            Self::ClosedWon => "closed_won",
            Self::ClosedLost => "closed_lost",
        }
    }

    /// Parses a wire name back into a variant.
    pub fn from_name(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.name() == s)
    }
}

impl Default for DealStage {
    fn default() -> Self {
        Self::Prospecting
    }
}

/// Industry classification of a company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    Agriculture,
    Apparel,
    Banking,
    Biotechnology,
    Chemical,
    Communications,
    Construction,
    Consulting,
    Education,
    Electronics,
    Energy,
    Engineering,
    Entertainment,
    Environmental,
    Finance,
    FoodBeverage,
    Government,
    Healthcare,
    Hospitality,
    Insurance,
    Machinery,
    Manufacturing,
    Media,
    NotForProfit,
    Recreation,
    Retail,
    Shipping,
    Technology,
    Telecommunications,
    Transportation,
    Utilities,
}

impl Industry {
    /// All variants in declaration order.
    pub const ALL: [Self; 31] = [
        Self::Agriculture,
        Self::Apparel,
        Self::Banking,
        Self::Biotechnology,
        Self::Chemical,
        Self::Communications,
        Self::Construction,
        Self::Consulting,
        Self::Education,
        Self::Electronics,
        Self::Energy,
        Self::Engineering,
        Self::Entertainment,
        Self::Environmental,
        Self::Finance,
        Self::FoodBeverage,
        Self::Government,
        Self::Healthcare,
        Self::Hospitality,
        Self::Insurance,
        Self::Machinery,
        Self::Manufacturing,
        Self::Media,
        Self::NotForProfit,
        Self::Recreation,
        Self::Retail,
        Self::Shipping,
        Self::Technology,
        Self::Telecommunications,
        Self::Transportation,
        Self::Utilities,
    ];

    /// Canonical wire name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Agriculture => "agriculture",
            Self::Apparel => "apparel",
            Self::Banking => "banking",
            Self::Biotechnology => "biotechnology",
            Self::Chemical => "chemical",
            Self::Communications => "communications",
            Self::Construction => "construction",
            Self::Consulting => "consulting",
            Self::Education => "education",
            Self::Electronics => "electronics",
            Self::Energy => "energy",
            Self::Engineering => "engineering",
            Self::Entertainment => "entertainment",
            Self::Environmental => "environmental",
            Self::Finance => "finance",
            Self::FoodBeverage => "food_beverage",
            Self::Government => "government",
            Self::Healthcare => "healthcare",
            Self::Hospitality => "hospitality",
            Self::Insurance => "insurance",
            Self::Machinery => "machinery",
            Self::Manufacturing => "manufacturing",
            Self::Media => "media",
            Self::NotForProfit => "not_for_profit",
            Self::Recreation => "recreation",
            Self::Retail => "retail",
            Self::Shipping => "shipping",
            Self::Technology => "technology",
            Self::Telecommunications => "telecommunications",
            Self::Transportation => "transportation",
            Self::Utilities => "utilities",
        }
    }

    /// Parses a wire name back into a variant.
    pub fn from_name(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.name() == s)
    }
}

/// Lifecycle status of a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    New,
    Contacted,
    Qualified,
    Lost,
    Converted,
}

impl LeadStatus {
    /// All variants in declaration order.
    pub const ALL: [Self; 5] =
        [Self::New, Self::Contacted, Self::Qualified, Self::Lost, Self::Converted];

    /// Canonical wire name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::Qualified => "qualified",
            Self::Lost => "lost",
            Self::Converted => "converted",
        }
    }

    /// Parses a wire name back into a variant.
    pub fn from_name(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.name() == s)
    }
}

impl Default for LeadStatus {
    fn default() -> Self {
        Self::New
    }
}

/// CRM user role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    /// Canonical wire name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    /// Parses a wire name back into a variant.
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "user" => Some(Self::User),
            _ => None,
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::User
    }
}
