//! Patent filing cost estimation across national, regional and international offices.
//!
//! Data flows one way: scenario input, government fee rules per jurisdiction,
//! professional fees, currency normalization, aggregation, then ranking.

pub mod aggregate;
pub mod currency;
pub mod domain;
pub mod input;
pub mod professional;
pub mod ranking;
pub mod router;
pub mod rules;
pub mod service;

pub use aggregate::{aggregate, JurisdictionResult};
pub use currency::{
    AnchorQuote, CurrencyNormalizer, FrankfurterProvider, RateFetchError, RateMetadata,
    RateProvider, RateRefresher, RateTable, RefreshOutcome, SharedRateTable, REFERENCE_CURRENCY,
};
pub use domain::{
    ApplicantType, ApplicationScenario, ApplicationType, Currency, EpValidationCountry,
    EpValidationEntry, FeeBreakdown, FeeLineItem, Jurisdiction, JurisdictionId, PriorArtSearch,
    ProfessionalFeeSchedule, SourceCitation, UnknownCode,
};
pub use input::{parse_scope, EstimateRequestBody};
pub use professional::{compute_professional_fees, ProfessionalFeeItem};
pub use ranking::rank;
pub use router::{estimate_router, RefreshResponse};
pub use rules::{FeeContext, GovernmentFeeRule, RuleRegistry};
pub use service::{
    estimate, EstimateReport, EstimateRequest, EstimateScope, EstimateService, JurisdictionCard,
    RateSnapshot, SummaryRow,
};
