//! Ticket analytics engine: time-windowed aggregation, metric formulas,
//! risk scanning, and period-over-period trend classification.
//!
//! The engine is a pure computation library: it is handed an
//! already-fetched ticket set and an explicit `now`, and returns
//! JSON-serializable reports. Storage, transport, and narrative generation
//! live behind the [`TicketStore`] and [`NarrativeGateway`] traits.

pub mod aggregation;
pub mod classifier;
pub mod config;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod narrative;
pub mod risk;
pub mod store;
pub mod trends;

pub use aggregation::{bucket_tickets, BucketSeries, BucketUnit};
pub use config::RiskThresholds;
pub use engine::{AnalyticsEngine, DashboardReport};
pub use error::{AnalyticsError, AnalyticsResult};
pub use narrative::{narrate_signals, NarratedSignals, NarrativeGateway};
pub use risk::{EscalationSource, NoEnrichment, RiskReport, RiskScanner};
pub use store::TicketStore;
