pub mod breach;
pub mod config;
pub mod constants;
pub mod error;
pub mod host;
pub mod location;
pub mod reinforce;
pub mod risk;
pub mod select;
pub mod sim;
pub mod strategy;
pub mod units;

pub use breach::{BreachEvent, BreachLog, FrameBatch};
pub use config::UnitCatalog;
pub use error::{ConfigError, EventError};
pub use host::{GameHost, PlacementOutcome, RejectReason};
pub use location::{edge_cells, edges_of, EdgeFlags, GridPoint, Location};
pub use reinforce::{reinforce, reinforcement_neighborhood};
pub use risk::{assess, estimate_path_damage, PathRisk};
pub use select::{least_risk_location, SelectorPool};
pub use strategy::{HealthPolicy, Session, Strategist};
pub use units::{CostTable, Currency, Occupant, Owner, UnitKind};
