//! # dynapool
//!
//! Single-writer entity reuse pool for real-time simulations. Instead of
//! constructing and destroying entities on every spawn request, a pool
//! recycles a fixed or auto-growing set of inactive entities and tracks
//! usage statistics along the way.
//!
//! ## Features
//!
//! - Deterministic reuse: ordered slots, first-inactive scan
//! - Optional auto-expansion when the pool is exhausted
//! - Synchronous or asynchronous (worker-assisted) population
//! - Self-destruct and timer-return lifespan policies
//! - Reset-before-reuse hook for entity types that support it
//! - Typed event subscriptions: initialized, spawned, returned
//! - Usage statistics with HashMap and Prometheus-format export
//! - Health assessment derived from pool occupancy
//!
//! ## Quick Start
//!
//! ```rust
//! use dynapool::{EntityFactory, EntityPool, Placement, PoolConfig, PoolResult, PooledEntity};
//!
//! struct Fx {
//!     visible: bool,
//! }
//!
//! impl PooledEntity for Fx {
//!     fn activate(&mut self) {
//!         self.visible = true;
//!     }
//!     fn deactivate(&mut self) {
//!         self.visible = false;
//!     }
//!     fn apply_placement(&mut self, _placement: &Placement) {}
//! }
//!
//! struct FxFactory;
//!
//! #[async_trait::async_trait]
//! impl EntityFactory for FxFactory {
//!     type Entity = Fx;
//!     type TypeRef = ();
//!     type SoftRef = ();
//!
//!     fn create(&self, _entity_type: &()) -> PoolResult<Fx> {
//!         Ok(Fx { visible: false })
//!     }
//!
//!     async fn resolve(&self, _soft: &()) -> PoolResult<()> {
//!         Ok(())
//!     }
//! }
//!
//! let mut pool = EntityPool::new(FxFactory, PoolConfig::default());
//! pool.initialize((), 3);
//!
//! let handle = pool.acquire().unwrap();
//! assert_eq!(pool.stats().active, 1);
//!
//! pool.release(handle);
//! assert_eq!(pool.stats().inactive, 3);
//! ```

mod config;
mod errors;
mod events;
mod factory;
mod handle;
mod health;
mod lifespan;
mod metrics;
mod pool;

pub use config::PoolConfig;
pub use errors::{PoolError, PoolResult};
pub use events::EventHub;
pub use factory::{EntityFactory, Placement, PooledEntity};
pub use handle::{EntityHandle, SlotState};
pub use health::HealthStatus;
pub use lifespan::LifespanPolicy;
pub use metrics::{PoolStats, StatsExporter};
pub use pool::EntityPool;
