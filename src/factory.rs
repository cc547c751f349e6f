//! Collaborator traits: the entity factory and the pooled entity contract

use crate::errors::PoolResult;
use async_trait::async_trait;

/// Placement parameters applied to an entity on spawn, the pool-level
/// analogue of a world transform.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Placement {
    pub position: [f32; 3],
    pub rotation: [f32; 3],
}

impl Placement {
    pub fn at(position: [f32; 3]) -> Self {
        Self {
            position,
            rotation: [0.0; 3],
        }
    }
}

/// Contract every pooled entity type implements.
///
/// The pool decides *when* activation toggles happen; what they mean
/// (visibility, collision, per-frame updates, replication flags) is entirely
/// up to the implementation.
pub trait PooledEntity: Send + 'static {
    /// Whether this entity type supports the reset-before-reuse hook.
    ///
    /// Resolved once per type. When `true`, [`reset`](Self::reset) is
    /// invoked on every spawn, before placement is applied, so stale state
    /// from a prior use cycle does not leak into the next one.
    const SUPPORTS_RESET: bool = false;

    /// Apply engine-visible "in use" side effects.
    fn activate(&mut self);

    /// Apply engine-visible "parked" side effects.
    fn deactivate(&mut self);

    /// Move the entity to its spawn placement.
    fn apply_placement(&mut self, placement: &Placement);

    /// Clear per-use state before the entity is handed out again. Only
    /// called when [`SUPPORTS_RESET`](Self::SUPPORTS_RESET) is `true`.
    fn reset(&mut self) {}
}

/// Creates, destroys, and resolves the concrete type of pooled entities.
///
/// The pool consumes a factory but never owns entity lifetime policy:
/// construction failures are reported per unit of work and leave the pool's
/// prior state untouched.
#[async_trait]
pub trait EntityFactory: Send + Sync + 'static {
    /// Concrete entity produced by this factory.
    type Entity: PooledEntity;

    /// Resolved description of which entity to construct.
    type TypeRef: Clone + Send + Sync + 'static;

    /// Unresolved (soft) reference to an entity type, turned into a
    /// [`TypeRef`](Self::TypeRef) by [`resolve`](Self::resolve).
    type SoftRef: Send + Sync;

    /// Construct one entity of the given type.
    fn create(&self, entity_type: &Self::TypeRef) -> PoolResult<Self::Entity>;

    /// Tear down an entity removed from the pool by the self-destruct
    /// lifespan policy. The default drops it.
    fn destroy(&self, entity: Self::Entity) {
        drop(entity);
    }

    /// Resolve a soft type reference, possibly suspending while an external
    /// loader fetches the concrete definition.
    async fn resolve(&self, soft: &Self::SoftRef) -> PoolResult<Self::TypeRef>;
}
