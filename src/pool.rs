//! Core entity pool implementation

use crate::config::PoolConfig;
use crate::errors::{PoolError, PoolResult};
use crate::events::EventHub;
use crate::factory::{EntityFactory, Placement, PooledEntity};
use crate::handle::{EntityHandle, Slot, SlotState};
use crate::health::HealthStatus;
use crate::lifespan::{self, LifespanPolicy};
use crate::metrics::{PoolStats, StatCounters};

use std::sync::Arc;
use std::time::Instant;

/// Reuse pool for frequently spawned and destroyed simulation entities.
///
/// The pool owns an ordered slot vector; expansion appends, and acquisition
/// scans for the first inactive slot in insertion order, so reuse order is
/// deterministic. All mutation happens through `&mut self` on one
/// authoritative context (single-writer discipline); a pool configured as
/// read-only turns every mutating call into a no-op or a
/// [`PoolError::NotAuthoritative`] result.
pub struct EntityPool<F: EntityFactory> {
    factory: Arc<F>,
    entity_type: Option<F::TypeRef>,
    slots: Vec<Slot<F::Entity>>,
    config: PoolConfig,
    stats: StatCounters,
    events: EventHub,
    next_id: u64,
}

impl<F: EntityFactory> EntityPool<F> {
    /// Create an empty, uninitialized pool.
    pub fn new(factory: F, config: PoolConfig) -> Self {
        Self {
            factory: Arc::new(factory),
            entity_type: None,
            slots: Vec::new(),
            config,
            stats: StatCounters::default(),
            events: EventHub::default(),
            next_id: 0,
        }
    }

    /// Populate the pool with `initial_size` entities of `entity_type`.
    ///
    /// Any prior slots and counters are cleared first. Each expansion is
    /// independent: one factory failure is logged and the remaining
    /// iterations still run. On a non-authoritative pool this is a silent
    /// no-op.
    pub fn initialize(&mut self, entity_type: F::TypeRef, initial_size: usize) {
        if self.ensure_authority().is_err() {
            log::debug!("ignoring initialize on non-authoritative pool");
            return;
        }

        self.entity_type = Some(entity_type);
        self.slots.clear();
        self.stats = StatCounters::default();

        for _ in 0..initial_size {
            // Each expansion is independent; a failure does not abort the
            // remaining iterations.
            let _ = self.expand();
        }
    }

    /// Resolve a soft entity type reference, then populate the pool with
    /// `initial_size` entities constructed off the mutation path.
    ///
    /// Construction runs on worker threads, but every result is committed
    /// back here, after the `.await`, on the authoritative context - the
    /// slot vector is never touched concurrently. Emits the "pool
    /// initialized" signal exactly once after all tasks settle.
    ///
    /// Resolution failure is terminal for this call: the pool is left
    /// empty and uninitialized, and there is no automatic retry.
    pub async fn initialize_async(
        &mut self,
        soft: &F::SoftRef,
        initial_size: usize,
    ) -> PoolResult<()> {
        self.ensure_authority()?;

        let entity_type = match self.factory.resolve(soft).await {
            Ok(ty) => ty,
            Err(err) => {
                log::error!("entity type resolution failed: {err}");
                self.entity_type = None;
                self.slots.clear();
                self.stats = StatCounters::default();
                return Err(err);
            }
        };

        self.entity_type = Some(entity_type.clone());
        self.slots.clear();
        self.stats = StatCounters::default();

        let mut tasks = Vec::with_capacity(initial_size);
        for _ in 0..initial_size {
            let factory = Arc::clone(&self.factory);
            let ty = entity_type.clone();
            tasks.push(tokio::task::spawn_blocking(move || factory.create(&ty)));
        }

        for task in tasks {
            match task.await {
                Ok(Ok(entity)) => {
                    self.commit_entity(entity);
                }
                Ok(Err(err)) => log::error!("failed to construct pooled entity: {err}"),
                Err(_) => log::error!("{}", PoolError::Cancelled),
            }
        }

        log::debug!("pool initialized with {} entities", self.slots.len());
        self.events.emit_initialized();
        Ok(())
    }

    /// Hand out the first inactive entity in insertion order.
    ///
    /// With auto-expansion enabled an exhausted pool grows by one slot and
    /// hands that out instead. The request is counted up front, whether or
    /// not it succeeds.
    pub fn acquire(&mut self) -> PoolResult<EntityHandle> {
        self.ensure_authority()?;
        self.stats.total_acquire_requests += 1;

        if let Some(pos) = self
            .slots
            .iter()
            .position(|slot| slot.state == SlotState::Inactive)
        {
            return Ok(self.activate_at(pos));
        }

        if self.slots.is_empty() && self.entity_type.is_none() {
            log::warn!("pool is empty - was initialize called?");
            return Err(PoolError::Exhausted);
        }

        if self.config.auto_expand {
            log::debug!("expanding pool: no inactive entity available");
            self.expand()?;
            let pos = self.slots.len() - 1;
            return Ok(self.activate_at(pos));
        }

        log::warn!("no inactive entity available and auto-expansion is disabled");
        Err(PoolError::Exhausted)
    }

    /// Park an active entity back in the pool.
    ///
    /// Silent no-op when the caller lacks authority, the handle is not a
    /// pool member, or the slot is already inactive - so a duplicate
    /// release (e.g. an explicit release racing a timer) is harmless.
    pub fn release(&mut self, handle: EntityHandle) {
        if self.ensure_authority().is_err() {
            return;
        }
        let Some(pos) = self.slots.iter().position(|slot| slot.id == handle) else {
            return;
        };
        if self.slots[pos].state != SlotState::Active {
            return;
        }

        let slot = &mut self.slots[pos];
        slot.state = SlotState::Inactive;
        // Clearing the deadline cancels a pending timer-return.
        slot.expires_at = None;
        slot.entity.deactivate();

        self.stats.active -= 1;
        self.stats.total_release_requests += 1;
        self.events.emit_returned(handle);
    }

    /// Acquire an entity and prepare it for use: run the reset hook when
    /// the entity type supports one, apply `placement`, and arm the
    /// configured lifespan policy.
    ///
    /// On acquire failure the only side effect is the already-counted
    /// request.
    pub fn spawn(&mut self, placement: &Placement) -> PoolResult<EntityHandle> {
        let handle = self.acquire()?;

        if let Some(pos) = self.slots.iter().position(|slot| slot.id == handle) {
            let slot = &mut self.slots[pos];
            if <F::Entity as PooledEntity>::SUPPORTS_RESET {
                slot.entity.reset();
            }
            slot.entity.apply_placement(placement);
            slot.expires_at = self.config.lifespan.deadline_after(Instant::now());
        }

        self.events.emit_spawned(handle);
        Ok(handle)
    }

    /// Append one freshly constructed inactive entity.
    ///
    /// Requires authority and a resolved entity type. A factory failure is
    /// logged and reported; the pool's prior state is untouched.
    pub fn expand(&mut self) -> PoolResult<EntityHandle> {
        self.ensure_authority()?;
        let entity_type = self.entity_type.as_ref().ok_or(PoolError::Unresolved)?;

        match self.factory.create(entity_type) {
            Ok(entity) => Ok(self.commit_entity(entity)),
            Err(err) => {
                log::error!("factory failed to create pooled entity: {err}");
                Err(err)
            }
        }
    }

    /// Sweep expired lifespans as of `now`.
    ///
    /// Under the timer-return policy, due entities are released back to
    /// the pool; under self-destruct, they are destroyed via the factory
    /// and their slots removed outright. The authoritative context drives
    /// this, typically once per simulation step.
    pub fn tick(&mut self, now: Instant) {
        if self.ensure_authority().is_err() {
            return;
        }

        let due: Vec<EntityHandle> = self
            .slots
            .iter()
            .filter(|slot| slot.state == SlotState::Active && lifespan::is_due(slot.expires_at, now))
            .map(|slot| slot.id)
            .collect();

        match self.config.lifespan {
            LifespanPolicy::None => {}
            LifespanPolicy::TimerReturn(_) => {
                for handle in due {
                    self.release(handle);
                }
            }
            LifespanPolicy::SelfDestruct(_) => {
                for handle in due {
                    log::debug!("lifespan elapsed, destroying pooled entity {}", handle.id());
                    self.drop_slot(handle, true);
                }
            }
        }
    }

    /// Collaborator callback: the underlying entity was destroyed
    /// out-of-band.
    ///
    /// Treated as an implicit release followed by slot removal. Unknown
    /// handles are ignored, so a destroy notification racing an explicit
    /// release is harmless.
    pub fn notify_destroyed(&mut self, handle: EntityHandle) {
        if self.ensure_authority().is_err() {
            return;
        }
        self.drop_slot(handle, false);
    }

    /// Statistics snapshot.
    pub fn stats(&self) -> PoolStats {
        self.stats.snapshot(self.slots.len())
    }

    /// Health assessment derived from the current snapshot.
    pub fn health_status(&self) -> HealthStatus {
        HealthStatus::evaluate(&self.stats(), self.config.auto_expand)
    }

    /// Event subscriptions.
    pub fn events_mut(&mut self) -> &mut EventHub {
        &mut self.events
    }

    /// Shared access to an entity by handle.
    pub fn entity(&self, handle: EntityHandle) -> Option<&F::Entity> {
        self.slots
            .iter()
            .find(|slot| slot.id == handle)
            .map(|slot| &slot.entity)
    }

    /// Exclusive access to an entity by handle.
    pub fn entity_mut(&mut self, handle: EntityHandle) -> Option<&mut F::Entity> {
        self.slots
            .iter_mut()
            .find(|slot| slot.id == handle)
            .map(|slot| &mut slot.entity)
    }

    /// Lifecycle state of a slot, or `None` for a handle the pool does not
    /// own (including already-dropped slots).
    pub fn state_of(&self, handle: EntityHandle) -> Option<SlotState> {
        self.slots
            .iter()
            .find(|slot| slot.id == handle)
            .map(|slot| slot.state)
    }

    /// Whether `handle` refers to a live pool slot.
    pub fn contains(&self, handle: EntityHandle) -> bool {
        self.slots.iter().any(|slot| slot.id == handle)
    }

    /// Current slot count.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when the pool holds no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether this pool instance holds the single-writer role.
    pub fn is_authoritative(&self) -> bool {
        self.config.authoritative
    }

    /// The active configuration.
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Centralized single-writer gate, evaluated at the top of every
    /// mutating entry point.
    fn ensure_authority(&self) -> PoolResult<()> {
        if self.config.authoritative {
            Ok(())
        } else {
            Err(PoolError::NotAuthoritative)
        }
    }

    /// The one place entities enter the slot vector.
    fn commit_entity(&mut self, entity: F::Entity) -> EntityHandle {
        let handle = EntityHandle(self.next_id);
        self.next_id += 1;
        self.slots.push(Slot::new(handle, entity));
        self.stats.total_created += 1;
        self.stats.total_expansions += 1;
        handle
    }

    /// The one place slots flip to active; keeps `peak_active` current so
    /// it is a true high-water mark after every operation.
    fn activate_at(&mut self, pos: usize) -> EntityHandle {
        let slot = &mut self.slots[pos];
        slot.state = SlotState::Active;
        slot.entity.activate();
        let handle = slot.id;

        self.stats.active += 1;
        self.stats.peak_active = self.stats.peak_active.max(self.stats.active);
        handle
    }

    /// Remove a slot for good, with implicit-release bookkeeping. The
    /// destroyed state is terminal; the handle can never be reused.
    fn drop_slot(&mut self, handle: EntityHandle, via_factory: bool) {
        let Some(pos) = self.slots.iter().position(|slot| slot.id == handle) else {
            return;
        };

        let mut slot = self.slots.remove(pos);
        if slot.state == SlotState::Active {
            self.stats.active -= 1;
        }
        slot.state = SlotState::Destroyed;

        self.stats.total_release_requests += 1;
        self.events.emit_returned(handle);

        if via_factory {
            self.factory.destroy(slot.entity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Default)]
    struct Projectile {
        visible: bool,
        position: [f32; 3],
        calls: Vec<&'static str>,
    }

    impl PooledEntity for Projectile {
        const SUPPORTS_RESET: bool = true;

        fn activate(&mut self) {
            self.visible = true;
        }

        fn deactivate(&mut self) {
            self.visible = false;
            self.position = [0.0; 3];
        }

        fn apply_placement(&mut self, placement: &Placement) {
            self.calls.push("place");
            self.position = placement.position;
        }

        fn reset(&mut self) {
            self.calls.push("reset");
        }
    }

    struct ProjectileFactory {
        created: Arc<AtomicUsize>,
        destroyed: Arc<AtomicUsize>,
        /// Creation fails once this many entities exist.
        fail_after: Option<usize>,
        resolve_fails: bool,
    }

    impl Default for ProjectileFactory {
        fn default() -> Self {
            Self {
                created: Arc::new(AtomicUsize::new(0)),
                destroyed: Arc::new(AtomicUsize::new(0)),
                fail_after: None,
                resolve_fails: false,
            }
        }
    }

    #[async_trait]
    impl EntityFactory for ProjectileFactory {
        type Entity = Projectile;
        type TypeRef = String;
        type SoftRef = String;

        fn create(&self, _entity_type: &String) -> PoolResult<Projectile> {
            let attempt = self.created.fetch_add(1, Ordering::Relaxed);
            if let Some(limit) = self.fail_after {
                if attempt >= limit {
                    return Err(PoolError::Factory("construction rejected".into()));
                }
            }
            Ok(Projectile::default())
        }

        fn destroy(&self, entity: Projectile) {
            self.destroyed.fetch_add(1, Ordering::Relaxed);
            drop(entity);
        }

        async fn resolve(&self, soft: &String) -> PoolResult<String> {
            if self.resolve_fails {
                Err(PoolError::TypeResolution("asset not found".into()))
            } else {
                Ok(soft.clone())
            }
        }
    }

    fn pool_with(config: PoolConfig) -> EntityPool<ProjectileFactory> {
        EntityPool::new(ProjectileFactory::default(), config)
    }

    fn assert_invariants(pool: &EntityPool<ProjectileFactory>) {
        let stats = pool.stats();
        assert_eq!(stats.active + stats.inactive, pool.len());
        assert!(stats.peak_active >= stats.active);
    }

    #[test]
    fn test_initialize_populates_inactive_entities() {
        let mut pool = pool_with(PoolConfig::default());
        pool.initialize("rocket".into(), 3);

        let stats = pool.stats();
        assert_eq!(pool.len(), 3);
        assert_eq!(stats.active, 0);
        assert_eq!(stats.inactive, 3);
        assert_eq!(stats.total_created, 3);
        assert_eq!(stats.total_expansions, 3);
        assert_invariants(&pool);
    }

    #[test]
    fn test_initialize_zero_yields_valid_empty_pool() {
        let mut pool = pool_with(PoolConfig::default());
        pool.initialize("rocket".into(), 0);

        assert!(pool.is_empty());
        assert!(matches!(pool.acquire(), Err(PoolError::Exhausted)));
    }

    #[test]
    fn test_acquire_exhausts_without_auto_expand() {
        let mut pool = pool_with(PoolConfig::default());
        pool.initialize("rocket".into(), 3);

        let a = pool.acquire().unwrap();
        let b = pool.acquire().unwrap();
        let c = pool.acquire().unwrap();
        assert!(a != b && b != c && a != c);
        assert_eq!(pool.stats().active, 3);

        assert!(matches!(pool.acquire(), Err(PoolError::Exhausted)));
        assert_eq!(pool.stats().total_acquire_requests, 4);
        assert_invariants(&pool);
    }

    #[test]
    fn test_acquire_auto_expands_when_exhausted() {
        let mut pool = pool_with(PoolConfig::new().with_auto_expand(true));
        pool.initialize("rocket".into(), 3);

        for _ in 0..3 {
            pool.acquire().unwrap();
        }
        let fourth = pool.acquire().unwrap();

        assert!(pool.contains(fourth));
        assert_eq!(pool.len(), 4);
        assert_eq!(pool.stats().total_expansions, 4);
        assert_eq!(pool.stats().active, 4);
        assert_invariants(&pool);
    }

    #[test]
    fn test_acquire_on_uninitialized_pool_is_exhausted() {
        let mut pool = pool_with(PoolConfig::default());
        assert!(matches!(pool.acquire(), Err(PoolError::Exhausted)));
        assert_eq!(pool.stats().total_acquire_requests, 1);
    }

    #[test]
    fn test_expand_without_type_is_unresolved() {
        let mut pool = pool_with(PoolConfig::default());
        assert!(matches!(pool.expand(), Err(PoolError::Unresolved)));
    }

    #[test]
    fn test_reuse_order_is_insertion_order() {
        let mut pool = pool_with(PoolConfig::default());
        pool.initialize("rocket".into(), 2);

        let first = pool.acquire().unwrap();
        let second = pool.acquire().unwrap();

        // Release out of order; the scan still prefers the older slot.
        pool.release(second);
        pool.release(first);
        assert_eq!(pool.acquire().unwrap(), first);
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut pool = pool_with(PoolConfig::default());
        pool.initialize("rocket".into(), 1);

        let handle = pool.acquire().unwrap();
        assert_eq!(pool.state_of(handle), Some(SlotState::Active));

        pool.release(handle);
        assert_eq!(pool.state_of(handle), Some(SlotState::Inactive));
        let after_first = pool.stats();

        pool.release(handle);
        assert_eq!(pool.stats(), after_first);
        assert_eq!(pool.stats().total_release_requests, 1);
        assert_invariants(&pool);
    }

    #[test]
    fn test_release_of_foreign_handle_is_noop() {
        let mut pool = pool_with(PoolConfig::default());
        pool.initialize("rocket".into(), 1);

        pool.release(EntityHandle(999));
        assert_eq!(pool.stats().total_release_requests, 0);
    }

    #[test]
    fn test_release_applies_deactivation() {
        let mut pool = pool_with(PoolConfig::default());
        pool.initialize("rocket".into(), 1);

        let handle = pool.spawn(&Placement::at([4.0, 0.0, 0.0])).unwrap();
        assert!(pool.entity(handle).unwrap().visible);

        pool.release(handle);
        let entity = pool.entity(handle).unwrap();
        assert!(!entity.visible);
        assert_eq!(entity.position, [0.0; 3]);
    }

    #[test]
    fn test_invariants_hold_across_mixed_operations() {
        let mut pool = pool_with(PoolConfig::new().with_auto_expand(true));
        pool.initialize("rocket".into(), 2);
        assert_invariants(&pool);

        let a = pool.acquire().unwrap();
        assert_invariants(&pool);
        let b = pool.acquire().unwrap();
        assert_invariants(&pool);
        let c = pool.acquire().unwrap();
        assert_invariants(&pool);

        pool.release(b);
        assert_invariants(&pool);
        pool.expand().unwrap();
        assert_invariants(&pool);
        pool.release(a);
        assert_invariants(&pool);
        pool.release(c);
        assert_invariants(&pool);

        let stats = pool.stats();
        assert_eq!(stats.peak_active, 3);
        assert_eq!(stats.active, 0);
    }

    #[test]
    fn test_peak_active_is_monotonic() {
        let mut pool = pool_with(PoolConfig::default());
        pool.initialize("rocket".into(), 3);

        let a = pool.acquire().unwrap();
        let b = pool.acquire().unwrap();
        assert_eq!(pool.stats().peak_active, 2);

        pool.release(a);
        pool.release(b);
        assert_eq!(pool.stats().peak_active, 2);

        pool.acquire().unwrap();
        assert_eq!(pool.stats().peak_active, 2);
    }

    #[test]
    fn test_spawn_resets_before_placement() {
        let mut pool = pool_with(PoolConfig::default());
        pool.initialize("rocket".into(), 1);

        let handle = pool.spawn(&Placement::at([1.0, 2.0, 3.0])).unwrap();
        let entity = pool.entity(handle).unwrap();
        assert_eq!(entity.calls, vec!["reset", "place"]);
        assert_eq!(entity.position, [1.0, 2.0, 3.0]);

        pool.release(handle);
        pool.spawn(&Placement::default()).unwrap();
        let entity = pool.entity(handle).unwrap();
        assert_eq!(entity.calls, vec!["reset", "place", "reset", "place"]);
    }

    #[test]
    fn test_reset_skipped_for_unsupporting_entity_type() {
        struct Plain;

        impl PooledEntity for Plain {
            fn activate(&mut self) {}
            fn deactivate(&mut self) {}
            fn apply_placement(&mut self, _placement: &Placement) {}
            fn reset(&mut self) {
                panic!("reset must not run for types without the capability");
            }
        }

        struct PlainFactory;

        #[async_trait]
        impl EntityFactory for PlainFactory {
            type Entity = Plain;
            type TypeRef = ();
            type SoftRef = ();

            fn create(&self, _entity_type: &()) -> PoolResult<Plain> {
                Ok(Plain)
            }

            async fn resolve(&self, _soft: &()) -> PoolResult<()> {
                Ok(())
            }
        }

        let mut pool = EntityPool::new(PlainFactory, PoolConfig::default());
        pool.initialize((), 1);
        pool.spawn(&Placement::default()).unwrap();
    }

    #[test]
    fn test_factory_failures_do_not_abort_initialization() {
        let factory = ProjectileFactory {
            fail_after: Some(2),
            ..Default::default()
        };
        let mut pool = EntityPool::new(factory, PoolConfig::default());
        pool.initialize("rocket".into(), 5);

        // Two constructions succeed, three fail independently.
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.stats().total_created, 2);
        assert_invariants(&pool);
    }

    #[test]
    fn test_failed_expand_leaves_pool_untouched() {
        let factory = ProjectileFactory {
            fail_after: Some(1),
            ..Default::default()
        };
        let mut pool = EntityPool::new(factory, PoolConfig::new().with_auto_expand(true));
        pool.initialize("rocket".into(), 1);

        pool.acquire().unwrap();
        let before = pool.stats();

        let result = pool.acquire();
        assert!(matches!(result, Err(PoolError::Factory(_))));
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.stats().total_expansions, before.total_expansions);
        assert_eq!(
            pool.stats().total_acquire_requests,
            before.total_acquire_requests + 1
        );
    }

    #[test]
    fn test_timer_return_releases_exactly_once() {
        let lifespan = Duration::from_secs(2);
        let mut pool = pool_with(PoolConfig::new().with_timer_return(lifespan));
        pool.initialize("rocket".into(), 1);

        let returned = Arc::new(AtomicUsize::new(0));
        let observed = Arc::clone(&returned);
        pool.events_mut().on_entity_returned(move |_| {
            observed.fetch_add(1, Ordering::Relaxed);
        });

        let handle = pool.spawn(&Placement::default()).unwrap();
        let spawned_at = Instant::now();

        pool.tick(spawned_at + Duration::from_secs(1));
        assert_eq!(pool.stats().active, 1);

        pool.tick(spawned_at + Duration::from_secs(3));
        assert_eq!(pool.stats().active, 0);
        assert_eq!(pool.len(), 1);
        assert!(pool.contains(handle));
        assert_eq!(returned.load(Ordering::Relaxed), 1);

        // Already released; a later sweep finds nothing due.
        pool.tick(spawned_at + Duration::from_secs(10));
        assert_eq!(returned.load(Ordering::Relaxed), 1);
        assert_invariants(&pool);
    }

    #[test]
    fn test_explicit_release_cancels_pending_timer() {
        let mut pool = pool_with(PoolConfig::new().with_timer_return(Duration::from_secs(2)));
        pool.initialize("rocket".into(), 1);

        let handle = pool.spawn(&Placement::default()).unwrap();
        pool.release(handle);
        assert_eq!(pool.stats().total_release_requests, 1);

        pool.tick(Instant::now() + Duration::from_secs(5));
        assert_eq!(pool.stats().total_release_requests, 1);
    }

    #[test]
    fn test_self_destruct_removes_slot() {
        let factory = ProjectileFactory::default();
        let destroyed = Arc::clone(&factory.destroyed);
        let mut pool = EntityPool::new(
            factory,
            PoolConfig::new().with_self_destruct(Duration::from_secs(2)),
        );
        pool.initialize("rocket".into(), 2);

        let handle = pool.spawn(&Placement::default()).unwrap();
        let spawned_at = Instant::now();

        pool.tick(spawned_at + Duration::from_secs(3));

        // The slot is gone, not recycled; capacity shrank by one.
        assert!(!pool.contains(handle));
        assert_eq!(pool.len(), 1);
        assert_eq!(destroyed.load(Ordering::Relaxed), 1);
        assert_eq!(pool.stats().active, 0);
        assert_eq!(pool.stats().total_release_requests, 1);
        assert_invariants(&pool);

        // A later expand replenishes capacity.
        pool.expand().unwrap();
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_destroy_notification_is_implicit_release() {
        let mut pool = pool_with(PoolConfig::default());
        pool.initialize("rocket".into(), 2);

        let returned = Arc::new(AtomicUsize::new(0));
        let observed = Arc::clone(&returned);
        pool.events_mut().on_entity_returned(move |_| {
            observed.fetch_add(1, Ordering::Relaxed);
        });

        let handle = pool.acquire().unwrap();
        pool.notify_destroyed(handle);

        assert!(!pool.contains(handle));
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.stats().active, 0);
        assert_eq!(returned.load(Ordering::Relaxed), 1);

        // Duplicate delivery is tolerated.
        pool.notify_destroyed(handle);
        assert_eq!(returned.load(Ordering::Relaxed), 1);
        assert_invariants(&pool);
    }

    #[test]
    fn test_non_authoritative_pool_rejects_mutation() {
        let mut pool = pool_with(PoolConfig::new().read_only());

        pool.initialize("rocket".into(), 3);
        assert!(pool.is_empty());

        assert!(matches!(pool.acquire(), Err(PoolError::NotAuthoritative)));
        assert!(matches!(
            pool.spawn(&Placement::default()),
            Err(PoolError::NotAuthoritative)
        ));

        pool.release(EntityHandle(0));
        pool.tick(Instant::now());
        assert_eq!(pool.stats(), PoolStats::default());
    }

    #[test]
    fn test_spawn_emits_event_per_success_only() {
        let mut pool = pool_with(PoolConfig::default());
        pool.initialize("rocket".into(), 1);

        let spawned = Arc::new(AtomicUsize::new(0));
        let observed = Arc::clone(&spawned);
        pool.events_mut().on_entity_spawned(move |_| {
            observed.fetch_add(1, Ordering::Relaxed);
        });

        pool.spawn(&Placement::default()).unwrap();
        assert!(pool.spawn(&Placement::default()).is_err());
        assert_eq!(spawned.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_health_reflects_exhaustion() {
        let mut pool = pool_with(PoolConfig::default());
        pool.initialize("rocket".into(), 1);
        assert!(pool.health_status().is_healthy());

        pool.acquire().unwrap();
        assert!(!pool.health_status().is_healthy());
    }

    #[tokio::test]
    async fn test_initialize_async_resolves_and_populates() {
        let mut pool = pool_with(PoolConfig::default());

        let initialized = Arc::new(AtomicUsize::new(0));
        let observed = Arc::clone(&initialized);
        pool.events_mut().on_pool_initialized(move || {
            observed.fetch_add(1, Ordering::Relaxed);
        });

        pool.initialize_async(&"soft/rocket".to_string(), 4)
            .await
            .unwrap();

        let stats = pool.stats();
        assert_eq!(pool.len(), 4);
        assert_eq!(stats.inactive, 4);
        assert_eq!(stats.total_created, 4);
        assert_eq!(initialized.load(Ordering::Relaxed), 1);
        assert_invariants(&pool);

        // The pool is immediately usable on the owning context.
        pool.acquire().unwrap();
        assert_eq!(pool.stats().active, 1);
    }

    #[tokio::test]
    async fn test_initialize_async_resolution_failure_is_terminal() {
        let factory = ProjectileFactory {
            resolve_fails: true,
            ..Default::default()
        };
        let mut pool = EntityPool::new(factory, PoolConfig::default());

        let result = pool.initialize_async(&"soft/rocket".to_string(), 4).await;
        assert!(matches!(result, Err(PoolError::TypeResolution(_))));
        assert!(pool.is_empty());
        assert!(matches!(pool.acquire(), Err(PoolError::Exhausted)));
    }

    #[tokio::test]
    async fn test_initialize_async_tolerates_construction_failures() {
        let factory = ProjectileFactory {
            fail_after: Some(2),
            ..Default::default()
        };
        let mut pool = EntityPool::new(factory, PoolConfig::default());

        pool.initialize_async(&"soft/rocket".to_string(), 5)
            .await
            .unwrap();

        assert_eq!(pool.len(), 2);
        assert_invariants(&pool);
    }
}
