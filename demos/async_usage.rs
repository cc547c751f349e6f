//! Asynchronous pool population walkthrough

use dynapool::{
    EntityFactory, EntityPool, Placement, PoolConfig, PoolResult, PooledEntity,
};
use std::time::Duration;
use tokio::time::sleep;

struct Enemy {
    visible: bool,
}

impl PooledEntity for Enemy {
    fn activate(&mut self) {
        self.visible = true;
    }

    fn deactivate(&mut self) {
        self.visible = false;
    }

    fn apply_placement(&mut self, _placement: &Placement) {}
}

/// Simulates a factory whose type definitions live behind a slow asset
/// loader and whose construction is expensive enough to offload.
struct EnemyFactory;

#[async_trait::async_trait]
impl EntityFactory for EnemyFactory {
    type Entity = Enemy;
    type TypeRef = String;
    type SoftRef = String;

    fn create(&self, entity_type: &String) -> PoolResult<Enemy> {
        // Runs on a worker thread during initialize_async.
        std::thread::sleep(Duration::from_millis(20));
        println!("   Constructed a {entity_type} off the main context");
        Ok(Enemy { visible: false })
    }

    async fn resolve(&self, soft: &String) -> PoolResult<String> {
        println!("   Resolving soft reference {soft:?}...");
        sleep(Duration::from_millis(50)).await;
        Ok(soft.trim_start_matches("soft/").to_string())
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();
    println!("=== dynapool - Async Population ===\n");

    let mut pool = EntityPool::new(EnemyFactory, PoolConfig::new().with_auto_expand(true));

    pool.events_mut()
        .on_pool_initialized(|| println!("   [event] pool initialized"));

    println!("1. Deferred initialization:");
    pool.initialize_async(&"soft/grunt".to_string(), 5)
        .await
        .expect("type resolution failed");
    println!("   Pool holds {} inactive entities\n", pool.stats().inactive);

    println!("2. Spawning from the populated pool:");
    let handle = pool.spawn(&Placement::at([10.0, 0.0, 0.0])).unwrap();
    let visible = pool.entity(handle).map(|e| e.visible).unwrap_or(false);
    println!("   Spawned entity {} (visible: {})", handle.id(), visible);
    println!("   Peak active: {}", pool.stats().peak_active);

    pool.release(handle);
    println!("   Inactive after release: {}", pool.stats().inactive);
}
