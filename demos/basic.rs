//! Basic usage walkthrough for the entity pool

use dynapool::{
    EntityFactory, EntityPool, Placement, PoolConfig, PoolError, PoolResult, PooledEntity,
    StatsExporter,
};

struct Projectile {
    visible: bool,
    position: [f32; 3],
    speed: f32,
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
        self.position = placement.position;
    }

    fn reset(&mut self) {
        self.speed = 0.0;
    }
}

struct ProjectileFactory;

#[async_trait::async_trait]
impl EntityFactory for ProjectileFactory {
    type Entity = Projectile;
    type TypeRef = String;
    type SoftRef = String;

    fn create(&self, entity_type: &String) -> PoolResult<Projectile> {
        println!("   Constructing a {entity_type}...");
        Ok(Projectile {
            visible: false,
            position: [0.0; 3],
            speed: 0.0,
        })
    }

    async fn resolve(&self, soft: &String) -> PoolResult<String> {
        Ok(soft.clone())
    }
}

fn main() {
    env_logger::init();
    println!("=== dynapool - Basic Walkthrough ===\n");

    simple_pool();
    auto_expanding_pool();
    events_and_stats();
}

fn simple_pool() {
    println!("1. Fixed Pool:");
    let mut pool = EntityPool::new(ProjectileFactory, PoolConfig::default());
    pool.initialize("rocket".to_string(), 3);

    let handle = pool.spawn(&Placement::at([0.0, 0.0, 100.0])).unwrap();
    let entity = pool.entity(handle).unwrap();
    println!(
        "   Spawned entity {} at {:?}, visible: {}, speed: {}",
        handle.id(),
        entity.position,
        entity.visible,
        entity.speed
    );
    println!("   Active: {}", pool.stats().active);

    pool.release(handle);
    println!("   Inactive after release: {}\n", pool.stats().inactive);
}

fn auto_expanding_pool() {
    println!("2. Auto-Expanding Pool:");
    let config = PoolConfig::new().with_auto_expand(true);
    let mut pool = EntityPool::new(ProjectileFactory, config);
    pool.initialize("rocket".to_string(), 1);

    let _first = pool.acquire().unwrap();
    let _second = pool.acquire().unwrap(); // triggers an expansion
    println!("   Capacity grew to: {}", pool.len());
    println!("   Expansions: {}\n", pool.stats().total_expansions);

    // Without auto-expansion the same request reports exhaustion instead.
    let mut fixed = EntityPool::new(ProjectileFactory, PoolConfig::default());
    fixed.initialize("rocket".to_string(), 0);
    match fixed.acquire() {
        Err(PoolError::Exhausted) => println!("   Fixed empty pool: exhausted as expected\n"),
        other => println!("   Unexpected result: {other:?}\n"),
    }
}

fn events_and_stats() {
    println!("3. Events and Statistics:");
    let mut pool = EntityPool::new(ProjectileFactory, PoolConfig::default());
    pool.initialize("rocket".to_string(), 2);

    pool.events_mut()
        .on_entity_spawned(|handle| println!("   [event] spawned {}", handle.id()));
    pool.events_mut()
        .on_entity_returned(|handle| println!("   [event] returned {}", handle.id()));

    let handle = pool.spawn(&Placement::default()).unwrap();
    pool.release(handle);

    let health = pool.health_status();
    println!(
        "   Health: {}",
        if health.is_healthy() { "Healthy" } else { "Unhealthy" }
    );
    println!("   Utilization: {:.1}%", health.utilization * 100.0);

    println!("\n   Prometheus export:");
    let stats = pool.stats();
    for line in StatsExporter::export_prometheus(&stats, "projectiles", None).lines() {
        if !line.starts_with('#') {
            println!("     {line}");
        }
    }
}
