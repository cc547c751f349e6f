// dynapool - entity reuse pool for real-time simulations
//
// This is just a binary wrapper - the actual library is in lib.rs
// Run the walkthroughs with: cargo run --example basic

use dynapool::{EntityFactory, EntityPool, Placement, PoolConfig, PoolResult, PooledEntity};

struct Decal {
    visible: bool,
}

impl PooledEntity for Decal {
    fn activate(&mut self) {
        self.visible = true;
    }

    fn deactivate(&mut self) {
        self.visible = false;
    }

    fn apply_placement(&mut self, _placement: &Placement) {}
}

struct DecalFactory;

#[async_trait::async_trait]
impl EntityFactory for DecalFactory {
    type Entity = Decal;
    type TypeRef = ();
    type SoftRef = ();

    fn create(&self, _entity_type: &()) -> PoolResult<Decal> {
        Ok(Decal { visible: false })
    }

    async fn resolve(&self, _soft: &()) -> PoolResult<()> {
        Ok(())
    }
}

fn main() {
    env_logger::init();

    println!("=== dynapool ===");
    println!("See demos/ for usage walkthroughs");
    println!("Run: cargo run --example basic");
    println!();

    // Quick demo
    println!("Quick Demo:");
    let mut pool = EntityPool::new(DecalFactory, PoolConfig::default());
    pool.initialize((), 3);

    let handle = pool.spawn(&Placement::at([0.0, 0.0, 1.0])).unwrap();
    let visible = pool.entity(handle).map(|d| d.visible).unwrap_or(false);
    println!("  Spawned entity {} (visible: {})", handle.id(), visible);

    pool.release(handle);
    println!("  Inactive after release: {}", pool.stats().inactive);
}
