//! Bubble Pack demo entry point
//!
//! Runs the greeting demo headlessly on the glyph-grid host and prints the
//! settled cluster as JSON.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use bubble_pack::surface::{GridHost, GridMetrics};
    use bubble_pack::{World, WorldConfig};

    env_logger::init();
    log::info!("Bubble Pack (native) starting...");

    let config = match std::env::args().nth(1) {
        Some(path) => WorldConfig::load(path),
        None => WorldConfig::default(),
    };

    let mut world = World::new(20.0, 20.0, config, GridHost::new(GridMetrics::default()));
    world.set_on_select(|content| log::info!("Selected {content:?}"));

    let greetings = [
        ("Hello there!", 0),
        ("I'm glad to see you!", 0),
        ("How are you?", 1000),
        ("This is really a fun demo", 2000),
        ("Hope you'll enjoy it!", 5000),
        ("Have fun!", 10000),
        ("Why are you still there !!!!!!!!!", 20000),
    ];
    for (text, delay) in greetings {
        world.add(text, delay);
    }

    world.advance(25_000);

    log::info!(
        "{} circles after {} ticks, {} overlapping pairs",
        world.circles().len(),
        world.ticks(),
        world.all_collision_pairs().len()
    );
    for circle in world.circles() {
        log::info!(
            "{:>36} r={:.2} at ({:.2}, {:.2})",
            circle.content,
            circle.radius,
            circle.center.x,
            circle.center.y
        );
    }

    match serde_json::to_string_pretty(world.circles()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize circles: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Library-only on wasm; the host page drives `World` directly
}
