//! Room Server
//!
//! Authoritative host for the gaming-room scene: validates floor clicks,
//! plans avatar paths around the furniture and streams avatar state back
//! to clients.

mod entities;
mod network;
mod world;

use std::time::{Duration, Instant};

use log::{debug, error, info};
use room_shared::navigation::Navigator;
use room_shared::{DEFAULT_PORT, TICK_RATE};

use crate::network::Server;
use crate::world::{load_room, RoomWorld, LAYOUT_FILE};

/// How often to log a status line (in seconds)
const STATUS_INTERVAL_SECS: u64 = 60;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting Room Server...");
    info!("Tick rate: {} Hz", TICK_RATE);
    info!("Listening on port {}", DEFAULT_PORT);

    let (layout, config) = load_room(LAYOUT_FILE);
    let mut world = RoomWorld::new(Navigator::new(layout, config));
    info!(
        "Room ready: {} walls, {} obstacles, {} floor regions",
        world.navigator().layout().walls.len(),
        world.navigator().layout().obstacles.len(),
        world.navigator().layout().floor_regions.len()
    );

    // Create the network server
    let mut server = match Server::new(DEFAULT_PORT).await {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to start server: {}", e);
            return;
        }
    };

    // Calculate tick duration
    let tick_duration = Duration::from_secs_f64(1.0 / TICK_RATE as f64);
    let mut last_tick = Instant::now();
    let mut tick_count: u64 = 0;

    let mut last_status = Instant::now();
    let status_interval = Duration::from_secs(STATUS_INTERVAL_SECS);

    info!("Server started successfully!");

    // Main loop
    loop {
        let tick_start = Instant::now();

        // Process incoming network messages
        server.process_incoming(&mut world).await;

        // Walk every avatar along its path
        let delta = last_tick.elapsed().as_secs_f32();
        last_tick = Instant::now();
        world.update(delta);

        // Send avatar state to all clients
        server.broadcast_avatar_states(&world, tick_count);

        // Flush queued messages
        server.process_outgoing().await;

        if last_status.elapsed() >= status_interval {
            debug!(
                "Tick {}: {} clients, {} sessions",
                tick_count,
                server.client_count(),
                world.session_count()
            );
            last_status = Instant::now();
        }

        tick_count += 1;

        // Sleep until next tick
        let elapsed = tick_start.elapsed();
        if elapsed < tick_duration {
            tokio::time::sleep(tick_duration - elapsed).await;
        }
    }
}
