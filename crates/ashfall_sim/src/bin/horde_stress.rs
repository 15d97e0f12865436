//! # Horde Stress Run
//!
//! Headless load test: hundreds of live enemies plus bosses, with combat
//! collaborators hammering the queued damage pipeline at the fixed 30 Hz
//! simulation cadence. Reports shed counts and tick timing at the end.
//!
//! ```text
//! RUST_LOG=info cargo run --release --bin horde_stress
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

use ashfall_core::{TickLoop, Vec2};
use ashfall_sim::{
    BossKind, CombatEvent, DamageTag, EnemyKind, EntityId, EntityKind, EventChannel, SimConfig,
    SimCore,
};

/// Concurrent enemies to keep live.
const ENEMY_COUNT: usize = 500;
/// Simulated ticks to run (10 seconds at 30 Hz).
const RUN_TICKS: u64 = 300;
/// Damage calls issued per tick.
const HITS_PER_TICK: usize = 200;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = SimConfig {
        max_enemies: ENEMY_COUNT,
        ..SimConfig::default()
    };
    let channel = EventChannel::new(config.event_capacity);
    let mut core = SimCore::new(config, channel.sender()).expect("default config is valid");

    let player = EntityId::new(1);
    core.register_player(player, Vec2::ZERO, 200.0);

    // Spawn the horde in a ring around the player.
    let mut next_id = 100u64;
    for i in 0..ENEMY_COUNT {
        #[allow(clippy::cast_precision_loss)]
        let angle = i as f32 / ENEMY_COUNT as f32 * std::f32::consts::TAU;
        let kind = match i % 3 {
            0 => EnemyKind::Husk,
            1 => EnemyKind::Stalker,
            _ => EnemyKind::Spitter,
        };
        core.spawn_enemy(
            EntityId::new(next_id),
            kind,
            Vec2::new(angle.cos(), angle.sin()) * 40.0,
        );
        next_id += 1;
    }
    core.spawn_boss(EntityId::new(2), BossKind::Cinderlord, Vec2::new(60.0, 0.0));
    core.spawn_boss(EntityId::new(3), BossKind::Ossuarch, Vec2::new(-60.0, 0.0));

    let mut attack_rng = ChaCha8Rng::seed_from_u64(0x0DDB411);
    let mut tick_loop = TickLoop::simulation();
    let mut kills: u64 = 0;
    let mut notifications: u64 = 0;

    tracing::info!(
        enemies = ENEMY_COUNT,
        ticks = RUN_TICKS,
        hits_per_tick = HITS_PER_TICK,
        "horde stress run starting"
    );

    while tick_loop.ticks() < RUN_TICKS {
        while tick_loop.tick_due() && tick_loop.ticks() < RUN_TICKS {
            let started = tick_loop.begin();

            // Combat collaborators: a storm of small hits at random targets,
            // including ids that died earlier in the run.
            for _ in 0..HITS_PER_TICK {
                let target = EntityId::new(attack_rng.gen_range(100..next_id));
                let tag = if attack_rng.gen_bool(0.3) {
                    DamageTag::Area
                } else {
                    DamageTag::Projectile
                };
                core.apply_damage(target, attack_rng.gen_range(1.0..6.0), Some(player), &[tag]);
            }

            let summary = core.tick(tick_loop.dt());

            // Host-side consumer drains notifications on the same cadence.
            while let Ok(event) = channel.try_recv() {
                notifications += 1;
                if matches!(event, CombatEvent::EntityKilled { .. }) {
                    kills += 1;
                }
            }

            tick_loop.complete(started);

            if tick_loop.ticks() % 30 == 0 {
                tracing::info!(
                    tick = tick_loop.ticks(),
                    live = core.ids_of_kind(EntityKind::Enemy).len(),
                    drained = summary.drained,
                    swept = summary.swept,
                    "tick"
                );
            }
        }
        tick_loop.idle_until_due();
    }

    let damage = core.damage_stats();
    let timing = tick_loop.stats();
    tracing::info!(
        applied = damage.applied,
        shed = damage.shed,
        stale = damage.stale,
        crits = damage.crits,
        kills,
        notifications,
        survivors = core.ids_of_kind(EntityKind::Enemy).len(),
        bosses = core.world().bosses.len(),
        "stress run complete"
    );
    tracing::info!(
        avg_us = timing.avg_us,
        max_us = timing.max_us,
        late = timing.late,
        "tick timing"
    );
}
