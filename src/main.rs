use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use pokemon_arena::species::SpeciesSummary;
use pokemon_arena::{
    all_species, ArenaConfig, ArenaController, BattleEngine, BattleOutcome, BattlePair, Combatant,
    CombatantConfig, Position, SceneObserver, SceneTransition, TurnRng, Velocity,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pokemon-arena", about = "Roaming Pokemon that battle on contact")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Spawn a roster and run the arena for a number of ticks
    Run {
        /// RON config file; defaults apply when omitted
        #[arg(long)]
        config: Option<PathBuf>,
        /// Seed for battles and spawn positions (overrides config and ARENA_SEED)
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 500)]
        ticks: u32,
        /// Number of combatants to spawn
        #[arg(long, default_value_t = 8)]
        count: u32,
        #[arg(long, default_value_t = 20)]
        level: u8,
    },
    /// Fight two species once and print the battle log
    Battle {
        first: String,
        second: String,
        #[arg(long, default_value_t = 25)]
        level: u8,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List the species catalogue
    Species,
}

/// Forwards scene notifications to the log.
struct LogObserver;

impl SceneObserver for LogObserver {
    fn notify_entity_added(&mut self, id: u32, x: f32, y: f32) {
        info!(id, x, y, "entity added");
    }

    fn notify_entity_removed(&mut self, id: u32) {
        info!(id, "entity removed");
    }

    fn notify_scene_transition(&mut self, kind: SceneTransition, ids: &[u32]) {
        info!(?kind, ?ids, "scene transition");
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokemon_arena=info,pokemon_arena::battle=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            config,
            seed,
            ticks,
            count,
            level,
        } => run_arena(config, seed, ticks, count, level),
        Commands::Battle {
            first,
            second,
            level,
            seed,
        } => run_single_battle(&first, &second, level, seed),
        Commands::Species => list_species(),
    }
}

fn run_arena(
    config_path: Option<PathBuf>,
    seed: Option<u64>,
    ticks: u32,
    count: u32,
    level: u8,
) -> Result<()> {
    let base = match &config_path {
        Some(path) => ArenaConfig::from_ron_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ArenaConfig::default(),
    };
    let mut config = base.with_env_overrides()?;
    if seed.is_some() {
        config.seed = seed;
    }

    let species = all_species()?;
    if species.is_empty() {
        bail!("the species catalogue is empty");
    }

    let mut spawn_rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let bounds = config.bounds;
    let mut arena = ArenaController::new(config);
    let mut observer = LogObserver;

    for (index, descriptor) in species.iter().cycle().take(count as usize).enumerate() {
        let id = index as u32 + 1;
        let combatant = Combatant::new(CombatantConfig::from_species(&descriptor.name, level, id)?)?;
        let position = Position::new(
            spawn_rng.random_range(0.0..=bounds.width),
            spawn_rng.random_range(0.0..=bounds.height),
        );
        let velocity = Velocity::new(
            spawn_rng.random_range(-4.0..=4.0),
            spawn_rng.random_range(-4.0..=4.0),
        );
        arena.add_entity(combatant, position, velocity, &mut observer)?;
    }

    let dropped = arena.inspect_roster(&mut observer);
    info!(dropped = dropped.len(), "initial inspection done");

    let mut battles = 0;
    for tick in 0..ticks {
        let report = arena.tick(&mut observer);
        if let Some(BattleOutcome::Won { events, .. }) = &report.battle {
            battles += 1;
            println!("--- tick {} ---", tick);
            for line in events.formatted_lines() {
                println!("  {}", line);
            }
        }
        if arena.len() < 2 {
            break;
        }
    }

    println!("{} battles fought, {} left roaming", battles, arena.len());
    for entry in arena.roster() {
        println!("  {}", entry.combatant);
    }
    Ok(())
}

fn run_single_battle(first: &str, second: &str, level: u8, seed: Option<u64>) -> Result<()> {
    let first = Combatant::new(CombatantConfig::from_species(first, level, 1)?)?;
    let second = Combatant::new(CombatantConfig::from_species(second, level, 2)?)?;
    let mut rng = match seed {
        Some(seed) => TurnRng::new_seeded(seed),
        None => TurnRng::new_random(),
    };

    match BattleEngine::default().resolve(BattlePair::new(first, second), &mut rng) {
        Ok(result) => {
            result.events.print_formatted_with_message("Battle log:");
            println!("{}", result.winner);
            Ok(())
        }
        Err(failure) => {
            failure.events.print_formatted_with_message("Battle log:");
            Err(failure.error.into())
        }
    }
}

fn list_species() -> Result<()> {
    for descriptor in all_species()? {
        println!("{}", SpeciesSummary(&descriptor));
    }
    Ok(())
}
