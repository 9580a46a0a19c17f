use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::str::FromStr;

use anyhow::{Context, Result};
use pacman_arcade::config::Settings;
use pacman_arcade::error::ConfigError;
use pacman_arcade::events::GameEvent;
use pacman_arcade::formatter::TickFormatter;
use pacman_arcade::game::state::GamePhase;
use pacman_arcade::game::GameModel;
use pacman_arcade::map::selector::MapSelector;
use pacman_arcade::persistence::{CoinMechanism, FileHighScoreStore};
use pacman_arcade::variant::GameVariant;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use thousands::Separable;
use tracing::{info, info_span};
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

fn setup_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,{name}=info", name = env!("CARGO_CRATE_NAME"))));
    let subscriber = tracing_subscriber::fmt()
        .event_format(TickFormatter)
        .with_env_filter(filter)
        .finish()
        .with(ErrorLayer::default());
    tracing::subscriber::set_global_default(subscriber).context("Could not set global default subscriber")
}

fn main() -> Result<()> {
    setup_logging()?;

    let mut settings = Settings::load()?;
    if let Some(arg) = std::env::args().nth(1) {
        settings.variant = GameVariant::from_str(&arg).map_err(|_| ConfigError::UnknownVariant(arg))?;
    }
    let seed = settings.seed.unwrap_or_else(|| SmallRng::from_os_rng().random());
    let _span = info_span!("session", variant = %settings.variant, seed).entered();

    let maps = match &settings.map_dir {
        Some(dir) => MapSelector::from_dir(dir, settings.variant)?,
        None => MapSelector::builtin(settings.variant)?,
    };
    let mut game = GameModel::new(
        settings.variant.rule_set(),
        maps,
        SmallRng::seed_from_u64(seed),
        Box::new(CoinMechanism::new(settings.coins)),
        Box::new(FileHighScoreStore::new(&settings.data_dir, settings.variant)),
    );
    game.set_initial_lives(settings.initial_lives);

    let counts: Rc<RefCell<BTreeMap<&'static str, u32>>> = Rc::default();
    let sink = Rc::clone(&counts);
    game.subscribe(Box::new(move |event: &GameEvent| {
        *sink.borrow_mut().entry(event.name()).or_default() += 1;
    }));

    if settings.demo {
        game.build_demo_level()?;
    } else {
        if !game.can_start_new_game() {
            anyhow::bail!("No coins inserted");
        }
        game.start_new_game()?;
        if let Some(level) = game.level_mut() {
            level.pac.autopilot = true;
        }
    }
    game.start_level();

    while game.ticks() < settings.max_ticks {
        game.tick();
        if game.phase() == GamePhase::Idle {
            break;
        }
        // Each new level is built without autopilot.
        if let Some(level) = game.level_mut() {
            level.pac.autopilot = true;
        }
    }

    let level = game.level().map_or(0, |level| level.number());
    info!(ticks = game.ticks(), level, "Session finished");
    println!("Variant:    {}", settings.variant);
    println!("Ticks:      {}", game.ticks().separate_with_commas());
    println!("Level:      {level}");
    println!("Score:      {}", game.score().score().separate_with_commas());
    println!("High score: {}", game.score().high_score().points.separate_with_commas());
    println!("Lives:      {}", game.lives());
    for (name, count) in counts.borrow().iter() {
        println!("  {name:<24}{count:>6}");
    }
    Ok(())
}
