//! Binary entrypoint for the Questify CLI.
//!
//! Commands:
//! - `play [--notes <file>]` - run the battle loop against your notes
//! - `parse --notes <file>` - show the prompts extracted from a notes file
//! - `status` - print the saved player record
//! - `reset` - delete the save slot
//! - `init` - create a starter `config.toml`
//!
//! See the library crate docs for module-level details: `questify::`.
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::io::{BufRead, Write};

use questify::config::Config;
use questify::extract::extract_prompts;
use questify::game::{BattleSession, EnemyRef, PlayerState, World};
use questify::storage::{JsonPlayerStore, PlayerStore};

#[derive(Parser)]
#[command(name = "questify")]
#[command(about = "Turn study notes into a tiny turn-based RPG")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Battle through your notes until victory or game over
    Play {
        /// Notes file; reads stdin to EOF when omitted
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Extract and print the quiz prompts from a notes file
    Parse {
        /// Notes file
        #[arg(short, long)]
        notes: String,
    },
    /// Show the saved player record
    Status,
    /// Delete the save slot
    Reset,
    /// Initialize a new configuration file
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Missing file: defaults cover every command and `init` writes the
    // starter file. A file that exists but fails to load is a hard error.
    let config = Config::load_or_default(&cli.config)
        .with_context(|| format!("failed to load config file: {}", cli.config))?;
    if !matches!(&cli.command, Commands::Init) {
        init_logging(&config, cli.verbose);
    }

    match cli.command {
        Commands::Play { notes } => {
            let text = read_notes(notes.as_deref())?;
            run_play(&config, &text)
        }
        Commands::Parse { notes } => {
            let text = std::fs::read_to_string(&notes)
                .with_context(|| format!("failed to read notes file: {}", notes))?;
            let prompts = extract_prompts(&text);
            if prompts.is_empty() {
                println!("{}", NO_QUESTIONS_MSG);
                return Ok(());
            }
            for (i, prompt) in prompts.iter().enumerate() {
                println!("{:>3}. {}", i + 1, prompt);
            }
            Ok(())
        }
        Commands::Status => {
            let store = JsonPlayerStore::new(&config.game.data_dir);
            match store.load() {
                Some(player) => print_stats(&player),
                None => println!("No save found. Start with: questify play --notes <file>"),
            }
            Ok(())
        }
        Commands::Reset => {
            let store = JsonPlayerStore::new(&config.game.data_dir);
            store.reset().context("failed to delete the save slot")?;
            println!("Save slot cleared.");
            Ok(())
        }
        Commands::Init => {
            Config::create_default(&cli.config)?;
            println!("Wrote {}", cli.config);
            Ok(())
        }
    }
}

const NO_QUESTIONS_MSG: &str = "Could not find any questions in the notes. \
Please provide text with sentences ending in '.', '?', or '!'.";

fn read_notes(path: Option<&str>) -> Result<String> {
    match path {
        Some(p) => {
            std::fs::read_to_string(p).with_context(|| format!("failed to read notes file: {}", p))
        }
        None => {
            let mut buf = String::new();
            std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf)
                .context("failed to read notes from stdin")?;
            Ok(buf)
        }
    }
}

/// The interactive battle loop: one encounter per surviving enemy, merging
/// and saving the player record after each resolution.
fn run_play(config: &Config, text: &str) -> Result<()> {
    let prompts = extract_prompts(text);
    if prompts.is_empty() {
        println!("{}", NO_QUESTIONS_MSG);
        return Ok(());
    }
    info!("extracted {} prompts", prompts.len());

    let store = JsonPlayerStore::new(&config.game.data_dir);
    let player = match store.load() {
        Some(p) => {
            info!("resuming level {} (hp {}/{})", p.level, p.hp, p.max_hp);
            p
        }
        None => {
            info!("starting a fresh save");
            PlayerState::fresh()
        }
    };
    // Persist the initial/loaded record so `status` works even if the
    // player quits before the first resolution.
    if let Err(e) = store.save(&player) {
        warn!("could not save player record: {}", e);
    }

    let mut world = World::new(prompts, player, &config.game.enemies);
    let mut rng = rand::thread_rng();
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    while let Some(enemy) = world.next_enemy().cloned() {
        println!();
        print_stats(&world.player);
        println!("A wild {} appears!", enemy.name);

        let prompt = match world.random_prompt(&mut rng) {
            Some(p) => p.to_string(),
            None => break, // unreachable: prompts checked above
        };
        let mut session = BattleSession::start(
            prompt,
            EnemyRef::new(enemy.name.clone()),
            world.player.clone(),
            &mut rng,
        );

        println!();
        println!("  {}", session.prompt());
        for (i, opt) in session.options().iter().enumerate() {
            println!("  {}. {}", i + 1, opt.text);
        }

        let choice = match read_choice(&mut lines, session.options().len())? {
            Some(c) => c,
            None => {
                println!("Fleeing the battle. Progress saved.");
                return Ok(());
            }
        };

        if let Some(result) = session.submit_answer(choice, &mut rng) {
            if result.correct {
                println!(
                    "Correct! {} takes {} damage. (+15 XP)",
                    enemy.name, result.damage
                );
            } else {
                println!("Incorrect! You take {} damage.", result.damage);
            }
        }

        if let Some(outcome) = session.resolve() {
            if outcome.player_won {
                println!("{} is defeated!", enemy.name);
            }
            let before_level = world.player.level;
            world.adopt_outcome(&enemy.name, &outcome);
            if world.player.level > before_level {
                println!(
                    "LEVEL UP! You reached level {} (max HP {}).",
                    world.player.level, world.player.max_hp
                );
            }
            if let Err(e) = store.save(&world.player) {
                warn!("could not save player record: {}", e);
            }
        }

        if world.game_over() {
            println!();
            println!("GAME OVER");
            return Ok(());
        }
    }

    if world.victory() {
        println!();
        println!("VICTORY! All enemies defeated.");
    }
    Ok(())
}

/// Read a 1-based option number from stdin. `None` means quit (EOF or `q`).
fn read_choice<B: BufRead>(
    lines: &mut std::io::Lines<B>,
    max: usize,
) -> Result<Option<usize>> {
    loop {
        print!("Your answer (1-{}, q to flee): ", max);
        std::io::stdout().flush().ok();
        let line = match lines.next() {
            Some(l) => l.context("failed to read from stdin")?,
            None => return Ok(None),
        };
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("q") {
            return Ok(None);
        }
        match trimmed.parse::<usize>() {
            Ok(n) if (1..=max).contains(&n) => return Ok(Some(n - 1)),
            _ => println!("Please enter a number between 1 and {}.", max),
        }
    }
}

fn print_stats(player: &PlayerState) {
    println!(
        "Level {} | HP {}/{} | XP {}/{}",
        player.level,
        player.hp.max(0),
        player.max_hp,
        player.xp,
        player.xp_threshold().ceil() as i32
    );
}

fn init_logging(config: &Config, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // Base level from CLI verbosity overrides config
    let base_level = match verbosity {
        0 => config
            .logging
            .level
            .parse()
            .unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);
    if let Some(ref file) = config.logging.file {
        if let Ok(f) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(file)
        {
            let mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
            let write_mutex = mutex.clone();

            // Echo to the console too when stdout is a terminal
            let is_tty = atty::is(atty::Stream::Stdout);

            builder.format(move |fmt, record| {
                let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
                let line = format!("{} [{}] {}", ts, record.level(), record.args());

                if let Ok(mut guard) = write_mutex.lock() {
                    let _ = writeln!(guard, "{}", line);
                }
                if is_tty {
                    writeln!(fmt, "{}", line)?;
                }
                Ok(())
            });
        }
    }
    let _ = builder.try_init();
}
