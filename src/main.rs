use std::io::{self, BufRead, Write};

use clap::{Args, Parser, Subcommand};
use log::info;
use netships::ui::{
    coord_to_string, parse_coord, render_fleet_board, render_shot_board, TerminalUpdater,
};
use netships::{
    init_logging, place_fleet_randomly, AiPlayer, GameManager, MatchConfig, OpponentHandler,
    Orientation, Player, Side, SHIPS,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Debug)]
struct MatchArgs {
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long, default_value_t = netships::BOARD_SIZE)]
    rows: usize,
    #[arg(long, default_value_t = netships::BOARD_SIZE)]
    cols: usize,
    #[arg(long, help = "Let the opponent fire first")]
    opponent_starts: bool,
}

impl MatchArgs {
    fn config(&self) -> MatchConfig {
        MatchConfig {
            rows: self.rows,
            cols: self.cols,
            starting: if self.opponent_starts { Side::B } else { Side::A },
            seed: self.seed,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the reference AI in the terminal.
    Play(MatchArgs),
    /// Let the reference AI play both sides through the same game manager.
    Auto(MatchArgs),
}

fn rng_for(seed: Option<u64>, offset: u64) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s.wrapping_add(offset)),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play(args.config()),
        Commands::Auto(args) => auto(args.config()),
    }
}

fn read_line(stdin: &mut impl BufRead) -> anyhow::Result<Option<String>> {
    let mut line = String::new();
    if stdin.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn place_interactively(
    player: &mut Player,
    rng: &mut SmallRng,
    stdin: &mut impl BufRead,
) -> anyhow::Result<()> {
    let rows = player.board().rows();
    let cols = player.board().cols();
    for spec in SHIPS.iter() {
        loop {
            print!("{}", render_fleet_board(player));
            print!(
                "Place {} (length {}) as e.g. `A5 H` / `B3 V`, ENTER for random: ",
                spec.name(),
                spec.length()
            );
            io::stdout().flush()?;
            let Some(line) = read_line(stdin)? else {
                anyhow::bail!("input closed during placement");
            };
            if line.is_empty() {
                break;
            }
            let mut parts = line.split_whitespace();
            let start = match parts.next().map(|s| parse_coord(s, rows, cols)) {
                Some(Ok(pos)) => pos,
                Some(Err(e)) => {
                    println!("Error: {}", e);
                    continue;
                }
                None => continue,
            };
            let orientation = match parts.next().and_then(|s| s.chars().next()) {
                Some('v') | Some('V') => Orientation::Vertical,
                Some('h') | Some('H') | None => Orientation::Horizontal,
                Some(other) => {
                    println!("Error: invalid orientation '{}' - use H or V", other);
                    continue;
                }
            };
            match player.place_ship(spec.key(), start, orientation) {
                Ok(()) => {
                    println!("{} placed at {}", spec.name(), coord_to_string(start));
                    break;
                }
                Err(e) => println!("Error: {}", e),
            }
        }
    }
    // anything left blank is placed at random
    place_fleet_randomly(player, rng).map_err(|e| anyhow::anyhow!(e))?;
    Ok(())
}

fn play(config: MatchConfig) -> anyhow::Result<()> {
    config.validate().map_err(|e| anyhow::anyhow!(e))?;
    if let Some(s) = config.seed {
        println!("Using fixed seed: {} (game will be reproducible)", s);
    }
    let mut rng = rng_for(config.seed, 0);
    let mut ai = AiPlayer::new(config.rows, config.cols, rng_for(config.seed, 1))
        .map_err(|e| anyhow::anyhow!(e))?;
    ai.place_all_ships_randomly().map_err(|e| anyhow::anyhow!(e))?;

    let stdin = io::stdin();
    let mut stdin = stdin.lock();
    let mut local = Player::new(config.rows, config.cols).map_err(|e| anyhow::anyhow!(e))?;
    place_interactively(&mut local, &mut rng, &mut stdin)?;

    let mut manager =
        GameManager::against_ai(local, ai, &config).map_err(|e| anyhow::anyhow!(e))?;
    manager.set_board_updater(Box::new(TerminalUpdater));
    manager.start();

    while !manager.is_game_over() {
        println!("\nOpponent waters:");
        print!("{}", render_shot_board(manager.shots()));
        println!("\nYour fleet:");
        print!("{}", render_fleet_board(manager.local_player()));
        print!("Target (e.g. A5 or 3,4; `quit` to leave): ");
        io::stdout().flush()?;
        let Some(line) = read_line(&mut stdin)? else {
            break;
        };
        if line.eq_ignore_ascii_case("quit") {
            break;
        }
        match parse_coord(&line, config.rows, config.cols) {
            Ok(pos) => {
                manager.handle_local_attack(pos.x, pos.y);
            }
            Err(e) => println!("Invalid coordinate: {}", e),
        }
        if !manager.is_game_over() && !manager.is_local_player_turn() {
            // opponent is out of moves and holds the turn
            println!("The match has stalled.");
            break;
        }
    }
    Ok(())
}

fn auto(config: MatchConfig) -> anyhow::Result<()> {
    config.validate().map_err(|e| anyhow::anyhow!(e))?;
    let mut local = AiPlayer::new(config.rows, config.cols, rng_for(config.seed, 0))
        .map_err(|e| anyhow::anyhow!(e))?;
    let mut opponent = AiPlayer::new(config.rows, config.cols, rng_for(config.seed, 1))
        .map_err(|e| anyhow::anyhow!(e))?;
    local.place_all_ships_randomly().map_err(|e| anyhow::anyhow!(e))?;
    opponent.place_all_ships_randomly().map_err(|e| anyhow::anyhow!(e))?;

    let (local_fleet, mut local_moves) = local.into_parts();
    let mut manager = GameManager::against_ai(local_fleet, opponent, &config)
        .map_err(|e| anyhow::anyhow!(e))?;
    manager.set_board_updater(Box::new(TerminalUpdater));
    manager.start();

    let mut shots = 0;
    while !manager.is_game_over() && manager.is_local_player_turn() {
        let Some(pos) = local_moves.next_attack() else {
            break;
        };
        manager.handle_local_attack(pos.x, pos.y);
        shots += 1;
    }
    info!("local AI fired {} shots", shots);

    match manager.winner_is_local() {
        Some(true) => println!("Local AI wins after {} shots", shots),
        Some(false) => println!("Opponent AI wins"),
        None => println!("Match stalled without a winner"),
    }
    Ok(())
}
