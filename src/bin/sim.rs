use netships::{AiPlayer, AttackResult, MatchController, Side, BOARD_SIZE};
use serde::Serialize;

#[derive(Serialize, Default)]
struct PlayerReport {
    shots: usize,
    hits: usize,
    sunk: Vec<&'static str>,
}

#[derive(Serialize)]
struct SimReport {
    player1: PlayerReport,
    player2: PlayerReport,
    winner: Option<&'static str>,
}

fn main() -> anyhow::Result<()> {
    netships::init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed1> <seed2>", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;

    let mut ai1 =
        AiPlayer::seeded(BOARD_SIZE, BOARD_SIZE, seed1).map_err(|e| anyhow::anyhow!(e))?;
    let mut ai2 =
        AiPlayer::seeded(BOARD_SIZE, BOARD_SIZE, seed2).map_err(|e| anyhow::anyhow!(e))?;
    ai1.place_all_ships_randomly().map_err(|e| anyhow::anyhow!(e))?;
    ai2.place_all_ships_randomly().map_err(|e| anyhow::anyhow!(e))?;

    let fleet1 = ai1.player_model().clone();
    let fleet2 = ai2.player_model().clone();
    let mut controller =
        MatchController::new(fleet1, fleet2, Some(Side::A), BOARD_SIZE, BOARD_SIZE);

    let mut reports = [PlayerReport::default(), PlayerReport::default()];

    let winner = loop {
        let attacker = controller.current_player();
        let (ai, idx) = match attacker {
            Side::A => (&mut ai1, 0),
            Side::B => (&mut ai2, 1),
        };
        let Some(pos) = ai.pick_next_attack() else {
            break None;
        };
        let result = controller.attack(attacker, attacker.opponent(), pos.x, pos.y);
        let report = &mut reports[idx];
        report.shots += 1;
        match result {
            AttackResult::Hit(_) => report.hits += 1,
            AttackResult::Sunk(key) => {
                report.hits += 1;
                report.sunk.push(key);
            }
            _ => {}
        }
        if controller.is_all_sunk(attacker.opponent()) {
            break Some(if attacker == Side::A { "player1" } else { "player2" });
        }
    };

    let [player1, player2] = reports;
    let report = SimReport {
        player1,
        player2,
        winner,
    };
    println!("{}", serde_json::to_string(&report)?);
    Ok(())
}
