use clap::Parser;
use fairy_chess::{legal_moves, Game, MoveGen};
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

/// Generate a fairy chess game and count its moves.
#[derive(Parser, Debug)]
#[command(name = "fairy_chess", version)]
struct Args {
    /// Seed for the piece type generator.  A random seed is used when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// How many plies deep to run perft.
    #[arg(long, default_value_t = 3)]
    depth: usize,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = StdRng::seed_from_u64(seed);
    let game = Game::generate("white", "black", &mut rng);

    info!("seed {}", seed);
    for (index, piece_type) in game.piece_types().iter().enumerate() {
        info!(
            "{}: {} ({}{})",
            index,
            piece_type.name(),
            piece_type.movement_rule().kind(),
            if piece_type.is_royal() { ", royal" } else { "" }
        );
    }

    let state = game.current_state();
    println!("Seed {}", seed);
    println!("Legal moves: {}", legal_moves(&game, state).len());
    for depth in 1..=args.depth {
        let start = Instant::now();
        let count = MoveGen::perft(&game, state, depth);
        println!(
            "Perft {}: {} in {:.3} seconds",
            depth,
            count,
            start.elapsed().as_secs_f64()
        );
    }
}
