//! Equity analysis binary.
//!
//! Usage:
//!   cargo run --release --bin analyze -- [OPTIONS]
//!
//! Options:
//!   --cards <TOKENS>     Hero plus board in one string (e.g. AsKsKh4h5c)
//!   --hero <TOKENS>      Hero hole cards (e.g. AsKs)
//!   --board <TOKENS>     Board cards (default: none)
//!   --pot <BB>           Pot size in big blinds (default: 10)
//!   --call <BB>          Cost to call in big blinds (default: 0)
//!   --trials <N>         Monte Carlo trials (default: 5000)
//!   --seed <N>           Random seed (optional)
//!   --threads <N>        Worker threads (default: auto)
//!   --profile <LABEL>    Opponent profile: random|raised|3bet|4bet|5bet
//!   --range              Print the profile's preflop range grid
//!   --output <FILE>      Write the JSON report to a file

use std::env;
use std::fs::File;
use std::io::Write;
use std::process;
use std::time::Instant;

use indicatif::ProgressBar;

use holdem_equity::advice::{membership_matrix, Analysis, PotType, RANKS_DESC};
use holdem_equity::cards::{parse_hand_line, Board, HoleCards};
use holdem_equity::sim::{EquitySimulator, OpponentProfile, SimulationConfig};

struct Args {
    cards: Option<String>,
    hero: Option<String>,
    board: Option<String>,
    pot: f64,
    call: f64,
    trials: u64,
    seed: Option<u64>,
    threads: Option<usize>,
    profile: OpponentProfile,
    show_range: bool,
    output: Option<String>,
}

fn main() {
    let args = parse_args();

    let (hero, board) = resolve_cards(&args);

    let mut config = SimulationConfig::default()
        .with_trials(args.trials)
        .with_profile(args.profile);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if let Some(threads) = args.threads {
        config = config.with_threads(threads);
    }
    if let Err(err) = config.validate() {
        fail(&err.to_string());
    }

    println!("=== Equity Analysis ===");
    match board.street() {
        Some(street) => println!("Hand: {}   Board: {} ({})", hero, board_label(&board), street),
        None => println!(
            "Hand: {}   Board: {} (incomplete, {} cards)",
            hero,
            board_label(&board),
            board.len()
        ),
    }
    println!(
        "Opponent profile: {} (sampling stays uniform)",
        args.profile
    );
    match args.seed {
        Some(seed) => println!("Trials: {} (seed: {})", args.trials, seed),
        None => println!("Trials: {}", args.trials),
    }
    println!();

    let start = Instant::now();
    let progress = ProgressBar::new(args.trials);
    let simulator = EquitySimulator::new(config);
    let result = simulator.run_monitored(
        &hero,
        &board,
        None,
        Some(|done: u64| progress.set_position(done)),
    );
    progress.finish_and_clear();

    let result = match result {
        Ok(result) => result,
        Err(err) => fail(&err.to_string()),
    };
    let elapsed = start.elapsed();

    let analysis = Analysis::from_result(
        &hero,
        &board,
        args.pot,
        args.call,
        args.profile.name(),
        result,
    );

    println!(
        "Win probability: {:.1}%  (wins {} / ties {} / losses {})",
        analysis.equity_percent, result.wins, result.ties, result.losses
    );
    if let Some(ref made) = analysis.made_hand {
        println!("Hand strength:   {}", made);
    }
    println!(
        "Pot odds:        {:.1}%  (pot {:.1}bb, call {:.1}bb)",
        analysis.pot_odds_percent, args.pot, args.call
    );
    println!("EV of calling:   {:+.2}bb", analysis.expected_value);
    println!("Recommendation:  {}", analysis.recommendation);
    if let Some(advice) = analysis.check_advice {
        println!("Checked to you:  {}", advice);
    }
    println!("Elapsed: {:.2}s", elapsed.as_secs_f64());

    if args.show_range {
        println!();
        match PotType::for_profile(args.profile) {
            Some(pot_type) => print_range_grid(pot_type, &hero),
            None => println!("Profile '{}' has no range to display", args.profile),
        }
    }

    if let Some(ref path) = args.output {
        export_report(&analysis, path);
    }
}

fn parse_args() -> Args {
    let argv: Vec<String> = env::args().collect();

    let mut args = Args {
        cards: None,
        hero: None,
        board: None,
        pot: 10.0,
        call: 0.0,
        trials: 5000,
        seed: None,
        threads: None,
        profile: OpponentProfile::Random,
        show_range: false,
        output: None,
    };

    let mut i = 1;
    while i < argv.len() {
        match argv[i].as_str() {
            "--cards" => args.cards = Some(take_value(&argv, &mut i)),
            "--hero" => args.hero = Some(take_value(&argv, &mut i)),
            "--board" | "-b" => args.board = Some(take_value(&argv, &mut i)),
            "--pot" | "-p" => args.pot = parse_number(&take_value(&argv, &mut i), "--pot"),
            "--call" | "-c" => args.call = parse_number(&take_value(&argv, &mut i), "--call"),
            "--trials" | "-n" => {
                args.trials = parse_number(&take_value(&argv, &mut i), "--trials")
            }
            "--seed" | "-s" => args.seed = Some(parse_number(&take_value(&argv, &mut i), "--seed")),
            "--threads" | "-t" => {
                args.threads = Some(parse_number(&take_value(&argv, &mut i), "--threads"))
            }
            "--profile" => {
                let label = take_value(&argv, &mut i);
                args.profile = match OpponentProfile::from_label(&label) {
                    Some(profile) => profile,
                    None => fail(&format!("unknown profile '{}'", label)),
                };
            }
            "--range" => args.show_range = true,
            "--output" | "-o" => args.output = Some(take_value(&argv, &mut i)),
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            other => fail(&format!("unknown option '{}'", other)),
        }
        i += 1;
    }

    if args.cards.is_none() && args.hero.is_none() {
        print_usage();
        process::exit(2);
    }
    args
}

fn take_value(argv: &[String], i: &mut usize) -> String {
    *i += 1;
    match argv.get(*i) {
        Some(value) => value.clone(),
        None => fail(&format!("{} requires a value", argv[*i - 1])),
    }
}

fn parse_number<T: std::str::FromStr>(value: &str, flag: &str) -> T {
    match value.parse() {
        Ok(parsed) => parsed,
        Err(_) => fail(&format!("{} got an invalid value '{}'", flag, value)),
    }
}

fn resolve_cards(args: &Args) -> (HoleCards, Board) {
    if let Some(ref line) = args.cards {
        match parse_hand_line(line) {
            Ok(parsed) => return parsed,
            Err(err) => fail(&err.to_string()),
        }
    }

    let hero = match args.hero.as_deref().map(HoleCards::parse) {
        Some(Ok(hero)) => hero,
        Some(Err(err)) => fail(&format!("invalid hero hand: {}", err)),
        None => fail("--hero or --cards is required"),
    };
    let board = match Board::parse(args.board.as_deref().unwrap_or("")) {
        Ok(board) => board,
        Err(err) => fail(&format!("invalid board: {}", err)),
    };
    (hero, board)
}

fn board_label(board: &Board) -> String {
    if board.is_empty() {
        "-".to_string()
    } else {
        board.to_string()
    }
}

fn print_range_grid(pot_type: PotType, hero: &HoleCards) {
    let mask = membership_matrix(pot_type);
    println!(
        "Range grid: {} ({} hand classes)",
        pot_type,
        pot_type.hands().len()
    );

    print!("   ");
    for rank in RANKS_DESC {
        print!(" {}", rank);
    }
    println!();
    for (row, row_rank) in RANKS_DESC.iter().enumerate() {
        print!("  {}", row_rank);
        for col in 0..13 {
            print!(" {}", if mask[row][col] { 'X' } else { '.' });
        }
        println!();
    }

    if pot_type.contains(hero) {
        println!("{} ({}) is inside this range", hero, hero.class_string());
    } else {
        println!("{} ({}) is outside this range", hero, hero.class_string());
    }
}

fn export_report(analysis: &Analysis, path: &str) {
    let json = match serde_json::to_string_pretty(analysis) {
        Ok(json) => json,
        Err(err) => fail(&format!("failed to serialize report: {}", err)),
    };
    let written = File::create(path).and_then(|mut file| file.write_all(json.as_bytes()));
    match written {
        Ok(()) => println!("Report written to {}", path),
        Err(err) => fail(&format!("failed to write {}: {}", path, err)),
    }
}

fn print_usage() {
    println!("Usage: analyze --cards <TOKENS> [OPTIONS]");
    println!("       analyze --hero <TOKENS> [--board <TOKENS>] [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --cards <TOKENS>   Hero plus board in one string (e.g. AsKsKh4h5c)");
    println!("  --hero <TOKENS>    Hero hole cards (e.g. AsKs)");
    println!("  --board <TOKENS>   Board cards (default: none)");
    println!("  --pot <BB>         Pot size in big blinds (default: 10)");
    println!("  --call <BB>        Cost to call in big blinds (default: 0)");
    println!("  --trials <N>       Monte Carlo trials (default: 5000)");
    println!("  --seed <N>         Random seed (optional)");
    println!("  --threads <N>      Worker threads (default: auto)");
    println!("  --profile <LABEL>  Opponent profile: random|raised|3bet|4bet|5bet");
    println!("  --range            Print the profile's preflop range grid");
    println!("  --output <FILE>    Write the JSON report to a file");
}

fn fail(message: &str) -> ! {
    eprintln!("error: {}", message);
    process::exit(1);
}
