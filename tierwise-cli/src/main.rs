mod config;
mod output;

use clap::Parser;
use rand::seq::SliceRandom;
use rand::Rng;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tierwise_core::{ItemRecord, Outcome, RankConfig, RankSession};

pub fn bail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

#[derive(Parser)]
#[command(name = "tierwise", version, about = "Rank items into tiers using head-to-head votes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Rank a list of items interactively
    Rank(RankArgs),
    /// Create a default config file at ~/.config/tierwise/config.toml
    Init,
}

#[derive(Parser)]
struct RankArgs {
    /// File with one item per line. A line may carry a starting tier as
    /// "TIER:name", where TIER is a tier label or 0-based index
    #[arg(long)]
    items: Option<PathBuf>,

    /// Inline item (repeatable), same format as file lines
    #[arg(long = "item")]
    inline_items: Vec<String>,

    /// Comma-separated tier labels, best to worst (default: S,A,B,C,D,F)
    #[arg(long)]
    tiers: Option<String>,

    /// Comparisons an item needs before it can leave "unranked"
    #[arg(long)]
    min_comparisons: Option<u32>,

    /// Desired comparisons per item for the vote loop
    #[arg(long)]
    target: Option<u32>,

    /// Output JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Path to config file (default: ~/.config/tierwise/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Parse one item line: an optional "TIER:" prefix (tier label,
/// case-insensitive, or 0-based index) followed by the item name.
/// A prefix that matches no tier is treated as part of the name.
fn parse_item_line(line: &str, labels: &[String]) -> (String, usize) {
    if let Some((prefix, rest)) = line.split_once(':') {
        let prefix = prefix.trim();
        let rest = rest.trim();
        if !rest.is_empty() {
            if let Some(idx) = labels.iter().position(|l| l.eq_ignore_ascii_case(prefix)) {
                return (rest.to_string(), idx);
            }
            if let Ok(idx) = prefix.parse::<usize>() {
                return (rest.to_string(), idx.min(labels.len().saturating_sub(1)));
            }
        }
    }
    // No usable prefix: default to the middle tier, a neutral prior.
    (line.trim().to_string(), labels.len() / 2)
}

/// Load items from the --items file and/or inline --item flags.
fn load_items(args: &RankArgs, labels: &[String]) -> Vec<(String, usize)> {
    let mut lines: Vec<String> = Vec::new();

    if let Some(ref path) = args.items {
        let content = std::fs::read_to_string(path)
            .unwrap_or_else(|e| bail(format!("Failed to read items file {}: {e}", path.display())));
        lines.extend(content.lines().map(|l| l.trim().to_string()).filter(|l| !l.is_empty()));
    }
    lines.extend(args.inline_items.iter().map(|l| l.trim().to_string()).filter(|l| !l.is_empty()));

    if lines.len() < 2 {
        bail(format!("Need at least 2 items to rank, got {}", lines.len()));
    }

    let items: Vec<(String, usize)> = lines.iter().map(|l| parse_item_line(l, labels)).collect();
    for (i, (name, _)) in items.iter().enumerate() {
        if items[..i].iter().any(|(other, _)| other.eq_ignore_ascii_case(name)) {
            bail(format!("Duplicate item: \"{name}\""));
        }
    }
    items
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Rank(args) => run_rank(args),
        Commands::Init => {
            let path = config::create_default_config();
            println!("Created config at {}", path.display());
            println!("Edit it to set your default tier labels.");
        }
    }
}

fn build_session(items: &[(String, usize)], rank_config: &RankConfig, outcomes: &[Outcome]) -> RankSession {
    let pool: Vec<ItemRecord> = items
        .iter()
        .enumerate()
        .map(|(i, (name, tier))| ItemRecord::new(i as i64 + 1, name, *tier))
        .collect();
    let mut session = RankSession::new(pool, rank_config.clone())
        .unwrap_or_else(|e| bail(format!("Invalid configuration: {e}")));
    for outcome in outcomes {
        session.record_outcome(outcome.winner, outcome.loser);
    }
    session
}

/// Pair up items that haven't met the minimum comparison count yet. The
/// engine only proposes refinement probes over the ranked order, so a fresh
/// pool produces an empty queue; these pairs get everyone past the
/// "unranked" threshold.
fn bootstrap_pairs(session: &RankSession, rng: &mut impl Rng) -> Vec<(i64, i64)> {
    let min = session.config().min_comparisons;
    let mut fresh: Vec<i64> = session
        .pool()
        .iter()
        .filter(|item| item.comparisons < min)
        .map(|item| item.id)
        .collect();
    if fresh.is_empty() {
        return Vec::new();
    }
    fresh.shuffle(rng);
    if fresh.len() % 2 == 1 {
        // Odd one out meets an already-sampled opponent, or wraps around.
        let lone = *fresh.last().expect("nonempty");
        let partner = session
            .pool()
            .iter()
            .filter(|item| item.comparisons >= min)
            .map(|item| item.id)
            .next()
            .unwrap_or(fresh[0]);
        if partner != lone {
            fresh.push(partner);
        } else {
            fresh.pop();
        }
    }
    fresh.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect()
}

fn name_of(session: &RankSession, id: i64) -> String {
    session
        .pool()
        .iter()
        .find(|item| item.id == id)
        .map(|item| item.name_key.clone())
        .expect("queue pairs come from the pool")
}

fn run_rank(args: RankArgs) {
    // Load config file, merge with CLI args (CLI wins).
    let config_path = args.config.clone().unwrap_or_else(config::config_path);
    let cfg = config::load_config(&config_path);

    let tier_labels: Vec<String> = args
        .tiers
        .as_ref()
        .map(|s| s.split(',').map(|l| l.trim().to_string()).collect())
        .or(cfg.tier_labels)
        .unwrap_or_else(|| RankConfig::default().tier_labels);

    let mut rank_config = RankConfig { tier_labels, ..RankConfig::default() };
    if let Some(m) = args.min_comparisons.or(cfg.min_comparisons) {
        rank_config.min_comparisons = m;
    }
    if let Some(t) = args.target.or(cfg.target_comparisons) {
        rank_config.target_comparisons = t;
    }
    rank_config
        .validate()
        .unwrap_or_else(|e| bail(format!("Invalid configuration: {e}")));

    let items = load_items(&args, &rank_config.tier_labels);
    let n = items.len();
    let target_decisions = (rank_config.effective_target(n) as usize * n).div_ceil(2);

    let mut session = build_session(&items, &rank_config, &[]);
    let mut rng = rand::rng();
    let stdin = io::stdin();
    let mut answers = stdin.lock().lines();

    eprintln!("{n} items, aiming for ~{target_decisions} decisions. 1/2 = winner, s = skip, u = undo, q = quit.\n");

    'voting: while session.decision_count() < target_decisions {
        // Items still short of min_comparisons vote first; the engine only
        // probes the ranked order and would otherwise never surface them.
        let mut queue = bootstrap_pairs(&session, &mut rng);
        let (_, refinements) = session.quick_pass();
        queue.extend(refinements);
        if queue.is_empty() {
            break;
        }
        for (a, b) in queue {
            if session.decision_count() >= target_decisions {
                break 'voting;
            }
            // Flip presentation sides so positional habits don't leak into
            // the data. The engine itself never randomizes.
            let (left, right) = if rng.random::<f64>() < 0.5 { (a, b) } else { (b, a) };
            let (left_name, right_name) = (name_of(&session, left), name_of(&session, right));

            loop {
                eprint!(
                    "[{}/{}] Which ranks higher?  [1] {}  [2] {}  > ",
                    session.decision_count() + 1,
                    target_decisions,
                    left_name,
                    right_name,
                );
                io::stderr().flush().ok();
                let Some(line) = answers.next() else { break 'voting };
                let line = line.unwrap_or_else(|e| bail(format!("Failed to read vote: {e}")));
                match line.trim() {
                    "1" => {
                        session.record_outcome(left, right);
                        break;
                    }
                    "2" => {
                        session.record_outcome(right, left);
                        break;
                    }
                    "s" | "" => break,
                    "u" => {
                        // Undo by replaying everything but the last outcome
                        // into a fresh session.
                        let mut outcomes = session.outcomes().to_vec();
                        if outcomes.pop().is_none() {
                            eprintln!("Nothing to undo.");
                            continue;
                        }
                        session = build_session(&items, &rank_config, &outcomes);
                        continue 'voting;
                    }
                    "q" => break 'voting,
                    _ => eprintln!("Enter 1, 2, s, u, or q."),
                }
            }
        }
    }

    let assignment = session.finalize();
    eprintln!();
    if args.json {
        output::print_json(&assignment, session.pool(), session.decision_count());
    } else {
        output::print_table(&assignment, session.pool(), session.decision_count());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> Vec<String> {
        RankConfig::default().tier_labels
    }

    #[test]
    fn test_parse_item_line_label_prefix() {
        assert_eq!(parse_item_line("B:Ken", &labels()), ("Ken".to_string(), 2));
        assert_eq!(parse_item_line("s: Ryu", &labels()), ("Ryu".to_string(), 0));
    }

    #[test]
    fn test_parse_item_line_index_prefix() {
        assert_eq!(parse_item_line("4:Dan", &labels()), ("Dan".to_string(), 4));
        // Out-of-range indices clamp to the last tier.
        assert_eq!(parse_item_line("99:Dan", &labels()), ("Dan".to_string(), 5));
    }

    #[test]
    fn test_parse_item_line_plain_name_gets_middle_tier() {
        assert_eq!(parse_item_line("Sakura", &labels()), ("Sakura".to_string(), 3));
    }

    #[test]
    fn test_parse_item_line_unknown_prefix_is_part_of_name() {
        assert_eq!(
            parse_item_line("Guilty Gear: Strive", &labels()),
            ("Guilty Gear: Strive".to_string(), 3)
        );
    }
}
