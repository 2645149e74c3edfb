//! pokerlens Binary
//!
//! Replays a recorded game log, or follows a live game and prompts for
//! the hero's moves whenever the server asks for one.

use clap::Parser;
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Input;
use dialoguer::Select;
use pokerlens::live::Phase;
use pokerlens::live::StartRequest;
use pokerlens::live::Visibility;
use pokerlens::session::ActionRequest;
use pokerlens::session::Change;
use pokerlens::session::Move;
use pokerlens::session::Status;
use pokerlens::session::UserAction;
use pokerlens::timeline::EventTimeline;
use pokerlens::timeline::Summary;
use pokerlens::view::Projection;
use pokerlens::view::TableInfo;
use pokerlens::view::ViewMode;
use pokerlens::*;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "pokerlens", about = "Watch LLM poker games live or from logs")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Autoplay a recorded game log
    Replay {
        path: PathBuf,
        /// Milliseconds between decisions
        #[arg(long, env = "POKERLENS_REPLAY_SPEED_MS")]
        speed: Option<u64>,
        /// Only show this player's decisions
        #[arg(long)]
        player: Option<String>,
        /// Start from this hand
        #[arg(long)]
        hand: Option<HandNumber>,
    },
    /// Follow a running game
    Live {
        /// Game server base URL
        #[arg(long, env = "POKERLENS_API_BASE")]
        base: Option<String>,
        /// Hero credential from a previous start
        #[arg(long)]
        token: Option<String>,
        /// Start a new game before connecting
        #[arg(long)]
        start: bool,
        /// Hero name for a new game
        #[arg(long, default_value = "You")]
        name: String,
        /// Reveal every seat's hole cards
        #[arg(long)]
        debug: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    log()?;
    kys();
    let mut config = Config::from_env();
    match Args::parse().command {
        Command::Replay {
            path,
            speed,
            player,
            hand,
        } => {
            if let Some(ms) = speed {
                config.replay_speed = Duration::from_millis(ms.max(1));
            }
            replay(config, path, player, hand).await
        }
        Command::Live {
            base,
            token,
            start,
            name,
            debug,
        } => {
            if let Some(base) = base {
                config.api_base = parse_base(&base)?;
            }
            let request = start.then(|| StartRequest {
                view: if debug {
                    Visibility::Debug
                } else {
                    Visibility::User
                },
                ..StartRequest::new(name)
            });
            live(config, token, request).await
        }
    }
}

async fn replay(
    config: Config,
    path: PathBuf,
    player: Option<String>,
    hand: Option<HandNumber>,
) -> anyhow::Result<()> {
    let timeline = EventTimeline::open(&path)?;
    summarize(&timeline.summary());
    let mut viewer = Viewer::new(config);
    viewer.open_replay(timeline);
    let replay = viewer
        .replay_mut()
        .ok_or_else(|| anyhow::anyhow!("replay did not open"))?;
    if let Some(player) = player {
        replay.select_player(player);
        replay.set_mode(ViewMode::Player);
    }
    if let Some(hand) = hand {
        if !replay.jump_to_hand(hand) {
            log::warn!("[replay] hand {} has no decisions", hand);
        }
    }
    let mut changes = replay.subscribe();
    let mut hand = replay.projection().hand_number();
    frame(&replay.projection());
    replay.play();
    'play: loop {
        tokio::select! {
            change = changes.recv() => match change {
                Some(Change::Cursor { .. }) => {
                    let projection = replay.projection();
                    if projection.hand_number() != hand {
                        settle(&projection, hand);
                        hand = projection.hand_number();
                    }
                    frame(&projection);
                }
                Some(_) => continue 'play,
                None => break 'play,
            },
            _ = tokio::time::sleep(replay.speed() * 2) => if !replay.playing() { break 'play },
        }
    }
    let projection = replay.projection();
    settle(&projection, hand);
    standings(&projection);
    viewer.teardown();
    Ok(())
}

async fn live(
    config: Config,
    token: Option<String>,
    request: Option<StartRequest>,
) -> anyhow::Result<()> {
    let mut viewer = Viewer::new(config);
    viewer.go_live_net();
    let live = viewer
        .live()
        .ok_or_else(|| anyhow::anyhow!("live session did not open"))?;
    if let Some(request) = request {
        let reply = live.start_session(&request).await?;
        println!("{} game {} for {}", "started".green(), reply.status, request.human_name);
    }
    let mut changes = live.subscribe();
    live.connect(token)?;
    while let Some(change) = changes.recv().await {
        match change {
            Change::Phase(Phase::Open) => {
                println!("{}", "connected".green());
                live.request_snapshot();
            }
            Change::Phase(Phase::Closed) => {
                println!("{}", "disconnected".red());
                break;
            }
            Change::Snapshot => table(&live.table()),
            Change::Error => {
                if let Some(e) = live.with_state(|s| s.error().map(str::to_string)) {
                    eprintln!("{} {}", "error".red(), e);
                }
            }
            Change::Status(Status::Finished) => println!("{}", "game over".bold()),
            Change::Journal => live.with_state(|s| {
                if let Some(entry) = s.journal().latest() {
                    log::debug!("[live] {} {}", entry.kind, entry.payload);
                }
            }),
            Change::Request => {
                let Some(request) = live.with_state(|s| s.request().cloned()) else {
                    continue;
                };
                let action = tokio::task::spawn_blocking(move || prompt(&request)).await??;
                if let Err(e) = live.send_action(&action).await {
                    eprintln!("{} {}", "rejected".red(), e);
                }
            }
            _ => {}
        }
    }
    viewer.teardown();
    Ok(())
}

fn prompt(request: &ActionRequest) -> anyhow::Result<UserAction> {
    let moves = request.legal_actions.moves();
    if moves.is_empty() {
        anyhow::bail!("no legal actions for {}", request.hero);
    }
    let labels = moves
        .iter()
        .map(|m| match m {
            Move::Call => format!("call {}", request.call_amount),
            Move::AllIn => format!("all-in {}", request.chips),
            m => m.label().to_string(),
        })
        .collect::<Vec<_>>();
    let choice = Select::new()
        .with_prompt(format!(
            "Hand #{} {} | {} chips, {} to call",
            request.hand_number, request.stage, request.chips, request.call_amount
        ))
        .report(false)
        .items(&labels)
        .default(0)
        .interact()?;
    match moves[choice] {
        Move::Raise => {
            let min = request.min_raise;
            let max = request.chips;
            let amount = Input::<Chips>::new()
                .with_prompt(format!("Raise [{}-{}]", min, max))
                .validate_with(|n: &Chips| -> Result<(), String> {
                    if *n < min {
                        return Err(format!("Minimum raise is {}", min));
                    }
                    if *n > max {
                        return Err(format!("Maximum raise is {}", max));
                    }
                    Ok(())
                })
                .report(false)
                .interact_text()?;
            Ok(UserAction::new(Move::Raise, amount))
        }
        Move::Call => Ok(UserAction::new(Move::Call, request.call_amount)),
        Move::AllIn => Ok(UserAction::new(Move::AllIn, request.chips)),
        other => Ok(UserAction::new(other, 0)),
    }
}

fn summarize(summary: &Summary) {
    println!(
        "{} {} ({} -> {})",
        "game".bold(),
        summary.game_id,
        summary.start_time,
        summary.end_time
    );
    println!(
        "{} hands, {} decisions, {} reflections",
        summary.total_hands, summary.total_decisions, summary.total_reflections
    );
    for player in summary.players.iter() {
        println!("  {} ({}) {}", player.name, player.model_name, player.initial_chips);
    }
}

fn frame(projection: &Projection) {
    println!(
        "{} {} pot {} [{}]",
        format!("Hand #{}", projection.hand_number()).bold(),
        projection.stage(),
        projection.pot(),
        projection.community_cards().join(" ")
    );
    if let Some(decision) = projection.filtered_decision() {
        println!("  {}", decision.to_string().cyan());
        if !decision.play_reason.is_empty() {
            println!("    {}", decision.play_reason.dimmed());
        }
    }
}

fn settle(projection: &Projection, hand: HandNumber) {
    if let Some(result) = projection.settlement(Some(hand)) {
        println!("{}", result.to_string().yellow());
        for player in result.players.iter() {
            let net = match player.net_result {
                n if n > 0 => format!("+{}", n).green(),
                n if n < 0 => format!("{}", n).red(),
                n => format!("{}", n).normal(),
            };
            println!("  {:<16} {:>8} {}", player.name, player.chips_after, net);
        }
    }
}

fn standings(projection: &Projection) {
    println!("{}", "standings".bold());
    for stat in projection.player_stats() {
        println!(
            "  #{} {:<16} {:<24} {:>6} -> {:<6} {} decisions, {} reflections",
            stat.rank,
            stat.name,
            stat.model_name,
            stat.initial_chips,
            stat.final_chips,
            stat.decisions.len(),
            stat.reflections.len()
        );
    }
}

fn table(table: &TableInfo) {
    println!(
        "{} {} pot {} bet {} [{}]",
        format!("Hand #{}", table.hand_number).bold(),
        table.stage,
        table.pot,
        table.current_bet,
        table.community_cards.join(" ")
    );
    for (i, seat) in table.players.iter().enumerate() {
        let button = if table.dealer_position == Some(i) { "D" } else { " " };
        let status = match (seat.folded, seat.all_in) {
            (true, _) => "folded".dimmed(),
            (_, true) => "all-in".red(),
            _ => "".normal(),
        };
        let cards = seat.hand.as_ref().map(|h| h.join(" ")).unwrap_or_default();
        println!(
            "  {} {:<16} {:>8} {:>6} {} {}",
            button, seat.name, seat.chips, seat.bet_in_round, cards, status
        );
    }
}
