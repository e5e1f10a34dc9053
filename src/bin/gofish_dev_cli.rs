// src/bin/gofish_dev_cli.rs
//
// Dev-CLI: прогоняет полную игру с настоящим tokio-таймером и печатает события.
// Ввод: два файла (одно имя на строку); если не заданы — берём последний
// сохранённый ввод из JSON-хранилища.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use clap::Parser;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use gofish_engine::api::{
    execute_command, Command, CommandResult, ResolveCatchCommand, StartGameCommand,
};
use gofish_engine::engine::{
    ChannelObserver, GameEvent, GameEventKind, PairingEngine, RandomSource,
};
use gofish_engine::infra::{JsonFileRosterStore, RngSeed, RosterStore};
use gofish_engine::time_ctrl::{CastProfile, CastRules, CatchTicket, TokioTimer};

#[derive(Debug, Parser)]
#[command(name = "gofish_dev_cli", about = "Go Fish for a Team Mate (dev CLI)")]
struct Args {
    /// Файл с рыбаками (одно имя на строку).
    fishermen: Option<PathBuf>,

    /// Файл с рыбами (одно имя на строку).
    fish: Option<PathBuf>,

    /// Быстрый профиль тайминга.
    #[arg(long)]
    quick: bool,

    /// Правила тайминга из TOML (перекрывают --quick).
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Базовый seed (по умолчанию случайный, печатается для реплея).
    #[arg(long)]
    seed: Option<u64>,

    /// Сколько игр сыграть подряд ("play again").
    #[arg(long, default_value_t = 1)]
    games: u64,

    /// Где хранить последний ввод.
    #[arg(long, default_value = ".gofish_rosters.json")]
    store: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let rules = match &args.rules {
        Some(path) => {
            CastRules::load(path).with_context(|| format!("rules {}", path.display()))?
        }
        None if args.quick => CastRules::from_profile(CastProfile::Quick),
        None => CastRules::from_profile(CastProfile::Standard),
    };

    let mut store = JsonFileRosterStore::new(&args.store);
    let (fishermen_text, fish_text) = match (&args.fishermen, &args.fish) {
        (Some(a), Some(b)) => (
            std::fs::read_to_string(a).with_context(|| format!("read {}", a.display()))?,
            std::fs::read_to_string(b).with_context(|| format!("read {}", b.display()))?,
        ),
        (None, None) => match store.load()? {
            Some(saved) => (saved.fishermen, saved.fish),
            None => bail!(
                "no name files given and nothing saved in {}",
                args.store.display()
            ),
        },
        _ => bail!("give both files: <fishermen> <fish>"),
    };

    let base_seed = args.seed.unwrap_or_else(rand::random);
    println!(
        "gofish_dev_cli: seed={base_seed} delay={}..={}ms",
        rules.min_delay_ms, rules.max_delay_ms
    );

    let (timer, mut fired) = TokioTimer::new(Handle::current());
    let mut engine = PairingEngine::new(RngSeed::from_u64(base_seed).to_rng(), rules, timer)?;

    let (events_tx, mut events) = mpsc::unbounded_channel();
    engine.subscribe(ChannelObserver(events_tx));

    for game_no in 1..=args.games {
        if game_no > 1 {
            execute_command(&mut engine, &mut store, Command::PlayAgain)
                .map_err(|e| anyhow!("{e:?}"))?;
        }
        println!();
        println!("================ GAME {game_no} =================");
        play_one_game(
            &mut engine,
            &mut fired,
            &mut events,
            &mut store,
            &fishermen_text,
            &fish_text,
        )
        .await?;
    }

    println!("[CLI] Завершение работы dev-CLI.");
    Ok(())
}

/// Одна полная игра: GO FISH за каждого рыбака, ждём таймер, печатаем улов.
async fn play_one_game<R: RandomSource>(
    engine: &mut PairingEngine<R, TokioTimer>,
    fired: &mut mpsc::UnboundedReceiver<CatchTicket>,
    events: &mut mpsc::UnboundedReceiver<GameEvent>,
    store: &mut impl RosterStore,
    fishermen_text: &str,
    fish_text: &str,
) -> anyhow::Result<()> {
    let start = Command::StartGame(StartGameCommand {
        fishermen_text: fishermen_text.to_string(),
        fish_text: fish_text.to_string(),
    });
    let started = execute_command(engine, store, start).map_err(|e| anyhow!("{e:?}"))?;
    show_events(events, None).await;
    if !matches!(started, CommandResult::Started(_)) {
        bail!("unexpected start result: {started:?}");
    }

    let catch_display = engine.rules().catch_display();
    loop {
        execute_command(engine, store, Command::GoFish)
            .map_err(|e| anyhow!("go fish rejected: {e:?}"))?;
        show_events(events, None).await;

        // Нетерпеливый второй клик: движок обязан его отклонить.
        if execute_command(engine, store, Command::GoFish).is_ok() {
            bail!("second cast in the same turn was accepted");
        }

        let Some(ticket) = fired.recv().await else {
            bail!("timer channel closed");
        };

        let result = execute_command(
            engine,
            store,
            Command::ResolveCatch(ResolveCatchCommand { ticket }),
        )
        .map_err(|e| anyhow!("{e:?}"))?;
        // Улов висит на экране `catch_display`, и только потом следующий ход / итоги.
        show_events(events, Some(catch_display)).await;

        if matches!(result, CommandResult::GameEnded(_)) {
            break;
        }
    }

    Ok(())
}

/// Напечатать накопившиеся события; после улова выдержать `pause`.
async fn show_events(events: &mut mpsc::UnboundedReceiver<GameEvent>, pause: Option<Duration>) {
    while let Ok(event) = events.try_recv() {
        print_event(&event);
        if let (GameEventKind::CatchResolved(_), Some(pause)) = (&event.kind, pause) {
            tokio::time::sleep(pause).await;
        }
    }
}

fn print_event(event: &GameEvent) {
    match &event.kind {
        GameEventKind::GameStarted { fishermen, fish, .. } => {
            println!("{fishermen} fishermen, {fish} fish in the water");
        }
        GameEventKind::TurnStarted {
            turn,
            fisherman,
            remaining_fish,
        } => {
            println!();
            println!(
                "[turn {}] {fisherman} is up ({remaining_fish} fish left)",
                turn + 1
            );
        }
        GameEventKind::CastStarted { .. } => {
            println!("  Waiting for a nibble...");
        }
        GameEventKind::CatchResolved(record) => {
            println!("  {} caught {}!", record.fisherman, record.fish);
        }
        GameEventKind::GameEnded(summary) => {
            println!();
            println!("------ PAIRS ------");
            for record in &summary.pairings {
                println!("  {} + {}", record.fisherman, record.fish);
            }
            if !summary.unpaired_fishermen.is_empty() {
                println!("  (no turn for: {})", join(&summary.unpaired_fishermen));
            }
            if !summary.leftover_fish.is_empty() {
                println!("  (still swimming: {})", join(&summary.leftover_fish));
            }
        }
        GameEventKind::GameAbandoned { game_id } => {
            println!("game {game_id} abandoned");
        }
    }
}

fn join<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
