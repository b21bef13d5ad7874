use clap::Parser;
use lucky_draw::core::ConfigProvider;
use lucky_draw::utils::error::ErrorSeverity;
use lucky_draw::utils::{logger, validation::Validate};
use lucky_draw::{
    CliConfig, CsvResultWriter, DrawModel, DrawSession, Participant, RoundOutcome,
    SessionCommand, SessionRun, ShuffleTimer,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting lucky-draw");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ Draw failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        // 依錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(cli: &CliConfig) -> lucky_draw::Result<()> {
    let config = cli.resolve()?;
    config.validate()?;

    let rng = match config.draw.seed {
        Some(seed) => {
            tracing::info!("🔧 Using fixed seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    // 載入當下的名單，包含報名表單已寫入的資料
    let writer = CsvResultWriter::new(config.output_dir());
    let model = DrawModel::open(config.participants_path(), writer, rng)?;

    let mut session = DrawSession::new(model);
    if config.animation.enabled {
        session = session.with_shuffle(ShuffleTimer::new(config.animation.shuffle_settings()));
    }

    let total = session.model().participants().len();
    if cli.json {
        tracing::info!(
            "{} participants loaded from {}",
            total,
            config.participants_path().display()
        );
    } else {
        println!(
            "🎉 {} participants loaded from {}",
            total,
            config.participants_path().display()
        );
    }

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let shuffle_for = config.animation.duration();
    let mut run = SessionRun::default();

    for &count in &config.draw.rounds {
        if cli.interactive && !wait_for_start(&mut session, &mut stdin, count).await {
            tracing::info!("Remaining rounds skipped by operator");
            break;
        }
        if cli.interactive && config.animation.enabled {
            eprintln!("Press Enter to stop.");
        }

        let interactive = cli.interactive && config.animation.enabled;
        let stdin_ref = &mut stdin;
        let stop = async move {
            if interactive {
                let _ = stdin_ref.next_line().await;
            } else {
                tokio::time::sleep(shuffle_for).await;
            }
        };

        let result = session.run_round(count, stop, show_frame).await;
        if config.animation.enabled {
            eprintln!();
        }

        match result {
            Ok(outcome) => {
                if !cli.json {
                    print_round(&outcome);
                }
                run.outcomes.push(outcome);
            }
            Err(e) => {
                run.error = Some(e);
                break;
            }
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&run.report())?);
    } else {
        println!(
            "✅ {} rounds complete, {} winners, {} participants remaining",
            run.outcomes.len(),
            session.model().winners().len(),
            session.model().remaining_count()
        );
    }

    let unsaved = run.outcomes.iter().filter(|o| !o.is_saved()).count();
    if unsaved > 0 {
        tracing::warn!("{} round result files were not saved", unsaved);
    }

    run.into_result().map(|_| ())
}

/// Read operator commands until the next round should start.
/// Returns `false` when the operator quits.
async fn wait_for_start<R>(
    session: &mut DrawSession<CsvResultWriter, StdRng>,
    stdin: &mut Lines<BufReader<R>>,
    count: usize,
) -> bool
where
    R: tokio::io::AsyncRead + Unpin,
{
    loop {
        eprint!(
            "Round {} ({} winners): Enter = start, r = reset, i [path] = import, q = quit > ",
            session.model().current_round() + 1,
            count
        );
        let _ = std::io::stderr().flush();

        // stdin 關閉時直接開始
        let line = match stdin.next_line().await {
            Ok(Some(line)) => line,
            _ => return true,
        };

        match SessionCommand::parse(&line) {
            Some(SessionCommand::Start) => return true,
            Some(SessionCommand::Quit) => return false,
            Some(SessionCommand::Reset) => {
                let pool = session.reset();
                eprintln!("🔄 Draw reset, {} participants back in the pool", pool);
            }
            Some(SessionCommand::Import(path)) => match session.import(path.as_deref()) {
                Ok(loaded) => eprintln!(
                    "📥 {} participants loaded from {}",
                    loaded,
                    session.model().source_path().display()
                ),
                Err(e) => {
                    eprintln!("❌ {}", e.user_friendly_message());
                    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
                }
            },
            None => eprintln!("Unknown command: {}", line.trim()),
        }
    }
}

fn show_frame(names: &[Participant]) {
    let line = names
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join("  ");
    eprint!("\r\x1b[2K🎲 {}", line);
    let _ = std::io::stderr().flush();
}

fn print_round(outcome: &RoundOutcome) {
    println!("🏆 Round {} ({} winners)", outcome.round, outcome.winners.len());
    println!("{:<8} {:<20} {}", "Round", "Department", "Name");
    for winner in &outcome.winners {
        println!(
            "{:<8} {:<20} {}",
            outcome.round, winner.department, winner.name
        );
    }
    match &outcome.saved_to {
        Ok(path) => println!("📁 Saved to: {}", path.display()),
        Err(e) => eprintln!("⚠️  {}", e.user_friendly_message()),
    }
}
