use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use buzzword_bingo::{
    CardSession, GenerateRequest, GenerateResponse, SeededSource, Settings, board_renderer,
    handle_generate, share,
};
use log::{error, info};

const USAGE: &str = "usage: buzzword-bingo [MEETING_TYPE] [--cards N] [--seed N] [--mark i,j,...] [--png PATH] [--config PATH] [--list]";

#[derive(Debug, Default)]
struct Args {
    meeting_type: Option<String>,
    cards: Option<usize>,
    seed: Option<u64>,
    marks: Vec<usize>,
    png: Option<PathBuf>,
    config: Option<PathBuf>,
    list: bool,
}

fn parse_args(mut raw: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut args = Args::default();
    while let Some(arg) = raw.next() {
        let mut value = |name: &str| raw.next().ok_or_else(|| format!("{name} needs a value"));
        match arg.as_str() {
            "--cards" => args.cards = Some(value("--cards")?.parse().map_err(|e| format!("--cards: {e}"))?),
            "--seed" => args.seed = Some(value("--seed")?.parse().map_err(|e| format!("--seed: {e}"))?),
            "--mark" => {
                for part in value("--mark")?.split(',').filter(|p| !p.is_empty()) {
                    args.marks.push(part.trim().parse().map_err(|e| format!("--mark {part}: {e}"))?);
                }
            }
            "--png" => args.png = Some(PathBuf::from(value("--png")?)),
            "--config" => args.config = Some(PathBuf::from(value("--config")?)),
            "--list" => args.list = true,
            "-h" | "--help" => return Err(USAGE.to_string()),
            other if other.starts_with("--") => return Err(format!("unknown option {other}\n{USAGE}")),
            other => args.meeting_type = Some(other.to_string()),
        }
    }
    Ok(args)
}

fn run(args: Args) -> buzzword_bingo::Result<()> {
    let settings = Settings::load(args.config.as_deref())?;
    let bank = Arc::new(settings.word_bank()?);

    if args.list {
        for mt in bank.meeting_types() {
            println!("{:>2}  {:<18} {}", mt.id, mt.name, mt.display_name);
        }
        return Ok(());
    }

    let source = match args.seed.or(settings.seed) {
        Some(seed) => SeededSource::seeded(seed),
        None => SeededSource::from_entropy(),
    };
    let mut session = CardSession::new(Arc::clone(&bank), source)
        .with_strict_meeting_types(settings.strict_meeting_types)
        .with_max_cards(settings.max_cards);

    let request = GenerateRequest {
        meeting_type: args.meeting_type.unwrap_or_else(|| bank.default_type().to_string()),
        num_cards: args.cards,
    };
    handle_generate(&mut session, &request)?;

    for &index in &args.marks {
        if let Some(event) = session.toggle_square(index, None)? {
            info!("bingo on card #{} via {:?}", event.card_id, event.lines);
        }
    }

    let Some(set) = session.card_set() else { return Ok(()) };
    let response = GenerateResponse::from(set);
    println!("{}", serde_json::to_string_pretty(&response)?);

    let card = set.active_card();
    println!("{}", share::share_text_for(card, bank.display_name(card.meeting_type())));

    if let Some(path) = &args.png {
        board_renderer::render_card_to_png(card, &settings.render, path)?;
        println!("Bingo card image written to {}", path.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::from(2);
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
