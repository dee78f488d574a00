use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use lesson_core::QuestionSession;
use lesson_core::model::StageId;
use services::{Clock, DemoLoopService, DemoSession, IntentOutcome, LessonIntent};
use storage::{ContentRepository, InMemoryContent, sample};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidStage { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidStage { raw } => write!(f, "invalid --stage value: {raw:?}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- play  [--content <catalog.json>] [--stage <stage-id>]");
    eprintln!("  cargo run -p app -- check [--content <catalog.json>]");
    eprintln!();
    eprintln!("Without --content the bundled demo lessons are used.");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  LAZY_ALGO_CONTENT, LAZY_ALGO_STAGE, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Play,
    Check,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "play" => Some(Self::Play),
            "check" => Some(Self::Check),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Args {
    content: Option<PathBuf>,
    stage: Option<StageId>,
}

impl Args {
    fn from_env() -> Self {
        Self {
            content: std::env::var("LAZY_ALGO_CONTENT").ok().map(PathBuf::from),
            stage: std::env::var("LAZY_ALGO_STAGE")
                .ok()
                .and_then(|value| StageId::new(value).ok()),
        }
    }

    fn parse(mut self, args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--content" => {
                    self.content = Some(PathBuf::from(require_value(args, "--content")?));
                }
                "--stage" => {
                    let value = require_value(args, "--stage")?;
                    let stage = StageId::new(value.clone())
                        .map_err(|_| ArgsError::InvalidStage { raw: value })?;
                    self.stage = Some(stage);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }
        Ok(self)
    }
}

//
// ─── INTERACTIVE INPUT ─────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Intent(LessonIntent),
    Help,
    Quit,
    Unknown(String),
}

fn parse_keyword(input: &str) -> Option<Input> {
    let input = match input.to_ascii_lowercase().as_str() {
        "e" | "explain" | "reveal" => Input::Intent(LessonIntent::Reveal),
        "h" | "hint" => Input::Intent(LessonIntent::ToggleHint),
        "n" | "next" | "s" | "skip" | "continue" | "again" => Input::Intent(LessonIntent::Advance),
        "?" | "help" => Input::Help,
        "q" | "quit" | "exit" => Input::Quit,
        _ => return None,
    };
    Some(input)
}

/// Map one line of learner input onto an action.
///
/// Order: a 1-based number selects that answer, then keywords, then an exact
/// answer id. Commands win over answer ids that spell a keyword; such answers
/// stay reachable by number.
fn parse_input(line: &str, session: &QuestionSession) -> Input {
    let trimmed = line.trim();
    let answers = session.question().answers();

    if let Ok(number) = trimmed.parse::<usize>() {
        if let Some(answer) = number.checked_sub(1).and_then(|index| answers.get(index)) {
            return Input::Intent(LessonIntent::Select(answer.id().clone()));
        }
    }
    if let Some(input) = parse_keyword(trimmed) {
        return input;
    }
    match answers.iter().find(|answer| answer.id().as_str() == trimmed) {
        Some(answer) => Input::Intent(LessonIntent::Select(answer.id().clone())),
        None => Input::Unknown(trimmed.to_string()),
    }
}

fn print_controls() {
    println!("Controls: <number|answer id> select, e explain, h hint, n next/skip, ? help, q quit");
}

fn render(demo: &DemoSession) {
    println!();
    print!("{}", ui::render_progress(&ui::map_progress(demo.progress())));
    println!();
    print!("{}", ui::render_lesson_card(&ui::map_lesson_card(demo)));
}

fn play(service: &DemoLoopService, mut demo: DemoSession) -> io::Result<()> {
    print_controls();
    render(&demo);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        match parse_input(&line?, demo.session()) {
            Input::Intent(intent) => {
                if let IntentOutcome::Ignored(reason) = service.apply(&mut demo, intent) {
                    tracing::debug!(%reason, "Action had no effect");
                }
                render(&demo);
            }
            Input::Help => print_controls(),
            Input::Quit => break,
            Input::Unknown(raw) if raw.is_empty() => {}
            Input::Unknown(raw) => println!("unknown command: {raw} (? for help)"),
        }
    }

    tracing::info!(completed = demo.completed_questions().len(), "Demo finished");
    Ok(())
}

async fn load_content(args: &Args) -> Result<InMemoryContent, Box<dyn std::error::Error>> {
    let content = match &args.content {
        Some(path) => InMemoryContent::from_json_file(path).await?,
        None => sample::demo_content()?,
    };
    Ok(content)
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "app=info,services=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: play when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Play,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Play,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            io::Error::new(io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };
    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let parsed = Args::from_env()
        .parse(&mut argv.into_iter())
        .map_err(|e| {
            eprintln!("{e}");
            print_usage();
            e
        })?;

    init_tracing();
    let content = load_content(&parsed).await?;

    match cmd {
        Command::Check => {
            let lessons = content.lessons().await?;
            let stages = content.stages().await?;
            println!(
                "{} lessons across {} stages, current stage {}",
                lessons.len(),
                stages.len(),
                content.current_stage().await?
            );
            if parsed.content.is_none() {
                println!("(bundled demo content; print it with `check-catalog --print-sample`)");
            }
            Ok(())
        }
        Command::Play => {
            let service = DemoLoopService::new(Clock::default(), Arc::new(content))
                .with_current_stage(parsed.stage);
            let demo = service.start_demo().await?;
            play(&service, demo)?;
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lesson_core::model::{AnswerDraft, AnswerId};

    fn first_session() -> QuestionSession {
        let catalog = sample::demo_catalog().unwrap();
        QuestionSession::new(Arc::clone(&catalog.lessons[0].question))
    }

    fn select(raw: &str) -> Input {
        Input::Intent(LessonIntent::Select(AnswerId::new(raw).unwrap()))
    }

    #[test]
    fn numbers_and_ids_select_answers() {
        let session = first_session();
        assert_eq!(parse_input("1", &session), select("a"));
        assert_eq!(parse_input(" 4 ", &session), select("d"));
        assert_eq!(parse_input("c", &session), select("c"));
    }

    #[test]
    fn out_of_range_numbers_are_unknown() {
        let session = first_session();
        assert_eq!(parse_input("0", &session), Input::Unknown("0".into()));
        assert_eq!(parse_input("9", &session), Input::Unknown("9".into()));
    }

    #[test]
    fn keywords_map_to_intents() {
        let session = first_session();
        assert_eq!(parse_input("e", &session), Input::Intent(LessonIntent::Reveal));
        assert_eq!(parse_input("HINT", &session), Input::Intent(LessonIntent::ToggleHint));
        assert_eq!(parse_input("skip", &session), Input::Intent(LessonIntent::Advance));
        assert_eq!(parse_input("q", &session), Input::Quit);
        assert_eq!(parse_input("?", &session), Input::Help);
    }

    #[test]
    fn keywords_win_over_matching_answer_ids() {
        let mut draft = sample::demo_document().unwrap().lessons[0].question.clone();
        draft.answers.push(AnswerDraft {
            id: AnswerId::new("e").unwrap(),
            text: "Exponential".into(),
            is_correct: false,
            explanation: None,
        });
        let session = QuestionSession::new(Arc::new(draft.validate().unwrap()));

        assert_eq!(parse_input("e", &session), Input::Intent(LessonIntent::Reveal));
        assert_eq!(parse_input("5", &session), select("e"));
        assert_eq!(parse_input("b", &session), select("b"));
    }

    #[test]
    fn parses_flags() {
        let mut argv = ["--content", "lessons.json", "--stage", "trees"]
            .into_iter()
            .map(String::from);
        let args = Args::default().parse(&mut argv).unwrap();

        assert_eq!(args.content, Some(PathBuf::from("lessons.json")));
        assert_eq!(args.stage, Some(StageId::new("trees").unwrap()));
    }

    #[test]
    fn rejects_blank_stage_and_missing_values() {
        let mut blank = ["--stage", " "].into_iter().map(String::from);
        assert!(matches!(
            Args::default().parse(&mut blank),
            Err(ArgsError::InvalidStage { .. })
        ));

        let mut missing = ["--content"].into_iter().map(String::from);
        assert!(matches!(
            Args::default().parse(&mut missing),
            Err(ArgsError::MissingValue { flag: "--content" })
        ));
    }
}
