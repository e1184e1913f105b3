//! Interactive terminal front end for Showdown
//!
//! Wires stdin, ANSI screen clearing, and the YAML message catalog to
//! the duel-logic engine. The engine only ever sees structured data;
//! every user-facing string lives in `messages.yml`.

use std::env;
use std::io::{self, BufRead, Write};
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use duel_logic::{
    outcome_label, MatchConfig, MatchController, MatchRecord, MatchSummary, MoveCatalog,
    MoveSource, Player, Presenter, RoundOutcome, SeededRng,
};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

/// User-facing strings, loaded from the embedded YAML catalog
#[derive(Clone, Debug, Deserialize)]
struct Messages {
    welcome: String,
    choose_name: String,
    choices: String,
    invalid_input: String,
    continue_game: String,
    play_again: String,
    goodbye: String,
}

fn load_messages() -> Result<Messages, serde_yaml::Error> {
    serde_yaml::from_str(include_str!("../messages.yml"))
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Options {
    lizard_spock: bool,
    target: u32,
    seed: Option<u64>,
    json: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            lizard_spock: false,
            target: 3,
            seed: None,
            json: false,
        }
    }
}

const USAGE: &str = "usage: showdown [--lizard-spock] [--target N] [--seed N] [--json]";

fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Result<Options, String> {
    let mut options = Options::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--lizard-spock" => options.lizard_spock = true,
            "--json" => options.json = true,
            "--target" => {
                let value = args.next().ok_or("--target needs a value")?;
                let target = value
                    .parse::<u32>()
                    .map_err(|_| format!("invalid --target value `{value}`"))?;
                if target == 0 {
                    return Err("--target must be positive".to_string());
                }
                options.target = target;
            }
            "--seed" => {
                let value = args.next().ok_or("--seed needs a value")?;
                let seed = value
                    .parse::<u64>()
                    .map_err(|_| format!("invalid --seed value `{value}`"))?;
                options.seed = Some(seed);
            }
            other => return Err(format!("unknown argument `{other}`\n{USAGE}")),
        }
    }
    Ok(options)
}

fn prompt(text: &str) {
    println!("==> {text}");
}

/// Read one trimmed line from stdin; ends the process if input is closed
fn read_line() -> String {
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => process::exit(0),
        Ok(_) => line.trim().to_string(),
    }
}

fn clear_screen() {
    print!("\x1b[2J\x1b[1;1H");
    let _ = io::stdout().flush();
}

/// Interactive player's move source: prompt, read, reprompt on rejects
struct StdinSource {
    choices_prompt: String,
    invalid: String,
}

impl MoveSource for StdinSource {
    fn request_symbol(&mut self) -> String {
        prompt(&self.choices_prompt);
        read_line()
    }

    fn reject_symbol(&mut self, _raw: &str) {
        prompt(&self.invalid);
    }
}

/// Prints round results, paces the match, and shows the final report
struct TerminalPresenter {
    catalog: MoveCatalog,
    messages: Messages,
    first_name: String,
    second_name: String,
    winning_score: u32,
}

impl TerminalPresenter {
    fn pause(&self) {
        prompt(&self.messages.continue_game);
        read_line();
    }
}

impl Presenter for TerminalPresenter {
    fn welcome(&mut self) {
        clear_screen();
        prompt(&self.messages.welcome);
        self.pause();
        clear_screen();
    }

    fn round_resolved(&mut self, record: &MatchRecord, scores: (u32, u32)) {
        prompt(&format!(
            "{} chose {}",
            self.first_name,
            self.catalog.label(record.first)
        ));
        prompt(&format!(
            "{} chose {}",
            self.second_name,
            self.catalog.label(record.second)
        ));
        let result = match record.outcome {
            RoundOutcome::FirstWins => format!("{} won!", self.first_name),
            RoundOutcome::SecondWins => format!("{} won!", self.second_name),
            RoundOutcome::Tie => {
                format!("{} tied with {}", self.first_name, self.second_name)
            }
        };
        prompt(&result);
        prompt(&format!(
            "SCORE: {} ({}) to {} ({})",
            scores.0, self.first_name, scores.1, self.second_name
        ));
        if scores.0 == self.winning_score {
            prompt(&format!("{} won the game!", self.first_name));
        } else if scores.1 == self.winning_score {
            prompt(&format!("{} won the game!", self.second_name));
        }
    }

    fn await_continue(&mut self) {
        self.pause();
        clear_screen();
    }

    fn report(&mut self, text: &str) {
        println!();
        println!("{text}");
    }
}

fn ask_name(messages: &Messages) -> String {
    loop {
        prompt(&messages.choose_name);
        let name = read_line();
        if !name.is_empty() {
            return name;
        }
        prompt(&messages.invalid_input);
    }
}

fn ask_play_again(messages: &Messages) -> bool {
    loop {
        prompt(&messages.play_again);
        match read_line().to_lowercase().as_str() {
            "y" => return true,
            "n" => return false,
            _ => prompt(&messages.invalid_input),
        }
    }
}

fn summary_json(summary: &MatchSummary, catalog: &MoveCatalog, names: (&str, &str)) -> serde_json::Value {
    serde_json::json!({
        "winner": summary.winner_name,
        "players": [
            { "name": names.0, "score": summary.final_scores.0 },
            { "name": names.1, "score": summary.final_scores.1 },
        ],
        "rounds": summary
            .history
            .records()
            .iter()
            .map(|r| serde_json::json!({
                "round": r.round,
                "first": catalog.label(r.first),
                "second": catalog.label(r.second),
                "outcome": outcome_label(r.outcome),
            }))
            .collect::<Vec<_>>(),
    })
}

fn entropy_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5eed)
}

const CPU_NAME: &str = "Computer";

fn run() -> Result<(), String> {
    let options = parse_args(env::args().skip(1))?;
    tracing::debug!(?options, "starting");
    let messages = load_messages().map_err(|e| format!("message catalog: {e}"))?;
    let catalog = if options.lizard_spock {
        MoveCatalog::lizard_spock()
    } else {
        MoveCatalog::classic()
    };
    let config = MatchConfig::new(options.target).ok_or("--target must be positive")?;
    let choices_prompt = format!(
        "{} [{}]",
        messages.choices,
        catalog.labels().collect::<Vec<_>>().join(", ")
    );

    clear_screen();
    let user_name = ask_name(&messages);
    let mut seed = options.seed.unwrap_or_else(entropy_seed);

    loop {
        let user = Player::interactive(
            user_name.clone(),
            Box::new(StdinSource {
                choices_prompt: choices_prompt.clone(),
                invalid: messages.invalid_input.clone(),
            }),
        );
        let cpu = Player::automated(CPU_NAME, Box::new(SeededRng::new(seed)));
        let controller = MatchController::new(&catalog, config, user, cpu);
        let mut presenter = TerminalPresenter {
            catalog: catalog.clone(),
            messages: messages.clone(),
            first_name: user_name.clone(),
            second_name: CPU_NAME.to_string(),
            winning_score: config.winning_score(),
        };

        let summary = controller.run(&mut presenter);

        if options.json {
            let value = summary_json(&summary, &catalog, (&user_name, CPU_NAME));
            let text = serde_json::to_string_pretty(&value).map_err(|e| e.to_string())?;
            println!("{text}");
        }

        if !ask_play_again(&messages) {
            break;
        }
        // Fresh CPU sequence per rematch, still reproducible from --seed
        seed = seed.wrapping_add(1);
        clear_screen();
    }

    prompt(&messages.goodbye);
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn test_parse_args_defaults() {
        let options = parse_args(args(&[])).unwrap();
        assert_eq!(options, Options::default());
        assert_eq!(options.target, 3);
    }

    #[test]
    fn test_parse_args_all_flags() {
        let options =
            parse_args(args(&["--lizard-spock", "--target", "5", "--seed", "42", "--json"]))
                .unwrap();
        assert!(options.lizard_spock);
        assert!(options.json);
        assert_eq!(options.target, 5);
        assert_eq!(options.seed, Some(42));
    }

    #[test]
    fn test_parse_args_rejects_bad_input() {
        assert!(parse_args(args(&["--target"])).is_err());
        assert!(parse_args(args(&["--target", "zero"])).is_err());
        assert!(parse_args(args(&["--target", "0"])).is_err());
        assert!(parse_args(args(&["--seed", "abc"])).is_err());
        assert!(parse_args(args(&["--frobnicate"])).is_err());
    }

    #[test]
    fn test_messages_catalog_parses() {
        let messages = load_messages().unwrap();
        assert!(!messages.welcome.is_empty());
        assert!(!messages.invalid_input.is_empty());
        assert!(!messages.goodbye.is_empty());
    }

    #[test]
    fn test_summary_json_shape() {
        struct Fixed(&'static str);
        impl MoveSource for Fixed {
            fn request_symbol(&mut self) -> String {
                self.0.to_string()
            }
        }
        struct AlwaysLast;
        impl duel_logic::MovePicker for AlwaysLast {
            fn pick_uniform(&mut self, len: usize) -> usize {
                len - 1
            }
        }

        let catalog = MoveCatalog::classic();
        let user = Player::interactive("Anna", Box::new(Fixed("rock")));
        let cpu = Player::automated(CPU_NAME, Box::new(AlwaysLast));
        let config = MatchConfig::new(1).unwrap();
        let summary = MatchController::new(&catalog, config, user, cpu).run(&mut ());

        let value = summary_json(&summary, &catalog, ("Anna", CPU_NAME));
        assert_eq!(value["winner"], "Anna");
        assert_eq!(value["players"][0]["score"], 1);
        assert_eq!(value["rounds"][0]["first"], "rock");
        assert_eq!(value["rounds"][0]["second"], "scissors");
        assert_eq!(value["rounds"][0]["outcome"], "first wins");
    }
}
