//! Line commands accepted by the terminal front end.

use shared::domain::{parse_feedback, FeedbackVector, COLS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    New,
    Switch,
    Inject(String),
    Mark(usize),
    Feedback(FeedbackVector),
    Submit,
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  new              start a new game
  switch           show the next-ranked suggestion
  inject <word>    use your own five-letter word
  mark <1-5>       cycle one tile: blank -> present -> correct
  fb <digits>      set all five marks at once, e.g. fb 20010
  submit           send the marks for the active row
  show             redraw the board
  quit             exit";

pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Ok(Command::Show);
    };
    let arg = parts.next();
    let command = match head.to_ascii_lowercase().as_str() {
        "new" | "n" => Command::New,
        "switch" | "sw" => Command::Switch,
        "inject" | "i" => {
            let word = arg.ok_or("inject needs a word")?;
            Command::Inject(word.to_string())
        }
        "mark" | "m" => {
            let col = arg
                .and_then(|raw| raw.parse::<usize>().ok())
                .filter(|col| (1..=COLS).contains(col))
                .ok_or("mark needs a column between 1 and 5")?;
            Command::Mark(col - 1)
        }
        "fb" | "feedback" => {
            let raw = arg.ok_or("fb needs five digits")?;
            Command::Feedback(parse_feedback(raw).map_err(|err| err.to_string())?)
        }
        "submit" | "s" => Command::Submit,
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command '{other}' (try 'help')")),
    };
    if parts.next().is_some() {
        return Err(format!("too many arguments for '{head}'"));
    }
    Ok(command)
}
