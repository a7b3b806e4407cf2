// Line input parsing.
//
// Translates one line typed at the prompt into a UserCommand for the app
// orchestrator, or into a local action (help, empty line).

use pickwise_app::protocol::UserCommand;
use pickwise_core::attribute::Attribute;
use pickwise_core::catalog::Role;
use pickwise_core::engine::{PhaseMode, Strictness};
use pickwise_core::roster::{Side, SlotRef, SLOTS};
use thiserror::Error;

/// What a line of input asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Command(UserCommand),
    Help,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("unknown command '{0}' (type 'help')")]
    UnknownCommand(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("slot must be 1-5, got '{got}'")]
    BadSlot { got: String },

    #[error("unknown {what} '{got}'")]
    BadValue { what: &'static str, got: String },
}

pub const HELP: &str = "\
commands:
  ally <1-5> <champion>        pick for your team
  enemy <1-5> <champion>       pick for the enemy team
  ban <blue|red> <1-5> <champ> record a ban
  clear <ally|enemy> <1-5>     empty a pick slot
  clear ban <blue|red> <1-5>   empty a ban slot
  reset                        empty every slot
  phase <auto|early|mid|last>  draft phase
  strict <strict|normal|loose> threshold strictness
  role <any|top|jungle|mid|adc|support>
  need <attribute>             best picks for one attribute
  show                         redraw the current report
  quit";

const ASSIGN_USAGE: &str = "ally|enemy <1-5> <champion>";
const BAN_USAGE: &str = "ban <blue|red> <1-5> <champion>";
const CLEAR_USAGE: &str = "clear <ally|enemy> <1-5> | clear ban <blue|red> <1-5>";

/// Parse one input line. Keywords are case-insensitive; champion names may
/// contain spaces.
pub fn parse_line(line: &str) -> Result<Input, InputError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&head, rest)) = words.split_first() else {
        return Ok(Input::Empty);
    };

    let cmd = match head.to_ascii_lowercase().as_str() {
        "ally" => assign(Side::Ally, rest)?,
        "enemy" => assign(Side::Enemy, rest)?,
        "ban" => {
            let (&side, rest) = rest.split_first().ok_or(InputError::Usage(BAN_USAGE))?;
            assign(ban_side(side)?, rest).map_err(|e| match e {
                InputError::Usage(_) => InputError::Usage(BAN_USAGE),
                other => other,
            })?
        }
        "clear" => UserCommand::Clear(clear_target(rest)?),
        "reset" => UserCommand::ClearAll,
        "phase" => {
            let value = single(rest, "phase <auto|early|mid|last>")?;
            UserCommand::SetPhase(PhaseMode::parse(value).ok_or_else(|| bad("phase", value))?)
        }
        "strict" | "strictness" => {
            let value = single(rest, "strict <strict|normal|loose>")?;
            UserCommand::SetStrictness(
                Strictness::parse(value).ok_or_else(|| bad("strictness", value))?,
            )
        }
        "role" => {
            let value = single(rest, "role <any|top|jungle|mid|adc|support>")?;
            UserCommand::SetRole(Role::from_str_role(value).ok_or_else(|| bad("role", value))?)
        }
        "need" => {
            if rest.is_empty() {
                return Err(InputError::Usage("need <attribute>"));
            }
            let joined = rest.join("_");
            UserCommand::Need(Attribute::from_key(&joined).ok_or_else(|| bad("attribute", &joined))?)
        }
        "show" | "refresh" => UserCommand::Refresh,
        "quit" | "exit" | "q" => UserCommand::Quit,
        "help" | "?" => return Ok(Input::Help),
        other => return Err(InputError::UnknownCommand(other.to_string())),
    };
    Ok(Input::Command(cmd))
}

fn bad(what: &'static str, got: &str) -> InputError {
    InputError::BadValue {
        what,
        got: got.to_string(),
    }
}

fn single<'a>(rest: &[&'a str], usage: &'static str) -> Result<&'a str, InputError> {
    match rest {
        [value] => Ok(*value),
        _ => Err(InputError::Usage(usage)),
    }
}

/// One-based slot number to a zero-based index.
fn slot_index(word: &str) -> Result<usize, InputError> {
    match word.parse::<usize>() {
        Ok(n) if (1..=SLOTS).contains(&n) => Ok(n - 1),
        _ => Err(InputError::BadSlot {
            got: word.to_string(),
        }),
    }
}

fn ban_side(word: &str) -> Result<Side, InputError> {
    match word.to_ascii_lowercase().as_str() {
        "blue" | "b" => Ok(Side::BanBlue),
        "red" | "r" => Ok(Side::BanRed),
        _ => Err(bad("ban side", word)),
    }
}

fn assign(side: Side, rest: &[&str]) -> Result<UserCommand, InputError> {
    let [slot, name @ ..] = rest else {
        return Err(InputError::Usage(ASSIGN_USAGE));
    };
    if name.is_empty() {
        return Err(InputError::Usage(ASSIGN_USAGE));
    }
    Ok(UserCommand::Assign {
        slot: SlotRef::new(side, slot_index(slot)?),
        id: name.join(" "),
    })
}

fn clear_target(rest: &[&str]) -> Result<SlotRef, InputError> {
    match rest {
        [side, slot] => {
            let side = match side.to_ascii_lowercase().as_str() {
                "ally" => Side::Ally,
                "enemy" => Side::Enemy,
                _ => return Err(InputError::Usage(CLEAR_USAGE)),
            };
            Ok(SlotRef::new(side, slot_index(slot)?))
        }
        [ban, side, slot] if ban.eq_ignore_ascii_case("ban") => {
            Ok(SlotRef::new(ban_side(side)?, slot_index(slot)?))
        }
        _ => Err(InputError::Usage(CLEAR_USAGE)),
    }
}
