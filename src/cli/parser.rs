use crate::types::{PhaseName, PlayerIndex, RoleListEntry, Verdict};

/// One line of terminal input. Player numbers are typed as shown in the
/// player list (starting at 1) and stored zero-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Host,
    Join(String),
    Name(String),
    Start,
    Phase(PhaseName, u64),
    Roles(Vec<RoleListEntry>),
    Vote(Option<PlayerIndex>),
    Target(Vec<PlayerIndex>),
    DayTarget(PlayerIndex),
    Judgement(Verdict),
    Will(String),
    Say(String),
    Whisper(PlayerIndex, String),
    Players,
    Connect,
    Disconnect,
    Quit,
}

pub const HELP: &str = "\
commands:
  host | join <code> | name <name> | start
  phase <phase> <secs> | roles <json array>
  vote <n|none> | target [n...] | daytarget <n>
  guilty | innocent | abstain
  will <text> | say <text> | whisper <n> <text>
  players | connect | disconnect | quit";

pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match (verb.to_lowercase().as_str(), rest.is_empty()) {
        ("host", true) => Some(Command::Host),
        ("start", true) => Some(Command::Start),
        ("players", true) => Some(Command::Players),
        ("connect", true) => Some(Command::Connect),
        ("disconnect", true) => Some(Command::Disconnect),
        ("quit" | "exit", true) => Some(Command::Quit),
        ("guilty", true) => Some(Command::Judgement(Verdict::Guilty)),
        ("innocent", true) => Some(Command::Judgement(Verdict::Innocent)),
        ("abstain", true) => Some(Command::Judgement(Verdict::Abstain)),

        ("join", false) => Some(Command::Join(rest.to_string())),
        ("name", false) => Some(Command::Name(rest.to_string())),
        ("say", false) => Some(Command::Say(rest.to_string())),
        // an empty will is allowed
        ("will", _) => Some(Command::Will(rest.to_string())),

        ("phase", false) => {
            let (phase, secs) = rest.split_once(char::is_whitespace)?;
            Some(Command::Phase(PhaseName::parse(phase)?, secs.trim().parse().ok()?))
        }
        ("roles", false) => serde_json::from_str(rest).ok().map(Command::Roles),
        ("vote", false) if rest.eq_ignore_ascii_case("none") => Some(Command::Vote(None)),
        ("vote", false) => Some(Command::Vote(Some(parse_player_number(rest)?))),
        ("target", _) => rest
            .split_whitespace()
            .map(parse_player_number)
            .collect::<Option<Vec<_>>>()
            .map(Command::Target),
        ("daytarget", false) => Some(Command::DayTarget(parse_player_number(rest)?)),
        ("whisper", false) => {
            let (number, text) = rest.split_once(char::is_whitespace)?;
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            Some(Command::Whisper(parse_player_number(number)?, text.to_string()))
        }
        _ => None,
    }
}

fn parse_player_number(text: &str) -> Option<PlayerIndex> {
    let number: PlayerIndex = text.trim().parse().ok()?;
    number.checked_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Faction, RoleName};

    #[test]
    fn test_parses_bare_verbs() {
        assert_eq!(parse_command("host"), Some(Command::Host));
        assert_eq!(parse_command("start"), Some(Command::Start));
        assert_eq!(parse_command("players"), Some(Command::Players));
        assert_eq!(parse_command("connect"), Some(Command::Connect));
        assert_eq!(parse_command("disconnect"), Some(Command::Disconnect));
        assert_eq!(parse_command("quit"), Some(Command::Quit));
        assert_eq!(parse_command("exit"), Some(Command::Quit));
    }

    #[test]
    fn test_case_insensitive_verbs() {
        assert_eq!(parse_command("HOST"), Some(Command::Host));
        assert_eq!(parse_command("Guilty"), Some(Command::Judgement(Verdict::Guilty)));
        assert_eq!(parse_command("INNOCENT"), Some(Command::Judgement(Verdict::Innocent)));
        assert_eq!(parse_command("abstain"), Some(Command::Judgement(Verdict::Abstain)));
    }

    #[test]
    fn test_text_arguments_keep_case_and_spaces() {
        assert_eq!(parse_command("join AB12"), Some(Command::Join("AB12".into())));
        assert_eq!(parse_command("name  Sammy B "), Some(Command::Name("Sammy B".into())));
        assert_eq!(parse_command("say Hello there"), Some(Command::Say("Hello there".into())));
        assert_eq!(parse_command("will"), Some(Command::Will(String::new())));
    }

    #[test]
    fn test_player_numbers_are_one_based() {
        assert_eq!(parse_command("vote 1"), Some(Command::Vote(Some(0))));
        assert_eq!(parse_command("vote none"), Some(Command::Vote(None)));
        assert_eq!(parse_command("vote 0"), None);
        assert_eq!(parse_command("daytarget 3"), Some(Command::DayTarget(2)));
        assert_eq!(
            parse_command("whisper 2 meet me"),
            Some(Command::Whisper(1, "meet me".into()))
        );
    }

    #[test]
    fn test_target_lists() {
        assert_eq!(parse_command("target 3 1"), Some(Command::Target(vec![2, 0])));
        assert_eq!(parse_command("target"), Some(Command::Target(vec![])));
        assert_eq!(parse_command("target 2 x"), None);
    }

    #[test]
    fn test_phase_and_roles() {
        assert_eq!(
            parse_command("phase night 60"),
            Some(Command::Phase(PhaseName::Night, 60))
        );
        assert_eq!(parse_command("phase dusk 60"), None);
        assert_eq!(parse_command("phase night"), None);
        assert_eq!(
            parse_command(r#"roles ["Any", {"Exact": "Jailor"}, {"Faction": "Town"}]"#),
            Some(Command::Roles(vec![
                RoleListEntry::Any,
                RoleListEntry::Exact(RoleName::new("Jailor")),
                RoleListEntry::Faction(Faction::Town),
            ]))
        );
        assert_eq!(parse_command("roles nope"), None);
    }

    #[test]
    fn test_rejects_invalid_input() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("   "), None);
        assert_eq!(parse_command("dance"), None);
        assert_eq!(parse_command("host now"), None);
        assert_eq!(parse_command("join"), None);
        assert_eq!(parse_command("whisper 2"), None);
    }
}
