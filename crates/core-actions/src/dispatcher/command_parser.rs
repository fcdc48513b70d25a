//! Structured command line parsing.
//!
//! Converts one line typed after `:` into a `ParsedCommand`. Tokenizing keeps
//! a double-quoted run verbatim (spaces included, quotes stripped); anything
//! else splits on spaces. Verbs and keywords match case-insensitively; paths
//! keep their case.
//!
//! Numbers follow the C `strtoul(.., 0)` prefixes: `0x`/`0X` hexadecimal, a
//! leading `0` octal, otherwise decimal. Values too large for 64 bits
//! saturate. A token with any non-digit is invalid rather than zero.
//!
//! No side effects here; pure classification.

use core_model::PanelSet;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoTo {
    Absolute(u64),
    Forward(u64),
    Back(u64),
    End,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    /// Blank line.
    Empty,
    ColumnWidth(u32),
    ViewSync,
    TruncateHere,
    TruncateTo(u64),
    GoTo(GoTo),
    Show(PanelSet),
    Hide(PanelSet),
    Open { path: PathBuf, writable: bool },
    Quit,
    Help,
    Unknown(String),
    /// Known verb, malformed argument.
    Invalid(String),
}

pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut rest = line;
    loop {
        rest = rest.trim_start_matches(' ');
        if rest.is_empty() {
            break;
        }
        if let Some(quoted) = rest.strip_prefix('"') {
            let end = quoted.find('"').unwrap_or(quoted.len());
            tokens.push(quoted[..end].to_string());
            rest = quoted.get(end + 1..).unwrap_or("");
        } else {
            let end = rest.find(' ').unwrap_or(rest.len());
            tokens.push(rest[..end].to_string());
            rest = &rest[end..];
        }
    }
    tokens
}

pub fn parse_number(s: &str) -> Option<u64> {
    let (digits, radix) = if let Some(h) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        (h, 16)
    } else if s.len() > 1 && s.starts_with('0') {
        (&s[1..], 8)
    } else {
        (s, 10)
    };
    if digits.is_empty() {
        return None;
    }
    let mut value: u64 = 0;
    for c in digits.chars() {
        let d = u64::from(c.to_digit(radix)?);
        value = value.saturating_mul(u64::from(radix)).saturating_add(d);
    }
    Some(value)
}

fn panel_arg(arg: Option<&str>) -> Option<PanelSet> {
    let arg = arg?.to_ascii_lowercase();
    match arg.as_str() {
        "hex" => Some(PanelSet::HEX),
        "asc" | "ascii" => Some(PanelSet::ASCII),
        _ => None,
    }
}

fn number_arg(arg: Option<&str>, what: &str) -> Result<u64, ParsedCommand> {
    match arg {
        Some(a) => parse_number(a).ok_or_else(|| ParsedCommand::Invalid(format!("{what} '{a}'"))),
        None => Err(ParsedCommand::Invalid(format!("missing {what}"))),
    }
}

fn parse_tokens(tokens: &[String]) -> Result<ParsedCommand, ParsedCommand> {
    let lower: Vec<String> = tokens.iter().map(|t| t.to_ascii_lowercase()).collect();
    let word = |i: usize| lower.get(i).map(String::as_str);
    let raw = |i: usize| tokens.get(i).map(String::as_str);
    let unknown = || ParsedCommand::Unknown(tokens.join(" "));

    let cmd = match (word(0), word(1)) {
        (None, _) => ParsedCommand::Empty,
        (Some("column"), Some("width")) => {
            let n = number_arg(raw(2), "width")?;
            ParsedCommand::ColumnWidth(u32::try_from(n).unwrap_or(u32::MAX).max(1))
        }
        (Some("view"), Some("sync")) => ParsedCommand::ViewSync,
        (Some("truncate"), Some("here")) => ParsedCommand::TruncateHere,
        (Some("truncate"), Some("at" | "to")) => {
            ParsedCommand::TruncateTo(number_arg(raw(2), "size")?)
        }
        (Some("go"), Some("to")) => {
            let target = match word(2) {
                Some("end") => GoTo::End,
                Some(a) if a.starts_with('+') => GoTo::Forward(number_arg(Some(&a[1..]), "offset")?),
                Some(a) if a.starts_with('-') => GoTo::Back(number_arg(Some(&a[1..]), "offset")?),
                other => GoTo::Absolute(number_arg(other, "offset")?),
            };
            ParsedCommand::GoTo(target)
        }
        (Some("show"), _) => ParsedCommand::Show(panel_arg(word(1)).ok_or_else(unknown)?),
        (Some("hide"), _) => ParsedCommand::Hide(panel_arg(word(1)).ok_or_else(unknown)?),
        (Some(verb @ ("open" | "openrw")), _) => match raw(1) {
            Some(path) if !path.is_empty() => ParsedCommand::Open {
                path: PathBuf::from(path),
                writable: verb == "openrw",
            },
            _ => ParsedCommand::Invalid(format!("{verb} needs a path")),
        },
        (Some("quit" | "q"), _) => ParsedCommand::Quit,
        (Some("help"), _) => ParsedCommand::Help,
        _ => unknown(),
    };
    Ok(cmd)
}

pub fn parse_command(line: &str) -> ParsedCommand {
    let tokens = tokenize(line);
    parse_tokens(&tokens).unwrap_or_else(|e| e)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizer_keeps_quoted_runs() {
        assert_eq!(
            tokenize(r#"open "my file.bin"  x"#),
            vec!["open", "my file.bin", "x"]
        );
        assert_eq!(tokenize(r#"open "unterminated"#), vec!["open", "unterminated"]);
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn numbers_follow_c_prefixes() {
        assert_eq!(parse_number("100"), Some(100));
        assert_eq!(parse_number("0x1F"), Some(31));
        assert_eq!(parse_number("017"), Some(15));
        assert_eq!(parse_number("0"), Some(0));
        assert_eq!(parse_number("0x"), None);
        assert_eq!(parse_number("12ab"), None);
        assert_eq!(parse_number("099"), None);
        assert_eq!(parse_number("99999999999999999999999"), Some(u64::MAX));
    }

    #[test]
    fn verbs_are_case_insensitive() {
        assert_eq!(parse_command("Column WIDTH 32"), ParsedCommand::ColumnWidth(32));
        assert_eq!(parse_command("VIEW sync"), ParsedCommand::ViewSync);
        assert_eq!(parse_command("Q"), ParsedCommand::Quit);
        assert_eq!(parse_command("Show ASC"), ParsedCommand::Show(PanelSet::ASCII));
    }

    #[test]
    fn column_width_floors_at_one() {
        assert_eq!(parse_command("column width 0"), ParsedCommand::ColumnWidth(1));
    }

    #[test]
    fn go_to_forms() {
        assert_eq!(parse_command("go to 0x10"), ParsedCommand::GoTo(GoTo::Absolute(16)));
        assert_eq!(parse_command("go to +5"), ParsedCommand::GoTo(GoTo::Forward(5)));
        assert_eq!(parse_command("go to -5"), ParsedCommand::GoTo(GoTo::Back(5)));
        assert_eq!(parse_command("go to END"), ParsedCommand::GoTo(GoTo::End));
        assert!(matches!(parse_command("go to banana"), ParsedCommand::Invalid(_)));
        assert!(matches!(parse_command("go to"), ParsedCommand::Invalid(_)));
    }

    #[test]
    fn truncate_forms() {
        assert_eq!(parse_command("truncate here"), ParsedCommand::TruncateHere);
        assert_eq!(parse_command("truncate at 100"), ParsedCommand::TruncateTo(100));
        assert_eq!(parse_command("truncate to 0"), ParsedCommand::TruncateTo(0));
        assert!(matches!(parse_command("truncate"), ParsedCommand::Unknown(_)));
    }

    #[test]
    fn open_keeps_path_case() {
        assert_eq!(
            parse_command(r#"OpenRW "/tmp/My Disk.img""#),
            ParsedCommand::Open {
                path: PathBuf::from("/tmp/My Disk.img"),
                writable: true
            }
        );
        assert!(matches!(parse_command("open"), ParsedCommand::Invalid(_)));
    }

    #[test]
    fn empty_and_unknown() {
        assert_eq!(parse_command(""), ParsedCommand::Empty);
        assert_eq!(
            parse_command("frobnicate now"),
            ParsedCommand::Unknown("frobnicate now".into())
        );
        assert!(matches!(parse_command("show nothing"), ParsedCommand::Unknown(_)));
    }
}
