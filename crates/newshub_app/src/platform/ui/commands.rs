/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `cat <id>`: switch category by identifier.
    Category(String),
    /// `search <text>` or `/ <text>`: a search-box edit. An empty text clears it.
    Search(String),
    /// `more`: the "load more stories" button.
    More,
    Refresh,
    /// `read <n>`: print the link of the n-th card (1-based).
    Read(usize),
    List,
    Help,
    Quit,
    Unknown(String),
}

pub const HELP: &str = "\
commands:
  cat <top|business|technology|sports|health|entertainment|science>
  search <text>     search (applied after 500 ms without edits); `search` alone clears
  more              load more stories
  refresh           reload the first page
  read <n>          show the link of story n
  list              redraw the current page
  quit";

pub fn parse(line: &str) -> Option<Command> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return None;
    }
    let trimmed = line.trim_start();
    let (word, rest) = trimmed
        .split_once(char::is_whitespace)
        .unwrap_or((trimmed, ""));

    let command = match word.to_ascii_lowercase().as_str() {
        "cat" | "category" => match rest.trim() {
            "" => Command::Unknown(line.to_string()),
            id => Command::Category(id.to_string()),
        },
        "search" | "/" => Command::Search(rest.to_string()),
        "more" | "m" => Command::More,
        "refresh" | "r" => Command::Refresh,
        "read" => match rest.trim().parse::<usize>() {
            Ok(n) if n > 0 => Command::Read(n),
            _ => Command::Unknown(line.to_string()),
        },
        "list" | "ls" => Command::List,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    };
    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_and_keeps_search_text_verbatim() {
        assert_eq!(parse("cat technology"), Some(Command::Category("technology".into())));
        assert_eq!(parse("search  apple  "), Some(Command::Search(" apple  ".into())));
        assert_eq!(parse("search"), Some(Command::Search(String::new())));
        assert_eq!(parse("MORE\n"), Some(Command::More));
        assert_eq!(parse("read 3"), Some(Command::Read(3)));
        assert_eq!(parse("q"), Some(Command::Quit));
        assert_eq!(parse("   "), None);
    }

    #[test]
    fn malformed_arguments_are_unknown() {
        assert_eq!(parse("read zero"), Some(Command::Unknown("read zero".into())));
        assert_eq!(parse("read 0"), Some(Command::Unknown("read 0".into())));
        assert_eq!(parse("cat"), Some(Command::Unknown("cat".into())));
        assert_eq!(parse("dance"), Some(Command::Unknown("dance".into())));
    }
}
