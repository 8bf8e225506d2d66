/// One line of user input, interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Select(usize),
    Submit,
    Next,
    Restart,
    Status,
    /// Close the quiz view, discarding the session.
    Exit,
    /// Leave the program.
    Quit,
    Help,
}

impl Command {
    /// Parse a trimmed input line. Options are `a`-`d` or `1`-`4`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim().to_ascii_lowercase();
        let cmd = match line.as_str() {
            "start" | "begin" => Self::Start,
            "submit" | "s" => Self::Submit,
            "next" | "n" => Self::Next,
            "restart" | "r" => Self::Restart,
            "status" => Self::Status,
            "exit" | "close" => Self::Exit,
            "quit" | "q" => Self::Quit,
            "help" | "?" => Self::Help,
            other => return option_index(other).map(Self::Select),
        };
        Some(cmd)
    }
}

fn option_index(raw: &str) -> Option<usize> {
    let mut chars = raw.chars();
    let ch = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    match ch {
        'a'..='z' => Some(ch as usize - 'a' as usize),
        '1'..='9' => Some(ch as usize - '1' as usize),
        _ => None,
    }
}

pub const HELP: &str = "\
Commands:
  start            begin a new quiz
  a-d | 1-4        choose an option
  submit | s       submit the chosen option
  next | n         continue after feedback
  restart | r      play again from the results screen
  status           show score, progress and time
  exit             close the quiz
  quit | q         leave the program";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_and_digits_select_options() {
        assert_eq!(Command::parse("a"), Some(Command::Select(0)));
        assert_eq!(Command::parse(" C "), Some(Command::Select(2)));
        assert_eq!(Command::parse("4"), Some(Command::Select(3)));
    }

    #[test]
    fn words_map_to_intents() {
        assert_eq!(Command::parse("Start"), Some(Command::Start));
        assert_eq!(Command::parse("s"), Some(Command::Submit));
        assert_eq!(Command::parse("next"), Some(Command::Next));
        assert_eq!(Command::parse("quit"), Some(Command::Quit));
    }

    #[test]
    fn unknown_input_is_rejected() {
        assert_eq!(Command::parse("ab"), None);
        assert_eq!(Command::parse("0"), None);
        assert_eq!(Command::parse(""), None);
    }
}
