/// What a line typed at the prompt asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Anything that is not a `:` command is a URL submission. The raw text
    /// is handed to the core, which does the trimming.
    Submit(String),
    LoadMore,
    Help,
    Quit,
}

pub const HELP: &str = "\
Type a URL and press Enter to fetch its preview.
  :more   load the next page of history (retries a failed first load)
  :help   show this help
  :quit   exit";

pub fn parse_line(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    match line.trim() {
        ":more" | ":m" => Command::LoadMore,
        ":help" | ":h" | ":?" => Command::Help,
        ":quit" | ":q" => Command::Quit,
        _ => Command::Submit(line.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_line, Command};

    #[test]
    fn colon_commands_are_recognised() {
        assert_eq!(parse_line(":more\n"), Command::LoadMore);
        assert_eq!(parse_line("  :m "), Command::LoadMore);
        assert_eq!(parse_line(":q\r\n"), Command::Quit);
        assert_eq!(parse_line(":help"), Command::Help);
    }

    #[test]
    fn other_lines_are_submissions_kept_raw() {
        assert_eq!(
            parse_line("  https://example.com \n"),
            Command::Submit("  https://example.com ".to_string())
        );
        assert_eq!(parse_line("   \n"), Command::Submit("   ".to_string()));
    }
}
