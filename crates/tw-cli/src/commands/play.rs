//! Interactive reading loop over stdin.

use std::io::{self, BufRead, Write};

use colored::Colorize;
use tw_reader::{FileStore, ReaderConfig, ReaderEvent, StoryReader, Theme};
use tw_story::DirSource;

use super::{print_notifications, render_outline, render_view};

/// One line of reader input.
#[derive(Debug, PartialEq)]
enum Input {
    /// A 1-based choice number.
    Choice(usize),
    Event(ReaderEvent),
    Progress,
    Tree,
    Help,
    Quit,
    Invalid(String),
}

fn parse_input(line: &str) -> Input {
    let line = line.trim();
    let (cmd, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    if let Ok(number) = cmd.parse::<usize>() {
        return Input::Choice(number);
    }

    match cmd.to_lowercase().as_str() {
        "back" | "b" => Input::Event(ReaderEvent::Back),
        "save" => Input::Event(ReaderEvent::Save),
        "load" => Input::Event(ReaderEvent::Load),
        "reset" | "restart" => Input::Event(ReaderEvent::Reset),
        "lang" | "language" if !rest.is_empty() => {
            Input::Event(ReaderEvent::SelectLanguage(rest.to_string()))
        }
        "story" if !rest.is_empty() => Input::Event(ReaderEvent::SelectStory(rest.to_string())),
        "theme" => match rest.parse::<Theme>() {
            Ok(theme) => Input::Event(ReaderEvent::SetTheme(theme)),
            Err(e) => Input::Invalid(e),
        },
        "font" => match rest.parse::<u32>() {
            Ok(size) => Input::Event(ReaderEvent::SetFontSize(size)),
            Err(_) => Input::Invalid("usage: font <size>".to_string()),
        },
        "progress" | "endings" => Input::Progress,
        "tree" => Input::Tree,
        "help" | "?" => Input::Help,
        "quit" | "q" | "exit" => Input::Quit,
        "lang" | "language" => Input::Invalid("usage: lang <code>".to_string()),
        "story" => Input::Invalid("usage: story <id>".to_string()),
        _ => Input::Invalid(format!("unknown command: {line}")),
    }
}

const HELP: &str = "\
Commands:
  <number>          Take a choice
  back              Go back one step
  save | load       Save or restore progress
  lang <code>       Switch language, keeping your place
  story <id>        Start another story
  theme <name>      default, dark, fantasy, psychedelic, retrogaming
  font <size>       Set the font size (12-32)
  progress          Show discovered endings
  tree              Show the story outline
  reset             Start the story over
  quit              Exit";

pub fn run(config: &ReaderConfig, language: Option<&str>) -> Result<(), String> {
    let source = DirSource::new(&config.stories_dir);
    let store = FileStore::new(&config.data_dir);
    let mut reader = StoryReader::new(source, store, config);

    let opened = match language {
        Some(language) => reader.set_language(language),
        None => reader.open(),
    };
    opened.map_err(|e| e.to_string())?;
    reader.take_notifications();

    println!("  {} {}", "Reading".bold(), reader.session().story_id());
    println!("  Type a choice number, or 'help' for commands.\n");
    if let Ok(view) = reader.current_view() {
        println!("{}", render_view(&view));
    }
    print_notifications(reader.take_notifications());

    let stdin = io::stdin();
    let mut lines = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match lines.read_line(&mut line) {
            Ok(0) => break,
            Err(e) => return Err(e.to_string()),
            _ => {}
        }
        if line.trim().is_empty() {
            continue;
        }

        let event = match parse_input(&line) {
            Input::Choice(number) => {
                let available = reader.current_view().map_or(0, |view| view.choices.len());
                if number == 0 || number > available {
                    println!("{}\n", "No such choice.".yellow());
                    print_notifications(reader.take_notifications());
                    continue;
                }
                ReaderEvent::Choose(number - 1)
            }
            Input::Event(ReaderEvent::Back) if !reader.can_go_back() => {
                println!("{}\n", "Nothing to go back to.".yellow());
                continue;
            }
            Input::Event(event) => event,
            Input::Progress => {
                println!("Endings discovered: {}\n", reader.ending_progress());
                continue;
            }
            Input::Tree => {
                if let Some(outline) = reader.outline() {
                    println!("{}", render_outline(&outline));
                }
                continue;
            }
            Input::Help => {
                println!("{HELP}\n");
                continue;
            }
            Input::Quit => {
                println!("Goodbye!");
                break;
            }
            Input::Invalid(msg) => {
                println!("{}\n", msg.yellow());
                continue;
            }
        };

        let preference_changed = matches!(
            event,
            ReaderEvent::SetTheme(_) | ReaderEvent::SetFontSize(_)
        );
        let view = reader.dispatch(event);
        print_notifications(reader.take_notifications());
        if preference_changed {
            let prefs = reader.preferences();
            println!("Theme: {}, font size: {}\n", prefs.theme, prefs.font_size);
            continue;
        }
        match view {
            Some(view) => {
                println!("{}", render_view(&view));
                if view.is_ending {
                    println!("Endings discovered: {}\n", reader.ending_progress());
                }
            }
            None => println!("{}\n", "Type 'reset' to start over.".yellow()),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_choices_and_commands() {
        assert_eq!(parse_input("2"), Input::Choice(2));
        assert_eq!(parse_input(" back "), Input::Event(ReaderEvent::Back));
        assert_eq!(
            parse_input("lang fr"),
            Input::Event(ReaderEvent::SelectLanguage("fr".to_string()))
        );
        assert_eq!(
            parse_input("theme Dark"),
            Input::Event(ReaderEvent::SetTheme(Theme::Dark))
        );
        assert_eq!(
            parse_input("font 18"),
            Input::Event(ReaderEvent::SetFontSize(18))
        );
        assert_eq!(parse_input("q"), Input::Quit);
    }

    #[test]
    fn parse_rejects_incomplete_commands() {
        assert!(matches!(parse_input("lang"), Input::Invalid(_)));
        assert!(matches!(parse_input("theme neon"), Input::Invalid(_)));
        assert!(matches!(parse_input("font big"), Input::Invalid(_)));
        assert!(matches!(parse_input("dance"), Input::Invalid(_)));
    }
}
