pub mod play;
pub mod tree;

use colored::Colorize;
use tw_reader::{Notification, StoryView};
use tw_story::OutlineNode;

/// Render a node's text and numbered choices.
fn render_view(view: &StoryView) -> String {
    let mut out = String::new();
    if !view.text.is_empty() {
        out.push_str(&view.text);
        out.push('\n');
    }

    if !view.choices.is_empty() {
        out.push('\n');
        for choice in &view.choices {
            let line = format!("  [{}] {}", choice.index + 1, choice.text);
            if choice.visited {
                out.push_str(&format!("{} {}\n", line.dimmed(), "(visited)".dimmed()));
            } else {
                out.push_str(&line);
                out.push('\n');
            }
        }
    }

    if view.is_ending {
        out.push_str(&format!("\n{}\n", "*** The End ***".bold()));
    }
    if view.can_go_back {
        out.push_str("\n(type 'back' to go back)\n");
    }
    out
}

/// Print queued notifications: successes in green, errors in yellow.
fn print_notifications(notes: Vec<Notification>) {
    for note in notes {
        match note {
            Notification::Success(msg) => println!("{}", msg.green()),
            Notification::Error(msg) => println!("{}", msg.yellow()),
        }
    }
}

/// Render an outline as an indented tree.
fn render_outline(outline: &OutlineNode) -> String {
    let mut out = String::new();
    write_outline(outline, 0, &mut out);
    out
}

fn write_outline(node: &OutlineNode, depth: usize, out: &mut String) {
    out.push_str(&"  ".repeat(depth));
    if node.current {
        out.push_str("* ");
    }
    out.push_str(&node.id);
    if node.ending {
        out.push_str(" (ending)");
    }
    if node.missing {
        out.push_str(" (missing)");
    }
    if node.revisit {
        out.push_str(" (see above)");
    }
    out.push('\n');
    for child in &node.children {
        write_outline(child, depth + 1, out);
    }
}
