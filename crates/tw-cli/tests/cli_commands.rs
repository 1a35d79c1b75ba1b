//! Integration tests for the `tw` CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Create a temp directory with a story library: `storyData_1` in English
/// and French, plus `storyData_2` in English.
fn test_library() -> TempDir {
    let dir = TempDir::new().unwrap();
    let stories = dir.path().join("Stories");
    fs::create_dir_all(&stories).unwrap();
    fs::write(
        stories.join("storyData_1_en.json"),
        r#"{
    "start": {
        "text": "You wake in a dark forest.",
        "choices": [
            { "text": "Follow the river", "next": "river" },
            { "text": "Climb a tree", "next": "end_lookout" }
        ]
    },
    "river": {
        "text": "The river bends toward a village.",
        "choices": [
            { "text": "Enter the village", "next": "end_village" },
            { "text": "Turn back", "next": "start" }
        ]
    },
    "end_lookout": { "text": "From the treetop you see the way out." },
    "end_village": { "text": "The villagers welcome you home." }
}"#,
    )
    .unwrap();
    fs::write(
        stories.join("storyData_1_fr.json"),
        r#"{
    "start": {
        "text": "Vous vous réveillez dans une forêt sombre.",
        "choices": [
            { "text": "Suivre la rivière", "next": "river" },
            { "text": "Grimper à un arbre", "next": "end_lookout" }
        ]
    },
    "river": {
        "text": "La rivière tourne vers un village.",
        "choices": [
            { "text": "Entrer dans le village", "next": "end_village" },
            { "text": "Revenir", "next": "start" }
        ]
    },
    "end_village": { "text": "Les villageois vous accueillent." }
}"#,
    )
    .unwrap();
    fs::write(
        stories.join("storyData_2_en.json"),
        r#"{
    "start": {
        "text": "A starship hums around you.",
        "choices": [{ "text": "Open the airlock", "next": "end_void" }]
    }
}"#,
    )
    .unwrap();
    dir
}

fn tw() -> Command {
    let mut cmd = Command::cargo_bin("tw").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

fn play(dir: &Path) -> Command {
    let mut cmd = tw();
    cmd.arg("play")
        .arg("--stories")
        .arg(dir.join("Stories"))
        .arg("--data")
        .arg(dir.join("data"));
    cmd
}

// -- help -------------------------------------------------------------------

#[test]
fn help_lists_commands() {
    tw().arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("play"))
        .stdout(predicate::str::contains("tree"));
}

// -- play -------------------------------------------------------------------

#[test]
fn play_shows_start_node() {
    let dir = test_library();
    play(dir.path())
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("You wake in a dark forest."))
        .stdout(predicate::str::contains("[1] Follow the river"))
        .stdout(predicate::str::contains("[2] Climb a tree"))
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn play_follows_choices() {
    let dir = test_library();
    play(dir.path())
        .write_stdin("1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("The river bends toward a village."))
        .stdout(predicate::str::contains("(type 'back' to go back)"));
}

#[test]
fn play_back_returns_to_previous_node() {
    let dir = test_library();
    let output = play(dir.path())
        .write_stdin("1\nback\n")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();
    assert_eq!(stdout.matches("You wake in a dark forest.").count(), 2);
    assert!(stdout.contains("(visited)"));
}

#[test]
fn play_back_at_start_is_refused() {
    let dir = test_library();
    play(dir.path())
        .write_stdin("back\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to go back to."));
}

#[test]
fn play_rejects_out_of_range_choice() {
    let dir = test_library();
    play(dir.path())
        .write_stdin("7\n0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No such choice.").count(2));
}

#[test]
fn play_reaches_authored_ending() {
    let dir = test_library();
    play(dir.path())
        .write_stdin("1\n1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("The villagers welcome you home."))
        .stdout(predicate::str::contains("*** The End ***"))
        .stdout(predicate::str::contains("Endings discovered: 1/2"));
}

#[test]
fn play_reaches_unauthored_ending() {
    let dir = test_library();
    play(dir.path())
        .write_stdin("story storyData_2\n1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("*** The End ***"));
}

#[test]
fn play_without_saved_progress_reports_it() {
    let dir = test_library();
    play(dir.path())
        .write_stdin("load\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved progress found."));
}

#[test]
fn play_save_then_load_across_runs() {
    let dir = test_library();
    play(dir.path())
        .write_stdin("1\nsave\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Progress saved!"));

    assert!(dir.path().join("data").join("savedProgress").exists());

    play(dir.path())
        .write_stdin("load\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Progress loaded!"))
        .stdout(predicate::str::contains("The river bends toward a village."));
}

#[test]
fn play_switches_language_in_place() {
    let dir = test_library();
    play(dir.path())
        .write_stdin("1\nlang fr\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("La rivière tourne vers un village."));
}

#[test]
fn play_remembers_language() {
    let dir = test_library();
    play(dir.path()).write_stdin("lang fr\n").assert().success();

    play(dir.path())
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Vous vous réveillez"));
}

#[test]
fn play_reports_missing_language() {
    let dir = test_library();
    play(dir.path())
        .write_stdin("lang de\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("You wake in a dark forest.").count(2));
}

#[test]
fn play_selects_another_story() {
    let dir = test_library();
    play(dir.path())
        .write_stdin("story storyData_2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("A starship hums around you."));
}

#[test]
fn play_clamps_font_size() {
    let dir = test_library();
    play(dir.path())
        .write_stdin("theme dark\nfont 99\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme: dark, font size: 32"));
}

#[test]
fn play_rejects_unknown_theme() {
    let dir = test_library();
    play(dir.path())
        .write_stdin("theme neon\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("unknown theme 'neon'"));
}

#[test]
fn play_language_flag_overrides_preference() {
    let dir = test_library();
    play(dir.path())
        .arg("--lang")
        .arg("fr")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Vous vous réveillez"));
}

#[test]
fn play_language_flag_is_remembered() {
    let dir = test_library();
    play(dir.path())
        .arg("--lang")
        .arg("fr")
        .write_stdin("")
        .assert()
        .success();

    play(dir.path())
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Vous vous réveillez"));
}

#[test]
fn play_missing_story_fails() {
    let dir = test_library();
    play(dir.path())
        .arg("--story")
        .arg("nonexistent")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

// -- tree -------------------------------------------------------------------

#[test]
fn tree_prints_outline() {
    let dir = test_library();
    tw().arg("tree")
        .arg("--stories")
        .arg(dir.path().join("Stories"))
        .assert()
        .success()
        .stdout(predicate::str::contains("start"))
        .stdout(predicate::str::contains("  river"))
        .stdout(predicate::str::contains("end_village (ending)"))
        .stdout(predicate::str::contains("start (see above)"))
        .stdout(predicate::str::contains("4 nodes, 2 endings"));
}

#[test]
fn tree_missing_story_fails() {
    let dir = test_library();
    tw().arg("tree")
        .arg("--stories")
        .arg(dir.path().join("Stories"))
        .arg("--story")
        .arg("nonexistent")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}
