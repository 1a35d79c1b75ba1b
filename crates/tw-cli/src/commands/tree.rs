//! Print the outline of a story.

use tw_reader::ReaderConfig;
use tw_story::{DirSource, load};

pub fn run(config: &ReaderConfig, language: &str) -> Result<(), String> {
    let source = DirSource::new(&config.stories_dir);
    let graph = load(&source, &config.default_story, language).map_err(|e| e.to_string())?;

    print!("{}", super::render_outline(&graph.outline("")));
    println!(
        "\n{} nodes, {} endings",
        graph.len(),
        graph.count_endings()
    );
    Ok(())
}
