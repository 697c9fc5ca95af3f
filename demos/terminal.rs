use std::env;
use std::time::Duration;

use tracing_subscriber::EnvFilter;
use typecycle::{AnsiTerminal, Config, Deck, ThreadFrames, Typewriter};

fn main() {
    // RUST_LOG=typecycle=debug shows every step
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Optional config path: `cargo run --example terminal -- snippets.toml`
    let config = match env::args().nth(1) {
        Some(path) => Config::from_file(path).unwrap(),
        None => Config::from(Deck::stock()),
    };

    let term = AnsiTerminal::stdout(config.styles.clone());
    let mut tw = Typewriter::start(
        config,
        Some(term.clone()),
        Some(term.clone()),
        Some(term),
    )
    .unwrap();

    // One full pass over the deck, then exit
    let mut frames = ThreadFrames {
        period: Duration::from_millis(16),
        limit: None,
    };
    let snippets = tw.config().deck.len();
    let mut switches = 0;
    tw.run_until(&mut frames, |_, step| {
        if let typecycle::Step::Switched { .. } = step {
            switches += 1;
        }
        switches == snippets
    });
}
