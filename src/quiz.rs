/// Circumference of the score ring (`r = 54`).
pub const RING_CIRCUMFERENCE: f64 = 339.292;
/// Duration of the ring fill transition, in milliseconds.
pub const RING_TRANSITION: u64 = 1500;
/// Delay before the first answer card appears, in milliseconds.
pub const FIRST_REVEAL_DELAY: u64 = 300;
/// Extra delay for each following card, in milliseconds.
pub const REVEAL_STAGGER: u64 = 150;

/// `stroke-dashoffset` for a score in percent. Scores are clamped to
/// `0..=100`; a missing or unparsable score counts as 0.
pub fn ring_offset(score: f64) -> f64 {
    let score = if score.is_finite() {
        score.clamp(0.0, 100.0)
    } else {
        0.0
    };
    RING_CIRCUMFERENCE - RING_CIRCUMFERENCE * score / 100.0
}

/// Reads the score attribute as rendered by the results template.
pub fn parse_score(attr: &str) -> f64 {
    attr.trim().parse().unwrap_or(0.0)
}

/// When the answer card at `index` starts showing, relative to page load.
pub fn reveal_delay(index: usize) -> u64 {
    (index as u64)
        .saturating_mul(REVEAL_STAGGER)
        .saturating_add(FIRST_REVEAL_DELAY)
}

/// How many of `total` answer cards are visible `elapsed` ms after load.
pub fn revealed_count(elapsed: u64, total: usize) -> usize {
    if elapsed < FIRST_REVEAL_DELAY {
        return 0;
    }
    let shown = (elapsed - FIRST_REVEAL_DELAY) / REVEAL_STAGGER + 1;
    usize::try_from(shown).map_or(total, |n| n.min(total))
}
