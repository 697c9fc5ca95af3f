/// Widths at or below this use touch scrolling with dots.
pub const MOBILE_MAX_WIDTH: u32 = 768;
/// Widths at or above this show two cards at once.
pub const WIDE_MIN_WIDTH: u32 = 1024;
/// Horizontal gap between cards, in pixels.
pub const CARD_GAP: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Native scrolling; the active dot follows the centred card.
    Mobile,
    /// Prev/next buttons moving one card at a time.
    Desktop { visible: usize },
}

impl Layout {
    pub fn from_width(width: u32) -> Self {
        if width <= MOBILE_MAX_WIDTH {
            Layout::Mobile
        } else if width >= WIDE_MIN_WIDTH {
            Layout::Desktop { visible: 2 }
        } else {
            Layout::Desktop { visible: 1 }
        }
    }
}

/// Button paging state for the desktop layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    current: usize,
    cards: usize,
    visible: usize,
}

impl Pager {
    pub fn new(cards: usize, visible: usize) -> Self {
        Self {
            current: 0,
            cards,
            visible: visible.max(1),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    fn last(&self) -> usize {
        self.cards.saturating_sub(self.visible)
    }

    pub fn can_prev(&self) -> bool {
        self.current > 0
    }

    pub fn can_next(&self) -> bool {
        self.current < self.last()
    }

    /// Moves one card back; returns whether anything moved.
    pub fn prev(&mut self) -> bool {
        if !self.can_prev() {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Moves one card forward; returns whether anything moved.
    pub fn next(&mut self) -> bool {
        if !self.can_next() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Track translation in pixels (negative moves left).
    pub fn offset(&self, card_width: f64) -> f64 {
        -(self.current as f64 * (card_width + CARD_GAP))
    }
}

/// Horizontal placement of a card inside the scroll container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardBox {
    pub left: f64,
    pub width: f64,
}

impl CardBox {
    fn center(&self) -> f64 {
        self.left + self.width / 2.0
    }
}

/// Index of the card whose centre is closest to the viewport centre.
/// The first card wins ties; `None` when there are no cards.
pub fn nearest_card(scroll_left: f64, viewport_width: f64, cards: &[CardBox]) -> Option<usize> {
    let center = scroll_left + viewport_width / 2.0;
    let mut best: Option<(usize, f64)> = None;
    for (i, card) in cards.iter().enumerate() {
        let distance = (card.center() - center).abs();
        match best {
            Some((_, d)) if d <= distance => {}
            _ => best = Some((i, distance)),
        }
    }
    best.map(|(i, _)| i)
}
