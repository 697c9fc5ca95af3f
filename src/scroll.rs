/// Header gets its compact `scrolled` look past this offset, in pixels.
pub const HEADER_SCROLLED_AFTER: f64 = 50.0;
/// The scroll-to-top button shows past this offset, in pixels.
pub const SCROLL_TOP_AFTER: f64 = 300.0;
/// Share of an element that must be inside the reveal zone.
pub const REVEAL_THRESHOLD: f64 = 0.1;
/// The reveal zone ends this far above the viewport bottom.
pub const REVEAL_BOTTOM_MARGIN: f64 = 50.0;

/// Page chrome that depends only on the vertical scroll offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollMarks {
    pub header_scrolled: bool,
    pub show_scroll_top: bool,
}

impl ScrollMarks {
    pub fn at(scroll_y: f64) -> Self {
        Self {
            header_scrolled: scroll_y > HEADER_SCROLLED_AFTER,
            show_scroll_top: scroll_y > SCROLL_TOP_AFTER,
        }
    }
}

/// Width of the reading progress bar, in percent.
/// A page that fits the viewport has nothing to scroll and reports 0.
pub fn progress(scroll_top: f64, document_height: f64, viewport_height: f64) -> f64 {
    let scrollable = document_height - viewport_height;
    if scrollable.is_nan() || scrollable <= 0.0 || !scroll_top.is_finite() {
        return 0.0;
    }
    (scroll_top / scrollable * 100.0).clamp(0.0, 100.0)
}

/// Scroll position for an in-page anchor, keeping the target below the
/// fixed header.
pub fn anchor_offset(target_top: f64, header_height: f64) -> f64 {
    (target_top - header_height).max(0.0)
}

/// Vertical placement of an element relative to the viewport top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementBox {
    pub top: f64,
    pub height: f64,
}

impl ElementBox {
    /// Whether enough of the element is inside the reveal zone.
    pub fn in_reveal_zone(&self, viewport_height: f64) -> bool {
        let zone_bottom = viewport_height - REVEAL_BOTTOM_MARGIN;
        if self.height <= 0.0 {
            return self.top >= 0.0 && self.top <= zone_bottom;
        }
        let visible = (self.top + self.height).min(zone_bottom) - self.top.max(0.0);
        visible > 0.0 && visible / self.height >= REVEAL_THRESHOLD
    }
}

/// One-way reveal flags: once an element is shown it stays shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reveal {
    revealed: Vec<bool>,
}

impl Reveal {
    pub fn new(elements: usize) -> Self {
        Self {
            revealed: vec![false; elements],
        }
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    /// Checks the current layout and returns indices revealed by it.
    /// Boxes beyond the tracked count are ignored.
    pub fn update(&mut self, boxes: &[ElementBox], viewport_height: f64) -> Vec<usize> {
        let mut fresh = Vec::new();
        for (i, (flag, b)) in self.revealed.iter_mut().zip(boxes).enumerate() {
            if !*flag && b.in_reveal_zone(viewport_height) {
                *flag = true;
                fresh.push(i);
            }
        }
        fresh
    }
}

/// Input that may open or close the mobile navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    Toggle,
    /// Click outside both the menu and its toggle.
    OutsideClick,
    NavLink,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Menu {
    open: bool,
}

impl Menu {
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Applies an event; returns whether the menu changed state.
    pub fn handle(&mut self, event: MenuEvent) -> bool {
        let next = match event {
            MenuEvent::Toggle => !self.open,
            MenuEvent::OutsideClick | MenuEvent::NavLink | MenuEvent::Escape => false,
        };
        let changed = next != self.open;
        self.open = next;
        changed
    }

    pub fn icon(&self) -> &'static str {
        if self.open {
            "fa-times"
        } else {
            "fa-bars"
        }
    }

    /// Body class that locks page scrolling while the menu is open.
    pub fn body_class(&self) -> Option<&'static str> {
        self.open.then_some("menu-open")
    }
}
