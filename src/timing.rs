use core::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{Error, Result};

pub const DEFAULT_TYPING_INTERVAL: u64 = 100;
pub const DEFAULT_PAUSE_DURATION: u64 = 2000;

/// Pace of the typewriter, in milliseconds.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct Timing {
    /// Minimal time between two cursor moves.
    pub typing_interval: u64,
    /// How long a fully typed snippet stays on screen.
    pub pause_duration: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            typing_interval: DEFAULT_TYPING_INTERVAL,
            pause_duration: DEFAULT_PAUSE_DURATION,
        }
    }
}

impl Timing {
    // Use 0 to restore the default interval
    pub fn set_typing_interval(&mut self, ms: u64) {
        self.typing_interval = if ms == 0 {
            DEFAULT_TYPING_INTERVAL
        } else {
            ms
        };
    }

    pub fn set_pause_duration(&mut self, ms: u64) {
        self.pause_duration = ms;
    }

    /// Time needed to type, hold and delete a snippet of `segments` segments.
    pub fn cycle_duration(&self, segments: usize) -> u64 {
        let steps = (segments as u64).saturating_mul(self.typing_interval);
        // typing, then the pause, then deletion; the last deletion tick also switches
        steps.saturating_mul(2).saturating_add(self.pause_duration)
    }
}

/// Formats as `typing:<ms> pause:<ms>`.
impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "typing:{} pause:{}",
            self.typing_interval, self.pause_duration
        )
    }
}

/// Parses `typing:<ms> pause:<ms>`; either key may be omitted.
/// A bare number is taken as the typing interval.
impl FromStr for Timing {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        let mut ret = Self::default();
        let mut typing = false;
        let mut pause = false;
        let mut values = 0;
        for ss in s.split_whitespace() {
            values += 1;
            let (key, value) = ss.split_once(':').unwrap_or(("typing", ss));
            let ms = value
                .parse::<u64>()
                .map_err(|err| Error::TimingValue(String::from(ss), err))?;
            match key {
                "typing" => {
                    if typing {
                        return Err(Error::TimingDup(key.into()));
                    }
                    typing = true;
                    ret.set_typing_interval(ms);
                }
                "pause" => {
                    if pause {
                        return Err(Error::TimingDup(key.into()));
                    }
                    pause = true;
                    ret.set_pause_duration(ms);
                }
                _ => return Err(Error::TimingParsing(String::from(s))),
            }
        }
        if values == 0 {
            return Err(Error::TimingParsing(String::from(s)));
        }
        Ok(ret)
    }
}
