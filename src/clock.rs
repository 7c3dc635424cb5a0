// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::time::{Duration, Instant};

use crate::types::{Color, TableIndex};

/// Remaining thinking time for both players. Only the side on move has its
/// clock running, and a clock never runs below zero.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Clocks {
    remaining: [Duration; 2],
}

impl Clocks {
    pub fn new(initial: Duration) -> Clocks {
        Clocks {
            remaining: [initial; 2],
        }
    }

    pub fn remaining(&self, color: Color) -> Duration {
        self.remaining[color.as_index()]
    }

    pub fn set_remaining(&mut self, color: Color, time: Duration) {
        self.remaining[color.as_index()] = time;
    }

    /// Charges `elapsed` to the given side's clock, clamping at zero. Returns true
    /// if the clock has run out.
    pub fn run_down(&mut self, color: Color, elapsed: Duration) -> bool {
        let clock = &mut self.remaining[color.as_index()];
        *clock = clock.checked_sub(elapsed).unwrap_or_default();
        *clock == Duration::from_secs(0)
    }

    pub fn formatted(&self, color: Color) -> String {
        format_clock(self.remaining(color))
    }
}

/// Formats a duration as `MM:SS`, truncating partial seconds.
pub fn format_clock(time: Duration) -> String {
    let total_seconds = time.as_secs();
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Measures wall time between successive ticks of the game loop. The first tick
/// after a restart measures nothing.
#[derive(Copy, Clone, Debug, Default)]
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> FrameClock {
        FrameClock { last: None }
    }

    /// Returns the time since the previous call and starts a new frame at `now`.
    pub fn restart(&mut self, now: Instant) -> Duration {
        let elapsed = match self.last {
            Some(last) if now > last => now - last,
            _ => Duration::from_secs(0),
        };

        self.last = Some(now);
        elapsed
    }

    /// Forgets the previous frame, so that time up to the next `restart` is not
    /// charged to anyone.
    pub fn clear(&mut self) {
        self.last = None;
    }
}
