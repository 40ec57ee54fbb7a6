// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Navigation cursor for the on-screen swatch label display.

use serde::{Deserialize, Serialize};

use crate::types::ColorSample;

/// What the on-screen swatch labels show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelMode {
    Blank,
    Hex,
    Rgb,
}

impl LabelMode {
    const ORDER: [LabelMode; 3] = [LabelMode::Blank, LabelMode::Hex, LabelMode::Rgb];

    pub fn index(&self) -> usize {
        match self {
            Self::Blank => 0,
            Self::Hex => 1,
            Self::Rgb => 2,
        }
    }

    /// Label text for one swatch in this mode.
    pub fn label(&self, sample: &ColorSample) -> String {
        match self {
            Self::Blank => String::new(),
            Self::Hex => sample.hex(),
            Self::Rgb => format!("RGB({})", sample.rgb()),
        }
    }
}

/// Direction of a cursor step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Next,
    Prev,
}

/// Cyclic index over the three label modes.
///
/// Independent of any palette: switching images leaves it where it is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabelCursor {
    index: usize,
}

impl LabelCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> LabelMode {
        LabelMode::ORDER[self.index]
    }

    /// Step the cursor and return the new mode.
    pub fn cycle(&mut self, direction: Direction) -> LabelMode {
        let len = LabelMode::ORDER.len();
        self.index = match direction {
            Direction::Next => (self.index + 1) % len,
            Direction::Prev => (self.index + len - 1) % len,
        };
        self.mode()
    }

    /// Back to `Blank`.
    pub fn reset(&mut self) {
        self.index = 0;
    }
}
