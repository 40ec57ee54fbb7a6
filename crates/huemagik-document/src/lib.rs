// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// huemagik-document: palette exports.
//
// Composes palettes onto an offscreen raster (compact swatch card or A4
// palette sheet) and encodes the result as PNG or as a single-page PDF.

pub mod canvas;
pub mod card;
pub mod font;
pub mod image;
pub mod pdf;
pub mod render;

pub use canvas::Canvas;
pub use font::LabelFont;
pub use self::image::ImageProcessor;
pub use pdf::writer::PdfWriter;
pub use render::{Renderer, render};
