//! Headless layout surface
//!
//! A fixed-advance glyph grid standing in for a real rendering surface. Text
//! is word-wrapped into the square inscribed in the circular bound, which is
//! enough for the demo binary and tests to drive the fit search.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::fit::{Extent, LayoutSurface};
use crate::sim::CircleId;
use crate::world::Host;

/// Glyph metrics for the grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridMetrics {
    /// Horizontal advance of every glyph
    pub char_width: f32,
    /// Height of one wrapped line
    pub line_height: f32,
}

impl Default for GridMetrics {
    fn default() -> Self {
        Self {
            char_width: 0.5,
            line_height: 1.2,
        }
    }
}

/// One label laid out on the glyph grid
#[derive(Debug, Clone)]
pub struct GridLabel {
    text: String,
    metrics: GridMetrics,
    side: f32,
}

impl GridLabel {
    pub fn new(text: impl Into<String>, metrics: GridMetrics) -> Self {
        Self {
            text: text.into(),
            metrics,
            side: 0.0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the label text (the host re-rendered the node)
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Current bound side length
    pub fn side(&self) -> f32 {
        self.side
    }

    /// Side of the square inscribed in the circular bound
    fn inner_side(&self) -> f32 {
        self.side * std::f32::consts::FRAC_1_SQRT_2
    }

    /// Greedy word wrap; a word wider than the line still takes one line
    pub fn line_count(&self, max_width: f32) -> usize {
        let space = self.metrics.char_width;
        let mut lines = 0;
        let mut current = 0.0f32;

        for word in self.text.split_whitespace() {
            let width = word.chars().count() as f32 * self.metrics.char_width;
            if lines == 0 {
                lines = 1;
                current = width;
            } else if current + space + width <= max_width {
                current += space + width;
            } else {
                lines += 1;
                current = width;
            }
        }
        lines
    }
}

impl LayoutSurface for GridLabel {
    fn set_bounds(&mut self, side: f32) {
        self.side = side.max(0.0);
    }

    fn measure_content_box(&self) -> Extent {
        let inner = self.inner_side();
        let top = (self.side - inner) / 2.0;
        let height = self.line_count(inner) as f32 * self.metrics.line_height;
        Extent::new(top, top + height)
    }

    fn measure_self_box(&self) -> Extent {
        Extent::new(0.0, self.side)
    }
}

/// Last state the core pushed for one circle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeState {
    pub left: f32,
    pub top: f32,
    pub diameter: f32,
}

/// In-memory host: grid labels plus the positions written back by the core
#[derive(Debug, Default)]
pub struct GridHost {
    metrics: GridMetrics,
    labels: HashMap<CircleId, GridLabel>,
    nodes: HashMap<CircleId, NodeState>,
}

impl GridHost {
    pub fn new(metrics: GridMetrics) -> Self {
        Self {
            metrics,
            labels: HashMap::new(),
            nodes: HashMap::new(),
        }
    }

    pub fn node(&self, id: CircleId) -> Option<&NodeState> {
        self.nodes.get(&id)
    }

    pub fn label_mut(&mut self, id: CircleId) -> Option<&mut GridLabel> {
        self.labels.get_mut(&id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl Host for GridHost {
    fn surface(&mut self, id: CircleId, content: &str) -> &mut dyn LayoutSurface {
        let metrics = self.metrics;
        self.labels
            .entry(id)
            .or_insert_with(|| GridLabel::new(content, metrics))
    }

    fn set_position(&mut self, id: CircleId, left: f32, top: f32) {
        let node = self.nodes.entry(id).or_default();
        node.left = left;
        node.top = top;
    }

    fn set_size(&mut self, id: CircleId, diameter: f32) {
        self.nodes.entry(id).or_default().diameter = diameter;
    }

    fn remove(&mut self, id: CircleId) {
        self.labels.remove(&id);
        self.nodes.remove(&id);
    }
}
