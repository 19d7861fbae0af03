//! Greedy flow layout for variable-width tag chips.

/// Item dimensions fed to the layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A placed item, origin at the container's top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }
}

/// Result of a layout pass: one rect per input item, in input order, plus the
/// bounding size of everything placed.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowLayout {
    pub rects: Vec<Rect>,
    pub size: Size,
}

/// Place items left to right with fixed spacing, wrapping to a new row when
/// the running width would pass `max_width`. Greedy, no re-balancing. An item
/// wider than the container gets its own row at x = 0.
pub fn flow_layout(items: &[Size], max_width: f64, spacing: f64) -> FlowLayout {
    let mut rects = Vec::with_capacity(items.len());
    let mut x = 0.0;
    let mut y = 0.0;
    let mut row_height: f64 = 0.0;
    let mut widest: f64 = 0.0;

    for item in items {
        if x > 0.0 && x + item.width > max_width {
            x = 0.0;
            y += row_height + spacing;
            row_height = 0.0;
        }
        rects.push(Rect {
            x,
            y,
            width: item.width,
            height: item.height,
        });
        row_height = row_height.max(item.height);
        x += item.width + spacing;
        widest = widest.max(x - spacing);
    }

    let height = if rects.is_empty() { 0.0 } else { y + row_height };
    FlowLayout {
        rects,
        size: Size::new(widest, height),
    }
}
