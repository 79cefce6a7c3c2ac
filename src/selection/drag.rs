//! Pointer-gesture state machine for the geometric selection tools.
//!
//! ```text
//! Idle --start--> Dragging --update--> Dragging
//!                 Dragging --end-----> Idle   (returns the selection)
//!                 Dragging --cancel--> Idle   (discards)
//! ```
//!
//! Modifier keys are captured once at press time and held for the whole
//! gesture. Releasing Shift mid-drag keeps the square/circle constraint.
//! Out-of-sequence calls are ignored.

use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::mask::SelectionMask;
use super::shapes::{ellipse_select, rectangle_select, EllipseOptions, RectangleOptions};

/// Which algorithm a drag gesture feeds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SelectionToolVariant {
    /// Click-driven; drags produce no geometric selection
    MagicWand,
    #[default]
    Rectangle,
    Circle,
}

/// An in-progress gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragState {
    pub start_x: i32,
    pub start_y: i32,
    pub current_x: i32,
    pub current_y: i32,
    /// Shift at press: constrain to square/circle
    pub shift: bool,
    /// Alt at press: draw from the center
    pub alt: bool,
}

#[derive(Clone, Debug, Default)]
pub struct DragController {
    tool: SelectionToolVariant,
    drag: Option<DragState>,
}

impl DragController {
    pub fn new(tool: SelectionToolVariant) -> Self {
        Self { tool, drag: None }
    }

    pub fn tool(&self) -> SelectionToolVariant {
        self.tool
    }

    /// Switch tools. Ignored while a gesture is in progress.
    pub fn set_tool(&mut self, tool: SelectionToolVariant) -> bool {
        if self.drag.is_some() {
            debug!("ignoring tool change to {tool:?} during drag");
            return false;
        }
        self.tool = tool;
        true
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// The active gesture, for drawing a preview outline.
    pub fn state(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    /// Begin a gesture. A second press while dragging is ignored.
    pub fn start(&mut self, x: i32, y: i32, shift: bool, alt: bool) -> bool {
        if self.drag.is_some() {
            debug!("ignoring press at ({x}, {y}): gesture already active");
            return false;
        }
        self.drag = Some(DragState {
            start_x: x,
            start_y: y,
            current_x: x,
            current_y: y,
            shift,
            alt,
        });
        true
    }

    /// Track the pointer. No selection is computed until [`end`](Self::end).
    pub fn update(&mut self, x: i32, y: i32) -> bool {
        match self.drag.as_mut() {
            Some(drag) => {
                drag.current_x = x;
                drag.current_y = y;
                true
            }
            None => false,
        }
    }

    /// Finish the gesture and compute its selection.
    ///
    /// Returns `None` when no gesture is active or the tool has no geometric
    /// selector (magic wand).
    pub fn end(&mut self) -> Option<SelectionMask> {
        let drag = self.drag.take()?;
        let (sx, sy) = (drag.start_x as f64, drag.start_y as f64);
        let (ex, ey) = (drag.current_x as f64, drag.current_y as f64);

        let mask = match self.tool {
            SelectionToolVariant::MagicWand => return None,
            SelectionToolVariant::Rectangle => {
                let options = RectangleOptions {
                    constrain_square: drag.shift,
                    from_center: drag.alt,
                };
                rectangle_select(sx, sy, ex, ey, &options)
            }
            SelectionToolVariant::Circle => {
                let options = EllipseOptions {
                    constrain_circle: drag.shift,
                    from_center: drag.alt,
                    filled: true,
                    ..EllipseOptions::default()
                };
                ellipse_select(sx, sy, ex, ey, &options)
            }
        };

        debug!(
            "{:?} drag ({}, {}) -> ({}, {}) shift={} alt={} selected {} pixels",
            self.tool,
            drag.start_x,
            drag.start_y,
            drag.current_x,
            drag.current_y,
            drag.shift,
            drag.alt,
            mask.len()
        );
        Some(mask)
    }

    /// Abandon the gesture without producing a selection.
    pub fn cancel(&mut self) -> bool {
        self.drag.take().is_some()
    }
}
