//! Commands produced by the window layer and consumed by the application.

use crate::render::DrawMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// A discrete user action. One keypress produces at most one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Translate the camera one step along a world axis.
    Move { axis: Axis, positive: bool },
    /// Swing the camera position about a world axis through the origin.
    Orbit { axis: Axis, positive: bool },
    /// Rotate the camera orientation about one of its axes.
    Turn { axis: Axis, positive: bool },
    /// Draw a demo triangle on the overlay.
    Draw(DrawMode),
    /// Remove every demo triangle from the overlay.
    ClearOverlay,
    /// Write the current frame to the output image.
    Save,
    Quit,
}

/// Whether the frame loop keeps going after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}
