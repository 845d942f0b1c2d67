// overlay/drag.rs - Drag-to-Move Gesture
//
// The window manager performs the move itself once a drag is requested. This
// only tracks where the gesture is so the final origin is reported once. The
// platform grab can swallow the button release, so pointer activity in the
// window after a move also ends the gesture.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Phase {
    #[default]
    Idle,
    /// Button down, the window has not moved yet
    Grabbed,
    /// The window manager has moved the window at least once
    Moving,
}

/// Press/move/release tracking for repositioning the overlay window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragGesture {
    phase: Phase,
}

impl DragGesture {
    pub fn is_active(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Start a drag. A press during a drag starts it over.
    pub fn press(&mut self) {
        self.phase = Phase::Grabbed;
    }

    /// The window moved
    pub fn window_moved(&mut self) {
        if self.is_active() {
            self.phase = Phase::Moving;
        }
    }

    /// Pointer moved inside the window. Returns whether that ended the drag.
    ///
    /// While the window manager moves the window it holds the pointer, so
    /// motion after a move means it has let go.
    pub fn pointer_moved(&mut self) -> bool {
        if self.phase == Phase::Moving {
            self.phase = Phase::Idle;
            true
        } else {
            false
        }
    }

    /// End the drag. Returns whether one was in progress.
    pub fn release(&mut self) -> bool {
        let active = self.is_active();
        self.phase = Phase::Idle;
        active
    }

    pub fn cancel(&mut self) {
        self.phase = Phase::Idle;
    }
}
