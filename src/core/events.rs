//! Event Queue System for Decoupled Communication
//!
//! This module provides a type-safe, double-buffered event queue that keeps
//! producers and consumers loosely coupled. Events are written during one
//! frame and processed in the next, ensuring consistent behavior.
//!
//! # Design Principles
//!
//! - **Type Safety**: All events are strongly typed via the `GameEvent` enum
//! - **Double Buffering**: Events are frame-consistent (no mid-frame mutations)
//! - **Zero Allocation**: Uses pre-allocated `VecDeque` with reuse
//! - **Simplicity**: No complex pub/sub - just push and iterate
//!
//! # Example
//!
//! ```ignore
//! // In the movement update
//! ctx.events.push(GameEvent::StepTaken {
//!     position: camera.position,
//!     running: state.run,
//! });
//!
//! // In the audio system
//! for event in ctx.events.iter() {
//!     if let GameEvent::StepTaken { .. } = event {
//!         footsteps.play();
//!     }
//! }
//! ```

use std::collections::VecDeque;

use glam::Vec3;

// ============================================================================
// Event Types
// ============================================================================

/// Application events for inter-system communication.
///
/// Events represent things that happened this frame. They flow from
/// producers (movement, engine loop, overlays) to consumers (audio,
/// logging) without direct coupling.
///
/// # Extensibility
///
/// The `#[non_exhaustive]` attribute allows adding new variants without
/// breaking downstream code that uses wildcard patterns.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum GameEvent {
    /// The player's foot hit the ground mid-stride.
    StepTaken {
        /// Camera position at the footfall
        position: Vec3,
        /// Whether the player was running
        running: bool,
    },

    /// The controls overlay was shown or hidden.
    OverlayToggled {
        /// New visibility
        visible: bool,
    },

    /// The pointer was captured or released.
    PointerCaptured {
        /// True when mouse-look became active
        captured: bool,
    },

    /// The welcome screen was dismissed.
    WelcomeDismissed,
}

// ============================================================================
// Event Queue
// ============================================================================

/// Double-buffered event queue for frame-consistent event processing.
///
/// Events pushed during frame N are available for reading during frame N+1.
/// This prevents issues where event order depends on system update order.
///
/// # Performance
///
/// - Push: O(1) amortized
/// - Iteration: O(n)
/// - Swap: O(1)
///
/// # Example
///
/// ```ignore
/// let mut queue = EventQueue::new();
///
/// // Frame N: Push events
/// queue.push(GameEvent::WelcomeDismissed);
///
/// // Frame N+1: Process events (after swap)
/// queue.swap();
/// for event in queue.iter() {
///     handle_event(event);
/// }
/// ```
#[derive(Debug)]
pub struct EventQueue {
    /// Events being written this frame
    pending: VecDeque<GameEvent>,
    /// Events from previous frame, ready for processing
    processing: VecDeque<GameEvent>,
}

impl EventQueue {
    /// Default initial capacity for event queues.
    const DEFAULT_CAPACITY: usize = 64;

    /// Create a new event queue with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Create a new event queue with specified initial capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pending: VecDeque::with_capacity(capacity),
            processing: VecDeque::with_capacity(capacity),
        }
    }

    /// Push an event to be processed next frame.
    ///
    /// Events are not immediately visible to iterators. Call `swap()`
    /// at the frame boundary to make them available.
    #[inline]
    pub fn push(&mut self, event: GameEvent) {
        self.pending.push_back(event);
    }

    /// Swap the pending and processing queues.
    ///
    /// Call this once per frame, typically at the start of the update loop.
    /// After swapping:
    /// - `iter()` returns events from the previous frame
    /// - `push()` writes to the new pending queue
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.pending, &mut self.processing);
        self.pending.clear();
    }

    /// Iterate over events from the previous frame.
    ///
    /// Returns an iterator over references to events. The events remain
    /// in the queue until the next `swap()` call.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.processing.iter()
    }

    /// Drain all events from the previous frame.
    ///
    /// Similar to `iter()` but takes ownership of the events.
    #[inline]
    pub fn drain(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.processing.drain(..)
    }

    /// Check if there are any events to process.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.processing.is_empty()
    }

    /// Get the number of events ready for processing.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.processing.len()
    }

    /// Get the number of events pending for next frame.
    #[must_use]
    #[inline]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Clear all events (both pending and processing).
    pub fn clear(&mut self) {
        self.pending.clear();
        self.processing.clear();
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_queue_push_and_swap() {
        let mut queue = EventQueue::new();

        // Push event - should not be visible yet
        queue.push(GameEvent::WelcomeDismissed);
        assert!(queue.is_empty(), "Events should not be visible before swap");

        // Swap - now event should be visible
        queue.swap();
        assert_eq!(queue.len(), 1);

        let events: Vec<_> = queue.iter().collect();
        assert!(matches!(events[0], GameEvent::WelcomeDismissed));
    }

    #[test]
    fn test_event_queue_double_buffer_isolation() {
        let mut queue = EventQueue::new();

        // Frame 1: Push event A
        queue.push(GameEvent::OverlayToggled { visible: false });
        queue.swap();

        // Frame 2: Push event B while A is being processed
        queue.push(GameEvent::OverlayToggled { visible: true });

        // Should only see event A
        let events: Vec<_> = queue.iter().collect();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            GameEvent::OverlayToggled { visible: false }
        ));

        // Frame 3: Now we see event B
        queue.swap();
        let events: Vec<_> = queue.iter().collect();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            GameEvent::OverlayToggled { visible: true }
        ));
    }

    #[test]
    fn test_event_queue_drain() {
        let mut queue = EventQueue::new();

        queue.push(GameEvent::PointerCaptured { captured: true });
        queue.push(GameEvent::PointerCaptured { captured: false });
        queue.swap();

        // Drain should consume events
        let events: Vec<_> = queue.drain().collect();
        assert_eq!(events.len(), 2);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_event_queue_clear() {
        let mut queue = EventQueue::new();

        queue.push(GameEvent::WelcomeDismissed);
        queue.swap();
        queue.push(GameEvent::WelcomeDismissed);

        queue.clear();

        assert!(queue.is_empty());
        assert_eq!(queue.pending_count(), 0);
    }

    #[test]
    fn test_step_taken_event() {
        let event = GameEvent::StepTaken {
            position: Vec3::new(1.0, 1.7, -3.0),
            running: true,
        };

        if let GameEvent::StepTaken { position, running } = event {
            assert_eq!(position, Vec3::new(1.0, 1.7, -3.0));
            assert!(running);
        } else {
            panic!("Wrong event type");
        }
    }
}
