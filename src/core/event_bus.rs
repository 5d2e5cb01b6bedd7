//! Event bus for decoupled widget → app communication.
//!
//! Widgets collect events into their action structs; the app drains them into
//! the bus and processes the whole batch once per frame via poll(). Emission
//! order is preserved (FIFO), so a click that navigates a gallery is applied
//! before the hover-leave that follows it in the same frame.

use log::warn;
use std::any::Any;
use std::sync::{Arc, Mutex};

/// Maximum events in queue before oldest are evicted
const MAX_QUEUE_SIZE: usize = 1000;

/// Marker trait for events. Events must be Send + Sync + 'static.
pub trait Event: Any + Send + Sync + 'static {
    fn as_any(&self) -> &dyn Any;
    fn type_name(&self) -> &'static str;
}

// Blanket impl for all qualifying types
impl<T: Any + Send + Sync + 'static> Event for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// Boxed event for queue storage
pub type BoxedEvent = Box<dyn Event>;

/// Queued event bus for batch processing in the main loop.
///
/// emit() appends to the queue; poll() takes the whole batch. The queue is
/// bounded: when full, the oldest half is evicted with a warning.
#[derive(Clone, Default)]
pub struct EventBus {
    queue: Arc<Mutex<Vec<BoxedEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            queue: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue an event for the next poll().
    pub fn emit<E: Event + Clone>(&self, event: E) {
        self.push(Box::new(event));
    }

    /// Queue a boxed event (for dynamic dispatch).
    pub fn emit_boxed(&self, event: BoxedEvent) {
        self.push(event);
    }

    fn push(&self, event: BoxedEvent) {
        let mut queue = self.queue.lock().unwrap_or_else(|e| e.into_inner());
        if queue.len() >= MAX_QUEUE_SIZE {
            let evict_count = queue.len() / 2;
            warn!("EventBus queue full ({} events), evicting oldest {}", queue.len(), evict_count);
            queue.drain(0..evict_count);
        }
        queue.push(event);
    }

    /// Poll all queued events for batch processing.
    ///
    /// Returns all events emitted since last poll. Use in main loop:
    /// ```ignore
    /// for event in event_bus.poll() {
    ///     // Process event...
    /// }
    /// ```
    pub fn poll(&self) -> Vec<BoxedEvent> {
        std::mem::take(&mut *self.queue.lock().unwrap_or_else(|e| e.into_inner()))
    }

    /// Get an emitter handle for passing to UI components.
    pub fn emitter(&self) -> EventEmitter {
        EventEmitter {
            queue: Arc::clone(&self.queue),
        }
    }

    /// Clear the queue
    pub fn clear(&self) {
        self.queue.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    /// Check queue length
    pub fn queue_len(&self) -> usize {
        self.queue.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

/// Lightweight emitter handle for UI components.
///
/// Can be cloned and passed to widgets for emitting events.
#[derive(Clone)]
pub struct EventEmitter {
    queue: Arc<Mutex<Vec<BoxedEvent>>>,
}

impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("queue_len", &self.queue.lock().map(|q| q.len()).unwrap_or(0))
            .finish()
    }
}

impl EventEmitter {
    /// Queue an event for the next poll()
    pub fn emit<E: Event + Clone>(&self, event: E) {
        self.emit_boxed(Box::new(event));
    }

    /// Queue a boxed event
    pub fn emit_boxed(&self, event: BoxedEvent) {
        let mut queue = self.queue.lock().unwrap_or_else(|e| e.into_inner());
        if queue.len() >= MAX_QUEUE_SIZE {
            let evict_count = queue.len() / 2;
            warn!("EventEmitter queue full ({} events), evicting oldest {}", queue.len(), evict_count);
            queue.drain(0..evict_count);
        }
        queue.push(event);
    }
}

/// Helper: downcast BoxedEvent to concrete type
///
/// IMPORTANT: Must explicitly deref to `dyn Event` before calling `as_any()`.
/// Without explicit deref, the blanket impl `Event for Box<dyn Event>` intercepts
/// the call and returns `&dyn Any` containing `Box<dyn Event>` instead of the
/// original type, causing downcast to always fail.
#[inline]
pub fn downcast_event<E: Event>(event: &BoxedEvent) -> Option<&E> {
    (**event).as_any().downcast_ref::<E>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    struct TestEvent { value: i32 }

    #[derive(Clone, Debug)]
    struct OtherEvent { msg: String }

    #[test]
    fn test_emit_queues_for_poll() {
        let bus = EventBus::new();

        bus.emit(TestEvent { value: 1 });
        bus.emit(TestEvent { value: 2 });
        bus.emit(OtherEvent { msg: "hello".into() });

        let events = bus.poll();
        assert_eq!(events.len(), 3);

        // Queue is empty after poll
        assert_eq!(bus.poll().len(), 0);
    }

    #[test]
    fn test_poll_preserves_order() {
        let bus = EventBus::new();
        for i in 0..5 {
            bus.emit(TestEvent { value: i });
        }

        let values: Vec<i32> = bus
            .poll()
            .iter()
            .filter_map(|e| downcast_event::<TestEvent>(e).map(|t| t.value))
            .collect();
        assert_eq!(values, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_emitter_handle() {
        let bus = EventBus::new();

        let emitter = bus.emitter();
        emitter.emit(TestEvent { value: 42 });

        // Event was queued on the shared bus
        let events = bus.poll();
        assert_eq!(events.len(), 1);
        assert_eq!(downcast_event::<TestEvent>(&events[0]).map(|e| e.value), Some(42));
    }

    #[test]
    fn test_downcast() {
        let bus = EventBus::new();
        bus.emit(TestEvent { value: 42 });

        for ev in bus.poll() {
            if let Some(e) = downcast_event::<TestEvent>(&ev) {
                assert_eq!(e.value, 42);
            }
        }
    }

    #[test]
    fn test_downcast_wrong_type() {
        let bus = EventBus::new();
        bus.emit(TestEvent { value: 1 });

        let events = bus.poll();
        assert!(downcast_event::<OtherEvent>(&events[0]).is_none());
    }

    #[test]
    fn test_queue_eviction() {
        let bus = EventBus::new();
        for i in 0..1001 {
            bus.emit(TestEvent { value: i });
        }

        // Oldest half evicted at the 1001st emit; newest event survives
        let events = bus.poll();
        assert_eq!(events.len(), 501);
        let last = downcast_event::<TestEvent>(events.last().unwrap()).unwrap();
        assert_eq!(last.value, 1000);
    }
}
