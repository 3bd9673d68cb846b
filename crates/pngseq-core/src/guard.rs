//! Scoped resource tracking for a single decode or encode call.
//!
//! Each engine state, heap buffer, row table and file handle acquired during a
//! call is wrapped in a [`Tracked`] value registered with the call's
//! [`Ledger`]. Dropping a `Tracked` releases it and records the release, so
//! every exit path (success, validation failure, engine abort) releases
//! exactly what was acquired. Locals drop in reverse declaration order, which
//! gives reverse acquisition order.

use std::cell::RefCell;
use std::fmt;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::ops::{Deref, DerefMut};

/// What kind of resource a ledger entry stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// An input or output file handle.
    File,
    /// An in-memory input blob.
    Blob,
    /// Codec engine state (decoder or encoder).
    EngineState,
    /// A contiguous pixel buffer.
    PixelBuffer,
    /// A table of row slices into a pixel buffer.
    RowTable,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::File => "file",
            ResourceKind::Blob => "blob",
            ResourceKind::EngineState => "engine state",
            ResourceKind::PixelBuffer => "pixel buffer",
            ResourceKind::RowTable => "row table",
        };
        f.write_str(name)
    }
}

/// One entry in a ledger's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Acquired(ResourceKind),
    Released(ResourceKind),
    /// Ownership moved out to the caller as part of the call's result.
    HandedOff(ResourceKind),
}

#[derive(Debug, Default)]
struct LedgerState {
    next_id: usize,
    live: Vec<(usize, ResourceKind)>,
    history: Vec<Event>,
}

/// Per-call registry of acquired resources.
#[derive(Debug, Default)]
pub struct Ledger {
    state: RefCell<LedgerState>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `value` as an acquired resource of the given kind.
    pub fn track<T>(&self, kind: ResourceKind, value: T) -> Tracked<'_, T> {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        state.live.push((id, kind));
        state.history.push(Event::Acquired(kind));
        log::trace!("acquired {} (#{})", kind, id);
        Tracked {
            value: Some(value),
            kind,
            id,
            ledger: self,
        }
    }

    /// Number of resources acquired and not yet released or handed off.
    pub fn outstanding(&self) -> usize {
        self.state.borrow().live.len()
    }

    /// Full acquire/release history, oldest first.
    pub fn history(&self) -> Vec<Event> {
        self.state.borrow().history.clone()
    }

    /// Whether a resource of `kind` was ever acquired.
    pub fn acquired(&self, kind: ResourceKind) -> bool {
        self.state
            .borrow()
            .history
            .iter()
            .any(|e| *e == Event::Acquired(kind))
    }

    /// Kinds in the order they were released.
    pub fn releases(&self) -> Vec<ResourceKind> {
        self.state
            .borrow()
            .history
            .iter()
            .filter_map(|e| match e {
                Event::Released(kind) => Some(*kind),
                _ => None,
            })
            .collect()
    }

    fn retire(&self, id: usize, event: Event) {
        let mut state = self.state.borrow_mut();
        if let Some(pos) = state.live.iter().position(|(live_id, _)| *live_id == id) {
            state.live.remove(pos);
            state.history.push(event);
            log::trace!("{:?} (#{})", event, id);
        }
    }
}

/// A resource registered with a [`Ledger`], released on drop.
pub struct Tracked<'l, T> {
    value: Option<T>,
    kind: ResourceKind,
    id: usize,
    ledger: &'l Ledger,
}

impl<'l, T> Tracked<'l, T> {
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Move the resource out to the caller, recording a hand-off rather than
    /// a release.
    pub fn hand_off(mut self) -> T {
        self.ledger.retire(self.id, Event::HandedOff(self.kind));
        match self.value.take() {
            Some(value) => value,
            // `value` is only taken here and in drop, both of which consume self
            None => unreachable!("tracked resource already taken"),
        }
    }
}

impl<T> Drop for Tracked<'_, T> {
    fn drop(&mut self) {
        if let Some(value) = self.value.take() {
            // Record first so resources owned by `value` log after their owner
            self.ledger.retire(self.id, Event::Released(self.kind));
            drop(value);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Tracked<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracked")
            .field("kind", &self.kind)
            .field("id", &self.id)
            .field("value", &self.value)
            .finish()
    }
}

impl<T> Deref for Tracked<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        match &self.value {
            Some(value) => value,
            None => unreachable!("tracked resource already taken"),
        }
    }
}

impl<T> DerefMut for Tracked<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        match &mut self.value {
            Some(value) => value,
            None => unreachable!("tracked resource already taken"),
        }
    }
}

impl<T: Read> Read for Tracked<'_, T> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        (**self).read(buf)
    }
}

impl<T: Write> Write for Tracked<'_, T> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        (**self).write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

impl<T: Seek> Seek for Tracked<'_, T> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        (**self).seek(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_in_reverse_order() {
        let ledger = Ledger::new();
        {
            let _file = ledger.track(ResourceKind::File, ());
            let _engine = ledger.track(ResourceKind::EngineState, ());
            let _buffer = ledger.track(ResourceKind::PixelBuffer, vec![0u8; 16]);
            assert_eq!(ledger.outstanding(), 3);
        }
        assert_eq!(ledger.outstanding(), 0);
        assert_eq!(
            ledger.releases(),
            vec![
                ResourceKind::PixelBuffer,
                ResourceKind::EngineState,
                ResourceKind::File
            ]
        );
    }

    #[test]
    fn test_hand_off_is_not_a_release() {
        let ledger = Ledger::new();
        let buffer = ledger.track(ResourceKind::PixelBuffer, vec![1u8, 2, 3]);
        let owned = buffer.hand_off();
        assert_eq!(owned, vec![1, 2, 3]);
        assert_eq!(ledger.outstanding(), 0);
        assert!(ledger.releases().is_empty());
        assert_eq!(
            ledger.history(),
            vec![
                Event::Acquired(ResourceKind::PixelBuffer),
                Event::HandedOff(ResourceKind::PixelBuffer)
            ]
        );
    }

    #[test]
    fn test_released_on_error_path() {
        fn fails(ledger: &Ledger) -> Result<(), ()> {
            let _buffer = ledger.track(ResourceKind::PixelBuffer, vec![0u8; 4]);
            let _rows = ledger.track(ResourceKind::RowTable, ());
            Err(())
        }

        let ledger = Ledger::new();
        assert!(fails(&ledger).is_err());
        assert_eq!(ledger.outstanding(), 0);
        assert_eq!(
            ledger.releases(),
            vec![ResourceKind::RowTable, ResourceKind::PixelBuffer]
        );
    }

    #[test]
    fn test_tracked_reader_delegates() {
        let ledger = Ledger::new();
        let mut reader = ledger.track(ResourceKind::Blob, std::io::Cursor::new(vec![7u8, 8]));
        let mut out = [0u8; 2];
        reader.read_exact(&mut out).unwrap();
        assert_eq!(out, [7, 8]);
        assert_eq!(reader.kind(), ResourceKind::Blob);
    }

    #[test]
    fn test_owner_released_before_owned() {
        struct Owner<'l> {
            _input: Tracked<'l, ()>,
        }

        let ledger = Ledger::new();
        let input = ledger.track(ResourceKind::File, ());
        let engine = ledger.track(ResourceKind::EngineState, Owner { _input: input });
        drop(engine);
        assert_eq!(
            ledger.releases(),
            vec![ResourceKind::EngineState, ResourceKind::File]
        );
    }

    #[test]
    fn test_debug_shows_kind_and_value() {
        let ledger = Ledger::new();
        let buffer = ledger.track(ResourceKind::PixelBuffer, vec![1u8, 2]);
        let text = format!("{:?}", buffer);
        assert!(text.contains("PixelBuffer"), "{}", text);
        assert!(text.contains("[1, 2]"), "{}", text);
    }

    #[test]
    fn test_acquired_query() {
        let ledger = Ledger::new();
        let _engine = ledger.track(ResourceKind::EngineState, ());
        assert!(ledger.acquired(ResourceKind::EngineState));
        assert!(!ledger.acquired(ResourceKind::PixelBuffer));
    }
}
