use std::fmt::Display;

use super::timeout::TimeoutId;

/// Events are inputs into the touch state machine.
/// Every variant except `LongPressElapsed` carries the vertex (slot) index it happened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexEvent {
  /// A touch started on a vertex.
  Begin(usize),

  /// A touch that started on a vertex moved.
  Move(usize),

  /// A touch was lifted from a vertex.
  End(usize),

  /// The system took the touch away, e.g. for a system gesture.
  Cancel(usize),

  /// A long-press timer requested with [`TimeoutOperation::Set`](super::timeout::TimeoutOperation::Set) has fired.
  LongPressElapsed(TimeoutId),
}

impl Display for VertexEvent {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    use VertexEvent::*;
    match self {
      Begin(i) => write!(f, "Begin({i})"),
      Move(i) => write!(f, "Move({i})"),
      End(i) => write!(f, "End({i})"),
      Cancel(i) => write!(f, "Cancel({i})"),
      LongPressElapsed(id) => write!(f, "LongPressElapsed({id})"),
    }
  }
}
