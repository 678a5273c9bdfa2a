use serde::Serialize;
use uuid::Uuid;

pub type TimeoutId = Uuid;

/// A request for the shell to start or stop a one-shot timer.
///
/// When a `Set` timer fires, the shell feeds
/// [`VertexEvent::LongPressElapsed`](super::actions::VertexEvent::LongPressElapsed)
/// with the same id back into the controller.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeoutOperation {
  Set {
    millis: u64,
    timeout_id: TimeoutId,
  },
  Cancel(TimeoutId),
}

impl TimeoutOperation {
  pub fn timeout_id(&self) -> TimeoutId {
    match self {
      TimeoutOperation::Set { timeout_id, .. } => *timeout_id,
      TimeoutOperation::Cancel(id) => *id,
    }
  }
}
