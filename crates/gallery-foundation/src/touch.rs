use smallvec::SmallVec;

pub type TouchId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// One finger's position as reported by the platform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Touch {
    pub id: TouchId,
    pub page_x: f32,
    pub page_y: f32,
}

impl Touch {
    pub const fn new(id: TouchId, page_x: f32, page_y: f32) -> Self {
        Self { id, page_x, page_y }
    }
}

/// Raw platform touch event: the fingers that changed and when.
///
/// `timestamp` is in whatever unit the platform uses (milliseconds or
/// nanoseconds); it only has to increase monotonically.
#[derive(Clone, Debug, PartialEq)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub changed: SmallVec<[Touch; 2]>,
    pub timestamp: u64,
}

impl TouchEvent {
    pub fn new(phase: TouchPhase, timestamp: u64) -> Self {
        Self {
            phase,
            changed: SmallVec::new(),
            timestamp,
        }
    }

    pub fn start(id: TouchId, page_x: f32, page_y: f32, timestamp: u64) -> Self {
        Self::new(TouchPhase::Start, timestamp).with_touch(id, page_x, page_y)
    }

    pub fn moved(id: TouchId, page_x: f32, page_y: f32, timestamp: u64) -> Self {
        Self::new(TouchPhase::Move, timestamp).with_touch(id, page_x, page_y)
    }

    pub fn end(id: TouchId, page_x: f32, page_y: f32, timestamp: u64) -> Self {
        Self::new(TouchPhase::End, timestamp).with_touch(id, page_x, page_y)
    }

    pub fn cancel(id: TouchId, page_x: f32, page_y: f32, timestamp: u64) -> Self {
        Self::new(TouchPhase::Cancel, timestamp).with_touch(id, page_x, page_y)
    }

    pub fn with_touch(mut self, id: TouchId, page_x: f32, page_y: f32) -> Self {
        self.changed.push(Touch::new(id, page_x, page_y));
        self
    }
}
