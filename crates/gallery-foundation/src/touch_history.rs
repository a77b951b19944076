use rustc_hash::FxHashMap;

use crate::{Touch, TouchEvent, TouchId, TouchPhase};

/// Everything known about one finger since it went down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchTrack {
    pub touch_active: bool,
    pub start_page_x: f32,
    pub start_page_y: f32,
    pub start_timestamp: u64,
    pub current_page_x: f32,
    pub current_page_y: f32,
    pub current_timestamp: u64,
    pub previous_page_x: f32,
    pub previous_page_y: f32,
    pub previous_timestamp: u64,
}

impl TouchTrack {
    fn started(touch: &Touch, timestamp: u64) -> Self {
        Self {
            touch_active: true,
            start_page_x: touch.page_x,
            start_page_y: touch.page_y,
            start_timestamp: timestamp,
            current_page_x: touch.page_x,
            current_page_y: touch.page_y,
            current_timestamp: timestamp,
            previous_page_x: touch.page_x,
            previous_page_y: touch.page_y,
            previous_timestamp: timestamp,
        }
    }

    fn advance(&mut self, touch: &Touch, timestamp: u64, active: bool) {
        self.touch_active = active;
        self.previous_page_x = self.current_page_x;
        self.previous_page_y = self.current_page_y;
        self.previous_timestamp = self.current_timestamp;
        self.current_page_x = touch.page_x;
        self.current_page_y = touch.page_y;
        self.current_timestamp = timestamp;
    }
}

/// Per-finger track bank, updated from every raw event before any gesture
/// logic looks at it.
#[derive(Clone, Debug, Default)]
pub struct TouchHistory {
    touch_bank: FxHashMap<TouchId, TouchTrack>,
    number_active_touches: usize,
    index_of_single_active_touch: Option<TouchId>,
    most_recent_timestamp: u64,
}

impl TouchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: &TouchEvent) {
        for touch in &event.changed {
            match event.phase {
                TouchPhase::Start => self.record_start(touch, event.timestamp),
                TouchPhase::Move => self.record_move(touch, event.timestamp),
                TouchPhase::End | TouchPhase::Cancel => self.record_end(touch, event.timestamp),
            }
        }
        self.refresh_active();
    }

    pub fn record_start(&mut self, touch: &Touch, timestamp: u64) {
        self.touch_bank
            .insert(touch.id, TouchTrack::started(touch, timestamp));
        self.most_recent_timestamp = timestamp;
    }

    pub fn record_move(&mut self, touch: &Touch, timestamp: u64) {
        match self.touch_bank.get_mut(&touch.id) {
            Some(track) => {
                track.advance(touch, timestamp, true);
                self.most_recent_timestamp = timestamp;
            }
            None => log::warn!("move for unknown touch {}", touch.id),
        }
    }

    pub fn record_end(&mut self, touch: &Touch, timestamp: u64) {
        match self.touch_bank.get_mut(&touch.id) {
            Some(track) => {
                track.advance(touch, timestamp, false);
                self.most_recent_timestamp = timestamp;
            }
            None => log::warn!("end for unknown touch {}", touch.id),
        }
    }

    fn refresh_active(&mut self) {
        let mut active = self.touch_bank.iter().filter(|(_, track)| track.touch_active);
        let first = active.next().map(|(id, _)| *id);
        self.number_active_touches = usize::from(first.is_some()) + active.count();
        if self.number_active_touches == 1 {
            self.index_of_single_active_touch = first;
        }
    }

    pub fn number_active_touches(&self) -> usize {
        self.number_active_touches
    }

    pub fn most_recent_timestamp(&self) -> u64 {
        self.most_recent_timestamp
    }

    /// The only active finger, when exactly one is down.
    pub fn single_active_touch(&self) -> Option<&TouchTrack> {
        if self.number_active_touches != 1 {
            return None;
        }
        self.index_of_single_active_touch
            .and_then(|id| self.touch_bank.get(&id))
    }

    pub fn track(&self, id: TouchId) -> Option<&TouchTrack> {
        self.touch_bank.get(&id)
    }

    pub fn tracks(&self) -> impl Iterator<Item = &TouchTrack> {
        self.touch_bank.values()
    }
}
