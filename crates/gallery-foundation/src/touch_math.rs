//! Centroid and pinch math over a [`TouchHistory`].

use gallery_graphics::Point;

use crate::gesture_constants::NANOS_INTERVAL_CUTOFF;
use crate::{TouchHistory, TouchTrack};

/// Normalizes a raw timestamp interval to milliseconds.
pub fn convert_to_millis_if_needed(interval: u64) -> f32 {
    if interval > NANOS_INTERVAL_CUTOFF {
        interval as f32 / NANOS_INTERVAL_CUTOFF as f32
    } else {
        interval as f32
    }
}

/// Mean position of the active touches that changed after `changed_after`,
/// read from their current (`of_current`) or previous coordinates.
///
/// With a single active finger it only counts if it changed strictly after
/// the instant; with several, touches stamped exactly at it count too.
pub fn centroid_of_touches_changed_after(
    history: &TouchHistory,
    changed_after: u64,
    of_current: bool,
) -> Option<Point> {
    let position = |track: &TouchTrack| {
        if of_current {
            Point::new(track.current_page_x, track.current_page_y)
        } else {
            Point::new(track.previous_page_x, track.previous_page_y)
        }
    };

    if history.number_active_touches() == 1 {
        return history
            .single_active_touch()
            .filter(|track| track.touch_active && track.current_timestamp > changed_after)
            .map(position);
    }

    let (sum, count) = history
        .tracks()
        .filter(|track| track.touch_active && track.current_timestamp >= changed_after)
        .fold((Point::ZERO, 0usize), |(sum, count), track| {
            let p = position(track);
            (Point::new(sum.x + p.x, sum.y + p.y), count + 1)
        });

    (count > 0).then(|| Point::new(sum.x / count as f32, sum.y / count as f32))
}

pub fn current_centroid_of_touches_changed_after(
    history: &TouchHistory,
    changed_after: u64,
) -> Option<Point> {
    centroid_of_touches_changed_after(history, changed_after, true)
}

pub fn previous_centroid_of_touches_changed_after(
    history: &TouchHistory,
    changed_after: u64,
) -> Option<Point> {
    centroid_of_touches_changed_after(history, changed_after, false)
}

/// Centroid of every active touch.
pub fn current_centroid(history: &TouchHistory) -> Option<Point> {
    centroid_of_touches_changed_after(history, 0, true)
}

/// Largest distance between any two touches that changed at or after
/// `changed_after`. `None` unless more than one finger is down.
pub fn pinch_distance(history: &TouchHistory, changed_after: u64, of_current: bool) -> Option<f32> {
    if history.number_active_touches() <= 1 {
        return None;
    }

    let points: Vec<Point> = history
        .tracks()
        .filter(|track| track.current_timestamp >= changed_after)
        .map(|track| {
            if of_current {
                Point::new(track.current_page_x, track.current_page_y)
            } else {
                Point::new(track.previous_page_x, track.previous_page_y)
            }
        })
        .collect();

    let mut max = 0.0f32;
    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            max = max.max((a.x - b.x).hypot(a.y - b.y));
        }
    }
    Some(max)
}
