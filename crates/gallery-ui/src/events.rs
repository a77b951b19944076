use gallery_graphics::Transform;

/// Motion state of the pager, reported whenever it is (re)entered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PageScrollState {
    #[default]
    Idle,
    /// A finger is moving the pages.
    Dragging,
    /// The pages are snapping or flinging towards a target page.
    Settling,
}

/// Scroll position of the pager.
///
/// `position` is the page at the left edge of the viewport; `offset` is how far
/// (in pages) the viewport has moved past it, and `fraction` the same distance
/// measured in page widths with the margin excluded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageScroll {
    pub position: usize,
    pub offset: f32,
    pub fraction: f32,
}

/// Notification produced by the pager, drained by the gallery.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PagerEvent {
    PageSelected(usize),
    ScrollStateChanged(PageScrollState),
    Scrolled(PageScroll),
}

/// Everything a [`GalleryListener`](crate::GalleryListener) can be told, as a
/// value. Used by recording listeners in tests and tools.
#[derive(Clone, Debug, PartialEq)]
pub enum GalleryEvent {
    PageSelected(usize),
    PageScrollStateChanged(PageScrollState),
    PageScroll(PageScroll),
    ViewTransformed { page: usize, transform: Transform },
    TransformGestureReleased { page: usize, transform: Transform },
    SingleTapConfirmed(usize),
    GalleryStateChanged { idle: bool },
    LongPress { x0: f32, y0: f32 },
}
