/// Vertical scroll bookkeeping for row-based widgets.
///
/// Offsets are in terminal rows. Every mutation clamps `y` so the last page of content stays
/// fully visible.
#[derive(Clone, Copy, Debug, Default)]
pub struct ViewportState {
    pub y: u32,
    pub viewport_h: u16,
    pub content_h: u32,
}

impl ViewportState {
    pub fn set_viewport(&mut self, h: u16) {
        self.viewport_h = h;
        self.clamp();
    }

    pub fn set_content(&mut self, h: u32) {
        self.content_h = h;
        self.clamp();
    }

    pub fn clamp(&mut self) {
        self.y = self.y.min(self.max_y());
    }

    pub fn scroll_y_by(&mut self, delta: i32) {
        let next = self.y as i64 + delta as i64;
        self.y = next.clamp(0, self.max_y() as i64) as u32;
    }

    pub fn to_top(&mut self) {
        self.y = 0;
    }

    pub fn to_bottom(&mut self) {
        self.y = self.max_y();
    }

    /// How far down the content the bottom of the viewport sits, or `None` when everything fits.
    pub fn percent_y(&self) -> Option<u8> {
        if self.content_h == 0 || self.viewport_h == 0 || self.content_h <= self.viewport_h as u32 {
            return None;
        }
        let visible_bottom = self.y.saturating_add(self.viewport_h as u32) as f64;
        let pct = (visible_bottom / self.content_h as f64 * 100.0).round();
        Some(pct.clamp(0.0, 100.0) as u8)
    }

    fn max_y(&self) -> u32 {
        self.content_h.saturating_sub(self.viewport_h as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_clamps_to_last_page() {
        let mut s = ViewportState::default();
        s.set_viewport(5);
        s.set_content(6);
        s.y = 99;
        s.clamp();
        assert_eq!(s.y, 1);
    }

    #[test]
    fn scroll_y_by_stays_in_range() {
        let mut s = ViewportState::default();
        s.set_viewport(4);
        s.set_content(10);
        s.scroll_y_by(100);
        assert_eq!(s.y, 6);
        s.scroll_y_by(-100);
        assert_eq!(s.y, 0);
    }

    #[test]
    fn percent_y_is_none_when_content_fits() {
        let mut s = ViewportState::default();
        s.set_viewport(10);
        s.set_content(3);
        assert_eq!(s.percent_y(), None);
        s.set_content(20);
        s.to_bottom();
        assert_eq!(s.percent_y(), Some(100));
    }
}
