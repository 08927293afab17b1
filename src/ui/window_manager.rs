//! # Window Collection
//!
//! Windows live in an arena of generation-tagged slots; the stacking order
//! is a separate front-to-back list of ids. Index 0 of that list is the
//! topmost window: it wins hit tests and is painted last.

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::{GuiError, Result};
use crate::ui::theme::Theme;
use crate::ui::widgets::Rect;
use crate::ui::window::{Window, WindowId};

struct Slot {
    generation: u32,
    window: Option<Window>,
}

pub struct WindowCollection {
    slots: Vec<Slot>,
    /// Front to back.
    order: Vec<WindowId>,
    max_windows: usize,
    /// Screen area windows may occupy; everything else (the taskbar) never
    /// hit-tests as a window.
    work_area: Rect,
    theme: Theme,
}

impl WindowCollection {
    pub fn new(max_windows: usize, work_area: Rect, theme: Theme) -> Self {
        Self {
            slots: Vec::new(),
            order: Vec::new(),
            max_windows,
            work_area,
            theme,
        }
    }

    pub fn work_area(&self) -> Rect {
        self.work_area
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Create a window on top of the stack with the theme's colors.
    ///
    /// Nothing is inserted when the window budget is spent or the heap
    /// cannot hold the record.
    pub fn create(&mut self, x: i32, y: i32, w: u32, h: u32, title: &str) -> Result<WindowId> {
        if w == 0 || h == 0 {
            return Err(GuiError::InvalidGeometry);
        }
        if self.order.len() >= self.max_windows {
            klog_warn!("window budget of {} exhausted", self.max_windows);
            return Err(GuiError::OutOfMemory);
        }

        let mut owned = String::new();
        owned
            .try_reserve_exact(title.len())
            .map_err(|_| GuiError::OutOfMemory)?;
        owned.push_str(title);
        self.order.try_reserve(1).map_err(|_| GuiError::OutOfMemory)?;

        let free = self.slots.iter().position(|s| s.window.is_none());
        let index = match free {
            Some(index) => index,
            None => {
                self.slots.try_reserve(1).map_err(|_| GuiError::OutOfMemory)?;
                self.slots.push(Slot { generation: 0, window: None });
                self.slots.len() - 1
            }
        };

        let slot = &mut self.slots[index];
        slot.window = Some(Window::new(Rect::new(x, y, w, h), owned, &self.theme));
        let id = WindowId { index: index as u32, generation: slot.generation };
        self.order.insert(0, id);
        Ok(id)
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: WindowId) -> Option<&Window> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.window.as_ref()
    }

    pub fn get_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.window.as_mut()
    }

    /// Topmost window containing the point, title bar included.
    pub fn hit_test(&self, x: i32, y: i32) -> Option<WindowId> {
        if !self.work_area.contains(x, y) {
            return None;
        }
        self.front_to_back()
            .find(|(_, w)| w.rect.contains(x, y))
            .map(|(id, _)| id)
    }

    /// Move a window to the front of the stack.
    pub fn raise(&mut self, id: WindowId) -> Result<()> {
        let pos = self
            .order
            .iter()
            .position(|&o| o == id)
            .ok_or(GuiError::NoSuchWindow)?;
        if pos != 0 {
            self.order.remove(pos);
            self.order.insert(0, id);
        }
        Ok(())
    }

    /// Detach a window from the stack and hand back its record. The slot's
    /// generation is bumped so `id` never matches again.
    pub fn remove(&mut self, id: WindowId) -> Result<Window> {
        let pos = self
            .order
            .iter()
            .position(|&o| o == id)
            .ok_or(GuiError::NoSuchWindow)?;
        self.order.remove(pos);

        let slot = &mut self.slots[id.index as usize];
        slot.generation = slot.generation.wrapping_add(1);
        slot.window.take().ok_or(GuiError::NoSuchWindow)
    }

    pub fn topmost(&self) -> Option<WindowId> {
        self.order.first().copied()
    }

    pub fn ids(&self) -> &[WindowId] {
        &self.order
    }

    pub fn front_to_back(&self) -> impl Iterator<Item = (WindowId, &Window)> + '_ {
        self.order.iter().filter_map(move |&id| Some((id, self.get(id)?)))
    }

    /// Painting order.
    pub fn back_to_front(&self) -> impl Iterator<Item = (WindowId, &Window)> + '_ {
        self.order.iter().rev().filter_map(move |&id| Some((id, self.get(id)?)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AREA: Rect = Rect::new(0, 0, 640, 450);

    fn collection(max: usize) -> WindowCollection {
        WindowCollection::new(max, AREA, Theme::CLASSIC)
    }

    #[test]
    fn new_windows_go_on_top() {
        let mut wc = collection(8);
        let a = wc.create(10, 10, 100, 100, "a").unwrap();
        let b = wc.create(50, 50, 100, 100, "b").unwrap();
        assert_eq!(wc.ids(), &[b, a]);
        assert_eq!(wc.get(a).unwrap().title(), "a");
        assert_eq!(wc.get(b).unwrap().bg, Theme::CLASSIC.window_bg);
    }

    #[test]
    fn hit_test_is_topmost_first_and_raise_changes_it() {
        let mut wc = collection(8);
        let a = wc.create(10, 10, 100, 100, "a").unwrap();
        let b = wc.create(50, 50, 100, 100, "b").unwrap();

        assert_eq!(wc.hit_test(60, 60), Some(b));
        assert_eq!(wc.hit_test(20, 20), Some(a));
        assert_eq!(wc.hit_test(300, 300), None);

        wc.raise(a).unwrap();
        assert_eq!(wc.topmost(), Some(a));
        assert_eq!(wc.hit_test(60, 60), Some(a));
    }

    #[test]
    fn title_bar_counts_as_part_of_the_window() {
        let mut wc = collection(8);
        let a = wc.create(10, 10, 100, 100, "a").unwrap();
        assert_eq!(wc.hit_test(10, 10), Some(a));
        assert_eq!(wc.hit_test(109, 29), Some(a));
        assert_eq!(wc.hit_test(110, 29), None);
    }

    #[test]
    fn points_outside_the_work_area_hit_nothing() {
        let mut wc = collection(8);
        wc.create(0, 400, 200, 200, "low").unwrap();
        assert!(wc.hit_test(10, 449).is_some());
        assert_eq!(wc.hit_test(10, 450), None);
    }

    #[test]
    fn budget_exhaustion_leaves_collection_unchanged() {
        let mut wc = collection(2);
        wc.create(0, 0, 10, 10, "1").unwrap();
        wc.create(0, 0, 10, 10, "2").unwrap();
        let before = wc.ids().to_vec();
        assert_eq!(wc.create(0, 0, 10, 10, "3"), Err(GuiError::OutOfMemory));
        assert_eq!(wc.ids(), &before[..]);
    }

    #[test]
    fn removed_ids_stay_dead_after_slot_reuse() {
        let mut wc = collection(4);
        let a = wc.create(0, 0, 10, 10, "a").unwrap();
        let removed = wc.remove(a).unwrap();
        assert_eq!(removed.title(), "a");
        assert!(!wc.contains(a));
        assert_eq!(wc.remove(a).err(), Some(GuiError::NoSuchWindow));
        assert_eq!(wc.raise(a), Err(GuiError::NoSuchWindow));

        let b = wc.create(0, 0, 10, 10, "b").unwrap();
        assert_eq!(b.index, a.index);
        assert!(wc.get(a).is_none());
        assert_eq!(wc.get(b).unwrap().title(), "b");
    }

    #[test]
    fn zero_sized_windows_are_rejected() {
        let mut wc = collection(4);
        assert_eq!(wc.create(0, 0, 0, 10, "x"), Err(GuiError::InvalidGeometry));
        assert!(wc.is_empty());
    }

    #[test]
    fn paint_order_is_reverse_of_hit_order() {
        let mut wc = collection(4);
        let a = wc.create(0, 0, 10, 10, "a").unwrap();
        let b = wc.create(0, 0, 10, 10, "b").unwrap();
        let c = wc.create(0, 0, 10, 10, "c").unwrap();
        let paint: Vec<WindowId> = wc.back_to_front().map(|(id, _)| id).collect();
        assert_eq!(paint, [a, b, c]);
        assert_eq!(wc.len(), 3);
    }
}
