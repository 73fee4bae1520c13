use egui::{Context, Event, LayerId, PointerButton, Pos2, Rect, TouchId};

use crate::tracker::PointerId;

/// Pointer id used for the mouse while no touch device has been seen
pub const MOUSE_POINTER_ID: PointerId = 0;

/// Phase of a touch record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Down,
    Move,
    Up,
}

/// One raw input record for a single contact, in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub pointer_id: PointerId,
    pub position: Pos2,
    pub phase: TouchPhase,
}

impl TouchEvent {
    pub fn new(pointer_id: PointerId, position: Pos2, phase: TouchPhase) -> Self {
        Self {
            pointer_id,
            position,
            phase,
        }
    }

    pub fn down(pointer_id: PointerId, x: f32, y: f32) -> Self {
        Self::new(pointer_id, Pos2::new(x, y), TouchPhase::Down)
    }

    pub fn moved(pointer_id: PointerId, x: f32, y: f32) -> Self {
        Self::new(pointer_id, Pos2::new(x, y), TouchPhase::Move)
    }

    pub fn up(pointer_id: PointerId, x: f32, y: f32) -> Self {
        Self::new(pointer_id, Pos2::new(x, y), TouchPhase::Up)
    }
}

/// Converts raw egui input into [`TouchEvent`]s for a canvas rectangle.
///
/// egui touch ids are arbitrary integers, so each live touch is given the
/// lowest free pointer id instead. Ids are released when the touch ends.
#[derive(Debug)]
pub struct InputHandler {
    canvas_rect: Rect,
    touches: Vec<Option<TouchId>>,
    mouse_down: bool,
    last_mouse_pos: Pos2,
    touch_seen: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new(Rect::NOTHING)
    }
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            canvas_rect,
            touches: Vec::new(),
            mouse_down: false,
            last_mouse_pos: Pos2::ZERO,
            touch_seen: false,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    fn local(&self, pos: Pos2) -> Pos2 {
        (pos - self.canvas_rect.min).to_pos2()
    }

    /// Process this frame's raw egui input. Contacts only start where the
    /// canvas layer is the topmost layer, so popups and windows over the
    /// canvas keep their clicks.
    pub fn process_input(&mut self, ctx: &Context, canvas_layer: LayerId) -> Vec<TouchEvent> {
        let events = ctx.input(|input| input.raw.events.clone());
        self.translate(&events, |pos| {
            ctx.layer_id_at(pos).is_none_or(|layer| layer == canvas_layer)
        })
    }

    /// `hits_canvas` decides whether a contact starting at a screen position
    /// belongs to the canvas. Moves and releases are not hit tested.
    pub fn translate(&mut self, events: &[Event], hits_canvas: impl Fn(Pos2) -> bool) -> Vec<TouchEvent> {
        let mut out = Vec::new();
        for event in events {
            match event {
                Event::Touch { id, phase, pos, .. } => {
                    if !self.touch_seen {
                        self.touch_seen = true;
                        // Touch platforms also emit simulated mouse events; stop listening to them.
                        if self.mouse_down {
                            self.mouse_down = false;
                            let pos = self.local(self.last_mouse_pos);
                            out.push(TouchEvent::new(MOUSE_POINTER_ID, pos, TouchPhase::Up));
                        }
                    }
                    let starts_on_canvas = self.canvas_rect.contains(*pos) && hits_canvas(*pos);
                    self.translate_touch(*id, *phase, *pos, starts_on_canvas, &mut out);
                }
                Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed,
                    ..
                } if !self.touch_seen => {
                    self.last_mouse_pos = *pos;
                    if *pressed && !self.mouse_down && self.canvas_rect.contains(*pos) && hits_canvas(*pos) {
                        self.mouse_down = true;
                        out.push(TouchEvent::new(MOUSE_POINTER_ID, self.local(*pos), TouchPhase::Down));
                    } else if !*pressed && self.mouse_down {
                        self.mouse_down = false;
                        out.push(TouchEvent::new(MOUSE_POINTER_ID, self.local(*pos), TouchPhase::Up));
                    }
                }
                Event::PointerMoved(pos) if !self.touch_seen => {
                    self.last_mouse_pos = *pos;
                    if self.mouse_down {
                        out.push(TouchEvent::new(MOUSE_POINTER_ID, self.local(*pos), TouchPhase::Move));
                    }
                }
                Event::PointerGone if self.mouse_down => {
                    self.mouse_down = false;
                    let pos = self.local(self.last_mouse_pos);
                    out.push(TouchEvent::new(MOUSE_POINTER_ID, pos, TouchPhase::Up));
                }
                _ => {}
            }
        }
        out
    }

    fn translate_touch(
        &mut self,
        id: TouchId,
        phase: egui::TouchPhase,
        pos: Pos2,
        starts_on_canvas: bool,
        out: &mut Vec<TouchEvent>,
    ) {
        let local = self.local(pos);
        match phase {
            egui::TouchPhase::Start => {
                if !starts_on_canvas || self.pointer_for(id).is_some() {
                    return;
                }
                let pointer = match self.touches.iter().position(Option::is_none) {
                    Some(free) => {
                        self.touches[free] = Some(id);
                        free
                    }
                    None => {
                        self.touches.push(Some(id));
                        self.touches.len() - 1
                    }
                };
                out.push(TouchEvent::new(pointer as PointerId, local, TouchPhase::Down));
            }
            egui::TouchPhase::Move => {
                if let Some(pointer) = self.pointer_for(id) {
                    out.push(TouchEvent::new(pointer, local, TouchPhase::Move));
                }
            }
            egui::TouchPhase::End | egui::TouchPhase::Cancel => {
                if let Some(pointer) = self.pointer_for(id) {
                    self.touches[pointer as usize] = None;
                    out.push(TouchEvent::new(pointer, local, TouchPhase::Up));
                }
            }
        }
    }

    fn pointer_for(&self, id: TouchId) -> Option<PointerId> {
        self.touches
            .iter()
            .position(|touch| *touch == Some(id))
            .map(|index| index as PointerId)
    }

    /// Number of touches currently holding a pointer id
    pub fn live_touches(&self) -> usize {
        self.touches.iter().filter(|touch| touch.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Modifiers, TouchDeviceId, pos2, vec2};

    fn handler() -> InputHandler {
        InputHandler::new(Rect::from_min_size(pos2(100.0, 50.0), vec2(200.0, 200.0)))
    }

    fn touch(id: u64, phase: egui::TouchPhase, x: f32, y: f32) -> Event {
        Event::Touch {
            device_id: TouchDeviceId(0),
            id: TouchId(id),
            phase,
            pos: pos2(x, y),
            force: None,
        }
    }

    fn everywhere(_: Pos2) -> bool {
        true
    }

    fn button(pressed: bool, x: f32, y: f32) -> Event {
        Event::PointerButton {
            pos: pos2(x, y),
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::NONE,
        }
    }

    #[test]
    fn test_touches_get_lowest_free_ids() {
        let mut handler = handler();
        let events = handler.translate(&[
            touch(900, egui::TouchPhase::Start, 110.0, 60.0),
            touch(42, egui::TouchPhase::Start, 120.0, 70.0),
        ], everywhere);
        assert_eq!(events, vec![
            TouchEvent::down(0, 10.0, 10.0),
            TouchEvent::down(1, 20.0, 20.0),
        ]);

        let events = handler.translate(&[
            touch(900, egui::TouchPhase::End, 130.0, 60.0),
            touch(7, egui::TouchPhase::Start, 150.0, 80.0),
            touch(42, egui::TouchPhase::Move, 125.0, 75.0),
        ], everywhere);
        assert_eq!(events, vec![
            TouchEvent::up(0, 30.0, 10.0),
            TouchEvent::down(0, 50.0, 30.0),
            TouchEvent::moved(1, 25.0, 25.0),
        ]);
        assert_eq!(handler.live_touches(), 2);
    }

    #[test]
    fn test_cancel_is_delivered_as_up() {
        let mut handler = handler();
        handler.translate(&[touch(1, egui::TouchPhase::Start, 110.0, 60.0)], everywhere);
        let events = handler.translate(&[touch(1, egui::TouchPhase::Cancel, 115.0, 60.0)], everywhere);
        assert_eq!(events, vec![TouchEvent::up(0, 15.0, 10.0)]);
        assert_eq!(handler.live_touches(), 0);
    }

    #[test]
    fn test_touch_starting_outside_canvas_is_dropped() {
        let mut handler = handler();
        let events = handler.translate(&[
            touch(1, egui::TouchPhase::Start, 10.0, 10.0),
            touch(1, egui::TouchPhase::Move, 150.0, 100.0),
            touch(1, egui::TouchPhase::End, 150.0, 100.0),
        ], everywhere);
        assert!(events.is_empty());
    }

    #[test]
    fn test_mouse_drag() {
        let mut handler = handler();
        let events = handler.translate(&[
            Event::PointerMoved(pos2(110.0, 60.0)),
            button(true, 110.0, 60.0),
            Event::PointerMoved(pos2(140.0, 60.0)),
            button(false, 140.0, 60.0),
            Event::PointerMoved(pos2(160.0, 60.0)),
        ], everywhere);
        assert_eq!(events, vec![
            TouchEvent::down(MOUSE_POINTER_ID, 10.0, 10.0),
            TouchEvent::moved(MOUSE_POINTER_ID, 40.0, 10.0),
            TouchEvent::up(MOUSE_POINTER_ID, 40.0, 10.0),
        ]);
    }

    #[test]
    fn test_mouse_leaving_window_ends_stroke() {
        let mut handler = handler();
        handler.translate(&[button(true, 110.0, 60.0), Event::PointerMoved(pos2(120.0, 60.0))], everywhere);
        let events = handler.translate(&[Event::PointerGone], everywhere);
        assert_eq!(events, vec![TouchEvent::up(MOUSE_POINTER_ID, 20.0, 10.0)]);
    }

    #[test]
    fn test_simulated_mouse_ignored_after_touch() {
        let mut handler = handler();
        let events = handler.translate(&[
            touch(5, egui::TouchPhase::Start, 110.0, 60.0),
            button(true, 110.0, 60.0),
            Event::PointerMoved(pos2(140.0, 60.0)),
        ], everywhere);
        assert_eq!(events, vec![TouchEvent::down(0, 10.0, 10.0)]);
    }

    #[test]
    fn test_press_under_overlapping_layer_is_dropped() {
        let mut handler = handler();
        // Something else is drawn over the left half of the canvas
        let uncovered = |pos: Pos2| pos.x >= 200.0;

        let events = handler.translate(&[
            button(true, 150.0, 60.0),
            Event::PointerMoved(pos2(250.0, 60.0)),
            button(false, 250.0, 60.0),
            touch(3, egui::TouchPhase::Start, 120.0, 70.0),
            touch(3, egui::TouchPhase::Move, 160.0, 70.0),
        ], uncovered);
        assert!(events.is_empty());
        assert_eq!(handler.live_touches(), 0);

        let events = handler.translate(&[touch(4, egui::TouchPhase::Start, 250.0, 70.0)], uncovered);
        assert_eq!(events, vec![TouchEvent::down(0, 150.0, 20.0)]);
    }

    #[test]
    fn test_contact_keeps_drawing_under_overlapping_layer() {
        let mut handler = handler();
        let uncovered = |pos: Pos2| pos.x >= 200.0;
        let events = handler.translate(&[
            button(true, 250.0, 60.0),
            Event::PointerMoved(pos2(150.0, 60.0)),
            button(false, 150.0, 60.0),
        ], uncovered);
        assert_eq!(events, vec![
            TouchEvent::down(MOUSE_POINTER_ID, 150.0, 10.0),
            TouchEvent::moved(MOUSE_POINTER_ID, 50.0, 10.0),
            TouchEvent::up(MOUSE_POINTER_ID, 50.0, 10.0),
        ]);
    }
}
