//=========================================================================
// Event Dispatcher
//
// Owns the application state and reacts to surface events by mutating it
// and redrawing.
//
// Lifecycle:
// ```text
//  uninitialized ──new() [resize + redraw]──> ready
//
//  ready:  Resize  → resize buffer to surface size → observers → redraw
//          Expose  →                                 observers → redraw
//          KeyDown → move sprite (arrows only)    → observers → redraw
// ```
//
// Notes:
// Every event runs to completion, including its redraw, before the next
// one is looked at. There is no batching or partial invalidation, and no
// locking: the dispatcher lives on the event-loop thread.
//
//=========================================================================

//=== Submodules ==========================================================
mod event;

//=== External Crates =====================================================
use crossbeam_channel::{Receiver, TryRecvError};
use log::{debug, info, trace};

//=== Internal Imports ====================================================
use crate::core::graphics::{renderer, FrameBuffer, PresentationSurface, Sprite};

pub use event::{Key, SurfaceEvent};

//=== AppState ============================================================

/// Everything a frame is drawn from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub frame_buffer: FrameBuffer,
    pub sprite: Sprite,
}

type StateObserver = Box<dyn FnMut(&AppState)>;
type KeyObserver = Box<dyn FnMut(Key, &AppState)>;

//=== EventDispatcher =====================================================

pub struct EventDispatcher<S: PresentationSurface> {
    surface: S,
    state: AppState,
    resize_observers: Vec<StateObserver>,
    expose_observers: Vec<StateObserver>,
    key_observers: Vec<KeyObserver>,
}

impl<S: PresentationSurface> EventDispatcher<S> {
    //--- Construction -----------------------------------------------------

    /// Takes ownership of the surface and sprite, sizes the frame buffer to
    /// the surface and draws the first frame.
    pub fn new(surface: S, sprite: Sprite) -> Self {
        let (width, height) = surface.drawable_size();

        let mut dispatcher = Self {
            surface,
            state: AppState {
                frame_buffer: FrameBuffer::new(width, height),
                sprite,
            },
            resize_observers: Vec::new(),
            expose_observers: Vec::new(),
            key_observers: Vec::new(),
        };
        dispatcher.redraw();

        info!(target: "dispatch", "Dispatcher ready ({}x{})", width, height);
        dispatcher
    }

    //--- Registration -----------------------------------------------------
    //
    // Observers run after the built-in state update and before the redraw,
    // in registration order.
    //

    pub fn on_resize(&mut self, observer: impl FnMut(&AppState) + 'static) -> &mut Self {
        self.resize_observers.push(Box::new(observer));
        self
    }

    pub fn on_expose(&mut self, observer: impl FnMut(&AppState) + 'static) -> &mut Self {
        self.expose_observers.push(Box::new(observer));
        self
    }

    pub fn on_key_down(&mut self, observer: impl FnMut(Key, &AppState) + 'static) -> &mut Self {
        self.key_observers.push(Box::new(observer));
        self
    }

    //--- Dispatch ---------------------------------------------------------

    /// Handles a single event to completion.
    pub fn dispatch(&mut self, event: SurfaceEvent) {
        trace!(target: "dispatch", "Dispatching {:?}", event);

        match event {
            SurfaceEvent::Resize => {
                let (width, height) = self.surface.drawable_size();
                self.state.frame_buffer.resize(width, height);
                debug!(target: "dispatch", "Frame buffer resized to {}x{}", width, height);

                for observer in &mut self.resize_observers {
                    observer(&self.state);
                }
            }

            SurfaceEvent::Expose => {
                for observer in &mut self.expose_observers {
                    observer(&self.state);
                }
            }

            SurfaceEvent::KeyDown(key) => {
                if let Some(direction) = key.direction() {
                    self.state.sprite.step(direction);
                    trace!(
                        target: "dispatch",
                        "Sprite moved {:?} to ({}, {})",
                        direction,
                        self.state.sprite.x,
                        self.state.sprite.y
                    );
                }

                for observer in &mut self.key_observers {
                    observer(key, &self.state);
                }
            }
        }

        self.redraw();
    }

    /// Handles every queued event in arrival order. Returns how many were
    /// processed.
    pub fn drain(&mut self, receiver: &Receiver<SurfaceEvent>) -> usize {
        let mut handled = 0;

        loop {
            match receiver.try_recv() {
                Ok(event) => {
                    self.dispatch(event);
                    handled += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        handled
    }

    //--- Accessors --------------------------------------------------------

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    //--- Internal Helpers -------------------------------------------------

    fn redraw(&mut self) {
        renderer::redraw(&mut self.state.frame_buffer, &self.state.sprite, &mut self.surface);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::graphics::{Frame, PixelFormat};
    use crossbeam_channel::unbounded;
    use std::cell::RefCell;
    use std::rc::Rc;

    //--- Test Helpers -----------------------------------------------------

    #[derive(Debug, Clone, PartialEq)]
    struct Presented {
        width: u32,
        height: u32,
        stride: usize,
        format: PixelFormat,
        len: usize,
    }

    struct MockSurface {
        size: (u32, u32),
        presented: Vec<Presented>,
        last_bytes: Vec<u8>,
    }

    impl MockSurface {
        fn new(width: u32, height: u32) -> Self {
            Self {
                size: (width, height),
                presented: Vec::new(),
                last_bytes: Vec::new(),
            }
        }
    }

    impl PresentationSurface for MockSurface {
        fn drawable_size(&self) -> (u32, u32) {
            self.size
        }

        fn present(&mut self, frame: Frame<'_>) {
            self.presented.push(Presented {
                width: frame.width,
                height: frame.height,
                stride: frame.stride,
                format: frame.format,
                len: frame.bytes.len(),
            });
            self.last_bytes = frame.bytes.to_vec();
        }
    }

    fn dispatcher() -> EventDispatcher<MockSurface> {
        EventDispatcher::new(MockSurface::new(100, 100), Sprite::default())
    }

    fn pixel_at(surface: &MockSurface, x: usize, y: usize) -> &[u8] {
        let offset = y * 400 + x * 4;
        &surface.last_bytes[offset..offset + 4]
    }

    //=====================================================================
    // Construction
    //=====================================================================

    #[test]
    fn construction_sizes_buffer_and_draws_once() {
        let d = dispatcher();

        assert_eq!(d.state().frame_buffer.stride(), 400);
        assert_eq!(d.state().frame_buffer.len(), 40_000);
        assert_eq!(
            d.surface().presented,
            vec![Presented {
                width: 100,
                height: 100,
                stride: 400,
                format: PixelFormat::Rgba32,
                len: 40_000,
            }]
        );
        assert_eq!(pixel_at(d.surface(), 0, 0), &[255, 255, 255, 255]);
        assert_eq!(pixel_at(d.surface(), 10, 0), &[0, 25, 0, 255]);
    }

    //=====================================================================
    // Events
    //=====================================================================

    #[test]
    fn resize_reads_surface_size_and_redraws() {
        let mut d = dispatcher();
        d.surface_mut().size = (64, 32);

        d.dispatch(SurfaceEvent::Resize);

        let fb = &d.state().frame_buffer;
        assert_eq!((fb.width(), fb.height(), fb.stride(), fb.len()), (64, 32, 256, 8192));
        let last = d.surface().presented.last().unwrap();
        assert_eq!((last.width, last.height, last.len), (64, 32, 8192));
        assert_eq!(d.surface().presented.len(), 2);
    }

    #[test]
    fn expose_redraws_without_resizing() {
        let mut d = dispatcher();
        d.surface_mut().size = (10, 10);

        d.dispatch(SurfaceEvent::Expose);

        assert_eq!(d.state().frame_buffer.width(), 100);
        assert_eq!(d.surface().presented.len(), 2);
        assert_eq!(d.surface().presented[1].width, 100);
    }

    #[test]
    fn arrow_keys_move_sprite_by_speed() {
        let mut d = dispatcher();

        d.dispatch(SurfaceEvent::KeyDown(Key::Right));
        d.dispatch(SurfaceEvent::KeyDown(Key::Right));
        d.dispatch(SurfaceEvent::KeyDown(Key::Down));
        assert_eq!((d.state().sprite.x, d.state().sprite.y), (10, 5));

        d.dispatch(SurfaceEvent::KeyDown(Key::Left));
        d.dispatch(SurfaceEvent::KeyDown(Key::Up));
        assert_eq!((d.state().sprite.x, d.state().sprite.y), (5, 0));

        assert_eq!(pixel_at(d.surface(), 5, 0), &[255, 255, 255, 255]);
        assert_eq!(pixel_at(d.surface(), 4, 0), &[0, 10, 0, 255]);
    }

    #[test]
    fn other_keys_only_redraw() {
        let mut d = dispatcher();

        d.dispatch(SurfaceEvent::KeyDown(Key::Other));

        assert_eq!((d.state().sprite.x, d.state().sprite.y), (0, 0));
        assert_eq!(d.surface().presented.len(), 2);
    }

    #[test]
    fn sprite_moved_off_screen_is_clipped() {
        let mut d = dispatcher();

        d.dispatch(SurfaceEvent::KeyDown(Key::Left));

        assert_eq!(d.state().sprite.x, -5);
        assert_eq!(pixel_at(d.surface(), 4, 0), &[255, 255, 255, 255]);
        assert_eq!(pixel_at(d.surface(), 5, 0), &[0, 12, 0, 255]);
    }

    #[test]
    fn resize_to_zero_is_harmless() {
        let mut d = dispatcher();
        d.surface_mut().size = (0, 0);

        d.dispatch(SurfaceEvent::Resize);
        d.dispatch(SurfaceEvent::KeyDown(Key::Down));

        assert!(d.state().frame_buffer.is_empty());
        assert_eq!(d.surface().presented.last().unwrap().len, 0);
    }

    //=====================================================================
    // Observers
    //=====================================================================

    #[test]
    fn observers_run_in_registration_order_after_state_update() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut d = dispatcher();

        let first = Rc::clone(&log);
        let second = Rc::clone(&log);
        d.on_key_down(move |key, state| first.borrow_mut().push(format!("first {:?} {}", key, state.sprite.x)))
            .on_key_down(move |key, _| second.borrow_mut().push(format!("second {:?}", key)));

        d.dispatch(SurfaceEvent::KeyDown(Key::Right));

        assert_eq!(*log.borrow(), vec!["first Right 5".to_string(), "second Right".to_string()]);
    }

    #[test]
    fn observers_only_see_their_event_kind() {
        let counts = Rc::new(RefCell::new((0, 0, 0)));
        let mut d = dispatcher();

        let (r, e, k) = (Rc::clone(&counts), Rc::clone(&counts), Rc::clone(&counts));
        d.on_resize(move |state| {
            assert_eq!(state.frame_buffer.width(), 20);
            r.borrow_mut().0 += 1;
        })
        .on_expose(move |_| e.borrow_mut().1 += 1)
        .on_key_down(move |_, _| k.borrow_mut().2 += 1);

        d.surface_mut().size = (20, 20);
        d.dispatch(SurfaceEvent::Resize);
        d.dispatch(SurfaceEvent::Expose);
        d.dispatch(SurfaceEvent::Expose);
        d.dispatch(SurfaceEvent::KeyDown(Key::Other));

        assert_eq!(*counts.borrow(), (1, 2, 1));
    }

    //=====================================================================
    // Queue Draining
    //=====================================================================

    #[test]
    fn drain_processes_queue_in_order() {
        let (tx, rx) = unbounded();
        let mut d = dispatcher();

        tx.send(SurfaceEvent::KeyDown(Key::Down)).unwrap();
        tx.send(SurfaceEvent::Expose).unwrap();
        tx.send(SurfaceEvent::KeyDown(Key::Right)).unwrap();

        assert_eq!(d.drain(&rx), 3);
        assert_eq!((d.state().sprite.x, d.state().sprite.y), (5, 5));
        assert_eq!(d.surface().presented.len(), 4);
        assert_eq!(d.drain(&rx), 0);
    }

    #[test]
    fn drain_stops_on_disconnect() {
        let (tx, rx) = unbounded();
        let mut d = dispatcher();

        tx.send(SurfaceEvent::Expose).unwrap();
        drop(tx);

        assert_eq!(d.drain(&rx), 1);
    }
}
