//! Single-slot box host
//!
//! Mounts at most one floating box at a time, keeps the container size so a
//! newly shown box is measured immediately, and drops the box once it reports
//! `Destroyed`.

use crate::config::BoxConfig;
use crate::sim::{BoxEvent, BoxStyle, FloatingBox, TickInput, tick};

struct Mounted<T> {
    content: T,
    floating: FloatingBox,
}

/// Owner of the (at most one) active box and its content
pub struct BoxHost<T> {
    config: BoxConfig,
    container: Option<(f32, f32)>,
    active: Option<Mounted<T>>,
    on_destroy: Option<Box<dyn FnMut(T)>>,
}

impl<T> BoxHost<T> {
    pub fn new(config: BoxConfig) -> Self {
        Self {
            config,
            container: None,
            active: None,
            on_destroy: None,
        }
    }

    /// Called with the content of a box once it has been destroyed and removed
    pub fn with_on_destroy(mut self, callback: impl FnMut(T) + 'static) -> Self {
        self.on_destroy = Some(Box::new(callback));
        self
    }

    /// Show `content` in a fresh box, replacing any box already shown
    pub fn show(&mut self, content: T) -> Option<T> {
        let mut floating = FloatingBox::new(self.config.clone());
        if let Some((width, height)) = self.container {
            floating.set_container_size(width, height);
        }
        let previous = self.active.replace(Mounted { content, floating });
        if previous.is_some() {
            log::debug!("Replacing active floating box");
        }
        previous.map(|m| m.content)
    }

    /// Remove the active box without animating it out
    pub fn hide(&mut self) -> Option<T> {
        self.active.take().map(|m| m.content)
    }

    pub fn is_showing(&self) -> bool {
        self.active.is_some()
    }

    pub fn content(&self) -> Option<&T> {
        self.active.as_ref().map(|m| &m.content)
    }

    pub fn floating(&self) -> Option<&FloatingBox> {
        self.active.as_ref().map(|m| &m.floating)
    }

    pub fn floating_mut(&mut self) -> Option<&mut FloatingBox> {
        self.active.as_mut().map(|m| &mut m.floating)
    }

    pub fn style(&self) -> Option<BoxStyle> {
        self.floating().map(FloatingBox::style)
    }

    pub fn set_container_size(&mut self, width: f32, height: f32) {
        self.container = Some((width, height));
        if let Some(floating) = self.floating_mut() {
            floating.set_container_size(width, height);
        }
    }

    /// Advance the active box; unmounts it on the frame it is destroyed
    pub fn tick(&mut self, input: &TickInput, dt: f32) -> Vec<BoxEvent> {
        let Some(mounted) = self.active.as_mut() else {
            return Vec::new();
        };

        let events = tick(&mut mounted.floating, input, dt);
        if events.contains(&BoxEvent::Destroyed) {
            if let Some(Mounted { content, .. }) = self.active.take() {
                log::debug!("Floating box removed");
                if let Some(callback) = self.on_destroy.as_mut() {
                    callback(content);
                }
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DragDismiss, EdgeConfig};
    use crate::consts::FRAME_DT;
    use crate::sim::InputEvent;
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn dismissable() -> BoxConfig {
        let mut config = BoxConfig::default();
        config.edges.left = EdgeConfig {
            drag_dismiss: Some(DragDismiss {
                min_out_of_bounds: 0.5,
                exit_velocity: 1000.0,
            }),
            ..Default::default()
        };
        config.initial_x = 20.0;
        config
    }

    #[test]
    fn test_show_replaces_previous() {
        let mut host = BoxHost::new(BoxConfig::default());
        assert!(!host.is_showing());
        assert_eq!(host.show("first"), None);
        assert_eq!(host.show("second"), Some("first"));
        assert_eq!(host.content(), Some(&"second"));
        assert_eq!(host.hide(), Some("second"));
        assert!(host.style().is_none());
    }

    #[test]
    fn test_container_size_carries_to_new_box() {
        let mut host = BoxHost::new(BoxConfig::default());
        host.set_container_size(320.0, 480.0);
        host.show(());
        let geometry = *host.floating().unwrap().geometry();
        assert_eq!(geometry.container_width, 320.0);
        assert_eq!(geometry.container_height, 480.0);
    }

    #[test]
    fn test_destroyed_box_is_unmounted_once() {
        let removed = Rc::new(RefCell::new(Vec::new()));
        let sink = removed.clone();
        let mut host = BoxHost::new(dismissable()).with_on_destroy(move |c| sink.borrow_mut().push(c));
        host.set_container_size(300.0, 600.0);
        host.show("video");

        let input = TickInput::with([
            InputEvent::BoxLayout {
                width: 100.0,
                height: 100.0,
            },
            InputEvent::GestureStart,
            InputEvent::GestureUpdate {
                translation: Vec2::new(-80.0, 0.0),
            },
            InputEvent::GestureEnd {
                velocity: Vec2::ZERO,
            },
        ]);
        let events = host.tick(&input, FRAME_DT);
        assert!(matches!(events.as_slice(), [BoxEvent::DestroyStarted(_)]));
        assert!(host.is_showing());

        let mut destroyed = 0;
        for _ in 0..60 {
            let events = host.tick(&TickInput::default(), FRAME_DT);
            destroyed += events.iter().filter(|e| **e == BoxEvent::Destroyed).count();
        }
        assert_eq!(destroyed, 1);
        assert!(!host.is_showing());
        assert_eq!(*removed.borrow(), vec!["video"]);
    }
}
