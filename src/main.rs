//! Floatbox entry point
//!
//! Native builds run a headless scripted session and log what the box does.
//! The browser build is driven through `platform::web::WasmFloatingBox`.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use floatbox::consts::FRAME_DT;
    use floatbox::{BoxConfig, BoxEvent, FloatingBox, InputEvent, TickInput, tick};
    use glam::Vec2;

    floatbox::platform::init_logging();
    log::info!("Floatbox (native) starting...");

    // Optional config path as the first argument
    let config = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| BoxConfig::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(config) => {
                log::info!("Loaded config from {}", path);
                config
            }
            Err(e) => {
                log::error!("Failed to load config {}: {}", path, e);
                BoxConfig::picture_in_picture()
            }
        },
        None => BoxConfig::picture_in_picture(),
    };

    let mut floating = FloatingBox::new(config)
        .with_on_destroy(|| log::info!("on_destroy: box removed from screen"));

    // Lay out and let the box settle against its margins
    let layout = TickInput::with([
        InputEvent::ContainerLayout {
            width: 360.0,
            height: 640.0,
        },
        InputEvent::BoxLayout {
            width: 240.0,
            height: 135.0,
        },
    ]);
    tick(&mut floating, &layout, FRAME_DT);
    for _ in 0..60 {
        tick(&mut floating, &TickInput::default(), FRAME_DT);
    }
    log::info!("Settled at {:?}", floating.position());

    // Drag well past the left edge, then let go
    let mut input = TickInput::with([InputEvent::GestureStart]);
    for step in 1..=10 {
        input.events.push(InputEvent::GestureUpdate {
            translation: Vec2::new(-15.0 * step as f32, 0.0),
        });
        tick(&mut floating, &input, FRAME_DT);
        input.events.clear();
        log::debug!(
            "Dragging: pos={:?} opacity={:.2} will_destroy={}",
            floating.position(),
            floating.opacity(),
            floating.release_will_destroy().is_destroy()
        );
    }

    let release = TickInput::with([InputEvent::GestureEnd {
        velocity: Vec2::ZERO,
    }]);
    let mut events = tick(&mut floating, &release, FRAME_DT);
    for frame in 0..600 {
        for event in &events {
            match event {
                BoxEvent::DestroyStarted(verdict) => log::info!("Destroy started: {:?}", verdict),
                BoxEvent::Destroyed => {
                    log::info!("Destroyed after {} frames", frame);
                    return;
                }
            }
        }
        events = tick(&mut floating, &TickInput::default(), FRAME_DT);
    }
    log::warn!(
        "Box still alive at {:?} (opacity {:.2})",
        floating.position(),
        floating.opacity()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is WasmFloatingBox, this is just to satisfy the compiler
}
