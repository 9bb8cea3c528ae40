// Allow unused code for designed-but-not-yet-used APIs
// Remove these as the codebase matures
#![allow(dead_code)]

mod background;
mod camera;
mod display;
mod input;
mod math;
mod render;
mod settings;
mod util;

use std::time::Instant;

use sdl2::keyboard::Keycode;

use background::Background;
use camera::{Camera, RenderMode};
use display::{Display, PixelBuffer, RenderTarget};
use input::KeyState;
use math::Vec2;
use settings::{Settings, SETTINGS_PATH};
use util::{FpsCounter, FrameThrottle};

/// Parse command line arguments on top of the loaded settings.
/// Returns true when the background image path was given explicitly
/// (an explicit path that fails to load is fatal).
fn parse_args(settings: &mut Settings) -> bool {
    let args: Vec<String> = std::env::args().collect();
    let mut explicit_image = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--no-vsync" => settings.vsync = false,
            "--width" | "-w" => {
                if i + 1 < args.len() {
                    if let Ok(w) = args[i + 1].parse::<u32>() {
                        settings.width = w;
                    }
                    i += 1;
                }
            },
            "--height" | "-h" => {
                if i + 1 < args.len() {
                    if let Ok(h) = args[i + 1].parse::<u32>() {
                        settings.height = h;
                    }
                    i += 1;
                }
            },
            "--resolution" | "-r" => {
                if i + 1 < args.len() {
                    // Parse WxH format (e.g., 1920x1080)
                    let parts: Vec<&str> = args[i + 1].split('x').collect();
                    if parts.len() == 2 {
                        if let (Ok(w), Ok(h)) = (parts[0].parse::<u32>(), parts[1].parse::<u32>()) {
                            settings.width = w;
                            settings.height = h;
                        }
                    }
                    i += 1;
                }
            },
            "--image" | "-i" => {
                if i + 1 < args.len() {
                    settings.image = args[i + 1].clone();
                    explicit_image = true;
                    i += 1;
                }
            },
            "--fps-cap" => {
                if i + 1 < args.len() {
                    if let Ok(cap) = args[i + 1].parse::<f32>() {
                        settings.frame_cap = cap;
                    }
                    i += 1;
                }
            },
            "--help" => {
                println!("Usage: mode7 [OPTIONS]");
                println!();
                println!("Options:");
                println!("  --width W, -w W           Set window width");
                println!("  --height H, -h H          Set window height");
                println!("  --resolution WxH, -r WxH  Set resolution (e.g., 1920x1080)");
                println!("  --image PATH, -i PATH     Background image to sample");
                println!("  --fps-cap N               Frame-rate cap (0 = uncapped)");
                println!("  --no-vsync                Disable VSync, rely on the cap alone");
                println!("  --help                    Show this help message");
                std::process::exit(0);
            },
            _ => {},
        }
        i += 1;
    }

    explicit_image
}

/// Load the background image, falling back to a built-in pattern when the
/// default path is absent. An explicitly requested image must load.
fn load_background(path: &str, explicit: bool) -> Result<Background, String> {
    match Background::load(path) {
        Ok(bg) => {
            println!("Background: {} ({}x{})", path, bg.width(), bg.height());
            Ok(bg)
        },
        Err(e) if explicit => Err(e),
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Falling back to built-in checkerboard");
            Ok(Background::checkerboard(
                1024,
                64,
                (180, 120, 60),
                (60, 120, 180),
            ))
        },
    }
}

/// Apply held keys to the camera. Translation is camera-local: forward is
/// screen-up, rotated into world space inside the camera.
fn update_camera(camera: &mut Camera, keys: &KeyState, dt: f32) {
    let strafe = keys.axis(Keycode::Left, Keycode::Right);
    let forward = keys.axis(Keycode::Up, Keycode::Down);
    if strafe != 0.0 || forward != 0.0 {
        camera.move_local(Vec2::new(strafe, forward), dt);
    }

    camera.rotate(keys.axis(Keycode::E, Keycode::Q), dt);

    let zoom = keys.axis(Keycode::Z, Keycode::X);
    camera.adjust_scale(zoom, zoom, dt);

    camera.climb(keys.axis(Keycode::F, Keycode::R), dt);
    camera.adjust_near(keys.axis(Keycode::G, Keycode::T), dt);
}

fn main() -> Result<(), String> {
    let mut settings = Settings::load(SETTINGS_PATH).unwrap_or_default();
    let explicit_image = parse_args(&mut settings);
    let (width, height) = (settings.width, settings.height);

    println!("=== mode7 ===");
    println!("Resolution: {}x{}", width, height);
    if settings.vsync {
        println!("VSync: ON. Use --no-vsync to run on the frame cap alone.");
    } else {
        println!("VSync: OFF (frame cap {} fps)", settings.frame_cap);
    }
    println!("Use --help for command line options.");
    println!("Controls:");
    println!("  Up/Down    - Move forward / back (camera-local)");
    println!("  Left/Right - Strafe");
    println!("  Q/E        - Rotate");
    println!("  Z/X        - Scale down / up");
    println!("  R/F        - Raise / lower camera");
    println!("  T/G        - Near plane out / in");
    println!("  M          - Toggle affine / mode7 rendering");
    println!("  F5         - Save settings to {}", SETTINGS_PATH);
    println!("  Escape     - Quit");

    let (mut display, texture_creator) =
        Display::with_options("mode7", width, height, settings.vsync)?;
    let mut target = RenderTarget::with_size(&texture_creator, width, height)?;
    let mut buffer = PixelBuffer::with_size(width, height);

    let background = load_background(&settings.image, explicit_image)?;

    let mut camera = Camera::new(settings.camera.clone(), settings.near, settings.horizon);
    // Start over the middle of the background
    camera.position.x = background.width() as f32 / 2.0;
    camera.position.z = background.height() as f32 / 2.0;

    let mut mode = RenderMode::Affine;
    let mut keys = KeyState::new();

    // FPS counter with 60 sample rolling average
    let mut fps_counter = FpsCounter::new(60);
    let mut throttle = FrameThrottle::new(settings.frame_cap);
    let mut last_tick = Instant::now();
    let mut title_timer = 0.0f32;

    'main: loop {
        // Fixed-step frame cap: skip the whole poll/update/render cycle
        // until the accumulated time exceeds the frame budget
        let now = Instant::now();
        let elapsed = now - last_tick;
        last_tick = now;
        if !throttle.tick(elapsed) {
            std::thread::sleep(std::time::Duration::from_millis(1));
            continue;
        }

        let (dt, avg_fps) = fps_counter.tick();

        keys.begin_frame();
        for event in display.poll_events() {
            if let display::InputEvent::KeyDown(key) = &event {
                match *key {
                    Keycode::Escape => break 'main,
                    Keycode::F5 => {
                        settings.near = camera.near;
                        if let Err(e) = settings.save(SETTINGS_PATH) {
                            eprintln!("Failed to save: {}", e);
                        } else {
                            println!("Settings saved to {}", SETTINGS_PATH);
                        }
                        continue;
                    },
                    _ => {},
                }
            }
            if matches!(&event, display::InputEvent::Quit) {
                break 'main;
            }
            keys.apply(&event);
        }

        // Mode switches on the release edge, once per press
        if keys.released(Keycode::M) {
            mode = mode.toggled();
            println!("Render mode: {}", mode.label());
        }

        update_camera(&mut camera, &keys, dt);

        buffer.clear();
        render::render(&mut buffer, &background, &camera, mode);

        // Title diagnostics, ~4 updates per second
        title_timer += dt;
        if title_timer >= 0.25 {
            title_timer = 0.0;
            let title = format!(
                "mode7 [{}] {:.0} fps (cap {:.0}) scale {:.2}x{:.2} h {:.0} near {:.0}",
                mode.label(),
                avg_fps,
                settings.frame_cap,
                camera.scale.x,
                camera.scale.y,
                camera.position.y,
                camera.near,
            );
            display.set_title(&title)?;
        }

        display.present(&mut target, &buffer)?;
    }

    Ok(())
}
