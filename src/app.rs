use std::collections::HashSet;
use std::path::Path;
use std::time;

use log::info;
use nalgebra::{vector, Vector3};
use show_image::event::{self, VirtualKeyCode};
use show_image::{create_window, ImageInfo, ImageView, WindowOptions};

use soft_rasterizer::{
    Camera, FrameBuffers, Material, Mesh, Model, PrimitiveTopology, Scene, Settings, StandardMaterial,
    Texture,
};

/// Degrees per second the vehicle spins while rotation is on.
const ROTATION_SPEED: f32 = 45.0;
const MOVE_SPEED: f32 = 10.0;
/// Degrees per second for arrow key look and fov keys.
const LOOK_SPEED: f32 = 45.0;
const CAMERA_FOV: f32 = 45.0;

pub struct Params {
    pub width: u32,
    pub height: u32,
    pub asset_path: String,
}

fn load_vehicle(asset_path: &Path) -> Result<Mesh, Box<dyn std::error::Error>> {
    let model = Model::from_file(asset_path.join("vehicle.obj"))?;
    let material = Material::Standard(StandardMaterial {
        diffuse: Texture::from_file(asset_path.join("vehicle_diffuse.png"))?,
        normal: Texture::from_file(asset_path.join("vehicle_normal.png"))?,
        specular: Texture::from_file(asset_path.join("vehicle_specular.png"))?,
        glossiness: Texture::from_file(asset_path.join("vehicle_gloss.png"))?,
    });
    return Ok(Mesh::new(model.vertices, model.indices, PrimitiveTopology::TriangleList, material)?);
}

fn print_key_bindings() {
    info!("[F2] vehicle rotation, [F5] shading mode, [F6] normal map, [F7] depth buffer");
    info!("[F8] bounding boxes, [F9] cull mode, [F10] uniform clear color, [F11] print fps");
    info!("[WASD/QE] move, [arrows] look, [,/.] fov, [Escape] quit");
}

/// Applies a released key to the settings. Returns true on the exit key.
fn handle_key_release(key: VirtualKeyCode, settings: &mut Settings) -> bool {
    match key {
        VirtualKeyCode::Escape => return true,
        VirtualKeyCode::F2 => settings.toggle_rotation(),
        VirtualKeyCode::F5 => settings.cycle_shading_mode(),
        VirtualKeyCode::F6 => settings.toggle_normal_map(),
        VirtualKeyCode::F7 => settings.toggle_depth_visualization(),
        VirtualKeyCode::F8 => settings.toggle_bounding_box_visualization(),
        VirtualKeyCode::F9 => settings.cycle_cull_mode(),
        VirtualKeyCode::F10 => settings.toggle_uniform_clear_color(),
        VirtualKeyCode::F11 => settings.toggle_print_fps(),
        _ => (),
    }
    return false;
}

/// Moves the camera according to the keys currently held down.
fn update_camera(camera: &mut Camera, held: &HashSet<VirtualKeyCode>, delta_time: f32) {
    let axis = |positive: VirtualKeyCode, negative: VirtualKeyCode| -> f32 {
        return held.contains(&positive) as i32 as f32 - held.contains(&negative) as i32 as f32;
    };

    let movement = vector![
        axis(VirtualKeyCode::D, VirtualKeyCode::A),
        axis(VirtualKeyCode::E, VirtualKeyCode::Q),
        axis(VirtualKeyCode::W, VirtualKeyCode::S)
    ];
    if movement != Vector3::zeros() {
        camera.move_local(movement * MOVE_SPEED * delta_time);
    }

    let yaw = axis(VirtualKeyCode::Right, VirtualKeyCode::Left);
    let pitch = axis(VirtualKeyCode::Up, VirtualKeyCode::Down);
    if yaw != 0.0 || pitch != 0.0 {
        camera.rotate(yaw * LOOK_SPEED * delta_time, pitch * LOOK_SPEED * delta_time);
    }

    let fov = axis(VirtualKeyCode::Comma, VirtualKeyCode::Period);
    if fov != 0.0 {
        camera.change_fov(fov * LOOK_SPEED * delta_time);
    }
}

/// Actually launches the window, showing rendered frames until Escape is released.
pub fn run(params: Params) -> Result<(), Box<dyn std::error::Error>> {
    let asset_path = Path::new(&params.asset_path);
    let camera = Camera::new(vector![0.0, 0.0, -50.0], CAMERA_FOV, params.width as f32 / params.height as f32);
    let mut scene = Scene::new(camera);
    scene.add_mesh(load_vehicle(asset_path)?);

    let mut settings = Settings::default();
    let mut buffers = FrameBuffers::new(params.width, params.height);

    let window_options: WindowOptions = WindowOptions {
        size: Some([params.width, params.height]),
        ..Default::default()
    };
    let window = create_window("soft rasterizer", window_options)?;
    let event_channel = window.event_channel()?;
    print_key_bindings();

    let mut held_keys: HashSet<VirtualKeyCode> = HashSet::new();
    let mut exit = false;
    let mut last_frame = time::Instant::now();
    let mut frame_counter_time_begin = time::Instant::now();
    let mut frame_counter: u32 = 0;
    while !exit {
        // Unloading all the events that have piled up since the last frame.
        for window_event in event_channel.try_iter() {
            if let event::WindowEvent::KeyboardInput(event) = window_event {
                let key = match event.input.key_code {
                    Some(key) => key,
                    None => continue,
                };
                match event.input.state.is_pressed() {
                    true => {
                        held_keys.insert(key);
                    }
                    false => {
                        held_keys.remove(&key);
                        exit |= handle_key_release(key, &mut settings);
                    }
                }
            }
        }

        let now = time::Instant::now();
        let delta_time = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;

        update_camera(&mut scene.camera, &held_keys, delta_time);
        if settings.rotate {
            scene.rotate_meshes(ROTATION_SPEED * delta_time);
        }

        scene.render(&settings.render_config(), settings.clear_color(), &mut buffers);

        let frame = buffers.as_rgb8();
        let image_data = ImageView::new(ImageInfo::rgb8(params.width, params.height), &frame);
        window.set_image("image", image_data)?;

        if settings.print_fps {
            // Counting frames to print out stats every second.
            frame_counter += 1;
            if time::Instant::now()
                .duration_since(frame_counter_time_begin)
                .as_secs_f32()
                > 1.0
            {
                info!("FPS --- {}", frame_counter);
                frame_counter_time_begin = time::Instant::now();
                frame_counter = 0;
            }
        }
    }

    return Ok(());
}
