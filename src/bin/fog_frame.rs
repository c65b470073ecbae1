//! Offline fog compositor: applies height fog to a rendered frame.
//!
//! Usage: cargo run --release --bin fog_frame -- [OPTIONS]
//!
//! Options:
//!   --color <PNG>      Rendered color image (required)
//!   --depth <PNG>      16-bit grayscale depth, linear 0..1 (required)
//!   --out <PNG>        Output path (default: "fogged.png")
//!   --config <JSON>    Fog settings (default: built-in basic fog)
//!   --pos <X,Y,Z>      Camera world position (default: 0,1,0)
//!   --yaw <DEG>        Camera yaw (default: 0)
//!   --pitch <DEG>      Camera pitch, negative looks down (default: 0)
//!   --fov <DEG>        Vertical field of view (default: 60)
//!   --near <N>         Near plane (default: 0.3)
//!   --far <F>          Far plane (default: 1000)
//!   --device-depth     Depth image holds device depth, linearize it first
//!   --time <S>         Animation time of the first frame (default: 0)
//!   --frames <N>       Number of animated frames to write (default: 1)
//!   --dt <S>           Seconds between frames (default: 1/30)
//!   --jobs <N>         Worker threads (default: all cores)
//!
//! With more than one frame, outputs are named <out-stem>_0000.png, ...

use std::path::{Path, PathBuf};
use std::time::Instant;

use glam::Vec3;

use heightfog::buffer::{ColorImage, DepthImage};
use heightfog::core::{AnimationClock, Camera, Result};
use heightfog::fog::{FogPass, FogSettings};

fn main() {
    heightfog::core::logging::init();

    let args: Vec<String> = std::env::args().collect();
    if let Err(e) = run(&args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: &[String]) -> Result<()> {
    let (Some(color_path), Some(depth_path)) =
        (parse_str_arg(args, "--color"), parse_str_arg(args, "--depth"))
    else {
        eprintln!("Usage: fog_frame --color <png> --depth <png> [--out <png>] [--config <json>]");
        std::process::exit(2);
    };
    let out = PathBuf::from(parse_str_arg(args, "--out").unwrap_or_else(|| "fogged.png".to_string()));
    let frames = parse_u32_arg(args, "--frames").unwrap_or(1).max(1);
    let dt = parse_f32_arg(args, "--dt").unwrap_or(1.0 / 30.0);

    if let Some(jobs) = parse_usize_arg(args, "--jobs") {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .expect("Failed to configure thread pool");
    }

    let settings = match parse_str_arg(args, "--config") {
        Some(path) => FogSettings::load(Path::new(&path))?,
        None => FogSettings::default(),
    };

    let source = ColorImage::load(Path::new(&color_path))?;
    let mut camera = Camera::new(
        parse_vec3_arg(args, "--pos").unwrap_or(Vec3::new(0.0, 1.0, 0.0)),
        parse_f32_arg(args, "--fov").unwrap_or(60.0),
        1.0,
    );
    camera.set_aspect(source.width() as f32, source.height() as f32);
    camera.near = parse_f32_arg(args, "--near").unwrap_or(camera.near);
    camera.far = parse_f32_arg(args, "--far").unwrap_or(camera.far);
    camera.set_rotation_euler(
        parse_f32_arg(args, "--yaw").unwrap_or(0.0).to_radians(),
        parse_f32_arg(args, "--pitch").unwrap_or(0.0).to_radians(),
    );

    let mut depth = DepthImage::load(Path::new(&depth_path))?;
    if args.iter().any(|a| a == "--device-depth") {
        let (w, h) = depth.dimensions();
        depth = DepthImage::from_device_depth(w, h, depth.values(), camera.near, camera.far)?;
    }

    log::info!("Color {}x{}, depth {}x{}, {} frame(s)",
        source.width(), source.height(), depth.width(), depth.height(), frames);

    let pass = FogPass::new(&settings);
    let mut clock = AnimationClock::new(parse_f32_arg(args, "--time").unwrap_or(0.0));
    let frame = camera.frame();
    let start = Instant::now();

    for i in 0..frames {
        let fogged = pass.render(&frame, clock.seconds(), &source, &depth)?;
        let path = if frames == 1 { out.clone() } else { numbered(&out, i) };
        fogged.save(&path)?;
        log::info!("Wrote {} (t = {:.3}s)", path.display(), clock.seconds());
        clock.advance(dt);
    }

    log::info!("Done in {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}

fn numbered(path: &Path, index: u32) -> PathBuf {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("frame");
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("png");
    path.with_file_name(format!("{}_{:04}.{}", stem, index, ext))
}

fn parse_f32_arg(args: &[String], flag: &str) -> Option<f32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_u32_arg(args: &[String], flag: &str) -> Option<u32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_usize_arg(args: &[String], flag: &str) -> Option<usize> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn parse_vec3_arg(args: &[String], flag: &str) -> Option<Vec3> {
    let s = parse_str_arg(args, flag)?;
    let parts: Vec<f32> = s.split(',').map(|p| p.trim().parse().ok()).collect::<Option<_>>()?;
    match parts[..] {
        [x, y, z] => Some(Vec3::new(x, y, z)),
        _ => None,
    }
}
