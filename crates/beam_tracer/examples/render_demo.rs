//! Renders a small textured scene to a PNG.
//!
//! Run with: cargo run --release --example render_demo

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use beam_tracer::{
    Color, Frame, Light, Material, RenderSettings, Renderer, Raytracer, SceneParams, Texture,
    Vec2, Vec3,
};

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;

fn main() -> Result<()> {
    env_logger::init();

    let mut tracer = Raytracer::new().with_settings(
        RenderSettings::default()
            .with_aa_level(1)
            .with_fog(Color::new(0.862, 0.859, 0.874), 0.02),
    );

    let params = SceneParams::new(
        Vec3::new(0.0, 2.5, 8.0),
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::Y,
        40.0,
        WIDTH as f32 / HEIGHT as f32,
    )
    .with_light(Light::new(
        Vec3::new(5.0, 8.0, 5.0),
        Color::splat(0.35),
        Color::splat(1.7),
        Color::splat(0.9),
    ))
    .with_light(Light::new(
        Vec3::new(-6.0, 3.0, 2.0),
        Color::new(0.1, 0.1, 0.2),
        Color::new(0.5, 0.6, 1.0),
        Color::ZERO,
    ));

    let start = Instant::now();
    tracer.begin_scene(params)?;
    build_scene(&mut tracer);
    println!("Scene streamed in {:?}", start.elapsed());

    let mut data = vec![0u8; (WIDTH * HEIGHT * 3) as usize];
    let mut frame = Frame::new(&mut data, WIDTH, HEIGHT)?;

    let start = Instant::now();
    tracer.end_scene(&mut frame, &mut |progress| {
        println!("  row {}/{}", progress.rows_completed, progress.total_rows);
    })?;
    println!("Rendered {}x{} in {:?}", WIDTH, HEIGHT, start.elapsed());

    // Row 0 is the bottom of the view; PNG rows run top to bottom
    let stride = WIDTH as usize * 3;
    let mut flipped = Vec::with_capacity(data.len());
    for row in (0..HEIGHT as usize).rev() {
        flipped.extend_from_slice(&data[row * stride..(row + 1) * stride]);
    }

    let filename = "render_demo.png";
    image::save_buffer(filename, &flipped, WIDTH, HEIGHT, image::ColorType::Rgb8)?;
    println!("Saved to {}", filename);
    Ok(())
}

fn build_scene(tracer: &mut impl Renderer) {
    // Checkered floor; the texture replaces the material color, the
    // material still supplies the highlight
    tracer.set_material(Arc::new(Material {
        ambient: Color::splat(0.25),
        diffuse: Color::splat(0.85),
        specular: Color::splat(0.1),
        shininess: 8.0,
    }));
    tracer.set_texture(Some(Arc::new(checker_texture())));
    tracer.begin_polygon();
    tracer.normal(Vec3::Y);
    tracer.tex_coord(Vec2::new(0.0, 0.0));
    tracer.vertex(Vec3::new(-8.0, 0.0, -8.0));
    tracer.tex_coord(Vec2::new(1.0, 0.0));
    tracer.vertex(Vec3::new(8.0, 0.0, -8.0));
    tracer.tex_coord(Vec2::new(1.0, 1.0));
    tracer.vertex(Vec3::new(8.0, 0.0, 8.0));
    tracer.tex_coord(Vec2::new(0.0, 1.0));
    tracer.vertex(Vec3::new(-8.0, 0.0, 8.0));
    tracer.end_polygon();
    tracer.set_texture(None);

    // Three panels fanned around the look-at point
    let colors = [
        Color::new(0.85, 0.25, 0.2),
        Color::new(0.25, 0.7, 0.3),
        Color::new(0.25, 0.4, 0.85),
    ];
    for (i, color) in colors.iter().enumerate() {
        tracer.set_material(Arc::new(Material {
            ambient: *color * 0.3,
            diffuse: *color,
            specular: Color::splat(0.6),
            shininess: 24.0,
        }));
        tracer.push_transform();
        tracer.rotate(-55.0 + 55.0 * i as f32, Vec3::Y);
        tracer.translate(Vec3::new(0.0, 1.0, -2.4));
        panel(tracer, 0.8);
        tracer.pop_transform();
    }

    // Two cubes resting on the floor
    tracer.set_material(Arc::new(Material {
        ambient: Color::new(0.25, 0.22, 0.08),
        diffuse: Color::new(0.85, 0.72, 0.25),
        specular: Color::splat(0.8),
        shininess: 48.0,
    }));
    tracer.push_transform();
    tracer.translate(Vec3::new(-2.1, 0.55, 1.2));
    tracer.rotate(30.0, Vec3::Y);
    cube(tracer, 0.55);
    tracer.pop_transform();

    tracer.set_material(Arc::new(Material {
        ambient: Color::new(0.08, 0.18, 0.2),
        diffuse: Color::new(0.3, 0.65, 0.7),
        specular: Color::splat(0.4),
        shininess: 16.0,
    }));
    tracer.push_transform();
    tracer.translate(Vec3::new(2.3, 0.4, 1.8));
    tracer.rotate(-15.0, Vec3::Y);
    cube(tracer, 0.4);
    tracer.pop_transform();
}

/// 16x16 two-tone checkerboard.
fn checker_texture() -> Texture {
    const N: u32 = 16;
    let mut texels = Vec::with_capacity((N * N) as usize);
    for y in 0..N {
        for x in 0..N {
            if (x + y) % 2 == 0 {
                texels.push([225, 225, 215]);
            } else {
                texels.push([45, 45, 55]);
            }
        }
    }
    Texture::from_texels(N, N, texels)
}

/// Square in the xy plane facing +z, `half` from center to edge.
fn panel(tracer: &mut impl Renderer, half: f32) {
    tracer.begin_polygon();
    tracer.normal(Vec3::Z);
    tracer.vertex(Vec3::new(-half, -half, 0.0));
    tracer.vertex(Vec3::new(half, -half, 0.0));
    tracer.vertex(Vec3::new(half, half, 0.0));
    tracer.vertex(Vec3::new(-half, half, 0.0));
    tracer.end_polygon();
}

/// Axis-aligned cube with outward normals, `half` from center to face.
fn cube(tracer: &mut impl Renderer, half: f32) {
    let h = half;
    let faces: [(Vec3, [Vec3; 4]); 6] = [
        (
            Vec3::Z,
            [
                Vec3::new(-h, -h, h),
                Vec3::new(h, -h, h),
                Vec3::new(h, h, h),
                Vec3::new(-h, h, h),
            ],
        ),
        (
            Vec3::NEG_Z,
            [
                Vec3::new(h, -h, -h),
                Vec3::new(-h, -h, -h),
                Vec3::new(-h, h, -h),
                Vec3::new(h, h, -h),
            ],
        ),
        (
            Vec3::X,
            [
                Vec3::new(h, -h, h),
                Vec3::new(h, -h, -h),
                Vec3::new(h, h, -h),
                Vec3::new(h, h, h),
            ],
        ),
        (
            Vec3::NEG_X,
            [
                Vec3::new(-h, -h, -h),
                Vec3::new(-h, -h, h),
                Vec3::new(-h, h, h),
                Vec3::new(-h, h, -h),
            ],
        ),
        (
            Vec3::Y,
            [
                Vec3::new(-h, h, h),
                Vec3::new(h, h, h),
                Vec3::new(h, h, -h),
                Vec3::new(-h, h, -h),
            ],
        ),
        (
            Vec3::NEG_Y,
            [
                Vec3::new(-h, -h, -h),
                Vec3::new(h, -h, -h),
                Vec3::new(h, -h, h),
                Vec3::new(-h, -h, h),
            ],
        ),
    ];

    for (normal, corners) in faces {
        tracer.begin_polygon();
        tracer.normal(normal);
        for corner in corners {
            tracer.vertex(corner);
        }
        tracer.end_polygon();
    }
}
