//! Local-illumination shading with shadows and fog.

use beam_core::{Color, Light};
use beam_math::{Mat4, Ray, Vec3};

use crate::config::RenderSettings;
use crate::engine::IntersectionEngine;

/// Upper bound on hit distances; effectively unbounded.
pub const MAX_TRACE_DISTANCE: f32 = 1e20;

/// Mirror `incident` about the unit normal `n`.
#[inline]
fn reflect(incident: Vec3, n: Vec3) -> Vec3 {
    incident - 2.0 * n.dot(incident) * n
}

/// Specular falloff max(d, 0)^shininess, where the zero side of the max
/// wins for every shininess, including 0.
#[inline]
fn specular_intensity(d: f32, shininess: f32) -> f32 {
    if d <= 0.0 {
        0.0
    } else {
        d.powf(shininess)
    }
}

/// Blend `color` toward `fog_color` by distance `t`.
///
/// The weight exp(-t * extinction) is the identity at t = 0 and fades to
/// pure fog as t grows.
#[inline]
pub fn fog_blend(color: Color, t: f32, fog_color: Color, extinction: f32) -> Color {
    let w = (-t * extinction).exp();
    color * w + fog_color * (1.0 - w)
}

/// Shade one primary ray against a finalized scene.
///
/// A miss returns the fog color outright; a hit without a material is
/// black. Otherwise contributions accumulate per light and are normalized
/// by lightCount * 3 before fog blending:
///
/// - ambient always; diffuse and specular only when the shadow ray toward
///   the light is unoccluded (the hit polygon excludes itself);
/// - a bound non-empty texture replaces the material color in the ambient
///   and diffuse terms;
/// - the specular term scales the light's specular color alone; the
///   material's specular color and the texture play no part in it.
///
/// `world` is the scene transform current at shading time. The shadow-ray
/// direction is the light position sent through it as a vector (w = 0);
/// the specular light vector L uses the same matrix applied to the light
/// position as a point.
pub fn shade_ray<E>(
    engine: &E,
    ray: &Ray,
    lights: &[Light],
    world: &Mat4,
    settings: &RenderSettings,
) -> Color
where
    E: IntersectionEngine + ?Sized,
{
    let Some(hit) = engine.intersect(ray, MAX_TRACE_DISTANCE, None) else {
        return settings.fog_color;
    };

    let detail = engine.intersect_info(ray, &hit);
    let Some(material) = detail.material.as_deref() else {
        return Color::ZERO;
    };

    let textured = detail
        .texture
        .as_deref()
        .filter(|texture| !texture.is_empty())
        .map(|texture| texture.sample(detail.tex_coord.x, detail.tex_coord.y));
    let ambient_color = textured.unwrap_or(material.ambient);
    let diffuse_color = textured.unwrap_or(material.diffuse);

    let n = detail.normal.normalize_or_zero();
    let v = (hit.point - ray.origin).normalize();

    let mut total = Color::ZERO;
    for light in lights {
        total += light.ambient * ambient_color;

        let shadow_dir = world.transform_vector3(light.position).normalize_or_zero();
        let shadow_ray = Ray::new(hit.point, shadow_dir);
        if engine
            .intersect(&shadow_ray, MAX_TRACE_DISTANCE, Some(hit.polygon))
            .is_none()
        {
            total += light.diffuse * diffuse_color;

            let l = (world.transform_point3(light.position) - hit.point).normalize_or_zero();
            let r = reflect(-l, n);
            total += light.specular * specular_intensity(v.dot(r), material.shininess);
        }
    }

    if !lights.is_empty() {
        total /= (lights.len() * 3) as f32;
    }

    fog_blend(total, hit.t, settings.fog_color, settings.extinction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh_engine::MeshEngine;
    use beam_core::{Material, Texture};
    use beam_math::Vec2;
    use std::sync::Arc;

    fn assert_close(a: Color, b: Color) {
        assert!((a - b).length() < 1e-5, "{a:?} != {b:?}");
    }

    #[test]
    fn test_reflect_mirrors_about_normal() {
        let r = reflect(Vec3::new(1.0, -1.0, 0.0), Vec3::Y);
        assert!((r - Vec3::new(1.0, 1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_specular_intensity_zero_side() {
        assert_eq!(specular_intensity(-0.5, 2.0), 0.0);
        assert_eq!(specular_intensity(-0.5, 0.0), 0.0);
        assert_eq!(specular_intensity(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_specular_intensity_positive_side() {
        assert_eq!(specular_intensity(1.0, 0.0), 1.0);
        // Any positive alignment with shininess 0 passes the light through
        assert_eq!(specular_intensity(0.125, 0.0), 1.0);
        assert!((specular_intensity(0.5, 2.0) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_fog_blend_identity_at_zero_distance() {
        let color = Color::new(0.2, 0.4, 0.6);
        let fog = Color::new(0.9, 0.9, 0.9);
        assert_eq!(fog_blend(color, 0.0, fog, 0.5), color);
    }

    #[test]
    fn test_fog_blend_saturates_with_distance() {
        let color = Color::new(0.2, 0.4, 0.6);
        let fog = Color::new(0.9, 0.9, 0.9);
        assert_eq!(fog_blend(color, 1e12, fog, 1e-3), fog);

        let near = fog_blend(color, 1.0, fog, 1e-3);
        let far = fog_blend(color, 1000.0, fog, 1e-3);
        assert!((near - color).length() < (far - color).length());
    }

    /// Quad facing +z at depth `z`, with an explicit +z normal.
    fn quad(
        engine: &mut MeshEngine,
        z: f32,
        center: Vec2,
        half: f32,
        material: Option<Arc<Material>>,
        texture: Option<Arc<Texture>>,
    ) {
        engine.begin_polygon();
        if let Some(material) = material {
            engine.set_material(material);
        }
        if let Some(texture) = texture {
            engine.set_texture(texture);
        }
        engine.add_normal(Vec3::Z);
        engine.add_vertex(Vec3::new(center.x - half, center.y - half, z));
        engine.add_vertex(Vec3::new(center.x + half, center.y - half, z));
        engine.add_vertex(Vec3::new(center.x + half, center.y + half, z));
        engine.add_vertex(Vec3::new(center.x - half, center.y + half, z));
        engine.end_polygon();
    }

    fn white_matte() -> Arc<Material> {
        Arc::new(Material::matte(Color::ONE))
    }

    #[test]
    fn test_miss_returns_fog_directly() {
        let mut engine = MeshEngine::new();
        engine.loading_complete();

        let settings = RenderSettings::default();
        let lights = [Light::uniform(Vec3::ONE, Color::ONE)];
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let color = shade_ray(&engine, &ray, &lights, &Mat4::IDENTITY, &settings);
        assert_eq!(color, settings.fog_color);
    }

    #[test]
    fn test_hit_without_material_is_black() {
        let mut engine = MeshEngine::new();
        quad(&mut engine, -2.0, Vec2::ZERO, 1.0, None, None);
        engine.loading_complete();

        let settings = RenderSettings::default();
        let lights = [Light::uniform(Vec3::ONE, Color::ONE)];
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let color = shade_ray(&engine, &ray, &lights, &Mat4::IDENTITY, &settings);
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_zero_lights_still_blend_fog() {
        let mut engine = MeshEngine::new();
        quad(&mut engine, -2.0, Vec2::ZERO, 1.0, Some(white_matte()), None);
        engine.loading_complete();

        let settings = RenderSettings::default().with_fog(Color::new(0.8, 0.8, 0.8), 0.5);

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let color = shade_ray(&engine, &ray, &[], &Mat4::IDENTITY, &settings);

        // Light sum is zero, so only the fog fraction remains; t = 2
        let w = (-2.0f32 * 0.5).exp();
        assert_close(color, settings.fog_color * (1.0 - w));
    }

    #[test]
    fn test_single_light_ambient_plus_diffuse() {
        let mut engine = MeshEngine::new();
        quad(&mut engine, -5.0, Vec2::ZERO, 10.0, Some(white_matte()), None);
        engine.loading_complete();

        // Extinction 0 disables fog entirely
        let settings = RenderSettings::default().with_fog(Color::ZERO, 0.0);
        let lights = [Light::uniform(
            Vec3::new(0.0, 0.0, 1.0),
            Color::new(0.9, 0.6, 0.3),
        )];
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let color = shade_ray(&engine, &ray, &lights, &Mat4::IDENTITY, &settings);

        // Specular is zero here (the reflection points back at the light),
        // leaving (ambient + diffuse) / 3
        let expected = (Color::new(0.9, 0.6, 0.3) + Color::new(0.9, 0.6, 0.3)) / 3.0;
        assert_close(color, expected);
    }

    #[test]
    fn test_occluder_leaves_ambient_only() {
        let light = Light::uniform(Vec3::new(0.0, 0.0, 1.0), Color::new(0.9, 0.6, 0.3));
        let settings = RenderSettings::default().with_fog(Color::ZERO, 0.0);
        // Primary ray enters at an angle so the occluder shadows the hit
        // point without blocking the view of it
        let ray = Ray::new(Vec3::ZERO, Vec3::new(-0.8, 0.0, -1.0).normalize());

        let mut open = MeshEngine::new();
        quad(&mut open, -5.0, Vec2::ZERO, 10.0, Some(white_matte()), None);
        open.loading_complete();
        let lit = shade_ray(&open, &ray, &[light.clone()], &Mat4::IDENTITY, &settings);

        let mut blocked = MeshEngine::new();
        quad(&mut blocked, -5.0, Vec2::ZERO, 10.0, Some(white_matte()), None);
        // Small patch between the hit point (-4, 0, -5) and the light
        // direction (0, 0, 1)
        quad(
            &mut blocked,
            -3.5,
            Vec2::new(-4.0, 0.0),
            0.5,
            Some(white_matte()),
            None,
        );
        blocked.loading_complete();
        let shadowed = shade_ray(&blocked, &ray, &[light], &Mat4::IDENTITY, &settings);

        let base = Color::new(0.9, 0.6, 0.3);
        assert_close(lit, (base + base) / 3.0);
        assert_close(shadowed, base / 3.0);
    }

    #[test]
    fn test_texture_replaces_material_color() {
        let texel = Color::new(0.2, 0.4, 0.8);
        let texture = Arc::new(Texture::from_texels(1, 1, vec![[51, 102, 204]]));

        let mut engine = MeshEngine::new();
        quad(
            &mut engine,
            -5.0,
            Vec2::ZERO,
            10.0,
            Some(white_matte()),
            Some(texture),
        );
        engine.loading_complete();

        let settings = RenderSettings::default().with_fog(Color::ZERO, 0.0);
        let light = Color::new(0.9, 0.6, 0.3);
        let lights = [Light::uniform(Vec3::new(0.0, 0.0, 1.0), light)];
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let color = shade_ray(&engine, &ray, &lights, &Mat4::IDENTITY, &settings);
        assert_close(color, (light * texel + light * texel) / 3.0);
    }

    #[test]
    fn test_empty_texture_falls_back_to_material() {
        let mut engine = MeshEngine::new();
        quad(
            &mut engine,
            -5.0,
            Vec2::ZERO,
            10.0,
            Some(white_matte()),
            Some(Arc::new(Texture::empty())),
        );
        engine.loading_complete();

        let settings = RenderSettings::default().with_fog(Color::ZERO, 0.0);
        let light = Color::new(0.9, 0.6, 0.3);
        let lights = [Light::uniform(Vec3::new(0.0, 0.0, 1.0), light)];
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let color = shade_ray(&engine, &ray, &lights, &Mat4::IDENTITY, &settings);
        assert_close(color, (light + light) / 3.0);
    }

    #[test]
    fn test_two_lights_normalize_by_count() {
        let mut engine = MeshEngine::new();
        quad(&mut engine, -5.0, Vec2::ZERO, 10.0, Some(white_matte()), None);
        engine.loading_complete();

        let settings = RenderSettings::default().with_fog(Color::ZERO, 0.0);
        let base = Color::new(0.9, 0.6, 0.3);
        let lights = [
            Light::uniform(Vec3::new(0.0, 0.0, 1.0), base),
            Light::uniform(Vec3::new(0.0, 0.0, 1.0), base),
        ];
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let color = shade_ray(&engine, &ray, &lights, &Mat4::IDENTITY, &settings);
        // Two identical lights double the sum and double the divisor
        assert_close(color, (base + base) / 3.0);
    }
}
