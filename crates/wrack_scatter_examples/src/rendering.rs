//! Top-down PNG rendering of a generated debris field.
use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use image::{Rgb, RgbImage};
use wrack_scatter::prelude::{DebrisCategory, DebrisObject, HeightField, TerrainGrid};

/// Install an `env_logger` backend for the `tracing` events the library emits.
///
/// Honors `RUST_LOG`; defaults to `info`.
pub fn init_tracing() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}

/// How one debris category is drawn.
#[derive(Debug, Clone, Copy)]
pub struct CategoryStyle {
    pub color: [u8; 3],
    /// Minimum drawn radius in pixels, so sand-scale debris stays visible.
    pub min_radius_px: u32,
}

/// Output settings for [`render_debris_to_png`].
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub image_size: u32,
    pub sand: [u8; 3],
    pub water: [u8; 3],
    /// Strength of the height shading applied to the ground colour.
    pub relief: f32,
    styles: HashMap<DebrisCategory, CategoryStyle>,
}

impl RenderConfig {
    pub fn new(image_size: u32) -> Self {
        let styles = HashMap::from([
            (
                DebrisCategory::Rock,
                CategoryStyle {
                    color: [96, 96, 104],
                    min_radius_px: 2,
                },
            ),
            (
                DebrisCategory::Log,
                CategoryStyle {
                    color: [120, 72, 32],
                    min_radius_px: 2,
                },
            ),
            (
                DebrisCategory::Towel,
                CategoryStyle {
                    color: [220, 60, 90],
                    min_radius_px: 1,
                },
            ),
            (
                DebrisCategory::SmallDebris,
                CategoryStyle {
                    color: [60, 110, 50],
                    min_radius_px: 1,
                },
            ),
        ]);

        Self {
            image_size: image_size.max(1),
            sand: [214, 196, 150],
            water: [52, 98, 140],
            relief: 0.35,
            styles,
        }
    }

    pub fn with_relief(mut self, relief: f32) -> Self {
        self.relief = relief;
        self
    }

    pub fn set_category_style(
        &mut self,
        category: DebrisCategory,
        style: CategoryStyle,
    ) -> &mut Self {
        self.styles.insert(category, style);
        self
    }

    fn style(&self, category: DebrisCategory) -> CategoryStyle {
        self.styles.get(&category).copied().unwrap_or(CategoryStyle {
            color: [255, 255, 255],
            min_radius_px: 1,
        })
    }
}

/// Render the shaded terrain and every object footprint to `path`.
pub fn render_debris_to_png(
    field: &HeightField,
    objects: &[DebrisObject],
    config: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let size = config.image_size;
    let grid = field.bake(size as usize);
    let mut img = shade_terrain(&grid, config);

    let scale = size as f32 / field.terrain_size();
    for object in objects {
        let style = config.style(object.category);
        let center = object.position_2d() * scale;
        let radius = (object.footprint_radius * scale).max(style.min_radius_px as f32);
        draw_disk(&mut img, center.x, center.y, radius, style.color);
    }

    let path = path.as_ref();
    img.save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::info!("Wrote {} objects to {}.", objects.len(), path.display());
    Ok(())
}

fn shade_terrain(grid: &TerrainGrid, config: &RenderConfig) -> RgbImage {
    let (min, max) = grid
        .heights()
        .iter()
        .fold((f32::MAX, f32::MIN), |(lo, hi), &h| (lo.min(h), hi.max(h)));
    let span = (max - min).max(1e-6);

    RgbImage::from_fn(config.image_size, config.image_size, |x, y| {
        let Some(v) = grid.vertex(x as usize, y as usize) else {
            return Rgb(config.sand);
        };
        let base = if grid.is_seaward_row(y as usize) {
            config.water
        } else {
            config.sand
        };
        let t = (v.z - min) / span;
        let shade = 1.0 - config.relief + config.relief * t;
        Rgb(base.map(|c| (c as f32 * shade).clamp(0.0, 255.0) as u8))
    })
}

fn draw_disk(img: &mut RgbImage, cx: f32, cy: f32, r: f32, color: [u8; 3]) {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 || cx + r < 0.0 || cy + r < 0.0 {
        return;
    }
    let x0 = (cx - r).floor().max(0.0) as u32;
    let y0 = (cy - r).floor().max(0.0) as u32;
    let x1 = ((cx + r).ceil() as u32).min(w - 1);
    let y1 = ((cy + r).ceil() as u32).min(h - 1);

    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            if dx * dx + dy * dy <= r * r {
                img.put_pixel(x, y, Rgb(color));
            }
        }
    }
}
