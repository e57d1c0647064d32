use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0 + 210.0;
            to_color32(Hsl::new(hue, 0.65, 0.55).into_color())
        })
        .collect()
}

fn to_color32(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

// ---------------------------------------------------------------------------
// Category colours: label → Color32
// ---------------------------------------------------------------------------

/// Assigns a stable colour to each category label, in the order given.
#[derive(Debug, Clone)]
pub struct CategoryColors {
    mapping: Vec<(String, Color32)>,
    default_color: Color32,
}

impl CategoryColors {
    pub fn new<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let labels: Vec<&str> = labels.into_iter().collect();
        let palette = generate_palette(labels.len());
        CategoryColors {
            mapping: labels
                .into_iter()
                .map(str::to_string)
                .zip(palette)
                .collect(),
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .iter()
            .find(|(l, _)| l == label)
            .map_or(self.default_color, |(_, c)| *c)
    }
}

// ---------------------------------------------------------------------------
// Diverging ramp for correlation coefficients
// ---------------------------------------------------------------------------

/// Blue → light grey → red ramp over `[-1, 1]`, in the spirit of "coolwarm".
pub fn coolwarm(r: f64) -> Color32 {
    let cool: LinSrgb = Srgb::new(59u8, 76, 192).into_format::<f32>().into_linear();
    let mid: LinSrgb = Srgb::new(221u8, 221, 221).into_format::<f32>().into_linear();
    let warm: LinSrgb = Srgb::new(180u8, 4, 38).into_format::<f32>().into_linear();

    let t = r.clamp(-1.0, 1.0) as f32;
    let lin = if t < 0.0 {
        mid.mix(cool, -t)
    } else {
        mid.mix(warm, t)
    };
    to_color32(lin.into_color())
}
