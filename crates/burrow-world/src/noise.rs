use fastnoise_lite::{FastNoiseLite, FractalType, NoiseType};

use crate::settings::GenSettings;

/// The two seeded noise sources every stochastic pass samples from: a smooth
/// fractal field (terrain detail, decay, clump placement) and a ridged field
/// (cave/ore/ruin triggering). Both derive from the single world seed.
pub struct NoiseCtx {
    pub smooth: FastNoiseLite,
    pub ridged: FastNoiseLite,
}

impl NoiseCtx {
    pub fn new(settings: &GenSettings) -> Self {
        let mut smooth = FastNoiseLite::with_seed(settings.seed);
        smooth.set_noise_type(Some(NoiseType::OpenSimplex2));
        smooth.set_fractal_type(Some(FractalType::FBm));
        smooth.set_fractal_octaves(Some(settings.smooth_octaves.max(1)));
        smooth.set_frequency(Some(settings.smooth_frequency));

        let mut ridged = FastNoiseLite::with_seed(settings.seed ^ 0x5EA_C4E5);
        ridged.set_noise_type(Some(NoiseType::OpenSimplex2));
        ridged.set_fractal_type(Some(FractalType::Ridged));
        ridged.set_fractal_octaves(Some(settings.ridged_octaves.max(1)));
        ridged.set_frequency(Some(settings.ridged_frequency));

        Self { smooth, ridged }
    }

    #[inline]
    pub fn smooth2(&self, x: f32, z: f32) -> f32 {
        self.smooth.get_noise_2d(x, z)
    }

    #[inline]
    pub fn smooth3(&self, x: f32, y: f32, z: f32) -> f32 {
        self.smooth.get_noise_3d(x, y, z)
    }

    #[inline]
    pub fn ridged2(&self, x: f32, z: f32) -> f32 {
        self.ridged.get_noise_2d(x, z)
    }

    #[inline]
    pub fn ridged3(&self, x: f32, y: f32, z: f32) -> f32 {
        self.ridged.get_noise_3d(x, y, z)
    }
}
