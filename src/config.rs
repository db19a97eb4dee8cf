//! Launch options and their validation into plugin configs.

use thiserror::Error;

use crate::game::GameConfig;

/// Largest board radius accepted at launch.
pub const MAX_GRID_RADIUS: u32 = 500;

/// Why launch options were rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A board needs at least one ring around the origin.
    #[error("grid radius must be at least 1")]
    GridRadiusZero,
    /// Fill generation is proportional to the board area.
    #[error("grid radius {0} exceeds the maximum of {max}", max = MAX_GRID_RADIUS)]
    GridRadiusTooLarge(u32),
    /// Hex sizes must be finite and positive.
    #[error("hex size {0} must be a positive number of pixels")]
    InvalidHexSize(f32),
    /// Window dimensions must be non-zero.
    #[error("window size {0}x{1} is not drawable")]
    InvalidWindowSize(u32, u32),
}

/// Values a host can set at launch. `None` keeps the default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaunchOptions {
    /// Fixed RNG seed.
    pub seed: Option<u64>,
    /// Force reduced motion.
    pub reduced_motion: bool,
    /// Board radius.
    pub grid_radius: Option<u32>,
    /// Fixed hex size (disables breakpoints).
    pub hex_size: Option<f32>,
    /// Initial window width.
    pub width: Option<u32>,
    /// Initial window height.
    pub height: Option<u32>,
}

/// Validated launch settings.
#[derive(Debug, Clone)]
pub struct Launch {
    /// Simulation config.
    pub game: GameConfig,
    /// Initial window size in logical px.
    pub window: (u32, u32),
}

impl LaunchOptions {
    /// Checks every value and folds them into a [`GameConfig`].
    pub fn validate(self) -> Result<Launch, ConfigError> {
        let mut game = GameConfig::default();

        if let Some(radius) = self.grid_radius {
            match radius {
                0 => return Err(ConfigError::GridRadiusZero),
                r if r > MAX_GRID_RADIUS => return Err(ConfigError::GridRadiusTooLarge(r)),
                r => game.grid.radius = r,
            }
        }
        if let Some(size) = self.hex_size {
            if !size.is_finite() || size <= 0.0 {
                return Err(ConfigError::InvalidHexSize(size));
            }
            game.grid.hex_size_override = Some(size);
        }

        let width = self.width.unwrap_or(1280);
        let height = self.height.unwrap_or(720);
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidWindowSize(width, height));
        }

        game.seed = self.seed;
        game.prefers_reduced_motion = self.reduced_motion;
        Ok(Launch {
            game,
            window: (width, height),
        })
    }
}
