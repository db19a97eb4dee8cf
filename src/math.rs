//! Scalar curves behind movement, fog, flashes and board fills.
//!
//! Times are milliseconds as `f64`; alphas and progress are `f32` in `[0, 1]`.

use bevy::math::Vec2;

/// Rescales an `Fbm` sample in `[-1, 1]` onto `[min, max]`.
///
/// Board fills use it to turn the noise field into a fill-glyph weight.
///
/// ```
/// # use hex_quest::math::map_noise_to_range;
/// assert_eq!(map_noise_to_range(0.0, 0.0, 1.0), 0.5);
/// assert_eq!(map_noise_to_range(-1.0, 2.0, 6.0), 2.0);
/// ```
pub fn map_noise_to_range(noise_val: f64, min: f32, max: f32) -> f32 {
    min + ((noise_val as f32 + 1.0) / 2.0) * (max - min)
}

/// Quadratic ease-out curve: fast start, gentle deceleration.
///
/// `t` should be in `[0, 1]`. Returns `t·(2 − t)`.
pub fn ease_out_quad(t: f32) -> f32 {
    t * (2.0 - t)
}

/// Linear progress of a timed transition, clamped to `[0, 1]`.
///
/// A zero (or negative) duration completes immediately.
pub fn progress(elapsed_ms: f64, duration_ms: f64) -> f32 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    (elapsed_ms / duration_ms).clamp(0.0, 1.0) as f32
}

/// Moves `current` a fraction `rate` of the way towards `target`.
///
/// A rate of `1.0` snaps straight to the target.
pub fn approach(current: Vec2, target: Vec2, rate: f32) -> Vec2 {
    current + (target - current) * rate.clamp(0.0, 1.0)
}

/// Opacity of a hex based on how close it sits to the edge of the board.
///
/// Returns a value in `[min_alpha, 1.0]`:
/// - Hexes `fog_band` or more rings inside the edge are fully opaque.
/// - Hexes on the outermost ring get `min_alpha`, scaled linearly in between.
pub fn edge_fog_alpha(distance_from_origin: u32, grid_radius: u32, fog_band: u32, min_alpha: f32) -> f32 {
    if fog_band == 0 {
        return 1.0;
    }
    let inset = grid_radius.saturating_sub(distance_from_origin) as f32;
    let t = (inset / fog_band as f32).clamp(0.0, 1.0);
    min_alpha + t * (1.0 - min_alpha)
}

/// Opacity falloff with distance from the viewer (the player's hex).
///
/// Full brightness inside `clear_radius`, fading linearly to `min_alpha` at
/// `clear_radius + fade_width`.
pub fn sight_falloff(distance: u32, clear_radius: u32, fade_width: u32, min_alpha: f32) -> f32 {
    if distance <= clear_radius {
        return 1.0;
    }
    if fade_width == 0 {
        return min_alpha;
    }
    let t = ((distance - clear_radius) as f32 / fade_width as f32).clamp(0.0, 1.0);
    1.0 - t * (1.0 - min_alpha)
}

/// Intensity of the red death flash `elapsed_ms` after death.
///
/// Rises linearly to `1.0` over `rise_ms`, then decays linearly to zero over
/// `decay_ms`.
pub fn death_flash_intensity(elapsed_ms: f64, rise_ms: f64, decay_ms: f64) -> f32 {
    if elapsed_ms < 0.0 {
        return 0.0;
    }
    if elapsed_ms < rise_ms {
        return (elapsed_ms / rise_ms) as f32;
    }
    if decay_ms <= 0.0 {
        return 0.0;
    }
    (1.0 - (elapsed_ms - rise_ms) / decay_ms).clamp(0.0, 1.0) as f32
}

/// Hex size (px) for a viewport width, by layout breakpoint.
pub fn hex_size_for_width(width: f32) -> f32 {
    if width < 640.0 {
        30.0
    } else if width < 1024.0 {
        38.0
    } else {
        44.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── map_noise_to_range ──────────────────────────────────────────

    #[test]
    fn noise_min_maps_to_range_min() {
        assert_eq!(map_noise_to_range(-1.0, 0.0, 10.0), 0.0);
    }

    #[test]
    fn noise_zero_maps_to_midpoint() {
        let result = map_noise_to_range(0.0, 2.0, 6.0);
        assert!((result - 4.0).abs() < 1e-6);
    }

    // ── ease_out_quad / progress ────────────────────────────────────

    #[test]
    fn ease_endpoints() {
        assert_eq!(ease_out_quad(0.0), 0.0);
        assert_eq!(ease_out_quad(1.0), 1.0);
    }

    #[test]
    fn ease_at_half_is_three_quarters() {
        assert!((ease_out_quad(0.5) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn ease_is_monotonically_increasing() {
        let steps: Vec<f32> = (0..=100).map(|i| ease_out_quad(i as f32 / 100.0)).collect();
        for w in steps.windows(2) {
            assert!(w[1] >= w[0], "ease_out_quad must be non-decreasing");
        }
    }

    #[test]
    fn zero_duration_completes_immediately() {
        assert_eq!(progress(0.0, 0.0), 1.0);
    }

    #[test]
    fn progress_clamps() {
        assert_eq!(progress(300.0, 150.0), 1.0);
        assert!((progress(75.0, 150.0) - 0.5).abs() < 1e-6);
    }

    // ── approach ────────────────────────────────────────────────────

    #[test]
    fn approach_moves_fraction() {
        let p = approach(Vec2::ZERO, Vec2::new(100.0, 0.0), 0.03);
        assert!((p.x - 3.0).abs() < 1e-5);
    }

    #[test]
    fn approach_rate_one_snaps() {
        let target = Vec2::new(-7.0, 12.5);
        assert_eq!(approach(Vec2::new(3.0, 3.0), target, 1.0), target);
    }

    // ── fog ─────────────────────────────────────────────────────────

    #[test]
    fn edge_ring_gets_min_alpha() {
        let a = edge_fog_alpha(30, 30, 5, 0.1);
        assert!((a - 0.1).abs() < 1e-6);
    }

    #[test]
    fn interior_is_opaque() {
        assert_eq!(edge_fog_alpha(3, 30, 5, 0.1), 1.0);
    }

    #[test]
    fn edge_fog_is_monotonic_towards_centre() {
        let mut prev = 0.0;
        for d in (0..=30).rev() {
            let a = edge_fog_alpha(d, 30, 6, 0.15);
            assert!(a >= prev);
            prev = a;
        }
    }

    #[test]
    fn sight_falloff_range() {
        assert_eq!(sight_falloff(2, 4, 6, 0.2), 1.0);
        assert!((sight_falloff(10, 4, 6, 0.2) - 0.2).abs() < 1e-6);
        let mid = sight_falloff(7, 4, 6, 0.2);
        assert!(mid > 0.2 && mid < 1.0);
    }

    // ── death flash ─────────────────────────────────────────────────

    #[test]
    fn flash_rises_then_decays() {
        assert_eq!(death_flash_intensity(0.0, 100.0, 1000.0), 0.0);
        assert!((death_flash_intensity(50.0, 100.0, 1000.0) - 0.5).abs() < 1e-6);
        assert!((death_flash_intensity(100.0, 100.0, 1000.0) - 1.0).abs() < 1e-6);
        assert!((death_flash_intensity(600.0, 100.0, 1000.0) - 0.5).abs() < 1e-6);
        assert_eq!(death_flash_intensity(1100.0, 100.0, 1000.0), 0.0);
        assert_eq!(death_flash_intensity(5000.0, 100.0, 1000.0), 0.0);
    }

    // ── breakpoints ─────────────────────────────────────────────────

    #[test]
    fn hex_size_breakpoints() {
        assert_eq!(hex_size_for_width(320.0), 30.0);
        assert_eq!(hex_size_for_width(639.9), 30.0);
        assert_eq!(hex_size_for_width(640.0), 38.0);
        assert_eq!(hex_size_for_width(1023.0), 38.0);
        assert_eq!(hex_size_for_width(1920.0), 44.0);
    }
}
