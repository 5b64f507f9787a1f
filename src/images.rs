//! Choice of illustration images.
//!
//! News entries carry no usable picture, so each one gets a thematic stock
//! image; the renderer also needs one as the `onerror` fallback of news
//! cards. The choice goes through [`PickImage`] so tests can pin it.

use rand::rng;
use rand::seq::IndexedRandom;

/// Picks one image URL out of a pool.
pub trait PickImage {
    /// Return one element of `pool`, or `fallback` when the pool is empty.
    fn pick(&mut self, pool: &[&'static str], fallback: &'static str) -> &'static str;
}

/// Uniformly random choice.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomImage;

impl PickImage for RandomImage {
    fn pick(&mut self, pool: &[&'static str], fallback: &'static str) -> &'static str {
        pool.choose(&mut rng()).copied().unwrap_or(fallback)
    }
}

/// Walks the pool in order, wrapping around.
#[cfg(test)]
#[derive(Debug, Default, Clone, Copy)]
pub struct RotatingImage {
    next: usize,
}

#[cfg(test)]
impl PickImage for RotatingImage {
    fn pick(&mut self, pool: &[&'static str], fallback: &'static str) -> &'static str {
        if pool.is_empty() {
            return fallback;
        }
        let chosen = pool[self.next % pool.len()];
        self.next += 1;
        chosen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FALLBACK_IMG, THEMATIC_IMAGES};

    #[test]
    fn test_random_image_from_pool() {
        let mut picker = RandomImage;
        for _ in 0..20 {
            assert!(THEMATIC_IMAGES.contains(&picker.pick(&THEMATIC_IMAGES, FALLBACK_IMG)));
        }
    }

    #[test]
    fn test_empty_pool_uses_fallback() {
        assert_eq!(RandomImage.pick(&[], FALLBACK_IMG), FALLBACK_IMG);
        assert_eq!(RotatingImage::default().pick(&[], FALLBACK_IMG), FALLBACK_IMG);
    }

    #[test]
    fn test_rotating_image_wraps() {
        let mut picker = RotatingImage::default();
        let pool = ["a", "b"];
        assert_eq!(picker.pick(&pool, FALLBACK_IMG), "a");
        assert_eq!(picker.pick(&pool, FALLBACK_IMG), "b");
        assert_eq!(picker.pick(&pool, FALLBACK_IMG), "a");
    }
}
