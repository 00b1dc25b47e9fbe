// RGB -> one perceptual grey value.

use image::Rgb;

const RED_WEIGHT: f32 = 0.222;
const GREEN_WEIGHT: f32 = 0.707;
const BLUE_WEIGHT: f32 = 0.071;

/// Weighted grey in 0..=255. The weights sum to 1, so pure white maps to 255.
#[inline]
pub fn luminance(c: Rgb<u8>) -> u8 {
    let g = c[0] as f32 * RED_WEIGHT + c[1] as f32 * GREEN_WEIGHT + c[2] as f32 * BLUE_WEIGHT;
    g.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_and_white_hit_the_ends() {
        assert_eq!(luminance(Rgb([0, 0, 0])), 0);
        assert_eq!(luminance(Rgb([255, 255, 255])), 255);
    }

    #[test]
    fn green_dominates() {
        assert_eq!(luminance(Rgb([255, 0, 0])), 57);
        assert_eq!(luminance(Rgb([0, 255, 0])), 180);
        assert_eq!(luminance(Rgb([0, 0, 255])), 18);
    }

    #[test]
    fn monotonic_in_each_channel() {
        // Sweep one channel while the others sit at a few fixed levels.
        for base in [0u8, 37, 128, 200, 255] {
            for ch in 0..3 {
                let mut prev = 0u8;
                for v in 0..=255u8 {
                    let mut c = Rgb([base; 3]);
                    c[ch] = v;
                    let g = luminance(c);
                    assert!(g >= prev, "channel {ch} base {base} v {v}");
                    prev = g;
                }
            }
        }
    }
}
