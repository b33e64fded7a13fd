//! # Noise Module
//!
//! Seed-reproducible gradient noise used as the terrain height function.
//!
//! ## Determinism
//!
//! Terrain is never persisted: a chunk that is unloaded and later revisited is
//! regenerated from scratch. That only works because the same seed always
//! yields the same permutation table, and therefore the same noise field.

/// Number of distinct lattice hashes.
const PERMUTATION_SIZE: usize = 256;

/// Gradient noise generator backed by a seeded permutation table.
///
/// The 256-entry permutation is duplicated to 512 entries so corner hashing
/// never needs to wrap indices.
#[derive(Clone)]
pub struct PerlinNoise {
    permutation: [u8; PERMUTATION_SIZE * 2],
}

impl std::fmt::Debug for PerlinNoise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PerlinNoise")
            .field("permutation_head", &&self.permutation[..8])
            .finish()
    }
}

impl PerlinNoise {
    /// Creates a noise generator whose permutation table is shuffled using
    /// `seed` as the only source of randomness.
    pub fn new(seed: u32) -> Self {
        let mut table: Vec<u8> = (0..PERMUTATION_SIZE).map(|i| i as u8).collect();
        fastrand::Rng::with_seed(u64::from(seed)).shuffle(&mut table);

        let mut permutation = [0u8; PERMUTATION_SIZE * 2];
        permutation[..PERMUTATION_SIZE].copy_from_slice(&table);
        permutation[PERMUTATION_SIZE..].copy_from_slice(&table);

        PerlinNoise { permutation }
    }

    #[inline]
    fn perm(&self, index: usize) -> usize {
        self.permutation[index] as usize
    }

    /// Quintic fade curve `6t^5 - 15t^4 + 10t^3`.
    #[inline]
    fn fade(t: f32) -> f32 {
        t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
    }

    #[inline]
    fn lerp(t: f32, a: f32, b: f32) -> f32 {
        a + t * (b - a)
    }

    /// Dot product of the offset with one of 12 edge gradients chosen by the
    /// low four bits of `hash`.
    #[inline]
    fn grad(hash: usize, x: f32, y: f32, z: f32) -> f32 {
        let h = hash & 15;
        let u = if h < 8 { x } else { y };
        let v = if h < 4 {
            y
        } else if h == 12 || h == 14 {
            x
        } else {
            z
        };
        (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
    }

    /// Samples 3D gradient noise.
    ///
    /// # Returns
    /// A finite value in `[-1, 1]` for finite input.
    pub fn noise3(&self, x: f32, y: f32, z: f32) -> f32 {
        let (fx, fy, fz) = (x.floor(), y.floor(), z.floor());

        // Lattice cube, masked into the table range.
        let xi = (fx as i64 & 255) as usize;
        let yi = (fy as i64 & 255) as usize;
        let zi = (fz as i64 & 255) as usize;

        let (x, y, z) = (x - fx, y - fy, z - fz);
        let (u, v, w) = (Self::fade(x), Self::fade(y), Self::fade(z));

        let a = self.perm(xi) + yi;
        let aa = self.perm(a) + zi;
        let ab = self.perm(a + 1) + zi;
        let b = self.perm(xi + 1) + yi;
        let ba = self.perm(b) + zi;
        let bb = self.perm(b + 1) + zi;

        let value = Self::lerp(
            w,
            Self::lerp(
                v,
                Self::lerp(
                    u,
                    Self::grad(self.perm(aa), x, y, z),
                    Self::grad(self.perm(ba), x - 1.0, y, z),
                ),
                Self::lerp(
                    u,
                    Self::grad(self.perm(ab), x, y - 1.0, z),
                    Self::grad(self.perm(bb), x - 1.0, y - 1.0, z),
                ),
            ),
            Self::lerp(
                v,
                Self::lerp(
                    u,
                    Self::grad(self.perm(aa + 1), x, y, z - 1.0),
                    Self::grad(self.perm(ba + 1), x - 1.0, y, z - 1.0),
                ),
                Self::lerp(
                    u,
                    Self::grad(self.perm(ab + 1), x, y - 1.0, z - 1.0),
                    Self::grad(self.perm(bb + 1), x - 1.0, y - 1.0, z - 1.0),
                ),
            ),
        );

        value.clamp(-1.0, 1.0)
    }

    /// Samples 2D gradient noise, the `z = 0` slice of [`Self::noise3`].
    #[inline]
    pub fn noise2(&self, x: f32, y: f32) -> f32 {
        self.noise3(x, y, 0.0)
    }

    /// Sums `octaves` layers of 2D noise, doubling frequency and scaling
    /// amplitude by `persistence` per layer, normalised by the total amplitude.
    ///
    /// # Returns
    /// A value in `[-1, 1]`. Zero octaves yield `0.0`.
    pub fn octave_noise(&self, x: f32, y: f32, octaves: u32, persistence: f32) -> f32 {
        let mut total = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;
        let mut max_value = 0.0;

        for _ in 0..octaves {
            total += self.noise2(x * frequency, y * frequency) * amplitude;
            max_value += amplitude;
            amplitude *= persistence;
            frequency *= 2.0;
        }

        if max_value == 0.0 {
            return 0.0;
        }

        (total / max_value).clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permutation_is_a_doubled_shuffle() {
        let noise = PerlinNoise::new(12345);
        let mut head = noise.permutation[..PERMUTATION_SIZE].to_vec();
        assert_eq!(head, noise.permutation[PERMUTATION_SIZE..].to_vec());
        head.sort_unstable();
        assert!(head.iter().enumerate().all(|(i, v)| *v as usize == i));
    }

    #[test]
    fn test_determinism() {
        let noise1 = PerlinNoise::new(12345);
        let noise2 = PerlinNoise::new(12345);

        for i in 0..200 {
            let x = i as f32 * 0.173 - 17.0;
            let y = i as f32 * 0.291 + 3.5;
            assert_eq!(
                noise1.octave_noise(x, y, 4, 0.5).to_bits(),
                noise2.octave_noise(x, y, 4, 0.5).to_bits(),
                "Determinism failed at ({x}, {y})"
            );
        }
    }

    #[test]
    fn test_different_seeds_different_tables() {
        let noise1 = PerlinNoise::new(1);
        let noise2 = PerlinNoise::new(2);
        assert_ne!(noise1.permutation, noise2.permutation);
    }

    #[test]
    fn test_range() {
        for seed in [0, 7, 12345, u32::MAX] {
            let noise = PerlinNoise::new(seed);
            for i in 0..5000 {
                let x = i as f32 * 0.37 - 900.0;
                let y = i as f32 * 0.53 - 1300.0;
                let z = i as f32 * 0.11;
                let n3 = noise.noise3(x, y, z);
                let octave = noise.octave_noise(x, y, 6, 0.5);
                assert!((-1.0..=1.0).contains(&n3), "noise3 {n3} out of range");
                assert!((-1.0..=1.0).contains(&octave), "octave {octave} out of range");
            }
        }
    }

    #[test]
    fn test_zero_at_lattice_points() {
        let noise = PerlinNoise::new(99);
        for i in -5..5 {
            assert_eq!(noise.noise2(i as f32, (i * 3) as f32), 0.0);
        }
    }

    #[test]
    fn test_continuity() {
        let noise = PerlinNoise::new(42);
        let v1 = noise.noise2(10.3, 4.7);
        let v2 = noise.noise2(10.3005, 4.7);
        assert!((v1 - v2).abs() < 0.01, "noise should be continuous");
    }

    #[test]
    fn test_zero_octaves() {
        let noise = PerlinNoise::new(42);
        assert_eq!(noise.octave_noise(1.5, 2.5, 0, 0.5), 0.0);
    }
}
