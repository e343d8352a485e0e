//! 2D Perlin noise implementation
//!
//! Classic gradient noise over the unit grid, using Ken Perlin's permutation
//! table with a seed folded into the lattice hash.

// ============================================================================
// PERMUTATION TABLE
// ============================================================================
// Standard 256-element permutation table from Ken Perlin's reference implementation.
// This table must remain unchanged to keep coverage patterns reproducible.
const PERM: [u32; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180,
];

// ============================================================================
// PERLIN NOISE HELPER FUNCTIONS
// ============================================================================

/// Lattice hash: seed mixed with two permutation table lookups
#[inline]
fn hash(x: i64, y: i64, seed: u32) -> u32 {
    let seed_hash = seed.wrapping_mul(1103515245).wrapping_add(12345);
    let ix = ((x as u32) ^ seed_hash) & 255;
    let iy = ((y as u32) ^ (seed_hash >> 8)) & 255;
    let a = PERM[ix as usize];
    PERM[((a + iy) & 255) as usize]
}

/// Dot product of `(x, y)` with one of eight gradients picked by the hash
///
/// Axis gradients have length 1 and diagonal gradients have both components
/// at ±0.5, so every corner term (and hence the interpolated value) stays
/// within [-1, 1] for offsets inside the unit cell.
#[inline]
fn gradient(hash_value: u32, x: f64, y: f64) -> f64 {
    match hash_value & 7 {
        0 => x,
        1 => -x,
        2 => y,
        3 => -y,
        4 => 0.5 * (x + y),
        5 => 0.5 * (x - y),
        6 => 0.5 * (-x + y),
        _ => 0.5 * (-x - y),
    }
}

/// Quintic smoothstep interpolation (Ken Perlin's improved fade function)
///
/// Formula: 6t⁵ - 15t⁴ + 10t³
#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

// ============================================================================
// 2D PERLIN NOISE CORE FUNCTION
// ============================================================================

/// Sample 2D Perlin noise at `(x, y)`
///
/// # Returns
/// Value in range [-1, 1]
pub fn perlin_2d(x: f64, y: f64, seed: u32) -> f64 {
    let x0f = x.floor();
    let y0f = y.floor();
    let x0 = x0f as i64;
    let y0 = y0f as i64;

    // Relative position within the cell (0.0 to 1.0)
    let xf = x - x0f;
    let yf = y - y0f;

    let u = fade(xf);
    let v = fade(yf);

    let g00 = gradient(hash(x0, y0, seed), xf, yf);
    let g10 = gradient(hash(x0 + 1, y0, seed), xf - 1.0, yf);
    let g01 = gradient(hash(x0, y0 + 1, seed), xf, yf - 1.0);
    let g11 = gradient(hash(x0 + 1, y0 + 1, seed), xf - 1.0, yf - 1.0);

    let bottom = lerp(g00, g10, u);
    let top = lerp(g01, g11, u);
    lerp(bottom, top, v)
}

// ============================================================================
// FRACTAL BROWNIAN MOTION (FBM)
// ============================================================================

/// Sample layered 2D Perlin noise
///
/// Accumulates `octaves` layers, each `lacunarity` times the frequency and
/// `persistence` times the amplitude of the previous one, normalized by the
/// total amplitude. Returns a value in [-1, 1].
pub fn sample_perlin_fbm(
    x: f64,
    y: f64,
    seed: u32,
    octaves: usize,
    persistence: f64,
    lacunarity: f64,
) -> f64 {
    let mut total = 0.0;
    let mut amplitude = 1.0;
    let mut frequency = 1.0;
    let mut max_value = 0.0;

    for octave in 0..octaves.max(1) {
        let octave_seed = seed.wrapping_add(octave as u32 * 1000);
        total += perlin_2d(x * frequency, y * frequency, octave_seed) * amplitude;
        max_value += amplitude;
        amplitude *= persistence;
        frequency *= lacunarity;
    }

    if max_value > 0.0 {
        total / max_value
    } else {
        0.0
    }
}
