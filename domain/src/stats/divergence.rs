//! Entropy and divergence over vote distributions
//!
//! Both functions work in bits (log base 2) and share the same epsilon floor
//! so that zero-probability categories never produce infinities.

/// Floor applied to probabilities before taking logarithms
pub const KL_EPSILON: f64 = 1e-10;

/// Shannon entropy of a distribution, in bits
///
/// Categories with zero probability contribute nothing. The uniform
/// three-way distribution scores log2(3), about 1.585 bits.
pub fn shannon_entropy(dist: [f64; 3]) -> f64 {
    dist.iter()
        .filter(|&&p| p > 0.0)
        .map(|&p| -p * p.log2())
        .sum()
}

/// KL divergence D(p || q) in bits
///
/// Computed as `Σ pᵢ·log2((pᵢ+ε)/(qᵢ+ε))` with ε = [`KL_EPSILON`] inside the
/// ratio, so snapshots with empty categories stay finite and identical
/// distributions score exactly 0. Not symmetric: `p` is the newer snapshot,
/// `q` the older one.
pub fn kl_divergence(p: [f64; 3], q: [f64; 3]) -> f64 {
    p.iter()
        .zip(q.iter())
        .map(|(&pi, &qi)| pi * ((pi + KL_EPSILON) / (qi + KL_EPSILON)).log2())
        .sum()
}
