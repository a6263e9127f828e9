/// Normalize non-negative weights into probabilities
///
/// Returns an empty vector when the weights sum to zero, which callers treat
/// as "no statistical information" and handle with uniform fallbacks.
pub fn normalize(weights: &[f64]) -> Vec<f64> {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return Vec::new();
    }
    weights.iter().map(|&w| w / total).collect()
}

/// Shannon entropy of a weight vector, in nats
///
/// Weights are normalized internally; zero-weight entries contribute nothing.
/// A vector with all weight on one entry has entropy 0, and for a fixed
/// number of entries the uniform vector maximizes the result.
pub fn shannon_entropy(weights: &[f64]) -> f64 {
    let probabilities = normalize(weights);
    let mut entropy = 0.0;
    for p in probabilities {
        if p > 0.0 {
            entropy -= p * p.ln();
        }
    }
    entropy
}
