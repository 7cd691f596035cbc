use ndarray::Array1;

pub(crate) fn l2_normalize(vec: &Array1<f64>) -> Array1<f64> {
    let norm: f64 = vec.iter().map(|&x| x * x).sum::<f64>().sqrt();
    if norm > 1e-12 {
        vec / norm
    } else {
        Array1::zeros(vec.len())
    }
}

pub(crate) fn l1_normalize(vec: &Array1<f64>) -> Array1<f64> {
    let norm: f64 = vec.iter().map(|x| x.abs()).sum();
    if norm > 1e-12 {
        vec / norm
    } else {
        Array1::zeros(vec.len())
    }
}

/// Splits comma-separated tag text into trimmed, non-empty tokens.
pub(crate) fn split_tags(text: &str) -> impl Iterator<Item = &str> {
    text.split(',').map(str::trim).filter(|t| !t.is_empty())
}
