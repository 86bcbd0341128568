use std::fmt::Debug;

/// T values are primitive integers
pub trait PrimInt: ::num::PrimInt + Debug + Default {}
impl<T: ::num::PrimInt + Debug + Default> PrimInt for T {}

/// T values are float numbers
pub trait Float: ::num::Float + Debug + Default {}

impl<T: ::num::Float + Debug + Default> Float for T {}

/// Mean and population standard deviation (ddof = 0) of the values.
/// Returns None for an empty input.
pub fn mean_std<T: Float>(values: &[T]) -> Option<(T, T)> {
    if values.is_empty() {
        return None;
    }
    let n = T::from(values.len())?;
    let mean = values.iter().fold(T::zero(), |acc, x| acc + *x) / n;
    let var = values
        .iter()
        .fold(T::zero(), |acc, x| acc + (*x - mean) * (*x - mean))
        / n;
    Some((mean, var.sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_std() {
        assert_eq!(mean_std::<f64>(&[]), None);
        assert_eq!(mean_std(&[3.0f64]), Some((3.0, 0.0)));
        assert_eq!(mean_std(&[0.0f64, 0.0, 0.0]), Some((0.0, 0.0)));

        let (mean, std) = mean_std(&[2.0f64, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((mean - 5.0).abs() < 1e-12);
        assert!((std - 2.0).abs() < 1e-12);
    }
}
