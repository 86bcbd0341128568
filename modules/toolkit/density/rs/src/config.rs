#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};
use derive_getters::{Dissolve, Getters};
use eyre::{ensure, Result};

/// Gene density scanning parameters.
///
/// * `bin_width`: distance between two consecutive density samples;
/// * `window_size`: width of the window centered at each sample;
/// * `f`: inclusion threshold is `mean - f * std`;
/// * `c`: a run of samples is reported only if its peak reaches `mean + c * std`.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Clone, PartialEq, Debug, Dissolve, Getters)]
pub struct Config {
    pub bin_width: usize,
    pub window_size: usize,
    pub f: f64,
    pub c: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bin_width: 1_000,
            window_size: 10_000,
            f: -0.5,
            c: 2.0,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_bin_width(&mut self, bin_width: usize) -> &mut Self {
        self.bin_width = bin_width;
        self
    }

    pub fn set_window_size(&mut self, window_size: usize) -> &mut Self {
        self.window_size = window_size;
        self
    }

    pub fn set_f(&mut self, f: f64) -> &mut Self {
        self.f = f;
        self
    }

    pub fn set_c(&mut self, c: f64) -> &mut Self {
        self.c = c;
        self
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.bin_width > 0, "Bin width must be positive");
        ensure!(
            self.window_size > 1,
            "Window size must be at least 2, got {}",
            self.window_size
        );
        ensure!(
            self.f.is_finite() && self.c.is_finite(),
            "Density thresholds must be finite, got F={} and C={}",
            self.f,
            self.c
        );
        Ok(())
    }

    /// Half of the scanning window, used both for sampling and for padding reported regions.
    pub fn half_window(&self) -> usize {
        self.window_size / 2
    }
}
