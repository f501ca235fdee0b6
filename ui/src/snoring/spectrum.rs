//! Byte frequency spectrum for native capture.
//!
//! Produces the same shape of data a browser `AnalyserNode` returns from
//! `getByteFrequencyData`: Blackman window, magnitude spectrum scaled by the
//! window length, exponential smoothing across frames, then a decibel range
//! mapped onto 0-255.

use std::f32::consts::PI;

use super::config::{check_fft_size, ConfigError};

pub const SMOOTHING: f32 = 0.8;
pub const MIN_DECIBELS: f32 = -100.0;
pub const MAX_DECIBELS: f32 = -30.0;

#[derive(Debug, Clone)]
pub struct SpectrumAnalyser {
    fft_size: usize,
    window: Vec<f32>,
    smoothed: Vec<f32>,
    re: Vec<f32>,
    im: Vec<f32>,
}

impl SpectrumAnalyser {
    /// Fails unless `fft_size` is a power of two in `32..=32768`.
    pub fn new(fft_size: usize) -> Result<Self, ConfigError> {
        check_fft_size(fft_size)?;
        Ok(Self {
            fft_size,
            window: blackman(fft_size),
            smoothed: vec![0.0; fft_size / 2],
            re: vec![0.0; fft_size],
            im: vec![0.0; fft_size],
        })
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    pub fn bin_count(&self) -> usize {
        self.fft_size / 2
    }

    /// Analyse the most recent `fft_size` samples into `out`.
    ///
    /// Shorter input is treated as leading silence; `out` is filled up to
    /// `min(out.len(), bin_count())`.
    pub fn byte_frequency_data(&mut self, samples: &[f32], out: &mut [u8]) {
        let n = self.fft_size;
        let offset = n.saturating_sub(samples.len());
        let tail = &samples[samples.len().saturating_sub(n)..];

        for i in 0..n {
            let sample = if i < offset { 0.0 } else { tail[i - offset] };
            self.re[i] = sample * self.window[i];
            self.im[i] = 0.0;
        }

        fft_in_place(&mut self.re, &mut self.im);

        let scale = 1.0 / n as f32;
        let range = MAX_DECIBELS - MIN_DECIBELS;
        for (k, slot) in out.iter_mut().take(self.bin_count()).enumerate() {
            let magnitude = (self.re[k] * self.re[k] + self.im[k] * self.im[k]).sqrt() * scale;
            let smoothed = SMOOTHING * self.smoothed[k] + (1.0 - SMOOTHING) * magnitude;
            self.smoothed[k] = smoothed;

            let db = if smoothed > 0.0 {
                20.0 * smoothed.log10()
            } else {
                f32::NEG_INFINITY
            };
            let scaled = (255.0 / range) * (db - MIN_DECIBELS);
            *slot = scaled.clamp(0.0, 255.0) as u8;
        }
    }

    pub fn reset(&mut self) {
        self.smoothed.iter_mut().for_each(|v| *v = 0.0);
    }
}

fn blackman(n: usize) -> Vec<f32> {
    const A0: f32 = 0.42;
    const A1: f32 = 0.5;
    const A2: f32 = 0.08;
    (0..n)
        .map(|i| {
            let x = i as f32 / n as f32;
            A0 - A1 * (2.0 * PI * x).cos() + A2 * (4.0 * PI * x).cos()
        })
        .collect()
}

/// Iterative radix-2 Cooley-Tukey. Both slices share a power-of-two length.
fn fft_in_place(re: &mut [f32], im: &mut [f32]) {
    let n = re.len();
    if n < 2 {
        return;
    }

    let mut j = 0usize;
    for i in 1..n {
        let mut bit = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j |= bit;
        if i < j {
            re.swap(i, j);
            im.swap(i, j);
        }
    }

    let mut len = 2;
    while len <= n {
        let angle = -2.0 * PI / len as f32;
        let (w_im, w_re) = angle.sin_cos();
        for start in (0..n).step_by(len) {
            let (mut cur_re, mut cur_im) = (1.0f32, 0.0f32);
            for k in 0..len / 2 {
                let a = start + k;
                let b = a + len / 2;
                let t_re = re[b] * cur_re - im[b] * cur_im;
                let t_im = re[b] * cur_im + im[b] * cur_re;
                re[b] = re[a] - t_re;
                im[b] = im[a] - t_im;
                re[a] += t_re;
                im[a] += t_im;
                let next_re = cur_re * w_re - cur_im * w_im;
                cur_im = cur_re * w_im + cur_im * w_re;
                cur_re = next_re;
            }
        }
        len <<= 1;
    }
}
