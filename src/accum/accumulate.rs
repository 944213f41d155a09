use crate::accum::index::AccumIndex;
use crate::foundation::core::Argb;
use crate::layer::model::BlendMode;
use crate::source::transparency::channel_bits_to_float;

impl AccumIndex {
    /// Composite one output pixel from one packed sample per source.
    ///
    /// `samples[i]` is the sample of source `i` at this pixel; companion samples carry their
    /// transparency as an `f32` bit pattern.
    ///
    /// # Panics
    ///
    /// Panics if `samples` does not hold exactly one sample per source.
    pub fn accumulate(&self, samples: &[u32]) -> Argb {
        assert_eq!(
            samples.len(),
            self.len(),
            "accumulate expects one sample per source"
        );
        self.accumulate_with(|i| samples[i])
    }

    /// Composite one output pixel, pulling the sample of source `i` through `sample(i)`.
    ///
    /// Sources are visited in sorted order. Within a layer, samples are summed channel-wise; at
    /// each layer boundary the sum is blended over the running output with weight
    /// `opacity * total_alpha / contributing_sources`. The output starts as opaque white, all
    /// arithmetic truncates toward zero, and the result is clamped to `[0, 255]` per channel.
    /// Weights and blending run in `f32`; layer sums wrap on overflow.
    ///
    /// Samples whose (scaled) alpha is zero are dropped from the layer sum even when their color
    /// channels are not.
    #[inline]
    pub fn accumulate_with(&self, mut sample: impl FnMut(usize) -> u32) -> Argb {
        let mut out = Argb::OPAQUE_WHITE.channels();
        let mut layer = [0i32; 4];
        let mut contributing = 0u32;
        let mut total_alpha = 0.0f32;

        for &src in &self.sorted_order {
            let skip = self.skip[src];

            if !skip && !self.is_transparency[src] {
                let (ch, eff_alpha) = match self.linked[src] {
                    Some(mask) => {
                        let eff_alpha = channel_bits_to_float(sample(mask));
                        let ch = Argb(sample(src))
                            .channels()
                            .map(|c| (c as f32 * eff_alpha) as i32);
                        (ch, eff_alpha)
                    }
                    None => (Argb(sample(src)).channels(), 1.0f32),
                };

                if ch[0] != 0 {
                    match self.blend_mode[src] {
                        BlendMode::Sum => {
                            for (acc, c) in layer.iter_mut().zip(ch) {
                                *acc = acc.wrapping_add(c);
                            }
                        }
                    }
                    if eff_alpha > 0.0 {
                        contributing += 1;
                    }
                    total_alpha += eff_alpha;
                }
            }

            if self.boundary[src] {
                if !skip && contributing > 0 {
                    let w = self.opacity[src] * total_alpha / contributing as f32;
                    for (o, acc) in out.iter_mut().zip(layer) {
                        *o = ((1.0 - w) * *o as f32 + w * acc as f32) as i32;
                    }
                }
                layer = [0; 4];
                contributing = 0;
                total_alpha = 0.0;
            }
        }

        Argb::pack_clamped(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/accum/accumulate.rs"]
mod tests;
