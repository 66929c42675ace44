//! Upsampler configuration

/// Options controlling how an [`Upsampler`](crate::Upsampler) runs
///
/// SIMD flags only allow a backend, it is still used only when the running
/// CPU supports it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UpsamplerOptions {
    use_sse2: bool,
    use_avx2: bool,
    use_neon: bool,
    num_threads: Option<usize>,
    row_group_size: usize,
}

impl Default for UpsamplerOptions {
    fn default() -> Self {
        UpsamplerOptions {
            use_sse2: true,
            use_avx2: true,
            use_neon: true,
            num_threads: None,
            row_group_size: 2,
        }
    }
}

impl UpsamplerOptions {
    /// Allow or forbid the SSE2 backend
    #[must_use]
    pub const fn set_use_sse2(mut self, yes: bool) -> Self {
        self.use_sse2 = yes;
        self
    }
    /// Allow or forbid the AVX2 backend
    #[must_use]
    pub const fn set_use_avx2(mut self, yes: bool) -> Self {
        self.use_avx2 = yes;
        self
    }
    /// Allow or forbid the NEON backend
    #[must_use]
    pub const fn set_use_neon(mut self, yes: bool) -> Self {
        self.use_neon = yes;
        self
    }
    /// Allow or forbid every vector backend at once
    ///
    /// With `false` the portable scalar code is used.
    #[must_use]
    pub const fn set_use_simd(self, yes: bool) -> Self {
        self.set_use_sse2(yes).set_use_avx2(yes).set_use_neon(yes)
    }
    /// Number of threads used when several planes are upsampled together
    ///
    /// Zero is treated as one.
    #[must_use]
    pub const fn set_num_threads(mut self, threads: usize) -> Self {
        self.num_threads = Some(threads);
        self
    }
    /// Output rows produced per kernel call by the plane drivers
    ///
    /// Must be even, an odd or zero size is reported when a plane is
    /// upsampled.
    #[must_use]
    pub const fn set_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Whether the SSE2 backend may be used
    #[must_use]
    pub const fn use_sse2(&self) -> bool {
        self.use_sse2
    }
    /// Whether the AVX2 backend may be used
    #[must_use]
    pub const fn use_avx2(&self) -> bool {
        self.use_avx2
    }
    /// Whether the NEON backend may be used
    #[must_use]
    pub const fn use_neon(&self) -> bool {
        self.use_neon
    }
    /// Threads for multi-plane upsampling, defaults to the number of logical CPUs
    #[must_use]
    pub fn num_threads(&self) -> usize {
        self.num_threads.unwrap_or_else(num_cpus::get).max(1)
    }
    /// Output rows per kernel call in the plane drivers
    #[must_use]
    pub const fn row_group_size(&self) -> usize {
        self.row_group_size
    }
}

#[test]
fn simd_switch_covers_every_backend() {
    let options = UpsamplerOptions::default().set_use_simd(false);

    assert!(!options.use_sse2() && !options.use_avx2() && !options.use_neon());
    assert_eq!(options.set_num_threads(0).num_threads(), 1);
}
