//! Main upsampling logic.
use crate::components::SubSampRatios;
use crate::errors::UpsampleErrors;
use crate::options::UpsamplerOptions;
use crate::sample::SamplePlane;
use crate::threads::upsample_planes_threaded;
use crate::upsampler::{
    check_row_group, choose_backend, kernels, run_row_group, Backend, FancyUpsampler,
};

/// An Upsampler Instance
///
/// Picks the fastest backend once on creation and keeps the kernels as function
/// pointers, so choosing is not repeated in the hot path.
#[derive(Clone)]
pub struct Upsampler {
    options: UpsamplerOptions,
    backend: Backend,
    h2v2: FancyUpsampler,
    h1v2: FancyUpsampler,
}

impl Default for Upsampler {
    fn default() -> Self {
        Upsampler::new()
    }
}

impl Upsampler {
    /// Create a new upsampler with default options
    #[must_use]
    pub fn new() -> Upsampler {
        Upsampler::new_with_options(UpsamplerOptions::default())
    }

    /// Create a new upsampler with `options`
    #[must_use]
    pub fn new_with_options(options: UpsamplerOptions) -> Upsampler {
        let backend = choose_backend(&options);
        let (h2v2, h1v2) = kernels(backend);

        Upsampler {
            options,
            backend,
            h2v2,
            h1v2,
        }
    }

    /// Backend the kernels run on
    #[must_use]
    pub const fn backend(&self) -> Backend {
        self.backend
    }

    /// Options this upsampler was created with
    #[must_use]
    pub const fn options(&self) -> &UpsamplerOptions {
        &self.options
    }

    const fn kernel(&self, ratio: SubSampRatios) -> FancyUpsampler {
        match ratio {
            SubSampRatios::H2V2 => self.h2v2,
            SubSampRatios::H1V2 => self.h1v2,
        }
    }

    /// Upsample one row group with the kernel for `ratio`
    ///
    /// See [`crate::upsample_h2v2`] for the layout of the row tables.
    ///
    /// # Errors
    /// See [`crate::upsample_h2v2`]
    pub fn upsample_row_group(
        &self, ratio: SubSampRatios, row_group_size: usize, sample_width: usize,
        input_rows: &[&[u8]], output_rows: &mut [&mut [u8]],
    ) -> Result<(), UpsampleErrors> {
        check_row_group(ratio, row_group_size, sample_width, input_rows, output_rows)?;

        run_row_group(
            self.kernel(ratio),
            row_group_size,
            sample_width,
            input_rows,
            output_rows,
        );
        Ok(())
    }

    /// Upsample a row group subsampled 2:1 in both directions
    ///
    /// # Errors
    /// See [`crate::upsample_h2v2`]
    pub fn upsample_h2v2(
        &self, row_group_size: usize, sample_width: usize, input_rows: &[&[u8]],
        output_rows: &mut [&mut [u8]],
    ) -> Result<(), UpsampleErrors> {
        self.upsample_row_group(
            SubSampRatios::H2V2,
            row_group_size,
            sample_width,
            input_rows,
            output_rows,
        )
    }

    /// Upsample a row group subsampled 2:1 vertically
    ///
    /// # Errors
    /// See [`crate::upsample_h1v2`]
    pub fn upsample_h1v2(
        &self, row_group_size: usize, sample_width: usize, input_rows: &[&[u8]],
        output_rows: &mut [&mut [u8]],
    ) -> Result<(), UpsampleErrors> {
        self.upsample_row_group(
            SubSampRatios::H1V2,
            row_group_size,
            sample_width,
            input_rows,
            output_rows,
        )
    }

    /// Upsample a whole plane to full resolution
    ///
    /// The first and last rows are repeated as context above and below the
    /// plane, rows are handed to the kernel in groups of
    /// [`UpsamplerOptions::row_group_size`].
    ///
    /// The output plane is allocated with [`SamplePlane::for_upsampled`].
    ///
    /// # Errors
    /// - If the configured row group size is zero or odd
    /// - If the output plane size overflows `usize`
    pub fn upsample_plane(
        &self, plane: &SamplePlane, ratio: SubSampRatios,
    ) -> Result<SamplePlane, UpsampleErrors> {
        let mut output = SamplePlane::for_upsampled(plane, ratio)?;

        self.upsample_plane_into(plane, ratio, &mut output)?;

        Ok(output)
    }

    /// Upsample a whole plane into an existing output plane
    ///
    /// # Errors
    /// - If `output` has the wrong dimensions or too small a stride
    /// - If the configured row group size is zero or odd
    pub fn upsample_plane_into(
        &self, plane: &SamplePlane, ratio: SubSampRatios, output: &mut SamplePlane,
    ) -> Result<(), UpsampleErrors> {
        let (width, height) = (plane.width(), plane.height());
        let out_width = ratio.output_width(width);

        if output.width() != out_width || output.height() != height * 2 {
            return Err(UpsampleErrors::BadPlane(format!(
                "Expected a {}x{} output plane for {:?} but found {}x{}",
                out_width,
                height * 2,
                ratio,
                output.width(),
                output.height()
            )));
        }
        let row_group_size = self.options.row_group_size();

        if row_group_size == 0 || row_group_size % 2 != 0 {
            return Err(UpsampleErrors::BadRowGroup(row_group_size));
        }
        debug!(
            "Upsampling {}x{} plane to {}x{} ({:?}, {:?})",
            width,
            height,
            out_width,
            height * 2,
            ratio,
            self.backend
        );
        // edge rows are duplicated to give the first and last rows context
        let mut context: Vec<&[u8]> = Vec::with_capacity(height + 2);

        context.push(plane.row(0));
        context.extend(plane.rows());
        context.push(plane.row(height - 1));

        let mut out_rows: Vec<&mut [u8]> = output.rows_mut().collect();

        let rows_per_group = row_group_size / 2;

        for start in (0..height).step_by(rows_per_group) {
            let rows = rows_per_group.min(height - start);

            self.upsample_row_group(
                ratio,
                rows * 2,
                width,
                &context[start..start + rows + 2],
                &mut out_rows[start * 2..(start + rows) * 2],
            )?;
        }
        Ok(())
    }

    /// Upsample several independent planes, in parallel when more than one
    /// thread is configured
    ///
    /// Output planes are returned in input order.
    ///
    /// # Errors
    /// The first error met by any plane
    pub fn upsample_planes(
        &self, planes: &[(&SamplePlane, SubSampRatios)],
    ) -> Result<Vec<SamplePlane>, UpsampleErrors> {
        upsample_planes_threaded(self, planes)
    }
}
