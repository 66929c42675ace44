//! Multi-plane upsampling on a thread pool
//!
//! Planes are independent, each worker owns one output plane and only reads
//! its input plane, so no locking is needed.
use scoped_threadpool::Pool;

use crate::components::SubSampRatios;
use crate::errors::UpsampleErrors;
use crate::image::Upsampler;
use crate::sample::SamplePlane;

pub(crate) fn upsample_planes_threaded(
    upsampler: &Upsampler, planes: &[(&SamplePlane, SubSampRatios)],
) -> Result<Vec<SamplePlane>, UpsampleErrors> {
    // allocate everything up front so size errors show before spawning
    let mut outputs = planes
        .iter()
        .map(|(plane, ratio)| SamplePlane::for_upsampled(plane, *ratio))
        .collect::<Result<Vec<SamplePlane>, UpsampleErrors>>()?;

    let threads = upsampler.options().num_threads().min(planes.len());

    if threads <= 1 {
        for ((plane, ratio), output) in planes.iter().zip(outputs.iter_mut()) {
            upsampler.upsample_plane_into(plane, *ratio, output)?;
        }
        return Ok(outputs);
    }
    let mut results: Vec<Result<(), UpsampleErrors>> = planes.iter().map(|_| Ok(())).collect();

    let mut pool = Pool::new(threads as u32);

    pool.scoped(|scope| {
        for (((plane, ratio), output), result) in planes
            .iter()
            .zip(outputs.iter_mut())
            .zip(results.iter_mut())
        {
            trace!("Dispatching {:?} plane of width {}", ratio, plane.width());

            scope.execute(move || {
                *result = upsampler.upsample_plane_into(plane, *ratio, output);
            });
        }
    });

    for result in results {
        result?;
    }
    Ok(outputs)
}
