//! Post-processing shared by every filter output.

use meshfilters_core::{Association, Dataset, Result};

/// Finishes a kernel output by copying the input's bookkeeping metadata.
///
/// Only the active scalar designation propagates, and only when the output
/// still holds an array of that name and association.
pub fn wrap_output(input: &Dataset, mut output: Dataset) -> Dataset {
    output.copy_meta_from(input);
    output
}

/// Like [`wrap_output`], then makes `active` the output's active scalars.
pub fn wrap_output_with_active(
    input: &Dataset,
    output: Dataset,
    active: &str,
    preference: Association,
) -> Result<Dataset> {
    let mut output = wrap_output(input, output);
    output.set_active_scalar(active, preference)?;
    Ok(output)
}
