//! `pysvb.svbcamerasdk`: the SVBONY camera SDK for Python.
//!
//! Two layers share one module:
//!
//! * the `SVB*` functions, one per vendor entry point. They take the vendor
//!   arguments positionally and hand back the raw `SVB_ERROR_CODE` next to
//!   their outputs. Arguments that do not parse give an error code of `-1` and
//!   the same default outputs a failed SDK call gives, instead of raising.
//! * `PySVBCameraSDK`, which turns failing codes into `SvbonyCameraError`
//!   subclasses, together with `SVB_ERROR_CODE_TO_EXC` and
//!   `image_type_to_bpp`.
//!
//! Without the `native` feature the vendor library is not linked; only the
//! driver-independent parts are compiled, which is how the unit tests run.
#![cfg_attr(not(feature = "native"), allow(dead_code))]

use pyo3::prelude::*;

mod camera;
mod errors;
#[cfg(feature = "native")]
mod functions;
mod marshal;

pub use camera::PySvbCameraSdk;

#[pymodule]
fn svbcamerasdk(m: &Bound<'_, PyModule>) -> PyResult<()> {
    errors::register(m)?;
    camera::register(m)?;
    #[cfg(feature = "native")]
    functions::register(m)?;
    Ok(())
}
