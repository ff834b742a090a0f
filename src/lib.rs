use pyo3::prelude::*;
#[cfg(feature = "stubgen")]
use pyo3_stub_gen::define_stub_info_gatherer;

use model::{PyRoadModel, py_load_road_model};
use routing::{PyHopRecord, nearest_point, route, route_anytime, route_geojson, route_wkt};

pub mod model;
pub mod routing;

/// A Python module implemented in Rust.
#[pymodule]
fn safetravel(m: &Bound<'_, PyModule>) -> PyResult<()> {
    pyo3_log::init();

    m.add_class::<PyRoadModel>()?;
    m.add_class::<PyHopRecord>()?;
    m.add_function(wrap_pyfunction!(py_load_road_model, m)?)?;

    m.add_function(wrap_pyfunction!(route, m)?)?;
    m.add_function(wrap_pyfunction!(route_anytime, m)?)?;
    m.add_function(wrap_pyfunction!(nearest_point, m)?)?;

    m.add_function(wrap_pyfunction!(route_geojson, m)?)?;
    m.add_function(wrap_pyfunction!(route_wkt, m)?)?;
    Ok(())
}

#[cfg(feature = "stubgen")]
define_stub_info_gatherer!(stub_info);
