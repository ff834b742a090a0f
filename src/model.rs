use safetravel_core::prelude::*;

use pyo3::prelude::*;
#[cfg(feature = "stubgen")]
use pyo3_stub_gen::derive::{gen_stub_pyclass, gen_stub_pyfunction, gen_stub_pymethods};

use crate::routing::to_py_err;

/// RoadModel
///
/// A road graph of labelled points joined by one-way ways, together with the
/// cost model used to price travel along them.
///
/// Points carrying the ``Point`` label can be routed through. Ways store a
/// speed limit, a road class and one traversal-time field per travel mode
/// (``crossTimeFoot``, ``crossTimeMotorVehicle``). Disruptions attached to
/// points slow down or close the ways entering them.
///
/// Example:
///
/// .. code-block:: python
///
///     model = load_road_model("path/to/graph.json")
///     hops = route(model, 99912, 1150824164, "crossTimeFoot", True, 70.0)
#[cfg_attr(feature = "stubgen", gen_stub_pyclass)]
#[pyclass(name = "RoadModel")]
pub struct PyRoadModel {
    pub(crate) model: RoadModel,
}

#[cfg_attr(feature = "stubgen", gen_stub_pymethods)]
#[pymethods]
impl PyRoadModel {
    pub fn point_count(&self) -> usize {
        self.model.graph.node_count()
    }

    pub fn way_count(&self) -> usize {
        self.model.graph.edge_count()
    }

    pub fn disruption_count(&self) -> usize {
        self.model.graph.disruption_count()
    }

    /// Coordinates of a point as ``(x, y)``, i.e. ``(lon, lat)`` for WGS84 graphs
    pub fn coordinates(&self, point_id: PointId) -> PyResult<(f64, f64)> {
        let node = self.model.point(point_id).map_err(to_py_err)?;
        let position = self.model.graph.coordinate(node);
        Ok((position.x(), position.y()))
    }

    /// Whether the point exists and carries the ``Point`` label
    pub fn is_routable(&self, point_id: PointId) -> bool {
        self.model
            .point(point_id)
            .is_ok_and(|node| self.model.graph.is_routable(node))
    }

    fn __repr__(&self) -> String {
        format!(
            "RoadModel with {} points, {} ways and {} disruptions",
            self.point_count(),
            self.way_count(),
            self.disruption_count()
        )
    }

    fn __str__(&self) -> String {
        self.__repr__()
    }
}

/// Load a road model from a JSON road graph
///
/// Parameters
/// ----------
/// graph_path : str
///     Path to the JSON document describing points, ways and disruptions
/// cost_config_path : str, optional
///     Path to a JSON cost configuration overriding road class factors,
///     disruption factors, the speed margin or the intersection penalty.
///     If None, the built-in tables are used.
///
/// Returns
/// -------
/// RoadModel
///     A model ready for routing
///
/// Raises
/// ------
/// RuntimeError
///     If the files cannot be read or describe an inconsistent graph
///
/// Notes
/// -----
/// The function releases the GIL while reading and indexing the graph.
#[cfg_attr(feature = "stubgen", gen_stub_pyfunction)]
#[pyfunction(name = "load_road_model")]
#[pyo3(signature = (graph_path, cost_config_path = None))]
pub fn py_load_road_model(
    py: Python<'_>,
    graph_path: &str,
    cost_config_path: Option<&str>,
) -> PyResult<PyRoadModel> {
    py.detach(|| {
        let mut config = RoadModelConfig::new(graph_path);
        if let Some(path) = cost_config_path {
            config = config.with_cost_config(path);
        }

        let model = safetravel_core::create_road_model(&config).map_err(|e| {
            PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(format!(
                "Failed to load road model: {e}"
            ))
        })?;

        Ok(PyRoadModel { model })
    })
}
