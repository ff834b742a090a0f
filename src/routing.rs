use geo::Point;
use pyo3::prelude::*;
#[cfg(feature = "stubgen")]
use pyo3_stub_gen::derive::{gen_stub_pyclass, gen_stub_pyfunction, gen_stub_pymethods};
use wkt::ToWkt;

use crate::model::PyRoadModel;
use safetravel_core::prelude::*;

/// One hop of a route
///
/// Hops are returned goal first: ``index`` 0 is the destination, the highest
/// index is the first point after the start. ``time`` is the cumulative
/// travel time in seconds from the start to this point.
#[cfg_attr(feature = "stubgen", gen_stub_pyclass)]
#[pyclass(name = "HopRecord", frozen)]
#[derive(Clone)]
pub struct PyHopRecord {
    #[pyo3(get)]
    pub index: usize,
    #[pyo3(get)]
    pub id: PointId,
    #[pyo3(get)]
    pub time: f64,
    #[pyo3(get)]
    pub lon: f64,
    #[pyo3(get)]
    pub lat: f64,
}

#[cfg_attr(feature = "stubgen", gen_stub_pymethods)]
#[pymethods]
impl PyHopRecord {
    fn __repr__(&self) -> String {
        format!(
            "HopRecord(index={}, id={}, time={:.1})",
            self.index, self.id, self.time
        )
    }
}

/// Precondition failures become `ValueError`, everything else `RuntimeError`
pub(crate) fn to_py_err(error: Error) -> PyErr {
    if error.is_precondition() {
        PyErr::new::<pyo3::exceptions::PyValueError, _>(error.to_string())
    } else {
        PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(format!(
            "Route calculation failed: {error}"
        ))
    }
}

#[allow(clippy::too_many_arguments)]
fn search_hops(
    py: Python<'_>,
    road_model: &PyRoadModel,
    start_id: PointId,
    end_id: PointId,
    cross_time_field: &str,
    consider_disruptions: bool,
    max_speed: f64,
    weight: f64,
) -> PyResult<Vec<HopRecord<NodeIndex>>> {
    py.detach(|| {
        road_model.model.route_between(
            start_id,
            end_id,
            cross_time_field,
            consider_disruptions,
            max_speed,
            weight,
        )
    })
    .map_err(to_py_err)
}

fn to_py_hops(road_model: &PyRoadModel, hops: &[HopRecord<NodeIndex>]) -> Vec<PyHopRecord> {
    let graph = &road_model.model.graph;
    hops.iter()
        .map(|hop| {
            let position = graph.coordinate(hop.node);
            PyHopRecord {
                index: hop.index,
                id: graph.point_id(hop.node),
                time: hop.time,
                lon: position.x(),
                lat: position.y(),
            }
        })
        .collect()
}

/// Least-time route between two points
///
/// Parameters
/// ----------
/// road_model : RoadModel
///     Model to route on
/// start_id, end_id : int
///     Ids of the start and destination points; both must carry the
///     ``Point`` label
/// cross_time_field : str
///     Traversal-time field selecting the travel mode, e.g. ``crossTimeFoot``
/// consider_disruptions : bool
///     Whether disruptions slow down or close the ways they touch
/// max_speed : float
///     Speed cap in mph
///
/// Returns
/// -------
/// list[HopRecord]
///     Hops from the destination back towards the start. Empty when the
///     destination is unreachable or equals the start.
///
/// Raises
/// ------
/// ValueError
///     If a point is unknown or not routable, or ``max_speed`` is not positive
#[cfg_attr(feature = "stubgen", gen_stub_pyfunction)]
#[pyfunction]
#[pyo3(signature = (road_model, start_id, end_id, cross_time_field, consider_disruptions, max_speed))]
pub fn route(
    py: Python<'_>,
    road_model: &PyRoadModel,
    start_id: PointId,
    end_id: PointId,
    cross_time_field: &str,
    consider_disruptions: bool,
    max_speed: f64,
) -> PyResult<Vec<PyHopRecord>> {
    route_anytime(
        py,
        road_model,
        start_id,
        end_id,
        cross_time_field,
        consider_disruptions,
        max_speed,
        1.0,
    )
}

/// Route with an inflated heuristic
///
/// A ``weight`` above 1 explores fewer points at the price of a route that
/// may be up to ``weight`` times slower than the optimum.
///
/// Raises
/// ------
/// ValueError
///     If ``weight`` is below 1, or on any condition ``route`` rejects
#[cfg_attr(feature = "stubgen", gen_stub_pyfunction)]
#[pyfunction]
#[pyo3(signature = (road_model, start_id, end_id, cross_time_field, consider_disruptions, max_speed, weight))]
#[allow(clippy::too_many_arguments)]
pub fn route_anytime(
    py: Python<'_>,
    road_model: &PyRoadModel,
    start_id: PointId,
    end_id: PointId,
    cross_time_field: &str,
    consider_disruptions: bool,
    max_speed: f64,
    weight: f64,
) -> PyResult<Vec<PyHopRecord>> {
    let hops = search_hops(
        py,
        road_model,
        start_id,
        end_id,
        cross_time_field,
        consider_disruptions,
        max_speed,
        weight,
    )?;
    Ok(to_py_hops(road_model, &hops))
}

/// Nearest routable point to a coordinate
///
/// Returns ``(point_id, distance_in_metres)`` or None for a graph without
/// routable points.
#[cfg_attr(feature = "stubgen", gen_stub_pyfunction)]
#[pyfunction]
pub fn nearest_point(road_model: &PyRoadModel, x: f64, y: f64) -> Option<(PointId, f64)> {
    let graph = &road_model.model.graph;
    graph
        .nearest_point(&Point::new(x, y))
        .map(|(node, distance)| (graph.point_id(node), distance))
}

#[allow(clippy::too_many_arguments)]
fn route_itinerary(
    py: Python<'_>,
    road_model: &PyRoadModel,
    start_id: PointId,
    end_id: PointId,
    cross_time_field: &str,
    consider_disruptions: bool,
    max_speed: f64,
    weight: f64,
) -> PyResult<Option<RouteItinerary>> {
    let hops = search_hops(
        py,
        road_model,
        start_id,
        end_id,
        cross_time_field,
        consider_disruptions,
        max_speed,
        weight,
    )?;
    road_model.model.itinerary(start_id, &hops).map_err(to_py_err)
}

/// Route as a GeoJSON ``FeatureCollection`` string
///
/// The first feature is the route ``LineString``; one ``Point`` feature per
/// stop follows, starting with the start point. None if there is no route.
#[cfg_attr(feature = "stubgen", gen_stub_pyfunction)]
#[pyfunction]
#[pyo3(signature = (road_model, start_id, end_id, cross_time_field, consider_disruptions, max_speed, weight = 1.0))]
#[allow(clippy::too_many_arguments)]
pub fn route_geojson(
    py: Python<'_>,
    road_model: &PyRoadModel,
    start_id: PointId,
    end_id: PointId,
    cross_time_field: &str,
    consider_disruptions: bool,
    max_speed: f64,
    weight: f64,
) -> PyResult<Option<String>> {
    route_itinerary(
        py,
        road_model,
        start_id,
        end_id,
        cross_time_field,
        consider_disruptions,
        max_speed,
        weight,
    )?
    .map(|itinerary| itinerary.to_geojson_string().map_err(to_py_err))
    .transpose()
}

/// Route geometry as a WKT ``LINESTRING``, or None if there is no route
#[cfg_attr(feature = "stubgen", gen_stub_pyfunction)]
#[pyfunction]
#[pyo3(signature = (road_model, start_id, end_id, cross_time_field, consider_disruptions, max_speed, weight = 1.0))]
#[allow(clippy::too_many_arguments)]
pub fn route_wkt(
    py: Python<'_>,
    road_model: &PyRoadModel,
    start_id: PointId,
    end_id: PointId,
    cross_time_field: &str,
    consider_disruptions: bool,
    max_speed: f64,
    weight: f64,
) -> PyResult<Option<String>> {
    let itinerary = route_itinerary(
        py,
        road_model,
        start_id,
        end_id,
        cross_time_field,
        consider_disruptions,
        max_speed,
        weight,
    )?;
    Ok(itinerary.map(|itinerary| itinerary.to_line_string().wkt_string()))
}
