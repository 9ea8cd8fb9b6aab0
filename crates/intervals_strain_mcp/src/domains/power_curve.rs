use schemars::JsonSchema;
use serde::Serialize;
use serde_json::{Map, Value};

/// Best power for one duration.
#[derive(Clone, Debug, PartialEq, Serialize, JsonSchema)]
pub struct PowerCurvePoint {
    pub secs: i64,
    pub watts: Option<f64>,
    pub watts_per_kg: Option<f64>,
}

fn array<'a>(curve: &'a Map<String, Value>, key: &str) -> Option<&'a Vec<Value>> {
    curve.get(key).and_then(Value::as_array)
}

/// Reshape the parallel `secs`/`watts`/`watts_per_kg` arrays of the first
/// curve in `{"list": [...]}` into one point per duration.
pub fn power_curve_points(value: &Value) -> Vec<PowerCurvePoint> {
    let Some(curve) = value
        .get("list")
        .and_then(Value::as_array)
        .and_then(|list| list.first())
        .and_then(Value::as_object)
    else {
        return Vec::new();
    };

    let (Some(secs), Some(watts)) = (array(curve, "secs"), array(curve, "watts")) else {
        return Vec::new();
    };
    let wkg = array(curve, "watts_per_kg");

    secs.iter()
        .enumerate()
        .filter_map(|(i, s)| {
            Some(PowerCurvePoint {
                secs: s.as_i64()?,
                watts: watts.get(i).and_then(Value::as_f64),
                watts_per_kg: wkg.and_then(|w| w.get(i)).and_then(Value::as_f64),
            })
        })
        .collect()
}
