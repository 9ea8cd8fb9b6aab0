use serde_json::{Map, Value};

/// Athlete-level keys carried into the merged settings.
pub const ATHLETE_FIELDS: &[&str] = &[
    "weight",
    "name",
    "firstname",
    "lastname",
    "measurement_preference",
];

fn matches_sport(setting: &Map<String, Value>, sport_type: &str) -> bool {
    setting
        .get("types")
        .and_then(Value::as_array)
        .is_some_and(|types| {
            types
                .iter()
                .filter_map(Value::as_str)
                .any(|t| t.eq_ignore_ascii_case(sport_type))
        })
}

/// Merge athlete-level fields with the first sport settings entry covering
/// `sport_type` (case-insensitive).
///
/// Sport keys override athlete keys. Returns `None` if neither source
/// contributed anything.
pub fn merge_athlete_settings(
    athlete: &Value,
    sport_settings: &Value,
    sport_type: &str,
) -> Option<Map<String, Value>> {
    let mut merged = Map::new();

    if let Some(obj) = athlete.as_object() {
        for key in ATHLETE_FIELDS {
            if let Some(v) = obj.get(*key) {
                merged.insert((*key).to_string(), v.clone());
            }
        }
    }

    let sport = sport_settings
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
        .find(|s| matches_sport(s, sport_type));
    if let Some(setting) = sport {
        merged.extend(setting.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged.insert("sport_type".into(), Value::String(sport_type.to_string()));
    }

    if merged.is_empty() { None } else { Some(merged) }
}
