use serde_json::Value;

/// A reading's payload after the parse-and-classify step at the storage
/// boundary.
///
/// Classification is deliberately lossy: a payload that is not a JSON object,
/// belongs to an unknown sensor type, or is missing the one field its type
/// requires, lands in `Unknown` and contributes to no metric. Aggregations
/// filter on the `Option`-returning accessors instead of probing raw JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum SensorPayload {
    Energy {
        /// Consumption in kWh.
        energy: f64,
    },
    AirQuality {
        /// CO2 concentration in ppm.
        co2: Option<i64>,
        /// Relative humidity percentage.
        humidity: Option<i64>,
        /// Fine particulate matter in µg/m³. Stored but not aggregated yet.
        pm25: Option<i64>,
    },
    Motion {
        motion_detected: bool,
    },
    Unknown,
}

impl SensorPayload {
    /// Classify one reading's payload by its declared sensor type.
    ///
    /// Never fails: a field that is absent or not coercible to the expected
    /// kind simply yields no value, and a structurally corrupt payload (not
    /// an object) classifies as `Unknown`. One bad reading must never affect
    /// the rest of a batch.
    pub fn classify(sensor_type: &str, payload: &Value) -> Self {
        let Some(fields) = payload.as_object() else {
            return Self::Unknown;
        };

        match sensor_type {
            "energy" => match fields.get("energy").and_then(number_f64) {
                Some(energy) => Self::Energy { energy },
                None => Self::Unknown,
            },
            "air_quality" => Self::AirQuality {
                co2: fields.get("co2").and_then(number_i64),
                humidity: fields.get("humidity").and_then(number_i64),
                pm25: fields.get("pm25").and_then(number_i64),
            },
            // Some producers emit the snake_case spelling of the flag.
            "motion" => match fields
                .get("motionDetected")
                .or_else(|| fields.get("motion_detected"))
                .and_then(Value::as_bool)
            {
                Some(motion_detected) => Self::Motion { motion_detected },
                None => Self::Unknown,
            },
            _ => Self::Unknown,
        }
    }

    pub fn energy(&self) -> Option<f64> {
        match self {
            Self::Energy { energy } => Some(*energy),
            _ => None,
        }
    }

    pub fn co2(&self) -> Option<i64> {
        match self {
            Self::AirQuality { co2, .. } => *co2,
            _ => None,
        }
    }

    pub fn humidity(&self) -> Option<i64> {
        match self {
            Self::AirQuality { humidity, .. } => *humidity,
            _ => None,
        }
    }

    pub fn pm25(&self) -> Option<i64> {
        match self {
            Self::AirQuality { pm25, .. } => *pm25,
            _ => None,
        }
    }

    pub fn motion_detected(&self) -> Option<bool> {
        match self {
            Self::Motion { motion_detected } => Some(*motion_detected),
            _ => None,
        }
    }
}

/// Any JSON number is a valid float.
fn number_f64(v: &Value) -> Option<f64> {
    v.as_f64()
}

/// JSON integers, plus floats with an exact integral value. `3.5`, strings
/// and booleans yield nothing.
fn number_i64(v: &Value) -> Option<i64> {
    if let Some(i) = v.as_i64() {
        return Some(i);
    }
    let f = v.as_f64()?;
    if f.is_finite() && f.fract() == 0.0 && (i64::MIN as f64..=i64::MAX as f64).contains(&f) {
        Some(f as i64)
    } else {
        None
    }
}
