use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ---------- Categorical domains ----------

/// A closed set of string values, rendered as a dropdown in the form.
pub trait Choice: Sized + Copy + PartialEq + 'static {
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;

    fn parse(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == raw)
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|c| c == self).unwrap_or(0)
    }

    /// Next value in the domain, wrapping around.
    fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous value in the domain, wrapping around.
    fn prev(&self) -> Self {
        let n = Self::ALL.len();
        Self::ALL[(self.index() + n - 1) % n]
    }
}

macro_rules! choice_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $wire)] $variant),+
        }

        impl Choice for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

choice_enum!(
    VehicleType {
        Bus => "Bus",
        Car => "Car",
        Motorcycle => "Motorcycle",
        Suv => "SUV",
        Sedan => "Sedan",
        Truck => "Truck",
        Van => "Van",
    }
);

choice_enum!(
    LaneType {
        Express => "Express",
        Regular => "Regular",
    }
);

choice_enum!(
    VehicleDimensions {
        Large => "Large",
        Medium => "Medium",
        Small => "Small",
    }
);

choice_enum!(
    /// Registration state of the vehicle plate.
    StateCode {
        Ka => "KA",
        Mh => "MH",
        Tn => "TN",
        Dl => "DL",
        Up => "UP",
        Gj => "GJ",
        Rj => "RJ",
        Kl => "KL",
        Ap => "AP",
        Ts => "TS",
        Wb => "WB",
        Mp => "MP",
        Hr => "HR",
        Pb => "PB",
        Br => "BR",
    }
);

// ---------- Numeric entries ----------

/// A numeric form entry. `Empty` is the intermediate state while the user
/// has cleared the input; it is sent as zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric<T> {
    Empty,
    Value(T),
}

impl<T: Copy + Default> Numeric<T> {
    pub fn value(&self) -> T {
        match self {
            Numeric::Empty => T::default(),
            Numeric::Value(v) => *v,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Numeric::Empty)
    }
}

impl<T> From<T> for Numeric<T> {
    fn from(v: T) -> Self {
        Numeric::Value(v)
    }
}

impl<T: Copy + Default + std::fmt::Display> std::fmt::Display for Numeric<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Numeric::Empty => Ok(()),
            Numeric::Value(v) => write!(f, "{}", v),
        }
    }
}

impl<T: Copy + Default + Serialize> Serialize for Numeric<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value().serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Numeric<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Numeric::Value(v),
            None => Numeric::Empty,
        })
    }
}

// ---------- Request/Response types ----------

/// Toll transaction attributes submitted for classification.
/// Field names on the wire must match the backend byte-for-byte.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormState {
    #[serde(rename = "Vehicle_Type")]
    pub vehicle_type: VehicleType,
    #[serde(rename = "Lane_Type")]
    pub lane_type: LaneType,
    #[serde(rename = "Vehicle_Dimensions")]
    pub vehicle_dimensions: VehicleDimensions,
    #[serde(rename = "state_code")]
    pub state_code: StateCode,
    #[serde(rename = "Transaction_Amount")]
    pub transaction_amount: Numeric<f64>,
    #[serde(rename = "Amount_paid")]
    pub amount_paid: Numeric<f64>,
    #[serde(rename = "Vehicle_Speed")]
    pub vehicle_speed: Numeric<f64>, // km/h
    #[serde(rename = "Hour")]
    pub hour: Numeric<i64>, // 0-23
    #[serde(rename = "DayOfWeek")]
    pub day_of_week: Numeric<i64>, // 0-6, Monday = 0
    #[serde(rename = "Month")]
    pub month: Numeric<i64>, // 1-12
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            vehicle_type: VehicleType::Car,
            lane_type: LaneType::Regular,
            vehicle_dimensions: VehicleDimensions::Small,
            state_code: StateCode::Ka,
            transaction_amount: Numeric::Value(0.0),
            amount_paid: Numeric::Value(0.0),
            vehicle_speed: Numeric::Value(0.0),
            hour: Numeric::Value(12),
            day_of_week: Numeric::Value(0),
            month: Numeric::Value(1),
        }
    }
}

/// Classification returned by `POST /predict`.
/// Probabilities are taken as supplied; their sum is not checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub fraud: bool,
    pub prediction_label: String,
    pub probability_fraud: f64,
    pub probability_not_fraud: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Body optionally carried by non-2xx backend responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn wire_field_names_match_backend() {
        let v = serde_json::to_value(FormState::default()).unwrap();
        let mut keys: Vec<&str> = v.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "Amount_paid",
                "DayOfWeek",
                "Hour",
                "Lane_Type",
                "Month",
                "Transaction_Amount",
                "Vehicle_Dimensions",
                "Vehicle_Speed",
                "Vehicle_Type",
                "state_code",
            ]
        );
    }

    #[test]
    fn categorical_values_serialize_as_domain_strings() {
        let form = FormState {
            vehicle_type: VehicleType::Suv,
            lane_type: LaneType::Express,
            vehicle_dimensions: VehicleDimensions::Large,
            state_code: StateCode::Mh,
            ..FormState::default()
        };
        let v = serde_json::to_value(&form).unwrap();
        assert_eq!(v["Vehicle_Type"], "SUV");
        assert_eq!(v["Lane_Type"], "Express");
        assert_eq!(v["Vehicle_Dimensions"], "Large");
        assert_eq!(v["state_code"], "MH");
    }

    #[test]
    fn empty_numeric_is_sent_as_zero() {
        let form = FormState {
            transaction_amount: Numeric::Empty,
            hour: Numeric::Empty,
            ..FormState::default()
        };
        let v = serde_json::to_value(&form).unwrap();
        assert_eq!(v["Transaction_Amount"], json!(0.0));
        assert_eq!(v["Hour"], json!(0));
    }

    #[test]
    fn form_deserializes_null_as_empty() {
        let mut v = serde_json::to_value(FormState::default()).unwrap();
        v["Vehicle_Speed"] = Value::Null;
        let form: FormState = serde_json::from_value(v).unwrap();
        assert!(form.vehicle_speed.is_empty());
    }

    #[test]
    fn state_code_domain_has_fifteen_codes() {
        assert_eq!(StateCode::ALL.len(), 15);
        assert_eq!(StateCode::parse("TN"), Some(StateCode::Tn));
        assert_eq!(StateCode::parse("tn"), None);
    }

    #[test]
    fn choice_cycles_wrap_around() {
        assert_eq!(VehicleType::Van.next(), VehicleType::Bus);
        assert_eq!(VehicleType::Bus.prev(), VehicleType::Van);
        assert_eq!(LaneType::Express.next(), LaneType::Regular);
    }

    #[test]
    fn prediction_result_error_is_optional() {
        let r: PredictionResult = serde_json::from_value(json!({
            "fraud": false,
            "prediction_label": "Not Fraud",
            "probability_fraud": 0.2,
            "probability_not_fraud": 0.8
        }))
        .unwrap();
        assert!(r.error.is_none());
        assert!(!r.fraud);
    }
}
