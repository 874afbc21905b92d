//! Field-level editing of the transaction form and pre-submit validation.

use std::str::FromStr;

use crate::error::{ClientError, FieldError};
use crate::types::{Choice, FormState, Numeric};

/// The ten fields of the form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    VehicleType,
    LaneType,
    VehicleDimensions,
    StateCode,
    TransactionAmount,
    AmountPaid,
    VehicleSpeed,
    Hour,
    DayOfWeek,
    Month,
}

impl FormField {
    pub const ALL: [FormField; 10] = [
        FormField::VehicleType,
        FormField::LaneType,
        FormField::VehicleDimensions,
        FormField::StateCode,
        FormField::TransactionAmount,
        FormField::AmountPaid,
        FormField::VehicleSpeed,
        FormField::Hour,
        FormField::DayOfWeek,
        FormField::Month,
    ];

    /// Fields that must be non-negative before a request is sent.
    pub const NON_NEGATIVE: [FormField; 3] = [
        FormField::TransactionAmount,
        FormField::AmountPaid,
        FormField::VehicleSpeed,
    ];

    /// Field name as sent to the backend.
    pub fn wire_name(&self) -> &'static str {
        match self {
            FormField::VehicleType => "Vehicle_Type",
            FormField::LaneType => "Lane_Type",
            FormField::VehicleDimensions => "Vehicle_Dimensions",
            FormField::StateCode => "state_code",
            FormField::TransactionAmount => "Transaction_Amount",
            FormField::AmountPaid => "Amount_paid",
            FormField::VehicleSpeed => "Vehicle_Speed",
            FormField::Hour => "Hour",
            FormField::DayOfWeek => "DayOfWeek",
            FormField::Month => "Month",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::VehicleType => "Vehicle Type",
            FormField::LaneType => "Lane Type",
            FormField::VehicleDimensions => "Vehicle Dimensions",
            FormField::StateCode => "State Code",
            FormField::TransactionAmount => "Transaction Amount",
            FormField::AmountPaid => "Amount Paid",
            FormField::VehicleSpeed => "Vehicle Speed (km/h)",
            FormField::Hour => "Hour",
            FormField::DayOfWeek => "Day of Week",
            FormField::Month => "Month",
        }
    }

    pub fn is_numeric(&self) -> bool {
        !self.is_categorical()
    }

    pub fn is_categorical(&self) -> bool {
        matches!(
            self,
            FormField::VehicleType
                | FormField::LaneType
                | FormField::VehicleDimensions
                | FormField::StateCode
        )
    }

    /// Free-text amount inputs (as opposed to bounded dropdowns).
    pub fn is_amount(&self) -> bool {
        Self::NON_NEGATIVE.contains(self)
    }

    /// Inclusive range offered by the dropdown for time fields.
    pub fn time_range(&self) -> Option<(i64, i64)> {
        match self {
            FormField::Hour => Some((0, 23)),
            FormField::DayOfWeek => Some((0, 6)),
            FormField::Month => Some((1, 12)),
            _ => None,
        }
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for FormField {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormField::ALL
            .iter()
            .copied()
            .find(|f| f.wire_name() == s)
            .ok_or_else(|| FieldError::UnknownField(s.to_string()))
    }
}

// ---------- Lenient numeric parsing ----------

/// Parse raw input, coercing anything unparsable to zero.
pub trait ParseLenient: Sized {
    fn parse_lenient(raw: &str) -> Self;
}

impl ParseLenient for f64 {
    fn parse_lenient(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => 0.0,
        }
    }
}

impl ParseLenient for i64 {
    fn parse_lenient(raw: &str) -> Self {
        let raw = raw.trim();
        if let Ok(v) = raw.parse::<i64>() {
            return v;
        }
        let v = f64::parse_lenient(raw).trunc();
        if v >= i64::MIN as f64 && v <= i64::MAX as f64 {
            v as i64
        } else {
            0
        }
    }
}

fn numeric_entry<T: ParseLenient>(raw: &str) -> Numeric<T> {
    if raw.is_empty() {
        Numeric::Empty
    } else {
        Numeric::Value(T::parse_lenient(raw))
    }
}

fn choice<C: Choice>(field: FormField, raw: &str) -> Result<C, FieldError> {
    C::parse(raw).ok_or_else(|| FieldError::InvalidChoice {
        field,
        value: raw.to_string(),
    })
}

impl FormState {
    /// Apply a raw input value to one field.
    ///
    /// Numeric fields never fail: an empty string leaves the field empty and
    /// anything unparsable becomes zero. Categorical fields only accept a
    /// member of their domain. No range clamping is applied.
    pub fn update_field(&mut self, field: FormField, raw: &str) -> Result<(), FieldError> {
        match field {
            FormField::VehicleType => self.vehicle_type = choice(field, raw)?,
            FormField::LaneType => self.lane_type = choice(field, raw)?,
            FormField::VehicleDimensions => self.vehicle_dimensions = choice(field, raw)?,
            FormField::StateCode => self.state_code = choice(field, raw)?,
            FormField::TransactionAmount => self.transaction_amount = numeric_entry(raw),
            FormField::AmountPaid => self.amount_paid = numeric_entry(raw),
            FormField::VehicleSpeed => self.vehicle_speed = numeric_entry(raw),
            FormField::Hour => self.hour = numeric_entry(raw),
            FormField::DayOfWeek => self.day_of_week = numeric_entry(raw),
            FormField::Month => self.month = numeric_entry(raw),
        }
        Ok(())
    }

    /// Same as [`FormState::update_field`], addressing the field by wire name.
    pub fn update_named(&mut self, name: &str, raw: &str) -> Result<(), FieldError> {
        let field: FormField = name.parse()?;
        self.update_field(field, raw)
    }

    /// Current value of a field as display text. Empty numerics give "".
    pub fn display_value(&self, field: FormField) -> String {
        match field {
            FormField::VehicleType => self.vehicle_type.to_string(),
            FormField::LaneType => self.lane_type.to_string(),
            FormField::VehicleDimensions => self.vehicle_dimensions.to_string(),
            FormField::StateCode => self.state_code.to_string(),
            FormField::TransactionAmount => self.transaction_amount.to_string(),
            FormField::AmountPaid => self.amount_paid.to_string(),
            FormField::VehicleSpeed => self.vehicle_speed.to_string(),
            FormField::Hour => self.hour.to_string(),
            FormField::DayOfWeek => self.day_of_week.to_string(),
            FormField::Month => self.month.to_string(),
        }
    }

    fn amount(&self, field: FormField) -> Option<f64> {
        match field {
            FormField::TransactionAmount => Some(self.transaction_amount.value()),
            FormField::AmountPaid => Some(self.amount_paid.value()),
            FormField::VehicleSpeed => Some(self.vehicle_speed.value()),
            _ => None,
        }
    }

    /// Reject negative amounts or speed. Nothing else is range-checked.
    pub fn validate(&self) -> Result<(), ClientError> {
        let fields: Vec<FormField> = FormField::NON_NEGATIVE
            .iter()
            .copied()
            .filter(|f| self.amount(*f).is_some_and(|v| v < 0.0))
            .collect();
        if fields.is_empty() {
            Ok(())
        } else {
            Err(ClientError::Validation { fields })
        }
    }
}
