//! Toll transaction fraud check - form client for a remote prediction API.
//!
//! The form collects ten transaction attributes, refuses negative amounts,
//! probes `GET /health`, then sends `POST /predict` and shows either the
//! classification or the error.

pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod panel;
pub mod runner;
pub mod submission;
pub mod tui;
pub mod types;

pub use client::{HttpPredictionClient, PredictionApi};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, FieldError};
pub use form::FormField;
pub use runner::RunReport;
pub use submission::{execute, Outcome, Phase, Submission, View};
pub use types::{
    Choice, FormState, LaneType, Numeric, PredictionResult, StateCode, VehicleDimensions,
    VehicleType,
};
