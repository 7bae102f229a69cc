use serde::{Deserialize, Serialize};

/// A single hospital admission, embedded in the owning patient document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admission {
    pub medical_condition: String,
    pub date_of_admission: String,
    pub discharge_date: String,
    pub doctor: String,
    pub hospital: String,
    pub room_number: i64,
    pub admission_type: String,
    pub medication: String,
    pub test_results: String,
    pub billing_amount: f64,
    pub insurance_provider: String,
}
