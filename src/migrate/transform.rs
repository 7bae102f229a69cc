//! Row-to-document transformation for the admissions export.

use std::collections::HashMap;

use chrono::{Datelike, Utc};
use serde::Deserialize;

use crate::models::{Admission, Patient};

/// One row of the source CSV, with the provider's column headers.
#[derive(Debug, Clone, Deserialize)]
pub struct AdmissionRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Age")]
    pub age: i32,
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Blood Type")]
    pub blood_type: String,
    #[serde(rename = "Medical Condition")]
    pub medical_condition: String,
    #[serde(rename = "Date of Admission")]
    pub date_of_admission: String,
    #[serde(rename = "Discharge Date")]
    pub discharge_date: String,
    #[serde(rename = "Doctor")]
    pub doctor: String,
    #[serde(rename = "Hospital")]
    pub hospital: String,
    #[serde(rename = "Room Number")]
    pub room_number: i64,
    #[serde(rename = "Admission Type")]
    pub admission_type: String,
    #[serde(rename = "Medication")]
    pub medication: String,
    #[serde(rename = "Test Results")]
    pub test_results: String,
    #[serde(rename = "Billing Amount")]
    pub billing_amount: f64,
    #[serde(rename = "Insurance Provider")]
    pub insurance_provider: String,
}

/// Derive a stable patient identifier from the name and birth year.
///
/// The export has no patient key, so name plus birth year is the best
/// grouping signal available; `None` maps to an `unknown` suffix.
pub fn patient_id(name: &str, birth_year: Option<i32>) -> String {
    let clean_name = name.trim().to_lowercase().replace(' ', "_");
    match birth_year {
        Some(year) => format!("patient_{}_{}", clean_name, year),
        None => format!("patient_{}_unknown", clean_name),
    }
}

/// Group admission rows into one document per patient, preserving the
/// order in which patients first appear in the file.
pub fn transform_rows(rows: &[AdmissionRow]) -> Vec<Patient> {
    let current_year = Utc::now().year();

    let mut patients: Vec<Patient> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let birth_year = current_year - row.age;
        let id = patient_id(&row.name, Some(birth_year));

        let idx = match index.get(&id) {
            Some(&i) => i,
            None => {
                patients.push(Patient {
                    id: id.clone(),
                    name: row.name.clone(),
                    age: row.age,
                    gender: row.gender.clone(),
                    blood_type: row.blood_type.clone(),
                    admissions: Vec::new(),
                });
                index.insert(id, patients.len() - 1);
                patients.len() - 1
            }
        };

        patients[idx].admissions.push(Admission {
            medical_condition: row.medical_condition.clone(),
            date_of_admission: row.date_of_admission.clone(),
            discharge_date: row.discharge_date.clone(),
            doctor: row.doctor.clone(),
            hospital: row.hospital.clone(),
            room_number: row.room_number,
            admission_type: row.admission_type.clone(),
            medication: row.medication.clone(),
            test_results: row.test_results.clone(),
            billing_amount: row.billing_amount,
            insurance_provider: row.insurance_provider.clone(),
        });
    }

    patients
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, age: i32, condition: &str) -> AdmissionRow {
        AdmissionRow {
            name: name.to_string(),
            age,
            gender: "Female".to_string(),
            blood_type: "A+".to_string(),
            medical_condition: condition.to_string(),
            date_of_admission: "2024-01-15".to_string(),
            discharge_date: "2024-01-20".to_string(),
            doctor: "Dr. Gregory House".to_string(),
            hospital: "Plainsboro".to_string(),
            room_number: 221,
            admission_type: "Emergency".to_string(),
            medication: "Ibuprofen".to_string(),
            test_results: "Normal".to_string(),
            billing_amount: 1234.56,
            insurance_provider: "Aetna".to_string(),
        }
    }

    #[test]
    fn patient_id_normalizes_name_and_appends_year() {
        assert_eq!(patient_id("Jane Doe", Some(1980)), "patient_jane_doe_1980");
    }

    #[test]
    fn patient_id_without_birth_year_uses_unknown() {
        assert_eq!(patient_id("Jane Doe", None), "patient_jane_doe_unknown");
    }

    #[test]
    fn patient_id_trims_surrounding_whitespace() {
        assert_eq!(patient_id("  Jane Doe ", Some(1980)), "patient_jane_doe_1980");
    }

    #[test]
    fn rows_for_the_same_patient_are_grouped() {
        let rows = vec![
            row("Jane Doe", 44, "Asthma"),
            row("Jane Doe", 44, "Diabetes"),
        ];
        let patients = transform_rows(&rows);
        assert_eq!(patients.len(), 1);
        assert_eq!(patients[0].admissions.len(), 2);
        assert_eq!(patients[0].admissions[0].medical_condition, "Asthma");
        assert_eq!(patients[0].admissions[1].medical_condition, "Diabetes");
    }

    #[test]
    fn same_name_different_age_is_a_different_patient() {
        let rows = vec![row("Jane Doe", 44, "Asthma"), row("Jane Doe", 70, "Asthma")];
        let patients = transform_rows(&rows);
        assert_eq!(patients.len(), 2);
    }

    #[test]
    fn first_seen_order_is_preserved() {
        let rows = vec![
            row("Jane Doe", 44, "Asthma"),
            row("John Roe", 61, "Arthritis"),
            row("Jane Doe", 44, "Diabetes"),
        ];
        let patients = transform_rows(&rows);
        assert_eq!(patients.len(), 2);
        assert_eq!(patients[0].name, "Jane Doe");
        assert_eq!(patients[1].name, "John Roe");
    }

    #[test]
    fn document_id_matches_derived_patient_id() {
        let rows = vec![row("Jane Doe", 44, "Asthma")];
        let patients = transform_rows(&rows);
        let birth_year = Utc::now().year() - 44;
        assert_eq!(patients[0].id, patient_id("Jane Doe", Some(birth_year)));
    }
}
