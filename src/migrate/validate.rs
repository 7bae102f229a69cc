//! Pre-insert integrity checks on the loaded CSV rows.

use std::collections::HashSet;

use super::error::MigrateError;
use super::transform::AdmissionRow;

/// Reject rows with missing critical values or duplicate patients.
///
/// Critical columns are the ones the transform keys on or that make a
/// record medically meaningless when absent: Name, Gender, Blood Type,
/// Medical Condition, Date of Admission, Doctor and Hospital (Age is
/// enforced as numeric by deserialization). Discharge Date may be empty
/// for patients still admitted. Duplicates are detected on Name + Age,
/// the same proxy key the patient id is derived from.
pub fn validate_rows(rows: &[AdmissionRow]) -> Result<(), MigrateError> {
    for (idx, row) in rows.iter().enumerate() {
        // 1-based, counting data rows (the header is not a row)
        let row_number = idx + 1;
        for (column, value) in [
            ("Name", row.name.as_str()),
            ("Gender", row.gender.as_str()),
            ("Blood Type", row.blood_type.as_str()),
            ("Medical Condition", row.medical_condition.as_str()),
            ("Date of Admission", row.date_of_admission.as_str()),
            ("Doctor", row.doctor.as_str()),
            ("Hospital", row.hospital.as_str()),
        ] {
            if value.trim().is_empty() {
                return Err(MigrateError::MissingValue {
                    row: row_number,
                    column,
                });
            }
        }
    }

    let mut seen: HashSet<(&str, i32)> = HashSet::new();
    for row in rows {
        if !seen.insert((row.name.as_str(), row.age)) {
            return Err(MigrateError::DuplicatePatient {
                name: row.name.clone(),
                age: row.age,
            });
        }
    }

    Ok(())
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
    fn clean_rows_pass() {
        let rows = vec![row("Jane Doe", 44, "Asthma"), row("John Roe", 61, "Arthritis")];
        assert!(validate_rows(&rows).is_ok());
    }

    #[test]
    fn empty_critical_value_is_rejected_with_row_and_column() {
        let mut bad = row("Jane Doe", 44, "Asthma");
        bad.medical_condition = "".to_string();
        let rows = vec![row("John Roe", 61, "Arthritis"), bad];

        match validate_rows(&rows) {
            Err(MigrateError::MissingValue { row, column }) => {
                assert_eq!(row, 2);
                assert_eq!(column, "Medical Condition");
            }
            other => panic!("expected MissingValue, got {:?}", other),
        }
    }

    #[test]
    fn whitespace_only_value_counts_as_missing() {
        let mut bad = row("Jane Doe", 44, "Asthma");
        bad.doctor = "   ".to_string();
        assert!(matches!(
            validate_rows(&[bad]),
            Err(MigrateError::MissingValue {
                column: "Doctor",
                ..
            })
        ));
    }

    #[test]
    fn empty_discharge_date_is_allowed() {
        // Patients still admitted have no discharge date yet
        let mut open_stay = row("Jane Doe", 44, "Asthma");
        open_stay.discharge_date = "".to_string();
        assert!(validate_rows(&[open_stay]).is_ok());
    }

    #[test]
    fn duplicate_name_and_age_is_rejected() {
        let rows = vec![
            row("Jane Doe", 44, "Asthma"),
            row("Jane Doe", 44, "Diabetes"),
        ];
        match validate_rows(&rows) {
            Err(MigrateError::DuplicatePatient { name, age }) => {
                assert_eq!(name, "Jane Doe");
                assert_eq!(age, 44);
            }
            other => panic!("expected DuplicatePatient, got {:?}", other),
        }
    }

    #[test]
    fn same_name_different_age_is_not_a_duplicate() {
        let rows = vec![row("Jane Doe", 44, "Asthma"), row("Jane Doe", 70, "Asthma")];
        assert!(validate_rows(&rows).is_ok());
    }
}
