//! CRUD walkthrough against the configured collection.
//!
//! Inserts a fixed demo patient, reads it back, bumps its age, reads again,
//! then deletes it. Useful as a smoke test of the `app_user` credentials
//! after provisioning.

use mongodb::bson::doc;
use mongodb::Collection;
use yansi::Paint;

use crate::models::Patient;

pub const DEMO_PATIENT_ID: &str = "patient_demo_001";

fn print_patient(patient: &Option<Patient>) {
    match patient {
        Some(p) => {
            let json = serde_json::to_string_pretty(p).unwrap_or_else(|_| format!("{:?}", p));
            println!("{}", Paint::new(json).rgb(100, 100, 100));
        }
        None => println!("{}", Paint::new("(not found)").dim()),
    }
}

/// Run the create/read/update/read/delete sequence. Driver errors
/// propagate unchanged and abort the remaining steps.
pub async fn run_demo(collection: &Collection<Patient>) -> mongodb::error::Result<()> {
    println!("{}", Paint::new("CREATE: inserting demo patient").bold());
    let patient = Patient {
        id: DEMO_PATIENT_ID.to_string(),
        name: "John Doe".to_string(),
        age: 45,
        gender: "Male".to_string(),
        blood_type: "Unknown".to_string(),
        admissions: vec![],
    };
    collection.insert_one(&patient).await?;

    println!("{}", Paint::new("READ: fetching demo patient").bold());
    let found = collection.find_one(doc! { "_id": DEMO_PATIENT_ID }).await?;
    print_patient(&found);

    println!("{}", Paint::new("UPDATE: setting age to 46").bold());
    collection
        .update_one(
            doc! { "_id": DEMO_PATIENT_ID },
            doc! { "$set": { "age": 46 } },
        )
        .await?;

    println!("{}", Paint::new("READ: fetching updated patient").bold());
    let found = collection.find_one(doc! { "_id": DEMO_PATIENT_ID }).await?;
    print_patient(&found);

    println!("{}", Paint::new("DELETE: removing demo patient").bold());
    collection.delete_one(doc! { "_id": DEMO_PATIENT_ID }).await?;

    println!("{}", Paint::new("CRUD demo finished").green());
    Ok(())
}
